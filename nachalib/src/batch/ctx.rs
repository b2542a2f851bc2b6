//! Правила SEC-кода CTX — корпоративный обмен с расширенными ремитирующими
//! данными: до 9999 адденд 05 на проводку.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    for entry in &batch.entries {
        if !matches!(
            entry.transaction_code,
            22 | 23 | 24 | 27 | 28 | 29 | 32 | 33 | 34 | 37 | 38 | 39
        ) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "CTX",
            });
        }
        if entry.addenda05.len() > 9999 {
            return Err(AchError::FieldFormat {
                field: "Addenda05",
                msg: format!("{} records, CTX allows at most 9999", entry.addenda05.len()),
            });
        }
        if entry.addenda02.is_some() {
            return Err(AchError::FieldFormat {
                field: "Addenda02",
                msg: "not allowed for CTX".to_string(),
            });
        }
    }
    Ok(())
}

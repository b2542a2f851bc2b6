//! Правила SEC-кода CCD — корпоративные переводы, включая нулевые
//! ремитирующие проводки.

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
                context: "CCD",
            });
        }
        if entry.addenda05.len() > 1 {
            return Err(AchError::FieldFormat {
                field: "Addenda05",
                msg: format!("{} records, CCD allows at most one", entry.addenda05.len()),
            });
        }
        if entry.addenda02.is_some() {
            return Err(AchError::FieldFormat {
                field: "Addenda02",
                msg: "not allowed for CCD".to_string(),
            });
        }
    }
    Ok(())
}

//! Правила SEC-кода PPD — зачисления и списания по счетам физических лиц.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    for entry in &batch.entries {
        if !matches!(entry.transaction_code, 22 | 23 | 27 | 28 | 32 | 33 | 37 | 38) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "PPD",
            });
        }
        if entry.addenda05.len() > 1 {
            return Err(AchError::FieldFormat {
                field: "Addenda05",
                msg: format!("{} records, PPD allows at most one", entry.addenda05.len()),
            });
        }
        if entry.addenda02.is_some() {
            return Err(AchError::FieldFormat {
                field: "Addenda02",
                msg: "not allowed for PPD".to_string(),
            });
        }
    }
    Ok(())
}

//! Правила SEC-кода POS — карточные операции в точке продажи;
//! сведения о терминале передаются аддендой 02.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    for entry in &batch.entries {
        if !matches!(entry.transaction_code, 22 | 23 | 27 | 28 | 32 | 33 | 37 | 38) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "POS",
            });
        }
        if !entry.addenda05.is_empty() {
            return Err(AchError::FieldFormat {
                field: "Addenda05",
                msg: "not allowed for POS".to_string(),
            });
        }
    }
    Ok(())
}

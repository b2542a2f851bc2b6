//! Правила SEC-кода TEL — списания, авторизованные по телефону.
//! Только дебеты, адденды запрещены.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    for entry in &batch.entries {
        if !matches!(entry.transaction_code, 27 | 28 | 37 | 38) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "TEL",
            });
        }
        if !matches!(entry.payment_type(), "R" | "S") {
            return Err(AchError::FieldFormat {
                field: "PaymentType",
                msg: format!("{:?}, expected R or S", entry.payment_type()),
            });
        }
        if !entry.addenda05.is_empty() || entry.addenda02.is_some() {
            return Err(AchError::FieldFormat {
                field: "Addenda05",
                msg: "addenda are not allowed for TEL".to_string(),
            });
        }
    }
    Ok(())
}

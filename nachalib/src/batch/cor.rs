//! Правила SEC-кода COR — уведомления об изменении. Каждая проводка несёт
//! ровно одну адденду 98, суммы нулевые, коды транзакций — только NOC.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    for entry in &batch.entries {
        if !matches!(entry.transaction_code, 21 | 26 | 31 | 36 | 41 | 46 | 51 | 56) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "COR",
            });
        }
        if entry.amount != 0 {
            return Err(AchError::FieldFormat {
                field: "Amount",
                msg: format!("{}, notification of change carries no amount", entry.amount),
            });
        }
        if entry.addenda98.is_none() {
            return Err(AchError::FieldInclusion {
                record: "EntryDetail",
                field: "Addenda98",
            });
        }
        if !entry.addenda05.is_empty() || entry.addenda02.is_some() || entry.addenda99.is_some() {
            return Err(AchError::FieldFormat {
                field: "Addenda98",
                msg: "COR entries carry only a notification of change".to_string(),
            });
        }
    }
    Ok(())
}

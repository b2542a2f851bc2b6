//! Правила SEC-кода ADV — машинные авизо ACH-оператора: сервисный класс 280,
//! коды транзакций 81–84.

use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::ValidateOpts;
use crate::records::batch_header::SERVICE_CLASS_ADV;

pub(crate) fn validate(batch: &Batch, _opts: &ValidateOpts) -> Result<()> {
    if batch.header.service_class_code != SERVICE_CLASS_ADV {
        return Err(AchError::ServiceClassCode(batch.header.service_class_code));
    }
    for entry in &batch.adv_entries {
        if !matches!(entry.transaction_code, 81 | 82 | 83 | 84) {
            return Err(AchError::TransactionCode {
                code: entry.transaction_code,
                context: "ADV",
            });
        }
    }
    Ok(())
}

//! Контрольная запись батча (тип записи «8»).

use crate::error::{AchError, Result};
use crate::field;
use crate::records::batch_header::valid_service_class;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Итоги батча. Все значения пересчитываются в `create` и сверяются в
/// `validate`; хранятся копиями, а не ссылками.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchControl {
    pub service_class_code: u16,
    /// Количество проводок плюс количество адденд.
    pub entry_addenda_count: u32,
    /// Сумма восьмизначных идентификаторов RDFI, младшие десять разрядов.
    pub entry_hash: u64,
    pub total_debit: i64,
    pub total_credit: i64,
    /// Эхо CompanyIdentification из заголовка батча.
    pub company_identification: String,
    pub message_authentication_code: String,
    pub odfi_identification: String,
    pub batch_number: u32,
}

impl Record for BatchControl {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '8')?;
        Ok(BatchControl {
            service_class_code: field::parse_num(&field::slice(&c, 2, 4)) as u16,
            entry_addenda_count: field::parse_num(&field::slice(&c, 5, 10)) as u32,
            entry_hash: field::parse_num(&field::slice(&c, 11, 20)) as u64,
            total_debit: field::parse_num(&field::slice(&c, 21, 32)),
            total_credit: field::parse_num(&field::slice(&c, 33, 44)),
            company_identification: field::trim_alpha(&field::slice(&c, 45, 54)),
            message_authentication_code: field::trim_alpha(&field::slice(&c, 55, 73)),
            odfi_identification: field::trim_id(&field::slice(&c, 80, 87)),
            batch_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('8');
        out.push_str(&field::numeric(&self.service_class_code.to_string(), 3));
        out.push_str(&field::numeric(&self.entry_addenda_count.to_string(), 6));
        out.push_str(&field::numeric(&self.entry_hash.to_string(), 10));
        out.push_str(&field::amount(self.total_debit, 12));
        out.push_str(&field::amount(self.total_credit, 12));
        out.push_str(&field::alpha(&self.company_identification, 10));
        out.push_str(&field::alpha(&self.message_authentication_code, 19));
        out.push_str(&field::alpha("", 6));
        out.push_str(&field::numeric(&self.odfi_identification, 8));
        out.push_str(&field::numeric(&self.batch_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if !valid_service_class(self.service_class_code) {
            return Err(AchError::ServiceClassCode(self.service_class_code));
        }
        field::validate_alphanumeric("CompanyIdentification", &self.company_identification)?;
        field::validate_alphanumeric("MessageAuthenticationCode", &self.message_authentication_code)?;
        Ok(())
    }
}

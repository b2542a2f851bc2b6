//! Контрольная запись батча ADV: обороты по двадцать разрядов вместо
//! двенадцати, поле данных ACH-оператора вместо идентификации компании.

use crate::error::{AchError, Result};
use crate::field;
use crate::records::batch_header::valid_service_class;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvBatchControl {
    pub service_class_code: u16,
    pub entry_addenda_count: u32,
    pub entry_hash: u64,
    pub total_debit: i64,
    pub total_credit: i64,
    pub ach_operator_data: String,
    pub odfi_identification: String,
    pub batch_number: u32,
}

impl Record for AdvBatchControl {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '8')?;
        Ok(AdvBatchControl {
            service_class_code: field::parse_num(&field::slice(&c, 2, 4)) as u16,
            entry_addenda_count: field::parse_num(&field::slice(&c, 5, 10)) as u32,
            entry_hash: field::parse_num(&field::slice(&c, 11, 20)) as u64,
            total_debit: field::parse_num(&field::slice(&c, 21, 40)),
            total_credit: field::parse_num(&field::slice(&c, 41, 60)),
            ach_operator_data: field::trim_alpha(&field::slice(&c, 61, 79)),
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
        out.push_str(&field::amount(self.total_debit, 20));
        out.push_str(&field::amount(self.total_credit, 20));
        out.push_str(&field::alpha(&self.ach_operator_data, 19));
        out.push_str(&field::numeric(&self.odfi_identification, 8));
        out.push_str(&field::numeric(&self.batch_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if !valid_service_class(self.service_class_code) {
            return Err(AchError::ServiceClassCode(self.service_class_code));
        }
        field::validate_alphanumeric("ACHOperatorData", &self.ach_operator_data)?;
        Ok(())
    }
}

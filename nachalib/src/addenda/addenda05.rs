//! Адденда 05 — свободная платёжная информация.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Большинство SEC-кодов допускают не более одной адденды 05 на проводку,
/// CTX — до 9999.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda05 {
    pub type_code: String,
    pub payment_related_information: String,
    /// Порядковый номер адденды внутри проводки, с единицы.
    pub sequence_number: u16,
    /// Последние семь цифр трассировочного номера родительской проводки.
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda05 {
    fn default() -> Self {
        Addenda05 {
            type_code: "05".to_string(),
            payment_related_information: String::new(),
            sequence_number: 0,
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda05 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda05 {
            type_code: field::slice(&c, 2, 3),
            payment_related_information: field::trim_alpha(&field::slice(&c, 4, 83)),
            sequence_number: field::parse_num(&field::slice(&c, 84, 87)) as u16,
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.payment_related_information, 80));
        out.push_str(&field::numeric(&self.sequence_number.to_string(), 4));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "05" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "05",
            });
        }
        field::validate_alphanumeric("PaymentRelatedInformation", &self.payment_related_information)?;
        Ok(())
    }
}

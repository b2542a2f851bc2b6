//! Адденда 17 — необязательная платёжная информация IAT; до двух на проводку.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda17 {
    pub type_code: String,
    pub payment_related_information: String,
    pub sequence_number: u16,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda17 {
    fn default() -> Self {
        Addenda17 {
            type_code: "17".to_string(),
            payment_related_information: String::new(),
            sequence_number: 0,
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda17 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda17 {
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
        if self.type_code != "17" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "17",
            });
        }
        field::validate_iso8859("PaymentRelatedInformation", &self.payment_related_information)?;
        Ok(())
    }
}

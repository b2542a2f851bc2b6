//! Адденда 15 — идентификатор и улица получателя (IAT).

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda15 {
    pub type_code: String,
    pub receiver_id_number: String,
    pub receiver_street_address: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda15 {
    fn default() -> Self {
        Addenda15 {
            type_code: "15".to_string(),
            receiver_id_number: String::new(),
            receiver_street_address: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda15 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda15 {
            type_code: field::slice(&c, 2, 3),
            receiver_id_number: field::trim_alpha(&field::slice(&c, 4, 18)),
            receiver_street_address: field::trim_alpha(&field::slice(&c, 19, 53)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.receiver_id_number, 15));
        out.push_str(&field::alpha(&self.receiver_street_address, 35));
        out.push_str(&field::alpha("", 34));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "15" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "15",
            });
        }
        if self.receiver_street_address.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda15",
                field: "ReceiverStreetAddress",
            });
        }
        field::validate_iso8859("ReceiverIDNumber", &self.receiver_id_number)?;
        field::validate_iso8859("ReceiverStreetAddress", &self.receiver_street_address)?;
        Ok(())
    }
}

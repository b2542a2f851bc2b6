//! Адденда 11 — имя и улица оригинатора (IAT).

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda11 {
    pub type_code: String,
    pub originator_name: String,
    pub originator_street_address: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda11 {
    fn default() -> Self {
        Addenda11 {
            type_code: "11".to_string(),
            originator_name: String::new(),
            originator_street_address: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda11 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda11 {
            type_code: field::slice(&c, 2, 3),
            originator_name: field::trim_alpha(&field::slice(&c, 4, 38)),
            originator_street_address: field::trim_alpha(&field::slice(&c, 39, 73)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.originator_name, 35));
        out.push_str(&field::alpha(&self.originator_street_address, 35));
        out.push_str(&field::alpha("", 14));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "11" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "11",
            });
        }
        if self.originator_name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda11",
                field: "OriginatorName",
            });
        }
        if self.originator_street_address.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda11",
                field: "OriginatorStreetAddress",
            });
        }
        field::validate_iso8859("OriginatorName", &self.originator_name)?;
        field::validate_iso8859("OriginatorStreetAddress", &self.originator_street_address)?;
        Ok(())
    }
}

//! Адденда 12 — город и страна оригинатора (IAT).

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda12 {
    pub type_code: String,
    /// Город, штат или провинция, через «*» и «\».
    pub originator_city_state_province: String,
    /// Страна и почтовый индекс.
    pub originator_country_postal_code: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda12 {
    fn default() -> Self {
        Addenda12 {
            type_code: "12".to_string(),
            originator_city_state_province: String::new(),
            originator_country_postal_code: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda12 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda12 {
            type_code: field::slice(&c, 2, 3),
            originator_city_state_province: field::trim_alpha(&field::slice(&c, 4, 38)),
            originator_country_postal_code: field::trim_alpha(&field::slice(&c, 39, 73)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.originator_city_state_province, 35));
        out.push_str(&field::alpha(&self.originator_country_postal_code, 35));
        out.push_str(&field::alpha("", 14));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "12" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "12",
            });
        }
        if self.originator_city_state_province.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda12",
                field: "OriginatorCityStateProvince",
            });
        }
        if self.originator_country_postal_code.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda12",
                field: "OriginatorCountryPostalCode",
            });
        }
        field::validate_iso8859("OriginatorCityStateProvince", &self.originator_city_state_province)?;
        field::validate_iso8859("OriginatorCountryPostalCode", &self.originator_country_postal_code)?;
        Ok(())
    }
}

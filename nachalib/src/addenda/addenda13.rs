//! Адденда 13 — банк оригинатора (ODFI) в цепочке IAT.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Квалификаторы идентификатора банка: 01 — национальная клиринговая система,
/// 02 — BIC, 03 — IBAN.
pub fn valid_id_number_qualifier(code: &str) -> bool {
    matches!(code, "01" | "02" | "03")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda13 {
    pub type_code: String,
    pub odfi_name: String,
    pub odfi_id_number_qualifier: String,
    pub odfi_identification: String,
    pub odfi_branch_country_code: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda13 {
    fn default() -> Self {
        Addenda13 {
            type_code: "13".to_string(),
            odfi_name: String::new(),
            odfi_id_number_qualifier: String::new(),
            odfi_identification: String::new(),
            odfi_branch_country_code: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda13 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda13 {
            type_code: field::slice(&c, 2, 3),
            odfi_name: field::trim_alpha(&field::slice(&c, 4, 38)),
            odfi_id_number_qualifier: field::slice(&c, 39, 40),
            odfi_identification: field::trim_alpha(&field::slice(&c, 41, 74)),
            odfi_branch_country_code: field::trim_alpha(&field::slice(&c, 75, 77)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.odfi_name, 35));
        out.push_str(&field::alpha(&self.odfi_id_number_qualifier, 2));
        out.push_str(&field::alpha(&self.odfi_identification, 34));
        out.push_str(&field::alpha(&self.odfi_branch_country_code, 3));
        out.push_str(&field::alpha("", 10));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "13" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "13",
            });
        }
        if self.odfi_name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda13",
                field: "ODFIName",
            });
        }
        if !valid_id_number_qualifier(&self.odfi_id_number_qualifier) {
            return Err(AchError::FieldFormat {
                field: "ODFIIDNumberQualifier",
                msg: format!("{:?}, expected 01, 02 or 03", self.odfi_id_number_qualifier),
            });
        }
        if self.odfi_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda13",
                field: "ODFIIdentification",
            });
        }
        if self.odfi_branch_country_code.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda13",
                field: "ODFIBranchCountryCode",
            });
        }
        field::validate_iso8859("ODFIName", &self.odfi_name)?;
        field::validate_iso8859("ODFIIdentification", &self.odfi_identification)?;
        field::validate_iso8859("ODFIBranchCountryCode", &self.odfi_branch_country_code)?;
        Ok(())
    }
}

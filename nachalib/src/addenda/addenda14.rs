//! Адденда 14 — банк получателя (RDFI) в цепочке IAT.

use crate::addenda::addenda13::valid_id_number_qualifier;
use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda14 {
    pub type_code: String,
    pub rdfi_name: String,
    pub rdfi_id_number_qualifier: String,
    pub rdfi_identification: String,
    pub rdfi_branch_country_code: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda14 {
    fn default() -> Self {
        Addenda14 {
            type_code: "14".to_string(),
            rdfi_name: String::new(),
            rdfi_id_number_qualifier: String::new(),
            rdfi_identification: String::new(),
            rdfi_branch_country_code: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda14 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda14 {
            type_code: field::slice(&c, 2, 3),
            rdfi_name: field::trim_alpha(&field::slice(&c, 4, 38)),
            rdfi_id_number_qualifier: field::slice(&c, 39, 40),
            rdfi_identification: field::trim_alpha(&field::slice(&c, 41, 74)),
            rdfi_branch_country_code: field::trim_alpha(&field::slice(&c, 75, 77)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.rdfi_name, 35));
        out.push_str(&field::alpha(&self.rdfi_id_number_qualifier, 2));
        out.push_str(&field::alpha(&self.rdfi_identification, 34));
        out.push_str(&field::alpha(&self.rdfi_branch_country_code, 3));
        out.push_str(&field::alpha("", 10));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "14" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "14",
            });
        }
        if self.rdfi_name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda14",
                field: "RDFIName",
            });
        }
        if !valid_id_number_qualifier(&self.rdfi_id_number_qualifier) {
            return Err(AchError::FieldFormat {
                field: "RDFIIDNumberQualifier",
                msg: format!("{:?}, expected 01, 02 or 03", self.rdfi_id_number_qualifier),
            });
        }
        if self.rdfi_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda14",
                field: "RDFIIdentification",
            });
        }
        if self.rdfi_branch_country_code.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda14",
                field: "RDFIBranchCountryCode",
            });
        }
        field::validate_iso8859("RDFIName", &self.rdfi_name)?;
        field::validate_iso8859("RDFIIdentification", &self.rdfi_identification)?;
        field::validate_iso8859("RDFIBranchCountryCode", &self.rdfi_branch_country_code)?;
        Ok(())
    }
}

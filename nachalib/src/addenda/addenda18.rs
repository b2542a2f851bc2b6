//! Адденда 18 — банк-корреспондент в цепочке IAT; до пяти на проводку.

use crate::addenda::addenda13::valid_id_number_qualifier;
use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda18 {
    pub type_code: String,
    pub foreign_correspondent_bank_name: String,
    pub foreign_correspondent_bank_id_number_qualifier: String,
    pub foreign_correspondent_bank_id_number: String,
    pub foreign_correspondent_bank_branch_country_code: String,
    pub sequence_number: u16,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda18 {
    fn default() -> Self {
        Addenda18 {
            type_code: "18".to_string(),
            foreign_correspondent_bank_name: String::new(),
            foreign_correspondent_bank_id_number_qualifier: String::new(),
            foreign_correspondent_bank_id_number: String::new(),
            foreign_correspondent_bank_branch_country_code: String::new(),
            sequence_number: 0,
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda18 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda18 {
            type_code: field::slice(&c, 2, 3),
            foreign_correspondent_bank_name: field::trim_alpha(&field::slice(&c, 4, 38)),
            foreign_correspondent_bank_id_number_qualifier: field::slice(&c, 39, 40),
            foreign_correspondent_bank_id_number: field::trim_alpha(&field::slice(&c, 41, 74)),
            foreign_correspondent_bank_branch_country_code: field::trim_alpha(&field::slice(&c, 75, 77)),
            sequence_number: field::parse_num(&field::slice(&c, 84, 87)) as u16,
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.foreign_correspondent_bank_name, 35));
        out.push_str(&field::alpha(&self.foreign_correspondent_bank_id_number_qualifier, 2));
        out.push_str(&field::alpha(&self.foreign_correspondent_bank_id_number, 34));
        out.push_str(&field::alpha(&self.foreign_correspondent_bank_branch_country_code, 3));
        out.push_str(&field::alpha("", 6));
        out.push_str(&field::numeric(&self.sequence_number.to_string(), 4));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "18" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "18",
            });
        }
        if self.foreign_correspondent_bank_name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda18",
                field: "ForeignCorrespondentBankName",
            });
        }
        if !valid_id_number_qualifier(&self.foreign_correspondent_bank_id_number_qualifier) {
            return Err(AchError::FieldFormat {
                field: "ForeignCorrespondentBankIDNumberQualifier",
                msg: format!(
                    "{:?}, expected 01, 02 or 03",
                    self.foreign_correspondent_bank_id_number_qualifier
                ),
            });
        }
        if self.foreign_correspondent_bank_id_number.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda18",
                field: "ForeignCorrespondentBankIDNumber",
            });
        }
        if self.foreign_correspondent_bank_branch_country_code.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda18",
                field: "ForeignCorrespondentBankBranchCountryCode",
            });
        }
        field::validate_iso8859("ForeignCorrespondentBankName", &self.foreign_correspondent_bank_name)?;
        field::validate_iso8859(
            "ForeignCorrespondentBankIDNumber",
            &self.foreign_correspondent_bank_id_number,
        )?;
        Ok(())
    }
}

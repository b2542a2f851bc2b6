//! Адденда 02 — сведения о карточном терминале (POS/SHR).

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda02 {
    pub type_code: String,
    pub reference_information_one: String,
    pub reference_information_two: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    /// MMDD.
    pub transaction_date: String,
    pub authorization_code_or_expire_date: String,
    pub terminal_location: String,
    pub terminal_city: String,
    pub terminal_state: String,
    /// Эхо трассировочного номера родительской проводки.
    pub trace_number: String,
}

impl Default for Addenda02 {
    fn default() -> Self {
        Addenda02 {
            type_code: "02".to_string(),
            reference_information_one: String::new(),
            reference_information_two: String::new(),
            terminal_identification_code: String::new(),
            transaction_serial_number: String::new(),
            transaction_date: String::new(),
            authorization_code_or_expire_date: String::new(),
            terminal_location: String::new(),
            terminal_city: String::new(),
            terminal_state: String::new(),
            trace_number: String::new(),
        }
    }
}

impl Record for Addenda02 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda02 {
            type_code: field::slice(&c, 2, 3),
            reference_information_one: field::trim_alpha(&field::slice(&c, 4, 10)),
            reference_information_two: field::trim_alpha(&field::slice(&c, 11, 13)),
            terminal_identification_code: field::trim_alpha(&field::slice(&c, 14, 19)),
            transaction_serial_number: field::trim_alpha(&field::slice(&c, 20, 25)),
            transaction_date: field::slice(&c, 26, 29),
            authorization_code_or_expire_date: field::trim_alpha(&field::slice(&c, 30, 35)),
            terminal_location: field::trim_alpha(&field::slice(&c, 36, 62)),
            terminal_city: field::trim_alpha(&field::slice(&c, 63, 77)),
            terminal_state: field::trim_alpha(&field::slice(&c, 78, 79)),
            trace_number: field::trim_id(&field::slice(&c, 80, 94)),
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.reference_information_one, 7));
        out.push_str(&field::alpha(&self.reference_information_two, 3));
        out.push_str(&field::alpha(&self.terminal_identification_code, 6));
        out.push_str(&field::alpha(&self.transaction_serial_number, 6));
        out.push_str(&field::numeric(&self.transaction_date, 4));
        out.push_str(&field::alpha(&self.authorization_code_or_expire_date, 6));
        out.push_str(&field::alpha(&self.terminal_location, 27));
        out.push_str(&field::alpha(&self.terminal_city, 15));
        out.push_str(&field::alpha(&self.terminal_state, 2));
        out.push_str(&field::numeric(&self.trace_number, 15));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "02" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "02",
            });
        }
        if self.terminal_identification_code.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda02",
                field: "TerminalIdentificationCode",
            });
        }
        if self.transaction_serial_number.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda02",
                field: "TransactionSerialNumber",
            });
        }
        if !field::valid_mmdd(&self.transaction_date) {
            return Err(AchError::FieldFormat {
                field: "TransactionDate",
                msg: format!("{:?} is not an MMDD date", self.transaction_date),
            });
        }
        if self.terminal_location.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda02",
                field: "TerminalLocation",
            });
        }
        if self.terminal_city.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda02",
                field: "TerminalCity",
            });
        }
        if self.terminal_state.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda02",
                field: "TerminalState",
            });
        }
        field::validate_alphanumeric("ReferenceInformationOne", &self.reference_information_one)?;
        field::validate_alphanumeric("ReferenceInformationTwo", &self.reference_information_two)?;
        field::validate_alphanumeric("TerminalIdentificationCode", &self.terminal_identification_code)?;
        field::validate_alphanumeric("TransactionSerialNumber", &self.transaction_serial_number)?;
        field::validate_alphanumeric("TerminalLocation", &self.terminal_location)?;
        field::validate_alphanumeric("TerminalCity", &self.terminal_city)?;
        field::validate_alphanumeric("TerminalState", &self.terminal_state)?;
        Ok(())
    }
}

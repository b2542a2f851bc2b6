//! Проводка-авизо для батчей ADV (тип записи «6», раскладка отличается от
//! обычной проводки: суммы двенадцатиразрядные, вместо трассировочного номера —
//! маршрутный номер оператора, юлианский день и порядковый номер).

use crate::error::{AchError, Result};
use crate::field;
use crate::file::ValidateOpts;
use crate::records::entry_detail::{credit_transaction_code, valid_transaction_code};
use crate::traits::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvEntryDetail {
    /// 81–84: кредитовое/дебетовое авизо и их сводные варианты.
    pub transaction_code: u8,
    pub rdfi_identification: String,
    pub check_digit: String,
    pub dfi_account_number: String,
    /// Сумма в центах, до двенадцати разрядов.
    pub amount: i64,
    pub advice_routing_number: String,
    pub file_identification: String,
    pub ach_operator_data: String,
    pub individual_name: String,
    pub discretionary_data: String,
    pub addenda_record_indicator: u8,
    pub ach_operator_routing_number: String,
    pub julian_day: u16,
    pub sequence_number: u32,
}

impl AdvEntryDetail {
    pub fn is_credit(&self) -> bool {
        credit_transaction_code(self.transaction_code)
    }

    pub fn is_debit(&self) -> bool {
        !self.is_credit()
    }

    pub(crate) fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        if !valid_transaction_code(self.transaction_code) {
            return Err(AchError::TransactionCode {
                code: self.transaction_code,
                context: "ADV entry detail",
            });
        }
        if self.rdfi_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "AdvEntryDetail",
                field: "RDFIIdentification",
            });
        }
        let calculated = field::check_digit(&self.rdfi_identification)?;
        if field::parse_num(&self.check_digit) as u32 != calculated {
            return Err(AchError::ControlMismatch {
                field: "CheckDigit",
                stored: self.check_digit.clone(),
                calculated: calculated.to_string(),
            });
        }
        if self.dfi_account_number.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "AdvEntryDetail",
                field: "DFIAccountNumber",
            });
        }
        if !opts.allow_invalid_amounts && !(0..=999_999_999_999).contains(&self.amount) {
            return Err(AchError::FieldFormat {
                field: "Amount",
                msg: format!("{} does not fit in twelve digits", self.amount),
            });
        }
        if !field::valid_routing_number(&self.advice_routing_number) {
            return Err(AchError::FieldFormat {
                field: "AdviceRoutingNumber",
                msg: format!("{:?} is not a valid routing number", self.advice_routing_number),
            });
        }
        if self.individual_name.trim().is_empty() {
            return Err(AchError::FieldInclusion {
                record: "AdvEntryDetail",
                field: "IndividualName",
            });
        }
        field::validate_alphanumeric("DFIAccountNumber", &self.dfi_account_number)?;
        field::validate_alphanumeric("FileIdentification", &self.file_identification)?;
        field::validate_alphanumeric("ACHOperatorData", &self.ach_operator_data)?;
        field::validate_alphanumeric("IndividualName", &self.individual_name)?;
        field::validate_alphanumeric("DiscretionaryData", &self.discretionary_data)?;
        if self.ach_operator_routing_number.chars().count() != 8
            || !field::is_digits(&self.ach_operator_routing_number)
        {
            return Err(AchError::FieldFormat {
                field: "ACHOperatorRoutingNumber",
                msg: format!(
                    "{:?} is not an 8-digit identification",
                    self.ach_operator_routing_number
                ),
            });
        }
        if self.julian_day > 366 {
            return Err(AchError::FieldFormat {
                field: "JulianDay",
                msg: format!("{}, expected 0-366", self.julian_day),
            });
        }
        Ok(())
    }
}

impl Record for AdvEntryDetail {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '6')?;
        Ok(AdvEntryDetail {
            transaction_code: field::parse_num(&field::slice(&c, 2, 3)) as u8,
            rdfi_identification: field::trim_id(&field::slice(&c, 4, 11)),
            check_digit: field::slice(&c, 12, 12),
            dfi_account_number: field::trim_alpha(&field::slice(&c, 13, 27)),
            amount: field::parse_num(&field::slice(&c, 28, 39)),
            advice_routing_number: field::trim_id(&field::slice(&c, 40, 48)),
            file_identification: field::trim_alpha(&field::slice(&c, 49, 53)),
            ach_operator_data: field::trim_alpha(&field::slice(&c, 54, 54)),
            individual_name: field::trim_alpha(&field::slice(&c, 55, 76)),
            discretionary_data: field::trim_alpha(&field::slice(&c, 77, 78)),
            addenda_record_indicator: field::parse_num(&field::slice(&c, 79, 79)) as u8,
            ach_operator_routing_number: field::trim_id(&field::slice(&c, 80, 87)),
            julian_day: field::parse_num(&field::slice(&c, 88, 90)) as u16,
            sequence_number: field::parse_num(&field::slice(&c, 91, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('6');
        out.push_str(&field::numeric(&self.transaction_code.to_string(), 2));
        out.push_str(&field::numeric(&self.rdfi_identification, 8));
        out.push_str(&field::numeric(&self.check_digit, 1));
        out.push_str(&field::alpha(&self.dfi_account_number, 15));
        out.push_str(&field::amount(self.amount, 12));
        out.push_str(&field::numeric(&self.advice_routing_number, 9));
        out.push_str(&field::alpha(&self.file_identification, 5));
        out.push_str(&field::alpha(&self.ach_operator_data, 1));
        out.push_str(&field::alpha(&self.individual_name, 22));
        out.push_str(&field::alpha(&self.discretionary_data, 2));
        out.push_str(&field::numeric(&self.addenda_record_indicator.to_string(), 1));
        out.push_str(&field::numeric(&self.ach_operator_routing_number, 8));
        out.push_str(&field::numeric(&self.julian_day.to_string(), 3));
        out.push_str(&field::numeric(&self.sequence_number.to_string(), 4));
        out
    }

    fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }
}

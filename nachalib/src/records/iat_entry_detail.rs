//! Проводка международного батча IAT (тип записи «6»): счёт получателя на 35
//! символов, счётчик адденд и индикаторы OFAC-проверки.

use crate::addenda::addenda10::Addenda10;
use crate::addenda::addenda11::Addenda11;
use crate::addenda::addenda12::Addenda12;
use crate::addenda::addenda13::Addenda13;
use crate::addenda::addenda14::Addenda14;
use crate::addenda::addenda15::Addenda15;
use crate::addenda::addenda16::Addenda16;
use crate::addenda::addenda17::Addenda17;
use crate::addenda::addenda18::Addenda18;
use crate::addenda::addenda98::Addenda98;
use crate::addenda::addenda99::Addenda99;
use crate::error::{AchError, Result};
use crate::field;
use crate::file::ValidateOpts;
use crate::records::entry_detail::{
    credit_transaction_code, debit_transaction_code, prenote_transaction_code,
    valid_transaction_code,
};
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Проводка IAT владеет обязательной цепочкой адденд 10–16, необязательными
/// 17 (до двух) и 18 (до пяти), а также возвратом или уведомлением об
/// изменении, как и обычная проводка.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IatEntryDetail {
    pub transaction_code: u8,
    pub rdfi_identification: String,
    pub check_digit: String,
    /// Заявленное количество адденд проводки.
    pub addenda_records: u16,
    /// Сумма в центах, до десяти разрядов.
    pub amount: i64,
    pub dfi_account_number: String,
    pub ofac_screening_indicator: String,
    pub secondary_ofac_screening_indicator: String,
    pub addenda_record_indicator: u8,
    pub trace_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda10: Option<Addenda10>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda11: Option<Addenda11>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda12: Option<Addenda12>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda13: Option<Addenda13>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda14: Option<Addenda14>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda15: Option<Addenda15>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda16: Option<Addenda16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addenda17: Vec<Addenda17>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addenda18: Vec<Addenda18>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda98: Option<Addenda98>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda99: Option<Addenda99>,
}

impl IatEntryDetail {
    pub fn is_credit(&self) -> bool {
        credit_transaction_code(self.transaction_code)
    }

    pub fn is_debit(&self) -> bool {
        debit_transaction_code(self.transaction_code)
    }

    /// Фактическое количество адденд, принадлежащих проводке.
    pub fn addenda_count(&self) -> u32 {
        u32::from(self.addenda10.is_some())
            + u32::from(self.addenda11.is_some())
            + u32::from(self.addenda12.is_some())
            + u32::from(self.addenda13.is_some())
            + u32::from(self.addenda14.is_some())
            + u32::from(self.addenda15.is_some())
            + u32::from(self.addenda16.is_some())
            + self.addenda17.len() as u32
            + self.addenda18.len() as u32
            + u32::from(self.addenda98.is_some())
            + u32::from(self.addenda99.is_some())
    }

    pub fn set_trace_number(&mut self, odfi_identification: &str, sequence: u32) {
        self.trace_number = format!(
            "{}{}",
            field::numeric(odfi_identification, 8),
            field::numeric(&sequence.to_string(), 7)
        );
    }

    /// Последние семь цифр трассировочного номера.
    pub fn trace_sequence(&self) -> u32 {
        let tail: String = self
            .trace_number
            .chars()
            .rev()
            .take(7)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        field::parse_num(&tail) as u32
    }

    pub(crate) fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        if !valid_transaction_code(self.transaction_code) {
            return Err(AchError::TransactionCode {
                code: self.transaction_code,
                context: "IAT entry detail",
            });
        }
        if self.rdfi_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatEntryDetail",
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
        if !opts.allow_invalid_amounts && !(0..=9_999_999_999).contains(&self.amount) {
            return Err(AchError::FieldFormat {
                field: "Amount",
                msg: format!("{} does not fit in ten digits", self.amount),
            });
        }
        if prenote_transaction_code(self.transaction_code) && self.amount != 0 {
            return Err(AchError::FieldFormat {
                field: "Amount",
                msg: format!("prenotification carries amount {}", self.amount),
            });
        }
        if self.dfi_account_number.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatEntryDetail",
                field: "DFIAccountNumber",
            });
        }
        field::validate_iso8859("DFIAccountNumber", &self.dfi_account_number)?;
        if !self.trace_number.is_empty()
            && (self.trace_number.chars().count() != 15 || !field::is_digits(&self.trace_number))
        {
            return Err(AchError::FieldFormat {
                field: "TraceNumber",
                msg: format!("{:?} is not a 15-digit trace number", self.trace_number),
            });
        }
        Ok(())
    }
}

impl Record for IatEntryDetail {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '6')?;
        Ok(IatEntryDetail {
            transaction_code: field::parse_num(&field::slice(&c, 2, 3)) as u8,
            rdfi_identification: field::trim_id(&field::slice(&c, 4, 11)),
            check_digit: field::slice(&c, 12, 12),
            addenda_records: field::parse_num(&field::slice(&c, 13, 16)) as u16,
            amount: field::parse_num(&field::slice(&c, 30, 39)),
            dfi_account_number: field::trim_alpha(&field::slice(&c, 40, 74)),
            ofac_screening_indicator: field::trim_alpha(&field::slice(&c, 77, 77)),
            secondary_ofac_screening_indicator: field::trim_alpha(&field::slice(&c, 78, 78)),
            addenda_record_indicator: field::parse_num(&field::slice(&c, 79, 79)) as u8,
            trace_number: field::trim_id(&field::slice(&c, 80, 94)),
            ..IatEntryDetail::default()
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('6');
        out.push_str(&field::numeric(&self.transaction_code.to_string(), 2));
        out.push_str(&field::numeric(&self.rdfi_identification, 8));
        out.push_str(&field::numeric(&self.check_digit, 1));
        out.push_str(&field::numeric(&self.addenda_records.to_string(), 4));
        out.push_str(&field::alpha("", 13));
        out.push_str(&field::amount(self.amount, 10));
        out.push_str(&field::alpha(&self.dfi_account_number, 35));
        out.push_str(&field::alpha("", 2));
        out.push_str(&field::alpha(&self.ofac_screening_indicator, 1));
        out.push_str(&field::alpha(&self.secondary_ofac_screening_indicator, 1));
        out.push_str(&field::numeric(&self.addenda_record_indicator.to_string(), 1));
        out.push_str(&field::numeric(&self.trace_number, 15));
        out
    }

    fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }
}

//! Проводка батча (тип записи «6») и классификация кодов транзакций.

use crate::addenda::addenda02::Addenda02;
use crate::addenda::addenda05::Addenda05;
use crate::addenda::addenda98::Addenda98;
use crate::addenda::addenda99::Addenda99;
use crate::error::{AchError, Result};
use crate::field;
use crate::file::ValidateOpts;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Допустимые коды транзакций: чековые, сберегательные, счета главной книги,
/// кредитные счета и машинные авизо.
pub fn valid_transaction_code(code: u8) -> bool {
    matches!(
        code,
        21..=24 | 26..=29 | 31..=34 | 36..=39 | 41..=44 | 46..=49 | 51..=56 | 81..=88
    )
}

/// Кредитовые коды: в десятках 20–50 последняя цифра 1–4, в ADV — нечётные.
pub fn credit_transaction_code(code: u8) -> bool {
    match code {
        81 | 83 | 85 | 87 => true,
        82 | 84 | 86 | 88 => false,
        c => matches!(c % 10, 1..=4),
    }
}

pub fn debit_transaction_code(code: u8) -> bool {
    valid_transaction_code(code) && !credit_transaction_code(code)
}

/// Пренотификация; сумма обязана быть нулевой.
pub fn prenote_transaction_code(code: u8) -> bool {
    matches!(code, 23 | 28 | 33 | 38 | 43 | 48 | 53)
}

/// Проводка: получатель, сумма и трассировочный номер. Владеет своими
/// аддендами; ссылок назад на батч нет.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDetail {
    pub transaction_code: u8,
    /// Восемь цифр маршрутного номера RDFI без контрольной цифры.
    pub rdfi_identification: String,
    /// Контрольная цифра к RDFIIdentification (mod 10, веса 3-7-1).
    pub check_digit: String,
    pub dfi_account_number: String,
    /// Сумма в центах, до десяти разрядов.
    pub amount: i64,
    pub individual_identification_number: String,
    pub individual_name: String,
    /// Для WEB и TEL здесь код типа платежа: R — повторяющийся, S — разовый.
    pub discretionary_data: String,
    pub addenda_record_indicator: u8,
    /// Пятнадцать цифр: восемь цифр ODFI плюс семизначный порядковый номер.
    /// Уникален в пределах батча.
    pub trace_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda02: Option<Addenda02>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addenda05: Vec<Addenda05>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda98: Option<Addenda98>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addenda99: Option<Addenda99>,
}

impl EntryDetail {
    pub fn is_credit(&self) -> bool {
        credit_transaction_code(self.transaction_code)
    }

    pub fn is_debit(&self) -> bool {
        debit_transaction_code(self.transaction_code)
    }

    /// Количество записей-адденд, принадлежащих проводке.
    pub fn addenda_count(&self) -> u32 {
        u32::from(self.addenda02.is_some())
            + self.addenda05.len() as u32
            + u32::from(self.addenda98.is_some())
            + u32::from(self.addenda99.is_some())
    }

    /// Трассировочный номер из ODFI и порядкового номера внутри батча.
    pub fn set_trace_number(&mut self, odfi_identification: &str, sequence: u32) {
        self.trace_number = format!(
            "{}{}",
            field::numeric(odfi_identification, 8),
            field::numeric(&sequence.to_string(), 7)
        );
    }

    /// Последние семь цифр трассировочного номера — порядковый номер проводки,
    /// который эхом повторяется в аддендах.
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

    /// Код типа платежа для WEB и TEL.
    pub fn payment_type(&self) -> &str {
        self.discretionary_data.trim()
    }

    pub(crate) fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        if !valid_transaction_code(self.transaction_code) {
            return Err(AchError::TransactionCode {
                code: self.transaction_code,
                context: "entry detail",
            });
        }
        if self.rdfi_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "EntryDetail",
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
                record: "EntryDetail",
                field: "DFIAccountNumber",
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
        if self.individual_name.trim().is_empty() {
            return Err(AchError::FieldInclusion {
                record: "EntryDetail",
                field: "IndividualName",
            });
        }
        field::validate_alphanumeric("DFIAccountNumber", &self.dfi_account_number)?;
        field::validate_alphanumeric("IndividualIdentificationNumber", &self.individual_identification_number)?;
        field::validate_alphanumeric("IndividualName", &self.individual_name)?;
        field::validate_alphanumeric("DiscretionaryData", &self.discretionary_data)?;
        if self.addenda_record_indicator > 1 {
            return Err(AchError::FieldFormat {
                field: "AddendaRecordIndicator",
                msg: format!("{}, expected 0 or 1", self.addenda_record_indicator),
            });
        }
        if !self.trace_number.is_empty()
            && (self.trace_number.chars().count() != 15 || !field::is_digits(&self.trace_number))
        {
            return Err(AchError::FieldFormat {
                field: "TraceNumber",
                msg: format!("{:?} is not a 15-digit trace number", self.trace_number),
            });
        }
        let addenda_present = self.addenda_count() > 0;
        if addenda_present && self.addenda_record_indicator != 1 {
            return Err(AchError::FieldFormat {
                field: "AddendaRecordIndicator",
                msg: "addenda present but indicator is 0".to_string(),
            });
        }
        if !addenda_present && self.addenda_record_indicator == 1 {
            return Err(AchError::FieldFormat {
                field: "AddendaRecordIndicator",
                msg: "indicator is 1 but no addenda present".to_string(),
            });
        }
        if let Some(a) = &self.addenda02 {
            a.validate()?;
        }
        for a in &self.addenda05 {
            a.validate()?;
        }
        if let Some(a) = &self.addenda98 {
            a.validate()?;
        }
        if let Some(a) = &self.addenda99 {
            a.validate()?;
        }
        Ok(())
    }
}

impl Record for EntryDetail {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '6')?;
        Ok(EntryDetail {
            transaction_code: field::parse_num(&field::slice(&c, 2, 3)) as u8,
            rdfi_identification: field::trim_id(&field::slice(&c, 4, 11)),
            check_digit: field::slice(&c, 12, 12),
            dfi_account_number: field::trim_alpha(&field::slice(&c, 13, 29)),
            amount: field::parse_num(&field::slice(&c, 30, 39)),
            individual_identification_number: field::trim_alpha(&field::slice(&c, 40, 54)),
            individual_name: field::trim_alpha(&field::slice(&c, 55, 76)),
            discretionary_data: field::trim_alpha(&field::slice(&c, 77, 78)),
            addenda_record_indicator: field::parse_num(&field::slice(&c, 79, 79)) as u8,
            trace_number: field::trim_id(&field::slice(&c, 80, 94)),
            addenda02: None,
            addenda05: Vec::new(),
            addenda98: None,
            addenda99: None,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('6');
        out.push_str(&field::numeric(&self.transaction_code.to_string(), 2));
        out.push_str(&field::numeric(&self.rdfi_identification, 8));
        out.push_str(&field::numeric(&self.check_digit, 1));
        out.push_str(&field::alpha(&self.dfi_account_number, 17));
        out.push_str(&field::amount(self.amount, 10));
        out.push_str(&field::alpha(&self.individual_identification_number, 15));
        out.push_str(&field::alpha(&self.individual_name, 22));
        out.push_str(&field::alpha(&self.discretionary_data, 2));
        out.push_str(&field::numeric(&self.addenda_record_indicator.to_string(), 1));
        out.push_str(&field::numeric(&self.trace_number, 15));
        out
    }

    fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }
}

//! Батч стандартных SEC-кодов: заголовок, проводки с аддендами и контрольная
//! запись. Правила конкретного SEC-кода подключаются через закрытое
//! перечисление `SecCode` — набор кодов фиксирован правилами NACHA.

pub mod adv;
pub mod ccd;
pub mod cor;
pub mod ctx;
pub mod iat;
pub mod pos;
pub mod ppd;
pub mod tel;
pub mod web;

use crate::error::{AchError, Result};
use crate::field;
use crate::file::ValidateOpts;
use crate::records::adv_batch_control::AdvBatchControl;
use crate::records::adv_entry_detail::AdvEntryDetail;
use crate::records::batch_control::BatchControl;
use crate::records::batch_header::{BatchHeader, SERVICE_CLASS_CREDITS, SERVICE_CLASS_DEBITS};
use crate::records::entry_detail::EntryDetail;
use crate::traits::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Закрытое множество поддерживаемых SEC-кодов. Международные батчи (IAT)
/// устроены иначе и живут в [`iat::IatBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecCode {
    Ppd,
    Ccd,
    Ctx,
    Web,
    Tel,
    Pos,
    Cor,
    Adv,
}

impl SecCode {
    pub fn from_code(code: &str) -> Option<SecCode> {
        match code {
            "PPD" => Some(SecCode::Ppd),
            "CCD" => Some(SecCode::Ccd),
            "CTX" => Some(SecCode::Ctx),
            "WEB" => Some(SecCode::Web),
            "TEL" => Some(SecCode::Tel),
            "POS" => Some(SecCode::Pos),
            "COR" => Some(SecCode::Cor),
            "ADV" => Some(SecCode::Adv),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SecCode::Ppd => "PPD",
            SecCode::Ccd => "CCD",
            SecCode::Ctx => "CTX",
            SecCode::Web => "WEB",
            SecCode::Tel => "TEL",
            SecCode::Pos => "POS",
            SecCode::Cor => "COR",
            SecCode::Adv => "ADV",
        }
    }
}

/// Батч владеет своими проводками; проводки не ссылаются назад на батч.
/// Для SEC-кода ADV проводки и контрольная запись имеют собственную
/// раскладку и лежат в отдельных полях.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Batch {
    #[serde(rename = "batchHeader")]
    pub header: BatchHeader,
    #[serde(rename = "entryDetails", skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryDetail>,
    #[serde(rename = "advEntryDetails", skip_serializing_if = "Vec::is_empty")]
    pub adv_entries: Vec<AdvEntryDetail>,
    #[serde(rename = "batchControl")]
    pub control: BatchControl,
    #[serde(rename = "advBatchControl", skip_serializing_if = "Option::is_none")]
    pub adv_control: Option<AdvBatchControl>,
}

impl Batch {
    pub fn new(header: BatchHeader) -> Batch {
        Batch {
            header,
            ..Batch::default()
        }
    }

    pub fn add_entry(&mut self, entry: EntryDetail) {
        self.entries.push(entry);
    }

    pub fn add_adv_entry(&mut self, entry: AdvEntryDetail) {
        self.adv_entries.push(entry);
    }

    /// SEC-код заголовка; неизвестный код — ошибка.
    pub fn sec(&self) -> Result<SecCode> {
        SecCode::from_code(&self.header.standard_entry_class_code)
            .ok_or_else(|| AchError::SecCode(self.header.standard_entry_class_code.clone()))
    }

    pub fn is_adv(&self) -> bool {
        self.header.standard_entry_class_code == "ADV"
    }

    /// Проводки плюс адденды — слагаемое контрольных записей.
    pub fn entry_addenda_count(&self) -> u32 {
        if self.is_adv() {
            self.adv_entries.len() as u32
        } else {
            self.entries
                .iter()
                .map(|e| 1 + e.addenda_count())
                .sum()
        }
    }

    /// Сумма восьмизначных идентификаторов RDFI, усечённая до десяти разрядов.
    pub fn calculated_entry_hash(&self) -> u64 {
        let sum: u64 = if self.is_adv() {
            self.adv_entries
                .iter()
                .map(|e| field::parse_num(&e.rdfi_identification) as u64)
                .sum()
        } else {
            self.entries
                .iter()
                .map(|e| field::parse_num(&e.rdfi_identification) as u64)
                .sum()
        };
        field::least_significant(sum, 10)
    }

    pub fn calculated_total_debit(&self) -> i64 {
        if self.is_adv() {
            self.adv_entries
                .iter()
                .filter(|e| e.is_debit())
                .map(|e| e.amount)
                .sum()
        } else {
            self.entries
                .iter()
                .filter(|e| e.is_debit())
                .map(|e| e.amount)
                .sum()
        }
    }

    pub fn calculated_total_credit(&self) -> i64 {
        if self.is_adv() {
            self.adv_entries
                .iter()
                .filter(|e| e.is_credit())
                .map(|e| e.amount)
                .sum()
        } else {
            self.entries
                .iter()
                .filter(|e| e.is_credit())
                .map(|e| e.amount)
                .sum()
        }
    }

    /// Множество трассировочных номеров батча.
    pub fn trace_numbers(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.trace_number.clone()).collect()
    }

    pub fn create(&mut self) -> Result<()> {
        self.create_with(&ValidateOpts::default())
    }

    /// Наполняет производные поля: трассировочные номера (если вызывающий не
    /// оставил свои через `custom_trace_numbers`), контрольные цифры,
    /// индикаторы и порядковые номера адденд, контрольную запись с итогами.
    /// Повторный вызов пересчитывает то же самое — операция идемпотентна.
    pub fn create_with(&mut self, opts: &ValidateOpts) -> Result<()> {
        self.header.validate()?;
        let sec = self.sec()?;

        if sec == SecCode::Adv {
            if self.adv_entries.is_empty() {
                return Err(AchError::FieldInclusion {
                    record: "Batch",
                    field: "AdvEntryDetails",
                });
            }
            for (i, entry) in self.adv_entries.iter_mut().enumerate() {
                entry.sequence_number = (i + 1) as u32;
                entry.check_digit = field::check_digit(&entry.rdfi_identification)?.to_string();
                entry.addenda_record_indicator = 0;
            }
            let operator_data = self
                .adv_control
                .as_ref()
                .map(|c| c.ach_operator_data.clone())
                .unwrap_or_default();
            self.adv_control = Some(AdvBatchControl {
                service_class_code: self.header.service_class_code,
                entry_addenda_count: self.entry_addenda_count(),
                entry_hash: self.calculated_entry_hash(),
                total_debit: self.calculated_total_debit(),
                total_credit: self.calculated_total_credit(),
                ach_operator_data: operator_data,
                odfi_identification: self.header.odfi_identification.clone(),
                batch_number: self.header.batch_number,
            });
            return Ok(());
        }

        if self.entries.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Batch",
                field: "EntryDetails",
            });
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if !opts.custom_trace_numbers {
                entry.set_trace_number(&self.header.odfi_identification, (i + 1) as u32);
            }
            entry.check_digit = field::check_digit(&entry.rdfi_identification)?.to_string();
            entry.addenda_record_indicator = if entry.addenda_count() > 0 { 1 } else { 0 };
            let sequence = entry.trace_sequence();
            let trace = entry.trace_number.clone();
            if let Some(a) = &mut entry.addenda02 {
                a.trace_number = trace.clone();
            }
            for (j, a) in entry.addenda05.iter_mut().enumerate() {
                a.sequence_number = (j + 1) as u16;
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda98 {
                a.trace_number = trace.clone();
            }
            if let Some(a) = &mut entry.addenda99 {
                a.trace_number = trace;
            }
        }
        self.adv_control = None;
        self.control = BatchControl {
            service_class_code: self.header.service_class_code,
            entry_addenda_count: self.entry_addenda_count(),
            entry_hash: self.calculated_entry_hash(),
            total_debit: self.calculated_total_debit(),
            total_credit: self.calculated_total_credit(),
            company_identification: self.header.company_identification.clone(),
            message_authentication_code: self.control.message_authentication_code.clone(),
            odfi_identification: self.header.odfi_identification.clone(),
            batch_number: self.header.batch_number,
        };
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }

    /// Полная проверка: заголовок, правила SEC-кода, построчные правила
    /// проводок и сверка контрольной записи с пересчитанными итогами.
    pub fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        self.header.validate()?;
        let sec = self.sec()?;
        match sec {
            SecCode::Ppd => ppd::validate(self, opts)?,
            SecCode::Ccd => ccd::validate(self, opts)?,
            SecCode::Ctx => ctx::validate(self, opts)?,
            SecCode::Web => web::validate(self, opts)?,
            SecCode::Tel => tel::validate(self, opts)?,
            SecCode::Pos => pos::validate(self, opts)?,
            SecCode::Cor => cor::validate(self, opts)?,
            SecCode::Adv => adv::validate(self, opts)?,
        }
        if sec == SecCode::Adv {
            self.verify_adv(opts)
        } else {
            self.verify_standard(opts)
        }
    }

    fn verify_standard(&self, opts: &ValidateOpts) -> Result<()> {
        if !self.adv_entries.is_empty() {
            return Err(AchError::FieldFormat {
                field: "AdvEntryDetails",
                msg: "ADV entries in a non-ADV batch".to_string(),
            });
        }
        if self.entries.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Batch",
                field: "EntryDetails",
            });
        }
        let mut seen = HashSet::new();
        let mut previous: Option<&str> = None;
        for entry in &self.entries {
            entry.validate_with(opts)?;
            if self.header.service_class_code == SERVICE_CLASS_CREDITS && entry.is_debit() {
                return Err(AchError::TransactionCode {
                    code: entry.transaction_code,
                    context: "credits-only batch",
                });
            }
            if self.header.service_class_code == SERVICE_CLASS_DEBITS && entry.is_credit() {
                return Err(AchError::TransactionCode {
                    code: entry.transaction_code,
                    context: "debits-only batch",
                });
            }
            if !seen.insert(entry.trace_number.as_str()) {
                return Err(AchError::FieldFormat {
                    field: "TraceNumber",
                    msg: format!("{:?} is repeated within the batch", entry.trace_number),
                });
            }
            if !opts.custom_trace_numbers {
                let odfi = field::numeric(&self.header.odfi_identification, 8);
                if !entry.trace_number.starts_with(&odfi) {
                    return Err(AchError::FieldFormat {
                        field: "TraceNumber",
                        msg: format!(
                            "{:?} does not carry the ODFI prefix {odfi}",
                            entry.trace_number
                        ),
                    });
                }
                if let Some(prev) = previous {
                    if entry.trace_number.as_str() <= prev {
                        return Err(AchError::FieldFormat {
                            field: "TraceNumber",
                            msg: format!("{:?} is not ascending", entry.trace_number),
                        });
                    }
                }
                previous = Some(entry.trace_number.as_str());
            }
            let sequence = entry.trace_sequence();
            for (j, a) in entry.addenda05.iter().enumerate() {
                if a.sequence_number != (j + 1) as u16 {
                    return Err(AchError::FieldFormat {
                        field: "SequenceNumber",
                        msg: format!("addenda05 sequence {} at position {}", a.sequence_number, j + 1),
                    });
                }
                if a.entry_detail_sequence_number != sequence {
                    return Err(AchError::ControlMismatch {
                        field: "EntryDetailSequenceNumber",
                        stored: a.entry_detail_sequence_number.to_string(),
                        calculated: sequence.to_string(),
                    });
                }
            }
        }
        self.verify_control(opts)
    }

    fn verify_control(&self, opts: &ValidateOpts) -> Result<()> {
        self.control.validate()?;
        if self.control.service_class_code != self.header.service_class_code {
            return Err(AchError::ControlMismatch {
                field: "ServiceClassCode",
                stored: self.control.service_class_code.to_string(),
                calculated: self.header.service_class_code.to_string(),
            });
        }
        if self.control.entry_addenda_count != self.entry_addenda_count() {
            return Err(AchError::ControlMismatch {
                field: "EntryAddendaCount",
                stored: self.control.entry_addenda_count.to_string(),
                calculated: self.entry_addenda_count().to_string(),
            });
        }
        if self.control.entry_hash != self.calculated_entry_hash() {
            return Err(AchError::ControlMismatch {
                field: "EntryHash",
                stored: self.control.entry_hash.to_string(),
                calculated: self.calculated_entry_hash().to_string(),
            });
        }
        if self.control.total_debit != self.calculated_total_debit() {
            return Err(AchError::ControlMismatch {
                field: "TotalDebit",
                stored: self.control.total_debit.to_string(),
                calculated: self.calculated_total_debit().to_string(),
            });
        }
        if self.control.total_credit != self.calculated_total_credit() {
            return Err(AchError::ControlMismatch {
                field: "TotalCredit",
                stored: self.control.total_credit.to_string(),
                calculated: self.calculated_total_credit().to_string(),
            });
        }
        if !opts.bypass_company_identification_match
            && self.control.company_identification != self.header.company_identification
        {
            return Err(AchError::ControlMismatch {
                field: "CompanyIdentification",
                stored: self.control.company_identification.clone(),
                calculated: self.header.company_identification.clone(),
            });
        }
        if self.control.odfi_identification != self.header.odfi_identification {
            return Err(AchError::ControlMismatch {
                field: "ODFIIdentification",
                stored: self.control.odfi_identification.clone(),
                calculated: self.header.odfi_identification.clone(),
            });
        }
        if self.control.batch_number != self.header.batch_number {
            return Err(AchError::ControlMismatch {
                field: "BatchNumber",
                stored: self.control.batch_number.to_string(),
                calculated: self.header.batch_number.to_string(),
            });
        }
        Ok(())
    }

    fn verify_adv(&self, opts: &ValidateOpts) -> Result<()> {
        if !self.entries.is_empty() {
            return Err(AchError::FieldFormat {
                field: "EntryDetails",
                msg: "standard entries in an ADV batch".to_string(),
            });
        }
        if self.adv_entries.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Batch",
                field: "AdvEntryDetails",
            });
        }
        let mut previous = 0u32;
        for entry in &self.adv_entries {
            entry.validate_with(opts)?;
            if entry.sequence_number <= previous {
                return Err(AchError::FieldFormat {
                    field: "SequenceNumber",
                    msg: format!("{} is not ascending", entry.sequence_number),
                });
            }
            previous = entry.sequence_number;
        }
        let control = self.adv_control.as_ref().ok_or(AchError::FieldInclusion {
            record: "Batch",
            field: "AdvBatchControl",
        })?;
        control.validate()?;
        if control.service_class_code != self.header.service_class_code {
            return Err(AchError::ControlMismatch {
                field: "ServiceClassCode",
                stored: control.service_class_code.to_string(),
                calculated: self.header.service_class_code.to_string(),
            });
        }
        if control.entry_addenda_count != self.entry_addenda_count() {
            return Err(AchError::ControlMismatch {
                field: "EntryAddendaCount",
                stored: control.entry_addenda_count.to_string(),
                calculated: self.entry_addenda_count().to_string(),
            });
        }
        if control.entry_hash != self.calculated_entry_hash() {
            return Err(AchError::ControlMismatch {
                field: "EntryHash",
                stored: control.entry_hash.to_string(),
                calculated: self.calculated_entry_hash().to_string(),
            });
        }
        if control.total_debit != self.calculated_total_debit() {
            return Err(AchError::ControlMismatch {
                field: "TotalDebit",
                stored: control.total_debit.to_string(),
                calculated: self.calculated_total_debit().to_string(),
            });
        }
        if control.total_credit != self.calculated_total_credit() {
            return Err(AchError::ControlMismatch {
                field: "TotalCredit",
                stored: control.total_credit.to_string(),
                calculated: self.calculated_total_credit().to_string(),
            });
        }
        if control.batch_number != self.header.batch_number {
            return Err(AchError::ControlMismatch {
                field: "BatchNumber",
                stored: control.batch_number.to_string(),
                calculated: self.header.batch_number.to_string(),
            });
        }
        Ok(())
    }
}

//! Международный батч IAT: у каждой проводки обязательная цепочка адденд
//! 10–16, до двух адденд 17 и до пяти адденд 18.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use crate::file::ValidateOpts;
use crate::records::batch_control::BatchControl;
use crate::records::batch_header::{SERVICE_CLASS_CREDITS, SERVICE_CLASS_DEBITS};
use crate::records::iat_batch_header::IatBatchHeader;
use crate::records::iat_entry_detail::IatEntryDetail;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IatBatch {
    #[serde(rename = "batchHeader")]
    pub header: IatBatchHeader,
    #[serde(rename = "entryDetails")]
    pub entries: Vec<IatEntryDetail>,
    #[serde(rename = "batchControl")]
    pub control: BatchControl,
}

impl IatBatch {
    pub fn new(header: IatBatchHeader) -> IatBatch {
        IatBatch {
            header,
            ..IatBatch::default()
        }
    }

    pub fn add_entry(&mut self, entry: IatEntryDetail) {
        self.entries.push(entry);
    }

    pub fn entry_addenda_count(&self) -> u32 {
        self.entries.iter().map(|e| 1 + e.addenda_count()).sum()
    }

    pub fn calculated_entry_hash(&self) -> u64 {
        let sum: u64 = self
            .entries
            .iter()
            .map(|e| field::parse_num(&e.rdfi_identification) as u64)
            .sum();
        field::least_significant(sum, 10)
    }

    pub fn calculated_total_debit(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.is_debit())
            .map(|e| e.amount)
            .sum()
    }

    pub fn calculated_total_credit(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.is_credit())
            .map(|e| e.amount)
            .sum()
    }

    pub fn trace_numbers(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.trace_number.clone()).collect()
    }

    pub fn create(&mut self) -> Result<()> {
        self.create_with(&ValidateOpts::default())
    }

    /// Наполняет производные поля проводок и адденд и собирает контрольную
    /// запись. Идемпотентна, как и у стандартного батча.
    pub fn create_with(&mut self, opts: &ValidateOpts) -> Result<()> {
        self.header.validate()?;
        if self.entries.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatBatch",
                field: "EntryDetails",
            });
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if !opts.custom_trace_numbers {
                entry.set_trace_number(&self.header.odfi_identification, (i + 1) as u32);
            }
            entry.check_digit = field::check_digit(&entry.rdfi_identification)?.to_string();
            entry.addenda_record_indicator = 1;
            let sequence = entry.trace_sequence();
            let trace = entry.trace_number.clone();
            if let Some(a) = &mut entry.addenda10 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda11 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda12 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda13 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda14 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda15 {
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda16 {
                a.entry_detail_sequence_number = sequence;
            }
            for (j, a) in entry.addenda17.iter_mut().enumerate() {
                a.sequence_number = (j + 1) as u16;
                a.entry_detail_sequence_number = sequence;
            }
            for (j, a) in entry.addenda18.iter_mut().enumerate() {
                a.sequence_number = (j + 1) as u16;
                a.entry_detail_sequence_number = sequence;
            }
            if let Some(a) = &mut entry.addenda98 {
                a.trace_number = trace.clone();
            }
            if let Some(a) = &mut entry.addenda99 {
                a.trace_number = trace;
            }
            entry.addenda_records = entry.addenda_count() as u16;
        }
        self.control = BatchControl {
            service_class_code: self.header.service_class_code,
            entry_addenda_count: self.entry_addenda_count(),
            entry_hash: self.calculated_entry_hash(),
            total_debit: self.calculated_total_debit(),
            total_credit: self.calculated_total_credit(),
            company_identification: self.header.originator_identification.clone(),
            message_authentication_code: self.control.message_authentication_code.clone(),
            odfi_identification: self.header.odfi_identification.clone(),
            batch_number: self.header.batch_number,
        };
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }

    pub fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        self.header.validate()?;
        if self.entries.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatBatch",
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
            self.verify_entry_addenda(entry)?;
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
        }
        self.verify_control(opts)
    }

    /// Обязательная цепочка 10–16, лимиты на 17 и 18, согласие заявленного
    /// счётчика адденд с фактическим.
    fn verify_entry_addenda(&self, entry: &IatEntryDetail) -> Result<()> {
        let mandatory: [(&'static str, bool); 7] = [
            ("Addenda10", entry.addenda10.is_some()),
            ("Addenda11", entry.addenda11.is_some()),
            ("Addenda12", entry.addenda12.is_some()),
            ("Addenda13", entry.addenda13.is_some()),
            ("Addenda14", entry.addenda14.is_some()),
            ("Addenda15", entry.addenda15.is_some()),
            ("Addenda16", entry.addenda16.is_some()),
        ];
        for (name, present) in mandatory {
            if !present {
                return Err(AchError::FieldInclusion {
                    record: "IatEntryDetail",
                    field: name,
                });
            }
        }
        if entry.addenda17.len() > 2 {
            return Err(AchError::FieldFormat {
                field: "Addenda17",
                msg: format!("{} records, IAT allows at most two", entry.addenda17.len()),
            });
        }
        if entry.addenda18.len() > 5 {
            return Err(AchError::FieldFormat {
                field: "Addenda18",
                msg: format!("{} records, IAT allows at most five", entry.addenda18.len()),
            });
        }
        if u32::from(entry.addenda_records) != entry.addenda_count() {
            return Err(AchError::ControlMismatch {
                field: "AddendaRecords",
                stored: entry.addenda_records.to_string(),
                calculated: entry.addenda_count().to_string(),
            });
        }
        if let Some(a) = &entry.addenda10 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda11 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda12 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda13 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda14 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda15 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda16 {
            a.validate()?;
        }
        for a in &entry.addenda17 {
            a.validate()?;
        }
        for a in &entry.addenda18 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda98 {
            a.validate()?;
        }
        if let Some(a) = &entry.addenda99 {
            a.validate()?;
        }
        Ok(())
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
            && self.control.company_identification != self.header.originator_identification
        {
            return Err(AchError::ControlMismatch {
                field: "CompanyIdentification",
                stored: self.control.company_identification.clone(),
                calculated: self.header.originator_identification.clone(),
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
}

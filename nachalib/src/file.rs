//! Файл ACH: заголовок, батчи и контрольная запись; сборка производных
//! значений и проверка сквозных инвариантов.

use crate::batch::iat::IatBatch;
use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::field;
use crate::records::adv_file_control::AdvFileControl;
use crate::records::file_control::FileControl;
use crate::records::file_header::FileHeader;
use serde::{Deserialize, Serialize};

/// Количество записей в блоке; файл добивается строками-заполнителями
/// до кратного размера.
pub const BLOCKING_FACTOR: u32 = 10;

/// Флаги ослабления проверок. Каждый флаг отключает ровно один инвариант;
/// структура дерева остаётся прежней. Передаются явно — глобального
/// состояния у библиотеки нет.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateOpts {
    /// Не проверять ImmediateOrigin заголовка файла.
    pub bypass_origin: bool,
    /// Не проверять ImmediateDestination заголовка файла.
    pub bypass_destination: bool,
    /// Не сверять CompanyIdentification контроля батча с заголовком.
    pub bypass_company_identification_match: bool,
    /// Не проверять диапазон сумм проводок.
    pub allow_invalid_amounts: bool,
    /// Файл может не иметь контрольной записи.
    pub allow_missing_file_control: bool,
    /// Файл может не иметь заголовка.
    pub allow_missing_file_header: bool,
    /// Оставлять трассировочные номера вызывающего: `create` их не трогает,
    /// проверка порядка и префикса ODFI не выполняется.
    pub custom_trace_numbers: bool,
    /// Файл может не содержать ни одного батча.
    pub allow_zero_batches: bool,
}

/// Файл владеет батчами, батчи — проводками, проводки — аддендами.
/// Все связи между записями — копии значений, указателей наверх нет.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct File {
    #[serde(rename = "fileHeader")]
    pub header: FileHeader,
    pub batches: Vec<Batch>,
    #[serde(rename = "iatBatches", skip_serializing_if = "Vec::is_empty")]
    pub iat_batches: Vec<IatBatch>,
    #[serde(rename = "fileControl")]
    pub control: FileControl,
    #[serde(rename = "advFileControl", skip_serializing_if = "Option::is_none")]
    pub adv_control: Option<AdvFileControl>,
}

impl File {
    /// Пустой файл с сегодняшней датой создания в заголовке.
    pub fn new() -> File {
        File {
            header: FileHeader::new(),
            ..File::default()
        }
    }

    pub fn add_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    pub fn add_iat_batch(&mut self, batch: IatBatch) {
        self.iat_batches.push(batch);
    }

    /// Файл целиком из авизо: контрольные записи двадцатиразрядные.
    pub fn is_adv(&self) -> bool {
        !self.batches.is_empty()
            && self.iat_batches.is_empty()
            && self.batches.iter().all(|b| b.is_adv())
    }

    pub fn batch_count(&self) -> u32 {
        (self.batches.len() + self.iat_batches.len()) as u32
    }

    pub fn calculated_entry_addenda_count(&self) -> u32 {
        let std: u32 = self.batches.iter().map(|b| b.entry_addenda_count()).sum();
        let iat: u32 = self.iat_batches.iter().map(|b| b.entry_addenda_count()).sum();
        std + iat
    }

    /// Сумма entry hash всех батчей, усечённая до десяти разрядов.
    pub fn calculated_entry_hash(&self) -> u64 {
        let std: u64 = self.batches.iter().map(|b| b.calculated_entry_hash()).sum();
        let iat: u64 = self
            .iat_batches
            .iter()
            .map(|b| b.calculated_entry_hash())
            .sum();
        field::least_significant(std + iat, 10)
    }

    pub fn calculated_total_debit(&self) -> i64 {
        let std: i64 = self.batches.iter().map(|b| b.calculated_total_debit()).sum();
        let iat: i64 = self
            .iat_batches
            .iter()
            .map(|b| b.calculated_total_debit())
            .sum();
        std + iat
    }

    pub fn calculated_total_credit(&self) -> i64 {
        let std: i64 = self.batches.iter().map(|b| b.calculated_total_credit()).sum();
        let iat: i64 = self
            .iat_batches
            .iter()
            .map(|b| b.calculated_total_credit())
            .sum();
        std + iat
    }

    /// Количество записей файла без строк-заполнителей: заголовок и контроль
    /// файла плюс по два на батч и все проводки с аддендами.
    pub fn record_count(&self) -> u32 {
        2 + 2 * self.batch_count() + self.calculated_entry_addenda_count()
    }

    /// Число блоков по десять записей, округление вверх.
    pub fn calculated_block_count(&self) -> u32 {
        self.record_count().div_ceil(BLOCKING_FACTOR)
    }

    pub fn create(&mut self) -> Result<()> {
        self.create_with(&ValidateOpts::default())
    }

    /// Сборка файла: последовательные номера батчей с единицы, `create`
    /// каждого батча, затем контрольная запись файла. Мутации после сборки
    /// делают контроль недействительным — повторный вызов пересчитывает.
    pub fn create_with(&mut self, opts: &ValidateOpts) -> Result<()> {
        if !opts.allow_zero_batches && self.batches.is_empty() && self.iat_batches.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "File",
                field: "Batches",
            });
        }
        let mut number = 1u32;
        for batch in &mut self.batches {
            batch.header.batch_number = number;
            batch.create_with(opts)?;
            number += 1;
        }
        for batch in &mut self.iat_batches {
            batch.header.batch_number = number;
            batch.create_with(opts)?;
            number += 1;
        }
        if self.is_adv() {
            self.control = FileControl::default();
            self.adv_control = Some(AdvFileControl {
                batch_count: self.batch_count(),
                block_count: self.calculated_block_count(),
                entry_addenda_count: self.calculated_entry_addenda_count(),
                entry_hash: self.calculated_entry_hash(),
                total_debit: self.calculated_total_debit(),
                total_credit: self.calculated_total_credit(),
            });
        } else {
            self.adv_control = None;
            self.control = FileControl {
                batch_count: self.batch_count(),
                block_count: self.calculated_block_count(),
                entry_addenda_count: self.calculated_entry_addenda_count(),
                entry_hash: self.calculated_entry_hash(),
                total_debit: self.calculated_total_debit(),
                total_credit: self.calculated_total_credit(),
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }

    /// Отвергает файл, чьи сохранённые контрольные значения расходятся с
    /// пересчитанными, либо чьи батчи не проходят собственную проверку.
    /// Ошибка батча приходит с его порядковым номером.
    pub fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        if !opts.allow_missing_file_header {
            self.header.validate_with(opts)?;
        }
        if !opts.allow_zero_batches && self.batches.is_empty() && self.iat_batches.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "File",
                field: "Batches",
            });
        }
        let mut index = 1usize;
        for batch in &self.batches {
            batch.validate_with(opts).map_err(|e| e.in_batch(index))?;
            index += 1;
        }
        for batch in &self.iat_batches {
            batch.validate_with(opts).map_err(|e| e.in_batch(index))?;
            index += 1;
        }
        if opts.allow_missing_file_control {
            return Ok(());
        }
        let (batch_count, block_count, entry_addenda_count, entry_hash, total_debit, total_credit) =
            if self.is_adv() {
                let control = self.adv_control.as_ref().ok_or(AchError::FieldInclusion {
                    record: "File",
                    field: "AdvFileControl",
                })?;
                (
                    control.batch_count,
                    control.block_count,
                    control.entry_addenda_count,
                    control.entry_hash,
                    control.total_debit,
                    control.total_credit,
                )
            } else {
                (
                    self.control.batch_count,
                    self.control.block_count,
                    self.control.entry_addenda_count,
                    self.control.entry_hash,
                    self.control.total_debit,
                    self.control.total_credit,
                )
            };
        if batch_count != self.batch_count() {
            return Err(AchError::ControlMismatch {
                field: "BatchCount",
                stored: batch_count.to_string(),
                calculated: self.batch_count().to_string(),
            });
        }
        if block_count != self.calculated_block_count() {
            return Err(AchError::ControlMismatch {
                field: "BlockCount",
                stored: block_count.to_string(),
                calculated: self.calculated_block_count().to_string(),
            });
        }
        if entry_addenda_count != self.calculated_entry_addenda_count() {
            return Err(AchError::ControlMismatch {
                field: "EntryAddendaCount",
                stored: entry_addenda_count.to_string(),
                calculated: self.calculated_entry_addenda_count().to_string(),
            });
        }
        if entry_hash != self.calculated_entry_hash() {
            return Err(AchError::ControlMismatch {
                field: "EntryHash",
                stored: entry_hash.to_string(),
                calculated: self.calculated_entry_hash().to_string(),
            });
        }
        if total_debit != self.calculated_total_debit() {
            return Err(AchError::ControlMismatch {
                field: "TotalDebit",
                stored: total_debit.to_string(),
                calculated: self.calculated_total_debit().to_string(),
            });
        }
        if total_credit != self.calculated_total_credit() {
            return Err(AchError::ControlMismatch {
                field: "TotalCredit",
                stored: total_credit.to_string(),
                calculated: self.calculated_total_credit().to_string(),
            });
        }
        Ok(())
    }
}

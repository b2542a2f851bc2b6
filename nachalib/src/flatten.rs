//! Консолидация батчей файла: батчи с одинаковой подписью заголовка и без
//! общих трассировочных номеров сливаются в один, пофайловые итоги не
//! меняются.

use crate::batch::iat::IatBatch;
use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::File;
use std::collections::{HashMap, HashSet};

/// Стандартный или международный батч под единым набором операций слияния.
enum Mergeable {
    Std(Batch),
    Iat(IatBatch),
}

impl Mergeable {
    /// Сериализованный заголовок без колонок номера батча.
    fn header_signature(&self) -> String {
        match self {
            Mergeable::Std(b) => b.header.signature(),
            Mergeable::Iat(b) => b.header.signature(),
        }
    }

    fn trace_numbers(&self) -> HashSet<String> {
        match self {
            Mergeable::Std(b) => b.trace_numbers(),
            Mergeable::Iat(b) => b.trace_numbers(),
        }
    }

    fn entry_count(&self) -> usize {
        match self {
            Mergeable::Std(b) => b.entries.len() + b.adv_entries.len(),
            Mergeable::Iat(b) => b.entries.len(),
        }
    }

    fn batch_number(&self) -> u32 {
        match self {
            Mergeable::Std(b) => b.header.batch_number,
            Mergeable::Iat(b) => b.header.batch_number,
        }
    }

    /// Поглощает совместимый батч: проводки переходят вместе со своими
    /// аддендами, из двух номеров батча остаётся меньший.
    fn consume(&mut self, other: Mergeable) {
        match (self, other) {
            (Mergeable::Std(dst), Mergeable::Std(src)) => {
                if src.header.batch_number < dst.header.batch_number {
                    dst.header.batch_number = src.header.batch_number;
                }
                dst.entries.extend(src.entries);
                dst.adv_entries.extend(src.adv_entries);
            }
            (Mergeable::Iat(dst), Mergeable::Iat(src)) => {
                if src.header.batch_number < dst.header.batch_number {
                    dst.header.batch_number = src.header.batch_number;
                }
                dst.entries.extend(src.entries);
            }
            // Подпись заголовка включает колонки SEC-кода, у стандартного
            // батча там никогда не бывает «IAT» — смешанная пара невозможна.
            _ => unreachable!("header signatures never match across batch kinds"),
        }
    }

    /// Проводки сортируются по трассировочному номеру, номер батча
    /// сбрасывается, чтобы `create` файла назначил его заново.
    fn add_to_file(self, file: &mut File) {
        match self {
            Mergeable::Std(mut batch) => {
                batch.entries.sort_by(|a, b| a.trace_number.cmp(&b.trace_number));
                batch.adv_entries.sort_by_key(|e| e.sequence_number);
                batch.header.batch_number = 0;
                file.add_batch(batch);
            }
            Mergeable::Iat(mut batch) => {
                batch.entries.sort_by(|a, b| a.trace_number.cmp(&b.trace_number));
                batch.header.batch_number = 0;
                file.add_iat_batch(batch);
            }
        }
    }
}

/// Выходной батч вместе с накопленным множеством трассировочных номеров —
/// чтобы не пересчитывать его на каждую проверку совместимости.
struct Bin {
    batch: Mergeable,
    traces: HashSet<String>,
}

/// Возвращает новый валидный файл с теми же итогами и не большим числом
/// батчей. Вход обязан быть валидным файлом.
pub fn flatten(original: &File) -> Result<File> {
    let mut originals: Vec<Mergeable> = Vec::new();
    for batch in &original.batches {
        originals.push(Mergeable::Std(batch.clone()));
    }
    for batch in &original.iat_batches {
        originals.push(Mergeable::Iat(batch.clone()));
    }

    // Меньшие батчи первыми: жадное слияние в уже накопленные корзины даёт
    // минимальное число выходных батчей.
    originals.sort_by_key(Mergeable::entry_count);

    let mut by_signature: HashMap<String, Vec<Bin>> = HashMap::new();
    for batch in originals {
        let traces = batch.trace_numbers();
        let bins = by_signature.entry(batch.header_signature()).or_default();
        match bins.iter_mut().find(|bin| bin.traces.is_disjoint(&traces)) {
            Some(bin) => {
                bin.batch.consume(batch);
                bin.traces.extend(traces);
            }
            None => bins.push(Bin { batch, traces }),
        }
    }

    let mut merged: Vec<Mergeable> = by_signature
        .into_values()
        .flatten()
        .map(|bin| bin.batch)
        .collect();
    // Порядок выходных батчей — по сохранённому меньшему исходному номеру.
    merged.sort_by_key(Mergeable::batch_number);

    let mut flattened = File {
        header: original.header.clone(),
        ..File::default()
    };
    for batch in merged {
        batch.add_to_file(&mut flattened);
    }
    flattened.create()?;
    flattened.validate()?;

    // Страховочная проверка: консолидация не имеет права менять итоги.
    let (original_count, original_debit, original_credit) = stored_totals(original);
    let (new_count, new_debit, new_credit) = stored_totals(&flattened);
    if new_count != original_count {
        return Err(AchError::FlattenChangedCounts("the entry and addenda count"));
    }
    if new_debit != original_debit {
        return Err(AchError::FlattenChangedCounts("the total debit amount"));
    }
    if new_credit != original_credit {
        return Err(AchError::FlattenChangedCounts("the total credit amount"));
    }
    Ok(flattened)
}

fn stored_totals(file: &File) -> (u32, i64, i64) {
    match &file.adv_control {
        Some(control) if file.is_adv() => (
            control.entry_addenda_count,
            control.total_debit,
            control.total_credit,
        ),
        _ => (
            file.control.entry_addenda_count,
            file.control.total_debit,
            file.control.total_credit,
        ),
    }
}

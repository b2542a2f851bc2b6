//! Контрольная запись файла (тип записи «9»).

use crate::error::Result;
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Итоги по файлу: количество батчей, блоков и проводок, свёртка entry hash
/// и суммарные обороты.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileControl {
    pub batch_count: u32,
    /// Число блоков по десять записей с учётом строк-заполнителей.
    pub block_count: u32,
    pub entry_addenda_count: u32,
    /// Сумма entry hash всех батчей, младшие десять разрядов.
    pub entry_hash: u64,
    pub total_debit: i64,
    pub total_credit: i64,
}

impl Record for FileControl {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '9')?;
        Ok(FileControl {
            batch_count: field::parse_num(&field::slice(&c, 2, 7)) as u32,
            block_count: field::parse_num(&field::slice(&c, 8, 13)) as u32,
            entry_addenda_count: field::parse_num(&field::slice(&c, 14, 21)) as u32,
            entry_hash: field::parse_num(&field::slice(&c, 22, 31)) as u64,
            total_debit: field::parse_num(&field::slice(&c, 32, 43)),
            total_credit: field::parse_num(&field::slice(&c, 44, 55)),
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('9');
        out.push_str(&field::numeric(&self.batch_count.to_string(), 6));
        out.push_str(&field::numeric(&self.block_count.to_string(), 6));
        out.push_str(&field::numeric(&self.entry_addenda_count.to_string(), 8));
        out.push_str(&field::numeric(&self.entry_hash.to_string(), 10));
        out.push_str(&field::amount(self.total_debit, 12));
        out.push_str(&field::amount(self.total_credit, 12));
        out.push_str(&field::alpha("", 39));
        out
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

//! Адденда 10 — первая обязательная запись цепочки IAT: вид перевода,
//! сумма в иностранной валюте и получатель.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Трёхбуквенные коды вида перевода из правил NACHA для IAT.
pub fn valid_transaction_type_code(code: &str) -> bool {
    matches!(
        code,
        "ANN" | "BUS" | "DEP" | "LOA" | "MIS" | "MOR" | "PEN" | "REM" | "RLS" | "SAL" | "TAX"
            | "TEL" | "WEB" | "MTE" | "POS" | "SHR"
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda10 {
    pub type_code: String,
    pub transaction_type_code: String,
    /// Сумма в валюте отправителя, восемнадцать разрядов.
    pub foreign_payment_amount: i64,
    pub foreign_trace_number: String,
    /// Имя получателя — физического лица или компании.
    pub name: String,
    pub entry_detail_sequence_number: u32,
}

impl Default for Addenda10 {
    fn default() -> Self {
        Addenda10 {
            type_code: "10".to_string(),
            transaction_type_code: String::new(),
            foreign_payment_amount: 0,
            foreign_trace_number: String::new(),
            name: String::new(),
            entry_detail_sequence_number: 0,
        }
    }
}

impl Record for Addenda10 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda10 {
            type_code: field::slice(&c, 2, 3),
            transaction_type_code: field::trim_alpha(&field::slice(&c, 4, 6)),
            foreign_payment_amount: field::parse_num(&field::slice(&c, 7, 24)),
            foreign_trace_number: field::trim_alpha(&field::slice(&c, 25, 46)),
            name: field::trim_alpha(&field::slice(&c, 47, 81)),
            entry_detail_sequence_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.transaction_type_code, 3));
        out.push_str(&field::amount(self.foreign_payment_amount, 18));
        out.push_str(&field::alpha(&self.foreign_trace_number, 22));
        out.push_str(&field::alpha(&self.name, 35));
        out.push_str(&field::alpha("", 6));
        out.push_str(&field::numeric(&self.entry_detail_sequence_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "10" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "10",
            });
        }
        if !valid_transaction_type_code(&self.transaction_type_code) {
            return Err(AchError::FieldFormat {
                field: "TransactionTypeCode",
                msg: format!("{:?} is not a known transaction type", self.transaction_type_code),
            });
        }
        if self.foreign_payment_amount < 0 {
            return Err(AchError::FieldFormat {
                field: "ForeignPaymentAmount",
                msg: format!("{} is negative", self.foreign_payment_amount),
            });
        }
        if self.name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "Addenda10",
                field: "Name",
            });
        }
        field::validate_iso8859("ForeignTraceNumber", &self.foreign_trace_number)?;
        field::validate_iso8859("Name", &self.name)?;
        Ok(())
    }
}

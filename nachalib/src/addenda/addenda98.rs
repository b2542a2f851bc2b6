//! Адденда 98 — уведомление об изменении (NOC/COR): RDFI сообщает ODFI
//! исправленные реквизиты исходной проводки.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Код изменения из справочника NACHA: код, причина и расшифровка.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCode {
    pub code: &'static str,
    pub reason: &'static str,
    pub description: &'static str,
}

/// Справочник кодов изменения. Заполняется один раз, далее только чтение;
/// безопасен для параллельных обращений.
static CHANGE_CODES: LazyLock<HashMap<&'static str, ChangeCode>> = LazyLock::new(|| {
    let codes = [
        ("C01", "Incorrect bank account number", "Bank account number incorrect or formatted incorrectly"),
        ("C02", "Incorrect transit/routing number", "Once valid transit/routing number must be changed"),
        ("C03", "Incorrect transit/routing number and bank account number", "Once valid transit/routing number must be changed and causes a change to bank account number structure"),
        ("C04", "Bank account name change", "Customer has changed name or ODFI submitted name incorrectly"),
        ("C05", "Incorrect payment code", "Entry posted to demand account should contain savings payment codes or vice versa"),
        ("C06", "Incorrect bank account number and transit code", "Bank account number must be changed and payment code should indicate posting to another account type"),
        ("C07", "Incorrect transit/routing number, bank account number and payment code", "Changes required in three fields indicated"),
        ("C08", "Incorrect foreign receiving DFI identification", "Foreign receiving DFI identification is incorrect"),
        ("C09", "Incorrect individual ID number", "Individual's ID number is incorrect"),
        ("C10", "Incorrect company name", "Company name is no longer valid and should be changed"),
        ("C11", "Incorrect company identification", "Company ID is no longer valid and should be changed"),
        ("C12", "Incorrect company name and company ID", "Both the company name and company id are no longer valid and must be changed"),
    ];
    codes
        .into_iter()
        .map(|(code, reason, description)| {
            (code, ChangeCode { code, reason, description })
        })
        .collect()
});

/// Поиск кода изменения в справочнике; регистр не важен.
pub fn lookup_change_code(code: &str) -> Option<&'static ChangeCode> {
    CHANGE_CODES.get(code.to_uppercase().as_str())
}

/// Структурированная выжимка из CorrectedData. Все поля необязательны:
/// валидный код может не нести разобранных данных.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda98 {
    pub type_code: String,
    pub change_code: String,
    /// Трассировочный номер исходной проводки или пренотификации.
    pub original_trace: String,
    /// Идентификация RDFI из исходной проводки.
    pub original_dfi: String,
    /// Исправленные реквизиты; трактовка зависит от кода изменения.
    pub corrected_data: String,
    pub trace_number: String,
}

impl Default for Addenda98 {
    fn default() -> Self {
        Addenda98 {
            type_code: "98".to_string(),
            change_code: String::new(),
            original_trace: String::new(),
            original_dfi: String::new(),
            corrected_data: String::new(),
            trace_number: String::new(),
        }
    }
}

/// Первые `size` символов с обрезкой пробелов; короткое значение
/// обрезается целиком.
fn first(size: usize, data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() < size {
        data.trim().to_string()
    } else {
        chars[..size].iter().collect::<String>().trim().to_string()
    }
}

impl Addenda98 {
    pub fn change_code_entry(&self) -> Option<&'static ChangeCode> {
        lookup_change_code(&self.change_code)
    }

    /// Разбор CorrectedData по коду изменения. Токенизация для C03/C06/C07 —
    /// по пробельным последовательностям; неожиданное число токенов даёт
    /// `None`, а не догадку. Неподдерживаемый код — тоже `None`, не ошибка.
    pub fn parse_corrected_data(&self) -> Option<CorrectedData> {
        let cc = self.change_code_entry()?;
        match cc.code {
            "C01" => {
                let v = first(17, &self.corrected_data);
                if v.is_empty() {
                    None
                } else {
                    Some(CorrectedData {
                        account_number: Some(v),
                        ..CorrectedData::default()
                    })
                }
            }
            "C02" => {
                let v = first(9, &self.corrected_data);
                if v.is_empty() {
                    None
                } else {
                    Some(CorrectedData {
                        routing_number: Some(v),
                        ..CorrectedData::default()
                    })
                }
            }
            "C03" => {
                let parts: Vec<&str> = self.corrected_data.split_whitespace().collect();
                if parts.len() == 2 {
                    Some(CorrectedData {
                        routing_number: Some(parts[0].to_string()),
                        account_number: Some(parts[1].to_string()),
                        ..CorrectedData::default()
                    })
                } else {
                    None
                }
            }
            "C04" => {
                let v = first(22, &self.corrected_data);
                if v.is_empty() {
                    None
                } else {
                    Some(CorrectedData {
                        name: Some(v),
                        ..CorrectedData::default()
                    })
                }
            }
            "C05" => first(2, &self.corrected_data).parse::<u8>().ok().map(|n| CorrectedData {
                transaction_code: Some(n),
                ..CorrectedData::default()
            }),
            "C06" => {
                let parts: Vec<&str> = self.corrected_data.split_whitespace().collect();
                if parts.len() == 2 {
                    parts[1].parse::<u8>().ok().map(|n| CorrectedData {
                        account_number: Some(parts[0].to_string()),
                        transaction_code: Some(n),
                        ..CorrectedData::default()
                    })
                } else {
                    None
                }
            }
            "C07" => {
                let parts: Vec<&str> = self.corrected_data.split_whitespace().collect();
                if parts.len() == 3 {
                    parts[2].parse::<u8>().ok().map(|n| CorrectedData {
                        routing_number: Some(parts[0].to_string()),
                        account_number: Some(parts[1].to_string()),
                        transaction_code: Some(n),
                        ..CorrectedData::default()
                    })
                } else {
                    None
                }
            }
            "C09" => {
                let v = first(22, &self.corrected_data);
                if v.is_empty() {
                    None
                } else {
                    Some(CorrectedData {
                        identification: Some(v),
                        ..CorrectedData::default()
                    })
                }
            }
            // C08 и C10-C12 распознаются, но разобранных данных не несут.
            _ => None,
        }
    }
}

impl Record for Addenda98 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda98 {
            type_code: field::slice(&c, 2, 3),
            change_code: field::slice(&c, 4, 6),
            original_trace: field::trim_id(&field::slice(&c, 7, 21)),
            original_dfi: field::trim_id(&field::slice(&c, 28, 35)),
            corrected_data: field::slice(&c, 36, 64).trim().to_string(),
            trace_number: field::trim_id(&field::slice(&c, 80, 94)),
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.change_code, 3));
        out.push_str(&field::numeric(&self.original_trace, 15));
        out.push_str(&field::alpha("", 6));
        out.push_str(&field::numeric(&self.original_dfi, 8));
        out.push_str(&field::alpha(&self.corrected_data, 29));
        out.push_str(&field::alpha("", 15));
        out.push_str(&field::numeric(&self.trace_number, 15));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "98" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "98",
            });
        }
        if self.change_code_entry().is_none() {
            return Err(AchError::ChangeCode(self.change_code.clone()));
        }
        // Запись обязана нести исправление, соответствующее коду изменения.
        if self.corrected_data.is_empty() {
            return Err(AchError::CorrectedData);
        }
        if self.original_dfi.chars().count() != 8 || !field::is_digits(&self.original_dfi) {
            return Err(AchError::FieldFormat {
                field: "OriginalDFI",
                msg: format!("{:?} is not an 8-digit identification", self.original_dfi),
            });
        }
        field::validate_alphanumeric("CorrectedData", &self.corrected_data)?;
        Ok(())
    }
}

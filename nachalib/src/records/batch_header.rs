//! Заголовок батча (тип записи «5»).

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Смешанный батч: и кредиты, и дебеты.
pub const SERVICE_CLASS_MIXED: u16 = 200;
/// Только кредиты.
pub const SERVICE_CLASS_CREDITS: u16 = 220;
/// Только дебеты.
pub const SERVICE_CLASS_DEBITS: u16 = 225;
/// Машинные авизо (ADV).
pub const SERVICE_CLASS_ADV: u16 = 280;

pub fn valid_service_class(code: u16) -> bool {
    matches!(
        code,
        SERVICE_CLASS_MIXED | SERVICE_CLASS_CREDITS | SERVICE_CLASS_DEBITS | SERVICE_CLASS_ADV
    )
}

/// Открывает батч: класс обслуживания, компания-отправитель, SEC-код,
/// дата исполнения и ODFI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchHeader {
    pub service_class_code: u16,
    pub company_name: String,
    pub company_discretionary_data: String,
    /// Обычно «1» плюс EIN компании; эхо-копия обязана совпасть в контроле батча.
    pub company_identification: String,
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    pub company_descriptive_date: String,
    /// YYMMDD.
    pub effective_entry_date: String,
    /// Юлианская дата расчёта; заполняется оператором, в исходящем файле пусто.
    pub settlement_date: String,
    pub originator_status_code: String,
    /// Восемь цифр ODFI без контрольной.
    pub odfi_identification: String,
    /// Порядковый номер батча в файле, назначается при `create`.
    pub batch_number: u32,
}

impl Default for BatchHeader {
    fn default() -> Self {
        BatchHeader {
            service_class_code: 0,
            company_name: String::new(),
            company_discretionary_data: String::new(),
            company_identification: String::new(),
            standard_entry_class_code: String::new(),
            company_entry_description: String::new(),
            company_descriptive_date: String::new(),
            effective_entry_date: String::new(),
            settlement_date: String::new(),
            originator_status_code: "1".to_string(),
            odfi_identification: String::new(),
            batch_number: 0,
        }
    }
}

impl BatchHeader {
    /// Подпись заголовка для консолидации: сериализованный заголовок с
    /// зачищенной позицией номера батча (колонки 88–94).
    pub fn signature(&self) -> String {
        self.to_line().chars().take(87).collect()
    }
}

impl Record for BatchHeader {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '5')?;
        Ok(BatchHeader {
            service_class_code: field::parse_num(&field::slice(&c, 2, 4)) as u16,
            company_name: field::trim_alpha(&field::slice(&c, 5, 20)),
            company_discretionary_data: field::trim_alpha(&field::slice(&c, 21, 40)),
            company_identification: field::trim_alpha(&field::slice(&c, 41, 50)),
            standard_entry_class_code: field::slice(&c, 51, 53),
            company_entry_description: field::trim_alpha(&field::slice(&c, 54, 63)),
            company_descriptive_date: field::trim_alpha(&field::slice(&c, 64, 69)),
            effective_entry_date: field::slice(&c, 70, 75),
            settlement_date: field::trim_alpha(&field::slice(&c, 76, 78)),
            originator_status_code: field::slice(&c, 79, 79),
            odfi_identification: field::trim_id(&field::slice(&c, 80, 87)),
            batch_number: field::parse_num(&field::slice(&c, 88, 94)) as u32,
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('5');
        out.push_str(&field::numeric(&self.service_class_code.to_string(), 3));
        out.push_str(&field::alpha(&self.company_name, 16));
        out.push_str(&field::alpha(&self.company_discretionary_data, 20));
        out.push_str(&field::alpha(&self.company_identification, 10));
        out.push_str(&field::alpha(&self.standard_entry_class_code, 3));
        out.push_str(&field::alpha(&self.company_entry_description, 10));
        out.push_str(&field::alpha(&self.company_descriptive_date, 6));
        out.push_str(&field::numeric(&self.effective_entry_date, 6));
        out.push_str(&field::alpha(&self.settlement_date, 3));
        out.push_str(&field::numeric(&self.originator_status_code, 1));
        out.push_str(&field::numeric(&self.odfi_identification, 8));
        out.push_str(&field::numeric(&self.batch_number.to_string(), 7));
        out
    }

    fn validate(&self) -> Result<()> {
        if !valid_service_class(self.service_class_code) {
            return Err(AchError::ServiceClassCode(self.service_class_code));
        }
        if self.company_name.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "BatchHeader",
                field: "CompanyName",
            });
        }
        if self.company_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "BatchHeader",
                field: "CompanyIdentification",
            });
        }
        if self.standard_entry_class_code.trim().is_empty() {
            return Err(AchError::FieldInclusion {
                record: "BatchHeader",
                field: "StandardEntryClassCode",
            });
        }
        if !field::valid_yymmdd(&self.effective_entry_date) {
            return Err(AchError::FieldFormat {
                field: "EffectiveEntryDate",
                msg: format!("{:?} is not a YYMMDD date", self.effective_entry_date),
            });
        }
        if !self.settlement_date.is_empty()
            && (self.settlement_date.chars().count() != 3 || !field::is_digits(&self.settlement_date))
        {
            return Err(AchError::FieldFormat {
                field: "SettlementDate",
                msg: format!("{:?} is not a 3-digit Julian date", self.settlement_date),
            });
        }
        if !matches!(self.originator_status_code.as_str(), "0" | "1" | "2") {
            return Err(AchError::FieldFormat {
                field: "OriginatorStatusCode",
                msg: format!("{:?}, expected 0, 1 or 2", self.originator_status_code),
            });
        }
        if self.odfi_identification.chars().count() != 8 || !field::is_digits(&self.odfi_identification)
        {
            return Err(AchError::FieldFormat {
                field: "ODFIIdentification",
                msg: format!("{:?} is not an 8-digit identification", self.odfi_identification),
            });
        }
        field::validate_alphanumeric("CompanyName", &self.company_name)?;
        field::validate_alphanumeric("CompanyDiscretionaryData", &self.company_discretionary_data)?;
        field::validate_alphanumeric("CompanyIdentification", &self.company_identification)?;
        field::validate_alphanumeric("CompanyEntryDescription", &self.company_entry_description)?;
        field::validate_alphanumeric("CompanyDescriptiveDate", &self.company_descriptive_date)?;
        Ok(())
    }
}

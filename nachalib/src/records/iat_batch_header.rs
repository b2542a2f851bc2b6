//! Заголовок международного батча IAT (тип записи «5»): вместо полей компании —
//! валютная пара, страна назначения и идентификация оригинатора.

use crate::error::{AchError, Result};
use crate::field;
use crate::records::batch_header::valid_service_class;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Индикаторы обмена валют: FV — фиксированная к переменной, VF — переменная
/// к фиксированной, FF — обе фиксированы.
pub fn valid_foreign_exchange_indicator(code: &str) -> bool {
    matches!(code, "FV" | "VF" | "FF")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IatBatchHeader {
    pub service_class_code: u16,
    /// Резерв NACHA; в исходящих файлах пусто.
    pub iat_indicator: String,
    pub foreign_exchange_indicator: String,
    /// 1 — в ForeignExchangeReference курс, 2 — ссылка, 3 — поле пустое.
    pub foreign_exchange_reference_indicator: u8,
    pub foreign_exchange_reference: String,
    pub iso_destination_country_code: String,
    pub originator_identification: String,
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    pub iso_originating_currency_code: String,
    pub iso_destination_currency_code: String,
    pub effective_entry_date: String,
    pub settlement_date: String,
    pub originator_status_code: String,
    pub odfi_identification: String,
    pub batch_number: u32,
}

impl Default for IatBatchHeader {
    fn default() -> Self {
        IatBatchHeader {
            service_class_code: 0,
            iat_indicator: String::new(),
            foreign_exchange_indicator: String::new(),
            foreign_exchange_reference_indicator: 0,
            foreign_exchange_reference: String::new(),
            iso_destination_country_code: String::new(),
            originator_identification: String::new(),
            standard_entry_class_code: "IAT".to_string(),
            company_entry_description: String::new(),
            iso_originating_currency_code: String::new(),
            iso_destination_currency_code: String::new(),
            effective_entry_date: String::new(),
            settlement_date: String::new(),
            originator_status_code: "1".to_string(),
            odfi_identification: String::new(),
            batch_number: 0,
        }
    }
}

impl IatBatchHeader {
    /// Подпись заголовка для консолидации — без колонок номера батча (88–94).
    pub fn signature(&self) -> String {
        self.to_line().chars().take(87).collect()
    }
}

impl Record for IatBatchHeader {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '5')?;
        Ok(IatBatchHeader {
            service_class_code: field::parse_num(&field::slice(&c, 2, 4)) as u16,
            iat_indicator: field::trim_alpha(&field::slice(&c, 5, 20)),
            foreign_exchange_indicator: field::slice(&c, 21, 22),
            foreign_exchange_reference_indicator: field::parse_num(&field::slice(&c, 23, 23)) as u8,
            foreign_exchange_reference: field::trim_alpha(&field::slice(&c, 24, 38)),
            iso_destination_country_code: field::slice(&c, 39, 40),
            originator_identification: field::trim_alpha(&field::slice(&c, 41, 50)),
            standard_entry_class_code: field::slice(&c, 51, 53),
            company_entry_description: field::trim_alpha(&field::slice(&c, 54, 63)),
            iso_originating_currency_code: field::slice(&c, 64, 66),
            iso_destination_currency_code: field::slice(&c, 67, 69),
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
        out.push_str(&field::alpha(&self.iat_indicator, 16));
        out.push_str(&field::alpha(&self.foreign_exchange_indicator, 2));
        out.push_str(&field::numeric(
            &self.foreign_exchange_reference_indicator.to_string(),
            1,
        ));
        out.push_str(&field::alpha(&self.foreign_exchange_reference, 15));
        out.push_str(&field::alpha(&self.iso_destination_country_code, 2));
        out.push_str(&field::alpha(&self.originator_identification, 10));
        out.push_str(&field::alpha(&self.standard_entry_class_code, 3));
        out.push_str(&field::alpha(&self.company_entry_description, 10));
        out.push_str(&field::alpha(&self.iso_originating_currency_code, 3));
        out.push_str(&field::alpha(&self.iso_destination_currency_code, 3));
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
        if self.standard_entry_class_code != "IAT" {
            return Err(AchError::SecCode(self.standard_entry_class_code.clone()));
        }
        if !valid_foreign_exchange_indicator(&self.foreign_exchange_indicator) {
            return Err(AchError::FieldFormat {
                field: "ForeignExchangeIndicator",
                msg: format!(
                    "{:?}, expected FV, VF or FF",
                    self.foreign_exchange_indicator
                ),
            });
        }
        if !(1..=3).contains(&self.foreign_exchange_reference_indicator) {
            return Err(AchError::FieldFormat {
                field: "ForeignExchangeReferenceIndicator",
                msg: format!(
                    "{}, expected 1-3",
                    self.foreign_exchange_reference_indicator
                ),
            });
        }
        if self.iso_destination_country_code.trim().chars().count() != 2 {
            return Err(AchError::FieldInclusion {
                record: "IatBatchHeader",
                field: "ISODestinationCountryCode",
            });
        }
        if self.originator_identification.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatBatchHeader",
                field: "OriginatorIdentification",
            });
        }
        if self.company_entry_description.is_empty() {
            return Err(AchError::FieldInclusion {
                record: "IatBatchHeader",
                field: "CompanyEntryDescription",
            });
        }
        if self.iso_originating_currency_code.trim().chars().count() != 3 {
            return Err(AchError::FieldInclusion {
                record: "IatBatchHeader",
                field: "ISOOriginatingCurrencyCode",
            });
        }
        if self.iso_destination_currency_code.trim().chars().count() != 3 {
            return Err(AchError::FieldInclusion {
                record: "IatBatchHeader",
                field: "ISODestinationCurrencyCode",
            });
        }
        if !field::valid_yymmdd(&self.effective_entry_date) {
            return Err(AchError::FieldFormat {
                field: "EffectiveEntryDate",
                msg: format!("{:?} is not a YYMMDD date", self.effective_entry_date),
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
        field::validate_iso8859("IATIndicator", &self.iat_indicator)?;
        field::validate_iso8859("ForeignExchangeReference", &self.foreign_exchange_reference)?;
        field::validate_iso8859("OriginatorIdentification", &self.originator_identification)?;
        field::validate_iso8859("CompanyEntryDescription", &self.company_entry_description)?;
        Ok(())
    }
}

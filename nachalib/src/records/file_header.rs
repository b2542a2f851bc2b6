//! Заголовок файла (тип записи «1»).

use crate::error::{AchError, Result};
use crate::field;
use crate::file::ValidateOpts;
use crate::traits::Record;
use serde::{Deserialize, Serialize};

/// Первая запись файла: стороны обмена, дата создания и константы формата.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileHeader {
    /// Всегда «01».
    pub priority_code: String,
    /// Маршрутный номер принимающей стороны (обычно ACH-оператора).
    pub immediate_destination: String,
    /// Отправитель: маршрутный номер либо десятизначный номер компании.
    pub immediate_origin: String,
    /// YYMMDD.
    pub file_creation_date: String,
    /// HHMM.
    pub file_creation_time: String,
    /// A–Z или 0–9; различает файлы, созданные в один день.
    pub file_id_modifier: String,
    /// Всегда «094».
    pub record_size: String,
    /// Всегда «10».
    pub blocking_factor: String,
    /// Всегда «1».
    pub format_code: String,
    pub immediate_destination_name: String,
    pub immediate_origin_name: String,
    pub reference_code: String,
}

impl Default for FileHeader {
    fn default() -> Self {
        FileHeader {
            priority_code: "01".to_string(),
            immediate_destination: String::new(),
            immediate_origin: String::new(),
            file_creation_date: String::new(),
            file_creation_time: String::new(),
            file_id_modifier: "A".to_string(),
            record_size: "094".to_string(),
            blocking_factor: "10".to_string(),
            format_code: "1".to_string(),
            immediate_destination_name: String::new(),
            immediate_origin_name: String::new(),
            reference_code: String::new(),
        }
    }
}

impl FileHeader {
    /// Заголовок с текущими датой и временем создания.
    pub fn new() -> FileHeader {
        FileHeader {
            file_creation_date: field::today_yymmdd(),
            file_creation_time: field::now_hhmm(),
            ..FileHeader::default()
        }
    }

    /// Десятисимвольное поле идентификации: девять цифр пишутся с ведущим
    /// пробелом, иначе — набивка нулями.
    fn identification10(value: &str) -> String {
        if value.chars().count() == 9 {
            format!(" {value}")
        } else {
            field::numeric(value, 10)
        }
    }

    pub(crate) fn validate_with(&self, opts: &ValidateOpts) -> Result<()> {
        if self.priority_code != "01" {
            return Err(AchError::FieldFormat {
                field: "PriorityCode",
                msg: format!("{:?}, expected \"01\"", self.priority_code),
            });
        }
        if !opts.bypass_destination {
            if self.immediate_destination.is_empty() {
                return Err(AchError::FieldInclusion {
                    record: "FileHeader",
                    field: "ImmediateDestination",
                });
            }
            if !field::valid_routing_number(&self.immediate_destination) {
                return Err(AchError::FieldFormat {
                    field: "ImmediateDestination",
                    msg: format!("{:?} is not a valid routing number", self.immediate_destination),
                });
            }
        }
        if !opts.bypass_origin {
            if self.immediate_origin.is_empty() {
                return Err(AchError::FieldInclusion {
                    record: "FileHeader",
                    field: "ImmediateOrigin",
                });
            }
            let len = self.immediate_origin.chars().count();
            if !field::is_digits(&self.immediate_origin) || !(9..=10).contains(&len) {
                return Err(AchError::FieldFormat {
                    field: "ImmediateOrigin",
                    msg: format!("{:?} is not a 9- or 10-digit identification", self.immediate_origin),
                });
            }
        }
        if !field::valid_yymmdd(&self.file_creation_date) {
            return Err(AchError::FieldFormat {
                field: "FileCreationDate",
                msg: format!("{:?} is not a YYMMDD date", self.file_creation_date),
            });
        }
        if !self.file_creation_time.is_empty() && !field::valid_hhmm(&self.file_creation_time) {
            return Err(AchError::FieldFormat {
                field: "FileCreationTime",
                msg: format!("{:?} is not an HHMM time", self.file_creation_time),
            });
        }
        let modifier_ok = self.file_id_modifier.chars().count() == 1
            && self
                .file_id_modifier
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !modifier_ok {
            return Err(AchError::FieldFormat {
                field: "FileIDModifier",
                msg: format!("{:?}, expected a single A-Z or 0-9", self.file_id_modifier),
            });
        }
        if self.record_size != "094" {
            return Err(AchError::FieldFormat {
                field: "RecordSize",
                msg: format!("{:?}, expected \"094\"", self.record_size),
            });
        }
        if self.blocking_factor != "10" {
            return Err(AchError::FieldFormat {
                field: "BlockingFactor",
                msg: format!("{:?}, expected \"10\"", self.blocking_factor),
            });
        }
        if self.format_code != "1" {
            return Err(AchError::FieldFormat {
                field: "FormatCode",
                msg: format!("{:?}, expected \"1\"", self.format_code),
            });
        }
        field::validate_alphanumeric("ImmediateDestinationName", &self.immediate_destination_name)?;
        field::validate_alphanumeric("ImmediateOriginName", &self.immediate_origin_name)?;
        field::validate_alphanumeric("ReferenceCode", &self.reference_code)?;
        Ok(())
    }
}

impl Record for FileHeader {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '1')?;
        Ok(FileHeader {
            priority_code: field::slice(&c, 2, 3),
            immediate_destination: field::trim_id(&field::slice(&c, 4, 13)),
            immediate_origin: field::trim_id(&field::slice(&c, 14, 23)),
            file_creation_date: field::slice(&c, 24, 29),
            file_creation_time: field::slice(&c, 30, 33),
            file_id_modifier: field::slice(&c, 34, 34),
            record_size: field::slice(&c, 35, 37),
            blocking_factor: field::slice(&c, 38, 39),
            format_code: field::slice(&c, 40, 40),
            immediate_destination_name: field::trim_alpha(&field::slice(&c, 41, 63)),
            immediate_origin_name: field::trim_alpha(&field::slice(&c, 64, 86)),
            reference_code: field::trim_alpha(&field::slice(&c, 87, 94)),
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('1');
        out.push_str(&field::numeric(&self.priority_code, 2));
        out.push_str(&FileHeader::identification10(&self.immediate_destination));
        out.push_str(&FileHeader::identification10(&self.immediate_origin));
        out.push_str(&field::numeric(&self.file_creation_date, 6));
        out.push_str(&field::numeric(&self.file_creation_time, 4));
        out.push_str(&field::alpha(&self.file_id_modifier, 1));
        out.push_str(&field::numeric(&self.record_size, 3));
        out.push_str(&field::numeric(&self.blocking_factor, 2));
        out.push_str(&field::numeric(&self.format_code, 1));
        out.push_str(&field::alpha(&self.immediate_destination_name, 23));
        out.push_str(&field::alpha(&self.immediate_origin_name, 23));
        out.push_str(&field::alpha(&self.reference_code, 8));
        out
    }

    fn validate(&self) -> Result<()> {
        self.validate_with(&ValidateOpts::default())
    }
}

//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Нарушение построчной грамматики файла: длина строки, неизвестный тип
    /// записи, запись не на своём месте. Номер строки — с единицы.
    #[error("line {line}: {msg}")]
    FileFormat { line: usize, msg: String },

    #[error("{field}: invalid character in {value:?}")]
    InvalidCharacterSet { field: &'static str, value: String },

    #[error("{record}.{field}: required field is empty")]
    FieldInclusion {
        record: &'static str,
        field: &'static str,
    },

    #[error("{field}: {msg}")]
    FieldFormat { field: &'static str, msg: String },

    /// Первый символ строки не совпадает с типом разбираемой записи.
    #[error("record type {found:?}, expected {expected:?}")]
    RecordType { expected: char, found: char },

    /// Сохранённое контрольное значение расходится с пересчитанным.
    #[error("{field}: stored {stored} does not match calculated {calculated}")]
    ControlMismatch {
        field: &'static str,
        stored: String,
        calculated: String,
    },

    #[error("addenda type code {found:?}, expected {expected:?}")]
    AddendaTypeCode {
        found: String,
        expected: &'static str,
    },

    #[error("unknown change code {0:?}")]
    ChangeCode(String),

    #[error("unknown return code {0:?}")]
    ReturnCode(String),

    #[error("corrected data is required on a notification of change")]
    CorrectedData,

    #[error("invalid service class code {0}")]
    ServiceClassCode(u16),

    #[error("transaction code {code} not allowed for {context}")]
    TransactionCode { code: u8, context: &'static str },

    #[error("unknown standard entry class code {0:?}")]
    SecCode(String),

    /// Ошибка внутри батча; индекс — позиция батча в файле, с единицы.
    #[error("batch {index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<AchError>,
    },

    /// Постусловие консолидации нарушено. Признак дефекта, а не рабочий путь.
    #[error("flatten operation changed {0}")]
    FlattenChangedCounts(&'static str),
}

impl AchError {
    /// Оборачивает ошибку позицией батча для диагностики на уровне файла.
    pub fn in_batch(self, index: usize) -> AchError {
        AchError::Batch {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AchError>;

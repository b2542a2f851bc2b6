//! Унифицированный трэйт записей фиксированной ширины.

use crate::error::Result;

/// Запись NACHA: разбор строки из 94 символов, обратная сериализация
/// и проверка правил формата.
///
/// `parse` не гарантирует валидность данных — после разбора (как и после
/// ручного заполнения полей) вызывающий делает `validate`.
pub trait Record: Sized {
    /// Разбор одной строки файла. Длина строки (94 символа) уже проверена
    /// вызывающим, тип записи определён по первому символу.
    fn parse(line: &str) -> Result<Self>;

    /// Каноническая 94-символьная строка записи.
    fn to_line(&self) -> String;

    /// Проверка правил NACHA для записи.
    fn validate(&self) -> Result<()>;
}

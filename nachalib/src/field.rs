//! Примитивы полей фиксированной ширины: выравнивание, набивка и алфавиты NACHA.

use crate::error::{AchError, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Печатаемый ASCII, включая пробел, без управляющих символов.
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ -~]*$").expect("static regex"));

/// Только цифры — для маршрутных и трассировочных номеров.
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

/// Строка записи как срез символов; не-94-символьная строка отвергается
/// до любых обращений по колонкам.
pub fn chars94(line: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != 94 {
        return Err(AchError::FieldFormat {
            field: "Record",
            msg: format!("{} characters, expected 94", chars.len()),
        });
    }
    Ok(chars)
}

/// Первый символ строки должен совпадать с типом записи.
pub fn expect_record_type(chars: &[char], expected: char) -> Result<()> {
    let found = chars.first().copied().unwrap_or(' ');
    if found != expected {
        return Err(AchError::RecordType { expected, found });
    }
    Ok(())
}

/// Срез по колонкам записи. Индексация с единицы, границы включительно —
/// ровно как в таблицах раскладки NACHA.
pub fn slice(chars: &[char], from: usize, to: usize) -> String {
    chars[from - 1..to].iter().collect()
}

/// Алфавитное поле: выравнивание влево, набивка пробелами, усечение справа.
pub fn alpha(value: &str, width: usize) -> String {
    let mut out: String = value.chars().take(width).collect();
    for _ in out.chars().count()..width {
        out.push(' ');
    }
    out
}

/// Числовое поле: выравнивание вправо, набивка нулями слева; при переполнении
/// остаются младшие разряды.
pub fn numeric(value: &str, width: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let tail: String = if chars.len() > width {
        chars[chars.len() - width..].iter().collect()
    } else {
        value.to_string()
    };
    format!("{tail:0>width$}")
}

/// Сумма в центах как числовое поле.
pub fn amount(cents: i64, width: usize) -> String {
    numeric(&cents.to_string(), width)
}

/// Чтение алфавитного поля: пробелы справа отбрасываются.
pub fn trim_alpha(raw: &str) -> String {
    raw.trim_end().to_string()
}

/// Чтение идентификатора: пробелы по краям отбрасываются, ведущие нули значимы.
pub fn trim_id(raw: &str) -> String {
    raw.trim().to_string()
}

/// Чтение числового поля как количества: пустое или нечисловое значение — ноль.
pub fn parse_num(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

pub fn is_digits(value: &str) -> bool {
    DIGITS.is_match(value)
}

pub fn validate_alphanumeric(field: &'static str, value: &str) -> Result<()> {
    if ALPHANUMERIC.is_match(value) {
        Ok(())
    } else {
        Err(AchError::InvalidCharacterSet {
            field,
            value: value.to_string(),
        })
    }
}

/// IAT допускает расширенный алфавит: печатаемый ASCII плюс латиница-1.
pub fn validate_iso8859(field: &'static str, value: &str) -> Result<()> {
    let ok = value
        .chars()
        .all(|c| matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF));
    if ok {
        Ok(())
    } else {
        Err(AchError::InvalidCharacterSet {
            field,
            value: value.to_string(),
        })
    }
}

fn weighted_sum(digits: &str) -> u32 {
    const WEIGHTS: [u32; 9] = [3, 7, 1, 3, 7, 1, 3, 7, 1];
    digits
        .chars()
        .zip(WEIGHTS)
        .map(|(c, w)| c.to_digit(10).unwrap_or(0) * w)
        .sum()
}

/// Контрольная цифра восьмизначного идентификатора RDFI: взвешенная сумма
/// 3-7-1, дополнение до десятка.
pub fn check_digit(identification: &str) -> Result<u32> {
    if identification.chars().count() != 8 || !is_digits(identification) {
        return Err(AchError::FieldFormat {
            field: "RDFIIdentification",
            msg: format!("{identification:?} is not an 8-digit identification"),
        });
    }
    Ok((10 - weighted_sum(identification) % 10) % 10)
}

/// Полный девятизначный маршрутный номер: взвешенная сумма 3-7-1 кратна десяти.
pub fn valid_routing_number(routing: &str) -> bool {
    routing.chars().count() == 9 && is_digits(routing) && weighted_sum(routing) % 10 == 0
}

/// Младшие разряды — усечение entry hash до ширины контрольного поля.
pub fn least_significant(n: u64, digits: u32) -> u64 {
    n % 10u64.pow(digits)
}

pub fn valid_yymmdd(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%y%m%d").is_ok()
}

pub fn valid_hhmm(s: &str) -> bool {
    NaiveTime::parse_from_str(s, "%H%M").is_ok()
}

/// MMDD без года; 29 февраля допустимо.
pub fn valid_mmdd(s: &str) -> bool {
    s.chars().count() == 4 && NaiveDate::parse_from_str(&format!("24{s}"), "%y%m%d").is_ok()
}

/// Дата и время создания файла по локальным часам.
pub fn today_yymmdd() -> String {
    chrono::Local::now().format("%y%m%d").to_string()
}

pub fn now_hhmm() -> String {
    chrono::Local::now().format("%H%M").to_string()
}

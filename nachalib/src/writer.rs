//! Каноническая сериализация файла: записи в штатном порядке, хвост добит
//! строками-заполнителями до кратного десяти числа строк.

use crate::error::Result;
use crate::file::{File, BLOCKING_FACTOR};
use crate::traits::Record;
use std::io::Write;

pub fn write<W: Write>(mut w: W, file: &File) -> Result<()> {
    w.write_all(file_to_string(file).as_bytes())?;
    Ok(())
}

pub fn file_to_string(file: &File) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(file.header.to_line());
    for batch in &file.batches {
        lines.push(batch.header.to_line());
        if batch.is_adv() {
            for entry in &batch.adv_entries {
                lines.push(entry.to_line());
            }
            match &batch.adv_control {
                Some(control) => lines.push(control.to_line()),
                None => lines.push(batch.control.to_line()),
            }
        } else {
            for entry in &batch.entries {
                lines.push(entry.to_line());
                if let Some(a) = &entry.addenda02 {
                    lines.push(a.to_line());
                }
                for a in &entry.addenda05 {
                    lines.push(a.to_line());
                }
                if let Some(a) = &entry.addenda98 {
                    lines.push(a.to_line());
                }
                if let Some(a) = &entry.addenda99 {
                    lines.push(a.to_line());
                }
            }
            lines.push(batch.control.to_line());
        }
    }
    for batch in &file.iat_batches {
        lines.push(batch.header.to_line());
        for entry in &batch.entries {
            lines.push(entry.to_line());
            if let Some(a) = &entry.addenda10 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda11 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda12 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda13 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda14 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda15 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda16 {
                lines.push(a.to_line());
            }
            for a in &entry.addenda17 {
                lines.push(a.to_line());
            }
            for a in &entry.addenda18 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda98 {
                lines.push(a.to_line());
            }
            if let Some(a) = &entry.addenda99 {
                lines.push(a.to_line());
            }
        }
        lines.push(batch.control.to_line());
    }
    match &file.adv_control {
        Some(control) => lines.push(control.to_line()),
        None => lines.push(file.control.to_line()),
    }
    while lines.len() % BLOCKING_FACTOR as usize != 0 {
        lines.push("9".repeat(94));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

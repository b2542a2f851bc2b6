//! JSON-представление файла: ключи полей в camelCase, тип записи не
//! сериализуется, пустые адденды опускаются.

use crate::error::Result;
use crate::file::File;
use std::io::{Read, Write};

pub fn file_to_json<W: Write>(w: W, file: &File) -> Result<()> {
    serde_json::to_writer_pretty(w, file)?;
    Ok(())
}

pub fn file_from_json<R: Read>(r: R) -> Result<File> {
    Ok(serde_json::from_reader(r)?)
}

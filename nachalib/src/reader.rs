//! Потоковый разбор файла: записи классифицируются по первому символу,
//! порядок контролирует небольшой конечный автомат
//! (заголовок файла → батчи → контроль файла → заполнители).

use crate::addenda::addenda02::Addenda02;
use crate::addenda::addenda05::Addenda05;
use crate::addenda::addenda10::Addenda10;
use crate::addenda::addenda11::Addenda11;
use crate::addenda::addenda12::Addenda12;
use crate::addenda::addenda13::Addenda13;
use crate::addenda::addenda14::Addenda14;
use crate::addenda::addenda15::Addenda15;
use crate::addenda::addenda16::Addenda16;
use crate::addenda::addenda17::Addenda17;
use crate::addenda::addenda18::Addenda18;
use crate::addenda::addenda98::Addenda98;
use crate::addenda::addenda99::Addenda99;
use crate::batch::iat::IatBatch;
use crate::batch::Batch;
use crate::error::{AchError, Result};
use crate::file::{File, ValidateOpts};
use crate::records::adv_batch_control::AdvBatchControl;
use crate::records::adv_entry_detail::AdvEntryDetail;
use crate::records::adv_file_control::AdvFileControl;
use crate::records::batch_control::BatchControl;
use crate::records::batch_header::BatchHeader;
use crate::records::entry_detail::EntryDetail;
use crate::records::file_control::FileControl;
use crate::records::file_header::FileHeader;
use crate::records::iat_batch_header::IatBatchHeader;
use crate::records::iat_entry_detail::IatEntryDetail;
use crate::traits::Record;
use std::io::BufRead;

/// Чтение и проверка файла с флагами по умолчанию.
pub fn read<R: BufRead>(r: R) -> Result<File> {
    Reader::new(r).read()
}

/// Незакрытый батч в процессе разбора.
enum Open {
    None,
    Std(Batch),
    Iat(IatBatch),
}

pub struct Reader<R: BufRead> {
    inner: R,
    opts: ValidateOpts,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Reader<R> {
        Reader {
            inner,
            opts: ValidateOpts::default(),
        }
    }

    pub fn with_opts(inner: R, opts: ValidateOpts) -> Reader<R> {
        Reader { inner, opts }
    }

    /// Разбирает вход до конца и валидирует собранный файл.
    pub fn read(self) -> Result<File> {
        let opts = self.opts;
        let mut file = File::default();
        let mut open = Open::None;
        let mut have_header = false;
        let mut have_control = false;
        let mut line_no = 0usize;

        for raw in self.inner.lines() {
            let raw = raw?;
            line_no += 1;
            // CRLF допускается, пустые строки пропускаются.
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let length = line.chars().count();
            if length != 94 {
                return Err(AchError::FileFormat {
                    line: line_no,
                    msg: format!("record is {length} characters long, expected 94"),
                });
            }
            if line.chars().all(|c| c == '9') {
                // Заполнитель блока; допустим только в хвосте файла.
                if !have_control && !opts.allow_missing_file_control {
                    return Err(AchError::FileFormat {
                        line: line_no,
                        msg: "filler record before the file control".to_string(),
                    });
                }
                continue;
            }
            if have_control {
                return Err(AchError::FileFormat {
                    line: line_no,
                    msg: "record after the file control".to_string(),
                });
            }
            let kind = line.chars().next().unwrap_or(' ');
            if kind != '1' && !have_header && !opts.allow_missing_file_header {
                return Err(AchError::FileFormat {
                    line: line_no,
                    msg: "file must begin with a file header".to_string(),
                });
            }
            match kind {
                '1' => {
                    if have_header {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "second file header".to_string(),
                        });
                    }
                    if !matches!(open, Open::None) {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "file header inside a batch".to_string(),
                        });
                    }
                    file.header = FileHeader::parse(line)?;
                    have_header = true;
                }
                '5' => {
                    if !matches!(open, Open::None) {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "previous batch is missing its batch control".to_string(),
                        });
                    }
                    let sec: String = line.chars().skip(50).take(3).collect();
                    open = if sec == "IAT" {
                        Open::Iat(IatBatch::new(IatBatchHeader::parse(line)?))
                    } else {
                        Open::Std(Batch::new(BatchHeader::parse(line)?))
                    };
                }
                '6' => match &mut open {
                    Open::None => {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "entry detail outside of a batch".to_string(),
                        });
                    }
                    Open::Std(batch) => {
                        if batch.is_adv() {
                            batch.add_adv_entry(AdvEntryDetail::parse(line)?);
                        } else {
                            batch.add_entry(EntryDetail::parse(line)?);
                        }
                    }
                    Open::Iat(batch) => {
                        batch.add_entry(IatEntryDetail::parse(line)?);
                    }
                },
                '7' => match &mut open {
                    Open::None => {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "addenda outside of a batch".to_string(),
                        });
                    }
                    Open::Std(batch) => attach_standard_addenda(batch, line, line_no)?,
                    Open::Iat(batch) => attach_iat_addenda(batch, line, line_no)?,
                },
                '8' => match std::mem::replace(&mut open, Open::None) {
                    Open::None => {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "batch control without a batch header".to_string(),
                        });
                    }
                    Open::Std(mut batch) => {
                        if batch.is_adv() {
                            batch.adv_control = Some(AdvBatchControl::parse(line)?);
                        } else {
                            batch.control = BatchControl::parse(line)?;
                        }
                        file.batches.push(batch);
                    }
                    Open::Iat(mut batch) => {
                        batch.control = BatchControl::parse(line)?;
                        file.iat_batches.push(batch);
                    }
                },
                '9' => {
                    if !matches!(open, Open::None) {
                        return Err(AchError::FileFormat {
                            line: line_no,
                            msg: "file control inside a batch".to_string(),
                        });
                    }
                    if file.is_adv() {
                        file.adv_control = Some(AdvFileControl::parse(line)?);
                    } else {
                        file.control = FileControl::parse(line)?;
                    }
                    have_control = true;
                }
                other => {
                    return Err(AchError::FileFormat {
                        line: line_no,
                        msg: format!("unknown record type {other:?}"),
                    });
                }
            }
        }

        if !matches!(open, Open::None) {
            return Err(AchError::FileFormat {
                line: line_no,
                msg: "batch is missing its batch control".to_string(),
            });
        }
        if !have_header && !opts.allow_missing_file_header {
            return Err(AchError::FileFormat {
                line: line_no,
                msg: "missing file header".to_string(),
            });
        }
        if !have_control && !opts.allow_missing_file_control {
            return Err(AchError::FileFormat {
                line: line_no,
                msg: "missing file control".to_string(),
            });
        }
        file.validate_with(&opts)?;
        Ok(file)
    }
}

fn type_code(line: &str) -> String {
    line.chars().skip(1).take(2).collect()
}

fn attach_standard_addenda(batch: &mut Batch, line: &str, line_no: usize) -> Result<()> {
    if batch.is_adv() {
        return Err(AchError::FileFormat {
            line: line_no,
            msg: "addenda inside an ADV batch".to_string(),
        });
    }
    let entry = batch.entries.last_mut().ok_or_else(|| AchError::FileFormat {
        line: line_no,
        msg: "addenda before any entry detail".to_string(),
    })?;
    if entry.addenda_record_indicator != 1 {
        return Err(AchError::FileFormat {
            line: line_no,
            msg: "addenda follows an entry without the addenda record indicator".to_string(),
        });
    }
    match type_code(line).as_str() {
        "02" => entry.addenda02 = Some(Addenda02::parse(line)?),
        "05" => entry.addenda05.push(Addenda05::parse(line)?),
        "98" => entry.addenda98 = Some(Addenda98::parse(line)?),
        "99" => entry.addenda99 = Some(Addenda99::parse(line)?),
        other => {
            return Err(AchError::AddendaTypeCode {
                found: other.to_string(),
                expected: "02, 05, 98 or 99",
            });
        }
    }
    Ok(())
}

fn attach_iat_addenda(batch: &mut IatBatch, line: &str, line_no: usize) -> Result<()> {
    let entry = batch.entries.last_mut().ok_or_else(|| AchError::FileFormat {
        line: line_no,
        msg: "addenda before any entry detail".to_string(),
    })?;
    let code = type_code(line);
    let duplicate = |line_no: usize, code: &str| AchError::FileFormat {
        line: line_no,
        msg: format!("duplicate addenda{code} for the entry"),
    };
    match code.as_str() {
        "10" => {
            if entry.addenda10.is_some() {
                return Err(duplicate(line_no, "10"));
            }
            entry.addenda10 = Some(Addenda10::parse(line)?);
        }
        "11" => {
            if entry.addenda11.is_some() {
                return Err(duplicate(line_no, "11"));
            }
            entry.addenda11 = Some(Addenda11::parse(line)?);
        }
        "12" => {
            if entry.addenda12.is_some() {
                return Err(duplicate(line_no, "12"));
            }
            entry.addenda12 = Some(Addenda12::parse(line)?);
        }
        "13" => {
            if entry.addenda13.is_some() {
                return Err(duplicate(line_no, "13"));
            }
            entry.addenda13 = Some(Addenda13::parse(line)?);
        }
        "14" => {
            if entry.addenda14.is_some() {
                return Err(duplicate(line_no, "14"));
            }
            entry.addenda14 = Some(Addenda14::parse(line)?);
        }
        "15" => {
            if entry.addenda15.is_some() {
                return Err(duplicate(line_no, "15"));
            }
            entry.addenda15 = Some(Addenda15::parse(line)?);
        }
        "16" => {
            if entry.addenda16.is_some() {
                return Err(duplicate(line_no, "16"));
            }
            entry.addenda16 = Some(Addenda16::parse(line)?);
        }
        "17" => entry.addenda17.push(Addenda17::parse(line)?),
        "18" => entry.addenda18.push(Addenda18::parse(line)?),
        "98" => entry.addenda98 = Some(Addenda98::parse(line)?),
        "99" => entry.addenda99 = Some(Addenda99::parse(line)?),
        other => {
            return Err(AchError::AddendaTypeCode {
                found: other.to_string(),
                expected: "10-18, 98 or 99",
            });
        }
    }
    Ok(())
}

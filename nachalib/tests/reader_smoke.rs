use nachalib::batch::Batch;
use nachalib::error::AchError;
use nachalib::file::{File, ValidateOpts};
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::entry_detail::EntryDetail;
use nachalib::records::file_header::FileHeader;
use nachalib::traits::Record;
use nachalib::{reader, writer};
use std::io::Cursor;

fn file_header() -> FileHeader {
    FileHeader {
        immediate_destination: "231380104".to_string(),
        immediate_origin: "121042882".to_string(),
        file_creation_date: "241002".to_string(),
        file_creation_time: "0930".to_string(),
        ..FileHeader::default()
    }
}

fn ppd_header() -> BatchHeader {
    BatchHeader {
        service_class_code: 200,
        company_name: "ACME PAYROLL".to_string(),
        company_identification: "1312345678".to_string(),
        standard_entry_class_code: "PPD".to_string(),
        company_entry_description: "PAYROLL".to_string(),
        effective_entry_date: "241003".to_string(),
        odfi_identification: "12104288".to_string(),
        ..BatchHeader::default()
    }
}

fn credit_entry(amount: i64) -> EntryDetail {
    EntryDetail {
        transaction_code: 22,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "12345678".to_string(),
        amount,
        individual_name: "JANE DOE".to_string(),
        ..EntryDetail::default()
    }
}

fn valid_file() -> File {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = Batch::new(ppd_header());
    batch.add_entry(credit_entry(100_000));
    file.add_batch(batch);
    file.create().expect("create");
    file
}

fn valid_text() -> String {
    writer::file_to_string(&valid_file())
}

#[test]
fn reads_its_own_output() {
    let file = valid_file();
    let reparsed = reader::read(Cursor::new(valid_text())).expect("read");
    assert_eq!(reparsed, file);
}

#[test]
fn tolerates_crlf() {
    let text = valid_text().replace('\n', "\r\n");
    reader::read(Cursor::new(text)).expect("read with CRLF");
}

#[test]
fn rejects_a_short_line_with_its_number() {
    let mut lines: Vec<String> = valid_text().lines().map(str::to_string).collect();
    lines[2].pop();
    let err = reader::read(Cursor::new(lines.join("\n"))).unwrap_err();
    assert!(
        matches!(err, AchError::FileFormat { line: 3, .. }),
        "{err}"
    );
}

#[test]
fn rejects_an_unknown_record_type() {
    let mut lines: Vec<String> = valid_text().lines().map(str::to_string).collect();
    lines[1] = format!("4{}", &lines[1][1..]);
    let err = reader::read(Cursor::new(lines.join("\n"))).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { line: 2, .. }), "{err}");
}

#[test]
fn rejects_an_addenda_before_any_entry() {
    let header = file_header().to_line();
    let batch = ppd_header().to_line();
    let addenda = "705PAYMENT INFO".to_string() + &" ".repeat(94 - 15);
    let text = format!("{header}\n{batch}\n{addenda}\n");
    let err = reader::read(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { line: 3, .. }), "{err}");
}

#[test]
fn rejects_a_file_that_starts_in_the_middle() {
    let text = format!("{}\n", ppd_header().to_line());
    let err = reader::read(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { line: 1, .. }), "{err}");
}

#[test]
fn missing_file_header_can_be_bypassed() {
    let lines: Vec<String> = valid_text().lines().map(str::to_string).collect();
    let text = lines[1..].join("\n");
    assert!(reader::read(Cursor::new(text.clone())).is_err());

    let opts = ValidateOpts {
        allow_missing_file_header: true,
        bypass_origin: true,
        bypass_destination: true,
        ..ValidateOpts::default()
    };
    let file = reader::Reader::with_opts(Cursor::new(text), opts)
        .read()
        .expect("bypassed header");
    assert_eq!(file.batches.len(), 1);
}

#[test]
fn missing_file_control_can_be_bypassed() {
    // без контрольной записи и заполнителей
    let lines: Vec<String> = valid_text().lines().map(str::to_string).collect();
    let text = lines[..4].join("\n");
    assert!(reader::read(Cursor::new(text.clone())).is_err());

    let opts = ValidateOpts {
        allow_missing_file_control: true,
        ..ValidateOpts::default()
    };
    let file = reader::Reader::with_opts(Cursor::new(text), opts)
        .read()
        .expect("bypassed control");
    assert_eq!(file.control.entry_addenda_count, 0);
    assert_eq!(file.calculated_entry_addenda_count(), 1);
}

#[test]
fn rejects_records_after_the_file_control() {
    let mut lines: Vec<String> = valid_text().lines().map(str::to_string).collect();
    let extra = ppd_header().to_line();
    lines.push(extra);
    let err = reader::read(Cursor::new(lines.join("\n"))).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { .. }), "{err}");
}

#[test]
fn rejects_a_tampered_entry_hash() {
    let mut file = valid_file();
    file.control.entry_hash += 1;
    let err = file.validate().unwrap_err();
    assert!(
        matches!(err, AchError::ControlMismatch { field: "EntryHash", .. }),
        "{err}"
    );

    // без контрольной записи сверять нечего
    let opts = ValidateOpts {
        allow_missing_file_control: true,
        ..ValidateOpts::default()
    };
    file.validate_with(&opts).expect("bypassed");
}

#[test]
fn record_parse_rejects_a_wrong_leading_digit() {
    let err = FileHeader::parse(&ppd_header().to_line()).unwrap_err();
    assert!(
        matches!(err, AchError::RecordType { expected: '1', found: '5' }),
        "{err}"
    );
}

#[test]
fn rejects_an_unclosed_batch() {
    let header = file_header().to_line();
    let batch = ppd_header().to_line();
    let text = format!("{header}\n{batch}\n");
    let err = reader::read(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, AchError::FileFormat { .. }), "{err}");
}

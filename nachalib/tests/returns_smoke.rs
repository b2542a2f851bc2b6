use nachalib::addenda::addenda99::{lookup_return_code, Addenda99};
use nachalib::batch::Batch;
use nachalib::error::AchError;
use nachalib::file::File;
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::entry_detail::EntryDetail;
use nachalib::records::file_header::FileHeader;
use nachalib::traits::Record;
use nachalib::{reader, writer};
use std::io::Cursor;

fn return_addenda(code: &str) -> Addenda99 {
    Addenda99 {
        return_code: code.to_string(),
        original_trace: "121042880000001".to_string(),
        original_dfi: "23138010".to_string(),
        addenda_information: "INSUFFICIENT FUNDS".to_string(),
        ..Addenda99::default()
    }
}

fn returned_file() -> File {
    let mut file = File {
        header: FileHeader {
            immediate_destination: "231380104".to_string(),
            immediate_origin: "121042882".to_string(),
            file_creation_date: "241002".to_string(),
            file_creation_time: "0930".to_string(),
            ..FileHeader::default()
        },
        ..File::default()
    };
    let mut batch = Batch::new(BatchHeader {
        service_class_code: 200,
        company_name: "ACME PAYROLL".to_string(),
        company_identification: "1312345678".to_string(),
        standard_entry_class_code: "PPD".to_string(),
        company_entry_description: "RETURN".to_string(),
        effective_entry_date: "241003".to_string(),
        odfi_identification: "12104288".to_string(),
        ..BatchHeader::default()
    });
    let mut entry = EntryDetail {
        transaction_code: 22,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "12345678".to_string(),
        amount: 75_000,
        individual_name: "JANE DOE".to_string(),
        ..EntryDetail::default()
    };
    entry.addenda99 = Some(return_addenda("R01"));
    batch.add_entry(entry);
    file.add_batch(batch);
    file.create().expect("create");
    file
}

#[test]
fn return_roundtrip() {
    let file = returned_file();
    file.validate().expect("validate");
    assert_eq!(file.control.entry_addenda_count, 2);

    let text = writer::file_to_string(&file);
    let reparsed = reader::read(Cursor::new(text)).expect("read");
    assert_eq!(reparsed, file);
    let addenda = reparsed.batches[0].entries[0]
        .addenda99
        .as_ref()
        .expect("addenda99");
    assert_eq!(addenda.return_code, "R01");
    assert_eq!(addenda.original_dfi, "23138010");
}

#[test]
fn return_code_directory() {
    let code = lookup_return_code("r15").expect("R15");
    assert_eq!(code.code, "R15");
    assert_eq!(code.reason, "Beneficiary or Account Holder Deceased");
    assert!(lookup_return_code("R99").is_none());
}

#[test]
fn unknown_return_code_fails_validation() {
    let addenda = return_addenda("R99");
    assert!(matches!(addenda.validate(), Err(AchError::ReturnCode(code)) if code == "R99"));
}

#[test]
fn date_of_death_is_six_digits_or_blank() {
    let mut addenda = return_addenda("R15");
    addenda.date_of_death = "850214".to_string();
    addenda.validate().expect("six digits");

    addenda.date_of_death = String::new();
    addenda.validate().expect("blank");

    addenda.date_of_death = "12345".to_string();
    let err = addenda.validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "DateOfDeath", .. }), "{err}");
}

#[test]
fn addenda99_line_roundtrip() {
    let mut addenda = return_addenda("R02");
    addenda.date_of_death = "850214".to_string();
    addenda.trace_number = "121042880000009".to_string();
    let line = addenda.to_line();
    assert_eq!(line.chars().count(), 94);
    assert!(line.starts_with("799R02"));
    let reparsed = Addenda99::parse(&line).expect("parse");
    assert_eq!(reparsed, addenda);
}

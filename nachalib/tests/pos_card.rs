use nachalib::addenda::addenda02::Addenda02;
use nachalib::batch::Batch;
use nachalib::error::AchError;
use nachalib::file::File;
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::entry_detail::EntryDetail;
use nachalib::records::file_header::FileHeader;
use nachalib::traits::Record;
use nachalib::{reader, writer};
use std::io::Cursor;

fn terminal_addenda() -> Addenda02 {
    Addenda02 {
        reference_information_one: "REF1".to_string(),
        terminal_identification_code: "200509".to_string(),
        transaction_serial_number: "121042".to_string(),
        transaction_date: "1002".to_string(),
        terminal_location: "1 MARKET ST".to_string(),
        terminal_city: "SAN FRANCISCO".to_string(),
        terminal_state: "CA".to_string(),
        ..Addenda02::default()
    }
}

fn pos_file() -> File {
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
        service_class_code: 225,
        company_name: "CARD NETWORK".to_string(),
        company_identification: "1312345678".to_string(),
        standard_entry_class_code: "POS".to_string(),
        company_entry_description: "PURCHASE".to_string(),
        effective_entry_date: "241003".to_string(),
        odfi_identification: "12104288".to_string(),
        ..BatchHeader::default()
    });
    let mut entry = EntryDetail {
        transaction_code: 27,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "12345678".to_string(),
        amount: 4_250,
        individual_name: "JANE DOE".to_string(),
        ..EntryDetail::default()
    };
    entry.addenda02 = Some(terminal_addenda());
    batch.add_entry(entry);
    file.add_batch(batch);
    file.create().expect("create");
    file
}

#[test]
fn pos_roundtrip_keeps_the_terminal_addenda() {
    let file = pos_file();
    file.validate().expect("validate");
    assert_eq!(file.control.entry_addenda_count, 2);

    let text = writer::file_to_string(&file);
    let reparsed = reader::read(Cursor::new(text)).expect("read");
    assert_eq!(reparsed, file);
    let addenda = reparsed.batches[0].entries[0]
        .addenda02
        .as_ref()
        .expect("addenda02");
    assert_eq!(addenda.terminal_city, "SAN FRANCISCO");
    // эхо трассировочного номера родительской проводки
    assert_eq!(addenda.trace_number, reparsed.batches[0].entries[0].trace_number);
}

#[test]
fn pos_rejects_addenda05() {
    let mut file = pos_file();
    file.batches[0].entries[0]
        .addenda05
        .push(nachalib::addenda::addenda05::Addenda05::default());
    file.create().expect("create");
    let err = file.validate().unwrap_err();
    match err {
        AchError::Batch { source, .. } => {
            assert!(matches!(*source, AchError::FieldFormat { field: "Addenda05", .. }), "{source}");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn addenda02_requires_the_terminal_fields() {
    let mut addenda = terminal_addenda();
    addenda.terminal_city = String::new();
    let err = addenda.validate().unwrap_err();
    assert!(
        matches!(err, AchError::FieldInclusion { record: "Addenda02", field: "TerminalCity" }),
        "{err}"
    );
}

#[test]
fn addenda02_validates_the_transaction_date() {
    let mut addenda = terminal_addenda();
    addenda.transaction_date = "1332".to_string();
    let err = addenda.validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "TransactionDate", .. }), "{err}");
}

#[test]
fn addenda02_line_roundtrip() {
    let mut addenda = terminal_addenda();
    addenda.trace_number = "121042880000001".to_string();
    let line = addenda.to_line();
    assert_eq!(line.chars().count(), 94);
    assert!(line.starts_with("702"));
    let reparsed = Addenda02::parse(&line).expect("parse");
    assert_eq!(reparsed, addenda);
}

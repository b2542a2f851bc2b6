use nachalib::batch::Batch;
use nachalib::error::AchError;
use nachalib::file::File;
use nachalib::records::adv_entry_detail::AdvEntryDetail;
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::file_header::FileHeader;
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

fn adv_header() -> BatchHeader {
    BatchHeader {
        service_class_code: 280,
        company_name: "ACH OPERATOR".to_string(),
        company_identification: "1312345678".to_string(),
        standard_entry_class_code: "ADV".to_string(),
        company_entry_description: "ADVICE".to_string(),
        effective_entry_date: "241003".to_string(),
        originator_status_code: "0".to_string(),
        odfi_identification: "12104288".to_string(),
        ..BatchHeader::default()
    }
}

fn advice(code: u8, amount: i64) -> AdvEntryDetail {
    AdvEntryDetail {
        transaction_code: code,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "123456".to_string(),
        amount,
        advice_routing_number: "121042882".to_string(),
        file_identification: "00001".to_string(),
        individual_name: "FIRST BANK".to_string(),
        ach_operator_routing_number: "12104288".to_string(),
        julian_day: 276,
        ..AdvEntryDetail::default()
    }
}

fn adv_file() -> File {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = Batch::new(adv_header());
    batch.add_adv_entry(advice(81, 1_000_000));
    batch.add_adv_entry(advice(82, 400_000));
    file.add_batch(batch);
    file.create().expect("create");
    file
}

#[test]
fn adv_file_builds_twenty_digit_controls() {
    let file = adv_file();
    file.validate().expect("validate");
    assert!(file.is_adv());

    let control = file.adv_control.as_ref().expect("ADV file control");
    assert_eq!(control.entry_addenda_count, 2);
    assert_eq!(control.total_credit, 1_000_000);
    assert_eq!(control.total_debit, 400_000);

    let batch_control = file.batches[0].adv_control.as_ref().expect("ADV batch control");
    assert_eq!(batch_control.total_credit, 1_000_000);
    assert_eq!(batch_control.total_debit, 400_000);
    assert_eq!(batch_control.entry_hash, 2 * 23_138_010);
}

#[test]
fn adv_roundtrip() {
    let file = adv_file();
    let text = writer::file_to_string(&file);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.iter().all(|l| l.chars().count() == 94));

    let reparsed = reader::read(Cursor::new(text)).expect("read");
    assert_eq!(reparsed, file);
    assert!(reparsed.is_adv());
}

#[test]
fn adv_rejects_foreign_transaction_codes() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = Batch::new(adv_header());
    batch.add_adv_entry(advice(22, 100));
    file.add_batch(batch);
    file.create().expect("create");

    let err = file.validate().unwrap_err();
    match err {
        AchError::Batch { source, .. } => {
            assert!(
                matches!(*source, AchError::TransactionCode { code: 22, context: "ADV" }),
                "{source}"
            );
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn adv_requires_service_class_280() {
    let mut header = adv_header();
    header.service_class_code = 200;
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = Batch::new(header);
    batch.add_adv_entry(advice(81, 100));
    file.add_batch(batch);
    file.create().expect("create");

    let err = file.validate().unwrap_err();
    match err {
        AchError::Batch { source, .. } => {
            assert!(matches!(*source, AchError::ServiceClassCode(200)), "{source}");
        }
        other => panic!("unexpected error {other}"),
    }
}

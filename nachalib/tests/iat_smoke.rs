use nachalib::addenda::addenda10::Addenda10;
use nachalib::addenda::addenda11::Addenda11;
use nachalib::addenda::addenda12::Addenda12;
use nachalib::addenda::addenda13::Addenda13;
use nachalib::addenda::addenda14::Addenda14;
use nachalib::addenda::addenda15::Addenda15;
use nachalib::addenda::addenda16::Addenda16;
use nachalib::addenda::addenda17::Addenda17;
use nachalib::batch::iat::IatBatch;
use nachalib::error::AchError;
use nachalib::file::File;
use nachalib::records::file_header::FileHeader;
use nachalib::records::iat_batch_header::IatBatchHeader;
use nachalib::records::iat_entry_detail::IatEntryDetail;
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

fn iat_header() -> IatBatchHeader {
    IatBatchHeader {
        service_class_code: 220,
        foreign_exchange_indicator: "FF".to_string(),
        foreign_exchange_reference_indicator: 3,
        iso_destination_country_code: "CA".to_string(),
        originator_identification: "123456789".to_string(),
        company_entry_description: "TRADEPAY".to_string(),
        iso_originating_currency_code: "USD".to_string(),
        iso_destination_currency_code: "CAD".to_string(),
        effective_entry_date: "241003".to_string(),
        odfi_identification: "12104288".to_string(),
        ..IatBatchHeader::default()
    }
}

fn iat_entry(amount: i64) -> IatEntryDetail {
    IatEntryDetail {
        transaction_code: 22,
        rdfi_identification: "23138010".to_string(),
        amount,
        dfi_account_number: "987654321".to_string(),
        addenda10: Some(Addenda10 {
            transaction_type_code: "BUS".to_string(),
            foreign_payment_amount: amount,
            name: "MAPLE SUPPLY LTD".to_string(),
            ..Addenda10::default()
        }),
        addenda11: Some(Addenda11 {
            originator_name: "ACME CORP".to_string(),
            originator_street_address: "12 MAIN ST".to_string(),
            ..Addenda11::default()
        }),
        addenda12: Some(Addenda12 {
            originator_city_state_province: "PORTLAND*OR".to_string(),
            originator_country_postal_code: "US*97035".to_string(),
            ..Addenda12::default()
        }),
        addenda13: Some(Addenda13 {
            odfi_name: "FIRST BANK".to_string(),
            odfi_id_number_qualifier: "01".to_string(),
            odfi_identification: "121042882".to_string(),
            odfi_branch_country_code: "US".to_string(),
            ..Addenda13::default()
        }),
        addenda14: Some(Addenda14 {
            rdfi_name: "MAPLE BANK".to_string(),
            rdfi_id_number_qualifier: "01".to_string(),
            rdfi_identification: "231380104".to_string(),
            rdfi_branch_country_code: "CA".to_string(),
            ..Addenda14::default()
        }),
        addenda15: Some(Addenda15 {
            receiver_id_number: "9876".to_string(),
            receiver_street_address: "1 KING ST".to_string(),
            ..Addenda15::default()
        }),
        addenda16: Some(Addenda16 {
            receiver_city_state_province: "OTTAWA*ON".to_string(),
            receiver_country_postal_code: "CA*K1A0B1".to_string(),
            ..Addenda16::default()
        }),
        ..IatEntryDetail::default()
    }
}

fn iat_file() -> File {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = IatBatch::new(iat_header());
    batch.add_entry(iat_entry(250_000));
    file.add_iat_batch(batch);
    file.create().expect("create");
    file
}

#[test]
fn roundtrip_keeps_the_addenda_chain() {
    let file = iat_file();
    file.validate().expect("validate");
    assert_eq!(file.control.entry_addenda_count, 8);
    assert_eq!(file.iat_batches[0].entries[0].addenda_records, 7);

    let text = writer::file_to_string(&file);
    let reparsed = reader::read(Cursor::new(text)).expect("read");
    assert_eq!(reparsed, file);
    let entry = &reparsed.iat_batches[0].entries[0];
    assert_eq!(
        entry.addenda14.as_ref().map(|a| a.rdfi_name.as_str()),
        Some("MAPLE BANK")
    );
}

#[test]
fn a_missing_mandatory_addenda_fails_validation() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = IatBatch::new(iat_header());
    let mut entry = iat_entry(250_000);
    entry.addenda14 = None;
    batch.add_entry(entry);
    file.add_iat_batch(batch);
    file.create().expect("create");

    let err = file.validate().unwrap_err();
    match err {
        AchError::Batch { index, source } => {
            assert_eq!(index, 1);
            assert!(
                matches!(*source, AchError::FieldInclusion { field: "Addenda14", .. }),
                "{source}"
            );
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn optional_addenda17_counts_into_the_control() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = IatBatch::new(iat_header());
    let mut entry = iat_entry(250_000);
    entry.addenda17.push(Addenda17 {
        payment_related_information: "INVOICE 77".to_string(),
        ..Addenda17::default()
    });
    batch.add_entry(entry);
    file.add_iat_batch(batch);
    file.create().expect("create");
    file.validate().expect("validate");

    assert_eq!(file.iat_batches[0].entries[0].addenda_records, 8);
    assert_eq!(file.control.entry_addenda_count, 9);
}

#[test]
fn too_many_addenda18_fail_validation() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut batch = IatBatch::new(iat_header());
    let mut entry = iat_entry(250_000);
    for i in 0..6 {
        entry.addenda18.push(nachalib::addenda::addenda18::Addenda18 {
            foreign_correspondent_bank_name: format!("CORRESPONDENT {i}"),
            foreign_correspondent_bank_id_number_qualifier: "01".to_string(),
            foreign_correspondent_bank_id_number: format!("9000{i}"),
            foreign_correspondent_bank_branch_country_code: "GB".to_string(),
            ..nachalib::addenda::addenda18::Addenda18::default()
        });
    }
    batch.add_entry(entry);
    file.add_iat_batch(batch);
    file.create().expect("create");

    let err = file.validate().unwrap_err();
    match err {
        AchError::Batch { source, .. } => {
            assert!(
                matches!(*source, AchError::FieldFormat { field: "Addenda18", .. }),
                "{source}"
            );
        }
        other => panic!("unexpected error {other}"),
    }
}

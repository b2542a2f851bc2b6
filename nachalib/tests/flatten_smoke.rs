use nachalib::addenda::addenda10::Addenda10;
use nachalib::addenda::addenda11::Addenda11;
use nachalib::addenda::addenda12::Addenda12;
use nachalib::addenda::addenda13::Addenda13;
use nachalib::addenda::addenda14::Addenda14;
use nachalib::addenda::addenda15::Addenda15;
use nachalib::addenda::addenda16::Addenda16;
use nachalib::batch::iat::IatBatch;
use nachalib::batch::Batch;
use nachalib::file::{File, ValidateOpts};
use nachalib::flatten::flatten;
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::entry_detail::EntryDetail;
use nachalib::records::file_header::FileHeader;
use nachalib::records::iat_batch_header::IatBatchHeader;
use nachalib::records::iat_entry_detail::IatEntryDetail;

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

fn credit_entry(amount: i64, sequence: u32) -> EntryDetail {
    let mut entry = EntryDetail {
        transaction_code: 22,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "12345678".to_string(),
        amount,
        individual_name: "JANE DOE".to_string(),
        ..EntryDetail::default()
    };
    entry.set_trace_number("12104288", sequence);
    entry
}

fn custom() -> ValidateOpts {
    ValidateOpts {
        custom_trace_numbers: true,
        ..ValidateOpts::default()
    }
}

/// Три PPD-батча с одинаковыми заголовками и непересекающимися
/// трассировочными номерами.
fn mergeable_file() -> File {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    for i in 0..3u32 {
        let mut batch = Batch::new(ppd_header());
        batch.add_entry(credit_entry(100_000 + i64::from(i), i * 2 + 1));
        batch.add_entry(credit_entry(200_000 + i64::from(i), i * 2 + 2));
        file.add_batch(batch);
    }
    file.create_with(&custom()).expect("create");
    file.validate_with(&custom()).expect("validate");
    file
}

#[test]
fn merges_compatible_batches_into_one() {
    let file = mergeable_file();
    let flattened = flatten(&file).expect("flatten");

    assert_eq!(flattened.batches.len(), 1);
    assert_eq!(flattened.batches[0].entries.len(), 6);
    let traces: Vec<String> = flattened.batches[0]
        .entries
        .iter()
        .map(|e| e.trace_number.clone())
        .collect();
    let mut sorted = traces.clone();
    sorted.sort();
    assert_eq!(traces, sorted);

    assert_eq!(
        flattened.control.entry_addenda_count,
        file.control.entry_addenda_count
    );
    assert_eq!(flattened.control.total_debit, file.control.total_debit);
    assert_eq!(flattened.control.total_credit, file.control.total_credit);
    flattened.validate().expect("flattened file is valid");
}

#[test]
fn common_trace_numbers_block_the_merge() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut first = Batch::new(ppd_header());
    first.add_entry(credit_entry(100_000, 1));
    first.add_entry(credit_entry(110_000, 2));
    file.add_batch(first);
    let mut second = Batch::new(ppd_header());
    second.add_entry(credit_entry(120_000, 2)); // общий номер с первым батчем
    second.add_entry(credit_entry(130_000, 3));
    file.add_batch(second);
    file.create_with(&custom()).expect("create");
    file.validate_with(&custom()).expect("validate");

    let flattened = flatten(&file).expect("flatten");
    assert_eq!(flattened.batches.len(), 2);
    assert_eq!(flattened.control.total_credit, file.control.total_credit);
}

#[test]
fn different_headers_never_merge() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut first = Batch::new(ppd_header());
    first.add_entry(credit_entry(100_000, 1));
    file.add_batch(first);
    let mut other_header = ppd_header();
    other_header.company_entry_description = "BONUS".to_string();
    let mut second = Batch::new(other_header);
    second.add_entry(credit_entry(200_000, 2));
    file.add_batch(second);
    file.create_with(&custom()).expect("create");

    let flattened = flatten(&file).expect("flatten");
    assert_eq!(flattened.batches.len(), 2);
}

#[test]
fn input_batch_order_does_not_change_the_result() {
    let file = mergeable_file();
    let mut reordered = File {
        header: file_header(),
        ..File::default()
    };
    for batch in file.batches.iter().rev() {
        let mut batch = batch.clone();
        batch.header.batch_number = 0;
        reordered.add_batch(batch);
    }
    reordered.create_with(&custom()).expect("create");

    let a = flatten(&file).expect("flatten");
    let b = flatten(&reordered).expect("flatten reordered");
    let counts = |f: &File| {
        let mut counts: Vec<usize> = f.batches.iter().map(|b| b.entries.len()).collect();
        counts.sort();
        counts
    };
    assert_eq!(counts(&a), counts(&b));
    assert_eq!(a.control.total_credit, b.control.total_credit);
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

fn iat_entry(amount: i64, sequence: u32) -> IatEntryDetail {
    let mut entry = IatEntryDetail {
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
    };
    entry.set_trace_number("12104288", sequence);
    entry
}

#[test]
fn iat_entries_keep_their_addenda_through_the_merge() {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut first = IatBatch::new(iat_header());
    first.add_entry(iat_entry(250_000, 1));
    file.add_iat_batch(first);
    let mut second = IatBatch::new(iat_header());
    second.add_entry(iat_entry(350_000, 2));
    file.add_iat_batch(second);
    file.create_with(&custom()).expect("create");
    file.validate_with(&custom()).expect("validate");

    let flattened = flatten(&file).expect("flatten");
    assert_eq!(flattened.iat_batches.len(), 1);
    assert_eq!(flattened.iat_batches[0].entries.len(), 2);
    for entry in &flattened.iat_batches[0].entries {
        assert!(entry.addenda10.is_some());
        assert!(entry.addenda16.is_some());
        assert_eq!(entry.addenda_records, 7);
    }
    assert_eq!(
        flattened.control.entry_addenda_count,
        file.control.entry_addenda_count
    );
}

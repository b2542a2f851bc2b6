use nachalib::batch::Batch;
use nachalib::file::File;
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
        immediate_destination_name: "FEDERAL RESERVE".to_string(),
        immediate_origin_name: "ACME CORP".to_string(),
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

fn two_batch_file() -> File {
    let mut file = File {
        header: file_header(),
        ..File::default()
    };
    let mut first = Batch::new(ppd_header());
    first.add_entry(credit_entry(100_000));
    file.add_batch(first);
    let mut second = Batch::new(ppd_header());
    second.add_entry(credit_entry(150_000));
    file.add_batch(second);
    file.create().expect("create");
    file
}

#[test]
fn roundtrip_preserves_the_file() {
    let file = two_batch_file();
    file.validate().expect("validate");

    let text = writer::file_to_string(&file);
    // каждая строка ровно 94 символа, число строк кратно десяти
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len() % 10, 0);
    assert!(lines.iter().all(|l| l.chars().count() == 94));

    let reparsed = reader::read(Cursor::new(text)).expect("read");
    assert_eq!(reparsed, file);
    assert_eq!(reparsed.control.total_credit, 250_000);
    assert_eq!(reparsed.control.total_debit, 0);
    assert_eq!(reparsed.control.batch_count, 2);
    assert_eq!(reparsed.control.entry_addenda_count, 2);
}

#[test]
fn batch_headers_differ_only_by_number() {
    let file = two_batch_file();
    assert_eq!(file.batches[0].header.batch_number, 1);
    assert_eq!(file.batches[1].header.batch_number, 2);
    assert_eq!(
        file.batches[0].header.signature(),
        file.batches[1].header.signature()
    );
    assert_ne!(
        file.batches[0].header.to_line(),
        file.batches[1].header.to_line()
    );
}

#[test]
fn create_is_idempotent() {
    let mut file = two_batch_file();
    let snapshot = file.clone();
    file.create().expect("second create");
    assert_eq!(file, snapshot);
}

#[test]
fn check_digit_matches_the_rdfi_identification() {
    let file = two_batch_file();
    for batch in &file.batches {
        for entry in &batch.entries {
            let calculated = nachalib::field::check_digit(&entry.rdfi_identification)
                .expect("check digit");
            assert_eq!(entry.check_digit, calculated.to_string());
        }
    }
}

#[test]
fn trace_numbers_are_unique_and_prefixed() {
    let file = two_batch_file();
    for batch in &file.batches {
        let traces = batch.trace_numbers();
        assert_eq!(traces.len(), batch.entries.len());
        for trace in &traces {
            assert!(trace.starts_with("12104288"));
            assert_eq!(trace.chars().count(), 15);
        }
    }
}

#[test]
fn file_control_sums_the_batch_controls() {
    let file = two_batch_file();
    let count: u32 = file.batches.iter().map(|b| b.control.entry_addenda_count).sum();
    let credit: i64 = file.batches.iter().map(|b| b.control.total_credit).sum();
    let hash: u64 = file.batches.iter().map(|b| b.control.entry_hash).sum();
    assert_eq!(file.control.entry_addenda_count, count);
    assert_eq!(file.control.total_credit, credit);
    assert_eq!(file.control.entry_hash, hash % 10_000_000_000);
}

use nachalib::addenda::addenda05::Addenda05;
use nachalib::addenda::addenda98::Addenda98;
use nachalib::batch::Batch;
use nachalib::error::AchError;
use nachalib::file::ValidateOpts;
use nachalib::records::batch_header::BatchHeader;
use nachalib::records::entry_detail::EntryDetail;

fn header(sec: &str, service_class: u16) -> BatchHeader {
    BatchHeader {
        service_class_code: service_class,
        company_name: "ACME PAYROLL".to_string(),
        company_identification: "1312345678".to_string(),
        standard_entry_class_code: sec.to_string(),
        company_entry_description: "PAYROLL".to_string(),
        effective_entry_date: "241003".to_string(),
        odfi_identification: "12104288".to_string(),
        ..BatchHeader::default()
    }
}

fn entry(code: u8, amount: i64) -> EntryDetail {
    EntryDetail {
        transaction_code: code,
        rdfi_identification: "23138010".to_string(),
        dfi_account_number: "12345678".to_string(),
        amount,
        individual_name: "JANE DOE".to_string(),
        ..EntryDetail::default()
    }
}

fn built(mut batch: Batch) -> Batch {
    batch.header.batch_number = 1;
    batch.create().expect("create");
    batch
}

#[test]
fn web_requires_a_payment_type() {
    let mut batch = Batch::new(header("WEB", 200));
    batch.add_entry(entry(27, 5_000));
    let batch = built(batch);
    let err = batch.validate().unwrap_err();
    assert!(
        matches!(err, AchError::FieldFormat { field: "PaymentType", .. }),
        "{err}"
    );

    let mut batch = Batch::new(header("WEB", 200));
    let mut e = entry(27, 5_000);
    e.discretionary_data = "R".to_string();
    batch.add_entry(e);
    built(batch).validate().expect("recurring WEB debit");
}

#[test]
fn web_rejects_corporate_codes() {
    let mut batch = Batch::new(header("WEB", 200));
    let mut e = entry(24, 0);
    e.discretionary_data = "S".to_string();
    batch.add_entry(e);
    let err = built(batch).validate().unwrap_err();
    assert!(
        matches!(err, AchError::TransactionCode { code: 24, context: "WEB" }),
        "{err}"
    );
}

#[test]
fn tel_allows_no_addenda() {
    let mut batch = Batch::new(header("TEL", 225));
    let mut e = entry(27, 5_000);
    e.discretionary_data = "S".to_string();
    e.addenda05.push(Addenda05 {
        payment_related_information: "CALL REF 42".to_string(),
        ..Addenda05::default()
    });
    batch.add_entry(e);
    let err = built(batch).validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "Addenda05", .. }), "{err}");
}

#[test]
fn tel_rejects_credits() {
    let mut batch = Batch::new(header("TEL", 225));
    let mut e = entry(22, 5_000);
    e.discretionary_data = "S".to_string();
    batch.add_entry(e);
    let err = built(batch).validate().unwrap_err();
    assert!(
        matches!(err, AchError::TransactionCode { code: 22, context: "TEL" }),
        "{err}"
    );
}

#[test]
fn credits_only_batch_rejects_a_debit() {
    let mut batch = Batch::new(header("PPD", 220));
    batch.add_entry(entry(27, 5_000));
    let err = built(batch).validate().unwrap_err();
    assert!(
        matches!(err, AchError::TransactionCode { context: "credits-only batch", .. }),
        "{err}"
    );
}

#[test]
fn ppd_allows_at_most_one_addenda05() {
    let mut batch = Batch::new(header("PPD", 200));
    let mut e = entry(22, 5_000);
    for _ in 0..2 {
        e.addenda05.push(Addenda05 {
            payment_related_information: "LINE".to_string(),
            ..Addenda05::default()
        });
    }
    batch.add_entry(e);
    let err = built(batch).validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "Addenda05", .. }), "{err}");
}

#[test]
fn ctx_accepts_many_addenda05() {
    let mut batch = Batch::new(header("CTX", 200));
    let mut e = entry(22, 5_000);
    for i in 0..40 {
        e.addenda05.push(Addenda05 {
            payment_related_information: format!("INVOICE {i}"),
            ..Addenda05::default()
        });
    }
    batch.add_entry(e);
    let batch = built(batch);
    batch.validate().expect("CTX with 40 addenda");
    assert_eq!(batch.control.entry_addenda_count, 41);
}

#[test]
fn ccd_accepts_zero_dollar_remittance_codes() {
    let mut batch = Batch::new(header("CCD", 200));
    let mut e = entry(24, 0);
    e.addenda05.push(Addenda05 {
        payment_related_information: "ISA*00*REMITTANCE".to_string(),
        ..Addenda05::default()
    });
    batch.add_entry(e);
    built(batch).validate().expect("CCD zero dollar remittance");
}

#[test]
fn cor_requires_a_notification_of_change() {
    let mut batch = Batch::new(header("COR", 200));
    batch.add_entry(entry(21, 0));
    let err = built(batch).validate().unwrap_err();
    assert!(
        matches!(
            err,
            AchError::FieldInclusion { record: "EntryDetail", field: "Addenda98" }
        ),
        "{err}"
    );
}

#[test]
fn cor_accepts_a_zero_amount_entry_with_addenda98() {
    let mut batch = Batch::new(header("COR", 200));
    let mut e = entry(21, 0);
    e.addenda98 = Some(Addenda98 {
        change_code: "C01".to_string(),
        original_trace: "121042880000001".to_string(),
        original_dfi: "23138010".to_string(),
        corrected_data: "1918171614".to_string(),
        ..Addenda98::default()
    });
    batch.add_entry(e);
    built(batch).validate().expect("COR batch");
}

#[test]
fn cor_rejects_an_amount() {
    let mut batch = Batch::new(header("COR", 200));
    let mut e = entry(21, 4_200);
    e.addenda98 = Some(Addenda98 {
        change_code: "C01".to_string(),
        original_trace: "121042880000001".to_string(),
        original_dfi: "23138010".to_string(),
        corrected_data: "1918171614".to_string(),
        ..Addenda98::default()
    });
    batch.add_entry(e);
    let err = built(batch).validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "Amount", .. }), "{err}");
}

#[test]
fn duplicate_custom_trace_numbers_are_rejected() {
    let opts = ValidateOpts {
        custom_trace_numbers: true,
        ..ValidateOpts::default()
    };
    let mut batch = Batch::new(header("PPD", 200));
    let mut first = entry(22, 5_000);
    first.set_trace_number("12104288", 7);
    let mut second = entry(22, 6_000);
    second.set_trace_number("12104288", 7);
    batch.add_entry(first);
    batch.add_entry(second);
    batch.header.batch_number = 1;
    batch.create_with(&opts).expect("create");
    let err = batch.validate_with(&opts).unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "TraceNumber", .. }), "{err}");
}

#[test]
fn tampered_check_digit_is_rejected() {
    let mut batch = Batch::new(header("PPD", 200));
    batch.add_entry(entry(22, 5_000));
    let mut batch = built(batch);
    batch.entries[0].check_digit = "9".to_string();
    let err = batch.validate().unwrap_err();
    assert!(
        matches!(err, AchError::ControlMismatch { field: "CheckDigit", .. }),
        "{err}"
    );
}

#[test]
fn prenote_must_carry_a_zero_amount() {
    let mut batch = Batch::new(header("PPD", 200));
    batch.add_entry(entry(23, 100));
    let err = built(batch).validate().unwrap_err();
    assert!(matches!(err, AchError::FieldFormat { field: "Amount", .. }), "{err}");
}

#[test]
fn unknown_sec_code_is_rejected() {
    let mut batch = Batch::new(header("XYZ", 200));
    batch.add_entry(entry(22, 100));
    batch.header.batch_number = 1;
    let err = batch.create().unwrap_err();
    assert!(matches!(&err, AchError::SecCode(code) if code == "XYZ"), "{err}");
}

#[test]
fn company_identification_echo_can_be_bypassed() {
    let mut batch = Batch::new(header("PPD", 200));
    batch.add_entry(entry(22, 5_000));
    let mut batch = built(batch);
    batch.control.company_identification = "1399999999".to_string();
    let err = batch.validate().unwrap_err();
    assert!(
        matches!(err, AchError::ControlMismatch { field: "CompanyIdentification", .. }),
        "{err}"
    );
    let opts = ValidateOpts {
        bypass_company_identification_match: true,
        ..ValidateOpts::default()
    };
    batch.validate_with(&opts).expect("bypassed echo");
}

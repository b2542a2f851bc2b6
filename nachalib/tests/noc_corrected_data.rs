use nachalib::addenda::addenda98::{lookup_change_code, Addenda98};
use nachalib::error::AchError;
use nachalib::traits::Record;

fn addenda98(change_code: &str, corrected_data: &str) -> Addenda98 {
    Addenda98 {
        change_code: change_code.to_string(),
        original_trace: "121042880000001".to_string(),
        original_dfi: "23138010".to_string(),
        corrected_data: corrected_data.to_string(),
        trace_number: "121042880000001".to_string(),
        ..Addenda98::default()
    }
}

#[test]
fn c03_routing_and_account() {
    let a = addenda98("C03", "074000078 12345678");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.routing_number.as_deref(), Some("074000078"));
    assert_eq!(data.account_number.as_deref(), Some("12345678"));
    assert_eq!(data.transaction_code, None);
}

#[test]
fn c05_transaction_code() {
    let a = addenda98("C05", "27");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.transaction_code, Some(27));
    assert_eq!(data.account_number, None);
}

#[test]
fn c01_account_number_trimmed() {
    let a = addenda98("C01", "1918171614        ");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.account_number.as_deref(), Some("1918171614"));
}

#[test]
fn c04_name() {
    let a = addenda98("C04", "JANE Q PUBLIC");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.name.as_deref(), Some("JANE Q PUBLIC"));
}

#[test]
fn c06_account_and_transaction_code() {
    let a = addenda98("C06", "12345678 32");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.account_number.as_deref(), Some("12345678"));
    assert_eq!(data.transaction_code, Some(32));
}

#[test]
fn c07_three_fields() {
    let a = addenda98("C07", "074000078 12345678 27");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.routing_number.as_deref(), Some("074000078"));
    assert_eq!(data.account_number.as_deref(), Some("12345678"));
    assert_eq!(data.transaction_code, Some(27));
}

#[test]
fn c07_wrong_token_count_is_unrecognized() {
    // расплывчатые данные не «угадываются»
    let a = addenda98("C07", "074000078 12345678");
    assert!(a.parse_corrected_data().is_none());
}

#[test]
fn c09_identification() {
    let a = addenda98("C09", "22#1");
    let data = a.parse_corrected_data().expect("corrected data");
    assert_eq!(data.identification.as_deref(), Some("22#1"));
}

#[test]
fn recognized_codes_without_extraction() {
    for code in ["C08", "C10", "C11", "C12"] {
        let a = addenda98(code, "SOME DATA");
        assert!(a.parse_corrected_data().is_none(), "{code}");
        assert!(a.validate().is_ok(), "{code}");
    }
}

#[test]
fn unknown_code_is_not_extracted() {
    let a = addenda98("C99", "SOME DATA");
    assert!(a.parse_corrected_data().is_none());
}

#[test]
fn unknown_code_fails_validation() {
    let a = addenda98("C99", "SOME DATA");
    assert!(matches!(a.validate(), Err(AchError::ChangeCode(code)) if code == "C99"));
}

#[test]
fn empty_corrected_data_fails_validation() {
    let a = addenda98("C01", "");
    assert!(matches!(a.validate(), Err(AchError::CorrectedData)));
}

#[test]
fn change_code_directory() {
    let code = lookup_change_code("c01").expect("C01");
    assert_eq!(code.code, "C01");
    assert_eq!(code.reason, "Incorrect bank account number");
    assert!(lookup_change_code("C13").is_none());
}

#[test]
fn line_roundtrip() {
    let a = addenda98("C03", "074000078 12345678");
    let line = a.to_line();
    assert_eq!(line.chars().count(), 94);
    assert!(line.starts_with("798C03"));
    let reparsed = Addenda98::parse(&line).expect("parse");
    assert_eq!(reparsed, a);
    assert!(reparsed.validate().is_ok());
}

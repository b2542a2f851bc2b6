//! Адденда 99 — возврат проводки с кодом причины Rxx.

use crate::error::{AchError, Result};
use crate::field;
use crate::traits::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Код возврата из справочника NACHA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCode {
    pub code: &'static str,
    pub reason: &'static str,
    pub description: &'static str,
}

static RETURN_CODES: LazyLock<HashMap<&'static str, ReturnCode>> = LazyLock::new(|| {
    let codes = [
        ("R01", "Insufficient Funds", "Available balance is not sufficient to cover the dollar value of the debit entry"),
        ("R02", "Account Closed", "Previously active account has been closed by customer or RDFI"),
        ("R03", "No Account/Unable to Locate Account", "Account number structure is valid and passes editing process, but does not correspond to individual or is not an open account"),
        ("R04", "Invalid Account Number", "Account number structure not valid; entry may fail check digit validation or may contain an incorrect number of digits"),
        ("R05", "Unauthorized Debit to Consumer Account Using Corporate SEC Code", "A CCD or CTX debit entry was transmitted to a consumer account and was not authorized by the receiver"),
        ("R06", "Returned per ODFI's Request", "ODFI has requested RDFI to return the ACH entry"),
        ("R07", "Authorization Revoked by Customer", "Receiver has revoked the authorization previously provided to the originator"),
        ("R08", "Payment Stopped", "Receiver of a recurring debit transaction has stopped payment to a specific ACH debit"),
        ("R09", "Uncollected Funds", "Sufficient book or ledger balance exists but the available balance is below the dollar value of the debit entry"),
        ("R10", "Customer Advises Not Authorized", "Customer advises that the originator is not known and/or not authorized to debit the account"),
        ("R11", "Customer Advises Entry Not in Accordance with the Terms of the Authorization", "The debit entry was inaccurate or improperly initiated"),
        ("R12", "Branch Sold to Another DFI", "Financial institution receives entry destined for an account at a branch that has been sold to another financial institution"),
        ("R13", "Invalid ACH Routing Number", "Entry contains a receiving DFI identification or gateway identification that is not a valid ACH routing number"),
        ("R14", "Representative Payee Deceased or Unable to Continue in that Capacity", "The representative payee is deceased or unable to continue in that capacity"),
        ("R15", "Beneficiary or Account Holder Deceased", "The beneficiary or account holder is deceased"),
        ("R16", "Account Frozen", "Funds unavailable due to action by RDFI or legal order"),
        ("R17", "File Record Edit Criteria", "Entry with invalid account number initiated under questionable circumstances"),
        ("R18", "Improper Effective Entry Date", "Effective entry date is more than two banking days after the banking day of processing"),
        ("R19", "Amount Field Error", "Amount field is non-numeric, not zero in a prenotification, or exceeds the allowed maximum"),
        ("R20", "Non-Transaction Account", "ACH entry destined for a non-transaction account"),
        ("R21", "Invalid Company Identification", "The identification number used in the company identification field is not valid"),
        ("R22", "Invalid Individual ID Number", "Receiver has indicated that the individual ID number is not correct"),
        ("R23", "Credit Entry Refused by Receiver", "Receiver refused the credit entry because of the amount, the account, or another reason"),
        ("R24", "Duplicate Entry", "RDFI has received a duplicate of an entry previously received"),
        ("R25", "Addenda Error", "Addenda record indicator, type code or sequencing is incorrect"),
        ("R26", "Mandatory Field Error", "Erroneous data or missing data in a mandatory field"),
        ("R27", "Trace Number Error", "Original entry trace number is not present or not valid in the addenda record"),
        ("R28", "Routing Number Check Digit Error", "Check digit for the routing number is not valid"),
        ("R29", "Corporate Customer Advises Not Authorized", "Corporate receiver has notified RDFI that a specific transaction is unauthorized"),
        ("R30", "RDFI Not Participant in Check Truncation Program", "Financial institution not participating in automated check safekeeping application"),
        ("R31", "Permissible Return Entry (CCD and CTX only)", "RDFI has been notified by the ODFI that it agrees to accept a CCD or CTX return entry"),
        ("R32", "RDFI Non-Settlement", "RDFI is not able to settle the entry"),
        ("R33", "Return of XCK Entry", "RDFI determines at its sole discretion to return an XCK entry"),
        ("R34", "Limited Participation DFI", "RDFI participation has been limited by a federal or state supervisor"),
        ("R35", "Return of Improper Debit Entry", "ACH debit not permitted for use with the CIE standard entry class code"),
        ("R36", "Return of Improper Credit Entry", "ACH credit entries (with the exception of reversals) are not permitted for use with ARC, BOC, POP, RCK, TEL and XCK"),
        ("R37", "Source Document Presented for Payment", "The source document to which an ARC, BOC or POP entry relates has been presented for payment"),
        ("R38", "Stop Payment on Source Document", "A stop payment has been placed on the source document to which the ARC or BOC entry relates"),
        ("R39", "Improper Source Document", "The source document is improper or the entry is a duplicate of an item"),
        ("R40", "Return of ENR Entry by Federal Government Agency", "Return of automated enrollment entry; government use only"),
        ("R41", "Invalid Transaction Code", "Transaction code of the ENR entry is incorrect"),
        ("R42", "Routing Number/Check Digit Error", "Routing number or check digit in the ENR entry is incorrect"),
        ("R43", "Invalid DFI Account Number", "Receiver's account number in the ENR entry is incorrect or misformatted"),
        ("R44", "Invalid Individual ID Number/Identification Number", "Individual ID number in the ENR entry is incorrect"),
        ("R45", "Invalid Individual Name/Company Name", "Name in the ENR entry is incorrect or misformatted"),
        ("R46", "Invalid Representative Payee Indicator", "Representative payee indicator code in the ENR entry is incorrect"),
        ("R47", "Duplicate Enrollment", "The ENR entry is a duplicate of a previously initiated enrollment"),
        ("R50", "State Law Affecting RCK Acceptance", "RDFI is located in a state that has not adopted the applicable UCC revision or that requires canceled checks to be returned"),
        ("R51", "Item Related to RCK Entry Is Ineligible or RCK Entry Is Improper", "The item to which the RCK entry relates is ineligible or the entry is improper"),
        ("R52", "Stop Payment on Item Related to RCK Entry", "A stop payment has been placed on the item to which the RCK entry relates"),
        ("R53", "Item and RCK Entry Presented for Payment", "Both the RCK entry and the check have been presented for payment"),
        ("R61", "Misrouted Return", "Return entry was sent by the RDFI to the wrong ODFI"),
        ("R62", "Return of Erroneous or Reversing Debit", "The originator's or ODFI's error for which a credit reversal was required"),
        ("R67", "Duplicate Return", "ODFI has received more than one return for the same entry"),
        ("R68", "Untimely Return", "The return was not sent within the established timeframe"),
        ("R69", "Field Error(s)", "One or more of the field requirements are incorrect"),
        ("R70", "Permissible Return Entry Not Accepted/Return Not Requested by ODFI", "ODFI has received a return it did not agree to accept or did not request"),
        ("R71", "Misrouted Dishonored Return", "Dishonored return was sent to the wrong RDFI"),
        ("R72", "Untimely Dishonored Return", "The dishonored return was not sent within the designated timeframe"),
        ("R73", "Timely Original Return", "RDFI certifies the original return entry was sent within the established timeframe"),
        ("R74", "Corrected Return", "RDFI is correcting a previous return that was dishonored because of missing or incorrect information"),
        ("R75", "Return Not a Duplicate", "The return was not a duplicate of a previously returned entry"),
        ("R76", "No Errors Found", "The original return entry did not contain the errors indicated in the dishonored return"),
        ("R77", "Non-Acceptance of R62 Dishonored Return", "RDFI is unable to or refuses to accept an R62 dishonored return"),
        ("R80", "IAT Entry Coding Error", "IAT entry is being returned due to an incorrect coding of mandatory fields"),
        ("R81", "Non-Participant in IAT Program", "IAT entry is being returned because the gateway does not have an agreement to process IAT entries"),
        ("R82", "Invalid Foreign Receiving DFI Identification", "Reference used to identify the foreign receiving DFI is invalid"),
        ("R83", "Foreign Receiving DFI Unable to Settle", "IAT entry is being returned due to settlement problems in the foreign payment system"),
        ("R84", "Entry Not Processed by Gateway", "The entry has not been processed and is being returned at the gateway's discretion"),
        ("R85", "Incorrectly Coded Outbound International Payment", "The gateway has identified the entry as an outbound international payment incorrectly coded as domestic"),
    ];
    codes
        .into_iter()
        .map(|(code, reason, description)| {
            (code, ReturnCode { code, reason, description })
        })
        .collect()
});

/// Поиск кода возврата в справочнике; регистр не важен.
pub fn lookup_return_code(code: &str) -> Option<&'static ReturnCode> {
    RETURN_CODES.get(code.to_uppercase().as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addenda99 {
    pub type_code: String,
    pub return_code: String,
    pub original_trace: String,
    /// YYMMDD; заполняется для кодов R14 и R15, иначе пусто.
    pub date_of_death: String,
    pub original_dfi: String,
    pub addenda_information: String,
    pub trace_number: String,
}

impl Default for Addenda99 {
    fn default() -> Self {
        Addenda99 {
            type_code: "99".to_string(),
            return_code: String::new(),
            original_trace: String::new(),
            date_of_death: String::new(),
            original_dfi: String::new(),
            addenda_information: String::new(),
            trace_number: String::new(),
        }
    }
}

impl Addenda99 {
    pub fn return_code_entry(&self) -> Option<&'static ReturnCode> {
        lookup_return_code(&self.return_code)
    }
}

impl Record for Addenda99 {
    fn parse(line: &str) -> Result<Self> {
        let c = field::chars94(line)?;
        field::expect_record_type(&c, '7')?;
        Ok(Addenda99 {
            type_code: field::slice(&c, 2, 3),
            return_code: field::slice(&c, 4, 6),
            original_trace: field::trim_id(&field::slice(&c, 7, 21)),
            date_of_death: field::trim_alpha(&field::slice(&c, 22, 27)),
            original_dfi: field::trim_id(&field::slice(&c, 28, 35)),
            addenda_information: field::trim_alpha(&field::slice(&c, 36, 79)),
            trace_number: field::trim_id(&field::slice(&c, 80, 94)),
        })
    }

    fn to_line(&self) -> String {
        let mut out = String::with_capacity(94);
        out.push('7');
        out.push_str(&field::alpha(&self.type_code, 2));
        out.push_str(&field::alpha(&self.return_code, 3));
        out.push_str(&field::numeric(&self.original_trace, 15));
        out.push_str(&field::alpha(&self.date_of_death, 6));
        out.push_str(&field::numeric(&self.original_dfi, 8));
        out.push_str(&field::alpha(&self.addenda_information, 44));
        out.push_str(&field::numeric(&self.trace_number, 15));
        out
    }

    fn validate(&self) -> Result<()> {
        if self.type_code != "99" {
            return Err(AchError::AddendaTypeCode {
                found: self.type_code.clone(),
                expected: "99",
            });
        }
        if self.return_code_entry().is_none() {
            return Err(AchError::ReturnCode(self.return_code.clone()));
        }
        if !self.date_of_death.is_empty()
            && (self.date_of_death.chars().count() != 6 || !field::is_digits(&self.date_of_death))
        {
            return Err(AchError::FieldFormat {
                field: "DateOfDeath",
                msg: format!("{:?}, expected six digits or blank", self.date_of_death),
            });
        }
        if self.original_dfi.chars().count() != 8 || !field::is_digits(&self.original_dfi) {
            return Err(AchError::FieldFormat {
                field: "OriginalDFI",
                msg: format!("{:?} is not an 8-digit identification", self.original_dfi),
            });
        }
        field::validate_alphanumeric("AddendaInformation", &self.addenda_information)?;
        Ok(())
    }
}

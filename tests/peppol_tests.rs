#![cfg(feature = "peppol")]

use chrono::NaiveDate;
use einvoice::core::*;
use einvoice::peppol::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn peppol_builder() -> InvoiceBuilder {
    InvoiceBuilder::new("PEPP-001", date(2024, 6, 15))
        .specification(PEPPOL_BILLING_3_0)
        .business_process(PEPPOL_BILLING_PROCESS)
        .schema_type(SchemaType::Ubl)
        .buyer_reference("BR-123")
        .seller(
            PartyBuilder::new(
                "Seller GmbH",
                AddressBuilder::new("Berlin", "10115", "DE").build(),
            )
            .vat_id("DE123456789")
            .electronic_address("EM", "seller@peppol.eu")
            .build(),
        )
        .buyer(
            PartyBuilder::new(
                "Buyer BV",
                AddressBuilder::new("Amsterdam", "1011", "NL").build(),
            )
            .electronic_address("0190", "00000000000000000001")
            .build(),
        )
        .due_date(date(2024, 7, 15))
        .credit_transfer("DE89370400440532013000", None)
        .add_line(
            LineBuilder::new("1", "Consulting services", dec!(10), "HUR", dec!(150))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Documentation", dec!(5), "HUR", dec!(100))
                .tax(TaxCategory::StandardRate, dec!(19))
                .build(),
        )
}

fn peppol_invoice() -> Invoice {
    peppol_builder().build().expect("valid invoice")
}

fn peppol_codes(inv: &Invoice) -> Vec<&'static str> {
    match inv.validate() {
        Ok(()) => Vec::new(),
        Err(err) => err.violations().iter().map(|v| v.code()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn valid_peppol_invoice_passes_all_checks() {
    let inv = peppol_invoice();
    assert!(inv.is_peppol());
    assert_eq!(inv.profile_level(), ProfileLevel::En16931);
    assert_eq!(peppol_codes(&inv), Vec::<&str>::new());
}

#[test]
fn missing_buyer_reference_fails_r003() {
    let mut inv = peppol_invoice();
    inv.buyer_reference = None;
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R003"]);

    inv.order_reference = Some("PO-9".into());
    assert!(inv.validate().is_ok());
}

#[test]
fn missing_electronic_addresses() {
    let mut inv = peppol_invoice();
    inv.seller.electronic_address = None;
    inv.buyer.electronic_address = None;
    assert_eq!(
        peppol_codes(&inv),
        vec!["PEPPOL-EN16931-R020", "PEPPOL-EN16931-R010"]
    );
}

#[test]
fn unknown_eas_scheme_fails_cl008() {
    let mut inv = peppol_invoice();
    inv.buyer.electronic_address = Some(ElectronicAddress {
        value: "12345".into(),
        scheme: Some("XX".into()),
    });
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-CL008"]);
}

#[test]
fn business_process_alone_triggers_overlay() {
    let mut inv = peppol_invoice();
    inv.specification_id = "urn:cen.eu:en16931:2017".into();
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R004"]);
}

#[test]
fn foreign_process_fails_r007() {
    let mut inv = peppol_invoice();
    inv.business_process = Some("urn:example:process".into());
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R007"]);
    inv.business_process = None;
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R001"]);
}

#[test]
fn second_note_fails_r002_unless_both_parties_are_german() {
    let mut inv = peppol_builder()
        .note("Erste Notiz")
        .note("Zweite Notiz")
        .build_unchecked()
        .unwrap();
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R002"]);

    inv.buyer.address = Some(AddressBuilder::new("München", "80331", "DE").build());
    assert!(inv.validate().is_ok());
}

#[test]
fn line_amount_must_follow_price() {
    let mut inv = peppol_invoice();
    inv.lines[0].line_total = dec!(1400);
    inv.update_applicable_trade_tax(&Default::default());
    inv.update_totals();
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R120"]);
}

#[test]
fn base_quantity_rules() {
    let mut inv = peppol_invoice();
    inv.lines[0].base_quantity = Some(dec!(0));
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R121"]);

    inv.lines[0].base_quantity = Some(dec!(1));
    inv.lines[0].base_quantity_unit = Some("DAY".into());
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R130"]);
}

#[test]
fn direct_debit_needs_mandate() {
    let mut inv = peppol_invoice();
    inv.payment_means = vec![PaymentMeans {
        type_code: Some(PaymentMeansCode::SepaDirectDebit),
        debited_account: Some("DE02120300000000202051".into()),
        ..Default::default()
    }];
    assert_eq!(peppol_codes(&inv), vec!["PEPPOL-EN16931-R061"]);

    inv.mandate_reference = Some("MANDATE-1".into());
    assert!(inv.validate().is_ok());
}

#[test]
fn core_rules_come_before_overlay_rules() {
    let mut inv = peppol_invoice();
    inv.number = String::new();
    inv.buyer_reference = None;
    assert_eq!(peppol_codes(&inv), vec!["BR-02", "PEPPOL-EN16931-R003"]);
}

// ---------------------------------------------------------------------------
// Roundtrip
// ---------------------------------------------------------------------------

#[cfg(feature = "xml")]
#[test]
fn peppol_ubl_roundtrip() {
    let original = peppol_invoice();
    let xml = original.to_xml().unwrap();
    assert!(xml.contains(&format!("<cbc:CustomizationID>{PEPPOL_BILLING_3_0}</cbc:CustomizationID>")));
    assert!(xml.contains(&format!("<cbc:ProfileID>{PEPPOL_BILLING_PROCESS}</cbc:ProfileID>")));
    assert!(xml.contains(r#"<cbc:EndpointID schemeID="0190">00000000000000000001</cbc:EndpointID>"#));

    let parsed = einvoice::xml::parse_str(&xml).unwrap();
    assert_eq!(parsed, original);
    assert!(parsed.validate().is_ok());
}

// ---------------------------------------------------------------------------
// EAS code list
// ---------------------------------------------------------------------------

#[test]
fn eas_defaults_per_country() {
    assert_eq!(eas_scheme_for_country("DE"), Some(EasScheme::LEITWEG_ID));
    assert_eq!(eas_scheme_for_country("at"), Some(EasScheme::AT_VAT));
    assert_eq!(eas_scheme_for_country("NL").map(|s| s.code), Some("0190"));
    assert_eq!(eas_scheme_for_country("XX"), None);
}

#[test]
fn eas_code_lookup() {
    for code in ["0088", "0204", "9930", "EM", " 0190 "] {
        assert!(is_known_eas_code(code), "{code}");
    }
    for code in ["", "XX", "0000", "em"] {
        assert!(!is_known_eas_code(code), "{code}");
    }
}

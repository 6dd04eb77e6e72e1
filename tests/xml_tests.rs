#![cfg(feature = "xml")]

use chrono::NaiveDate;
use einvoice::core::*;
use einvoice::xml::{self, from_cii_xml, from_ubl_xml, parse_str, to_cii_xml, to_ubl_xml};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new(
        "ACME GmbH",
        AddressBuilder::new("Berlin", "10115", "DE")
            .street("Friedrichstraße 123")
            .build(),
    )
    .vat_id("DE123456789")
    .electronic_address("EM", "billing@acme.de")
    .contact(
        Some("Max Mustermann".into()),
        Some("+49 30 12345678".into()),
        Some("max@acme.de".into()),
    )
    .build()
}

fn buyer() -> Party {
    PartyBuilder::new(
        "Client SARL",
        AddressBuilder::new("Paris", "75001", "FR")
            .street("1 Rue de Rivoli")
            .build(),
    )
    .vat_id("FR12345678901")
    .electronic_address("EM", "factures@client.fr")
    .build()
}

fn builder(number: &str) -> InvoiceBuilder {
    InvoiceBuilder::new(number, date(2024, 6, 15))
        .seller(seller())
        .buyer(buyer())
        .buyer_reference("PO-REF-7")
        .order_reference("PO-4711")
        .billing_period(date(2024, 5, 1), date(2024, 5, 31))
        .credit_transfer("DE89370400440532013000", Some("COBADEFFXXX".into()))
        .payment_terms("30 Tage netto")
        .due_date(date(2024, 7, 15))
        .payment_reference("RE-2024-200")
}

/// Standard-rated and reverse-charge lines with a document allowance,
/// a payee and a deliver-to party.
fn mixed_invoice() -> Invoice {
    builder("RE-2024-200")
        .payee(
            PartyBuilder::new("Factoring AG", AddressBuilder::new("Hamburg", "20095", "DE").build())
                .build(),
        )
        .ship_to(
            PartyBuilder::new("Lager Nord", AddressBuilder::new("Lyon", "69001", "FR").build())
                .build(),
        )
        .delivery_date(date(2024, 5, 28))
        .add_line(
            LineBuilder::new("1", "Software", dec!(5), "C62", dec!(250))
                .seller_item_id("SW-01")
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Installation", dec!(8), "HUR", dec!(50))
                .tax(TaxCategory::ReverseCharge, dec!(0))
                .build(),
        )
        .add_allowance(
            AllowanceCharge::allowance(dec!(50), TaxCategory::StandardRate, dec!(19))
                .with_reason("Rabatt"),
        )
        .exemption_reason(TaxCategory::ReverseCharge, "Reverse charge")
        .build()
        .expect("valid invoice")
}

/// Scenario with invoice currency USD and VAT accounting currency EUR.
fn dollar_invoice() -> Invoice {
    let mut inv = builder("RE-2024-USD")
        .currency("USD")
        .tax_currency("EUR")
        .add_line(LineBuilder::new("1", "Beratung", dec!(1), "HUR", dec!(100)).build())
        .build_unchecked()
        .unwrap();
    inv.totals.tax_total_accounting = Some(dec!(17.50));
    inv
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn cii_round_trip() {
    let inv = mixed_invoice();
    let xml = inv.to_xml().unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<rsm:CrossIndustryInvoice"));

    let back = from_cii_xml(&xml).unwrap();
    assert_eq!(back, inv);
    assert!(back.validate().is_ok());
}

#[test]
fn ubl_round_trip() {
    let inv = Invoice {
        schema_type: SchemaType::Ubl,
        ..mixed_invoice()
    };
    let xml = inv.to_xml().unwrap();
    assert!(xml.contains("<Invoice xmlns="));

    let back = from_ubl_xml(&xml).unwrap();
    assert_eq!(back, inv);
    assert!(back.validate().is_ok());
}

#[test]
fn conversion_between_syntaxes() {
    let cii = mixed_invoice();
    let ubl = parse_str(&to_ubl_xml(&cii).unwrap()).unwrap();
    assert_eq!(ubl.schema_type, SchemaType::Ubl);
    assert_eq!(
        Invoice {
            schema_type: SchemaType::Cii,
            ..ubl.clone()
        },
        cii
    );

    let again = parse_str(&to_cii_xml(&ubl).unwrap()).unwrap();
    assert_eq!(again, cii);
}

#[test]
fn writing_is_deterministic() {
    let inv = mixed_invoice();
    assert_eq!(to_cii_xml(&inv).unwrap(), to_cii_xml(&inv).unwrap());
    assert_eq!(to_ubl_xml(&inv).unwrap(), to_ubl_xml(&inv).unwrap());

    let mut first = Vec::new();
    let mut second = Vec::new();
    inv.write(&mut first).unwrap();
    inv.write(&mut second).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, inv.to_xml().unwrap().into_bytes());
}

// ---------------------------------------------------------------------------
// Currencies
// ---------------------------------------------------------------------------

#[test]
fn cii_tax_totals_in_both_currencies() {
    let inv = dollar_invoice();
    assert_eq!(inv.totals.tax_total, dec!(19.00));
    let xml = to_cii_xml(&inv).unwrap();

    assert_eq!(xml.matches("<ram:TaxTotalAmount").count(), 2);
    let usd = xml
        .find(r#"<ram:TaxTotalAmount currencyID="USD">19.00</ram:TaxTotalAmount>"#)
        .unwrap();
    let eur = xml
        .find(r#"<ram:TaxTotalAmount currencyID="EUR">17.50</ram:TaxTotalAmount>"#)
        .unwrap();
    assert!(usd < eur);

    let back = from_cii_xml(&xml).unwrap();
    assert_eq!(back.totals.tax_total, dec!(19.00));
    assert_eq!(back.totals.tax_total_accounting, Some(dec!(17.50)));
    assert!(back.unexpected_tax_currencies.is_empty());
    assert_eq!(back, inv);
}

#[test]
fn ubl_tax_totals_in_both_currencies() {
    let inv = Invoice {
        schema_type: SchemaType::Ubl,
        ..dollar_invoice()
    };
    let xml = inv.to_xml().unwrap();
    assert_eq!(xml.matches("<cac:TaxTotal>").count(), 2);

    let back = parse_str(&xml).unwrap();
    assert_eq!(back.totals.tax_total, dec!(19.00));
    assert_eq!(back.totals.tax_total_accounting, Some(dec!(17.50)));
    assert_eq!(back.trade_taxes.len(), 1);
}

#[test]
fn accounting_currency_without_its_total_writes_one_tax_total() {
    let mut inv = dollar_invoice();
    inv.totals.tax_total_accounting = None;

    let cii = to_cii_xml(&inv).unwrap();
    assert_eq!(cii.matches("<ram:TaxTotalAmount").count(), 1);
    let back = from_cii_xml(&cii).unwrap();
    assert_eq!(back.tax_currency_code.as_deref(), Some("EUR"));
    assert_eq!(back.totals.tax_total_accounting, None);
    assert!(back.validate().unwrap_err().has_rule_code("BR-53"));

    let ubl = to_ubl_xml(&inv).unwrap();
    assert_eq!(ubl.matches("<cac:TaxTotal>").count(), 1);
    let back = from_ubl_xml(&ubl).unwrap();
    assert_eq!(back.tax_currency_code.as_deref(), Some("EUR"));
    assert_eq!(back.totals.tax_total_accounting, None);
    assert!(back.validate().unwrap_err().has_rule_code("BR-53"));
}

#[test]
fn foreign_tax_total_is_reported() {
    let xml = to_cii_xml(&mixed_invoice()).unwrap().replacen(
        "</ram:TaxBasisTotalAmount>",
        r#"</ram:TaxBasisTotalAmount><ram:TaxTotalAmount currencyID="CHF">1.00</ram:TaxTotalAmount>"#,
        1,
    );
    let inv = parse_str(&xml).unwrap();
    assert_eq!(inv.unexpected_tax_currencies, vec!["CHF".to_string()]);
    let err = inv.validate().unwrap_err();
    assert_eq!(
        err.violations().iter().map(|v| v.code()).collect::<Vec<_>>(),
        vec!["UNEXPECTED-TAX-CURRENCY"]
    );
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

const BARE_CII: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rsm:CrossIndustryInvoice xmlns:rsm="urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100"
    xmlns:ram="urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100"
    xmlns:udt="urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100">
  <rsm:ExchangedDocumentContext>
    <ram:GuidelineSpecifiedDocumentContextParameter>
      <ram:ID>urn:cen.eu:en16931:2017</ram:ID>
    </ram:GuidelineSpecifiedDocumentContextParameter>
  </rsm:ExchangedDocumentContext>
  <rsm:ExchangedDocument>
    <ram:ID>471102</ram:ID>
    <ram:TypeCode>380</ram:TypeCode>
    <ram:IssueDateTime>
      <udt:DateTimeString format="102">20240305</udt:DateTimeString>
    </ram:IssueDateTime>
  </rsm:ExchangedDocument>
  <rsm:SupplyChainTradeTransaction>
    <ram:ApplicableHeaderTradeSettlement>
      <ram:InvoiceCurrencyCode>EUR</ram:InvoiceCurrencyCode>
      <ram:SpecifiedTradeSettlementHeaderMonetarySummation/>
    </ram:ApplicableHeaderTradeSettlement>
  </rsm:SupplyChainTradeTransaction>
</rsm:CrossIndustryInvoice>"#;

#[test]
fn missing_totals_are_not_zero_totals() {
    let inv = parse_str(BARE_CII).unwrap();
    assert_eq!(inv.number, "471102");
    assert_eq!(inv.issue_date, Some(date(2024, 3, 5)));
    assert_eq!(inv.type_code, Some(InvoiceTypeCode::Invoice));
    assert_eq!(inv.presence, TotalsPresence::default());

    let err = inv.validate().unwrap_err();
    for code in ["BR-12", "BR-13", "BR-14", "BR-15", "BR-16", "BR-CO-18"] {
        assert!(err.has_rule_code(code), "{code} missing from {err:?}");
    }
}

#[test]
fn unsupported_root_is_rejected() {
    let order = r#"<Order xmlns="urn:oasis:names:specification:ubl:schema:xsd:Order-2"><ID>1</ID></Order>"#;
    match parse_str(order) {
        Err(InvoiceError::UnsupportedDocument { namespace, name }) => {
            assert_eq!(namespace, "urn:oasis:names:specification:ubl:schema:xsd:Order-2");
            assert_eq!(name, "Order");
        }
        other => panic!("expected unsupported document, got {other:?}"),
    }
}

#[test]
fn wrong_syntax_for_explicit_reader() {
    let xml = to_ubl_xml(&mixed_invoice()).unwrap();
    assert!(matches!(from_cii_xml(&xml), Err(InvoiceError::Xml(_))));
    assert!(from_ubl_xml(&xml).is_ok());
}

#[test]
fn malformed_xml_is_an_xml_error() {
    let err = parse_str("<rsm:CrossIndustryInvoice><unclosed>").unwrap_err();
    assert!(matches!(err, InvoiceError::Xml(_)), "{err:?}");
}

#[test]
fn bad_amount_names_the_element() {
    let xml = to_cii_xml(&mixed_invoice())
        .unwrap()
        .replacen("<ram:GrandTotalAmount>", "<ram:GrandTotalAmount>12,50", 1);
    let err = parse_str(&xml).unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidDecimal { .. }), "{err:?}");
    let message = err.to_string();
    assert!(message.contains("invalid decimal value"), "{message}");
    assert!(message.contains("GrandTotalAmount"), "{message}");

    let inv = mixed_invoice();
    let total = xml::format_amount(inv.totals.grand_total);
    let cii = to_cii_xml(&inv).unwrap();
    for bad in ["1_000.00", "1e3"] {
        let xml = cii.replacen(
            &format!("<ram:GrandTotalAmount>{total}</ram:GrandTotalAmount>"),
            &format!("<ram:GrandTotalAmount>{bad}</ram:GrandTotalAmount>"),
            1,
        );
        assert_ne!(xml, cii);
        match parse_str(&xml) {
            Err(InvoiceError::InvalidDecimal { element, value }) => {
                assert!(element.contains("GrandTotalAmount"), "{element}");
                assert_eq!(value, bad);
            }
            other => panic!("{bad}: {other:?}"),
        }
    }
}

#[test]
fn amounts_at_the_decimal_limit_are_violations() {
    let inv = mixed_invoice();
    let mut xml = to_cii_xml(&inv).unwrap();
    for line in &inv.lines {
        let total = xml::format_amount(line.line_total);
        xml = xml.replacen(
            &format!("<ram:LineTotalAmount>{total}</ram:LineTotalAmount>"),
            "<ram:LineTotalAmount>79228162514264337593543950335</ram:LineTotalAmount>",
            1,
        );
    }
    let back = parse_str(&xml).unwrap();
    assert_eq!(back.lines[0].line_total, rust_decimal::Decimal::MAX);
    assert_eq!(back.lines[1].line_total, rust_decimal::Decimal::MAX);

    let err = back.validate().unwrap_err();
    for code in ["BR-CO-10", "BR-45"] {
        assert!(err.has_rule_code(code), "{code} missing from {err:?}");
    }
    assert!(
        err.violations()
            .iter()
            .any(|v| v.text.contains("exceeds the decimal range")),
        "{err:?}"
    );

    let ubl = to_ubl_xml(&back).unwrap();
    assert!(ubl.contains("79228162514264337593543950335"));
}

#[test]
fn absent_allowance_amount_is_not_zero() {
    let cii = to_cii_xml(&mixed_invoice()).unwrap();
    let amount = "<ram:ActualAmount>50.00</ram:ActualAmount>";
    assert_eq!(cii.matches(amount).count(), 1);
    let inv = parse_str(&cii.replacen(amount, "", 1)).unwrap();
    assert!(!inv.allowance_charges[0].amount_present);
    assert!(inv.validate().unwrap_err().has_rule_code("BR-31"));

    let ubl = to_ubl_xml(&mixed_invoice()).unwrap();
    let amount = r#"<cbc:Amount currencyID="EUR">50.00</cbc:Amount>"#;
    assert_eq!(ubl.matches(amount).count(), 1);
    let inv = parse_str(&ubl.replacen(amount, "", 1)).unwrap();
    assert!(!inv.allowance_charges[0].amount_present);
    assert!(inv.validate().unwrap_err().has_rule_code("BR-31"));

    assert!(from_cii_xml(&cii).unwrap().allowance_charges[0].amount_present);
}

#[test]
fn unknown_category_code_survives_both_syntaxes() {
    let mut inv = mixed_invoice();
    inv.allowance_charges[0].tax_category = None;
    inv.allowance_charges[0].unknown_category = Some("B".into());

    let cii = to_cii_xml(&inv).unwrap();
    assert!(cii.contains("<ram:CategoryCode>B</ram:CategoryCode>"));
    let back = from_cii_xml(&cii).unwrap();
    assert_eq!(back.allowance_charges[0].tax_category, None);
    assert_eq!(back.allowance_charges[0].unknown_category.as_deref(), Some("B"));
    assert_eq!(back.allowance_charges[0].tax_rate, Some(dec!(19)));
    assert_eq!(back, inv);

    let back = from_ubl_xml(&to_ubl_xml(&inv).unwrap()).unwrap();
    assert_eq!(back.allowance_charges[0].unknown_category.as_deref(), Some("B"));
    assert_eq!(back.allowance_charges[0].tax_rate, Some(dec!(19)));

    let err = back.validate().unwrap_err();
    assert!(err.has_rule_code("BR-CL-18"), "{err:?}");
    assert!(!err.has_rule_code("BR-32"), "{err:?}");
}

#[test]
fn reads_from_streams_and_files() {
    let inv = mixed_invoice();
    let xml = inv.to_xml().unwrap();

    let from_stream = xml::parse_from_stream(xml.as_bytes()).unwrap();
    assert_eq!(from_stream, inv);

    let path = std::env::temp_dir().join(format!("einvoice-{}.xml", std::process::id()));
    std::fs::write(&path, &xml).unwrap();
    let from_file = xml::parse_from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(from_file.unwrap(), inv);

    let missing = std::env::temp_dir().join("einvoice-does-not-exist.xml");
    assert!(matches!(xml::parse_from_file(missing), Err(InvoiceError::Io(_))));
}

#[test]
fn byte_order_mark_is_ignored() {
    let xml = format!("\u{feff}{}", to_cii_xml(&mixed_invoice()).unwrap());
    assert!(parse_str(&xml).is_ok());
}

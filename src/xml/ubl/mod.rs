//! OASIS UBL 2.1 Invoice and CreditNote.
//!
//! The model keeps CII code values where the two syntaxes disagree; the
//! conversions live here.

mod read;
mod write;

pub(crate) use read::read;
pub(crate) use write::write;

/// Supporting document type carried in `cac:OriginatorDocumentReference`
/// (tender or lot reference, BT-17).
const TENDER_REFERENCE_TYPE: &str = "50";

/// Placeholder for mandatory UBL elements the model has no value for:
/// `cac:OrderReference/cbc:ID` next to a bare sales order reference (BT-14)
/// and the card network ID.
const NOT_APPLICABLE: &str = "NA";

/// TaxScheme identifier of the VAT registration; any other scheme is the
/// local tax registration (BT-32).
const VAT_SCHEME: &str = "VAT";
const LOCAL_TAX_SCHEME: &str = "FC";

/// Seller party identification scheme that carries the SEPA creditor
/// identifier (BT-90).
const CREDITOR_SCHEME: &str = "SEPA";

/// BT-8 in UBL (UNTDID 2005) from the CII value (UNTDID 2475). Unknown
/// codes pass through.
fn tax_point_code_to_ubl(cii: &str) -> &str {
    match cii {
        "5" => "3",
        "29" => "35",
        "72" => "432",
        other => other,
    }
}

fn tax_point_code_from_ubl(ubl: &str) -> &str {
    match ubl {
        "3" => "5",
        "35" => "29",
        "432" => "72",
        other => other,
    }
}

/// Note text with its subject code, `#AAI#text` in UBL.
fn encode_note(subject: Option<&str>, text: &str) -> String {
    match subject {
        Some(code) => format!("#{code}#{text}"),
        None => text.to_string(),
    }
}

fn decode_note(raw: &str) -> (Option<String>, String) {
    if let Some(rest) = raw.strip_prefix('#') {
        if let Some((code, text)) = rest.split_once('#') {
            if !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) {
                return (Some(code.to_string()), text.to_string());
            }
        }
    }
    (None, raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::core::*;
    use crate::xml::tests::sample_invoice;
    use crate::xml::{from_ubl_xml, parse_str, to_ubl_xml};

    fn ubl_sample() -> Invoice {
        Invoice {
            schema_type: SchemaType::Ubl,
            ..sample_invoice()
        }
    }

    #[test]
    fn tax_point_codes_map_both_ways() {
        for (cii, ubl) in [("5", "3"), ("29", "35"), ("72", "432")] {
            assert_eq!(tax_point_code_to_ubl(cii), ubl);
            assert_eq!(tax_point_code_from_ubl(ubl), cii);
        }
        assert_eq!(tax_point_code_to_ubl("999"), "999");
        assert_eq!(tax_point_code_from_ubl("999"), "999");
    }

    #[test]
    fn note_subject_codes() {
        assert_eq!(encode_note(Some("AAI"), "Hello"), "#AAI#Hello");
        assert_eq!(encode_note(None, "Hello"), "Hello");
        assert_eq!(decode_note("#AAI#Hello"), (Some("AAI".into()), "Hello".into()));
        assert_eq!(decode_note("#1 of 2"), (None, "#1 of 2".into()));
        assert_eq!(decode_note("##x"), (None, "##x".into()));
    }

    #[test]
    fn round_trip_preserves_the_model() {
        let inv = ubl_sample();
        let xml = inv.to_xml().unwrap();
        assert!(xml.contains("<Invoice xmlns=\"urn:oasis:names:specification:ubl:schema:xsd:Invoice-2\""));
        let back = from_ubl_xml(&xml).unwrap();
        assert_eq!(back, inv);
    }

    #[test]
    fn writes_ubl_specific_encodings() {
        let mut inv = ubl_sample();
        inv.notes[0].subject_code = Some("AAI".into());
        inv.creditor_reference = Some("DE98ZZZ09999999999".into());
        for tax in &mut inv.trade_taxes {
            tax.tax_point_date = None;
            tax.due_date_type_code = Some("72".into());
        }
        let xml = to_ubl_xml(&inv).unwrap();
        assert!(xml.contains("<cbc:Note>#AAI#Vielen Dank</cbc:Note>"));
        assert!(xml.contains("<cbc:DescriptionCode>432</cbc:DescriptionCode>"));
        assert!(xml.contains(r#"<cbc:ID schemeID="SEPA">DE98ZZZ09999999999</cbc:ID>"#));
        assert!(xml.contains("<cbc:DueDate>2024-07-01</cbc:DueDate>"));
        assert!(xml.contains(r#"<cbc:InvoicedQuantity unitCode="HUR">10.0000</cbc:InvoicedQuantity>"#));
        assert!(xml.contains(r#"<cbc:BaseAmount currencyID="EUR">150.00</cbc:BaseAmount>"#));

        let back = parse_str(&xml).unwrap();
        assert_eq!(back.notes[0].subject_code.as_deref(), Some("AAI"));
        assert_eq!(back.creditor_reference, inv.creditor_reference);
        assert_eq!(back.seller.identifiers, inv.seller.identifiers);
        assert!(back.trade_taxes.iter().all(|t| t.due_date_type_code.as_deref() == Some("72")));
        assert_eq!(back.billing_period, inv.billing_period);
    }

    #[test]
    fn credit_notes_use_their_own_root_and_due_date() {
        let mut inv = ubl_sample();
        inv.type_code = Some(InvoiceTypeCode::CreditNote);
        let xml = to_ubl_xml(&inv).unwrap();
        assert!(xml.contains("<CreditNote xmlns=\"urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2\""));
        assert!(xml.contains("<cbc:CreditNoteTypeCode>381</cbc:CreditNoteTypeCode>"));
        assert!(xml.contains("<cbc:PaymentDueDate>2024-07-01</cbc:PaymentDueDate>"));
        assert!(xml.contains("<cac:CreditNoteLine>"));
        assert!(!xml.contains("<cbc:DueDate>"));

        let back = from_ubl_xml(&xml).unwrap();
        assert_eq!(back, inv);
    }

    #[test]
    fn accounting_currency_tax_total() {
        let mut inv = ubl_sample();
        inv.currency_code = "USD".into();
        inv.tax_currency_code = Some("EUR".into());
        inv.totals.tax_total_accounting = Some(dec!(190.55));
        let xml = to_ubl_xml(&inv).unwrap();
        let usd = xml.find(r#"<cbc:TaxAmount currencyID="USD">"#).unwrap();
        let eur = xml.find(r#"<cbc:TaxAmount currencyID="EUR">190.55</cbc:TaxAmount>"#).unwrap();
        assert!(usd < eur);

        let back = from_ubl_xml(&xml).unwrap();
        assert_eq!(back.totals.tax_total_accounting, Some(dec!(190.55)));
        assert_eq!(back.trade_taxes.len(), inv.trade_taxes.len());
    }

    #[test]
    fn credit_note_without_type_code_defaults_to_381() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<CreditNote xmlns="urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2"
    xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
    xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>CN-7</cbc:ID>
  <cbc:IssueDate>2024-02-29</cbc:IssueDate>
  <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
  <cac:OrderReference>
    <cbc:ID>NA</cbc:ID>
    <cbc:SalesOrderID>SO-1</cbc:SalesOrderID>
  </cac:OrderReference>
  <cac:TaxTotal>
    <cbc:TaxAmount>0.00</cbc:TaxAmount>
  </cac:TaxTotal>
  <cac:CreditNoteLine>
    <cbc:ID>1</cbc:ID>
    <cbc:CreditedQuantity unitCode="C62">-1</cbc:CreditedQuantity>
    <cbc:LineExtensionAmount currencyID="EUR">-10.00</cbc:LineExtensionAmount>
    <cac:Item><cbc:Name>Return</cbc:Name></cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="EUR">10</cbc:PriceAmount></cac:Price>
  </cac:CreditNoteLine>
</CreditNote>"#;
        let inv = parse_str(xml).unwrap();
        assert_eq!(inv.schema_type, SchemaType::Ubl);
        assert_eq!(inv.type_code, Some(InvoiceTypeCode::CreditNote));
        assert_eq!(inv.issue_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(inv.order_reference, None);
        assert_eq!(inv.sales_order_reference.as_deref(), Some("SO-1"));
        assert_eq!(inv.lines.len(), 1);
        assert_eq!(inv.lines[0].quantity, dec!(-1));
        assert!(inv.lines[0].line_total_present);
        assert!(!inv.presence.due_payable);
        assert!(inv.unexpected_tax_currencies.is_empty());
    }

    #[test]
    fn iso_dates_are_required() {
        let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
    xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>1</cbc:ID>
  <cbc:IssueDate>20240101</cbc:IssueDate>
</Invoice>"#;
        assert!(matches!(parse_str(xml), Err(InvoiceError::InvalidDate { .. })));
    }

    #[test]
    fn tender_reference_with_content_stays_an_additional_document() {
        let mut inv = ubl_sample();
        inv.supporting_documents = vec![
            SupportingDocument {
                id: "TENDER-1".into(),
                type_code: Some(TENDER_REFERENCE_TYPE.into()),
                ..Default::default()
            },
            SupportingDocument {
                id: "TENDER-2".into(),
                type_code: Some(TENDER_REFERENCE_TYPE.into()),
                description: Some("Call for tenders".into()),
                attachment: Some(Attachment {
                    mime_code: "application/pdf".into(),
                    filename: "tender.pdf".into(),
                    content: b"%PDF-1.7".to_vec(),
                }),
                ..Default::default()
            },
        ];
        let xml = to_ubl_xml(&inv).unwrap();
        assert_eq!(xml.matches("<cac:OriginatorDocumentReference>").count(), 1);
        assert!(xml.contains("<cbc:DocumentTypeCode>50</cbc:DocumentTypeCode>"));
        assert!(xml.contains("<cbc:DocumentDescription>Call for tenders</cbc:DocumentDescription>"));

        let back = from_ubl_xml(&xml).unwrap();
        assert_eq!(back.supporting_documents, inv.supporting_documents);
    }

    #[test]
    fn payment_reference_needs_payment_means() {
        let mut inv = ubl_sample();
        inv.payment_means.clear();
        assert!(inv.payment_reference.is_some());
        let xml = to_ubl_xml(&inv).unwrap();
        assert!(!xml.contains("<cbc:PaymentID>"));
        assert!(!xml.contains("<cac:PaymentMeans>"));
        assert_eq!(from_ubl_xml(&xml).unwrap().payment_reference, None);
    }
}

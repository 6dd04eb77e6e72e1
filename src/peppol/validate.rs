//! PEPPOL BIS Billing 3.0 rules (PEPPOL-EN16931-Rxxx).

use rust_decimal::Decimal;

use super::eas::is_known_eas_code;
use crate::core::profile::{PEPPOL_BILLING_3_0, is_peppol_business_process};
use crate::core::{AllowanceCharge, Invoice, checked_sum, line_net_amount, round2};
use crate::validation::{Report, show};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn country(party: &crate::core::Party) -> Option<&str> {
    party.address.as_ref().map(|a| a.country_code.trim())
}

/// Evaluate the PEPPOL rules, appending to `report`.
pub(crate) fn check(invoice: &Invoice, report: &mut Report) {
    document(invoice, report);
    endpoints(invoice, report);
    allowance_charges(invoice, report);
    payment(invoice, report);
    lines(invoice, report);
}

fn document(invoice: &Invoice, report: &mut Report) {
    match invoice.business_process.as_deref() {
        None => report.add("PEPPOL-EN16931-R001", "Business process (BT-23) is missing"),
        Some(process) if blank(process) => {
            report.add("PEPPOL-EN16931-R001", "Business process (BT-23) is missing")
        }
        Some(process) if !is_peppol_business_process(process) => report.add(
            "PEPPOL-EN16931-R007",
            format!("Business process {process:?} is not a PEPPOL billing process"),
        ),
        Some(_) => {}
    }

    if invoice.specification_id.trim() != PEPPOL_BILLING_3_0 {
        report.add(
            "PEPPOL-EN16931-R004",
            format!(
                "Specification identifier {:?} is not the PEPPOL BIS Billing 3.0 identifier",
                invoice.specification_id
            ),
        );
    }

    let both_german =
        country(&invoice.seller) == Some("DE") && country(&invoice.buyer) == Some("DE");
    if invoice.notes.len() > 1 && !both_german {
        report.add(
            "PEPPOL-EN16931-R002",
            format!("{} document notes, at most one allowed", invoice.notes.len()),
        );
    }

    let has_buyer_ref = invoice.buyer_reference.as_deref().is_some_and(|r| !blank(r));
    let has_order_ref = invoice.order_reference.as_deref().is_some_and(|r| !blank(r));
    if !has_buyer_ref && !has_order_ref {
        report.add(
            "PEPPOL-EN16931-R003",
            "Neither buyer reference nor purchase order reference given",
        );
    }

    if invoice
        .tax_currency_code
        .as_deref()
        .is_some_and(|c| c.trim() == invoice.currency_code.trim())
    {
        report.add(
            "PEPPOL-EN16931-R005",
            format!(
                "VAT accounting currency equals invoice currency {}",
                invoice.currency_code
            ),
        );
    }

    if invoice.notes.iter().any(|n| blank(&n.text)) {
        report.add("PEPPOL-EN16931-R008", "Empty document note");
    }
    for (n, doc) in invoice.supporting_documents.iter().enumerate() {
        let empty_optional = [doc.description.as_deref(), doc.uri.as_deref()]
            .into_iter()
            .flatten()
            .any(blank);
        if blank(&doc.id) || empty_optional {
            report.add(
                "PEPPOL-EN16931-R008",
                format!("Supporting document {} has empty elements", n + 1),
            );
        }
    }

    if let Some(accounting) = invoice.totals.tax_total_accounting {
        let total = invoice.totals.tax_total;
        if !total.is_zero()
            && !accounting.is_zero()
            && total.is_sign_negative() != accounting.is_sign_negative()
        {
            report.add(
                "PEPPOL-EN16931-R055",
                format!(
                    "Total VAT {} and total VAT in accounting currency {} differ in sign",
                    show(invoice.totals.tax_total),
                    show(accounting)
                ),
            );
        }
    }
}

fn endpoints(invoice: &Invoice, report: &mut Report) {
    for (role, code, party) in [
        ("Seller", "PEPPOL-EN16931-R020", &invoice.seller),
        ("Buyer", "PEPPOL-EN16931-R010", &invoice.buyer),
    ] {
        match &party.electronic_address {
            Some(address) if !blank(&address.value) => {
                if let Some(scheme) = address.scheme.as_deref() {
                    if !blank(scheme) && !is_known_eas_code(scheme) {
                        report.add(
                            "PEPPOL-EN16931-CL008",
                            format!("{role} electronic address scheme {scheme:?} is not a known EAS code"),
                        );
                    }
                }
            }
            _ => report.add(code, format!("{role} electronic address is missing")),
        }
    }
}

fn allowance_charge(ac: &AllowanceCharge, what: &str, report: &mut Report) {
    match (ac.basis_amount, ac.percent) {
        (Some(basis), Some(percent)) => {
            let Some(expected) = basis
                .checked_mul(percent)
                .map(|v| round2(v / Decimal::ONE_HUNDRED))
            else {
                report.add(
                    "PEPPOL-EN16931-R040",
                    format!("{what}: {}% of {} exceeds the decimal range", show(percent), show(basis)),
                );
                return;
            };
            if round2(ac.actual_amount) != expected {
                report.add(
                    "PEPPOL-EN16931-R040",
                    format!(
                        "{what}: amount {} should be {} ({}% of {})",
                        show(ac.actual_amount),
                        show(expected),
                        show(percent),
                        show(basis)
                    ),
                );
            }
        }
        (None, Some(_)) => report.add(
            "PEPPOL-EN16931-R041",
            format!("{what}: percentage without base amount"),
        ),
        (Some(_), None) => report.add(
            "PEPPOL-EN16931-R042",
            format!("{what}: base amount without percentage"),
        ),
        (None, None) => {}
    }
}

fn allowance_charges(invoice: &Invoice, report: &mut Report) {
    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        let kind = if ac.is_charge { "charge" } else { "allowance" };
        allowance_charge(ac, &format!("Document {kind} {}", n + 1), report);
    }
    for line in &invoice.lines {
        for ac in &line.allowance_charges {
            let kind = if ac.is_charge { "charge" } else { "allowance" };
            allowance_charge(ac, &format!("Line {} {kind}", line.id), report);
        }
    }
}

fn payment(invoice: &Invoice, report: &mut Report) {
    let direct_debit = invoice
        .payment_means
        .iter()
        .any(|pm| pm.type_code.is_some_and(|c| c.is_direct_debit()));
    let has_mandate = invoice
        .mandate_reference
        .as_deref()
        .is_some_and(|m| !blank(m));
    if direct_debit && !has_mandate {
        report.add(
            "PEPPOL-EN16931-R061",
            "Direct debit payment without mandate reference",
        );
    }
}

fn lines(invoice: &Invoice, report: &mut Report) {
    for line in &invoice.lines {
        let id = &line.id;

        if line.price_allowance_charges.iter().any(|ac| ac.is_charge) {
            report.add(
                "PEPPOL-EN16931-R044",
                format!("Line {id}: charge on price level"),
            );
        }

        if let Some(gross) = line.gross_price {
            let discount = checked_sum(
                line.price_allowance_charges
                    .iter()
                    .filter(|ac| !ac.is_charge)
                    .map(|ac| ac.actual_amount),
            );
            let expected = discount.and_then(|d| gross.checked_sub(d));
            if expected != Some(line.net_price) {
                let discount = discount.map(show).unwrap_or_else(|| "out of range".into());
                report.add(
                    "PEPPOL-EN16931-R046",
                    format!(
                        "Line {id}: net price {} does not equal gross price {} minus discount {}",
                        show(line.net_price),
                        show(gross),
                        discount
                    ),
                );
            }
        }

        if let (Some(invoice_period), Some(line_period)) = (invoice.billing_period, line.billing_period) {
            if let (Some(start), Some(line_start)) = (invoice_period.start, line_period.start) {
                if line_start < start {
                    report.add(
                        "PEPPOL-EN16931-R110",
                        format!("Line {id}: period starts {line_start} before invoice period {start}"),
                    );
                }
            }
            if let (Some(end), Some(line_end)) = (invoice_period.end, line_period.end) {
                if line_end > end {
                    report.add(
                        "PEPPOL-EN16931-R111",
                        format!("Line {id}: period ends {line_end} after invoice period {end}"),
                    );
                }
            }
        }

        match line.base_quantity {
            Some(base) if base <= Decimal::ZERO => report.add(
                "PEPPOL-EN16931-R121",
                format!("Line {id}: base quantity {} is not positive", show(base)),
            ),
            _ => {
                if line.line_total_present && line.net_price_present {
                    match line_net_amount(line) {
                        Some(expected) if expected == round2(line.line_total) => {}
                        Some(expected) => report.add(
                            "PEPPOL-EN16931-R120",
                            format!(
                                "Line {id}: net amount {} should be {}",
                                show(line.line_total),
                                show(expected)
                            ),
                        ),
                        None => report.add(
                            "PEPPOL-EN16931-R120",
                            format!("Line {id}: net amount calculation exceeds the decimal range"),
                        ),
                    }
                }
            }
        }

        if let Some(unit) = line.base_quantity_unit.as_deref() {
            if unit.trim() != line.unit.trim() {
                report.add(
                    "PEPPOL-EN16931-R130",
                    format!("Line {id}: base quantity unit {unit} differs from {}", line.unit),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn codes(invoice: &Invoice) -> Vec<&'static str> {
        let mut report = Report::new();
        check(invoice, &mut report);
        match report.finish() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations().iter().map(|v| v.code()).collect(),
        }
    }

    fn valid_peppol_invoice() -> Invoice {
        InvoiceBuilder::new("PEPPOL-001", date(2024, 6, 15))
            .specification(PEPPOL_BILLING_3_0)
            .business_process(crate::core::profile::PEPPOL_BILLING_PROCESS)
            .schema_type(SchemaType::Ubl)
            .buyer_reference("BR-123")
            .due_date(date(2024, 7, 15))
            .seller(
                PartyBuilder::new(
                    "Seller GmbH",
                    AddressBuilder::new("Berlin", "10115", "DE").build(),
                )
                .vat_id("DE123456789")
                .electronic_address("EM", "seller@example.com")
                .build(),
            )
            .buyer(
                PartyBuilder::new(
                    "Buyer AG",
                    AddressBuilder::new("München", "80331", "DE").build(),
                )
                .electronic_address("EM", "buyer@example.com")
                .build(),
            )
            .add_line(
                LineBuilder::new("1", "Consulting", dec!(10), "HUR", dec!(100))
                    .tax(TaxCategory::StandardRate, dec!(19))
                    .build(),
            )
            .build_unchecked()
            .unwrap()
    }

    #[test]
    fn valid_invoice_passes() {
        let inv = valid_peppol_invoice();
        assert!(codes(&inv).is_empty(), "{:?}", codes(&inv));
        assert!(inv.validate().is_ok());
    }

    #[test]
    fn missing_buyer_reference_and_order_ref() {
        let mut inv = valid_peppol_invoice();
        inv.buyer_reference = None;
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R003"]);
        inv.order_reference = Some("PO-123".into());
        assert!(codes(&inv).is_empty());
    }

    #[test]
    fn business_process_shape() {
        let mut inv = valid_peppol_invoice();
        inv.business_process = None;
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R001"]);
        inv.business_process = Some("urn:example:process".into());
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R007"]);
    }

    #[test]
    fn specification_must_be_peppol() {
        let mut inv = valid_peppol_invoice();
        inv.specification_id = crate::core::profile::EN16931.into();
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R004"]);
    }

    #[test]
    fn missing_endpoints() {
        let mut inv = valid_peppol_invoice();
        inv.seller.electronic_address = None;
        inv.buyer.electronic_address = None;
        assert_eq!(
            codes(&inv),
            vec!["PEPPOL-EN16931-R020", "PEPPOL-EN16931-R010"]
        );
    }

    #[test]
    fn unknown_eas_scheme() {
        let mut inv = valid_peppol_invoice();
        inv.buyer.electronic_address = Some(ElectronicAddress {
            value: "12345".into(),
            scheme: Some("XX99".into()),
        });
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-CL008"]);
    }

    #[test]
    fn several_notes_only_between_german_parties() {
        let mut inv = valid_peppol_invoice();
        for text in ["first", "second"] {
            inv.notes.push(Note {
                subject_code: None,
                text: text.into(),
            });
        }
        assert!(codes(&inv).is_empty());
        inv.buyer.address.as_mut().unwrap().country_code = "FR".into();
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R002"]);
    }

    #[test]
    fn same_tax_currency_is_rejected() {
        let mut inv = valid_peppol_invoice();
        inv.tax_currency_code = Some("EUR".into());
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R005"]);
    }

    #[test]
    fn allowance_percentage_pairing_and_amount() {
        let mut inv = valid_peppol_invoice();
        let mut ac = AllowanceCharge::allowance(dec!(10), TaxCategory::StandardRate, dec!(19))
            .with_reason("Discount");
        ac.percent = Some(dec!(10));
        inv.allowance_charges.push(ac.clone());
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R041"]);

        inv.allowance_charges[0] = ac.clone().with_basis(dec!(1000), dec!(5));
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R040"]);

        inv.allowance_charges[0] = ac.with_basis(dec!(100), dec!(10));
        assert!(codes(&inv).is_empty());

        inv.allowance_charges[0].percent = None;
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R042"]);
    }

    #[test]
    fn direct_debit_needs_mandate() {
        let mut inv = valid_peppol_invoice();
        inv.payment_means.push(PaymentMeans {
            type_code: Some(PaymentMeansCode::SepaDirectDebit),
            ..Default::default()
        });
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R061"]);
        inv.mandate_reference = Some("MANDATE-1".into());
        assert!(codes(&inv).is_empty());
    }

    #[test]
    fn price_level_rules() {
        let mut inv = valid_peppol_invoice();
        inv.lines[0].gross_price = Some(dec!(110));
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R046"]);

        inv.lines[0].price_allowance_charges.push(AllowanceCharge {
            actual_amount: dec!(10),
            ..Default::default()
        });
        assert!(codes(&inv).is_empty());

        inv.lines[0].price_allowance_charges[0].is_charge = true;
        let found = codes(&inv);
        assert!(found.contains(&"PEPPOL-EN16931-R044"));
    }

    #[test]
    fn line_amount_base_quantity_and_unit() {
        let mut inv = valid_peppol_invoice();
        inv.lines[0].line_total = dec!(999);
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R120"]);

        inv.lines[0].line_total = dec!(1000);
        inv.lines[0].base_quantity = Some(dec!(0));
        inv.lines[0].base_quantity_unit = Some("DAY".into());
        assert_eq!(
            codes(&inv),
            vec!["PEPPOL-EN16931-R121", "PEPPOL-EN16931-R130"]
        );
    }

    #[test]
    fn line_period_within_invoice_period() {
        let mut inv = valid_peppol_invoice();
        inv.billing_period = Some(Period::new(date(2024, 6, 1), date(2024, 6, 30)));
        inv.lines[0].billing_period = Some(Period::new(date(2024, 5, 31), date(2024, 7, 1)));
        assert_eq!(
            codes(&inv),
            vec!["PEPPOL-EN16931-R110", "PEPPOL-EN16931-R111"]
        );
    }

    #[test]
    fn accounting_total_sign() {
        let mut inv = valid_peppol_invoice();
        inv.tax_currency_code = Some("SEK".into());
        inv.totals.tax_total_accounting = Some(dec!(-2000));
        assert_eq!(codes(&inv), vec!["PEPPOL-EN16931-R055"]);
    }

    #[test]
    fn huge_amounts_are_reported_without_overflow() {
        let mut inv = valid_peppol_invoice();
        inv.lines[0].quantity = Decimal::MAX;
        inv.lines[0].net_price = Decimal::MAX;
        inv.lines[0].gross_price = Some(Decimal::MIN);
        inv.lines[0].price_allowance_charges.push(AllowanceCharge {
            actual_amount: Decimal::MAX,
            ..Default::default()
        });
        inv.allowance_charges.push(
            AllowanceCharge::allowance(dec!(10), TaxCategory::StandardRate, dec!(19))
                .with_reason("Discount")
                .with_basis(Decimal::MAX, dec!(200)),
        );
        let found = codes(&inv);
        for code in ["PEPPOL-EN16931-R040", "PEPPOL-EN16931-R046", "PEPPOL-EN16931-R120"] {
            assert!(found.contains(&code), "{code} missing from {found:?}");
        }

        inv.totals.tax_total = Decimal::MAX;
        inv.tax_currency_code = Some("SEK".into());
        inv.totals.tax_total_accounting = Some(Decimal::MAX);
        assert!(!codes(&inv).contains(&"PEPPOL-EN16931-R055"));
    }
}

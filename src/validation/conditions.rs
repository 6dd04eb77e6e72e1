//! Phase 3: cross-field conditions (BR-CO).

use rust_decimal::Decimal;

use super::{Report, breakdown_rules_apply, line_rules_apply};
use crate::core::countries::has_valid_vat_prefix;
use crate::core::{AllowanceCharge, Invoice, Period};

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn empty_period(period: &Option<Period>) -> bool {
    period.is_some_and(|p| p.is_empty())
}

fn has_reason(ac: &AllowanceCharge) -> bool {
    filled(&ac.reason) || filled(&ac.reason_code)
}

pub(super) fn check(invoice: &Invoice, report: &mut Report) {
    for tax in &invoice.trade_taxes {
        if tax.tax_point_date.is_some() && filled(&tax.due_date_type_code) {
            report.add(
                "BR-CO-03",
                "Tax point date and tax point date code are both given",
            );
        }
    }

    if line_rules_apply(invoice) {
        for line in &invoice.lines {
            if line.category_code().is_none() {
                report.add(
                    "BR-CO-04",
                    format!("Line {}: missing VAT category code", line.id),
                );
            }
        }
    }

    let vat_ids = [
        ("Seller", invoice.seller.vat_id.as_deref()),
        (
            "Tax representative",
            invoice.tax_representative.as_ref().and_then(|p| p.vat_id.as_deref()),
        ),
        ("Buyer", invoice.buyer.vat_id.as_deref()),
    ];
    for (role, vat_id) in vat_ids {
        if let Some(vat_id) = vat_id {
            if !has_valid_vat_prefix(vat_id) {
                report.add(
                    "BR-CO-09",
                    format!("{role} VAT identifier {vat_id:?} lacks a country prefix"),
                );
            }
        }
    }

    if breakdown_rules_apply(invoice) && invoice.trade_taxes.is_empty() {
        report.add("BR-CO-18", "Invoice has no VAT breakdown");
    }

    if empty_period(&invoice.billing_period) {
        report.add(
            "BR-CO-19",
            "Invoicing period given without start or end date",
        );
    }
    if line_rules_apply(invoice) {
        for line in &invoice.lines {
            if empty_period(&line.billing_period) {
                report.add(
                    "BR-CO-20",
                    format!("Line {}: period given without start or end date", line.id),
                );
            }
        }
    }

    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        if has_reason(ac) {
            continue;
        }
        if ac.is_charge {
            report.add(
                "BR-CO-22",
                format!("Document charge {}: missing reason and reason code", n + 1),
            );
        } else {
            report.add(
                "BR-CO-21",
                format!("Document allowance {}: missing reason and reason code", n + 1),
            );
        }
    }
    if line_rules_apply(invoice) {
        for line in &invoice.lines {
            for ac in line.allowance_charges.iter().filter(|ac| !has_reason(ac)) {
                let (code, kind) = if ac.is_charge {
                    ("BR-CO-24", "charge")
                } else {
                    ("BR-CO-23", "allowance")
                };
                report.add(
                    code,
                    format!("Line {}: {kind} without reason or reason code", line.id),
                );
            }
        }
    }

    if invoice.totals.due_payable > Decimal::ZERO
        && invoice.due_date().is_none()
        && !invoice.payment_terms.iter().any(|t| filled(&t.description))
    {
        report.add(
            "BR-CO-25",
            "Positive amount due without payment due date or payment terms",
        );
    }

    let seller = &invoice.seller;
    if seller.identifiers.iter().all(|id| id.value.trim().is_empty())
        && seller.legal_registration.is_none()
        && !filled(&seller.vat_id)
    {
        report.add(
            "BR-CO-26",
            "Seller has no identifier, legal registration identifier or VAT identifier",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::EN16931;
    use crate::core::{Identifier, InvoiceLine, PaymentTerms, TradeTax};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn run(invoice: &Invoice) -> Vec<&'static str> {
        let mut report = Report::new();
        check(invoice, &mut report);
        match report.finish() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations().iter().map(|v| v.code()).collect(),
        }
    }

    fn base() -> Invoice {
        let mut inv = Invoice {
            specification_id: EN16931.into(),
            trade_taxes: vec![TradeTax::default()],
            ..Default::default()
        };
        inv.seller.vat_id = Some("DE123456789".into());
        inv
    }

    #[test]
    fn baseline_passes() {
        assert!(run(&base()).is_empty());
    }

    #[test]
    fn empty_period_group_is_reported() {
        let mut inv = base();
        inv.billing_period = Some(Period::default());
        assert_eq!(run(&inv), vec!["BR-CO-19"]);

        inv.billing_period = Some(Period {
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: None,
        });
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn empty_line_period_is_reported() {
        let mut inv = base();
        inv.lines.push(InvoiceLine {
            id: "7".into(),
            tax_category: Some(crate::core::TaxCategory::StandardRate),
            billing_period: Some(Period::default()),
            ..Default::default()
        });
        assert_eq!(run(&inv), vec!["BR-CO-20"]);
    }

    #[test]
    fn vat_prefix_is_checked_for_all_parties() {
        let mut inv = base();
        inv.buyer.vat_id = Some("123456789".into());
        assert_eq!(run(&inv), vec!["BR-CO-09"]);
        inv.buyer.vat_id = Some("EL123456789".into());
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn positive_due_needs_terms_or_date() {
        let mut inv = base();
        inv.totals.due_payable = dec!(10);
        assert_eq!(run(&inv), vec!["BR-CO-25"]);
        inv.payment_terms.push(PaymentTerms {
            description: Some("30 days net".into()),
            due_date: None,
        });
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn seller_needs_some_identifier() {
        let mut inv = base();
        inv.seller.vat_id = None;
        assert_eq!(run(&inv), vec!["BR-CO-26"]);
        inv.seller.identifiers.push(Identifier::with_scheme("4000001123452", "0088"));
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn missing_breakdown_depends_on_profile() {
        let mut inv = base();
        inv.trade_taxes.clear();
        assert_eq!(run(&inv), vec!["BR-CO-18"]);
        inv.specification_id = "urn:example:unknown".into();
        assert!(run(&inv).is_empty());
    }
}

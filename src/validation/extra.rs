//! Phase 6: sign checks on document allowances and charges, and tax totals
//! in currencies the invoice does not declare.

use rust_decimal::Decimal;

use super::{Report, show};
use crate::core::Invoice;

pub(super) fn check(invoice: &Invoice, report: &mut Report) {
    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        let (amount_code, basis_code, kind) = if ac.is_charge {
            ("BR-39", "BR-40", "charge")
        } else {
            ("BR-34", "BR-35", "allowance")
        };
        if ac.actual_amount < Decimal::ZERO {
            report.add(
                amount_code,
                format!("Document {kind} {}: negative amount {}", n + 1, show(ac.actual_amount)),
            );
        }
        if let Some(basis) = ac.basis_amount.filter(|b| *b < Decimal::ZERO) {
            report.add(
                basis_code,
                format!("Document {kind} {}: negative base amount {}", n + 1, show(basis)),
            );
        }
    }

    for currency in &invoice.unexpected_tax_currencies {
        report.add(
            "UNEXPECTED-TAX-CURRENCY",
            format!(
                "Tax total in {currency} matches neither invoice currency {} nor tax currency {}",
                invoice.currency_code,
                invoice.tax_currency_code.as_deref().unwrap_or("(none)")
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AllowanceCharge, TaxCategory};
    use rust_decimal_macros::dec;

    fn run(invoice: &Invoice) -> Vec<&'static str> {
        let mut report = Report::new();
        check(invoice, &mut report);
        match report.finish() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations().iter().map(|v| v.code()).collect(),
        }
    }

    #[test]
    fn negative_amounts_are_reported_by_kind() {
        let mut inv = Invoice::default();
        inv.allowance_charges.push(
            AllowanceCharge::allowance(dec!(-5), TaxCategory::StandardRate, dec!(19))
                .with_basis(dec!(-50), dec!(10)),
        );
        inv.allowance_charges
            .push(AllowanceCharge::charge(dec!(-1), TaxCategory::StandardRate, dec!(19)));
        assert_eq!(run(&inv), vec!["BR-34", "BR-35", "BR-39"]);
    }

    #[test]
    fn unexpected_currency_is_reported_once_per_entry() {
        let mut inv = Invoice {
            currency_code: "EUR".into(),
            unexpected_tax_currencies: vec!["GBP".into(), "CHF".into()],
            ..Default::default()
        };
        assert_eq!(
            run(&inv),
            vec!["UNEXPECTED-TAX-CURRENCY", "UNEXPECTED-TAX-CURRENCY"]
        );
        inv.unexpected_tax_currencies.clear();
        assert!(run(&inv).is_empty());
    }
}

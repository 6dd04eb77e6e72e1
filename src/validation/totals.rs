//! Phase 2: document arithmetic (BR-CO-10..BR-CO-17).
//!
//! Both sides of every comparison are rounded to 2 decimals and compared
//! exactly. A side that overflows the decimal range is itself a violation.

use rust_decimal::Decimal;

use super::{Report, breakdown_rules_apply, line_rules_apply, show};
use crate::core::{
    Invoice, TaxCategory, checked_sum, round2, sum_allowance_charges, sum_line_totals, tax_amount,
};

fn mismatch(
    report: &mut Report,
    code: &'static str,
    what: &str,
    term: &str,
    expected: Option<Decimal>,
    actual: Decimal,
) {
    let Some(expected) = expected else {
        report.add(
            code,
            format!("{what} exceeds the decimal range, {term} value {}", show(actual)),
        );
        return;
    };
    let (expected, actual) = (round2(expected), round2(actual));
    if expected != actual {
        report.add(
            code,
            format!(
                "{what} {} does not match {term} value {}",
                show(expected),
                show(actual)
            ),
        );
    }
}

pub(super) fn check(invoice: &Invoice, report: &mut Report) {
    let t = &invoice.totals;

    if line_rules_apply(invoice) {
        mismatch(
            report,
            "BR-CO-10",
            "Sum of line net amounts",
            "BT-106",
            sum_line_totals(&invoice.lines),
            t.line_total,
        );
    }
    mismatch(
        report,
        "BR-CO-11",
        "Sum of document allowances",
        "BT-107",
        sum_allowance_charges(&invoice.allowance_charges, false),
        t.allowance_total,
    );
    mismatch(
        report,
        "BR-CO-12",
        "Sum of document charges",
        "BT-108",
        sum_allowance_charges(&invoice.allowance_charges, true),
        t.charge_total,
    );
    if breakdown_rules_apply(invoice) {
        mismatch(
            report,
            "BR-CO-13",
            "Line total minus allowances plus charges",
            "BT-109",
            t.line_total
                .checked_sub(t.allowance_total)
                .and_then(|v| v.checked_add(t.charge_total)),
            t.tax_basis_total,
        );
        mismatch(
            report,
            "BR-CO-14",
            "Sum of VAT category tax amounts",
            "BT-110",
            checked_sum(invoice.trade_taxes.iter().map(|tax| tax.calculated_amount)),
            t.tax_total,
        );
    }
    mismatch(
        report,
        "BR-CO-15",
        "Total without VAT plus total VAT",
        "BT-112",
        t.tax_basis_total.checked_add(t.tax_total),
        t.grand_total,
    );
    mismatch(
        report,
        "BR-CO-16",
        "Total with VAT minus paid amount plus rounding",
        "BT-115",
        t.grand_total
            .checked_sub(t.prepaid)
            .and_then(|v| v.checked_add(t.rounding)),
        t.due_payable,
    );

    if !breakdown_rules_apply(invoice) {
        return;
    }
    for tax in &invoice.trade_taxes {
        let Some(category) = tax.category else {
            continue;
        };
        if category == TaxCategory::NotSubjectToVat || tax.rate.is_none() {
            continue;
        }
        mismatch(
            report,
            "BR-CO-17",
            &format!(
                "VAT {} at {}%: taxable amount × rate",
                category.code(),
                tax.rate.map(show).unwrap_or_default()
            ),
            "BT-117",
            tax_amount(tax.basis_amount, tax.rate),
            tax.calculated_amount,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::EN16931;
    use crate::core::{InvoiceLine, TotalsPresence, TradeTax};
    use crate::validation::Report;
    use rust_decimal_macros::dec;

    fn run(invoice: &Invoice) -> Vec<&'static str> {
        let mut report = Report::new();
        check(invoice, &mut report);
        match report.finish() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations().iter().map(|v| v.code()).collect(),
        }
    }

    fn consistent() -> Invoice {
        let mut inv = Invoice {
            specification_id: EN16931.into(),
            lines: vec![InvoiceLine {
                id: "1".into(),
                line_total: dec!(100),
                line_total_present: true,
                tax_category: Some(TaxCategory::StandardRate),
                tax_rate: Some(dec!(19)),
                ..Default::default()
            }],
            trade_taxes: vec![TradeTax::new(
                TaxCategory::StandardRate,
                Some(dec!(19)),
                dec!(100),
                dec!(19),
            )],
            presence: TotalsPresence::ALL,
            ..Default::default()
        };
        inv.totals.line_total = dec!(100);
        inv.totals.tax_basis_total = dec!(100);
        inv.totals.tax_total = dec!(19);
        inv.totals.grand_total = dec!(119);
        inv.totals.due_payable = dec!(119);
        inv
    }

    #[test]
    fn consistent_totals_pass() {
        assert!(run(&consistent()).is_empty());
    }

    #[test]
    fn line_total_mismatch_is_br_co_10() {
        let mut inv = consistent();
        inv.lines.push(InvoiceLine {
            id: "2".into(),
            line_total: dec!(200),
            line_total_present: true,
            ..Default::default()
        });
        assert_eq!(run(&inv), vec!["BR-CO-10"]);
    }

    #[test]
    fn comparisons_round_to_cents() {
        let mut inv = consistent();
        inv.totals.grand_total = dec!(119.004);
        inv.totals.due_payable = dec!(119.004);
        assert!(run(&inv).is_empty());
    }

    #[test]
    fn due_payable_accounts_for_prepaid_and_rounding() {
        let mut inv = consistent();
        inv.totals.prepaid = dec!(19);
        inv.totals.rounding = dec!(0.5);
        inv.totals.due_payable = dec!(100.5);
        assert!(run(&inv).is_empty());
        inv.totals.due_payable = dec!(119);
        assert_eq!(run(&inv), vec!["BR-CO-16"]);
    }

    #[test]
    fn breakdown_tax_must_match_rate() {
        let mut inv = consistent();
        inv.trade_taxes[0].calculated_amount = dec!(18);
        inv.totals.tax_total = dec!(18);
        inv.totals.grand_total = dec!(118);
        inv.totals.due_payable = dec!(118);
        assert_eq!(run(&inv), vec!["BR-CO-17"]);
    }

    #[test]
    fn overflowing_sums_are_violations() {
        let mut inv = consistent();
        inv.lines[0].line_total = Decimal::MAX;
        inv.lines.push(inv.lines[0].clone());
        inv.totals.grand_total = Decimal::MAX;
        inv.totals.due_payable = Decimal::MAX;
        inv.totals.tax_total = Decimal::MAX;
        inv.trade_taxes[0].basis_amount = Decimal::MAX;
        inv.trade_taxes[0].calculated_amount = Decimal::MAX;

        let mut report = Report::new();
        check(&inv, &mut report);
        let err = report.finish().unwrap_err();
        let codes: Vec<_> = err.violations().iter().map(|v| v.code()).collect();
        assert_eq!(codes, vec!["BR-CO-10", "BR-CO-15", "BR-CO-17"]);
        assert!(err.violations()[0].text.contains("exceeds the decimal range"));
    }
}

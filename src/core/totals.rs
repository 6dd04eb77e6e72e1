//! Recomputation of the VAT breakdown (BG-23) and document totals (BG-22).

use std::collections::HashMap;

use tracing::{debug, trace};

use super::arithmetic::{round2, rollup_by_category_rate, saturating_sum, tax_key};
use super::types::{Invoice, TaxCategory, TotalsPresence, TradeTax};

impl Invoice {
    /// Rebuild the VAT breakdown from the lines and document-level
    /// allowances and charges.
    ///
    /// One row is produced per (category, rate) in first-appearance order.
    /// Categories that require an exemption reason take it from
    /// `exemption_reasons`, falling back to the reason of a previous row with
    /// the same key. The tax point date and its type code are carried over
    /// from the previous first row.
    pub fn update_applicable_trade_tax(&mut self, exemption_reasons: &HashMap<TaxCategory, String>) {
        let previous = std::mem::take(&mut self.trade_taxes);
        let tax_point_date = previous.first().and_then(|t| t.tax_point_date);
        let due_date_type_code = previous.first().and_then(|t| t.due_date_type_code.clone());

        for entry in rollup_by_category_rate(&self.lines, &self.allowance_charges) {
            let mut row = TradeTax::new(entry.category, entry.rate, entry.basis, entry.calculated);
            row.tax_point_date = tax_point_date;
            row.due_date_type_code = due_date_type_code.clone();

            if entry.category.requires_exemption_reason() {
                let same_key = previous.iter().find(|t| {
                    t.category
                        .is_some_and(|c| tax_key(c, t.rate) == tax_key(entry.category, entry.rate))
                });
                row.exemption_reason = exemption_reasons
                    .get(&entry.category)
                    .cloned()
                    .or_else(|| same_key.and_then(|t| t.exemption_reason.clone()));
                row.exemption_reason_code = same_key.and_then(|t| t.exemption_reason_code.clone());
            }
            trace!(
                category = entry.category.code(),
                rate = ?entry.rate,
                basis = %row.basis_amount,
                calculated = %row.calculated_amount,
                "breakdown row"
            );
            self.trade_taxes.push(row);
        }
        debug!(
            invoice = %self.number,
            rows = self.trade_taxes.len(),
            "rebuilt VAT breakdown"
        );
    }

    /// Recompute BT-106..BT-110, BT-112 and BT-115 from the lines, document
    /// allowances and charges and the current VAT breakdown.
    ///
    /// Paid amount (BT-113), rounding amount (BT-114) and the accounting
    /// currency total (BT-111) are left as they are.
    pub fn update_totals(&mut self) {
        let totals = &mut self.totals;
        totals.line_total = round2(saturating_sum(self.lines.iter().map(|l| l.line_total)));
        totals.allowance_total = round2(saturating_sum(
            self.allowance_charges.iter().filter(|ac| !ac.is_charge).map(|ac| ac.actual_amount),
        ));
        totals.charge_total = round2(saturating_sum(
            self.allowance_charges.iter().filter(|ac| ac.is_charge).map(|ac| ac.actual_amount),
        ));
        totals.tax_basis_total = totals
            .line_total
            .saturating_sub(totals.allowance_total)
            .saturating_add(totals.charge_total);
        totals.tax_total = round2(saturating_sum(self.trade_taxes.iter().map(|t| t.calculated_amount)));
        totals.grand_total = totals.tax_basis_total.saturating_add(totals.tax_total);
        totals.due_payable = totals
            .grand_total
            .saturating_sub(totals.prepaid)
            .saturating_add(totals.rounding);
        self.presence = TotalsPresence::ALL;
        debug!(
            invoice = %self.number,
            grand_total = %totals.grand_total,
            due_payable = %totals.due_payable,
            "recomputed totals"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AllowanceCharge, InvoiceLine};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn line(total: Decimal, category: TaxCategory, rate: Option<Decimal>) -> InvoiceLine {
        InvoiceLine {
            id: "1".into(),
            line_total: total,
            line_total_present: true,
            tax_category: Some(category),
            tax_rate: rate,
            ..Default::default()
        }
    }

    #[test]
    fn breakdown_and_totals_for_mixed_categories() {
        let mut inv = Invoice {
            number: "INV-1".into(),
            lines: vec![
                line(dec!(100), TaxCategory::StandardRate, Some(dec!(19))),
                line(dec!(50), TaxCategory::ReverseCharge, Some(dec!(0))),
            ],
            ..Default::default()
        };
        let reasons = HashMap::from([(TaxCategory::ReverseCharge, "Reverse charge".to_string())]);
        inv.update_applicable_trade_tax(&reasons);
        inv.update_totals();

        assert_eq!(inv.trade_taxes.len(), 2);
        assert_eq!(inv.trade_taxes[0].category, Some(TaxCategory::StandardRate));
        assert_eq!(inv.trade_taxes[0].calculated_amount, dec!(19.00));
        assert_eq!(inv.trade_taxes[0].exemption_reason, None);
        assert_eq!(inv.trade_taxes[1].category, Some(TaxCategory::ReverseCharge));
        assert_eq!(
            inv.trade_taxes[1].exemption_reason.as_deref(),
            Some("Reverse charge")
        );
        assert!(inv.trade_taxes.iter().all(|t| t.basis_amount_present && t.calculated_amount_present));

        assert_eq!(inv.totals.line_total, dec!(150));
        assert_eq!(inv.totals.tax_basis_total, dec!(150));
        assert_eq!(inv.totals.tax_total, dec!(19.00));
        assert_eq!(inv.totals.grand_total, dec!(169.00));
        assert_eq!(inv.totals.due_payable, dec!(169.00));
        assert_eq!(inv.presence, TotalsPresence::ALL);
    }

    #[test]
    fn totals_keep_prepaid_and_rounding() {
        let mut inv = Invoice {
            lines: vec![line(dec!(100), TaxCategory::StandardRate, Some(dec!(19)))],
            allowance_charges: vec![
                AllowanceCharge::allowance(dec!(10), TaxCategory::StandardRate, dec!(19)),
                AllowanceCharge::charge(dec!(4), TaxCategory::StandardRate, dec!(19)),
            ],
            ..Default::default()
        };
        inv.totals.prepaid = dec!(50);
        inv.totals.rounding = dec!(0.02);
        inv.update_applicable_trade_tax(&HashMap::new());
        inv.update_totals();

        assert_eq!(inv.totals.allowance_total, dec!(10));
        assert_eq!(inv.totals.charge_total, dec!(4));
        assert_eq!(inv.totals.tax_basis_total, dec!(94));
        assert_eq!(inv.totals.tax_total, dec!(17.86));
        assert_eq!(inv.totals.grand_total, dec!(111.86));
        assert_eq!(inv.totals.prepaid, dec!(50));
        assert_eq!(inv.totals.due_payable, dec!(61.88));
    }

    #[test]
    fn breakdown_keeps_tax_point_date_and_previous_reason() {
        let mut inv = Invoice {
            lines: vec![line(dec!(80), TaxCategory::Exempt, Some(dec!(0)))],
            trade_taxes: vec![TradeTax {
                category: Some(TaxCategory::Exempt),
                rate: Some(dec!(0)),
                exemption_reason: Some("Exempt under Art. 132".into()),
                exemption_reason_code: Some("VATEX-EU-132".into()),
                due_date_type_code: Some("5".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        inv.update_applicable_trade_tax(&HashMap::new());

        let row = &inv.trade_taxes[0];
        assert_eq!(row.exemption_reason.as_deref(), Some("Exempt under Art. 132"));
        assert_eq!(row.exemption_reason_code.as_deref(), Some("VATEX-EU-132"));
        assert_eq!(row.due_date_type_code.as_deref(), Some("5"));
        assert_eq!(row.basis_amount, dec!(80));
    }
}

//! Rounding and VAT roll-up helpers shared by the totals calculator and the
//! validator.
//!
//! Validator-facing helpers return `None` when a sum or product leaves the
//! `Decimal` range. The recomputation helpers saturate instead, so the
//! validator sees the out-of-range totals and reports them.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{AllowanceCharge, InvoiceLine, TaxCategory};

/// Round to 2 decimal places, half away from zero (commercial rounding).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Breakdown key for a (category, rate) pair.
///
/// Category O carries no rate, so its rate is dropped from the key.
pub fn tax_key(category: TaxCategory, rate: Option<Decimal>) -> (TaxCategory, Option<Decimal>) {
    match category {
        TaxCategory::NotSubjectToVat => (category, None),
        _ => (category, rate),
    }
}

/// VAT due for `basis` at `rate` percent, rounded to 2 places. No rate
/// means no tax. `None` on overflow.
pub fn tax_amount(basis: Decimal, rate: Option<Decimal>) -> Option<Decimal> {
    match rate {
        Some(rate) => basis
            .checked_mul(rate)
            .map(|v| round2(v / Decimal::ONE_HUNDRED)),
        None => Some(Decimal::ZERO),
    }
}

/// Sum of `values`, `None` on overflow.
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Sum of `values`, clamped to `Decimal::MIN..=Decimal::MAX`.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Net amount of an invoice line (BT-131): quantity × net price / base
/// quantity − line allowances + line charges, rounded to 2 places.
/// `None` on overflow or a zero base quantity.
pub fn line_net_amount(line: &InvoiceLine) -> Option<Decimal> {
    let base = line.base_quantity.unwrap_or(Decimal::ONE);
    let allowances = checked_sum(line.allowances().map(|ac| ac.actual_amount))?;
    let charges = checked_sum(line.charges().map(|ac| ac.actual_amount))?;
    line.quantity
        .checked_mul(line.net_price)?
        .checked_div(base)?
        .checked_sub(allowances)?
        .checked_add(charges)
        .map(round2)
}

/// One derived VAT breakdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    pub category: TaxCategory,
    pub rate: Option<Decimal>,
    /// Σ line net amounts − Σ allowances + Σ charges, rounded to 2 places.
    pub basis: Decimal,
    /// `round2(basis × rate / 100)`, zero when no rate applies.
    pub calculated: Decimal,
}

/// Group line net amounts and document-level allowances and charges by
/// (category, rate) and compute each group's basis and tax.
///
/// Entries appear in first-appearance order: lines first, then document
/// allowances and charges. Items without a category are skipped.
pub fn rollup_by_category_rate(
    lines: &[InvoiceLine],
    allowance_charges: &[AllowanceCharge],
) -> Vec<CategoryRollup> {
    let mut groups: Vec<((TaxCategory, Option<Decimal>), Decimal)> = Vec::new();
    let mut add = |key: (TaxCategory, Option<Decimal>), amount: Decimal| {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, sum)) => *sum = sum.saturating_add(amount),
            None => groups.push((key, amount)),
        }
    };

    for line in lines {
        if let Some(category) = line.tax_category {
            add(tax_key(category, line.tax_rate), line.line_total);
        }
    }
    for ac in allowance_charges {
        if let Some(category) = ac.tax_category {
            let amount = if ac.is_charge {
                ac.actual_amount
            } else {
                -ac.actual_amount
            };
            add(tax_key(category, ac.tax_rate), amount);
        }
    }

    groups
        .into_iter()
        .map(|((category, rate), sum)| {
            let basis = round2(sum);
            let calculated = match rate {
                Some(rate) if category.is_taxed() => {
                    round2(basis.saturating_mul(rate) / Decimal::ONE_HUNDRED)
                }
                _ => Decimal::ZERO,
            };
            CategoryRollup {
                category,
                rate,
                basis,
                calculated,
            }
        })
        .collect()
}

/// Expected taxable amount for one breakdown key: the rounded sum of matching
/// line net amounts, minus matching allowances, plus matching charges.
/// `None` on overflow.
pub fn category_basis(
    lines: &[InvoiceLine],
    allowance_charges: &[AllowanceCharge],
    category: TaxCategory,
    rate: Option<Decimal>,
) -> Option<Decimal> {
    let key = tax_key(category, rate);
    let line_amounts = lines
        .iter()
        .filter(|l| l.tax_category.is_some_and(|c| tax_key(c, l.tax_rate) == key))
        .map(|l| l.line_total);
    let ac_amounts = allowance_charges
        .iter()
        .filter(|ac| ac.tax_category.is_some_and(|c| tax_key(c, ac.tax_rate) == key))
        .map(|ac| {
            if ac.is_charge {
                ac.actual_amount
            } else {
                -ac.actual_amount
            }
        });
    checked_sum(line_amounts.chain(ac_amounts)).map(round2)
}

/// Sum of line net amounts (BT-131), `None` on overflow.
pub fn sum_line_totals(lines: &[InvoiceLine]) -> Option<Decimal> {
    checked_sum(lines.iter().map(|l| l.line_total))
}

/// Sum of allowance or charge amounts, selected by `charges`. `None` on
/// overflow.
pub fn sum_allowance_charges(allowance_charges: &[AllowanceCharge], charges: bool) -> Option<Decimal> {
    checked_sum(
        allowance_charges
            .iter()
            .filter(|ac| ac.is_charge == charges)
            .map(|ac| ac.actual_amount),
    )
}

/// Number of decimal places actually used by `value`, ignoring trailing zeros.
pub fn fraction_digits(value: Decimal) -> u32 {
    value.normalize().scale()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(total: Decimal, category: TaxCategory, rate: Option<Decimal>) -> InvoiceLine {
        InvoiceLine {
            line_total: total,
            line_total_present: true,
            tax_category: Some(category),
            tax_rate: rate,
            ..Default::default()
        }
    }

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
        assert_eq!(round2(dec!(2.344)), dec!(2.34));
        assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round2(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn tax_amount_rounds() {
        assert_eq!(tax_amount(dec!(33.33), Some(dec!(19))), Some(dec!(6.33)));
        assert_eq!(tax_amount(dec!(100), None), Some(dec!(0)));
    }

    #[test]
    fn overflow_is_reported_not_raised() {
        let huge = Decimal::MAX;
        assert_eq!(tax_amount(huge, Some(dec!(19))), None);
        assert_eq!(checked_sum([huge, dec!(1)]), None);
        assert_eq!(saturating_sum([huge, dec!(1)]), Decimal::MAX);

        let lines = vec![
            line(huge, TaxCategory::StandardRate, Some(dec!(19))),
            line(huge, TaxCategory::StandardRate, Some(dec!(19))),
        ];
        assert_eq!(sum_line_totals(&lines), None);
        assert_eq!(category_basis(&lines, &[], TaxCategory::StandardRate, Some(dec!(19))), None);

        let rollup = rollup_by_category_rate(&lines, &[]);
        assert_eq!(rollup[0].basis, Decimal::MAX);
    }

    #[test]
    fn line_net_amount_uses_base_quantity() {
        let mut l = InvoiceLine {
            quantity: dec!(3),
            net_price: dec!(10),
            base_quantity: Some(dec!(2)),
            ..Default::default()
        };
        assert_eq!(line_net_amount(&l), Some(dec!(15)));
        l.base_quantity = Some(dec!(0));
        assert_eq!(line_net_amount(&l), None);
        l.base_quantity = None;
        l.quantity = Decimal::MAX;
        assert_eq!(line_net_amount(&l), None);
    }

    #[test]
    fn rollup_keeps_first_appearance_order() {
        let lines = vec![
            line(dec!(100), TaxCategory::StandardRate, Some(dec!(19))),
            line(dec!(50), TaxCategory::ReverseCharge, Some(dec!(0))),
            line(dec!(20), TaxCategory::StandardRate, Some(dec!(19))),
        ];
        let rollup = rollup_by_category_rate(&lines, &[]);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].category, TaxCategory::StandardRate);
        assert_eq!(rollup[0].basis, dec!(120));
        assert_eq!(rollup[0].calculated, dec!(22.80));
        assert_eq!(rollup[1].category, TaxCategory::ReverseCharge);
        assert_eq!(rollup[1].calculated, dec!(0));
    }

    #[test]
    fn rollup_separates_rates_within_category() {
        let lines = vec![
            line(dec!(100), TaxCategory::StandardRate, Some(dec!(19))),
            line(dec!(100), TaxCategory::StandardRate, Some(dec!(7))),
        ];
        let rollup = rollup_by_category_rate(&lines, &[]);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].calculated, dec!(19.00));
        assert_eq!(rollup[1].calculated, dec!(7.00));
    }

    #[test]
    fn rollup_applies_document_allowances_and_charges() {
        let lines = vec![line(dec!(200), TaxCategory::StandardRate, Some(dec!(19)))];
        let acs = vec![
            AllowanceCharge::allowance(dec!(20), TaxCategory::StandardRate, dec!(19)),
            AllowanceCharge::charge(dec!(5), TaxCategory::StandardRate, dec!(19)),
        ];
        let rollup = rollup_by_category_rate(&lines, &acs);
        assert_eq!(rollup[0].basis, dec!(185));
        assert_eq!(rollup[0].calculated, dec!(35.15));
    }

    #[test]
    fn category_o_ignores_rate() {
        let lines = vec![
            line(dec!(10), TaxCategory::NotSubjectToVat, None),
            line(dec!(15), TaxCategory::NotSubjectToVat, Some(dec!(0))),
        ];
        let rollup = rollup_by_category_rate(&lines, &[]);
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].rate, None);
        assert_eq!(rollup[0].basis, dec!(25));
        assert_eq!(
            category_basis(&lines, &[], TaxCategory::NotSubjectToVat, Some(dec!(7))),
            Some(dec!(25))
        );
    }

    #[test]
    fn category_basis_uses_composite_key() {
        let lines = vec![
            line(dec!(100), TaxCategory::StandardRate, Some(dec!(19))),
            line(dec!(40), TaxCategory::StandardRate, Some(dec!(7))),
            line(dec!(60), TaxCategory::ZeroRated, Some(dec!(0))),
        ];
        assert_eq!(
            category_basis(&lines, &[], TaxCategory::StandardRate, Some(dec!(19))),
            Some(dec!(100))
        );
        assert_eq!(
            category_basis(&lines, &[], TaxCategory::StandardRate, Some(dec!(7))),
            Some(dec!(40))
        );
    }

    #[test]
    fn fraction_digits_ignores_trailing_zeros() {
        assert_eq!(fraction_digits(dec!(1.500)), 1);
        assert_eq!(fraction_digits(dec!(1.005)), 3);
        assert_eq!(fraction_digits(dec!(100)), 0);
    }
}

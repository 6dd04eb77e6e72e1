//! Phase 4: VAT category rules.
//!
//! Each category family (BR-S, BR-AE, BR-E, BR-Z, BR-G, BR-IC, BR-IG, BR-IP,
//! BR-O) follows the same numbering: 01 breakdown cardinality, 02-04 party
//! tax identifiers for lines, allowances and charges, 05-07 rates for the
//! same, 08 taxable amount, 09 tax amount, 10 exemption reason. A family
//! only runs when a line or document allowance/charge uses its category.

use rust_decimal::Decimal;

use super::{Report, show};
use crate::core::{Invoice, TaxCategory, TradeTax, category_basis, round2, tax_amount};

/// Which tax identifiers a category requires (or forbids) on the parties.
#[derive(Clone, Copy)]
enum PartyIds {
    /// Seller VAT id, seller tax registration or tax representative VAT id.
    SellerAny,
    /// Seller VAT id or tax representative VAT id.
    SellerVat,
    /// `SellerAny`, and buyer VAT id or buyer legal registration.
    SellerAnyAndBuyer,
    /// `SellerVat`, and buyer VAT id.
    SellerVatAndBuyerVat,
    /// `SellerAny`, and no buyer VAT id.
    SellerAnyNoBuyerVat,
    /// No seller, tax representative or buyer VAT id.
    NoVatIds,
}

#[derive(Clone, Copy)]
enum RateRule {
    Positive,
    Zero,
    NonNegative,
    Absent,
}

struct Family {
    category: TaxCategory,
    codes: [&'static str; 10],
    single_breakdown: bool,
    party_ids: PartyIds,
    rate: RateRule,
}

macro_rules! codes {
    ($p:literal) => {
        [
            concat!($p, "-01"),
            concat!($p, "-02"),
            concat!($p, "-03"),
            concat!($p, "-04"),
            concat!($p, "-05"),
            concat!($p, "-06"),
            concat!($p, "-07"),
            concat!($p, "-08"),
            concat!($p, "-09"),
            concat!($p, "-10"),
        ]
    };
}

static FAMILIES: [Family; 9] = [
    Family {
        category: TaxCategory::StandardRate,
        codes: codes!("BR-S"),
        single_breakdown: false,
        party_ids: PartyIds::SellerAny,
        rate: RateRule::Positive,
    },
    Family {
        category: TaxCategory::ReverseCharge,
        codes: codes!("BR-AE"),
        single_breakdown: true,
        party_ids: PartyIds::SellerAnyAndBuyer,
        rate: RateRule::Zero,
    },
    Family {
        category: TaxCategory::Exempt,
        codes: codes!("BR-E"),
        single_breakdown: true,
        party_ids: PartyIds::SellerAny,
        rate: RateRule::Zero,
    },
    Family {
        category: TaxCategory::ZeroRated,
        codes: codes!("BR-Z"),
        single_breakdown: true,
        party_ids: PartyIds::SellerAny,
        rate: RateRule::Zero,
    },
    Family {
        category: TaxCategory::Export,
        codes: codes!("BR-G"),
        single_breakdown: true,
        party_ids: PartyIds::SellerVat,
        rate: RateRule::Zero,
    },
    Family {
        category: TaxCategory::IntraCommunitySupply,
        codes: codes!("BR-IC"),
        single_breakdown: true,
        party_ids: PartyIds::SellerVatAndBuyerVat,
        rate: RateRule::Zero,
    },
    Family {
        category: TaxCategory::CanaryIslands,
        codes: codes!("BR-IG"),
        single_breakdown: false,
        party_ids: PartyIds::SellerAnyNoBuyerVat,
        rate: RateRule::NonNegative,
    },
    Family {
        category: TaxCategory::CeutaMelilla,
        codes: codes!("BR-IP"),
        single_breakdown: false,
        party_ids: PartyIds::SellerAnyNoBuyerVat,
        rate: RateRule::NonNegative,
    },
    Family {
        category: TaxCategory::NotSubjectToVat,
        codes: codes!("BR-O"),
        single_breakdown: true,
        party_ids: PartyIds::NoVatIds,
        rate: RateRule::Absent,
    },
];

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn party_ids_ok(invoice: &Invoice, rule: PartyIds) -> bool {
    let seller_vat = filled(&invoice.seller.vat_id);
    let rep_vat = invoice
        .tax_representative
        .as_ref()
        .is_some_and(|p| filled(&p.vat_id));
    let seller_fc = filled(&invoice.seller.tax_registration);
    let buyer_vat = filled(&invoice.buyer.vat_id);
    let buyer_legal = invoice
        .buyer
        .legal_registration
        .as_ref()
        .is_some_and(|id| !id.value.trim().is_empty());

    match rule {
        PartyIds::SellerAny => seller_vat || seller_fc || rep_vat,
        PartyIds::SellerVat => seller_vat || rep_vat,
        PartyIds::SellerAnyAndBuyer => (seller_vat || seller_fc || rep_vat) && (buyer_vat || buyer_legal),
        PartyIds::SellerVatAndBuyerVat => (seller_vat || rep_vat) && buyer_vat,
        PartyIds::SellerAnyNoBuyerVat => (seller_vat || seller_fc || rep_vat) && !buyer_vat,
        PartyIds::NoVatIds => !seller_vat && !rep_vat && !buyer_vat,
    }
}

fn party_ids_text(rule: PartyIds) -> &'static str {
    match rule {
        PartyIds::SellerAny => {
            "requires a seller VAT identifier, seller tax registration or tax representative VAT identifier"
        }
        PartyIds::SellerVat => "requires a seller or tax representative VAT identifier",
        PartyIds::SellerAnyAndBuyer => {
            "requires a seller tax identifier and a buyer VAT identifier or legal registration identifier"
        }
        PartyIds::SellerVatAndBuyerVat => {
            "requires a seller or tax representative VAT identifier and a buyer VAT identifier"
        }
        PartyIds::SellerAnyNoBuyerVat => {
            "requires a seller tax identifier and must not carry a buyer VAT identifier"
        }
        PartyIds::NoVatIds => {
            "must not carry seller, tax representative or buyer VAT identifiers"
        }
    }
}

/// `None` if the rate satisfies the rule, otherwise a description of the problem.
fn rate_problem(rule: RateRule, rate: Option<Decimal>) -> Option<String> {
    match (rule, rate) {
        (RateRule::Absent, None) => None,
        (RateRule::Absent, Some(r)) => Some(format!("has VAT rate {} but must have none", show(r))),
        (_, None) => Some("has no VAT rate".to_string()),
        (RateRule::Positive, Some(r)) if r <= Decimal::ZERO => {
            Some(format!("has VAT rate {} but must be greater than zero", show(r)))
        }
        (RateRule::Zero, Some(r)) if !r.is_zero() => {
            Some(format!("has VAT rate {} but must be zero", show(r)))
        }
        (RateRule::NonNegative, Some(r)) if r < Decimal::ZERO => {
            Some(format!("has VAT rate {} but must not be negative", show(r)))
        }
        _ => None,
    }
}

fn uses_category(invoice: &Invoice, category: TaxCategory) -> bool {
    invoice.lines.iter().any(|l| l.tax_category == Some(category))
        || invoice
            .allowance_charges
            .iter()
            .any(|ac| ac.tax_category == Some(category))
}

pub(super) fn check(invoice: &Invoice, report: &mut Report) {
    for family in &FAMILIES {
        if uses_category(invoice, family.category) {
            check_family(invoice, family, report);
        }
    }
}

fn check_family(invoice: &Invoice, family: &Family, report: &mut Report) {
    let category = family.category;
    let name = category.name();
    let [c01, c02, c03, c04, c05, c06, c07, c08, c09, c10] = family.codes;
    let rows: Vec<&TradeTax> = invoice
        .trade_taxes
        .iter()
        .filter(|t| t.category == Some(category))
        .collect();

    // 01
    if rows.is_empty() {
        report.add(c01, format!("No VAT breakdown for category {}", category.code()));
    } else if family.single_breakdown && rows.len() > 1 {
        report.add(
            c01,
            format!("{} VAT breakdowns for category {}, exactly one allowed", rows.len(), category.code()),
        );
    }

    // 02-04
    if !party_ids_ok(invoice, family.party_ids) {
        let text = party_ids_text(family.party_ids);
        if invoice.lines.iter().any(|l| l.tax_category == Some(category)) {
            report.add(c02, format!("{name} invoice line {text}"));
        }
        if invoice.allowances().any(|ac| ac.tax_category == Some(category)) {
            report.add(c03, format!("{name} document allowance {text}"));
        }
        if invoice.charges().any(|ac| ac.tax_category == Some(category)) {
            report.add(c04, format!("{name} document charge {text}"));
        }
    }

    // 05-07
    for line in invoice.lines.iter().filter(|l| l.tax_category == Some(category)) {
        if let Some(problem) = rate_problem(family.rate, line.tax_rate) {
            report.add(c05, format!("{name} line {} {problem}", line.id));
        }
    }
    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        if ac.tax_category != Some(category) {
            continue;
        }
        if let Some(problem) = rate_problem(family.rate, ac.tax_rate) {
            if ac.is_charge {
                report.add(c07, format!("{name} document charge {} {problem}", n + 1));
            } else {
                report.add(c06, format!("{name} document allowance {} {problem}", n + 1));
            }
        }
    }

    // 08-10
    for row in &rows {
        let rate = row.rate.map(show).unwrap_or_default();
        match category_basis(&invoice.lines, &invoice.allowance_charges, category, row.rate) {
            Some(expected) if round2(row.basis_amount) == expected => {}
            Some(expected) => report.add(
                c08,
                format!(
                    "{name} {rate}: taxable amount {} does not match {} from lines and allowances",
                    show(row.basis_amount),
                    show(expected)
                ),
            ),
            None => report.add(
                c08,
                format!("{name} {rate}: sum of lines and allowances exceeds the decimal range"),
            ),
        }

        let expected_tax = if category.is_taxed() {
            tax_amount(row.basis_amount, row.rate)
        } else {
            Some(Decimal::ZERO)
        };
        match expected_tax {
            Some(expected) if row.calculated_amount == expected => {}
            Some(expected) => report.add(
                c09,
                format!(
                    "{name} {rate}: tax amount {} should be {}",
                    show(row.calculated_amount),
                    show(expected)
                ),
            ),
            None => report.add(
                c09,
                format!("{name} {rate}: taxable amount × rate exceeds the decimal range"),
            ),
        }

        let has_reason = filled(&row.exemption_reason) || filled(&row.exemption_reason_code);
        if category.requires_exemption_reason() && !has_reason {
            report.add(c10, format!("{name} VAT breakdown without exemption reason"));
        } else if !category.requires_exemption_reason() && has_reason {
            report.add(c10, format!("{name} VAT breakdown must not have an exemption reason"));
        }
    }

    match category {
        TaxCategory::IntraCommunitySupply if !rows.is_empty() => {
            if invoice.delivery_date.is_none()
                && invoice.billing_period.is_none_or(|p| p.is_empty())
            {
                report.add(
                    "BR-IC-11",
                    "Intra-community supply without actual delivery date or invoicing period",
                );
            }
            let ship_country = invoice
                .ship_to
                .as_ref()
                .and_then(|p| p.address.as_ref())
                .map(|a| a.country_code.trim())
                .unwrap_or_default();
            if ship_country.is_empty() {
                report.add("BR-IC-12", "Intra-community supply without deliver-to country code");
            }
        }
        TaxCategory::NotSubjectToVat if !rows.is_empty() => not_subject_exclusive(invoice, report),
        _ => {}
    }
}

/// BR-O-11..14: an O breakdown excludes every other category.
fn not_subject_exclusive(invoice: &Invoice, report: &mut Report) {
    let o = Some(TaxCategory::NotSubjectToVat);
    if invoice.trade_taxes.iter().any(|t| t.category != o) {
        report.add("BR-O-11", "Not subject to VAT breakdown combined with other VAT categories");
    }
    for line in invoice.lines.iter().filter(|l| l.tax_category != o) {
        report.add(
            "BR-O-12",
            format!("Line {} is not 'Not subject to VAT' in an O invoice", line.id),
        );
    }
    if invoice.allowances().any(|ac| ac.tax_category != o) {
        report.add("BR-O-13", "Document allowance with another category in an O invoice");
    }
    if invoice.charges().any(|ac| ac.tax_category != o) {
        report.add("BR-O-14", "Document charge with another category in an O invoice");
    }
}

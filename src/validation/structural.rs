//! Phase 1: presence, cardinality and decimal-place rules.

use rust_decimal::Decimal;

use super::{Report, breakdown_rules_apply, line_rules_apply, show};
use crate::core::{
    AllowanceCharge, Invoice, InvoiceLine, Party, TaxCategory, category_basis, fraction_digits,
};

pub(super) fn check(invoice: &Invoice, report: &mut Report) {
    document(invoice, report);
    parties(invoice, report);
    totals_presence(invoice, report);
    if line_rules_apply(invoice) {
        if invoice.lines.is_empty() {
            // BR-16
            report.add("BR-16", "Invoice has no lines");
        }
        for line in &invoice.lines {
            line_structure(line, report);
        }
    }
    periods(invoice, report);
    document_allowance_charges(invoice, report);
    category_codes(invoice, report);
    if breakdown_rules_apply(invoice) {
        breakdown(invoice, report);
    }
    payment(invoice, report);
    references(invoice, report);
    decimals(invoice, report);
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn blank_opt(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(blank)
}

fn document(invoice: &Invoice, report: &mut Report) {
    if blank(&invoice.specification_id) {
        report.add("BR-01", "Missing specification identifier");
    }
    if blank(&invoice.number) {
        report.add("BR-02", "Missing invoice number");
    }
    if invoice.issue_date.is_none() {
        report.add("BR-03", "Missing invoice issue date");
    }
    if invoice.type_code.is_none() {
        report.add("BR-04", "Missing invoice type code");
    }
    if blank(&invoice.currency_code) {
        report.add("BR-05", "Missing invoice currency code");
    }
}

fn missing_country(party: &Party) -> bool {
    party.address.as_ref().is_some_and(|a| blank(&a.country_code))
}

fn parties(invoice: &Invoice, report: &mut Report) {
    let seller = &invoice.seller;
    if blank(&seller.name) {
        report.add("BR-06", "Missing seller name");
    }
    if blank(&invoice.buyer.name) {
        report.add("BR-07", "Missing buyer name");
    }
    if seller.address.is_none() {
        report.add("BR-08", "Missing seller postal address");
    } else if missing_country(seller) {
        report.add("BR-09", "Seller postal address missing country code");
    }
    if invoice.buyer.address.is_none() {
        report.add("BR-10", "Missing buyer postal address");
    } else if missing_country(&invoice.buyer) {
        report.add("BR-11", "Buyer postal address missing country code");
    }

    if let Some(payee) = &invoice.payee {
        if blank(&payee.name) {
            report.add("BR-17", "Payee given without a name");
        }
    }

    if let Some(rep) = &invoice.tax_representative {
        if blank(&rep.name) {
            report.add("BR-18", "Tax representative given without a name");
        }
        if rep.address.is_none() {
            report.add("BR-19", "Tax representative given without a postal address");
        } else if missing_country(rep) {
            report.add("BR-20", "Tax representative postal address missing country code");
        }
        if blank_opt(&rep.vat_id) {
            report.add("BR-56", "Tax representative given without a VAT identifier");
        }
    }

    if let Some(ship_to) = &invoice.ship_to {
        if missing_country(ship_to) {
            report.add("BR-57", "Deliver-to address missing country code");
        }
    }

    for (party, code, role) in [
        (seller, "BR-62", "Seller"),
        (&invoice.buyer, "BR-63", "Buyer"),
    ] {
        if let Some(address) = &party.electronic_address {
            if blank_opt(&address.scheme) {
                report.add(
                    code,
                    format!("{role} electronic address {:?} has no scheme identifier", address.value),
                );
            }
        }
    }
}

fn totals_presence(invoice: &Invoice, report: &mut Report) {
    let presence = &invoice.presence;
    if breakdown_rules_apply(invoice) && !presence.line_total {
        report.add("BR-12", "Missing sum of invoice line net amounts");
    }
    if !presence.tax_basis_total {
        report.add("BR-13", "Missing invoice total amount without VAT");
    }
    if !presence.grand_total {
        report.add("BR-14", "Missing invoice total amount with VAT");
    }
    if !presence.due_payable {
        report.add("BR-15", "Missing amount due for payment");
    }
}

fn line_structure(line: &InvoiceLine, report: &mut Report) {
    let id = &line.id;
    if blank(id) {
        report.add("BR-21", "Invoice line without identifier");
    }
    if line.quantity.is_zero() && blank(&line.unit) {
        report.add("BR-22", format!("Line {id}: missing invoiced quantity"));
    }
    if blank(&line.unit) {
        report.add("BR-23", format!("Line {id}: missing unit of measure"));
    }
    if !line.line_total_present {
        report.add("BR-24", format!("Line {id}: missing line net amount"));
    }
    if blank(&line.item_name) {
        report.add("BR-25", format!("Line {id}: missing item name"));
    }
    if !line.net_price_present {
        report.add("BR-26", format!("Line {id}: missing item net price"));
    }
    if line.net_price < Decimal::ZERO {
        report.add(
            "BR-27",
            format!("Line {id}: item net price {} is negative", show(line.net_price)),
        );
    }
    if let Some(gross) = line.gross_price {
        if gross < Decimal::ZERO {
            report.add(
                "BR-28",
                format!("Line {id}: item gross price {} is negative", show(gross)),
            );
        }
    }
    for ac in &line.allowance_charges {
        if !ac.amount_present {
            if ac.is_charge {
                report.add("BR-43", format!("Line {id}: charge without amount"));
            } else {
                report.add("BR-41", format!("Line {id}: allowance without amount"));
            }
        }
        if blank_opt(&ac.reason) && blank_opt(&ac.reason_code) {
            if ac.is_charge {
                report.add("BR-44", format!("Line {id}: charge without reason or reason code"));
            } else {
                report.add("BR-42", format!("Line {id}: allowance without reason or reason code"));
            }
        }
    }
    for attribute in &line.attributes {
        if blank(&attribute.name) || blank(&attribute.value) {
            report.add(
                "BR-54",
                format!("Line {id}: item attribute without name or value"),
            );
        }
    }
    if let Some(standard) = &line.standard_item_id {
        if blank_opt(&standard.scheme) {
            report.add(
                "BR-64",
                format!("Line {id}: standard item identifier {:?} has no scheme", standard.value),
            );
        }
    }
    for class in &line.classifications {
        if blank_opt(&class.list_id) {
            report.add(
                "BR-65",
                format!("Line {id}: classification {:?} has no scheme", class.code),
            );
        }
    }
}

fn periods(invoice: &Invoice, report: &mut Report) {
    if let Some(period) = &invoice.billing_period {
        if let (Some(start), Some(end)) = (period.start, period.end) {
            if end < start {
                report.add(
                    "BR-29",
                    format!("Invoicing period ends {end} before it starts {start}"),
                );
            }
        }
    }
    if !line_rules_apply(invoice) {
        return;
    }
    for line in &invoice.lines {
        if let Some(period) = &line.billing_period {
            if let (Some(start), Some(end)) = (period.start, period.end) {
                if end < start {
                    report.add(
                        "BR-30",
                        format!("Line {}: period ends {end} before it starts {start}", line.id),
                    );
                }
            }
        }
    }
}

fn document_allowance_charges(invoice: &Invoice, report: &mut Report) {
    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        let n = n + 1;
        let missing_reason = blank_opt(&ac.reason) && blank_opt(&ac.reason_code);
        if ac.is_charge {
            if !ac.amount_present {
                report.add("BR-36", format!("Document charge {n}: missing amount"));
            }
            if ac.category_code().is_none() {
                report.add("BR-37", format!("Document charge {n}: missing VAT category code"));
            }
            if missing_reason {
                report.add("BR-38", format!("Document charge {n}: missing reason and reason code"));
            }
        } else {
            if !ac.amount_present {
                report.add("BR-31", format!("Document allowance {n}: missing amount"));
            }
            if ac.category_code().is_none() {
                report.add("BR-32", format!("Document allowance {n}: missing VAT category code"));
            }
            if missing_reason {
                report.add("BR-33", format!("Document allowance {n}: missing reason and reason code"));
            }
        }
    }
}

fn unknown_category(what: &str, code: &str, report: &mut Report) {
    report.add(
        "BR-CL-18",
        format!("{what}: VAT category code {code:?} is not in UNTDID 5305"),
    );
}

fn category_codes(invoice: &Invoice, report: &mut Report) {
    for line in &invoice.lines {
        if let Some(code) = &line.unknown_category {
            unknown_category(&format!("Line {}", line.id), code, report);
        }
    }
    for (n, ac) in invoice.allowance_charges.iter().enumerate() {
        if let Some(code) = &ac.unknown_category {
            let what = if ac.is_charge { "Document charge" } else { "Document allowance" };
            unknown_category(&format!("{what} {}", n + 1), code, report);
        }
    }
    for tax in &invoice.trade_taxes {
        if let Some(code) = &tax.unknown_category {
            unknown_category("VAT breakdown", code, report);
        }
    }
}

fn breakdown(invoice: &Invoice, report: &mut Report) {
    for tax in &invoice.trade_taxes {
        let label = tax.category_code().unwrap_or("?");
        match tax.category {
            Some(category) => {
                let expected = category_basis(
                    &invoice.lines,
                    &invoice.allowance_charges,
                    category,
                    tax.rate,
                );
                if !tax.basis_amount_present {
                    report.add(
                        "BR-45",
                        format!("VAT breakdown {label}: missing taxable amount"),
                    );
                } else if line_rules_apply(invoice) {
                    match expected {
                        Some(expected) if expected == tax.basis_amount => {}
                        Some(expected) => report.add(
                            "BR-45",
                            format!(
                                "VAT breakdown {label} {}: taxable amount {} does not match {} from lines and allowances",
                                tax.rate.map(show).unwrap_or_default(),
                                show(tax.basis_amount),
                                show(expected)
                            ),
                        ),
                        None => report.add(
                            "BR-45",
                            format!(
                                "VAT breakdown {label} {}: lines and allowances exceed the decimal range",
                                tax.rate.map(show).unwrap_or_default()
                            ),
                        ),
                    }
                }
            }
            None => {
                if !tax.basis_amount_present {
                    report.add("BR-45", "VAT breakdown: missing taxable amount");
                }
                if tax.unknown_category.is_none() {
                    report.add("BR-47", "VAT breakdown without category code");
                }
            }
        }
        if !tax.calculated_amount_present {
            report.add("BR-46", format!("VAT breakdown {label}: missing tax amount"));
        }
        if tax.rate.is_none() && tax.category != Some(TaxCategory::NotSubjectToVat) {
            report.add("BR-48", format!("VAT breakdown {label}: missing VAT rate"));
        }
    }
}

fn payment(invoice: &Invoice, report: &mut Report) {
    let mut cards = 0;
    let mut mandates = 0;
    for means in &invoice.payment_means {
        match means.type_code {
            None => report.add("BR-49", "Payment instruction without payment means type code"),
            Some(code) if code.is_credit_transfer() => {
                if means.payee_account.as_ref().is_none_or(|a| blank(&a.iban)) {
                    report.add(
                        "BR-61",
                        format!("Payment means {}: credit transfer without payment account", code.code()),
                    );
                }
            }
            Some(_) => {}
        }
        if let Some(account) = &means.payee_account {
            if blank(&account.iban) {
                report.add("BR-50", "Credit transfer without payment account identifier");
            }
        }
        if means.card.is_some() {
            cards += 1;
        }
        if means.debited_account.is_some() {
            mandates += 1;
        }
    }
    if cards > 1 {
        report.add("BR-66", format!("Invoice has {cards} payment cards"));
    }
    if mandates > 1 {
        report.add("BR-67", format!("Invoice has {mandates} payment mandates"));
    }
    if invoice.tax_currency_code.as_deref().is_some_and(|c| !blank(c))
        && invoice.totals.tax_total_accounting.is_none()
    {
        report.add(
            "BR-53",
            "VAT accounting currency given without total VAT amount in accounting currency",
        );
    }
}

fn references(invoice: &Invoice, report: &mut Report) {
    for doc in &invoice.supporting_documents {
        if blank(&doc.id) {
            report.add("BR-52", "Supporting document without reference");
        }
    }
    for preceding in &invoice.preceding_invoices {
        if blank(&preceding.number) {
            report.add("BR-55", "Preceding invoice reference without number");
        }
    }
}

fn check_decimals(value: Decimal, code: &'static str, what: &str, report: &mut Report) {
    if fraction_digits(value) > 2 {
        report.add(code, format!("{what} {} has more than 2 decimals", value.normalize()));
    }
}

fn check_ac_decimals(
    ac: &AllowanceCharge,
    codes: [&'static str; 4],
    scope: &str,
    report: &mut Report,
) {
    let (amount, base, kind) = if ac.is_charge {
        (codes[2], codes[3], "charge")
    } else {
        (codes[0], codes[1], "allowance")
    };
    check_decimals(ac.actual_amount, amount, &format!("{scope} {kind} amount"), report);
    if let Some(basis) = ac.basis_amount {
        check_decimals(basis, base, &format!("{scope} {kind} base amount"), report);
    }
}

fn decimals(invoice: &Invoice, report: &mut Report) {
    for ac in &invoice.allowance_charges {
        check_ac_decimals(ac, ["BR-DEC-01", "BR-DEC-02", "BR-DEC-05", "BR-DEC-06"], "Document", report);
    }
    let t = &invoice.totals;
    check_decimals(t.line_total, "BR-DEC-09", "Sum of line net amounts", report);
    check_decimals(t.allowance_total, "BR-DEC-10", "Sum of allowances", report);
    check_decimals(t.charge_total, "BR-DEC-11", "Sum of charges", report);
    check_decimals(t.tax_basis_total, "BR-DEC-12", "Total without VAT", report);
    check_decimals(t.tax_total, "BR-DEC-13", "Total VAT amount", report);
    check_decimals(t.grand_total, "BR-DEC-14", "Total with VAT", report);
    if let Some(accounting) = t.tax_total_accounting {
        check_decimals(accounting, "BR-DEC-15", "Total VAT amount in accounting currency", report);
    }
    check_decimals(t.prepaid, "BR-DEC-16", "Paid amount", report);
    check_decimals(t.rounding, "BR-DEC-17", "Rounding amount", report);
    check_decimals(t.due_payable, "BR-DEC-18", "Amount due for payment", report);
    for tax in &invoice.trade_taxes {
        check_decimals(tax.basis_amount, "BR-DEC-19", "VAT category taxable amount", report);
        check_decimals(tax.calculated_amount, "BR-DEC-20", "VAT category tax amount", report);
    }
    if !line_rules_apply(invoice) {
        return;
    }
    for line in &invoice.lines {
        check_decimals(
            line.line_total,
            "BR-DEC-23",
            &format!("Line {} net amount", line.id),
            report,
        );
        for ac in &line.allowance_charges {
            check_ac_decimals(
                ac,
                ["BR-DEC-24", "BR-DEC-25", "BR-DEC-27", "BR-DEC-28"],
                &format!("Line {}", line.id),
                report,
            );
        }
    }
}

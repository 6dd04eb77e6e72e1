use chrono::NaiveDate;
use tracing::{debug, warn};

use super::super::tree::Element;
use super::super::{decimal_at, decimal_of, decode_base64, indicator, ns, parse_date, text_opt};
use super::{
    CREDITOR_SCHEME, NOT_APPLICABLE, TENDER_REFERENCE_TYPE, VAT_SCHEME, decode_note,
    tax_point_code_from_ubl,
};
use crate::core::*;

fn date(ctx: &Element, path: &str) -> Result<Option<NaiveDate>, InvoiceError> {
    match ctx.text_at(path).filter(|t| !t.is_empty()) {
        Some(text) => parse_date(text, "%Y-%m-%d", path).map(Some),
        None => Ok(None),
    }
}

fn identifier(el: &Element) -> Identifier {
    Identifier {
        value: el.text().to_string(),
        scheme: el.attr("schemeID").map(str::to_string),
    }
}

/// Known category, or the unrecognised code kept verbatim.
fn tax_category(el: &Element) -> (Option<TaxCategory>, Option<String>) {
    let code = match el.text_at("cbc:ID") {
        Some(code) if !code.trim().is_empty() => code.trim(),
        _ => return (None, None),
    };
    match TaxCategory::from_code(code) {
        Some(category) => (Some(category), None),
        None => {
            warn!(code, "unknown VAT category code");
            (None, Some(code.to_string()))
        }
    }
}

fn address(el: &Element) -> Address {
    Address {
        line1: text_opt(el, "cbc:StreetName"),
        line2: text_opt(el, "cbc:AdditionalStreetName"),
        line3: text_opt(el, "cac:AddressLine/cbc:Line"),
        city: text_opt(el, "cbc:CityName"),
        postcode: text_opt(el, "cbc:PostalZone"),
        subdivision: text_opt(el, "cbc:CountrySubentity"),
        country_code: el
            .text_at("cac:Country/cbc:IdentificationCode")
            .unwrap_or_default()
            .to_string(),
    }
}

/// A party of UBL `PartyType`. For seller and buyer the registration name
/// is the party name and `cac:PartyName` the trading name.
fn party(el: &Element, legal_name: bool) -> Party {
    let registration = if legal_name {
        text_opt(el, "cac:PartyLegalEntity/cbc:RegistrationName")
    } else {
        None
    };
    let party_name = text_opt(el, "cac:PartyName/cbc:Name");
    let (name, trading_name) = match registration {
        Some(registration) => (registration, party_name),
        None => (party_name.unwrap_or_default(), None),
    };

    let mut party = Party {
        name,
        trading_name,
        identifiers: el
            .select_all("cac:PartyIdentification/cbc:ID")
            .into_iter()
            .map(identifier)
            .collect(),
        legal_registration: el.select("cac:PartyLegalEntity/cbc:CompanyID").map(identifier),
        legal_info: text_opt(el, "cac:PartyLegalEntity/cbc:CompanyLegalForm"),
        address: el.select("cac:PostalAddress").map(address),
        contacts: el
            .children_named("cac:Contact")
            .map(|c| Contact {
                name: text_opt(c, "cbc:Name"),
                phone: text_opt(c, "cbc:Telephone"),
                email: text_opt(c, "cbc:ElectronicMail"),
            })
            .collect(),
        electronic_address: el.select("cbc:EndpointID").map(|e| ElectronicAddress {
            value: e.text().to_string(),
            scheme: e.attr("schemeID").map(str::to_string),
        }),
        ..Default::default()
    };
    for scheme in el.children_named("cac:PartyTaxScheme") {
        let value = text_opt(scheme, "cbc:CompanyID");
        match scheme.text_at("cac:TaxScheme/cbc:ID") {
            Some(VAT_SCHEME) => party.vat_id = value,
            _ => party.tax_registration = value,
        }
    }
    party
}

fn allowance_charge(el: &Element) -> Result<AllowanceCharge, InvoiceError> {
    let tax = el.select("cac:TaxCategory");
    let amount = decimal_at(el, "cbc:Amount")?;
    let (tax_category, unknown_category) = tax.map(tax_category).unwrap_or_default();
    Ok(AllowanceCharge {
        is_charge: el.text_at("cbc:ChargeIndicator").is_some_and(indicator),
        actual_amount: amount.unwrap_or_default(),
        amount_present: amount.is_some(),
        basis_amount: decimal_at(el, "cbc:BaseAmount")?,
        percent: decimal_at(el, "cbc:MultiplierFactorNumeric")?,
        reason: text_opt(el, "cbc:AllowanceChargeReason"),
        reason_code: text_opt(el, "cbc:AllowanceChargeReasonCode"),
        tax_category,
        unknown_category,
        tax_rate: match tax {
            Some(tax) => decimal_at(tax, "cbc:Percent")?,
            None => None,
        },
    })
}

fn period(el: &Element) -> Result<Period, InvoiceError> {
    Ok(Period {
        start: date(el, "cbc:StartDate")?,
        end: date(el, "cbc:EndDate")?,
    })
}

fn line(el: &Element, quantity: &str) -> Result<InvoiceLine, InvoiceError> {
    let mut line = InvoiceLine {
        id: el.text_at("cbc:ID").unwrap_or_default().to_string(),
        note: text_opt(el, "cbc:Note"),
        accounting_reference: text_opt(el, "cbc:AccountingCost"),
        order_line_reference: text_opt(el, "cac:OrderLineReference/cbc:LineID"),
        ..Default::default()
    };

    if let Some(qty) = el.select(quantity) {
        line.quantity = decimal_of(qty)?;
        line.unit = qty.attr("unitCode").unwrap_or_default().to_string();
    }
    if let Some(total) = el.select("cbc:LineExtensionAmount") {
        line.line_total = decimal_of(total)?;
        line.line_total_present = true;
    }
    if let Some(p) = el.select("cac:InvoicePeriod") {
        line.billing_period = Some(period(p)?);
    }
    for ac in el.children_named("cac:AllowanceCharge") {
        line.allowance_charges.push(allowance_charge(ac)?);
    }

    if let Some(item) = el.select("cac:Item") {
        line.description = text_opt(item, "cbc:Description");
        line.item_name = item.text_at("cbc:Name").unwrap_or_default().to_string();
        line.buyer_item_id = text_opt(item, "cac:BuyersItemIdentification/cbc:ID");
        line.seller_item_id = text_opt(item, "cac:SellersItemIdentification/cbc:ID");
        line.standard_item_id = item
            .select("cac:StandardItemIdentification/cbc:ID")
            .map(identifier);
        line.origin_country = text_opt(item, "cac:OriginCountry/cbc:IdentificationCode");
        line.classifications = item
            .select_all("cac:CommodityClassification/cbc:ItemClassificationCode")
            .into_iter()
            .map(|c| Classification {
                code: c.text().to_string(),
                list_id: c.attr("listID").map(str::to_string),
                list_version: c.attr("listVersionID").map(str::to_string),
            })
            .collect();
        if let Some(tax) = item.select("cac:ClassifiedTaxCategory") {
            (line.tax_category, line.unknown_category) = tax_category(tax);
            line.tax_rate = decimal_at(tax, "cbc:Percent")?;
        }
        line.attributes = item
            .children_named("cac:AdditionalItemProperty")
            .map(|p| ItemAttribute {
                name: p.text_at("cbc:Name").unwrap_or_default().to_string(),
                value: p.text_at("cbc:Value").unwrap_or_default().to_string(),
            })
            .collect();
    }

    if let Some(price) = el.select("cac:Price") {
        if let Some(amount) = price.select("cbc:PriceAmount") {
            line.net_price = decimal_of(amount)?;
            line.net_price_present = true;
        }
        if let Some(base) = price.select("cbc:BaseQuantity") {
            line.base_quantity = Some(decimal_of(base)?);
            line.base_quantity_unit = base.attr("unitCode").map(str::to_string);
        }
        if let Some(ac) = price.select("cac:AllowanceCharge") {
            line.gross_price = decimal_at(ac, "cbc:BaseAmount")?;
            let discount = decimal_at(ac, "cbc:Amount")?.unwrap_or_default();
            if !discount.is_zero() {
                line.price_allowance_charges.push(AllowanceCharge {
                    actual_amount: discount,
                    amount_present: true,
                    ..Default::default()
                });
            }
        }
    }
    Ok(line)
}

fn supporting_document(el: &Element) -> Result<SupportingDocument, InvoiceError> {
    let attachment = match el.select("cac:Attachment/cbc:EmbeddedDocumentBinaryObject") {
        Some(bin) => Some(Attachment {
            mime_code: bin.attr("mimeCode").unwrap_or_default().to_string(),
            filename: bin.attr("filename").unwrap_or_default().to_string(),
            content: decode_base64(bin.text(), "cbc:EmbeddedDocumentBinaryObject")?,
        }),
        None => None,
    };
    Ok(SupportingDocument {
        id: el.text_at("cbc:ID").unwrap_or_default().to_string(),
        type_code: text_opt(el, "cbc:DocumentTypeCode"),
        description: text_opt(el, "cbc:DocumentDescription"),
        uri: text_opt(el, "cac:Attachment/cac:ExternalReference/cbc:URI"),
        attachment,
    })
}

fn references(root: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    inv.sales_order_reference = text_opt(root, "cac:OrderReference/cbc:SalesOrderID");
    inv.order_reference = text_opt(root, "cac:OrderReference/cbc:ID")
        .filter(|id| inv.sales_order_reference.is_none() || id != NOT_APPLICABLE);

    for billing in root.select_all("cac:BillingReference/cac:InvoiceDocumentReference") {
        inv.preceding_invoices.push(PrecedingInvoice {
            number: billing.text_at("cbc:ID").unwrap_or_default().to_string(),
            issue_date: date(billing, "cbc:IssueDate")?,
        });
    }
    inv.despatch_advice_reference = text_opt(root, "cac:DespatchDocumentReference/cbc:ID");
    inv.receiving_advice_reference = text_opt(root, "cac:ReceiptDocumentReference/cbc:ID");
    inv.contract_reference = text_opt(root, "cac:ContractDocumentReference/cbc:ID");

    for tender in root.children_named("cac:OriginatorDocumentReference") {
        inv.supporting_documents.push(SupportingDocument {
            id: tender.text_at("cbc:ID").unwrap_or_default().to_string(),
            type_code: Some(TENDER_REFERENCE_TYPE.to_string()),
            ..Default::default()
        });
    }
    for doc in root.children_named("cac:AdditionalDocumentReference") {
        inv.supporting_documents.push(supporting_document(doc)?);
    }
    inv.project = text_opt(root, "cac:ProjectReference/cbc:ID").map(|id| ProjectReference {
        id,
        name: None,
    });
    Ok(())
}

fn parties(root: &Element, inv: &mut Invoice) {
    if let Some(seller) = root.select("cac:AccountingSupplierParty/cac:Party") {
        let mut seller = party(seller, true);
        if let Some(at) = seller
            .identifiers
            .iter()
            .position(|id| id.scheme.as_deref() == Some(CREDITOR_SCHEME))
        {
            inv.creditor_reference = Some(seller.identifiers.remove(at).value);
        }
        inv.seller = seller;
    }
    if let Some(buyer) = root.select("cac:AccountingCustomerParty/cac:Party") {
        inv.buyer = party(buyer, true);
    }
    inv.payee = root.select("cac:PayeeParty").map(|p| party(p, false));
    inv.tax_representative = root
        .select("cac:TaxRepresentativeParty")
        .map(|p| party(p, false));
}

fn delivery(root: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    let Some(delivery) = root.select("cac:Delivery") else {
        return Ok(());
    };
    inv.delivery_date = date(delivery, "cbc:ActualDeliveryDate")?;
    let location = delivery.select("cac:DeliveryLocation");
    let name = text_opt(delivery, "cac:DeliveryParty/cac:PartyName/cbc:Name");
    if location.is_some() || name.is_some() {
        inv.ship_to = Some(Party {
            name: name.unwrap_or_default(),
            identifiers: location
                .and_then(|l| l.select("cbc:ID"))
                .map(identifier)
                .into_iter()
                .collect(),
            address: location.and_then(|l| l.select("cac:Address")).map(address),
            ..Default::default()
        });
    }
    Ok(())
}

/// Payment means, the mandate and the credit note due date.
fn payment_means(root: &Element, inv: &mut Invoice) -> Result<Option<NaiveDate>, InvoiceError> {
    let mut due_date = None;
    for el in root.children_named("cac:PaymentMeans") {
        let code = el.select("cbc:PaymentMeansCode");
        let type_code = code.and_then(|c| match c.text().parse() {
            Ok(n) => Some(PaymentMeansCode::from_code(n)),
            Err(_) => {
                warn!(code = c.text(), "non-numeric payment means code");
                None
            }
        });
        if due_date.is_none() {
            due_date = date(el, "cbc:PaymentDueDate")?;
        }
        if inv.payment_reference.is_none() {
            inv.payment_reference = text_opt(el, "cbc:PaymentID");
        }
        if inv.mandate_reference.is_none() {
            inv.mandate_reference = text_opt(el, "cac:PaymentMandate/cbc:ID");
        }
        inv.payment_means.push(PaymentMeans {
            type_code,
            information: code
                .and_then(|c| c.attr("name"))
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            payee_account: el.select("cac:PayeeFinancialAccount").map(|acc| CreditTransfer {
                iban: acc.text_at("cbc:ID").unwrap_or_default().to_string(),
                account_name: text_opt(acc, "cbc:Name"),
                bic: text_opt(acc, "cac:FinancialInstitutionBranch/cbc:ID"),
            }),
            card: el.select("cac:CardAccount").map(|card| PaymentCard {
                account_number: card
                    .text_at("cbc:PrimaryAccountNumberID")
                    .unwrap_or_default()
                    .to_string(),
                holder_name: text_opt(card, "cbc:HolderName"),
            }),
            debited_account: text_opt(el, "cac:PaymentMandate/cac:PayerFinancialAccount/cbc:ID"),
        });
    }
    Ok(due_date)
}

fn trade_tax(el: &Element) -> Result<TradeTax, InvoiceError> {
    let basis = decimal_at(el, "cbc:TaxableAmount")?;
    let calculated = decimal_at(el, "cbc:TaxAmount")?;
    let category = el.select("cac:TaxCategory");
    let (tax_category, unknown_category) = category.map(tax_category).unwrap_or_default();
    Ok(TradeTax {
        category: tax_category,
        unknown_category,
        rate: match category {
            Some(c) => decimal_at(c, "cbc:Percent")?,
            None => None,
        },
        basis_amount: basis.unwrap_or_default(),
        calculated_amount: calculated.unwrap_or_default(),
        basis_amount_present: basis.is_some(),
        calculated_amount_present: calculated.is_some(),
        exemption_reason: category.and_then(|c| text_opt(c, "cbc:TaxExemptionReason")),
        exemption_reason_code: category.and_then(|c| text_opt(c, "cbc:TaxExemptionReasonCode")),
        ..Default::default()
    })
}

fn tax_totals(root: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    for total in root.children_named("cac:TaxTotal") {
        if let Some(amount) = total.select("cbc:TaxAmount") {
            let value = decimal_of(amount)?;
            let currency = amount
                .attr("currencyID")
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(inv.currency_code.as_str());
            let mut matched = false;
            if currency == inv.currency_code {
                inv.totals.tax_total = value;
                matched = true;
            }
            if inv.tax_currency_code.as_deref() == Some(currency) {
                inv.totals.tax_total_accounting = Some(value);
                matched = true;
            }
            if !matched {
                warn!(currency, "tax total in unexpected currency");
                inv.unexpected_tax_currencies.push(currency.to_string());
            }
        }
        for subtotal in total.children_named("cac:TaxSubtotal") {
            inv.trade_taxes.push(trade_tax(subtotal)?);
        }
    }
    Ok(())
}

fn monetary_total(el: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    let totals = &mut inv.totals;
    let presence = &mut inv.presence;
    if let Some(v) = decimal_at(el, "cbc:LineExtensionAmount")? {
        totals.line_total = v;
        presence.line_total = true;
    }
    if let Some(v) = decimal_at(el, "cbc:TaxExclusiveAmount")? {
        totals.tax_basis_total = v;
        presence.tax_basis_total = true;
    }
    if let Some(v) = decimal_at(el, "cbc:TaxInclusiveAmount")? {
        totals.grand_total = v;
        presence.grand_total = true;
    }
    totals.allowance_total = decimal_at(el, "cbc:AllowanceTotalAmount")?.unwrap_or_default();
    totals.charge_total = decimal_at(el, "cbc:ChargeTotalAmount")?.unwrap_or_default();
    totals.prepaid = decimal_at(el, "cbc:PrepaidAmount")?.unwrap_or_default();
    totals.rounding = decimal_at(el, "cbc:PayableRoundingAmount")?.unwrap_or_default();
    if let Some(v) = decimal_at(el, "cbc:PayableAmount")? {
        totals.due_payable = v;
        presence.due_payable = true;
    }
    Ok(())
}

/// Map a UBL `Invoice` or `CreditNote` tree onto the model.
pub(crate) fn read(root: &Element) -> Result<Invoice, InvoiceError> {
    let credit_note = root.ns == ns::UBL_CREDIT_NOTE;
    let (type_element, line_element, quantity) = if credit_note {
        ("cbc:CreditNoteTypeCode", "cac:CreditNoteLine", "cbc:CreditedQuantity")
    } else {
        ("cbc:InvoiceTypeCode", "cac:InvoiceLine", "cbc:InvoicedQuantity")
    };

    let mut inv = Invoice {
        schema_type: SchemaType::Ubl,
        specification_id: root.text_at("cbc:CustomizationID").unwrap_or_default().to_string(),
        business_process: text_opt(root, "cbc:ProfileID"),
        number: root.text_at("cbc:ID").unwrap_or_default().to_string(),
        issue_date: date(root, "cbc:IssueDate")?,
        currency_code: root
            .text_at("cbc:DocumentCurrencyCode")
            .unwrap_or_default()
            .to_string(),
        tax_currency_code: text_opt(root, "cbc:TaxCurrencyCode"),
        buyer_reference: text_opt(root, "cbc:BuyerReference"),
        ..Default::default()
    };

    inv.type_code = match root.text_at(type_element) {
        Some(code) => match code.parse() {
            Ok(code) => Some(InvoiceTypeCode::from_code(code)),
            Err(_) => {
                warn!(code, "non-numeric document type code");
                None
            }
        },
        None if credit_note => Some(InvoiceTypeCode::CreditNote),
        None => None,
    };

    inv.notes = root
        .children_named("cbc:Note")
        .map(|n| {
            let (subject_code, text) = decode_note(n.text());
            Note { subject_code, text }
        })
        .collect();

    let tax_point_date = date(root, "cbc:TaxPointDate")?;
    let mut tax_point_code = None;
    if let Some(p) = root.select("cac:InvoicePeriod") {
        tax_point_code = text_opt(p, "cbc:DescriptionCode")
            .map(|code| tax_point_code_from_ubl(&code).to_string());
        let has_dates = p.select("cbc:StartDate").is_some() || p.select("cbc:EndDate").is_some();
        if has_dates || tax_point_code.is_none() {
            inv.billing_period = Some(period(p)?);
        }
    }

    references(root, &mut inv)?;
    parties(root, &mut inv);
    delivery(root, &mut inv)?;
    let means_due_date = payment_means(root, &mut inv)?;

    for terms in root.children_named("cac:PaymentTerms") {
        inv.payment_terms.push(PaymentTerms {
            description: text_opt(terms, "cbc:Note"),
            due_date: None,
        });
    }
    let due_date = if credit_note {
        means_due_date
    } else {
        date(root, "cbc:DueDate")?
    };
    if let Some(due) = due_date {
        match inv.payment_terms.first_mut() {
            Some(first) => first.due_date = Some(due),
            None => inv.payment_terms.push(PaymentTerms {
                description: None,
                due_date: Some(due),
            }),
        }
    }

    for ac in root.children_named("cac:AllowanceCharge") {
        inv.allowance_charges.push(allowance_charge(ac)?);
    }
    tax_totals(root, &mut inv)?;
    for tax in &mut inv.trade_taxes {
        tax.tax_point_date = tax_point_date;
        tax.due_date_type_code = tax_point_code.clone();
    }
    if let Some(total) = root.select("cac:LegalMonetaryTotal") {
        monetary_total(total, &mut inv)?;
    }

    for item in root.children_named(line_element) {
        inv.lines.push(line(item, quantity)?);
    }

    debug!(
        schema = "UBL",
        credit_note,
        invoice = %inv.number,
        lines = inv.lines.len(),
        "read invoice"
    );
    Ok(inv)
}

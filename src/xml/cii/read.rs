use chrono::NaiveDate;
use tracing::{debug, warn};

use super::super::tree::Element;
use super::super::{decimal_at, decimal_of, decode_base64, indicator, parse_date, text_opt};
use super::SUPPORTING_DOCUMENT_TYPE;
use crate::core::*;

/// `udt:DateTimeString` / `qdt:DateTimeString` / `udt:DateString` below
/// `ctx/path`, in format 102 (`YYYYMMDD`).
fn date(ctx: &Element, path: &str) -> Result<Option<NaiveDate>, InvoiceError> {
    let Some(el) = ctx.select(path) else {
        return Ok(None);
    };
    let Some(value) = el.children.first() else {
        return Ok(None);
    };
    let format = match value.attr("format").map(str::trim) {
        None | Some("102") => "%Y%m%d",
        Some(other) => {
            return Err(InvoiceError::InvalidDate {
                element: path.to_string(),
                value: format!("{} (format {other})", value.text()),
            });
        }
    };
    parse_date(value.text(), format, path).map(Some)
}

fn period(ctx: &Element, path: &str) -> Result<Option<Period>, InvoiceError> {
    match ctx.select(path) {
        Some(p) => Ok(Some(Period {
            start: date(p, "ram:StartDateTime")?,
            end: date(p, "ram:EndDateTime")?,
        })),
        None => Ok(None),
    }
}

/// Known category, or the unrecognised code kept verbatim.
fn category(el: &Element) -> (Option<TaxCategory>, Option<String>) {
    let code = match el.text_at("ram:CategoryCode") {
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

fn identifier(el: &Element) -> Identifier {
    Identifier {
        value: el.text().to_string(),
        scheme: el.attr("schemeID").map(str::to_string),
    }
}

fn address(el: &Element) -> Address {
    Address {
        line1: text_opt(el, "ram:LineOne"),
        line2: text_opt(el, "ram:LineTwo"),
        line3: text_opt(el, "ram:LineThree"),
        city: text_opt(el, "ram:CityName"),
        postcode: text_opt(el, "ram:PostcodeCode"),
        subdivision: text_opt(el, "ram:CountrySubDivisionName"),
        country_code: el.text_at("ram:CountryID").unwrap_or_default().to_string(),
    }
}

fn party(el: &Element) -> Party {
    let mut party = Party {
        name: el.text_at("ram:Name").unwrap_or_default().to_string(),
        legal_info: text_opt(el, "ram:Description"),
        address: el.select("ram:PostalTradeAddress").map(address),
        ..Default::default()
    };
    party.identifiers = el
        .children_named("ram:ID")
        .chain(el.children_named("ram:GlobalID"))
        .map(identifier)
        .collect();
    if let Some(legal) = el.select("ram:SpecifiedLegalOrganization") {
        party.legal_registration = legal.select("ram:ID").map(identifier);
        party.trading_name = text_opt(legal, "ram:TradingBusinessName");
    }
    party.contacts = el
        .children_named("ram:DefinedTradeContact")
        .map(|c| Contact {
            name: text_opt(c, "ram:PersonName"),
            phone: text_opt(c, "ram:TelephoneUniversalCommunication/ram:CompleteNumber"),
            email: text_opt(c, "ram:EmailURIUniversalCommunication/ram:URIID"),
        })
        .collect();
    party.electronic_address = el
        .select("ram:URIUniversalCommunication/ram:URIID")
        .map(|uri| ElectronicAddress {
            value: uri.text().to_string(),
            scheme: uri.attr("schemeID").map(str::to_string),
        });
    for reg in el.select_all("ram:SpecifiedTaxRegistration/ram:ID") {
        let value = Some(reg.text().to_string());
        match reg.attr("schemeID").map(str::trim) {
            Some("FC") => party.tax_registration = value,
            _ => party.vat_id = value,
        }
    }
    party
}

fn allowance_charge(el: &Element) -> Result<AllowanceCharge, InvoiceError> {
    let tax = el.select("ram:CategoryTradeTax");
    let amount = decimal_at(el, "ram:ActualAmount")?;
    let (tax_category, unknown_category) = tax.map(category).unwrap_or_default();
    Ok(AllowanceCharge {
        is_charge: el
            .text_at("ram:ChargeIndicator/udt:Indicator")
            .is_some_and(indicator),
        actual_amount: amount.unwrap_or_default(),
        amount_present: amount.is_some(),
        basis_amount: decimal_at(el, "ram:BasisAmount")?,
        percent: decimal_at(el, "ram:CalculationPercent")?,
        reason: text_opt(el, "ram:Reason"),
        reason_code: text_opt(el, "ram:ReasonCode"),
        tax_category,
        unknown_category,
        tax_rate: match tax {
            Some(tax) => decimal_at(tax, "ram:RateApplicablePercent")?,
            None => None,
        },
    })
}

fn line(el: &Element) -> Result<InvoiceLine, InvoiceError> {
    let mut line = InvoiceLine::default();

    if let Some(doc) = el.select("ram:AssociatedDocumentLineDocument") {
        line.id = doc.text_at("ram:LineID").unwrap_or_default().to_string();
        line.note = text_opt(doc, "ram:IncludedNote/ram:Content");
    }

    if let Some(product) = el.select("ram:SpecifiedTradeProduct") {
        line.standard_item_id = product.select("ram:GlobalID").map(identifier);
        line.seller_item_id = text_opt(product, "ram:SellerAssignedID");
        line.buyer_item_id = text_opt(product, "ram:BuyerAssignedID");
        line.item_name = product.text_at("ram:Name").unwrap_or_default().to_string();
        line.description = text_opt(product, "ram:Description");
        line.attributes = product
            .children_named("ram:ApplicableProductCharacteristic")
            .map(|c| ItemAttribute {
                name: c.text_at("ram:Description").unwrap_or_default().to_string(),
                value: c.text_at("ram:Value").unwrap_or_default().to_string(),
            })
            .collect();
        line.classifications = product
            .select_all("ram:DesignatedProductClassification/ram:ClassCode")
            .into_iter()
            .map(|c| Classification {
                code: c.text().to_string(),
                list_id: c.attr("listID").map(str::to_string),
                list_version: c.attr("listVersionID").map(str::to_string),
            })
            .collect();
        line.origin_country = text_opt(product, "ram:OriginTradeCountry/ram:ID");
    }

    if let Some(agreement) = el.select("ram:SpecifiedLineTradeAgreement") {
        line.order_line_reference = text_opt(agreement, "ram:BuyerOrderReferencedDocument/ram:LineID");
        if let Some(gross) = agreement.select("ram:GrossPriceProductTradePrice") {
            line.gross_price = decimal_at(gross, "ram:ChargeAmount")?;
            for ac in gross.children_named("ram:AppliedTradeAllowanceCharge") {
                line.price_allowance_charges.push(allowance_charge(ac)?);
            }
        }
        let net = agreement.select("ram:NetPriceProductTradePrice");
        if let Some(price) = net.and_then(|n| n.select("ram:ChargeAmount")) {
            line.net_price = decimal_of(price)?;
            line.net_price_present = true;
        }
        let basis = net
            .and_then(|n| n.select("ram:BasisQuantity"))
            .or_else(|| agreement.select("ram:GrossPriceProductTradePrice/ram:BasisQuantity"));
        if let Some(basis) = basis {
            line.base_quantity = Some(decimal_of(basis)?);
            line.base_quantity_unit = basis.attr("unitCode").map(str::to_string);
        }
    }

    if let Some(qty) = el.select("ram:SpecifiedLineTradeDelivery/ram:BilledQuantity") {
        line.quantity = decimal_of(qty)?;
        line.unit = qty.attr("unitCode").unwrap_or_default().to_string();
    }

    if let Some(settlement) = el.select("ram:SpecifiedLineTradeSettlement") {
        if let Some(tax) = settlement.select("ram:ApplicableTradeTax") {
            (line.tax_category, line.unknown_category) = category(tax);
            line.tax_rate = decimal_at(tax, "ram:RateApplicablePercent")?;
        }
        line.billing_period = period(settlement, "ram:BillingSpecifiedPeriod")?;
        for ac in settlement.children_named("ram:SpecifiedTradeAllowanceCharge") {
            line.allowance_charges.push(allowance_charge(ac)?);
        }
        if let Some(total) =
            settlement.select("ram:SpecifiedTradeSettlementLineMonetarySummation/ram:LineTotalAmount")
        {
            line.line_total = decimal_of(total)?;
            line.line_total_present = true;
        }
        line.accounting_reference =
            text_opt(settlement, "ram:ReceivableSpecifiedTradeAccountingAccount/ram:ID");
    }

    Ok(line)
}

fn agreement(el: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    inv.buyer_reference = text_opt(el, "ram:BuyerReference");
    if let Some(seller) = el.select("ram:SellerTradeParty") {
        inv.seller = party(seller);
    }
    if let Some(buyer) = el.select("ram:BuyerTradeParty") {
        inv.buyer = party(buyer);
    }
    inv.tax_representative = el.select("ram:SellerTaxRepresentativeTradeParty").map(party);
    inv.sales_order_reference = text_opt(el, "ram:SellerOrderReferencedDocument/ram:IssuerAssignedID");
    inv.order_reference = text_opt(el, "ram:BuyerOrderReferencedDocument/ram:IssuerAssignedID");
    inv.contract_reference = text_opt(el, "ram:ContractReferencedDocument/ram:IssuerAssignedID");

    for doc in el.children_named("ram:AdditionalReferencedDocument") {
        let attachment = match doc.select("ram:AttachmentBinaryObject") {
            Some(bin) => Some(Attachment {
                mime_code: bin.attr("mimeCode").unwrap_or_default().to_string(),
                filename: bin.attr("filename").unwrap_or_default().to_string(),
                content: decode_base64(bin.text(), "ram:AttachmentBinaryObject")?,
            }),
            None => None,
        };
        inv.supporting_documents.push(SupportingDocument {
            id: doc.text_at("ram:IssuerAssignedID").unwrap_or_default().to_string(),
            type_code: text_opt(doc, "ram:TypeCode").filter(|c| c.as_str() != SUPPORTING_DOCUMENT_TYPE),
            description: text_opt(doc, "ram:Name"),
            uri: text_opt(doc, "ram:URIID"),
            attachment,
        });
    }

    inv.project = el.select("ram:SpecifiedProcuringProject").map(|p| ProjectReference {
        id: p.text_at("ram:ID").unwrap_or_default().to_string(),
        name: text_opt(p, "ram:Name"),
    });
    Ok(())
}

fn delivery(el: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    inv.ship_to = el.select("ram:ShipToTradeParty").map(party);
    inv.delivery_date = date(
        el,
        "ram:ActualDeliverySupplyChainEvent/ram:OccurrenceDateTime",
    )?;
    inv.despatch_advice_reference =
        text_opt(el, "ram:DespatchAdviceReferencedDocument/ram:IssuerAssignedID");
    inv.receiving_advice_reference =
        text_opt(el, "ram:ReceivingAdviceReferencedDocument/ram:IssuerAssignedID");
    Ok(())
}

fn payment_means(el: &Element) -> PaymentMeans {
    let type_code = el.text_at("ram:TypeCode").and_then(|code| match code.parse() {
        Ok(code) => Some(PaymentMeansCode::from_code(code)),
        Err(_) => {
            warn!(code, "non-numeric payment means code");
            None
        }
    });
    let creditor = el.select("ram:PayeePartyCreditorFinancialAccount");
    PaymentMeans {
        type_code,
        information: text_opt(el, "ram:Information"),
        payee_account: creditor.map(|acc| CreditTransfer {
            iban: text_opt(acc, "ram:IBANID")
                .or_else(|| text_opt(acc, "ram:ProprietaryID"))
                .unwrap_or_default(),
            account_name: text_opt(acc, "ram:AccountName"),
            bic: text_opt(el, "ram:PayeeSpecifiedCreditorFinancialInstitution/ram:BICID"),
        }),
        card: el
            .select("ram:ApplicableTradeSettlementFinancialCard")
            .map(|card| PaymentCard {
                account_number: card.text_at("ram:ID").unwrap_or_default().to_string(),
                holder_name: text_opt(card, "ram:CardholderName"),
            }),
        debited_account: text_opt(el, "ram:PayerPartyDebtorFinancialAccount/ram:IBANID"),
    }
}

fn trade_tax(el: &Element) -> Result<TradeTax, InvoiceError> {
    let basis = decimal_at(el, "ram:BasisAmount")?;
    let calculated = decimal_at(el, "ram:CalculatedAmount")?;
    let (category, unknown_category) = category(el);
    Ok(TradeTax {
        category,
        unknown_category,
        rate: decimal_at(el, "ram:RateApplicablePercent")?,
        basis_amount: basis.unwrap_or_default(),
        calculated_amount: calculated.unwrap_or_default(),
        basis_amount_present: basis.is_some(),
        calculated_amount_present: calculated.is_some(),
        exemption_reason: text_opt(el, "ram:ExemptionReason"),
        exemption_reason_code: text_opt(el, "ram:ExemptionReasonCode"),
        tax_point_date: date(el, "ram:TaxPointDate")?,
        due_date_type_code: text_opt(el, "ram:DueDateTypeCode"),
    })
}

fn summation(el: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    let totals = &mut inv.totals;
    let presence = &mut inv.presence;

    if let Some(v) = decimal_at(el, "ram:LineTotalAmount")? {
        totals.line_total = v;
        presence.line_total = true;
    }
    totals.charge_total = decimal_at(el, "ram:ChargeTotalAmount")?.unwrap_or_default();
    totals.allowance_total = decimal_at(el, "ram:AllowanceTotalAmount")?.unwrap_or_default();
    if let Some(v) = decimal_at(el, "ram:TaxBasisTotalAmount")? {
        totals.tax_basis_total = v;
        presence.tax_basis_total = true;
    }
    for amount in el.children_named("ram:TaxTotalAmount") {
        let value = decimal_of(amount)?;
        let currency = amount
            .attr("currencyID")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(inv.currency_code.as_str());
        let mut matched = false;
        if currency == inv.currency_code {
            totals.tax_total = value;
            matched = true;
        }
        if inv.tax_currency_code.as_deref() == Some(currency) {
            totals.tax_total_accounting = Some(value);
            matched = true;
        }
        if !matched {
            warn!(currency, "tax total in unexpected currency");
            inv.unexpected_tax_currencies.push(currency.to_string());
        }
    }
    totals.rounding = decimal_at(el, "ram:RoundingAmount")?.unwrap_or_default();
    if let Some(v) = decimal_at(el, "ram:GrandTotalAmount")? {
        totals.grand_total = v;
        presence.grand_total = true;
    }
    totals.prepaid = decimal_at(el, "ram:TotalPrepaidAmount")?.unwrap_or_default();
    if let Some(v) = decimal_at(el, "ram:DuePayableAmount")? {
        totals.due_payable = v;
        presence.due_payable = true;
    }
    Ok(())
}

fn settlement(el: &Element, inv: &mut Invoice) -> Result<(), InvoiceError> {
    inv.creditor_reference = text_opt(el, "ram:CreditorReferenceID");
    inv.payment_reference = text_opt(el, "ram:PaymentReference");
    inv.tax_currency_code = text_opt(el, "ram:TaxCurrencyCode");
    inv.currency_code = el.text_at("ram:InvoiceCurrencyCode").unwrap_or_default().to_string();
    inv.payee = el.select("ram:PayeeTradeParty").map(party);

    inv.payment_means = el
        .children_named("ram:SpecifiedTradeSettlementPaymentMeans")
        .map(payment_means)
        .collect();
    for tax in el.children_named("ram:ApplicableTradeTax") {
        inv.trade_taxes.push(trade_tax(tax)?);
    }
    inv.billing_period = period(el, "ram:BillingSpecifiedPeriod")?;
    for ac in el.children_named("ram:SpecifiedTradeAllowanceCharge") {
        inv.allowance_charges.push(allowance_charge(ac)?);
    }

    for terms in el.children_named("ram:SpecifiedTradePaymentTerms") {
        if inv.mandate_reference.is_none() {
            inv.mandate_reference = text_opt(terms, "ram:DirectDebitMandateID");
        }
        let entry = PaymentTerms {
            description: text_opt(terms, "ram:Description"),
            due_date: date(terms, "ram:DueDateDateTime")?,
        };
        if entry.description.is_some() || entry.due_date.is_some() {
            inv.payment_terms.push(entry);
        }
    }

    if let Some(sum) = el.select("ram:SpecifiedTradeSettlementHeaderMonetarySummation") {
        summation(sum, inv)?;
    }

    for doc in el.children_named("ram:InvoiceReferencedDocument") {
        inv.preceding_invoices.push(PrecedingInvoice {
            number: doc.text_at("ram:IssuerAssignedID").unwrap_or_default().to_string(),
            issue_date: date(doc, "ram:FormattedIssueDateTime")?,
        });
    }
    Ok(())
}

/// Map a CII document tree onto the model.
pub(crate) fn read(root: &Element) -> Result<Invoice, InvoiceError> {
    let mut inv = Invoice {
        schema_type: SchemaType::Cii,
        ..Default::default()
    };

    if let Some(ctx) = root.select("rsm:ExchangedDocumentContext") {
        inv.business_process =
            text_opt(ctx, "ram:BusinessProcessSpecifiedDocumentContextParameter/ram:ID");
        inv.specification_id = ctx
            .text_at("ram:GuidelineSpecifiedDocumentContextParameter/ram:ID")
            .unwrap_or_default()
            .to_string();
    }

    if let Some(doc) = root.select("rsm:ExchangedDocument") {
        inv.number = doc.text_at("ram:ID").unwrap_or_default().to_string();
        inv.type_code = doc.text_at("ram:TypeCode").and_then(|code| match code.parse() {
            Ok(code) => Some(InvoiceTypeCode::from_code(code)),
            Err(_) => {
                warn!(code, "non-numeric document type code");
                None
            }
        });
        inv.issue_date = date(doc, "ram:IssueDateTime")?;
        inv.notes = doc
            .children_named("ram:IncludedNote")
            .map(|n| Note {
                subject_code: text_opt(n, "ram:SubjectCode"),
                text: n.text_at("ram:Content").unwrap_or_default().to_string(),
            })
            .collect();
    }

    if let Some(tx) = root.select("rsm:SupplyChainTradeTransaction") {
        for item in tx.children_named("ram:IncludedSupplyChainTradeLineItem") {
            inv.lines.push(line(item)?);
        }
        if let Some(el) = tx.select("ram:ApplicableHeaderTradeAgreement") {
            agreement(el, &mut inv)?;
        }
        if let Some(el) = tx.select("ram:ApplicableHeaderTradeDelivery") {
            delivery(el, &mut inv)?;
        }
        if let Some(el) = tx.select("ram:ApplicableHeaderTradeSettlement") {
            settlement(el, &mut inv)?;
        }
    }

    debug!(
        schema = "CII",
        invoice = %inv.number,
        lines = inv.lines.len(),
        "read invoice"
    );
    Ok(inv)
}

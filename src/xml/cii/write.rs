use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::super::writer::XmlWriter;
use super::super::{encode_base64, ns};
use super::SUPPORTING_DOCUMENT_TYPE;
use crate::core::*;

type WriteResult = Result<(), InvoiceError>;

fn date(w: &mut XmlWriter, element: &str, inner: &str, date: NaiveDate) -> WriteResult {
    w.start(element)?;
    w.text_with_attrs(inner, &date.format("%Y%m%d").to_string(), &[("format", "102")])?;
    w.end(element)?;
    Ok(())
}

fn referenced_document(w: &mut XmlWriter, element: &str, id: Option<&str>) -> WriteResult {
    if let Some(id) = id {
        w.start(element)?;
        w.text("ram:IssuerAssignedID", id)?;
        w.end(element)?;
    }
    Ok(())
}

fn indicator(w: &mut XmlWriter, is_charge: bool) -> WriteResult {
    w.start("ram:ChargeIndicator")?;
    w.text("udt:Indicator", if is_charge { "true" } else { "false" })?;
    w.end("ram:ChargeIndicator")?;
    Ok(())
}

fn period(w: &mut XmlWriter, period: &Period) -> WriteResult {
    w.start("ram:BillingSpecifiedPeriod")?;
    if let Some(start) = period.start {
        date(w, "ram:StartDateTime", "udt:DateTimeString", start)?;
    }
    if let Some(end) = period.end {
        date(w, "ram:EndDateTime", "udt:DateTimeString", end)?;
    }
    w.end("ram:BillingSpecifiedPeriod")?;
    Ok(())
}

fn party(w: &mut XmlWriter, element: &str, party: &Party) -> WriteResult {
    w.start(element)?;
    for id in party.identifiers.iter().filter(|id| id.scheme.is_none()) {
        w.text("ram:ID", &id.value)?;
    }
    for id in party.identifiers.iter().filter(|id| id.scheme.is_some()) {
        w.scheme_text("ram:GlobalID", &id.value, id.scheme.as_deref())?;
    }
    w.text("ram:Name", &party.name)?;
    w.opt_text("ram:Description", party.legal_info.as_deref())?;

    if party.legal_registration.is_some() || party.trading_name.is_some() {
        w.start("ram:SpecifiedLegalOrganization")?;
        if let Some(id) = &party.legal_registration {
            w.scheme_text("ram:ID", &id.value, id.scheme.as_deref())?;
        }
        w.opt_text("ram:TradingBusinessName", party.trading_name.as_deref())?;
        w.end("ram:SpecifiedLegalOrganization")?;
    }

    for contact in &party.contacts {
        w.start("ram:DefinedTradeContact")?;
        w.opt_text("ram:PersonName", contact.name.as_deref())?;
        if let Some(phone) = &contact.phone {
            w.start("ram:TelephoneUniversalCommunication")?;
            w.text("ram:CompleteNumber", phone)?;
            w.end("ram:TelephoneUniversalCommunication")?;
        }
        if let Some(email) = &contact.email {
            w.start("ram:EmailURIUniversalCommunication")?;
            w.text("ram:URIID", email)?;
            w.end("ram:EmailURIUniversalCommunication")?;
        }
        w.end("ram:DefinedTradeContact")?;
    }

    if let Some(address) = &party.address {
        w.start("ram:PostalTradeAddress")?;
        w.opt_text("ram:PostcodeCode", address.postcode.as_deref())?;
        w.opt_text("ram:LineOne", address.line1.as_deref())?;
        w.opt_text("ram:LineTwo", address.line2.as_deref())?;
        w.opt_text("ram:LineThree", address.line3.as_deref())?;
        w.opt_text("ram:CityName", address.city.as_deref())?;
        if !address.country_code.is_empty() {
            w.text("ram:CountryID", &address.country_code)?;
        }
        w.opt_text("ram:CountrySubDivisionName", address.subdivision.as_deref())?;
        w.end("ram:PostalTradeAddress")?;
    }

    if let Some(uri) = &party.electronic_address {
        w.start("ram:URIUniversalCommunication")?;
        w.scheme_text("ram:URIID", &uri.value, uri.scheme.as_deref())?;
        w.end("ram:URIUniversalCommunication")?;
    }

    for (id, scheme) in [(&party.vat_id, "VA"), (&party.tax_registration, "FC")] {
        if let Some(id) = id {
            w.start("ram:SpecifiedTaxRegistration")?;
            w.text_with_attrs("ram:ID", id, &[("schemeID", scheme)])?;
            w.end("ram:SpecifiedTaxRegistration")?;
        }
    }
    w.end(element)?;
    Ok(())
}

fn allowance_charge(
    w: &mut XmlWriter,
    element: &str,
    ac: &AllowanceCharge,
    with_tax: bool,
) -> WriteResult {
    w.start(element)?;
    indicator(w, ac.is_charge)?;
    if let Some(percent) = ac.percent {
        w.percent("ram:CalculationPercent", percent)?;
    }
    if let Some(basis) = ac.basis_amount {
        w.bare_amount("ram:BasisAmount", basis)?;
    }
    w.bare_amount("ram:ActualAmount", ac.actual_amount)?;
    w.opt_text("ram:ReasonCode", ac.reason_code.as_deref())?;
    w.opt_text("ram:Reason", ac.reason.as_deref())?;
    if with_tax && (ac.category_code().is_some() || ac.tax_rate.is_some()) {
        w.start("ram:CategoryTradeTax")?;
        w.text("ram:TypeCode", "VAT")?;
        w.opt_text("ram:CategoryCode", ac.category_code())?;
        if let Some(rate) = ac.tax_rate {
            w.percent("ram:RateApplicablePercent", rate)?;
        }
        w.end("ram:CategoryTradeTax")?;
    }
    w.end(element)?;
    Ok(())
}

fn line(w: &mut XmlWriter, line: &InvoiceLine) -> WriteResult {
    w.start("ram:IncludedSupplyChainTradeLineItem")?;

    w.start("ram:AssociatedDocumentLineDocument")?;
    w.text("ram:LineID", &line.id)?;
    if let Some(note) = &line.note {
        w.start("ram:IncludedNote")?;
        w.text("ram:Content", note)?;
        w.end("ram:IncludedNote")?;
    }
    w.end("ram:AssociatedDocumentLineDocument")?;

    w.start("ram:SpecifiedTradeProduct")?;
    if let Some(id) = &line.standard_item_id {
        w.scheme_text("ram:GlobalID", &id.value, id.scheme.as_deref())?;
    }
    w.opt_text("ram:SellerAssignedID", line.seller_item_id.as_deref())?;
    w.opt_text("ram:BuyerAssignedID", line.buyer_item_id.as_deref())?;
    w.text("ram:Name", &line.item_name)?;
    w.opt_text("ram:Description", line.description.as_deref())?;
    for attr in &line.attributes {
        w.start("ram:ApplicableProductCharacteristic")?;
        w.text("ram:Description", &attr.name)?;
        w.text("ram:Value", &attr.value)?;
        w.end("ram:ApplicableProductCharacteristic")?;
    }
    for class in &line.classifications {
        let mut attrs = Vec::new();
        if let Some(list_id) = &class.list_id {
            attrs.push(("listID", list_id.as_str()));
        }
        if let Some(version) = &class.list_version {
            attrs.push(("listVersionID", version.as_str()));
        }
        w.start("ram:DesignatedProductClassification")?;
        w.text_with_attrs("ram:ClassCode", &class.code, &attrs)?;
        w.end("ram:DesignatedProductClassification")?;
    }
    if let Some(country) = &line.origin_country {
        w.start("ram:OriginTradeCountry")?;
        w.text("ram:ID", country)?;
        w.end("ram:OriginTradeCountry")?;
    }
    w.end("ram:SpecifiedTradeProduct")?;

    w.start("ram:SpecifiedLineTradeAgreement")?;
    if let Some(reference) = &line.order_line_reference {
        w.start("ram:BuyerOrderReferencedDocument")?;
        w.text("ram:LineID", reference)?;
        w.end("ram:BuyerOrderReferencedDocument")?;
    }
    if let Some(gross) = line.gross_price {
        w.start("ram:GrossPriceProductTradePrice")?;
        w.bare_amount("ram:ChargeAmount", gross)?;
        for ac in &line.price_allowance_charges {
            allowance_charge(w, "ram:AppliedTradeAllowanceCharge", ac, false)?;
        }
        w.end("ram:GrossPriceProductTradePrice")?;
    }
    w.start("ram:NetPriceProductTradePrice")?;
    w.bare_amount("ram:ChargeAmount", line.net_price)?;
    if let Some(base) = line.base_quantity {
        w.quantity(
            "ram:BasisQuantity",
            base,
            line.base_quantity_unit.as_deref().unwrap_or_default(),
        )?;
    }
    w.end("ram:NetPriceProductTradePrice")?;
    w.end("ram:SpecifiedLineTradeAgreement")?;

    w.start("ram:SpecifiedLineTradeDelivery")?;
    w.quantity("ram:BilledQuantity", line.quantity, &line.unit)?;
    w.end("ram:SpecifiedLineTradeDelivery")?;

    w.start("ram:SpecifiedLineTradeSettlement")?;
    w.start("ram:ApplicableTradeTax")?;
    w.text("ram:TypeCode", "VAT")?;
    w.opt_text("ram:CategoryCode", line.category_code())?;
    if let Some(rate) = line.tax_rate {
        w.percent("ram:RateApplicablePercent", rate)?;
    }
    w.end("ram:ApplicableTradeTax")?;
    if let Some(p) = &line.billing_period {
        period(w, p)?;
    }
    for ac in &line.allowance_charges {
        allowance_charge(w, "ram:SpecifiedTradeAllowanceCharge", ac, false)?;
    }
    w.start("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
    w.bare_amount("ram:LineTotalAmount", line.line_total)?;
    w.end("ram:SpecifiedTradeSettlementLineMonetarySummation")?;
    if let Some(account) = &line.accounting_reference {
        w.start("ram:ReceivableSpecifiedTradeAccountingAccount")?;
        w.text("ram:ID", account)?;
        w.end("ram:ReceivableSpecifiedTradeAccountingAccount")?;
    }
    w.end("ram:SpecifiedLineTradeSettlement")?;

    w.end("ram:IncludedSupplyChainTradeLineItem")?;
    Ok(())
}

fn agreement(w: &mut XmlWriter, inv: &Invoice) -> WriteResult {
    w.start("ram:ApplicableHeaderTradeAgreement")?;
    w.opt_text("ram:BuyerReference", inv.buyer_reference.as_deref())?;
    party(w, "ram:SellerTradeParty", &inv.seller)?;
    party(w, "ram:BuyerTradeParty", &inv.buyer)?;
    if let Some(rep) = &inv.tax_representative {
        party(w, "ram:SellerTaxRepresentativeTradeParty", rep)?;
    }
    referenced_document(w, "ram:SellerOrderReferencedDocument", inv.sales_order_reference.as_deref())?;
    referenced_document(w, "ram:BuyerOrderReferencedDocument", inv.order_reference.as_deref())?;
    referenced_document(w, "ram:ContractReferencedDocument", inv.contract_reference.as_deref())?;

    for doc in &inv.supporting_documents {
        w.start("ram:AdditionalReferencedDocument")?;
        w.text("ram:IssuerAssignedID", &doc.id)?;
        w.opt_text("ram:URIID", doc.uri.as_deref())?;
        w.text(
            "ram:TypeCode",
            doc.type_code.as_deref().unwrap_or(SUPPORTING_DOCUMENT_TYPE),
        )?;
        w.opt_text("ram:Name", doc.description.as_deref())?;
        if let Some(att) = &doc.attachment {
            w.text_with_attrs(
                "ram:AttachmentBinaryObject",
                &encode_base64(&att.content),
                &[("mimeCode", att.mime_code.as_str()), ("filename", att.filename.as_str())],
            )?;
        }
        w.end("ram:AdditionalReferencedDocument")?;
    }

    if let Some(project) = &inv.project {
        w.start("ram:SpecifiedProcuringProject")?;
        w.text("ram:ID", &project.id)?;
        w.opt_text("ram:Name", project.name.as_deref())?;
        w.end("ram:SpecifiedProcuringProject")?;
    }
    w.end("ram:ApplicableHeaderTradeAgreement")?;
    Ok(())
}

fn delivery(w: &mut XmlWriter, inv: &Invoice) -> WriteResult {
    w.start("ram:ApplicableHeaderTradeDelivery")?;
    if let Some(ship_to) = &inv.ship_to {
        party(w, "ram:ShipToTradeParty", ship_to)?;
    }
    if let Some(d) = inv.delivery_date {
        w.start("ram:ActualDeliverySupplyChainEvent")?;
        date(w, "ram:OccurrenceDateTime", "udt:DateTimeString", d)?;
        w.end("ram:ActualDeliverySupplyChainEvent")?;
    }
    referenced_document(w, "ram:DespatchAdviceReferencedDocument", inv.despatch_advice_reference.as_deref())?;
    referenced_document(w, "ram:ReceivingAdviceReferencedDocument", inv.receiving_advice_reference.as_deref())?;
    w.end("ram:ApplicableHeaderTradeDelivery")?;
    Ok(())
}

fn payment_means(w: &mut XmlWriter, pm: &PaymentMeans) -> WriteResult {
    w.start("ram:SpecifiedTradeSettlementPaymentMeans")?;
    if let Some(code) = pm.type_code {
        w.text("ram:TypeCode", &code.code().to_string())?;
    }
    w.opt_text("ram:Information", pm.information.as_deref())?;
    if let Some(card) = &pm.card {
        w.start("ram:ApplicableTradeSettlementFinancialCard")?;
        w.text("ram:ID", &card.account_number)?;
        w.opt_text("ram:CardholderName", card.holder_name.as_deref())?;
        w.end("ram:ApplicableTradeSettlementFinancialCard")?;
    }
    if let Some(debited) = &pm.debited_account {
        w.start("ram:PayerPartyDebtorFinancialAccount")?;
        w.text("ram:IBANID", debited)?;
        w.end("ram:PayerPartyDebtorFinancialAccount")?;
    }
    if let Some(account) = &pm.payee_account {
        w.start("ram:PayeePartyCreditorFinancialAccount")?;
        w.text("ram:IBANID", &account.iban)?;
        w.opt_text("ram:AccountName", account.account_name.as_deref())?;
        w.end("ram:PayeePartyCreditorFinancialAccount")?;
        if let Some(bic) = &account.bic {
            w.start("ram:PayeeSpecifiedCreditorFinancialInstitution")?;
            w.text("ram:BICID", bic)?;
            w.end("ram:PayeeSpecifiedCreditorFinancialInstitution")?;
        }
    }
    w.end("ram:SpecifiedTradeSettlementPaymentMeans")?;
    Ok(())
}

fn trade_tax(w: &mut XmlWriter, tax: &TradeTax) -> WriteResult {
    w.start("ram:ApplicableTradeTax")?;
    w.bare_amount("ram:CalculatedAmount", tax.calculated_amount)?;
    w.text("ram:TypeCode", "VAT")?;
    w.opt_text("ram:ExemptionReason", tax.exemption_reason.as_deref())?;
    w.bare_amount("ram:BasisAmount", tax.basis_amount)?;
    w.opt_text("ram:CategoryCode", tax.category_code())?;
    w.opt_text("ram:ExemptionReasonCode", tax.exemption_reason_code.as_deref())?;
    if let Some(d) = tax.tax_point_date {
        date(w, "ram:TaxPointDate", "udt:DateString", d)?;
    }
    w.opt_text("ram:DueDateTypeCode", tax.due_date_type_code.as_deref())?;
    if let Some(rate) = tax.rate {
        w.percent("ram:RateApplicablePercent", rate)?;
    }
    w.end("ram:ApplicableTradeTax")?;
    Ok(())
}

fn optional_amount(w: &mut XmlWriter, element: &str, amount: Decimal) -> WriteResult {
    if !amount.is_zero() {
        w.bare_amount(element, amount)?;
    }
    Ok(())
}

fn summation(w: &mut XmlWriter, inv: &Invoice) -> WriteResult {
    let t = &inv.totals;
    w.start("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
    w.bare_amount("ram:LineTotalAmount", t.line_total)?;
    optional_amount(w, "ram:ChargeTotalAmount", t.charge_total)?;
    optional_amount(w, "ram:AllowanceTotalAmount", t.allowance_total)?;
    w.bare_amount("ram:TaxBasisTotalAmount", t.tax_basis_total)?;
    w.amount("ram:TaxTotalAmount", t.tax_total, &inv.currency_code)?;
    if let (Some(currency), Some(amount)) = (&inv.tax_currency_code, t.tax_total_accounting) {
        if *currency != inv.currency_code {
            w.amount("ram:TaxTotalAmount", amount, currency)?;
        }
    }
    optional_amount(w, "ram:RoundingAmount", t.rounding)?;
    w.bare_amount("ram:GrandTotalAmount", t.grand_total)?;
    optional_amount(w, "ram:TotalPrepaidAmount", t.prepaid)?;
    w.bare_amount("ram:DuePayableAmount", t.due_payable)?;
    w.end("ram:SpecifiedTradeSettlementHeaderMonetarySummation")?;
    Ok(())
}

fn settlement(w: &mut XmlWriter, inv: &Invoice) -> WriteResult {
    w.start("ram:ApplicableHeaderTradeSettlement")?;
    w.opt_text("ram:CreditorReferenceID", inv.creditor_reference.as_deref())?;
    w.opt_text("ram:PaymentReference", inv.payment_reference.as_deref())?;
    w.opt_text("ram:TaxCurrencyCode", inv.tax_currency_code.as_deref())?;
    w.text("ram:InvoiceCurrencyCode", &inv.currency_code)?;
    if let Some(payee) = &inv.payee {
        party(w, "ram:PayeeTradeParty", payee)?;
    }
    for pm in &inv.payment_means {
        payment_means(w, pm)?;
    }
    for tax in &inv.trade_taxes {
        trade_tax(w, tax)?;
    }
    if let Some(p) = &inv.billing_period {
        period(w, p)?;
    }
    for ac in &inv.allowance_charges {
        allowance_charge(w, "ram:SpecifiedTradeAllowanceCharge", ac, true)?;
    }

    let mut mandate = inv.mandate_reference.as_deref();
    for terms in &inv.payment_terms {
        w.start("ram:SpecifiedTradePaymentTerms")?;
        w.opt_text("ram:Description", terms.description.as_deref())?;
        if let Some(d) = terms.due_date {
            date(w, "ram:DueDateDateTime", "udt:DateTimeString", d)?;
        }
        w.opt_text("ram:DirectDebitMandateID", mandate.take())?;
        w.end("ram:SpecifiedTradePaymentTerms")?;
    }
    if let Some(mandate) = mandate {
        w.start("ram:SpecifiedTradePaymentTerms")?;
        w.text("ram:DirectDebitMandateID", mandate)?;
        w.end("ram:SpecifiedTradePaymentTerms")?;
    }

    summation(w, inv)?;

    for preceding in &inv.preceding_invoices {
        w.start("ram:InvoiceReferencedDocument")?;
        w.text("ram:IssuerAssignedID", &preceding.number)?;
        if let Some(d) = preceding.issue_date {
            date(w, "ram:FormattedIssueDateTime", "qdt:DateTimeString", d)?;
        }
        w.end("ram:InvoiceReferencedDocument")?;
    }
    w.end("ram:ApplicableHeaderTradeSettlement")?;
    Ok(())
}

/// Serialize `inv` as a CII `rsm:CrossIndustryInvoice`.
pub(crate) fn write(inv: &Invoice) -> Result<Vec<u8>, InvoiceError> {
    let mut w = XmlWriter::new()?;
    w.start_with_attrs(
        "rsm:CrossIndustryInvoice",
        &[
            ("xmlns:rsm", ns::RSM),
            ("xmlns:ram", ns::RAM),
            ("xmlns:qdt", ns::QDT),
            ("xmlns:udt", ns::UDT),
            ("xmlns:xs", ns::XS),
        ],
    )?;

    w.start("rsm:ExchangedDocumentContext")?;
    if let Some(process) = &inv.business_process {
        w.start("ram:BusinessProcessSpecifiedDocumentContextParameter")?;
        w.text("ram:ID", process)?;
        w.end("ram:BusinessProcessSpecifiedDocumentContextParameter")?;
    }
    w.start("ram:GuidelineSpecifiedDocumentContextParameter")?;
    w.text("ram:ID", &inv.specification_id)?;
    w.end("ram:GuidelineSpecifiedDocumentContextParameter")?;
    w.end("rsm:ExchangedDocumentContext")?;

    w.start("rsm:ExchangedDocument")?;
    w.text("ram:ID", &inv.number)?;
    if let Some(code) = inv.type_code {
        w.text("ram:TypeCode", &code.code().to_string())?;
    }
    if let Some(d) = inv.issue_date {
        date(&mut w, "ram:IssueDateTime", "udt:DateTimeString", d)?;
    }
    for note in &inv.notes {
        w.start("ram:IncludedNote")?;
        w.text("ram:Content", &note.text)?;
        w.opt_text("ram:SubjectCode", note.subject_code.as_deref())?;
        w.end("ram:IncludedNote")?;
    }
    w.end("rsm:ExchangedDocument")?;

    w.start("rsm:SupplyChainTradeTransaction")?;
    for l in &inv.lines {
        line(&mut w, l)?;
    }
    agreement(&mut w, inv)?;
    delivery(&mut w, inv)?;
    settlement(&mut w, inv)?;
    w.end("rsm:SupplyChainTradeTransaction")?;
    w.end("rsm:CrossIndustryInvoice")?;

    let bytes = w.into_bytes();
    debug!(schema = "CII", invoice = %inv.number, bytes = bytes.len(), "wrote invoice");
    Ok(bytes)
}

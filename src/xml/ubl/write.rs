use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::super::writer::XmlWriter;
use super::super::{encode_base64, ns};
use super::{
    CREDITOR_SCHEME, LOCAL_TAX_SCHEME, NOT_APPLICABLE, TENDER_REFERENCE_TYPE, VAT_SCHEME,
    encode_note, tax_point_code_to_ubl,
};
use crate::core::*;

type WriteResult = Result<(), InvoiceError>;

/// A type 50 document with nothing but an id fits `cac:OriginatorDocumentReference`;
/// anything richer stays an additional document reference.
fn is_tender_reference(doc: &SupportingDocument) -> bool {
    doc.type_code.as_deref() == Some(TENDER_REFERENCE_TYPE)
        && doc.description.is_none()
        && doc.uri.is_none()
        && doc.attachment.is_none()
}

/// Serialization state: the output plus the facts that differ between an
/// `Invoice` and a `CreditNote` document.
struct Doc<'a> {
    w: XmlWriter,
    inv: &'a Invoice,
    credit_note: bool,
}

impl Doc<'_> {
    fn amount(&mut self, name: &str, amount: Decimal) -> WriteResult {
        self.w.amount(name, amount, &self.inv.currency_code)?;
        Ok(())
    }

    fn optional_amount(&mut self, name: &str, amount: Decimal) -> WriteResult {
        if !amount.is_zero() {
            self.amount(name, amount)?;
        }
        Ok(())
    }

    fn opt_date(&mut self, name: &str, date: Option<NaiveDate>) -> WriteResult {
        if let Some(date) = date {
            self.w.iso_date(name, date)?;
        }
        Ok(())
    }

    fn tax_scheme(&mut self, scheme: &str) -> WriteResult {
        self.w.start("cac:TaxScheme")?;
        self.w.text("cbc:ID", scheme)?;
        self.w.end("cac:TaxScheme")?;
        Ok(())
    }

    fn tax_category(
        &mut self,
        element: &str,
        category: Option<&str>,
        rate: Option<Decimal>,
        exemption: Option<&TradeTax>,
    ) -> WriteResult {
        self.w.start(element)?;
        self.w.opt_text("cbc:ID", category)?;
        if let Some(rate) = rate {
            self.w.percent("cbc:Percent", rate)?;
        }
        if let Some(tax) = exemption {
            self.w.opt_text("cbc:TaxExemptionReasonCode", tax.exemption_reason_code.as_deref())?;
            self.w.opt_text("cbc:TaxExemptionReason", tax.exemption_reason.as_deref())?;
        }
        self.tax_scheme(VAT_SCHEME)?;
        self.w.end(element)?;
        Ok(())
    }

    fn period(&mut self, period: Option<&Period>, code: Option<&str>) -> WriteResult {
        self.w.start("cac:InvoicePeriod")?;
        if let Some(period) = period {
            self.opt_date("cbc:StartDate", period.start)?;
            self.opt_date("cbc:EndDate", period.end)?;
        }
        self.w.opt_text("cbc:DescriptionCode", code)?;
        self.w.end("cac:InvoicePeriod")?;
        Ok(())
    }

    fn address(&mut self, element: &str, address: &Address) -> WriteResult {
        self.w.start(element)?;
        self.w.opt_text("cbc:StreetName", address.line1.as_deref())?;
        self.w.opt_text("cbc:AdditionalStreetName", address.line2.as_deref())?;
        self.w.opt_text("cbc:CityName", address.city.as_deref())?;
        self.w.opt_text("cbc:PostalZone", address.postcode.as_deref())?;
        self.w.opt_text("cbc:CountrySubentity", address.subdivision.as_deref())?;
        if let Some(line) = &address.line3 {
            self.w.start("cac:AddressLine")?;
            self.w.text("cbc:Line", line)?;
            self.w.end("cac:AddressLine")?;
        }
        if !address.country_code.is_empty() {
            self.w.start("cac:Country")?;
            self.w.text("cbc:IdentificationCode", &address.country_code)?;
            self.w.end("cac:Country")?;
        }
        self.w.end(element)?;
        Ok(())
    }

    /// A party of UBL `PartyType`. Seller and buyer carry their name as the
    /// legal registration name and the trading name in `cac:PartyName`; the
    /// other roles only have `cac:PartyName`.
    fn party(
        &mut self,
        element: &str,
        party: &Party,
        legal_name: bool,
        creditor: Option<&str>,
    ) -> WriteResult {
        let w = &mut self.w;
        w.start(element)?;
        if let Some(endpoint) = &party.electronic_address {
            w.scheme_text("cbc:EndpointID", &endpoint.value, endpoint.scheme.as_deref())?;
        }
        for id in &party.identifiers {
            w.start("cac:PartyIdentification")?;
            w.scheme_text("cbc:ID", &id.value, id.scheme.as_deref())?;
            w.end("cac:PartyIdentification")?;
        }
        if let Some(creditor) = creditor {
            w.start("cac:PartyIdentification")?;
            w.scheme_text("cbc:ID", creditor, Some(CREDITOR_SCHEME))?;
            w.end("cac:PartyIdentification")?;
        }
        let party_name = if legal_name {
            party.trading_name.as_deref()
        } else {
            Some(party.name.as_str())
        };
        if let Some(name) = party_name {
            w.start("cac:PartyName")?;
            w.text("cbc:Name", name)?;
            w.end("cac:PartyName")?;
        }
        if let Some(address) = &party.address {
            self.address("cac:PostalAddress", address)?;
        }
        for (id, scheme) in [(&party.vat_id, VAT_SCHEME), (&party.tax_registration, LOCAL_TAX_SCHEME)] {
            if let Some(id) = id {
                self.w.start("cac:PartyTaxScheme")?;
                self.w.text("cbc:CompanyID", id)?;
                self.tax_scheme(scheme)?;
                self.w.end("cac:PartyTaxScheme")?;
            }
        }
        let w = &mut self.w;
        if legal_name || party.legal_registration.is_some() || party.legal_info.is_some() {
            w.start("cac:PartyLegalEntity")?;
            if legal_name {
                w.text("cbc:RegistrationName", &party.name)?;
            }
            if let Some(id) = &party.legal_registration {
                w.scheme_text("cbc:CompanyID", &id.value, id.scheme.as_deref())?;
            }
            w.opt_text("cbc:CompanyLegalForm", party.legal_info.as_deref())?;
            w.end("cac:PartyLegalEntity")?;
        }
        if let Some(contact) = party.contacts.first() {
            if party.contacts.len() > 1 {
                warn!(count = party.contacts.len(), "UBL carries one contact per party");
            }
            w.start("cac:Contact")?;
            w.opt_text("cbc:Name", contact.name.as_deref())?;
            w.opt_text("cbc:Telephone", contact.phone.as_deref())?;
            w.opt_text("cbc:ElectronicMail", contact.email.as_deref())?;
            w.end("cac:Contact")?;
        }
        w.end(element)?;
        Ok(())
    }

    fn allowance_charge(&mut self, ac: &AllowanceCharge, with_tax: bool) -> WriteResult {
        self.w.start("cac:AllowanceCharge")?;
        self.w.text("cbc:ChargeIndicator", if ac.is_charge { "true" } else { "false" })?;
        self.w.opt_text("cbc:AllowanceChargeReasonCode", ac.reason_code.as_deref())?;
        self.w.opt_text("cbc:AllowanceChargeReason", ac.reason.as_deref())?;
        if let Some(percent) = ac.percent {
            self.w.percent("cbc:MultiplierFactorNumeric", percent)?;
        }
        self.amount("cbc:Amount", ac.actual_amount)?;
        if let Some(basis) = ac.basis_amount {
            self.amount("cbc:BaseAmount", basis)?;
        }
        if with_tax && (ac.category_code().is_some() || ac.tax_rate.is_some()) {
            self.tax_category("cac:TaxCategory", ac.category_code(), ac.tax_rate, None)?;
        }
        self.w.end("cac:AllowanceCharge")?;
        Ok(())
    }

    fn document_references(&mut self) -> WriteResult {
        let inv = self.inv;
        if inv.order_reference.is_some() || inv.sales_order_reference.is_some() {
            self.w.start("cac:OrderReference")?;
            self.w.text(
                "cbc:ID",
                inv.order_reference.as_deref().unwrap_or(NOT_APPLICABLE),
            )?;
            self.w.opt_text("cbc:SalesOrderID", inv.sales_order_reference.as_deref())?;
            self.w.end("cac:OrderReference")?;
        }
        for preceding in &inv.preceding_invoices {
            self.w.start("cac:BillingReference")?;
            self.w.start("cac:InvoiceDocumentReference")?;
            self.w.text("cbc:ID", &preceding.number)?;
            self.opt_date("cbc:IssueDate", preceding.issue_date)?;
            self.w.end("cac:InvoiceDocumentReference")?;
            self.w.end("cac:BillingReference")?;
        }
        self.id_reference("cac:DespatchDocumentReference", inv.despatch_advice_reference.as_deref())?;
        self.id_reference("cac:ReceiptDocumentReference", inv.receiving_advice_reference.as_deref())?;

        // Tender references sit before the contract in an Invoice and after
        // the additional documents in a CreditNote.
        if !self.credit_note {
            self.tender_references()?;
        }
        self.id_reference("cac:ContractDocumentReference", inv.contract_reference.as_deref())?;
        for doc in inv.supporting_documents.iter().filter(|d| !is_tender_reference(d)) {
            self.additional_document(doc)?;
        }
        if self.credit_note {
            self.tender_references()?;
        }

        if let Some(project) = &inv.project {
            self.id_reference("cac:ProjectReference", Some(project.id.as_str()))?;
        }
        Ok(())
    }

    fn id_reference(&mut self, element: &str, id: Option<&str>) -> WriteResult {
        if let Some(id) = id {
            self.w.start(element)?;
            self.w.text("cbc:ID", id)?;
            self.w.end(element)?;
        }
        Ok(())
    }

    fn tender_references(&mut self) -> WriteResult {
        let inv = self.inv;
        for doc in &inv.supporting_documents {
            if is_tender_reference(doc) {
                self.id_reference("cac:OriginatorDocumentReference", Some(doc.id.as_str()))?;
            }
        }
        Ok(())
    }

    fn additional_document(&mut self, doc: &SupportingDocument) -> WriteResult {
        let w = &mut self.w;
        w.start("cac:AdditionalDocumentReference")?;
        w.text("cbc:ID", &doc.id)?;
        w.opt_text("cbc:DocumentTypeCode", doc.type_code.as_deref())?;
        w.opt_text("cbc:DocumentDescription", doc.description.as_deref())?;
        if doc.attachment.is_some() || doc.uri.is_some() {
            w.start("cac:Attachment")?;
            if let Some(att) = &doc.attachment {
                w.text_with_attrs(
                    "cbc:EmbeddedDocumentBinaryObject",
                    &encode_base64(&att.content),
                    &[("mimeCode", att.mime_code.as_str()), ("filename", att.filename.as_str())],
                )?;
            }
            if let Some(uri) = &doc.uri {
                w.start("cac:ExternalReference")?;
                w.text("cbc:URI", uri)?;
                w.end("cac:ExternalReference")?;
            }
            w.end("cac:Attachment")?;
        }
        w.end("cac:AdditionalDocumentReference")?;
        Ok(())
    }

    fn parties(&mut self) -> WriteResult {
        let inv = self.inv;
        self.w.start("cac:AccountingSupplierParty")?;
        self.party("cac:Party", &inv.seller, true, inv.creditor_reference.as_deref())?;
        self.w.end("cac:AccountingSupplierParty")?;

        self.w.start("cac:AccountingCustomerParty")?;
        self.party("cac:Party", &inv.buyer, true, None)?;
        self.w.end("cac:AccountingCustomerParty")?;

        if let Some(payee) = &inv.payee {
            self.party("cac:PayeeParty", payee, false, None)?;
        }
        if let Some(rep) = &inv.tax_representative {
            self.party("cac:TaxRepresentativeParty", rep, false, None)?;
        }
        Ok(())
    }

    fn delivery(&mut self) -> WriteResult {
        let inv = self.inv;
        if inv.delivery_date.is_none() && inv.ship_to.is_none() {
            return Ok(());
        }
        self.w.start("cac:Delivery")?;
        self.opt_date("cbc:ActualDeliveryDate", inv.delivery_date)?;
        if let Some(ship_to) = &inv.ship_to {
            let id = ship_to.identifiers.first();
            if id.is_some() || ship_to.address.is_some() {
                self.w.start("cac:DeliveryLocation")?;
                if let Some(id) = id {
                    self.w.scheme_text("cbc:ID", &id.value, id.scheme.as_deref())?;
                }
                if let Some(address) = &ship_to.address {
                    self.address("cac:Address", address)?;
                }
                self.w.end("cac:DeliveryLocation")?;
            }
            if !ship_to.name.is_empty() {
                self.w.start("cac:DeliveryParty")?;
                self.w.start("cac:PartyName")?;
                self.w.text("cbc:Name", &ship_to.name)?;
                self.w.end("cac:PartyName")?;
                self.w.end("cac:DeliveryParty")?;
            }
        }
        self.w.end("cac:Delivery")?;
        Ok(())
    }

    fn payment(&mut self) -> WriteResult {
        let inv = self.inv;
        let mandate_at = inv.mandate_reference.as_ref().map(|_| {
            inv.payment_means
                .iter()
                .position(|pm| pm.type_code.is_some_and(|c| c.is_direct_debit()))
                .unwrap_or(0)
        });
        if inv.mandate_reference.is_some() && inv.payment_means.is_empty() {
            warn!(invoice = %inv.number, "mandate reference without payment means is not written");
        }
        if inv.payment_reference.is_some() && inv.payment_means.is_empty() {
            warn!(invoice = %inv.number, "payment reference without payment means is not written");
        }

        for (i, pm) in inv.payment_means.iter().enumerate() {
            let w = &mut self.w;
            w.start("cac:PaymentMeans")?;
            if let Some(code) = pm.type_code {
                let code = code.code().to_string();
                match &pm.information {
                    Some(name) => w.text_with_attrs("cbc:PaymentMeansCode", &code, &[("name", name.as_str())])?,
                    None => w.text("cbc:PaymentMeansCode", &code)?,
                };
            }
            if self.credit_note && i == 0 {
                self.opt_date("cbc:PaymentDueDate", inv.due_date())?;
            }
            let w = &mut self.w;
            w.opt_text("cbc:PaymentID", inv.payment_reference.as_deref())?;
            if let Some(card) = &pm.card {
                w.start("cac:CardAccount")?;
                w.text("cbc:PrimaryAccountNumberID", &card.account_number)?;
                w.text("cbc:NetworkID", NOT_APPLICABLE)?;
                w.opt_text("cbc:HolderName", card.holder_name.as_deref())?;
                w.end("cac:CardAccount")?;
            }
            if let Some(account) = &pm.payee_account {
                w.start("cac:PayeeFinancialAccount")?;
                w.text("cbc:ID", &account.iban)?;
                w.opt_text("cbc:Name", account.account_name.as_deref())?;
                if let Some(bic) = &account.bic {
                    w.start("cac:FinancialInstitutionBranch")?;
                    w.text("cbc:ID", bic)?;
                    w.end("cac:FinancialInstitutionBranch")?;
                }
                w.end("cac:PayeeFinancialAccount")?;
            }
            let mandate = if mandate_at == Some(i) {
                inv.mandate_reference.as_deref()
            } else {
                None
            };
            if mandate.is_some() || pm.debited_account.is_some() {
                w.start("cac:PaymentMandate")?;
                w.opt_text("cbc:ID", mandate)?;
                if let Some(debited) = &pm.debited_account {
                    w.start("cac:PayerFinancialAccount")?;
                    w.text("cbc:ID", debited)?;
                    w.end("cac:PayerFinancialAccount")?;
                }
                w.end("cac:PaymentMandate")?;
            }
            w.end("cac:PaymentMeans")?;
        }

        if self.credit_note && inv.payment_means.is_empty() && inv.due_date().is_some() {
            warn!(invoice = %inv.number, "credit note due date needs payment means, not written");
        }

        for terms in &inv.payment_terms {
            if let Some(text) = &terms.description {
                self.w.start("cac:PaymentTerms")?;
                self.w.text("cbc:Note", text)?;
                self.w.end("cac:PaymentTerms")?;
            }
        }
        Ok(())
    }

    fn tax_totals(&mut self) -> WriteResult {
        let inv = self.inv;
        self.w.start("cac:TaxTotal")?;
        self.amount("cbc:TaxAmount", inv.totals.tax_total)?;
        for tax in &inv.trade_taxes {
            self.w.start("cac:TaxSubtotal")?;
            self.amount("cbc:TaxableAmount", tax.basis_amount)?;
            self.amount("cbc:TaxAmount", tax.calculated_amount)?;
            self.tax_category("cac:TaxCategory", tax.category_code(), tax.rate, Some(tax))?;
            self.w.end("cac:TaxSubtotal")?;
        }
        self.w.end("cac:TaxTotal")?;

        if let (Some(currency), Some(amount)) = (&inv.tax_currency_code, inv.totals.tax_total_accounting) {
            if *currency != inv.currency_code {
                self.w.start("cac:TaxTotal")?;
                self.w.amount("cbc:TaxAmount", amount, currency)?;
                self.w.end("cac:TaxTotal")?;
            }
        }
        Ok(())
    }

    fn monetary_total(&mut self) -> WriteResult {
        let inv = self.inv;
        let t = &inv.totals;
        self.w.start("cac:LegalMonetaryTotal")?;
        self.amount("cbc:LineExtensionAmount", t.line_total)?;
        self.amount("cbc:TaxExclusiveAmount", t.tax_basis_total)?;
        self.amount("cbc:TaxInclusiveAmount", t.grand_total)?;
        self.optional_amount("cbc:AllowanceTotalAmount", t.allowance_total)?;
        self.optional_amount("cbc:ChargeTotalAmount", t.charge_total)?;
        self.optional_amount("cbc:PrepaidAmount", t.prepaid)?;
        self.optional_amount("cbc:PayableRoundingAmount", t.rounding)?;
        self.amount("cbc:PayableAmount", t.due_payable)?;
        self.w.end("cac:LegalMonetaryTotal")?;
        Ok(())
    }

    fn line(&mut self, line: &InvoiceLine) -> WriteResult {
        let (element, quantity) = if self.credit_note {
            ("cac:CreditNoteLine", "cbc:CreditedQuantity")
        } else {
            ("cac:InvoiceLine", "cbc:InvoicedQuantity")
        };
        self.w.start(element)?;
        self.w.text("cbc:ID", &line.id)?;
        self.w.opt_text("cbc:Note", line.note.as_deref())?;
        self.w.quantity(quantity, line.quantity, &line.unit)?;
        self.amount("cbc:LineExtensionAmount", line.line_total)?;
        self.w.opt_text("cbc:AccountingCost", line.accounting_reference.as_deref())?;
        if let Some(period) = &line.billing_period {
            self.period(Some(period), None)?;
        }
        if let Some(reference) = &line.order_line_reference {
            self.w.start("cac:OrderLineReference")?;
            self.w.text("cbc:LineID", reference)?;
            self.w.end("cac:OrderLineReference")?;
        }
        for ac in &line.allowance_charges {
            self.allowance_charge(ac, false)?;
        }

        let w = &mut self.w;
        w.start("cac:Item")?;
        w.opt_text("cbc:Description", line.description.as_deref())?;
        w.text("cbc:Name", &line.item_name)?;
        for (element, id) in [
            ("cac:BuyersItemIdentification", &line.buyer_item_id),
            ("cac:SellersItemIdentification", &line.seller_item_id),
        ] {
            if let Some(id) = id {
                w.start(element)?;
                w.text("cbc:ID", id)?;
                w.end(element)?;
            }
        }
        if let Some(id) = &line.standard_item_id {
            w.start("cac:StandardItemIdentification")?;
            w.scheme_text("cbc:ID", &id.value, id.scheme.as_deref())?;
            w.end("cac:StandardItemIdentification")?;
        }
        if let Some(country) = &line.origin_country {
            w.start("cac:OriginCountry")?;
            w.text("cbc:IdentificationCode", country)?;
            w.end("cac:OriginCountry")?;
        }
        for class in &line.classifications {
            let mut attrs = Vec::new();
            if let Some(list_id) = &class.list_id {
                attrs.push(("listID", list_id.as_str()));
            }
            if let Some(version) = &class.list_version {
                attrs.push(("listVersionID", version.as_str()));
            }
            w.start("cac:CommodityClassification")?;
            w.text_with_attrs("cbc:ItemClassificationCode", &class.code, &attrs)?;
            w.end("cac:CommodityClassification")?;
        }
        self.tax_category("cac:ClassifiedTaxCategory", line.category_code(), line.tax_rate, None)?;
        let w = &mut self.w;
        for attr in &line.attributes {
            w.start("cac:AdditionalItemProperty")?;
            w.text("cbc:Name", &attr.name)?;
            w.text("cbc:Value", &attr.value)?;
            w.end("cac:AdditionalItemProperty")?;
        }
        w.end("cac:Item")?;

        self.w.start("cac:Price")?;
        self.amount("cbc:PriceAmount", line.net_price)?;
        if let Some(base) = line.base_quantity {
            self.w.quantity(
                "cbc:BaseQuantity",
                base,
                line.base_quantity_unit.as_deref().unwrap_or_default(),
            )?;
        }
        if line.gross_price.is_some() || !line.price_allowance_charges.is_empty() {
            let discount = if line.price_allowance_charges.is_empty() {
                line.gross_price.unwrap_or_default().saturating_sub(line.net_price)
            } else {
                saturating_sum(
                    line.price_allowance_charges
                        .iter()
                        .map(|ac| if ac.is_charge { -ac.actual_amount } else { ac.actual_amount }),
                )
            };
            self.w.start("cac:AllowanceCharge")?;
            self.w.text("cbc:ChargeIndicator", "false")?;
            self.amount("cbc:Amount", discount)?;
            if let Some(gross) = line.gross_price {
                self.amount("cbc:BaseAmount", gross)?;
            }
            self.w.end("cac:AllowanceCharge")?;
        }
        self.w.end("cac:Price")?;

        self.w.end(element)?;
        Ok(())
    }

    fn document(&mut self) -> WriteResult {
        let inv = self.inv;
        let first_tax = inv.trade_taxes.first();
        let tax_point_date = first_tax.and_then(|t| t.tax_point_date);
        let tax_point_code = first_tax
            .and_then(|t| t.due_date_type_code.as_deref())
            .map(tax_point_code_to_ubl);

        if !inv.specification_id.is_empty() {
            self.w.text("cbc:CustomizationID", &inv.specification_id)?;
        }
        self.w.opt_text("cbc:ProfileID", inv.business_process.as_deref())?;
        self.w.text("cbc:ID", &inv.number)?;
        self.opt_date("cbc:IssueDate", inv.issue_date)?;
        if self.credit_note {
            self.opt_date("cbc:TaxPointDate", tax_point_date)?;
        } else {
            self.opt_date("cbc:DueDate", inv.due_date())?;
        }
        if let Some(code) = inv.type_code {
            let element = if self.credit_note {
                "cbc:CreditNoteTypeCode"
            } else {
                "cbc:InvoiceTypeCode"
            };
            self.w.text(element, &code.code().to_string())?;
        }
        for note in &inv.notes {
            self.w.text("cbc:Note", &encode_note(note.subject_code.as_deref(), &note.text))?;
        }
        if !self.credit_note {
            self.opt_date("cbc:TaxPointDate", tax_point_date)?;
        }
        if !inv.currency_code.is_empty() {
            self.w.text("cbc:DocumentCurrencyCode", &inv.currency_code)?;
        }
        self.w.opt_text("cbc:TaxCurrencyCode", inv.tax_currency_code.as_deref())?;
        self.w.opt_text("cbc:BuyerReference", inv.buyer_reference.as_deref())?;
        if inv.billing_period.is_some() || tax_point_code.is_some() {
            self.period(inv.billing_period.as_ref(), tax_point_code)?;
        }

        self.document_references()?;
        self.parties()?;
        self.delivery()?;
        self.payment()?;
        for ac in &inv.allowance_charges {
            self.allowance_charge(ac, true)?;
        }
        self.tax_totals()?;
        self.monetary_total()?;
        for line in &inv.lines {
            self.line(line)?;
        }
        Ok(())
    }
}

/// Serialize `inv` as a UBL `Invoice`, or a `CreditNote` for credit note
/// type codes.
pub(crate) fn write(inv: &Invoice) -> Result<Vec<u8>, InvoiceError> {
    let credit_note = inv.is_credit_note();
    let (root, namespace) = if credit_note {
        ("CreditNote", ns::UBL_CREDIT_NOTE)
    } else {
        ("Invoice", ns::UBL_INVOICE)
    };
    let mut doc = Doc {
        w: XmlWriter::new()?,
        inv,
        credit_note,
    };
    doc.w.start_with_attrs(
        root,
        &[("xmlns", namespace), ("xmlns:cac", ns::CAC), ("xmlns:cbc", ns::CBC)],
    )?;
    doc.document()?;
    doc.w.end(root)?;

    let bytes = doc.w.into_bytes();
    debug!(schema = "UBL", root, invoice = %inv.number, bytes = bytes.len(), "wrote invoice");
    Ok(bytes)
}

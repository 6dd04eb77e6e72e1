use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::arithmetic::{round2, saturating_sum};
use super::error::InvoiceError;
use super::profile;
use super::types::*;

/// Builder for assembling invoices by hand.
///
/// The VAT breakdown and document totals are derived from the lines and
/// document-level allowances and charges on [`build`](Self::build).
///
/// ```
/// use einvoice::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("RE-2024-001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .due_date(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
///     .seller(PartyBuilder::new("ACME GmbH", AddressBuilder::new("Berlin", "10115", "DE").build())
///         .vat_id("DE123456789")
///         .build())
///     .buyer(PartyBuilder::new("Kunde AG", AddressBuilder::new("München", "80331", "DE").build())
///         .build())
///     .add_line(LineBuilder::new("1", "Beratung", dec!(10), "HUR", dec!(150.00))
///         .tax(TaxCategory::StandardRate, dec!(19))
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.grand_total, dec!(1785.00));
/// ```
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    schema_type: SchemaType,
    specification_id: String,
    business_process: Option<String>,
    type_code: InvoiceTypeCode,
    currency_code: String,
    tax_currency_code: Option<String>,
    notes: Vec<Note>,
    buyer_reference: Option<String>,
    order_reference: Option<String>,
    contract_reference: Option<String>,
    seller: Option<Party>,
    buyer: Option<Party>,
    payee: Option<Party>,
    tax_representative: Option<Party>,
    ship_to: Option<Party>,
    delivery_date: Option<NaiveDate>,
    billing_period: Option<Period>,
    lines: Vec<InvoiceLine>,
    allowance_charges: Vec<AllowanceCharge>,
    payment_means: Vec<PaymentMeans>,
    payment_terms: Option<String>,
    due_date: Option<NaiveDate>,
    payment_reference: Option<String>,
    tax_point_date: Option<NaiveDate>,
    exemption_reasons: HashMap<TaxCategory, String>,
    prepaid: Decimal,
}

impl InvoiceBuilder {
    /// Start a commercial invoice (380) in EUR under the EN 16931 core
    /// specification, written as CII.
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            schema_type: SchemaType::Cii,
            specification_id: profile::EN16931.to_string(),
            business_process: None,
            type_code: InvoiceTypeCode::Invoice,
            currency_code: "EUR".to_string(),
            tax_currency_code: None,
            notes: Vec::new(),
            buyer_reference: None,
            order_reference: None,
            contract_reference: None,
            seller: None,
            buyer: None,
            payee: None,
            tax_representative: None,
            ship_to: None,
            delivery_date: None,
            billing_period: None,
            lines: Vec::new(),
            allowance_charges: Vec::new(),
            payment_means: Vec::new(),
            payment_terms: None,
            due_date: None,
            payment_reference: None,
            tax_point_date: None,
            exemption_reasons: HashMap::new(),
            prepaid: Decimal::ZERO,
        }
    }

    pub fn schema_type(mut self, schema: SchemaType) -> Self {
        self.schema_type = schema;
        self
    }

    /// BT-24 specification identifier, see [`profile`](super::profile) for known values.
    pub fn specification(mut self, urn: impl Into<String>) -> Self {
        self.specification_id = urn.into();
        self
    }

    pub fn business_process(mut self, process: impl Into<String>) -> Self {
        self.business_process = Some(process.into());
        self
    }

    pub fn type_code(mut self, code: InvoiceTypeCode) -> Self {
        self.type_code = code;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn tax_currency(mut self, code: impl Into<String>) -> Self {
        self.tax_currency_code = Some(code.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(Note {
            subject_code: None,
            text: note.into(),
        });
        self
    }

    pub fn buyer_reference(mut self, reference: impl Into<String>) -> Self {
        self.buyer_reference = Some(reference.into());
        self
    }

    pub fn order_reference(mut self, reference: impl Into<String>) -> Self {
        self.order_reference = Some(reference.into());
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.contract_reference = Some(reference.into());
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn payee(mut self, party: Party) -> Self {
        self.payee = Some(party);
        self
    }

    pub fn tax_representative(mut self, party: Party) -> Self {
        self.tax_representative = Some(party);
        self
    }

    pub fn ship_to(mut self, party: Party) -> Self {
        self.ship_to = Some(party);
        self
    }

    pub fn delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn billing_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.billing_period = Some(Period::new(start, end));
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_allowance(mut self, allowance: AllowanceCharge) -> Self {
        self.allowance_charges.push(AllowanceCharge {
            is_charge: false,
            ..allowance
        });
        self
    }

    pub fn add_charge(mut self, charge: AllowanceCharge) -> Self {
        self.allowance_charges.push(AllowanceCharge {
            is_charge: true,
            ..charge
        });
        self
    }

    pub fn payment_means(mut self, means: PaymentMeans) -> Self {
        self.payment_means.push(means);
        self
    }

    /// SEPA credit transfer (58) to the given account.
    pub fn credit_transfer(mut self, iban: impl Into<String>, bic: Option<String>) -> Self {
        self.payment_means.push(PaymentMeans {
            type_code: Some(PaymentMeansCode::SepaCreditTransfer),
            payee_account: Some(CreditTransfer {
                iban: iban.into(),
                account_name: None,
                bic,
            }),
            ..Default::default()
        });
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }

    pub fn tax_point_date(mut self, date: NaiveDate) -> Self {
        self.tax_point_date = Some(date);
        self
    }

    /// Exemption reason (BT-120) for breakdown rows of `category`.
    pub fn exemption_reason(mut self, category: TaxCategory, reason: impl Into<String>) -> Self {
        self.exemption_reasons.insert(category, reason.into());
        self
    }

    pub fn prepaid(mut self, amount: Decimal) -> Self {
        self.prepaid = amount;
        self
    }

    /// Build the invoice, derive breakdown and totals, and run the business
    /// rules. All violations are returned, not just the first.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let invoice = self.build_unchecked()?;
        invoice.validate()?;
        Ok(invoice)
    }

    /// Build without running the business rules, for tests or imports that
    /// are validated later.
    pub fn build_unchecked(self) -> Result<Invoice, InvoiceError> {
        let seller = self
            .seller
            .ok_or_else(|| InvoiceError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| InvoiceError::Builder("buyer is required".into()))?;

        if self.lines.len() > 10_000 {
            return Err(InvoiceError::Builder(
                "invoice cannot have more than 10,000 lines".into(),
            ));
        }

        let payment_terms = if self.payment_terms.is_some() || self.due_date.is_some() {
            vec![PaymentTerms {
                description: self.payment_terms,
                due_date: self.due_date,
            }]
        } else {
            Vec::new()
        };

        let mut invoice = Invoice {
            schema_type: self.schema_type,
            business_process: self.business_process,
            specification_id: self.specification_id,
            number: self.number,
            type_code: Some(self.type_code),
            issue_date: Some(self.issue_date),
            notes: self.notes,
            buyer_reference: self.buyer_reference,
            contract_reference: self.contract_reference,
            order_reference: self.order_reference,
            seller,
            buyer,
            payee: self.payee,
            tax_representative: self.tax_representative,
            ship_to: self.ship_to,
            delivery_date: self.delivery_date,
            billing_period: self.billing_period,
            currency_code: self.currency_code,
            tax_currency_code: self.tax_currency_code,
            payment_reference: self.payment_reference,
            payment_means: self.payment_means,
            payment_terms,
            allowance_charges: self.allowance_charges,
            lines: self.lines,
            ..Default::default()
        };
        invoice.totals.prepaid = self.prepaid;

        invoice.update_applicable_trade_tax(&self.exemption_reasons);
        if let Some(date) = self.tax_point_date {
            for tax in &mut invoice.trade_taxes {
                tax.tax_point_date = Some(date);
            }
        }
        invoice.update_totals();
        Ok(invoice)
    }
}

/// Builder for a [`Party`] in any role.
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            party: Party {
                name: name.into(),
                address: Some(address),
                ..Default::default()
            },
        }
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.party.vat_id = Some(id.into());
        self
    }

    /// BT-32 tax registration identifier (German Steuernummer).
    pub fn tax_registration(mut self, number: impl Into<String>) -> Self {
        self.party.tax_registration = Some(number.into());
        self
    }

    pub fn identifier(mut self, value: impl Into<String>, scheme: Option<String>) -> Self {
        self.party.identifiers.push(Identifier {
            value: value.into(),
            scheme,
        });
        self
    }

    pub fn legal_registration(mut self, id: impl Into<String>, scheme: Option<String>) -> Self {
        self.party.legal_registration = Some(Identifier {
            value: id.into(),
            scheme,
        });
        self
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.party.trading_name = Some(name.into());
        self
    }

    pub fn contact(
        mut self,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.party.contacts.push(Contact { name, phone, email });
        self
    }

    pub fn electronic_address(
        mut self,
        scheme: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.party.electronic_address = Some(ElectronicAddress {
            value: value.into(),
            scheme: Some(scheme.into()),
        });
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for [`Address`].
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    pub fn new(
        city: impl Into<String>,
        postcode: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address: Address {
                city: Some(city.into()),
                postcode: Some(postcode.into()),
                country_code: country_code.into(),
                ..Default::default()
            },
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.address.line1 = Some(street.into());
        self
    }

    pub fn additional(mut self, additional: impl Into<String>) -> Self {
        self.address.line2 = Some(additional.into());
        self
    }

    pub fn line3(mut self, line: impl Into<String>) -> Self {
        self.address.line3 = Some(line.into());
        self
    }

    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.address.subdivision = Some(subdivision.into());
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

/// Builder for [`InvoiceLine`]. The line net amount (BT-131) is computed on
/// [`build`](Self::build).
pub struct LineBuilder {
    line: InvoiceLine,
}

impl LineBuilder {
    /// A standard-rated (19 %) line.
    pub fn new(
        id: impl Into<String>,
        item_name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        net_price: Decimal,
    ) -> Self {
        Self {
            line: InvoiceLine {
                id: id.into(),
                item_name: item_name.into(),
                quantity,
                unit: unit.into(),
                net_price,
                net_price_present: true,
                tax_category: Some(TaxCategory::StandardRate),
                tax_rate: Some(Decimal::new(19, 0)),
                ..Default::default()
            },
        }
    }

    /// VAT category and rate. Category O carries no rate.
    pub fn tax(mut self, category: TaxCategory, rate: Decimal) -> Self {
        self.line.tax_category = Some(category);
        self.line.tax_rate = (category != TaxCategory::NotSubjectToVat).then_some(rate);
        self
    }

    pub fn gross_price(mut self, price: Decimal) -> Self {
        self.line.gross_price = Some(price);
        self
    }

    /// Price discount (BT-147) applied to the gross price.
    pub fn price_discount(mut self, amount: Decimal) -> Self {
        self.line.price_allowance_charges.push(AllowanceCharge {
            actual_amount: amount,
            amount_present: true,
            ..Default::default()
        });
        self
    }

    pub fn base_quantity(mut self, quantity: Decimal, unit: impl Into<String>) -> Self {
        self.line.base_quantity = Some(quantity);
        self.line.base_quantity_unit = Some(unit.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.line.note = Some(note.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.line.description = Some(desc.into());
        self
    }

    pub fn seller_item_id(mut self, id: impl Into<String>) -> Self {
        self.line.seller_item_id = Some(id.into());
        self
    }

    pub fn buyer_item_id(mut self, id: impl Into<String>) -> Self {
        self.line.buyer_item_id = Some(id.into());
        self
    }

    pub fn standard_item_id(mut self, id: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.line.standard_item_id = Some(Identifier::with_scheme(id, scheme));
        self
    }

    pub fn classification(mut self, code: impl Into<String>, list_id: impl Into<String>) -> Self {
        self.line.classifications.push(Classification {
            code: code.into(),
            list_id: Some(list_id.into()),
            list_version: None,
        });
        self
    }

    pub fn origin_country(mut self, country: impl Into<String>) -> Self {
        self.line.origin_country = Some(country.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.line.attributes.push(ItemAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_line_reference(mut self, reference: impl Into<String>) -> Self {
        self.line.order_line_reference = Some(reference.into());
        self
    }

    pub fn billing_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.line.billing_period = Some(Period::new(start, end));
        self
    }

    pub fn add_allowance(mut self, amount: Decimal, reason: impl Into<String>) -> Self {
        self.line.allowance_charges.push(AllowanceCharge {
            is_charge: false,
            actual_amount: amount,
            amount_present: true,
            reason: Some(reason.into()),
            ..Default::default()
        });
        self
    }

    pub fn add_charge(mut self, amount: Decimal, reason: impl Into<String>) -> Self {
        self.line.allowance_charges.push(AllowanceCharge {
            is_charge: true,
            actual_amount: amount,
            amount_present: true,
            reason: Some(reason.into()),
            ..Default::default()
        });
        self
    }

    /// Finish the line: BT-131 = quantity × net price / base quantity
    /// − allowances + charges, rounded to 2 places.
    pub fn build(mut self) -> InvoiceLine {
        let line = &mut self.line;
        let base = line.base_quantity.filter(|q| !q.is_zero()).unwrap_or(Decimal::ONE);
        let allowances = saturating_sum(line.allowances().map(|ac| ac.actual_amount));
        let charges = saturating_sum(line.charges().map(|ac| ac.actual_amount));
        let gross = line.quantity.saturating_mul(line.net_price);
        let per_base = gross.checked_div(base).unwrap_or(
            if gross.is_sign_negative() == base.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            },
        );
        line.line_total = round2(per_base.saturating_sub(allowances).saturating_add(charges));
        line.line_total_present = true;
        self.line
    }
}

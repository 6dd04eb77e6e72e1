use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// XML syntax an invoice was read from, and the one it is written back to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    /// UN/CEFACT Cross Industry Invoice (D16B).
    #[default]
    Cii,
    /// OASIS UBL 2.1 Invoice or CreditNote.
    Ubl,
}

/// BG-0: Invoice, the top-level document.
///
/// An invoice is a plain value. Readers fill every field they find, callers
/// may populate it by hand or through [`InvoiceBuilder`](super::InvoiceBuilder).
/// Nothing is enforced on construction; run [`Invoice::validate`] for the
/// EN 16931 business rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Syntax tag set by the reader; selects the writer.
    pub schema_type: SchemaType,
    /// BT-23: Business process type.
    pub business_process: Option<String>,
    /// BT-24: Specification identifier (profile URN).
    pub specification_id: String,
    /// BT-1: Invoice number.
    pub number: String,
    /// BT-3: Invoice type code (UNTDID 1001).
    pub type_code: Option<InvoiceTypeCode>,
    /// BT-2: Invoice issue date.
    pub issue_date: Option<NaiveDate>,
    /// BG-1: Invoice notes.
    pub notes: Vec<Note>,
    /// BT-10: Buyer reference (Leitweg-ID for XRechnung).
    pub buyer_reference: Option<String>,
    /// BT-11: Project reference.
    pub project: Option<ProjectReference>,
    /// BT-12: Contract reference.
    pub contract_reference: Option<String>,
    /// BT-13: Purchase order reference.
    pub order_reference: Option<String>,
    /// BT-14: Sales order reference.
    pub sales_order_reference: Option<String>,
    /// BT-15: Receiving advice reference.
    pub receiving_advice_reference: Option<String>,
    /// BT-16: Despatch advice reference.
    pub despatch_advice_reference: Option<String>,
    /// BG-3: Preceding invoice references.
    pub preceding_invoices: Vec<PrecedingInvoice>,
    /// BG-24: Additional supporting documents.
    pub supporting_documents: Vec<SupportingDocument>,
    /// BG-4: Seller.
    pub seller: Party,
    /// BG-7: Buyer.
    pub buyer: Party,
    /// BG-10: Payee, when different from the seller.
    pub payee: Option<Party>,
    /// BG-11: Seller tax representative.
    pub tax_representative: Option<Party>,
    /// BG-13/BG-15: Deliver-to party and address.
    pub ship_to: Option<Party>,
    /// BT-72: Actual delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// BG-14: Invoicing period. `Some` whenever the period group was present,
    /// even if both endpoints are missing.
    pub billing_period: Option<Period>,
    /// BT-5: Invoice currency code (ISO 4217).
    pub currency_code: String,
    /// BT-6: VAT accounting currency code.
    pub tax_currency_code: Option<String>,
    /// BT-83: Remittance information.
    pub payment_reference: Option<String>,
    /// BT-90: Bank assigned creditor identifier.
    pub creditor_reference: Option<String>,
    /// BT-89: Mandate reference identifier.
    pub mandate_reference: Option<String>,
    /// BG-16: Payment instructions.
    pub payment_means: Vec<PaymentMeans>,
    /// BT-20 / BT-9: Payment terms and due dates.
    pub payment_terms: Vec<PaymentTerms>,
    /// BG-20/BG-21: Document-level allowances and charges.
    pub allowance_charges: Vec<AllowanceCharge>,
    /// BG-23: VAT breakdown, one row per (category, rate).
    pub trade_taxes: Vec<TradeTax>,
    /// BG-22: Document totals.
    pub totals: Totals,
    /// Which mandatory total elements were present in the source XML.
    pub presence: TotalsPresence,
    /// Currencies of tax total amounts that matched neither BT-5 nor BT-6.
    pub unexpected_tax_currencies: Vec<String>,
    /// BG-25: Invoice lines.
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    /// BT-9: the first payment due date found in the payment terms.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.payment_terms.iter().find_map(|t| t.due_date)
    }

    /// True for credit-note type codes; the UBL writer emits a `CreditNote` for these.
    pub fn is_credit_note(&self) -> bool {
        self.type_code.is_some_and(|c| c.is_credit_note())
    }

    /// Document-level allowances (BG-20) in document order.
    pub fn allowances(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowance_charges.iter().filter(|ac| !ac.is_charge)
    }

    /// Document-level charges (BG-21) in document order.
    pub fn charges(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowance_charges.iter().filter(|ac| ac.is_charge)
    }
}

/// BG-1: Invoice note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// BT-21: Subject code (UNTDID 4451).
    pub subject_code: Option<String>,
    /// BT-22: Note text.
    pub text: String,
}

/// BT-11: Project reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: String,
    pub name: Option<String>,
}

/// BG-3: Preceding invoice reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedingInvoice {
    /// BT-25
    pub number: String,
    /// BT-26
    pub issue_date: Option<NaiveDate>,
}

/// BG-24: Additional supporting document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDocument {
    /// BT-122: Supporting document reference.
    pub id: String,
    /// Document type code. `None` is a plain supporting document (CII 916);
    /// `50` carries a tender reference, `130` an invoiced object identifier.
    pub type_code: Option<String>,
    /// BT-123: Supporting document description.
    pub description: Option<String>,
    /// BT-124: External document location.
    pub uri: Option<String>,
    /// BT-125: Attached document.
    pub attachment: Option<Attachment>,
}

/// BT-125: Embedded binary object, already base64-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub mime_code: String,
    pub filename: String,
    pub content: Vec<u8>,
}

/// A party in any role: seller, buyer, payee, tax representative or deliver-to.
///
/// Role-specific requirements live in the validator, not in the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// BT-27 / BT-44 / BT-59 / BT-62 / BT-70: Name.
    pub name: String,
    /// BT-28 / BT-45: Trading name.
    pub trading_name: Option<String>,
    /// BT-29 / BT-46 / BT-60 / BT-71: Party identifiers.
    pub identifiers: Vec<Identifier>,
    /// BT-30 / BT-47 / BT-61: Legal registration identifier.
    pub legal_registration: Option<Identifier>,
    /// BT-33: Seller additional legal information.
    pub legal_info: Option<String>,
    /// BG-5 / BG-8 / BG-12 / BG-15: Postal address.
    pub address: Option<Address>,
    /// BG-6 / BG-9: Contacts.
    pub contacts: Vec<Contact>,
    /// BT-31 / BT-48 / BT-63: VAT identifier.
    pub vat_id: Option<String>,
    /// BT-32: Tax registration identifier (scheme FC).
    pub tax_registration: Option<String>,
    /// BT-34 / BT-49: Electronic address.
    pub electronic_address: Option<ElectronicAddress>,
}

/// An identifier with an optional scheme (ISO 6523 ICD or similar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
    pub scheme: Option<String>,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: None,
        }
    }

    pub fn with_scheme(value: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: Some(scheme.into()),
        }
    }
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// BT-35 / BT-50 / BT-64 / BT-75
    pub line1: Option<String>,
    /// BT-36 / BT-51 / BT-65 / BT-76
    pub line2: Option<String>,
    /// BT-162 / BT-163 / BT-164 / BT-165
    pub line3: Option<String>,
    /// BT-37 / BT-52 / BT-66 / BT-77
    pub city: Option<String>,
    /// BT-38 / BT-53 / BT-67 / BT-78
    pub postcode: Option<String>,
    /// BT-39 / BT-54 / BT-68 / BT-79
    pub subdivision: Option<String>,
    /// BT-40 / BT-55 / BT-69 / BT-80: ISO 3166-1 alpha-2; empty when missing.
    pub country_code: String,
}

/// BG-6 / BG-9: Contact information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// BT-41 / BT-56
    pub name: Option<String>,
    /// BT-42 / BT-57
    pub phone: Option<String>,
    /// BT-43 / BT-58
    pub email: Option<String>,
}

/// BT-34 / BT-49: Electronic address with its EAS scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicAddress {
    pub value: String,
    pub scheme: Option<String>,
}

/// Invoicing period. Both endpoints are optional so that an empty period
/// group survives reading and can be reported (BR-CO-19/20).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// BT-73 / BT-134
    pub start: Option<NaiveDate>,
    /// BT-74 / BT-135
    pub end: Option<NaiveDate>,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A period group with neither endpoint.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// BG-16: Payment instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMeans {
    /// BT-81: Payment means type code (UNTDID 4461).
    pub type_code: Option<PaymentMeansCode>,
    /// BT-82: Payment means text.
    pub information: Option<String>,
    /// BG-17: Credit transfer account.
    pub payee_account: Option<CreditTransfer>,
    /// BG-18: Payment card.
    pub card: Option<PaymentCard>,
    /// BT-91: Debited account identifier (BG-19).
    pub debited_account: Option<String>,
}

/// BG-17: Credit transfer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTransfer {
    /// BT-84: Payment account identifier (IBAN or proprietary).
    pub iban: String,
    /// BT-85: Payment account name.
    pub account_name: Option<String>,
    /// BT-86: Payment service provider identifier (BIC).
    pub bic: Option<String>,
}

/// BG-18: Payment card information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    /// BT-87: Primary account number (masked).
    pub account_number: String,
    /// BT-88: Card holder name.
    pub holder_name: Option<String>,
}

/// Payment terms entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// BT-20: Payment terms text.
    pub description: Option<String>,
    /// BT-9: Payment due date.
    pub due_date: Option<NaiveDate>,
}

/// UNTDID 4461: payment means codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMeansCode {
    /// 1: Instrument not defined.
    NotDefined,
    /// 10: Cash.
    Cash,
    /// 20: Cheque.
    Cheque,
    /// 30: Credit transfer.
    CreditTransfer,
    /// 31: Debit transfer.
    DebitTransfer,
    /// 42: Payment to bank account.
    PaymentToBankAccount,
    /// 48: Bank card.
    BankCard,
    /// 49: Direct debit.
    DirectDebit,
    /// 57: Standing agreement.
    StandingAgreement,
    /// 58: SEPA credit transfer.
    SepaCreditTransfer,
    /// 59: SEPA direct debit.
    SepaDirectDebit,
    /// Any other code value.
    Other(u16),
}

impl PaymentMeansCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::NotDefined => 1,
            Self::Cash => 10,
            Self::Cheque => 20,
            Self::CreditTransfer => 30,
            Self::DebitTransfer => 31,
            Self::PaymentToBankAccount => 42,
            Self::BankCard => 48,
            Self::DirectDebit => 49,
            Self::StandingAgreement => 57,
            Self::SepaCreditTransfer => 58,
            Self::SepaDirectDebit => 59,
            Self::Other(c) => *c,
        }
    }

    /// Parse from UNTDID 4461 numeric code.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::NotDefined,
            10 => Self::Cash,
            20 => Self::Cheque,
            30 => Self::CreditTransfer,
            31 => Self::DebitTransfer,
            42 => Self::PaymentToBankAccount,
            48 => Self::BankCard,
            49 => Self::DirectDebit,
            57 => Self::StandingAgreement,
            58 => Self::SepaCreditTransfer,
            59 => Self::SepaDirectDebit,
            c => Self::Other(c),
        }
    }

    /// Credit transfer codes that require a payee account (BR-61).
    pub fn is_credit_transfer(&self) -> bool {
        matches!(self, Self::CreditTransfer | Self::SepaCreditTransfer)
    }

    pub fn is_direct_debit(&self) -> bool {
        matches!(self, Self::DirectDebit | Self::SepaDirectDebit)
    }
}

/// UNTDID 1001: document type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceTypeCode {
    /// 380: Commercial invoice.
    Invoice,
    /// 381: Credit note.
    CreditNote,
    /// 384: Corrected invoice.
    Corrected,
    /// 386: Prepayment invoice.
    Prepayment,
    /// 389: Self-billed invoice.
    SelfBilled,
    /// 326: Partial invoice.
    Partial,
    /// Any other UNTDID 1001 code.
    Other(u16),
}

/// UNTDID 1001 codes that denote credit notes besides 381.
const CREDIT_NOTE_CODES: &[u16] = &[81, 83, 261, 262, 296, 308, 381, 396, 420, 458, 532];

impl InvoiceTypeCode {
    /// UNTDID 1001 numeric code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Invoice => 380,
            Self::CreditNote => 381,
            Self::Corrected => 384,
            Self::Prepayment => 386,
            Self::SelfBilled => 389,
            Self::Partial => 326,
            Self::Other(c) => *c,
        }
    }

    /// Parse from UNTDID 1001 numeric code.
    pub fn from_code(code: u16) -> Self {
        match code {
            380 => Self::Invoice,
            381 => Self::CreditNote,
            384 => Self::Corrected,
            386 => Self::Prepayment,
            389 => Self::SelfBilled,
            326 => Self::Partial,
            c => Self::Other(c),
        }
    }

    pub fn is_credit_note(&self) -> bool {
        CREDIT_NOTE_CODES.contains(&self.code())
    }
}

/// UNTDID 5305: VAT category codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S: Standard rate.
    StandardRate,
    /// AE: Reverse charge.
    ReverseCharge,
    /// E: Exempt from tax.
    Exempt,
    /// Z: Zero rated goods.
    ZeroRated,
    /// G: Free export item, tax not charged.
    Export,
    /// K: Intra-community supply (VAT exempt for EEA).
    IntraCommunitySupply,
    /// L: Canary Islands general indirect tax (IGIC).
    CanaryIslands,
    /// M: Tax for production, services and importation in Ceuta and Melilla (IPSI).
    CeutaMelilla,
    /// O: Services outside scope of tax.
    NotSubjectToVat,
}

impl TaxCategory {
    /// Every category, in the order the validator dispatches them.
    pub const ALL: [TaxCategory; 9] = [
        Self::StandardRate,
        Self::ReverseCharge,
        Self::Exempt,
        Self::ZeroRated,
        Self::Export,
        Self::IntraCommunitySupply,
        Self::CanaryIslands,
        Self::CeutaMelilla,
        Self::NotSubjectToVat,
    ];

    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ReverseCharge => "AE",
            Self::Exempt => "E",
            Self::ZeroRated => "Z",
            Self::Export => "G",
            Self::IntraCommunitySupply => "K",
            Self::CanaryIslands => "L",
            Self::CeutaMelilla => "M",
            Self::NotSubjectToVat => "O",
        }
    }

    /// Parse from UNTDID 5305 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "S" => Some(Self::StandardRate),
            "AE" => Some(Self::ReverseCharge),
            "E" => Some(Self::Exempt),
            "Z" => Some(Self::ZeroRated),
            "G" => Some(Self::Export),
            "K" => Some(Self::IntraCommunitySupply),
            "L" => Some(Self::CanaryIslands),
            "M" => Some(Self::CeutaMelilla),
            "O" => Some(Self::NotSubjectToVat),
            _ => None,
        }
    }

    /// Human readable category name as used in the EN 16931 rule texts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StandardRate => "Standard rated",
            Self::ReverseCharge => "Reverse charge",
            Self::Exempt => "Exempt from VAT",
            Self::ZeroRated => "Zero rated",
            Self::Export => "Export outside the EU",
            Self::IntraCommunitySupply => "Intra-community supply",
            Self::CanaryIslands => "IGIC",
            Self::CeutaMelilla => "IPSI",
            Self::NotSubjectToVat => "Not subject to VAT",
        }
    }

    /// Breakdown rows of these categories must carry an exemption reason (BT-120/121).
    pub fn requires_exemption_reason(&self) -> bool {
        matches!(
            self,
            Self::ReverseCharge
                | Self::Exempt
                | Self::Export
                | Self::IntraCommunitySupply
                | Self::NotSubjectToVat
        )
    }

    /// Categories whose tax amount is computed from the rate; all others are zero.
    pub fn is_taxed(&self) -> bool {
        matches!(
            self,
            Self::StandardRate | Self::CanaryIslands | Self::CeutaMelilla
        )
    }
}

fn category_code(category: Option<TaxCategory>, unknown: &Option<String>) -> Option<&str> {
    category.map(|c| c.code()).or(unknown.as_deref())
}

/// Document-level, line-level or price-level allowance or charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// True = charge, false = allowance.
    pub is_charge: bool,
    /// BT-92 / BT-99 / BT-136 / BT-141 / BT-147: Amount.
    pub actual_amount: Decimal,
    /// False when the amount element was absent on read (BR-31/36/41/43).
    pub amount_present: bool,
    /// BT-93 / BT-100 / BT-137 / BT-142: Base amount.
    pub basis_amount: Option<Decimal>,
    /// BT-94 / BT-101 / BT-138 / BT-143: Percentage.
    pub percent: Option<Decimal>,
    /// BT-97 / BT-104 / BT-139 / BT-144: Reason text.
    pub reason: Option<String>,
    /// BT-98 / BT-105 / BT-140 / BT-145: Reason code (UNTDID 5189 / 7161).
    pub reason_code: Option<String>,
    /// BT-95 / BT-102: VAT category (document level only).
    pub tax_category: Option<TaxCategory>,
    /// Category code read from the document that is not in UNTDID 5305.
    pub unknown_category: Option<String>,
    /// BT-96 / BT-103: VAT rate (document level only).
    pub tax_rate: Option<Decimal>,
}

impl AllowanceCharge {
    /// A document-level allowance in the given VAT category.
    pub fn allowance(amount: Decimal, category: TaxCategory, rate: Decimal) -> Self {
        Self::new(false, amount, category, rate)
    }

    /// A document-level charge in the given VAT category.
    pub fn charge(amount: Decimal, category: TaxCategory, rate: Decimal) -> Self {
        Self::new(true, amount, category, rate)
    }

    fn new(is_charge: bool, amount: Decimal, category: TaxCategory, rate: Decimal) -> Self {
        Self {
            is_charge,
            actual_amount: amount,
            amount_present: true,
            tax_category: Some(category),
            tax_rate: (category != TaxCategory::NotSubjectToVat).then_some(rate),
            ..Default::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_reason_code(mut self, code: impl Into<String>) -> Self {
        self.reason_code = Some(code.into());
        self
    }

    pub fn with_basis(mut self, basis: Decimal, percent: Decimal) -> Self {
        self.basis_amount = Some(basis);
        self.percent = Some(percent);
        self
    }

    /// The category code to write, known or not.
    pub fn category_code(&self) -> Option<&str> {
        category_code(self.tax_category, &self.unknown_category)
    }
}

/// BG-23: VAT breakdown row, keyed by (category, rate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTax {
    /// BT-118
    pub category: Option<TaxCategory>,
    /// BT-118 code that is not in UNTDID 5305, kept verbatim.
    pub unknown_category: Option<String>,
    /// BT-119; absent for category O.
    pub rate: Option<Decimal>,
    /// BT-116: Taxable amount.
    pub basis_amount: Decimal,
    /// BT-117: Tax amount.
    pub calculated_amount: Decimal,
    /// Whether BT-116 was present in the source.
    pub basis_amount_present: bool,
    /// Whether BT-117 was present in the source.
    pub calculated_amount_present: bool,
    /// BT-120
    pub exemption_reason: Option<String>,
    /// BT-121 (VATEX)
    pub exemption_reason_code: Option<String>,
    /// BT-7: Value added tax point date.
    pub tax_point_date: Option<NaiveDate>,
    /// BT-8: Value added tax point date code (UNTDID 2475: 5, 29, 72).
    pub due_date_type_code: Option<String>,
}

impl TradeTax {
    pub fn new(
        category: TaxCategory,
        rate: Option<Decimal>,
        basis_amount: Decimal,
        calculated_amount: Decimal,
    ) -> Self {
        Self {
            category: Some(category),
            rate,
            basis_amount,
            calculated_amount,
            basis_amount_present: true,
            calculated_amount_present: true,
            ..Default::default()
        }
    }

    /// The category code to write, known or not.
    pub fn category_code(&self) -> Option<&str> {
        category_code(self.category, &self.unknown_category)
    }
}

/// BG-22: Document totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// BT-106: Sum of invoice line net amounts.
    pub line_total: Decimal,
    /// BT-107: Sum of document-level allowances.
    pub allowance_total: Decimal,
    /// BT-108: Sum of document-level charges.
    pub charge_total: Decimal,
    /// BT-109: Invoice total without VAT.
    pub tax_basis_total: Decimal,
    /// BT-110: Invoice total VAT amount (invoice currency).
    pub tax_total: Decimal,
    /// BT-111: Invoice total VAT amount in accounting currency.
    pub tax_total_accounting: Option<Decimal>,
    /// BT-112: Invoice total with VAT.
    pub grand_total: Decimal,
    /// BT-113: Paid amount.
    pub prepaid: Decimal,
    /// BT-114: Rounding amount.
    pub rounding: Decimal,
    /// BT-115: Amount due for payment.
    pub due_payable: Decimal,
}

/// Presence of total elements whose absence is a rule violation in itself
/// (BR-12..BR-15), tracked apart from their values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsPresence {
    pub line_total: bool,
    pub tax_basis_total: bool,
    pub grand_total: bool,
    pub due_payable: bool,
}

impl TotalsPresence {
    pub const ALL: Self = Self {
        line_total: true,
        tax_basis_total: true,
        grand_total: true,
        due_payable: true,
    };
}

/// BG-25: Invoice line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// BT-126: Line identifier.
    pub id: String,
    /// BT-127: Line note.
    pub note: Option<String>,
    /// BT-129: Invoiced quantity.
    pub quantity: Decimal,
    /// BT-130: Unit of measure (UN/ECE Rec 20/21).
    pub unit: String,
    /// BT-131: Line net amount.
    pub line_total: Decimal,
    /// Whether BT-131 was present in the source.
    pub line_total_present: bool,
    /// BT-132: Referenced purchase order line.
    pub order_line_reference: Option<String>,
    /// BT-133: Buyer accounting reference.
    pub accounting_reference: Option<String>,
    /// BG-26: Line period.
    pub billing_period: Option<Period>,
    /// BG-27/BG-28: Line allowances and charges.
    pub allowance_charges: Vec<AllowanceCharge>,
    /// BT-146: Item net price.
    pub net_price: Decimal,
    /// Whether BT-146 was present in the source.
    pub net_price_present: bool,
    /// BT-149: Price base quantity.
    pub base_quantity: Option<Decimal>,
    /// BT-150: Price base quantity unit.
    pub base_quantity_unit: Option<String>,
    /// BT-148: Item gross price.
    pub gross_price: Option<Decimal>,
    /// BT-147: Price discounts applied to the gross price.
    pub price_allowance_charges: Vec<AllowanceCharge>,
    /// BT-151: Invoiced item VAT category.
    pub tax_category: Option<TaxCategory>,
    /// BT-151 code that is not in UNTDID 5305, kept verbatim.
    pub unknown_category: Option<String>,
    /// BT-152: Invoiced item VAT rate.
    pub tax_rate: Option<Decimal>,
    /// BT-153: Item name.
    pub item_name: String,
    /// BT-154: Item description.
    pub description: Option<String>,
    /// BT-155: Seller's item identifier.
    pub seller_item_id: Option<String>,
    /// BT-156: Buyer's item identifier.
    pub buyer_item_id: Option<String>,
    /// BT-157: Item standard identifier.
    pub standard_item_id: Option<Identifier>,
    /// BT-158: Item classification identifiers.
    pub classifications: Vec<Classification>,
    /// BT-159: Item country of origin.
    pub origin_country: Option<String>,
    /// BG-32: Item attributes.
    pub attributes: Vec<ItemAttribute>,
}

impl InvoiceLine {
    /// Line allowances (BG-27) in document order.
    pub fn allowances(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowance_charges.iter().filter(|ac| !ac.is_charge)
    }

    /// Line charges (BG-28) in document order.
    pub fn charges(&self) -> impl Iterator<Item = &AllowanceCharge> {
        self.allowance_charges.iter().filter(|ac| ac.is_charge)
    }

    /// The category code to write, known or not.
    pub fn category_code(&self) -> Option<&str> {
        category_code(self.tax_category, &self.unknown_category)
    }
}

/// BT-158: Item classification identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub code: String,
    /// Scheme identifier (UNTDID 7143).
    pub list_id: Option<String>,
    pub list_version: Option<String>,
}

/// BG-32: Item attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    /// BT-160
    pub name: String,
    /// BT-161
    pub value: String,
}

//! CII and UBL reading and writing.
//!
//! Reading dispatches on the namespace of the root element:
//!
//! | Root | Reader |
//! |------|--------|
//! | `rsm:CrossIndustryInvoice` | CII |
//! | UBL `Invoice` | UBL |
//! | UBL `CreditNote` | UBL, type code defaults to 381 |
//!
//! Anything else is [`InvoiceError::UnsupportedDocument`]. Readers return
//! the model even when it is semantically incomplete; run
//! [`Invoice::validate`] afterwards.
//!
//! Writing picks the syntax from [`Invoice::schema_type`]. Output is
//! deterministic for a given model.
//!
//! ```
//! use einvoice::xml;
//!
//! let invoice = xml::parse_str(r#"<?xml version="1.0" encoding="UTF-8"?>
//! <Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!          xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!   <cbc:ID>INV-1</cbc:ID>
//!   <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
//! </Invoice>"#).unwrap();
//! assert_eq!(invoice.number, "INV-1");
//!
//! let xml = xml::to_ubl_xml(&invoice).unwrap();
//! assert!(xml.contains("<cbc:ID>INV-1</cbc:ID>"));
//! ```

mod cii;
mod tree;
mod ubl;
mod writer;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{Invoice, InvoiceError, SchemaType};
use tree::Element;

pub use writer::{format_amount, format_percent, format_quantity};

/// Namespace URIs of both syntaxes.
pub mod ns {
    /// CII root (`rsm`).
    pub const RSM: &str = "urn:un:unece:uncefact:data:standard:CrossIndustryInvoice:100";
    /// CII aggregates (`ram`).
    pub const RAM: &str =
        "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";
    /// CII qualified data types (`qdt`).
    pub const QDT: &str = "urn:un:unece:uncefact:data:standard:QualifiedDataType:100";
    /// CII unqualified data types (`udt`).
    pub const UDT: &str = "urn:un:unece:uncefact:data:standard:UnqualifiedDataType:100";
    /// XML Schema (`xs`), declared on CII output.
    pub const XS: &str = "http://www.w3.org/2001/XMLSchema";
    /// UBL Invoice root.
    pub const UBL_INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    /// UBL CreditNote root.
    pub const UBL_CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
    /// UBL aggregate components (`cac`).
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    /// UBL basic components (`cbc`).
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";

    /// Namespace URI for a canonical query prefix.
    pub(crate) fn uri_for_prefix(prefix: &str) -> Option<&'static str> {
        match prefix {
            "rsm" => Some(RSM),
            "ram" => Some(RAM),
            "qdt" => Some(QDT),
            "udt" => Some(UDT),
            "ubl" => Some(UBL_INVOICE),
            "cn" => Some(UBL_CREDIT_NOTE),
            "cac" => Some(CAC),
            "cbc" => Some(CBC),
            _ => None,
        }
    }
}

/// Parse an invoice from a string, detecting the syntax from the root element.
pub fn parse_str(xml: &str) -> Result<Invoice, InvoiceError> {
    let root = tree::parse(xml.trim_start_matches('\u{feff}'))?;
    match (root.ns.as_str(), root.name.as_str()) {
        (ns::RSM, "CrossIndustryInvoice") => cii::read(&root),
        (ns::UBL_INVOICE, "Invoice") | (ns::UBL_CREDIT_NOTE, "CreditNote") => ubl::read(&root),
        (namespace, name) => Err(InvoiceError::UnsupportedDocument {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }),
    }
}

/// Read the stream to its end and parse it as an invoice.
pub fn parse_from_stream(mut reader: impl Read) -> Result<Invoice, InvoiceError> {
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    parse_str(&xml)
}

/// Open and parse an invoice file.
pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Invoice, InvoiceError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading invoice file");
    parse_from_stream(BufReader::new(File::open(path)?))
}

/// Parse a CII document; any other root is rejected.
pub fn from_cii_xml(xml: &str) -> Result<Invoice, InvoiceError> {
    let invoice = parse_str(xml)?;
    expect_schema(invoice, SchemaType::Cii)
}

/// Parse a UBL Invoice or CreditNote; any other root is rejected.
pub fn from_ubl_xml(xml: &str) -> Result<Invoice, InvoiceError> {
    let invoice = parse_str(xml)?;
    expect_schema(invoice, SchemaType::Ubl)
}

fn expect_schema(invoice: Invoice, schema: SchemaType) -> Result<Invoice, InvoiceError> {
    if invoice.schema_type == schema {
        Ok(invoice)
    } else {
        Err(InvoiceError::Xml(format!(
            "expected a {schema:?} document, found {:?}",
            invoice.schema_type
        )))
    }
}

/// Serialize as CII regardless of the invoice's schema tag.
pub fn to_cii_xml(invoice: &Invoice) -> Result<String, InvoiceError> {
    into_string(cii::write(invoice)?)
}

/// Serialize as UBL regardless of the invoice's schema tag.
pub fn to_ubl_xml(invoice: &Invoice) -> Result<String, InvoiceError> {
    into_string(ubl::write(invoice)?)
}

fn into_string(bytes: Vec<u8>) -> Result<String, InvoiceError> {
    String::from_utf8(bytes).map_err(|e| InvoiceError::Xml(format!("UTF-8 error: {e}")))
}

impl Invoice {
    /// Write the invoice in the syntax named by [`Invoice::schema_type`].
    pub fn write(&self, out: &mut impl Write) -> Result<(), InvoiceError> {
        let bytes = match self.schema_type {
            SchemaType::Cii => cii::write(self)?,
            SchemaType::Ubl => ubl::write(self)?,
        };
        out.write_all(&bytes)?;
        Ok(())
    }

    /// The invoice as an XML string, see [`Invoice::write`].
    pub fn to_xml(&self) -> Result<String, InvoiceError> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        into_string(out)
    }
}

// Value conversion shared by both readers.

/// xs:decimal lexical form: optional sign, digits, optional fraction.
/// No exponent, no grouping characters.
fn is_decimal_lexical(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (!int.is_empty() || !frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn parse_decimal(text: &str, element: &str) -> Result<Decimal, InvoiceError> {
    let text = text.trim();
    let invalid = || InvoiceError::InvalidDecimal {
        element: element.to_string(),
        value: text.to_string(),
    };
    if !is_decimal_lexical(text) {
        return Err(invalid());
    }
    Decimal::from_str(text).map_err(|_| invalid())
}

/// Decimal content of `el` itself.
pub(crate) fn decimal_of(el: &Element) -> Result<Decimal, InvoiceError> {
    parse_decimal(el.text(), &el.name)
}

/// Decimal at `path`, `None` when the element is absent.
pub(crate) fn decimal_at(ctx: &Element, path: &str) -> Result<Option<Decimal>, InvoiceError> {
    ctx.select(path)
        .map(|el| parse_decimal(el.text(), path))
        .transpose()
}

pub(crate) fn parse_date(text: &str, format: &str, element: &str) -> Result<NaiveDate, InvoiceError> {
    NaiveDate::parse_from_str(text.trim(), format).map_err(|_| InvoiceError::InvalidDate {
        element: element.to_string(),
        value: text.trim().to_string(),
    })
}

pub(crate) fn decode_base64(text: &str, element: &str) -> Result<Vec<u8>, InvoiceError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| InvoiceError::InvalidBase64 {
            element: element.to_string(),
        })
}

pub(crate) fn encode_base64(content: &[u8]) -> String {
    STANDARD.encode(content)
}

/// Non-empty trimmed text at `path`.
pub(crate) fn text_opt(ctx: &Element, path: &str) -> Option<String> {
    ctx.text_at(path).filter(|t| !t.is_empty()).map(str::to_string)
}

pub(crate) fn indicator(text: &str) -> bool {
    matches!(text.trim(), "true" | "TRUE" | "True" | "1")
}

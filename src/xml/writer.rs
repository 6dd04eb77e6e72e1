use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;

use crate::core::InvoiceError;

fn xml_io(e: std::io::Error) -> InvoiceError {
    InvoiceError::Xml(format!("write error: {e}"))
}

/// Thin wrapper over the quick-xml writer: 2-space indentation, UTF-8
/// declaration, prefixed element names passed through verbatim.
pub(crate) struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, InvoiceError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    pub fn start(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)?;
        Ok(self)
    }

    pub fn end(&mut self, name: &str) -> Result<&mut Self, InvoiceError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text(&mut self, name: &str, text: &str) -> Result<&mut Self, InvoiceError> {
        self.text_with_attrs(name, text, &[])
    }

    pub fn text_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, InvoiceError> {
        self.start_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }

    /// Text element only when `value` is `Some`.
    pub fn opt_text(&mut self, name: &str, value: Option<&str>) -> Result<&mut Self, InvoiceError> {
        if let Some(value) = value {
            self.text(name, value)?;
        }
        Ok(self)
    }

    /// Text element with a `schemeID` attribute when a scheme is known.
    pub fn scheme_text(
        &mut self,
        name: &str,
        value: &str,
        scheme: Option<&str>,
    ) -> Result<&mut Self, InvoiceError> {
        match scheme {
            Some(scheme) => self.text_with_attrs(name, value, &[("schemeID", scheme)]),
            None => self.text(name, value),
        }
    }

    /// Monetary amount with a `currencyID` attribute.
    pub fn amount(&mut self, name: &str, amount: Decimal, currency: &str) -> Result<&mut Self, InvoiceError> {
        self.text_with_attrs(name, &format_amount(amount), &[("currencyID", currency)])
    }

    /// Monetary amount without a currency attribute.
    pub fn bare_amount(&mut self, name: &str, amount: Decimal) -> Result<&mut Self, InvoiceError> {
        self.text(name, &format_amount(amount))
    }

    /// Quantity with a `unitCode` attribute (omitted when the unit is empty).
    pub fn quantity(&mut self, name: &str, qty: Decimal, unit: &str) -> Result<&mut Self, InvoiceError> {
        if unit.is_empty() {
            self.text(name, &format_quantity(qty))
        } else {
            self.text_with_attrs(name, &format_quantity(qty), &[("unitCode", unit)])
        }
    }

    pub fn percent(&mut self, name: &str, value: Decimal) -> Result<&mut Self, InvoiceError> {
        self.text(name, &format_percent(value))
    }

    /// ISO 8601 date (`YYYY-MM-DD`), the UBL form.
    pub fn iso_date(&mut self, name: &str, date: NaiveDate) -> Result<&mut Self, InvoiceError> {
        self.text(name, &date.format("%Y-%m-%d").to_string())
    }
}

/// Pad `d` with trailing zeros to at least `min` fraction digits, keeping
/// any further significant digits.
fn format_fixed(d: Decimal, min: usize) -> String {
    let s = d.normalize().to_string();
    let decimals = s.find('.').map(|dot| s.len() - dot - 1);
    match decimals {
        Some(n) if n >= min => s,
        Some(n) => format!("{s}{}", "0".repeat(min - n)),
        None if min == 0 => s,
        None => format!("{s}.{}", "0".repeat(min)),
    }
}

/// Monetary amount: at least 2 fraction digits.
pub fn format_amount(d: Decimal) -> String {
    format_fixed(d, 2)
}

/// Quantity: at least 4 fraction digits.
pub fn format_quantity(d: Decimal) -> String {
    format_fixed(d, 4)
}

/// Percentage: trailing zeros removed.
pub fn format_percent(d: Decimal) -> String {
    format_fixed(d, 0)
}

//! # einvoice
//!
//! EN 16931 electronic invoices: a semantic model, readers and writers for
//! both syntaxes (UN/CEFACT CII and OASIS UBL 2.1), and a validator for the
//! EN 16931 business rules with the PEPPOL BIS Billing 3.0 overlay.
//!
//! Profiles carried in either syntax are recognized from the specification
//! identifier (BT-24): Factur-X / ZUGFeRD MINIMUM to EXTENDED, XRechnung,
//! plain EN 16931 and PEPPOL.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use einvoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("RE-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
//!     .seller(PartyBuilder::new("ACME GmbH", AddressBuilder::new("Berlin", "10115", "DE").build())
//!         .vat_id("DE123456789").build())
//!     .buyer(PartyBuilder::new("Kunde AG", AddressBuilder::new("München", "80331", "DE").build()).build())
//!     .add_line(LineBuilder::new("1", "Beratung", dec!(10), "HUR", dec!(150))
//!         .tax(TaxCategory::StandardRate, dec!(19)).build())
//!     .build()
//!     .unwrap();
//!
//! assert!(invoice.validate().is_ok());
//! assert_eq!(invoice.totals.grand_total, dec!(1785.00));
//! # #[cfg(feature = "xml")]
//! # {
//! let xml = invoice.to_xml().unwrap();
//! let parsed = einvoice::xml::parse_str(&xml).unwrap();
//! assert_eq!(parsed, invoice);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, arithmetic, rule catalogue, validator |
//! | `xml` (default) | CII and UBL reading and writing |
//! | `peppol` (default) | PEPPOL BIS Billing 3.0 rules and EAS code list |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod rules;

#[cfg(feature = "core")]
pub mod validation;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "peppol")]
pub mod peppol;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "core")]
pub use crate::validation::validate;

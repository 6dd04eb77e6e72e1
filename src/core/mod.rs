//! Core invoice model, arithmetic helpers and errors.
//!
//! The types follow the EN 16931 semantic model. All monetary values use
//! [`rust_decimal::Decimal`]; nothing here touches XML.

mod arithmetic;
mod builder;
pub mod countries;
mod error;
pub mod profile;
mod totals;
mod types;

pub use arithmetic::*;
pub use builder::*;
pub use error::*;
pub use profile::ProfileLevel;
pub use types::*;

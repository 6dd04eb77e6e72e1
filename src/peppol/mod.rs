//! PEPPOL BIS Billing 3.0 overlay.
//!
//! PEPPOL BIS 3.0 is a CIUS of EN 16931: same semantic model and syntaxes,
//! stricter rules. The extra rules run as part of [`validate`](crate::validation::validate)
//! whenever the invoice declares the PEPPOL specification identifier (BT-24)
//! or a PEPPOL business process (BT-23).

mod eas;
mod validate;

pub use eas::{EasScheme, eas_scheme_for_country, is_known_eas_code};
pub(crate) use validate::check;

pub use crate::core::profile::{PEPPOL_BILLING_3_0, PEPPOL_BILLING_PROCESS};

use crate::core::Invoice;
use crate::core::profile::is_peppol_business_process;

/// Whether the PEPPOL rules apply to `invoice`.
pub(crate) fn applies_to(invoice: &Invoice) -> bool {
    invoice.is_peppol()
        || invoice
            .business_process
            .as_deref()
            .is_some_and(is_peppol_business_process)
}

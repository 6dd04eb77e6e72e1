//! EN 16931 business-rule validation.
//!
//! Rules run in fixed phases and every violation is collected; the
//! validator never stops at the first failure:
//!
//! 1. structure and cardinality (BR-01..BR-67, BR-DEC)
//! 2. document arithmetic (BR-CO-10..BR-CO-17)
//! 3. cross-field conditions (BR-CO-03..BR-CO-26)
//! 4. VAT category rules (BR-S, BR-AE, BR-E, BR-Z, BR-G, BR-IC, BR-IG, BR-IP, BR-O)
//! 5. PEPPOL BIS Billing 3.0, for PEPPOL documents only
//! 6. non-negative allowance amounts and unexpected tax currencies
//!
//! Line-level rules need at least the BASIC profile; the VAT breakdown
//! requirement and the category rules need at least BASIC WL. An
//! unrecognized specification identifier disables both groups.

mod category;
mod conditions;
mod extra;
mod structural;
mod totals;

use tracing::{debug, info};

use crate::core::{Invoice, ProfileLevel, ValidationError, Violation};
use crate::rules::{self, Rule};

/// Collects violations in evaluation order.
pub(crate) struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub(crate) fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Record a violation of the catalogued rule `code`.
    pub(crate) fn add(&mut self, code: &'static str, text: impl Into<String>) {
        let rule = rules::lookup(code)
            .copied()
            .unwrap_or(Rule::new(code, &[], ""));
        self.violations.push(Violation::new(rule, text));
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}

/// Whether rules on individual lines apply to this invoice's profile.
pub(crate) fn line_rules_apply(invoice: &Invoice) -> bool {
    invoice.meets_profile_level(ProfileLevel::Basic)
}

/// Whether the VAT breakdown rules apply to this invoice's profile.
pub(crate) fn breakdown_rules_apply(invoice: &Invoice) -> bool {
    invoice.meets_profile_level(ProfileLevel::BasicWl)
}

fn phase(report: &mut Report, name: &str, check: impl FnOnce(&mut Report)) {
    let before = report.violations.len();
    check(report);
    debug!(phase = name, violations = report.violations.len() - before, "rule phase done");
}

/// Validate an invoice against the EN 16931 business rules and, for PEPPOL
/// documents, the PEPPOL BIS Billing 3.0 rules.
pub fn validate(invoice: &Invoice) -> Result<(), ValidationError> {
    debug!(
        invoice = %invoice.number,
        profile = ?invoice.profile_level(),
        "validating invoice"
    );
    let mut report = Report::new();

    phase(&mut report, "structure", |r| structural::check(invoice, r));
    phase(&mut report, "arithmetic", |r| totals::check(invoice, r));
    phase(&mut report, "conditions", |r| conditions::check(invoice, r));
    if breakdown_rules_apply(invoice) {
        phase(&mut report, "vat-category", |r| category::check(invoice, r));
    }
    #[cfg(feature = "peppol")]
    if crate::peppol::applies_to(invoice) {
        phase(&mut report, "peppol", |r| crate::peppol::check(invoice, r));
    }
    phase(&mut report, "extra", |r| extra::check(invoice, r));

    if !report.violations.is_empty() {
        info!(
            invoice = %invoice.number,
            violations = report.violations.len(),
            "invoice failed validation"
        );
    }
    report.finish()
}

impl Invoice {
    /// Validate against the EN 16931 business rules. See [`validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }
}

/// Format a decimal for violation messages.
pub(crate) fn show(value: rust_decimal::Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_resolves_catalogued_rules() {
        let mut report = Report::new();
        report.add("BR-CO-10", "mismatch");
        let err = report.finish().unwrap_err();
        assert_eq!(err.violations()[0].rule.fields, &["BT-106", "BT-131"]);
        assert_eq!(err.violations()[0].text, "mismatch");
    }

    #[test]
    fn empty_report_is_ok() {
        assert!(Report::new().finish().is_ok());
    }

    #[test]
    fn empty_invoice_reports_missing_identity() {
        let err = Invoice::default().validate().unwrap_err();
        for code in ["BR-01", "BR-02", "BR-03", "BR-04", "BR-05", "BR-06", "BR-07", "BR-08", "BR-10"] {
            assert!(err.has_rule_code(code), "missing {code}");
        }
        // unknown profile: line and breakdown groups are off
        assert!(!err.has_rule_code("BR-16"));
        assert!(!err.has_rule_code("BR-CO-18"));
    }
}

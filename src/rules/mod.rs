//! Business rule catalogue.
//!
//! Every rule the validator can report is listed here with the semantic
//! fields (BT/BG terms) it concerns and its normative description. Rule
//! codes are stable and zero-padded (`BR-05`, `BR-CO-10`, `BR-S-01`).

mod en16931;
mod peppol;

use serde::Serialize;

pub use en16931::EN16931_RULES;
pub use peppol::PEPPOL_RULES;

/// A business rule descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    /// Rule code, e.g. `BR-CO-10`.
    pub code: &'static str,
    /// Business terms the rule refers to, e.g. `["BT-106", "BT-131"]`.
    pub fields: &'static [&'static str],
    /// Normative rule text.
    pub description: &'static str,
}

impl Rule {
    pub const fn new(
        code: &'static str,
        fields: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            code,
            fields,
            description,
        }
    }
}

/// Look up a rule by code in the EN 16931 and PEPPOL catalogues.
pub fn lookup(code: &str) -> Option<&'static Rule> {
    EN16931_RULES
        .iter()
        .chain(PEPPOL_RULES.iter())
        .find(|r| r.code == code)
}

/// Iterate over every known rule, EN 16931 first.
pub fn all() -> impl Iterator<Item = &'static Rule> {
    EN16931_RULES.iter().chain(PEPPOL_RULES.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for rule in all() {
            assert!(seen.insert(rule.code), "duplicate rule code {}", rule.code);
        }
    }

    #[test]
    fn every_rule_is_described() {
        for rule in all() {
            assert!(!rule.description.is_empty(), "{} has no description", rule.code);
            assert!(!rule.fields.is_empty(), "{} names no fields", rule.code);
        }
    }

    #[test]
    fn codes_are_zero_padded() {
        for rule in all() {
            let Some(number) = rule.code.rsplit('-').next() else {
                continue;
            };
            if number.bytes().all(|b| b.is_ascii_digit()) {
                assert!(number.len() >= 2, "{} is not zero-padded", rule.code);
            }
        }
    }

    #[test]
    fn lookup_finds_both_catalogues() {
        let rule = lookup("BR-CO-10").unwrap();
        assert_eq!(rule.fields, &["BT-106", "BT-131"]);
        assert!(lookup("PEPPOL-EN16931-R001").is_some());
        assert!(lookup("BR-99").is_none());
    }

    #[test]
    fn every_category_family_is_complete() {
        for family in ["BR-S", "BR-AE", "BR-E", "BR-Z", "BR-G", "BR-IC", "BR-IG", "BR-IP", "BR-O"] {
            for n in 1..=10 {
                let code = format!("{family}-{n:02}");
                assert!(lookup(&code).is_some(), "missing {code}");
            }
        }
        for code in ["BR-IC-11", "BR-IC-12", "BR-O-11", "BR-O-12", "BR-O-13", "BR-O-14"] {
            assert!(lookup(code).is_some(), "missing {code}");
        }
    }
}

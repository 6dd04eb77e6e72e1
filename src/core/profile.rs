//! Profile detection from the specification identifier (BT-24).
//!
//! Factur-X, ZUGFeRD, XRechnung and PEPPOL all reuse the EN 16931 semantic
//! model and differ in which parts of it they admit. The validator uses the
//! detected [`ProfileLevel`] to decide which rule groups apply.

use serde::{Deserialize, Serialize};

use super::Invoice;

/// Plain EN 16931 core specification.
pub const EN16931: &str = "urn:cen.eu:en16931:2017";
/// Factur-X 1.0 MINIMUM.
pub const FACTURX_MINIMUM: &str = "urn:factur-x.eu:1p0:minimum";
/// Factur-X 1.0 BASIC WL.
pub const FACTURX_BASIC_WL: &str = "urn:factur-x.eu:1p0:basicwl";
/// Factur-X 1.0 BASIC.
pub const FACTURX_BASIC: &str = "urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic";
/// Factur-X 1.0 BASIC, colon-separated spelling found in the wild.
pub const FACTURX_BASIC_ALT: &str = "urn:cen.eu:en16931:2017:compliant:factur-x.eu:1p0:basic";
/// Factur-X 1.0 EXTENDED.
pub const FACTURX_EXTENDED: &str =
    "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended";
/// ZUGFeRD 2.0 MINIMUM.
pub const ZUGFERD_MINIMUM: &str = "urn:zugferd.de:2p0:minimum";
/// ZUGFeRD 2.0 BASIC WL.
pub const ZUGFERD_BASIC_WL: &str = "urn:zugferd.de:2p0:basicwl";
/// ZUGFeRD 2.0 BASIC.
pub const ZUGFERD_BASIC: &str = "urn:cen.eu:en16931:2017#compliant#urn:zugferd.de:2p0:basic";
/// ZUGFeRD 2.0 EXTENDED.
pub const ZUGFERD_EXTENDED: &str =
    "urn:cen.eu:en16931:2017#conformant#urn:zugferd.de:2p0:extended";
/// XRechnung 3.0 CIUS.
pub const XRECHNUNG_3_0: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:xeinkauf.de:kosit:xrechnung_3.0";
/// PEPPOL BIS Billing 3.0.
pub const PEPPOL_BILLING_3_0: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0";
/// PEPPOL BIS Billing 3.0 default business process (BT-23).
pub const PEPPOL_BILLING_PROCESS: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Ordered profile conformance levels.
///
/// Anything unrecognized is [`ProfileLevel::Unknown`] (level 0), which
/// disables the profile-gated rule groups.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ProfileLevel {
    #[default]
    Unknown = 0,
    Minimum = 1,
    BasicWl = 2,
    Basic = 3,
    En16931 = 4,
    Extended = 5,
}

static PROFILES: &[(&str, ProfileLevel)] = &[
    (FACTURX_MINIMUM, ProfileLevel::Minimum),
    (ZUGFERD_MINIMUM, ProfileLevel::Minimum),
    (FACTURX_BASIC_WL, ProfileLevel::BasicWl),
    (ZUGFERD_BASIC_WL, ProfileLevel::BasicWl),
    (FACTURX_BASIC, ProfileLevel::Basic),
    (FACTURX_BASIC_ALT, ProfileLevel::Basic),
    (ZUGFERD_BASIC, ProfileLevel::Basic),
    (EN16931, ProfileLevel::En16931),
    (XRECHNUNG_3_0, ProfileLevel::En16931),
    (PEPPOL_BILLING_3_0, ProfileLevel::En16931),
    (FACTURX_EXTENDED, ProfileLevel::Extended),
    (ZUGFERD_EXTENDED, ProfileLevel::Extended),
];

impl ProfileLevel {
    /// Look up the level of a specification identifier.
    pub fn from_urn(urn: &str) -> Self {
        let urn = urn.trim();
        PROFILES
            .iter()
            .find(|(known, _)| *known == urn)
            .map(|(_, level)| *level)
            .unwrap_or_default()
    }

    /// Numeric level, 0 through 5.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// True if `process` has the PEPPOL business process shape
/// `urn:fdc:peppol.eu:2017:poacc:billing:NN:1.0`.
pub fn is_peppol_business_process(process: &str) -> bool {
    process
        .trim()
        .strip_prefix("urn:fdc:peppol.eu:2017:poacc:billing:")
        .and_then(|rest| rest.strip_suffix(":1.0"))
        .is_some_and(|nn| nn.len() == 2 && nn.bytes().all(|b| b.is_ascii_digit()))
}

impl Invoice {
    /// Profile level derived from BT-24.
    pub fn profile_level(&self) -> ProfileLevel {
        ProfileLevel::from_urn(&self.specification_id)
    }

    /// True if the invoice's profile is at least `level`.
    ///
    /// An unrecognized profile never meets any level.
    pub fn meets_profile_level(&self, level: ProfileLevel) -> bool {
        let own = self.profile_level();
        own != ProfileLevel::Unknown && own >= level
    }

    pub fn is_minimum(&self) -> bool {
        self.profile_level() == ProfileLevel::Minimum
    }

    pub fn is_basic_wl(&self) -> bool {
        self.profile_level() == ProfileLevel::BasicWl
    }

    pub fn is_basic(&self) -> bool {
        self.profile_level() == ProfileLevel::Basic
    }

    /// EN 16931 level, which includes the XRechnung and PEPPOL CIUS.
    pub fn is_en16931(&self) -> bool {
        self.profile_level() == ProfileLevel::En16931
    }

    pub fn is_extended(&self) -> bool {
        self.profile_level() == ProfileLevel::Extended
    }

    pub fn is_xrechnung(&self) -> bool {
        self.specification_id.trim() == XRECHNUNG_3_0
    }

    pub fn is_peppol(&self) -> bool {
        self.specification_id.trim() == PEPPOL_BILLING_3_0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_profile(urn: &str) -> Invoice {
        Invoice {
            specification_id: urn.into(),
            ..Default::default()
        }
    }

    #[test]
    fn levels_are_ordered() {
        assert!(ProfileLevel::Minimum < ProfileLevel::BasicWl);
        assert!(ProfileLevel::BasicWl < ProfileLevel::Basic);
        assert!(ProfileLevel::Basic < ProfileLevel::En16931);
        assert!(ProfileLevel::En16931 < ProfileLevel::Extended);
        assert_eq!(ProfileLevel::Extended.as_u8(), 5);
    }

    #[test]
    fn known_urns() {
        assert_eq!(ProfileLevel::from_urn(FACTURX_MINIMUM), ProfileLevel::Minimum);
        assert_eq!(ProfileLevel::from_urn(ZUGFERD_BASIC_WL), ProfileLevel::BasicWl);
        assert_eq!(ProfileLevel::from_urn(FACTURX_BASIC_ALT), ProfileLevel::Basic);
        assert_eq!(ProfileLevel::from_urn(XRECHNUNG_3_0), ProfileLevel::En16931);
        assert_eq!(ProfileLevel::from_urn(PEPPOL_BILLING_3_0), ProfileLevel::En16931);
        assert_eq!(ProfileLevel::from_urn(ZUGFERD_EXTENDED), ProfileLevel::Extended);
    }

    #[test]
    fn unknown_urn_is_level_zero() {
        assert_eq!(ProfileLevel::from_urn("urn:example:custom"), ProfileLevel::Unknown);
        assert_eq!(ProfileLevel::from_urn(""), ProfileLevel::Unknown);
        assert!(!with_profile("urn:example:custom").meets_profile_level(ProfileLevel::Minimum));
    }

    #[test]
    fn meets_profile_level_is_inclusive() {
        let inv = with_profile(FACTURX_BASIC);
        assert!(inv.is_basic());
        assert!(inv.meets_profile_level(ProfileLevel::BasicWl));
        assert!(inv.meets_profile_level(ProfileLevel::Basic));
        assert!(!inv.meets_profile_level(ProfileLevel::En16931));
    }

    #[test]
    fn cius_predicates() {
        assert!(with_profile(XRECHNUNG_3_0).is_xrechnung());
        assert!(with_profile(XRECHNUNG_3_0).is_en16931());
        assert!(with_profile(PEPPOL_BILLING_3_0).is_peppol());
        assert!(!with_profile(EN16931).is_peppol());
    }

    #[test]
    fn peppol_business_process_shape() {
        assert!(is_peppol_business_process(PEPPOL_BILLING_PROCESS));
        assert!(is_peppol_business_process("urn:fdc:peppol.eu:2017:poacc:billing:12:1.0"));
        assert!(!is_peppol_business_process("urn:fdc:peppol.eu:2017:poacc:billing:1:1.0"));
        assert!(!is_peppol_business_process("urn:fdc:peppol.eu:2017:poacc:billing:ab:1.0"));
        assert!(!is_peppol_business_process("urn:fdc:peppol.eu:2017:poacc:billing:01:2.0"));
    }
}

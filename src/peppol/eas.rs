//! Electronic Address Scheme (EAS) codes for electronic addresses (BT-34/BT-49).

use serde::{Deserialize, Serialize};

/// An EAS code with its issuing agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasScheme {
    /// The scheme code (e.g. "0088", "9930", "EM").
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl EasScheme {
    /// GS1 GLN (Global Location Number).
    pub const GLN: Self = Self {
        code: "0088",
        description: "GS1 GLN",
    };
    /// German Leitweg-ID (public sector routing).
    pub const LEITWEG_ID: Self = Self {
        code: "0204",
        description: "Leitweg-ID",
    };
    /// Belgian enterprise number.
    pub const BE_EN: Self = Self {
        code: "0208",
        description: "Belgian enterprise number",
    };
    /// German VAT number.
    pub const DE_VAT: Self = Self {
        code: "9930",
        description: "Germany VAT number",
    };
    /// Austrian VAT number.
    pub const AT_VAT: Self = Self {
        code: "9914",
        description: "Austria VAT number",
    };
    /// French SIRENE.
    pub const FR_SIRENE: Self = Self {
        code: "0009",
        description: "SIRET-CODE",
    };
    /// Italian Codice Fiscale.
    pub const IT_CF: Self = Self {
        code: "0210",
        description: "Codice Fiscale",
    };
    /// Dutch OIN (public sector).
    pub const NL_OIN: Self = Self {
        code: "0190",
        description: "Dutch Originator's Identification Number",
    };
    /// Danish CVR.
    pub const DK_CVR: Self = Self {
        code: "0184",
        description: "DIGSTORG",
    };
    /// Finnish OVT.
    pub const FI_OVT: Self = Self {
        code: "0216",
        description: "OVTcode",
    };
    /// Swedish organisation number.
    pub const SE_ORG: Self = Self {
        code: "0007",
        description: "Organisationsnummer",
    };
    /// Norwegian organisation number.
    pub const NO_ORG: Self = Self {
        code: "0192",
        description: "Enhetsregisteret ved Bronnoysundregisterne",
    };
    /// Plain e-mail address.
    pub const EMAIL: Self = Self {
        code: "EM",
        description: "Electronic mail",
    };
}

/// Every EAS code currently published in the PEPPOL code list, sorted for
/// binary search.
static EAS_CODES: &[&str] = &[
    "0002", "0007", "0009", "0037", "0060", "0088", "0096", "0097", "0106", "0130", "0135",
    "0142", "0147", "0151", "0154", "0158", "0170", "0177", "0183", "0184", "0188", "0190",
    "0191", "0192", "0193", "0194", "0195", "0196", "0198", "0199", "0200", "0201", "0202",
    "0203", "0204", "0205", "0208", "0209", "0210", "0211", "0212", "0213", "0215", "0216",
    "0217", "0218", "0221", "0225", "0230", "0235", "0240", "9901", "9910", "9913", "9914",
    "9915", "9918", "9919", "9920", "9922", "9923", "9924", "9925", "9926", "9927", "9928",
    "9929", "9930", "9931", "9932", "9933", "9934", "9935", "9936", "9937", "9938", "9939",
    "9940", "9941", "9942", "9943", "9944", "9945", "9946", "9947", "9948", "9949", "9950",
    "9951", "9952", "9953", "9957", "9959", "AN", "AQ", "AS", "AU", "EM",
];

/// Check whether `code` is a known EAS scheme code.
pub fn is_known_eas_code(code: &str) -> bool {
    EAS_CODES.binary_search(&code.trim()).is_ok()
}

/// Return the default EAS scheme for a given country code.
///
/// For Germany this is the Leitweg-ID scheme used by the public sector;
/// use [`EasScheme::DE_VAT`] for B2B.
pub fn eas_scheme_for_country(country_code: &str) -> Option<EasScheme> {
    match country_code.to_uppercase().as_str() {
        "DE" => Some(EasScheme::LEITWEG_ID),
        "AT" => Some(EasScheme::AT_VAT),
        "BE" => Some(EasScheme::BE_EN),
        "DK" => Some(EasScheme::DK_CVR),
        "FI" => Some(EasScheme::FI_OVT),
        "FR" => Some(EasScheme::FR_SIRENE),
        "IT" => Some(EasScheme::IT_CF),
        "NL" => Some(EasScheme::NL_OIN),
        "NO" => Some(EasScheme::NO_ORG),
        "SE" => Some(EasScheme::SE_ORG),
        _ => None,
    }
}

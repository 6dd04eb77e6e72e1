//! UN/CEFACT Cross Industry Invoice (D16B), as used by Factur-X, ZUGFeRD
//! and XRechnung CII.

mod read;
mod write;

pub(crate) use read::read;
pub(crate) use write::write;

/// Supporting document type code for a plain additional document; maps to
/// `SupportingDocument::type_code == None`.
const SUPPORTING_DOCUMENT_TYPE: &str = "916";

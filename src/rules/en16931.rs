use super::Rule;

/// EN 16931-1 business rules plus the library's own checks on
/// non-negative allowance amounts and unexpected tax total currencies.
pub static EN16931_RULES: &[Rule] = &[
    // Core (BR-01..BR-67)
    Rule::new("BR-01", &["BT-24"], "An Invoice shall have a Specification identifier (BT-24)."),
    Rule::new("BR-02", &["BT-1"], "An Invoice shall have an Invoice number (BT-1)."),
    Rule::new("BR-03", &["BT-2"], "An Invoice shall have an Invoice issue date (BT-2)."),
    Rule::new("BR-04", &["BT-3"], "An Invoice shall have an Invoice type code (BT-3)."),
    Rule::new("BR-05", &["BT-5"], "An Invoice shall have an Invoice currency code (BT-5)."),
    Rule::new("BR-06", &["BT-27"], "An Invoice shall contain the Seller name (BT-27)."),
    Rule::new("BR-07", &["BT-44"], "An Invoice shall contain the Buyer name (BT-44)."),
    Rule::new("BR-08", &["BG-5"], "An Invoice shall contain the Seller postal address (BG-5)."),
    Rule::new("BR-09", &["BT-40"], "The Seller postal address (BG-5) shall contain a Seller country code (BT-40)."),
    Rule::new("BR-10", &["BG-8"], "An Invoice shall contain the Buyer postal address (BG-8)."),
    Rule::new("BR-11", &["BT-55"], "The Buyer postal address shall contain a Buyer country code (BT-55)."),
    Rule::new("BR-12", &["BT-106"], "An Invoice shall have the Sum of Invoice line net amount (BT-106)."),
    Rule::new("BR-13", &["BT-109"], "An Invoice shall have the Invoice total amount without VAT (BT-109)."),
    Rule::new("BR-14", &["BT-112"], "An Invoice shall have the Invoice total amount with VAT (BT-112)."),
    Rule::new("BR-15", &["BT-115"], "An Invoice shall have the Amount due for payment (BT-115)."),
    Rule::new("BR-16", &["BG-25"], "An Invoice shall have at least one Invoice line (BG-25)."),
    Rule::new("BR-17", &["BT-59"], "The Payee name (BT-59) shall be provided in the Invoice, if the Payee (BG-10) is different from the Seller (BG-4)."),
    Rule::new("BR-18", &["BT-62"], "The Seller tax representative name (BT-62) shall be provided in the Invoice, if the Seller (BG-4) has a Seller tax representative party (BG-11)."),
    Rule::new("BR-19", &["BG-12"], "The Seller tax representative postal address (BG-12) shall be provided in the Invoice, if the Seller (BG-4) has a Seller tax representative party (BG-11)."),
    Rule::new("BR-20", &["BT-69"], "The Seller tax representative postal address (BG-12) shall contain a Tax representative country code (BT-69), if the Seller (BG-4) has a Seller tax representative party (BG-11)."),
    Rule::new("BR-21", &["BT-126"], "Each Invoice line (BG-25) shall have an Invoice line identifier (BT-126)."),
    Rule::new("BR-22", &["BT-129"], "Each Invoice line (BG-25) shall have an Invoiced quantity (BT-129)."),
    Rule::new("BR-23", &["BT-130"], "An Invoice line (BG-25) shall have an Invoiced quantity unit of measure code (BT-130)."),
    Rule::new("BR-24", &["BT-131"], "Each Invoice line (BG-25) shall have an Invoice line net amount (BT-131)."),
    Rule::new("BR-25", &["BT-153"], "Each Invoice line (BG-25) shall contain the Item name (BT-153)."),
    Rule::new("BR-26", &["BT-146"], "Each Invoice line (BG-25) shall contain the Item net price (BT-146)."),
    Rule::new("BR-27", &["BT-146"], "The Item net price (BT-146) shall NOT be negative."),
    Rule::new("BR-28", &["BT-148"], "The Item gross price (BT-148) shall NOT be negative."),
    Rule::new("BR-29", &["BT-73", "BT-74"], "If both Invoicing period start date (BT-73) and Invoicing period end date (BT-74) are given then the Invoicing period end date (BT-74) shall be later or equal to the Invoicing period start date (BT-73)."),
    Rule::new("BR-30", &["BT-134", "BT-135"], "If both Invoice line period start date (BT-134) and Invoice line period end date (BT-135) are given then the Invoice line period end date (BT-135) shall be later or equal to the Invoice line period start date (BT-134)."),
    Rule::new("BR-31", &["BT-92"], "Each Document level allowance (BG-20) shall have a Document level allowance amount (BT-92)."),
    Rule::new("BR-32", &["BT-95"], "Each Document level allowance (BG-20) shall have a Document level allowance VAT category code (BT-95)."),
    Rule::new("BR-33", &["BT-97", "BT-98"], "Each Document level allowance (BG-20) shall have a Document level allowance reason (BT-97) or a Document level allowance reason code (BT-98)."),
    Rule::new("BR-36", &["BT-99"], "Each Document level charge (BG-21) shall have a Document level charge amount (BT-99)."),
    Rule::new("BR-37", &["BT-102"], "Each Document level charge (BG-21) shall have a Document level charge VAT category code (BT-102)."),
    Rule::new("BR-38", &["BT-104", "BT-105"], "Each Document level charge (BG-21) shall have a Document level charge reason (BT-104) or a Document level charge reason code (BT-105)."),
    Rule::new("BR-41", &["BT-136"], "Each Invoice line allowance (BG-27) shall have an Invoice line allowance amount (BT-136)."),
    Rule::new("BR-42", &["BT-139", "BT-140"], "Each Invoice line allowance (BG-27) shall have an Invoice line allowance reason (BT-139) or an Invoice line allowance reason code (BT-140)."),
    Rule::new("BR-43", &["BT-141"], "Each Invoice line charge (BG-28) shall have an Invoice line charge amount (BT-141)."),
    Rule::new("BR-44", &["BT-144", "BT-145"], "Each Invoice line charge shall have an Invoice line charge reason or an Invoice line charge reason code."),
    Rule::new("BR-45", &["BT-116"], "Each VAT breakdown (BG-23) shall have a VAT category taxable amount (BT-116)."),
    Rule::new("BR-46", &["BT-117"], "Each VAT breakdown (BG-23) shall have a VAT category tax amount (BT-117)."),
    Rule::new("BR-47", &["BT-118"], "Each VAT breakdown (BG-23) shall be defined through a VAT category code (BT-118)."),
    Rule::new("BR-48", &["BT-119"], "Each VAT breakdown (BG-23) shall have a VAT category rate (BT-119), except if the Invoice is not subject to VAT."),
    Rule::new("BR-49", &["BT-81"], "A Payment instruction (BG-16) shall specify the Payment means type code (BT-81)."),
    Rule::new("BR-50", &["BT-84"], "A Payment account identifier (BT-84) shall be present if Credit transfer (BG-17) information is provided in the Invoice."),
    Rule::new("BR-51", &["BT-87"], "The last 4 to 6 digits of the Payment card primary account number (BT-87) shall be present if Payment card information (BG-18) is provided in the Invoice."),
    Rule::new("BR-52", &["BT-122"], "Each Additional supporting document (BG-24) shall contain a Supporting document reference (BT-122)."),
    Rule::new("BR-53", &["BT-6", "BT-111"], "If the VAT accounting currency code (BT-6) is present, then the Invoice total VAT amount in accounting currency (BT-111) shall be provided."),
    Rule::new("BR-54", &["BT-160", "BT-161"], "Each Item attribute (BG-32) shall contain an Item attribute name (BT-160) and an Item attribute value (BT-161)."),
    Rule::new("BR-55", &["BT-25"], "Each Preceding Invoice reference (BG-3) shall contain a Preceding Invoice reference (BT-25)."),
    Rule::new("BR-56", &["BT-63"], "Each Seller tax representative party (BG-11) shall have a Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-57", &["BT-80"], "Each Deliver to address (BG-15) shall contain a Deliver to country code (BT-80)."),
    Rule::new("BR-61", &["BT-81", "BT-84"], "If the Payment means type code (BT-81) means SEPA credit transfer, Local credit transfer or Non-SEPA international credit transfer, the Payment account identifier (BT-84) shall be present."),
    Rule::new("BR-62", &["BT-34"], "The Seller electronic address (BT-34) shall have a Scheme identifier."),
    Rule::new("BR-63", &["BT-49"], "The Buyer electronic address (BT-49) shall have a Scheme identifier."),
    Rule::new("BR-64", &["BT-157"], "The Item standard identifier (BT-157) shall have a Scheme identifier."),
    Rule::new("BR-65", &["BT-158"], "The Item classification identifier (BT-158) shall have a Scheme identifier."),
    Rule::new("BR-66", &["BG-18"], "An Invoice shall contain maximum one Payment Card account (BG-18)."),
    Rule::new("BR-67", &["BG-19"], "An Invoice shall contain maximum one Payment Mandate (BG-19)."),
    // Non-negative document allowance and charge amounts
    Rule::new("BR-34", &["BT-92"], "Document level allowance amount (BT-92) shall not be negative."),
    Rule::new("BR-35", &["BT-93"], "Document level allowance base amount (BT-93) shall not be negative."),
    Rule::new("BR-39", &["BT-99"], "Document level charge amount (BT-99) shall not be negative."),
    Rule::new("BR-40", &["BT-100"], "Document level charge base amount (BT-100) shall not be negative."),
    // Conditions (BR-CO)
    Rule::new("BR-CO-03", &["BT-7", "BT-8"], "Value added tax point date (BT-7) and Value added tax point date code (BT-8) are mutually exclusive."),
    Rule::new("BR-CO-04", &["BT-151"], "Each Invoice line (BG-25) shall be categorized with an Invoiced item VAT category code (BT-151)."),
    Rule::new("BR-CO-05", &["BT-97", "BT-98"], "Document level allowance reason code (BT-98) and Document level allowance reason (BT-97) shall indicate the same type of allowance."),
    Rule::new("BR-CO-06", &["BT-104", "BT-105"], "Document level charge reason code (BT-105) and Document level charge reason (BT-104) shall indicate the same type of charge."),
    Rule::new("BR-CO-07", &["BT-139", "BT-140"], "Invoice line allowance reason code (BT-140) and Invoice line allowance reason (BT-139) shall indicate the same type of allowance reason."),
    Rule::new("BR-CO-08", &["BT-144", "BT-145"], "Invoice line charge reason code (BT-145) and Invoice line charge reason (BT-144) shall indicate the same type of charge reason."),
    Rule::new("BR-CO-09", &["BT-31", "BT-48", "BT-63"], "The Seller VAT identifier (BT-31), the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48) shall have a prefix in accordance with ISO code ISO 3166-1 alpha-2 by which the country of issue may be identified. Nevertheless, Greece may use the prefix 'EL'."),
    Rule::new("BR-CO-10", &["BT-106", "BT-131"], "Sum of Invoice line net amount (BT-106) = Σ Invoice line net amount (BT-131)."),
    Rule::new("BR-CO-11", &["BT-107", "BT-92"], "Sum of allowances on document level (BT-107) = Σ Document level allowance amount (BT-92)."),
    Rule::new("BR-CO-12", &["BT-108", "BT-99"], "Sum of charges on document level (BT-108) = Σ Document level charge amount (BT-99)."),
    Rule::new("BR-CO-13", &["BT-109", "BT-106", "BT-107", "BT-108"], "Invoice total amount without VAT (BT-109) = Σ Invoice line net amount (BT-131) - Sum of allowances on document level (BT-107) + Sum of charges on document level (BT-108)."),
    Rule::new("BR-CO-14", &["BT-110", "BT-117"], "Invoice total VAT amount (BT-110) = Σ VAT category tax amount (BT-117)."),
    Rule::new("BR-CO-15", &["BT-112", "BT-109", "BT-110"], "Invoice total amount with VAT (BT-112) = Invoice total amount without VAT (BT-109) + Invoice total VAT amount (BT-110)."),
    Rule::new("BR-CO-16", &["BT-115", "BT-112", "BT-113", "BT-114"], "Amount due for payment (BT-115) = Invoice total amount with VAT (BT-112) - Paid amount (BT-113) + Rounding amount (BT-114)."),
    Rule::new("BR-CO-17", &["BT-117", "BT-116", "BT-119"], "VAT category tax amount (BT-117) = VAT category taxable amount (BT-116) x (VAT category rate (BT-119) / 100), rounded to two decimals."),
    Rule::new("BR-CO-18", &["BG-23"], "An Invoice shall at least have one VAT breakdown group (BG-23)."),
    Rule::new("BR-CO-19", &["BT-73", "BT-74"], "If Invoicing period (BG-14) is used, the Invoicing period start date (BT-73) or the Invoicing period end date (BT-74) shall be filled, or both."),
    Rule::new("BR-CO-20", &["BT-134", "BT-135"], "If Invoice line period (BG-26) is used, the Invoice line period start date (BT-134) or the Invoice line period end date (BT-135) shall be filled, or both."),
    Rule::new("BR-CO-21", &["BT-97", "BT-98"], "Each Document level allowance (BG-20) shall contain a Document level allowance reason (BT-97) or a Document level allowance reason code (BT-98), or both."),
    Rule::new("BR-CO-22", &["BT-104", "BT-105"], "Each Document level charge (BG-21) shall contain a Document level charge reason (BT-104) or a Document level charge reason code (BT-105), or both."),
    Rule::new("BR-CO-23", &["BT-139", "BT-140"], "Each Invoice line allowance (BG-27) shall contain an Invoice line allowance reason (BT-139) or an Invoice line allowance reason code (BT-140), or both."),
    Rule::new("BR-CO-24", &["BT-144", "BT-145"], "Each Invoice line charge (BG-28) shall contain an Invoice line charge reason (BT-144) or an Invoice line charge reason code (BT-145), or both."),
    Rule::new("BR-CO-25", &["BT-115", "BT-9", "BT-20"], "In case the Amount due for payment (BT-115) is positive, either the Payment due date (BT-9) or the Payment terms (BT-20) shall be present."),
    Rule::new("BR-CO-26", &["BT-29", "BT-30", "BT-31"], "In order for the buyer to automatically identify a supplier, the Seller identifier (BT-29), the Seller legal registration identifier (BT-30) and/or the Seller VAT identifier (BT-31) shall be present."),
    // Code lists (BR-CL)
    Rule::new("BR-CL-18", &["BT-95", "BT-102", "BT-118", "BT-151"], "Invoice tax categories MUST be coded using UNCL5305 code list."),
    // Decimal places (BR-DEC)
    Rule::new("BR-DEC-01", &["BT-92"], "The allowed maximum number of decimals for the Document level allowance amount (BT-92) is 2."),
    Rule::new("BR-DEC-02", &["BT-93"], "The allowed maximum number of decimals for the Document level allowance base amount (BT-93) is 2."),
    Rule::new("BR-DEC-05", &["BT-99"], "The allowed maximum number of decimals for the Document level charge amount (BT-99) is 2."),
    Rule::new("BR-DEC-06", &["BT-100"], "The allowed maximum number of decimals for the Document level charge base amount (BT-100) is 2."),
    Rule::new("BR-DEC-09", &["BT-106"], "The allowed maximum number of decimals for the Sum of Invoice line net amount (BT-106) is 2."),
    Rule::new("BR-DEC-10", &["BT-107"], "The allowed maximum number of decimals for the Sum of allowances on document level (BT-107) is 2."),
    Rule::new("BR-DEC-11", &["BT-108"], "The allowed maximum number of decimals for the Sum of charges on document level (BT-108) is 2."),
    Rule::new("BR-DEC-12", &["BT-109"], "The allowed maximum number of decimals for the Invoice total amount without VAT (BT-109) is 2."),
    Rule::new("BR-DEC-13", &["BT-110"], "The allowed maximum number of decimals for the Invoice total VAT amount (BT-110) is 2."),
    Rule::new("BR-DEC-14", &["BT-112"], "The allowed maximum number of decimals for the Invoice total amount with VAT (BT-112) is 2."),
    Rule::new("BR-DEC-15", &["BT-111"], "The allowed maximum number of decimals for the Invoice total VAT amount in accounting currency (BT-111) is 2."),
    Rule::new("BR-DEC-16", &["BT-113"], "The allowed maximum number of decimals for the Paid amount (BT-113) is 2."),
    Rule::new("BR-DEC-17", &["BT-114"], "The allowed maximum number of decimals for the Rounding amount (BT-114) is 2."),
    Rule::new("BR-DEC-18", &["BT-115"], "The allowed maximum number of decimals for the Amount due for payment (BT-115) is 2."),
    Rule::new("BR-DEC-19", &["BT-116"], "The allowed maximum number of decimals for the VAT category taxable amount (BT-116) is 2."),
    Rule::new("BR-DEC-20", &["BT-117"], "The allowed maximum number of decimals for the VAT category tax amount (BT-117) is 2."),
    Rule::new("BR-DEC-23", &["BT-131"], "The allowed maximum number of decimals for the Invoice line net amount (BT-131) is 2."),
    Rule::new("BR-DEC-24", &["BT-136"], "The allowed maximum number of decimals for the Invoice line allowance amount (BT-136) is 2."),
    Rule::new("BR-DEC-25", &["BT-137"], "The allowed maximum number of decimals for the Invoice line allowance base amount (BT-137) is 2."),
    Rule::new("BR-DEC-27", &["BT-141"], "The allowed maximum number of decimals for the Invoice line charge amount (BT-141) is 2."),
    Rule::new("BR-DEC-28", &["BT-142"], "The allowed maximum number of decimals for the Invoice line charge base amount (BT-142) is 2."),
    // Standard rated (S)
    Rule::new("BR-S-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Standard rated' shall contain in the VAT breakdown (BG-23) at least one VAT category code (BT-118) equal with 'Standard rated'."),
    Rule::new("BR-S-02", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Standard rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-S-03", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Standard rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-S-04", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Standard rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-S-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Standard rated' the Invoiced item VAT rate (BT-152) shall be greater than zero."),
    Rule::new("BR-S-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Standard rated' the Document level allowance VAT rate (BT-96) shall be greater than zero."),
    Rule::new("BR-S-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Standard rated' the Document level charge VAT rate (BT-103) shall be greater than zero."),
    Rule::new("BR-S-08", &["BT-116"], "For each different value of VAT category rate (BT-119) where the VAT category code (BT-118) is 'Standard rated', the VAT category taxable amount (BT-116) in a VAT breakdown (BG-23) shall equal the sum of Invoice line net amounts (BT-131) plus the sum of document level charge amounts (BT-99) minus the sum of document level allowance amounts (BT-92) where the VAT category code is 'Standard rated' and the VAT rate equals the VAT category rate (BT-119)."),
    Rule::new("BR-S-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where VAT category code (BT-118) is 'Standard rated' shall equal the VAT category taxable amount (BT-116) multiplied by the VAT category rate (BT-119)."),
    Rule::new("BR-S-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT category code (BT-118) 'Standard rate' shall not have a VAT exemption reason code (BT-121) or VAT exemption reason text (BT-120)."),
    // Reverse charge (AE)
    Rule::new("BR-AE-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Reverse charge' shall contain in the VAT breakdown (BG-23) exactly one VAT category code (BT-118) equal with 'VAT reverse charge'."),
    Rule::new("BR-AE-02", &["BT-31", "BT-32", "BT-63", "BT-47", "BT-48"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Reverse charge' shall contain the Seller VAT Identifier (BT-31), the Seller Tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48) and/or the Buyer legal registration identifier (BT-47)."),
    Rule::new("BR-AE-03", &["BT-31", "BT-32", "BT-63", "BT-47", "BT-48"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Reverse charge' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48) and/or the Buyer legal registration identifier (BT-47)."),
    Rule::new("BR-AE-04", &["BT-31", "BT-32", "BT-63", "BT-47", "BT-48"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Reverse charge' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48) and/or the Buyer legal registration identifier (BT-47)."),
    Rule::new("BR-AE-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Reverse charge' the Invoiced item VAT rate (BT-152) shall be 0 (zero)."),
    Rule::new("BR-AE-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Reverse charge' the Document level allowance VAT rate (BT-96) shall be 0 (zero)."),
    Rule::new("BR-AE-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Reverse charge' the Document level charge VAT rate (BT-103) shall be 0 (zero)."),
    Rule::new("BR-AE-08", &["BT-116"], "In a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Reverse charge' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amounts (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Reverse charge'."),
    Rule::new("BR-AE-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Reverse charge' shall be 0 (zero)."),
    Rule::new("BR-AE-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'Reverse charge' shall have a VAT exemption reason code (BT-121), meaning 'Reverse charge' or the VAT exemption reason text (BT-120) 'Reverse charge' (or the equivalent standard text in another language)."),
    // Exempt from VAT (E)
    Rule::new("BR-E-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Exempt from VAT' shall contain exactly one VAT breakdown (BG-23) with the VAT category code (BT-118) equal to 'Exempt from VAT'."),
    Rule::new("BR-E-02", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Exempt from VAT' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-E-03", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Exempt from VAT' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-E-04", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Exempt from VAT' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-E-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Exempt from VAT', the Invoiced item VAT rate (BT-152) shall be 0 (zero)."),
    Rule::new("BR-E-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Exempt from VAT', the Document level allowance VAT rate (BT-96) shall be 0 (zero)."),
    Rule::new("BR-E-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Exempt from VAT', the Document level charge VAT rate (BT-103) shall be 0 (zero)."),
    Rule::new("BR-E-08", &["BT-116"], "In a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Exempt from VAT' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amounts (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Exempt from VAT'."),
    Rule::new("BR-E-09", &["BT-117"], "The VAT category tax amount (BT-117) In a VAT breakdown (BG-23) where the VAT category code (BT-118) equals 'Exempt from VAT' shall equal 0 (zero)."),
    Rule::new("BR-E-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'Exempt from VAT' shall have a VAT exemption reason code (BT-121) or a VAT exemption reason text (BT-120)."),
    // Zero rated (Z)
    Rule::new("BR-Z-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Zero rated' shall contain in the VAT breakdown (BG-23) exactly one VAT category code (BT-118) equal with 'Zero rated'."),
    Rule::new("BR-Z-02", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains an Invoice line where the Invoiced item VAT category code (BT-151) is 'Zero rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-Z-03", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Zero rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-Z-04", &["BT-31", "BT-32", "BT-63"], "An Invoice that contains a Document level charge where the Document level charge VAT category code (BT-102) is 'Zero rated' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-Z-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Zero rated' the Invoiced item VAT rate (BT-152) shall be 0 (zero)."),
    Rule::new("BR-Z-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Zero rated' the Document level allowance VAT rate (BT-96) shall be 0 (zero)."),
    Rule::new("BR-Z-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Zero rated' the Document level charge VAT rate (BT-103) shall be 0 (zero)."),
    Rule::new("BR-Z-08", &["BT-116"], "In a VAT breakdown (BG-23) where VAT category code (BT-118) is 'Zero rated' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amount (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Zero rated'."),
    Rule::new("BR-Z-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where VAT category code (BT-118) is 'Zero rated' shall equal 0 (zero)."),
    Rule::new("BR-Z-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'Zero rated' shall not have a VAT exemption reason code (BT-121) or VAT exemption reason text (BT-120)."),
    // Export outside the EU (G)
    Rule::new("BR-G-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Export outside the EU' shall contain in the VAT breakdown (BG-23) exactly one VAT category code (BT-118) equal with 'Export outside the EU'."),
    Rule::new("BR-G-02", &["BT-31", "BT-63"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Export outside the EU' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-G-03", &["BT-31", "BT-63"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Export outside the EU' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-G-04", &["BT-31", "BT-63"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Export outside the EU' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63)."),
    Rule::new("BR-G-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Export outside the EU' the Invoiced item VAT rate (BT-152) shall be 0 (zero)."),
    Rule::new("BR-G-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Export outside the EU' the Document level allowance VAT rate (BT-96) shall be 0 (zero)."),
    Rule::new("BR-G-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Export outside the EU' the Document level charge VAT rate (BT-103) shall be 0 (zero)."),
    Rule::new("BR-G-08", &["BT-116"], "In a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Export outside the EU' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amounts (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Export outside the EU'."),
    Rule::new("BR-G-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Export outside the EU' shall be 0 (zero)."),
    Rule::new("BR-G-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with the VAT Category code (BT-118) 'Export outside the EU' shall have a VAT exemption reason code (BT-121), meaning 'Export outside the EU' or the VAT exemption reason text (BT-120) 'Export outside the EU' (or the equivalent standard text in another language)."),
    // Intra-community supply (K)
    Rule::new("BR-IC-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Intra-community supply' shall contain in the VAT breakdown (BG-23) exactly one VAT category code (BT-118) equal with 'Intra-community supply'."),
    Rule::new("BR-IC-02", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Intra-community supply' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IC-03", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Intra-community supply' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IC-04", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Intra-community supply' shall contain the Seller VAT Identifier (BT-31) or the Seller tax representative VAT identifier (BT-63) and the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IC-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'Intra-community supply' the Invoiced item VAT rate (BT-152) shall be 0 (zero)."),
    Rule::new("BR-IC-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Intra-community supply' the Document level allowance VAT rate (BT-96) shall be 0 (zero)."),
    Rule::new("BR-IC-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Intra-community supply' the Document level charge VAT rate (BT-103) shall be 0 (zero)."),
    Rule::new("BR-IC-08", &["BT-116"], "In a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Intra-community supply' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amounts (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Intra-community supply'."),
    Rule::new("BR-IC-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Intra-community supply' shall be 0 (zero)."),
    Rule::new("BR-IC-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with the VAT Category code (BT-118) 'Intra-community supply' shall have a VAT exemption reason code (BT-121), meaning 'Intra-community supply' or the VAT exemption reason text (BT-120) 'Intra-community supply' (or the equivalent standard text in another language)."),
    Rule::new("BR-IC-11", &["BT-72", "BG-14"], "In an Invoice with a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Intra-community supply' the Actual delivery date (BT-72) or the Invoicing period (BG-14) shall not be blank."),
    Rule::new("BR-IC-12", &["BT-80"], "In an Invoice with a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Intra-community supply' the Deliver to country code (BT-80) shall not be blank."),
    // IGIC (L)
    Rule::new("BR-IG-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'IGIC' shall contain in the VAT breakdown (BG-23) at least one VAT category code (BT-118) equal with 'IGIC'."),
    Rule::new("BR-IG-02", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'IGIC' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IG-03", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'IGIC' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IG-04", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'IGIC' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IG-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'IGIC' the invoiced item VAT rate (BT-152) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IG-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'IGIC' the Document level allowance VAT rate (BT-96) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IG-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'IGIC' the Document level charge VAT rate (BT-103) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IG-08", &["BT-116"], "For each different value of VAT category rate (BT-119) where the VAT category code (BT-118) is 'IGIC', the VAT category taxable amount (BT-116) in a VAT breakdown (BG-23) shall equal the sum of Invoice line net amounts (BT-131) plus the sum of document level charge amounts (BT-99) minus the sum of document level allowance amounts (BT-92) where the VAT category code is 'IGIC' and the VAT rate equals the VAT category rate (BT-119)."),
    Rule::new("BR-IG-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where VAT category code (BT-118) is 'IGIC' shall equal the VAT category taxable amount (BT-116) multiplied by the VAT category rate (BT-119)."),
    Rule::new("BR-IG-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'IGIC' shall not have a VAT exemption reason code (BT-121) or VAT exemption reason text (BT-120)."),
    // IPSI (M)
    Rule::new("BR-IP-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'IPSI' shall contain in the VAT breakdown (BG-23) at least one VAT category code (BT-118) equal with 'IPSI'."),
    Rule::new("BR-IP-02", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'IPSI' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IP-03", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'IPSI' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IP-04", &["BT-31", "BT-32", "BT-63", "BT-48"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'IPSI' shall contain the Seller VAT Identifier (BT-31), the Seller tax registration identifier (BT-32) and/or the Seller tax representative VAT identifier (BT-63), and shall not contain the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-IP-05", &["BT-152"], "In an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is 'IPSI' the Invoiced item VAT rate (BT-152) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IP-06", &["BT-96"], "In a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'IPSI' the Document level allowance VAT rate (BT-96) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IP-07", &["BT-103"], "In a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'IPSI' the Document level charge VAT rate (BT-103) shall be 0 (zero) or greater than zero."),
    Rule::new("BR-IP-08", &["BT-116"], "For each different value of VAT category rate (BT-119) where the VAT category code (BT-118) is 'IPSI', the VAT category taxable amount (BT-116) in a VAT breakdown (BG-23) shall equal the sum of Invoice line net amounts (BT-131) plus the sum of document level charge amounts (BT-99) minus the sum of document level allowance amounts (BT-92) where the VAT category code is 'IPSI' and the VAT rate equals the VAT category rate (BT-119)."),
    Rule::new("BR-IP-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where VAT category code (BT-118) is 'IPSI' shall equal the VAT category taxable amount (BT-116) multiplied by the VAT category rate (BT-119)."),
    Rule::new("BR-IP-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'IPSI' shall not have a VAT exemption reason code (BT-121) or VAT exemption reason text (BT-120)."),
    // Not subject to VAT (O)
    Rule::new("BR-O-01", &["BG-23", "BT-118"], "An Invoice that contains an Invoice line, a Document level allowance or a Document level charge where the VAT category code is 'Not subject to VAT' shall contain exactly one VAT breakdown group (BG-23) with the VAT category code (BT-118) equal to 'Not subject to VAT'."),
    Rule::new("BR-O-02", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains an Invoice line where the Invoiced item VAT category code (BT-151) is 'Not subject to VAT' shall not contain the Seller VAT identifier (BT-31), the Seller tax representative VAT identifier (BT-63) or the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-O-03", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains a Document level allowance (BG-20) where the Document level allowance VAT category code (BT-95) is 'Not subject to VAT' shall not contain the Seller VAT identifier (BT-31), the Seller tax representative VAT identifier (BT-63) or the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-O-04", &["BT-31", "BT-63", "BT-48"], "An Invoice that contains a Document level charge (BG-21) where the Document level charge VAT category code (BT-102) is 'Not subject to VAT' shall not contain the Seller VAT identifier (BT-31), the Seller tax representative VAT identifier (BT-63) or the Buyer VAT identifier (BT-48)."),
    Rule::new("BR-O-05", &["BT-152"], "An Invoice line (BG-25) where the VAT category code (BT-151) is 'Not subject to VAT' shall not contain an Invoiced item VAT rate (BT-152)."),
    Rule::new("BR-O-06", &["BT-96"], "A Document level allowance (BG-20) where VAT category code (BT-95) is 'Not subject to VAT' shall not contain a Document level allowance VAT rate (BT-96)."),
    Rule::new("BR-O-07", &["BT-103"], "A Document level charge (BG-21) where the VAT category code (BT-102) is 'Not subject to VAT' shall not contain a Document level charge VAT rate (BT-103)."),
    Rule::new("BR-O-08", &["BT-116"], "In a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Not subject to VAT' the VAT category taxable amount (BT-116) shall equal the sum of Invoice line net amounts (BT-131) minus the sum of Document level allowance amounts (BT-92) plus the sum of Document level charge amounts (BT-99) where the VAT category codes are 'Not subject to VAT'."),
    Rule::new("BR-O-09", &["BT-117"], "The VAT category tax amount (BT-117) in a VAT breakdown (BG-23) where the VAT category code (BT-118) is 'Not subject to VAT' shall be 0 (zero)."),
    Rule::new("BR-O-10", &["BT-120", "BT-121"], "A VAT breakdown (BG-23) with VAT Category code (BT-118) 'Not subject to VAT' shall have a VAT exemption reason code (BT-121), meaning 'Not subject to VAT' or a VAT exemption reason text (BT-120) 'Not subject to VAT' (or the equivalent standard text in another language)."),
    Rule::new("BR-O-11", &["BG-23", "BT-118"], "An Invoice that contains a VAT breakdown group (BG-23) with a VAT category code (BT-118) 'Not subject to VAT' shall not contain other VAT breakdown groups (BG-23)."),
    Rule::new("BR-O-12", &["BT-151"], "An Invoice that contains a VAT breakdown group (BG-23) with a VAT category code (BT-118) 'Not subject to VAT' shall not contain an Invoice line (BG-25) where the Invoiced item VAT category code (BT-151) is not 'Not subject to VAT'."),
    Rule::new("BR-O-13", &["BT-95"], "An Invoice that contains a VAT breakdown group (BG-23) with a VAT category code (BT-118) 'Not subject to VAT' shall not contain Document level allowances (BG-20) where Document level allowance VAT category code (BT-95) is not 'Not subject to VAT'."),
    Rule::new("BR-O-14", &["BT-102"], "An Invoice that contains a VAT breakdown group (BG-23) with a VAT category code (BT-118) 'Not subject to VAT' shall not contain Document level charges (BG-21) where Document level charge VAT category code (BT-102) is not 'Not subject to VAT'."),
    // Reader diagnostics
    Rule::new("UNEXPECTED-TAX-CURRENCY", &["BT-110", "BT-111"], "A tax total amount shall be given in the Invoice currency (BT-5) or the VAT accounting currency (BT-6)."),
];

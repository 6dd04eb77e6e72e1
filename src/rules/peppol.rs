use super::Rule;

/// PEPPOL BIS Billing 3.0 rules evaluated on top of EN 16931.
pub static PEPPOL_RULES: &[Rule] = &[
    Rule::new("PEPPOL-EN16931-R001", &["BT-23"], "Business process MUST be provided."),
    Rule::new("PEPPOL-EN16931-R002", &["BT-22"], "No more than one note is allowed on document level, unless both the buyer and seller are German organizations."),
    Rule::new("PEPPOL-EN16931-R003", &["BT-10", "BT-13"], "A buyer reference or purchase order reference MUST be provided."),
    Rule::new("PEPPOL-EN16931-R004", &["BT-24"], "Specification identifier MUST have the value 'urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0'."),
    Rule::new("PEPPOL-EN16931-R005", &["BT-5", "BT-6"], "VAT accounting currency code MUST be different from invoice currency code when provided."),
    Rule::new("PEPPOL-EN16931-R007", &["BT-23"], "Business process MUST be in the format 'urn:fdc:peppol.eu:2017:poacc:billing:NN:1.0' where NN indicates the process number."),
    Rule::new("PEPPOL-EN16931-R008", &["BG-24"], "Document MUST not contain empty elements."),
    Rule::new("PEPPOL-EN16931-R010", &["BT-49"], "Buyer electronic address MUST be provided."),
    Rule::new("PEPPOL-EN16931-R020", &["BT-34"], "Seller electronic address MUST be provided."),
    Rule::new("PEPPOL-EN16931-R040", &["BT-92", "BT-93", "BT-94", "BT-99", "BT-100", "BT-101"], "Allowance/charge amount must equal base amount * percentage/100 if base amount and percentage exists."),
    Rule::new("PEPPOL-EN16931-R041", &["BT-93", "BT-100"], "Allowance/charge base amount MUST be provided when allowance/charge percentage is provided."),
    Rule::new("PEPPOL-EN16931-R042", &["BT-94", "BT-101"], "Allowance/charge percentage MUST be provided when allowance/charge base amount is provided."),
    Rule::new("PEPPOL-EN16931-R044", &["BT-147"], "Charge on price level is NOT allowed. Only value 'false' allowed."),
    Rule::new("PEPPOL-EN16931-R046", &["BT-146", "BT-147", "BT-148"], "Item net price MUST equal (Gross price - Allowance amount) when gross price is provided."),
    Rule::new("PEPPOL-EN16931-R055", &["BT-110", "BT-111"], "Invoice total VAT amount and Invoice total VAT amount in accounting currency MUST have the same operational sign."),
    Rule::new("PEPPOL-EN16931-R061", &["BT-89"], "Mandate reference MUST be provided for direct debit."),
    Rule::new("PEPPOL-EN16931-R110", &["BT-134", "BT-73"], "Start date of line period MUST be within invoice period."),
    Rule::new("PEPPOL-EN16931-R111", &["BT-135", "BT-74"], "End date of line period MUST be within invoice period."),
    Rule::new("PEPPOL-EN16931-R120", &["BT-131"], "Invoice line net amount MUST equal (Invoiced quantity * (Item net price/item price base quantity) + Sum of invoice line charge amount - sum of invoice line allowance amount."),
    Rule::new("PEPPOL-EN16931-R121", &["BT-149"], "Base quantity MUST be a positive number above zero."),
    Rule::new("PEPPOL-EN16931-R130", &["BT-150", "BT-130"], "Unit code of price base quantity MUST be same as invoiced quantity."),
    Rule::new("PEPPOL-EN16931-CL008", &["BT-34", "BT-49"], "Electronic address identifier scheme must be from the codelist 'Electronic Address Identifier Scheme'."),
];

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any syntax, any bytes: reading and validating must not panic.
    if let Ok(invoice) = einvoice::xml::parse_from_stream(data) {
        let _ = invoice.validate();
    }
});

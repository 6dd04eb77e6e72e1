use std::collections::HashMap;

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use einvoice::core::*;
use einvoice::xml;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_invoice(lines: usize) -> Invoice {
    let mut builder = InvoiceBuilder::new("BENCH-001", test_date())
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .seller(
            PartyBuilder::new(
                "Benchmark GmbH",
                AddressBuilder::new("Berlin", "10115", "DE")
                    .street("Hauptstr. 1")
                    .build(),
            )
            .vat_id("DE123456789")
            .build(),
        )
        .buyer(
            PartyBuilder::new(
                "Kunde AG",
                AddressBuilder::new("München", "80331", "DE")
                    .street("Leopoldstr. 42")
                    .build(),
            )
            .build(),
        )
        .credit_transfer("DE89370400440532013000", None);

    for i in 1..=lines {
        let rate = if i % 3 == 0 { dec!(7) } else { dec!(19) };
        builder = builder.add_line(
            LineBuilder::new(i.to_string(), format!("Item {i}"), dec!(2), "C62", dec!(9.99))
                .tax(TaxCategory::StandardRate, rate)
                .build(),
        );
    }

    builder.build().unwrap()
}

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_10_lines", |b| {
        b.iter(|| black_box(build_invoice(10)));
    });
}

fn bench_recompute(c: &mut Criterion) {
    let invoice = build_invoice(1000);
    let reasons = HashMap::new();
    c.bench_function("recompute_totals_1000_lines", |b| {
        b.iter(|| {
            let mut inv = invoice.clone();
            inv.update_applicable_trade_tax(black_box(&reasons));
            inv.update_totals();
            black_box(inv)
        });
    });
}

fn bench_validate(c: &mut Criterion) {
    let invoice = build_invoice(10);
    c.bench_function("validate_10_lines", |b| {
        b.iter(|| black_box(black_box(&invoice).validate()));
    });

    let mut broken = build_invoice(10);
    broken.totals.line_total = dec!(1);
    broken.seller.vat_id = None;
    c.bench_function("validate_10_lines_with_violations", |b| {
        b.iter(|| black_box(black_box(&broken).validate()));
    });
}

fn bench_cii(c: &mut Criterion) {
    let invoice = build_invoice(10);
    let text = xml::to_cii_xml(&invoice).unwrap();
    c.bench_function("cii_serialize", |b| {
        b.iter(|| black_box(xml::to_cii_xml(black_box(&invoice))));
    });
    c.bench_function("cii_parse", |b| {
        b.iter(|| black_box(xml::parse_str(black_box(&text))));
    });
}

fn bench_ubl(c: &mut Criterion) {
    let invoice = build_invoice(10);
    let text = xml::to_ubl_xml(&invoice).unwrap();
    c.bench_function("ubl_serialize", |b| {
        b.iter(|| black_box(xml::to_ubl_xml(black_box(&invoice))));
    });
    c.bench_function("ubl_parse", |b| {
        b.iter(|| black_box(xml::parse_str(black_box(&text))));
    });
}

fn bench_1000_lines(c: &mut Criterion) {
    let invoice = build_invoice(1000);
    let cii = xml::to_cii_xml(&invoice).unwrap();
    let ubl = xml::to_ubl_xml(&invoice).unwrap();
    c.bench_function("ubl_serialize_1000_lines", |b| {
        b.iter(|| black_box(xml::to_ubl_xml(black_box(&invoice))));
    });
    c.bench_function("ubl_parse_1000_lines", |b| {
        b.iter(|| black_box(xml::parse_str(black_box(&ubl))));
    });
    c.bench_function("cii_parse_1000_lines", |b| {
        b.iter(|| black_box(xml::parse_str(black_box(&cii))));
    });
    c.bench_function("validate_1000_lines", |b| {
        b.iter(|| black_box(black_box(&invoice).validate()));
    });
}

criterion_group!(
    benches,
    bench_build_invoice,
    bench_recompute,
    bench_validate,
    bench_cii,
    bench_ubl,
    bench_1000_lines,
);
criterion_main!(benches);

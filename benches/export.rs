//! Benchmarks for the export pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use export_as::{Document, ExportAs, ExportConfig, Format};

/// Build a host document holding a table of `rows` x 4 cells.
fn sample_document(rows: usize) -> Document {
    let mut markup = String::from(r#"<table id="grid"><tr><th>Id</th><th>Name</th><th>City</th><th>Score</th></tr>"#);
    for i in 0..rows {
        markup.push_str(&format!(
            "<tr><td>{i}</td><td>Person {i}</td><td>City {}</td><td>{}</td></tr>",
            i % 50,
            i * 7 % 100
        ));
    }
    markup.push_str("</table>");
    Document::parse(&markup)
}

fn bench_format(c: &mut Criterion, name: &str, format: Format) {
    let document = sample_document(500);
    let service = ExportAs::new();
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut config = ExportConfig::new(format, "grid");
            service.get(&document, &mut config).unwrap()
        });
    });
}

fn bench_export_csv(c: &mut Criterion) {
    bench_format(c, "export_csv", Format::Csv);
}

fn bench_export_json(c: &mut Criterion) {
    bench_format(c, "export_json", Format::Json);
}

fn bench_export_xlsx(c: &mut Criterion) {
    bench_format(c, "export_xlsx", Format::Xlsx);
}

fn bench_export_pdf(c: &mut Criterion) {
    bench_format(c, "export_pdf", Format::Pdf);
}

criterion_group!(
    benches,
    bench_export_csv,
    bench_export_json,
    bench_export_xlsx,
    bench_export_pdf
);
criterion_main!(benches);

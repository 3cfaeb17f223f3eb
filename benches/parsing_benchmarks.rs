use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use snip_doclint::parser::{classify_line, parse_document, split_sections, tokenize};
use std::fs;
use std::hint::black_box;

/// Generate contract source of different shapes for benchmarking
fn generate_contract(items: usize, pattern: &str) -> String {
    let mut content = String::from("//! # Generated\n//! Benchmark contract.\n\n#[starknet::contract]\nmod Generated {\n");

    for i in 0..items {
        match pattern {
            "doc_heavy" => {
                content.push_str(&format!("    /// Performs operation {}.\n", i));
                content.push_str("    ///\n    /// # Arguments\n");
                content.push_str(&format!("    /// * `amount` - value for step {}\n", i));
                content.push_str("    ///\n    /// # Returns\n    /// The new balance.\n");
                content.push_str("    ///\n    /// # Examples\n    /// ```\n    /// # let x = 1;\n    /// ```\n");
            }
            "code_heavy" => {
                content.push_str(&format!("    // step {}\n", i));
            }
            _ => {
                if i % 2 == 0 {
                    content.push_str(&format!("    /// Operation {}.\n", i));
                }
            }
        }
        content.push_str(&format!("    fn op_{}(amount: u256) -> u256 {{\n        amount + {}\n    }}\n\n", i, i));
    }

    content.push_str("}\n");
    content
}

/// Benchmark classifying single lines
fn bench_line_classification(c: &mut Criterion) {
    let test_lines = vec![
        ("module_doc", "//! # Vault"),
        ("item_doc", "    /// Deposits assets into the vault."),
        ("line_comment", "    // plain comment"),
        ("code", "    fn deposit(ref self: ContractState, amount: u256) {"),
        ("blank", "    "),
    ];

    let mut group = c.benchmark_group("line_classification");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("classify_line", name), &line, |b, line| {
            b.iter(|| black_box(classify_line(black_box(line))))
        });
    }

    group.finish();
}

/// Benchmark tokenizing and parsing files of different sizes
fn bench_document_parsing(c: &mut Criterion) {
    let sizes = vec![10, 100, 1_000];
    let patterns = vec!["doc_heavy", "code_heavy", "mixed"];

    let mut group = c.benchmark_group("document_parsing");

    for &size in &sizes {
        for pattern in &patterns {
            let content = generate_contract(size, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{}_{}", pattern, size), size),
                &content,
                |b, content| b.iter(|| black_box(parse_document(black_box(content)))),
            );
        }
    }

    group.finish();
}

/// Benchmark the tokenizer on its own
fn bench_tokenize(c: &mut Criterion) {
    let content = generate_contract(1_000, "mixed");

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("mixed_1000", |b| {
        b.iter(|| black_box(tokenize(black_box(&content))))
    });
    group.finish();
}

/// Benchmark section splitting of a long doc block
fn bench_section_splitting(c: &mut Criterion) {
    let body: Vec<String> = (0..500)
        .map(|i| match i % 5 {
            0 => format!("# Heading {}", i),
            1 => "```".to_string(),
            2 => "# hidden".to_string(),
            3 => "```".to_string(),
            _ => format!("Body text line {}", i),
        })
        .collect();

    c.bench_function("split_sections_500", |b| {
        b.iter(|| {
            let lines = body.iter().enumerate().map(|(i, s)| (i + 1, s.as_str()));
            black_box(split_sections(black_box(lines)))
        })
    });
}

/// Benchmark parsing the test fixtures
fn bench_real_files(c: &mut Criterion) {
    let fixture_files = vec!["tests/fixtures/erc20.cairo", "tests/fixtures/misplaced.cairo"];

    let mut group = c.benchmark_group("real_files");

    for file_path in fixture_files {
        if let Ok(content) = fs::read_to_string(file_path) {
            let file_name = file_path.rsplit('/').next().unwrap_or("unknown");

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new("real_file", file_name),
                &content,
                |b, content| b.iter(|| black_box(parse_document(black_box(content)))),
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_line_classification,
    bench_document_parsing,
    bench_tokenize,
    bench_section_splitting,
    bench_real_files
);
criterion_main!(benches);

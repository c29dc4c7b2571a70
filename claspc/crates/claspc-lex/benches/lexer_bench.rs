//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package claspc-lex`

use claspc_lex::Lexer;
use claspc_util::Handler;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn lexer_token_count(source: &str) -> usize {
    let handler = Handler::new();
    let mut lexer = Lexer::from_text(source, &handler);
    let mut count = 0;
    while !lexer.current().is_eof() {
        lexer.advance();
        count += 1;
    }
    count
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "var x: int = 42; fn main() -> int { var y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_var", |b| {
        b.iter(|| lexer_token_count(black_box("var x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_large");

    let unit = r#"
fn fib(n: int) -> int {
    if (n <= 1) { return n; }
    return fib(n - 1) + fib(n - 2);
}
var total: int = 0;
while (total < 100) total = total + fib(10);
"#;
    let source = unit.repeat(100);
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("repeated_program", |b| {
        b.iter(|| lexer_token_count(black_box(&source)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_simple, bench_lexer_large);
criterion_main!(benches);

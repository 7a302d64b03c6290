use criterion::{criterion_group, criterion_main, Criterion};
use search_core::tokenizer::tokenize;
use search_core::{DocumentStatus, EngineConfig, SearchServer, StopWords};

const WORDS: [&str; 16] = [
    "cat", "dog", "white", "black", "city", "river", "box", "brown", "big", "ears", "tail", "curly", "hair",
    "sparrow", "in", "the",
];

fn text(seed: usize, len: usize) -> String {
    (0..len).map(|i| WORDS[(seed * 31 + i * 17 + i * i) % WORDS.len()]).collect::<Vec<_>>().join(" ")
}

fn server() -> SearchServer {
    let stop = StopWords::parse("in the").unwrap();
    let mut server = SearchServer::with_config(stop, EngineConfig::default()).unwrap();
    for id in 0..10_000 {
        server.add_document(id, &text(id as usize, 40), DocumentStatus::Active, &[1, 2, 3]).unwrap();
    }
    server
}

fn bench_tokenize(c: &mut Criterion) {
    let stop = StopWords::parse("in the").unwrap();
    let doc = text(1, 5_000);
    c.bench_function("tokenize_5000_words", |b| b.iter(|| tokenize(&doc, &stop).unwrap()));
}

fn bench_find(c: &mut Criterion) {
    let server = server();
    let query = "white cat city ears -sparrow big brown river";
    c.bench_function("find_top_sequential", |b| b.iter(|| server.find_top_documents(query).unwrap()));
    c.bench_function("find_top_parallel", |b| {
        b.iter(|| server.find_top_documents_par(query, DocumentStatus::Active).unwrap())
    });
}

criterion_group!(benches, bench_tokenize, bench_find);
criterion_main!(benches);

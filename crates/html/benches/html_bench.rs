use criterion::{Criterion, black_box, criterion_group, criterion_main};
use html::{Document, STATIC_HEAD_TAG, Selector, normalize_fragment, rename_head_tags};

const HEAD_BLOCK: &str = concat!(
    r#"<meta name="x" content="A"><link rel="preload" href="/font.woff2" as="font">"#,
    r#"<script type="application/ld+json">{"@type": "WebPage", "name": "a &amp; b"}</script>"#,
);

fn make_page(blocks: usize) -> String {
    let mut html = String::with_capacity(HEAD_BLOCK.len() * blocks + 64);
    html.push_str("<!DOCTYPE html><html><head>");
    for _ in 0..blocks {
        html.push_str(HEAD_BLOCK);
    }
    html.push_str("</head><body><header>hi</header></body></html>");
    html
}

fn bench_snapshot_parse(c: &mut Criterion) {
    let page = make_page(2_000);
    c.bench_function("bench_snapshot_parse", |b| {
        b.iter(|| {
            let rewritten = rename_head_tags(black_box(&page), STATIC_HEAD_TAG);
            let doc = Document::parse(&rewritten);
            black_box(doc.len());
        });
    });
}

fn bench_fingerprint_query(c: &mut Criterion) {
    let page = make_page(2_000);
    let doc = Document::parse(&page);
    let meta = doc
        .find_element(doc.root(), "meta")
        .map(Selector::for_element);
    c.bench_function("bench_fingerprint_query", |b| {
        b.iter(|| {
            if let Some(selector) = &meta {
                black_box(doc.query_selector_all(doc.root(), selector).len());
            }
        });
    });
}

fn bench_normalize_fragment(c: &mut Criterion) {
    let fragment = HEAD_BLOCK.repeat(50);
    c.bench_function("bench_normalize_fragment", |b| {
        b.iter(|| black_box(normalize_fragment(black_box(&fragment))));
    });
}

criterion_group!(
    benches,
    bench_snapshot_parse,
    bench_fingerprint_query,
    bench_normalize_fragment
);
criterion_main!(benches);

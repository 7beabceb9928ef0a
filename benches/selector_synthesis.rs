//! Selector synthesis benchmark suite.
//!
//! Measures selector / XPath generation and hover resolution on nested
//! documents:
//! - Depths: 8, 32, 128
//! - Siblings per level: 4
//!
//! Run with: cargo bench --bench selector_synthesis
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use devlens_inspector::{
    Document, Inspector, MemoryDocument, NodeId, PartialInspectorConfig, PointerEvent, Rect,
    generate_selector, generate_xpath,
};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const DEPTHS: &[usize] = &[8, 32, 128];
const SIBLINGS: usize = 4;

// ============================================================================
// Fixtures
// ============================================================================

/// Builds a chain `depth` levels deep with `SIBLINGS` children per level.
/// Returns the document and the deepest element.
fn nested_document(depth: usize) -> (MemoryDocument, NodeId) {
    let mut doc = MemoryDocument::new("https://bench.local/").expect("valid url");
    let mut parent = doc.body().expect("body");

    for level in 0..depth {
        let mut last = parent;
        for sibling in 0..SIBLINGS {
            let child = doc.append_new(parent, "div").expect("parent exists");
            doc.set_attribute(child, "class", &format!("level-{level} item-{sibling}"));
            last = child;
        }
        parent = last;
    }

    doc.set_rect(parent, Rect::new(10.0, 10.0, 100.0, 20.0))
        .expect("leaf exists");
    (doc, parent)
}

// ============================================================================
// Benchmark: Selector / XPath
// ============================================================================

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for &depth in DEPTHS {
        let (doc, leaf) = nested_document(depth);

        group.bench_with_input(BenchmarkId::new("selector", depth), &leaf, |b, &leaf| {
            b.iter(|| generate_selector(black_box(&doc), leaf));
        });

        group.bench_with_input(BenchmarkId::new("xpath", depth), &leaf, |b, &leaf| {
            b.iter(|| generate_xpath(black_box(&doc), leaf));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Hover Resolution
// ============================================================================

fn bench_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover");

    for &depth in DEPTHS {
        let (doc, _) = nested_document(depth);
        let mut inspector = Inspector::new(doc, &PartialInspectorConfig::new());
        inspector.activate();

        group.bench_function(BenchmarkId::new("mouse_move", depth), |b| {
            b.iter(|| inspector.handle_mouse_move(black_box(&PointerEvent::new(20.0, 15.0))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_synthesis, bench_hover);
criterion_main!(benches);

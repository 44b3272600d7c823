use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use trellis_layout::{
    AvailableSpace, Dimension, Display, LayoutTree, NodeId, Size, Style, TreeResult,
};

/// Style of the container at `depth`, alternating between the three formatting contexts.
fn container_style(depth: usize) -> Style {
    let display = match depth % 3 {
        0 => Display::Flex,
        1 => Display::Block,
        _ => Display::Grid,
    };
    Style {
        display,
        flex_grow: 1.0,
        ..Style::default()
    }
}

fn leaf_style(index: usize) -> Style {
    Style {
        size: Size::new(
            Dimension::length(10.0 + (index % 7) as f32),
            Dimension::length(8.0),
        ),
        ..Style::default()
    }
}

/// A built tree with its root and the first leaf.
struct BenchTree {
    tree: LayoutTree,
    root: NodeId,
    leaf: NodeId,
}

/// Build a tree `depth` levels deep. The top three levels fan out `breadth` ways and
/// every branch below them is a single chain down to a fixed-size leaf.
///
/// Containers are created bottom-up from an explicit frontier so arbitrarily deep
/// trees never recurse during construction.
fn build_tree(depth: usize, breadth: usize) -> TreeResult<BenchTree> {
    let mut tree = LayoutTree::new();
    let mut level: Vec<NodeId> = (0..breadth.pow(depth.min(3) as u32))
        .map(|index| tree.new_leaf(leaf_style(index)))
        .collect();
    let leaf = level.first().copied().unwrap_or_default();
    for current_depth in (0..depth).rev() {
        let group = if current_depth < 3 { breadth } else { 1 };
        let mut parents = Vec::with_capacity(level.len() / group.max(1) + 1);
        for children in level.chunks(group.max(1)) {
            parents.push(tree.new_with_children(container_style(current_depth), children)?);
        }
        level = parents;
    }
    let root = match level.as_slice() {
        [single] => *single,
        _ => tree.new_with_children(container_style(0), &level)?,
    };
    Ok(BenchTree { tree, root, leaf })
}

fn bench_deep_tree(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("deep_tree");
    for depth in [10usize, 100, 300] {
        let Ok(BenchTree { mut tree, root, leaf }) = build_tree(depth, 4) else {
            log::error!("failed to build a tree of depth {depth}");
            continue;
        };
        let viewport = Size::new(AvailableSpace::Definite(1024.0), AvailableSpace::Definite(768.0));
        group.bench_with_input(BenchmarkId::new("fresh", depth), &depth, |bencher, _| {
            bencher.iter(|| {
                if let Err(error) = tree.mark_dirty(leaf) {
                    log::error!("mark_dirty failed: {error}");
                }
                black_box(tree.compute_layout(root, viewport))
            });
        });
        group.bench_with_input(BenchmarkId::new("cached", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(tree.compute_layout(root, viewport)));
        });
    }
    group.finish();
}

fn bench_construction(criterion: &mut Criterion) {
    criterion.bench_function("build_depth_1000", |bencher| {
        bencher.iter(|| black_box(build_tree(1000, 4).map(|built| built.tree.total_node_count())));
    });
}

criterion_group!(layout_benches, bench_deep_tree, bench_construction);
criterion_main!(layout_benches);

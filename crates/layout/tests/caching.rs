use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use anyhow::Result;
use trellis_layout::{Display, LayoutTree, NodeId, Size, Style};

mod common;

/// Most measure calls one leaf may see in a single pass, however deep it sits.
const MEASURE_CALL_LIMIT: usize = 16;

/// `depth` nested unsized containers with a measured leaf at the bottom.
fn nested_chain(
    tree: &mut LayoutTree,
    depth: usize,
    display: Display,
    calls: &Arc<AtomicUsize>,
) -> Result<NodeId> {
    let measure = common::text_measure(120.0, 12.0, calls);
    let mut node = tree.new_leaf_with_measure(Style::default(), measure);
    for _ in 0..depth {
        node = tree.new_with_children(
            Style {
                display,
                ..Style::default()
            },
            &[node],
        )?;
    }
    Ok(node)
}

#[test]
fn measure_calls_do_not_grow_with_depth() -> Result<()> {
    common::init_logging();
    for display in [Display::Flex, Display::Block, Display::Grid] {
        let counter = Arc::default();
        let mut tree = LayoutTree::new();
        let root = nested_chain(&mut tree, 50, display, &counter)?;
        tree.compute_layout(root, Size::definite(800.0, 600.0))?;

        let first_pass = common::calls(&counter);
        assert!(first_pass > 0);
        assert!(first_pass <= MEASURE_CALL_LIMIT, "{display:?}: {first_pass} calls");

        tree.compute_layout(root, Size::definite(800.0, 600.0))?;
        assert_eq!(common::calls(&counter), first_pass, "{display:?}: second pass re-measured");
    }
    Ok(())
}

#[test]
fn repeated_passes_are_identical() -> Result<()> {
    common::init_logging();
    let counter = Arc::default();
    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), common::text_measure(300.0, 10.0, &counter));
    let sibling = tree.new_leaf(common::fixed(33.3, 20.0));
    let root = tree.new_with_children(Style::default(), &[text, sibling])?;

    tree.compute_layout(root, Size::definite(200.0, 100.0))?;
    let first = [*tree.layout(root)?, *tree.layout(text)?, *tree.layout(sibling)?];
    for node in [text, sibling, root] {
        tree.acknowledge_subtree(node)?;
    }

    tree.compute_layout(root, Size::definite(200.0, 100.0))?;
    let second = [*tree.layout(root)?, *tree.layout(text)?, *tree.layout(sibling)?];
    assert_eq!(first, second);
    assert!(tree.has_new_layout(text)?);
    Ok(())
}

#[test]
fn marking_dirty_forces_remeasurement() -> Result<()> {
    common::init_logging();
    let counter = Arc::default();
    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), common::text_measure(80.0, 10.0, &counter));
    let root = tree.new_with_children(Style::default(), &[text])?;

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    let before = common::calls(&counter);
    tree.mark_dirty(text)?;
    assert!(tree.dirty(root)?);

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert!(common::calls(&counter) > before);
    assert_eq!(tree.layout(text)?.size, Size::new(80.0, 10.0));
    Ok(())
}

#[test]
fn replacing_the_measure_changes_the_size() -> Result<()> {
    common::init_logging();
    let counter = Arc::default();
    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), common::text_measure(80.0, 10.0, &counter));
    let root = tree.new_with_children(Style::default(), &[text])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(tree.layout(root)?.size, Size::new(80.0, 10.0));

    tree.set_measure_func(text, Some(common::text_measure(40.0, 25.0, &counter)))?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(tree.layout(root)?.size, Size::new(40.0, 25.0));

    tree.set_measure_func(text, None)?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(tree.layout(root)?.size, Size::ZERO);
    Ok(())
}

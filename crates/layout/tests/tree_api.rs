use anyhow::Result;
use trellis_layout::{Direction, LayoutTree, Size, Style, TreeError};

mod common;

#[test]
fn structural_errors_are_reported() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(Style::default());
    let stranger = tree.new_leaf(Style::default());
    let parent = tree.new_with_children(Style::default(), &[child])?;

    assert_eq!(
        tree.remove_child(parent, stranger),
        Err(TreeError::NotAChild { parent, child: stranger })
    );
    assert_eq!(
        tree.child_at_index(parent, 3),
        Err(TreeError::ChildIndexOutOfBounds {
            parent,
            child_index: 3,
            child_count: 1,
        })
    );
    assert_eq!(
        tree.add_child(child, parent),
        Err(TreeError::CycleDetected { parent: child, child: parent })
    );
    assert_eq!(
        tree.add_child(parent, parent),
        Err(TreeError::CycleDetected { parent, child: parent })
    );

    let removed = tree.new_leaf(Style::default());
    tree.remove(removed)?;
    assert_eq!(tree.add_child(removed, child), Err(TreeError::InvalidParent(removed)));
    assert_eq!(tree.style(removed).err(), Some(TreeError::InvalidNode(removed)));
    assert_eq!(tree.add_child(parent, removed), Err(TreeError::InvalidNode(removed)));
    Ok(())
}

#[test]
fn child_list_mutation() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::with_capacity(8);
    let first = tree.new_leaf(Style::default());
    let second = tree.new_leaf(Style::default());
    let third = tree.new_leaf(Style::default());
    let parent = tree.new_with_children(Style::default(), &[first, second])?;

    tree.insert_child_at_index(parent, 0, third)?;
    assert_eq!(tree.children(parent)?, &[third, first, second]);
    assert_eq!(tree.child_at_index(parent, 1)?, first);

    let replaced = tree.replace_child_at_index(parent, 1, second)?;
    assert_eq!(replaced, first);
    assert_eq!(tree.children(parent)?, &[third, second]);
    assert_eq!(tree.parent(first)?, None);

    assert_eq!(tree.remove_child_at_index(parent, 0)?, third);
    assert_eq!(tree.child_count(parent)?, 1);
    assert_eq!(tree.parent(third)?, None);
    assert_eq!(tree.total_node_count(), 4);
    Ok(())
}

#[test]
fn set_children_reparents_and_orphans() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let kept = tree.new_leaf(Style::default());
    let dropped = tree.new_leaf(Style::default());
    let moved = tree.new_leaf(Style::default());
    let parent = tree.new_with_children(Style::default(), &[kept, dropped])?;
    let other = tree.new_with_children(Style::default(), &[moved])?;

    tree.set_children(parent, &[moved, kept])?;
    assert_eq!(tree.children(parent)?, &[moved, kept]);
    assert_eq!(tree.parent(moved)?, Some(parent));
    assert_eq!(tree.child_count(other)?, 0);
    assert_eq!(tree.parent(dropped)?, None);
    Ok(())
}

#[test]
fn removing_a_node_orphans_its_children() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let child = tree.new_leaf(Style::default());
    let middle = tree.new_with_children(Style::default(), &[child])?;
    let root = tree.new_with_children(Style::default(), &[middle])?;

    tree.remove(middle)?;
    assert_eq!(tree.child_count(root)?, 0);
    assert_eq!(tree.parent(child)?, None);
    assert_eq!(tree.total_node_count(), 2);

    tree.clear();
    assert_eq!(tree.total_node_count(), 0);
    Ok(())
}

#[test]
fn dirty_flags_follow_mutation_and_layout() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(common::fixed(10.0, 10.0));
    let middle = tree.new_with_children(Style::default(), &[leaf])?;
    let root = tree.new_with_children(Style::default(), &[middle])?;
    assert!(tree.dirty(leaf)?);

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    for node in [root, middle, leaf] {
        assert!(!tree.dirty(node)?);
        assert!(tree.has_new_layout(node)?);
    }

    for node in [leaf, middle, root] {
        tree.acknowledge_subtree(node)?;
    }
    assert!(!tree.needs_visit(root)?);
    assert!(!tree.has_unconsumed_layout(root)?);

    tree.set_style(leaf, common::fixed(20.0, 10.0))?;
    assert!(tree.dirty(leaf)?);
    assert!(tree.dirty(root)?);
    assert!(tree.has_dirty_descendant(root)?);
    assert!(tree.has_dirty_descendant(middle)?);
    assert!(!tree.has_dirty_descendant(leaf)?);
    assert!(tree.needs_visit(root)?);

    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(tree.layout(root)?.size, Size::new(20.0, 10.0));
    Ok(())
}

#[test]
fn acknowledging_one_node_leaves_the_rest_unconsumed() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(common::fixed(10.0, 10.0));
    let root = tree.new_with_children(Style::default(), &[leaf])?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    tree.acknowledge_layout(root)?;
    assert!(!tree.has_new_layout(root)?);
    assert!(tree.has_unconsumed_layout(root)?);
    tree.acknowledge_layout(leaf)?;
    assert!(!tree.has_unconsumed_layout(root)?);
    Ok(())
}

#[test]
fn unchanged_tree_is_restamped() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(common::fixed(10.0, 10.0));
    let root = tree.new_with_children(Style::default(), &[leaf])?;
    tree.compute_layout(root, Size::definite(100.0, 100.0))?;
    let before = *tree.layout(leaf)?;
    tree.acknowledge_layout(leaf)?;

    tree.compute_layout(root, Size::definite(100.0, 100.0))?;
    assert!(tree.has_new_layout(leaf)?);
    assert_eq!(*tree.layout(leaf)?, before);
    Ok(())
}

#[test]
fn direction_inherits_through_ancestors() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let leaf = tree.new_leaf(Style::default());
    let root = tree.new_with_children(
        Style {
            direction: Direction::Rtl,
            ..Style::default()
        },
        &[leaf],
    )?;
    assert_eq!(tree.resolved_direction(leaf)?, Direction::Rtl);
    tree.remove_child(root, leaf)?;
    assert_eq!(tree.resolved_direction(leaf)?, Direction::Ltr);
    Ok(())
}

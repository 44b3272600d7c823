use std::sync::Arc;

use anyhow::Result;
use trellis_layout::{
    AutoRepeatStrategy, AvailableSpace, Dimension, Direction, Display, GridPlacement, GridTrackRepetition,
    JustifyContent, LayoutTree, LengthPercentage, Line, NodeId, Point, Size, Style, TrackSizingFunction,
    TrackSizingPair, auto_repetition_count,
};

mod common;

use common::EPSILON;

fn grid(columns: Vec<TrackSizingFunction>) -> Style {
    Style {
        display: Display::Grid,
        grid_template_columns: columns,
        ..Style::default()
    }
}

fn x_positions(tree: &LayoutTree, nodes: &[NodeId]) -> Result<Vec<f32>> {
    let positions = nodes
        .iter()
        .map(|node| tree.layout(*node).map(|layout| layout.location.x))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(positions)
}

/// Two `auto` columns in a 300px grid holding two 50px items.
fn two_auto_columns(justify_content: Option<JustifyContent>) -> Result<Vec<f32>> {
    let mut tree = LayoutTree::new();
    let items = [
        tree.new_leaf(common::fixed(50.0, 50.0)),
        tree.new_leaf(common::fixed(50.0, 50.0)),
    ];
    let root = tree.new_with_children(
        Style {
            justify_content,
            size: Size::new(Dimension::length(300.0), Dimension::Auto),
            ..grid(vec![
                TrackSizingFunction::Single(TrackSizingPair::auto()),
                TrackSizingFunction::Single(TrackSizingPair::auto()),
            ])
        },
        &items,
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;
    assert_eq!(tree.layout(root)?.size, Size::new(300.0, 50.0));
    x_positions(&tree, &items)
}

#[test]
fn auto_tracks_stretch_by_default() -> Result<()> {
    common::init_logging();
    assert_eq!(two_auto_columns(None)?, vec![0.0, 150.0]);
    assert_eq!(two_auto_columns(Some(JustifyContent::Stretch))?, vec![0.0, 150.0]);
    Ok(())
}

#[test]
fn start_alignment_packs_auto_tracks() -> Result<()> {
    common::init_logging();
    assert_eq!(two_auto_columns(Some(JustifyContent::Start))?, vec![0.0, 50.0]);
    Ok(())
}

#[test]
fn auto_repeat_strategies() {
    common::init_logging();
    let template = vec![TrackSizingFunction::repeat(
        GridTrackRepetition::AutoFill,
        vec![TrackSizingPair::length(40.0)],
    )];
    assert_eq!(
        auto_repetition_count(
            &template,
            0.0,
            Some(120.0),
            AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow
        ),
        3
    );
    assert_eq!(
        auto_repetition_count(&template, 0.0, Some(140.0), AutoRepeatStrategy::MinRepetitionsThatDoOverflow),
        4
    );
    assert_eq!(
        auto_repetition_count(&template, 0.0, None, AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow),
        1
    );
}

#[test]
fn auto_fill_places_items_in_repeated_columns() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let items: Vec<_> = (0..4).map(|_| tree.new_leaf(Style::default())).collect();
    let root = tree.new_with_children(
        Style {
            size: Size::new(Dimension::length(120.0), Dimension::Auto),
            grid_auto_rows: vec![TrackSizingPair::length(10.0)],
            ..grid(vec![TrackSizingFunction::repeat(
                GridTrackRepetition::AutoFill,
                vec![TrackSizingPair::length(40.0)],
            )])
        },
        &items,
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    let locations = items
        .iter()
        .map(|item| tree.layout(*item).map(|layout| layout.location))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        locations,
        vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(80.0, 0.0),
            Point::new(0.0, 10.0),
        ]
    );
    assert_eq!(tree.layout(items[0])?.size, Size::new(40.0, 10.0));
    assert_eq!(tree.layout(root)?.size.height, 20.0);
    Ok(())
}

#[test]
fn auto_fit_collapses_empty_tracks() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let items: Vec<_> = (0..2).map(|_| tree.new_leaf(Style::default())).collect();
    let root = tree.new_with_children(
        Style {
            size: Size::new(Dimension::length(200.0), Dimension::length(10.0)),
            justify_content: Some(JustifyContent::Center),
            ..grid(vec![TrackSizingFunction::repeat(
                GridTrackRepetition::AutoFit,
                vec![TrackSizingPair::length(40.0)],
            )])
        },
        &items,
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    // Five repetitions fit; the three empty ones collapse and the remaining two center.
    assert_eq!(x_positions(&tree, &items)?, vec![60.0, 100.0]);
    Ok(())
}

#[test]
fn auto_fit_drops_gutters_of_collapsed_tracks() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let item = tree.new_leaf(Style::default());
    let root = tree.new_with_children(
        Style {
            size: Size::new(Dimension::length(200.0), Dimension::length(10.0)),
            gap: Size::new(LengthPercentage::length(10.0), LengthPercentage::length(0.0)),
            justify_content: Some(JustifyContent::Center),
            ..grid(vec![TrackSizingFunction::repeat(
                GridTrackRepetition::AutoFit,
                vec![TrackSizingPair::length(40.0)],
            )])
        },
        &[item],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    // Four repetitions fit; only the occupied one and none of the gaps survive.
    assert_eq!(tree.layout(item)?.location.x, 80.0);
    assert_eq!(tree.layout(item)?.size.width, 40.0);
    Ok(())
}

#[test]
fn huge_auto_fill_stops_at_the_track_limit() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let item = tree.new_leaf(Style::default());
    let root = tree.new_with_children(
        Style {
            size: Size::new(Dimension::length(300_000.0), Dimension::length(10.0)),
            ..grid(vec![TrackSizingFunction::repeat(
                GridTrackRepetition::AutoFill,
                vec![TrackSizingPair::length(1.0), TrackSizingPair::length(1.0)],
            )])
        },
        &[item],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    assert_eq!(tree.layout(root)?.size, Size::new(300_000.0, 10.0));
    assert_eq!(tree.layout(item)?.location, Point::ZERO);
    assert_eq!(tree.layout(item)?.size.width, 1.0);
    Ok(())
}

/// Width of the single `auto` column of an auto-width grid laid out in 30px, holding a
/// 100px wide image with `max-width: 50%` and an empty item that stretches to the column.
fn auto_column_around_image(is_replaced: bool) -> Result<f32> {
    let mut tree = LayoutTree::new();
    let image = tree.new_leaf_with_measure(
        Style {
            item_is_replaced: is_replaced,
            max_size: Size::new(Dimension::percent(0.5), Dimension::Auto),
            ..Style::default()
        },
        common::image_measure(100.0, 10.0),
    );
    let filler = tree.new_leaf(Style::default());
    let root = tree.new_with_children(
        grid(vec![TrackSizingFunction::Single(TrackSizingPair::auto())]),
        &[image, filler],
    )?;
    tree.compute_layout(root, Size::new(AvailableSpace::Definite(30.0), AvailableSpace::MaxContent))?;
    Ok(tree.layout(filler)?.size.width)
}

#[test]
fn replaced_items_have_compressible_minimums() -> Result<()> {
    common::init_logging();
    assert_eq!(auto_column_around_image(true)?, 30.0);
    assert_eq!(auto_column_around_image(false)?, 100.0);
    Ok(())
}

#[test]
fn fr_tracks_share_leftover_space() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    tree.disable_rounding();
    let items: Vec<_> = (0..3).map(|_| tree.new_leaf(Style::default())).collect();
    let root = tree.new_with_children(
        Style {
            size: Size::new(Dimension::length(400.0), Dimension::length(30.0)),
            gap: Size::new(LengthPercentage::length(10.0), LengthPercentage::length(0.0)),
            ..grid(vec![
                TrackSizingFunction::Single(TrackSizingPair::length(80.0)),
                TrackSizingFunction::Single(TrackSizingPair::fr(1.0)),
                TrackSizingFunction::Single(TrackSizingPair::fr(2.0)),
            ])
        },
        &items,
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    let widths = items
        .iter()
        .map(|item| tree.layout(*item).map(|layout| layout.size.width))
        .collect::<Result<Vec<_>, _>>()?;
    let expected = [80.0, 100.0, 200.0];
    for (width, wanted) in widths.iter().zip(expected) {
        assert!((width - wanted).abs() < EPSILON, "{widths:?}");
    }
    assert!((tree.layout(items[2])?.location.x - 200.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn explicit_placement_and_spans() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let wide = tree.new_leaf(Style {
        grid_column: Line::new(GridPlacement::line(1), GridPlacement::span(2)),
        ..Style::default()
    });
    let corner = tree.new_leaf(Style {
        grid_column: Line::new(GridPlacement::line(3), GridPlacement::Auto),
        grid_row: Line::new(GridPlacement::line(2), GridPlacement::Auto),
        ..Style::default()
    });
    let root = tree.new_with_children(
        Style {
            grid_template_rows: vec![
                TrackSizingFunction::Single(TrackSizingPair::length(20.0)),
                TrackSizingFunction::Single(TrackSizingPair::length(30.0)),
            ],
            ..grid(vec![TrackSizingFunction::repeat(
                GridTrackRepetition::Count(3),
                vec![TrackSizingPair::length(50.0)],
            )])
        },
        &[wide, corner],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    assert_eq!(tree.layout(wide)?.size, Size::new(100.0, 20.0));
    assert_eq!(tree.layout(corner)?.location, Point::new(100.0, 20.0));
    assert_eq!(tree.layout(corner)?.size, Size::new(50.0, 30.0));
    assert_eq!(tree.layout(root)?.size, Size::new(150.0, 50.0));
    Ok(())
}

#[test]
fn items_of_different_spans_size_auto_tracks() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    tree.disable_rounding();
    let pair = tree.new_leaf_with_measure(
        Style {
            grid_column: Line::new(GridPlacement::line(1), GridPlacement::span(2)),
            ..Style::default()
        },
        common::image_measure(100.0, 10.0),
    );
    let triple = tree.new_leaf_with_measure(
        Style {
            grid_column: Line::new(GridPlacement::line(1), GridPlacement::span(3)),
            ..Style::default()
        },
        common::image_measure(150.0, 10.0),
    );
    let root = tree.new_with_children(
        grid(vec![TrackSizingFunction::repeat(
            GridTrackRepetition::Count(3),
            vec![TrackSizingPair::auto()],
        )]),
        &[triple, pair],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    assert!((tree.layout(root)?.size.width - 150.0).abs() < EPSILON);
    assert!((tree.layout(triple)?.size.width - 150.0).abs() < EPSILON);
    assert!(tree.layout(pair)?.size.width >= 100.0 - EPSILON);
    Ok(())
}

#[test]
fn rtl_mirrors_columns() -> Result<()> {
    common::init_logging();
    let mut tree = LayoutTree::new();
    let items: Vec<_> = (0..2).map(|_| tree.new_leaf(Style::default())).collect();
    let root = tree.new_with_children(
        Style {
            direction: Direction::Rtl,
            ..grid(vec![
                TrackSizingFunction::Single(TrackSizingPair::length(30.0)),
                TrackSizingFunction::Single(TrackSizingPair::length(70.0)),
            ])
        },
        &items,
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    assert_eq!(x_positions(&tree, &items)?, vec![70.0, 0.0]);
    assert_eq!(tree.layout(items[1])?.size.width, 70.0);
    Ok(())
}

#[test]
fn content_sized_tracks_follow_measured_items() -> Result<()> {
    common::init_logging();
    let counter = Arc::default();
    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), common::text_measure(80.0, 10.0, &counter));
    let fixed = tree.new_leaf(common::fixed(30.0, 30.0));
    let root = tree.new_with_children(
        grid(vec![
            TrackSizingFunction::Single(TrackSizingPair::max_content()),
            TrackSizingFunction::Single(TrackSizingPair::min_content()),
        ]),
        &[text, fixed],
    )?;
    tree.compute_layout(root, Size::MAX_CONTENT)?;

    assert_eq!(tree.layout(text)?.size, Size::new(80.0, 30.0));
    assert_eq!(tree.layout(fixed)?.location.x, 80.0);
    assert_eq!(tree.layout(root)?.size, Size::new(110.0, 30.0));
    assert!(common::calls(&counter) > 0);
    Ok(())
}

//! Grid item placement.
//!
//! Spec: §8.5 Grid Item Placement Algorithm
//! <https://www.w3.org/TR/css-grid-2/#auto-placement-algo>

use trellis_style::{AbsoluteAxis, GridAutoFlow, Line, Size};

use crate::implicit::ResolvedPlacement;
use crate::types::{OriginZeroLine, TrackCounts};

/// Area occupied by an item, in origin-zero lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridArea {
    /// Column lines.
    pub column: Line<OriginZeroLine>,
    /// Row lines.
    pub row: Line<OriginZeroLine>,
}

impl GridArea {
    fn from_axes(
        primary_axis: AbsoluteAxis,
        primary: Line<OriginZeroLine>,
        secondary: Line<OriginZeroLine>,
    ) -> Self {
        match primary_axis {
            AbsoluteAxis::Horizontal => Self {
                column: primary,
                row: secondary,
            },
            AbsoluteAxis::Vertical => Self {
                column: secondary,
                row: primary,
            },
        }
    }
}

/// Which grid cells are taken, growing in any direction as items are placed.
#[derive(Debug, Clone)]
pub struct CellOccupancyMatrix {
    columns: TrackCounts,
    rows: TrackCounts,
    /// Row-major occupancy flags.
    cells: Vec<bool>,
}

impl CellOccupancyMatrix {
    /// An empty matrix of the given size.
    pub fn with_track_counts(columns: TrackCounts, rows: TrackCounts) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns.len() * rows.len()],
        }
    }

    /// Current track counts along `axis`.
    pub const fn track_counts(&self, axis: AbsoluteAxis) -> TrackCounts {
        match axis {
            AbsoluteAxis::Horizontal => self.columns,
            AbsoluteAxis::Vertical => self.rows,
        }
    }

    fn cell_index(&self, column: OriginZeroLine, row: OriginZeroLine) -> Option<usize> {
        let column_index = i32::from(column) - i32::from(self.columns.implicit_start_line());
        let row_index = i32::from(row) - i32::from(self.rows.implicit_start_line());
        let in_range = column_index >= 0
            && row_index >= 0
            && (column_index as usize) < self.columns.len()
            && (row_index as usize) < self.rows.len();
        if in_range {
            Some(row_index as usize * self.columns.len() + column_index as usize)
        } else {
            None
        }
    }

    /// True when any cell of `area` is taken. Cells outside the matrix are free.
    pub fn is_area_occupied(&self, area: GridArea) -> bool {
        (area.row.start..area.row.end).any(|row| {
            (area.column.start..area.column.end).any(|column| {
                self.cell_index(column, row)
                    .and_then(|index| self.cells.get(index).copied())
                    .unwrap_or(false)
            })
        })
    }

    /// Mark every cell of `area` as taken, growing the matrix to contain it.
    pub fn mark_area(&mut self, area: GridArea) {
        self.expand_to_fit(area);
        for row in area.row.start..area.row.end {
            for column in area.column.start..area.column.end {
                if let Some(index) = self.cell_index(column, row)
                    && let Some(cell) = self.cells.get_mut(index)
                {
                    *cell = true;
                }
            }
        }
    }

    fn expand_to_fit(&mut self, area: GridArea) {
        let grow = |counts: TrackCounts, lines: Line<OriginZeroLine>| TrackCounts {
            negative_implicit: counts
                .negative_implicit
                .max((-lines.start).max(0) as u16),
            explicit: counts.explicit,
            positive_implicit: counts
                .positive_implicit
                .max((lines.end - counts.explicit as i16).max(0) as u16),
        };
        let columns = grow(self.columns, area.column);
        let rows = grow(self.rows, area.row);
        if columns == self.columns && rows == self.rows {
            return;
        }

        let mut expanded = Self::with_track_counts(columns, rows);
        for row in self.rows.implicit_start_line()..self.rows.implicit_end_line() {
            for column in self.columns.implicit_start_line()..self.columns.implicit_end_line() {
                let taken = self
                    .cell_index(column, row)
                    .and_then(|index| self.cells.get(index).copied())
                    .unwrap_or(false);
                if taken
                    && let Some(index) = expanded.cell_index(column, row)
                    && let Some(cell) = expanded.cells.get_mut(index)
                {
                    *cell = true;
                }
            }
        }
        *self = expanded;
    }
}

/// Place every item, returning one area per placement in input order.
///
/// `placements` holds the resolved (column, row) placement of each in-flow item in
/// `order`-modified document order.
pub fn place_grid_items(
    matrix: &mut CellOccupancyMatrix,
    placements: &[Size<ResolvedPlacement>],
    auto_flow: GridAutoFlow,
) -> Vec<GridArea> {
    let primary_axis = auto_flow.primary_axis();
    let secondary_axis = primary_axis.other();
    let is_dense = auto_flow.is_dense();
    let mut areas: Vec<Option<GridArea>> = vec![None; placements.len()];

    // 1. Items with a definite position on both axes.
    for (placement, area) in placements.iter().zip(areas.iter_mut()) {
        if let (Some(column), Some(row)) = (placement.width.lines, placement.height.lines) {
            let placed = GridArea { column, row };
            matrix.mark_area(placed);
            *area = Some(placed);
        }
    }

    // 2. Items locked to a row (column for column flow).
    let mut row_cursors: Vec<(OriginZeroLine, OriginZeroLine)> = Vec::new();
    for (placement, area) in placements.iter().zip(areas.iter_mut()) {
        if area.is_some() {
            continue;
        }
        let primary = placement.get(primary_axis);
        let Some(secondary_lines) = placement.get(secondary_axis).lines else {
            continue;
        };
        let grid_start = matrix.track_counts(primary_axis).implicit_start_line();
        let mut position = if is_dense {
            grid_start
        } else {
            row_cursors
                .iter()
                .find(|(row, _)| *row == secondary_lines.start)
                .map_or(grid_start, |(_, column)| *column)
        };
        let span = primary.span as OriginZeroLine;
        let placed = loop {
            let candidate = GridArea::from_axes(
                primary_axis,
                Line::new(position, position + span),
                secondary_lines,
            );
            if !matrix.is_area_occupied(candidate) {
                break candidate;
            }
            position += 1;
        };
        matrix.mark_area(placed);
        *area = Some(placed);
        let end = position + span;
        match row_cursors
            .iter_mut()
            .find(|(row, _)| *row == secondary_lines.start)
        {
            Some(cursor) => cursor.1 = end,
            None => row_cursors.push((secondary_lines.start, end)),
        }
    }

    // 4. Remaining items, with an auto-placement cursor.
    let primary_start = matrix.track_counts(primary_axis).implicit_start_line();
    let secondary_start = matrix.track_counts(secondary_axis).implicit_start_line();
    let mut cursor = (primary_start, secondary_start);
    for (placement, area) in placements.iter().zip(areas.iter_mut()) {
        if area.is_some() {
            continue;
        }
        if is_dense {
            cursor = (primary_start, secondary_start);
        }
        let primary = placement.get(primary_axis);
        let secondary_span = placement.get(secondary_axis).span as OriginZeroLine;
        let placed = if let Some(primary_lines) = primary.lines {
            if !is_dense && primary_lines.start < cursor.0 {
                cursor.1 += 1;
            }
            cursor.0 = primary_lines.start;
            loop {
                let candidate = GridArea::from_axes(
                    primary_axis,
                    primary_lines,
                    Line::new(cursor.1, cursor.1 + secondary_span),
                );
                if !matrix.is_area_occupied(candidate) {
                    break candidate;
                }
                cursor.1 += 1;
            }
        } else {
            let span = primary.span as OriginZeroLine;
            loop {
                let primary_end = matrix.track_counts(primary_axis).implicit_end_line();
                if cursor.0 + span > primary_end && cursor.0 > primary_start {
                    cursor = (primary_start, cursor.1 + 1);
                    continue;
                }
                let candidate = GridArea::from_axes(
                    primary_axis,
                    Line::new(cursor.0, cursor.0 + span),
                    Line::new(cursor.1, cursor.1 + secondary_span),
                );
                if !matrix.is_area_occupied(candidate) {
                    break candidate;
                }
                cursor.0 += 1;
            }
        };
        matrix.mark_area(placed);
        *area = Some(placed);
    }

    areas
        .into_iter()
        .map(|area| area.unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use trellis_style::GridPlacement;

    use super::*;
    use crate::implicit::resolve_placement;

    fn placement(column: Line<GridPlacement>, row: Line<GridPlacement>) -> Size<ResolvedPlacement> {
        Size::new(resolve_placement(column, 3), resolve_placement(row, 2))
    }

    fn auto() -> Line<GridPlacement> {
        Line::new(GridPlacement::Auto, GridPlacement::Auto)
    }

    fn explicit(count: u16) -> TrackCounts {
        TrackCounts {
            explicit: count,
            ..TrackCounts::default()
        }
    }

    fn matrix() -> CellOccupancyMatrix {
        CellOccupancyMatrix::with_track_counts(explicit(3), explicit(2))
    }

    fn columns(areas: &[GridArea]) -> Vec<(i16, i16)> {
        areas.iter().map(|area| (area.column.start, area.row.start)).collect()
    }

    #[test]
    /// # Panics
    /// Panics if auto items do not flow around a definitely placed item.
    fn auto_items_flow_around_fixed_items() {
        let items = [
            placement(auto(), auto()),
            placement(Line::from_line(2), Line::from_line(1)),
            placement(auto(), auto()),
            placement(auto(), auto()),
        ];
        let areas = place_grid_items(&mut matrix(), &items, GridAutoFlow::Row);
        assert_eq!(columns(&areas), vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
    }

    #[test]
    /// # Panics
    /// Panics if sparse placement backfills or dense placement does not.
    fn dense_backfills_holes() {
        let items = [
            placement(auto(), auto()),
            placement(Line::from_span(2), auto()),
            placement(auto(), auto()),
        ];
        let sparse = place_grid_items(&mut matrix(), &items, GridAutoFlow::Row);
        assert_eq!(columns(&sparse), vec![(0, 0), (1, 0), (0, 1)]);

        let wide_first = [
            placement(Line::from_span(2), auto()),
            placement(Line::from_span(2), auto()),
            placement(auto(), auto()),
        ];
        let sparse_hole = place_grid_items(&mut matrix(), &wide_first, GridAutoFlow::Row);
        assert_eq!(columns(&sparse_hole), vec![(0, 0), (0, 1), (2, 1)]);
        let dense = place_grid_items(&mut matrix(), &wide_first, GridAutoFlow::RowDense);
        assert_eq!(columns(&dense), vec![(0, 0), (0, 1), (2, 0)]);
    }

    #[test]
    /// # Panics
    /// Panics if column flow does not fill columns first.
    fn column_flow_fills_columns() {
        let items = [placement(auto(), auto()), placement(auto(), auto()), placement(auto(), auto())];
        let areas = place_grid_items(&mut matrix(), &items, GridAutoFlow::Column);
        assert_eq!(columns(&areas), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    /// # Panics
    /// Panics if items outside the matrix do not grow it.
    fn marking_grows_matrix() {
        let mut grid = matrix();
        grid.mark_area(GridArea {
            column: Line::new(-1, 0),
            row: Line::new(2, 4),
        });
        let columns_after = grid.track_counts(AbsoluteAxis::Horizontal);
        assert_eq!(columns_after.negative_implicit, 1);
        assert_eq!(grid.track_counts(AbsoluteAxis::Vertical).positive_implicit, 2);
        assert!(grid.is_area_occupied(GridArea {
            column: Line::new(-1, 0),
            row: Line::new(3, 4),
        }));
        assert!(!grid.is_area_occupied(GridArea {
            column: Line::new(0, 3),
            row: Line::new(0, 2),
        }));
    }
}

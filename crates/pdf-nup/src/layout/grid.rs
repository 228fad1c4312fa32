//! Grid cell geometry
//!
//! Maps grid positions of a [`LayoutResult`] to canvas offsets in points.

use crate::constants::mm_to_pt;

use super::{GridPosition, LayoutResult};

/// All grid positions of a layout in placement order.
///
/// Row-major: every column of row 0, then row 1, and so on.
pub fn grid_positions(layout: &LayoutResult) -> impl Iterator<Item = GridPosition> + '_ {
    (0..layout.rows)
        .flat_map(move |row| (0..layout.columns).map(move |col| GridPosition::new(row, col)))
}

/// Lower-left corner of a cell, in points from the canvas origin
pub fn cell_origin_pt(layout: &LayoutResult, pos: GridPosition) -> (f32, f32) {
    (
        pos.col as f32 * mm_to_pt(layout.cell_width_mm),
        pos.row as f32 * mm_to_pt(layout.cell_height_mm),
    )
}

/// Canvas size for a layout, in points
pub fn canvas_size_pt(layout: &LayoutResult) -> (f32, f32) {
    (
        mm_to_pt(layout.imposed_width_mm),
        mm_to_pt(layout.imposed_height_mm),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRequest, plan};
    use crate::types::{Orientation, PageSize, Substrate};

    fn cards() -> LayoutResult {
        plan(&LayoutRequest::new(
            Substrate::new(460.0, 320.0, Orientation::Landscape),
            PageSize::new(85.0, 55.0),
            5.0,
        ))
        .unwrap()
    }

    #[test]
    fn test_row_major_order() {
        let layout = cards();
        let positions: Vec<_> = grid_positions(&layout).collect();

        assert_eq!(positions.len(), 25);
        assert_eq!(positions[0], GridPosition::new(0, 0));
        assert_eq!(positions[1], GridPosition::new(0, 1));
        assert_eq!(positions[5], GridPosition::new(1, 0));
        assert_eq!(positions[24], GridPosition::new(4, 4));
    }

    #[test]
    fn test_cell_origin() {
        let layout = cards();

        assert_eq!(cell_origin_pt(&layout, GridPosition::new(0, 0)), (0.0, 0.0));

        let (x, y) = cell_origin_pt(&layout, GridPosition::new(2, 3));
        assert!((x - 3.0 * mm_to_pt(90.0)).abs() < 1e-3);
        assert!((y - 2.0 * mm_to_pt(60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_cells_stay_inside_canvas() {
        let layout = cards();
        let (width, height) = canvas_size_pt(&layout);

        for pos in grid_positions(&layout) {
            let (x, y) = cell_origin_pt(&layout, pos);
            assert!(x + mm_to_pt(layout.cell_width_mm) <= width + 1e-2);
            assert!(y + mm_to_pt(layout.cell_height_mm) <= height + 1e-2);
        }
    }
}

//! Grid compositing
//!
//! Applies one [`LayoutResult`] to a sequence of source pages. Every source
//! page gets its own canvas, filled with `total_up` copies of that page, and
//! the finished canvas goes to a [`SheetSink`]. Pages are opaque here; the
//! PDF side lives behind the sink.

use crate::layout::{GridPosition, LayoutResult, canvas_size_pt, cell_origin_pt, grid_positions};
use crate::types::{ImposeError, Result};

/// One copy of a source page on a canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<P> {
    pub page: P,
    pub position: GridPosition,
    /// Offset of the page origin from the canvas lower-left corner (points)
    pub x_pt: f32,
    pub y_pt: f32,
}

/// A blank output surface that copies are placed onto
#[derive(Debug, Clone)]
pub struct Canvas<P> {
    width_pt: f32,
    height_pt: f32,
    placements: Vec<Placement<P>>,
}

impl<P: Clone> Canvas<P> {
    pub fn blank(width_pt: f32, height_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
            placements: Vec::new(),
        }
    }

    /// Place a copy of `page` translated to `(x_pt, y_pt)`, unscaled
    pub fn place(&mut self, page: &P, position: GridPosition, x_pt: f32, y_pt: f32) {
        self.placements.push(Placement {
            page: page.clone(),
            position,
            x_pt,
            y_pt,
        });
    }

    pub fn finalize(self) -> OutputPage<P> {
        OutputPage {
            width_pt: self.width_pt,
            height_pt: self.height_pt,
            placements: self.placements,
        }
    }
}

/// A finished canvas, ready for the sink
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPage<P> {
    pub width_pt: f32,
    pub height_pt: f32,
    pub placements: Vec<Placement<P>>,
}

/// Accepts completed sheets in output order
pub trait SheetSink<P> {
    fn emit(&mut self, sheet: OutputPage<P>) -> Result<()>;
}

impl<P> SheetSink<P> for Vec<OutputPage<P>> {
    fn emit(&mut self, sheet: OutputPage<P>) -> Result<()> {
        self.push(sheet);
        Ok(())
    }
}

/// Build one sheet per source page and hand each to `sink`.
///
/// Returns the number of sheets emitted. Fails with
/// [`ImposeError::LayoutInfeasible`] before creating any canvas when the
/// layout holds no copies. A sink error stops the run; sheets emitted before
/// it are left as they are.
pub fn compose<P, I, S>(layout: &LayoutResult, pages: I, sink: &mut S) -> Result<usize>
where
    P: Clone,
    I: IntoIterator<Item = P>,
    S: SheetSink<P> + ?Sized,
{
    if !layout.is_feasible() {
        let (page_width_mm, page_height_mm) = layout.trim_size_mm();
        return Err(ImposeError::LayoutInfeasible {
            page_width_mm,
            page_height_mm,
            gutter_mm: layout.gutter_mm,
        });
    }

    let (width_pt, height_pt) = canvas_size_pt(layout);
    let mut emitted = 0;

    for page in pages {
        let mut canvas = Canvas::blank(width_pt, height_pt);
        for pos in grid_positions(layout) {
            let (x, y) = cell_origin_pt(layout, pos);
            canvas.place(&page, pos, x, y);
        }
        sink.emit(canvas.finalize())?;
        emitted += 1;
        log::debug!("Emitted sheet {} ({} copies)", emitted, layout.total_up);
    }

    Ok(emitted)
}

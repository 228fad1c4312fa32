//! Layout data types for imposition
//!
//! These types carry the planning inputs and the single layout that is
//! reused for every output sheet.

use crate::types::{ImposeError, Orientation, PageSize, Result, Substrate};

/// Everything the planner needs, supplied once per run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRequest {
    pub substrate: Substrate,
    pub page: PageSize,
    /// Spacing added to both page axes before packing (mm)
    pub gutter_mm: f32,
}

impl LayoutRequest {
    pub fn new(substrate: Substrate, page: PageSize, gutter_mm: f32) -> Self {
        Self {
            substrate,
            page,
            gutter_mm,
        }
    }

    /// Reject non-positive sizes and negative gutters before any arithmetic
    pub fn validate(&self) -> Result<()> {
        ensure_positive("substrate width", self.substrate.width_mm)?;
        ensure_positive("substrate height", self.substrate.height_mm)?;
        ensure_positive("page trim width", self.page.trim_width_mm)?;
        ensure_positive("page trim height", self.page.trim_height_mm)?;

        if !self.gutter_mm.is_finite() || self.gutter_mm < 0.0 {
            return Err(ImposeError::InvalidDimensions(format!(
                "gutter must be zero or positive, got {}",
                self.gutter_mm
            )));
        }
        Ok(())
    }
}

fn ensure_positive(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImposeError::InvalidDimensions(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}

/// One way of packing the page onto the substrate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
}

impl Candidate {
    /// Copies per sheet for this candidate
    pub fn up(&self) -> usize {
        self.columns * self.rows
    }
}

/// The chosen layout
///
/// Computed once by [`plan`](super::plan) and applied unchanged to every
/// output sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    /// `columns * rows`
    pub total_up: usize,
    /// Gutter the cells were padded with (mm)
    pub gutter_mm: f32,
    /// Trim width plus gutter (mm)
    pub cell_width_mm: f32,
    /// Trim height plus gutter (mm)
    pub cell_height_mm: f32,
    /// `columns * cell_width_mm`
    pub imposed_width_mm: f32,
    /// `rows * cell_height_mm`
    pub imposed_height_mm: f32,
    /// The substrate after orientation normalization
    pub substrate: Substrate,
}

impl LayoutResult {
    /// Whether at least one copy fits on the sheet
    pub fn is_feasible(&self) -> bool {
        self.total_up > 0
    }

    /// Trim size of the source page the layout was planned for (mm)
    pub fn trim_size_mm(&self) -> (f32, f32) {
        (
            self.cell_width_mm - self.gutter_mm,
            self.cell_height_mm - self.gutter_mm,
        )
    }
}

/// Position within the grid (row, column)
///
/// Row 0 is the bottom row: the canvas origin is its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

//! Layout selection
//!
//! Packs the gutter-padded page onto the substrate in both orientations and
//! keeps whichever fits more copies.

use crate::types::{Orientation, Result, Substrate};

use super::{Candidate, LayoutRequest, LayoutResult};

// =============================================================================
// Planning
// =============================================================================

/// Choose the orientation and grid for a request.
///
/// Landscape keeps the page axes as given; portrait treats the page as
/// rotated 90° against the substrate. Landscape wins only when it is
/// strictly better, so ties go to portrait.
///
/// A result with `total_up == 0` is valid and means the page does not fit
/// either way; callers check [`LayoutResult::is_feasible`] before compositing.
pub fn plan(request: &LayoutRequest) -> Result<LayoutResult> {
    request.validate()?;

    let cell_width_mm = request.page.trim_width_mm + request.gutter_mm;
    let cell_height_mm = request.page.trim_height_mm + request.gutter_mm;
    let substrate = request.substrate;

    let landscape = Candidate {
        orientation: Orientation::Landscape,
        columns: fit_count(substrate.width_mm, cell_width_mm),
        rows: fit_count(substrate.height_mm, cell_height_mm),
    };
    let portrait = Candidate {
        orientation: Orientation::Portrait,
        columns: fit_count(substrate.width_mm, cell_height_mm),
        rows: fit_count(substrate.height_mm, cell_width_mm),
    };

    let chosen = if landscape.up() > portrait.up() {
        landscape
    } else {
        portrait
    };

    log::debug!(
        "landscape {}x{}={}, portrait {}x{}={}, chose {:?}",
        landscape.columns,
        landscape.rows,
        landscape.up(),
        portrait.columns,
        portrait.rows,
        portrait.up(),
        chosen.orientation
    );

    Ok(LayoutResult {
        orientation: chosen.orientation,
        columns: chosen.columns,
        rows: chosen.rows,
        total_up: chosen.up(),
        gutter_mm: request.gutter_mm,
        cell_width_mm,
        cell_height_mm,
        imposed_width_mm: chosen.columns as f32 * cell_width_mm,
        imposed_height_mm: chosen.rows as f32 * cell_height_mm,
        substrate: normalize_substrate(substrate, chosen.orientation),
    })
}

/// Number of whole cells that fit along one axis
fn fit_count(span_mm: f32, cell_mm: f32) -> usize {
    (span_mm / cell_mm).floor() as usize
}

// =============================================================================
// Normalization
// =============================================================================

/// Align the substrate's axes with the chosen orientation.
///
/// Landscape swaps only when width is the smaller side, portrait only when
/// height is the smaller side. Anything else is returned with its axes
/// untouched.
pub fn normalize_substrate(substrate: Substrate, orientation: Orientation) -> Substrate {
    let swap = match orientation {
        Orientation::Landscape => substrate.width_mm < substrate.height_mm,
        Orientation::Portrait => substrate.height_mm < substrate.width_mm,
    };

    let (width_mm, height_mm) = if swap {
        (substrate.height_mm, substrate.width_mm)
    } else {
        (substrate.width_mm, substrate.height_mm)
    };

    Substrate {
        width_mm,
        height_mm,
        orientation,
    }
}

// =============================================================================
// Tests
// =============================================================================

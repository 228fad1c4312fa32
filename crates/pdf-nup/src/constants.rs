//! Shared constants for sheet imposition
//!
//! This module centralizes magic numbers and defaults used throughout
//! planning, compositing and numbering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Millimeters per point, used when reading page boxes
pub const MM_PER_POINT: f32 = 0.352_777_78;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_POINT
}

/// Convert a page box length in points to millimeters, rounded to 0.01 mm.
///
/// The small bias keeps values like 84.999 from rounding down.
#[inline]
pub fn box_length_mm(pt: f32) -> f32 {
    ((pt_to_mm(pt) + 0.001) * 100.0).round() / 100.0
}

// =============================================================================
// Imposition Defaults
// =============================================================================

/// Default substrate width (mm)
pub const DEFAULT_SUBSTRATE_WIDTH_MM: f32 = 460.0;

/// Default substrate height (mm)
pub const DEFAULT_SUBSTRATE_HEIGHT_MM: f32 = 320.0;

/// Default spacing reserved around each copy (mm)
pub const DEFAULT_GUTTER_MM: f32 = 5.0;

/// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = "./outfile.pdf";

/// Page dimensions (points) used when a page carries no usable box (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Numbering
// =============================================================================

/// Font size for stamped numbers (points)
pub const NUMBER_FONT_SIZE: f32 = 15.0;

/// Lower-left corner of the number box on the template page (points)
pub const NUMBER_POSITION_PT: (f32, f32) = (200.0, 100.0);

/// Size of the box the number is centered in (mm)
pub const NUMBER_BOX_MM: (f32, f32) = (50.0, 30.0);

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width used for bytes outside the Helvetica table
const HELVETICA_FALLBACK_WIDTH: u16 = 600;

/// Rendered width of `text` in Helvetica at `font_size` points
pub fn helvetica_text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .bytes()
        .map(|b| match b {
            32..=126 => u32::from(HELVETICA_WIDTHS[usize::from(b - 32)]),
            _ => u32::from(HELVETICA_FALLBACK_WIDTH),
        })
        .sum();
    units as f32 * font_size / 1000.0
}

/// Default directory for numbered output
pub const DEFAULT_NUMBERING_DIR: &str = "numbering/assets/numbered";

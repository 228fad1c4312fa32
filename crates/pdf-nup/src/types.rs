use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error(
        "Page {page_width_mm}x{page_height_mm} mm with {gutter_mm} mm gutter does not fit on the substrate"
    )]
    LayoutInfeasible {
        page_width_mm: f32,
        page_height_mm: f32,
        gutter_mm: f32,
    },
    #[error("Unable to read document {}: {}", .path.display(), .message)]
    DocumentUnreadable { path: PathBuf, message: String },
    #[error("Failed to write {}: {}", .path.display(), .source)]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Landscape: width > height
    #[default]
    Landscape,
    /// Portrait: height > width
    Portrait,
}

/// The physical sheet available for printing, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Substrate {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Intended long axis. Rewritten by the planner after layout selection.
    pub orientation: Orientation,
}

impl Default for Substrate {
    fn default() -> Self {
        Self {
            width_mm: crate::constants::DEFAULT_SUBSTRATE_WIDTH_MM,
            height_mm: crate::constants::DEFAULT_SUBSTRATE_HEIGHT_MM,
            orientation: Orientation::Landscape,
        }
    }
}

impl Substrate {
    pub fn new(width_mm: f32, height_mm: f32, orientation: Orientation) -> Self {
        Self {
            width_mm,
            height_mm,
            orientation,
        }
    }

    pub fn area_mm2(&self) -> f32 {
        self.width_mm * self.height_mm
    }
}

/// Trim dimensions of one source page, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub trim_width_mm: f32,
    pub trim_height_mm: f32,
}

impl PageSize {
    pub fn new(trim_width_mm: f32, trim_height_mm: f32) -> Self {
        Self {
            trim_width_mm,
            trim_height_mm,
        }
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Total number of output sheets (one per source page)
    pub output_sheets: usize,
    /// Copies placed on every sheet
    pub copies_per_sheet: usize,
    /// Copies over the whole run
    pub total_copies: usize,
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    pub imposed_width_mm: f32,
    pub imposed_height_mm: f32,
    /// Imposed area divided by substrate area (0.0 when nothing fits)
    pub sheet_utilization: f32,
}

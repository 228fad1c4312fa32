pub mod compose;
pub mod constants;
pub mod impose;
pub mod layout;
pub mod numbering;
mod options;
mod preview;
pub mod render;
mod stats;
mod types;

pub use compose::{Canvas, OutputPage, Placement, SheetSink, compose};
pub use impose::{Imposition, impose, load_pdf, plan_document, save_pdf};
pub use layout::{LayoutRequest, LayoutResult, normalize_substrate, plan};
pub use numbering::{
    NumberedPage, NumberingOptions, number_pages, number_to_dir, numbered_documents, write_numbered,
};
pub use options::*;
pub use preview::generate_preview;
pub use render::{PdfSheetWriter, source_pages, trim_size};
pub use stats::calculate_statistics;
pub use types::*;

//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Reading page boxes
//! - Creating XObjects from source pages
//! - Assembling composited sheets into the output document
//! - Deep copying PDF objects

mod writer;
mod xobject;

pub use writer::PdfSheetWriter;
pub(crate) use writer::{finish_document, placement_command};
pub use xobject::{copy_object_deep, create_page_xobject, page_box, source_pages, trim_size};

//! Step-and-repeat imposition of a PDF document
//!
//! This module orchestrates a run:
//! 1. Sample the trim size of the first source page
//! 2. Plan the layout once
//! 3. Composite every source page onto its own sheet
//! 4. Assemble the output document

mod io;

pub use io::{load_pdf, save_pdf};

use crate::compose::compose;
use crate::layout::{LayoutResult, plan};
use crate::options::ImpositionOptions;
use crate::render::{PdfSheetWriter, source_pages, trim_size};
use crate::types::*;
use lopdf::Document;

/// An imposed document together with the layout it was built from
#[derive(Debug, Clone)]
pub struct Imposition {
    pub document: Document,
    pub layout: LayoutResult,
    pub sheets: usize,
}

/// Main imposition function
pub async fn impose(document: &Document, options: &ImpositionOptions) -> Result<Imposition> {
    options.validate()?;

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_sync(&document, &options, None)).await?
}

/// Plan the layout for a document without compositing anything
pub fn plan_document(document: &Document, options: &ImpositionOptions) -> Result<LayoutResult> {
    let pages = source_pages(document);
    let first = *pages.first().ok_or(ImposeError::NoPages)?;
    // Only the first page is sampled; the layout is reused for all of them
    let page_size = trim_size(document, first)?;
    log::debug!(
        "Trim size {} x {} mm from first of {} pages",
        page_size.trim_width_mm,
        page_size.trim_height_mm,
        pages.len()
    );
    plan(&options.layout_request(page_size))
}

pub(crate) fn impose_sync(
    document: &Document,
    options: &ImpositionOptions,
    max_sheets: Option<usize>,
) -> Result<Imposition> {
    let layout = plan_document(document, options)?;
    let pages = source_pages(document);
    let limit = max_sheets.unwrap_or(pages.len());

    let mut writer = PdfSheetWriter::new(document);
    let sheets = compose(&layout, pages.into_iter().take(limit), &mut writer)?;

    log::info!(
        "Imposed {} sheets at {} up ({:?}, {}x{})",
        sheets,
        layout.total_up,
        layout.orientation,
        layout.columns,
        layout.rows
    );

    Ok(Imposition {
        document: writer.finish(),
        layout,
        sheets,
    })
}

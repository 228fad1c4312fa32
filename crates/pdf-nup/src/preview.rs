use crate::impose::{Imposition, impose_sync};
use crate::options::ImpositionOptions;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the imposition
/// Returns a document holding only the first `max_sheets` sheets
pub async fn generate_preview(
    document: &Document,
    options: &ImpositionOptions,
    max_sheets: usize,
) -> Result<Imposition> {
    if max_sheets == 0 {
        return Err(ImposeError::Config(
            "Preview needs at least one sheet".to_string(),
        ));
    }
    options.validate()?;

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_sync(&document, &options, Some(max_sheets))).await?
}

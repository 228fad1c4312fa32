//! Document I/O operations for imposition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ImposeError::DocumentUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;
    let doc = tokio::task::spawn_blocking(move || {
        Document::load_mem(&bytes).map_err(|e| ImposeError::DocumentUnreadable {
            path,
            message: e.to_string(),
        })
    })
    .await??;
    Ok(doc)
}

/// Save the imposed document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ImposeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| ImposeError::WriteFailed { path, source })?;
    Ok(())
}

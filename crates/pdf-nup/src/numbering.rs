//! Sequential numbering
//!
//! Stamps zero-padded numbers onto copies of a template page, producing one
//! single-page document per number (tickets, vouchers, numbered cards).

use crate::constants::{
    DEFAULT_NUMBERING_DIR, DEFAULT_PAGE_DIMENSIONS, NUMBER_BOX_MM, NUMBER_FONT_SIZE,
    NUMBER_POSITION_PT, helvetica_text_width, mm_to_pt,
};
use crate::impose::save_pdf;
use crate::render::{
    create_page_xobject, finish_document, page_box, placement_command, source_pages,
};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Numbering configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberingOptions {
    /// Numbers run from 1 to `count` inclusive
    pub count: usize,
    /// Digits to zero-pad to; defaults to the digit count of `count`
    pub pad_width: Option<usize>,
    /// Lower-left corner of the number box on the page (points)
    pub position_pt: (f32, f32),
    /// Size of the box the number is centered in (mm)
    pub box_mm: (f32, f32),
    pub font_size: f32,
    pub output_dir: PathBuf,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            count: 1,
            pad_width: None,
            position_pt: NUMBER_POSITION_PT,
            box_mm: NUMBER_BOX_MM,
            font_size: NUMBER_FONT_SIZE,
            output_dir: PathBuf::from(DEFAULT_NUMBERING_DIR),
        }
    }
}

impl NumberingOptions {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ImposeError::Config(
                "Numbering count must be at least 1".to_string(),
            ));
        }
        if self.font_size <= 0.0 {
            return Err(ImposeError::Config(format!(
                "Font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    /// Zero-padded label for `number`
    pub fn label(&self, number: usize) -> String {
        let width = self
            .pad_width
            .unwrap_or_else(|| self.count.to_string().len());
        format!("{:0width$}", number, width = width)
    }

    /// Baseline start of a label, centered horizontally in the number box
    fn text_origin(&self, label: &str) -> (f32, f32) {
        let (x, y) = self.position_pt;
        let (box_w, box_h) = (mm_to_pt(self.box_mm.0), mm_to_pt(self.box_mm.1));
        let text_width = helvetica_text_width(label, self.font_size);
        (x + box_w / 2.0 - text_width / 2.0, y + box_h / 2.0)
    }
}

/// One numbered copy of the template
#[derive(Debug, Clone)]
pub struct NumberedPage {
    pub label: String,
    pub document: Document,
}

/// Lazily build one single-page document per number.
///
/// Each document shows the template's first page with its label drawn on
/// top in Helvetica, CMYK black. Documents are built as the iterator is
/// advanced, so callers that write and drop each one hold a single copy of
/// the template at a time.
pub fn numbered_documents<'a>(
    template: &'a Document,
    options: &'a NumberingOptions,
) -> Result<impl Iterator<Item = Result<NumberedPage>> + 'a> {
    options.validate()?;

    let page_id = *source_pages(template).first().ok_or(ImposeError::NoPages)?;
    let media_box: Vec<Object> = page_box(template, page_id, b"MediaBox")
        .map(|rect| rect.iter().map(|&v| Object::Real(v)).collect())
        .unwrap_or_else(|| {
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(DEFAULT_PAGE_DIMENSIONS.0),
                Object::Real(DEFAULT_PAGE_DIMENSIONS.1),
            ]
        });

    Ok((1..=options.count)
        .map(move |number| build_numbered(template, page_id, &media_box, options, number)))
}

/// Build every numbered document up front
pub fn number_pages(template: &Document, options: &NumberingOptions) -> Result<Vec<NumberedPage>> {
    numbered_documents(template, options)?.collect()
}

fn build_numbered(
    template: &Document,
    page_id: ObjectId,
    media_box: &[Object],
    options: &NumberingOptions,
    number: usize,
) -> Result<NumberedPage> {
    let label = options.label(number);
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    let mut cache = HashMap::new();
    let xobject_id = create_page_xobject(&mut output, template, page_id, &mut cache)?;

    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let font_id = output.add_object(font_dict);

    let (text_x, text_y) = options.text_origin(&label);
    let mut content = placement_command("P0", 0.0, 0.0);
    content.push_str(&format!(
        "q 0 0 0 1 k BT /F1 {} Tf {} {} Td ({}) Tj ET Q\n",
        options.font_size, text_x, text_y, label
    ));
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    resources.set(
        "XObject",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "P0",
            Object::Reference(xobject_id),
        )])),
    );
    resources.set(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "F1",
            Object::Reference(font_id),
        )])),
    );

    let numbered_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_tree_id)),
        ("MediaBox", Object::Array(media_box.to_vec())),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
    ]));

    log::debug!("Numbered copy {}", label);
    Ok(NumberedPage {
        label,
        document: finish_document(output, pages_tree_id, vec![Object::Reference(numbered_id)]),
    })
}

/// Build, write and drop one document per number under `options.output_dir`.
///
/// Returns the written paths in label order. A failure stops the run and
/// leaves the files written before it in place.
pub async fn number_to_dir(
    template: &Document,
    options: &NumberingOptions,
) -> Result<Vec<PathBuf>> {
    let pages = numbered_documents(template, options)?;
    let dir = options.output_dir.as_path();
    ensure_dir(dir).await?;

    let mut written = Vec::new();
    for page in pages {
        written.push(write_one(page?, dir).await?);
    }
    log::info!("Wrote {} numbered documents to {}", written.len(), dir.display());
    Ok(written)
}

/// Write numbered documents to `<dir>/<label>.pdf`, returning the paths in order
pub async fn write_numbered(
    pages: impl IntoIterator<Item = NumberedPage>,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_dir(dir).await?;

    let mut written = Vec::new();
    for page in pages {
        written.push(write_one(page, dir).await?);
    }
    log::info!("Wrote {} numbered documents to {}", written.len(), dir.display());
    Ok(written)
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ImposeError::WriteFailed {
            path: dir.to_owned(),
            source,
        })
}

async fn write_one(page: NumberedPage, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.pdf", page.label));
    save_pdf(page.document, &path).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_centered_with_font_metrics() {
        let options = NumberingOptions {
            count: 12,
            ..Default::default()
        };
        let (x, y) = options.text_origin("01");

        // Two digits at 15 pt are 2 * 0.556 * 15 = 16.68 pt wide
        let box_w = mm_to_pt(50.0);
        assert!((x - (200.0 + box_w / 2.0 - 8.34)).abs() < 1e-3);
        assert!((y - (100.0 + mm_to_pt(30.0) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_glyphs_shift_less() {
        let options = NumberingOptions::default();
        let (wide, _) = options.text_origin("88");
        let (narrow, _) = options.text_origin("ii");
        assert!(narrow > wide);
    }
}

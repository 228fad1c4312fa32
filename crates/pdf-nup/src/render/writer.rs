//! Output document assembly
//!
//! [`PdfSheetWriter`] is the lopdf side of the compositing seam: it receives
//! finished canvases whose page handles are source page object IDs and
//! turns each one into an output page.

use crate::compose::{OutputPage, SheetSink};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::create_page_xobject;

/// Writes composited sheets into a new PDF document
pub struct PdfSheetWriter<'a> {
    source: &'a Document,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    /// Source page -> Form XObject, so each page is copied once per run
    xobjects: HashMap<ObjectId, ObjectId>,
    resource_cache: HashMap<ObjectId, ObjectId>,
}

impl<'a> PdfSheetWriter<'a> {
    pub fn new(source: &'a Document) -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            source,
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            xobjects: HashMap::new(),
            resource_cache: HashMap::new(),
        }
    }

    /// Close the page tree and return the finished document
    pub fn finish(self) -> Document {
        finish_document(self.output, self.pages_tree_id, self.page_refs)
    }

    fn xobject_for(&mut self, page_id: ObjectId) -> Result<ObjectId> {
        if let Some(&id) = self.xobjects.get(&page_id) {
            return Ok(id);
        }
        let id = create_page_xobject(
            &mut self.output,
            self.source,
            page_id,
            &mut self.resource_cache,
        )?;
        self.xobjects.insert(page_id, id);
        Ok(id)
    }
}

impl SheetSink<ObjectId> for PdfSheetWriter<'_> {
    fn emit(&mut self, sheet: OutputPage<ObjectId>) -> Result<()> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(sheet.width_pt),
                Object::Real(sheet.height_pt),
            ]),
        );

        let mut content_ops = String::new();
        let mut xobjects = Dictionary::new();
        let mut names: HashMap<ObjectId, String> = HashMap::new();

        for placement in &sheet.placements {
            let name = match names.get(&placement.page) {
                Some(name) => name.clone(),
                None => {
                    let name = format!("P{}", names.len());
                    let xobject_id = self.xobject_for(placement.page)?;
                    xobjects.set(name.as_bytes(), Object::Reference(xobject_id));
                    names.insert(placement.page, name.clone());
                    name
                }
            };
            content_ops.push_str(&placement_command(&name, placement.x_pt, placement.y_pt));
        }

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content_ops.into_bytes()));
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }
}

/// Write the page tree and catalog for `page_refs` into `output`
pub(crate) fn finish_document(
    mut output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
) -> Document {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    output
}

/// Content stream command placing an XObject at an offset, unscaled
pub(crate) fn placement_command(xobject_name: &str, x: f32, y: f32) -> String {
    format!("q 1 0 0 1 {} {} cm /{} Do Q\n", x, y, xobject_name)
}

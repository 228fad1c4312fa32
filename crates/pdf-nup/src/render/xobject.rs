//! XObject creation and page geometry
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output canvases with translations, and
//! reading the page boxes the planner works from.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, box_length_mm};
use crate::types::{PageSize, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Depth limit when following `Parent` links for inherited attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Boxes consulted for the trim size, most specific first
const TRIM_BOX_KEYS: [&[u8]; 3] = [b"TrimBox", b"CropBox", b"MediaBox"];

// =============================================================================
// XObject Creation
// =============================================================================

/// Create an XObject from a source page.
///
/// The XObject can then be placed multiple times on output pages
/// with different transformations. Copied resources are recorded in
/// `cache` so pages sharing fonts or images only copy them once.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Source-to-output object ID mapping for copied resources
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let bbox = page_box(source, page_id, b"MediaBox")
        .map(|[x1, y1, x2, y2]| {
            vec![
                Object::Real(x1),
                Object::Real(y1),
                Object::Real(x2),
                Object::Real(y2),
            ]
        })
        .unwrap_or_else(default_media_box);

    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", Object::Array(bbox));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited(source, page_id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

/// Get default MediaBox for US Letter size
fn default_media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(DEFAULT_PAGE_DIMENSIONS.0 as i64),
        Object::Integer(DEFAULT_PAGE_DIMENSIONS.1 as i64),
    ]
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    } else {
        Ok(Vec::new())
    }
}

fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                result.extend_from_slice(&content);
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the ID first so reference cycles resolve to it
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Source pages in document order
pub fn source_pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Trim size of a page in millimeters.
///
/// Falls back from TrimBox to CropBox to MediaBox, the way viewers resolve
/// a missing trim box, and to US Letter when the page has none of them.
pub fn trim_size(doc: &Document, page_id: ObjectId) -> Result<PageSize> {
    // Surface a bad page ID as an error rather than a default size
    doc.get_dictionary(page_id)?;

    let [x1, y1, x2, y2] = TRIM_BOX_KEYS
        .iter()
        .find_map(|key| page_box(doc, page_id, key))
        .unwrap_or_else(|| {
            log::warn!(
                "Page {:?} has no usable page box, assuming {:?} pt",
                page_id,
                DEFAULT_PAGE_DIMENSIONS
            );
            [0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1]
        });

    Ok(PageSize::new(
        box_length_mm((x2 - x1).abs()),
        box_length_mm((y2 - y1).abs()),
    ))
}

/// Read a rectangle attribute of a page, following `Parent` inheritance
pub fn page_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<[f32; 4]> {
    let obj = inherited(doc, page_id, key)?;
    let arr = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    if arr.len() != 4 {
        return None;
    }

    let mut rect = [0.0; 4];
    for (slot, value) in rect.iter_mut().zip(arr) {
        *slot = extract_number(doc, value)?;
    }
    Some(rect)
}

/// Look up a page attribute on the page or the nearest ancestor that has it
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Extract numeric value from a PDF object
fn extract_number(doc: &Document, obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        },
        _ => None,
    }
}

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::*;

fn create_ticket_pdf() -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(567),
                Object::Integer(198),
            ]),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn numbering(count: usize) -> NumberingOptions {
    NumberingOptions {
        count,
        ..Default::default()
    }
}

#[test]
fn test_labels_pad_to_count_digits() {
    let options = numbering(12);
    assert_eq!(options.label(1), "01");
    assert_eq!(options.label(12), "12");

    let options = numbering(9);
    assert_eq!(options.label(9), "9");
}

#[test]
fn test_explicit_pad_width() {
    let options = NumberingOptions {
        count: 100,
        pad_width: Some(4),
        ..Default::default()
    };
    assert_eq!(options.label(7), "0007");
    assert_eq!(options.label(100), "0100");
}

#[test]
fn test_number_pages_one_doc_per_number() {
    let pages = number_pages(&create_ticket_pdf(), &numbering(12)).unwrap();

    assert_eq!(pages.len(), 12);
    assert_eq!(pages[0].label, "01");
    assert_eq!(pages[11].label, "12");
    assert!(pages.iter().all(|p| p.document.get_pages().len() == 1));
}

#[test]
fn test_numbered_page_draws_label() {
    let pages = number_pages(&create_ticket_pdf(), &numbering(3)).unwrap();
    let doc = &pages[1].document;
    let page_id = *doc.get_pages().values().next().unwrap();

    let content = String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap();
    assert!(content.contains("/P0 Do"));
    assert!(content.contains("/F1 15 Tf"));
    assert!(content.contains("(2) Tj"));
    assert!(content.contains("0 0 0 1 k"));
}

#[test]
fn test_numbered_page_keeps_template_size() {
    let pages = number_pages(&create_ticket_pdf(), &numbering(1)).unwrap();
    let doc = &pages[0].document;
    let page_id = *doc.get_pages().values().next().unwrap();

    let media_box: Vec<f32> = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect();
    assert_eq!(media_box, vec![0.0, 0.0, 567.0, 198.0]);
}

#[test]
fn test_zero_count_rejected() {
    match number_pages(&create_ticket_pdf(), &numbering(0)) {
        Err(ImposeError::Config(_)) => {}
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_empty_template_rejected() {
    let mut doc = create_ticket_pdf();
    let page_id = *doc.get_pages().values().next().unwrap();
    let pages_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Parent")
        .unwrap()
        .as_reference()
        .unwrap();
    let pages = doc.get_dictionary_mut(pages_id).unwrap();
    pages.set("Kids", Object::Array(vec![]));
    pages.set("Count", Object::Integer(0));

    assert!(matches!(
        number_pages(&doc, &numbering(3)),
        Err(ImposeError::NoPages)
    ));
}

#[tokio::test]
async fn test_write_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("numbered");
    let pages = number_pages(&create_ticket_pdf(), &numbering(10)).unwrap();

    let written = write_numbered(pages, &out).await.unwrap();

    assert_eq!(written.len(), 10);
    assert_eq!(written[0], out.join("01.pdf"));
    assert_eq!(written[9], out.join("10.pdf"));
    for path in &written {
        let doc = load_pdf(path).await.unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}

#[tokio::test]
async fn test_number_to_dir_writes_each_label() {
    let dir = tempfile::tempdir().unwrap();
    let options = NumberingOptions {
        count: 25,
        output_dir: dir.path().join("tickets"),
        ..Default::default()
    };

    let written = number_to_dir(&create_ticket_pdf(), &options).await.unwrap();

    assert_eq!(written.len(), 25);
    assert_eq!(written[0], options.output_dir.join("01.pdf"));
    assert_eq!(written[24], options.output_dir.join("25.pdf"));
    for path in &written {
        let doc = load_pdf(path).await.unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}

#[tokio::test]
async fn test_number_to_dir_rejects_zero_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let options = NumberingOptions {
        count: 0,
        output_dir: dir.path().join("tickets"),
        ..Default::default()
    };

    assert!(matches!(
        number_to_dir(&create_ticket_pdf(), &options).await,
        Err(ImposeError::Config(_))
    ));
    assert!(!options.output_dir.exists());
}

#[test]
fn test_numbered_documents_built_on_demand() {
    // Building all of these up front would not finish in a test run
    let template = create_ticket_pdf();
    let options = numbering(100_000_000);

    let first: Vec<NumberedPage> = numbered_documents(&template, &options)
        .unwrap()
        .take(2)
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].label, "000000001");
    assert_eq!(first[1].label, "000000002");
}

use pdf_nup::constants::mm_to_pt;
use pdf_nup::*;
use std::collections::HashSet;

fn cards_layout() -> LayoutResult {
    plan(&LayoutRequest::new(
        Substrate::default(),
        PageSize::new(85.0, 55.0),
        5.0,
    ))
    .unwrap()
}

/// Sink that refuses every sheet after the first `accept`
struct FailingSink {
    accept: usize,
    received: Vec<OutputPage<&'static str>>,
}

impl SheetSink<&'static str> for FailingSink {
    fn emit(&mut self, sheet: OutputPage<&'static str>) -> Result<()> {
        if self.received.len() == self.accept {
            return Err(ImposeError::Io(std::io::Error::other("sink full")));
        }
        self.received.push(sheet);
        Ok(())
    }
}

#[test]
fn test_one_sheet_per_source_page() {
    let layout = cards_layout();
    let mut sheets: Vec<OutputPage<&str>> = Vec::new();

    let emitted = compose(&layout, ["a", "b", "c"], &mut sheets).unwrap();

    assert_eq!(emitted, 3);
    assert_eq!(sheets.len(), 3);
    for (sheet, expected) in sheets.iter().zip(["a", "b", "c"]) {
        assert_eq!(sheet.placements.len(), 25);
        assert!(sheet.placements.iter().all(|p| p.page == expected));
    }
}

#[test]
fn test_sheet_matches_imposed_size() {
    let layout = cards_layout();
    let mut sheets: Vec<OutputPage<u32>> = Vec::new();
    compose(&layout, [1u32], &mut sheets).unwrap();

    let sheet = &sheets[0];
    assert_eq!(sheet.width_pt, mm_to_pt(450.0));
    assert_eq!(sheet.height_pt, mm_to_pt(300.0));
}

#[test]
fn test_offsets_distinct_and_inside_canvas() {
    let layout = cards_layout();
    let mut sheets: Vec<OutputPage<u8>> = Vec::new();
    compose(&layout, [0u8], &mut sheets).unwrap();

    let sheet = &sheets[0];
    let cell_w = mm_to_pt(layout.cell_width_mm);
    let cell_h = mm_to_pt(layout.cell_height_mm);
    let mut seen = HashSet::new();

    for placement in &sheet.placements {
        assert!(placement.x_pt >= 0.0 && placement.y_pt >= 0.0);
        assert!(placement.x_pt + cell_w <= sheet.width_pt + 0.01);
        assert!(placement.y_pt + cell_h <= sheet.height_pt + 0.01);
        assert!(seen.insert((placement.position.row, placement.position.col)));
    }
    assert_eq!(seen.len(), layout.total_up);
}

#[test]
fn test_row_major_placement_order() {
    let layout = cards_layout();
    let mut sheets: Vec<OutputPage<char>> = Vec::new();
    compose(&layout, ['x'], &mut sheets).unwrap();

    let placements = &sheets[0].placements;
    assert_eq!((placements[0].x_pt, placements[0].y_pt), (0.0, 0.0));
    assert_eq!(placements[1].x_pt, mm_to_pt(90.0));
    assert_eq!(placements[1].y_pt, 0.0);
    assert_eq!(placements[5].x_pt, 0.0);
    assert_eq!(placements[5].y_pt, mm_to_pt(60.0));
}

#[test]
fn test_infeasible_layout_emits_nothing() {
    let layout = plan(&LayoutRequest::new(
        Substrate::default(),
        PageSize::new(500.0, 400.0),
        5.0,
    ))
    .unwrap();
    let mut sheets: Vec<OutputPage<u8>> = Vec::new();

    match compose(&layout, [1u8, 2, 3], &mut sheets) {
        Err(ImposeError::LayoutInfeasible {
            page_width_mm,
            page_height_mm,
            gutter_mm,
        }) => {
            assert_eq!(page_width_mm, 500.0);
            assert_eq!(page_height_mm, 400.0);
            assert_eq!(gutter_mm, 5.0);
        }
        other => panic!("Expected LayoutInfeasible, got {:?}", other),
    }
    assert!(sheets.is_empty());
}

#[test]
fn test_no_pages_no_sheets() {
    let layout = cards_layout();
    let mut sheets: Vec<OutputPage<u8>> = Vec::new();

    assert_eq!(compose(&layout, Vec::<u8>::new(), &mut sheets).unwrap(), 0);
    assert!(sheets.is_empty());
}

#[test]
fn test_sink_error_stops_run() {
    let layout = cards_layout();
    let mut sink = FailingSink {
        accept: 2,
        received: Vec::new(),
    };

    let result = compose(&layout, ["a", "b", "c", "d"], &mut sink);

    assert!(matches!(result, Err(ImposeError::Io(_))));
    assert_eq!(sink.received.len(), 2);
    assert_eq!(sink.received[1].placements[0].page, "b");
}

#[test]
fn test_canvas_place_and_finalize() {
    let mut canvas = Canvas::blank(100.0, 50.0);
    canvas.place(&"page", layout::GridPosition::new(0, 1), 40.0, 0.0);

    let sheet = canvas.finalize();
    assert_eq!((sheet.width_pt, sheet.height_pt), (100.0, 50.0));
    assert_eq!(
        sheet.placements,
        vec![Placement {
            page: "page",
            position: layout::GridPosition::new(0, 1),
            x_pt: 40.0,
            y_pt: 0.0,
        }]
    );
}

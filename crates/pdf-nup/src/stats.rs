use crate::layout::LayoutResult;
use crate::types::*;

/// Calculate statistics for the imposition
///
/// Every source page gets its own sheet, so the sheet count equals the
/// source page count.
pub fn calculate_statistics(
    source_pages: usize,
    layout: &LayoutResult,
) -> Result<ImpositionStatistics> {
    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    let substrate_area = layout.substrate.area_mm2();
    let sheet_utilization = if layout.is_feasible() && substrate_area > 0.0 {
        (layout.imposed_width_mm * layout.imposed_height_mm) / substrate_area
    } else {
        0.0
    };

    Ok(ImpositionStatistics {
        source_pages,
        output_sheets: source_pages,
        copies_per_sheet: layout.total_up,
        total_copies: source_pages * layout.total_up,
        orientation: layout.orientation,
        columns: layout.columns,
        rows: layout.rows,
        imposed_width_mm: layout.imposed_width_mm,
        imposed_height_mm: layout.imposed_height_mm,
        sheet_utilization,
    })
}

//! # Table Layout
//!
//! Bordered multi-column tables that flow row-by-row into pages. Column
//! widths and per-column line caps are caller data, not engine
//! heuristics: a `ColumnSpec` says how wide the column is and whether
//! its cells are capped to a number of wrapped lines. The engine only
//! enforces the geometry — widths summing to the content width, row
//! heights from wrapped cell content, and row-atomic page breaks.

use crate::font::{FontContext, FontVariant};
use crate::layout::{DrawOp, PageFlow};
use crate::text;

/// Cell text size; smaller than body text to fit more content.
pub const CELL_FONT_SIZE: f64 = 9.0;

/// Vertical distance between wrapped lines inside a cell.
pub const LINE_GAP: f64 = 11.0;

/// Padding above and below cell content.
pub const CELL_PAD_V: f64 = 5.0;

/// Combined left+right padding inside a cell, subtracted from the
/// column width to get the wrap budget.
pub const CELL_PAD_H: f64 = 12.0;

/// Horizontal inset of cell text from the cell's left border.
pub const TEXT_INSET: f64 = 6.0;

/// Rows never get shorter than this, however little they wrap.
pub const MIN_ROW_HEIGHT: f64 = 18.0;

/// Floor for the wrap budget when a column is narrower than its
/// padding. Degenerates to character splitting, not an error.
const MIN_WRAP_LIMIT: f64 = 10.0;

/// Layout configuration for one table column.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Column width in points.
    pub width: f64,
    /// Cap on wrapped lines per body cell; `None` means unlimited.
    /// Headers are never capped.
    pub max_lines: Option<usize>,
}

impl ColumnSpec {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            max_lines: None,
        }
    }

    pub fn capped(width: f64, max_lines: usize) -> Self {
        Self {
            width,
            max_lines: Some(max_lines),
        }
    }

    /// The wrap budget for cells in this column.
    fn wrap_limit(&self) -> f64 {
        (self.width - CELL_PAD_H).max(MIN_WRAP_LIMIT)
    }
}

/// A table ready for layout: headers, column configuration, and body
/// rows as plain strings. Construction checks the geometry so layout
/// never has to.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// Build a table, asserting that column widths sum to the content
    /// width. Callers derive widths from `PageFlow::content_width()`, so
    /// a mismatch is a programming error, caught here rather than as a
    /// silently overflowing table at layout time.
    pub fn new(
        headers: Vec<String>,
        columns: Vec<ColumnSpec>,
        rows: Vec<Vec<String>>,
        content_width: f64,
    ) -> Self {
        assert_eq!(
            headers.len(),
            columns.len(),
            "one ColumnSpec per header column"
        );
        let sum: f64 = columns.iter().map(|c| c.width).sum();
        assert!(
            (sum - content_width).abs() < 0.01,
            "column widths sum to {:.2}, content width is {:.2}",
            sum,
            content_width
        );
        Self {
            headers,
            columns,
            rows,
        }
    }
}

/// Row height from per-cell wrapped line counts.
fn row_height(lines_per_cell: &[usize]) -> f64 {
    let max_lines = lines_per_cell.iter().copied().max().unwrap_or(1).max(1);
    (max_lines as f64 * LINE_GAP + 2.0 * CELL_PAD_V).max(MIN_ROW_HEIGHT)
}

/// Lay out one table: bold uncapped header row, then body rows, each
/// checked against the remaining page space before anything is drawn.
/// An empty row set still draws the header row as a placeholder.
pub fn draw_table(table: &TableSpec, flow: &mut PageFlow, fonts: &FontContext) {
    let header_cells: Vec<Vec<String>> = table
        .headers
        .iter()
        .zip(&table.columns)
        .map(|(h, col)| {
            text::wrap(
                fonts,
                h,
                col.wrap_limit(),
                FontVariant::Bold,
                CELL_FONT_SIZE,
                None,
            )
        })
        .collect();
    draw_row(flow, &table.columns, &header_cells, true);

    for row in &table.rows {
        let cells: Vec<Vec<String>> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                text::wrap(
                    fonts,
                    value,
                    col.wrap_limit(),
                    FontVariant::Regular,
                    CELL_FONT_SIZE,
                    col.max_lines,
                )
            })
            .collect();
        draw_row(flow, &table.columns, &cells, false);
    }
}

/// Draw one row of pre-wrapped cells. The row is atomic: space for its
/// full height is secured first, so a page break can only happen before
/// the row, never inside it.
fn draw_row(flow: &mut PageFlow, columns: &[ColumnSpec], cells: &[Vec<String>], bold: bool) {
    let lines_per_cell: Vec<usize> = cells.iter().map(Vec::len).collect();
    let height = row_height(&lines_per_cell);

    flow.ensure_space(height);
    let top = flow.cursor_y();

    let mut x = PageFlow::content_x();
    for (col, lines) in columns.iter().zip(cells) {
        flow.push(DrawOp::Rect {
            x,
            y: top - height,
            width: col.width,
            height,
        });
        let mut baseline = top - CELL_PAD_V - CELL_FONT_SIZE;
        for line in lines {
            if !line.is_empty() {
                flow.push(DrawOp::Text {
                    x: x + TEXT_INSET,
                    y: baseline,
                    size: CELL_FONT_SIZE,
                    bold,
                    text: line.clone(),
                });
            }
            baseline -= LINE_GAP;
        }
        x += col.width;
    }
    flow.advance(height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MARGIN, PAGE_HEIGHT};

    fn fonts() -> FontContext {
        FontContext::new()
    }

    fn two_column_table(rows: Vec<Vec<String>>) -> TableSpec {
        let w = PageFlow::content_width();
        TableSpec::new(
            vec!["Type".to_string(), "Count".to_string()],
            vec![ColumnSpec::new(w - 120.0), ColumnSpec::new(120.0)],
            rows,
            w,
        )
    }

    #[test]
    fn row_height_formula() {
        assert_eq!(row_height(&[1, 1]), LINE_GAP + 2.0 * CELL_PAD_V);
        assert_eq!(row_height(&[3, 1]), 3.0 * LINE_GAP + 2.0 * CELL_PAD_V);
        assert_eq!(row_height(&[1, 5]), 5.0 * LINE_GAP + 2.0 * CELL_PAD_V);
    }

    #[test]
    fn row_height_never_below_minimum() {
        assert!(row_height(&[0]) >= MIN_ROW_HEIGHT);
        assert!(row_height(&[1]) >= MIN_ROW_HEIGHT);
    }

    #[test]
    #[should_panic(expected = "column widths sum")]
    fn column_widths_must_sum_to_content_width() {
        let w = PageFlow::content_width();
        TableSpec::new(
            vec!["A".to_string(), "B".to_string()],
            vec![ColumnSpec::new(250.0), ColumnSpec::new(100.0)],
            vec![],
            w,
        );
    }

    #[test]
    fn empty_table_draws_header_only() {
        let mut flow = PageFlow::new();
        let before = flow.cursor_y();
        draw_table(&two_column_table(vec![]), &mut flow, &fonts());
        assert!(flow.cursor_y() < before);
        let pages = flow.finish();
        assert_eq!(pages.len(), 1);
        // two cell borders, two header texts
        let rects = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn long_table_flows_onto_new_pages() {
        let rows: Vec<Vec<String>> = (0..60)
            .map(|i| vec![format!("Row number {}", i), i.to_string()])
            .collect();
        let mut flow = PageFlow::new();
        draw_table(&two_column_table(rows), &mut flow, &fonts());
        let pages = flow.finish();
        assert!(pages.len() > 1, "60 rows at 18pt should overflow one page");
    }

    #[test]
    fn rows_never_cross_the_bottom_margin() {
        let long_title = "A considerably long research paper title that wraps \
                          onto several lines in a narrow column"
            .to_string();
        let rows: Vec<Vec<String>> = (0..50)
            .map(|i| vec![long_title.clone(), i.to_string()])
            .collect();
        let mut flow = PageFlow::new();
        draw_table(&two_column_table(rows), &mut flow, &fonts());
        for page in flow.finish() {
            for op in &page.ops {
                if let DrawOp::Rect { y, height, .. } = op {
                    assert!(
                        *y >= MARGIN - 1e-6,
                        "cell bottom {:.2} crosses the bottom margin",
                        y
                    );
                    assert!(*y + *height <= PAGE_HEIGHT - MARGIN + 1e-6);
                }
            }
        }
    }

    #[test]
    fn capped_column_limits_cell_height() {
        let w = PageFlow::content_width();
        let table = TableSpec::new(
            vec!["#".to_string(), "Title".to_string()],
            vec![
                ColumnSpec::capped(w - 120.0, 1),
                ColumnSpec::capped(120.0, 2),
            ],
            vec![vec![
                "1".to_string(),
                "an exceedingly long title that would wrap well past two lines in \
                 a hundred-and-twenty point column"
                    .to_string(),
            ]],
            w,
        );
        let mut flow = PageFlow::new();
        let top = flow.cursor_y();
        draw_table(&table, &mut flow, &fonts());
        // one-line header row + body row capped at 2 lines
        let expected = (LINE_GAP + 2.0 * CELL_PAD_V) + (2.0 * LINE_GAP + 2.0 * CELL_PAD_V);
        assert!((top - flow.cursor_y() - expected).abs() < 1e-6);
    }
}

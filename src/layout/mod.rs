//! # Page Flow
//!
//! The page is the fundamental unit of layout. Every block — heading
//! line, paragraph line, table row — is placed with the page boundary as
//! a hard constraint: either it fits in the remaining vertical space or
//! a fresh page is started first. Nothing is sliced after the fact, so a
//! table row is never drawn half on one page and half on the next.
//!
//! `PageFlow` owns the open page and a write cursor in PDF coordinates
//! (origin bottom-left, cursor descending from the top margin). It is an
//! explicit object threaded through all drawing calls; there is no
//! module-level cursor state, so independent compositions never interact.

pub mod table;

use log::debug;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// Uniform page margin in points.
pub const MARGIN: f64 = 40.0;

/// Leading for headings and paragraphs.
pub const LINE_HEIGHT: f64 = 14.0;

/// Default body text size; headings pass their own.
pub const TEXT_SIZE: f64 = 11.0;
pub const TITLE_SIZE: f64 = 18.0;
pub const SECTION_SIZE: f64 = 14.0;

/// One drawing primitive on a page. Coordinates are PDF-space points
/// (y grows upward); text y is the baseline, rect y the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        text: String,
    },
    /// A stroked cell border, light gray, 1pt.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// A sealed or in-progress page: fixed dimensions plus the ops drawn on
/// it. Pages are append-only during composition and immutable once a
/// successor page exists.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            ops: Vec::new(),
        }
    }
}

/// Owns the current page and the vertical write cursor.
#[derive(Debug)]
pub struct PageFlow {
    sealed: Vec<Page>,
    current: Page,
    cursor_y: f64,
}

impl Default for PageFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFlow {
    pub fn new() -> Self {
        Self {
            sealed: Vec::new(),
            current: Page::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Width available to content: page width minus both margins. Every
    /// table's column widths must sum to this.
    pub fn content_width() -> f64 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    /// The x coordinate where content starts.
    pub fn content_x() -> f64 {
        MARGIN
    }

    /// Current cursor position (the next baseline / row top edge).
    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    /// Guarantee `required` points of vertical space below the cursor.
    /// Seals the current page and opens a fresh one when the block would
    /// cross the bottom margin. The block itself is never split.
    pub fn ensure_space(&mut self, required: f64) {
        if self.cursor_y - required < MARGIN {
            debug!(
                "page {} sealed with {:.1}pt left, block needs {:.1}pt",
                self.sealed.len() + 1,
                self.cursor_y - MARGIN,
                required
            );
            let full = std::mem::replace(&mut self.current, Page::new());
            self.sealed.push(full);
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Move the cursor down after a block has been drawn.
    pub fn advance(&mut self, height: f64) {
        self.cursor_y -= height;
    }

    /// Append a draw op to the open page.
    pub fn push(&mut self, op: DrawOp) {
        self.current.ops.push(op);
    }

    /// Seal the last page and return the ordered document pages.
    /// Consumes the flow: a finished document can no longer be drawn on.
    pub fn finish(mut self) -> Vec<Page> {
        self.sealed.push(self.current);
        self.sealed
    }

    /// Pages sealed so far (the open page is not counted).
    pub fn sealed_pages(&self) -> usize {
        self.sealed.len()
    }
}

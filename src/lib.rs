//! # Folio
//!
//! A page-native PDF report engine.
//!
//! Report generators usually hand wrapping and pagination to a layout
//! library and hope tables survive the page boundaries. Folio does the
//! layout itself: **the page is the fundamental unit.** Every wrap
//! decision and every table row placement is made with the page
//! boundary as a hard constraint, so a row is never sliced across two
//! pages and a header never orphans at a page bottom.
//!
//! ## Architecture
//!
//! ```text
//! Records (JSON/API)
//!       ↓
//!   [report]  — group, aggregate, sort into report blocks
//!       ↓
//!   [text]    — sanitize to the font repertoire, greedy wrap
//!       ↓
//!   [layout]  — page flow and bordered table layout
//!       ↓
//!   [pdf]     — serialize to PDF bytes
//! ```
//!
//! The `font` module backs all of it with compiled-in glyph metrics for
//! the standard Helvetica pair; measurement is pure and shared
//! read-only across a whole composition. Composition is synchronous and
//! single-pass — callers fetch and filter records first, then hand the
//! complete set over.

pub mod error;
pub mod font;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod text;

use serde::Deserialize;

use error::FolioError;
use pdf::PdfWriter;
use report::{FilterCriteria, Metadata, Record, ReportComposer};

/// Produce the full summary report: title and metadata block, counts by
/// category, a per-entity breakdown, and the detail list. Records are
/// expected to be pre-filtered; `criteria` only describes the filters
/// for the metadata line. Returns the complete PDF byte buffer.
pub fn generate_summary_report(
    records: &[Record],
    criteria: &FilterCriteria,
) -> Result<Vec<u8>, FolioError> {
    let blocks = report::summary_blocks(records, criteria);
    let pages = ReportComposer::new().compose(&blocks);
    let metadata = Metadata {
        title: Some("Analysis Report".to_string()),
        author: None,
        subject: Some(criteria.summary_line()),
    };
    PdfWriter::new().write(&pages, &metadata)
}

/// Produce the simple tabular report: heading, metadata line, and one
/// `(#, Title, Date)` table over the given records.
pub fn generate_tabular_report(
    records: &[Record],
    title: &str,
    meta_line: &str,
) -> Result<Vec<u8>, FolioError> {
    let blocks = report::tabular_blocks(records, title, meta_line);
    let pages = ReportComposer::new().compose(&blocks);
    let metadata = Metadata {
        title: Some(title.to_string()),
        author: None,
        subject: None,
    };
    PdfWriter::new().write(&pages, &metadata)
}

/// JSON request shape for the summary report entry point.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryRequest {
    pub records: Vec<Record>,
    #[serde(default)]
    pub criteria: FilterCriteria,
    /// When present, records owned by entities missing from this list
    /// are dropped before composition.
    #[serde(default)]
    pub active_entities: Option<Vec<String>>,
}

/// JSON request shape for the tabular report entry point.
#[derive(Debug, Deserialize)]
pub struct TabularRequest {
    pub records: Vec<Record>,
    #[serde(default = "default_tabular_title")]
    pub title: String,
    #[serde(default = "default_meta_line")]
    pub meta_line: String,
}

fn default_tabular_title() -> String {
    "Documents Report".to_string()
}

fn default_meta_line() -> String {
    "All documents".to_string()
}

/// Generate the summary report from a JSON request.
pub fn generate_summary_json(json: &str) -> Result<Vec<u8>, FolioError> {
    let request: SummaryRequest = serde_json::from_str(json)?;
    let records = match &request.active_entities {
        Some(active) => report::retain_active(&request.records, active),
        None => request.records.clone(),
    };
    generate_summary_report(&records, &request.criteria)
}

/// Generate the tabular report from a JSON request.
pub fn generate_tabular_json(json: &str) -> Result<Vec<u8>, FolioError> {
    let request: TabularRequest = serde_json::from_str(json)?;
    generate_tabular_report(&request.records, &request.title, &request.meta_line)
}

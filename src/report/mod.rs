//! # Report Composition
//!
//! Turns already-fetched, already-filtered records into an ordered list
//! of report blocks and lays them out sequentially. The composer never
//! revisits a page: each block's height is discovered just-in-time —
//! tables don't pre-measure their total height, they find page breaks
//! row by row through the `PageFlow`.
//!
//! Record retrieval, authentication, and filtering live outside this
//! crate; the input here is the plain record tuples they produce.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::font::FontContext;
use crate::layout::table::{self, ColumnSpec, TableSpec};
use crate::layout::{DrawOp, Page, PageFlow, LINE_HEIGHT, SECTION_SIZE, TEXT_SIZE, TITLE_SIZE};
use crate::text;

/// One source record, as provided by the (external) record-access layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Category label, e.g. "Research Paper" or "Patent".
    #[serde(default)]
    pub category: String,
    /// Owning entity name, e.g. a faculty member or department.
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub status: Option<String>,
    /// ISO-ish date string; only the leading year is ever derived here.
    #[serde(default)]
    pub date: Option<String>,
}

impl Record {
    /// The record's year: first four characters of the date, `-` when
    /// no date is present.
    pub fn year(&self) -> String {
        match self.date.as_deref() {
            Some(d) if !d.is_empty() => d.chars().take(4).collect(),
            _ => "-".to_string(),
        }
    }
}

/// Drop records whose owning entity has been disabled. Records with no
/// owner are kept.
pub fn retain_active(records: &[Record], active_entities: &[String]) -> Vec<Record> {
    let active: HashSet<&str> = active_entities.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|r| r.entity.is_empty() || active.contains(r.entity.as_str()))
        .cloned()
        .collect()
}

/// The filter criteria a summary report was generated under. Only used
/// for the metadata line — the records are expected to be pre-filtered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterCriteria {
    /// Human-readable description of the active filters.
    pub fn summary_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(entity) = &self.entity {
            parts.push(format!("Entity: {}", entity));
        }
        if let Some(status) = &self.status {
            parts.push(format!("Status: {}", status));
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            parts.push(format!(
                "Date: {} to {}",
                self.date_from.as_deref().unwrap_or("..."),
                self.date_to.as_deref().unwrap_or("...")
            ));
        }
        if parts.is_empty() {
            "All documents".to_string()
        } else {
            parts.join(" - ")
        }
    }
}

/// Document metadata embedded in the PDF Info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// A composable unit of a report, laid out strictly in sequence.
#[derive(Debug, Clone)]
pub enum Block {
    Heading { text: String, size: f64 },
    Paragraph(String),
    /// Fixed vertical gap.
    Spacer(f64),
    Table(TableSpec),
}

impl Block {
    fn heading(text: &str, size: f64) -> Self {
        Block::Heading {
            text: text.to_string(),
            size,
        }
    }
}

// ─── Aggregations ───────────────────────────────────────────────

/// Rows `(category, count)`, sorted by category label.
fn counts_by_category(records: &[Record]) -> Vec<Vec<String>> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, n)| vec![category.to_string(), n.to_string()])
        .collect()
}

/// Rows `(entity, category, count)`, entities sorted by name and
/// categories sorted within each entity.
fn counts_by_entity(records: &[Record]) -> Vec<Vec<String>> {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for r in records {
        *grouped
            .entry(r.entity.as_str())
            .or_default()
            .entry(r.category.as_str())
            .or_default() += 1;
    }
    let mut rows = Vec::new();
    for (entity, categories) in grouped {
        for (category, n) in categories {
            rows.push(vec![
                entity.to_string(),
                category.to_string(),
                n.to_string(),
            ]);
        }
    }
    rows
}

/// One row per record `(entity, category, title, year)`, sorted by
/// entity, then category, then title.
fn detail_rows(records: &[Record]) -> Vec<Vec<String>> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.entity, &a.category, &a.title).cmp(&(&b.entity, &b.category, &b.title))
    });
    sorted
        .into_iter()
        .map(|r| {
            vec![
                r.entity.clone(),
                r.category.clone(),
                r.title.clone(),
                r.year(),
            ]
        })
        .collect()
}

// ─── Block assembly ─────────────────────────────────────────────

/// Blocks for the full summary report: title and metadata, counts by
/// category, a per-entity breakdown, and the detail list.
pub fn summary_blocks(records: &[Record], criteria: &FilterCriteria) -> Vec<Block> {
    let w = PageFlow::content_width();
    vec![
        Block::heading("Analysis Report", TITLE_SIZE),
        Block::Paragraph(criteria.summary_line()),
        Block::Paragraph(format!("Total documents: {}", records.len())),
        Block::Spacer(6.0),
        Block::heading("Counts by Type", SECTION_SIZE),
        Block::Spacer(6.0),
        Block::Table(TableSpec::new(
            vec!["Type".to_string(), "Count".to_string()],
            vec![ColumnSpec::new(w - 120.0), ColumnSpec::new(120.0)],
            counts_by_category(records),
            w,
        )),
        Block::Spacer(16.0),
        Block::heading("Documents per Entity", SECTION_SIZE),
        Block::Spacer(6.0),
        Block::Table(TableSpec::new(
            vec!["Name".to_string(), "Type".to_string(), "Count".to_string()],
            vec![
                ColumnSpec::new(w - 260.0),
                ColumnSpec::new(180.0),
                ColumnSpec::new(80.0),
            ],
            counts_by_entity(records),
            w,
        )),
        Block::Spacer(16.0),
        Block::heading("Entity-wise Document List", SECTION_SIZE),
        Block::Spacer(6.0),
        Block::Table(TableSpec::new(
            vec![
                "Name".to_string(),
                "Type".to_string(),
                "Title".to_string(),
                "Year".to_string(),
            ],
            vec![
                ColumnSpec::new(150.0),
                ColumnSpec::new(115.0),
                ColumnSpec::new(w - 325.0),
                ColumnSpec::new(60.0),
            ],
            detail_rows(records),
            w,
        )),
    ]
}

/// Blocks for the simple tabular report: heading, metadata line, and
/// one `(#, Title, Date)` table. The title column is capped at four
/// wrapped lines with an ellipsis; the narrow columns at one.
pub fn tabular_blocks(records: &[Record], title: &str, meta_line: &str) -> Vec<Block> {
    let w = PageFlow::content_width();
    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.title.clone(),
                r.date.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    vec![
        Block::heading(title, TITLE_SIZE),
        Block::Paragraph(meta_line.to_string()),
        Block::Spacer(6.0),
        Block::Table(TableSpec::new(
            vec!["#".to_string(), "Title".to_string(), "Date".to_string()],
            vec![
                ColumnSpec::capped(30.0, 1),
                ColumnSpec::capped(w - 130.0, 4),
                ColumnSpec::capped(100.0, 1),
            ],
            rows,
            w,
        )),
    ]
}

// ─── Composer ───────────────────────────────────────────────────

/// Lays out blocks into pages. Single-pass and synchronous: composition
/// either completes or the caller never sees a document at all.
pub struct ReportComposer {
    fonts: FontContext,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportComposer {
    pub fn new() -> Self {
        Self {
            fonts: FontContext::new(),
        }
    }

    /// Lay out `blocks` in order and return the sealed pages.
    pub fn compose(&self, blocks: &[Block]) -> Vec<Page> {
        let mut flow = PageFlow::new();
        for block in blocks {
            match block {
                Block::Heading { text, size } => self.draw_lines(&mut flow, text, *size),
                Block::Paragraph(text) => self.draw_lines(&mut flow, text, TEXT_SIZE),
                Block::Spacer(h) => flow.advance(*h),
                Block::Table(spec) => table::draw_table(spec, &mut flow, &self.fonts),
            }
        }
        let pages = flow.finish();
        debug!("composed {} blocks into {} pages", blocks.len(), pages.len());
        pages
    }

    /// Draw free text at the left margin, one baseline per input line,
    /// breaking pages between lines as needed.
    fn draw_lines(&self, flow: &mut PageFlow, text: &str, size: f64) {
        for line in text.split('\n') {
            flow.ensure_space(LINE_HEIGHT);
            flow.push(DrawOp::Text {
                x: PageFlow::content_x(),
                y: flow.cursor_y(),
                size,
                bold: false,
                text: text::sanitize(line),
            });
            flow.advance(LINE_HEIGHT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, category: &str, title: &str, date: Option<&str>) -> Record {
        Record {
            id: String::new(),
            title: title.to_string(),
            category: category.to_string(),
            entity: entity.to_string(),
            status: None,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn year_derivation() {
        assert_eq!(record("", "", "", Some("2024-03-01")).year(), "2024");
        assert_eq!(record("", "", "", None).year(), "-");
        assert_eq!(record("", "", "", Some("")).year(), "-");
    }

    #[test]
    fn counts_sorted_by_category() {
        let records = vec![
            record("a", "Patent", "p1", None),
            record("a", "Certificate", "c1", None),
            record("b", "Patent", "p2", None),
        ];
        let rows = counts_by_category(&records);
        assert_eq!(
            rows,
            vec![
                vec!["Certificate".to_string(), "1".to_string()],
                vec!["Patent".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn entity_counts_sorted_by_name_then_category() {
        let records = vec![
            record("Zoe", "Patent", "p", None),
            record("Ada", "Patent", "p", None),
            record("Ada", "Certificate", "c", None),
            record("Ada", "Patent", "q", None),
        ];
        let rows = counts_by_entity(&records);
        assert_eq!(rows[0], vec!["Ada", "Certificate", "1"]);
        assert_eq!(rows[1], vec!["Ada", "Patent", "2"]);
        assert_eq!(rows[2], vec!["Zoe", "Patent", "1"]);
    }

    #[test]
    fn detail_rows_sorted_and_dated() {
        let records = vec![
            record("Zoe", "Patent", "Beta", Some("2023-01-01")),
            record("Ada", "Patent", "Alpha", None),
        ];
        let rows = detail_rows(&records);
        assert_eq!(rows[0], vec!["Ada", "Patent", "Alpha", "-"]);
        assert_eq!(rows[1], vec!["Zoe", "Patent", "Beta", "2023"]);
    }

    #[test]
    fn retain_active_drops_disabled_owners() {
        let records = vec![
            record("Ada", "Patent", "a", None),
            record("Mallory", "Patent", "b", None),
            record("", "Patent", "orphan", None),
        ];
        let kept = retain_active(&records, &["Ada".to_string()]);
        let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "orphan"]);
    }

    #[test]
    fn summary_line_formats_filters() {
        let criteria = FilterCriteria {
            entity: Some("CSE".to_string()),
            status: Some("Published".to_string()),
            date_from: Some("2023-01-01".to_string()),
            date_to: None,
        };
        assert_eq!(
            criteria.summary_line(),
            "Entity: CSE - Status: Published - Date: 2023-01-01 to ..."
        );
        assert_eq!(FilterCriteria::default().summary_line(), "All documents");
    }

    #[test]
    fn empty_records_still_compose_header_blocks() {
        let composer = ReportComposer::new();
        let blocks = summary_blocks(&[], &FilterCriteria::default());
        let pages = composer.compose(&blocks);
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].ops.is_empty());
    }

    #[test]
    fn compose_is_deterministic() {
        let records = vec![
            record("Ada", "Patent", "Alpha", Some("2024-05-01")),
            record("Zoe", "Certificate", "Beta", Some("2022-11-12")),
        ];
        let composer = ReportComposer::new();
        let blocks = summary_blocks(&records, &FilterCriteria::default());
        let a = composer.compose(&blocks);
        let b = composer.compose(&blocks);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.ops, pb.ops);
        }
    }

    #[test]
    fn many_records_flow_to_multiple_pages() {
        let records: Vec<Record> = (0..120)
            .map(|i| {
                record(
                    &format!("Entity {}", i % 7),
                    "Research Paper",
                    &format!("Paper number {}", i),
                    Some("2024-01-01"),
                )
            })
            .collect();
        let composer = ReportComposer::new();
        let pages = composer.compose(&summary_blocks(&records, &FilterCriteria::default()));
        assert!(pages.len() > 1);
    }
}

//! # PDF Serializer
//!
//! Takes the laid-out pages from the composer and writes a valid PDF
//! file. This is a from-scratch PDF 1.7 writer: report pages only ever
//! contain text runs and stroked cell borders, so the subset of the
//! spec we need is small and writing the raw bytes ourselves keeps the
//! engine self-contained.
//!
//! ## PDF structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (catalog, pages, fonts, content)
//! ...
//! xref                <- byte offsets of each object
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Both fonts are standard PDF Type1 fonts (Helvetica and
//! Helvetica-Bold), referenced by name — no font program is embedded.
//! Text is encoded as WinAnsi with octal escapes outside printable
//! ASCII; content streams are FlateDecode-compressed.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::FolioError;
use crate::font::FontVariant;
use crate::layout::{DrawOp, Page};
use crate::report::Metadata;

pub struct PdfWriter;

struct PdfObject {
    data: Vec<u8>,
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        let id = self.objects.len();
        self.objects.push(PdfObject { data });
        id
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector. The only fallible
    /// stage of composition: on error no partial document is returned.
    pub fn write(&self, pages: &[Page], metadata: &Metadata) -> Result<Vec<u8>, FolioError> {
        if pages.is_empty() {
            return Err(FolioError::Serialize("document has no pages".to_string()));
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3, 4 = the two standard fonts
        // 5+ = content streams and page objects
        builder.push(vec![]);
        builder.push(vec![]);
        builder.push(vec![]);
        for variant in [FontVariant::Regular, FontVariant::Bold] {
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                variant.pdf_name()
            );
            builder.push(dict.into_bytes());
        }
        let font_resources = format!(
            "/{} 3 0 R /{} 4 0 R",
            FontVariant::Regular.resource_name(),
            FontVariant::Bold.resource_name()
        );

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = Self::build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width, page.height, content_obj_id, font_resources
            );
            let page_obj_id = builder.push(page_dict.into_bytes());
            page_obj_ids.push(page_obj_id);
        }

        // Catalog (object 1)
        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        // Pages tree (object 2)
        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary
        let info_obj_id = if metadata.title.is_some()
            || metadata.author.is_some()
            || metadata.subject.is_some()
        {
            let mut info = String::from("<< ");
            if let Some(ref title) = metadata.title {
                let _ = write!(info, "/Title ({}) ", Self::escape_pdf_string(title));
            }
            if let Some(ref author) = metadata.author {
                let _ = write!(info, "/Author ({}) ", Self::escape_pdf_string(author));
            }
            if let Some(ref subject) = metadata.subject {
                let _ = write!(info, "/Subject ({}) ", Self::escape_pdf_string(subject));
            }
            let _ = write!(info, "/Producer (Folio 0.3) /Creator (Folio) >>");
            Some(builder.push(info.into_bytes()))
        } else {
            None
        };

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// Translate one page's draw ops into PDF content-stream operators.
    fn build_content_stream(page: &Page) -> String {
        let mut stream = String::new();
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold,
                    text,
                } => {
                    let variant = if *bold {
                        FontVariant::Bold
                    } else {
                        FontVariant::Regular
                    };
                    let _ = write!(
                        stream,
                        "BT\n0 0 0 rg\n/{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        variant.resource_name(),
                        size,
                        x,
                        y,
                        Self::encode_winansi_text(text)
                    );
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    let _ = write!(
                        stream,
                        "q\n0.8 0.8 0.8 RG\n1 w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
                        x, y, width, height
                    );
                }
            }
        }
        stream
    }

    /// Encode text for a `( ... ) Tj` operator: WinAnsi bytes with
    /// `\( \) \\` escapes and octal escapes outside printable ASCII.
    fn encode_winansi_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly; the 0x80..=0x9F range
    /// holds special mappings for smart quotes, bullets, dashes, etc.
    /// After sanitization only ASCII and the ellipsis marker occur, but
    /// the full table costs nothing to keep correct.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: Option<usize>) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for i in 1..builder.objects.len() {
            let _ = write!(output, "{:010} 00000 n \n", offsets[i]);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R",
            builder.objects.len()
        );
        if let Some(info_id) = info_obj_id {
            let _ = write!(output, " /Info {} 0 R", info_id);
        }
        let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};

    fn one_page(ops: Vec<DrawOp>) -> Vec<Page> {
        vec![Page {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            ops,
        }]
    }

    #[test]
    fn writes_valid_pdf_skeleton() {
        let writer = PdfWriter::new();
        let pages = one_page(vec![DrawOp::Text {
            x: 40.0,
            y: 800.0,
            size: 11.0,
            bold: false,
            text: "Hello".to_string(),
        }]);
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(4).any(|w| w == b"xref"));
    }

    #[test]
    fn registers_both_standard_fonts() {
        let writer = PdfWriter::new();
        let bytes = writer
            .write(&one_page(vec![]), &Metadata::default())
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica "));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn page_count_matches_pages_tree() {
        let writer = PdfWriter::new();
        let pages = vec![
            Page {
                width: PAGE_WIDTH,
                height: PAGE_HEIGHT,
                ops: vec![],
            },
            Page {
                width: PAGE_WIDTH,
                height: PAGE_HEIGHT,
                ops: vec![],
            },
        ];
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn info_dict_written_when_metadata_present() {
        let writer = PdfWriter::new();
        let metadata = Metadata {
            title: Some("Analysis Report".to_string()),
            author: Some("Folio".to_string()),
            subject: None,
        };
        let bytes = writer.write(&one_page(vec![]), &metadata).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Analysis Report)"));
        assert!(text.contains("/Author (Folio)"));
        assert!(text.contains("/Info "));
    }

    #[test]
    fn empty_page_list_is_a_serialize_error() {
        let writer = PdfWriter::new();
        let err = writer.write(&[], &Metadata::default()).unwrap_err();
        assert!(matches!(err, FolioError::Serialize(_)));
    }

    #[test]
    fn text_encoding_escapes_and_maps_winansi() {
        assert_eq!(PdfWriter::encode_winansi_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
        // ellipsis marker -> WinAnsi 0x85 as octal escape
        assert_eq!(PdfWriter::encode_winansi_text("x\u{2026}"), "x\\205");
        // unmapped codepoints degrade to '?'
        assert_eq!(PdfWriter::encode_winansi_text("\u{0131}"), "?");
    }

    #[test]
    fn escape_pdf_string_handles_parens() {
        assert_eq!(
            PdfWriter::escape_pdf_string("Hello (World)"),
            "Hello \\(World\\)"
        );
        assert_eq!(PdfWriter::escape_pdf_string("back\\slash"), "back\\\\slash");
    }
}

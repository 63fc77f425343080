//! # Font Metrics
//!
//! Text measurement for the layout engine.
//!
//! The report engine draws with the standard PDF Helvetica pair, which
//! every reader provides, so no font data needs embedding — metrics are
//! compiled in from Adobe's AFM files and measurement is a pure function.
//! Layout correctness depends on these widths: wrap decisions, row
//! heights, and page breaks are all derived from them.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The two font styles a report uses: regular body text and bold
/// headers/headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontVariant {
    Regular,
    Bold,
}

impl FontVariant {
    /// The PDF BaseFont name for this variant.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            FontVariant::Regular => "Helvetica",
            FontVariant::Bold => "Helvetica-Bold",
        }
    }

    /// The content-stream resource name for this variant.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontVariant::Regular => "F1",
            FontVariant::Bold => "F2",
        }
    }
}

/// Shared measurement context used by wrapping, table layout, and the
/// composer. Read-only for the whole composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    fn metrics(&self, variant: FontVariant) -> StandardFontMetrics {
        match variant {
            FontVariant::Regular => StandardFontMetrics::HELVETICA,
            FontVariant::Bold => StandardFontMetrics::HELVETICA_BOLD,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure(&self, text: &str, variant: FontVariant, font_size: f64) -> f64 {
        self.metrics(variant).measure_string(text, font_size)
    }

    /// Advance width of a single character in points at `font_size`.
    pub fn char_width(&self, ch: char, variant: FontVariant, font_size: f64) -> f64 {
        self.metrics(variant).char_width(ch, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_nonempty_string() {
        let ctx = FontContext::new();
        let w = ctx.measure("Hello", FontVariant::Regular, 12.0);
        assert!(w > 0.0);
    }

    #[test]
    fn bold_variant_measures_wider() {
        let ctx = FontContext::new();
        let regular = ctx.measure("Count", FontVariant::Regular, 9.0);
        let bold = ctx.measure("Count", FontVariant::Bold, 9.0);
        assert!(bold > regular);
    }

    #[test]
    fn variant_names() {
        assert_eq!(FontVariant::Regular.pdf_name(), "Helvetica");
        assert_eq!(FontVariant::Bold.pdf_name(), "Helvetica-Bold");
        assert_eq!(FontVariant::Regular.resource_name(), "F1");
        assert_eq!(FontVariant::Bold.resource_name(), "F2");
    }

    #[test]
    fn measure_scales_linearly_with_size() {
        let ctx = FontContext::new();
        let w9 = ctx.measure("Report", FontVariant::Regular, 9.0);
        let w18 = ctx.measure("Report", FontVariant::Regular, 18.0);
        assert!((w18 - 2.0 * w9).abs() < 1e-9);
    }
}

//! Adobe AFM advance widths for the standard PDF Helvetica fonts.
//!
//! The standard 14 PDF fonts ship with every conforming reader, so no
//! font program is embedded — only the metrics are compiled in, taken
//! from Adobe's AFM files. Widths are expressed in 1/1000 em; multiply
//! by `font_size / 1000` to get points.

/// Advance widths for printable ASCII (0x20..=0x7E), Helvetica regular.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, // space ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
    556, 556, 278, 278, 584, 584, 584, 556, // 8 9 : ; < = > ?
    1015, 667, 667, 722, 722, 667, 611, 778, // @ A B C D E F G
    722, 278, 500, 667, 556, 833, 722, 778, // H I J K L M N O
    667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
    667, 667, 611, 278, 278, 278, 469, 556, // X Y Z [ \ ] ^ _
    333, 556, 556, 500, 556, 556, 278, 556, // ` a b c d e f g
    556, 222, 222, 500, 222, 833, 556, 556, // h i j k l m n o
    556, 556, 333, 500, 278, 556, 500, 722, // p q r s t u v w
    500, 500, 500, 334, 260, 334, 584, // x y z { | } ~
];

/// Advance widths for printable ASCII (0x20..=0x7E), Helvetica-Bold.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, // space ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
    556, 556, 333, 333, 584, 584, 584, 611, // 8 9 : ; < = > ?
    975, 722, 722, 722, 722, 667, 611, 778, // @ A B C D E F G
    722, 278, 556, 722, 611, 833, 722, 778, // H I J K L M N O
    667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
    667, 667, 611, 333, 278, 333, 584, 556, // X Y Z [ \ ] ^ _
    333, 556, 611, 556, 611, 556, 333, 611, // ` a b c d e f g
    611, 278, 278, 556, 278, 889, 611, 611, // h i j k l m n o
    611, 611, 389, 556, 333, 611, 556, 778, // p q r s t u v w
    556, 556, 500, 389, 280, 389, 584, // x y z { | } ~
];

/// Fallback advance for characters outside the table. After
/// sanitization only ASCII and the ellipsis marker reach measurement,
/// so this is the width of a typical replacement glyph.
const DEFAULT_ADVANCE: u16 = 556;

/// Horizontal ellipsis (U+2026), used as the truncation marker. Both
/// Helvetica variants give it a full-em advance in the AFM data.
const ELLIPSIS_ADVANCE: u16 = 1000;

/// Metrics for one standard font: a pure glyph-width lookup.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
}

impl StandardFontMetrics {
    pub const HELVETICA: StandardFontMetrics = StandardFontMetrics {
        widths: &HELVETICA_WIDTHS,
    };

    pub const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
        widths: &HELVETICA_BOLD_WIDTHS,
    };

    /// Advance width of a single character in points at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let units = match ch {
            ' '..='~' => self.widths[ch as usize - 0x20],
            '\u{2026}' => ELLIPSIS_ADVANCE,
            _ => DEFAULT_ADVANCE,
        };
        units as f64 * font_size / 1000.0
    }

    /// Width of a string in points at `font_size`.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

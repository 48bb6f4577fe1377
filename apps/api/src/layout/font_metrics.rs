//! Approximate font metrics for the template font families.
//!
//! Widths are in em units, bucketed by character class rather than per glyph.
//! That is coarse, but the estimator only has to tell "fits on the page" from
//! "clearly does not"; a few percent of error on each line does not change a
//! page-break decision.

use serde::{Deserialize, Serialize};

/// Font families used by the eight templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Humanist sans-serif (modern, technical).
    Inter,
    /// Geometric sans-serif (professional, minimal).
    Lato,
    /// Old-style serif (classic, executive).
    EbGaramond,
    /// Wide display sans-serif (creative).
    Poppins,
    /// Monospace (terminal).
    JetBrainsMono,
}

impl FontFamily {
    /// CSS `font-family` stack for this family.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Inter => "'Inter', 'Helvetica Neue', Arial, sans-serif",
            FontFamily::Lato => "'Lato', 'Helvetica Neue', Arial, sans-serif",
            FontFamily::EbGaramond => "'EB Garamond', Garamond, 'Times New Roman', serif",
            FontFamily::Poppins => "'Poppins', 'Segoe UI', Arial, sans-serif",
            FontFamily::JetBrainsMono => "'JetBrains Mono', 'Courier New', monospace",
        }
    }
}

/// Per-class character widths for one family, in em.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub font: FontFamily,
    /// i, j, l, t, f, r, I, and thin punctuation.
    narrow: f32,
    lower: f32,
    /// m, w, M, W.
    wide: f32,
    upper: f32,
    digit: f32,
    punct: f32,
    pub space_width: f32,
    /// Anything outside ASCII.
    pub average_char_width: f32,
    /// Line box height as a multiple of the font size.
    pub line_height: f32,
}

impl FontMetrics {
    /// Width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        match c {
            ' ' => self.space_width,
            'i' | 'j' | 'l' | 't' | 'f' | 'r' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => {
                self.narrow
            }
            'm' | 'w' | 'M' | 'W' | '@' | '%' => self.wide,
            'a'..='z' => self.lower,
            'A'..='Z' => self.upper,
            '0'..='9' => self.digit,
            c if c.is_ascii() => self.punct,
            _ => self.average_char_width,
        }
    }

    /// Number of lines `text` occupies when greedily word-wrapped into
    /// `max_width_em`. Blank text occupies zero lines. A word wider than the
    /// line starts on a fresh line and breaks between characters, as the
    /// frame's `overflow-wrap: anywhere` does.
    pub fn wrapped_lines(&self, text: &str, max_width_em: f32) -> u32 {
        text.lines()
            .map(|paragraph| self.wrap_paragraph(paragraph, max_width_em))
            .sum()
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width_em: f32) -> u32 {
        let mut lines = 0u32;
        let mut current: Option<f32> = None;
        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word);
            match current {
                Some(w) if w + self.space_width + word_w <= max_width_em => {
                    current = Some(w + self.space_width + word_w);
                }
                _ if word_w > max_width_em => {
                    let (extra, last) = self.break_word(word, max_width_em);
                    lines += 1 + extra;
                    current = Some(last);
                }
                _ => {
                    lines += 1;
                    current = Some(word_w);
                }
            }
        }
        lines
    }

    /// Breaks one overlong word by character width. Returns the lines added
    /// beyond the first and the width left on the last one.
    fn break_word(&self, word: &str, max_width_em: f32) -> (u32, f32) {
        let mut extra = 0u32;
        let mut line = 0.0f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if line > 0.0 && line + w > max_width_em {
                extra += 1;
                line = w;
            } else {
                line += w;
            }
        }
        (extra, line)
    }
}

/// Returns the metric table for `font`.
pub fn get_metrics(font: FontFamily) -> &'static FontMetrics {
    match font {
        FontFamily::Inter => &INTER,
        FontFamily::Lato => &LATO,
        FontFamily::EbGaramond => &EB_GARAMOND,
        FontFamily::Poppins => &POPPINS,
        FontFamily::JetBrainsMono => &JETBRAINS_MONO,
    }
}

static INTER: FontMetrics = FontMetrics {
    font: FontFamily::Inter,
    narrow: 0.26,
    lower: 0.55,
    wide: 0.82,
    upper: 0.65,
    digit: 0.56,
    punct: 0.45,
    space_width: 0.25,
    average_char_width: 0.52,
    line_height: 1.45,
};

static LATO: FontMetrics = FontMetrics {
    font: FontFamily::Lato,
    narrow: 0.25,
    lower: 0.52,
    wide: 0.80,
    upper: 0.63,
    digit: 0.55,
    punct: 0.43,
    space_width: 0.24,
    average_char_width: 0.50,
    line_height: 1.4,
};

static EB_GARAMOND: FontMetrics = FontMetrics {
    font: FontFamily::EbGaramond,
    narrow: 0.22,
    lower: 0.46,
    wide: 0.72,
    upper: 0.60,
    digit: 0.48,
    punct: 0.38,
    space_width: 0.21,
    average_char_width: 0.44,
    line_height: 1.35,
};

static POPPINS: FontMetrics = FontMetrics {
    font: FontFamily::Poppins,
    narrow: 0.28,
    lower: 0.60,
    wide: 0.88,
    upper: 0.70,
    digit: 0.60,
    punct: 0.48,
    space_width: 0.27,
    average_char_width: 0.58,
    line_height: 1.5,
};

static JETBRAINS_MONO: FontMetrics = FontMetrics {
    font: FontFamily::JetBrainsMono,
    narrow: 0.60,
    lower: 0.60,
    wide: 0.60,
    upper: 0.60,
    digit: 0.60,
    punct: 0.60,
    space_width: 0.60,
    average_char_width: 0.60,
    line_height: 1.5,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_has_no_lines() {
        let m = get_metrics(FontFamily::Inter);
        assert_eq!(m.wrapped_lines("", 40.0), 0);
        assert_eq!(m.wrapped_lines("   \n  ", 40.0), 0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let m = get_metrics(FontFamily::Inter);
        assert_eq!(m.wrapped_lines("Senior Engineer", 40.0), 1);
    }

    #[test]
    fn test_long_text_wraps() {
        let m = get_metrics(FontFamily::Inter);
        let text = "word ".repeat(60);
        assert!(m.wrapped_lines(&text, 40.0) >= 3);
    }

    #[test]
    fn test_explicit_newlines_start_new_lines() {
        let m = get_metrics(FontFamily::Lato);
        assert_eq!(m.wrapped_lines("one\ntwo\nthree", 40.0), 3);
    }

    #[test]
    fn test_oversized_word_breaks_by_width() {
        let m = get_metrics(FontFamily::JetBrainsMono);
        // 0.6em per glyph, ten glyphs per 6.3em line.
        assert_eq!(m.wrapped_lines(&"x".repeat(200), 6.3), 20);
    }

    #[test]
    fn test_long_url_moves_to_its_own_lines() {
        let m = get_metrics(FontFamily::JetBrainsMono);
        let text = format!("see {}", "a".repeat(25));
        // "see" on line one, then 25 glyphs over three lines.
        assert_eq!(m.wrapped_lines(&text, 6.3), 4);
    }

    #[test]
    fn test_monospace_width_is_uniform() {
        let m = get_metrics(FontFamily::JetBrainsMono);
        assert!((m.measure_str("iiii") - m.measure_str("MMMM")).abs() < 1e-6);
    }

    #[test]
    fn test_serif_is_narrower_than_sans() {
        let text = "Distributed systems engineer";
        let serif = get_metrics(FontFamily::EbGaramond).measure_str(text);
        let sans = get_metrics(FontFamily::Inter).measure_str(text);
        assert!(serif < sans);
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        let m = get_metrics(FontFamily::Inter);
        assert!((m.measure_str("é") - m.average_char_width).abs() < 1e-6);
    }
}

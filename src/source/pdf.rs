//! PDF word decoding via `pdfium-render` (Chromium's PDF library).
//!
//! # Pipeline
//!
//! ```text
//! PDF file → pdfium char extraction → top-origin coordinates → word grouping → tokens
//! ```
//!
//! All pages are decoded up front because pdfium handles are not `Send`;
//! the extractor can then reconstruct pages in parallel.

use std::path::Path;

use pdfium_render::prelude::*;
use tracing::debug;

use super::PageSource;
use crate::error::{Result, TableError};
use crate::grid::Token;

/// Fraction of the running average glyph width treated as a word break.
const WORD_GAP_RATIO: f64 = 0.3;

/// Fraction of glyph height by which baselines may differ within one word.
const LINE_TOLERANCE_RATIO: f64 = 0.4;

/// A positioned glyph in top-origin page coordinates.
#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    left: f64,
    right: f64,
    top: f64,
    height: f64,
}

/// Decoded words for every page of a PDF.
pub struct PdfSource {
    pages: Vec<Vec<Token>>,
}

impl PdfSource {
    /// Decode every page of the document at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| TableError::Pdf(format!("failed to bind pdfium library: {e}")))?;
        let pdfium = Pdfium::new(bindings);
        let doc = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| TableError::Pdf(format!("failed to load {}: {e}", path.display())))?;

        let mut pages = Vec::new();
        for (page_idx, page) in doc.pages().iter().enumerate() {
            let glyphs = Self::extract_glyphs(&page)?;
            let words = group_words(&glyphs)?;
            debug!(
                "Page {}: {} glyphs, {} words",
                page_idx + 1,
                glyphs.len(),
                words.len()
            );
            pages.push(words);
        }

        Ok(Self { pages })
    }

    /// Extract glyphs in content-stream order, flipping to a top-left origin.
    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    fn extract_glyphs(page: &PdfPage) -> Result<Vec<Glyph>> {
        let page_height = f64::from(page.height().value);
        let text = page
            .text()
            .map_err(|e| TableError::Pdf(format!("failed to extract text from page: {e}")))?;

        let mut glyphs = Vec::new();
        for ch in text.chars().iter() {
            if let (Some(unicode_ch), Ok(rect)) = (ch.unicode_char(), ch.tight_bounds()) {
                // pdfium reports f32 points; widen before any arithmetic.
                let (left, right) = (f64::from(rect.left.value), f64::from(rect.right.value));
                let (top, bottom) = (f64::from(rect.top.value), f64::from(rect.bottom.value));
                glyphs.push(Glyph {
                    ch: unicode_ch,
                    left: left.min(right),
                    right: left.max(right),
                    top: page_height - top.max(bottom),
                    height: (top - bottom).abs(),
                });
            }
        }
        Ok(glyphs)
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn words(&self, page: usize) -> Result<Vec<Token>> {
        self.pages.get(page).cloned().ok_or_else(|| {
            TableError::InvalidInput(format!(
                "page {page} out of range (document has {})",
                self.pages.len()
            ))
        })
    }
}

/// A word being assembled from consecutive glyphs.
struct WordBuilder {
    text: String,
    left: f64,
    right: f64,
    top: f64,
    height: f64,
    width_sum: f64,
    glyphs: usize,
}

impl WordBuilder {
    fn start(glyph: &Glyph) -> Self {
        let mut text = String::new();
        text.push(glyph.ch);
        Self {
            text,
            left: glyph.left,
            right: glyph.right,
            top: glyph.top,
            height: glyph.height,
            width_sum: glyph.right - glyph.left,
            glyphs: 1,
        }
    }

    /// Whether `glyph` continues this word on the same line without a gap.
    fn accepts(&self, glyph: &Glyph) -> bool {
        let line_tolerance = self.height.max(glyph.height) * LINE_TOLERANCE_RATIO;
        let same_line = (glyph.top - self.top).abs() <= line_tolerance;
        let avg_width = self.width_sum / self.glyphs as f64;
        let gap = glyph.left - self.right;
        same_line && gap <= avg_width * WORD_GAP_RATIO && gap >= -avg_width
    }

    fn push(&mut self, glyph: &Glyph) {
        self.text.push(glyph.ch);
        self.left = self.left.min(glyph.left);
        self.right = self.right.max(glyph.right);
        self.top = self.top.min(glyph.top);
        self.height = self.height.max(glyph.height);
        self.width_sum += glyph.right - glyph.left;
        self.glyphs += 1;
    }

    fn finish(self) -> Result<Token> {
        Token::new(self.text, self.left, self.right, self.top)
    }
}

/// Group glyphs into words, breaking on whitespace, line changes and gaps.
fn group_words(glyphs: &[Glyph]) -> Result<Vec<Token>> {
    let mut words = Vec::new();
    let mut current: Option<WordBuilder> = None;

    for glyph in glyphs {
        if glyph.ch.is_whitespace() || glyph.ch.is_control() {
            if let Some(word) = current.take() {
                words.push(word.finish()?);
            }
            continue;
        }
        match current.as_mut() {
            Some(word) if word.accepts(glyph) => word.push(glyph),
            _ => {
                if let Some(word) = current.replace(WordBuilder::start(glyph)) {
                    words.push(word.finish()?);
                }
            }
        }
    }
    if let Some(word) = current {
        words.push(word.finish()?);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str, x_start: f64, top: f64, width: f64) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                left: x_start + i as f64 * width,
                right: x_start + (i + 1) as f64 * width,
                top,
                height: 10.0,
            })
            .collect()
    }

    fn texts(words: &[Token]) -> Vec<&str> {
        words.iter().map(Token::text).collect()
    }

    #[test]
    fn group_words_empty() {
        assert!(group_words(&[]).unwrap().is_empty());
    }

    #[test]
    fn group_words_splits_on_spaces() {
        let words = group_words(&glyphs("Unit price", 10.0, 50.0, 5.0)).unwrap();
        assert_eq!(texts(&words), vec!["Unit", "price"]);
        assert_eq!(words[0].x0(), 10.0);
        assert_eq!(words[0].x1(), 30.0);
        assert_eq!(words[1].x0(), 35.0);
    }

    #[test]
    fn group_words_splits_on_gap_without_space_glyph() {
        let mut input = glyphs("Qty", 10.0, 50.0, 5.0);
        input.extend(glyphs("12", 80.0, 50.0, 5.0));
        let words = group_words(&input).unwrap();
        assert_eq!(texts(&words), vec!["Qty", "12"]);
    }

    #[test]
    fn group_words_splits_on_line_change() {
        let mut input = glyphs("ab", 10.0, 50.0, 5.0);
        input.extend(glyphs("cd", 20.0, 70.0, 5.0));
        let words = group_words(&input).unwrap();
        assert_eq!(texts(&words), vec!["ab", "cd"]);
        assert_eq!(words[1].top(), 70.0);
    }

    #[test]
    fn group_words_ignores_control_glyphs() {
        let mut input = glyphs("end", 10.0, 50.0, 5.0);
        input.extend(glyphs("\r\nnext", 10.0, 62.0, 5.0));
        let words = group_words(&input).unwrap();
        assert_eq!(texts(&words), vec!["end", "next"]);
    }
}

//! Positioned word tokens consumed by the row clusterer.
//!
//! Tokens are validated on construction so that a missing or non-finite
//! coordinate can never be silently defaulted into a row or column.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// A positioned word decoded from a page.
///
/// Coordinates are in PDF points with a top-left origin: `top` grows
/// downwards, `x0 <= x1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawToken")]
pub struct Token {
    text: String,
    x0: f64,
    x1: f64,
    top: f64,
}

impl Token {
    /// Create a validated token.
    ///
    /// Fails with [`TableError::InvalidInput`] when the text is blank, any
    /// coordinate is NaN or infinite, or `x0 > x1`.
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TableError::InvalidInput(format!(
                "token text must not be blank (at x0={x0}, top={top})"
            )));
        }
        for (name, value) in [("x0", x0), ("x1", x1), ("top", top)] {
            if !value.is_finite() {
                return Err(TableError::InvalidInput(format!(
                    "token {text:?} has non-finite {name}: {value}"
                )));
            }
        }
        if x0 > x1 {
            return Err(TableError::InvalidInput(format!(
                "token {text:?} has x0 ({x0}) greater than x1 ({x1})"
            )));
        }
        Ok(Self { text, x0, x1, top })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Left edge.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Right edge.
    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn top(&self) -> f64 {
        self.top
    }
}

/// Wire shape of a token; every field is optional so a missing one can be
/// reported by name instead of as a generic serde error.
#[derive(Deserialize)]
struct RawToken {
    text: Option<String>,
    x0: Option<f64>,
    x1: Option<f64>,
    top: Option<f64>,
}

impl TryFrom<RawToken> for Token {
    type Error = TableError;

    fn try_from(raw: RawToken) -> Result<Self> {
        let missing = |field: &str| TableError::InvalidInput(format!("token is missing `{field}`"));
        let text = raw.text.ok_or_else(|| missing("text"))?;
        let x0 = raw.x0.ok_or_else(|| missing("x0"))?;
        let x1 = raw.x1.ok_or_else(|| missing("x1"))?;
        let top = raw.top.ok_or_else(|| missing("top"))?;
        Self::new(text, x0, x1, top)
    }
}

//! Canonical formatting settings.

use graft_core::Indent;
use serde::Deserialize;

/// Quote character used for rendered import specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    #[default]
    Single,
    Double,
}

impl Quote {
    pub fn as_char(&self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    /// Quote character for `text`, switching to the other style when the
    /// preferred one would need escaping.
    pub fn for_text(&self, text: &str) -> char {
        let preferred = self.as_char();
        if text.contains(preferred) {
            match self {
                Quote::Single => '"',
                Quote::Double => '\'',
            }
        } else {
            preferred
        }
    }
}

/// Canonical rendering style for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Indentation unit for one nesting level.
    pub indent: Indent,
    /// Quote style for import specifiers.
    pub quote: Quote,
    /// Import declarations wider than this break one binding per line.
    pub print_width: usize,
}

impl Style {
    pub const DEFAULT_PRINT_WIDTH: usize = 100;
}

impl Default for Style {
    fn default() -> Self {
        Self {
            indent: Indent::TYPESCRIPT,
            quote: Quote::Single,
            print_width: Self::DEFAULT_PRINT_WIDTH,
        }
    }
}

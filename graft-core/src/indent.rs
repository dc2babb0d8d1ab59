//! Indentation configuration for rendered code.

const SPACES: &str = "        ";

/// Indentation unit for one nesting level, measured in spaces.
///
/// Tabs are never emitted: canonical output always converts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    /// Widest supported indent unit.
    pub const MAX_WIDTH: u8 = 8;

    /// 2-space indentation (TypeScript, JavaScript).
    pub const TYPESCRIPT: Self = Self(2);

    /// 4-space indentation.
    pub const FOUR: Self = Self(4);

    /// Create an indent of `width` spaces, clamped to `1..=MAX_WIDTH`.
    pub fn spaces(width: u8) -> Self {
        Self(width.clamp(1, Self::MAX_WIDTH))
    }

    /// Number of spaces per level.
    pub fn width(&self) -> usize {
        self.0 as usize
    }

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        &SPACES[..self.width()]
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::spaces(2).as_str(), "  ");
        assert_eq!(Indent::spaces(4).as_str(), "    ");
        assert_eq!(Indent::spaces(3).as_str(), "   ");
    }

    #[test]
    fn test_indent_is_clamped() {
        assert_eq!(Indent::spaces(0).width(), 1);
        assert_eq!(Indent::spaces(12).width(), 8);
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::TYPESCRIPT);
    }
}

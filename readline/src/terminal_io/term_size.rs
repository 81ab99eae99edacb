// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use std::fmt::{Display, Formatter, Result};

/// Terminal dimensions. [`Size::columns`] and [`Size::rows`] are always at least `1`, so
/// they can safely be used as divisors when computing how a rendered line wraps, even
/// when the fields were filled in directly with `0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size {
    pub col_width: u16,
    pub row_height: u16,
}

impl Size {
    #[must_use]
    pub fn new(col_width: u16, row_height: u16) -> Self {
        Self {
            col_width: col_width.max(1),
            row_height: row_height.max(1),
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize { usize::from(self.col_width.max(1)) }

    #[must_use]
    pub fn rows(&self) -> usize { usize::from(self.row_height.max(1)) }
}

impl Default for Size {
    fn default() -> Self { Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS) }
}

/// Convert a `(columns, rows)` tuple, which is what [`crossterm::terminal::size`]
/// returns, into a [`Size`].
impl From<(u16, u16)> for Size {
    fn from((col_width, row_height): (u16, u16)) -> Self { Self::new(col_width, row_height) }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}x{}", self.col_width, self.row_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_are_clamped() {
        let size = Size::new(0, 0);
        assert_eq!(size.columns(), 1);
        assert_eq!(size.rows(), 1);
    }

    #[test]
    fn test_zero_fields_still_give_one_column_and_row() {
        let size = Size { col_width: 0, row_height: 0 };
        assert_eq!(size.columns(), 1);
        assert_eq!(size.rows(), 1);
    }

    #[test]
    fn test_default_size() {
        let size = Size::default();
        assert_eq!(size, Size::new(80, 60));
        assert_eq!(size.to_string(), "80x60");
    }
}

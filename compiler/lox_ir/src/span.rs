//! Byte-offset source spans.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for synthesized nodes (desugared `for` loops, natives).
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Build from a `logos`-style byte range, saturating at `u32::MAX`.
    pub fn from_range(range: Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let a = Span::new(4, 8);
        let b = Span::new(1, 5);
        assert_eq!(a.merge(b), Span::new(1, 8));
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(3).is_empty());
        assert_eq!(Span::new(2, 7).len(), 5);
    }

    #[test]
    fn from_range_round_trips() {
        assert_eq!(Span::from_range(3..9).to_range(), 3..9);
    }
}

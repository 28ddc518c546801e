//! Section ordering by toc tag.
//!
//! Tags order by their integer `major` first, then by the first three
//! dot-separated segments of `id`, compared numerically. A segment that is
//! not a number sorts before any numeric segment; a missing segment counts
//! as `0`, so `1.2` and `1.2.0` are equal.
//!
//! When `major` is not an integer the first `id` segment stands in for it.
//! Every tag maps to one [`TocKey`] and keys compare lexicographically,
//! which keeps the ordering transitive for any mix of numeric and
//! non-numeric tags.

use std::cmp::Ordering;

use crate::types::{Block, TocTag};

/// Number of `id` segments that take part in the comparison
pub const ID_SEGMENTS: usize = 3;

/// One comparable position of a toc tag
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    NonNumeric,
    Number(f64),
}

impl Segment {
    /// Whole-segment number, e.g. `"10"`, `" 2 "`, `"1e2"`; empty means zero
    pub fn parse(segment: &str) -> Self {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return Segment::Number(0.0);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Segment::number)
            .unwrap_or(Segment::NonNumeric)
    }

    /// Leading integer of a major value, e.g. `"2"` or `"2b"`; `"draft"` has none
    pub fn parse_major(major: &str) -> Option<Self> {
        let trimmed = major.trim_start();
        let (sign, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (-1.0, &trimmed[1..]),
            Some(b'+') => (1.0, &trimmed[1..]),
            _ => (1.0, trimmed),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return None;
        }
        digits[..end]
            .parse::<f64>()
            .ok()
            .map(|n| Segment::number(sign * n))
    }

    fn number(n: f64) -> Self {
        // -0 and 0 are the same position
        Segment::Number(n + 0.0)
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::NonNumeric, Segment::NonNumeric) => Ordering::Equal,
            (Segment::NonNumeric, Segment::Number(_)) => Ordering::Less,
            (Segment::Number(_), Segment::NonNumeric) => Ordering::Greater,
            (Segment::Number(a), Segment::Number(b)) => a.total_cmp(b),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

/// Sort key of a toc tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TocKey {
    major: Segment,
    id: [Segment; ID_SEGMENTS],
}

impl TocKey {
    pub fn new(tag: &TocTag) -> Self {
        let mut parts = tag.id.split('.');
        let id: [Segment; ID_SEGMENTS] =
            std::array::from_fn(|_| parts.next().map(Segment::parse).unwrap_or(Segment::Number(0.0)));
        let major = Segment::parse_major(&tag.major).unwrap_or(id[0]);
        Self { major, id }
    }
}

impl From<&TocTag> for TocKey {
    fn from(tag: &TocTag) -> Self {
        Self::new(tag)
    }
}

/// Compare two toc tags
pub fn compare_toc(a: &TocTag, b: &TocTag) -> Ordering {
    TocKey::new(a).cmp(&TocKey::new(b))
}

/// Compare blocks by their toc tags; untagged blocks compare as an empty tag
pub fn compare_blocks(a: &Block, b: &Block) -> Ordering {
    let a = a.toc().unwrap_or_default();
    let b = b.toc().unwrap_or_default();
    compare_toc(&a, &b)
}

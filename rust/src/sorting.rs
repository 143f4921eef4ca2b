//! Natural ordering of item labels ("1.2", "1.10", "2a").
//!
//! Ordering is a presentation concern: it is applied to engine output only and
//! never influences how the critical path passes traverse the graph.

use std::cmp::Ordering;

/// Anything displayed in item order.
pub trait ItemLabel {
    fn item(&self) -> &str;
}

impl ItemLabel for crate::models::Service {
    fn item(&self) -> &str {
        &self.item
    }
}

impl ItemLabel for String {
    fn item(&self) -> &str {
        self
    }
}

/// One run of a label: consecutive digits or consecutive non-digits.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Digit run with leading zeros stripped (arbitrary length).
    Number(String),
    /// Non-digit run, lowercased.
    Text(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Digits sort before letters and punctuation
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for an item label.
///
/// Compares segment by segment; labels equal under that comparison (e.g. "A1"
/// and "a01") fall back to the raw string so the order is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    segments: Vec<Segment>,
    raw: String,
}

impl ItemKey {
    pub fn parse(label: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_digits = false;

        for c in label.trim().chars() {
            let is_digit = c.is_ascii_digit();
            if !current.is_empty() && is_digit != in_digits {
                segments.push(Self::finish_segment(&current, in_digits));
                current.clear();
            }
            in_digits = is_digit;
            current.push(c);
        }
        if !current.is_empty() {
            segments.push(Self::finish_segment(&current, in_digits));
        }

        Self {
            segments,
            raw: label.to_string(),
        }
    }

    fn finish_segment(run: &str, digits: bool) -> Segment {
        if digits {
            let stripped = run.trim_start_matches('0');
            Segment::Number(if stripped.is_empty() { "0" } else { stripped }.to_string())
        } else {
            Segment::Text(run.to_lowercase())
        }
    }
}

impl Ord for ItemKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ItemKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two item labels in natural order.
pub fn compare_items(a: &str, b: &str) -> Ordering {
    ItemKey::parse(a).cmp(&ItemKey::parse(b))
}

/// Stable in-place sort by item label.
pub fn sort_by_item<T: ItemLabel>(items: &mut [T]) {
    items.sort_by_cached_key(|entry| ItemKey::parse(entry.item()));
}

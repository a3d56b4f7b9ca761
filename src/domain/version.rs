use chrono::NaiveDate;
use std::fmt;

/// Date-scoped release version (`YYYY.MM.DD.NN`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    date: NaiveDate,
    sequence: u32,
}

impl Version {
    /// Create a new version for the given day and sequence number
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Version { date, sequence }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The next candidate on the same day, `None` once the counter is exhausted
    pub fn next(&self) -> Option<Self> {
        Some(Version {
            date: self.date,
            sequence: self.sequence.checked_add(1)?,
        })
    }
}

impl fmt::Display for Version {
    /// Sequence is padded to two digits but never clamped (`.100` stays `.100`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", date_prefix(self.date), self.sequence)
    }
}

/// Format a day the way version tags spell it (e.g., "2024.03.07")
pub fn date_prefix(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// Read the sequence number a tag recorded for `date`.
///
/// Returns `None` when the tag has fewer than four dot-separated parts or
/// belongs to another day. A sequence field starting with `0` is read from
/// its second character only, so `05` is 5 and `010` is 1. Fields that do
/// not parse, or that leave no room for a next sequence number, count as 0.
pub fn parse_tag_sequence(tag: &str, date: NaiveDate) -> Option<u32> {
    let parts: Vec<&str> = tag.trim().split('.').collect();
    if parts.len() < 4 || parts[..3].join(".") != date_prefix(date) {
        return None;
    }

    let field = parts[3];
    let digits = if field.starts_with('0') {
        field.get(1..2).unwrap_or("")
    } else {
        field
    };

    Some(
        digits
            .parse::<u32>()
            .ok()
            .filter(|n| *n < u32::MAX)
            .unwrap_or(0),
    )
}

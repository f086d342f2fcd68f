//! Typed cell values.
//!
//! Upstream APIs return everything as loosely typed strings. A [`Cell`] makes
//! the distinction between numbers, free text and withheld values explicit so
//! that formatting and sorting never guess.

use crate::measures::FormatKind;

/// Upstream sentinels meaning "value withheld or unavailable".
pub const SUPPRESSED_VALUES: &[&str] = &["-666666666", "-666666666.0", "null", "None", "-", ""];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Absent,
}

impl Cell {
    pub fn parse(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if is_suppressed(trimmed) {
            return Cell::Absent;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Cell::Integer(n);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Decimal(n),
            Ok(_) => Cell::Absent,
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn from_f64(n: f64) -> Cell {
        if n.is_finite() {
            Cell::Decimal(n)
        } else {
            Cell::Absent
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Decimal(n) => Some(*n),
            Cell::Text(_) | Cell::Absent => None,
        }
    }

    /// Numeric key used for descending sorts. Anything non-numeric counts as zero.
    pub fn sort_key(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    pub fn render(&self, kind: FormatKind) -> String {
        match self {
            Cell::Absent => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => match kind {
                FormatKind::Decimal => format!("{:.1}", *n as f64),
                _ => n.to_string(),
            },
            Cell::Decimal(n) => match kind {
                FormatKind::Decimal => format!("{n:.1}"),
                _ => plain_number(*n),
            },
        }
    }

    /// Deterministic choice between two values for the same slot: larger
    /// number first, then any number over text, then the larger text.
    pub fn prefer(self, other: Cell) -> Cell {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => {
                if b > a {
                    other
                } else {
                    self
                }
            }
            (Some(_), None) => self,
            (None, Some(_)) => other,
            (None, None) => match (&self, &other) {
                (Cell::Absent, _) => other,
                (_, Cell::Absent) => self,
                (Cell::Text(a), Cell::Text(b)) if b > a => other,
                _ => self,
            },
        }
    }
}

pub fn is_suppressed(raw: &str) -> bool {
    SUPPRESSED_VALUES.contains(&raw.trim())
}

pub fn round_to(n: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (n * factor).round() / factor
}

// Integer text when there is no fractional part, otherwise the shortest
// decimal that round-trips. No separators or symbols.
fn plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

//! Static measure descriptors and group resolution.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Number,
    Dollar,
    Decimal,
    /// Percentage already converted to a fraction.
    Percent,
}

impl FormatKind {
    pub const ALL: &'static [FormatKind] = &[
        FormatKind::Number,
        FormatKind::Dollar,
        FormatKind::Decimal,
        FormatKind::Percent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::Number => "number",
            FormatKind::Dollar => "dollar",
            FormatKind::Decimal => "decimal",
            FormatKind::Percent => "percent",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queryable upstream field and how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    pub id: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub format: FormatKind,
}

impl Measure {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        description: &'static str,
        format: FormatKind,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            label: Cow::Borrowed(label),
            description: Cow::Borrowed(description),
            format,
        }
    }

    /// Ad-hoc measure for a raw upstream code; the code doubles as its label.
    pub fn raw(code: &str) -> Self {
        Self {
            id: Cow::Owned(code.to_string()),
            label: Cow::Owned(code.to_string()),
            description: Cow::Borrowed(""),
            format: FormatKind::Number,
        }
    }
}

#[derive(Debug)]
pub struct MeasureGroup {
    pub name: &'static str,
    pub measures: &'static [Measure],
}

pub fn group_names(table: &[MeasureGroup]) -> Vec<&'static str> {
    table.iter().map(|g| g.name).collect()
}

pub fn find_group<'a>(table: &'a [MeasureGroup], name: &str) -> Option<&'a MeasureGroup> {
    table.iter().find(|g| g.name == name)
}

/// Expands group selectors into measures in table order per group.
///
/// `all` anywhere in the selector list expands to every group. A measure
/// reachable through more than one selector is listed once.
pub fn resolve<S: AsRef<str>>(
    table: &[MeasureGroup],
    selectors: &[S],
    kind: &'static str,
) -> Result<Vec<Measure>, QueryError> {
    let expand_all = selectors.iter().any(|s| s.as_ref() == "all");
    let groups: Vec<&MeasureGroup> = if expand_all {
        table.iter().collect()
    } else {
        selectors
            .iter()
            .map(|s| {
                find_group(table, s.as_ref()).ok_or_else(|| QueryError::UnknownSelector {
                    kind,
                    name: s.as_ref().to_string(),
                    available: group_names(table).join(", "),
                })
            })
            .collect::<Result<_, _>>()?
    };

    let mut seen = HashSet::new();
    let mut measures = Vec::new();
    for group in groups {
        for measure in group.measures {
            if seen.insert(measure.id.clone()) {
                measures.push(measure.clone());
            }
        }
    }
    Ok(measures)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: &[MeasureGroup] = &[
        MeasureGroup {
            name: "first",
            measures: &[
                Measure::new("A", "Alpha", "", FormatKind::Number),
                Measure::new("B", "Beta", "", FormatKind::Decimal),
            ],
        },
        MeasureGroup {
            name: "second",
            measures: &[Measure::new("C", "Gamma", "", FormatKind::Dollar)],
        },
    ];

    #[test]
    fn resolves_single_group() {
        let measures = resolve(TABLE, &["second"], "group").unwrap();
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].id, "C");
    }

    #[test]
    fn all_expands_every_group_in_order() {
        let ids: Vec<_> = resolve(TABLE, &["all"], "group")
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn repeated_selectors_do_not_duplicate_measures() {
        let measures = resolve(TABLE, &["first", "first", "second"], "group").unwrap();
        assert_eq!(measures.len(), 3);
    }

    #[test]
    fn unknown_selector_lists_available_groups() {
        let err = resolve(TABLE, &["bogus"], "group").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown group 'bogus'"));
        assert!(msg.contains("first, second"));
    }

    #[test]
    fn raw_measure_uses_code_as_label() {
        let m = Measure::raw("B01003_001E");
        assert_eq!(m.id, "B01003_001E");
        assert_eq!(m.label, "B01003_001E");
        assert_eq!(m.format, FormatKind::Number);
    }
}

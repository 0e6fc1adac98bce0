//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction, [`SortKey`] for the sorted field and
//! [`compare_values`] for the comparator the engine uses.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to a comparator result.
    ///
    /// `Equal` stays `Equal`, so a stable sort keeps ties in input order in
    /// both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction (column header click).
    pub fn flipped(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            other => Err(QueryError::InvalidArgument(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// The field a result set is sorted by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortKey {
    /// Creates a new ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Asc)
    }

    /// Creates a new descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Desc)
    }

    /// Creates a new sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }
}

/// Precomputed, totally ordered form of a field value.
///
/// Built once per record so the comparator stays cheap and consistent while
/// the sort runs. Variants are declared in the order mismatched types sort.
#[derive(Debug, Clone)]
pub(crate) enum SortValue {
    Bool(bool),
    Number(f64),
    Text { folded: String, cased: String },
    List(Vec<(String, String)>),
}

impl SortValue {
    /// Builds the sort value for a field; absent fields take the neutral
    /// value of the column kind (`""`, `0`, `false` or an empty list).
    pub(crate) fn of(value: &Value<'_>, kind: &Value<'_>) -> SortValue {
        match value {
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => SortValue::Number(*n),
            Value::String(s) => SortValue::text(s),
            Value::List(items) => SortValue::List(items.iter().map(|i| fold(i)).collect()),
            Value::None => match kind {
                Value::Bool(_) => SortValue::Bool(false),
                Value::Number(_) => SortValue::Number(0.0),
                Value::List(_) => SortValue::List(Vec::new()),
                Value::String(_) | Value::None => SortValue::text(""),
            },
        }
    }

    fn text(s: &str) -> SortValue {
        let (folded, cased) = fold(s);
        SortValue::Text { folded, cased }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Text { .. } => 2,
            SortValue::List(_) => 3,
        }
    }

    pub(crate) fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (
                SortValue::Text { folded: fa, cased: ca },
                SortValue::Text { folded: fb, cased: cb },
            ) => fa.cmp(fb).then_with(|| ca.cmp(cb)),
            (SortValue::List(a), SortValue::List(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Locale-aware collation key: transliterated and lowercased first, then the
/// case-swapped text as a tie-break so "apple" sorts before "Apple".
fn fold(s: &str) -> (String, String) {
    let swapped = s
        .chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect();
    (deunicode(s).to_lowercase(), swapped)
}

/// Compares two field values the way the engine sorts them.
///
/// Strings collate case- and accent-insensitively, numbers numerically.
/// An absent value compares as the neutral value of the other side's type.
/// Values of different types order by type (flags, numbers, text, lists).
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    let kind = if a.is_none() { b } else { a };
    SortValue::of(a, kind).compare(&SortValue::of(b, kind))
}

//! Facet counts for category and dosha tabs.

use serde::Serialize;

use crate::traits::Seekable;
use crate::value::{format_number, Value};

/// Distinct values of a field with the number of records carrying each,
/// in order of first encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetCounts {
    field: String,
    entries: Vec<(String, usize)>,
}

impl FacetCounts {
    /// Returns the counted field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the count for a value, or `0` if it never occurred.
    pub fn get(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map_or(0, |(_, n)| *n)
    }

    /// Iterates `(value, count)` pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(v, n)| (v.as_str(), *n))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no record carried the field.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    ///
    /// Equals the number of records carrying the field for scalar fields;
    /// list fields contribute one per distinct element.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    fn bump(&mut self, value: String) {
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((value, 1)),
        }
    }
}

/// Counts records per distinct value of `field`.
///
/// Pass the whole collection for global tab badges, or the output of
/// [`QueryEngine::matching`](crate::QueryEngine::matching) for counts that
/// follow the active filters. Numbers are keyed by their display form,
/// flags as `true`/`false`. Each distinct element of a list field counts
/// once per record. Records without the field are skipped.
///
/// ```
/// use ahara_seeker::{count_by, Record};
///
/// let foods = vec![
///     Record::new("f1").with("category", "Grains"),
///     Record::new("f2").with("category", "Dairy"),
///     Record::new("f3").with("category", "Grains"),
/// ];
///
/// let counts = count_by(&foods, "category");
/// assert_eq!(counts.iter().collect::<Vec<_>>(), [("Grains", 2), ("Dairy", 1)]);
/// ```
pub fn count_by<I>(records: I, field: &str) -> FacetCounts
where
    I: IntoIterator,
    I::Item: Seekable,
{
    let mut counts = FacetCounts {
        field: field.to_string(),
        entries: Vec::new(),
    };

    for record in records {
        match record.seeker_field_value(field) {
            Value::String(s) => counts.bump(s.to_string()),
            Value::Number(n) => counts.bump(format_number(n)),
            Value::Bool(b) => counts.bump(b.to_string()),
            Value::List(items) => {
                let mut seen: Vec<&str> = Vec::with_capacity(items.len());
                for item in items {
                    if !seen.contains(&item.as_str()) {
                        seen.push(item);
                        counts.bump(item.clone());
                    }
                }
            }
            Value::None => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QueryEngine;
    use crate::query::Query;
    use crate::record::Record;

    fn patients() -> Vec<Record> {
        vec![
            Record::new("p1")
                .with("prakriti", "Vata")
                .with("active", true)
                .with("conditions", vec!["Insomnia", "Anxiety"]),
            Record::new("p2")
                .with("prakriti", "Pitta")
                .with("active", false)
                .with("conditions", vec!["Acidity"]),
            Record::new("p3")
                .with("prakriti", "Vata")
                .with("active", true)
                .with("conditions", vec!["Insomnia", "Insomnia"]),
            Record::new("p4").with("age", 40),
        ]
    }

    #[test]
    fn counts_in_encounter_order() {
        let counts = count_by(&patients(), "prakriti");
        assert_eq!(counts.field(), "prakriti");
        assert_eq!(counts.iter().collect::<Vec<_>>(), [("Vata", 2), ("Pitta", 1)]);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get("Kapha"), 0);
    }

    #[test]
    fn counts_flags_and_numbers() {
        let counts = count_by(&patients(), "active");
        assert_eq!(counts.get("true"), 2);
        assert_eq!(counts.get("false"), 1);

        let ages = count_by(&patients(), "age");
        assert_eq!(ages.iter().collect::<Vec<_>>(), [("40", 1)]);
    }

    #[test]
    fn list_elements_count_once_per_record() {
        let counts = count_by(&patients(), "conditions");
        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            [("Insomnia", 2), ("Anxiety", 1), ("Acidity", 1)]
        );
    }

    #[test]
    fn missing_field_yields_empty_counts() {
        let counts = count_by(&patients(), "dosha");
        assert!(counts.is_empty());
        assert_eq!(counts.len(), 0);
    }

    #[test]
    fn counts_follow_filtered_set() {
        let patients = patients();
        let engine = QueryEngine::new(["conditions"]);
        let filtered = engine.matching(&patients, &Query::new().term("insom"));

        let counts = count_by(filtered, "prakriti");
        assert_eq!(counts.iter().collect::<Vec<_>>(), [("Vata", 2)]);
    }
}

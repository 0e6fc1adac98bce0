//! Property-based tests for the query engine and selection set.

use ahara_seeker::{Query, QueryEngine, QueryError, Record, SelectionSet, Toggle};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

const CATEGORIES: [&str; 4] = ["Grains", "Dairy", "Legumes", "Spices"];

fn record_strategy() -> impl Strategy<Value = (String, usize, u32)> {
    ("[a-z]{1,8}( [a-z]{1,8})?", 0usize..CATEGORIES.len(), 0u32..1000)
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, cat, calories))| {
                Record::new(format!("r{}", i))
                    .with("name", name)
                    .with("category", CATEGORIES[cat])
                    .with("calories", calories)
            })
            .collect()
    })
}

fn engine() -> QueryEngine {
    QueryEngine::new(["name", "category"])
}

fn ids(items: &[&Record]) -> Vec<String> {
    items.iter().map(|r| r.id.clone()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Without a term, filtering never grows the collection.
    #[test]
    fn total_matched_never_exceeds_input(
        records in records_strategy(),
        max in 0u32..1000,
        cat in 0usize..CATEGORIES.len(),
    ) {
        let query = Query::new()
            .only("category", CATEGORIES[cat])
            .range("calories", 0.0, max as f64);

        let result = engine().evaluate(&records, &query).unwrap();
        prop_assert!(result.total_matched <= records.len());
        prop_assert!(result.items.len() <= result.total_matched);
    }

    /// Evaluation is a pure function of its inputs.
    #[test]
    fn evaluation_is_deterministic(
        records in records_strategy(),
        term in "[a-z]{0,2}",
        desc in any::<bool>(),
    ) {
        let query = if desc {
            Query::new().term(term).order_desc("calories")
        } else {
            Query::new().term(term).order_asc("name")
        };

        let first = engine().evaluate(&records, &query).unwrap();
        let second = engine().evaluate(&records, &query).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Items never exceed the page size and total ignores pagination.
    #[test]
    fn page_bounds_hold(
        records in records_strategy(),
        index in 0usize..10,
        size in 1usize..15,
    ) {
        let all = engine().matching(&records, &Query::new().order_asc("calories"));
        let result = engine()
            .evaluate(&records, &Query::new().order_asc("calories").page(index, size))
            .unwrap();

        prop_assert!(result.items.len() <= size);
        prop_assert_eq!(result.total_matched, all.len());

        let expected: Vec<&Record> = all.into_iter().skip(index * size).take(size).collect();
        prop_assert_eq!(ids(&result.items), ids(&expected));
    }

    /// Records with equal keys keep their input order in both directions.
    #[test]
    fn sort_is_stable(records in records_strategy(), desc in any::<bool>()) {
        let query = if desc {
            Query::new().order_desc("category")
        } else {
            Query::new().order_asc("category")
        };
        let sorted = engine().matching(&records, &query);

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.get("category") == b.get("category") {
                let ia: usize = a.id[1..].parse().unwrap();
                let ib: usize = b.id[1..].parse().unwrap();
                prop_assert!(ia < ib, "{} should precede {}", a.id, b.id);
            }
        }
    }

    /// Sorted output is ordered by the key in the requested direction.
    #[test]
    fn sort_respects_direction(records in records_strategy(), desc in any::<bool>()) {
        let query = if desc {
            Query::new().order_desc("calories")
        } else {
            Query::new().order_asc("calories")
        };
        let sorted = engine().matching(&records, &query);
        let calories: Vec<f64> = sorted
            .iter()
            .map(|r| match r.get("calories") {
                Some(ahara_seeker::FieldValue::Number(n)) => *n,
                _ => 0.0,
            })
            .collect();

        for pair in calories.windows(2) {
            if desc {
                prop_assert!(pair[0] >= pair[1]);
            } else {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }

    /// A range always admits its own endpoints.
    #[test]
    fn range_is_inclusive_at_both_ends(calories in 0u32..1000) {
        let records = vec![Record::new("x").with("calories", calories)];
        let exact = calories as f64;

        prop_assert_eq!(engine().count(&records, &Query::new().range("calories", exact, exact)), 1);
        prop_assert_eq!(
            engine().count(&records, &Query::new().range("calories", 0.0, exact - 1.0)),
            0
        );
    }

    /// Zero page size is always rejected, whatever else the query says.
    #[test]
    fn zero_page_size_is_rejected(records in records_strategy(), index in 0usize..5) {
        let err = engine()
            .evaluate(&records, &Query::new().page(index, 0))
            .unwrap_err();
        prop_assert!(matches!(err, QueryError::InvalidQuery(_)));
    }

    /// The selection never exceeds its capacity, and members always toggle out.
    #[test]
    fn selection_respects_capacity(ops in prop::collection::vec("[a-f]", 0..40)) {
        let mut set = SelectionSet::new();
        for id in &ops {
            let was_member = set.contains(id);
            let was_full = set.is_full();
            let outcome = set.toggle(id);

            if was_member {
                prop_assert_eq!(outcome, Toggle::Removed);
                prop_assert!(!set.contains(id));
            } else if was_full {
                prop_assert_eq!(outcome, Toggle::Ignored);
            } else {
                prop_assert_eq!(outcome, Toggle::Added);
            }
            prop_assert!(set.len() <= set.capacity());
        }
    }
}

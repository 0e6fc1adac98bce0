//! Ahara Seeker - faceted queries over in-memory record collections.
//!
//! The food database and patient registry views of the clinic app both
//! browse a collection that is already resident in memory. Seeker gives
//! them one engine for it:
//!
//! - Free-text search over a configurable set of fields (case-insensitive)
//! - Categorical facets with an `all` sentinel
//! - Inclusive numeric ranges
//! - Stable, locale-aware sorting in either direction
//! - Pagination that still reports the full match count
//! - Facet counts for tab badges
//! - A bounded selection for side-by-side comparison
//!
//! # Quick Start
//!
//! ```rust
//! use ahara_seeker::{count_by, Query, QueryEngine, Record, SelectionSet};
//!
//! let foods = vec![
//!     Record::new("f1").with("name", "Basmati Rice").with("category", "Grains").with("calories", 130),
//!     Record::new("f2").with("name", "Ghee").with("category", "Dairy").with("calories", 900),
//!     Record::new("f3").with("name", "Brown Rice").with("category", "Grains").with("calories", 111),
//! ];
//!
//! let engine = QueryEngine::new(["name", "category"]);
//! let query = Query::new()
//!     .term("rice")
//!     .range("calories", 0.0, 500.0)
//!     .order_asc("calories")
//!     .page(0, 10);
//!
//! let result = engine.evaluate(&foods, &query).unwrap();
//! assert_eq!(result.total_matched, 2);
//! assert_eq!(result.items[0].id, "f3");
//!
//! let tabs = count_by(&foods, "category");
//! assert_eq!(tabs.get("Grains"), 2);
//!
//! let mut compare = SelectionSet::new();
//! compare.toggle("f1");
//! assert!(compare.contains("f1"));
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = (term is empty OR some searchable field contains it)
//!       ∧ (every non-`all` facet equals the record's field)
//!       ∧ (every range contains the record's number, absent = 0)
//! ```
//!
//! Absent fields are never errors: they read as `""`, `0`, `false` or an
//! empty list. The only failure is a zero page size
//! ([`QueryError::InvalidQuery`]).

mod domain;
mod engine;
mod error;
mod facets;
mod filter;
mod ordering;
mod query;
mod record;
mod selection;
mod traits;
mod value;

// Re-export public API
pub use domain::{
    food_engine, patient_engine, Dosha, FOOD_SEARCH_FIELDS, NEGATIVE_IMPACT,
    PATIENT_SEARCH_FIELDS,
};
pub use engine::{QueryEngine, QueryResult};
pub use error::{QueryError, Result};
pub use facets::{count_by, FacetCounts};
pub use filter::{FacetChoice, FacetValue, RangeBounds, ALL};
pub use ordering::{compare_values, Dir, SortKey};
pub use query::{Page, Query, DEFAULT_PAGE_SIZE};
pub use record::{FieldValue, Record};
pub use selection::{SelectionSet, Toggle, COMPARE_CAPACITY};
pub use traits::Seekable;
pub use value::{format_number, Value};

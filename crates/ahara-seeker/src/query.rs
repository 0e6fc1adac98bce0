//! Query builder.
//!
//! A [`Query`] captures everything a browser view lets the user change: the
//! search box, select-box facets, min/max sliders, the sorted column and the
//! current page. Views rebuild it on every interaction and hand it to
//! [`QueryEngine::evaluate`](crate::QueryEngine::evaluate).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::filter::{FacetChoice, RangeBounds};
use crate::ordering::{Dir, SortKey};

/// Page size used when a view does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based page number.
    pub index: usize,
    /// Items per page; must be at least 1.
    pub size: usize,
}

impl Page {
    /// Creates a page window.
    pub fn new(index: usize, size: usize) -> Self {
        Page { index, size }
    }

    /// Offset of the first item on this page, saturating on overflow.
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }

    /// Fails with [`QueryError::InvalidQuery`] when the size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(QueryError::InvalidQuery(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// A query for filtering, sorting and paging a collection.
///
/// A record passes when it matches the search term, every categorical
/// facet and every numeric range. Setting the same field twice replaces the
/// earlier constraint.
///
/// # Example
///
/// ```
/// use ahara_seeker::{Dir, Query};
///
/// let query = Query::new()
///     .term("rice")
///     .only("category", "Grains")
///     .only("season", "all")           // no constraint
///     .range("calories", 0.0, 500.0)
///     .order_by("calories", Dir::Desc)
///     .page(0, 20);
///
/// assert_eq!(query.get_term(), "rice");
/// assert_eq!(query.active_filter_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    term: String,
    categorical: BTreeMap<String, FacetChoice>,
    ranges: BTreeMap<String, RangeBounds>,
    sort: Option<SortKey>,
    page: Page,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items and returns the first page.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Sets the free-text search term. An empty term matches everything.
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Sets a categorical facet. Passing `"all"` clears the constraint.
    pub fn only(mut self, field: impl Into<String>, choice: impl Into<FacetChoice>) -> Self {
        self.categorical.insert(field.into(), choice.into());
        self
    }

    /// Sets an inclusive numeric range on a field.
    pub fn range(self, field: impl Into<String>, min: f64, max: f64) -> Self {
        self.within(field, RangeBounds::new(min, max))
    }

    /// Sets a numeric range from prebuilt bounds.
    pub fn within(mut self, field: impl Into<String>, bounds: RangeBounds) -> Self {
        self.ranges.insert(field.into(), bounds);
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts by a field in the given direction.
    pub fn order_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.sort = Some(SortKey::new(field, dir));
        self
    }

    /// Sorts ascending by a field.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by a field.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Keeps input order.
    pub fn unordered(mut self) -> Self {
        self.sort = None;
        self
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Selects the zero-based page `index` of `size` items.
    pub fn page(mut self, index: usize, size: usize) -> Self {
        self.page = Page::new(index, size);
        self
    }

    /// Selects a page from a prebuilt window.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search term.
    pub fn get_term(&self) -> &str {
        &self.term
    }

    /// Returns the categorical facets, including `all` entries.
    pub fn categorical(&self) -> &BTreeMap<String, FacetChoice> {
        &self.categorical
    }

    /// Returns the numeric ranges.
    pub fn ranges(&self) -> &BTreeMap<String, RangeBounds> {
        &self.ranges
    }

    /// Returns the sort key, if any.
    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Returns the page window.
    pub fn get_page(&self) -> Page {
        self.page
    }

    /// Number of constraints a view would badge as "active filters".
    ///
    /// `all` facets do not count; the search term does not either.
    pub fn active_filter_count(&self) -> usize {
        self.categorical.values().filter(|c| !c.is_all()).count() + self.ranges.len()
    }

    /// Returns `true` if this query filters nothing.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.active_filter_count() == 0
    }
}

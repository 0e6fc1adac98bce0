//! Query evaluation.
//!
//! [`QueryEngine`] turns `(records, query)` into a [`QueryResult`]: filter,
//! stable sort, then slice out the requested page. It holds only the list
//! of searchable fields, so one engine per view is enough and evaluation is
//! a pure function of its inputs.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::ordering::{Dir, SortValue};
use crate::query::{Page, Query};
use crate::traits::Seekable;
use crate::value::Value;

/// One page of matching records plus the unpaginated match count.
#[derive(Debug, PartialEq, Serialize)]
pub struct QueryResult<'a, T> {
    /// Records on the requested page, in sorted order.
    pub items: Vec<&'a T>,
    /// Number of records that matched before pagination.
    pub total_matched: usize,
    /// The page window that was applied.
    pub page: Page,
}

impl<'a, T> QueryResult<'a, T> {
    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages needed to show every match.
    pub fn page_count(&self) -> usize {
        self.total_matched.div_ceil(self.page.size.max(1))
    }

    /// Returns `true` if a later page has items.
    pub fn has_next(&self) -> bool {
        self.page.index.saturating_add(1) < self.page_count()
    }

    /// Returns `true` if this is not the first page and earlier items exist.
    pub fn has_prev(&self) -> bool {
        self.page.index > 0 && self.total_matched > 0
    }

    /// One-based "11-20 of 42" label for a results footer.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return format!("0 of {}", self.total_matched);
        }
        let first = self.page.offset() + 1;
        let last = self.page.offset() + self.items.len();
        format!("{}-{} of {}", first, last, self.total_matched)
    }
}

/// Evaluates queries against in-memory collections.
///
/// # Example
///
/// ```
/// use ahara_seeker::{Query, QueryEngine, Record};
///
/// let foods = vec![
///     Record::new("f1").with("name", "Basmati Rice").with("calories", 130),
///     Record::new("f2").with("name", "Ghee").with("calories", 900),
///     Record::new("f3").with("name", "Brown Rice").with("calories", 110),
/// ];
///
/// let engine = QueryEngine::new(["name"]);
/// let query = Query::new().term("rice").order_asc("calories");
///
/// let result = engine.evaluate(&foods, &query).unwrap();
/// assert_eq!(result.total_matched, 2);
/// assert_eq!(result.items[0].id, "f3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEngine {
    search_fields: Vec<String>,
}

impl QueryEngine {
    /// Creates an engine that searches the given fields.
    ///
    /// With no searchable fields a non-empty term matches nothing.
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryEngine {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the searchable fields.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Tests a single record against the query's term, facets and ranges.
    pub fn matches<T: Seekable>(&self, record: &T, query: &Query) -> bool {
        self.matches_folded(record, query, &query.get_term().to_lowercase())
    }

    fn matches_folded<T: Seekable>(&self, record: &T, query: &Query, needle: &str) -> bool {
        let term_pass = needle.is_empty()
            || self
                .search_fields
                .iter()
                .any(|field| record.seeker_field_value(field).contains_folded(needle));
        if !term_pass {
            return false;
        }

        let facet_pass = query
            .categorical()
            .iter()
            .all(|(field, choice)| choice.matches(&record.seeker_field_value(field)));
        if !facet_pass {
            return false;
        }

        query
            .ranges()
            .iter()
            .all(|(field, bounds)| bounds.matches(&record.seeker_field_value(field)))
    }

    /// Returns every matching record, sorted, without pagination.
    ///
    /// Views use this to compute facet counts over the filtered set. The
    /// page window is ignored and not validated.
    pub fn matching<'a, T: Seekable>(&self, records: &'a [T], query: &Query) -> Vec<&'a T> {
        let needle = query.get_term().to_lowercase();
        let results: Vec<&'a T> = records
            .iter()
            .filter(|record| self.matches_folded(*record, query, &needle))
            .collect();

        match query.sort() {
            Some(key) => sort_stable(results, &key.field, key.dir),
            None => results,
        }
    }

    /// Counts matching records.
    pub fn count<T: Seekable>(&self, records: &[T], query: &Query) -> usize {
        let needle = query.get_term().to_lowercase();
        records
            .iter()
            .filter(|record| self.matches_folded(*record, query, &needle))
            .count()
    }

    /// Filters, sorts and paginates `records`.
    ///
    /// Fails with [`QueryError::InvalidQuery`](crate::QueryError::InvalidQuery)
    /// when the page size is zero. A page past the end yields no items but
    /// still reports the full match count.
    pub fn evaluate<'a, T: Seekable>(
        &self,
        records: &'a [T],
        query: &Query,
    ) -> Result<QueryResult<'a, T>> {
        let page = query.get_page();
        page.validate()?;

        let matched = self.matching(records, query);
        let total_matched = matched.len();

        let items: Vec<&'a T> = matched
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();

        debug!(
            records = records.len(),
            total_matched,
            page = page.index,
            page_size = page.size,
            returned = items.len(),
            "evaluated query"
        );

        Ok(QueryResult {
            items,
            total_matched,
            page,
        })
    }
}

/// Stable sort on one field. The direction reverses the comparator, never
/// the sorted sequence, so ties keep their input order.
fn sort_stable<'a, T: Seekable>(records: Vec<&'a T>, field: &str, dir: Dir) -> Vec<&'a T> {
    // Absent fields borrow their neutral value from the first present one.
    let kind = records
        .iter()
        .copied()
        .map(|record| record.seeker_field_value(field))
        .find(|value| !value.is_none())
        .unwrap_or(Value::None);

    let mut keyed: Vec<(SortValue, &'a T)> = records
        .into_iter()
        .map(|record| (SortValue::of(&record.seeker_field_value(field), &kind), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| dir.apply(a.compare(b)));
    keyed.into_iter().map(|(_, record)| record).collect()
}

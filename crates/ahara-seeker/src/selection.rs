//! Bounded selection for "compare" workflows.
//!
//! Comparison panels show at most [`COMPARE_CAPACITY`] foods or patients
//! side by side. Once the set is full, further checkboxes are rendered
//! disabled rather than rejected with an error.

use tracing::trace;

use crate::traits::Seekable;

/// Number of records a comparison panel holds.
pub const COMPARE_CAPACITY: usize = 3;

/// Outcome of [`SelectionSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The id was added.
    Added,
    /// The id was already selected and has been removed.
    Removed,
    /// The set was full; nothing changed.
    Ignored,
}

/// Order-preserving set of record ids with a fixed capacity.
///
/// # Example
///
/// ```
/// use ahara_seeker::{SelectionSet, Toggle};
///
/// let mut compare = SelectionSet::new();
/// compare.toggle("rice");
/// compare.toggle("ghee");
/// compare.toggle("dal");
///
/// assert_eq!(compare.toggle("oats"), Toggle::Ignored);
/// assert_eq!(compare.toggle("ghee"), Toggle::Removed);
/// assert_eq!(compare.iter().collect::<Vec<_>>(), ["rice", "dal"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<String>,
    capacity: usize,
}

impl SelectionSet {
    /// Creates an empty selection with the default compare capacity.
    pub fn new() -> Self {
        SelectionSet::with_capacity(COMPARE_CAPACITY)
    }

    /// Creates an empty selection holding at most `capacity` ids.
    pub fn with_capacity(capacity: usize) -> Self {
        SelectionSet {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds `id` if absent and there is room, removes it if present.
    ///
    /// Removal always succeeds. Adding to a full set is a no-op.
    pub fn toggle(&mut self, id: impl AsRef<str>) -> Toggle {
        let id = id.as_ref();
        if let Some(pos) = self.members.iter().position(|m| m == id) {
            self.members.remove(pos);
            return Toggle::Removed;
        }
        if self.is_full() {
            trace!(id, capacity = self.capacity, "selection full, toggle ignored");
            return Toggle::Ignored;
        }
        self.members.push(id.to_string());
        Toggle::Added
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    /// Returns `true` if toggling `id` would add it.
    ///
    /// Views use this to disable the checkbox of unselected rows once the
    /// set is full.
    pub fn can_add(&self, id: &str) -> bool {
        !self.contains(id) && !self.is_full()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if no more ids can be added.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Maximum number of ids; fixed for the lifetime of the set.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates selected ids in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Looks up the selected records in selection order.
    ///
    /// Ids no longer present in `records` are skipped.
    pub fn resolve<'a, T: Seekable>(&self, records: &'a [T]) -> Vec<&'a T> {
        self.members
            .iter()
            .filter_map(|id| records.iter().find(|r| r.record_id() == id.as_str()))
            .collect()
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        SelectionSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn toggles_add_then_remove() {
        let mut set = SelectionSet::new();
        assert_eq!(set.toggle("a"), Toggle::Added);
        assert!(set.contains("a"));
        assert_eq!(set.toggle("a"), Toggle::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn fourth_add_is_ignored() {
        let mut set = SelectionSet::new();
        for id in ["a", "b", "c"] {
            assert_eq!(set.toggle(id), Toggle::Added);
        }
        assert!(set.is_full());
        assert_eq!(set.toggle("d"), Toggle::Ignored);
        assert_eq!(set.len(), 3);
        assert!(!set.contains("d"));
        assert!(!set.can_add("d"));
    }

    #[test]
    fn removal_works_when_full() {
        let mut set = SelectionSet::new();
        for id in ["a", "b", "c"] {
            set.toggle(id);
        }
        assert_eq!(set.toggle("b"), Toggle::Removed);
        assert!(set.can_add("d"));
        assert_eq!(set.toggle("d"), Toggle::Added);
        assert_eq!(set.iter().collect::<Vec<_>>(), ["a", "c", "d"]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut set = SelectionSet::with_capacity(2);
        set.toggle("a");
        set.toggle("b");
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 2);
    }

    #[test]
    fn zero_capacity_never_adds() {
        let mut set = SelectionSet::with_capacity(0);
        assert_eq!(set.toggle("a"), Toggle::Ignored);
        assert!(set.is_empty());
    }

    #[test]
    fn resolve_follows_selection_order() {
        let foods = vec![
            Record::new("f1").with("name", "Rice"),
            Record::new("f2").with("name", "Ghee"),
            Record::new("f3").with("name", "Dal"),
        ];
        let mut set = SelectionSet::new();
        set.toggle("f3");
        set.toggle("gone");
        set.toggle("f1");

        let picked: Vec<&str> = set
            .resolve(&foods)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(picked, ["f3", "f1"]);
    }
}

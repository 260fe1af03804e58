// crates/adminbound-core/src/store.rs
use crate::model::GeometryFragment;
use std::collections::btree_map::{self, BTreeMap};

/// Fragments discovered so far, grouped by administrative code.
///
/// Keys iterate in code order; fragments under one key stay in discovery order.
#[derive(Debug, Clone, Default)]
pub struct FragmentStore {
    by_code: BTreeMap<String, Vec<GeometryFragment>>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a fragment under its own code.
    pub fn push(&mut self, fragment: GeometryFragment) {
        self.by_code
            .entry(fragment.code.clone())
            .or_default()
            .push(fragment);
    }

    pub fn remove(&mut self, code: &str) -> Option<Vec<GeometryFragment>> {
        self.by_code.remove(code)
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Total number of fragments across all codes.
    pub fn fragment_count(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.by_code.keys().map(String::as_str)
    }

    /// Moves every fragment of `other` into `self`.
    ///
    /// Fragments of a code present in both stores are appended after the
    /// existing ones.
    pub fn absorb(&mut self, other: FragmentStore) {
        for (code, mut fragments) in other.by_code {
            self.by_code.entry(code).or_default().append(&mut fragments);
        }
    }
}

impl IntoIterator for FragmentStore {
    type Item = (String, Vec<GeometryFragment>);
    type IntoIter = btree_map::IntoIter<String, Vec<GeometryFragment>>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_code.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(code: &str, tag: i64) -> GeometryFragment {
        GeometryFragment::new(code, None).with_property("tag", tag)
    }

    fn tags(store: FragmentStore, code: &str) -> Vec<i64> {
        store
            .into_iter()
            .filter(|(c, _)| c == code)
            .flat_map(|(_, frags)| frags)
            .map(|f| f.properties["tag"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn groups_by_code_in_discovery_order() {
        let mut store = FragmentStore::new();
        store.push(frag("420802", 1));
        store.push(frag("420801", 2));
        store.push(frag("420802", 3));

        assert_eq!(store.len(), 2);
        assert_eq!(store.fragment_count(), 3);
        assert_eq!(store.codes().collect::<Vec<_>>(), vec!["420801", "420802"]);
        assert_eq!(tags(store, "420802"), vec![1, 3]);
    }

    #[test]
    fn absorb_appends() {
        let mut a = FragmentStore::new();
        a.push(frag("420802", 1));
        let mut b = FragmentStore::new();
        b.push(frag("420802", 2));
        b.push(frag("110101", 3));

        a.absorb(b);
        assert_eq!(a.len(), 2);
        assert_eq!(tags(a, "420802"), vec![1, 2]);
    }
}

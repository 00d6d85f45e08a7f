use std::collections::BTreeSet;
use std::rc::Rc;

use crate::table::ConsumerTable;

/// Distinct identifier values, sorted lexicographically ascending.
/// Infallible: the table validated its key column at construction.
pub fn list_identifiers(table: &ConsumerTable) -> Vec<String> {
    let set: BTreeSet<&str> = table.key_values().collect();
    set.into_iter().map(|s| s.to_string()).collect()
}

/// Identifiers starting with `prefix`, in sorted order. An empty prefix
/// matches everything.
pub fn suggest<'a>(ids: &'a [String], prefix: &str) -> Vec<&'a str> {
    ids.iter()
        .filter(|id| id.starts_with(prefix))
        .map(|id| id.as_str())
        .collect()
}

/// Memoizes the identifier list per table content. No time bound: the entry
/// is only replaced when a table with a different fingerprint shows up.
#[derive(Default)]
pub struct IdentifierCache {
    entry: Option<(String, Rc<Vec<String>>)>,
}

impl IdentifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, table: &ConsumerTable) -> Rc<Vec<String>> {
        if let Some((fingerprint, ids)) = &self.entry {
            if fingerprint == table.fingerprint() {
                return Rc::clone(ids);
            }
        }
        let ids = Rc::new(list_identifiers(table));
        self.entry = Some((table.fingerprint().to_string(), Rc::clone(&ids)));
        ids
    }
}

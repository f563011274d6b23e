use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};

/// Tracks which gates have a request outstanding.
///
/// This is the server-side loading flag: while a guard for a key is alive,
/// a second `try_begin` for the same key is refused.
#[derive(Debug, Default, Clone)]
pub struct InFlightRegistry {
    in_flight: Arc<DashMap<String, ()>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, key: &str) -> Option<InFlightGuard> {
        match self.in_flight.entry(key.to_owned()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => {
                entry.insert(());
                Some(InFlightGuard {
                    in_flight: self.in_flight.clone(),
                    key: key.to_owned(),
                })
            }
        }
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }
}

/// Clears the loading flag for its key when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The flat named-parameter store backing the cached accessor.
//!
//! Nothing here knows about Jones matrices: the store is a plain mapping
//! from canonical parameter names to single complex values. The accessors
//! treat absence of a name as "not yet calibrated", so the store never
//! invents entries on lookup.


use indexmap::IndexMap;
use marlu::c64;

/// Unique string keys, one complex value each. Enumeration order is
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ParamCache {
    params: IndexMap<String, c64>,
}

impl ParamCache {
    pub fn new() -> ParamCache {
        ParamCache {
            params: IndexMap::new(),
        }
    }

    /// Is there a value stored under this name?
    pub fn has(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<c64> {
        self.params.get(name).copied()
    }

    /// Store a value. Setting an existing name simply replaces the value.
    pub fn set(&mut self, name: &str, value: c64) {
        self.params.insert(name.to_string(), value);
    }

    /// Delete an entry, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<c64> {
        self.params.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(|n| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, c64)> {
        self.params.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The persistence adapter: an opaque string store holding the whole
//! library as one JSON value.

use std::collections::HashMap;

use crate::error::Fallible;
use crate::types::saved_set::SavedSet;

/// The key under which the serialized library is stored.
pub const LIBRARY_KEY: &str = "flashlingo_saved_lists";

/// A string-keyed get/set store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Fallible<()>;
}

/// Load the library from the store.
///
/// This never fails: a missing value, a read error, and a value that does
/// not deserialize all produce an empty library. The latter two are logged.
pub fn load_library(store: &impl KeyValueStore) -> Vec<SavedSet> {
    let data = match store.get(LIBRARY_KEY) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read saved lists: {e}");
            return Vec::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(sets) => sets,
        Err(e) => {
            log::warn!("Discarding unreadable saved lists: {e}");
            Vec::new()
        }
    }
}

/// Serialize the full library and write it to the store.
pub fn save_library(store: &mut impl KeyValueStore, sets: &[SavedSet]) -> Fallible<()> {
    let data = serde_json::to_string(sets)?;
    store.set(LIBRARY_KEY, &data)
}

/// An in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

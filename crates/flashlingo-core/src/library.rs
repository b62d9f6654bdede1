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

//! The library of saved sets, which doubles as the generation cache.

use std::cmp::Reverse;

use crate::store::KeyValueStore;
use crate::store::load_library;
use crate::store::save_library;
use crate::types::saved_set::CategoryKey;
use crate::types::saved_set::SavedSet;
use crate::types::timestamp::Timestamp;

/// All saved sets, most recently used first, backed by a store.
///
/// Every mutation writes the whole library through to the store before
/// returning. Write failures are logged and otherwise ignored: the in-memory
/// copy stays authoritative for the rest of the process.
pub struct Library<S: KeyValueStore> {
    store: S,
    sets: Vec<SavedSet>,
}

impl<S: KeyValueStore> Library<S> {
    /// Load the library from the store. Unreadable data yields an empty
    /// library.
    pub fn open(store: S) -> Self {
        let sets = load_library(&store);
        log::debug!("Loaded {} saved sets", sets.len());
        Self { store, sets }
    }

    pub fn sets(&self) -> &[SavedSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find the set generated from this exact input. The category is
    /// compared case-insensitively, the word list byte for byte.
    pub fn lookup(&self, category: &str, raw_words: &str) -> Option<&SavedSet> {
        let key = CategoryKey::new(category);
        self.sets.iter().find(|set| set.matches(&key, raw_words))
    }

    /// Find a set by its stored category, exactly.
    pub fn get(&self, category: &str) -> Option<&SavedSet> {
        self.sets.iter().find(|set| set.category() == category)
    }

    /// Mark the set with exactly this category as used now and move it to
    /// the front.
    pub fn touch(&mut self, category: &str, now: Timestamp) {
        let Some(set) = self.sets.iter_mut().find(|set| set.category() == category) else {
            return;
        };
        set.set_last_used_at(now);
        self.sets.sort_by_key(|set| Reverse(set.last_used_at()));
        self.persist();
    }

    /// Insert a set at the front, replacing any set with the same category
    /// (ignoring case).
    pub fn upsert(&mut self, set: SavedSet) {
        let key = set.key();
        self.sets.retain(|other| other.key() != key);
        self.sets.insert(0, set);
        self.persist();
    }

    /// Delete the set with exactly this category. Returns whether a set
    /// was deleted; deleting a missing set changes nothing.
    pub fn remove(&mut self, category: &str) -> bool {
        let before = self.sets.len();
        self.sets.retain(|set| set.category() != category);
        if self.sets.len() == before {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&mut self) {
        if let Err(e) = save_library(&mut self.store, &self.sets) {
            log::warn!("Failed to save lists: {e}");
        }
    }
}

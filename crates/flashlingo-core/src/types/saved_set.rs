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

use serde::Deserialize;
use serde::Serialize;

use crate::types::flashcard::Flashcard;
use crate::types::settings::Settings;
use crate::types::timestamp::Timestamp;

/// The case-insensitive identity of a category. `Animals` and `animals`
/// have the same key; the stored category keeps whatever casing was typed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(category: &str) -> Self {
        Self(category.to_lowercase())
    }
}

/// A generated set of cards, as stored in the library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSet {
    category: String,
    #[serde(rename = "customWords")]
    raw_words: String,
    cards: Vec<Flashcard>,
    #[serde(rename = "lastUsed")]
    last_used_at: Timestamp,
}

impl SavedSet {
    pub fn new(settings: &Settings, cards: Vec<Flashcard>, now: Timestamp) -> Self {
        Self {
            category: settings.category().to_string(),
            raw_words: settings.raw_words().to_string(),
            cards,
            last_used_at: now,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey::new(&self.category)
    }

    pub fn raw_words(&self) -> &str {
        &self.raw_words
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn last_used_at(&self) -> Timestamp {
        self.last_used_at
    }

    pub(crate) fn set_last_used_at(&mut self, now: Timestamp) {
        self.last_used_at = now;
    }

    /// Whether this set was generated from the given input. Any difference
    /// in the word list, even whitespace, is a mismatch.
    pub fn matches(&self, key: &CategoryKey, raw_words: &str) -> bool {
        &self.key() == key && self.raw_words == raw_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn animals() -> Fallible<SavedSet> {
        let settings = Settings::new("Animals", "cat, dog")?;
        let cards = vec![Flashcard::new(
            "kissa",
            "cat",
            "KIS-sah",
            "Kissa nukkuu.",
            "The cat is sleeping.",
        )];
        Ok(SavedSet::new(&settings, cards, Timestamp::from_millis(1000)))
    }

    #[test]
    fn test_category_key_ignores_case() {
        assert_eq!(CategoryKey::new("Animals"), CategoryKey::new("aNiMaLs"));
        assert_ne!(CategoryKey::new("Animals"), CategoryKey::new("Animal"));
    }

    #[test]
    fn test_matches() -> Fallible<()> {
        let set = animals()?;
        assert!(set.matches(&CategoryKey::new("ANIMALS"), "cat, dog"));
        assert!(!set.matches(&CategoryKey::new("Animals"), "cat,dog"));
        assert!(!set.matches(&CategoryKey::new("Animals"), "Cat, dog"));
        assert!(!set.matches(&CategoryKey::new("Pets"), "cat, dog"));
        Ok(())
    }

    #[test]
    fn test_serialized_keys() -> Fallible<()> {
        let json = serde_json::to_value(animals()?)?;
        assert_eq!(json["category"], "Animals");
        assert_eq!(json["customWords"], "cat, dog");
        assert_eq!(json["lastUsed"], 1000);
        assert_eq!(json["cards"][0]["targetWord"], "kissa");
        Ok(())
    }

    #[test]
    fn test_deserialize_stored_record() -> Fallible<()> {
        let json = r#"{
            "category": "Animals",
            "customWords": "cat, dog",
            "cards": [{
                "targetWord": "kissa",
                "translation": "cat",
                "pronunciation": "KIS-sah",
                "exampleSentence": "Kissa nukkuu.",
                "exampleTranslation": "The cat is sleeping."
            }],
            "lastUsed": 1000
        }"#;
        let set: SavedSet = serde_json::from_str(json)?;
        assert_eq!(set, animals()?);
        Ok(())
    }
}

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

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;

/// What the learner typed into the setup form. Both fields are trimmed and
/// non-empty; there is no other way to build one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    category: String,
    #[serde(rename = "customWords")]
    raw_words: String,
}

impl Settings {
    pub fn new(category: &str, raw_words: &str) -> Fallible<Self> {
        let category = category.trim();
        let raw_words = raw_words.trim();
        if category.is_empty() {
            return fail("category is empty.");
        }
        if raw_words.is_empty() {
            return fail("word list is empty.");
        }
        Ok(Self {
            category: category.to_string(),
            raw_words: raw_words.to_string(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The word list exactly as typed (after trimming), e.g. `cat, dog`.
    pub fn raw_words(&self) -> &str {
        &self.raw_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorReport;

    #[test]
    fn test_trims_input() -> Fallible<()> {
        let settings = Settings::new("  Animals ", "\ncat, dog\n")?;
        assert_eq!(settings.category(), "Animals");
        assert_eq!(settings.raw_words(), "cat, dog");
        Ok(())
    }

    #[test]
    fn test_keeps_inner_text_verbatim() -> Fallible<()> {
        let settings = Settings::new("Kitchen", "Pot,\n  Pan")?;
        assert_eq!(settings.raw_words(), "Pot,\n  Pan");
        Ok(())
    }

    #[test]
    fn test_rejects_empty_category() {
        assert_eq!(
            Settings::new("   ", "cat"),
            Err(ErrorReport::new("category is empty."))
        );
    }

    #[test]
    fn test_rejects_empty_words() {
        assert_eq!(
            Settings::new("Animals", " \n "),
            Err(ErrorReport::new("word list is empty."))
        );
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let settings = Settings::new("Animals", "cat")?;
        let json = serde_json::to_string(&settings)?;
        assert_eq!(json, r#"{"category":"Animals","customWords":"cat"}"#);
        Ok(())
    }
}

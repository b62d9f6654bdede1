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

/// One vocabulary unit: a word in the language being learned, its meaning in
/// the learner's language, and an example sentence pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// The word in the target language. This is what the test asks for.
    target_word: String,
    /// The word in the learner's native language.
    translation: String,
    /// A phonetic pronunciation guide for the target word.
    pronunciation: String,
    /// An example sentence in the target language.
    example_sentence: String,
    /// The example sentence in the learner's native language.
    example_translation: String,
}

impl Flashcard {
    pub fn new(
        target_word: impl Into<String>,
        translation: impl Into<String>,
        pronunciation: impl Into<String>,
        example_sentence: impl Into<String>,
        example_translation: impl Into<String>,
    ) -> Self {
        Self {
            target_word: target_word.into(),
            translation: translation.into(),
            pronunciation: pronunciation.into(),
            example_sentence: example_sentence.into(),
            example_translation: example_translation.into(),
        }
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }

    pub fn example_sentence(&self) -> &str {
        &self.example_sentence
    }

    pub fn example_translation(&self) -> &str {
        &self.example_translation
    }

    /// Names of the fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("targetWord", &self.target_word),
            ("translation", &self.translation),
            ("pronunciation", &self.pronunciation),
            ("exampleSentence", &self.example_sentence),
            ("exampleTranslation", &self.example_translation),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether the answer matches the target word, ignoring case and
    /// surrounding whitespace.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.target_word.trim().to_lowercase()
    }
}

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

//! The contract with the vocabulary generator.
//!
//! The generator itself is remote: hosts own the transport. This module
//! owns what is sent (the prompt and the response schema) and how the reply
//! is turned into cards.

use serde_json::Value;
use serde_json::json;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::flashcard::Flashcard;
use crate::types::settings::Settings;

/// The language being learned and the learner's own language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Languages {
    pub target: String,
    pub native: String,
}

impl Default for Languages {
    fn default() -> Self {
        Self {
            target: "Finnish".to_string(),
            native: "English".to_string(),
        }
    }
}

/// An outstanding request to generate cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Identifies the request. Completions are matched against it.
    pub ticket: u64,
    pub settings: Settings,
    pub languages: Languages,
}

impl GenerationRequest {
    pub fn prompt(&self) -> String {
        let target = &self.languages.target;
        let native = &self.languages.native;
        let category = self.settings.category();
        let raw_words = self.settings.raw_words();
        format!(
            "The user wants to learn {target} vocabulary.
Category: \"{category}\".
User's raw word list: \"{raw_words}\".

Task:
1. Analyze the \"User's raw word list\". It may contain words in {native}, {target}, or both.
2. For each distinct item/concept in the list, generate a flashcard.
3. If the input is {native}, translate it to {target} (this is the 'targetWord').
4. If the input is {target}, keep it as 'targetWord' and provide the {native} meaning ('translation').

For each card, provide:
1. The word/phrase in {target} (targetWord). Ensure this is the dictionary form (nominative).
2. The translation in {native} (translation).
3. A simple pronunciation guide (phonetic) for the {target} word.
4. A short example sentence using the word in {target}.
5. The translation of that example sentence in {native}.
"
        )
    }

    /// The JSON schema the reply must follow: an array of card objects with
    /// all five fields required.
    pub fn response_schema(&self) -> Value {
        let target = &self.languages.target;
        let native = &self.languages.native;
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "targetWord": {
                        "type": "STRING",
                        "description": format!("The word in {target}"),
                    },
                    "translation": {
                        "type": "STRING",
                        "description": format!("The translation in {native}"),
                    },
                    "pronunciation": {
                        "type": "STRING",
                        "description": "Phonetic pronunciation guide",
                    },
                    "exampleSentence": {
                        "type": "STRING",
                        "description": format!("Example sentence in {target}"),
                    },
                    "exampleTranslation": {
                        "type": "STRING",
                        "description": format!("Translation of the example sentence in {native}"),
                    },
                },
                "required": [
                    "targetWord",
                    "translation",
                    "pronunciation",
                    "exampleSentence",
                    "exampleTranslation",
                ],
            },
        })
    }
}

/// Parse the generator's reply into cards, preserving order.
///
/// An empty array parses to an empty list; deciding that this is a failure
/// is up to the caller. A card with a blank field is an error.
pub fn parse_cards(text: &str) -> Fallible<Vec<Flashcard>> {
    let cards: Vec<Flashcard> = serde_json::from_str(text)
        .map_err(|e| ErrorReport::new(format!("Failed to parse vocabulary data: {e}")))?;
    for (i, card) in cards.iter().enumerate() {
        let blank = card.blank_fields();
        if !blank.is_empty() {
            return fail(format!(
                "card {} has blank fields: {}.",
                i + 1,
                blank.join(", ")
            ));
        }
    }
    Ok(cards)
}

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

use std::env;
use std::fs::read_to_string;
use std::path::Path;

use flashlingo_core::generator::Languages;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::OrReport;

/// Name of the optional configuration file in the data directory.
pub const CONFIG_FILE: &str = "flashlingo.toml";

/// Environment variables holding the Gemini API key, in priority order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Settings read from `flashlingo.toml`. Every field is optional.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The Gemini model used to generate cards.
    pub model: String,
    pub target_language: String,
    pub native_language: String,
    /// Characters offered as one-click insertions when typing answers.
    pub special_characters: Vec<char>,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let languages = Languages::default();
        Self {
            model: "gemini-2.5-flash".to_string(),
            target_language: languages.target,
            native_language: languages.native,
            special_characters: vec!['ä', 'ö'],
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from the directory, falling back to the
    /// defaults if there is no config file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        toml::from_str(text).or_report(&format!("invalid {CONFIG_FILE}"))
    }

    pub fn languages(&self) -> Languages {
        Languages {
            target: self.target_language.clone(),
            native: self.native_language.clone(),
        }
    }
}

/// The Gemini API key from the environment, if set.
pub fn api_key() -> Option<String> {
    API_KEY_VARS
        .iter()
        .find_map(|var| env::var(var).ok())
        .filter(|key| !key.trim().is_empty())
}

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

//! flashlingo-core: Core library for the flashlingo vocabulary trainer.
//!
//! This library provides WASM-compatible types and logic for:
//! - The library of saved sets, which caches generated cards
//! - The study/test session state machine
//! - The persistence adapter contract and library serialization
//! - The prompt and response contract of the vocabulary generator

pub mod app;
pub mod error;
pub mod generator;
pub mod library;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use app::{App, GENERATION_FAILED_MESSAGE, Started};
pub use error::{ErrorReport, Fallible, fail};
pub use generator::{GenerationRequest, Languages, parse_cards};
pub use library::Library;
pub use session::{Feedback, Phase, Quiz, Study, Summary, Test};
pub use store::{KeyValueStore, LIBRARY_KEY, MemoryStore};
pub use types::flashcard::Flashcard;
pub use types::saved_set::{CategoryKey, SavedSet};
pub use types::settings::Settings;
pub use types::timestamp::Timestamp;

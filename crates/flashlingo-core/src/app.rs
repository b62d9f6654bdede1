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

//! The application controller: one owned aggregate holding the library,
//! the session phase, and the settings to pre-fill the setup form with.
//!
//! Hosts call one method per user event. Generation is split in two: `start`
//! hands back a request, and the host reports the outcome through
//! `finish_generation`.

use std::mem::take;

use crate::error::Fallible;
use crate::generator::GenerationRequest;
use crate::generator::Languages;
use crate::library::Library;
use crate::session::Feedback;
use crate::session::Phase;
use crate::session::Quiz;
use crate::session::Study;
use crate::store::KeyValueStore;
use crate::types::flashcard::Flashcard;
use crate::types::saved_set::SavedSet;
use crate::types::settings::Settings;
use crate::types::timestamp::Timestamp;

/// Shown when generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "We couldn't generate your cards right now. Please check your inputs or connection and try again.";

/// What `start` did.
#[derive(Debug, PartialEq)]
pub enum Started {
    /// The cards came from the library; the session is in study.
    Cached,
    /// The session is loading. The host must run the generator and call
    /// `finish_generation` with the request's ticket.
    Generate(GenerationRequest),
    /// Not in setup; nothing happened.
    Ignored,
}

pub struct App<S: KeyValueStore> {
    library: Library<S>,
    phase: Phase,
    /// The most recently submitted (or loaded) settings.
    settings: Option<Settings>,
    languages: Languages,
    next_ticket: u64,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(library: Library<S>, languages: Languages) -> Self {
        Self {
            library,
            phase: Phase::Setup,
            settings: None,
            languages,
            next_ticket: 1,
        }
    }

    pub fn library(&self) -> &Library<S> {
        &self.library
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Submit the setup form.
    pub fn start(&mut self, settings: Settings, now: Timestamp) -> Started {
        if self.phase != Phase::Setup {
            log::debug!("Ignoring start outside of setup");
            return Started::Ignored;
        }
        self.settings = Some(settings.clone());
        let cached: Option<(String, Vec<Flashcard>)> = self
            .library
            .lookup(settings.category(), settings.raw_words())
            .filter(|set| !set.cards().is_empty())
            .map(|set| (set.category().to_string(), set.cards().to_vec()));
        if let Some((category, cards)) = cached {
            log::debug!("Cache hit for '{category}'");
            self.phase = Phase::Quiz(Quiz::Study(Study::new(cards)));
            self.library.touch(&category, now);
            return Started::Cached;
        }
        log::debug!("Cache miss for '{}'", settings.category());
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::Loading {
            ticket,
            settings: settings.clone(),
        };
        Started::Generate(GenerationRequest {
            ticket,
            settings,
            languages: self.languages.clone(),
        })
    }

    /// Report the outcome of a generation request.
    ///
    /// A result for anything but the outstanding request is dropped.
    pub fn finish_generation(
        &mut self,
        ticket: u64,
        result: Fallible<Vec<Flashcard>>,
        now: Timestamp,
    ) {
        let settings = match &self.phase {
            Phase::Loading {
                ticket: current,
                settings,
            } if *current == ticket => settings.clone(),
            _ => {
                log::warn!("Dropping stale generation result (ticket {ticket})");
                return;
            }
        };
        match result {
            Ok(cards) if !cards.is_empty() => {
                log::info!(
                    "Generated {} cards for '{}'",
                    cards.len(),
                    settings.category()
                );
                self.library
                    .upsert(SavedSet::new(&settings, cards.clone(), now));
                self.phase = Phase::Quiz(Quiz::Study(Study::new(cards)));
            }
            Ok(_) => {
                log::error!("No cards were generated for '{}'", settings.category());
                self.fail_generation();
            }
            Err(e) => {
                log::error!("Generation failed for '{}': {e}", settings.category());
                self.fail_generation();
            }
        }
    }

    fn fail_generation(&mut self) {
        self.phase = Phase::Error {
            message: GENERATION_FAILED_MESSAGE.to_string(),
        };
    }

    pub fn flip(&mut self) {
        self.phase.flip();
    }

    pub fn next(&mut self) {
        self.phase = take(&mut self.phase).next();
    }

    pub fn prev(&mut self) {
        self.phase.prev();
    }

    pub fn start_test(&mut self) {
        self.phase = take(&mut self.phase).start_test();
    }

    pub fn set_answer(&mut self, answer: &str) -> bool {
        self.phase.set_answer(answer)
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        self.phase.insert_char(c)
    }

    pub fn check_answer(&mut self) -> Option<Feedback> {
        self.phase.check_answer()
    }

    pub fn advance(&mut self) {
        self.phase = take(&mut self.phase).advance();
    }

    /// Leave the quiz for the setup form, dropping the cards and score.
    pub fn exit(&mut self) {
        if self.phase.is_quiz() {
            self.phase = Phase::Setup;
        }
    }

    /// Go back to the setup form from the summary or an error.
    pub fn restart(&mut self) {
        if matches!(self.phase, Phase::Summary(_) | Phase::Error { .. }) {
            self.phase = Phase::Setup;
        }
    }

    /// Copy a saved set's input into the setup form.
    pub fn load_into_form(&mut self, category: &str) -> bool {
        if self.phase != Phase::Setup {
            return false;
        }
        let Some(set) = self.library.get(category) else {
            return false;
        };
        match Settings::new(set.category(), set.raw_words()) {
            Ok(settings) => {
                self.settings = Some(settings);
                true
            }
            Err(e) => {
                log::warn!("Saved set '{category}' cannot be loaded: {e}");
                false
            }
        }
    }

    /// Delete a saved set by its exact category.
    pub fn delete_set(&mut self, category: &str) -> bool {
        if self.phase != Phase::Setup {
            return false;
        }
        self.library.remove(category)
    }
}

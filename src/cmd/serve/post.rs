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

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use flashlingo_core::app::Started;
use flashlingo_core::generator::GenerationRequest;
use flashlingo_core::types::settings::Settings;
use flashlingo_core::types::timestamp::Timestamp;
use serde::Deserialize;
use tokio::spawn;

use crate::cmd::serve::state::ServerState;

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    category: Option<String>,
    words: Option<String>,
    answer: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Action {
    Start,
    Load,
    Delete,
    Flip,
    Next,
    Prev,
    StartTest,
    Check,
    Insert(char),
    Continue,
    Exit,
    Restart,
}

impl TryFrom<String> for Action {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(rest) = value.strip_prefix("Insert:") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Action::Insert(c)),
                _ => Err(format!("invalid insertion: '{rest}'")),
            };
        }
        match value.as_str() {
            "Start" => Ok(Action::Start),
            "Load" => Ok(Action::Load),
            "Delete" => Ok(Action::Delete),
            "Flip" => Ok(Action::Flip),
            "Next" => Ok(Action::Next),
            "Prev" => Ok(Action::Prev),
            "StartTest" => Ok(Action::StartTest),
            "Check" => Ok(Action::Check),
            "Continue" => Ok(Action::Continue),
            "Exit" => Ok(Action::Exit),
            "Restart" => Ok(Action::Restart),
            _ => Err(format!("unknown action: '{value}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Action::try_from(value).map_err(serde::de::Error::custom)
    }
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<FormData>) -> Redirect {
    let request = action_handler(&state, form);
    if let Some(request) = request {
        spawn_generation(state, request);
    }
    Redirect::to("/")
}

/// Apply the action. Returns a request if cards must be generated.
fn action_handler(state: &ServerState, form: FormData) -> Option<GenerationRequest> {
    let mut app = state.app.lock().unwrap();
    match form.action {
        Action::Start => {
            let category = form.category.unwrap_or_default();
            let words = form.words.unwrap_or_default();
            match Settings::new(&category, &words) {
                Ok(settings) => match app.start(settings, Timestamp::now()) {
                    Started::Generate(request) => return Some(request),
                    Started::Cached | Started::Ignored => {}
                },
                Err(e) => log::debug!("Ignoring start with invalid input: {e}"),
            }
        }
        Action::Load => {
            if let Some(category) = form.category {
                app.load_into_form(&category);
            }
        }
        Action::Delete => {
            if let Some(category) = form.category {
                app.delete_set(&category);
            }
        }
        Action::Flip => app.flip(),
        Action::Next => app.next(),
        Action::Prev => app.prev(),
        Action::StartTest => app.start_test(),
        Action::Check => {
            if let Some(answer) = form.answer {
                app.set_answer(&answer);
            }
            app.check_answer();
        }
        Action::Insert(c) => {
            if let Some(answer) = form.answer {
                app.set_answer(&answer);
            }
            app.insert_char(c);
        }
        Action::Continue => app.advance(),
        Action::Exit => app.exit(),
        Action::Restart => app.restart(),
    }
    None
}

/// Run the generator in the background. The lock is only held to report
/// the result.
fn spawn_generation(state: ServerState, request: GenerationRequest) {
    let generator = Arc::clone(&state.generator);
    spawn(async move {
        let result = generator.generate(&request).await;
        let mut app = state.app.lock().unwrap();
        app.finish_generation(request.ticket, result, Timestamp::now());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(Action::try_from("Start".to_string()), Ok(Action::Start));
        assert_eq!(Action::try_from("StartTest".to_string()), Ok(Action::StartTest));
        assert_eq!(Action::try_from("Insert:ä".to_string()), Ok(Action::Insert('ä')));
    }

    #[test]
    fn test_parse_invalid_actions() {
        assert!(Action::try_from("Shutdown".to_string()).is_err());
        assert!(Action::try_from("Insert:".to_string()).is_err());
        assert!(Action::try_from("Insert:ab".to_string()).is_err());
    }
}

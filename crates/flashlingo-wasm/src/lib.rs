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

//! WASM bindings for flashlingo - runs the vocabulary trainer in the browser.
//!
//! The page supplies the generator as a JavaScript function
//! `(prompt, schemaJson) => Promise<string>` and renders from `view()`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_futures::future_to_promise;

use flashlingo_core::app::App;
use flashlingo_core::app::Started;
use flashlingo_core::error::ErrorReport;
use flashlingo_core::error::Fallible;
use flashlingo_core::error::fail;
use flashlingo_core::generator::GenerationRequest;
use flashlingo_core::generator::Languages;
use flashlingo_core::generator::parse_cards;
use flashlingo_core::library::Library;
use flashlingo_core::session::Feedback;
use flashlingo_core::session::Phase;
use flashlingo_core::session::Quiz;
use flashlingo_core::types::flashcard::Flashcard;
use flashlingo_core::types::settings::Settings;
use flashlingo_core::types::timestamp::Timestamp;

mod logger;
mod storage;

use storage::Storage;

/// Characters offered as one-click insertions in the test answer field.
const SPECIAL_CHARACTERS: [char; 2] = ['ä', 'ö'];

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    log::info!("flashlingo WASM initialized");
}

/// The application state managed from JavaScript.
#[wasm_bindgen]
pub struct FlashlingoApp {
    /// Shared with the in-flight generation future, if any.
    inner: Rc<RefCell<App<Storage>>>,
    generator: Option<Function>,
}

#[wasm_bindgen]
impl FlashlingoApp {
    /// Create the app, loading saved lists from localStorage.
    #[wasm_bindgen(constructor)]
    pub fn new(target_language: Option<String>, native_language: Option<String>) -> Self {
        let defaults = Languages::default();
        let languages = Languages {
            target: target_language.unwrap_or(defaults.target),
            native: native_language.unwrap_or(defaults.native),
        };
        let library = Library::open(Storage::new());
        Self {
            inner: Rc::new(RefCell::new(App::new(library, languages))),
            generator: None,
        }
    }

    /// Register the generator function.
    #[wasm_bindgen]
    pub fn set_generator(&mut self, generator: Function) {
        self.generator = Some(generator);
    }

    /// Submit the setup form.
    ///
    /// Returns a promise that resolves to `true` if the cards came from the
    /// library, and to `false` once generation has finished (successfully or
    /// not) or if the app was not in setup. Rejects with the validation
    /// message when the category or word list is blank.
    #[wasm_bindgen]
    pub fn start(&self, category: &str, raw_words: &str) -> Promise {
        let settings = match Settings::new(category, raw_words) {
            Ok(settings) => settings,
            Err(e) => return Promise::reject(&to_js(e)),
        };
        let started = self.inner.borrow_mut().start(settings, now());
        let request = match started {
            Started::Cached => return Promise::resolve(&JsValue::TRUE),
            Started::Ignored => return Promise::resolve(&JsValue::FALSE),
            Started::Generate(request) => request,
        };
        let inner = Rc::clone(&self.inner);
        let generator = self.generator.clone();
        future_to_promise(async move {
            let result = generate(generator.as_ref(), &request).await;
            inner
                .borrow_mut()
                .finish_generation(request.ticket, result, now());
            Ok(JsValue::FALSE)
        })
    }

    #[wasm_bindgen]
    pub fn flip(&self) {
        self.inner.borrow_mut().flip();
    }

    #[wasm_bindgen]
    pub fn next(&self) {
        self.inner.borrow_mut().next();
    }

    #[wasm_bindgen]
    pub fn prev(&self) {
        self.inner.borrow_mut().prev();
    }

    #[wasm_bindgen]
    pub fn start_test(&self) {
        self.inner.borrow_mut().start_test();
    }

    /// Replace the typed answer. Returns false while the answer is locked.
    #[wasm_bindgen]
    pub fn set_answer(&self, answer: &str) -> bool {
        self.inner.borrow_mut().set_answer(answer)
    }

    #[wasm_bindgen]
    pub fn insert_char(&self, c: char) -> bool {
        self.inner.borrow_mut().insert_char(c)
    }

    /// Check the typed answer: "correct", "incorrect", or undefined when
    /// nothing was checked.
    #[wasm_bindgen]
    pub fn check_answer(&self) -> Option<String> {
        self.inner
            .borrow_mut()
            .check_answer()
            .map(|feedback| feedback_name(feedback).to_string())
    }

    #[wasm_bindgen]
    pub fn advance(&self) {
        self.inner.borrow_mut().advance();
    }

    #[wasm_bindgen]
    pub fn exit(&self) {
        self.inner.borrow_mut().exit();
    }

    #[wasm_bindgen]
    pub fn restart(&self) {
        self.inner.borrow_mut().restart();
    }

    #[wasm_bindgen]
    pub fn load_into_form(&self, category: &str) -> bool {
        self.inner.borrow_mut().load_into_form(category)
    }

    #[wasm_bindgen]
    pub fn delete_set(&self, category: &str) -> bool {
        self.inner.borrow_mut().delete_set(category)
    }

    /// The current screen as JSON, tagged by `phase`.
    #[wasm_bindgen]
    pub fn view(&self) -> Result<String, JsValue> {
        let app = self.inner.borrow();
        serde_json::to_string(&View::of(&app))
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize view: {}", e)))
    }

    /// The special characters as a JSON array of strings.
    #[wasm_bindgen]
    pub fn special_characters(&self) -> String {
        let chars: Vec<String> = SPECIAL_CHARACTERS.iter().map(|c| c.to_string()).collect();
        serde_json::to_string(&chars).unwrap_or_else(|_| "[]".to_string())
    }
}

async fn generate(
    generator: Option<&Function>,
    request: &GenerationRequest,
) -> Fallible<Vec<Flashcard>> {
    let Some(generator) = generator else {
        return fail("no generator registered.");
    };
    let prompt = JsValue::from(request.prompt());
    let schema = JsValue::from(request.response_schema().to_string());
    let value = generator
        .call2(&JsValue::NULL, &prompt, &schema)
        .map_err(js_error)?;
    let text = JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(js_error)?;
    match text.as_string() {
        Some(text) => parse_cards(&text),
        None => fail("generator did not return a string."),
    }
}

fn now() -> Timestamp {
    Timestamp::from_millis(js_sys::Date::now() as i64)
}

fn to_js(e: ErrorReport) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn js_error(e: JsValue) -> ErrorReport {
    ErrorReport::new(format!("generator error: {e:?}"))
}

fn feedback_name(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Correct => "correct",
        Feedback::Incorrect => "incorrect",
    }
}

#[derive(Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
enum View<'a> {
    Setup {
        settings: Option<&'a Settings>,
        library: Vec<LibraryEntry<'a>>,
    },
    Loading,
    #[serde(rename_all = "camelCase")]
    Study {
        card: &'a Flashcard,
        index: usize,
        total: usize,
        flipped: bool,
        progress: f64,
        is_first: bool,
        is_last: bool,
    },
    #[serde(rename_all = "camelCase")]
    Test {
        translation: &'a str,
        index: usize,
        total: usize,
        answer: &'a str,
        feedback: Option<&'static str>,
        /// Only revealed after an incorrect answer.
        correct_answer: Option<&'a str>,
        progress: f64,
    },
    Summary {
        score: usize,
        total: usize,
    },
    Error {
        message: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryEntry<'a> {
    category: &'a str,
    custom_words: &'a str,
    card_count: usize,
    last_used: String,
}

impl<'a> View<'a> {
    fn of(app: &'a App<Storage>) -> Self {
        match app.phase() {
            Phase::Setup => View::Setup {
                settings: app.settings(),
                library: app
                    .library()
                    .sets()
                    .iter()
                    .map(|set| LibraryEntry {
                        category: set.category(),
                        custom_words: set.raw_words(),
                        card_count: set.cards().len(),
                        last_used: set.last_used_at().short_date(),
                    })
                    .collect(),
            },
            Phase::Loading { .. } => View::Loading,
            Phase::Quiz(Quiz::Study(study)) => View::Study {
                card: study.current(),
                index: study.index(),
                total: study.total(),
                flipped: study.is_flipped(),
                progress: study.progress(),
                is_first: study.is_first(),
                is_last: study.is_last(),
            },
            Phase::Quiz(Quiz::Test(test)) => View::Test {
                translation: test.current().translation(),
                index: test.index(),
                total: test.total(),
                answer: test.answer(),
                feedback: test.feedback().map(feedback_name),
                correct_answer: match test.feedback() {
                    Some(Feedback::Incorrect) => Some(test.current().target_word()),
                    _ => None,
                },
                progress: test.progress(),
            },
            Phase::Summary(summary) => View::Summary {
                score: summary.score,
                total: summary.total,
            },
            Phase::Error { message } => View::Error { message },
        }
    }
}

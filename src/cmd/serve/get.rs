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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use flashlingo_core::app::App;
use flashlingo_core::session::Feedback;
use flashlingo_core::session::Phase;
use flashlingo_core::session::Quiz;
use flashlingo_core::session::Study;
use flashlingo_core::session::Summary;
use flashlingo_core::session::Test;
use maud::Markup;
use maud::html;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;
use crate::cmd::serve::template::refreshing_page_template;
use crate::db::Database;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let app = state.app.lock().unwrap();
    let page = match app.phase() {
        Phase::Setup => page_template(render_setup(&app)),
        Phase::Loading { .. } => refreshing_page_template(render_loading()),
        Phase::Quiz(Quiz::Study(study)) => page_template(render_study(&state, study)),
        Phase::Quiz(Quiz::Test(test)) => page_template(render_test(&state, test)),
        Phase::Summary(summary) => page_template(render_summary(summary)),
        Phase::Error { message } => page_template(render_error(message)),
    };
    (StatusCode::OK, Html(page.into_string()))
}

fn render_setup(app: &App<Database>) -> Markup {
    let (category, words) = match app.settings() {
        Some(settings) => (settings.category(), settings.raw_words()),
        None => ("", ""),
    };
    let sets = app.library().sets();
    html! {
        div.root {
            div.panel {
                h1 { "New Set" }
                form action="/" method="post" {
                    label for="category" { "Category Name" }
                    input id="category" type="text" name="category" value=(category)
                        placeholder="e.g. Kitchen Items" required;
                    label for="words" { "Your Words" }
                    textarea id="words" name="words" rows="5" required
                        placeholder="e.g. Cat, Dog, House" { (words) }
                    p.hint { "Separate words with commas or new lines" }
                    button id="start" type="submit" name="action" value="Start" { "Create Flashcards" }
                }
            }
            @if !sets.is_empty() {
                div.panel {
                    h2 { "Saved Lists" }
                    ul.library {
                        @for set in sets {
                            li {
                                div.set-info {
                                    span.set-name { (set.category()) }
                                    span.set-meta {
                                        (set.cards().len()) " words · " (set.last_used_at().short_date())
                                    }
                                }
                                form.set-actions action="/" method="post" {
                                    input type="hidden" name="category" value=(set.category());
                                    button type="submit" name="action" value="Load" title="Load into form" { "Load" }
                                    button.danger type="submit" name="action" value="Delete" title="Delete list" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_loading() -> Markup {
    html! {
        div.root {
            div.panel.center {
                h2 { "Building Your Set" }
                p { "Translating and preparing flashcards..." }
            }
        }
    }
}

fn progress_bar(progress: f64) -> Markup {
    let style = format!("width: {}%;", (progress * 100.0).round());
    html! {
        div.progress-bar {
            div.progress-fill style=(style) {}
        }
    }
}

fn quiz_header(
    exit_label: &str,
    mode: &str,
    label: &str,
    index: usize,
    total: usize,
    progress: f64,
) -> Markup {
    html! {
        div.header {
            form.header-action action="/" method="post" {
                button.link type="submit" name="action" value="Exit" { (exit_label) }
            }
            span.mode { (mode) }
        }
        div.progress {
            div.progress-label {
                span { (label) }
                span { (index + 1) " / " (total) }
            }
            (progress_bar(progress))
        }
    }
}

fn render_study(state: &ServerState, study: &Study) -> Markup {
    let card = study.current();
    let face = if study.is_flipped() {
        html! {
            div.card.back {
                span.language { (state.native_language) }
                h3 { (card.translation()) }
                p.caption { "Meaning" }
                p.example { "\"" (card.example_sentence()) "\"" }
                p.example-translation { (card.example_translation()) }
            }
        }
    } else {
        html! {
            div.card.front {
                span.language { (state.target_language) }
                h2 { (card.target_word()) }
                p.pronunciation { "/" (card.pronunciation()) "/" }
            }
        }
    };
    html! {
        div.root {
            (quiz_header(
                "Back to Setup",
                "Study Mode",
                "Card",
                study.index(),
                study.total(),
                study.progress(),
            ))
            form action="/" method="post" {
                button.card-button type="submit" name="action" value="Flip" title="Flip the card" {
                    (face)
                    @if !study.is_flipped() {
                        span.hint { "Tap to reveal" }
                    }
                }
            }
            form.controls action="/" method="post" {
                button type="submit" name="action" value="Prev" disabled[study.is_first()] { "Previous" }
                @if study.is_last() {
                    button.primary id="start-test" type="submit" name="action" value="StartTest" { "Start Test" }
                } @else {
                    button.primary id="next" type="submit" name="action" value="Next" { "Next" }
                }
            }
        }
    }
}

fn render_test(state: &ServerState, test: &Test) -> Markup {
    let card = test.current();
    let locked = test.is_locked();
    html! {
        div.root {
            (quiz_header(
                "Quit",
                "Test Mode",
                "Progress",
                test.index(),
                test.total(),
                test.progress(),
            ))
            div.card.question {
                span.language { "Translate to " (state.target_language) }
                h2 { (card.translation()) }
            }
            form.answer action="/" method="post" {
                input id="answer" type="text" name="answer" value=(test.answer())
                    placeholder={ "Type " (state.target_language) " translation..." }
                    autocomplete="off" autofocus disabled[locked];
                @if !locked {
                    button.primary id="check" type="submit" name="action" value="Check" { "Check Answer" }
                    div.special-characters {
                        @for c in &state.special_characters {
                            button type="submit" name="action" value={ "Insert:" (c) } {
                                (c.to_uppercase().to_string())
                            }
                        }
                    }
                }
            }
            @match test.feedback() {
                Some(Feedback::Correct) => {
                    div.feedback.correct {
                        p { strong { "Correct!" } }
                    }
                },
                Some(Feedback::Incorrect) => {
                    div.feedback.incorrect {
                        p { strong { "Not quite right" } }
                        p { "Correct answer: " strong { (card.target_word()) } }
                    }
                },
                None => {},
            }
            @if locked {
                form.controls action="/" method="post" {
                    button.primary id="continue" type="submit" name="action" value="Continue" { "Continue" }
                }
            }
        }
    }
}

fn render_summary(summary: &Summary) -> Markup {
    html! {
        div.root {
            div.panel.center {
                h2 { "Great Job!" }
                p { "You've completed the test." }
                div.score {
                    p.caption { "Final Score" }
                    p.final-score { (summary.score) "/" (summary.total) }
                }
                form action="/" method="post" {
                    button.primary type="submit" name="action" value="Restart" { "Edit or New Set" }
                }
            }
        }
    }
}

fn render_error(message: &str) -> Markup {
    html! {
        div.root {
            div.panel.center {
                h2 { "Oops!" }
                p { (message) }
                form action="/" method="post" {
                    button type="submit" name="action" value="Restart" { "Try Again" }
                }
            }
        }
    }
}

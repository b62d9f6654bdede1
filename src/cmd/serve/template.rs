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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

/// Seconds between reloads while cards are being generated.
const LOADING_REFRESH_SECS: u32 = 1;

pub fn page_template(body: Markup) -> Markup {
    render(body, false)
}

/// A page that reloads itself, used while the generator runs.
pub fn refreshing_page_template(body: Markup) -> Markup {
    render(body, true)
}

fn render(body: Markup, refresh: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if refresh {
                    meta http-equiv="refresh" content=(LOADING_REFRESH_SECS);
                }
                title { "flashlingo" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
                footer { "Powered by Gemini AI" }
            }
        }
    }
}

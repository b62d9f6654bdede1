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
use std::sync::Mutex;

use flashlingo_core::app::App;

use crate::db::Database;
use crate::generator::Generator;

#[derive(Clone)]
pub struct ServerState {
    /// Characters offered as insertion buttons in the test phase.
    pub special_characters: Vec<char>,
    /// The target language, for labels.
    pub target_language: String,
    pub native_language: String,
    pub generator: Arc<dyn Generator>,
    pub app: Arc<Mutex<App<Database>>>,
}

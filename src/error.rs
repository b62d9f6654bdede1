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

use std::fmt::Display;

pub use flashlingo_core::error::ErrorReport;
pub use flashlingo_core::error::Fallible;
pub use flashlingo_core::error::fail;

/// Converts errors from crates the core does not know about (SQLite, HTTP,
/// TOML) into an [`ErrorReport`], prefixed with what was being done.
pub trait OrReport<T> {
    fn or_report(self, what: &str) -> Fallible<T>;
}

impl<T, E: Display> OrReport<T> for Result<T, E> {
    fn or_report(self, what: &str) -> Fallible<T> {
        self.map_err(|e| ErrorReport::new(format!("{what}: {e}")))
    }
}

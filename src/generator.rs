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

use std::future::Future;
use std::pin::Pin;

use flashlingo_core::generator::GenerationRequest;
use flashlingo_core::types::flashcard::Flashcard;

use crate::error::Fallible;

pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Fallible<Vec<Flashcard>>> + Send + 'a>>;

/// Something that turns a generation request into cards.
pub trait Generator: Send + Sync {
    fn generate<'a>(&'a self, request: &'a GenerationRequest) -> GenerateFuture<'a>;
}

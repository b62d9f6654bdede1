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

use flashlingo_core::types::saved_set::SavedSet;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

/// Print the saved sets, most recently used first.
pub fn list_sets(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    if collection.library.is_empty() {
        println!("No saved sets.");
        return Ok(());
    }
    for line in format_sets(collection.library.sets()) {
        println!("{line}");
    }
    Ok(())
}

/// Remove a saved set. The category must match exactly.
pub fn delete_set(directory: Option<String>, category: String) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    if !collection.library.remove(&category) {
        return fail(format!("no saved set named '{category}'."));
    }
    log::info!("Deleted saved set '{category}'.");
    Ok(())
}

fn format_sets(sets: &[SavedSet]) -> Vec<String> {
    sets.iter()
        .map(|set| {
            format!(
                "{}\t{} words\tlast used {}",
                set.category(),
                set.cards().len(),
                set.last_used_at()
            )
        })
        .collect()
}

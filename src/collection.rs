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

use std::env::current_dir;
use std::path::PathBuf;

use flashlingo_core::library::Library;

use crate::config::Config;
use crate::db::DATABASE_FILE;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// The data directory: the saved-sets database and the optional config.
pub struct Collection {
    pub directory: PathBuf,
    pub library: Library<Database>,
    pub config: Config,
}

impl Collection {
    /// Open the collection in the given directory, or the current directory
    /// if none is given. The database is created if missing.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let db = Database::open(&directory.join(DATABASE_FILE))?;
        let library = Library::open(db);
        Ok(Self {
            directory,
            library,
            config,
        })
    }
}

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

use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use tokio::spawn;

use crate::cmd::list::delete_set;
use crate::cmd::list::list_sets;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::collection::Collection;
use crate::config::api_key;
use crate::error::Fallible;
use crate::gemini::GeminiGenerator;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Create, study, and test vocabulary flashcards through a web interface.
    Serve {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// List the saved sets, most recently used first.
    List {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Delete a saved set.
    Delete {
        /// Path to the data directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The exact category name of the set to delete.
        category: String,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
        } => {
            let collection = Collection::new(directory)?;
            let api_key = api_key();
            if api_key.is_none() {
                log::warn!("No API key set; card generation will fail until GEMINI_API_KEY is set.");
            }
            let generator = Arc::new(GeminiGenerator::new(&collection.config, api_key));
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig { host, port };
            start_server(config, collection, generator).await
        }
        Command::List { directory } => list_sets(directory),
        Command::Delete {
            directory,
            category,
        } => delete_set(directory, category),
    }
}

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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use flashlingo_core::generator::GenerationRequest;
    use flashlingo_core::types::flashcard::Flashcard;
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::collection::Collection;
    use crate::error::Fallible;
    use crate::error::OrReport;
    use crate::error::fail;
    use crate::generator::GenerateFuture;
    use crate::generator::Generator;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    struct FakeGenerator {
        cards: Vec<Flashcard>,
        calls: Arc<AtomicUsize>,
    }

    impl Generator for FakeGenerator {
        fn generate<'a>(&'a self, _request: &'a GenerationRequest) -> GenerateFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let cards = self.cards.clone();
            Box::pin(async move { Ok(cards) })
        }
    }

    fn animals() -> Vec<Flashcard> {
        vec![
            Flashcard::new("kissa", "cat", "KIS-sah", "Kissa nukkuu.", "The cat is sleeping."),
            Flashcard::new("koira", "dog", "KOI-rah", "Koira haukkuu.", "The dog barks."),
        ]
    }

    struct TestServer {
        port: u16,
        calls: Arc<AtomicUsize>,
        // Keeps the data directory alive for the duration of the test.
        _dir: TempDir,
    }

    impl TestServer {
        async fn start(cards: Vec<Flashcard>) -> Fallible<Self> {
            let port = pick_unused_port().unwrap();
            let dir = tempdir()?;
            let collection = Collection::new(Some(dir.path().display().to_string()))?;
            let calls = Arc::new(AtomicUsize::new(0));
            let generator = Arc::new(FakeGenerator {
                cards,
                calls: Arc::clone(&calls),
            });
            let config = ServerConfig {
                host: TEST_HOST.to_string(),
                port,
            };
            spawn(async move { start_server(config, collection, generator).await });
            wait_for_server(TEST_HOST, port).await?;
            Ok(Self {
                port,
                calls,
                _dir: dir,
            })
        }

        fn url(&self, path: &str) -> String {
            format!("http://{TEST_HOST}:{}{path}", self.port)
        }

        async fn get(&self) -> Fallible<String> {
            let response = reqwest::get(self.url("/")).await.or_report("GET failed")?;
            assert!(response.status().is_success());
            response.text().await.or_report("GET failed")
        }

        async fn post(&self, form: &[(&str, &str)]) -> Fallible<String> {
            let response = reqwest::Client::new()
                .post(self.url("/"))
                .form(form)
                .send()
                .await
                .or_report("POST failed")?;
            assert!(response.status().is_success());
            response.text().await.or_report("POST failed")
        }

        /// Poll until the generator has finished.
        async fn wait_until_loaded(&self) -> Fallible<String> {
            for _ in 0..500 {
                let html = self.get().await?;
                if !html.contains("Building Your Set") {
                    return Ok(html);
                }
                sleep(Duration::from_millis(10)).await;
            }
            fail("generation did not finish")
        }

        async fn start_animals(&self) -> Fallible<String> {
            self.post(&[
                ("action", "Start"),
                ("category", "Animals"),
                ("words", "cat, dog"),
            ])
            .await?;
            self.wait_until_loaded().await
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_static_endpoints() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(server.url("/style.css"))
            .await
            .or_report("GET failed")?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(server.url("/herp-derp"))
            .await
            .or_report("GET failed")?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(server.url("/")).await.or_report("GET failed")?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.or_report("GET failed")?;
        assert!(html.contains("Create Flashcards"));
        assert!(!html.contains("Saved Lists"));

        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;

        // Generate and land on the first study card.
        let html = server.start_animals().await?;
        assert_eq!(server.calls(), 1);
        assert!(html.contains("Study Mode"));
        assert!(html.contains("kissa"));
        assert!(html.contains("/KIS-sah/"));
        assert!(!html.contains("Kissa nukkuu."));

        // Flip.
        let html = server.post(&[("action", "Flip")]).await?;
        assert!(html.contains("Kissa nukkuu."));
        assert!(html.contains("The cat is sleeping."));

        // Next card, which is the last.
        let html = server.post(&[("action", "Next")]).await?;
        assert!(html.contains("koira"));
        assert!(html.contains("Start Test"));

        // Start the test.
        let html = server.post(&[("action", "StartTest")]).await?;
        assert!(html.contains("Test Mode"));
        assert!(html.contains("Translate to Finnish"));
        assert!(html.contains("Check Answer"));

        // Correct answer, different case and trailing whitespace.
        let html = server
            .post(&[("action", "Check"), ("answer", "KISSA  ")])
            .await?;
        assert!(html.contains("Correct!"));
        let html = server.post(&[("action", "Continue")]).await?;
        assert!(html.contains("dog"));

        // Wrong answer.
        let html = server
            .post(&[("action", "Check"), ("answer", "kissa")])
            .await?;
        assert!(html.contains("Not quite right"));
        assert!(html.contains("koira"));

        // Finish.
        let html = server.post(&[("action", "Continue")]).await?;
        assert!(html.contains("Great Job!"));
        assert!(html.contains("1/2"));

        // Back to setup, with the form pre-filled and the set saved.
        let html = server.post(&[("action", "Restart")]).await?;
        assert!(html.contains("Saved Lists"));
        assert!(html.contains("value=\"Animals\""));
        assert!(html.contains("2 words"));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_start_uses_saved_set() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;
        server.start_animals().await?;
        server.post(&[("action", "Exit")]).await?;

        // The cached set is used directly: no loading page, no generation.
        let html = server
            .post(&[
                ("action", "Start"),
                ("category", "animals"),
                ("words", "cat, dog"),
            ])
            .await?;
        assert!(html.contains("Study Mode"));
        assert_eq!(server.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_generation() -> Fallible<()> {
        let server = TestServer::start(Vec::new()).await?;
        let html = server.start_animals().await?;
        assert!(html.contains("Oops!"));
        assert!(html.contains("generate your cards right now"));

        let html = server.post(&[("action", "Restart")]).await?;
        assert!(html.contains("Create Flashcards"));
        assert!(!html.contains("Saved Lists"));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_start_is_ignored() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;
        let html = server
            .post(&[("action", "Start"), ("category", "  "), ("words", "cat")])
            .await?;
        assert!(html.contains("Create Flashcards"));
        assert_eq!(server.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_character() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;
        server.start_animals().await?;
        server.post(&[("action", "StartTest")]).await?;
        let html = server
            .post(&[("action", "Insert:ä"), ("answer", "p")])
            .await?;
        assert!(html.contains("value=\"pä\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_and_delete() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;
        server.start_animals().await?;
        server.post(&[("action", "Exit")]).await?;

        let html = server
            .post(&[("action", "Load"), ("category", "Animals")])
            .await?;
        assert!(html.contains("cat, dog"));

        let html = server
            .post(&[("action", "Delete"), ("category", "Animals")])
            .await?;
        assert!(!html.contains("Saved Lists"));

        // Deleting again changes nothing.
        let html = server
            .post(&[("action", "Delete"), ("category", "Animals")])
            .await?;
        assert!(html.contains("Create Flashcards"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action() -> Fallible<()> {
        let server = TestServer::start(animals()).await?;
        let response = reqwest::Client::new()
            .post(server.url("/"))
            .form(&[("action", "Shutdown")])
            .send()
            .await
            .or_report("POST failed")?;
        assert!(response.status().is_client_error());
        Ok(())
    }
}

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

//! Card generation through the Gemini `generateContent` REST endpoint.

use flashlingo_core::generator::GenerationRequest;
use flashlingo_core::generator::parse_cards;
use flashlingo_core::types::flashcard::Flashcard;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::OrReport;
use crate::error::fail;
use crate::generator::GenerateFuture;
use crate::generator::Generator;

pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    pub fn new(config: &Config, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn call(&self, request: &GenerationRequest) -> Fallible<Vec<Flashcard>> {
        let Some(api_key) = &self.api_key else {
            return fail("no Gemini API key; set GEMINI_API_KEY.");
        };
        log::debug!("Requesting cards from {}", self.model);
        let response: GenerateResponse = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(request))
            .send()
            .await
            .or_report("Gemini request failed")?
            .error_for_status()
            .or_report("Gemini request failed")?
            .json()
            .await
            .or_report("unexpected Gemini response")?;
        let text = response_text(response)?;
        parse_cards(&text)
    }
}

impl Generator for GeminiGenerator {
    fn generate<'a>(&'a self, request: &'a GenerationRequest) -> GenerateFuture<'a> {
        Box::pin(self.call(request))
    }
}

fn request_body(request: &GenerationRequest) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": request.prompt() }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema(),
        },
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// The text of the first part of the first candidate.
fn response_text(response: GenerateResponse) -> Fallible<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text);
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => fail("No data returned from Gemini."),
    }
}

#[cfg(test)]
mod tests {
    use flashlingo_core::generator::Languages;
    use flashlingo_core::types::settings::Settings;

    use super::*;

    fn request() -> Fallible<GenerationRequest> {
        Ok(GenerationRequest {
            ticket: 1,
            settings: Settings::new("Animals", "cat, dog")?,
            languages: Languages::default(),
        })
    }

    #[test]
    fn test_url() {
        let mut config = Config::default();
        config.api_base_url = "http://localhost:9999/".to_string();
        let generator = GeminiGenerator::new(&config, None);
        assert_eq!(
            generator.url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body() -> Fallible<()> {
        let body = request_body(&request()?);
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Category: \"Animals\"."));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        Ok(())
    }

    #[test]
    fn test_response_text() -> Fallible<()> {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[]"}], "role": "model"}}]}"#,
        )?;
        assert_eq!(response_text(response)?, "[]");
        Ok(())
    }

    #[test]
    fn test_response_without_candidates() -> Fallible<()> {
        let response: GenerateResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#)?;
        assert!(response_text(response).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_api_key() -> Fallible<()> {
        let generator = GeminiGenerator::new(&Config::default(), None);
        let result = generator.generate(&request()?).await;
        assert!(result.unwrap_err().message().contains("GEMINI_API_KEY"));
        Ok(())
    }
}

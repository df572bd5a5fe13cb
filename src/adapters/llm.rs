use crate::domain::model::PromptConfig;
use crate::domain::ports::ContentGenerator;
use crate::utils::error::{Result, ReviewError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Text generation over an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl ChatCompletionsGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn messages(prompt: &PromptConfig) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: format!(
                    "You are {}.\n{}\nYour goal: {}",
                    prompt.role, prompt.backstory, prompt.goal
                ),
            },
            ChatMessage {
                role: "user".to_string(),
                content: format!(
                    "{}\n\nExpected output: {}",
                    prompt.task, prompt.expected_output
                ),
            },
        ]
    }
}

#[async_trait]
impl ContentGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &PromptConfig) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: Self::messages(prompt),
            temperature: self.temperature,
        };

        tracing::debug!("Requesting completion from {} ({})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::GenerationError {
                message: format!("LLM endpoint returned {}: {}", status, body),
            });
        }

        let body: ChatResponse = serde_json::from_str(&response.text().await?)?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ReviewError::GenerationError {
                message: "LLM response contained no choices".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_first_choice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("Authorization", "Bearer sk-test")
                    .body_contains("\"model\":\"gpt-4o-mini\"")
                    .body_contains("edge AI");
                then.status(200).json_body(json!({
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": "### Slide 1: Hi"}}]
                }));
            })
            .await;

        let generator =
            ChatCompletionsGenerator::new(server.url("/v1/chat/completions"), "sk-test", "gpt-4o-mini");
        let prompt = PromptConfig::default().render("edge AI");
        let content = generator.generate(&prompt).await.unwrap();

        mock.assert_async().await;
        assert_eq!(content, "### Slide 1: Hi");
    }

    #[tokio::test]
    async fn test_empty_choices_is_generation_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let generator =
            ChatCompletionsGenerator::new(server.url("/v1/chat/completions"), "sk-test", "m");
        let err = generator.generate(&PromptConfig::default()).await.unwrap_err();
        assert!(matches!(err, ReviewError::GenerationError { .. }));
    }
}

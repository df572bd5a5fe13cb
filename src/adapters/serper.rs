use crate::domain::model::SearchResults;
use crate::domain::ports::SearchProvider;
use crate::utils::error::{Result, ReviewError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
}

/// Google search through the Serper API.
#[derive(Debug, Clone)]
pub struct SerperSearch {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SerperSearch {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    async fn search(&self, query: &str) -> Result<SearchResults> {
        tracing::debug!("Serper search: {}", query);
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest { q: query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::SearchError {
                message: format!("Serper returned {}: {}", status, body),
            });
        }

        let body = response.text().await?;
        let results: SearchResults = serde_json::from_str(&body)?;
        tracing::debug!("Serper returned {} organic results", results.organic.len());
        Ok(results)
    }
}

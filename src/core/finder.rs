use crate::domain::model::{ReplacementExample, SearchResults};
use crate::domain::ports::SearchProvider;
use crate::utils::error::Result;
use crate::utils::retry::RetryPolicy;

pub const DEFAULT_QUERY_SUFFIX: &str = "case study OR example";

/// Looks up a fresh example to stand in for a dead link.
pub struct ExampleFinder<S: SearchProvider> {
    provider: S,
    retry: RetryPolicy,
    query_suffix: String,
}

impl<S: SearchProvider> ExampleFinder<S> {
    pub fn new(provider: S) -> Self {
        Self {
            provider,
            retry: RetryPolicy::default(),
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_query_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.query_suffix = suffix.into();
        self
    }

    /// Returns `Ok(None)` when no organic result carries both a link and a snippet.
    /// Search failures are retried; the error surfaces only once the policy is exhausted.
    pub async fn find_replacement(&self, query: &str) -> Result<Option<ReplacementExample>> {
        let enriched = format!("{} {}", query, self.query_suffix);
        let provider = &self.provider;
        let enriched_query = enriched.as_str();

        tracing::debug!("Searching for replacement example: {}", enriched_query);
        let results = self
            .retry
            .run("example search", move |_| provider.search(enriched_query))
            .await?;

        Ok(first_qualifying(results))
    }
}

fn first_qualifying(results: SearchResults) -> Option<ReplacementExample> {
    results
        .organic
        .into_iter()
        .find_map(|result| match (result.link, result.snippet) {
            (Some(url), Some(summary)) => Some(ReplacementExample { summary, url }),
            _ => None,
        })
}

use crate::core::validator::StructureRules;
use crate::domain::model::{PromptConfig, SearchResults};
use crate::utils::error::Result;
use crate::utils::retry::RetryPolicy;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn structure_rules(&self) -> StructureRules;
    fn link_timeout(&self) -> Duration;
    fn search_retry(&self) -> RetryPolicy;
    fn task_retry(&self) -> RetryPolicy;
    fn query_suffix(&self) -> &str;
    fn written_file(&self) -> &str;
    fn reviewed_file(&self) -> &str;
    fn reviewer_prompt(&self) -> PromptConfig;
}

/// Liveness checker for a single URL. Never fails: unreachable means `false`.
#[async_trait]
pub trait LinkVerifier: Send + Sync {
    async fn is_alive(&self, url: &str) -> bool;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResults>;
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &PromptConfig) -> Result<String>;
}

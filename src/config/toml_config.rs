use crate::adapters::http::DEFAULT_LINK_TIMEOUT;
use crate::adapters::llm::DEFAULT_LLM_ENDPOINT;
use crate::adapters::serper::DEFAULT_SERPER_ENDPOINT;
use crate::core::finder::DEFAULT_QUERY_SUFFIX;
use crate::core::validator::StructureRules;
use crate::core::ConfigProvider;
use crate::domain::model::PromptConfig;
use crate::utils::error::{Result, ReviewError};
use crate::utils::retry::RetryPolicy;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub link_check: LinkCheckConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub writer: PromptConfig,
    #[serde(default)]
    pub reviewer: PromptOverrides,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureConfig {
    pub expected_slides: Option<usize>,
    pub bullets_per_slide: Option<usize>,
    pub min_length: Option<usize>,
    pub confirmation_phrases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkCheckConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub query_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub search: Option<RetrySettings>,
    pub task: Option<RetrySettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: Option<u32>,
    pub multiplier_seconds: Option<u64>,
    pub max_delay_seconds: Option<u64>,
}

impl RetrySettings {
    fn policy(settings: Option<&RetrySettings>) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match settings {
            None => defaults,
            Some(s) => RetryPolicy::new(
                s.max_attempts.unwrap_or(defaults.max_attempts),
                s.multiplier_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.multiplier),
                s.max_delay_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.max_delay),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Partial prompt for the `[reviewer]` table; unset fields come from [`PromptConfig::reviewer`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOverrides {
    pub role: Option<String>,
    pub goal: Option<String>,
    pub backstory: Option<String>,
    pub task: Option<String>,
    pub expected_output: Option<String>,
}

impl PromptOverrides {
    fn over(&self, base: PromptConfig) -> PromptConfig {
        PromptConfig {
            role: self.role.clone().unwrap_or(base.role),
            goal: self.goal.clone().unwrap_or(base.goal),
            backstory: self.backstory.clone().unwrap_or(base.backstory),
            task: self.task.clone().unwrap_or(base.task),
            expected_output: self.expected_output.clone().unwrap_or(base.expected_output),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: Option<String>,
    pub written_file: Option<String>,
    pub reviewed_file: Option<String>,
}

/// Values left as an unresolved `${VAR}` placeholder count as unset.
fn resolved(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.contains("${"))
}

fn secret(field: &str, value: Option<&String>, env_var: &str) -> Result<String> {
    if let Some(v) = resolved(value) {
        return Ok(v.to_string());
    }
    std::env::var(env_var).map_err(|_| ReviewError::MissingConfigError {
        field: format!("{} (or {} environment variable)", field, env_var),
    })
}

impl ReviewConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReviewError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn search_endpoint(&self) -> &str {
        self.search
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_SERPER_ENDPOINT)
    }

    pub fn search_api_key(&self) -> Result<String> {
        secret("search.api_key", self.search.api_key.as_ref(), "SERPER_API_KEY")
    }

    pub fn llm_endpoint(&self) -> &str {
        self.llm.endpoint.as_deref().unwrap_or(DEFAULT_LLM_ENDPOINT)
    }

    pub fn llm_model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or("gpt-4o-mini")
    }

    pub fn llm_api_key(&self) -> Result<String> {
        secret("llm.api_key", self.llm.api_key.as_ref(), "OPENAI_API_KEY")
    }

    pub fn output_path(&self) -> &str {
        self.output.output_path.as_deref().unwrap_or("./output")
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("search.endpoint", self.search_endpoint())?;
        validation::validate_url("llm.endpoint", self.llm_endpoint())?;
        validation::validate_path("output.output_path", self.output_path())?;
        validation::validate_path("output.written_file", self.written_file())?;
        validation::validate_path("output.reviewed_file", self.reviewed_file())?;
        validation::validate_non_empty_string("search.query_suffix", self.query_suffix())?;

        let rules = self.structure_rules();
        validation::validate_positive_number("structure.expected_slides", rules.expected_slides, 1)?;
        validation::validate_positive_number(
            "structure.bullets_per_slide",
            rules.bullets_per_slide,
            1,
        )?;

        let timeout = self.link_check.timeout_seconds.unwrap_or(DEFAULT_LINK_TIMEOUT.as_secs());
        validation::validate_range("link_check.timeout_seconds", timeout, 1, 120)?;

        for (field, policy) in [
            ("retry.search.max_attempts", self.search_retry()),
            ("retry.task.max_attempts", self.task_retry()),
        ] {
            validation::validate_range(field, policy.max_attempts, 1, 10)?;
        }

        if let Some(temperature) = self.llm.temperature {
            validation::validate_range("llm.temperature", temperature, 0.0, 2.0)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ReviewConfig {
    fn structure_rules(&self) -> StructureRules {
        let defaults = StructureRules::default();
        StructureRules {
            expected_slides: self
                .structure
                .expected_slides
                .unwrap_or(defaults.expected_slides),
            bullets_per_slide: self
                .structure
                .bullets_per_slide
                .unwrap_or(defaults.bullets_per_slide),
            min_length: self.structure.min_length.unwrap_or(defaults.min_length),
            confirmation_phrases: self
                .structure
                .confirmation_phrases
                .clone()
                .unwrap_or(defaults.confirmation_phrases),
        }
    }

    fn link_timeout(&self) -> Duration {
        self.link_check
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LINK_TIMEOUT)
    }

    fn search_retry(&self) -> RetryPolicy {
        RetrySettings::policy(self.retry.search.as_ref())
    }

    fn task_retry(&self) -> RetryPolicy {
        RetrySettings::policy(self.retry.task.as_ref())
    }

    fn query_suffix(&self) -> &str {
        self.search
            .query_suffix
            .as_deref()
            .unwrap_or(DEFAULT_QUERY_SUFFIX)
    }

    fn written_file(&self) -> &str {
        self.output.written_file.as_deref().unwrap_or("write-1.md")
    }

    fn reviewed_file(&self) -> &str {
        self.output
            .reviewed_file
            .as_deref()
            .unwrap_or("final_reviewed.md")
    }

    fn reviewer_prompt(&self) -> PromptConfig {
        self.reviewer.over(PromptConfig::reviewer())
    }
}

impl Validate for ReviewConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReviewConfig::from_toml_str("").unwrap();

        assert_eq!(config.structure_rules(), StructureRules::default());
        assert_eq!(config.link_timeout(), Duration::from_secs(5));
        assert_eq!(config.search_retry(), RetryPolicy::default());
        assert_eq!(config.query_suffix(), "case study OR example");
        assert_eq!(config.search_endpoint(), "https://google.serper.dev/search");
        assert_eq!(config.written_file(), "write-1.md");
        assert_eq!(config.reviewed_file(), "final_reviewed.md");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let toml_content = r#"
[structure]
expected_slides = 10
confirmation_phrases = ["has been reviewed", "task complete"]

[link_check]
timeout_seconds = 2

[retry.search]
max_attempts = 5
max_delay_seconds = 10

[writer]
role = "Conference speaker"

[output]
output_path = "./decks"
"#;

        let config = ReviewConfig::from_toml_str(toml_content).unwrap();
        let rules = config.structure_rules();
        assert_eq!(rules.expected_slides, 10);
        assert_eq!(rules.bullets_per_slide, 6);
        assert_eq!(rules.confirmation_phrases.len(), 2);
        assert_eq!(config.link_timeout(), Duration::from_secs(2));

        let retry = config.search_retry();
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.multiplier, Duration::from_secs(1));
        assert_eq!(retry.max_delay, Duration::from_secs(10));
        assert_eq!(config.task_retry(), RetryPolicy::default());

        assert_eq!(config.writer.role, "Conference speaker");
        assert_eq!(config.writer.task, PromptConfig::default().task);
        assert_eq!(config.output_path(), "./decks");
    }

    #[test]
    fn test_partial_reviewer_table_keeps_reviewer_defaults() {
        let config = ReviewConfig::from_toml_str(
            r#"
[reviewer]
backstory = "A keynote coach."
"#,
        )
        .unwrap();

        let prompt = config.reviewer_prompt();
        assert_eq!(prompt.backstory, "A keynote coach.");
        assert_eq!(prompt.role, "Final Reviewer");
        assert_eq!(prompt.task, PromptConfig::reviewer().task);
        assert_eq!(config.writer, PromptConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLIDE_REVIEW_TEST_KEY", "serper-123");

        let config = ReviewConfig::from_toml_str(
            r#"
[search]
api_key = "${SLIDE_REVIEW_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.search_api_key().unwrap(), "serper-123");

        std::env::remove_var("SLIDE_REVIEW_TEST_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_counts_as_unset() {
        let config = ReviewConfig::from_toml_str(
            r#"
[llm]
api_key = "${SLIDE_REVIEW_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            resolved(config.llm.api_key.as_ref()),
            None
        );
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = ReviewConfig::from_toml_str(
            r#"
[search]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_timeout = ReviewConfig::from_toml_str(
            r#"
[link_check]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_attempts = ReviewConfig::from_toml_str(
            r#"
[retry.task]
max_attempts = 0
"#,
        )
        .unwrap();
        assert!(bad_attempts.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ReviewConfig::from_toml_str("[structure\nexpected_slides = 3").unwrap_err();
        assert!(matches!(err, ReviewError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nreviewed_file = \"reviewed.md\"\n")
            .unwrap();

        let config = ReviewConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.reviewed_file(), "reviewed.md");
    }
}

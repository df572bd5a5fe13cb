use serde::{Deserialize, Serialize};

/// Placeholder written in place of a broken link when no replacement exists.
pub const NO_VALID_SOURCE_FOUND: &str = "[NO_VALID_SOURCE_FOUND]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Valid,
    Broken,
}

impl From<bool> for LinkStatus {
    fn from(alive: bool) -> Self {
        if alive {
            LinkStatus::Valid
        } else {
            LinkStatus::Broken
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementExample {
    pub summary: String,
    pub url: String,
}

/// One organic search hit. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

/// What the remediation pass decided for one extracted link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    Alive { url: String },
    Replaced { url: String, replacement: ReplacementExample },
    Sentinel { url: String },
}

impl LinkAction {
    pub fn url(&self) -> &str {
        let url = match self {
            LinkAction::Alive { url }
            | LinkAction::Replaced { url, .. }
            | LinkAction::Sentinel { url } => url,
        };
        url.as_str()
    }

    pub fn status(&self) -> LinkStatus {
        match self {
            LinkAction::Alive { .. } => LinkStatus::Valid,
            _ => LinkStatus::Broken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub document: String,
    pub actions: Vec<LinkAction>,
}

impl Remediation {
    pub fn broken_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.status() == LinkStatus::Broken)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Unvalidated,
    StructurallyValid,
    Remediated,
    Accepted,
    Rejected { reason: String },
}

/// Prompt record for an agent stage. `{topic}` placeholders are filled by [`PromptConfig::render`],
/// `{document}` placeholders by [`PromptConfig::with_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub task: String,
    pub expected_output: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            role: "Slide Content Writer".to_string(),
            goal: "Write a clear, engaging 30-slide presentation about {topic}".to_string(),
            backstory: "You turn research into concise presentation material with real, linked examples."
                .to_string(),
            task: "Write a presentation about {topic}. Each slide starts with a header \
                   '### Slide <n>: <title>' and contains exactly 6 bullet points. \
                   Cite real case studies as markdown links."
                .to_string(),
            expected_output: "Exactly 30 slides in markdown, 6 bullets per slide.".to_string(),
        }
    }
}

impl PromptConfig {
    /// Default prompt for the final reviewer, which revises a written deck before link review.
    pub fn reviewer() -> Self {
        Self {
            role: "Final Reviewer".to_string(),
            goal: "Polish a presentation about {topic} without breaking its slide structure"
                .to_string(),
            backstory: "You are an exacting editor who checks every example and source in a deck."
                .to_string(),
            task: "Review the presentation below. Fix unclear wording and replace weak examples, \
                   keeping every '### Slide <n>: <title>' header and exactly 6 bullet points per slide. \
                   Return the full presentation, not a summary of your changes.\n\n{document}"
                .to_string(),
            expected_output: "The complete revised presentation in markdown: 30 slides, 6 bullets each."
                .to_string(),
        }
    }

    pub fn render(&self, topic: &str) -> PromptConfig {
        self.fill("{topic}", topic)
    }

    pub fn with_document(&self, document: &str) -> PromptConfig {
        self.fill("{document}", document)
    }

    fn fill(&self, placeholder: &str, value: &str) -> PromptConfig {
        let fill = |s: &str| s.replace(placeholder, value);
        PromptConfig {
            role: fill(&self.role),
            goal: fill(&self.goal),
            backstory: fill(&self.backstory),
            task: fill(&self.task),
            expected_output: fill(&self.expected_output),
        }
    }
}

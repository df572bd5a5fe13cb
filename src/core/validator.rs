use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static SLIDE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"### Slide \d+:").expect("slide header pattern"));
static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[•\-*]\s+.+").expect("bullet pattern"));

const SLIDE_SPLIT: &str = "### Slide";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRules {
    pub expected_slides: usize,
    pub bullets_per_slide: usize,
    pub min_length: usize,
    pub confirmation_phrases: Vec<String>,
}

impl Default for StructureRules {
    fn default() -> Self {
        Self {
            expected_slides: 30,
            bullets_per_slide: 6,
            min_length: 500,
            confirmation_phrases: vec!["has been reviewed".to_string()],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("content is {length} characters, shorter than the {minimum} minimum")]
    TooShort { length: usize, minimum: usize },

    #[error("content looks like a confirmation message (contains '{phrase}')")]
    ConfirmationMessage { phrase: String },

    #[error("expected {expected} slides, found {found}")]
    SlideCount { expected: usize, found: usize },

    #[error("slide {slide} has {found} bullet points instead of {expected}")]
    BulletCount {
        slide: usize,
        expected: usize,
        found: usize,
    },
}

/// Checks a generated presentation against the fixed slide/bullet contract.
#[derive(Debug, Clone, Default)]
pub struct StructureValidator {
    rules: StructureRules,
}

impl StructureValidator {
    pub fn new(rules: StructureRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, content: &str) -> Result<(), Violation> {
        let length = content.chars().count();
        if length < self.rules.min_length {
            return Err(Violation::TooShort {
                length,
                minimum: self.rules.min_length,
            });
        }

        let lowered = content.to_lowercase();
        if let Some(phrase) = self
            .rules
            .confirmation_phrases
            .iter()
            .find(|p| lowered.contains(&p.to_lowercase()))
        {
            return Err(Violation::ConfirmationMessage {
                phrase: phrase.clone(),
            });
        }

        let found = SLIDE_HEADER.find_iter(content).count();
        if found != self.rules.expected_slides {
            return Err(Violation::SlideCount {
                expected: self.rules.expected_slides,
                found,
            });
        }

        for (index, segment) in content.split(SLIDE_SPLIT).skip(1).enumerate() {
            let bullets = BULLET_LINE.find_iter(segment).count();
            if bullets != self.rules.bullets_per_slide {
                return Err(Violation::BulletCount {
                    slide: index + 1,
                    expected: self.rules.bullets_per_slide,
                    found: bullets,
                });
            }
        }

        Ok(())
    }

    /// Fail-closed variant of [`validate`](Self::validate): logs the reason and returns `false`.
    pub fn is_valid(&self, content: &str) -> bool {
        match self.validate(content) {
            Ok(()) => true,
            Err(violation) => {
                tracing::error!("❌ Presentation validation failed: {}", violation);
                false
            }
        }
    }
}

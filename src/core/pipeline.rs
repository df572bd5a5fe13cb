use crate::core::remediation::Remediator;
use crate::core::validator::StructureValidator;
use crate::domain::model::{LinkAction, PromptConfig, ReviewState};
use crate::domain::ports::{ContentGenerator, LinkVerifier, SearchProvider};
use crate::utils::error::{Result, ReviewError};
use crate::utils::retry::RetryPolicy;

pub const REJECTED_BEFORE_REVIEW: &str = "content validation failed before link review";
pub const REJECTED_AFTER_REVIEW: &str = "content validation failed after link review";
pub const REJECTED_GENERATION: &str = "generated content does not meet requirements";

/// Outcome of one review run, including every state the document passed through.
#[derive(Debug, Clone)]
pub struct ReviewReport {
    pub state: ReviewState,
    pub document: String,
    pub actions: Vec<LinkAction>,
    pub transitions: Vec<ReviewState>,
}

impl ReviewReport {
    fn new(document: &str) -> Self {
        Self {
            state: ReviewState::Unvalidated,
            document: document.to_string(),
            actions: Vec::new(),
            transitions: vec![ReviewState::Unvalidated],
        }
    }

    fn advance(&mut self, next: ReviewState) {
        tracing::debug!("Review state {:?} -> {:?}", self.state, next);
        self.transitions.push(next.clone());
        self.state = next;
    }

    fn reject(mut self, reason: &str) -> Self {
        tracing::error!("❌ {}", reason);
        self.advance(ReviewState::Rejected {
            reason: reason.to_string(),
        });
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.state == ReviewState::Accepted
    }

    /// The accepted document, or the rejection as an error.
    pub fn into_document(self) -> Result<String> {
        match self.state {
            ReviewState::Accepted => Ok(self.document),
            ReviewState::Rejected { reason } => Err(ReviewError::Rejected { reason }),
            state => Err(ReviewError::Rejected {
                reason: format!("review stopped in state {:?}", state),
            }),
        }
    }
}

/// Pre-check, remediation, post-check.
pub struct ReviewPipeline<P: LinkVerifier, S: SearchProvider> {
    validator: StructureValidator,
    remediator: Remediator<P, S>,
}

impl<P: LinkVerifier, S: SearchProvider> ReviewPipeline<P, S> {
    pub fn new(validator: StructureValidator, remediator: Remediator<P, S>) -> Self {
        Self {
            validator,
            remediator,
        }
    }

    /// Structural rejections are reported in the returned state; only an
    /// exhausted search retry is an `Err`.
    pub async fn run(&self, content: &str) -> Result<ReviewReport> {
        tracing::info!("Starting content review");
        let mut report = ReviewReport::new(content);

        if !self.validator.is_valid(content) {
            return Ok(report.reject(REJECTED_BEFORE_REVIEW));
        }
        report.advance(ReviewState::StructurallyValid);

        let remediation = self.remediator.remediate(content).await?;
        tracing::info!(
            "Checked {} links, {} broken",
            remediation.actions.len(),
            remediation.broken_count()
        );
        report.document = remediation.document;
        report.actions = remediation.actions;
        report.advance(ReviewState::Remediated);

        if !self.validator.is_valid(&report.document) {
            return Ok(report.reject(REJECTED_AFTER_REVIEW));
        }
        report.advance(ReviewState::Accepted);
        tracing::info!("✅ Review accepted");

        Ok(report)
    }
}

/// Generates content and accepts it only once it passes structure validation.
pub struct WritingPipeline<G: ContentGenerator> {
    generator: G,
    validator: StructureValidator,
    retry: RetryPolicy,
}

impl<G: ContentGenerator> WritingPipeline<G> {
    pub fn new(generator: G, validator: StructureValidator) -> Self {
        Self {
            generator,
            validator,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// One generation attempt: Unvalidated -> StructurallyValid -> Accepted, or Rejected.
    pub async fn attempt(&self, prompt: &PromptConfig) -> Result<String> {
        let content = self.generator.generate(prompt).await?;
        if !self.validator.is_valid(&content) {
            return Err(ReviewError::Rejected {
                reason: REJECTED_GENERATION.to_string(),
            });
        }
        Ok(content)
    }

    /// Retries the whole generate-and-validate task under the configured policy.
    pub async fn run(&self, prompt: &PromptConfig) -> Result<String> {
        self.retry
            .run("content writing", move |attempt| {
                tracing::info!("✍️ Writing presentation (attempt {})", attempt);
                self.attempt(prompt)
            })
            .await
    }
}

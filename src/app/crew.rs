use crate::adapters::http::HttpLinkChecker;
use crate::core::finder::ExampleFinder;
use crate::core::pipeline::{ReviewPipeline, ReviewReport, WritingPipeline};
use crate::core::remediation::Remediator;
use crate::core::validator::StructureValidator;
use crate::core::{ConfigProvider, ContentGenerator, LinkVerifier, SearchProvider, Storage};
use crate::domain::model::PromptConfig;
use crate::utils::error::Result;

/// Review pipeline over real HTTP link checks, configured from `config`.
pub fn review_pipeline<C: ConfigProvider, S: SearchProvider>(
    config: &C,
    search: S,
) -> Result<ReviewPipeline<HttpLinkChecker, S>> {
    let checker = HttpLinkChecker::new(config.link_timeout())?;
    let finder = ExampleFinder::new(search)
        .with_retry(config.search_retry())
        .with_query_suffix(config.query_suffix());

    Ok(ReviewPipeline::new(
        StructureValidator::new(config.structure_rules()),
        Remediator::new(checker, finder),
    ))
}

pub fn writing_pipeline<C: ConfigProvider, G: ContentGenerator>(
    config: &C,
    generator: G,
) -> WritingPipeline<G> {
    WritingPipeline::new(generator, StructureValidator::new(config.structure_rules()))
        .with_retry(config.task_retry())
}

pub fn reviewer_agent<C: ConfigProvider, G: ContentGenerator>(
    config: &C,
    generator: G,
) -> ReviewerAgent<G> {
    ReviewerAgent::new(generator, config.reviewer_prompt())
}

/// Final-reviewer agent: one LLM pass that revises the written deck before its links are checked.
pub struct ReviewerAgent<G: ContentGenerator> {
    generator: G,
    prompt: PromptConfig,
}

impl<G: ContentGenerator> ReviewerAgent<G> {
    pub fn new(generator: G, prompt: PromptConfig) -> Self {
        Self { generator, prompt }
    }

    pub async fn revise(&self, topic: &str, document: &str) -> Result<String> {
        let prompt = self.prompt.render(topic).with_document(document);
        tracing::info!("🧐 {} revising the written presentation", prompt.role);
        let revised = self.generator.generate(&prompt).await?;
        tracing::debug!("Reviewer returned {} characters", revised.chars().count());
        Ok(revised)
    }
}

#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub written_path: Option<String>,
    pub reviewed_path: String,
    pub report: ReviewReport,
}

/// Runs the writer, the reviewer agent and the review pipeline in sequence and stores their artifacts.
pub struct PresentationCrew<P: LinkVerifier, S: SearchProvider, St: Storage> {
    pipeline: ReviewPipeline<P, S>,
    storage: St,
    written_file: String,
    reviewed_file: String,
}

impl<P: LinkVerifier, S: SearchProvider, St: Storage> PresentationCrew<P, S, St> {
    pub fn new<C: ConfigProvider>(config: &C, pipeline: ReviewPipeline<P, S>, storage: St) -> Self {
        Self {
            pipeline,
            storage,
            written_file: config.written_file().to_string(),
            reviewed_file: config.reviewed_file().to_string(),
        }
    }

    /// Reviews `content` and stores the accepted document. A rejection is returned as an error.
    pub async fn review(&self, content: &str) -> Result<CrewOutput> {
        let report = self.pipeline.run(content).await?;
        let document = report.clone().into_document()?;
        let reviewed_path = self
            .storage
            .write_file(&self.reviewed_file, document.as_bytes())
            .await?;
        tracing::info!("📁 Reviewed presentation saved to {}", reviewed_path);

        Ok(CrewOutput {
            written_path: None,
            reviewed_path,
            report,
        })
    }

    /// Writer, then reviewer agent, then link review. The written deck is stored before the
    /// reviewer runs; only the reviewed and remediated deck reaches `reviewed_file`.
    pub async fn write_and_review<W: ContentGenerator, R: ContentGenerator>(
        &self,
        writer: &WritingPipeline<W>,
        reviewer: &ReviewerAgent<R>,
        writer_prompt: &PromptConfig,
        topic: &str,
    ) -> Result<CrewOutput> {
        let written = writer.run(&writer_prompt.render(topic)).await?;
        let written_path = self
            .storage
            .write_file(&self.written_file, written.as_bytes())
            .await?;
        tracing::info!("📁 Written presentation saved to {}", written_path);

        let revised = reviewer.revise(topic, &written).await?;
        let mut output = self.review(&revised).await?;
        output.written_path = Some(written_path);
        Ok(output)
    }
}

use clap::Parser;
use slide_review::app::crew::{review_pipeline, reviewer_agent, writing_pipeline, CrewOutput};
use slide_review::config::Command;
use slide_review::core::Storage;
use slide_review::domain::model::LinkStatus;
use slide_review::utils::error::ErrorSeverity;
use slide_review::utils::logger::{self, LogFormat};
use slide_review::utils::validation::Validate;
use slide_review::{
    ChatCompletionsGenerator, CliConfig, LocalStorage, PresentationCrew, ReviewConfig,
    ReviewError, SerperSearch,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(cli.json_logs), cli.verbose);

    tracing::info!("Starting slide-review");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    match run(&cli, &config).await {
        Ok(output) => {
            let broken: Vec<_> = output
                .report
                .actions
                .iter()
                .filter(|a| a.status() == LinkStatus::Broken)
                .collect();
            for action in &broken {
                tracing::info!("🔗 {} was repaired or flagged", action.url());
            }
            if let Some(written) = &output.written_path {
                println!("📝 Written presentation: {}", written);
            }
            tracing::info!(
                "✅ Review completed: {} links checked, {} repaired or flagged",
                output.report.actions.len(),
                broken.len()
            );
            println!("✅ Reviewed presentation: {}", output.reviewed_path);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

async fn run(cli: &CliConfig, config: &ReviewConfig) -> slide_review::Result<CrewOutput> {
    let search = SerperSearch::new(config.search_endpoint(), config.search_api_key()?);
    let crew = PresentationCrew::new(
        config,
        review_pipeline(config, search)?,
        LocalStorage::new(config.output_path()),
    );

    match &cli.command {
        Command::Review { input } => {
            let raw = LocalStorage::new(".").read_file(input).await?;
            let content = String::from_utf8_lossy(&raw);
            crew.review(&content).await
        }
        Command::Write { topic } => {
            let generator = ChatCompletionsGenerator::new(
                config.llm_endpoint(),
                config.llm_api_key()?,
                config.llm_model(),
            )
            .with_temperature(config.llm.temperature);
            let reviewer = reviewer_agent(config, generator.clone());
            let writer = writing_pipeline(config, generator);
            crew.write_and_review(&writer, &reviewer, &config.writer, topic)
                .await
        }
    }
}

fn exit_with(e: ReviewError) -> ! {
    tracing::error!(
        "❌ slide-review failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

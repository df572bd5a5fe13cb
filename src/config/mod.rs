pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::ReviewConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "slide-review")]
#[command(about = "Writes and reviews 30-slide markdown presentations, repairing dead links")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the output directory from the config
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Review an existing markdown presentation
    Review {
        /// Markdown file to review
        #[arg(short, long)]
        input: String,
    },
    /// Write a presentation with the LLM, then review it
    Write {
        /// Presentation topic
        #[arg(short, long)]
        topic: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file when given, otherwise defaults, then applies CLI overrides.
    pub fn load(&self) -> Result<ReviewConfig> {
        let mut config = match &self.config {
            Some(path) => ReviewConfig::from_file(path)?,
            None => ReviewConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.output.output_path = Some(output_path.clone());
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_command_with_override() {
        let cli = CliConfig::parse_from([
            "slide-review",
            "review",
            "--input",
            "write-1.md",
            "--output-path",
            "/tmp/decks",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(&cli.command, Command::Review { input } if input == "write-1.md"));

        let config = cli.load().unwrap();
        assert_eq!(config.output_path(), "/tmp/decks");
    }

    #[test]
    fn test_parse_write_command() {
        let cli = CliConfig::parse_from(["slide-review", "write", "--topic", "quantum networking"]);
        assert!(matches!(cli.command, Command::Write { ref topic } if topic == "quantum networking"));
        assert!(cli.config.is_none());
    }
}

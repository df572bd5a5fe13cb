pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpLinkChecker, llm::ChatCompletionsGenerator, serper::SerperSearch};
pub use app::crew::PresentationCrew;
pub use config::{cli::LocalStorage, toml_config::ReviewConfig};
pub use crate::core::pipeline::{ReviewPipeline, ReviewReport, WritingPipeline};
pub use utils::error::{Result, ReviewError};

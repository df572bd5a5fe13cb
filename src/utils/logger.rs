use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output shape of the host-side subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output for terminals.
    Compact,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Filter used when `RUST_LOG` is unset. The HTTP stack is held at `warn`
/// so link checks and search calls do not flood the review log.
pub fn default_directives(verbose: bool) -> String {
    let crate_level = if verbose { "debug" } else { "info" };
    format!("slide_review={},reqwest=warn,hyper=warn,hyper_util=warn,warn", crate_level)
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Call once, from the binary.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(filter(verbose));

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(verbose)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_current_span(false),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(EnvFilter::try_new(&directives).is_ok(), "{}", directives);
            assert!(directives.contains("reqwest=warn"));
        }
    }

    #[test]
    fn test_verbose_raises_crate_level_only() {
        assert!(default_directives(true).starts_with("slide_review=debug,"));
        assert!(default_directives(false).starts_with("slide_review=info,"));
        assert!(default_directives(true).ends_with(",warn"));
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(LogFormat::from_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(false), LogFormat::Compact);
    }
}

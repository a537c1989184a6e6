use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig, DEFAULT_LOG_LEVEL};

/// Filter from `RUST_LOG`, then the configured level, then the default
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    config
        .filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(&config.level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber. Logs go to stderr; stdout carries the model's text.
pub fn init_logging(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(build_filter(config));

    match config.format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        let config = LoggingConfig {
            level: "error".to_string(),
            filter: Some("debug".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&config).to_string(), "debug");
    }

    #[test]
    fn test_level_used_without_rust_log() {
        let config = LoggingConfig {
            level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(build_filter(&config).to_string(), "info");
    }

    #[test]
    fn test_invalid_directives_fall_back() {
        let config = LoggingConfig {
            level: "modelprobe=loud".to_string(),
            filter: Some("modelprobe=noisy".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&config).to_string(), DEFAULT_LOG_LEVEL);
    }
}

//! Logging and environment-file setup.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or unparseable.
const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` is pretty.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install the global tracing subscriber.
pub fn init(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Apply `.env.{environment}` and then `.env` from the working directory.
///
/// Variables already set in the process win over both files, and the
/// environment-specific file wins over `.env`. Missing files are skipped.
/// Returns the files that were loaded.
pub fn load_env_files(environment: &str) -> Vec<PathBuf> {
    [format!(".env.{environment}"), String::from(".env")]
        .iter()
        .filter_map(|name| dotenvy::from_filename(name).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("xml")), LogFormat::Pretty);
    }

    #[test]
    fn missing_env_files_are_skipped() {
        assert!(load_env_files("no-such-environment-for-tests").iter().all(|p| p.ends_with(".env")));
    }
}

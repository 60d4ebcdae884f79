//! Runtime configuration.
//!
//! Resolution order for the model path: `--model` flag, then `EXAM_MODEL_PATH`
//! (a `.env` file in the working directory is honored), then the default file
//! name next to the binary's working directory.

use std::path::PathBuf;

/// Default artifact file name.
pub const DEFAULT_MODEL_PATH: &str = "student_exam_predict_pipeline.json";

/// Environment variable overriding the artifact path.
pub const MODEL_PATH_ENV: &str = "EXAM_MODEL_PATH";

/// Environment variable naming a log file for the TUI.
pub const LOG_FILE_ENV: &str = "EXAM_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from the flag and the process environment.
    pub fn from_env(model_flag: Option<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(
            model_flag,
            std::env::var(MODEL_PATH_ENV).ok(),
            std::env::var(LOG_FILE_ENV).ok(),
        )
    }

    /// Pure resolution step, separated from the environment for testing.
    pub fn resolve(
        model_flag: Option<PathBuf>,
        model_env: Option<String>,
        log_env: Option<String>,
    ) -> Self {
        let model_path = model_flag
            .or_else(|| non_empty(model_env).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
        let log_file = non_empty(log_env).map(PathBuf::from);

        Self {
            model_path,
            log_file,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("flag.json")),
            Some("env.json".into()),
            None,
        );
        assert_eq!(config.model_path, PathBuf::from("flag.json"));
    }

    #[test]
    fn env_wins_over_default() {
        let config = AppConfig::resolve(None, Some("env.json".into()), None);
        assert_eq!(config.model_path, PathBuf::from("env.json"));
    }

    #[test]
    fn blank_env_falls_back_to_default() {
        let config = AppConfig::resolve(None, Some("  ".into()), Some(String::new()));
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.log_file, None);
    }
}

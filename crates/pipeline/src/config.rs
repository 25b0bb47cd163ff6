use render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub render: RenderConfig,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    /// Empty means any node type.
    pub allowed_nodes: Vec<String>,
    /// Empty means any relationship type.
    pub allowed_relationships: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            render: RenderConfig::default(),
            output_path: PathBuf::from("knowledge_graph.html"),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: extract::llm::DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            base_url: extract::llm::DEFAULT_BASE_URL.to_string(),
            allowed_nodes: Vec::new(),
            allowed_relationships: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load a JSON settings file. Keys not present keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            PipelineError::Configuration(format!("invalid settings in {}: {}", path.display(), e))
        })
    }
}

/// Extraction-service credential. Never printed.
#[derive(Clone, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Read the credential through `lookup` (normally `std::env::var`).
/// Absent or blank values are a configuration error.
pub fn load_api_key<F>(lookup: F) -> Result<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(API_KEY_VAR) {
        Some(value) if !value.trim().is_empty() => Ok(ApiKey(value.trim().to_string())),
        Some(_) => Err(PipelineError::Configuration(format!("{API_KEY_VAR} is empty"))),
        None => Err(PipelineError::Configuration(format!(
            "{API_KEY_VAR} is not set; export it or add it to a .env file"
        ))),
    }
}

/// Outcome of loading a `.env` file: the path loaded, `None` when there is no
/// file, or the parse error for a malformed one.
pub fn env_file_outcome(
    result: dotenvy::Result<PathBuf>,
) -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        let err = load_api_key(|_| None).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_blank_key() {
        let err = load_api_key(|_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_key_present() {
        let key = load_api_key(|name| {
            assert_eq!(name, API_KEY_VAR);
            Some(" sk-test \n".to_string())
        })
        .unwrap();

        assert_eq!(key.expose(), "sk-test");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.extraction.model, "gpt-4o-mini");
        assert_eq!(config.extraction.temperature, 0.0);
        assert_eq!(config.output_path, PathBuf::from("knowledge_graph.html"));
        assert!(config.render.directed);
    }

    #[test]
    fn test_settings_file_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"output_path": "out/graph.html", "extraction": {"allowed_nodes": ["Person"]}}"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/graph.html"));
        assert_eq!(config.extraction.allowed_nodes, vec!["Person".to_string()]);
        assert_eq!(config.extraction.model, "gpt-4o-mini");
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_env_file_missing_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = env_file_outcome(dotenvy::from_filename(dir.path().join(".env")));
        assert!(matches!(outcome, Ok(None)));
    }

    #[test]
    fn test_env_file_malformed_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT A VALID LINE\n").unwrap();

        let outcome = env_file_outcome(dotenvy::from_filename(&path));
        assert!(outcome.is_err());
    }

    #[test]
    fn test_settings_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = AppConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, PipelineError::Configuration(_)));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        let invalid = AppConfig::from_file(&bad).unwrap_err();
        assert!(invalid.to_string().contains("invalid settings"));
    }
}

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{env_file_outcome, load_api_key, ApiKey, AppConfig, ExtractionConfig, API_KEY_VAR};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOutput, Stage};

use extract::{Extractor, OpenAiClient};

/// Extractor backed by the OpenAI chat-completions API.
pub fn openai_extractor(api_key: &ApiKey, config: &ExtractionConfig) -> Extractor {
    let client = OpenAiClient::new(api_key.expose(), &config.model, config.temperature)
        .with_base_url(&config.base_url);

    Extractor::with_allowed_types(
        client,
        config.allowed_nodes.clone(),
        config.allowed_relationships.clone(),
    )
}

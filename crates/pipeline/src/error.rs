use thiserror::Error;

/// Fatal pipeline failures, one per stage that can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("extraction failed: {0:#}")]
    Extraction(anyhow::Error),

    #[error("rendering failed: {0:#}")]
    Render(anyhow::Error),
}

impl PipelineError {
    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Configuration(_) => "configuration",
            PipelineError::Extraction(_) => "extraction",
            PipelineError::Render(_) => "render",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

use clap::Parser;
use pipeline::{env_file_outcome, openai_extractor, AppConfig, Pipeline, PipelineError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE_TEXT: &str = include_str!("sample.txt");

#[derive(Parser)]
#[command(
    name = "knowledge-graph",
    version,
    about = "Extract entities and relationships from text and render them as an interactive graph"
)]
struct Cli {
    /// Text file to extract from. Defaults to a built-in sample.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Where to write the HTML page.
    #[arg(long)]
    output: Option<PathBuf>,
    /// JSON settings file overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Load .env (if present) before the filter reads RUST_LOG
    let env_file = env_file_outcome(dotenvy::dotenv());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = env_file {
        warn!(error = %e, "Ignoring malformed .env file");
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(path) => {
            println!("Graph saved to: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Configuration(format!("cannot read input {}: {}", path.display(), e))
        })?,
        None => SAMPLE_TEXT.to_string(),
    };

    info!(
        chars = text.len(),
        model = %config.extraction.model,
        "Generating graph"
    );

    let mut pipeline = Pipeline::new(config);
    let output = pipeline.run(
        &text,
        |name| std::env::var(name).ok(),
        openai_extractor,
    )?;

    Ok(output.output_path)
}

use extract::{GraphDocument, GraphExtractor, SourceDocument};
use graph::FilteredGraph;
use render::RenderedGraph;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{load_api_key, ApiKey, AppConfig, ExtractionConfig};
use crate::error::{PipelineError, Result};

/// Progress of a single run. Every failure is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigLoaded,
    Extracted,
    Filtered,
    Rendered,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ConfigLoaded => "config_loaded",
            Stage::Extracted => "extracted",
            Stage::Filtered => "filtered",
            Stage::Rendered => "rendered",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub output_path: PathBuf,
    pub filtered: FilteredGraph,
    pub rendered: RenderedGraph,
}

pub struct Pipeline {
    config: AppConfig,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Load credential -> extract -> filter -> render, in that order.
    /// `make_extractor` is only called once the credential has loaded.
    pub fn run<L, F, E>(&mut self, text: &str, lookup: L, make_extractor: F) -> Result<PipelineOutput>
    where
        L: Fn(&str) -> Option<String>,
        F: FnOnce(&ApiKey, &ExtractionConfig) -> E,
        E: GraphExtractor,
    {
        let result = self.run_stages(text, lookup, make_extractor);

        if let Err(e) = &result {
            warn!(stage = e.stage(), error = %e, "Pipeline failed");
            self.advance(Stage::Failed);
        }

        result
    }

    fn run_stages<L, F, E>(&mut self, text: &str, lookup: L, make_extractor: F) -> Result<PipelineOutput>
    where
        L: Fn(&str) -> Option<String>,
        F: FnOnce(&ApiKey, &ExtractionConfig) -> E,
        E: GraphExtractor,
    {
        let api_key = load_api_key(lookup)?;
        self.advance(Stage::ConfigLoaded);

        let extractor = make_extractor(&api_key, &self.config.extraction);
        let documents = extract_blocking(&extractor, text)?;
        self.advance(Stage::Extracted);

        let filtered = match first_document(&documents) {
            Some(document) => graph::filter_document(document),
            None => FilteredGraph::new(),
        };
        if filtered.is_empty() {
            warn!("No valid relationships extracted; rendering an empty graph");
        }
        self.advance(Stage::Filtered);

        let (rendered, output_path) =
            render::render_to_file(&filtered, &self.config.render, &self.config.output_path)
                .map_err(PipelineError::Render)?;
        self.advance(Stage::Rendered);

        self.advance(Stage::Done);
        Ok(PipelineOutput {
            output_path,
            filtered,
            rendered,
        })
    }

    fn advance(&mut self, next: Stage) {
        info!(from = %self.stage, to = %next, "Pipeline stage");
        self.stage = next;
    }
}

/// Drive the one extraction future to completion on a private runtime.
fn extract_blocking<E: GraphExtractor>(extractor: &E, text: &str) -> Result<Vec<GraphDocument>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PipelineError::Extraction(e.into()))?;

    let documents = [SourceDocument::new(text)];
    runtime
        .block_on(extractor.convert_to_graph_documents(&documents))
        .map_err(PipelineError::Extraction)
}

/// Only the first document is rendered.
fn first_document(documents: &[GraphDocument]) -> Option<&GraphDocument> {
    match documents {
        [] => {
            warn!("Extraction returned no documents");
            None
        }
        [first, rest @ ..] => {
            if !rest.is_empty() {
                warn!(ignored = rest.len(), "Only the first extracted document is rendered");
            }
            if first.is_empty() {
                warn!("Extracted document is empty");
            } else if first.nodes.is_empty() {
                warn!("Extracted document has no nodes");
            }
            Some(first)
        }
    }
}

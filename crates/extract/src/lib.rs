pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod schema;

pub use llm::OpenAiClient;
pub use normalizer::GraphNormalizer;
pub use schema::{GraphDocument, GraphNode, GraphRelationship, RawGraph, SourceDocument};

use anyhow::{Context, Result};
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use tracing::{debug, info};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").unwrap());

/// Turns text into typed entity/relationship graphs. Implemented against the
/// live service by [`Extractor`] and by deterministic doubles in tests.
pub trait GraphExtractor {
    /// One [`GraphDocument`] per input document, in input order.
    fn convert_to_graph_documents(
        &self,
        documents: &[SourceDocument],
    ) -> impl Future<Output = Result<Vec<GraphDocument>>>;
}

pub struct Extractor {
    llm_client: OpenAiClient,
    normalizer: GraphNormalizer,
    system_prompt: String,
}

impl Extractor {
    pub fn new(llm_client: OpenAiClient) -> Self {
        Self::with_normalizer(llm_client, GraphNormalizer::new())
    }

    pub fn with_normalizer(llm_client: OpenAiClient, normalizer: GraphNormalizer) -> Self {
        Self {
            llm_client,
            normalizer,
            system_prompt: prompt::build_system_prompt(&[], &[]),
        }
    }

    /// Restrict extraction to the given node and relationship types. The
    /// restriction is both requested in the prompt and enforced on the answer.
    pub fn with_allowed_types(
        llm_client: OpenAiClient,
        allowed_nodes: Vec<String>,
        allowed_relationships: Vec<String>,
    ) -> Self {
        let system_prompt = prompt::build_system_prompt(&allowed_nodes, &allowed_relationships);
        Self {
            llm_client,
            normalizer: GraphNormalizer::with_allowed(allowed_nodes, allowed_relationships),
            system_prompt,
        }
    }

    /// Extract a graph from a single document
    pub async fn extract_document(&self, document: &SourceDocument) -> Result<GraphDocument> {
        let user_prompt = prompt::build_user_prompt(&document.page_content);

        let json_str = self
            .llm_client
            .generate_json(&self.system_prompt, &user_prompt)
            .await
            .context("Failed to extract graph from text")?;

        let raw = parse_graph_response(&json_str)?;
        debug!(
            nodes = raw.nodes.len(),
            relationships = raw.relationships.len(),
            "Raw extraction received"
        );

        let (nodes, relationships) = self.normalizer.normalize(raw);

        Ok(GraphDocument {
            nodes,
            relationships,
            source: document.clone(),
        })
    }
}

impl GraphExtractor for Extractor {
    async fn convert_to_graph_documents(
        &self,
        documents: &[SourceDocument],
    ) -> Result<Vec<GraphDocument>> {
        let mut results = Vec::with_capacity(documents.len());

        for document in documents {
            let graph = self.extract_document(document).await?;
            info!(
                model = self.llm_client.model(),
                nodes = graph.nodes.len(),
                relationships = graph.relationships.len(),
                "Extracted graph document"
            );
            results.push(graph);
        }

        Ok(results)
    }
}

/// Parse the model's JSON answer, tolerating a surrounding Markdown code fence.
pub fn parse_graph_response(response: &str) -> Result<RawGraph> {
    let body = match CODE_FENCE.captures(response) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => response.trim(),
    };

    serde_json::from_str(body).context("Failed to parse extraction result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let raw = parse_graph_response(
            r#"{"nodes":[{"id":"Albert Einstein","type":"Person"}],
                "relationships":[{"source_node_id":"Albert Einstein","source_node_type":"Person",
                                  "target_node_id":"Ulm","target_node_type":"Location","type":"BORN_IN"}]}"#,
        )
        .unwrap();

        assert_eq!(raw.nodes.len(), 1);
        assert_eq!(raw.relationships[0].target_node_id, "Ulm");
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = parse_graph_response("```json\n{\"nodes\":[{\"id\":\"Ulm\",\"type\":\"Location\"}]}\n```").unwrap();

        assert_eq!(raw.nodes[0].id, "Ulm");
        assert!(raw.relationships.is_empty());
    }

    #[test]
    fn test_parse_missing_sections() {
        let raw = parse_graph_response("{}").unwrap();
        assert!(raw.nodes.is_empty());
        assert!(raw.relationships.is_empty());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_graph_response("I could not find any entities.").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let client = OpenAiClient::new("test-key", llm::DEFAULT_MODEL, 0.0)
            .with_base_url("http://127.0.0.1:9");
        let extractor = Extractor::new(client);

        let result = extractor
            .convert_to_graph_documents(&[SourceDocument::new("Einstein was born in Ulm.")])
            .await;

        assert!(result.is_err());
    }
}

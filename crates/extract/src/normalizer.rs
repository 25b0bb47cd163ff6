use regex::Regex;
use std::sync::LazyLock;

use crate::schema::{GraphNode, GraphRelationship, RawGraph};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Brings model output into a canonical form so that ids coming from the node
/// list and ids coming from relationship endpoints compare equal.
#[derive(Debug, Clone, Default)]
pub struct GraphNormalizer {
    allowed_nodes: Vec<String>,
    allowed_relationships: Vec<String>,
}

impl GraphNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to the given node / relationship types. Node types match
    /// case-insensitively; relationship types are normalized like the answer's,
    /// so "born in" allows `BORN_IN`. Empty lists allow everything.
    pub fn with_allowed(allowed_nodes: Vec<String>, allowed_relationships: Vec<String>) -> Self {
        Self {
            allowed_nodes: allowed_nodes.iter().map(|t| t.to_lowercase()).collect(),
            allowed_relationships: allowed_relationships
                .iter()
                .map(|t| relation_key(t))
                .collect(),
        }
    }

    /// Collapse whitespace and title-case each word: "  albert   einstein" -> "Albert Einstein"
    pub fn normalize_id(&self, id: &str) -> String {
        let collapsed = WHITESPACE.replace_all(id.trim(), " ");
        collapsed
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn normalize_type(&self, node_type: &str) -> String {
        capitalize(&WHITESPACE.replace_all(node_type.trim(), " "))
    }

    /// "worked at" -> "WORKED_AT"
    pub fn normalize_relation(&self, rel_type: &str) -> String {
        relation_key(rel_type)
    }

    pub fn node(&self, id: &str, node_type: &str) -> GraphNode {
        GraphNode::new(self.normalize_id(id), self.normalize_type(node_type))
    }

    fn node_allowed(&self, node: &GraphNode) -> bool {
        self.allowed_nodes.is_empty()
            || self.allowed_nodes.contains(&node.node_type.to_lowercase())
    }

    fn relationship_allowed(&self, rel: &GraphRelationship) -> bool {
        let type_ok = self.allowed_relationships.is_empty()
            || self
                .allowed_relationships
                .contains(&rel.rel_type);
        type_ok && self.node_allowed(&rel.source) && self.node_allowed(&rel.target)
    }

    /// Normalize a raw model answer into nodes and relationships. Nodes with a
    /// blank id or type, and relationships with a blank endpoint id or relation
    /// type, are skipped.
    pub fn normalize(&self, raw: RawGraph) -> (Vec<GraphNode>, Vec<GraphRelationship>) {
        let nodes = raw
            .nodes
            .iter()
            .filter(|n| !n.id.trim().is_empty() && !n.node_type.trim().is_empty())
            .map(|n| self.node(&n.id, &n.node_type))
            .filter(|n| self.node_allowed(n))
            .collect();

        let relationships = raw
            .relationships
            .iter()
            .filter(|r| {
                !r.source_node_id.trim().is_empty()
                    && !r.target_node_id.trim().is_empty()
                    && !r.rel_type.trim().is_empty()
            })
            .map(|r| {
                GraphRelationship::new(
                    self.node(&r.source_node_id, &r.source_node_type),
                    self.node(&r.target_node_id, &r.target_node_type),
                    self.normalize_relation(&r.rel_type),
                )
            })
            .filter(|r| self.relationship_allowed(r))
            .collect();

        (nodes, relationships)
    }
}

fn relation_key(rel_type: &str) -> String {
    WHITESPACE.replace_all(rel_type.trim(), "_").to_uppercase()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

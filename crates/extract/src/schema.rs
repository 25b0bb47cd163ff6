use serde::{Deserialize, Serialize};

/// Raw input text handed to the extraction service as one logical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub page_content: String,
}

impl SourceDocument {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
        }
    }
}

/// Directed, typed edge. Endpoints carry their own id and type and are not
/// guaranteed to appear in the owning document's node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRelationship {
    pub source: GraphNode,
    pub target: GraphNode,
    #[serde(rename = "type")]
    pub rel_type: String,
}

impl GraphRelationship {
    pub fn new(source: GraphNode, target: GraphNode, rel_type: impl Into<String>) -> Self {
        Self {
            source,
            target,
            rel_type: rel_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
    pub source: SourceDocument,
}

impl GraphDocument {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

/// Shape the model is asked to answer with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub relationships: Vec<RawRelationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelationship {
    pub source_node_id: String,
    #[serde(default)]
    pub source_node_type: String,
    pub target_node_id: String,
    #[serde(default)]
    pub target_node_type: String,
    #[serde(rename = "type")]
    pub rel_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_emptiness() {
        let mut document = GraphDocument {
            nodes: Vec::new(),
            relationships: Vec::new(),
            source: SourceDocument::new("Nothing to see here."),
        };
        assert!(document.is_empty());

        document.nodes.push(GraphNode::new("Ulm", "Location"));
        assert!(!document.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let node: GraphNode = serde_json::from_str(r#"{"id":"Ulm","type":"Location"}"#).unwrap();
        assert_eq!(node, GraphNode::new("Ulm", "Location"));
    }
}

use extract::{GraphDocument, GraphNode, GraphRelationship};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A document reduced to its valid relationships and the nodes they touch.
#[derive(Debug, Clone, Default)]
pub struct FilteredGraph {
    /// id -> node for every extracted node. Later duplicates overwrite earlier ones.
    pub node_lookup: HashMap<String, GraphNode>,
    /// Relationships whose endpoints both resolve, in original order.
    pub relationships: Vec<GraphRelationship>,
    /// Ids referenced by at least one valid relationship.
    pub node_ids: BTreeSet<String>,
}

impl FilteredGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an extracted node; returns the node it replaced, if any.
    pub fn add_node(&mut self, node: GraphNode) -> Option<GraphNode> {
        self.node_lookup.insert(node.id.clone(), node)
    }

    /// Keep `relationship` if both endpoints are known nodes.
    pub fn add_relationship(&mut self, relationship: GraphRelationship) -> bool {
        if !self.resolves(&relationship) {
            return false;
        }

        self.node_ids.insert(relationship.source.id.clone());
        self.node_ids.insert(relationship.target.id.clone());
        self.relationships.push(relationship);
        true
    }

    pub fn resolves(&self, relationship: &GraphRelationship) -> bool {
        self.node_lookup.contains_key(&relationship.source.id)
            && self.node_lookup.contains_key(&relationship.target.id)
    }

    /// Nodes to render, ordered by id. Each is the extracted node record, not
    /// the relationship endpoint copy.
    pub fn nodes(&self) -> Vec<&GraphNode> {
        self.node_ids
            .iter()
            .filter_map(|id| self.node_lookup.get(id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

/// Build the lookup, keep valid relationships and collect the ids they reference.
pub fn filter_graph(nodes: &[GraphNode], relationships: &[GraphRelationship]) -> FilteredGraph {
    let mut graph = FilteredGraph::new();

    for node in nodes {
        graph.add_node(node.clone());
    }

    let mut dropped = 0usize;
    for relationship in relationships {
        if !graph.add_relationship(relationship.clone()) {
            dropped += 1;
        }
    }

    debug!(
        nodes = graph.node_ids.len(),
        relationships = graph.relationships.len(),
        dropped,
        "Filtered graph"
    );

    graph
}

pub fn filter_document(document: &GraphDocument) -> FilteredGraph {
    filter_graph(&document.nodes, &document.relationships)
}

use graph::FilteredGraph;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::RenderConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    /// Tooltip
    pub title: String,
    pub group: String,
    pub shape: String,
    pub font: VisFont,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisFont {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrows: Option<String>,
}

/// Node and edge records as handed to vis-network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedGraph {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

impl RenderedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: &str, node_type: &str, font_color: &str) {
        self.nodes.push(VisNode {
            id: id.to_string(),
            label: id.to_string(),
            title: node_type.to_string(),
            group: node_type.to_string(),
            shape: "dot".to_string(),
            font: VisFont {
                color: font_color.to_string(),
            },
        });
    }

    pub fn add_edge(&mut self, from: &str, to: &str, rel_type: &str, directed: bool) {
        self.edges.push(VisEdge {
            from: from.to_string(),
            to: to.to_string(),
            label: rel_type.to_lowercase(),
            arrows: directed.then(|| "to".to_string()),
        });
    }

    /// Distinct node groups, sorted.
    pub fn groups(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .map(|n| n.group.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn from_filtered(filtered: &FilteredGraph, config: &RenderConfig) -> Self {
        let mut rendered = Self::new();

        for node in filtered.nodes() {
            rendered.add_node(&node.id, &node.node_type, &config.font_color);
        }

        for rel in &filtered.relationships {
            rendered.add_edge(&rel.source.id, &rel.target.id, &rel.rel_type, config.directed);
        }

        rendered
    }
}

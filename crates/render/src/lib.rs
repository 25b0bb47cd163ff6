pub mod config;
pub mod html;
pub mod network;

pub use config::{ForceAtlas2Based, PhysicsConfig, RenderConfig};
pub use html::{build_html, write_html};
pub use network::{RenderedGraph, VisEdge, VisNode};

use anyhow::Result;
use graph::FilteredGraph;
use std::path::{Path, PathBuf};

/// Map a filtered graph onto vis-network records and write the page.
/// Returns the records and the absolute path written.
pub fn render_to_file(
    filtered: &FilteredGraph,
    config: &RenderConfig,
    path: &Path,
) -> Result<(RenderedGraph, PathBuf)> {
    let rendered = RenderedGraph::from_filtered(filtered, config);
    let written = write_html(&rendered, config, path)?;
    Ok((rendered, written))
}

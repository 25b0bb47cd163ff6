use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RenderConfig;
use crate::network::RenderedGraph;

/// Self-contained page: vis-network from the CDN, data and options inline.
pub fn build_html(rendered: &RenderedGraph, config: &RenderConfig) -> Result<String> {
    let nodes_json = script_json(&rendered.nodes)?;
    let edges_json = script_json(&rendered.edges)?;
    let options_json = script_json(&json!({ "physics": config.physics }))?;

    let filter_menu = if config.filter_menu {
        build_filter_menu(&rendered.groups())
    } else {
        String::new()
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Knowledge Graph</title>
<script type="text/javascript" src="{cdn_url}"></script>
<style type="text/css">
  body {{ margin: 0; background-color: {bgcolor}; color: {font_color}; font-family: sans-serif; }}
  #filter-menu {{ padding: 8px; }}
  #filter-menu select {{ background-color: {bgcolor}; color: {font_color}; }}
  #mynetwork {{ width: {width}; height: {height}; background-color: {bgcolor}; position: relative; float: left; }}
</style>
</head>
<body>
{filter_menu}<div id="mynetwork"></div>
<script type="text/javascript">
  var nodes = new vis.DataSet({nodes_json});
  var edges = new vis.DataSet({edges_json});
  var options = {options_json};
  var selectedGroup = "";

  var nodesView = new vis.DataView(nodes, {{
    filter: function (node) {{ return selectedGroup === "" || node.group === selectedGroup; }}
  }});
  var edgesView = new vis.DataView(edges, {{
    filter: function (edge) {{ return nodesView.get(edge.from) !== null && nodesView.get(edge.to) !== null; }}
  }});

  function filterGroup(group) {{
    selectedGroup = group;
    nodesView.refresh();
    edgesView.refresh();
  }}

  var container = document.getElementById("mynetwork");
  var network = new vis.Network(container, {{ nodes: nodesView, edges: edgesView }}, options);
</script>
</body>
</html>
"#,
        cdn_url = escape_html(&config.cdn_url),
        bgcolor = escape_html(&config.bgcolor),
        font_color = escape_html(&config.font_color),
        width = escape_html(&config.width),
        height = escape_html(&config.height),
        filter_menu = filter_menu,
        nodes_json = nodes_json,
        edges_json = edges_json,
        options_json = options_json,
    ))
}

/// Write the page to `path`, replacing any existing file. Returns the absolute path.
pub fn write_html(rendered: &RenderedGraph, config: &RenderConfig, path: &Path) -> Result<PathBuf> {
    let html = build_html(rendered, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    std::fs::write(path, html)
        .with_context(|| format!("Failed to write graph to {}", path.display()))?;

    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    info!(
        path = %absolute.display(),
        nodes = rendered.nodes.len(),
        edges = rendered.edges.len(),
        "Wrote graph"
    );

    Ok(absolute)
}

fn build_filter_menu(groups: &[&str]) -> String {
    let mut menu = String::from(
        "<div id=\"filter-menu\">\n<label for=\"group-filter\">Group </label>\n<select id=\"group-filter\" onchange=\"filterGroup(this.value)\">\n<option value=\"\">All</option>\n",
    );
    for group in groups {
        let escaped = escape_html(group);
        menu.push_str(&format!("<option value=\"{escaped}\">{escaped}</option>\n"));
    }
    menu.push_str("</select>\n</div>\n");
    menu
}

/// JSON safe to inline in a `<script>` element: no raw `<`, `>` or `&`, so no
/// label can open a comment or close the element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("Failed to serialize graph data")?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

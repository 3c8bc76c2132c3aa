//! Writing a run's graph to disk.
//!
//! The page is a static HTML shell with the graph inlined as two script
//! variables; the renderer itself is loaded from a CDN.

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::pipeline::GraphRun;

/// Marker in the page shell replaced by the graph script.
pub const SCRIPT_MARKER: &str = "<!-- component-graph -->";
const GENERATED_MARKER: &str = "<!-- component-graph:generated -->";

pub const HTML_FILENAME: &str = "index.html";
pub const JSON_FILENAME: &str = "graph.json";

const PAGE_TEMPLATE: &str = include_str!("../assets/index.html");

/// Render the page for a run without touching the filesystem.
pub fn render_page(run: &GraphRun) -> Result<String> {
    let script = run.inlined_script()?;
    Ok(PAGE_TEMPLATE
        .replace(GENERATED_MARKER, &Local::now().to_rfc3339())
        .replace(SCRIPT_MARKER, &script))
}

/// Write `index.html` into `target_dir`, creating it if needed.
pub fn emit_page(run: &GraphRun, target_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(target_dir)?;
    let path = target_dir.join(HTML_FILENAME);
    fs::write(&path, render_page(run)?)?;
    info!(path = %path.display(), "graph page written");
    Ok(path)
}

/// Write the raw `{nodes, edges}` graph as `graph.json`.
pub fn emit_json(run: &GraphRun, target_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(target_dir)?;
    let path = target_dir.join(JSON_FILENAME);
    let json = serde_json::to_string_pretty(run.graph()?)?;
    fs::write(&path, json)?;
    info!(path = %path.display(), "graph json written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph::{Classification, ComponentEntry, ComponentRegistry, VisualGraph};

    fn run(legend: bool) -> GraphRun {
        let registry: ComponentRegistry = [
            (
                "App".to_string(),
                ComponentEntry {
                    classification: Classification::new(false, true),
                    children: vec!["Header".to_string()],
                },
            ),
            ("Header".to_string(), ComponentEntry::default()),
        ]
        .into_iter()
        .collect();
        let config = GraphConfig {
            legend,
            ..GraphConfig::default()
        };
        GraphRun::new(config, registry)
    }

    #[test]
    fn test_render_page_inlines_graph() {
        let page = render_page(&run(false)).unwrap();
        assert!(!page.contains(SCRIPT_MARKER));
        assert!(!page.contains(GENERATED_MARKER));
        assert!(page.contains("var nodes = [{\"id\":0,\"label\":\"App\",\"color\":\"#ee3524\",\"group\":0}"));
        assert!(page.contains("var edges = [{\"from\":0,\"to\":1}];"));
    }

    #[test]
    fn test_emit_page_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph");
        let run = run(true);

        let html = emit_page(&run, &target).unwrap();
        assert_eq!(html, target.join(HTML_FILENAME));
        let page = fs::read_to_string(&html).unwrap();
        assert!(page.contains("\"label\":\"Store and Actions\""));
        assert!(page.contains("\"shape\":\"box\""));

        let json = emit_json(&run, &target).unwrap();
        let graph: VisualGraph = serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(&graph, run.graph().unwrap());
    }
}

//! Regenerate the graph whenever project sources change.
//!
//! Every rebuild is a fresh scan and a fresh `GraphRun`; no registry or
//! graph survives from one rebuild to the next.

use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::GraphConfig;
use crate::emit::emit_page;
use crate::error::Result;
use crate::graph::scan_project;
use crate::parser::SupportedLanguage;
use crate::pipeline::generate;

const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Scan `root`, generate, and write the page. Returns the page path.
pub fn rebuild(root: &Path, config: &GraphConfig) -> Result<PathBuf> {
    let compilation = scan_project(root)?;
    let run = generate(&compilation, config.clone())?;
    emit_page(&run, &config.resolve_target(root))
}

/// Whether a changed path should trigger a rebuild.
pub fn is_relevant(path: &Path, target_dir: &Path) -> bool {
    if path.starts_with(target_dir) {
        return false;
    }
    if path.components().any(|c| c.as_os_str() == OsStr::new("node_modules")) {
        return false;
    }
    SupportedLanguage::from_path(path).is_some()
}

/// Build once, then rebuild on every debounced change until the watcher
/// channel closes. Failed rebuilds are logged and watching continues.
pub fn watch(root: &Path, config: &GraphConfig, debounce_ms: u64) -> Result<()> {
    let root = root.canonicalize()?;
    let target_dir = config.resolve_target(&root);
    let debounce = if debounce_ms == 0 {
        DEFAULT_DEBOUNCE_MS
    } else {
        debounce_ms
    };

    report(rebuild(&root, config));

    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(Duration::from_millis(debounce), tx)?;
    debouncer
        .watcher()
        .watch(&root, RecursiveMode::Recursive)?;
    info!(root = %root.display(), "watching for changes");

    for result in rx {
        match result {
            Ok(events) => {
                let changed = events
                    .iter()
                    .filter(|event| is_relevant(&event.path, &target_dir))
                    .count();
                if changed > 0 {
                    info!(changed, "sources changed, regenerating");
                    report(rebuild(&root, config));
                }
            }
            Err(e) => warn!(error = %e, "watch error"),
        }
    }
    Ok(())
}

fn report(result: Result<PathBuf>) {
    match result {
        Ok(path) => info!(path = %path.display(), "graph updated"),
        Err(e) => error!(error = %e, "graph generation failed"),
    }
}

//! Project scanner — turns a source directory into a `Compilation`.
//!
//! Walks script files respecting .gitignore, extracts each file's import
//! requests with tree-sitter, and resolves relative requests to the files
//! that were scanned. Package imports stay unresolved.

use ignore::WalkBuilder;
use path_clean::PathClean;
use rayon::prelude::*;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::compilation::{Compilation, Module, ModuleId};
use crate::error::Result;
use crate::parser::{extract_requests_with, SupportedLanguage};

/// A file read and parsed, before its requests are resolved.
struct ScannedFile {
    path: PathBuf,
    source: Option<String>,
    requests: Vec<String>,
    error: Option<String>,
}

/// Build a compilation from all script files under `root`.
///
/// Module ids follow sorted path order, so repeated scans of an unchanged
/// tree produce identical compilations.
pub fn scan_project(root: &Path) -> Result<Compilation> {
    let root = root.canonicalize()?;
    let files = script_files(&root);
    debug!(root = %root.display(), files = files.len(), "scanning project");

    let scanned: Vec<ScannedFile> = files.par_iter().map(|path| scan_file(path)).collect();

    let mut compilation = Compilation::new();
    let mut index: HashMap<PathBuf, ModuleId> = HashMap::with_capacity(scanned.len());
    for file in &scanned {
        let request = relative_request(&root, &file.path);
        let mut module = Module::new(request).with_path(file.path.clone());
        module.source = file.source.clone();
        let id = compilation.add_module(module);
        index.insert(file.path.clone(), id);
    }

    for (position, file) in scanned.into_iter().enumerate() {
        let from = ModuleId(position);
        if let Some(error) = file.error {
            compilation.push_error(error);
        }
        for request in file.requests {
            let target = resolve_request(&root, &file.path, &request)
                .and_then(|resolved| index.get(&resolved).copied());
            compilation.add_dependency(from, Some(&request), target);
        }
    }

    info!(
        modules = compilation.len(),
        errors = compilation.errors().len(),
        "project scanned"
    );
    Ok(compilation)
}

/// Sorted list of script files under `root`, skipping `node_modules`.
fn script_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walker(root)
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| SupportedLanguage::from_path(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn walker(root: &Path) -> ignore::Walk {
    WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(|entry| entry.file_name() != OsStr::new("node_modules"))
        .build()
}

fn scan_file(path: &Path) -> ScannedFile {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to read file");
            return ScannedFile {
                path: path.to_path_buf(),
                source: None,
                requests: Vec::new(),
                error: Some(format!("{}: {}", path.display(), e)),
            };
        }
    };

    let requests = match SupportedLanguage::from_path(path) {
        Some(language) => extract_requests_with(language, &source),
        None => Ok(Vec::new()),
    };
    let (requests, error) = match requests {
        Ok(requests) => (requests, None),
        Err(e) => (Vec::new(), Some(format!("{}: {}", path.display(), e))),
    };
    debug!(file = %path.display(), requests = requests.len(), "parsed file");

    ScannedFile {
        path: path.to_path_buf(),
        source: Some(source),
        requests,
        error,
    }
}

/// Project-relative path with `/` separators.
fn relative_request(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a request made by `from` to a file on disk.
///
/// Relative requests are resolved against the importing file's directory,
/// `/`-prefixed ones against the project root. Bare package names return
/// `None`.
pub fn resolve_request(root: &Path, from: &Path, request: &str) -> Option<PathBuf> {
    let candidate = if request.starts_with("./") || request.starts_with("../") {
        from.parent()?.join(request).clean()
    } else if let Some(rooted) = request.strip_prefix('/') {
        root.join(rooted).clean()
    } else {
        return None;
    };

    if candidate.is_file() {
        return Some(candidate);
    }
    for ext in SupportedLanguage::RESOLVE_EXTENSIONS {
        let mut with_ext = candidate.clone().into_os_string();
        with_ext.push(".");
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }
    if candidate.is_dir() {
        for ext in SupportedLanguage::RESOLVE_EXTENSIONS {
            let index = candidate.join(format!("index.{ext}"));
            if index.is_file() {
                return Some(index);
            }
        }
    }
    None
}

/// Get statistics about what files would be scanned in a directory.
pub fn scan_stats(root: &Path) -> ScanStats {
    let mut stats = ScanStats::default();

    for path in script_files(root) {
        if let Some(lang) = SupportedLanguage::from_path(&path) {
            stats.total_files += 1;
            match lang {
                SupportedLanguage::JavaScript => stats.js_files += 1,
                SupportedLanguage::TypeScript | SupportedLanguage::Tsx => stats.ts_files += 1,
            }
        }
    }

    stats
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub total_files: usize,
    pub js_files: usize,
    pub ts_files: usize,
}

impl std::fmt::Display for ScanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Found {} script files (JS: {}, TS: {})",
            self.total_files, self.js_files, self.ts_files
        )
    }
}

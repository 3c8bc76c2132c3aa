//! # component-graph
//!
//! Component dependency graphs for Flux/React applications.
//!
//! component-graph walks a project's module graph from a root component,
//! keeps only the modules that declare a component, colors each one by
//! whether it talks to stores and/or dispatches actions, and writes an
//! interactive page that renders the result.
//!
//! ## Key Features
//!
//! - **Two identity strategies**: declared in source, or derived from the path
//! - **Role colors**: Store and Actions, Store, Actions, Pure
//! - **Outputs**: HTML page, JSON, Graphviz DOT
//! - **Live**: file watcher regenerates on change
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use component_graph::{emit_page, generate, scan_project, GraphConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let compilation = scan_project(root)?;
//! let run = generate(&compilation, GraphConfig::load_from_root(root)?)?;
//! emit_page(&run, &run.config().resolve_target(root))?;
//! # Ok::<(), component_graph::GraphError>(())
//! ```

pub mod cli;
pub mod compilation;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod parser;
pub mod pipeline;
pub mod watcher;

// Re-exports for convenience
pub use error::{GraphError, Result};

// Host model
pub use compilation::{Compilation, Dependency, Module, ModuleId};
pub use config::{GraphConfig, IdentityStrategy};

// Graph re-exports
pub use graph::{
    scan_project, scan_stats, Classification, Classifier, Color, ComponentRegistry, Edge,
    IdentityResolver, Node, RegistrySummary, Role, ScanStats, VisualGraph,
};
pub use parser::SupportedLanguage;

// Generation and output
pub use emit::{emit_json, emit_page, render_page};
pub use pipeline::{generate, GraphRun};

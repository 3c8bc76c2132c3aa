//! Component graph module — the core of component-graph.
//!
//! Identity resolution, capability classification, the registry traversal,
//! and assembly of the rendered graph, plus the scanner that produces the
//! module set they read.

pub mod builder;
pub mod classify;
pub mod engine;
pub mod identity;
pub mod types;
pub mod visual;

pub use builder::{resolve_request, scan_project, scan_stats, ScanStats};
pub use classify::Classifier;
pub use engine::{find_component, ComponentRegistry, GraphBuilder, RegistrySummary};
pub use identity::{name_from_request, name_from_source, IdentityResolver};
pub use types::{Classification, Color, ComponentEntry, Edge, Node, Role, Shape};
pub use visual::VisualGraph;

//! CLI definitions for component-graph.
//!
//! Commands:
//! - Output: build, json, dot
//! - Inspect: stats, scan
//! - Live: watch

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{GraphConfig, IdentityStrategy};

#[derive(Parser)]
#[command(name = "component-graph")]
#[command(about = "Component dependency graphs for Flux/React applications")]
#[command(version)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/component-graph.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ─── Output ───────────────────────────────────────────────────
    /// Scan the project and write the graph page
    Build {
        #[command(flatten)]
        graph: GraphArgs,

        /// Also write graph.json next to the page
        #[arg(long)]
        json: bool,
    },

    /// Print the graph as JSON ({nodes, edges})
    Json {
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Print the graph as Graphviz DOT
    Dot {
        #[command(flatten)]
        graph: GraphArgs,
    },

    // ─── Inspect ──────────────────────────────────────────────────
    /// Show component counts per role
    Stats {
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Show which files would be scanned
    Scan,

    // ─── Live ─────────────────────────────────────────────────────
    /// Rebuild the page whenever sources change
    Watch {
        #[command(flatten)]
        graph: GraphArgs,

        /// Debounce window in milliseconds
        #[arg(long, default_value = "300")]
        debounce: u64,
    },
}

/// Flags that override values from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Root component name
    #[arg(long = "component")]
    pub root_component: Option<String>,

    /// Actions directory token
    #[arg(long)]
    pub actions: Option<String>,

    /// Stores directory token
    #[arg(long)]
    pub stores: Option<String>,

    /// Components directory token (path identity strategy)
    #[arg(long)]
    pub components: Option<String>,

    /// Identity strategy: source or path
    #[arg(long)]
    pub identity: Option<IdentityStrategy>,

    /// Output directory
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Add legend nodes
    #[arg(long)]
    pub legend: bool,
}

impl GraphArgs {
    /// Layer the flags over `config`.
    pub fn apply(&self, mut config: GraphConfig) -> GraphConfig {
        if let Some(root) = &self.root_component {
            config.root = root.clone();
        }
        if let Some(actions) = &self.actions {
            config.actions = actions.clone();
        }
        if let Some(stores) = &self.stores {
            config.stores = stores.clone();
        }
        if let Some(components) = &self.components {
            config.components = Some(components.clone());
        }
        if let Some(identity) = self.identity {
            config.identity = identity;
        }
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if self.legend {
            config.legend = true;
        }
        config
    }
}

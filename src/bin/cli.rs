//! component-graph CLI.
//!
//! Usage:
//!   component-graph build              # Write <target>/index.html
//!   component-graph build --legend     # ... with legend nodes
//!   component-graph json               # Print {nodes, edges}
//!   component-graph dot | dot -Tsvg    # Graphviz output
//!   component-graph stats              # Component counts per role
//!   component-graph watch              # Rebuild on change

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use component_graph::cli::{Cli, Commands, GraphArgs};
use component_graph::{
    emit_json, emit_page, generate, scan_project, scan_stats, watcher, GraphConfig, GraphRun,
};

fn main() {
    // Logs go to stderr; stdout carries json/dot output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let file_config = match &cli.config {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::load_from_root(&root)?,
    };

    match cli.command {
        Commands::Build { graph, json } => {
            let run = generate_run(&root, &graph, file_config)?;
            let target = run.config().resolve_target(&root);
            let page = emit_page(&run, &target)?;
            if json {
                emit_json(&run, &target)?;
            }
            let summary = run.summary();
            println!("✓ Graph written to {}", page.display());
            println!("  Components: {}", summary.components);
            println!("  Edges:      {}", summary.edges);
        }

        Commands::Json { graph } => {
            let run = generate_run(&root, &graph, file_config)?;
            println!("{}", serde_json::to_string_pretty(run.graph()?)?);
        }

        Commands::Dot { graph } => {
            let run = generate_run(&root, &graph, file_config)?;
            print!("{}", run.graph()?.to_dot());
        }

        Commands::Stats { graph } => {
            let run = generate_run(&root, &graph, file_config)?;
            println!("{}", serde_json::to_string_pretty(&run.summary())?);
        }

        Commands::Scan => {
            println!("{}", scan_stats(&root));
        }

        Commands::Watch { graph, debounce } => {
            let config = graph.apply(file_config);
            watcher::watch(&root, &config, debounce)?;
        }
    }

    Ok(())
}

fn generate_run(root: &Path, args: &GraphArgs, file_config: GraphConfig) -> Result<GraphRun> {
    let config = args.apply(file_config);
    let compilation = scan_project(root)?;
    Ok(generate(&compilation, config)?)
}

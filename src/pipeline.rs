//! One graph generation run.
//!
//! A `GraphRun` owns everything a single generation produces: the
//! configuration it ran with, the component registry, and the rendered graph,
//! which is assembled on first request and cached for the rest of the run.
//! Nothing is shared between runs.

use std::cell::OnceCell;
use tracing::{error, info};

use crate::compilation::Compilation;
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::graph::{find_component, Classifier, ComponentRegistry, GraphBuilder, IdentityResolver};
use crate::graph::{RegistrySummary, VisualGraph};

/// The state of one generation run.
#[derive(Debug)]
pub struct GraphRun {
    config: GraphConfig,
    registry: ComponentRegistry,
    graph: OnceCell<VisualGraph>,
}

impl GraphRun {
    /// Wrap an already built registry.
    pub fn new(config: GraphConfig, registry: ComponentRegistry) -> Self {
        Self {
            config,
            registry,
            graph: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The rendered graph. Assembled on the first call; every later call
    /// returns the same value without walking the registry again.
    pub fn graph(&self) -> Result<&VisualGraph> {
        if let Some(graph) = self.graph.get() {
            return Ok(graph);
        }
        let graph = VisualGraph::assemble(&self.registry, &self.config.root, self.config.legend)?;
        Ok(self.graph.get_or_init(|| graph))
    }

    /// `var nodes = ...; var edges = ...;` for the rendered page.
    pub fn inlined_script(&self) -> Result<String> {
        self.graph()?.to_script()
    }

    pub fn summary(&self) -> RegistrySummary {
        self.registry.summary()
    }
}

/// Run graph generation against a compilation.
///
/// Host diagnostics are logged but do not stop generation. The only fatal
/// condition besides invalid configuration is a root component that no
/// module declares.
pub fn generate(compilation: &Compilation, config: GraphConfig) -> Result<GraphRun> {
    report_host_errors(compilation);
    config.validate()?;

    let resolver = IdentityResolver::from_config(&config);
    let classifier = Classifier::from_config(&config);

    let root = find_component(compilation, &resolver, &config.root)
        .ok_or_else(|| GraphError::RootNotFound(config.root.clone()))?;

    let registry = GraphBuilder::new(compilation, &resolver, &classifier).build(root);
    info!(
        root = %config.root,
        components = registry.len(),
        "graph generation complete"
    );
    Ok(GraphRun::new(config, registry))
}

fn report_host_errors(compilation: &Compilation) {
    let errors = compilation.errors();
    if errors.is_empty() {
        return;
    }
    for diagnostic in errors {
        error!("{diagnostic}");
    }
    error!("=======================================");
    error!(" COMPILATION ERRORS. SEE ABOVE. ");
    error!("=======================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::Module;
    use crate::graph::Color;

    fn todo_app() -> Compilation {
        let mut compilation = Compilation::new();
        let index = compilation.add_module(Module::new("index.js").with_source("render(App)"));
        let app = compilation.add_module(
            Module::new("App.js").with_source("class App extends Component {}"),
        );
        let list = compilation.add_module(
            Module::new("TodoList.js").with_source("var TodoList = React.createClass({})"),
        );
        let store = compilation.add_module(Module::new("stores/TodoStore.js"));
        compilation.add_dependency(index, Some("./App"), Some(app));
        compilation.add_dependency(app, Some("./stores/TodoStore"), Some(store));
        compilation.add_dependency(app, Some("./TodoList"), Some(list));
        compilation.add_dependency(list, Some("./actions/TodoActions"), None);
        compilation
    }

    #[test]
    fn test_generate() {
        let run = generate(&todo_app(), GraphConfig::default()).unwrap();
        assert_eq!(run.registry().len(), 2);

        let graph = run.graph().unwrap();
        assert_eq!(graph.nodes[0].label, "App");
        assert_eq!(graph.nodes[0].color, Color::Red);
        assert_eq!(graph.nodes[1].label, "TodoList");
        assert_eq!(graph.nodes[1].color, Color::Orange);
    }

    #[test]
    fn test_root_not_found() {
        let config = GraphConfig {
            root: "Foobar".to_string(),
            ..GraphConfig::default()
        };
        let err = generate(&todo_app(), config).unwrap_err();
        assert!(matches!(err, GraphError::RootNotFound(ref name) if name == "Foobar"));
        assert_eq!(
            err.to_string(),
            "Root component not found. No component with name \"Foobar\""
        );
    }

    #[test]
    fn test_host_errors_do_not_stop_generation() {
        let mut compilation = todo_app();
        compilation.push_error("Module not found: Error: Cannot resolve './Missing'");
        let run = generate(&compilation, GraphConfig::default()).unwrap();
        assert_eq!(run.summary().components, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GraphConfig {
            identity: crate::config::IdentityStrategy::Path,
            ..GraphConfig::default()
        };
        assert!(matches!(
            generate(&todo_app(), config),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_graph_is_cached() {
        let run = generate(&todo_app(), GraphConfig::default()).unwrap();
        let first = run.graph().unwrap();
        let second = run.graph().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(run.inlined_script().unwrap(), run.inlined_script().unwrap());
    }

    #[test]
    fn test_runs_are_independent() {
        let with_legend = GraphConfig {
            legend: true,
            ..GraphConfig::default()
        };
        let first = generate(&todo_app(), with_legend).unwrap();
        let second = generate(&todo_app(), GraphConfig::default()).unwrap();

        assert_eq!(first.graph().unwrap().nodes.len(), 6);
        assert_eq!(second.graph().unwrap().nodes.len(), 2);
        assert!(!std::ptr::eq(first.graph().unwrap(), second.graph().unwrap()));
    }
}

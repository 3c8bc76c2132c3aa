//! Rendering the component registry as a node/edge graph.
//!
//! Node ids are handed out in the order nodes are first emitted, which is a
//! depth-first pre-order over the registry's children lists starting at the
//! root. A component reached a second time reuses its node, so every
//! registry child entry produces exactly one edge.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::engine::ComponentRegistry;
use super::types::{Edge, Node, Role, Shape, COMPONENT_GROUP, LEGEND_GROUP};
use crate::error::{GraphError, Result};

/// Nodes and edges ready for the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A node on the assembly stack.
struct Frame<'r> {
    id: usize,
    children: &'r [String],
    next_child: usize,
    /// Node that emitted this one; the edge is added once this subtree is done.
    parent: Option<usize>,
}

impl VisualGraph {
    /// Assemble the graph for `root`, optionally followed by the legend.
    pub fn assemble(registry: &ComponentRegistry, root: &str, legend: bool) -> Result<Self> {
        let mut graph = VisualGraph::default();
        let mut ids: HashMap<&str, usize> = HashMap::new();

        let (root_id, root_children) = graph.emit(registry, &mut ids, root)?;
        let mut stack = vec![Frame {
            id: root_id,
            children: root_children,
            next_child: 0,
            parent: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let children = frame.children;
            let Some(child) = children.get(frame.next_child) else {
                if let Some(parent) = frame.parent {
                    let to = frame.id;
                    graph.edges.push(Edge { from: parent, to });
                }
                stack.pop();
                continue;
            };
            frame.next_child += 1;
            let from = frame.id;

            if let Some(&to) = ids.get(child.as_str()) {
                graph.edges.push(Edge { from, to });
                continue;
            }
            let (id, children) = graph.emit(registry, &mut ids, child)?;
            stack.push(Frame {
                id,
                children,
                next_child: 0,
                parent: Some(from),
            });
        }

        if legend {
            graph.add_legend();
        }
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "visual graph assembled"
        );
        Ok(graph)
    }

    /// Append a component node and return its id with its children.
    fn emit<'r>(
        &mut self,
        registry: &'r ComponentRegistry,
        ids: &mut HashMap<&'r str, usize>,
        identity: &'r str,
    ) -> Result<(usize, &'r [String])> {
        let entry = registry
            .get(identity)
            .ok_or_else(|| GraphError::UnknownComponent(identity.to_string()))?;
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            label: identity.to_string(),
            color: entry.classification.color(),
            group: COMPONENT_GROUP,
            shape: None,
        });
        ids.insert(identity, id);
        Ok((id, entry.children.as_slice()))
    }

    /// Append one boxed node per role. Legend nodes have no edges.
    fn add_legend(&mut self) {
        for role in Role::ALL {
            let id = self.nodes.len();
            self.nodes.push(Node {
                id,
                label: role.label().to_string(),
                color: role.color(),
                group: LEGEND_GROUP,
                shape: Some(Shape::Box),
            });
        }
    }

    /// Nodes that stand for components (legend excluded).
    pub fn components(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| !node.is_legend())
    }

    /// Copy into a petgraph graph. Node indices equal node ids.
    pub fn to_petgraph(&self) -> DiGraph<Node, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            graph.add_node(node.clone());
        }
        for edge in &self.edges {
            graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), ());
        }
        graph
    }

    /// Render as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        let dot = Dot::with_attr_getters(
            &graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, _| String::new(),
            &|_, (_, node)| {
                let shape = match node.shape {
                    Some(Shape::Box) => "box",
                    None => "ellipse",
                };
                format!(
                    "label = {:?} shape = {} style = filled fillcolor = \"{}\"",
                    node.label,
                    shape,
                    node.color.hex()
                )
            },
        );
        format!("{dot:?}")
    }

    /// The `var nodes = ...; var edges = ...;` snippet embedded in the page.
    pub fn to_script(&self) -> Result<String> {
        Ok(format!(
            "var nodes = {}; var edges = {};",
            serde_json::to_string(&self.nodes)?,
            serde_json::to_string(&self.edges)?
        ))
    }
}

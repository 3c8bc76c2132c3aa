//! The component registry and the traversal that fills it.
//!
//! Starting from the root module, every reachable component is registered
//! once with its classification and the identities of its direct component
//! dependencies. An identity already in the registry is never revisited,
//! which also terminates dependency cycles.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::classify::Classifier;
use super::identity::IdentityResolver;
use super::types::{Classification, ComponentEntry, Role};
use crate::compilation::{Compilation, ModuleId};

/// Identity -> classification + children, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    entries: HashMap<String, ComponentEntry>,
    /// Identities in the order they were registered (pre-order).
    order: Vec<String>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component with no children yet. Returns `false` and leaves
    /// the registry untouched if the identity is already present.
    pub fn register(&mut self, identity: &str, classification: Classification) -> bool {
        if self.entries.contains_key(identity) {
            return false;
        }
        self.entries.insert(
            identity.to_string(),
            ComponentEntry {
                classification,
                children: Vec::new(),
            },
        );
        self.order.push(identity.to_string());
        true
    }

    /// Append `child` to the children of `parent`, if `parent` is registered.
    pub fn push_child(&mut self, parent: &str, child: &str) {
        if let Some(entry) = self.entries.get_mut(parent) {
            entry.children.push(child.to_string());
        }
    }

    pub fn get(&self, identity: &str) -> Option<&ComponentEntry> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentEntry)> {
        self.order
            .iter()
            .filter_map(|identity| self.entries.get(identity).map(|e| (identity.as_str(), e)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all children lists, i.e. the number of edges a rendered graph has.
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(|entry| entry.children.len()).sum()
    }

    pub fn summary(&self) -> RegistrySummary {
        let mut summary = RegistrySummary {
            components: self.len(),
            edges: self.edge_count(),
            ..RegistrySummary::default()
        };
        for entry in self.entries.values() {
            match entry.classification.role() {
                Role::StoreAndActions => summary.store_and_actions += 1,
                Role::Store => summary.store += 1,
                Role::Actions => summary.actions += 1,
                Role::Pure => summary.pure += 1,
            }
        }
        summary
    }
}

impl FromIterator<(String, ComponentEntry)> for ComponentRegistry {
    fn from_iter<I: IntoIterator<Item = (String, ComponentEntry)>>(iter: I) -> Self {
        let mut registry = ComponentRegistry::new();
        for (identity, entry) in iter {
            if registry.register(&identity, entry.classification) {
                if let Some(slot) = registry.entries.get_mut(&identity) {
                    slot.children = entry.children;
                }
            }
        }
        registry
    }
}

/// Counts describing a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub components: usize,
    pub edges: usize,
    pub store_and_actions: usize,
    pub store: usize,
    pub actions: usize,
    pub pure: usize,
}

/// Walks a compilation from a root module and produces a registry.
pub struct GraphBuilder<'a> {
    compilation: &'a Compilation,
    resolver: &'a IdentityResolver,
    classifier: &'a Classifier,
    /// Identity per module, derived at most once.
    identities: HashMap<ModuleId, Option<String>>,
    registry: ComponentRegistry,
}

/// One module on the traversal stack.
struct Frame {
    module: ModuleId,
    identity: String,
    next_dependency: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        compilation: &'a Compilation,
        resolver: &'a IdentityResolver,
        classifier: &'a Classifier,
    ) -> Self {
        Self {
            compilation,
            resolver,
            classifier,
            identities: HashMap::new(),
            registry: ComponentRegistry::new(),
        }
    }

    /// Register everything reachable from `root` and return the registry.
    ///
    /// The walk is a depth-first pre-order over dependency records in host
    /// order, kept on an explicit stack so deep component trees cannot
    /// overflow the call stack.
    pub fn build(mut self, root: ModuleId) -> ComponentRegistry {
        let compilation = self.compilation;
        let Some(root_identity) = self.identity(root) else {
            debug!(module = %root, "root module has no component identity");
            return self.registry;
        };

        let mut stack = Vec::new();
        if let Some(frame) = self.enter(root, root_identity) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let parent = frame.module;
            let index = frame.next_dependency;
            frame.next_dependency += 1;

            let Some(module) = compilation.module(parent) else {
                stack.pop();
                continue;
            };
            let Some(dependency) = module.dependencies.get(index) else {
                stack.pop();
                continue;
            };
            let Some(target) = dependency.module else {
                continue;
            };
            let Some(child) = self.identity(target) else {
                continue;
            };

            let parent_identity = frame.identity.clone();
            self.registry.push_child(&parent_identity, &child);
            if let Some(child_frame) = self.enter(target, child) {
                stack.push(child_frame);
            }
        }

        info!(
            components = self.registry.len(),
            edges = self.registry.edge_count(),
            "component registry built"
        );
        self.registry
    }

    /// Register `module` under `identity` unless already present.
    fn enter(&mut self, module: ModuleId, identity: String) -> Option<Frame> {
        if self.registry.contains(&identity) {
            return None;
        }
        let classification = self
            .compilation
            .module(module)
            .map(|m| self.classifier.classify(m))
            .unwrap_or_default();
        debug!(
            component = %identity,
            module = %module,
            dispatches_actions = classification.dispatches_actions,
            connects_to_store = classification.connects_to_store,
            "registering component"
        );
        self.registry.register(&identity, classification);
        Some(Frame {
            module,
            identity,
            next_dependency: 0,
        })
    }

    fn identity(&mut self, module: ModuleId) -> Option<String> {
        let compilation = self.compilation;
        let resolver = self.resolver;
        self.identities
            .entry(module)
            .or_insert_with(|| compilation.module(module).and_then(|m| resolver.resolve(m)))
            .clone()
    }
}

/// Find the first module whose identity is `name` (linear scan in module order).
pub fn find_component(
    compilation: &Compilation,
    resolver: &IdentityResolver,
    name: &str,
) -> Option<ModuleId> {
    compilation
        .modules()
        .find(|(_, module)| resolver.resolve(module).as_deref() == Some(name))
        .map(|(id, _)| id)
}

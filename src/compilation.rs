//! In-memory module graph that the component graph is extracted from.
//!
//! A `Compilation` plays the part of a bundler's module set: every module
//! participating in one build, each with its raw request, optional source
//! text, and ordered dependency records. Graph generation only reads it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Dense index of a module within its compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub usize);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One import edge as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// The import request as written (`"../stores/TodoStore"`). `None` for
    /// synthetic dependencies.
    pub request: Option<String>,
    /// The module the request resolved to. `None` for packages and
    /// anything the host could not resolve.
    pub module: Option<ModuleId>,
}

/// A single module of the compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Raw request string identifying the module (project-relative path for
    /// scanned projects).
    pub request: String,
    /// Location on disk, if the module came from a file.
    pub path: Option<PathBuf>,
    /// Source text. `None` when the host has no source for the module.
    pub source: Option<String>,
    /// Dependencies in the order the host reported them.
    pub dependencies: Vec<Dependency>,
}

impl Module {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Requests of all direct dependencies that carry one.
    pub fn requests(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter_map(|dependency| dependency.request.as_deref())
    }
}

/// All modules of one build, plus the diagnostics the host reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compilation {
    modules: Vec<Module>,
    errors: Vec<String>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Returns its id.
    pub fn add_module(&mut self, module: Module) -> ModuleId {
        let id = ModuleId(self.modules.len());
        self.modules.push(module);
        id
    }

    /// Append a dependency record to `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` does not belong to this compilation.
    pub fn add_dependency(
        &mut self,
        from: ModuleId,
        request: Option<&str>,
        target: Option<ModuleId>,
    ) {
        self.modules[from.0].dependencies.push(Dependency {
            request: request.map(str::to_string),
            module: target,
        });
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.0)
    }

    /// Iterate modules with their ids, in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, module)| (ModuleId(index), module))
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Diagnostics reported while the module set was produced.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

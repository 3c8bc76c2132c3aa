//! Capability classification from a module's direct imports.
//!
//! Membership is a plain substring test on each dependency request, not a
//! path-segment comparison: `"../legacy-actions/x"` counts for `"actions/"`.

use super::types::Classification;
use crate::compilation::Module;
use crate::config::GraphConfig;

/// Tokens a module's dependency requests are tested against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    actions: String,
    stores: String,
}

impl Classifier {
    pub fn new(actions: impl Into<String>, stores: impl Into<String>) -> Self {
        Self {
            actions: actions.into(),
            stores: stores.into(),
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(config.actions.clone(), config.stores.clone())
    }

    /// Classify `module` by its direct dependencies. Does not recurse.
    pub fn classify(&self, module: &Module) -> Classification {
        Classification {
            dispatches_actions: requests_contain(module, &self.actions),
            connects_to_store: requests_contain(module, &self.stores),
        }
    }
}

fn requests_contain(module: &Module, token: &str) -> bool {
    module.requests().any(|request| request.contains(token))
}

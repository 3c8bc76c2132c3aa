//! Component identity resolution.
//!
//! A module is a component when a name can be derived for it. The source
//! strategy looks for one of three declarations, in priority order:
//!
//! 1. `displayName: 'Name'` / `displayName = "Name"`
//! 2. `class Name extends Component`
//! 3. `var Name = React.createClass`
//!
//! The path strategy never looks at source and instead takes whatever
//! follows the components-directory token in the module request.

use regex::Regex;
use std::sync::LazyLock;

use crate::compilation::Module;
use crate::config::{GraphConfig, IdentityStrategy};

static DISPLAY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"displayName\s*[:=]\s*['"](.+)['"]"#).unwrap());
static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+(\w+)\s+extends\s+Component").unwrap());
static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\s+(\w+)\s+=\s+React\.createClass").unwrap());

/// Extensions dropped from path-derived identities.
const SCRIPT_EXTENSIONS: &[&str] = &[".tsx", ".jsx", ".mts", ".cts", ".mjs", ".cjs", ".ts", ".js"];

/// Derives component identities under one fixed strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolver {
    Source,
    Path { components: String },
}

impl IdentityResolver {
    /// Build the resolver selected by a configuration. A path strategy with
    /// no components token falls back to an empty token, which `validate`
    /// rejects before a run starts.
    pub fn from_config(config: &GraphConfig) -> Self {
        match config.identity {
            IdentityStrategy::Source => IdentityResolver::Source,
            IdentityStrategy::Path => IdentityResolver::Path {
                components: config.components.clone().unwrap_or_default(),
            },
        }
    }

    /// The component identity of `module`, or `None` if it is not a component.
    pub fn resolve(&self, module: &Module) -> Option<String> {
        match self {
            IdentityResolver::Source => module.source.as_deref().and_then(name_from_source),
            IdentityResolver::Path { components } => name_from_request(&module.request, components),
        }
    }
}

/// Extract a declared component name from source text.
pub fn name_from_source(source: &str) -> Option<String> {
    [&*DISPLAY_NAME, &*CLASS_NAME, &*VARIABLE_NAME]
        .into_iter()
        .find_map(|pattern| pattern.captures(source))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}

/// Take the part of `request` after the first occurrence of `components`,
/// minus any script extension.
pub fn name_from_request(request: &str, components: &str) -> Option<String> {
    if components.is_empty() {
        return None;
    }
    let start = request.find(components)? + components.len();
    let rest = &request[start..];
    let name = SCRIPT_EXTENSIONS
        .iter()
        .find_map(|ext| rest.strip_suffix(ext))
        .unwrap_or(rest);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_CLASS_WITH_DISPLAY_NAME: &str = r#"
var React = require('react');
var Header = require('./Header');

module.export = React.createClass({
  displayName: 'App',
  render: function() {
    return <div><Header /></div>;
  }
});
"#;

    const CLASS_WITH_DISPLAY_NAME: &str = r#"
import React, { Component } from 'react';

class Shell extends Component {
  render() { return <div />; }
}
Shell.displayName = "App";
export default Shell;
"#;

    const CLASS_SYNTAX: &str = r#"
import React, { Component } from 'react';

export default class App extends Component {
  render() { return <div />; }
}
"#;

    const VARIABLE_SYNTAX: &str = r#"
var React = require('react');

var App = React.createClass({
  render: function() { return <div />; }
});

module.exports = App;
"#;

    const NOT_A_COMPONENT: &str = r#"
var fs = require('fs');

function helper(a, b) {
  return a + b;
}
module.exports = helper;
"#;

    fn source_module(source: &str) -> Module {
        Module::new("App.js").with_source(source)
    }

    #[test]
    fn test_display_name_with_create_class() {
        let resolver = IdentityResolver::Source;
        assert_eq!(
            resolver.resolve(&source_module(CREATE_CLASS_WITH_DISPLAY_NAME)),
            Some("App".to_string())
        );
    }

    #[test]
    fn test_display_name_wins_over_class() {
        let resolver = IdentityResolver::Source;
        assert_eq!(
            resolver.resolve(&source_module(CLASS_WITH_DISPLAY_NAME)),
            Some("App".to_string())
        );
    }

    #[test]
    fn test_class_syntax() {
        assert_eq!(name_from_source(CLASS_SYNTAX), Some("App".to_string()));
    }

    #[test]
    fn test_variable_syntax() {
        assert_eq!(name_from_source(VARIABLE_SYNTAX), Some("App".to_string()));
    }

    #[test]
    fn test_class_wins_over_variable() {
        let source = "var Legacy = React.createClass({});\nclass Modern extends Component {}";
        assert_eq!(name_from_source(source), Some("Modern".to_string()));
    }

    #[test]
    fn test_not_a_component() {
        assert_eq!(name_from_source(NOT_A_COMPONENT), None);
    }

    #[test]
    fn test_missing_source() {
        let resolver = IdentityResolver::Source;
        assert_eq!(resolver.resolve(&Module::new("App.js")), None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let module = source_module(CLASS_WITH_DISPLAY_NAME);
        let resolver = IdentityResolver::Source;
        assert_eq!(resolver.resolve(&module), resolver.resolve(&module));
    }

    #[test]
    fn test_path_strategy() {
        let resolver = IdentityResolver::Path {
            components: "components/".to_string(),
        };
        let module = Module::new("src/components/Header.jsx");
        assert_eq!(resolver.resolve(&module), Some("Header".to_string()));

        let nested = Module::new("src/components/layout/Footer.js");
        assert_eq!(resolver.resolve(&nested), Some("layout/Footer".to_string()));

        let outside = Module::new("src/stores/TodoStore.js").with_source(CLASS_SYNTAX);
        assert_eq!(resolver.resolve(&outside), None);
    }

    #[test]
    fn test_path_strategy_ignores_source() {
        let resolver = IdentityResolver::Path {
            components: "components/".to_string(),
        };
        let module = Module::new("components/Panel.js").with_source(CLASS_SYNTAX);
        assert_eq!(resolver.resolve(&module), Some("Panel".to_string()));
    }

    #[test]
    fn test_path_strategy_bare_directory() {
        assert_eq!(name_from_request("src/components/", "components/"), None);
        assert_eq!(name_from_request("src/components/App.js", ""), None);
    }

    #[test]
    fn test_from_config() {
        let config = GraphConfig {
            identity: IdentityStrategy::Path,
            components: Some("ui/".to_string()),
            ..GraphConfig::default()
        };
        assert_eq!(
            IdentityResolver::from_config(&config),
            IdentityResolver::Path {
                components: "ui/".to_string()
            }
        );
        assert_eq!(
            IdentityResolver::from_config(&GraphConfig::default()),
            IdentityResolver::Source
        );
    }
}

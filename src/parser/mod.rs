//! Import extraction with tree-sitter.
//!
//! Collects every module request a file makes, in source order:
//! static `import`/`export ... from`, `require('x')`, and `import('x')`.
//! Requests built from template substitutions or expressions are skipped.

pub mod language;

pub use language::SupportedLanguage;

use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::error::{GraphError, Result};

/// Extract the import requests of a source file, detecting the grammar from
/// the file extension.
pub fn extract_requests(path: &Path, source: &str) -> Result<Vec<String>> {
    let language = SupportedLanguage::from_path(path).ok_or_else(|| {
        GraphError::Parse {
            language: "unknown",
            message: format!("unsupported file type: {}", path.display()),
        }
    })?;
    extract_requests_with(language, source)
}

/// Extract import requests using an explicit grammar.
pub fn extract_requests_with(language: SupportedLanguage, source: &str) -> Result<Vec<String>> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| GraphError::Parse {
            language: language.name(),
            message: e.to_string(),
        })?;

    let Some(tree) = parser.parse(source, None) else {
        return Ok(Vec::new());
    };

    let mut requests = Vec::new();
    collect_requests(&tree.root_node(), source.as_bytes(), &mut requests);
    Ok(requests)
}

/// Recursively walk the AST and collect module requests in document order.
fn collect_requests(node: &Node, source: &[u8], requests: &mut Vec<String>) {
    match node.kind() {
        "import_statement" | "export_statement" => {
            if let Some(request) = node
                .child_by_field_name("source")
                .and_then(|s| string_literal(&s, source))
            {
                requests.push(request);
            }
        }
        "call_expression" => {
            if let Some(request) = call_request(node, source) {
                requests.push(request);
            }
        }
        _ => {}
    }

    let count = node.child_count();
    for i in 0..count {
        if let Some(child) = node.child(i) {
            collect_requests(&child, source, requests);
        }
    }
}

/// `require('x')` or `import('x')` with a single literal argument.
fn call_request(node: &Node, source: &[u8]) -> Option<String> {
    let function = node.child_by_field_name("function")?;
    let is_loader = match function.kind() {
        "import" => true,
        "identifier" => function.utf8_text(source).ok()? == "require",
        _ => false,
    };
    if !is_loader {
        return None;
    }
    let arguments = node.child_by_field_name("arguments")?;
    let first = arguments.named_child(0)?;
    string_literal(&first, source)
}

/// The contents of a plain string literal, without quotes.
fn string_literal(node: &Node, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node.utf8_text(source).ok()?;
    let inner = text
        .strip_prefix(['\'', '"'])
        .and_then(|t| t.strip_suffix(['\'', '"']))?;
    Some(inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_es_module_imports() {
        let source = r#"
import React, { Component } from 'react';
import Header from './Header';
import './styles.css';
export { default as Footer } from "./Footer";

export default class App extends Component {
  render() { return <div><Header /></div>; }
}
"#;
        let requests = extract_requests(&PathBuf::from("App.jsx"), source).unwrap();
        assert_eq!(requests, vec!["react", "./Header", "./styles.css", "./Footer"]);
    }

    #[test]
    fn test_commonjs_requires() {
        let source = r#"
var React = require('react');
var TodoStore = require('../stores/TodoStore');
var TodoActions = require("../actions/TodoActions");

module.exports = React.createClass({
  displayName: 'TodoApp',
  render: function() { return null; }
});
"#;
        let requests = extract_requests(&PathBuf::from("TodoApp.js"), source).unwrap();
        assert_eq!(
            requests,
            vec!["react", "../stores/TodoStore", "../actions/TodoActions"]
        );
    }

    #[test]
    fn test_dynamic_import_and_skipped_expressions() {
        let source = r#"
const Lazy = import('./Lazy');
const name = 'Other';
const Other = require('./' + name);
const Tpl = require(`./${name}`);
"#;
        let requests = extract_requests(&PathBuf::from("index.js"), source).unwrap();
        assert_eq!(requests, vec!["./Lazy"]);
    }

    #[test]
    fn test_typescript_imports() {
        let source = r#"
import type { Props } from './types';
import { Panel } from './Panel';

export function Shell(props: Props) {
  return <Panel {...props} />;
}
"#;
        let requests = extract_requests(&PathBuf::from("Shell.tsx"), source).unwrap();
        assert_eq!(requests, vec!["./types", "./Panel"]);
    }

    #[test]
    fn test_empty_source() {
        let requests = extract_requests(&PathBuf::from("empty.js"), "").unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn test_malformed_source_is_tolerated() {
        let source = "import Header from './Header';\nfunction broken( {";
        let result = extract_requests(&PathBuf::from("bad.js"), source);
        assert!(result.is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = extract_requests(&PathBuf::from("main.lua"), "require('x')");
        assert!(matches!(result, Err(GraphError::Parse { .. })));
    }
}

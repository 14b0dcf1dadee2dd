//! Template interpolation for request bodies
//!
//! Handles `{{ variable }}` interpolation in the SOAP envelope template.
//! Supports nested access like `{{ config.username }}` and `{{ vars.page }}`.
//! Bare names resolve against `config` first, then `vars`. Substituted
//! values are XML-escaped.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Context for template interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Connector configuration values
    pub config: Value,
    /// Per-request variables (page number, page size, ...)
    pub vars: Value,
}

impl TemplateContext {
    /// Create context with config values
    pub fn with_config(config: Value) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Set per-request variables
    pub fn set_vars(&mut self, vars: Value) -> &mut Self {
        self.vars = vars;
        self
    }

    /// Get a value by path (e.g., "config.username")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.is_empty() {
            return None;
        }

        let root = match parts[0] {
            "config" => &self.config,
            "vars" => &self.vars,
            _ => {
                if let Some(val) = get_nested_value(&self.config, &parts) {
                    return Some(val);
                }
                return get_nested_value(&self.vars, &parts);
            }
        };

        if parts.len() == 1 {
            Some(root)
        } else {
            get_nested_value(root, &parts[1..])
        }
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a template whose output is XML, escaping every substituted value
///
/// Substitution is single-pass: a value that itself looks like a template
/// is inserted literally and never re-expanded.
pub fn render_xml(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut undefined = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let var_path = &cap[1];
        match ctx.get(var_path) {
            Some(value) => quick_xml::escape::escape(value_to_string(value).as_str()).into_owned(),
            None => {
                undefined.push(var_path.to_string());
                String::new()
            }
        }
    });

    if undefined.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(undefined.join(", ")))
    }
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

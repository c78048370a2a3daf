//! Variable bindings used during simplification
//!
//! An environment is usually loaded from a JSON file holding a flat object
//! whose values are booleans or strings:
//!
//! ```json
//! { "a": true, "name": "熊猫" }
//! ```
//!
//! Entries of any other type are skipped with a warning. A document that is
//! not valid JSON, or not an object, yields an empty environment and a
//! warning. Only failing to read the file is an error.

use crate::ast::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal environment loading error
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Cannot read environment file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal problem found while loading an environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentWarning {
    #[error("Environment is not valid JSON: {0}")]
    Malformed(String),

    #[error("Environment must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Invalid value type for key '{key}': {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
}

/// An environment together with the warnings raised while loading it
#[derive(Debug, Clone, Default)]
pub struct LoadedEnvironment {
    pub environment: Environment,
    pub warnings: Vec<EnvironmentWarning>,
}

/// Mapping from variable name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding
    pub fn with_binding(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name`, replacing any previous binding
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if there are no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over the bindings in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Build an environment from JSON text
    pub fn from_json_str(text: &str) -> LoadedEnvironment {
        let mut loaded = LoadedEnvironment::default();

        let document: serde_json::Value = match serde_json::from_str(text) {
            Ok(document) => document,
            Err(err) => {
                loaded.warn(EnvironmentWarning::Malformed(err.to_string()));
                return loaded;
            }
        };

        let object = match document {
            serde_json::Value::Object(object) => object,
            other => {
                loaded.warn(EnvironmentWarning::NotAnObject(json_kind(&other)));
                return loaded;
            }
        };

        for (key, value) in object {
            let kind = json_kind(&value);
            match serde_json::from_value::<Value>(value) {
                Ok(value) => loaded.environment.insert(key, value),
                Err(_) => loaded.warn(EnvironmentWarning::UnsupportedValue { key, kind }),
            }
        }

        tracing::debug!(
            bindings = loaded.environment.len(),
            skipped = loaded.warnings.len(),
            "loaded environment"
        );
        loaded
    }

    /// Read and parse an environment file
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedEnvironment, EnvironmentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EnvironmentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json_str(&text))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}

impl LoadedEnvironment {
    fn warn(&mut self, warning: EnvironmentWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

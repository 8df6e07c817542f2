//! Error types for attribute code generation

use thiserror::Error;

/// Constraint violated by an input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Constraint {
    #[error("{message} (expected pattern {pattern})")]
    Pattern { pattern: String, message: String },

    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    NotAChoice { value: String, allowed: Vec<String> },

    #[error("value is required")]
    Missing,

    #[error("value is required when {depends_on} matches {condition}")]
    MissingDependent {
        depends_on: String,
        condition: String,
    },
}

/// An input field failed its declared rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {constraint}")]
pub struct ValidationError {
    pub field: String,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }
}

/// Template substitution failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateRenderError {
    #[error("template '{template}': no value for placeholder '{{{token}}}'")]
    MissingValue { template: String, token: String },

    #[error("template '{template}': value for '{{{token}}}' is a {kind} and cannot be substituted")]
    IncompatibleValue {
        template: String,
        token: String,
        kind: &'static str,
    },

    #[error("template '{template}': unbalanced brace at byte {offset}")]
    UnbalancedBrace { template: String, offset: usize },

    #[error("template '{template}': invalid placeholder name '{token}'")]
    InvalidPlaceholder { template: String, token: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateRenderError),

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Module output error: {0}")]
    Module(#[from] magegen_module::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

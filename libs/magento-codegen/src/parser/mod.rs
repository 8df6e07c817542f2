//! Parser for raw attribute parameters
//!
//! Turns loosely typed user input (manifest entries, CLI flags) into a
//! validated [`AttributeDefinition`]. Fields are checked in declaration order
//! so dependent fields are always evaluated after the field they depend on.

pub mod params;

use serde::{Deserialize, Serialize};

use crate::error::{Constraint, ValidationError};
use crate::ir::{AttributeDefinition, ExtraParams, InputKind, Scope};
pub use params::{
    descriptor, extra_params, params, Dependency, ParamDefault, ParamDescriptor, Rule,
};

/// Option list given either as comma-separated text or as a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    Csv(String),
    List(Vec<String>),
}

impl OptionsInput {
    /// Trimmed, non-empty option values in order
    pub fn values(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            OptionsInput::Csv(text) => text.split(',').collect(),
            OptionsInput::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Unvalidated attribute parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAttribute {
    pub attribute_label: Option<String>,
    pub frontend_input: Option<String>,
    pub options: Option<OptionsInput>,
    pub source_model: Option<bool>,
    pub scope: Option<String>,
    pub required: Option<bool>,
    #[serde(default)]
    pub extra: ExtraParams,
}

impl RawAttribute {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            attribute_label: Some(label.into()),
            ..Self::default()
        }
    }
}

fn param(name: &str) -> &'static ParamDescriptor {
    // Every name passed here is declared in `params`.
    descriptor(name).unwrap_or_else(|| unreachable!("undeclared parameter {name}"))
}

fn text_default(name: &str) -> &'static str {
    match param(name).default {
        Some(ParamDefault::Text(text)) => text,
        _ => "",
    }
}

/// Validate raw parameters into an attribute definition.
pub fn validate(raw: &RawAttribute) -> Result<AttributeDefinition, ValidationError> {
    let label = raw
        .attribute_label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ValidationError::new("attribute_label", Constraint::Missing))?;
    param("attribute_label").check(label)?;
    single_line("attribute_label", label)?;

    let input_code = raw
        .frontend_input
        .as_deref()
        .unwrap_or_else(|| text_default("frontend_input"));
    let input_param = param("frontend_input");
    input_param.check(input_code)?;
    let input_kind = InputKind::from_code(input_code)
        .ok_or_else(|| ValidationError::new(input_param.name, not_a_choice(input_param, input_code)))?;

    let options_param = param("options");
    let options = match options_param.depends {
        Some(dependency) if dependency.is_met(input_code) => {
            let values = raw.options.as_ref().map(OptionsInput::values).unwrap_or_default();
            for value in &values {
                single_line(options_param.name, value)?;
            }
            if values.is_empty() {
                return Err(ValidationError::new(
                    options_param.name,
                    Constraint::MissingDependent {
                        depends_on: dependency.field.to_string(),
                        condition: dependency.pattern.to_string(),
                    },
                ));
            }
            values
        }
        _ => {
            if raw.options.is_some() {
                tracing::debug!(input = input_code, "Ignoring options for non-selectable input");
            }
            Vec::new()
        }
    };

    let source_model_requested = raw.source_model.unwrap_or(false)
        && dependency_met(param("source_model"), input_code);

    let scope_code = raw
        .scope
        .as_deref()
        .unwrap_or_else(|| text_default("scope"));
    let scope = Scope::from_code(scope_code)
        .ok_or_else(|| ValidationError::new("scope", not_a_choice(param("scope"), scope_code)))?;

    let required = raw.required.unwrap_or(false);

    let mut extra = raw.extra.clone();

    match extra.attribute_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            param("attribute_code").check(code)?;
            extra.attribute_code = Some(code.to_string());
        }
        _ => extra.attribute_code = None,
    }

    let apply_to = param("apply_to");
    for code in &extra.apply_to {
        apply_to.check(code)?;
    }

    if extra.filterable && !dependency_met(param("filterable"), input_code) {
        tracing::debug!(input = input_code, "Ignoring filterable for this input");
        extra.filterable = false;
    }

    let definition = AttributeDefinition {
        label: label.to_string(),
        input_kind,
        scope,
        required,
        options,
        source_model_requested,
        extra,
    };

    // A derived code must satisfy the same rule as an explicit one.
    if definition.extra.attribute_code.is_none() {
        param("attribute_code").check(&definition.attribute_code())?;
    }

    Ok(definition)
}

/// Line breaks and other control characters would change literal values once
/// the generated code is indented.
fn single_line(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new(
            field,
            Constraint::Pattern {
                pattern: params::SINGLE_LINE_PATTERN.to_string(),
                message: "Control characters and line breaks are not allowed".to_string(),
            },
        ));
    }
    Ok(())
}

fn dependency_met(param: &ParamDescriptor, value: &str) -> bool {
    param.depends.map_or(true, |dependency| dependency.is_met(value))
}

fn not_a_choice(param: &ParamDescriptor, value: &str) -> Constraint {
    let allowed = match param.rule {
        Rule::Choice { choices } | Rule::MultipleChoice { choices } => {
            choices.iter().map(|c| c.value.to_string()).collect()
        }
        _ => Vec::new(),
    };
    Constraint::NotAChoice {
        value: value.to_string(),
        allowed,
    }
}

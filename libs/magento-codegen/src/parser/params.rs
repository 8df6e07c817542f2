//! Parameter declarations
//!
//! Ordered descriptor lists consumed by form builders and the CLI. Each
//! descriptor also carries the rule the parser enforces for that field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Constraint, ValidationError};
use crate::mapping::{self, Choice};

pub const LABEL_PATTERN: &str = r"^[a-zA-Z\d\-_\s]+$";
pub const ATTRIBUTE_CODE_PATTERN: &str = r"^[a-zA-Z]{1}\w{0,29}$";
/// Free text that ends up inside generated string literals
pub const SINGLE_LINE_PATTERN: &str = r"^\P{Cc}*$";

const SELECTABLE_INPUTS: &str = "^(?:select|multiselect)$";
const FILTERABLE_INPUTS: &str = "^(?:select|multiselect|price)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamDefault {
    Bool(bool),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Free,
    Pattern {
        pattern: &'static str,
        message: &'static str,
    },
    Choice {
        choices: &'static [Choice],
    },
    MultipleChoice {
        choices: &'static [Choice],
    },
    YesNo,
}

/// Field is only relevant when another field's value matches a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub field: &'static str,
    pub pattern: &'static str,
}

impl Dependency {
    pub fn is_met(&self, value: &str) -> bool {
        MATCHERS
            .get(self.pattern)
            .is_some_and(|regex| regex.is_match(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamDefault>,
    pub rule: Rule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends: Option<Dependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl ParamDescriptor {
    const fn new(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            required: false,
            default: None,
            rule,
            depends: None,
            description: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn default(mut self, default: ParamDefault) -> Self {
        self.default = Some(default);
        self
    }

    const fn depends(mut self, field: &'static str, pattern: &'static str) -> Self {
        self.depends = Some(Dependency { field, pattern });
        self
    }

    const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Check a single textual value against this field's rule.
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        match self.rule {
            Rule::Free | Rule::YesNo => Ok(()),
            Rule::Pattern { pattern, message } => {
                let matches = MATCHERS
                    .get(pattern)
                    .is_some_and(|regex| regex.is_match(value));
                if matches {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        self.name,
                        Constraint::Pattern {
                            pattern: pattern.to_string(),
                            message: message.to_string(),
                        },
                    ))
                }
            }
            Rule::Choice { choices } | Rule::MultipleChoice { choices } => {
                if mapping::is_choice(choices, value) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        self.name,
                        Constraint::NotAChoice {
                            value: value.to_string(),
                            allowed: choices.iter().map(|c| c.value.to_string()).collect(),
                        },
                    ))
                }
            }
        }
    }
}

static PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::new(
        "attribute_label",
        Rule::Pattern {
            pattern: LABEL_PATTERN,
            message: "Only alphanumeric",
        },
    )
    .required()
    .description("Example: color"),
    ParamDescriptor::new(
        "frontend_input",
        Rule::Choice {
            choices: mapping::FRONTEND_INPUT_CHOICES,
        },
    )
    .required()
    .default(ParamDefault::Text("text")),
    ParamDescriptor::new("options", Rule::Free)
        .depends("frontend_input", SELECTABLE_INPUTS)
        .description("Dropdown or Multiselect options comma separated"),
    ParamDescriptor::new("source_model", Rule::YesNo)
        .default(ParamDefault::Bool(false))
        .depends("frontend_input", SELECTABLE_INPUTS),
    ParamDescriptor::new(
        "scope",
        Rule::Choice {
            choices: mapping::SCOPE_CHOICES,
        },
    )
    .required()
    .default(ParamDefault::Text("ScopedAttributeInterface::SCOPE_STORE")),
    ParamDescriptor::new("required", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
];

static EXTRA_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::new(
        "attribute_code",
        Rule::Pattern {
            pattern: ATTRIBUTE_CODE_PATTERN,
            message: "Only alphanumeric and underscore characters are allowed, and need to start with a alphabetic character. And can't be longer then 30 characters",
        },
    )
    .description("Default to lowercase of label"),
    ParamDescriptor::new(
        "apply_to",
        Rule::MultipleChoice {
            choices: mapping::APPLY_TO_CHOICES,
        },
    )
    .default(ParamDefault::Text("")),
    ParamDescriptor::new("searchable", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
    ParamDescriptor::new("filterable", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false))
        .depends("frontend_input", FILTERABLE_INPUTS),
    ParamDescriptor::new("visible_on_front", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
    ParamDescriptor::new("comparable", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
    ParamDescriptor::new("used_in_product_listing", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
    ParamDescriptor::new("unique", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
    ParamDescriptor::new("transport_to_quote_item", Rule::YesNo)
        .required()
        .default(ParamDefault::Bool(false)),
];

/// Compiled regexes for every pattern referenced by a descriptor
static MATCHERS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    let mut matchers = HashMap::new();
    for param in PARAMS.iter().chain(EXTRA_PARAMS) {
        if let Rule::Pattern { pattern, .. } = param.rule {
            matchers.insert(pattern, Regex::new(pattern).expect("invalid parameter pattern"));
        }
        if let Some(dependency) = param.depends {
            matchers.insert(
                dependency.pattern,
                Regex::new(dependency.pattern).expect("invalid dependency pattern"),
            );
        }
    }
    matchers
});

/// Primary parameters, in prompt order
pub fn params() -> &'static [ParamDescriptor] {
    PARAMS
}

/// Extra parameters, in prompt order
pub fn extra_params() -> &'static [ParamDescriptor] {
    EXTRA_PARAMS
}

/// Look up a descriptor in either list by name.
pub fn descriptor(name: &str) -> Option<&'static ParamDescriptor> {
    PARAMS.iter().chain(EXTRA_PARAMS).find(|p| p.name == name)
}

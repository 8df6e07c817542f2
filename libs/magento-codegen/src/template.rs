//! Keyed template substitution
//!
//! Templates contain `{name}` placeholders; `{{` and `}}` produce literal
//! braces. A template is parsed once into segments and can then be rendered
//! against any number of value sets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, TemplateRenderError};

/// Built-in template for the product attribute installer body
pub const PRODUCT_ATTRIBUTE_TEMPLATE: &str = include_str!("../templates/productattribute.tmpl");

/// A value supplied for a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Text(String),
    /// Rendered as `true` / `false`
    Bool(bool),
    Integer(i64),
    /// Multi-valued; has no inline textual form
    List(Vec<String>),
}

impl TemplateValue {
    fn kind(&self) -> &'static str {
        match self {
            TemplateValue::Text(_) => "text",
            TemplateValue::Bool(_) => "boolean",
            TemplateValue::Integer(_) => "integer",
            TemplateValue::List(_) => "list",
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Integer(value)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(value: Vec<String>) -> Self {
        TemplateValue::List(value)
    }
}

pub type Substitutions = BTreeMap<&'static str, TemplateValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text. `name` identifies the template in errors.
    pub fn parse(
        name: impl Into<String>,
        text: &str,
    ) -> std::result::Result<Self, TemplateRenderError> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut token = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        token.push(c);
                    }
                    if !closed {
                        return Err(TemplateRenderError::UnbalancedBrace {
                            template: name,
                            offset,
                        });
                    }
                    if !is_identifier(&token) {
                        return Err(TemplateRenderError::InvalidPlaceholder {
                            template: name,
                            token,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(token));
                }
                '}' => {
                    return Err(TemplateRenderError::UnbalancedBrace {
                        template: name,
                        offset,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { name, segments })
    }

    /// The built-in product attribute template
    pub fn product_attribute() -> std::result::Result<Self, TemplateRenderError> {
        Self::parse("productattribute.tmpl", PRODUCT_ATTRIBUTE_TEMPLATE)
    }

    /// Read and parse a template file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::parse(name, &text)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(token) = segment {
                if !names.contains(&token.as_str()) {
                    names.push(token.as_str());
                }
            }
        }
        names
    }

    /// Substitute every placeholder. Values without a placeholder are ignored.
    pub fn render(
        &self,
        values: &Substitutions,
    ) -> std::result::Result<String, TemplateRenderError> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(token) => {
                    let value = values.get(token.as_str()).ok_or_else(|| {
                        TemplateRenderError::MissingValue {
                            template: self.name.clone(),
                            token: token.clone(),
                        }
                    })?;
                    match value {
                        TemplateValue::Text(text) => out.push_str(text),
                        TemplateValue::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
                        TemplateValue::Integer(n) => out.push_str(&n.to_string()),
                        TemplateValue::List(_) => {
                            return Err(TemplateRenderError::IncompatibleValue {
                                template: self.name.clone(),
                                token: token.clone(),
                                kind: value.kind(),
                            })
                        }
                    }
                }
            }
        }

        Ok(out)
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, TemplateValue)]) -> Substitutions {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_render_substitutes_all_kinds() {
        let template = Template::parse("t", "'{code}' => {flag}, {order}").unwrap();
        let out = template
            .render(&values(&[
                ("code", "color".into()),
                ("flag", true.into()),
                ("order", 30i64.into()),
                ("unused", "x".into()),
            ]))
            .unwrap();
        assert_eq!(out, "'color' => true, 30");
    }

    #[test]
    fn test_escaped_braces() {
        let template = Template::parse("t", "{{literal}} {name}").unwrap();
        assert_eq!(template.placeholders(), vec!["name"]);
        let out = template.render(&values(&[("name", "x".into())])).unwrap();
        assert_eq!(out, "{literal} x");
    }

    #[test]
    fn test_missing_value() {
        let template = Template::parse("t", "{a}{b}").unwrap();
        let err = template.render(&values(&[("a", "1".into())])).unwrap_err();
        assert_eq!(
            err,
            TemplateRenderError::MissingValue {
                template: "t".to_string(),
                token: "b".to_string()
            }
        );
    }

    #[test]
    fn test_list_value_is_incompatible() {
        let template = Template::parse("t", "{options}").unwrap();
        let err = template
            .render(&values(&[("options", vec!["Red".to_string()].into())]))
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateRenderError::IncompatibleValue { kind: "list", .. }
        ));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(matches!(
            Template::parse("t", "abc {open"),
            Err(TemplateRenderError::UnbalancedBrace { offset: 4, .. })
        ));
        assert!(matches!(
            Template::parse("t", "close } here"),
            Err(TemplateRenderError::UnbalancedBrace { offset: 6, .. })
        ));
        assert!(matches!(
            Template::parse("t", "{not valid}"),
            Err(TemplateRenderError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_builtin_template_placeholders() {
        let template = Template::product_attribute().unwrap();
        let names = template.placeholders();
        for expected in [
            "attribute_code",
            "attribute_label",
            "value_type",
            "frontend_input",
            "scope",
            "options",
            "source_model",
            "sort_order",
            "apply_to",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }
}

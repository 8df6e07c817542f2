//! Typed installer fields
//!
//! Every value that ends up in the `addAttribute()` call is resolved here
//! first and only turned into text when merged into the template.

use crate::ir::{AttributeDefinition, InputKind, Scope, StorageKind};
use crate::mapping;
use crate::template::Substitutions;

/// The `option` entry of the installer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsPayload {
    /// Nothing to install; the source model owns the list, or there is none
    Empty,
    /// Literal option values
    Values(Vec<String>),
    /// Fixed swatch placeholder content
    Swatch(&'static str),
}

impl OptionsPayload {
    fn resolve(definition: &AttributeDefinition) -> Self {
        if let Some(payload) = mapping::swatch_options(definition.input_kind) {
            return OptionsPayload::Swatch(payload);
        }
        if definition.wants_source_model() || definition.options.is_empty() {
            return OptionsPayload::Empty;
        }
        OptionsPayload::Values(definition.options.clone())
    }

    pub fn to_php(&self) -> String {
        match self {
            OptionsPayload::Empty => "''".to_string(),
            OptionsPayload::Values(values) => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("\"{}\"", escape_double_quoted(v)))
                    .collect();
                format!("array('values' => array({}))", quoted.join(","))
            }
            OptionsPayload::Swatch(payload) => payload.to_string(),
        }
    }
}

/// Where the attribute gets its option list from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
    None,
    /// A framework-provided model, e.g. the Yes/No source
    Fixed(&'static str),
    /// The generated source model class, fully qualified
    Generated(String),
}

impl SourceReference {
    pub fn to_php(&self) -> String {
        match self {
            SourceReference::None => "''".to_string(),
            SourceReference::Fixed(class) => format!("'{}'", class),
            SourceReference::Generated(class) => format!("\\{}::class", class),
        }
    }
}

/// Yes/No switches of the installer call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub searchable: bool,
    pub filterable: bool,
    pub visible_on_front: bool,
    pub comparable: bool,
    pub used_in_product_listing: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerFields {
    pub attribute_code: String,
    pub attribute_label: String,
    pub value_type: StorageKind,
    pub frontend_input: InputKind,
    pub scope: Scope,
    pub required: bool,
    pub user_defined: bool,
    pub options: OptionsPayload,
    pub source: SourceReference,
    pub backend: Option<&'static str>,
    pub flags: Flags,
    pub apply_to: String,
    pub sort_order: i64,
}

impl InstallerFields {
    /// Resolve all fields. `source_model_class` is the fully qualified name of
    /// the generated source model, when one is generated.
    pub fn from_definition(
        definition: &AttributeDefinition,
        source_model_class: Option<String>,
    ) -> Self {
        let source = match (source_model_class, mapping::fixed_source_model(definition.input_kind)) {
            (Some(class), _) => SourceReference::Generated(class),
            (None, Some(fixed)) => SourceReference::Fixed(fixed),
            (None, None) => SourceReference::None,
        };

        let extra = &definition.extra;

        Self {
            attribute_code: definition.attribute_code(),
            attribute_label: definition.label.clone(),
            value_type: mapping::resolve(definition.input_kind),
            frontend_input: definition.input_kind,
            scope: definition.scope,
            required: definition.required,
            user_defined: true,
            options: OptionsPayload::resolve(definition),
            source,
            backend: mapping::backend_model(definition.input_kind),
            flags: Flags {
                searchable: extra.searchable,
                filterable: extra.filterable,
                visible_on_front: extra.visible_on_front,
                comparable: extra.comparable,
                used_in_product_listing: extra.used_in_product_listing,
                unique: extra.unique,
            },
            apply_to: definition.normalized_apply_to(),
            sort_order: mapping::DEFAULT_SORT_ORDER,
        }
    }

    /// Values for every placeholder of the installer template
    pub fn substitutions(&self) -> Substitutions {
        let mut values = Substitutions::new();
        values.insert("attribute_code", self.attribute_code.clone().into());
        values.insert("attribute_label", self.attribute_label.clone().into());
        values.insert("value_type", self.value_type.code().into());
        values.insert("frontend_input", self.frontend_input.code().into());
        values.insert("user_defined", self.user_defined.into());
        values.insert("scope", self.scope.code().into());
        values.insert("required", self.required.into());
        values.insert("options", self.options.to_php().into());
        values.insert("searchable", self.flags.searchable.into());
        values.insert("filterable", self.flags.filterable.into());
        values.insert("visible_on_front", self.flags.visible_on_front.into());
        values.insert("comparable", self.flags.comparable.into());
        values.insert("used_in_product_listing", self.flags.used_in_product_listing.into());
        values.insert("unique", self.flags.unique.into());
        values.insert("default", "null".into());
        values.insert("apply_to", self.apply_to.clone().into());
        values.insert("backend", self.backend.unwrap_or_default().into());
        values.insert("source_model", self.source.to_php().into());
        values.insert("sort_order", self.sort_order.into());
        values.insert("frontend", "".into());
        values
    }
}

/// Escape text for a PHP double-quoted string literal.
fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a PHP single-quoted string literal.
pub(crate) fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_payload() {
        let mut def = AttributeDefinition::new("Color", InputKind::Select);
        def.options = vec!["Red".to_string(), "Blue".to_string()];
        assert_eq!(
            OptionsPayload::resolve(&def).to_php(),
            "array('values' => array(\"Red\",\"Blue\"))"
        );

        def.source_model_requested = true;
        assert_eq!(OptionsPayload::resolve(&def), OptionsPayload::Empty);
        assert_eq!(OptionsPayload::Empty.to_php(), "''");
    }

    #[test]
    fn test_swatch_payload_ignores_options() {
        let mut def = AttributeDefinition::new("Shade", InputKind::SwatchVisual);
        def.options = vec!["Ignored".to_string()];
        assert_eq!(
            OptionsPayload::resolve(&def).to_php(),
            "['values' => ['Black' => '#000000', 'White' => '#ffffff']]"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_double_quoted("say \"hi\" $x"), "say \\\"hi\\\" \\$x");
        assert_eq!(escape_double_quoted("Line one\nLine two"), "Line one\\nLine two");
        assert_eq!(escape_single_quoted("it's"), "it\\'s");
    }

    #[test]
    fn test_line_breaks_stay_inside_one_line() {
        let mut def = AttributeDefinition::new("Note", InputKind::Select);
        def.options = vec!["Line one\nLine two".to_string()];
        let php = OptionsPayload::resolve(&def).to_php();
        assert_eq!(php, "array('values' => array(\"Line one\\nLine two\"))");
        assert_eq!(php.lines().count(), 1);
    }

    #[test]
    fn test_source_reference_php() {
        assert_eq!(SourceReference::None.to_php(), "''");
        assert_eq!(
            SourceReference::Fixed(mapping::BOOLEAN_SOURCE_MODEL).to_php(),
            "'Magento\\Eav\\Model\\Entity\\Attribute\\Source\\Boolean'"
        );
        assert_eq!(
            SourceReference::Generated("Vendor\\Catalog\\Model\\Product\\Attribute\\Source\\Color".to_string())
                .to_php(),
            "\\Vendor\\Catalog\\Model\\Product\\Attribute\\Source\\Color::class"
        );
    }

    #[test]
    fn test_substitutions_cover_builtin_template() {
        let template = crate::template::Template::product_attribute().unwrap();
        let def = AttributeDefinition::new("Color", InputKind::Text);
        let values = InstallerFields::from_definition(&def, None).substitutions();
        for name in template.placeholders() {
            assert!(values.contains_key(name), "no value for {}", name);
        }
    }
}

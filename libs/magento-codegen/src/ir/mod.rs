//! Intermediate Representation (IR)
//!
//! Validated, immutable description of a product attribute. The parser is the
//! only producer of [`AttributeDefinition`] from user input; generators only
//! read it.

use serde::{Deserialize, Serialize};

/// Maximum length of an attribute code
pub const ATTRIBUTE_CODE_MAX_LEN: usize = 30;

/// Sentinel apply-to value meaning "all product types"
pub const ALL_PRODUCT_TYPES: &str = "-1";

/// Frontend input kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Textarea,
    Date,
    Boolean,
    Multiselect,
    Select,
    Price,
    Static,
    /// Experimental, only partially supported
    SwatchVisual,
    /// Experimental, only partially supported
    SwatchText,
}

impl InputKind {
    pub const fn code(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Textarea => "textarea",
            InputKind::Date => "date",
            InputKind::Boolean => "boolean",
            InputKind::Multiselect => "multiselect",
            InputKind::Select => "select",
            InputKind::Price => "price",
            InputKind::Static => "static",
            InputKind::SwatchVisual => "swatch_visual",
            InputKind::SwatchText => "swatch_text",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "text" => InputKind::Text,
            "textarea" => InputKind::Textarea,
            "date" => InputKind::Date,
            "boolean" => InputKind::Boolean,
            "multiselect" => InputKind::Multiselect,
            "select" => InputKind::Select,
            "price" => InputKind::Price,
            "static" => InputKind::Static,
            "swatch_visual" => InputKind::SwatchVisual,
            "swatch_text" => InputKind::SwatchText,
            _ => return None,
        })
    }

    /// Select and multiselect inputs, the only kinds carrying an option list
    pub fn is_selectable(self) -> bool {
        matches!(self, InputKind::Select | InputKind::Multiselect)
    }

    pub fn is_swatch(self) -> bool {
        matches!(self, InputKind::SwatchVisual | InputKind::SwatchText)
    }
}

/// Granularity at which an attribute value may vary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Store,
    Global,
    Website,
}

impl Scope {
    /// PHP constant referenced by the generated installer
    pub const fn code(self) -> &'static str {
        match self {
            Scope::Store => "ScopedAttributeInterface::SCOPE_STORE",
            Scope::Global => "ScopedAttributeInterface::SCOPE_GLOBAL",
            Scope::Website => "ScopedAttributeInterface::SCOPE_WEBSITE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Scope::Store => "SCOPE_STORE",
            Scope::Global => "SCOPE_GLOBAL",
            Scope::Website => "SCOPE_WEBSITE",
        }
    }

    /// Accepts the PHP constant or its short label.
    pub fn from_code(code: &str) -> Option<Self> {
        [Scope::Store, Scope::Global, Scope::Website]
            .into_iter()
            .find(|scope| scope.code() == code || scope.label() == code)
    }
}

/// Backend storage (EAV value table) of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Varchar,
    Text,
    Int,
    Decimal,
    Date,
    Datetime,
}

impl StorageKind {
    pub const fn code(self) -> &'static str {
        match self {
            StorageKind::Varchar => "varchar",
            StorageKind::Text => "text",
            StorageKind::Int => "int",
            StorageKind::Decimal => "decimal",
            StorageKind::Date => "date",
            StorageKind::Datetime => "datetime",
        }
    }
}

/// Optional settings of an attribute, each with a typed default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtraParams {
    /// Overrides the code derived from the label
    pub attribute_code: Option<String>,
    /// Product type codes; [`ALL_PRODUCT_TYPES`] means every type
    pub apply_to: Vec<String>,
    pub searchable: bool,
    pub filterable: bool,
    pub visible_on_front: bool,
    pub comparable: bool,
    pub used_in_product_listing: bool,
    pub unique: bool,
    pub transport_to_quote_item: bool,
}

/// A validated product attribute definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDefinition {
    pub label: String,
    pub input_kind: InputKind,
    pub scope: Scope,
    pub required: bool,
    pub options: Vec<String>,
    pub source_model_requested: bool,
    pub extra: ExtraParams,
}

impl AttributeDefinition {
    /// Minimal definition with every other setting at its default
    pub fn new(label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            label: label.into(),
            input_kind,
            scope: Scope::default(),
            required: false,
            options: Vec::new(),
            source_model_requested: false,
            extra: ExtraParams::default(),
        }
    }

    /// Explicit code if set, otherwise derived from the label
    pub fn attribute_code(&self) -> String {
        match self.extra.attribute_code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => derive_code(&self.label),
        }
    }

    /// Attribute code in class-name form, e.g. `IsFeatured`
    pub fn class_suffix(&self) -> String {
        class_suffix(&self.attribute_code())
    }

    /// A source model is only generated for selectable inputs.
    pub fn wants_source_model(&self) -> bool {
        self.source_model_requested && self.input_kind.is_selectable()
    }

    /// Apply-to list without the all-types sentinel, comma joined.
    ///
    /// An empty string means the attribute applies to every product type.
    pub fn normalized_apply_to(&self) -> String {
        normalize_apply_to(&self.extra.apply_to)
    }
}

/// Derive an attribute code from a label: lowercase, spaces to underscores,
/// truncated to [`ATTRIBUTE_CODE_MAX_LEN`] characters.
pub fn derive_code(label: &str) -> String {
    label
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .take(ATTRIBUTE_CODE_MAX_LEN)
        .collect()
}

/// Uppercase the first letter of every `_`-separated part and join them.
///
/// The rest of each part is kept as is, so `SKU_code` becomes `SKUCode`.
pub fn class_suffix(code: &str) -> String {
    code.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn normalize_apply_to<S: AsRef<str>>(apply_to: &[S]) -> String {
    apply_to
        .iter()
        .map(|code| code.as_ref())
        .filter(|code| *code != ALL_PRODUCT_TYPES)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_code() {
        assert_eq!(derive_code("Color"), "color");
        assert_eq!(derive_code("Is Featured"), "is_featured");
        assert_eq!(
            derive_code("A very long attribute label that keeps going"),
            "a_very_long_attribute_label_th"
        );
    }

    #[test]
    fn test_derive_code_is_idempotent() {
        for label in ["Color", "Is Featured", "Material Of The Upper Sole Lining Extra", "x"] {
            let code = derive_code(label);
            assert_eq!(derive_code(&code), code);
            assert!(code.chars().count() <= ATTRIBUTE_CODE_MAX_LEN);
        }
    }

    #[test]
    fn test_normalize_apply_to() {
        assert_eq!(normalize_apply_to(&["-1", "simple"]), "simple");
        assert_eq!(normalize_apply_to(&["-1"]), "");
        assert_eq!(normalize_apply_to(&["simple", "virtual"]), "simple,virtual");
        assert_eq!(normalize_apply_to::<&str>(&[]), "");
    }

    #[test]
    fn test_class_suffix() {
        assert_eq!(AttributeDefinition::new("Color", InputKind::Select).class_suffix(), "Color");
        assert_eq!(
            AttributeDefinition::new("Is Featured", InputKind::Boolean).class_suffix(),
            "IsFeatured"
        );
    }

    #[test]
    fn test_class_suffix_keeps_inner_case() {
        assert_eq!(class_suffix("SKU_code"), "SKUCode");
        assert_eq!(class_suffix("is_featured"), "IsFeatured");
        assert_eq!(class_suffix("color_"), "Color");
        assert_eq!(class_suffix("eu__size"), "EuSize");

        let mut def = AttributeDefinition::new("Stock Keeping", InputKind::Text);
        def.extra.attribute_code = Some("SKU_code".to_string());
        assert_eq!(def.class_suffix(), "SKUCode");
    }

    #[test]
    fn test_explicit_code_wins() {
        let mut def = AttributeDefinition::new("Color", InputKind::Select);
        def.extra.attribute_code = Some("shade".to_string());
        assert_eq!(def.attribute_code(), "shade");
    }

    #[test]
    fn test_source_model_only_for_selectable() {
        let mut def = AttributeDefinition::new("Flag", InputKind::Boolean);
        def.source_model_requested = true;
        assert!(!def.wants_source_model());

        def.input_kind = InputKind::Multiselect;
        assert!(def.wants_source_model());
    }

    #[test]
    fn test_scope_codes() {
        assert_eq!(Scope::from_code("SCOPE_GLOBAL"), Some(Scope::Global));
        assert_eq!(
            Scope::from_code("ScopedAttributeInterface::SCOPE_WEBSITE"),
            Some(Scope::Website)
        );
        assert_eq!(Scope::from_code("global"), None);
    }
}

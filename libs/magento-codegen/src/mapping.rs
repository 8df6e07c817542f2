//! Attribute type mapping tables
//!
//! Static, process-wide lookup tables for frontend input kinds, scopes and
//! product types. The input → storage table is a compile-time perfect hash map.

use phf::phf_map;
use serde::Serialize;

use crate::ir::{InputKind, StorageKind};

/// Sort order given to every generated attribute
pub const DEFAULT_SORT_ORDER: i64 = 30;

/// Source model bound to boolean (Yes/No) inputs
pub const BOOLEAN_SOURCE_MODEL: &str = "Magento\\Eav\\Model\\Entity\\Attribute\\Source\\Boolean";

/// Backend model required by multiselect inputs
pub const ARRAY_BACKEND: &str = "Magento\\Eav\\Model\\Entity\\Attribute\\Backend\\ArrayBackend";

/// A selectable value and its human-readable label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

/// Input kinds offered to users. Swatch kinds are deliberately absent.
pub const FRONTEND_INPUT_CHOICES: &[Choice] = &[
    choice("text", "Text Field"),
    choice("textarea", "Text Area"),
    choice("date", "Date"),
    choice("boolean", "Yes/No"),
    choice("multiselect", "Multiple Select"),
    choice("select", "Dropdown"),
    choice("price", "Price"),
    choice("static", "Static"),
];

pub const SCOPE_CHOICES: &[Choice] = &[
    choice("ScopedAttributeInterface::SCOPE_STORE", "SCOPE_STORE"),
    choice("ScopedAttributeInterface::SCOPE_GLOBAL", "SCOPE_GLOBAL"),
    choice("ScopedAttributeInterface::SCOPE_WEBSITE", "SCOPE_WEBSITE"),
];

pub const APPLY_TO_CHOICES: &[Choice] = &[
    choice("-1", "All Product Types"),
    choice("simple", "Simple Products"),
    choice("grouped", "Grouped Products"),
    choice("bundle", "Bundled Products"),
    choice("configurable", "Configurable Products"),
    choice("virtual", "Virtual Products"),
];

/// Nominal storage per input kind. Kinds without an entry use `int`.
static VALUE_TYPES: phf::Map<&'static str, StorageKind> = phf_map! {
    "text" => StorageKind::Varchar,
    "textarea" => StorageKind::Text,
    "date" => StorageKind::Date,
    "boolean" => StorageKind::Int,
    "multiselect" => StorageKind::Varchar,
    "select" => StorageKind::Int,
    "price" => StorageKind::Decimal,
};

/// Raw table entry for an input kind
pub fn lookup(kind: InputKind) -> Option<StorageKind> {
    VALUE_TYPES.get(kind.code()).copied()
}

/// Storage kind used by the generated installer.
pub fn resolve(kind: InputKind) -> StorageKind {
    match lookup(kind) {
        // Dates are stored with full date and time precision.
        Some(StorageKind::Date) => StorageKind::Datetime,
        Some(storage) => storage,
        None => StorageKind::Int,
    }
}

/// Fixed source model reference for the input kind, if any
pub fn fixed_source_model(kind: InputKind) -> Option<&'static str> {
    match kind {
        InputKind::Boolean => Some(BOOLEAN_SOURCE_MODEL),
        _ => None,
    }
}

pub fn backend_model(kind: InputKind) -> Option<&'static str> {
    match kind {
        InputKind::Multiselect => Some(ARRAY_BACKEND),
        _ => None,
    }
}

/// Placeholder option payload for swatch inputs. User options are ignored.
pub fn swatch_options(kind: InputKind) -> Option<&'static str> {
    match kind {
        InputKind::SwatchVisual => Some("['values' => ['Black' => '#000000', 'White' => '#ffffff']]"),
        InputKind::SwatchText => Some("['values' => ['Sample' => 'Sample']]"),
        _ => None,
    }
}

pub fn is_choice(choices: &[Choice], value: &str) -> bool {
    choices.iter().any(|c| c.value == value)
}

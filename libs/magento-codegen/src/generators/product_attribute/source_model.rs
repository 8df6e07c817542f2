//! Source model class for select and multiselect attributes

use magegen_module::{PhpClass, PhpMethod};

use super::fields::escape_single_quoted;

const ABSTRACT_SOURCE: &str = "\\Magento\\Eav\\Model\\Entity\\Attribute\\Source\\AbstractSource";

/// Methods that project the options into the flat product listing table
pub const LISTING_METHODS: [&str; 3] = ["getFlatColumns", "getFlatIndexes", "getFlatUpdateSelect"];

/// Class name of the source model relative to the module namespace
pub fn class_name(class_suffix: &str) -> String {
    format!("Model\\Product\\Attribute\\Source\\{}", class_suffix)
}

/// `[value => lowercase, label => __(original)]` entries as a PHP array
fn options_array(options: &[String]) -> String {
    let entries: Vec<String> = options
        .iter()
        .map(|option| {
            let option = escape_single_quoted(option);
            format!(
                "\t['value' => '{}', 'label' => __('{}')]",
                option.to_lowercase(),
                option
            )
        })
        .collect();
    format!("[\n{}\n]", entries.join(",\n"))
}

pub fn build(class_suffix: &str, options: &[String], used_in_product_listing: bool) -> PhpClass {
    let mut class = PhpClass::new(class_name(class_suffix)).extends(ABSTRACT_SOURCE);

    class.add_method(
        PhpMethod::new("getAllOptions")
            .body(format!(
                "$this->_options = {};\nreturn $this->_options;",
                options_array(options)
            ))
            .docstring(["getAllOptions", "", "@return array"]),
    );

    if used_in_product_listing {
        add_listing_methods(&mut class);
    }

    class
}

fn add_listing_methods(class: &mut PhpClass) {
    class.add_method(
        PhpMethod::new("getFlatColumns")
            .body(
                "$attributeCode = $this->getAttribute()->getAttributeCode();
return [
\t$attributeCode => [
\t\t'unsigned' => false,
\t\t'default' => null,
\t\t'extra' => null,
\t\t'type' => \\Magento\\Framework\\DB\\Ddl\\Table::TYPE_TEXT,
\t\t'length' => 255,
\t\t'nullable' => true,
\t\t'comment' => $attributeCode . ' column',
\t],
];",
            )
            .docstring(["@return array"]),
    );

    class.add_method(
        PhpMethod::new("getFlatIndexes")
            .body(
                "$indexes = [];

$index = 'IDX_' . strtoupper($this->getAttribute()->getAttributeCode());
$indexes[$index] = ['type' => 'index', 'fields' => [$this->getAttribute()->getAttributeCode()]];

return $indexes;",
            )
            .docstring(["@return array"]),
    );

    class.add_method(
        PhpMethod::new("getFlatUpdateSelect")
            .params(["$store"])
            .body("return $this->eavAttrEntity->create()->getFlatUpdateSelect($this->getAttribute(), $store);")
            .docstring(["@param int $store", "@return \\Magento\\Framework\\DB\\Select|null"]),
    );
}

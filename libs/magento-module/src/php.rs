//! PHP class model
//!
//! Classes are named relative to the module namespace
//! (e.g. `Setup\Patch\Data\AddColorProductAttribute`) and only learn their
//! absolute namespace at render time.

/// A PHP method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpMethod {
    pub name: String,
    /// Access modifiers, e.g. `public` or `public static`
    pub access: String,
    pub params: Vec<String>,
    /// Statement emitted before the body
    pub body_start: Option<String>,
    pub body: String,
    /// Statement emitted after the body
    pub body_return: Option<String>,
    pub docstring: Vec<String>,
}

impl PhpMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: "public".to_string(),
            params: Vec::new(),
            body_start: None,
            body: String::new(),
            body_return: None,
            docstring: Vec::new(),
        }
    }

    pub fn access(mut self, access: impl Into<String>) -> Self {
        self.access = access.into();
        self
    }

    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Wrap the body between two statements, e.g. a setup begin/end pair.
    pub fn bracket(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.body_start = Some(start.into());
        self.body_return = Some(end.into());
        self
    }

    pub fn docstring<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.docstring = lines.into_iter().map(Into::into).collect();
        self
    }

    fn render(&self) -> String {
        let mut code = String::new();

        if !self.docstring.is_empty() {
            code.push_str("\t/**\n");
            for line in &self.docstring {
                if line.is_empty() {
                    code.push_str("\t *\n");
                } else {
                    code.push_str(&format!("\t * {}\n", line));
                }
            }
            code.push_str("\t */\n");
        }

        if self.params.len() > 1 {
            code.push_str(&format!("\t{} function {}(\n", self.access, self.name));
            code.push_str(&format!("\t\t{}\n", self.params.join(",\n\t\t")));
            code.push_str("\t) {\n");
        } else {
            code.push_str(&format!(
                "\t{} function {}({})\n\t{{\n",
                self.access,
                self.name,
                self.params.join(", ")
            ));
        }

        let sections = [
            self.body_start.as_deref(),
            Some(self.body.as_str()),
            self.body_return.as_deref(),
        ];
        for section in sections.into_iter().flatten() {
            for line in section.lines() {
                if line.trim().is_empty() {
                    code.push('\n');
                } else {
                    code.push_str(&format!("\t\t{}\n", line));
                }
            }
        }

        code.push_str("\t}\n");
        code
    }
}

/// A PHP class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpClass {
    /// Class name relative to the module namespace, backslash separated
    pub class_name: String,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    /// Fully qualified names imported with `use`
    pub dependencies: Vec<String>,
    /// Property declarations, including their doc blocks
    pub attributes: Vec<String>,
    pub methods: Vec<PhpMethod>,
}

impl PhpClass {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            extends: None,
            implements: Vec::new(),
            dependencies: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn implements<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implements = interfaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a method, replacing any existing method with the same name.
    pub fn add_method(&mut self, method: PhpMethod) {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    pub fn method(&self, name: &str) -> Option<&PhpMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }

    /// Unqualified class name (last namespace segment)
    pub fn short_name(&self) -> &str {
        self.class_name
            .rsplit('\\')
            .next()
            .unwrap_or(&self.class_name)
    }

    /// Namespace segments between the module root and the class itself
    fn sub_namespace(&self) -> Option<&str> {
        self.class_name.rsplit_once('\\').map(|(ns, _)| ns)
    }

    /// Path of the class file relative to the module directory
    pub fn file_path(&self) -> String {
        format!("{}.php", self.class_name.replace('\\', "/"))
    }

    /// Render the class source under the given module namespace root
    /// (e.g. `Vendor\Catalog`).
    pub fn render(&self, namespace_root: &str) -> String {
        let mut code = String::new();

        code.push_str("<?php\n");
        code.push_str("declare(strict_types=1);\n\n");

        let namespace = match self.sub_namespace() {
            Some(sub) => format!("{}\\{}", namespace_root, sub),
            None => namespace_root.to_string(),
        };
        code.push_str(&format!("namespace {};\n\n", namespace));

        if !self.dependencies.is_empty() {
            for dependency in &self.dependencies {
                code.push_str(&format!("use {};\n", dependency));
            }
            code.push('\n');
        }

        code.push_str(&format!("class {}", self.short_name()));
        if let Some(parent) = &self.extends {
            code.push_str(&format!(" extends {}", parent));
        }
        if !self.implements.is_empty() {
            code.push_str(&format!(" implements {}", self.implements.join(", ")));
        }
        code.push_str("\n{\n");

        let mut members: Vec<String> = self
            .attributes
            .iter()
            .map(|attribute| {
                attribute
                    .lines()
                    .map(|line| format!("\t{}\n", line))
                    .collect::<String>()
            })
            .collect();
        members.extend(self.methods.iter().map(PhpMethod::render));

        code.push_str(&members.join("\n"));
        code.push_str("}\n");

        code
    }
}

//! Descriptors of the native types and functions a service exposes.
//!
//! These stand in for runtime reflection: whoever drives the generation describes classes and
//! functions as plain data, either in code or deserialized from a service description.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref VAR_ANNOTATION: Regex = Regex::new(r"@var\s+(\S+)").unwrap();
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Declared type; when absent, the `@var` annotation of the doc comment is used.
    #[serde(default, rename = "type")]
    pub var_type: Option<String>,
    /// Whether the property's default value is null, which makes the element nillable.
    #[serde(default)]
    pub default_is_null: bool,
    #[serde(default)]
    pub doc_comment: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: &str, var_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            var_type: Some(var_type.to_owned()),
            ..Default::default()
        }
    }

    pub fn declared_type(&self) -> Option<String> {
        if let Some(var_type) = &self.var_type {
            return Some(var_type.trim().to_owned());
        }
        let doc_comment = self.doc_comment.as_deref()?;
        VAR_ANNOTATION
            .captures(doc_comment)
            .map(|c| c[1].trim().to_owned())
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ClassDescriptor {
    /// Fully qualified name, e.g. `App\Model\Book`.
    pub name: String,
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub methods: Vec<FunctionDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: FunctionDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Methods that are exposed as service operations: public ones except magic `__` methods.
    pub fn exposed_methods(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.methods
            .iter()
            .filter(|m| m.visibility == Visibility::Public && !m.name.starts_with("__"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterDescriptor {
    pub fn new(name: &str, type_: &str) -> Self {
        Self {
            name: name.to_owned(),
            type_: type_.to_owned(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

fn void() -> String {
    "void".to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default = "void")]
    pub return_type: String,
    #[serde(default)]
    pub description: String,
}

impl FunctionDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: void(),
            description: String::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returning(mut self, return_type: &str) -> Self {
        self.return_type = return_type.to_owned();
        self
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// Looks up class descriptors by (possibly `\`-prefixed) class name.
pub trait ClassResolver {
    fn resolve_class(&self, name: &str) -> Option<&ClassDescriptor>;
}

/// Class name with the leading namespace separator removed.
pub fn canonical_class_name(name: &str) -> &str {
    name.trim_start_matches('\\')
}

/// An in-memory set of class and function descriptors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TypeCatalog {
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, replacing an earlier descriptor with the same name.
    pub fn add_class(&mut self, mut class: ClassDescriptor) {
        class.name = canonical_class_name(&class.name).to_owned();
        self.classes.retain(|c| c.name != class.name);
        self.classes.push(class);
    }

    pub fn add_function(&mut self, function: FunctionDescriptor) {
        self.functions.retain(|f| f.name != function.name);
        self.functions.push(function);
    }

    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_function(mut self, function: FunctionDescriptor) -> Self {
        self.add_function(function);
        self
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name == name)
    }
}

impl ClassResolver for TypeCatalog {
    fn resolve_class(&self, name: &str) -> Option<&ClassDescriptor> {
        let name = canonical_class_name(name);
        self.classes
            .iter()
            .find(|c| canonical_class_name(&c.name) == name)
    }
}

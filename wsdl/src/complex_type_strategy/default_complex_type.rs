use std::rc::Rc;

use super::ComplexTypeStrategy;
use crate::documentation::DocumentationStrategy;
use crate::reflection::canonical_class_name;
use crate::{Namespace, Wsdl, WsdlError};

/// Maps a class to an `xsd:complexType` holding an `xsd:all` of its public properties.
#[derive(Clone, Default)]
pub struct DefaultComplexType {
    documentation: Option<Rc<dyn DocumentationStrategy>>,
}

impl DefaultComplexType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documentation(documentation: Rc<dyn DocumentationStrategy>) -> Self {
        Self {
            documentation: Some(documentation),
        }
    }

    pub fn set_documentation_strategy(&mut self, documentation: Rc<dyn DocumentationStrategy>) {
        self.documentation = Some(documentation);
    }

    pub fn documentation_strategy(&self) -> Option<&Rc<dyn DocumentationStrategy>> {
        self.documentation.as_ref()
    }
}

impl ComplexTypeStrategy for DefaultComplexType {
    fn add_complex_type(&self, context: &mut Wsdl, type_: &str) -> Result<String, WsdlError> {
        let resolver = context.class_resolver();
        let class = resolver
            .resolve_class(type_)
            .ok_or_else(|| WsdlError::UnknownType(type_.to_owned()))?;
        let class_name = canonical_class_name(&class.name);

        if let Some(qualified_name) = context.registered_type(class_name) {
            return Ok(qualified_name);
        }

        let type_name = context.translate_type(class_name);
        let qualified_name = format!("{}:{type_name}", Namespace::TYPES_PREFIX);
        // registered before the properties are walked, so cycles end at this entry
        context.claim_type(class_name, &qualified_name)?;

        let complex_type = context
            .document_mut()
            .create_element(Namespace::Xsd, "complexType");
        context
            .document_mut()
            .set_attribute(complex_type, "name", &type_name);
        let all = context.document_mut().create_element(Namespace::Xsd, "all");

        for property in class.properties.iter().filter(|p| p.is_public()) {
            let Some(declared_type) = property.declared_type() else {
                continue;
            };
            let element_type = context.get_type(&declared_type)?;

            let document = context.document_mut();
            let element = document.create_element(Namespace::Xsd, "element");
            document.set_attribute(element, "name", &property.name);
            document.set_attribute(element, "type", &element_type);
            if property.default_is_null {
                document.set_attribute(element, "nillable", "true");
            }
            if let Some(documentation) = &self.documentation {
                let text = documentation.property_documentation(property);
                if !text.is_empty() {
                    context.add_documentation(element, &text);
                }
            }
            context.document_mut().append_child(all, element);
        }

        context.document_mut().append_child(complex_type, all);
        if let Some(documentation) = &self.documentation {
            let text = documentation.complex_type_documentation(class);
            if !text.is_empty() {
                context.add_documentation(complex_type, &text);
            }
        }

        let schema = context.schema();
        context.document_mut().append_child(schema, complex_type);
        Ok(qualified_name)
    }
}

use std::rc::Rc;

use super::{ComplexTypeStrategy, DefaultComplexType};
use crate::documentation::DocumentationStrategy;
use crate::reflection::canonical_class_name;
use crate::wsdl::split_array_type;
use crate::{Namespace, Wsdl, WsdlError};

/// Maps `Type[]` to a SOAP-encoded array restriction named `ArrayOfType`.
///
/// Only a single level of nesting can be expressed this way; `Type[][]` is rejected.
#[derive(Clone, Default)]
pub struct ArrayOfTypeComplex {
    inner: DefaultComplexType,
}

impl ArrayOfTypeComplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documentation(documentation: Rc<dyn DocumentationStrategy>) -> Self {
        Self {
            inner: DefaultComplexType::with_documentation(documentation),
        }
    }

    fn add_array_of_complex_type(
        &self,
        context: &mut Wsdl,
        singular_type: &str,
        type_: &str,
    ) -> Result<String, WsdlError> {
        let item_name = context.translate_type(singular_type);
        let type_name = format!("ArrayOf{item_name}");
        let qualified_name = format!("{}:{type_name}", Namespace::TYPES_PREFIX);
        context.claim_type(type_, &qualified_name)?;

        self.inner.add_complex_type(context, singular_type)?;

        let document = context.document_mut();
        let complex_type = document.create_element(Namespace::Xsd, "complexType");
        document.set_attribute(complex_type, "name", &type_name);
        let complex_content = document.create_element(Namespace::Xsd, "complexContent");
        let restriction = document.create_element(Namespace::Xsd, "restriction");
        document.set_attribute(restriction, "base", "soap-enc:Array");
        let attribute = document.create_element(Namespace::Xsd, "attribute");
        document.set_attribute(attribute, "ref", "soap-enc:arrayType");
        document.set_attribute_ns(
            attribute,
            Namespace::Wsdl,
            "arrayType",
            &format!("{}:{item_name}[]", Namespace::TYPES_PREFIX),
        );
        document.append_child(restriction, attribute);
        document.append_child(complex_content, restriction);
        document.append_child(complex_type, complex_content);

        let schema = context.schema();
        context.document_mut().append_child(schema, complex_type);
        Ok(qualified_name)
    }
}

impl ComplexTypeStrategy for ArrayOfTypeComplex {
    fn add_complex_type(&self, context: &mut Wsdl, type_: &str) -> Result<String, WsdlError> {
        let (singular_type, depth) = split_array_type(type_);
        let singular_type = canonical_class_name(&singular_type);
        match depth {
            0 => self.inner.add_complex_type(context, singular_type),
            1 => {
                let array_type = format!("{singular_type}[]");
                if let Some(qualified_name) = context.registered_type(&array_type) {
                    return Ok(qualified_name);
                }
                self.add_array_of_complex_type(context, singular_type, &array_type)
            }
            _ => Err(WsdlError::NestedArrayTooDeep(type_.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reflection::{ClassDescriptor, PropertyDescriptor, TypeCatalog};
    use crate::ErrorKind;

    fn wsdl() -> Wsdl {
        let catalog = TypeCatalog::new()
            .with_class(
                ClassDescriptor::new("ComplexTest").with_property(PropertyDescriptor::new("var", "int")),
            )
            .with_class(
                ClassDescriptor::new("ComplexObjectStructure")
                    .with_property(PropertyDescriptor::new("boolean", "bool"))
                    .with_property(PropertyDescriptor::new("object", "ComplexTest[]")),
            );
        Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeComplex::new()))
            .with_class_resolver(Rc::new(catalog))
    }

    #[test]
    fn array_of_complex_type() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("ComplexTest[]").unwrap(), "tns:ArrayOfComplexTest");

        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(concat!(
            r#"<xsd:complexType name="ComplexTest"><xsd:all>"#,
            r#"<xsd:element name="var" type="xsd:int"/></xsd:all></xsd:complexType>"#,
            r#"<xsd:complexType name="ArrayOfComplexTest"><xsd:complexContent>"#,
            r#"<xsd:restriction base="soap-enc:Array">"#,
            r#"<xsd:attribute ref="soap-enc:arrayType" wsdl:arrayType="tns:ComplexTest[]"/>"#,
            r#"</xsd:restriction></xsd:complexContent></xsd:complexType>"#,
        )));
        assert_eq!(
            wsdl.registered_type("ComplexTest").as_deref(),
            Some("tns:ComplexTest")
        );
    }

    #[test]
    fn array_property_inside_object() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.get_type("ComplexObjectStructure").unwrap(),
            "tns:ComplexObjectStructure"
        );
        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(r#"<xsd:element name="object" type="tns:ArrayOfComplexTest"/>"#));
        assert_eq!(xml.matches(r#"<xsd:complexType name="ComplexTest">"#).count(), 1);
        assert_eq!(wsdl.types().len(), 3);
    }

    #[test]
    fn adding_twice_emits_once() {
        let mut wsdl = wsdl();
        wsdl.get_type("ComplexTest[]").unwrap();
        wsdl.get_type("ComplexTest[]").unwrap();
        wsdl.get_type("ComplexTest").unwrap();
        let xml = wsdl.to_xml().unwrap();
        assert_eq!(xml.matches(r#"name="ArrayOfComplexTest""#).count(), 1);
        assert_eq!(xml.matches(r#"name="ComplexTest""#).count(), 1);
    }

    #[test]
    fn nesting_deeper_than_one_level_fails() {
        let mut wsdl = wsdl();
        let error = wsdl.get_type("ComplexTest[][]").unwrap_err();
        assert!(matches!(error, WsdlError::NestedArrayTooDeep(_)));
        assert_eq!(error.kind(), ErrorKind::UnsupportedStructure);
    }

    #[test]
    fn leading_separator_names_the_same_array() {
        let catalog = TypeCatalog::new()
            .with_class(ClassDescriptor::new("Shop\\Book").with_property(PropertyDescriptor::new("title", "string")));
        let mut wsdl = Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeComplex::new()))
            .with_class_resolver(Rc::new(catalog));

        assert_eq!(wsdl.get_type("Shop\\Book[]").unwrap(), "tns:ArrayOfBook");
        assert_eq!(wsdl.get_type("\\Shop\\Book[]").unwrap(), "tns:ArrayOfBook");
        let xml = wsdl.to_xml().unwrap();
        assert_eq!(xml.matches(r#"name="ArrayOfBook""#).count(), 1);
        assert_eq!(xml.matches(r#"name="Book""#).count(), 1);
    }

    #[test]
    fn class_map_names_array_and_items_alike() {
        let catalog = TypeCatalog::new()
            .with_class(ClassDescriptor::new("Shop\\Book").with_property(PropertyDescriptor::new("title", "string")));
        let mut wsdl = Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeComplex::new()))
            .with_class_resolver(Rc::new(catalog))
            .with_class_map([("Volume".to_owned(), "Shop\\Book".to_owned())].into());

        assert_eq!(wsdl.get_type("\\Shop\\Book[]").unwrap(), "tns:ArrayOfVolume");
        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(r#"<xsd:complexType name="Volume">"#));
        assert!(xml.contains(r#"wsdl:arrayType="tns:Volume[]""#));
        assert!(!xml.contains("ArrayOfBook"));
    }

    #[test]
    fn array_of_unknown_class_fails() {
        let mut wsdl = wsdl();
        assert!(matches!(
            wsdl.get_type("Missing[]"),
            Err(WsdlError::UnknownType(_))
        ));
    }
}

use std::rc::Rc;

use super::{ComplexTypeStrategy, DefaultComplexType};
use crate::documentation::DocumentationStrategy;
use crate::reflection::canonical_class_name;
use crate::wsdl::split_array_type;
use crate::{Namespace, Wsdl, WsdlError};

/// Maps arrays of any depth to chained sequence wrappers.
///
/// `string[][]` becomes `ArrayOfArrayOfString`, a sequence of unbounded `item`s of type
/// `ArrayOfString`, which in turn is a sequence of `xsd:string` items.
#[derive(Clone, Default)]
pub struct ArrayOfTypeSequence {
    inner: DefaultComplexType,
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ArrayOfTypeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documentation(documentation: Rc<dyn DocumentationStrategy>) -> Self {
        Self {
            inner: DefaultComplexType::with_documentation(documentation),
        }
    }

    /// Qualified name of the wrapper at `level`; level 0 is the item type itself.
    fn type_at_level(
        &self,
        context: &mut Wsdl,
        singular_type: &str,
        level: usize,
    ) -> Result<String, WsdlError> {
        if level == 0 {
            return context.get_type(singular_type);
        }
        Ok(format!(
            "{}:{}{}",
            Namespace::TYPES_PREFIX,
            "ArrayOf".repeat(level),
            upper_first(&context.translate_type(singular_type))
        ))
    }

    fn add_sequence_type(
        &self,
        context: &mut Wsdl,
        array_type: &str,
        item_type: &str,
        native_type: &str,
    ) -> Result<(), WsdlError> {
        if context.registered_type(native_type).is_some() {
            return Ok(());
        }
        context.claim_type(native_type, array_type)?;

        let type_name = array_type
            .split_once(':')
            .map_or(array_type, |(_, local)| local);
        let document = context.document_mut();
        let complex_type = document.create_element(Namespace::Xsd, "complexType");
        document.set_attribute(complex_type, "name", type_name);
        let sequence = document.create_element(Namespace::Xsd, "sequence");
        let element = document.create_element(Namespace::Xsd, "element");
        document.set_attribute(element, "name", "item");
        document.set_attribute(element, "type", item_type);
        document.set_attribute(element, "minOccurs", "0");
        document.set_attribute(element, "maxOccurs", "unbounded");
        document.append_child(sequence, element);
        document.append_child(complex_type, sequence);

        let schema = context.schema();
        context.document_mut().append_child(schema, complex_type);
        Ok(())
    }
}

impl ComplexTypeStrategy for ArrayOfTypeSequence {
    fn add_complex_type(&self, context: &mut Wsdl, type_: &str) -> Result<String, WsdlError> {
        let (singular_type, depth) = split_array_type(type_);
        let singular_type = canonical_class_name(&singular_type);
        if depth == 0 {
            return self.inner.add_complex_type(context, singular_type);
        }
        if let Some(qualified_name) =
            context.registered_type(&format!("{singular_type}{}", "[]".repeat(depth)))
        {
            return Ok(qualified_name);
        }

        let mut array_type = String::new();
        for level in 1..=depth {
            let item_type = self.type_at_level(context, singular_type, level - 1)?;
            array_type = self.type_at_level(context, singular_type, level)?;
            let native_type = format!("{singular_type}{}", "[]".repeat(level));
            self.add_sequence_type(context, &array_type, &item_type, &native_type)?;
        }
        Ok(array_type)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reflection::{ClassDescriptor, PropertyDescriptor, TypeCatalog};

    fn wsdl() -> Wsdl {
        let catalog = TypeCatalog::new()
            .with_class(
                ClassDescriptor::new("ComplexTypeA")
                    .with_property(PropertyDescriptor::new("baz", "ComplexTypeB[]")),
            )
            .with_class(
                ClassDescriptor::new("ComplexTypeB")
                    .with_property(PropertyDescriptor::new("bar", "string"))
                    .with_property(PropertyDescriptor::new("foo", "string")),
            );
        Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeSequence::new()))
            .with_class_resolver(Rc::new(catalog))
    }

    fn sequence_type(name: &str, item_type: &str) -> String {
        format!(
            concat!(
                r#"<xsd:complexType name="{}"><xsd:sequence>"#,
                r#"<xsd:element name="item" type="{}" minOccurs="0" maxOccurs="unbounded"/>"#,
                r#"</xsd:sequence></xsd:complexType>"#
            ),
            name, item_type
        )
    }

    #[test]
    fn simple_array_of_builtin() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("string[]").unwrap(), "tns:ArrayOfString");
        assert_eq!(wsdl.get_type("int[]").unwrap(), "tns:ArrayOfInt");
        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(&sequence_type("ArrayOfString", "xsd:string")));
        assert!(xml.contains(&sequence_type("ArrayOfInt", "xsd:int")));
    }

    #[test]
    fn nested_arrays_chain_wrappers() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.get_type("string[][][]").unwrap(),
            "tns:ArrayOfArrayOfArrayOfString"
        );
        let xml = wsdl.to_xml().unwrap();
        let expected = [
            sequence_type("ArrayOfString", "xsd:string"),
            sequence_type("ArrayOfArrayOfString", "tns:ArrayOfString"),
            sequence_type("ArrayOfArrayOfArrayOfString", "tns:ArrayOfArrayOfString"),
        ]
        .concat();
        assert!(xml.contains(&expected));

        assert_eq!(
            wsdl.types().clone(),
            [
                ("string[]", "tns:ArrayOfString"),
                ("string[][]", "tns:ArrayOfArrayOfString"),
                ("string[][][]", "tns:ArrayOfArrayOfArrayOfString"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<BTreeMap<_, _>>()
        );
    }

    #[test]
    fn shallower_levels_are_not_duplicated() {
        let mut wsdl = wsdl();
        wsdl.get_type("string[]").unwrap();
        wsdl.get_type("string[][]").unwrap();
        wsdl.get_type("string[][]").unwrap();
        let xml = wsdl.to_xml().unwrap();
        assert_eq!(xml.matches(r#"name="ArrayOfString""#).count(), 1);
        assert_eq!(xml.matches(r#"name="ArrayOfArrayOfString""#).count(), 1);
    }

    #[test]
    fn array_of_complex_type_inside_object() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("ComplexTypeA").unwrap(), "tns:ComplexTypeA");
        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(concat!(
            r#"<xsd:complexType name="ComplexTypeB"><xsd:all>"#,
            r#"<xsd:element name="bar" type="xsd:string"/><xsd:element name="foo" type="xsd:string"/>"#,
            r#"</xsd:all></xsd:complexType>"#,
        )));
        assert!(xml.contains(&sequence_type("ArrayOfComplexTypeB", "tns:ComplexTypeB")));
        assert!(xml.contains(r#"<xsd:element name="baz" type="tns:ArrayOfComplexTypeB"/>"#));
        assert_eq!(xml.matches("<xsd:complexType ").count(), 3);
    }

    #[test]
    fn leading_separator_names_the_same_array() {
        let catalog = TypeCatalog::new()
            .with_class(ClassDescriptor::new("Shop\\Book").with_property(PropertyDescriptor::new("title", "string")));
        let mut wsdl = Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeSequence::new()))
            .with_class_resolver(Rc::new(catalog));

        assert_eq!(wsdl.get_type("Shop\\Book[]").unwrap(), "tns:ArrayOfBook");
        assert_eq!(wsdl.get_type("\\Shop\\Book[]").unwrap(), "tns:ArrayOfBook");
        assert_eq!(
            wsdl.get_type("\\Shop\\Book[][]").unwrap(),
            "tns:ArrayOfArrayOfBook"
        );
        let xml = wsdl.to_xml().unwrap();
        assert_eq!(xml.matches(r#"name="ArrayOfBook""#).count(), 1);
        assert_eq!(xml.matches(r#"name="ArrayOfArrayOfBook""#).count(), 1);
        assert_eq!(
            wsdl.registered_type("Shop\\Book[][]").as_deref(),
            Some("tns:ArrayOfArrayOfBook")
        );
    }

    #[test]
    fn class_map_names_wrapper_and_items_alike() {
        let catalog = TypeCatalog::new()
            .with_class(ClassDescriptor::new("Shop\\Book").with_property(PropertyDescriptor::new("title", "string")));
        let mut wsdl = Wsdl::new("MyService", "http://localhost/my-service")
            .unwrap()
            .with_strategy(Rc::new(ArrayOfTypeSequence::new()))
            .with_class_resolver(Rc::new(catalog))
            .with_class_map([("Volume".to_owned(), "Shop\\Book".to_owned())].into());

        assert_eq!(wsdl.get_type("\\Shop\\Book[]").unwrap(), "tns:ArrayOfVolume");
        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(&sequence_type("ArrayOfVolume", "tns:Volume")));
        assert!(!xml.contains("ArrayOfBook"));
    }

    #[test]
    fn plain_class_falls_back_to_default_complex_type() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("ComplexTypeB").unwrap(), "tns:ComplexTypeB");
        assert_eq!(wsdl.get_type("ComplexTypeB").unwrap(), "tns:ComplexTypeB");
        assert!(wsdl.get_type("Unknown").is_err());
    }
}

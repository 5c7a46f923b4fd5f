use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::complex_type_strategy::{ComplexTypeStrategy, DefaultComplexType};
use super::document::{Document, NodeId};
use super::reflection::{ClassResolver, TypeCatalog};
use super::{Namespace, WsdlError};

lazy_static! {
    static ref SERVICE_NAME: Regex =
        Regex::new(r"^[A-Za-z_[^\x00-\x7E]][A-Za-z0-9_[^\x00-\x7E]]*$").unwrap();
    static ref URI: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").unwrap();
}

/// Transport announced by `soap:binding` unless configured otherwise.
pub const HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

pub fn validate_service_name(name: &str) -> Result<(), WsdlError> {
    if SERVICE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(WsdlError::InvalidServiceName(name.to_owned()))
    }
}

pub fn validate_uri(uri: &str) -> Result<(), WsdlError> {
    if URI.is_match(uri) {
        Ok(())
    } else {
        Err(WsdlError::InvalidUri(uri.to_owned()))
    }
}

/// Maps a native type name to its XML name.
///
/// An entry of `class_map` (XML name to native type) takes precedence; otherwise namespace
/// separators are stripped from both ends and the last path segment is used.
pub fn translate_type(class_map: &BTreeMap<String, String>, type_: &str) -> String {
    if let Some((xml_name, _)) = class_map.iter().find(|(_, native)| *native == type_) {
        return xml_name.clone();
    }
    let is_separator = |c: char| c == '\\' || c == ':';
    type_
        .trim_matches(is_separator)
        .rsplit(is_separator)
        .next()
        .unwrap_or_default()
        .to_owned()
}

/// Splits an array type identifier into its singular type and nesting depth.
///
/// `Foo[][]` yields `("Foo", 2)`, a plain `Foo` yields `("Foo", 0)`.
pub fn split_array_type(type_: &str) -> (String, usize) {
    let depth = type_.matches("[]").count();
    (type_.replace("[]", ""), depth)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Rpc,
    Document,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::Document => "document",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyUse {
    #[default]
    Encoded,
    Literal,
}

impl BodyUse {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Encoded => "encoded",
            Self::Literal => "literal",
        }
    }
}

/// Attributes of a `soap:body` element within a binding operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoapBody {
    pub use_: BodyUse,
    pub encoding_style: Option<String>,
    pub namespace: Option<String>,
}

impl SoapBody {
    pub fn literal() -> Self {
        Self {
            use_: BodyUse::Literal,
            encoding_style: None,
            namespace: None,
        }
    }
}

impl Default for SoapBody {
    fn default() -> Self {
        Self {
            use_: BodyUse::Encoded,
            encoding_style: Some(Namespace::SOAP_ENC_URI.to_owned()),
            namespace: None,
        }
    }
}

/// A fault of a binding operation, written as `fault/soap:fault`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoapFault {
    pub name: String,
    pub body: SoapBody,
}

/// A fault of a port type operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortFault {
    pub name: String,
    pub message: String,
}

/// A `part` of a `message`, referring either to a type or to a schema element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessagePart {
    Type { name: String, type_: String },
    Element { name: String, element: String },
}

impl MessagePart {
    pub fn typed(name: &str, type_: &str) -> Self {
        Self::Type {
            name: name.to_owned(),
            type_: type_.to_owned(),
        }
    }

    pub fn element(name: &str, element: &str) -> Self {
        Self::Element {
            name: name.to_owned(),
            element: element.to_owned(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    Sequence,
    All,
    Choice,
}

impl Compositor {
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::All => "all",
            Self::Choice => "choice",
        }
    }
}

/// A schema `element` declaration, optionally with an anonymous complex type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaElement {
    pub name: String,
    pub type_: Option<String>,
    pub nillable: bool,
    pub min_occurs: Option<String>,
    pub max_occurs: Option<String>,
    pub content: Option<(Compositor, Vec<SchemaElement>)>,
}

impl SchemaElement {
    pub fn typed(name: &str, type_: &str) -> Self {
        Self {
            name: name.to_owned(),
            type_: Some(type_.to_owned()),
            ..Default::default()
        }
    }

    pub fn wrapping(name: &str, compositor: Compositor, children: Vec<SchemaElement>) -> Self {
        Self {
            name: name.to_owned(),
            content: Some((compositor, children)),
            ..Default::default()
        }
    }
}

/// A WSDL 1.1 document under construction, together with its registry of mapped types.
pub struct Wsdl {
    document: Document,
    schema: Option<NodeId>,
    types: BTreeMap<String, String>,
    class_map: BTreeMap<String, String>,
    strategy: Rc<dyn ComplexTypeStrategy>,
    resolver: Rc<dyn ClassResolver>,
    name: String,
    uri: String,
}

impl Wsdl {
    pub const TAG_NAME: &'static str = "definitions";

    pub fn new(name: &str, uri: &str) -> Result<Self, WsdlError> {
        validate_service_name(name)?;
        validate_uri(uri)?;

        let mut document = Document::new(Namespace::Wsdl, Self::TAG_NAME);
        let root = document.root();
        document.set_attribute(root, "xmlns", Namespace::WSDL_URI);
        document.set_attribute(root, "xmlns:tns", uri);
        for ns in [
            Namespace::Soap,
            Namespace::Xsd,
            Namespace::SoapEnc,
            Namespace::Wsdl,
            Namespace::Soap12,
        ] {
            document.set_attribute(root, &format!("xmlns:{}", ns.prefix()), ns.uri());
        }
        document.set_attribute(root, "name", name);
        document.set_attribute(root, "targetNamespace", uri);

        Ok(Self {
            document,
            schema: None,
            types: BTreeMap::new(),
            class_map: BTreeMap::new(),
            strategy: Rc::new(DefaultComplexType::new()),
            resolver: Rc::new(TypeCatalog::new()),
            name: name.to_owned(),
            uri: uri.to_owned(),
        })
    }

    pub fn with_strategy(mut self, strategy: Rc<dyn ComplexTypeStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_class_resolver(mut self, resolver: Rc<dyn ClassResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_class_map(mut self, class_map: BTreeMap<String, String>) -> Self {
        self.class_map = class_map;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Changes the target namespace of the definitions and of the schema section.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), WsdlError> {
        validate_uri(uri)?;
        let root = self.document.root();
        self.document.set_attribute(root, "xmlns:tns", uri);
        self.document.set_attribute(root, "targetNamespace", uri);
        if let Some(schema) = self.schema {
            self.document.set_attribute(schema, "targetNamespace", uri);
        }
        self.uri = uri.to_owned();
        Ok(())
    }

    pub fn set_complex_type_strategy(&mut self, strategy: Rc<dyn ComplexTypeStrategy>) {
        self.strategy = strategy;
    }

    pub fn complex_type_strategy(&self) -> Rc<dyn ComplexTypeStrategy> {
        Rc::clone(&self.strategy)
    }

    pub fn class_resolver(&self) -> Rc<dyn ClassResolver> {
        Rc::clone(&self.resolver)
    }

    pub fn set_class_map(&mut self, class_map: BTreeMap<String, String>) {
        self.class_map = class_map;
    }

    pub fn class_map(&self) -> &BTreeMap<String, String> {
        &self.class_map
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn root(&self) -> NodeId {
        self.document.root()
    }

    pub fn translate_type(&self, type_: &str) -> String {
        translate_type(&self.class_map, type_)
    }

    // {type registry}

    /// Registers `type_` as `qualified_name`; the first registration of a type wins.
    pub fn add_type(&mut self, type_: &str, qualified_name: &str) {
        if !self.types.contains_key(type_) {
            tracing::debug!(type_, qualified_name, "registering type");
            self.types
                .insert(type_.to_owned(), qualified_name.to_owned());
        }
    }

    /// Like [`Wsdl::add_type`], but fails if another type already maps to `qualified_name`.
    pub fn claim_type(&mut self, type_: &str, qualified_name: &str) -> Result<(), WsdlError> {
        if let Some((existing, _)) = self
            .types
            .iter()
            .find(|(t, q)| *q == qualified_name && *t != type_)
        {
            return Err(WsdlError::NameCollision {
                type_: type_.to_owned(),
                qualified_name: qualified_name.to_owned(),
                existing: existing.clone(),
            });
        }
        self.add_type(type_, qualified_name);
        Ok(())
    }

    pub fn registered_type(&self, type_: &str) -> Option<String> {
        self.types.get(type_).cloned()
    }

    pub fn types(&self) -> &BTreeMap<String, String> {
        &self.types
    }

    /// Returns the XSD type for `type_`, mapping non built-in types through the active strategy.
    pub fn get_type(&mut self, type_: &str) -> Result<String, WsdlError> {
        let xsd_type = match type_.to_lowercase().as_str() {
            "string" | "str" => "xsd:string",
            "long" => "xsd:long",
            "int" | "integer" => "xsd:int",
            "float" => "xsd:float",
            "double" => "xsd:double",
            "boolean" | "bool" => "xsd:boolean",
            "array" => "soap-enc:Array",
            "object" => "xsd:struct",
            "mixed" => "xsd:anyType",
            "date" => "xsd:date",
            "datetime" => "xsd:dateTime",
            "void" => "",
            _ => return self.add_complex_type(type_),
        };
        Ok(xsd_type.to_owned())
    }

    pub fn add_complex_type(&mut self, type_: &str) -> Result<String, WsdlError> {
        let strategy = Rc::clone(&self.strategy);
        strategy.add_complex_type(self, type_)
    }

    // {document structure}

    /// The `xsd:schema` element of the `types` section, created on first use.
    pub fn schema(&mut self) -> NodeId {
        if let Some(schema) = self.schema {
            return schema;
        }
        let root = self.document.root();
        let types = self.document.create_element(Namespace::Wsdl, "types");
        let schema = self.document.create_element(Namespace::Xsd, "schema");
        self.document
            .set_attribute(schema, "targetNamespace", &self.uri);
        self.document.append_child(types, schema);

        // types precede everything except the documentation of the definitions
        let position = self
            .document
            .children(root)
            .iter()
            .take_while(|&&c| self.document.is_element(c, Namespace::Wsdl, "documentation"))
            .count();
        self.document.insert_child(root, position, types);
        self.schema = Some(schema);
        schema
    }

    /// Inserts `text` as the first child of `node`.
    ///
    /// Nodes of the schema get an `xsd:annotation`, everything else a WSDL `documentation`.
    pub fn add_documentation(&mut self, node: NodeId, text: &str) -> NodeId {
        let text = self.document.create_text(text);
        let documentation = if self.document.namespace(node) == Some(Namespace::Xsd) {
            let annotation = self.document.create_element(Namespace::Xsd, "annotation");
            let documentation = self
                .document
                .create_element(Namespace::Xsd, "documentation");
            self.document.append_child(documentation, text);
            self.document.append_child(annotation, documentation);
            annotation
        } else {
            let documentation = self
                .document
                .create_element(Namespace::Wsdl, "documentation");
            self.document.append_child(documentation, text);
            documentation
        };
        self.document.insert_first(node, documentation);
        documentation
    }

    pub fn add_message(&mut self, name: &str, parts: &[MessagePart]) -> NodeId {
        let root = self.document.root();
        let message = self.document.create_element(Namespace::Wsdl, "message");
        self.document.set_attribute(message, "name", name);
        for part in parts {
            let node = self.document.create_element(Namespace::Wsdl, "part");
            match part {
                MessagePart::Type { name, type_ } => {
                    self.document.set_attribute(node, "name", name);
                    self.document.set_attribute(node, "type", type_);
                }
                MessagePart::Element { name, element } => {
                    self.document.set_attribute(node, "name", name);
                    self.document.set_attribute(node, "element", element);
                }
            }
            self.document.append_child(message, node);
        }
        self.document.append_child(root, message);
        message
    }

    pub fn add_port_type(&mut self, name: &str) -> NodeId {
        let root = self.document.root();
        let port_type = self.document.create_element(Namespace::Wsdl, "portType");
        self.document.set_attribute(port_type, "name", name);
        self.document.append_child(root, port_type);
        port_type
    }

    pub fn add_port_operation(
        &mut self,
        port_type: NodeId,
        name: &str,
        input: Option<&str>,
        output: Option<&str>,
        fault: Option<&PortFault>,
    ) -> NodeId {
        let operation = self.document.create_element(Namespace::Wsdl, "operation");
        self.document.set_attribute(operation, "name", name);
        for (tag_name, message) in [("input", input), ("output", output)] {
            if let Some(message) = message {
                let node = self.document.create_element(Namespace::Wsdl, tag_name);
                self.document.set_attribute(node, "message", message);
                self.document.append_child(operation, node);
            }
        }
        if let Some(fault) = fault {
            let node = self.document.create_element(Namespace::Wsdl, "fault");
            self.document.set_attribute(node, "name", &fault.name);
            self.document.set_attribute(node, "message", &fault.message);
            self.document.append_child(operation, node);
        }
        self.document.append_child(port_type, operation);
        operation
    }

    pub fn add_binding(&mut self, name: &str, port_type: &str) -> NodeId {
        let root = self.document.root();
        let binding = self.document.create_element(Namespace::Wsdl, "binding");
        self.document.set_attribute(binding, "name", name);
        self.document.set_attribute(binding, "type", port_type);
        self.document.append_child(root, binding);
        binding
    }

    fn set_body_attributes(&mut self, node: NodeId, body: &SoapBody) {
        self.document.set_attribute(node, "use", body.use_.as_str());
        if let Some(encoding_style) = &body.encoding_style {
            self.document
                .set_attribute(node, "encodingStyle", encoding_style);
        }
        if let Some(namespace) = &body.namespace {
            self.document.set_attribute(node, "namespace", namespace);
        }
    }

    pub fn add_binding_operation(
        &mut self,
        binding: NodeId,
        name: &str,
        input: Option<&SoapBody>,
        output: Option<&SoapBody>,
        fault: Option<&SoapFault>,
    ) -> NodeId {
        let operation = self.document.create_element(Namespace::Wsdl, "operation");
        self.document.set_attribute(operation, "name", name);
        for (tag_name, body) in [("input", input), ("output", output)] {
            if let Some(body) = body {
                let node = self.document.create_element(Namespace::Wsdl, tag_name);
                let soap_body = self.document.create_element(Namespace::Soap, "body");
                self.set_body_attributes(soap_body, body);
                self.document.append_child(node, soap_body);
                self.document.append_child(operation, node);
            }
        }
        if let Some(fault) = fault {
            let node = self.document.create_element(Namespace::Wsdl, "fault");
            self.document.set_attribute(node, "name", &fault.name);
            let soap_fault = self.document.create_element(Namespace::Soap, "fault");
            self.document.set_attribute(soap_fault, "name", &fault.name);
            self.set_body_attributes(soap_fault, &fault.body);
            self.document.append_child(node, soap_fault);
            self.document.append_child(operation, node);
        }
        self.document.append_child(binding, operation);
        operation
    }

    pub fn add_soap_binding(&mut self, binding: NodeId, style: Style, transport: &str) -> NodeId {
        let soap_binding = self.document.create_element(Namespace::Soap, "binding");
        self.document
            .set_attribute(soap_binding, "style", style.as_str());
        self.document
            .set_attribute(soap_binding, "transport", transport);
        self.document.append_child(binding, soap_binding);
        soap_binding
    }

    pub fn add_soap_operation(&mut self, operation: NodeId, soap_action: &str) -> NodeId {
        let soap_operation = self.document.create_element(Namespace::Soap, "operation");
        self.document
            .set_attribute(soap_operation, "soapAction", soap_action);
        self.document.insert_first(operation, soap_operation);
        soap_operation
    }

    pub fn add_service(
        &mut self,
        name: &str,
        port_name: &str,
        binding: &str,
        location: &str,
    ) -> NodeId {
        let root = self.document.root();
        let service = self.document.create_element(Namespace::Wsdl, "service");
        self.document.set_attribute(service, "name", name);
        let port = self.document.create_element(Namespace::Wsdl, "port");
        self.document.set_attribute(port, "name", port_name);
        self.document.set_attribute(port, "binding", binding);
        let address = self.document.create_element(Namespace::Soap, "address");
        self.document.set_attribute(address, "location", location);
        self.document.append_child(port, address);
        self.document.append_child(service, port);
        self.document.append_child(root, service);
        service
    }

    /// Adds a top-level schema element and returns its qualified name.
    pub fn add_element(&mut self, element: &SchemaElement) -> String {
        let node = self.build_element(element);
        let schema = self.schema();
        self.document.append_child(schema, node);
        format!("{}:{}", Namespace::TYPES_PREFIX, element.name)
    }

    fn build_element(&mut self, element: &SchemaElement) -> NodeId {
        let node = self.document.create_element(Namespace::Xsd, "element");
        self.document.set_attribute(node, "name", &element.name);
        if let Some(type_) = &element.type_ {
            self.document.set_attribute(node, "type", type_);
        }
        if element.nillable {
            self.document.set_attribute(node, "nillable", "true");
        }
        if let Some(min_occurs) = &element.min_occurs {
            self.document.set_attribute(node, "minOccurs", min_occurs);
        }
        if let Some(max_occurs) = &element.max_occurs {
            self.document.set_attribute(node, "maxOccurs", max_occurs);
        }
        if let Some((compositor, children)) = &element.content {
            let complex_type = self.document.create_element(Namespace::Xsd, "complexType");
            if !children.is_empty() {
                let container = self
                    .document
                    .create_element(Namespace::Xsd, compositor.tag_name());
                for child in children {
                    let child = self.build_element(child);
                    self.document.append_child(container, child);
                }
                self.document.append_child(complex_type, container);
            }
            self.document.append_child(node, complex_type);
        }
        node
    }

    // {output}

    pub fn to_xml(&self) -> Result<String, WsdlError> {
        self.document.to_xml()
    }

    pub fn dump_to<W: Write>(&self, writer: W) -> Result<(), WsdlError> {
        self.document.write(writer)
    }

    /// Writes the document to `path`, or to stdout when no path is given.
    ///
    /// The output is re-read before writing so a malformed document never reaches the target.
    pub fn dump(&self, path: Option<&Path>) -> Result<(), WsdlError> {
        let xml = self.to_xml()?;
        roxmltree::Document::parse(&xml)?;
        match path {
            Some(path) => {
                let mut file = BufWriter::new(File::create(path)?);
                file.write_all(xml.as_bytes())?;
                file.flush()?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(xml.as_bytes())?;
                stdout.flush()?;
            }
        }
        tracing::debug!(service = %self.name, "dumped wsdl document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wsdl() -> Wsdl {
        Wsdl::new("MyService", "http://localhost/my-service").unwrap()
    }

    #[test]
    fn rejects_invalid_service_names() {
        for name in ["", "1Service", "My Service", "My-Service"] {
            assert!(matches!(
                Wsdl::new(name, "http://localhost/"),
                Err(WsdlError::InvalidServiceName(_))
            ));
        }
        assert!(Wsdl::new("_Service_2", "urn:test").is_ok());
        assert!(Wsdl::new("Dienstübersicht", "urn:test").is_ok());
    }

    #[test]
    fn rejects_invalid_uris() {
        for uri in ["", "localhost", "http://local host/"] {
            assert!(matches!(
                Wsdl::new("MyService", uri),
                Err(WsdlError::InvalidUri(_))
            ));
        }
    }

    #[test]
    fn translates_namespaced_types() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.translate_type("\\SomeNamespace\\SomeType\\SomeOtherType"),
            "SomeOtherType"
        );
        assert_eq!(wsdl.translate_type("SomeType\\"), "SomeType");
        assert_eq!(wsdl.translate_type("app::model::Book"), "Book");

        wsdl.set_class_map(BTreeMap::from([(
            "ShortName".to_owned(),
            "Very\\Long\\Name".to_owned(),
        )]));
        assert_eq!(wsdl.translate_type("Very\\Long\\Name"), "ShortName");
    }

    #[test]
    fn maps_builtin_types_case_insensitively() {
        let mut wsdl = wsdl();
        let expected = [
            ("string", "xsd:string"),
            ("STR", "xsd:string"),
            ("long", "xsd:long"),
            ("Int", "xsd:int"),
            ("integer", "xsd:int"),
            ("float", "xsd:float"),
            ("double", "xsd:double"),
            ("boolean", "xsd:boolean"),
            ("bool", "xsd:boolean"),
            ("array", "soap-enc:Array"),
            ("object", "xsd:struct"),
            ("mixed", "xsd:anyType"),
            ("date", "xsd:date"),
            ("DateTime", "xsd:dateTime"),
            ("void", ""),
        ];
        for (native, xsd) in expected {
            assert_eq!(wsdl.get_type(native).unwrap(), xsd, "for {native}");
        }
        assert!(wsdl.types().is_empty());
    }

    #[test]
    fn first_registration_wins() {
        let mut wsdl = wsdl();
        wsdl.add_type("Foo", "tns:Foo");
        wsdl.add_type("Foo", "tns:Other");
        assert_eq!(wsdl.registered_type("Foo").as_deref(), Some("tns:Foo"));
        assert_eq!(wsdl.types().len(), 1);
    }

    #[test]
    fn claiming_a_taken_name_fails() {
        let mut wsdl = wsdl();
        wsdl.claim_type("A\\Foo", "tns:Foo").unwrap();
        wsdl.claim_type("A\\Foo", "tns:Foo").unwrap();
        let error = wsdl.claim_type("B\\Foo", "tns:Foo").unwrap_err();
        assert!(matches!(error, WsdlError::NameCollision { existing, .. } if existing == "A\\Foo"));
    }

    #[test]
    fn root_declares_namespaces() {
        let wsdl = wsdl();
        let xml = wsdl.to_xml().unwrap();
        let parsed = roxmltree::Document::parse(&xml).unwrap();
        let root = parsed.root_element();
        assert_eq!(root.tag_name().namespace(), Some(Namespace::WSDL_URI));
        assert_eq!(root.tag_name().name(), "definitions");
        assert_eq!(root.attribute("name"), Some("MyService"));
        assert_eq!(
            root.attribute("targetNamespace"),
            Some("http://localhost/my-service")
        );
        for (prefix, uri) in [
            ("tns", "http://localhost/my-service"),
            ("soap", Namespace::SOAP_URI),
            ("xsd", Namespace::XSD_URI),
            ("soap-enc", Namespace::SOAP_ENC_URI),
            ("wsdl", Namespace::WSDL_URI),
            ("soap12", Namespace::SOAP12_URI),
        ] {
            assert_eq!(root.lookup_namespace_uri(Some(prefix)), Some(uri));
        }
    }

    #[test]
    fn set_uri_updates_target_namespaces() {
        let mut wsdl = wsdl();
        let schema = wsdl.schema();
        wsdl.set_uri("urn:changed").unwrap();
        let root = wsdl.root();
        assert_eq!(wsdl.document().attribute(root, "targetNamespace"), Some("urn:changed"));
        assert_eq!(wsdl.document().attribute(root, "xmlns:tns"), Some("urn:changed"));
        assert_eq!(
            wsdl.document().attribute(schema, "targetNamespace"),
            Some("urn:changed")
        );
        assert!(wsdl.set_uri("not a uri").is_err());
        assert_eq!(wsdl.uri(), "urn:changed");
    }

    #[test]
    fn schema_is_created_once_before_other_sections() {
        let mut wsdl = wsdl();
        let root = wsdl.root();
        wsdl.add_documentation(root, "Service docs");
        wsdl.add_message("pingIn", &[]);
        let schema = wsdl.schema();
        assert_eq!(wsdl.schema(), schema);

        let document = wsdl.document();
        let children = document.children(root);
        assert_eq!(children.len(), 3);
        assert!(document.is_element(children[0], Namespace::Wsdl, "documentation"));
        assert!(document.is_element(children[1], Namespace::Wsdl, "types"));
        assert_eq!(document.parent(schema), Some(children[1]));
    }

    #[test]
    fn documentation_is_namespace_aware() {
        let mut wsdl = wsdl();
        let schema = wsdl.schema();
        let port_type = wsdl.add_port_type("MyServicePort");
        let operation = wsdl.add_port_operation(port_type, "ping", Some("tns:pingIn"), None, None);
        wsdl.add_documentation(operation, "Pings");
        wsdl.add_documentation(schema, "Types");

        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(
            r#"<operation name="ping"><documentation>Pings</documentation><input message="tns:pingIn"/></operation>"#
        ));
        assert!(xml.contains(
            "<xsd:annotation><xsd:documentation>Types</xsd:documentation></xsd:annotation>"
        ));
    }

    #[test]
    fn builds_messages_bindings_and_services() {
        let mut wsdl = wsdl();
        wsdl.add_message(
            "addIn",
            &[
                MessagePart::typed("a", "xsd:int"),
                MessagePart::element("parameters", "tns:add"),
            ],
        );
        let binding = wsdl.add_binding("MyServiceBinding", "tns:MyServicePort");
        wsdl.add_soap_binding(binding, Style::Rpc, HTTP_TRANSPORT);
        let operation = wsdl.add_binding_operation(
            binding,
            "add",
            Some(&SoapBody::default()),
            Some(&SoapBody::literal()),
            Some(&SoapFault {
                name: "AddFault".into(),
                body: SoapBody::literal(),
            }),
        );
        wsdl.add_soap_operation(operation, "http://localhost/my-service#add");
        wsdl.add_service(
            "MyServiceService",
            "MyServicePort",
            "tns:MyServiceBinding",
            "http://localhost/my-service",
        );

        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(
            r#"<message name="addIn"><part name="a" type="xsd:int"/><part name="parameters" element="tns:add"/></message>"#
        ));
        assert!(xml.contains(concat!(
            r#"<binding name="MyServiceBinding" type="tns:MyServicePort">"#,
            r#"<soap:binding style="rpc" transport="http://schemas.xmlsoap.org/soap/http"/>"#,
            r#"<operation name="add"><soap:operation soapAction="http://localhost/my-service#add"/>"#,
            r#"<input><soap:body use="encoded" encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"/></input>"#,
            r#"<output><soap:body use="literal"/></output>"#,
            r#"<fault name="AddFault"><soap:fault name="AddFault" use="literal"/></fault>"#,
            r#"</operation></binding>"#,
        )));
        assert!(xml.contains(concat!(
            r#"<service name="MyServiceService"><port name="MyServicePort" binding="tns:MyServiceBinding">"#,
            r#"<soap:address location="http://localhost/my-service"/></port></service>"#,
        )));
    }

    #[test]
    fn add_element_wraps_children() {
        let mut wsdl = wsdl();
        let mut optional = SchemaElement::typed("b", "xsd:string");
        optional.nillable = true;
        let name = wsdl.add_element(&SchemaElement::wrapping(
            "add",
            Compositor::Sequence,
            vec![SchemaElement::typed("a", "xsd:int"), optional],
        ));
        assert_eq!(name, "tns:add");
        wsdl.add_element(&SchemaElement::wrapping("empty", Compositor::All, vec![]));

        let xml = wsdl.to_xml().unwrap();
        assert!(xml.contains(concat!(
            r#"<xsd:element name="add"><xsd:complexType><xsd:sequence>"#,
            r#"<xsd:element name="a" type="xsd:int"/><xsd:element name="b" type="xsd:string" nillable="true"/>"#,
            r#"</xsd:sequence></xsd:complexType></xsd:element>"#,
        )));
        assert!(xml.contains(r#"<xsd:element name="empty"><xsd:complexType/></xsd:element>"#));
    }

    #[test]
    fn dump_writes_well_formed_file() {
        let mut wsdl = wsdl();
        wsdl.schema();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.wsdl");
        wsdl.dump(Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, wsdl.to_xml().unwrap());
        let parsed = roxmltree::Document::parse(&written).unwrap();
        let schema = parsed
            .descendants()
            .find(|n| n.has_tag_name((Namespace::XSD_URI, "schema")))
            .unwrap();
        assert_eq!(
            schema.attribute("targetNamespace"),
            Some("http://localhost/my-service")
        );
    }
}

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use super::complex_type_strategy::{ComplexTypeStrategy, DefaultComplexType};
use super::reflection::{ClassResolver, FunctionDescriptor, ParameterDescriptor, TypeCatalog};
use super::wsdl::{
    translate_type, validate_service_name, validate_uri, Compositor, MessagePart, SchemaElement,
    SoapBody, Style, HTTP_TRANSPORT,
};
use super::{Namespace, Wsdl, WsdlError};

/// Supplies the types and documentation of the functions a service exposes.
pub trait DiscoveryStrategy {
    fn function_parameter_type(&self, parameter: &ParameterDescriptor) -> String;
    fn function_return_type(&self, function: &FunctionDescriptor) -> String;
    fn is_function_one_way(&self, function: &FunctionDescriptor) -> bool;
    fn function_documentation(&self, function: &FunctionDescriptor) -> String;
}

/// Reads everything straight from the descriptors; a `void` function is one-way.
#[derive(Copy, Clone, Debug, Default)]
pub struct ReflectionDiscovery;

impl DiscoveryStrategy for ReflectionDiscovery {
    fn function_parameter_type(&self, parameter: &ParameterDescriptor) -> String {
        parameter.type_.clone()
    }

    fn function_return_type(&self, function: &FunctionDescriptor) -> String {
        function.return_type.clone()
    }

    fn is_function_one_way(&self, function: &FunctionDescriptor) -> bool {
        function.return_type == "void"
    }

    fn function_documentation(&self, function: &FunctionDescriptor) -> String {
        function.description.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingStyle {
    pub style: Style,
    pub transport: String,
}

impl Default for BindingStyle {
    fn default() -> Self {
        Self {
            style: Style::Rpc,
            transport: HTTP_TRANSPORT.to_owned(),
        }
    }
}

/// Generates a WSDL document from a set of functions or from the methods of a class.
pub struct AutoDiscover {
    catalog: Rc<TypeCatalog>,
    service_name: Option<String>,
    uri: Option<String>,
    class: Option<String>,
    functions: Vec<String>,
    class_map: BTreeMap<String, String>,
    strategy: Rc<dyn ComplexTypeStrategy>,
    discovery: Rc<dyn DiscoveryStrategy>,
    binding_style: BindingStyle,
    operation_body_style: SoapBody,
}

impl AutoDiscover {
    pub fn new(catalog: TypeCatalog) -> Self {
        Self {
            catalog: Rc::new(catalog),
            service_name: None,
            uri: None,
            class: None,
            functions: Vec::new(),
            class_map: BTreeMap::new(),
            strategy: Rc::new(DefaultComplexType::new()),
            discovery: Rc::new(ReflectionDiscovery),
            binding_style: BindingStyle::default(),
            operation_body_style: SoapBody::default(),
        }
    }

    pub fn set_service_name(&mut self, name: &str) -> Result<&mut Self, WsdlError> {
        validate_service_name(name)?;
        self.service_name = Some(name.to_owned());
        Ok(self)
    }

    /// The configured service name, or the translated name of the class.
    pub fn service_name(&self) -> Result<String, WsdlError> {
        match (&self.service_name, &self.class) {
            (Some(name), _) => Ok(name.clone()),
            (None, Some(class)) => Ok(translate_type(&self.class_map, class)),
            (None, None) => Err(WsdlError::MissingServiceName),
        }
    }

    pub fn set_uri(&mut self, uri: &str) -> Result<&mut Self, WsdlError> {
        validate_uri(uri)?;
        self.uri = Some(uri.to_owned());
        Ok(self)
    }

    pub fn uri(&self) -> Result<&str, WsdlError> {
        self.uri.as_deref().ok_or(WsdlError::MissingUri)
    }

    pub fn set_class_map(&mut self, class_map: BTreeMap<String, String>) -> &mut Self {
        self.class_map = class_map;
        self
    }

    pub fn class_map(&self) -> &BTreeMap<String, String> {
        &self.class_map
    }

    pub fn set_complex_type_strategy(&mut self, strategy: Rc<dyn ComplexTypeStrategy>) -> &mut Self {
        self.strategy = strategy;
        self
    }

    pub fn set_discovery_strategy(&mut self, discovery: Rc<dyn DiscoveryStrategy>) -> &mut Self {
        self.discovery = discovery;
        self
    }

    pub fn set_binding_style(&mut self, binding_style: BindingStyle) -> &mut Self {
        self.binding_style = binding_style;
        self
    }

    pub fn binding_style(&self) -> &BindingStyle {
        &self.binding_style
    }

    pub fn set_operation_body_style(&mut self, body: SoapBody) -> &mut Self {
        self.operation_body_style = body;
        self
    }

    pub fn operation_body_style(&self) -> &SoapBody {
        &self.operation_body_style
    }

    /// Exposes the public methods of `class`; takes precedence over added functions.
    pub fn set_class(&mut self, class: &str) -> Result<&mut Self, WsdlError> {
        if self.catalog.resolve_class(class).is_none() {
            return Err(WsdlError::UnknownClass(class.to_owned()));
        }
        self.class = Some(class.to_owned());
        Ok(self)
    }

    pub fn add_function(&mut self, name: &str) -> Result<&mut Self, WsdlError> {
        if self.catalog.function(name).is_none() {
            return Err(WsdlError::UnknownFunction(name.to_owned()));
        }
        if !self.functions.iter().any(|f| f == name) {
            self.functions.push(name.to_owned());
        }
        Ok(self)
    }

    fn operations(&self) -> Vec<FunctionDescriptor> {
        if let Some(class) = self.class.as_deref() {
            return self
                .catalog
                .resolve_class(class)
                .map(|c| c.exposed_methods().cloned().collect())
                .unwrap_or_default();
        }
        self.functions
            .iter()
            .filter_map(|name| self.catalog.function(name).cloned())
            .collect()
    }

    pub fn generate(&self) -> Result<Wsdl, WsdlError> {
        let uri = self.uri()?.to_owned();
        let service_name = self.service_name()?;

        let mut wsdl = Wsdl::new(&service_name, &uri)?
            .with_strategy(Rc::clone(&self.strategy))
            .with_class_resolver(Rc::clone(&self.catalog) as Rc<dyn ClassResolver>)
            .with_class_map(self.class_map.clone());

        wsdl.schema();
        let port_type = wsdl.add_port_type(&format!("{service_name}Port"));
        let binding = wsdl.add_binding(
            &format!("{service_name}Binding"),
            &format!("{}:{service_name}Port", Namespace::TYPES_PREFIX),
        );
        wsdl.add_soap_binding(
            binding,
            self.binding_style.style,
            &self.binding_style.transport,
        );
        wsdl.add_service(
            &format!("{service_name}Service"),
            &format!("{service_name}Port"),
            &format!("{}:{service_name}Binding", Namespace::TYPES_PREFIX),
            &uri,
        );

        for function in self.operations() {
            self.add_function_to_wsdl(&function, &mut wsdl, &uri, port_type, binding)?;
        }
        tracing::debug!(service = %service_name, types = wsdl.types().len(), "generated wsdl");
        Ok(wsdl)
    }

    fn add_function_to_wsdl(
        &self,
        function: &FunctionDescriptor,
        wsdl: &mut Wsdl,
        uri: &str,
        port_type: crate::NodeId,
        binding: crate::NodeId,
    ) -> Result<(), WsdlError> {
        let name = wsdl.translate_type(&function.name);
        let tns = Namespace::TYPES_PREFIX;
        let document_style = self.binding_style.style == Style::Document;
        tracing::debug!(operation = %name, "adding operation");

        let mut parts = Vec::new();
        if document_style {
            let mut sequence = Vec::new();
            for parameter in &function.parameters {
                let type_ = wsdl.get_type(&self.discovery.function_parameter_type(parameter))?;
                let mut element = SchemaElement::typed(&parameter.name, &type_);
                element.nillable = parameter.optional;
                sequence.push(element);
            }
            let element = SchemaElement::wrapping(&name, Compositor::Sequence, sequence);
            parts.push(MessagePart::element("parameters", &wsdl.add_element(&element)));
        } else {
            for parameter in &function.parameters {
                let type_ = wsdl.get_type(&self.discovery.function_parameter_type(parameter))?;
                parts.push(MessagePart::typed(&parameter.name, &type_));
            }
        }
        wsdl.add_message(&format!("{name}In"), &parts);

        let one_way = self.discovery.is_function_one_way(function);
        if !one_way {
            let return_type = self.discovery.function_return_type(function);
            let mut parts = Vec::new();
            if document_style {
                let mut sequence = Vec::new();
                if return_type != "void" {
                    sequence.push(SchemaElement::typed(
                        &format!("{name}Result"),
                        &wsdl.get_type(&return_type)?,
                    ));
                }
                let element =
                    SchemaElement::wrapping(&format!("{name}Response"), Compositor::Sequence, sequence);
                parts.push(MessagePart::element("parameters", &wsdl.add_element(&element)));
            } else if return_type != "void" {
                parts.push(MessagePart::typed("return", &wsdl.get_type(&return_type)?));
            }
            wsdl.add_message(&format!("{name}Out"), &parts);
        }

        let input = format!("{tns}:{name}In");
        let output = format!("{tns}:{name}Out");
        let port_operation = wsdl.add_port_operation(
            port_type,
            &name,
            Some(&input),
            (!one_way).then_some(output.as_str()),
            None,
        );
        let description = self.discovery.function_documentation(function);
        if !description.is_empty() {
            wsdl.add_documentation(port_operation, &description);
        }

        let mut body = self.operation_body_style.clone();
        if !document_style && body.namespace.is_none() {
            body.namespace = Some(uri.to_owned());
        }
        let operation = wsdl.add_binding_operation(
            binding,
            &name,
            Some(&body),
            (!one_way).then_some(&body),
            None,
        );
        wsdl.add_soap_operation(operation, &format!("{uri}#{name}"));
        Ok(())
    }

    pub fn to_xml(&self) -> Result<String, WsdlError> {
        self.generate()?.to_xml()
    }

    pub fn dump(&self, path: Option<&Path>) -> Result<(), WsdlError> {
        self.generate()?.dump(path)
    }

    pub fn dump_to<W: Write>(&self, writer: W) -> Result<(), WsdlError> {
        self.generate()?.dump_to(writer)
    }
}

use dt_wsdl::FunctionDescriptor;

use super::{Service, ServiceError, Value};

/// Adapts a service to document/literal wrapped calls.
///
/// Each call carries one struct whose members are the parameters by name; the result is
/// returned as a struct with the single member `<operation>Result`.
pub struct DocumentLiteralWrapper<S> {
    delegate: S,
}

impl<S: Service> DocumentLiteralWrapper<S> {
    pub fn new(delegate: S) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &S {
        &self.delegate
    }

    fn operation(&self, name: &str) -> Result<FunctionDescriptor, ServiceError> {
        self.delegate
            .operations()
            .into_iter()
            .find(|op| op.name == name)
            .ok_or_else(|| {
                ServiceError::new(
                    "BadMethodCall",
                    &format!("Method {name} does not exist on delegate object"),
                )
            })
    }
}

impl<S: Service> Service for DocumentLiteralWrapper<S> {
    fn operations(&self) -> Vec<FunctionDescriptor> {
        self.delegate.operations()
    }

    fn invoke(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, ServiceError> {
        let descriptor = self.operation(operation)?;
        let [Value::Struct(members)] = arguments.as_slice() else {
            return Err(ServiceError::new(
                "UnexpectedValue",
                "Expecting exactly one argument that is the document/literal wrapper.",
            ));
        };
        let delegate_arguments = descriptor
            .parameters
            .iter()
            .map(|p| members.get(&p.name).cloned().unwrap_or_default())
            .collect();

        let result = self.delegate.invoke(operation, delegate_arguments)?;
        Ok(Value::structure([(format!("{operation}Result"), result)]))
    }
}

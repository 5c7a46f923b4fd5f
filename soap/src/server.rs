use std::rc::Rc;

use dt_wsdl::wsdl::validate_uri;
use dt_wsdl::FunctionDescriptor;

use super::{Call, Fault, ServiceError, SoapError, SoapRuntime, SoapVersion, Value};

const INVALID_XML: &str = "Invalid XML";
const ILLEGAL_DOCTYPE: &str = "Invalid XML: Detected use of illegal DOCTYPE";
const UNKNOWN_ERROR: &str = "Unknown error";

pub type Handler = Box<dyn Fn(&[Value]) -> Result<Value, ServiceError>>;

/// An object whose operations are exposed by a [`Server`].
pub trait Service {
    fn operations(&self) -> Vec<FunctionDescriptor>;
    fn invoke(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, ServiceError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerOptions {
    pub soap_version: SoapVersion,
    pub actor: Option<String>,
    pub uri: Option<String>,
    pub wsdl: Option<String>,
}

pub fn validate_urn(urn: &str) -> Result<(), SoapError> {
    validate_uri(urn).map_err(|_| SoapError::InvalidOption {
        option: "urn",
        value: urn.to_owned(),
    })
}

fn check_request(request: &str) -> Result<(), &'static str> {
    if request.is_empty() {
        return Err(INVALID_XML);
    }
    match roxmltree::Document::parse(request) {
        Ok(_) => Ok(()),
        Err(roxmltree::Error::DtdDetected) => Err(ILLEGAL_DOCTYPE),
        Err(_) => Err(INVALID_XML),
    }
}

/// Dispatches decoded SOAP calls to registered functions or to an attached service object.
pub struct Server {
    runtime: Rc<dyn SoapRuntime>,
    options: ServerOptions,
    functions: Vec<(String, Handler)>,
    service: Option<Box<dyn Service>>,
    fault_kinds: Vec<String>,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl Server {
    pub fn new(runtime: Rc<dyn SoapRuntime>) -> Self {
        Self {
            runtime,
            options: ServerOptions::default(),
            functions: Vec::new(),
            service: None,
            fault_kinds: Vec::new(),
            last_request: None,
            last_response: None,
        }
    }

    pub fn with_options(
        runtime: Rc<dyn SoapRuntime>,
        options: ServerOptions,
    ) -> Result<Self, SoapError> {
        let mut server = Self::new(runtime);
        server.set_options(options)?;
        Ok(server)
    }

    pub fn set_options(&mut self, options: ServerOptions) -> Result<(), SoapError> {
        if let Some(actor) = &options.actor {
            validate_urn(actor)?;
        }
        if let Some(uri) = &options.uri {
            validate_urn(uri)?;
        }
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    pub fn soap_version(&self) -> SoapVersion {
        self.options.soap_version
    }

    pub fn set_soap_version(&mut self, version: SoapVersion) {
        self.options.soap_version = version;
    }

    pub fn set_actor(&mut self, actor: &str) -> Result<(), SoapError> {
        validate_urn(actor)?;
        self.options.actor = Some(actor.to_owned());
        Ok(())
    }

    pub fn actor(&self) -> Option<&str> {
        self.options.actor.as_deref()
    }

    pub fn set_uri(&mut self, uri: &str) -> Result<(), SoapError> {
        validate_urn(uri)?;
        self.options.uri = Some(uri.to_owned());
        Ok(())
    }

    pub fn uri(&self) -> Option<&str> {
        self.options.uri.as_deref()
    }

    /// Registers a function; registering a name again replaces its handler.
    pub fn add_function(
        &mut self,
        name: &str,
        handler: impl Fn(&[Value]) -> Result<Value, ServiceError> + 'static,
    ) -> &mut Self {
        let handler: Handler = Box::new(handler);
        match self.functions.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = handler,
            None => self.functions.push((name.to_owned(), handler)),
        }
        self
    }

    /// Attaches the object whose operations are exposed; only one object can be attached.
    pub fn set_object(&mut self, service: impl Service + 'static) -> Result<(), SoapError> {
        if self.service.is_some() {
            return Err(SoapError::ServiceAlreadyAttached);
        }
        self.service = Some(Box::new(service));
        Ok(())
    }

    /// Names of all callable operations, functions first.
    pub fn functions(&self) -> Vec<String> {
        let mut functions: Vec<String> = self.functions.iter().map(|(n, _)| n.clone()).collect();
        if let Some(service) = &self.service {
            functions.extend(service.operations().into_iter().map(|op| op.name));
        }
        functions
    }

    pub fn register_fault_kind(&mut self, kind: &str) -> &mut Self {
        if !self.fault_kinds.iter().any(|k| k == kind) {
            self.fault_kinds.push(kind.to_owned());
        }
        self
    }

    /// Returns whether `kind` was registered before.
    pub fn deregister_fault_kind(&mut self, kind: &str) -> bool {
        let before = self.fault_kinds.len();
        self.fault_kinds.retain(|k| k != kind);
        self.fault_kinds.len() != before
    }

    pub fn fault_kinds(&self) -> &[String] {
        &self.fault_kinds
    }

    /// Turns a service error into a fault, hiding the message of unregistered error kinds.
    pub fn fault(&self, error: &ServiceError, code: &str) -> Fault {
        if self.fault_kinds.contains(&error.kind) {
            let code = error.code.as_deref().unwrap_or(code);
            Fault::new(code, &error.message)
        } else {
            Fault::new(code, UNKNOWN_ERROR)
        }
    }

    fn dispatch(&self, call: Call) -> Result<Value, Fault> {
        tracing::debug!(operation = %call.operation, "dispatching call");
        if let Some((_, handler)) = self.functions.iter().find(|(n, _)| *n == call.operation) {
            return handler(&call.arguments).map_err(|e| self.fault(&e, "Receiver"));
        }
        if let Some(service) = &self.service {
            if service
                .operations()
                .iter()
                .any(|op| op.name == call.operation)
            {
                return service
                    .invoke(&call.operation, call.arguments)
                    .map_err(|e| self.fault(&e, "Receiver"));
            }
        }
        Err(Fault::new(
            "Sender",
            &format!("Function '{}' doesn't exist", call.operation),
        ))
    }

    /// Handles one request and returns the encoded response or fault.
    pub fn handle(&mut self, request: &str) -> Result<String, SoapError> {
        if self.options.wsdl.is_none() && self.options.uri.is_none() {
            return Err(SoapError::MissingUri);
        }
        self.last_request = Some(request.to_owned());
        self.last_response = None;
        let version = self.options.soap_version;

        let outcome = match check_request(request) {
            Err(message) => {
                tracing::warn!(reason = message, "rejecting request");
                Err(Fault::new("Sender", message))
            }
            Ok(()) => match self.runtime.decode_request(request) {
                Ok(call) => {
                    let operation = call.operation.clone();
                    self.dispatch(call).map(|value| (operation, value))
                }
                Err(e) => Err(Fault::new("Sender", &e.to_string())),
            },
        };
        let response = match outcome {
            Ok((operation, value)) => self.runtime.encode_response(&operation, &value, version)?,
            Err(fault) => {
                tracing::debug!(%fault, "answering with fault");
                self.runtime.encode_fault(&fault, version)?
            }
        };
        self.last_response = Some(response.clone());
        Ok(response)
    }

    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }
}

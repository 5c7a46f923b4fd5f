use std::cell::RefCell;
use std::rc::Rc;

use super::{Call, Server, SoapError, SoapRuntime, SoapVersion, Value};

/// Delivers an encoded request and returns the raw response.
pub trait Transport {
    fn do_request(
        &mut self,
        request: &str,
        location: &str,
        action: &str,
        version: SoapVersion,
    ) -> Result<String, SoapError>;
}

/// Hands every request to a callback instead of sending it anywhere.
pub struct CallbackTransport<F> {
    callback: F,
}

impl<F> CallbackTransport<F>
where
    F: FnMut(&str, &str, &str, SoapVersion) -> Result<String, SoapError>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Transport for CallbackTransport<F>
where
    F: FnMut(&str, &str, &str, SoapVersion) -> Result<String, SoapError>,
{
    fn do_request(
        &mut self,
        request: &str,
        location: &str,
        action: &str,
        version: SoapVersion,
    ) -> Result<String, SoapError> {
        // some encoders emit leading whitespace before the XML declaration
        (self.callback)(request.trim_start(), location, action, version)
    }
}

/// Routes requests to an in-process server.
pub struct LocalTransport {
    server: Rc<RefCell<Server>>,
}

impl LocalTransport {
    pub fn new(server: Rc<RefCell<Server>>) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &Rc<RefCell<Server>> {
        &self.server
    }
}

impl Transport for LocalTransport {
    fn do_request(
        &mut self,
        request: &str,
        _location: &str,
        _action: &str,
        _version: SoapVersion,
    ) -> Result<String, SoapError> {
        self.server.borrow_mut().handle(request)
    }
}

/// Hooks to reshape arguments before encoding and results after decoding.
pub trait CallAdapter {
    fn pre_process_arguments(&self, arguments: Vec<Value>) -> Result<Vec<Value>, SoapError> {
        Ok(arguments)
    }

    fn pre_process_result(&self, _operation: &str, result: Value) -> Value {
        result
    }
}

/// Calling convention of .NET services: arguments grouped in one struct, results wrapped in
/// `<operation>Result`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DotNetAdapter;

impl CallAdapter for DotNetAdapter {
    fn pre_process_arguments(&self, arguments: Vec<Value>) -> Result<Vec<Value>, SoapError> {
        match arguments.as_slice() {
            [] | [Value::Struct(_)] => Ok(arguments),
            _ => Err(SoapError::UngroupedArguments),
        }
    }

    fn pre_process_result(&self, operation: &str, result: Value) -> Value {
        match result {
            Value::Struct(mut members) => {
                match members.remove(&format!("{operation}Result")) {
                    Some(inner) => inner,
                    None => Value::Struct(members),
                }
            }
            other => other,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub location: Option<String>,
    pub uri: Option<String>,
    pub wsdl: Option<String>,
    pub soap_version: SoapVersion,
}

pub struct Client {
    runtime: Rc<dyn SoapRuntime>,
    transport: Box<dyn Transport>,
    adapter: Option<Box<dyn CallAdapter>>,
    options: ClientOptions,
    last_method: Option<String>,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl Client {
    pub fn new(
        runtime: Rc<dyn SoapRuntime>,
        transport: impl Transport + 'static,
        options: ClientOptions,
    ) -> Result<Self, SoapError> {
        if options.location.is_none() {
            return Err(SoapError::MissingLocation);
        }
        if options.wsdl.is_none() && options.uri.is_none() {
            return Err(SoapError::MissingUri);
        }
        Ok(Self {
            runtime,
            transport: Box::new(transport),
            adapter: None,
            options,
            last_method: None,
            last_request: None,
            last_response: None,
        })
    }

    /// A client talking to `server` in-process, using the server's SOAP version.
    pub fn local(
        runtime: Rc<dyn SoapRuntime>,
        server: Rc<RefCell<Server>>,
        mut options: ClientOptions,
    ) -> Result<Self, SoapError> {
        options.soap_version = server.borrow().soap_version();
        Self::new(runtime, LocalTransport::new(server), options)
    }

    /// A client for .NET services, which speak SOAP 1.1.
    pub fn dot_net(
        runtime: Rc<dyn SoapRuntime>,
        transport: impl Transport + 'static,
        mut options: ClientOptions,
    ) -> Result<Self, SoapError> {
        options.soap_version = SoapVersion::Soap11;
        let mut client = Self::new(runtime, transport, options)?;
        client.set_adapter(DotNetAdapter);
        Ok(client)
    }

    pub fn set_adapter(&mut self, adapter: impl CallAdapter + 'static) {
        self.adapter = Some(Box::new(adapter));
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn soap_version(&self) -> SoapVersion {
        self.options.soap_version
    }

    pub fn call(&mut self, operation: &str, arguments: Vec<Value>) -> Result<Value, SoapError> {
        self.last_method = Some(operation.to_owned());
        let arguments = match &self.adapter {
            Some(adapter) => adapter.pre_process_arguments(arguments)?,
            None => arguments,
        };

        let version = self.options.soap_version;
        let request = self
            .runtime
            .encode_request(&Call::new(operation, arguments), version)?;
        self.last_request = Some(request.clone());

        let location = self.options.location.as_deref().unwrap_or_default();
        let action = match &self.options.uri {
            Some(uri) => format!("{uri}#{operation}"),
            None => operation.to_owned(),
        };
        tracing::debug!(operation, location, "sending request");
        let response = self
            .transport
            .do_request(&request, location, &action, version)?;
        self.last_response = Some(response.clone());

        let result = self
            .runtime
            .decode_response(&response)?
            .map_err(SoapError::Fault)?;
        Ok(match &self.adapter {
            Some(adapter) => adapter.pre_process_result(operation, result),
            None => result,
        })
    }

    pub fn last_method(&self) -> Option<&str> {
        self.last_method.as_deref()
    }

    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }
}

use super::{Fault, SoapError, Value};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SoapVersion {
    Soap11,
    #[default]
    Soap12,
}

/// A decoded call: the operation name and its positional arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub operation: String,
    pub arguments: Vec<Value>,
}

impl Call {
    pub fn new(operation: &str, arguments: Vec<Value>) -> Self {
        Self {
            operation: operation.to_owned(),
            arguments,
        }
    }
}

/// Encodes and decodes SOAP envelopes.
///
/// Server and client only ever see [`Call`]s, [`Value`]s and [`Fault`]s; the wire format is
/// entirely up to the implementation.
pub trait SoapRuntime {
    fn decode_request(&self, request: &str) -> Result<Call, SoapError>;
    fn encode_response(
        &self,
        operation: &str,
        result: &Value,
        version: SoapVersion,
    ) -> Result<String, SoapError>;
    fn encode_fault(&self, fault: &Fault, version: SoapVersion) -> Result<String, SoapError>;
    fn encode_request(&self, call: &Call, version: SoapVersion) -> Result<String, SoapError>;
    /// Decodes a response into either the returned value or the fault the server answered with.
    fn decode_response(&self, response: &str) -> Result<Result<Value, Fault>, SoapError>;
}

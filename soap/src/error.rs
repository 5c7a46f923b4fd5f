use thiserror::Error;

use super::Fault;

#[derive(Debug, Error)]
pub enum SoapError {
    #[error("invalid {option} option {value:?}")]
    InvalidOption { option: &'static str, value: String },
    #[error("the 'uri' option is required in non-wsdl mode")]
    MissingUri,
    #[error("the 'location' option is required")]
    MissingLocation,
    #[error("a service object has already been attached to this server")]
    ServiceAlreadyAttached,
    #[error("server answered with fault {0}")]
    Fault(Fault),
    #[error("failed to decode message: {0}")]
    Decode(String),
    #[error("failed to encode message: {0}")]
    Encode(String),
    #[error("transport failed: {0}")]
    Transport(String),
    #[error(".NET webservice arguments have to be grouped into a single struct")]
    UngroupedArguments,
}

use std::fmt;

use super::Value;

/// Fault codes a server may answer with; anything else is reported as `Receiver`.
pub const FAULT_CODES: [&str; 6] = [
    "VersionMismatch",
    "MustUnderstand",
    "DataEncodingUnknown",
    "Sender",
    "Receiver",
    "Server",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    pub code: String,
    pub message: String,
    pub actor: Option<String>,
    pub detail: Option<Value>,
}

impl Fault {
    /// Creates a fault, replacing an unknown `code` with `Receiver`.
    pub fn new(code: &str, message: &str) -> Self {
        let code = if FAULT_CODES.contains(&code) {
            code
        } else {
            "Receiver"
        };
        Self {
            code: code.to_owned(),
            message: message.to_owned(),
            actor: None,
            detail: None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// The error a service operation fails with.
///
/// `kind` names the class of failure; the server only discloses the message of kinds that were
/// registered as fault kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: String,
    pub message: String,
    pub code: Option<String>,
}

impl ServiceError {
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            message: message.to_owned(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_owned());
        self
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ServiceError {}

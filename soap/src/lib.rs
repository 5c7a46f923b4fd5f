//! SOAP server dispatch and client request interception on top of a pluggable
//! [`SoapRuntime`] that owns the wire format.

pub mod client;
pub mod error;
pub mod fault;
pub mod runtime;
pub mod server;
pub mod value;
pub mod wrapper;

#[cfg(test)]
mod testing;

pub use client::{
    CallAdapter, CallbackTransport, Client, ClientOptions, DotNetAdapter, LocalTransport,
    Transport,
};
pub use error::SoapError;
pub use fault::{Fault, ServiceError, FAULT_CODES};
pub use runtime::{Call, SoapRuntime, SoapVersion};
pub use server::{Server, ServerOptions, Service};
pub use value::Value;
pub use wrapper::DocumentLiteralWrapper;

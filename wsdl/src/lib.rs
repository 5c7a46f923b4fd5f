//! Generation of WSDL 1.1 service descriptions from native type and function descriptors.
//!
//! The central piece is [`Wsdl`], which owns the XML document being built together with the
//! registry of types already mapped into its schema. Non built-in types are mapped by a
//! [`ComplexTypeStrategy`]; [`AutoDiscover`] drives the whole process for a set of functions.

pub mod autodiscover;
pub mod complex_type_strategy;
pub mod document;
pub mod documentation;
pub mod error;
pub mod namespace;
pub mod reflection;
pub mod wsdl;

pub use autodiscover::{AutoDiscover, BindingStyle, DiscoveryStrategy, ReflectionDiscovery};
pub use complex_type_strategy::{
    AnyType, ArrayOfTypeComplex, ArrayOfTypeSequence, ComplexTypeStrategy, Composite,
    DefaultComplexType, StrategyKind, StrategyRef, UnknownStrategy,
};
pub use document::{Document, NodeId};
pub use documentation::{DocCommentDocumentation, DocumentationStrategy};
pub use error::{ErrorKind, WsdlError};
pub use namespace::Namespace;
pub use reflection::{
    ClassDescriptor, ClassResolver, FunctionDescriptor, ParameterDescriptor, PropertyDescriptor,
    TypeCatalog, Visibility,
};
pub use wsdl::{
    BodyUse, Compositor, MessagePart, PortFault, SchemaElement, SoapBody, SoapFault, Style, Wsdl,
};

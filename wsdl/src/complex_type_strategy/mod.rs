//! Policies that map non built-in native types onto XSD complex types.
//!
//! A strategy never owns the document it writes to: every call receives the [`Wsdl`] it has to
//! register types with and append definitions to.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

use super::{Wsdl, WsdlError};

mod any_type;
mod array_of_type_complex;
mod array_of_type_sequence;
mod composite;
mod default_complex_type;

pub use any_type::AnyType;
pub use array_of_type_complex::ArrayOfTypeComplex;
pub use array_of_type_sequence::ArrayOfTypeSequence;
pub use composite::Composite;
pub use default_complex_type::DefaultComplexType;

pub trait ComplexTypeStrategy {
    /// Maps `type_` into `context` and returns its qualified XSD name.
    fn add_complex_type(&self, context: &mut Wsdl, type_: &str) -> Result<String, WsdlError>;
}

/// The built-in strategies, addressable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    AnyType,
    DefaultComplexType,
    ArrayOfTypeComplex,
    ArrayOfTypeSequence,
    Composite,
}

impl StrategyKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnyType => "AnyType",
            Self::DefaultComplexType => "DefaultComplexType",
            Self::ArrayOfTypeComplex => "ArrayOfTypeComplex",
            Self::ArrayOfTypeSequence => "ArrayOfTypeSequence",
            Self::Composite => "Composite",
        }
    }

    /// Creates a strategy with default settings; a composite maps everything with its default.
    pub fn instantiate(self) -> Rc<dyn ComplexTypeStrategy> {
        match self {
            Self::AnyType => Rc::new(AnyType),
            Self::DefaultComplexType => Rc::new(DefaultComplexType::new()),
            Self::ArrayOfTypeComplex => Rc::new(ArrayOfTypeComplex::new()),
            Self::ArrayOfTypeSequence => Rc::new(ArrayOfTypeSequence::new()),
            Self::Composite => Rc::new(Composite::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown complex type strategy {0:?}")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    /// Accepts the bare name as well as a namespaced one (`Some\Path\AnyType`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit(['\\', ':']).next().unwrap_or_default();
        match name {
            "AnyType" => Ok(Self::AnyType),
            "DefaultComplexType" => Ok(Self::DefaultComplexType),
            "ArrayOfTypeComplex" => Ok(Self::ArrayOfTypeComplex),
            "ArrayOfTypeSequence" => Ok(Self::ArrayOfTypeSequence),
            "Composite" => Ok(Self::Composite),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// A strategy that is either already instantiated or still to be resolved on first use.
#[derive(Clone)]
pub enum StrategyRef {
    Kind(StrategyKind),
    Named(String),
    Instance(Rc<dyn ComplexTypeStrategy>),
}

impl StrategyRef {
    pub fn instance(strategy: impl ComplexTypeStrategy + 'static) -> Self {
        Self::Instance(Rc::new(strategy))
    }

    pub(crate) fn resolve(&self) -> Option<Rc<dyn ComplexTypeStrategy>> {
        match self {
            Self::Kind(kind) => Some(kind.instantiate()),
            Self::Named(name) => name.parse::<StrategyKind>().ok().map(StrategyKind::instantiate),
            Self::Instance(strategy) => Some(Rc::clone(strategy)),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Kind(kind) => kind.to_string(),
            Self::Named(name) => name.clone(),
            Self::Instance(_) => "<instance>".to_owned(),
        }
    }
}

impl fmt::Debug for StrategyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrategyRef({})", self.describe())
    }
}

impl From<StrategyKind> for StrategyRef {
    fn from(kind: StrategyKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<&str> for StrategyRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for StrategyRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Rc<dyn ComplexTypeStrategy>> for StrategyRef {
    fn from(strategy: Rc<dyn ComplexTypeStrategy>) -> Self {
        Self::Instance(strategy)
    }
}

use thiserror::Error;

/// Coarse classification of a [`WsdlError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value that can never be accepted.
    InvalidArgument,
    /// The input is well-formed but describes a structure the active strategy cannot express.
    UnsupportedStructure,
    /// Generation could not complete (missing configuration, output failure, ...).
    RuntimeFailure,
}

#[derive(Debug, Error)]
pub enum WsdlError {
    #[error("{0:?} is not a valid service name")]
    InvalidServiceName(String),
    #[error("{0:?} is not a valid uri")]
    InvalidUri(String),
    #[error("invalid type {0:?} given to composite type map")]
    InvalidTypeKey(String),
    #[error("cannot add complex type {0:?}: no class descriptor could be found for it")]
    UnknownType(String),
    #[error("strategy {strategy:?} for complex type {type_:?} is not a valid strategy")]
    InvalidStrategy { type_: String, strategy: String },
    #[error("default strategy {0:?} for complex types is not a valid strategy")]
    InvalidDefaultStrategy(String),
    #[error("cannot map {type_:?} to {qualified_name}: the name is already taken by {existing:?}")]
    NameCollision {
        type_: String,
        qualified_name: String,
        existing: String,
    },
    #[error("function {0:?} is not known to the type catalog")]
    UnknownFunction(String),
    #[error("class {0:?} is not known to the type catalog")]
    UnknownClass(String),
    #[error("cannot map {0:?}: arrays of complex types can only be nested one level deep, use array properties for deeper structures")]
    NestedArrayTooDeep(String),
    #[error("no service name is set and none can be derived from a class")]
    MissingServiceName,
    #[error("no uri is set")]
    MissingUri,
    #[error("failed to serialize the document: {0}")]
    Serialization(String),
    #[error("the serialized document is not well-formed")]
    MalformedOutput(#[from] roxmltree::Error),
    #[error("failed to write the document")]
    Io(#[from] std::io::Error),
}

impl WsdlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidServiceName(_)
            | Self::InvalidUri(_)
            | Self::InvalidTypeKey(_)
            | Self::UnknownType(_)
            | Self::InvalidStrategy { .. }
            | Self::InvalidDefaultStrategy(_)
            | Self::NameCollision { .. }
            | Self::UnknownFunction(_)
            | Self::UnknownClass(_) => ErrorKind::InvalidArgument,
            Self::NestedArrayTooDeep(_) => ErrorKind::UnsupportedStructure,
            Self::MissingServiceName
            | Self::MissingUri
            | Self::Serialization(_)
            | Self::MalformedOutput(_)
            | Self::Io(_) => ErrorKind::RuntimeFailure,
        }
    }
}

/// The fixed namespaces a WSDL 1.1 document is built from.
///
/// The target namespace (`tns`) is not part of this set: it is chosen per service and only ever
/// occurs in attribute values, never as the namespace of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Wsdl,
    Xsd,
    Soap,
    Soap12,
    SoapEnc,
}

impl Namespace {
    pub const WSDL_URI: &'static str = "http://schemas.xmlsoap.org/wsdl/";
    pub const XSD_URI: &'static str = "http://www.w3.org/2001/XMLSchema";
    pub const SOAP_URI: &'static str = "http://schemas.xmlsoap.org/wsdl/soap/";
    pub const SOAP12_URI: &'static str = "http://schemas.xmlsoap.org/wsdl/soap12/";
    pub const SOAP_ENC_URI: &'static str = "http://schemas.xmlsoap.org/soap/encoding/";

    /// Prefix used for the target namespace.
    pub const TYPES_PREFIX: &'static str = "tns";

    pub const fn uri(self) -> &'static str {
        match self {
            Self::Wsdl => Self::WSDL_URI,
            Self::Xsd => Self::XSD_URI,
            Self::Soap => Self::SOAP_URI,
            Self::Soap12 => Self::SOAP12_URI,
            Self::SoapEnc => Self::SOAP_ENC_URI,
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Wsdl => "wsdl",
            Self::Xsd => "xsd",
            Self::Soap => "soap",
            Self::Soap12 => "soap12",
            Self::SoapEnc => "soap-enc",
        }
    }

    /// WSDL elements live in the default namespace and are written without a prefix.
    pub(crate) fn qualify(self, local_name: &str) -> String {
        match self {
            Self::Wsdl => local_name.to_owned(),
            _ => format!("{}:{local_name}", self.prefix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wsdl_elements_are_unprefixed() {
        assert_eq!(Namespace::Wsdl.qualify("message"), "message");
        assert_eq!(Namespace::Xsd.qualify("complexType"), "xsd:complexType");
        assert_eq!(Namespace::SoapEnc.qualify("Array"), "soap-enc:Array");
    }
}

use super::ComplexTypeStrategy;
use crate::{Wsdl, WsdlError};

/// Maps every complex type to `xsd:anyType`, leaving the document untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct AnyType;

impl ComplexTypeStrategy for AnyType {
    fn add_complex_type(&self, _context: &mut Wsdl, _type_: &str) -> Result<String, WsdlError> {
        Ok("xsd:anyType".to_owned())
    }
}

//! Call frames: the buffers and attributes a caller supplies for one call

use super::buffer::Buffer;
use crate::attr::EnumAttr;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Named attribute values, encoded as LAPACK character codes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, u8>,
}

impl Attributes {
    /// Empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typed attribute, builder style
    pub fn with<A: EnumAttr>(mut self, name: &str, value: A) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a typed attribute, replacing any previous value
    pub fn insert<A: EnumAttr>(&mut self, name: &str, value: A) {
        self.insert_code(name, value.code());
    }

    /// Set a raw wire code, replacing any previous value
    pub fn insert_code(&mut self, name: &str, code: u8) {
        self.values.insert(name.to_string(), code);
    }

    /// Raw wire code of an attribute
    pub fn code(&self, name: &str) -> Option<u8> {
        self.values.get(name).copied()
    }

    /// Decode an attribute as `A` for a call to `handler`.
    ///
    /// `handler` only labels the error.
    pub fn decode<A: EnumAttr>(&self, handler: &str, name: &str) -> Result<A> {
        let code = self
            .code(name)
            .ok_or_else(|| Error::missing_attribute(handler, name))?;
        A::from_code(code)
            .ok_or_else(|| Error::invalid_attribute(handler, name, A::KIND, code))
    }

    /// Attribute names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a caller supplies for one handler invocation
///
/// Results are pre-allocated by the caller; the kernel fills them in place.
#[derive(Clone, Debug, Default)]
pub struct CallFrame {
    /// Input buffers, in signature order
    pub args: Vec<Buffer>,
    /// Pre-allocated output buffers, in signature order
    pub rets: Vec<Buffer>,
    /// Attribute values by name
    pub attrs: Attributes,
}

impl CallFrame {
    /// Assemble a frame
    pub fn new(args: Vec<Buffer>, rets: Vec<Buffer>, attrs: Attributes) -> Self {
        Self { args, rets, attrs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{AttrKind, UpLo, eig};

    #[test]
    fn test_typed_roundtrip() {
        let attrs = Attributes::new()
            .with("uplo", UpLo::Lower)
            .with("mode", eig::ComputationMode::ComputeEigenvectors);
        assert_eq!(attrs.decode::<UpLo>("potrf", "uplo").unwrap(), UpLo::Lower);
        assert_eq!(attrs.code("mode"), Some(b'V'));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["mode", "uplo"]);
    }

    #[test]
    fn test_missing_attribute() {
        let attrs = Attributes::new();
        let err = attrs.decode::<UpLo>("potrf", "uplo").unwrap_err();
        assert_eq!(err.to_string(), "Missing attribute 'uplo' in call to 'potrf'");
    }

    #[test]
    fn test_code_outside_enum() {
        let mut attrs = Attributes::new();
        attrs.insert_code("uplo", b'X');
        let err = attrs.decode::<UpLo>("potrf", "uplo").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAttribute {
                kind: AttrKind::UpLo,
                code: b'X',
                ..
            }
        ));
    }
}

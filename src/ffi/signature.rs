//! Handler signatures and the builder that declares them
//!
//! A [`Signature`] is the exact contract between a caller and a kernel:
//! ordered argument buffers, ordered result buffers and named attributes.
//! Signatures are only built through [`Binding`], whose methods take the
//! element type as a type parameter, so a template generic over the operand
//! type produces identically ordered signatures for every instantiation.

use super::buffer::BufferSpec;
use super::frame::CallFrame;
use crate::attr::{AttrKind, EnumAttr};
use crate::dtype::Element;
use crate::error::{Error, Result};
use std::fmt;

/// A named attribute slot
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrSpec {
    /// Attribute name (`uplo`, `trans_x`, `compute_left`, ...)
    pub name: &'static str,
    /// Enumeration the value must belong to
    pub kind: AttrKind,
}

/// Immutable call contract for one (operation, element type) pair
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    args: Vec<BufferSpec>,
    rets: Vec<BufferSpec>,
    attrs: Vec<AttrSpec>,
}

impl Signature {
    /// Start declaring a signature
    pub fn bind() -> Binding {
        Binding::default()
    }

    /// Argument buffers, in call order
    pub fn args(&self) -> &[BufferSpec] {
        &self.args
    }

    /// Result buffers, in the order the kernel fills them
    pub fn rets(&self) -> &[BufferSpec] {
        &self.rets
    }

    /// Attribute slots, in declaration order
    pub fn attrs(&self) -> &[AttrSpec] {
        &self.attrs
    }

    /// Argument descriptor by name
    pub fn arg(&self, name: &str) -> Option<&BufferSpec> {
        self.args.iter().find(|spec| spec.name == name)
    }

    /// Result descriptor by name
    pub fn ret(&self, name: &str) -> Option<&BufferSpec> {
        self.rets.iter().find(|spec| spec.name == name)
    }

    /// Position of a result buffer by name
    pub fn ret_index(&self, name: &str) -> Option<usize> {
        self.rets.iter().position(|spec| spec.name == name)
    }

    /// Attribute slot by name
    pub fn attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attrs.iter().find(|spec| spec.name == name)
    }

    /// Attribute names, in declaration order
    pub fn attr_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attrs.iter().map(|spec| spec.name)
    }

    /// Check that `frame` satisfies this signature.
    ///
    /// Buffer counts, element types and rank-0 requirements must match, every
    /// declared attribute must be present and decode, and no undeclared
    /// attribute may be supplied. Shapes are not inspected.
    pub fn validate(&self, handler: &str, frame: &CallFrame) -> Result<()> {
        if frame.args.len() != self.args.len() {
            return Err(Error::invalid_call(
                handler,
                format!(
                    "expected {} arguments, got {}",
                    self.args.len(),
                    frame.args.len()
                ),
            ));
        }
        if frame.rets.len() != self.rets.len() {
            return Err(Error::invalid_call(
                handler,
                format!(
                    "expected {} results, got {}",
                    self.rets.len(),
                    frame.rets.len()
                ),
            ));
        }

        let buffers = self.args.iter().zip(&frame.args);
        for (spec, buffer) in buffers.chain(self.rets.iter().zip(&frame.rets)) {
            spec.check(buffer)
                .map_err(|reason| Error::invalid_call(handler, reason))?;
        }

        for spec in &self.attrs {
            let code = frame
                .attrs
                .code(spec.name)
                .ok_or_else(|| Error::missing_attribute(handler, spec.name))?;
            if !spec.kind.accepts(code) {
                let err = Error::invalid_attribute(handler, spec.name, spec.kind, code);
                return Err(err);
            }
        }
        if let Some(extra) = frame.attrs.names().find(|name| self.attr(name).is_none()) {
            return Err(Error::invalid_call(
                handler,
                format!("unexpected attribute '{extra}'"),
            ));
        }

        tracing::trace!(handler, "call frame matches signature");
        Ok(())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for AttrSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

/// Renders as `(args) -> (rets)` followed by `{attrs}` when there are any
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_list(f, &self.args)?;
        f.write_str(") -> (")?;
        write_list(f, &self.rets)?;
        f.write_str(")")?;
        if !self.attrs.is_empty() {
            f.write_str(" {")?;
            write_list(f, &self.attrs)?;
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Builder for [`Signature`]
#[derive(Default)]
#[must_use = "a binding does nothing until finished into a Signature"]
pub struct Binding {
    args: Vec<BufferSpec>,
    rets: Vec<BufferSpec>,
    attrs: Vec<AttrSpec>,
}

impl Binding {
    /// Append an argument buffer of element type `T`
    pub fn arg<T: Element>(mut self, name: &'static str) -> Self {
        self.args.push(BufferSpec::new(name, T::DTYPE));
        self
    }

    /// Append a rank-0 argument buffer of element type `T`
    pub fn scalar_arg<T: Element>(mut self, name: &'static str) -> Self {
        self.args.push(BufferSpec::scalar(name, T::DTYPE));
        self
    }

    /// Append a result buffer of element type `T`
    pub fn ret<T: Element>(mut self, name: &'static str) -> Self {
        self.rets.push(BufferSpec::new(name, T::DTYPE));
        self
    }

    /// Declare an attribute of enumeration `A`
    pub fn attr<A: EnumAttr>(mut self, name: &'static str) -> Self {
        self.attrs.push(AttrSpec {
            name,
            kind: A::KIND,
        });
        self
    }

    /// Freeze the declaration
    pub fn finish(self) -> Signature {
        debug_assert!(
            {
                let mut names: Vec<_> = self
                    .args
                    .iter()
                    .chain(&self.rets)
                    .map(|spec| spec.name)
                    .chain(self.attrs.iter().map(|spec| spec.name))
                    .collect();
                names.sort_unstable();
                names.windows(2).all(|pair| pair[0] != pair[1])
            },
            "signature declares a name twice"
        );
        Signature {
            args: self.args,
            rets: self.rets,
            attrs: self.attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{Side, UpLo};
    use crate::dtype::DType;
    use crate::ffi::buffer::{Buffer, Rank};
    use crate::ffi::frame::Attributes;

    fn cholesky_like() -> Signature {
        Signature::bind()
            .arg::<f64>("x")
            .attr::<UpLo>("uplo")
            .ret::<f64>("x_out")
            .ret::<i32>("info")
            .finish()
    }

    fn matching_frame() -> CallFrame {
        CallFrame::new(
            vec![Buffer::zeros(DType::F64, &[2, 2]).unwrap()],
            vec![
                Buffer::zeros(DType::F64, &[2, 2]).unwrap(),
                Buffer::zeros(DType::I32, &[]).unwrap(),
            ],
            Attributes::new().with("uplo", UpLo::Upper),
        )
    }

    #[test]
    fn test_binding_preserves_order() {
        let sig = Signature::bind()
            .arg::<f32>("x")
            .scalar_arg::<f32>("alpha")
            .ret::<f32>("y")
            .finish();
        let names: Vec<_> = sig.args().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["x", "alpha"]);
        assert_eq!(sig.arg("alpha").unwrap().rank, Rank::Scalar);
        assert_eq!(sig.ret_index("y"), Some(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            cholesky_like().to_string(),
            "(x: f64[]) -> (x_out: f64[], info: i32[]) {uplo: UpLo}"
        );
    }

    #[test]
    fn test_validate_accepts_matching_frame() {
        cholesky_like().validate("chol", &matching_frame()).unwrap();
    }

    #[test]
    fn test_validate_rejects_result_count() {
        let mut frame = matching_frame();
        frame.rets.pop();
        let err = cholesky_like().validate("chol", &frame).unwrap_err();
        assert!(matches!(err, Error::InvalidCall { ref handler, .. } if handler == "chol"));
    }

    #[test]
    fn test_validate_rejects_dtype() {
        let mut frame = matching_frame();
        frame.args[0] = Buffer::zeros(DType::F32, &[2, 2]).unwrap();
        assert!(matches!(
            cholesky_like().validate("chol", &frame),
            Err(Error::InvalidCall { .. })
        ));
    }

    #[test]
    fn test_validate_attribute_errors() {
        let sig = cholesky_like();

        let mut frame = matching_frame();
        frame.attrs = Attributes::new();
        let err = sig.validate("chol", &frame).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { ref handler, .. } if handler == "chol"));

        frame.attrs.insert_code("uplo", b'Q');
        let err = sig.validate("chol", &frame).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAttribute { ref handler, code: b'Q', .. } if handler == "chol"
        ));

        frame.attrs = Attributes::new()
            .with("uplo", UpLo::Lower)
            .with("side", Side::Left);
        assert!(matches!(
            sig.validate("chol", &frame),
            Err(Error::InvalidCall { .. })
        ));
    }
}

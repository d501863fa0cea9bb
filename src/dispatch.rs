//! Forwarding calls to external kernels
//!
//! The numerical routines themselves live outside this crate. A [`Kernel`]
//! is bound to a kernel entry point symbol (`dgetrf`, `ztrsm`, ...) and the
//! [`Dispatcher`] routes calls by handler name: it looks the handler up,
//! checks the frame against its signature and hands the buffers to the
//! kernel. The LAPACK `info` status the kernel writes is left in its result
//! buffer for the caller to interpret.
//!
//! # Example
//!
//! ```ignore
//! let dispatcher = Dispatcher::builder().bind_fn("dpotrf", my_dpotrf)?.build();
//! dispatcher.call("lapack_dpotrf_ffi", &mut frame)?;
//! let info = frame.rets[1].as_slice::<LapackInt>()?[0];
//! ```

use crate::attr::EnumAttr;
use crate::error::{Error, Result};
use crate::ffi::{Attributes, Buffer, CallFrame};
use crate::handlers::{HandlerEntry, Registry, registry};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Buffers and attributes handed to a kernel for one validated call
///
/// Buffer element types and counts already match `entry`'s signature, so
/// typed views on `args` and `rets` only fail if the kernel asks for the
/// wrong type.
pub struct KernelCall<'a> {
    /// The handler being served
    pub entry: &'a HandlerEntry,
    /// Input buffers, in signature order
    pub args: &'a [Buffer],
    /// Output buffers, in signature order, filled in place
    pub rets: &'a mut [Buffer],
    /// Attribute values
    pub attrs: &'a Attributes,
}

impl KernelCall<'_> {
    /// Decode an attribute
    pub fn attr<A: EnumAttr>(&self, name: &str) -> Result<A> {
        self.attrs.decode(self.entry.name(), name)
    }
}

/// An external kernel entry point
///
/// Implementations compute the decomposition, write every output buffer and
/// store LAPACK's `info` in the `info` result. Returning `Err` is reserved
/// for failures that are not LAPACK statuses.
pub trait Kernel: Send + Sync {
    /// Run the kernel
    fn call(&self, call: KernelCall<'_>) -> Result<()>;
}

/// Plain function kernels
pub type KernelFn = for<'a> fn(KernelCall<'a>) -> Result<()>;

impl Kernel for KernelFn {
    fn call(&self, call: KernelCall<'_>) -> Result<()> {
        self(call)
    }
}

/// Routes calls by handler name to bound kernels
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    kernels: HashMap<String, Arc<dyn Kernel>>,
}

impl Dispatcher<'static> {
    /// Start binding kernels against the process-wide registry
    pub fn builder() -> DispatcherBuilder<'static> {
        DispatcherBuilder::new(registry())
    }
}

impl<'r> Dispatcher<'r> {
    /// The handler table this dispatcher serves
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Whether a kernel is bound for the handler `name`
    pub fn is_bound(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .is_some_and(|entry| self.kernels.contains_key(&entry.target().symbol))
    }

    /// Invoke handler `name` on `frame`.
    ///
    /// Fails with [`Error::UnknownHandler`] for unregistered names, with a
    /// validation error if the frame does not satisfy the signature, and with
    /// [`Error::KernelNotBound`] if no kernel serves the entry point. A
    /// nonzero LAPACK status is not an error here.
    pub fn call(&self, name: &str, frame: &mut CallFrame) -> Result<()> {
        let entry = self.registry.lookup(name)?;
        entry.validate(frame)?;

        let symbol = &entry.target().symbol;
        let kernel = self
            .kernels
            .get(symbol)
            .ok_or_else(|| Error::KernelNotBound {
                handler: name.to_string(),
                symbol: symbol.clone(),
            })?;

        tracing::debug!(handler = name, symbol = %symbol, "dispatching to kernel");
        kernel.call(KernelCall {
            entry,
            args: &frame.args,
            rets: &mut frame.rets,
            attrs: &frame.attrs,
        })
    }
}

fn debug_bindings(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    registry: &Registry,
    kernels: &HashMap<String, Arc<dyn Kernel>>,
) -> fmt::Result {
    let mut bound: Vec<_> = kernels.keys().collect();
    bound.sort();
    f.debug_struct(name)
        .field("handlers", &registry.len())
        .field("bound", &bound)
        .finish()
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_bindings(f, "Dispatcher", self.registry, &self.kernels)
    }
}

impl fmt::Debug for DispatcherBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_bindings(f, "DispatcherBuilder", self.registry, &self.kernels)
    }
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder<'r> {
    registry: &'r Registry,
    kernels: HashMap<String, Arc<dyn Kernel>>,
}

impl<'r> DispatcherBuilder<'r> {
    /// Start binding kernels against `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            kernels: HashMap::new(),
        }
    }

    /// Bind `kernel` to the entry point `symbol`.
    ///
    /// Fails if no handler forwards to `symbol` or if it is already bound.
    pub fn bind(mut self, symbol: &str, kernel: Arc<dyn Kernel>) -> Result<Self> {
        if self.registry.by_symbol(symbol).is_none() {
            return Err(Error::UnknownKernelSymbol {
                symbol: symbol.to_string(),
            });
        }
        if self.kernels.contains_key(symbol) {
            return Err(Error::DuplicateKernel {
                symbol: symbol.to_string(),
            });
        }
        self.kernels.insert(symbol.to_string(), kernel);
        Ok(self)
    }

    /// Bind a plain function to the entry point `symbol`
    pub fn bind_fn(self, symbol: &str, kernel: KernelFn) -> Result<Self> {
        self.bind(symbol, Arc::new(kernel))
    }

    /// Finish binding
    pub fn build(self) -> Dispatcher<'r> {
        tracing::debug!(kernels = self.kernels.len(), "kernel bindings complete");
        Dispatcher {
            registry: self.registry,
            kernels: self.kernels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::UpLo;
    use crate::dtype::{DType, LapackInt};

    fn failing_potrf(call: KernelCall<'_>) -> Result<()> {
        let uplo: UpLo = call.attr("uplo")?;
        assert_eq!(uplo, UpLo::Lower);
        call.rets[1].as_mut_slice::<LapackInt>()?[0] = 2;
        Ok(())
    }

    fn potrf_frame() -> CallFrame {
        CallFrame::new(
            vec![Buffer::zeros(DType::F64, &[2, 2]).unwrap()],
            vec![
                Buffer::zeros(DType::F64, &[2, 2]).unwrap(),
                Buffer::scalar::<LapackInt>(0),
            ],
            Attributes::new().with("uplo", UpLo::Lower),
        )
    }

    #[test]
    fn test_status_surfaces_verbatim() {
        let dispatcher = Dispatcher::builder()
            .bind_fn("dpotrf", failing_potrf)
            .unwrap()
            .build();
        let mut frame = potrf_frame();
        dispatcher.call("lapack_dpotrf_ffi", &mut frame).unwrap();
        assert_eq!(frame.rets[1].to_vec::<LapackInt>().unwrap(), vec![2]);
    }

    #[test]
    fn test_unbound_kernel() {
        let dispatcher = Dispatcher::builder().build();
        assert!(!dispatcher.is_bound("lapack_dpotrf_ffi"));
        let err = dispatcher
            .call("lapack_dpotrf_ffi", &mut potrf_frame())
            .unwrap_err();
        assert!(matches!(err, Error::KernelNotBound { ref symbol, .. } if symbol == "dpotrf"));
    }

    #[test]
    fn test_kernel_attribute_errors_name_the_handler() {
        fn reads_undeclared(call: KernelCall<'_>) -> Result<()> {
            call.attr::<UpLo>("side").map(|_| ())
        }

        let dispatcher = Dispatcher::builder()
            .bind_fn("dpotrf", reads_undeclared)
            .unwrap()
            .build();
        let err = dispatcher
            .call("lapack_dpotrf_ffi", &mut potrf_frame())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute { ref handler, ref name }
                if handler == "lapack_dpotrf_ffi" && name == "side"
        ));
    }

    #[test]
    fn test_bind_rejects_unknown_and_duplicate_symbols() {
        let err = Dispatcher::builder()
            .bind_fn("dqqq", failing_potrf)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownKernelSymbol { .. }));

        let err = Dispatcher::builder()
            .bind_fn("dpotrf", failing_potrf)
            .and_then(|b| b.bind_fn("dpotrf", failing_potrf))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKernel { .. }));
    }
}

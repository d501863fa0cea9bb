//! Common test utilities
#![allow(dead_code)]

use lapack_ffi::ffi::{Attributes, Buffer, BufferSpec, CallFrame, Rank};
use lapack_ffi::handlers::HandlerEntry;

/// Allocate a zeroed frame for `entry`.
///
/// Rank-0 slots get scalar buffers; every other slot is shaped by `dims_for`.
pub fn zeroed_frame(
    entry: &HandlerEntry,
    dims_for: impl Fn(&BufferSpec) -> Vec<usize>,
    attrs: Attributes,
) -> CallFrame {
    let alloc = |spec: &BufferSpec| match spec.rank {
        Rank::Scalar => Buffer::zeros(spec.dtype, &[]).unwrap(),
        Rank::Any => Buffer::zeros(spec.dtype, &dims_for(spec)).unwrap(),
    };
    let sig = entry.signature();
    CallFrame::new(
        sig.args().iter().map(&alloc).collect(),
        sig.rets().iter().map(&alloc).collect(),
        attrs,
    )
}

/// Names of a list of buffer descriptors
pub fn names(specs: &[BufferSpec]) -> Vec<&'static str> {
    specs.iter().map(|spec| spec.name).collect()
}

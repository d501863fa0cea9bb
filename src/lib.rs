//! # lapack-ffi
//!
//! **Typed foreign-call handlers for dense BLAS/LAPACK routines.**
//!
//! lapack-ffi exposes a fixed catalogue of dense linear algebra routines
//! (triangular solve, LU, QR, Cholesky, SVD, symmetric/Hermitian and general
//! eigendecomposition, Schur decomposition) to a calling runtime. Each routine
//! is bound, for each operand type, to an exact call signature: ordered input
//! buffers, ordered output buffers and named enumerated attributes.
//!
//! The numerical kernels are not part of this crate. Callers bind them by
//! entry point symbol and dispatch through the handler table.
//!
//! ## Handler Table
//!
//! | Family | Real | Complex |
//! |--------|------|---------|
//! | Triangular solve | `blas_{s,d}trsm_ffi` | `blas_{c,z}trsm_ffi` |
//! | LU | `lapack_{s,d}getrf_ffi` | `lapack_{c,z}getrf_ffi` |
//! | QR | `lapack_{s,d}geqrf_ffi` | `lapack_{c,z}geqrf_ffi` |
//! | Q from reflectors | `lapack_{s,d}orgqr_ffi` | `lapack_{c,z}ungqr_ffi` |
//! | Cholesky | `lapack_{s,d}potrf_ffi` | `lapack_{c,z}potrf_ffi` |
//! | SVD | `lapack_{s,d}gesdd_ffi` | `lapack_{c,z}gesdd_ffi` |
//! | Symmetric / Hermitian eig | `lapack_{s,d}syevd_ffi` | `lapack_{c,z}heevd_ffi` |
//! | General eig | `lapack_{s,d}geev_ffi` | `lapack_{c,z}geev_ffi` |
//! | Schur | `lapack_{s,d}gees_ffi` | `lapack_{c,z}gees_ffi` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lapack_ffi::prelude::*;
//!
//! let entry = registry().lookup("lapack_cheevd_ffi")?;
//! assert_eq!(entry.signature().ret("eigenvalues").unwrap().dtype, DType::F32);
//!
//! let dispatcher = Dispatcher::builder().bind_fn("dgetrf", my_dgetrf)?.build();
//! dispatcher.call("lapack_dgetrf_ffi", &mut frame)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `ilp64`: 64-bit LAPACK integers for pivots, status codes and integer
//!   workspace (default is 32-bit)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attr;
pub mod dispatch;
pub mod dtype;
pub mod error;
pub mod ffi;
pub mod handlers;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::attr::{Diag, EnumAttr, Side, Transpose, UpLo, eig, schur, svd};
    pub use crate::dispatch::{Dispatcher, Kernel, KernelCall};
    pub use crate::dtype::{Complex64, Complex128, DType, Element, LapackInt, LapackScalar};
    pub use crate::error::{Error, Result};
    pub use crate::ffi::{Attributes, Buffer, CallFrame, Signature};
    pub use crate::handlers::{Family, HandlerEntry, Registry, registry};
}

//! Handler families and their expansion over operand element types
//!
//! An operation [`Family`] (LU, SVD, Schur, ...) selects a signature
//! [`Template`] per operand type. Most families use one template for all four
//! operand types; SVD, general eigendecomposition and Schur switch to a
//! complex-specific template for complex operands, and the symmetric and
//! Hermitian eigendecompositions each cover only half of the operand types.
//! Instantiating a template for a concrete operand type yields a
//! [`HandlerEntry`], and the set of all entries is the [`Registry`].

mod registry;
pub mod templates;

pub use registry::{Registry, registry};

use crate::dtype::{DType, LapackScalar};
use crate::error::Result;
use crate::ffi::{CallFrame, Signature};
use std::fmt;

/// Operation families exposed to the calling runtime
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Triangular solve with multiple right-hand sides (`?trsm`)
    TriangularSolve,
    /// LU factorization (`?getrf`)
    Lu,
    /// QR factorization (`?geqrf`)
    Qr,
    /// Explicit Q from Householder reflectors (`?orgqr`, `?ungqr`)
    QOrthogonalize,
    /// Cholesky factorization (`?potrf`)
    Cholesky,
    /// Singular value decomposition (`?gesdd`)
    Svd,
    /// Real symmetric eigendecomposition (`ssyevd`, `dsyevd`)
    SymmetricEig,
    /// Complex Hermitian eigendecomposition (`cheevd`, `zheevd`)
    HermitianEig,
    /// General (non-symmetric) eigendecomposition (`?geev`)
    GeneralEig,
    /// Schur decomposition (`?gees`)
    Schur,
}

impl Family {
    /// Every family
    pub const ALL: [Family; 10] = [
        Self::TriangularSolve,
        Self::Lu,
        Self::Qr,
        Self::QOrthogonalize,
        Self::Cholesky,
        Self::Svd,
        Self::SymmetricEig,
        Self::HermitianEig,
        Self::GeneralEig,
        Self::Schur,
    ];

    /// Signature template this family uses for operands of `dtype`, or `None`
    /// if the family has no handler for that type
    pub const fn template(self, dtype: DType) -> Option<Template> {
        if !dtype.is_operand() {
            return None;
        }
        let complex = dtype.is_complex();
        let template = match self {
            Self::TriangularSolve => Template::Trsm,
            Self::Lu => Template::Getrf,
            Self::Qr => Template::Geqrf,
            Self::QOrthogonalize => Template::Orgqr,
            Self::Cholesky => Template::Potrf,
            Self::Svd if complex => Template::GesddComplex,
            Self::Svd => Template::Gesdd,
            Self::SymmetricEig if complex => return None,
            Self::SymmetricEig => Template::Syevd,
            Self::HermitianEig if complex => Template::Heevd,
            Self::HermitianEig => return None,
            Self::GeneralEig if complex => Template::GeevComplex,
            Self::GeneralEig => Template::Geev,
            Self::Schur if complex => Template::GeesComplex,
            Self::Schur => Template::Gees,
        };
        Some(template)
    }

    /// Whether this family has a handler for operands of `dtype`
    pub const fn applies_to(self, dtype: DType) -> bool {
        self.template(dtype).is_some()
    }
}

/// External library a kernel entry point lives in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Library {
    /// BLAS level-3 routines
    Blas,
    /// LAPACK routines
    Lapack,
}

impl Library {
    /// Prefix used in handler names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blas => "blas",
            Self::Lapack => "lapack",
        }
    }
}

/// Distinct signature shapes
///
/// There is one template per shape; real and complex operands of the same
/// family share a template unless their kernels lay out memory differently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Template {
    /// [`templates::trsm`]
    Trsm,
    /// [`templates::getrf`]
    Getrf,
    /// [`templates::geqrf`]
    Geqrf,
    /// [`templates::orgqr`]
    Orgqr,
    /// [`templates::potrf`]
    Potrf,
    /// [`templates::gesdd`]
    Gesdd,
    /// [`templates::gesdd_complex`]
    GesddComplex,
    /// [`templates::syevd`]
    Syevd,
    /// [`templates::heevd`]
    Heevd,
    /// [`templates::geev`]
    Geev,
    /// [`templates::geev_complex`]
    GeevComplex,
    /// [`templates::gees`]
    Gees,
    /// [`templates::gees_complex`]
    GeesComplex,
}

impl Template {
    /// Every template
    pub const ALL: [Template; 13] = [
        Self::Trsm,
        Self::Getrf,
        Self::Geqrf,
        Self::Orgqr,
        Self::Potrf,
        Self::Gesdd,
        Self::GesddComplex,
        Self::Syevd,
        Self::Heevd,
        Self::Geev,
        Self::GeevComplex,
        Self::Gees,
        Self::GeesComplex,
    ];

    /// Library the bound kernel belongs to
    pub const fn library(self) -> Library {
        match self {
            Self::Trsm => Library::Blas,
            _ => Library::Lapack,
        }
    }

    /// Routine name without the type letter
    ///
    /// Orthogonal Q is `orgqr` for real operands and `ungqr` (unitary) for
    /// complex ones.
    pub const fn mnemonic(self, complex: bool) -> &'static str {
        match self {
            Self::Trsm => "trsm",
            Self::Getrf => "getrf",
            Self::Geqrf => "geqrf",
            Self::Orgqr if complex => "ungqr",
            Self::Orgqr => "orgqr",
            Self::Potrf => "potrf",
            Self::Gesdd | Self::GesddComplex => "gesdd",
            Self::Syevd => "syevd",
            Self::Heevd => "heevd",
            Self::Geev | Self::GeevComplex => "geev",
            Self::Gees | Self::GeesComplex => "gees",
        }
    }

    /// Instantiate this template for operand type `T`
    pub fn signature<T: LapackScalar>(self) -> Signature {
        match self {
            Self::Trsm => templates::trsm::<T>(),
            Self::Getrf => templates::getrf::<T>(),
            Self::Geqrf => templates::geqrf::<T>(),
            Self::Orgqr => templates::orgqr::<T>(),
            Self::Potrf => templates::potrf::<T>(),
            Self::Gesdd => templates::gesdd::<T>(),
            Self::GesddComplex => templates::gesdd_complex::<T>(),
            Self::Syevd => templates::syevd::<T>(),
            Self::Heevd => templates::heevd::<T>(),
            Self::Geev => templates::geev::<T>(),
            Self::GeevComplex => templates::geev_complex::<T>(),
            Self::Gees => templates::gees::<T>(),
            Self::GeesComplex => templates::gees_complex::<T>(),
        }
    }
}

/// External kernel entry point a handler forwards to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KernelTarget {
    /// Library the routine lives in
    pub library: Library,
    /// Routine name, e.g. `dgetrf`
    pub symbol: String,
}

/// A registered binding of one signature to one kernel entry point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerEntry {
    name: String,
    family: Family,
    template: Template,
    dtype: DType,
    target: KernelTarget,
    signature: Signature,
}

impl HandlerEntry {
    /// Instantiate `family` for operand type `T`.
    ///
    /// Returns `None` when the family has no handler for `T` (symmetric
    /// eigendecomposition of complex operands, Hermitian of real ones).
    pub fn instantiate<T: LapackScalar>(family: Family) -> Option<Self> {
        let template = family.template(T::DTYPE)?;
        let library = template.library();
        let symbol = format!("{}{}", T::PREFIX, template.mnemonic(T::IS_COMPLEX));
        Some(Self {
            name: format!("{}_{}_ffi", library.name(), symbol),
            family,
            template,
            dtype: T::DTYPE,
            target: KernelTarget { library, symbol },
            signature: template.signature::<T>(),
        })
    }

    /// Registered name, e.g. `lapack_dgetrf_ffi`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Signature template the entry was instantiated from
    pub fn template(&self) -> Template {
        self.template
    }

    /// Operand element type
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Kernel entry point
    pub fn target(&self) -> &KernelTarget {
        &self.target
    }

    /// Call contract
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Check a call frame against this entry's signature
    pub fn validate(&self, frame: &CallFrame) -> Result<()> {
        self.signature.validate(&self.name, frame)
    }
}

impl fmt::Display for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}

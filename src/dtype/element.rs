//! Element traits mapping Rust types to `DType`

use super::{Complex64, Complex128, DType};
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;

/// Trait for types that can be stored in a call buffer
///
/// This connects Rust's type system to the runtime `DType` tags carried by
/// host buffers and signature descriptors.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe reinterpretation of host storage (bytemuck)
pub trait Element: Copy + Send + Sync + Pod + Zeroable + PartialEq + Debug + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;
}

/// Integer type LAPACK uses for pivots, status codes and integer workspace.
///
/// 32-bit unless the `ilp64` feature selects a 64-bit integer interface.
#[cfg(not(feature = "ilp64"))]
pub type LapackInt = i32;

/// Integer type LAPACK uses for pivots, status codes and integer workspace.
///
/// 32-bit unless the `ilp64` feature selects a 64-bit integer interface.
#[cfg(feature = "ilp64")]
pub type LapackInt = i64;

/// Operand element types of the LAPACK/BLAS routines
///
/// Implemented for exactly `f32`, `f64`, `Complex64` and `Complex128`. The
/// associated types are the compile-time form of the real/complex counterpart
/// mapping: a handler template names `T::Real` wherever an output is always
/// real-valued (singular values, Hermitian eigenvalues, real workspace), and
/// `T::Complex` wherever a real operand produces complex output.
pub trait LapackScalar: Element {
    /// Real counterpart (`Complex64 -> f32`, `f64 -> f64`)
    type Real: LapackScalar;

    /// Complex counterpart (`f32 -> Complex64`, `Complex128 -> Complex128`)
    type Complex: LapackScalar;

    /// LAPACK type code used in routine names
    const PREFIX: char;

    /// Whether this is a complex type
    const IS_COMPLEX: bool = Self::DTYPE.is_complex();
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
            }
        )*
    };
}

impl_element!(
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
    Complex64 => Complex64,
    Complex128 => Complex128,
);

macro_rules! impl_lapack_scalar {
    ($($ty:ty: real = $real:ty, complex = $complex:ty, prefix = $prefix:literal);* $(;)?) => {
        $(
            impl LapackScalar for $ty {
                type Real = $real;
                type Complex = $complex;
                const PREFIX: char = $prefix;
            }
        )*
    };
}

impl_lapack_scalar!(
    f32: real = f32, complex = Complex64, prefix = 's';
    f64: real = f64, complex = Complex128, prefix = 'd';
    Complex64: real = f32, complex = Complex64, prefix = 'c';
    Complex128: real = f64, complex = Complex128, prefix = 'z';
);

#[cfg(test)]
mod tests {
    use super::*;

    fn check_counterparts<T: LapackScalar>() {
        assert_eq!(<T::Real as Element>::DTYPE, T::DTYPE.to_real());
        assert_eq!(Some(<T::Complex as Element>::DTYPE), T::DTYPE.to_complex());
        assert_eq!(T::DTYPE.lapack_prefix(), Some(T::PREFIX));
        assert_eq!(std::mem::size_of::<T>(), T::DTYPE.size_in_bytes());
    }

    #[test]
    fn test_static_and_runtime_mappings_agree() {
        check_counterparts::<f32>();
        check_counterparts::<f64>();
        check_counterparts::<Complex64>();
        check_counterparts::<Complex128>();
    }

    #[test]
    fn test_is_complex() {
        const { assert!(!<f64 as LapackScalar>::IS_COMPLEX) };
        const { assert!(<Complex64 as LapackScalar>::IS_COMPLEX) };
    }

    #[test]
    fn test_lapack_int_dtype() {
        let dtype = <LapackInt as Element>::DTYPE;
        assert!(dtype.is_int());
        #[cfg(not(feature = "ilp64"))]
        assert_eq!(dtype, DType::I32);
        #[cfg(feature = "ilp64")]
        assert_eq!(dtype, DType::I64);
    }
}

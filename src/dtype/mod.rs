//! Element type system for LAPACK handler signatures
//!
//! This module provides the `DType` enum describing the element type of a
//! buffer crossing the call boundary, along with the real/complex counterpart
//! mapping used for magnitude-type outputs.

pub mod complex;
mod element;

pub use complex::{Complex64, Complex128};
pub use element::{Element, LapackInt, LapackScalar};

use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Element types that may appear in a handler signature
///
/// The four floating point types (`F32`, `F64`, `Complex64`, `Complex128`) are
/// operand types. The integer types carry pivots, status codes and integer
/// scratch space; which one is used depends on the `ilp64` feature.
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are **stable** and must not be reordered:
/// - Floats: F64=0, F32=1
/// - Signed ints: I64=10, I32=11
/// - Complex: Complex64=40, Complex128=41
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,

    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,

    /// 64-bit complex (two f32: re, im)
    Complex64 = 40,
    /// 128-bit complex (two f64: re, im)
    Complex128 = 41,
}

impl DType {
    /// The operand types every handler family is expanded over, in
    /// LAPACK prefix order (`s`, `d`, `c`, `z`)
    pub const OPERANDS: [DType; 4] = [Self::F32, Self::F64, Self::Complex64, Self::Complex128];

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Complex128 => 16,
            Self::F64 | Self::I64 | Self::Complex64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }

    /// Returns true if this is a real floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns true if this is an integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32)
    }

    /// Returns true if this type can be the operand of a handler
    #[inline]
    pub const fn is_operand(self) -> bool {
        self.is_float() || self.is_complex()
    }

    /// Real counterpart of this type.
    ///
    /// Complex types map to their component type; every other type maps to
    /// itself.
    #[inline]
    pub const fn to_real(self) -> Self {
        match self {
            Self::Complex64 => Self::F32,
            Self::Complex128 => Self::F64,
            other => other,
        }
    }

    /// Complex counterpart of this type.
    ///
    /// Real floats map to the complex type with the same component width and
    /// complex types map to themselves. Integers have no complex counterpart.
    #[inline]
    pub const fn to_complex(self) -> Option<Self> {
        match self {
            Self::F32 | Self::Complex64 => Some(Self::Complex64),
            Self::F64 | Self::Complex128 => Some(Self::Complex128),
            Self::I32 | Self::I64 => None,
        }
    }

    /// Single-letter LAPACK type code (`s`, `d`, `c`, `z`) for operand types
    #[inline]
    pub const fn lapack_prefix(self) -> Option<char> {
        match self {
            Self::F32 => Some('s'),
            Self::F64 => Some('d'),
            Self::Complex64 => Some('c'),
            Self::Complex128 => Some('z'),
            Self::I32 | Self::I64 => None,
        }
    }

    /// Short name for display (e.g., "f32", "c128")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::Complex64 => "c64",
            Self::Complex128 => "c128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::F64.size_in_bytes(), 8);
        assert_eq!(DType::F32.size_in_bytes(), 4);
        assert_eq!(DType::I32.size_in_bytes(), 4);
        assert_eq!(DType::Complex64.size_in_bytes(), 8);
        assert_eq!(DType::Complex128.size_in_bytes(), 16);
    }

    #[test]
    fn test_real_counterpart() {
        assert_eq!(DType::Complex64.to_real(), DType::F32);
        assert_eq!(DType::Complex128.to_real(), DType::F64);
        assert_eq!(DType::F32.to_real(), DType::F32);
        assert_eq!(DType::I32.to_real(), DType::I32);
    }

    #[test]
    fn test_complex_counterpart() {
        assert_eq!(DType::F32.to_complex(), Some(DType::Complex64));
        assert_eq!(DType::F64.to_complex(), Some(DType::Complex128));
        assert_eq!(DType::Complex128.to_complex(), Some(DType::Complex128));
        assert_eq!(DType::I64.to_complex(), None);
    }

    #[test]
    fn test_operand_prefixes() {
        let prefixes: String = DType::OPERANDS
            .iter()
            .filter_map(|d| d.lapack_prefix())
            .collect();
        assert_eq!(prefixes, "sdcz");
        assert!(DType::OPERANDS.iter().all(|d| d.is_operand()));
        assert_eq!(DType::I32.lapack_prefix(), None);
    }

    #[test]
    fn test_complex_component_size() {
        for dtype in [DType::Complex64, DType::Complex128] {
            assert_eq!(dtype.size_in_bytes(), 2 * dtype.to_real().size_in_bytes());
        }
    }
}

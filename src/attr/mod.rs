//! Enumerated attributes accompanying a handler call
//!
//! Every attribute is a closed enumeration whose wire value is the single
//! LAPACK character code the kernel receives (`'L'`, `'U'`, `'N'`, ...).
//! Values are checked only for membership in their enumeration; whether a
//! combination of attributes makes sense for the buffers supplied is the
//! kernel's concern.

use std::fmt;

/// Defines a LAPACK character-coded enumeration and its `EnumAttr` impl
macro_rules! lapack_enum {
    (
        $(#[$meta:meta])*
        $name:ident : $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $code ),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl $crate::attr::EnumAttr for $name {
            const KIND: $crate::attr::AttrKind = $crate::attr::AttrKind::$kind;

            #[inline]
            fn code(self) -> u8 {
                self as u8
            }

            #[inline]
            fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

pub mod eig;
pub mod schur;
pub mod svd;

/// An enumeration usable as a handler attribute
pub trait EnumAttr: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Which enumeration this is
    const KIND: AttrKind;

    /// LAPACK character code passed to the kernel
    fn code(self) -> u8;

    /// Decode a wire code, `None` if it is not a member
    fn from_code(code: u8) -> Option<Self>;
}

/// Runtime tag naming each attribute enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrKind {
    /// [`Side`]
    Side,
    /// [`UpLo`]
    UpLo,
    /// [`Transpose`]
    Transpose,
    /// [`Diag`]
    Diag,
    /// [`svd::ComputationMode`]
    SvdMode,
    /// [`eig::ComputationMode`]
    EigMode,
    /// [`schur::ComputationMode`]
    SchurMode,
    /// [`schur::Sort`]
    SchurSort,
}

impl AttrKind {
    /// Type name as it appears in signature listings
    pub const fn name(self) -> &'static str {
        match self {
            Self::Side => "Side",
            Self::UpLo => "UpLo",
            Self::Transpose => "Transpose",
            Self::Diag => "Diag",
            Self::SvdMode => "svd::ComputationMode",
            Self::EigMode => "eig::ComputationMode",
            Self::SchurMode => "schur::ComputationMode",
            Self::SchurSort => "schur::Sort",
        }
    }

    /// Whether `code` is a member of this enumeration
    pub fn accepts(self, code: u8) -> bool {
        match self {
            Self::Side => Side::from_code(code).is_some(),
            Self::UpLo => UpLo::from_code(code).is_some(),
            Self::Transpose => Transpose::from_code(code).is_some(),
            Self::Diag => Diag::from_code(code).is_some(),
            Self::SvdMode => svd::ComputationMode::from_code(code).is_some(),
            Self::EigMode => eig::ComputationMode::from_code(code).is_some(),
            Self::SchurMode => schur::ComputationMode::from_code(code).is_some(),
            Self::SchurSort => schur::Sort::from_code(code).is_some(),
        }
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lapack_enum! {
    /// Which side the triangular operand multiplies from in `op(A) X = alpha B`
    /// (left) or `X op(A) = alpha B` (right)
    Side: Side {
        /// Solve `op(A) X = alpha B`
        Left = b'L',
        /// Solve `X op(A) = alpha B`
        Right = b'R',
    }
}

lapack_enum! {
    /// Which triangle of the operand is referenced
    UpLo: UpLo {
        /// Upper triangle
        Upper = b'U',
        /// Lower triangle
        Lower = b'L',
    }
}

lapack_enum! {
    /// Transformation applied to the operand before use
    Transpose: Transpose {
        /// `op(A) = A`
        NoTranspose = b'N',
        /// `op(A) = A^T`
        Transpose = b'T',
        /// `op(A) = A^H`
        ConjugateTranspose = b'C',
    }
}

lapack_enum! {
    /// Whether a triangular operand has an implicit unit diagonal
    Diag: Diag {
        /// Diagonal is assumed to be all ones and is not read
        Unit = b'U',
        /// Diagonal is read from the operand
        NonUnit = b'N',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_codes_decode<A: EnumAttr>(all: &[A]) {
        for &value in all {
            assert_eq!(A::from_code(value.code()), Some(value));
            assert!(A::KIND.accepts(value.code()));
        }
    }

    #[test]
    fn test_lapack_character_codes() {
        assert_eq!(Side::Left.code(), b'L');
        assert_eq!(UpLo::Lower.code(), b'L');
        assert_eq!(Transpose::ConjugateTranspose.code(), b'C');
        assert_eq!(Diag::NonUnit.code(), b'N');
    }

    #[test]
    fn test_members_decode() {
        assert_codes_decode(Side::ALL);
        assert_codes_decode(UpLo::ALL);
        assert_codes_decode(Transpose::ALL);
        assert_codes_decode(Diag::ALL);
        assert_codes_decode(svd::ComputationMode::ALL);
        assert_codes_decode(eig::ComputationMode::ALL);
        assert_codes_decode(schur::ComputationMode::ALL);
        assert_codes_decode(schur::Sort::ALL);
    }

    #[test]
    fn test_non_members_rejected() {
        assert_eq!(Side::from_code(b'U'), None);
        assert_eq!(Transpose::from_code(b'X'), None);
        assert!(!AttrKind::UpLo.accepts(b'R'));
        assert!(!AttrKind::SchurSort.accepts(0));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(<UpLo as EnumAttr>::KIND, AttrKind::UpLo);
        assert_eq!(AttrKind::SvdMode.to_string(), "svd::ComputationMode");
    }
}

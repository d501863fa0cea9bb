//! Complex element types for complex-valued LAPACK operands
//!
//! Complex numbers are stored interleaved (re, im), which is the layout the
//! LAPACK `c*` and `z*` routines read and write. Both types are `Pod`, so host
//! buffers can be reinterpreted as complex slices without copying.

use bytemuck::{Pod, Zeroable};

macro_rules! impl_complex {
    ($name:ident, $float:ty, $doc_bits:literal, $lapack_type:literal) => {
        #[doc = concat!($doc_bits, "-bit complex number, LAPACK `", $lapack_type, "` layout")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            /// Create a new complex number
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }
        }
    };
}

impl_complex!(Complex64, f32, "64", "complex");
impl_complex!(Complex128, f64, "128", "double complex");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_layout() {
        let values = [Complex64::new(1.0, 2.0), Complex64::new(3.0, -4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&values);
        assert_eq!(flat, &[1.0, 2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_component_width() {
        assert_eq!(std::mem::size_of::<Complex64>(), 2 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::size_of::<Complex128>(), 16);
        assert_eq!(std::mem::align_of::<Complex128>(), std::mem::align_of::<f64>());
    }
}

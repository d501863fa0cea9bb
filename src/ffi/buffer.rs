//! Host buffers and the descriptors signatures declare for them

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// Rank constraint a signature places on a buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    /// Any rank; shapes are the kernel's business
    Any,
    /// Rank 0 (a single scalar, e.g. `alpha` in `?trsm`)
    Scalar,
}

/// Declared element type and rank of one argument or result buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferSpec {
    /// Name used in listings and diagnostics (`x`, `ipiv`, `info`, ...)
    pub name: &'static str,
    /// Element type the kernel reads or writes
    pub dtype: DType,
    /// Rank constraint
    pub rank: Rank,
}

impl BufferSpec {
    /// Descriptor for a buffer of any rank
    pub const fn new(name: &'static str, dtype: DType) -> Self {
        Self {
            name,
            dtype,
            rank: Rank::Any,
        }
    }

    /// Descriptor for a rank-0 buffer
    pub const fn scalar(name: &'static str, dtype: DType) -> Self {
        Self {
            name,
            dtype,
            rank: Rank::Scalar,
        }
    }

    /// Check that `buffer` matches this descriptor.
    ///
    /// Only the element type and the rank-0 requirement are checked; the
    /// layer never validates shapes.
    pub(crate) fn check(&self, buffer: &Buffer) -> std::result::Result<(), String> {
        if buffer.dtype() != self.dtype {
            return Err(format!(
                "buffer '{}' expects {}, got {}",
                self.name,
                self.dtype,
                buffer.dtype()
            ));
        }
        if self.rank == Rank::Scalar && !buffer.dims().is_empty() {
            return Err(format!(
                "buffer '{}' must be rank 0, got dims {:?}",
                self.name,
                buffer.dims()
            ));
        }
        Ok(())
    }
}

impl fmt::Display for BufferSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Rank::Any => write!(f, "{}: {}[]", self.name, self.dtype),
            Rank::Scalar => write!(f, "{}: {}", self.name, self.dtype),
        }
    }
}

/// A typed, shaped block of storage passed across the call boundary
///
/// Storage is kept in 8-byte words so that every supported element type can
/// be viewed in place through `bytemuck` without alignment failures. The
/// layout convention (column-major, leading dimensions) is fixed between the
/// caller and the kernel; this type does not interpret `dims`.
#[derive(Clone, Debug, PartialEq)]
pub struct Buffer {
    dtype: DType,
    dims: Vec<usize>,
    len: usize,
    words: Vec<u64>,
}

impl Buffer {
    /// Zero-initialized buffer.
    ///
    /// Fails with [`Error::InvalidArgument`] if the element count or byte
    /// size of `dims` overflows `usize`.
    pub fn zeros(dtype: DType, dims: &[usize]) -> Result<Self> {
        let overflow = || Error::InvalidArgument {
            arg: "dims",
            reason: format!("shape {dims:?} of {dtype} overflows the address space"),
        };
        let len = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(overflow)?;
        let size = dtype.size_in_bytes();
        let bytes = len.checked_mul(size).ok_or_else(overflow)?;
        Ok(Self {
            dtype,
            dims: dims.to_vec(),
            len,
            words: vec![0; bytes.div_ceil(8)],
        })
    }

    /// Buffer holding a copy of `data` with shape `dims`
    pub fn from_slice<T: Element>(data: &[T], dims: &[usize]) -> Result<Self> {
        let mut buffer = Self::zeros(T::DTYPE, dims)?;
        if data.len() != buffer.len {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!(
                    "{} elements do not fill shape {:?} ({} elements)",
                    data.len(),
                    dims,
                    buffer.len
                ),
            });
        }
        buffer.as_mut_slice::<T>()?.copy_from_slice(data);
        Ok(buffer)
    }

    /// Rank-0 buffer holding `value`
    pub fn scalar<T: Element>(value: T) -> Self {
        let mut words = vec![0u64; T::DTYPE.size_in_bytes().div_ceil(8)];
        bytemuck::cast_slice_mut::<u64, T>(&mut words)[0] = value;
        Self {
            dtype: T::DTYPE,
            dims: Vec::new(),
            len: 1,
            words,
        }
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Shape
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View the storage as elements of `T`
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.expect_dtype::<T>()?;
        let bytes: &[u8] = bytemuck::cast_slice(&self.words);
        Ok(bytemuck::cast_slice(&bytes[..self.byte_len()]))
    }

    /// Mutable view of the storage as elements of `T`
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        self.expect_dtype::<T>()?;
        let byte_len = self.byte_len();
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.words);
        Ok(bytemuck::cast_slice_mut(&mut bytes[..byte_len]))
    }

    /// Copy the contents out as a `Vec<T>`
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.as_slice::<T>().map(<[T]>::to_vec)
    }

    #[inline]
    fn byte_len(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }

    #[inline]
    fn expect_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE != self.dtype {
            return Err(Error::dtype_mismatch(T::DTYPE, self.dtype));
        }
        Ok(())
    }
}

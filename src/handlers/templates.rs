//! Signature templates, one per handler family
//!
//! Each function is generic over the operand type `T` and is the only place
//! that family's buffer order is written down. Outputs that are always
//! real-valued use `T::Real`; complex eigenvectors of real operands use
//! `T::Complex`. Integer outputs use [`LapackInt`].
//!
//! Argument buffers precede results; results are listed in the order the
//! kernel fills them. Attribute position is irrelevant to the kernel, which
//! reads attributes by name.

use crate::attr::{Diag, Side, Transpose, UpLo, eig, schur, svd};
use crate::dtype::{LapackInt, LapackScalar};
use crate::ffi::Signature;

/// `?trsm`: solve `op(A) X = alpha B` or `X op(A) = alpha B`, overwriting B
pub fn trsm<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .arg::<T>("y")
        .scalar_arg::<T>("alpha")
        .ret::<T>("y_out")
        .attr::<Side>("side")
        .attr::<UpLo>("uplo")
        .attr::<Transpose>("trans_x")
        .attr::<Diag>("diag")
        .finish()
}

/// `?getrf`: LU factorization with partial pivoting
pub fn getrf<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .ret::<T>("x_out")
        .ret::<LapackInt>("ipiv")
        .ret::<LapackInt>("info")
        .finish()
}

/// `?geqrf`: Householder QR factorization
pub fn geqrf<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .ret::<T>("x_out")
        .ret::<T>("tau")
        .ret::<LapackInt>("info")
        .ret::<T>("work")
        .finish()
}

/// `?orgqr` / `?ungqr`: form Q from the reflectors left by `?geqrf`
pub fn orgqr<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .arg::<T>("tau")
        .ret::<T>("x_out")
        .ret::<LapackInt>("info")
        .ret::<T>("work")
        .finish()
}

/// `?potrf`: Cholesky factorization
pub fn potrf<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<UpLo>("uplo")
        .ret::<T>("x_out")
        .ret::<LapackInt>("info")
        .finish()
}

/// `sgesdd` / `dgesdd`: divide-and-conquer SVD of a real matrix
pub fn gesdd<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .ret::<T>("x_out")
        .ret::<T>("s")
        .ret::<T>("u")
        .ret::<T>("vt")
        .ret::<LapackInt>("info")
        .ret::<LapackInt>("iwork")
        .ret::<T>("work")
        .attr::<svd::ComputationMode>("mode")
        .finish()
}

/// `cgesdd` / `zgesdd`: singular values and `rwork` are real, and `rwork`
/// sits between `info` and `iwork`
pub fn gesdd_complex<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .ret::<T>("x_out")
        .ret::<T::Real>("s")
        .ret::<T>("u")
        .ret::<T>("vt")
        .ret::<LapackInt>("info")
        .ret::<T::Real>("rwork")
        .ret::<LapackInt>("iwork")
        .ret::<T>("work")
        .attr::<svd::ComputationMode>("mode")
        .finish()
}

/// `?syevd`: symmetric eigendecomposition, eigenvectors overwrite `x_out`
pub fn syevd<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<UpLo>("uplo")
        .ret::<T>("x_out")
        .ret::<T>("eigenvalues")
        .ret::<LapackInt>("info")
        .ret::<T>("work")
        .ret::<LapackInt>("iwork")
        .attr::<eig::ComputationMode>("mode")
        .finish()
}

/// `?heevd`: Hermitian eigendecomposition with real eigenvalues
pub fn heevd<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<UpLo>("uplo")
        .ret::<T>("x_out")
        .ret::<T::Real>("eigenvalues")
        .ret::<LapackInt>("info")
        .ret::<T>("work")
        .ret::<T::Real>("rwork")
        .ret::<LapackInt>("iwork")
        .attr::<eig::ComputationMode>("mode")
        .finish()
}

/// `sgeev` / `dgeev`: eigenvalues come back as separate real and imaginary
/// parts and the eigenvectors are unpacked into complex buffers
pub fn geev<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<eig::ComputationMode>("compute_left")
        .attr::<eig::ComputationMode>("compute_right")
        .ret::<T>("eigvals_real")
        .ret::<T>("eigvals_imag")
        .ret::<T::Complex>("eigvecs_left")
        .ret::<T::Complex>("eigvecs_right")
        .ret::<LapackInt>("info")
        .ret::<T>("x_work")
        .ret::<T::Real>("work_eigvecs_left")
        .ret::<T::Real>("work_eigvecs_right")
        .finish()
}

/// `cgeev` / `zgeev`
pub fn geev_complex<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<eig::ComputationMode>("compute_left")
        .attr::<eig::ComputationMode>("compute_right")
        .ret::<T>("eigvals")
        .ret::<T>("eigvecs_left")
        .ret::<T>("eigvecs_right")
        .ret::<LapackInt>("info")
        .ret::<T>("x_work")
        .ret::<T::Real>("rwork")
        .finish()
}

/// `sgees` / `dgees`: real Schur form
pub fn gees<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<schur::ComputationMode>("mode")
        .attr::<schur::Sort>("sort")
        .ret::<T>("x_out")
        .ret::<T>("eigvals_real")
        .ret::<T>("eigvals_imag")
        .ret::<T>("schur_vectors")
        .ret::<LapackInt>("selected_eigvals")
        .ret::<LapackInt>("info")
        .finish()
}

/// `cgees` / `zgees`: complex Schur form
pub fn gees_complex<T: LapackScalar>() -> Signature {
    Signature::bind()
        .arg::<T>("x")
        .attr::<schur::ComputationMode>("mode")
        .attr::<schur::Sort>("sort")
        .ret::<T>("x_out")
        .ret::<T>("eigvals")
        .ret::<T>("schur_vectors")
        .ret::<LapackInt>("selected_eigvals")
        .ret::<LapackInt>("info")
        .ret::<T::Real>("rwork")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{Complex64, Complex128, DType, Element};
    use crate::ffi::Rank;

    fn ret_dtype(sig: &Signature, name: &str) -> DType {
        sig.ret(name).unwrap().dtype
    }

    #[test]
    fn test_trsm_alpha_is_scalar_operand() {
        let sig = trsm::<Complex128>();
        let alpha = sig.arg("alpha").unwrap();
        assert_eq!(alpha.dtype, DType::Complex128);
        assert_eq!(alpha.rank, Rank::Scalar);
    }

    #[test]
    fn test_complex_svd_real_outputs() {
        let sig = gesdd_complex::<Complex64>();
        assert_eq!(ret_dtype(&sig, "s"), DType::F32);
        assert_eq!(ret_dtype(&sig, "rwork"), DType::F32);
        assert_eq!(ret_dtype(&sig, "u"), DType::Complex64);
        assert_eq!(sig.rets().len(), gesdd::<f32>().rets().len() + 1);
    }

    #[test]
    fn test_real_geev_complex_eigenvectors() {
        let sig = geev::<f64>();
        assert_eq!(ret_dtype(&sig, "eigvecs_left"), DType::Complex128);
        assert_eq!(ret_dtype(&sig, "eigvecs_right"), DType::Complex128);
        assert_eq!(ret_dtype(&sig, "work_eigvecs_left"), DType::F64);
    }

    #[test]
    fn test_heevd_rwork_follows_work() {
        let sig = heevd::<Complex128>();
        let names: Vec<_> = sig.rets().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["x_out", "eigenvalues", "info", "work", "rwork", "iwork"]
        );
        assert_eq!(ret_dtype(&sig, "info"), <LapackInt as Element>::DTYPE);
    }

    #[test]
    fn test_gees_complex_adds_rwork() {
        let real = gees::<f32>();
        let complex = gees_complex::<Complex64>();
        assert!(real.ret("rwork").is_none());
        assert_eq!(ret_dtype(&complex, "rwork"), DType::F32);
        assert!(complex.ret("eigvals_imag").is_none());
        assert_eq!(
            real.attr_names().collect::<Vec<_>>(),
            complex.attr_names().collect::<Vec<_>>()
        );
    }
}

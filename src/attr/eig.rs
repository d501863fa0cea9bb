//! Attributes for eigendecompositions (`?syevd`, `?heevd`, `?geev`)

lapack_enum! {
    /// Whether eigenvectors are computed (LAPACK `JOBZ`/`JOBVL`/`JOBVR`)
    ComputationMode: EigMode {
        /// Eigenvalues only
        NoEigenvectors = b'N',
        /// Eigenvalues and eigenvectors
        ComputeEigenvectors = b'V',
    }
}

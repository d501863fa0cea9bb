//! Attributes for Schur decomposition (`?gees`)

lapack_enum! {
    /// Whether Schur vectors are computed (LAPACK `JOBVS`)
    ComputationMode: SchurMode {
        /// Schur form only
        NoSchurVectors = b'N',
        /// Schur form and Schur vectors
        ComputeSchurVectors = b'V',
    }
}

lapack_enum! {
    /// Whether eigenvalues are reordered so selected ones lead the Schur
    /// form (LAPACK `SORT`)
    Sort: SchurSort {
        /// Keep the order LAPACK produces
        NoSort = b'N',
        /// Move selected eigenvalues to the top left
        SortSelected = b'S',
    }
}

//! Attributes for singular value decomposition (`?gesdd`)

lapack_enum! {
    /// How much of `U` and `V^T` to compute (LAPACK `JOBZ`)
    ComputationMode: SvdMode {
        /// All `m` columns of `U` and all `n` rows of `V^T`
        ComputeFull = b'A',
        /// The first `min(m, n)` columns of `U` and rows of `V^T`
        ComputeEconomy = b'S',
        /// Singular values only
        NoVectors = b'N',
    }
}

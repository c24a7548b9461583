use thiserror::Error;

/// Fatal conditions raised by the geometry prober and byte recovery engine.
///
/// None of these are retriable: each one means either the oracle is not what
/// the attack assumes it to be, or an alignment invariant has been broken.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttackError {
    /// The oracle did not show the block-collision behaviour ECB guarantees.
    #[error("oracle does not appear to be encrypting in ECB mode")]
    NotEcb,

    /// The ciphertext length never jumped while probing with growing filler.
    #[error("block size probing did not converge within {max_trials} trials")]
    BlockSizeNotFound { max_trials: usize },

    /// Length accounting between probes contradicted itself.
    #[error("geometry probing is inconsistent: {0}")]
    GeometryInconsistent(&'static str),

    /// The target ciphertext block matched none of the 256 candidates.
    ///
    /// The partially recovered plaintext is discarded; a silent wrong byte
    /// would corrupt every later position.
    #[error("no dictionary entry for target block at suffix index {index}")]
    DictionaryMiss { index: usize },
}

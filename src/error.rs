//! Error types for Sigma-protocol proofs

/// Main error types for the library.
///
/// Verification outcomes are never reported through this type: a proof that
/// does not check out is a `false`, not an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The randomness source failed to produce a blinding value.
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// A prover was driven out of order, or incompatible units were combined.
    #[error("Protocol state error: {0}")]
    ProtocolState(String),

    /// Invalid group parameters or protocol shape were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// An exponent value is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A serialized proof could not be decoded.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Layered configuration could not be extracted.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}

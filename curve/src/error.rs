//! Error type shared by the curve and the signature crates built on it.

use thiserror::Error;

/// Errors surfaced by point decoding, key handling and signature checks.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input bytes do not encode a canonical integer or a curve point.
    #[error("malformed encoding")]
    Encoding,
    /// A well-formed value is outside the domain the operation accepts,
    /// such as a zero private key or the identity where a proper point is
    /// required.
    #[error("value outside valid domain")]
    Domain,
    /// The signature does not verify under the given key and message.
    #[error("invalid signature")]
    InvalidSignature,
}

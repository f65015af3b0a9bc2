//! Constants for the BIP340 Schnorr signature scheme.

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is the x coordinate of a curve point with even y,
/// requiring 32 bytes when serialized.
pub const PK_SIZE: usize = 32;

/// Size of a serialized secret signing key in bytes.
///
/// A signing key is a scalar modulo the group order, requiring 32 bytes
/// when serialized.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - The x coordinate of the nonce point R (32 bytes)
/// - A scalar s (32 bytes)
/// Total: 64 bytes
pub const SIG_SIZE: usize = 64;

/// Domain separation tag for hashing auxiliary randomness.
pub(crate) const TAG_AUX: &str = "BIP0340/aux";

/// Domain separation tag for nonce derivation.
pub(crate) const TAG_NONCE: &str = "BIP0340/nonce";

/// Domain separation tag for the Fiat-Shamir challenge.
pub(crate) const TAG_CHALLENGE: &str = "BIP0340/challenge";

//! Sizes of the serialized forms used by this crate.

/// Size of a serialized compressed verifying key in bytes.
///
/// A verifying key is a curve point in SEC1 compressed form: one prefix
/// byte and the 32-byte x coordinate.
pub const PK_SIZE: usize = 33;

/// Size of a serialized signing key in bytes.
///
/// A signing key is a scalar modulo the group order, requiring 32 bytes
/// when serialized.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of the scalars `r` and `s`, 32 bytes each.
pub const SIG_SIZE: usize = 64;

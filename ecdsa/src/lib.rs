//! ECDSA over the secp256k1 curve with SHA-256 and deterministic nonces.
//!
//! # Overview
//!
//! Signing hashes the message with SHA-256, derives the nonce from the key
//! and digest with the RFC 6979 HMAC-DRBG, and emits the scalar pair
//! `(r, s)` with `s` normalized to the low half of the scalar range.
//! Verification enforces that normalization, so each message and key pair
//! has exactly one acceptable signature.
//!
//! # Example
//!
//! ```
//! use ecdsa::{SigningKey, VerifyingKey};
//! use rand::rng;
//!
//! let mut rng = rng();
//! let signing_key = SigningKey::random(&mut rng);
//! let verifying_key = VerifyingKey::from(&signing_key);
//!
//! let signature = signing_key.sign(b"important message");
//! assert!(verifying_key.verify(b"important message", &signature).is_ok());
//! ```
//!
//! # Security Considerations
//!
//! - Nonces are deterministic; signing the same message twice yields the
//!   same signature and never reuses a nonce across messages
//! - The nonce point is computed with a constant-time ladder
//! - Protect the signing key from unauthorized access; its storage is
//!   wiped on drop

mod constants;
mod keys;
mod nonce;
mod signatures;

#[cfg(test)]
mod tests;

pub use constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
pub use curve::Error;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::Signature;

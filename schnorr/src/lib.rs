//! BIP340 Schnorr signatures over the secp256k1 curve.
//!
//! This library implements the Schnorr signature scheme of BIP340:
//! - x-only public keys (32 bytes), with the even-y lift convention
//! - Tagged SHA-256 hashing for nonces and challenges
//! - Deterministic nonces masked with auxiliary randomness
//!
//! # Overview
//!
//! A signature is the pair `(r, s)`: the x coordinate of the nonce point
//! and a response scalar, 64 bytes in total. Verification recomputes the
//! nonce point as `s * G - e * P` and checks it against `r`. A batch
//! verifier folds many signatures into one multi-scalar multiplication.
//!
//! # Example
//!
//! ```
//! use schnorr::{SigningKey, VerifyingKey, Signature};
//! use rand::rng;
//!
//! // Generate a random signing key
//! let mut rng = rng();
//! let signing_key = SigningKey::random(&mut rng);
//!
//! // Derive the corresponding verifying key
//! let verifying_key = signing_key.verifying_key();
//!
//! // Sign the message with fresh auxiliary randomness
//! let signature = signing_key.sign_with_rng(&mut rng, b"message").unwrap();
//!
//! // Verify the signature
//! assert!(verifying_key.verify(b"message", &signature).is_ok());
//! ```
//!
//! # Security Considerations
//!
//! - Always use a cryptographically secure random number generator for
//!   key generation and auxiliary randomness
//! - Nonces are derived deterministically and never reused across
//!   distinct messages; auxiliary randomness additionally hardens
//!   signing against fault injection
//! - Protect the signing key from unauthorized access; its storage is
//!   wiped on drop

mod batch;
mod constants;
mod keys;
mod signatures;


pub use batch::batch_verify;
pub use constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
pub use curve::Error;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::Signature;

//! The secp256k1 elliptic curve group and its two prime fields.
//!
//! This crate provides Montgomery-form arithmetic modulo the field prime and
//! the group order, affine and projective curve points with complete addition
//! formulas, SEC1 point encodings, key material, and elliptic-curve
//! Diffie-Hellman. Operations touching secret scalars run in constant time;
//! the variable-time paths are marked as such and take public inputs only.

mod affine;
mod ecdh;
mod error;
mod field;
mod group;
mod keys;
mod modint;
mod msm;
mod projective;
mod random;
mod scalar;

pub use affine::Affine;
pub use ecdh::{ansi_x963_kdf, diffie_hellman, shared_secret};
pub use error::Error;
pub use field::FieldElement;
pub use group::{Group, ScalarBits};
pub use keys::{PrivateKey, PublicKey};
pub use modint::ModInt256;
pub use msm::double_scalar_mul_basepoint;
pub use projective::Projective;
pub use random::RandomField;
pub use scalar::Scalar;

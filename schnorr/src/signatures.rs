//! Signature types and tagged hashing for the BIP340 signature scheme.

use core::fmt;

use curve::{Error, FieldElement, Scalar};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::constants::{SIG_SIZE, TAG_CHALLENGE};

/// A BIP340 Schnorr signature.
///
/// The signature is a pair `(r, s)` where:
/// - `r` is the x coordinate of the nonce point R, which always has even y
/// - `s` is a scalar modulo the group order (the response)
///
/// # Structure
///
/// The signature satisfies the verification equation
/// `s * G == R + e * P` where `e = H(r || pk || msg)` is the tagged
/// Fiat-Shamir challenge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// x coordinate of the nonce point R = k * G.
    pub r: FieldElement,
    /// The response scalar s = k + e * d.
    pub s: Scalar,
}

impl Signature {
    /// Serialize as `r || s`, both 32 bytes big-endian.
    pub fn to_be_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..32].copy_from_slice(&self.r.to_be_bytes());
        out[32..].copy_from_slice(&self.s.to_be_bytes());
        out
    }

    /// Parse `r || s`. `r` at or above the field prime, or `s` at or
    /// above the group order, is rejected.
    pub fn from_be_bytes(bytes: &[u8; SIG_SIZE]) -> Result<Self, Error> {
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);

        let r = FieldElement::from_be_bytes(&r_bytes).ok_or(Error::Encoding)?;
        let s = Scalar::from_be_bytes(&s_bytes).ok_or(Error::Encoding)?;

        Ok(Signature { r, s })
    }
}

/// BIP340 tagged hash: `SHA256(SHA256(tag) || SHA256(tag) || data)`.
pub(crate) fn tagged_hash(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    let tag_digest: [u8; 32] = Sha256::digest(tag.as_bytes()).into();

    let mut hasher = Sha256::new();
    hasher.update(tag_digest);
    hasher.update(tag_digest);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Computes the Fiat-Shamir challenge for the BIP340 signature scheme.
///
/// The challenge is `H(r || pk || msg)` under the challenge tag, reduced
/// modulo the group order. Both points enter the hash as bare x
/// coordinates.
pub(crate) fn hash_challenge(r_x: &[u8; 32], pk_x: &[u8; 32], msg: &[u8]) -> Scalar {
    Scalar::from_be_bytes_reduced(&tagged_hash(TAG_CHALLENGE, &[r_x, pk_x, msg]))
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_be_bytes())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-byte Schnorr signature")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Signature, E> {
                let bytes: &[u8; SIG_SIZE] =
                    v.try_into().map_err(|_| E::invalid_length(v.len(), &self))?;
                Signature::from_be_bytes(bytes).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Signature, A::Error> {
                let mut bytes = Vec::with_capacity(SIG_SIZE);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                let bytes: &[u8; SIG_SIZE] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| de::Error::invalid_length(bytes.len(), &self))?;
                Signature::from_be_bytes(bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

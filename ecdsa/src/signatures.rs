//! The ECDSA signature type and its fixed-width serialization.

use core::fmt;

use curve::{Error, Scalar};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::SIG_SIZE;

/// An ECDSA signature: the scalar pair `(r, s)`.
///
/// `r` is the x coordinate of the nonce point reduced modulo the group
/// order, `s` the response scalar. Signatures produced by this crate
/// always carry `s` in the low half of the scalar range; verification
/// rejects the high form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Reduced x coordinate of the nonce point.
    pub r: Scalar,
    /// Response scalar `k^-1 * (h + r * d)`, normalized low.
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

    /// Parse `r || s`. Either scalar at or above the group order is
    /// rejected; zero scalars parse and fail later at verification.
    pub fn from_be_bytes(bytes: &[u8; SIG_SIZE]) -> Result<Self, Error> {
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);

        let r = Scalar::from_be_bytes(&r_bytes).ok_or(Error::Encoding)?;
        let s = Scalar::from_be_bytes(&s_bytes).ok_or(Error::Encoding)?;

        Ok(Signature { r, s })
    }
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
                formatter.write_str("a 64-byte ECDSA signature")
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

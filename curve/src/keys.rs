//! Key material: secret scalars and their public curve points.

use core::fmt;

use rand::Rng;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::affine::Affine;
use crate::error::Error;
use crate::projective::Projective;
use crate::scalar::Scalar;

/// A secret key: a scalar in [1, n-1].
///
/// The backing storage is wiped on drop. Comparison runs in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    scalar: Scalar,
}

/// A public key: a non-identity point on the curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: Affine,
}

impl PrivateKey {
    /// Generate a key by rejection sampling. The zero scalar is rejected.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let scalar: Scalar = rng.random();
            if !scalar.is_zero() {
                return PrivateKey { scalar };
            }
        }
    }

    /// Wrap an existing scalar. Zero is not a valid key.
    pub fn from_scalar(scalar: Scalar) -> Result<Self, Error> {
        if scalar.is_zero() {
            return Err(Error::Domain);
        }
        Ok(PrivateKey { scalar })
    }

    /// Parse a 32-byte big-endian scalar. Values >= n or zero are rejected.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let scalar = Scalar::from_be_bytes(bytes).ok_or(Error::Encoding)?;
        Self::from_scalar(scalar)
    }

    /// Serialize the secret scalar as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.scalar.to_be_bytes()
    }

    /// The secret scalar.
    pub fn scalar(&self) -> Scalar {
        self.scalar
    }

    /// Derive the public key, multiplying the generator in constant time.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: Projective::mul_generator(&self.scalar).to_affine(),
        }
    }
}

// The scalar must never reach debug output or logs.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.scalar.equals(&other.scalar) == u64::MAX
    }
}

impl Eq for PrivateKey {}

impl PublicKey {
    /// Wrap an affine point, rejecting the identity and points off the curve.
    pub fn from_affine(point: Affine) -> Result<Self, Error> {
        if point.is_infinity() || !point.is_on_curve() {
            return Err(Error::Domain);
        }
        Ok(PublicKey { point })
    }

    /// Parse a SEC1 encoding (compressed or uncompressed). The identity
    /// encoding is rejected: it is not a valid public key.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self, Error> {
        let point = Affine::decode(bytes)?;
        if point.is_infinity() {
            return Err(Error::Domain);
        }
        Ok(PublicKey { point })
    }

    /// Parse a 32-byte x-only encoding, choosing the even-y point.
    pub fn from_x_only(bytes: &[u8; 32]) -> Result<Self, Error> {
        let point = Affine::decode_x_only(bytes)?;
        Ok(PublicKey { point })
    }

    /// SEC1 compressed encoding, 33 bytes.
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = 0x02 | (self.point.y.is_odd() as u8);
        out[1..].copy_from_slice(&self.point.x.to_be_bytes());
        out
    }

    /// SEC1 uncompressed encoding, 65 bytes.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.point.x.to_be_bytes());
        out[33..].copy_from_slice(&self.point.y.to_be_bytes());
        out
    }

    /// The x coordinate alone, 32 bytes big-endian.
    pub fn x_only(&self) -> [u8; 32] {
        self.point.x.to_be_bytes()
    }

    /// Parity of the y coordinate, as x-only consumers need it.
    pub fn y_is_even(&self) -> bool {
        !self.point.y.is_odd()
    }

    /// The underlying curve point.
    pub fn point(&self) -> Affine {
        self.point
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_compressed())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PublicKeyVisitor;

        impl<'de> Visitor<'de> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a SEC1-encoded public key")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<PublicKey, E> {
                PublicKey::from_sec1(v).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PublicKey, A::Error> {
                let mut bytes = Vec::with_capacity(33);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                PublicKey::from_sec1(&bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(sk: &PrivateKey) -> Self {
        sk.public_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;

    fn key_of(n: u64) -> PrivateKey {
        PrivateKey::from_scalar(Scalar::from_canonical_u64(n)).unwrap()
    }

    #[test]
    fn test_public_key_of_one_is_generator() {
        let pk = key_of(1).public_key();
        assert_eq!(pk.point(), Affine::GENERATOR);

        let compressed = pk.to_compressed();
        let expected =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        assert_eq!(compressed.as_slice(), expected.as_slice());

        let uncompressed = pk.to_uncompressed();
        let expected = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(uncompressed.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_zero_key_rejected() {
        assert_eq!(PrivateKey::from_scalar(Scalar::ZERO), Err(Error::Domain));
        assert_eq!(PrivateKey::from_be_bytes(&[0u8; 32]), Err(Error::Domain));
    }

    #[test]
    fn test_key_bytes_above_order_rejected() {
        // n itself is not a canonical scalar.
        let order = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        assert_eq!(PrivateKey::from_be_bytes(&order), Err(Error::Encoding));
        assert_eq!(PrivateKey::from_be_bytes(&[0xFF; 32]), Err(Error::Encoding));
    }

    #[test]
    fn test_key_roundtrip() {
        let sk = key_of(0xdeadbeef);
        let bytes = sk.to_be_bytes();
        let restored = PrivateKey::from_be_bytes(&bytes).unwrap();
        assert_eq!(sk, restored);
    }

    #[test]
    fn test_random_keys_distinct() {
        let mut rng = rand::rng();
        let sk1 = PrivateKey::random(&mut rng);
        let sk2 = PrivateKey::random(&mut rng);

        assert!(!sk1.scalar().is_zero());
        assert_ne!(sk1, sk2);
        assert!(sk1.public_key().point().is_on_curve());
    }

    #[test]
    fn test_sec1_roundtrip() {
        let pk = key_of(12345).public_key();

        let compressed = pk.to_compressed();
        assert_eq!(PublicKey::from_sec1(&compressed).unwrap(), pk);

        let uncompressed = pk.to_uncompressed();
        assert_eq!(PublicKey::from_sec1(&uncompressed).unwrap(), pk);
    }

    #[test]
    fn test_identity_encoding_rejected() {
        assert_eq!(PublicKey::from_sec1(&[0x00]), Err(Error::Domain));
    }

    #[test]
    fn test_from_affine_rejects_bad_points() {
        assert_eq!(
            PublicKey::from_affine(Affine::INFINITY),
            Err(Error::Domain)
        );

        let off_curve = Affine::new(FieldElement::ONE, FieldElement::ONE);
        assert_eq!(PublicKey::from_affine(off_curve), Err(Error::Domain));
    }

    #[test]
    fn test_x_only_roundtrip() {
        let pk = key_of(7).public_key();
        let x = pk.x_only();
        let lifted = PublicKey::from_x_only(&x).unwrap();

        // Lifting picks the even-y point with the same x.
        assert_eq!(lifted.x_only(), x);
        assert!(lifted.y_is_even());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let sk = key_of(42);
        assert_eq!(format!("{:?}", sk), "PrivateKey(..)");
    }

    #[test]
    fn test_public_key_serde_roundtrip() {
        let pk = key_of(99).public_key();
        let encoded = bincode::serialize(&pk).unwrap();
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(pk, decoded);
    }
}

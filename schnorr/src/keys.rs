//! Signing and verifying keys for the BIP340 Schnorr signature scheme.

use core::fmt;

use curve::{Affine, Error, PrivateKey, Projective, Scalar};
use rand::Rng;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{PK_SIZE, TAG_AUX, TAG_NONCE};
use crate::signatures::{Signature, hash_challenge, tagged_hash};

/// A secret signing key for creating BIP340 Schnorr signatures.
///
/// The signing key is a scalar in [1, n-1]. It must be kept secret and
/// protected from unauthorized access; its storage is wiped on drop.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
/// use rand::rng;
///
/// let mut rng = rng();
/// let signing_key = SigningKey::random(&mut rng);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningKey {
    key: PrivateKey,
}

/// A public verifying key for verifying BIP340 Schnorr signatures.
///
/// The verifying key is a curve point with even y coordinate; only its
/// x coordinate is serialized. A signing key whose public point has odd
/// y signs for the negated point, so both map to the same verifying key.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
/// use rand::rng;
///
/// let mut rng = rng();
/// let signing_key = SigningKey::random(&mut rng);
/// let verifying_key = signing_key.verifying_key();
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: Affine,
}

impl SigningKey {
    /// Generates a random signing key using the provided random number
    /// generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            key: PrivateKey::random(rng),
        }
    }

    /// Parse a 32-byte big-endian scalar. Zero and values at or above
    /// the group order are rejected.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        Ok(Self {
            key: PrivateKey::from_be_bytes(bytes)?,
        })
    }

    /// Serialize the secret scalar as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.key.to_be_bytes()
    }

    /// Derives the public verifying key from this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = Projective::mul_generator(&self.key.scalar()).to_affine();
        VerifyingKey {
            point: even_y(point),
        }
    }

    /// Signs a message with the given auxiliary randomness.
    ///
    /// The signature is computed per BIP340:
    /// 1. Negate the secret `d` if its public point has odd y
    /// 2. Mask `d` with the hashed auxiliary bytes and derive the nonce
    ///    `k` from the mask, the public key and the message under the
    ///    nonce tag
    /// 3. Negate `k` if R = k * G has odd y
    /// 4. Compute the challenge `e = H(R.x || pk || msg)` and the
    ///    response `s = k + e * d`
    ///
    /// All-zero auxiliary bytes are valid; fresh randomness hardens the
    /// scheme against fault attacks. Signing is otherwise deterministic
    /// in the key, message and auxiliary bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Domain`] if the derived nonce is zero, which
    /// for honest inputs has negligible probability.
    pub fn sign(&self, msg: &[u8], aux: &[u8; 32]) -> Result<Signature, Error> {
        let d_raw = self.key.scalar();
        let public = Projective::mul_generator(&d_raw).to_affine();
        let pk_x = public.x.to_be_bytes();

        // d signs for the even-y point.
        let d = Scalar::select(&d_raw, &-d_raw, odd_mask(&public));

        let mut t = d.to_be_bytes();
        for (byte, mask) in t.iter_mut().zip(tagged_hash(TAG_AUX, &[aux])) {
            *byte ^= mask;
        }

        let nonce_hash = tagged_hash(TAG_NONCE, &[&t, &pk_x, msg]);
        let k_raw = Scalar::from_be_bytes_reduced(&nonce_hash);
        if k_raw.is_zero() {
            return Err(Error::Domain);
        }

        let nonce_point = Projective::mul_generator(&k_raw).to_affine();
        let k = Scalar::select(&k_raw, &-k_raw, odd_mask(&nonce_point));

        let r = nonce_point.x;
        let e = hash_challenge(&r.to_be_bytes(), &pk_x, msg);
        let s = k + e * d;

        Ok(Signature { r, s })
    }

    /// Signs a message with auxiliary randomness drawn from `rng`.
    pub fn sign_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Signature, Error> {
        let aux: [u8; 32] = rng.random();
        self.sign(msg, &aux)
    }
}

impl VerifyingKey {
    /// Parse a 32-byte x-only encoding, lifting to the even-y point.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        Ok(VerifyingKey {
            point: Affine::decode_x_only(bytes)?,
        })
    }

    /// The x-only encoding, 32 bytes big-endian.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.point.x.to_be_bytes()
    }

    /// The underlying curve point. Its y coordinate is always even.
    pub fn as_affine(&self) -> Affine {
        self.point
    }

    /// Verifies a signature on a message using this verifying key.
    ///
    /// Computes `R' = s * G - e * P` and accepts when `R'` is a finite
    /// point with even y whose x coordinate equals the signature's `r`.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    /// use rand::rng;
    ///
    /// let mut rng = rng();
    /// let signing_key = SigningKey::random(&mut rng);
    /// let verifying_key = signing_key.verifying_key();
    ///
    /// let signature = signing_key.sign_with_rng(&mut rng, b"message").unwrap();
    /// assert!(verifying_key.verify(b"message", &signature).is_ok());
    /// ```
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<(), Error> {
        let e = hash_challenge(&sig.r.to_be_bytes(), &self.to_be_bytes(), msg);
        let candidate = Affine::double_scalar_mul_basepoint(&sig.s, &-e, &self.point);

        if candidate.is_infinity() || candidate.y.is_odd() || candidate.x != sig.r {
            return Err(Error::InvalidSignature);
        }

        Ok(())
    }
}

impl From<&SigningKey> for VerifyingKey {
    /// Converts a reference to a signing key into a verifying key.
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_be_bytes())
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VerifyingKeyVisitor;

        impl<'de> Visitor<'de> for VerifyingKeyVisitor {
            type Value = VerifyingKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 32-byte x-only public key")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<VerifyingKey, E> {
                let bytes: &[u8; PK_SIZE] =
                    v.try_into().map_err(|_| E::invalid_length(v.len(), &self))?;
                VerifyingKey::from_be_bytes(bytes).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<VerifyingKey, A::Error> {
                let mut bytes = Vec::with_capacity(PK_SIZE);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                let bytes: &[u8; PK_SIZE] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| de::Error::invalid_length(bytes.len(), &self))?;
                VerifyingKey::from_be_bytes(bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(VerifyingKeyVisitor)
    }
}

// All-one mask when the point has odd y.
fn odd_mask(point: &Affine) -> u64 {
    (point.y.is_odd() as u64).wrapping_neg()
}

fn even_y(point: Affine) -> Affine {
    if point.y.is_odd() {
        point.negate()
    } else {
        point
    }
}

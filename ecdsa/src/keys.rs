//! Signing and verifying keys for ECDSA over SHA-256.

use curve::{Affine, Error, PrivateKey, Projective, PublicKey, Scalar};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::PK_SIZE;
use crate::nonce::NonceGenerator;
use crate::signatures::Signature;

/// A secret signing key.
///
/// Signing is deterministic: the nonce is derived from the key and the
/// message digest per RFC 6979, so no randomness source is needed at
/// signing time.
///
/// # Example
///
/// ```
/// use ecdsa::SigningKey;
/// use rand::rng;
///
/// let mut rng = rng();
/// let signing_key = SigningKey::random(&mut rng);
/// let signature = signing_key.sign(b"message");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningKey {
    key: PrivateKey,
}

/// A public verifying key: a non-identity point on the curve.
///
/// # Example
///
/// ```
/// use ecdsa::SigningKey;
/// use rand::rng;
///
/// let mut rng = rng();
/// let signing_key = SigningKey::random(&mut rng);
/// let verifying_key = signing_key.verifying_key();
///
/// let signature = signing_key.sign(b"message");
/// assert!(verifying_key.verify(b"message", &signature).is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    key: PublicKey,
}

impl SigningKey {
    /// Generates a random signing key using the provided random number
    /// generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            key: PrivateKey::random(rng),
        }
    }

    /// Parse a 32-byte big-endian scalar. Zero and values at or above the
    /// group order are rejected.
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
        VerifyingKey {
            key: self.key.public_key(),
        }
    }

    /// Sign a message: SHA-256 first, then [`sign_prehash`].
    ///
    /// [`sign_prehash`]: Self::sign_prehash
    pub fn sign(&self, msg: &[u8]) -> Signature {
        let digest: [u8; 32] = Sha256::digest(msg).into();
        self.sign_prehash(&digest)
    }

    /// Sign a 32-byte message digest.
    ///
    /// Nonce candidates come from the RFC 6979 HMAC-DRBG; a candidate is
    /// rejected when it falls outside [1, n-1] or when it produces a zero
    /// `r` or `s`. The nonce point is computed in constant time, and the
    /// returned `s` is the low form.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Signature {
        let d = self.key.scalar();
        let h = Scalar::from_be_bytes_reduced(digest);
        let mut nonces = NonceGenerator::new(&self.key.to_be_bytes(), digest);

        loop {
            let candidate = nonces.next_candidate();
            let Some(k) = Scalar::from_be_bytes(&candidate) else {
                continue;
            };
            if k.is_zero() {
                continue;
            }

            let point = Projective::mul_generator(&k).to_affine();
            let r = Scalar::from_be_bytes_reduced(&point.x.to_be_bytes());
            if r.is_zero() {
                continue;
            }

            let Some(k_inv) = k.invert() else {
                continue;
            };
            let s = k_inv * (h + r * d);
            if s.is_zero() {
                continue;
            }

            return Signature {
                r,
                s: s.normalize_low(),
            };
        }
    }
}

impl VerifyingKey {
    /// Wrap an existing public key.
    pub fn new(key: PublicKey) -> Self {
        VerifyingKey { key }
    }

    /// Parse a SEC1 encoding, compressed or uncompressed.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self, Error> {
        Ok(VerifyingKey {
            key: PublicKey::from_sec1(bytes)?,
        })
    }

    /// SEC1 compressed encoding, 33 bytes.
    pub fn to_sec1_bytes(&self) -> [u8; PK_SIZE] {
        self.key.to_compressed()
    }

    /// The underlying public key.
    pub fn public_key(&self) -> PublicKey {
        self.key
    }

    /// The underlying curve point.
    pub fn as_affine(&self) -> Affine {
        self.key.point()
    }

    /// Verify a signature on a message: SHA-256 first, then
    /// [`verify_prehash`].
    ///
    /// [`verify_prehash`]: Self::verify_prehash
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<(), Error> {
        let digest: [u8; 32] = Sha256::digest(msg).into();
        self.verify_prehash(&digest, sig)
    }

    /// Verify a signature over a 32-byte message digest.
    ///
    /// Rejects zero `r` or `s`, rejects `s` in the high half of the scalar
    /// range, then checks that the x coordinate of
    /// `(h * s^-1) * G + (r * s^-1) * P` reduces to `r`.
    pub fn verify_prehash(&self, digest: &[u8; 32], sig: &Signature) -> Result<(), Error> {
        if sig.r.is_zero() || sig.s.is_zero() || sig.s.is_high() {
            return Err(Error::InvalidSignature);
        }

        let h = Scalar::from_be_bytes_reduced(digest);
        let Some(s_inv) = sig.s.invert() else {
            return Err(Error::InvalidSignature);
        };
        let u1 = h * s_inv;
        let u2 = sig.r * s_inv;

        let point = Projective::double_scalar_mul_basepoint(
            &u1,
            &u2,
            &Projective::from_affine(&self.key.point()),
        );
        if point.is_infinity() {
            return Err(Error::InvalidSignature);
        }

        let x = point.to_affine().x.to_be_bytes();
        if Scalar::from_be_bytes_reduced(&x) == sig.r {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

impl From<&SigningKey> for VerifyingKey {
    /// Converts a reference to a signing key into a verifying key.
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

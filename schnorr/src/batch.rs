//! Batch verification of BIP340 signatures.

use curve::{Affine, Error, Group, Projective, RandomField, Scalar};
use rand::Rng;

use crate::keys::VerifyingKey;
use crate::signatures::{Signature, hash_challenge};

/// Verify a batch of signatures in one multi-scalar multiplication.
///
/// Each signature equation `s_i * G = R_i + e_i * P_i` is scaled by a
/// random coefficient before summing, so a batch of individually invalid
/// signatures cannot cancel out. An empty batch verifies. On failure the
/// batch gives no indication of which signature is bad; fall back to
/// one-by-one verification to find it.
///
/// # Errors
///
/// [`Error::Domain`] when the slice lengths differ,
/// [`Error::InvalidSignature`] when the batch check fails or a signature
/// `r` has no matching curve point.
pub fn batch_verify<R: Rng + ?Sized>(
    rng: &mut R,
    keys: &[VerifyingKey],
    msgs: &[&[u8]],
    sigs: &[Signature],
) -> Result<(), Error> {
    if keys.len() != msgs.len() || keys.len() != sigs.len() {
        return Err(Error::Domain);
    }

    let mut points = Vec::with_capacity(2 * sigs.len());
    let mut scalars = Vec::with_capacity(2 * sigs.len());
    let mut s_total = Scalar::ZERO;

    for ((key, msg), sig) in keys.iter().zip(msgs).zip(sigs) {
        let nonce_point = Affine::lift_x(sig.r).ok_or(Error::InvalidSignature)?;
        let e = hash_challenge(&sig.r.to_be_bytes(), &key.to_be_bytes(), msg);

        // The first coefficient can stay 1; the rest are random in [1, n-1].
        let a = if points.is_empty() {
            Scalar::ONE
        } else {
            loop {
                let a = Scalar::random(rng);
                if !a.is_zero() {
                    break a;
                }
            }
        };

        s_total += a * sig.s;
        points.push(Projective::from_affine(&nonce_point));
        scalars.push(a);
        points.push(Projective::from_affine(&key.as_affine()));
        scalars.push(a * e);
    }

    if Projective::mul_generator(&s_total) == Projective::multi_scalar_mul(&points, &scalars) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

//! Elliptic-curve Diffie-Hellman with the ANSI X9.63 key derivation
//! function over SHA-256.

use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::projective::Projective;

// SHA-256 output size; one KDF block.
const BLOCK: usize = 32;

/// Compute the raw shared secret: the x coordinate of d * P, 32 bytes
/// big-endian. The multiplication runs in constant time.
pub fn shared_secret(private: &PrivateKey, public: &PublicKey) -> Result<[u8; 32], Error> {
    let point = Projective::from_affine(&public.point()).scalar_mul_ct(&private.scalar());
    let affine = point.to_affine();
    if affine.is_infinity() {
        return Err(Error::Domain);
    }
    Ok(affine.x.to_be_bytes())
}

/// ANSI X9.63 KDF: fill `out` with SHA-256(Z || counter || shared_info)
/// blocks, counter running big-endian from 1.
pub fn ansi_x963_kdf(secret: &[u8], shared_info: &[u8], out: &mut [u8]) -> Result<(), Error> {
    // The 32-bit counter bounds the output length.
    if out.len() as u64 > BLOCK as u64 * u32::MAX as u64 {
        return Err(Error::Domain);
    }

    for (i, chunk) in out.chunks_mut(BLOCK).enumerate() {
        let counter = i as u32 + 1;
        let mut hasher = Sha256::new();
        hasher.update(secret);
        hasher.update(counter.to_be_bytes());
        hasher.update(shared_info);
        let digest = hasher.finalize();
        chunk.copy_from_slice(&digest[..chunk.len()]);
    }

    Ok(())
}

/// Agree on key material: raw ECDH followed by the X9.63 KDF.
pub fn diffie_hellman(
    private: &PrivateKey,
    public: &PublicKey,
    shared_info: &[u8],
    out: &mut [u8],
) -> Result<(), Error> {
    let z = shared_secret(private, public)?;
    ansi_x963_kdf(&z, shared_info, out)
}

//! Deterministic nonce derivation following RFC 6979 with HMAC-SHA256.

use curve::Scalar;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac takes any key length");
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// HMAC-DRBG state producing nonce candidates for one (key, digest) pair.
///
/// Candidates outside [1, n-1] are skipped by the caller; the state steps
/// on every call so a rejected candidate is never produced twice.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct NonceGenerator {
    k: [u8; 32],
    v: [u8; 32],
}

impl NonceGenerator {
    /// Seed the state from the secret key and message digest, per
    /// RFC 6979 section 3.2 steps b through g.
    pub(crate) fn new(key: &[u8; 32], digest: &[u8; 32]) -> Self {
        // bits2octets(h1): the digest reduced into scalar range.
        let h1 = Scalar::from_be_bytes_reduced(digest).to_be_bytes();

        let mut k = [0u8; 32];
        let mut v = [1u8; 32];

        k = hmac(&k, &[&v, &[0x00], key, &h1]);
        v = hmac(&k, &[&v]);
        k = hmac(&k, &[&v, &[0x01], key, &h1]);
        v = hmac(&k, &[&v]);

        NonceGenerator { k, v }
    }

    /// Produce the next 32-byte candidate. One HMAC block covers the
    /// scalar width, so T is a single V step.
    pub(crate) fn next_candidate(&mut self) -> [u8; 32] {
        self.v = hmac(&self.k, &[&self.v]);
        let candidate = self.v;

        // Step K and V as for a rejected candidate.
        self.k = hmac(&self.k, &[&self.v, &[0x00]]);
        self.v = hmac(&self.k, &[&self.v]);

        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest;

    // RFC 6979 applied to this curve: key 1, message "Satoshi Nakamoto".
    #[test]
    fn test_first_candidate() {
        let mut key = [0u8; 32];
        key[31] = 1;
        let digest: [u8; 32] = Sha256::digest(b"Satoshi Nakamoto").into();

        let mut nonces = NonceGenerator::new(&key, &digest);
        assert_eq!(
            hex::encode(nonces.next_candidate()),
            "8f8a276c19f4149656b280621e358cce24f5f52542772691ee69063b74f15d15"
        );
    }

    #[test]
    fn test_candidates_distinct() {
        let key = [0x42u8; 32];
        let digest = [0x24u8; 32];

        let mut nonces = NonceGenerator::new(&key, &digest);
        let c1 = nonces.next_candidate();
        let c2 = nonces.next_candidate();
        let c3 = nonces.next_candidate();

        assert_ne!(c1, c2);
        assert_ne!(c2, c3);
        assert_ne!(c1, c3);
    }

    #[test]
    fn test_deterministic_per_input() {
        let key = [0x11u8; 32];
        let digest = [0x22u8; 32];

        let mut a = NonceGenerator::new(&key, &digest);
        let mut b = NonceGenerator::new(&key, &digest);
        assert_eq!(a.next_candidate(), b.next_candidate());

        let mut c = NonceGenerator::new(&key, &[0x23u8; 32]);
        assert_ne!(a.next_candidate(), c.next_candidate());
    }
}

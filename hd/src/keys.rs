//! Extended private and public keys with BIP32 child derivation.

use core::fmt;

use curve::{Error, PrivateKey, Projective, PublicKey, Scalar};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::path::{ChildNumber, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

/// Serialization version prefix for mainnet extended private keys.
pub const VERSION_XPRV: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

/// Serialization version prefix for mainnet extended public keys.
pub const VERSION_XPUB: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Size of a serialized extended key in bytes.
pub const XKEY_SIZE: usize = 78;

/// An extended private key: a signing key with a chain code and its
/// position in the derivation tree.
///
/// Secret material (key and chain code) is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Xprv {
    #[zeroize(skip)]
    depth: u8,
    #[zeroize(skip)]
    parent_fingerprint: [u8; 4],
    #[zeroize(skip)]
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key: PrivateKey,
}

/// An extended public key: the public half of an [`Xprv`], supporting
/// derivation of non-hardened children without the private key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Xpub {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key: PublicKey,
}

impl Xprv {
    /// Derive the master key from seed entropy of 16 to 64 bytes.
    ///
    /// Fails with [`Error::Domain`] on a seed of the wrong length, or in
    /// the negligible case that the derived scalar is zero or exceeds
    /// the group order.
    pub fn from_seed(seed: &[u8]) -> Result<Self, Error> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Error::Domain);
        }

        let i = hmac_sha512(b"Bitcoin seed", &[seed]);
        let (il, ir) = split_i(&i);

        let key = PrivateKey::from_be_bytes(&il).map_err(|_| Error::Domain)?;
        Ok(Xprv {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::from_u32(0),
            chain_code: ir,
            key,
        })
    }

    /// Derive one child key.
    ///
    /// Hardened indices commit to the parent private key, normal indices
    /// to the parent public key; hardened children therefore cannot be
    /// derived from the matching [`Xpub`] subtree.
    pub fn derive_child(&self, number: ChildNumber) -> Result<Self, Error> {
        let depth = self.depth.checked_add(1).ok_or(Error::Domain)?;
        let index = number.to_u32().to_be_bytes();

        let i = if number.is_hardened() {
            hmac_sha512(
                &self.chain_code,
                &[&[0x00], &self.key.to_be_bytes(), &index],
            )
        } else {
            hmac_sha512(
                &self.chain_code,
                &[&self.key.public_key().to_compressed(), &index],
            )
        };
        let (il, ir) = split_i(&i);

        // The tweak must be a canonical nonzero result; both failure
        // cases have negligible probability for honest chains.
        let tweak = Scalar::from_be_bytes(&il).ok_or(Error::Domain)?;
        let key = PrivateKey::from_scalar(tweak + self.key.scalar())?;

        Ok(Xprv {
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: number,
            chain_code: ir,
            key,
        })
    }

    /// Derive along a whole path from this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, Error> {
        let mut key = self.clone();
        for &number in path {
            key = key.derive_child(number)?;
        }
        Ok(key)
    }

    /// The matching extended public key.
    pub fn public(&self) -> Xpub {
        Xpub {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            key: self.key.public_key(),
        }
    }

    /// First four bytes of HASH160 of the compressed public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint_of(&self.key.public_key())
    }

    /// Serialize as the 78-byte payload: version, depth, parent
    /// fingerprint, child number, chain code and the zero-padded key.
    pub fn encode(&self) -> [u8; XKEY_SIZE] {
        let mut out = [0u8; XKEY_SIZE];
        out[..4].copy_from_slice(&VERSION_XPRV);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_number.to_u32().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45] = 0x00;
        out[46..].copy_from_slice(&self.key.to_be_bytes());
        out
    }

    /// Parse a 78-byte payload. The version, the zero key padding byte
    /// and the key range are all enforced; a depth-zero key must carry a
    /// zero parent fingerprint and child number.
    pub fn decode(bytes: &[u8; XKEY_SIZE]) -> Result<Self, Error> {
        if bytes[..4] != VERSION_XPRV || bytes[45] != 0x00 {
            return Err(Error::Encoding);
        }

        let (depth, parent_fingerprint, child_number) = decode_position(bytes)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&bytes[13..45]);

        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(&bytes[46..]);
        let key = PrivateKey::from_be_bytes(&key_bytes)?;

        Ok(Xprv {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    /// Depth in the tree; zero for the master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Fingerprint of the parent key; zero for the master key.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Index this key was derived at; zero for the master key.
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// The chain code.
    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The private key at this position.
    pub fn private_key(&self) -> &PrivateKey {
        &self.key
    }
}

// Key and chain code must never reach debug output or logs.
impl fmt::Debug for Xprv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xprv")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

impl Xpub {
    /// Derive one non-hardened child. A hardened index fails with
    /// [`Error::Domain`]: its derivation requires the private key.
    pub fn derive_child(&self, number: ChildNumber) -> Result<Self, Error> {
        if number.is_hardened() {
            return Err(Error::Domain);
        }
        let depth = self.depth.checked_add(1).ok_or(Error::Domain)?;
        let index = number.to_u32().to_be_bytes();

        let i = hmac_sha512(&self.chain_code, &[&self.key.to_compressed(), &index]);
        let (il, ir) = split_i(&i);

        let tweak = Scalar::from_be_bytes(&il).ok_or(Error::Domain)?;
        let point = Projective::mul_generator(&tweak) + Projective::from_affine(&self.key.point());
        let key = PublicKey::from_affine(point.to_affine())?;

        Ok(Xpub {
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: number,
            chain_code: ir,
            key,
        })
    }

    /// Derive along a path of non-hardened indices.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, Error> {
        let mut key = *self;
        for &number in path {
            key = key.derive_child(number)?;
        }
        Ok(key)
    }

    /// First four bytes of HASH160 of the compressed public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint_of(&self.key)
    }

    /// Serialize as the 78-byte payload with the compressed public key.
    pub fn encode(&self) -> [u8; XKEY_SIZE] {
        let mut out = [0u8; XKEY_SIZE];
        out[..4].copy_from_slice(&VERSION_XPUB);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_number.to_u32().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45..].copy_from_slice(&self.key.to_compressed());
        out
    }

    /// Parse a 78-byte payload, enforcing the version and a valid
    /// compressed point.
    pub fn decode(bytes: &[u8; XKEY_SIZE]) -> Result<Self, Error> {
        if bytes[..4] != VERSION_XPUB {
            return Err(Error::Encoding);
        }

        let (depth, parent_fingerprint, child_number) = decode_position(bytes)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&bytes[13..45]);

        let key = PublicKey::from_sec1(&bytes[45..])?;

        Ok(Xpub {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    /// Depth in the tree; zero for the master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Fingerprint of the parent key; zero for the master key.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Index this key was derived at; zero for the master key.
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// The chain code.
    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The public key at this position.
    pub fn public_key(&self) -> PublicKey {
        self.key
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("hmac takes any key length");
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

fn split_i(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

fn fingerprint_of(key: &PublicKey) -> [u8; 4] {
    let sha: [u8; 32] = Sha256::digest(key.to_compressed()).into();
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

// Shared header fields after the version: depth, parent fingerprint and
// child number, with the depth-zero consistency rule.
fn decode_position(bytes: &[u8; XKEY_SIZE]) -> Result<(u8, [u8; 4], ChildNumber), Error> {
    let depth = bytes[4];

    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&bytes[5..9]);

    let raw = u32::from_be_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]);
    let child_number = ChildNumber::from_u32(raw);

    if depth == 0 && (parent_fingerprint != [0u8; 4] || raw != 0) {
        return Err(Error::Encoding);
    }

    Ok((depth, parent_fingerprint, child_number))
}

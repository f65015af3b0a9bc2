//! BIP32 hierarchical deterministic wallets over secp256k1.
//!
//! # Overview
//!
//! An [`Xprv`] extends a private key with a chain code so that a whole
//! tree of keys grows deterministically from one seed. Children are
//! addressed by [`ChildNumber`]: hardened indices commit to the parent
//! private key, normal indices only to its public half, which lets an
//! [`Xpub`] derive the matching public subtree without any secrets.
//!
//! # Example
//!
//! ```
//! use hd::{DerivationPath, Xprv};
//!
//! # fn main() -> Result<(), hd::Error> {
//! let seed: Vec<u8> = (0u8..16).collect();
//! let master = Xprv::from_seed(&seed)?;
//!
//! let path: DerivationPath = "m/0'/1/2'".parse()?;
//! let account = master.derive_path(&path)?;
//! assert_eq!(account.depth(), 3);
//!
//! // A watch-only wallet extends the public subtree on its own.
//! let watch = account.public();
//! assert_eq!(watch, master.derive_path(&path)?.public());
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! An [`Xpub`] combined with any descendant private key reachable over
//! non-hardened steps reveals the parent private key. Hardened
//! derivation breaks that link, so wallet layouts harden every level
//! above the leaf chains.

mod keys;
mod path;

#[cfg(test)]
mod tests;

pub use curve::Error;
pub use keys::{VERSION_XPRV, VERSION_XPUB, XKEY_SIZE, Xprv, Xpub};
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};

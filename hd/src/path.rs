//! Child indices and derivation paths.

use core::fmt;
use core::str::FromStr;

use curve::Error;

/// Offset marking an index as hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A single child index, hardened or normal.
///
/// The raw value carries the hardened flag in its top bit, matching the
/// serialized form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// A normal (non-hardened) index. `index` must be below 2^31.
    pub fn normal(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_OFFSET {
            return Err(Error::Domain);
        }
        Ok(ChildNumber(index))
    }

    /// A hardened index. `index` must be below 2^31.
    pub fn hardened(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_OFFSET {
            return Err(Error::Domain);
        }
        Ok(ChildNumber(index | HARDENED_OFFSET))
    }

    /// Rebuild from the raw serialized value.
    pub fn from_u32(raw: u32) -> Self {
        ChildNumber(raw)
    }

    /// The raw serialized value, hardened flag included.
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Whether this index is hardened.
    pub fn is_hardened(self) -> bool {
        self.0 >= HARDENED_OFFSET
    }

    /// The index without the hardened flag.
    pub fn index(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        // Leading '+' and extra characters are rejected by u32 parsing;
        // the range check lives in the constructors.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Encoding);
        }
        let index: u32 = digits.parse().map_err(|_| Error::Encoding)?;

        if hardened {
            ChildNumber::hardened(index)
        } else {
            ChildNumber::normal(index)
        }
    }
}

/// A derivation path: a sequence of child indices starting at the master
/// key, written `m/0'/1/2'`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path, designating the master key itself.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// Build from explicit indices.
    pub fn from_children(children: Vec<ChildNumber>) -> Self {
        DerivationPath(children)
    }

    /// The indices in derivation order.
    pub fn children(&self) -> &[ChildNumber] {
        &self.0
    }

    /// Extend with one more index.
    pub fn child(&self, number: ChildNumber) -> Self {
        let mut children = self.0.clone();
        children.push(number);
        DerivationPath(children)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(Error::Encoding);
        }

        let children = parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DerivationPath(children))
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = core::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//! Base field of the curve.
//! p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
//!
//! This is the coordinate field of secp256k1, p = 2^256 - 2^32 - 977.

use crate::modint::ModInt256;

/// Element of GF(p), the secp256k1 coordinate field.
pub type FieldElement = ModInt256<
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
>;

// (p + 1) / 4; p = 3 mod 4, so c^((p+1)/4) is a square root of c whenever
// c is a quadratic residue.
const SQRT_EXP: [u64; 4] = [
    0xFFFFFFFFBFFFFF0C,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x3FFFFFFFFFFFFFFF,
];

impl FieldElement {
    /// Square root, or `None` if the value is not a quadratic residue.
    ///
    /// The returned root is the even one; the odd root is its negation.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow_vartime(&SQRT_EXP);
        if root.square() != *self {
            return None;
        }
        // Normalize to the even root
        let odd = (root.is_odd() as u64).wrapping_neg();
        Some(Self::select(&root, &-root, odd))
    }
}

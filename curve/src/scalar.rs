//! Scalar field of the curve.
//! n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!
//! Scalars are integers modulo the prime group order n. Multiples of the
//! generator and signature components all live here.

use crate::group::ScalarBits;
use crate::modint::{borrowing_sub, ModInt256};

/// Element of Z/nZ, where n is the secp256k1 group order.
pub type Scalar = ModInt256<
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
>;

// (n - 1) / 2, the largest scalar still counted as "low".
const HALF_ORDER: [u64; 4] = [
    0xDFE92F46681B20A0,
    0x5D576E7357A4501D,
    0xFFFFFFFFFFFFFFFF,
    0x7FFFFFFFFFFFFFFF,
];

impl Scalar {
    /// Whether the canonical value exceeds (n - 1) / 2.
    ///
    /// Both s and n - s satisfy an ECDSA verification equation; signers
    /// emit the low of the two. Computed without data-dependent branches.
    pub fn is_high(&self) -> bool {
        let v = self.to_canonical_limbs();
        // v > (n - 1) / 2 exactly when the subtraction below borrows
        let (_, borrow) = borrowing_sub(HALF_ORDER[0], v[0], false);
        let (_, borrow) = borrowing_sub(HALF_ORDER[1], v[1], borrow);
        let (_, borrow) = borrowing_sub(HALF_ORDER[2], v[2], borrow);
        let (_, borrow) = borrowing_sub(HALF_ORDER[3], v[3], borrow);
        borrow
    }

    /// Replace with n - self when the canonical value is high, leaving low
    /// values untouched. Branch-free.
    pub fn normalize_low(&self) -> Self {
        let mask = (self.is_high() as u64).wrapping_neg();
        Self::select(self, &-*self, mask)
    }
}

impl ScalarBits for Scalar {
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_limbs()
    }
}

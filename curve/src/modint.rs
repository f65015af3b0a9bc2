//! Generic 256-bit integers modulo a fixed odd modulus, in Montgomery form.
//!
//! The modulus is given as four little-endian 64-bit limbs through const
//! generics, so the Montgomery parameters (R, R^2 and -m^-1 mod 2^64) are
//! computed at compile time. The modulus must be odd and have its top bit
//! set; with m > 2^255 every 256-bit value is below 2m and a single
//! conditional subtraction canonicalizes any sum or decoded input.
//!
//! Arithmetic on secret values avoids data-dependent branches: conditional
//! subtractions and copies are done with all-zero/all-one masks.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use zeroize::Zeroize;

/// Element of Z/mZ for the modulus m encoded in `M0..M3` (little-endian limbs).
/// Represented in Montgomery form: value * R mod m, where R = 2^256.
#[derive(Copy, Clone, Default)]
pub struct ModInt256<const M0: u64, const M1: u64, const M2: u64, const M3: u64> {
    limbs: [u64; 4],
}

/// Helper: Carrying addition
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Helper: Borrowing subtraction
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> ModInt256<M0, M1, M2, M3> {
    /// The modulus m as little-endian limbs.
    pub const MODULUS: [u64; 4] = [M0, M1, M2, M3];

    // -m^{-1} mod 2^64 (Montgomery parameter mu)
    const MU: u64 = Self::mont_reciprocal();

    // R = 2^256 mod m (Montgomery parameter)
    const R: [u64; 4] = Self::mont_r();

    // R^2 = 2^512 mod m (for Montgomery conversion)
    const R2: [u64; 4] = Self::mont_r2();

    // m - 2, the Fermat inversion exponent
    const EXP_INVERT: [u64; 4] = Self::modulus_minus_2();

    /// Zero element (in Montgomery form)
    pub const ZERO: Self = ModInt256 {
        limbs: [0, 0, 0, 0],
    };

    /// One element (in Montgomery form: R mod m)
    pub const ONE: Self = ModInt256 { limbs: Self::R };

    // Newton's iteration on m0^-1 mod 2^64; each round doubles the bits of
    // precision, and the starting value is already exact mod 2^3.
    const fn mont_reciprocal() -> u64 {
        let mut x = M0;
        let mut i = 0;
        while i < 6 {
            x = x.wrapping_mul(2u64.wrapping_sub(M0.wrapping_mul(x)));
            i += 1;
        }
        x.wrapping_neg()
    }

    // 2^256 mod m. The top bit of m is set, so this is exactly 2^256 - m.
    const fn mont_r() -> [u64; 4] {
        let (r0, borrow) = borrowing_sub(0, M0, false);
        let (r1, borrow) = borrowing_sub(0, M1, borrow);
        let (r2, borrow) = borrowing_sub(0, M2, borrow);
        let (r3, _) = borrowing_sub(0, M3, borrow);
        [r0, r1, r2, r3]
    }

    // 2^512 mod m, by doubling R 256 times.
    const fn mont_r2() -> [u64; 4] {
        let mut acc = Self::R;
        let mut i = 0;
        while i < 256 {
            acc = Self::add_mod(acc, acc);
            i += 1;
        }
        acc
    }

    const fn modulus_minus_2() -> [u64; 4] {
        let (e0, borrow) = borrowing_sub(M0, 2, false);
        let (e1, borrow) = borrowing_sub(M1, 0, borrow);
        let (e2, borrow) = borrowing_sub(M2, 0, borrow);
        let (e3, _) = borrowing_sub(M3, 0, borrow);
        [e0, e1, e2, e3]
    }

    /// Create an element from a canonical u64 value
    #[inline]
    pub const fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    /// Create an element from canonical little-endian limbs. The limbs must
    /// already be below the modulus.
    #[inline]
    pub const fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        // Convert to Montgomery form: val * R^2 * R^{-1} = val * R
        ModInt256 {
            limbs: Self::montgomery_mul(limbs, Self::R2),
        }
    }

    /// Convert from Montgomery form to canonical little-endian limbs
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        // Multiply by 1 to get out of Montgomery form
        Self::montgomery_mul(self.limbs, [1, 0, 0, 0])
    }

    /// Helper: Add two 256-bit numbers mod m
    #[inline]
    const fn add_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
        let (r0, carry) = a[0].overflowing_add(b[0]);
        let (r1, carry) = carrying_add(a[1], b[1], carry);
        let (r2, carry) = carrying_add(a[2], b[2], carry);
        let (r3, carry) = carrying_add(a[3], b[3], carry);

        let (s0, borrow) = r0.overflowing_sub(M0);
        let (s1, borrow) = borrowing_sub(r1, M1, borrow);
        let (s2, borrow) = borrowing_sub(r2, M2, borrow);
        let (s3, borrow) = borrowing_sub(r3, M3, borrow);

        // Keep the subtracted value if the sum overflowed or reached m
        let mask = ((carry as u64) | (!borrow as u64)).wrapping_neg();
        [
            s0 ^ (!mask & (s0 ^ r0)),
            s1 ^ (!mask & (s1 ^ r1)),
            s2 ^ (!mask & (s2 ^ r2)),
            s3 ^ (!mask & (s3 ^ r3)),
        ]
    }

    /// Helper: Subtract two 256-bit numbers mod m
    #[inline]
    const fn sub_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
        let (r0, borrow) = a[0].overflowing_sub(b[0]);
        let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
        let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
        let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

        // Add m back if the subtraction underflowed
        let mask = (borrow as u64).wrapping_neg();
        let (s0, carry) = r0.overflowing_add(M0 & mask);
        let (s1, carry) = carrying_add(r1, M1 & mask, carry);
        let (s2, carry) = carrying_add(r2, M2 & mask, carry);
        let (s3, _) = carrying_add(r3, M3 & mask, carry);
        [s0, s1, s2, s3]
    }

    /// Helper: Negate a 256-bit number mod m
    #[inline]
    const fn neg_mod(a: [u64; 4]) -> [u64; 4] {
        // 0 - a underflows for any nonzero a, which folds the modulus back
        // in; zero stays zero without a special case.
        Self::sub_mod([0, 0, 0, 0], a)
    }

    #[inline]
    const fn is_canonical(limbs: [u64; 4]) -> bool {
        let (_, borrow) = limbs[0].overflowing_sub(M0);
        let (_, borrow) = borrowing_sub(limbs[1], M1, borrow);
        let (_, borrow) = borrowing_sub(limbs[2], M2, borrow);
        let (_, borrow) = borrowing_sub(limbs[3], M3, borrow);
        borrow
    }

    /// Montgomery multiplication: (a * b * R^{-1}) mod m
    const fn montgomery_mul(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
        // Compute a * b
        let mut t = [0u64; 8];

        let mut i = 0;
        while i < 4 {
            let mut carry = 0u128;
            let mut j = 0;
            while j < 4 {
                let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
                t[i + j] = product as u64;
                carry = product >> 64;
                j += 1;
            }
            t[i + 4] = carry as u64;
            i += 1;
        }

        // Montgomery reduction. The intermediate value can exceed 2^512, so
        // carries past t[7] accumulate in an extra top word.
        let mut extra = 0u64;
        let mut i = 0;
        while i < 4 {
            let k = t[i].wrapping_mul(Self::MU);
            let mut carry = 0u128;

            let mut j = 0;
            while j < 4 {
                let product = (k as u128) * (Self::MODULUS[j] as u128) + (t[i + j] as u128) + carry;
                t[i + j] = product as u64;
                carry = product >> 64;
                j += 1;
            }

            let mut j = i + 4;
            while j < 8 {
                let sum = (t[j] as u128) + carry;
                t[j] = sum as u64;
                carry = sum >> 64;
                j += 1;
            }
            extra += carry as u64;
            i += 1;
        }

        // Extract the high half; it is below 2m (counting the extra bit),
        // so one conditional subtraction canonicalizes it.
        let r = [t[4], t[5], t[6], t[7]];

        let (s0, borrow) = r[0].overflowing_sub(M0);
        let (s1, borrow) = borrowing_sub(r[1], M1, borrow);
        let (s2, borrow) = borrowing_sub(r[2], M2, borrow);
        let (s3, borrow) = borrowing_sub(r[3], M3, borrow);

        let mask = (extra | (!borrow as u64)).wrapping_neg();
        [
            s0 ^ (!mask & (s0 ^ r[0])),
            s1 ^ (!mask & (s1 ^ r[1])),
            s2 ^ (!mask & (s2 ^ r[2])),
            s3 ^ (!mask & (s3 ^ r[3])),
        ]
    }

    /// Squaring: self * self
    #[inline]
    pub fn square(&self) -> Self {
        ModInt256 {
            limbs: Self::montgomery_mul(self.limbs, self.limbs),
        }
    }

    /// Exponentiation by a fixed 256-bit exponent (little-endian limbs).
    ///
    /// Variable-time in the exponent only; exponents used in this crate are
    /// public constants.
    pub fn pow_vartime(&self, exp: &[u64; 4]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp.iter() {
            let mut bits = limb;
            for _ in 0..64 {
                if bits & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                bits >>= 1;
            }
        }

        result
    }

    /// Multiplicative inverse, or `None` for zero.
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.pow_vartime(&Self::EXP_INVERT))
        }
    }

    /// Multiplicative inverse with 0 mapped to 0. Used where the caller has
    /// already excluded zero or treats the zero result as a flag.
    #[inline]
    pub(crate) fn invert_or_zero(&self) -> Self {
        self.pow_vartime(&Self::EXP_INVERT)
    }

    /// Check for zero. Constant-time.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.equals(&Self::ZERO) != 0
    }

    /// Parity of the canonical value.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.to_canonical_limbs()[0] & 1 == 1
    }

    /// Constant-time equality: 0xFFFF..FF if equal, 0 otherwise.
    #[inline]
    pub fn equals(&self, rhs: &Self) -> u64 {
        let x = (self.limbs[0] ^ rhs.limbs[0])
            | (self.limbs[1] ^ rhs.limbs[1])
            | (self.limbs[2] ^ rhs.limbs[2])
            | (self.limbs[3] ^ rhs.limbs[3]);
        ((x | x.wrapping_neg()) >> 63).wrapping_sub(1)
    }

    /// Conditionally copy `rhs` into `self`. `ctl` must be 0 (keep `self`)
    /// or 0xFFFF..FF (copy `rhs`).
    #[inline]
    pub fn set_cond(&mut self, rhs: &Self, ctl: u64) {
        for i in 0..4 {
            self.limbs[i] ^= ctl & (self.limbs[i] ^ rhs.limbs[i]);
        }
    }

    /// Return `a0` if `ctl` is 0, `a1` if `ctl` is 0xFFFF..FF.
    #[inline]
    pub fn select(a0: &Self, a1: &Self, ctl: u64) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Conditionally swap `a` and `b`. `ctl` must be 0 or 0xFFFF..FF.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u64) {
        for i in 0..4 {
            let t = ctl & (a.limbs[i] ^ b.limbs[i]);
            a.limbs[i] ^= t;
            b.limbs[i] ^= t;
        }
    }

    /// Decode 32 big-endian bytes; fails if the value is not below the
    /// modulus.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let limbs = limbs_from_be(bytes);
        if Self::is_canonical(limbs) {
            Some(Self::from_canonical_limbs(limbs))
        } else {
            None
        }
    }

    /// Decode 32 big-endian bytes, reducing modulo m. Since m > 2^255 the
    /// raw value is below 2m and one conditional subtraction reduces it.
    pub fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        let limbs = limbs_from_be(bytes);
        Self::from_canonical_limbs(Self::sub_mod(limbs, Self::MODULUS))
    }

    /// Encode the canonical value as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let canonical = self.to_canonical_limbs();
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[8 * i..8 * i + 8].copy_from_slice(&canonical[3 - i].to_be_bytes());
        }
        bytes
    }
}

#[inline]
fn limbs_from_be(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for i in 0..4 {
        let mut limb = 0u64;
        for j in 0..8 {
            limb = (limb << 8) | bytes[8 * i + j] as u64;
        }
        limbs[3 - i] = limb;
    }
    limbs
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> PartialEq
    for ModInt256<M0, M1, M2, M3>
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other) != 0
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Eq for ModInt256<M0, M1, M2, M3> {}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Add for ModInt256<M0, M1, M2, M3> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ModInt256 {
            limbs: Self::add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> AddAssign
    for ModInt256<M0, M1, M2, M3>
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Sub for ModInt256<M0, M1, M2, M3> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ModInt256 {
            limbs: Self::sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> SubAssign
    for ModInt256<M0, M1, M2, M3>
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Neg for ModInt256<M0, M1, M2, M3> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ModInt256 {
            limbs: Self::neg_mod(self.limbs),
        }
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Mul for ModInt256<M0, M1, M2, M3> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        ModInt256 {
            limbs: Self::montgomery_mul(self.limbs, rhs.limbs),
        }
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> MulAssign
    for ModInt256<M0, M1, M2, M3>
{
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Sum for ModInt256<M0, M1, M2, M3> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Product
    for ModInt256<M0, M1, M2, M3>
{
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Distribution<ModInt256<M0, M1, M2, M3>>
    for StandardUniform
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ModInt256<M0, M1, M2, M3> {
        // Rejection sampling; with the top bit of m set, each draw is
        // accepted with probability above 1/2.
        loop {
            let limbs: [u64; 4] = rng.random();
            if ModInt256::<M0, M1, M2, M3>::is_canonical(limbs) {
                return ModInt256::from_canonical_limbs(limbs);
            }
        }
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Display
    for ModInt256<M0, M1, M2, M3>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Debug
    for ModInt256<M0, M1, M2, M3>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ModInt256({})", self)
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Hash
    for ModInt256<M0, M1, M2, M3>
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Zeroize
    for ModInt256<M0, M1, M2, M3>
{
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

use crate::affine::Affine;
use crate::field::FieldElement;
use crate::msm::double_scalar_mul_basepoint;
use crate::scalar::Scalar;
use crate::{Group, ScalarBits};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Projective point on the elliptic curve.
/// Represents a point in homogeneous coordinates (X:Y:Z) where
/// (x,y) = (X/Z, Y/Z). The point at infinity is represented as (0:1:0).
///
/// Addition and doubling use the complete formulas of
/// Renes-Costello-Batina 2016 (https://eprint.iacr.org/2015/1060),
/// specialized to a = 0. They hold for every pair of group elements,
/// including the identity and P + P, so scalar multiplication needs no
/// data-dependent special cases.
#[derive(Copy, Clone, Debug)]
pub struct Projective {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

// All-zero/all-one mask for a == b, for table indices.
#[inline]
fn u64_eq_mask(a: u64, b: u64) -> u64 {
    let x = a ^ b;
    ((x | x.wrapping_neg()) >> 63).wrapping_sub(1)
}

impl Projective {
    // 3 * b for the curve equation y^2 = x^3 + 7, used by the complete
    // addition formulas.
    const B3: FieldElement = FieldElement::from_canonical_u64(21);

    // b itself, for the projective curve equation check.
    const B: FieldElement = FieldElement::from_canonical_u64(7);

    /// The point at infinity (identity element): (0:1:0)
    pub const INFINITY: Self = Projective {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// The standard generator point.
    pub const GENERATOR: Self = Projective {
        x: Affine::GENERATOR.x,
        y: Affine::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Create a new projective point.
    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        Projective { x, y, z }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Affine {
        // 1/Z maps to 0 for the point at infinity, which zeroes both
        // coordinates; only the infinity flag depends on Z.
        let z_inv = self.z.invert_or_zero();
        Affine {
            x: self.x * z_inv,
            y: self.y * z_inv,
            is_infinity: self.z.is_zero(),
        }
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::INFINITY;
        }

        Projective::new(point.x, point.y, FieldElement::ONE)
    }

    /// Check if a point is on the curve: Y^2*Z = X^3 + b*Z^3.
    pub fn is_on_curve(&self) -> bool {
        let y2z = self.y * self.y * self.z;
        let x3 = self.x * self.x * self.x;
        let z2 = self.z * self.z;
        let z3 = z2 * self.z;

        y2z == x3 + Self::B * z3
    }

    /// Complete point addition.
    pub fn add(&self, rhs: &Self) -> Self {
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2, z2) = (&rhs.x, &rhs.y, &rhs.z);

        // Renes-Costello-Batina algorithm 7 (a = 0, b3 = 3*b)
        let x1x2 = *x1 * *x2;
        let y1y2 = *y1 * *y2;
        let z1z2 = *z1 * *z2;
        let c = (*x1 + *y1) * (*x2 + *y2) - x1x2 - y1y2; // X1*Y2 + X2*Y1
        let d = (*y1 + *z1) * (*y2 + *z2) - y1y2 - z1z2; // Y1*Z2 + Y2*Z1
        let e = (*x1 + *z1) * (*x2 + *z2) - x1x2 - z1z2; // X1*Z2 + X2*Z1
        let f = x1x2 + x1x2 + x1x2;
        let g = Self::B3 * z1z2;
        let h = y1y2 + g;
        let i = y1y2 - g;
        let j = Self::B3 * e;

        Projective {
            x: c * i - d * j,
            y: j * f + i * h,
            z: h * d + f * c,
        }
    }

    /// Complete point doubling: 2*P.
    pub fn double(&self) -> Self {
        let (x, y, z) = (&self.x, &self.y, &self.z);

        // Renes-Costello-Batina algorithm 9 (a = 0, b3 = 3*b)
        let yy = y.square();
        let yy2 = yy + yy;
        let yy4 = yy2 + yy2;
        let yy8 = yy4 + yy4;
        let c = Self::B3 * z.square();
        let d = yy - (c + c + c);
        let xy = *x * *y;
        let dxy = d * xy;

        Projective {
            x: dxy + dxy,
            y: d * (yy + c) + c * yy8,
            z: *y * *z * yy8,
        }
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Conditionally copy `rhs` into `self`. `ctl` must be 0 or 0xFFFF..FF.
    #[inline]
    pub fn set_cond(&mut self, rhs: &Self, ctl: u64) {
        self.x.set_cond(&rhs.x, ctl);
        self.y.set_cond(&rhs.y, ctl);
        self.z.set_cond(&rhs.z, ctl);
    }

    /// Return `p0` if `ctl` is 0, `p1` if `ctl` is 0xFFFF..FF.
    #[inline]
    pub fn select(p0: &Self, p1: &Self, ctl: u64) -> Self {
        let mut p = *p0;
        p.set_cond(p1, ctl);
        p
    }

    /// Multiply this point by a scalar without data-dependent branches or
    /// table indexing. This is the path for secret scalars.
    ///
    /// Processes the scalar in fixed 4-bit windows from the top; each window
    /// scans the whole precomputed table with masked copies.
    pub fn scalar_mul_ct(&self, scalar: &Scalar) -> Self {
        let mut table = [Self::INFINITY; 16];
        table[1] = *self;
        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                Projective::add(&table[i - 1], &table[1])
            };
        }

        let limbs = scalar.to_u64_limbs();
        let mut result = Self::INFINITY;

        for window in (0..64).rev() {
            result = result.double();
            result = result.double();
            result = result.double();
            result = result.double();

            let digit = (limbs[window / 16] >> (4 * (window % 16))) & 0xF;
            let mut entry = Self::INFINITY;
            for (j, t) in table.iter().enumerate() {
                entry.set_cond(t, u64_eq_mask(j as u64, digit));
            }
            result = Projective::add(&result, &entry);
        }

        result
    }

    /// Multiply the fixed generator by a scalar, in constant time.
    pub fn mul_generator(scalar: &Scalar) -> Self {
        Self::GENERATOR.scalar_mul_ct(scalar)
    }

    /// Compute a * G + b * P, where G is the fixed generator.
    ///
    /// Variable-time; inputs must be public.
    pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Self) -> Self {
        double_scalar_mul_basepoint(a, b, point)
    }
}

impl Group for Projective {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn mul_generator(scalar: &Scalar) -> Self {
        Projective::mul_generator(scalar)
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

// Two triplets are equal when their affine images match; cross-multiplying
// avoids the inversions. All (X:Y:0) triplets are the identity.
impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl Eq for Projective {}

// Implement addition for projective points
impl Add for Projective {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Projective::add(&self, &other)
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Projective> for Scalar {
    type Output = Projective;

    fn mul(self, point: Projective) -> Projective {
        <Projective as Group>::scalar_mul(&point, &self)
    }
}

impl Mul<&Projective> for Scalar {
    type Output = Projective;

    fn mul(self, point: &Projective) -> Projective {
        <Projective as Group>::scalar_mul(point, &self)
    }
}

// Conversions
impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Affine {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}

impl From<&Projective> for Affine {
    fn from(point: &Projective) -> Self {
        point.to_affine()
    }
}

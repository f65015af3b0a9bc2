// E : y^2 = x^3 + 7 over GF(p), p = 2^256 - 2^32 - 977
// E generator point: (0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798 :
//                     0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8 : 1)
// Curve prime order: 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141 (256 bits)
// Curve cofactor: 1

use crate::error::Error;
use crate::field::FieldElement;
use crate::msm::double_scalar_mul_basepoint;
use crate::projective::Projective;
use crate::scalar::Scalar;
use crate::Group;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: FieldElement,
    /// The y-coordinate of the point
    pub y: FieldElement,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    // Curve equation: y^2 = x^3 + b with a = 0, b = 7
    const B: FieldElement = FieldElement::from_canonical_u64(7);

    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        is_infinity: true,
    };

    /// The standard generator point.
    pub const GENERATOR: Self = Affine {
        x: FieldElement::from_canonical_limbs([
            0x59F2815B16F81798,
            0x029BFCDB2DCE28D9,
            0x55A06295CE870B07,
            0x79BE667EF9DCBBAC,
        ]),
        y: FieldElement::from_canonical_limbs([
            0x9C47D08FFB10D4B8,
            0xFD17B448A6855419,
            0x5DA4FBFC0E1108A8,
            0x483ADA7726A3C465,
        ]),
        is_infinity: false,
    };

    /// Create a new affine point from raw coordinates, without checking the
    /// curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + b.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        let y2 = self.y * self.y;
        let x2 = self.x * self.x;
        let x3 = x2 * self.x;
        let rhs = x3 + Self::B;

        y2 == rhs
    }

    /// The curve point with the given x-coordinate and even y, or `None` if
    /// x^3 + b is not a square.
    pub fn lift_x(x: FieldElement) -> Option<Self> {
        let rhs = x.square() * x + Self::B;
        let y = rhs.sqrt()?;
        Some(Affine::new(x, y))
    }

    /// Decode a point from its serialized form.
    ///
    /// Accepts the 33-byte compressed encoding (prefix 0x02 or 0x03), the
    /// 65-byte uncompressed encoding (prefix 0x04), and the single byte
    /// 0x00 for the point at infinity. Coordinates must be canonical and
    /// satisfy the curve equation.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        match bytes.len() {
            1 => {
                if bytes[0] == 0x00 {
                    Ok(Self::INFINITY)
                } else {
                    Err(Error::Encoding)
                }
            }
            33 => {
                let want_odd = match bytes[0] {
                    0x02 => false,
                    0x03 => true,
                    _ => return Err(Error::Encoding),
                };
                let mut xb = [0u8; 32];
                xb.copy_from_slice(&bytes[1..]);
                let x = FieldElement::from_be_bytes(&xb).ok_or(Error::Encoding)?;
                let point = Self::lift_x(x).ok_or(Error::Encoding)?;
                if point.y.is_odd() == want_odd {
                    Ok(point)
                } else {
                    Ok(point.negate())
                }
            }
            65 => {
                if bytes[0] != 0x04 {
                    return Err(Error::Encoding);
                }
                let mut xb = [0u8; 32];
                let mut yb = [0u8; 32];
                xb.copy_from_slice(&bytes[1..33]);
                yb.copy_from_slice(&bytes[33..65]);
                let x = FieldElement::from_be_bytes(&xb).ok_or(Error::Encoding)?;
                let y = FieldElement::from_be_bytes(&yb).ok_or(Error::Encoding)?;
                let point = Affine::new(x, y);
                if point.is_on_curve() {
                    Ok(point)
                } else {
                    Err(Error::Encoding)
                }
            }
            _ => Err(Error::Encoding),
        }
    }

    /// Decode a point from a 32-byte x-only encoding, taking the solution
    /// with even y.
    pub fn decode_x_only(bytes: &[u8; 32]) -> Result<Self, Error> {
        let x = FieldElement::from_be_bytes(bytes).ok_or(Error::Encoding)?;
        Self::lift_x(x).ok_or(Error::Encoding)
    }

    /// Compressed 33-byte encoding. The point at infinity has no compressed
    /// form.
    pub fn encode_compressed(&self) -> Result<[u8; 33], Error> {
        if self.is_infinity {
            return Err(Error::Domain);
        }
        let mut out = [0u8; 33];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_be_bytes());
        Ok(out)
    }

    /// Uncompressed 65-byte encoding. The point at infinity has no
    /// uncompressed form.
    pub fn encode_uncompressed(&self) -> Result<[u8; 65], Error> {
        if self.is_infinity {
            return Err(Error::Domain);
        }
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_be_bytes());
        out[33..65].copy_from_slice(&self.y.to_be_bytes());
        Ok(out)
    }

    /// X-only 32-byte encoding, dropping the y parity.
    pub fn encode_x_only(&self) -> Result<[u8; 32], Error> {
        if self.is_infinity {
            return Err(Error::Domain);
        }
        Ok(self.x.to_be_bytes())
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return *self;
        }

        // If y = 0, then 2P = O
        if self.y.is_zero() {
            return Self::INFINITY;
        }

        // Compute slope: λ = 3x^2 / (2y)
        let x2 = self.x * self.x;
        let numerator = x2 + x2 + x2;
        let denominator = self.y + self.y;
        let lambda = numerator * denominator.invert_or_zero();

        // x_r = λ^2 - 2x
        let lambda2 = lambda * lambda;
        let x_r = lambda2 - self.x - self.x;

        // y_r = λ(x - x_r) - y
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }

    /// Multiply the fixed generator by a scalar, in constant time.
    pub fn mul_generator(scalar: &Scalar) -> Self {
        Projective::mul_generator(scalar).to_affine()
    }

    /// Multiply this point by a scalar without data-dependent branches or
    /// lookups. This is the path for secret scalars.
    pub fn scalar_mul_ct(&self, scalar: &Scalar) -> Self {
        Projective::from_affine(self).scalar_mul_ct(scalar).to_affine()
    }

    /// Compute a * G + b * P, where G is the fixed generator.
    ///
    /// Variable-time; inputs must be public.
    pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Self) -> Self {
        double_scalar_mul_basepoint(a, b, &Projective::from_affine(point)).to_affine()
    }
}

impl Group for Affine {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn mul_generator(scalar: &Scalar) -> Self {
        Affine::mul_generator(scalar)
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

// Implement addition for affine points
impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Handle infinity cases
        if self.is_infinity {
            return other;
        }
        if other.is_infinity {
            return self;
        }

        // Check if points are the same
        if self.x == other.x {
            if self.y == other.y {
                // Point doubling
                return self.double();
            } else {
                // Points are inverses, return infinity
                return Self::INFINITY;
            }
        }

        // Regular point addition
        // λ = (y2 - y1) / (x2 - x1)
        let numerator = other.y - self.y;
        let denominator = other.x - self.x;
        let lambda = numerator * denominator.invert_or_zero();

        // x_r = λ^2 - x1 - x2
        let lambda2 = lambda * lambda;
        let x_r = lambda2 - self.x - other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for Scalar {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

impl Mul<&Affine> for Scalar {
    type Output = Affine;

    fn mul(self, point: &Affine) -> Affine {
        <Affine as Group>::scalar_mul(point, &self)
    }
}

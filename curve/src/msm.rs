use crate::group::ScalarBits;
use crate::projective::Projective;
use crate::scalar::Scalar;

/// Compute a * G + b * P with interleaved 4-bit windows, sharing one
/// doubling chain between the two scalars.
///
/// Variable-time; inputs must be public. Signature verification is the
/// intended caller.
pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Projective) -> Projective {
    let base_table = window_table(&Projective::GENERATOR);
    let point_table = window_table(point);

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = Projective::INFINITY;

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).step_by(4).rev() {
            result = result.double();
            result = result.double();
            result = result.double();
            result = result.double();

            let a_window = ((a_limb >> shift) & 0xF) as usize;
            if a_window != 0 {
                result = result.add(&base_table[a_window]);
            }

            let b_window = ((b_limb >> shift) & 0xF) as usize;
            if b_window != 0 {
                result = result.add(&point_table[b_window]);
            }
        }
    }

    result
}

// table[i] = i * P for i in 0..16.
fn window_table(point: &Projective) -> [Projective; 16] {
    let mut table = [Projective::INFINITY; 16];
    table[1] = *point;
    for i in 2..16 {
        table[i] = if i % 2 == 0 {
            table[i / 2].double()
        } else {
            table[i - 1].add(&table[1])
        };
    }
    table
}

use num_bigint::BigUint;
use num_traits::Zero;

/// Reduces `value` into `[0, modulus)`.
pub fn reduce(value: &BigUint, modulus: &BigUint) -> BigUint {
    if value < modulus {
        return value.clone();
    }
    value % modulus
}

/// Computes `(a - b) mod modulus` without leaving the unsigned domain.
pub fn sub_mod(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    let a = reduce(a, modulus);
    let b = reduce(b, modulus);
    if a >= b {
        a - b
    } else {
        modulus - (b - a)
    }
}

/// Computes `(a * b) mod modulus`.
pub fn mul_mod(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    (a * b) % modulus
}

/// Inverts `value` modulo `modulus`, or `None` when they are not coprime.
pub fn inverse_mod(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }
    reduce(value, modulus).modinv(modulus)
}

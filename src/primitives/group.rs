use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::field::inverse_mod;
use crate::{Error, Result};

/// Public parameters of a prime-order subgroup of `Z_p*`.
///
/// `p` is the group modulus and `q` the subgroup order (the exponent ring
/// modulus). Both are supplied by the caller and shared read-only by every
/// prover and verifier; no primality or subgroup checks are performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupParameters {
    p: BigUint,
    q: BigUint,
}

impl GroupParameters {
    /// Creates group parameters from the modulus `p` and subgroup order `q`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use num_bigint::BigUint;
    /// use sigma_zkp::GroupParameters;
    ///
    /// let group = GroupParameters::new(BigUint::from(127u32), BigUint::from(7u32)).unwrap();
    /// assert_eq!(group.q(), &BigUint::from(7u32));
    /// ```
    pub fn new(p: BigUint, q: BigUint) -> Result<Self> {
        if p <= BigUint::one() {
            return Err(Error::InvalidParams(
                "group modulus must be greater than one".to_string(),
            ));
        }
        if q.is_zero() {
            return Err(Error::InvalidParams(
                "subgroup order cannot be zero".to_string(),
            ));
        }
        Ok(Self { p, q })
    }

    /// The group modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// `base^exponent mod p`.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.p)
    }

    /// `a * b mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// Product of `base_i^exponent_i mod p` over all pairs.
    pub fn multi_pow<'a, I>(&self, terms: I) -> BigUint
    where
        I: IntoIterator<Item = (&'a BigUint, &'a BigUint)>,
    {
        terms
            .into_iter()
            .fold(BigUint::one(), |acc, (base, exponent)| {
                self.mul(&acc, &self.pow(base, exponent))
            })
    }

    /// Inverse of a group element modulo `p`.
    pub fn inverse(&self, element: &BigUint) -> Option<BigUint> {
        inverse_mod(element, &self.p)
    }

    /// Whether `element` lies in the order-`q` subgroup.
    pub fn contains(&self, element: &BigUint) -> bool {
        if element.is_zero() || *element >= self.p {
            return false;
        }
        self.pow(element, &self.q).is_one()
    }
}

//! The exponent unit: one secret in `Z_q` together with its per-round blinding.
//!
//! Every concrete protocol is built from these units. A round is always
//! `commit` (fresh blinding `k`) → external challenge `c` → `prove`
//! (`s = k - c*x mod q`, consuming `k`). Answering two different challenges
//! with the same `k` reveals `x = (s1 - s2) / (c2 - c1)`, so the nonce is
//! taken out of the unit the moment it is used.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

use super::field::{inverse_mod, mul_mod, reduce, sub_mod};
use super::rng::random_below;
use crate::{Error, Result};

/// Secret blinding value drawn by [`Zr::commit`].
///
/// Single use: [`Zr::prove`] takes it out of the unit. Not `Clone`, and never
/// handed out of this module.
struct Nonce {
    k: BigUint,
}

impl Nonce {
    fn new(k: BigUint) -> Self {
        Self { k }
    }
}

/// An element of the exponent ring `Z_q` holding a prover secret.
///
/// Cloning copies the secret but never the blinding of an outstanding round;
/// the clone starts uncommitted.
pub struct Zr {
    value: BigUint,
    modulus: BigUint,
    blinding: Option<Nonce>,
}

impl Zr {
    /// Creates a unit for `value` in `Z_modulus`.
    ///
    /// The value must already lie in `[0, modulus)`.
    pub fn new(value: BigUint, modulus: BigUint) -> Result<Self> {
        if modulus.is_zero() {
            return Err(Error::InvalidParams("modulus cannot be zero".to_string()));
        }
        if value >= modulus {
            return Err(Error::InvalidScalar(
                "Exponent must be less than the group order".to_string(),
            ));
        }
        Ok(Self {
            value,
            modulus,
            blinding: None,
        })
    }

    /// Draws a uniformly random unit in `Z_modulus`.
    pub fn random(rng: &mut dyn CryptoRngCore, modulus: BigUint) -> Result<Self> {
        let value = random_below(rng, &modulus)?;
        Self::new(value, modulus)
    }

    /// Returns the secret value.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Returns the ring modulus `q`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Big-endian bytes of the secret value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Whether a blinding is currently held for an outstanding round.
    pub fn is_committed(&self) -> bool {
        self.blinding.is_some()
    }

    /// Starts a new round: discards any held blinding and draws a fresh one.
    ///
    /// Returns the blinding exponent `k`, from which the caller forms its
    /// commitment (for example `g^k`). If the randomness source fails, the unit
    /// is left without a blinding and the error is returned.
    pub fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<&BigUint> {
        self.blinding = None;
        let k = random_below(rng, &self.modulus)?;
        Ok(&self.blinding.insert(Nonce::new(k)).k)
    }

    /// Answers `challenge` with the blinding of the current round and consumes it.
    pub fn prove(&mut self, challenge: &BigUint) -> Result<BigUint> {
        let nonce = self.blinding.take().ok_or_else(|| {
            Error::ProtocolState("prove called without a preceding commit".to_string())
        })?;
        Ok(self.respond(&nonce, challenge))
    }

    // s = (k - c*x) mod q, with c reduced into [0, q) first
    fn respond(&self, nonce: &Nonce, challenge: &BigUint) -> BigUint {
        let c = reduce(challenge, &self.modulus);
        let cx = mul_mod(&c, &self.value, &self.modulus);
        sub_mod(&nonce.k, &cx, &self.modulus)
    }

    /// Raises the secret value to `exponent` under the ring modulus.
    pub fn exp(&self, exponent: &BigUint) -> BigUint {
        self.value.modpow(exponent, &self.modulus)
    }

    /// Multiplies two units of the same ring.
    pub fn mul(&self, other: &Zr) -> Result<Zr> {
        if self.modulus != other.modulus {
            return Err(Error::ProtocolState(
                "Unmatched modulus in exponent multiplication".to_string(),
            ));
        }
        Zr::new(
            mul_mod(&self.value, &other.value, &self.modulus),
            self.modulus.clone(),
        )
    }

    /// Multiplicative inverse, if the value is coprime to the modulus.
    pub fn inverse(&self) -> Option<Zr> {
        let inv = inverse_mod(&self.value, &self.modulus)?;
        Zr::new(inv, self.modulus.clone()).ok()
    }
}

impl Clone for Zr {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            modulus: self.modulus.clone(),
            blinding: None,
        }
    }
}

impl fmt::Debug for Zr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zr")
            .field("modulus", &self.modulus)
            .field("committed", &self.is_committed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::primitives::rng::tests::BrokenRng;

    fn n(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn new_rejects_out_of_range_value() {
        assert!(matches!(Zr::new(n(7), n(7)), Err(Error::InvalidScalar(_))));
        assert!(matches!(Zr::new(n(0), n(0)), Err(Error::InvalidParams(_))));
        assert!(Zr::new(n(6), n(7)).is_ok());
    }

    #[test]
    fn prove_without_commit_is_a_state_error() {
        let mut x = Zr::new(n(3), n(7)).unwrap();
        assert!(matches!(x.prove(&n(2)), Err(Error::ProtocolState(_))));
    }

    #[test]
    fn prove_consumes_the_blinding() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut x = Zr::new(n(3), n(7)).unwrap();
        x.commit(&mut rng).unwrap();
        assert!(x.is_committed());
        x.prove(&n(2)).unwrap();
        assert!(!x.is_committed());
        assert!(matches!(x.prove(&n(4)), Err(Error::ProtocolState(_))));
    }

    #[test]
    fn response_matches_formula() {
        let x = Zr::new(n(3), n(7)).unwrap();
        let nonce = Nonce::new(n(5));
        // 5 - 2*3 = -1 = 6 (mod 7)
        assert_eq!(x.respond(&nonce, &n(2)), n(6));
        // challenge 9 reduces to 2
        assert_eq!(x.respond(&nonce, &n(9)), n(6));
        // challenge equal to the modulus reduces to 0
        assert_eq!(x.respond(&nonce, &n(7)), n(5));
    }

    #[test]
    fn reused_blinding_leaks_the_secret() {
        // Answering two challenges under one nonce gives
        // x = (s1 - s2) * (c2 - c1)^-1 mod q.
        let q = n(7);
        let x = Zr::new(n(3), q.clone()).unwrap();
        let nonce = Nonce::new(n(5));

        let (c1, c2) = (n(2), n(6));
        let s1 = x.respond(&nonce, &c1);
        let s2 = x.respond(&nonce, &c2);

        let inv = inverse_mod(&sub_mod(&c2, &c1, &q), &q).unwrap();
        let recovered = mul_mod(&sub_mod(&s1, &s2, &q), &inv, &q);
        assert_eq!(recovered, n(3));
    }

    #[test]
    fn clone_of_committed_unit_cannot_prove() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut x = Zr::new(n(3), n(7)).unwrap();
        x.commit(&mut rng).unwrap();

        let mut twin = x.clone();
        assert!(!twin.is_committed());
        assert_eq!(twin.value(), x.value());
        assert!(matches!(twin.prove(&n(6)), Err(Error::ProtocolState(_))));
        assert!(x.prove(&n(2)).is_ok());
    }

    #[test]
    fn commit_refreshes_blinding() {
        let mut rng = StdRng::seed_from_u64(99);
        let q = BigUint::from(1u64 << 61) - 1u32;
        let mut x = Zr::new(n(3), q).unwrap();
        let k1 = x.commit(&mut rng).unwrap().clone();
        let k2 = x.commit(&mut rng).unwrap().clone();
        assert_ne!(k1, k2);
    }

    #[test]
    fn failed_commit_leaves_no_blinding() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut x = Zr::new(n(3), n(7)).unwrap();
        x.commit(&mut rng).unwrap();
        assert!(matches!(x.commit(&mut BrokenRng), Err(Error::RandomSource(_))));
        assert!(!x.is_committed());
        assert!(matches!(x.prove(&n(1)), Err(Error::ProtocolState(_))));
    }

    #[test]
    fn mul_checks_modulus() {
        let a = Zr::new(n(3), n(7)).unwrap();
        let b = Zr::new(n(5), n(7)).unwrap();
        assert_eq!(a.mul(&b).unwrap().value(), &n(1));

        let c = Zr::new(n(5), n(11)).unwrap();
        assert!(matches!(a.mul(&c), Err(Error::ProtocolState(_))));
    }

    #[test]
    fn inverse_and_exp() {
        let a = Zr::new(n(3), n(7)).unwrap();
        let inv = a.inverse().unwrap();
        assert_eq!(a.mul(&inv).unwrap().value(), &n(1));
        // 3^3 = 27 = 6 (mod 7)
        assert_eq!(a.exp(&n(3)), n(6));
        assert!(Zr::new(n(0), n(7)).unwrap().inverse().is_none());
    }

    #[test]
    fn inverse_with_composite_modulus() {
        // 3 * 3 = 9 = 1 (mod 8)
        let a = Zr::new(n(3), n(8)).unwrap();
        assert_eq!(a.inverse().unwrap().value(), &n(3));
        assert!(Zr::new(n(2), n(8)).unwrap().inverse().is_none());
    }

    #[test]
    fn debug_hides_secret() {
        let a = Zr::new(n(3), n(7)).unwrap();
        let rendered = format!("{a:?}");
        assert!(!rendered.contains("value"));
    }
}

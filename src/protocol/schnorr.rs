use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use super::{Prover, Verifier};
use crate::{GroupParameters, Result, Zr};

/// Prover for Schnorr identification.
///
/// Proves knowledge of `x` such that `y = g^x mod p` without revealing `x`.
///
/// # Security
///
/// - Every round must start with a fresh [`Prover::commit`]
/// - The response to a second challenge on the same commitment is refused
pub struct SchnorrProver {
    group: GroupParameters,
    g: BigUint,
    x: Zr,
}

impl SchnorrProver {
    /// Creates a prover for the secret `x`, which must lie in `[0, q)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use num_bigint::BigUint;
    /// use sigma_zkp::{GroupParameters, SchnorrProver};
    ///
    /// let group = GroupParameters::new(BigUint::from(127u32), BigUint::from(7u32)).unwrap();
    /// let prover = SchnorrProver::new(group, BigUint::from(2u32), BigUint::from(3u32)).unwrap();
    /// assert_eq!(prover.public_key(), BigUint::from(8u32));
    /// ```
    pub fn new(group: GroupParameters, g: BigUint, x: BigUint) -> Result<Self> {
        let x = Zr::new(x, group.q().clone())?;
        Ok(Self { group, g, x })
    }

    /// The public key `y = g^x mod p`.
    pub fn public_key(&self) -> BigUint {
        self.group.pow(&self.g, self.x.value())
    }

    /// A verifier for this prover's public key.
    pub fn verifier(&self) -> SchnorrVerifier {
        SchnorrVerifier::new(self.group.clone(), self.g.clone(), self.public_key())
    }
}

impl Prover for SchnorrProver {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>> {
        let k = self.x.commit(rng)?;
        let commitment = self.group.pow(&self.g, k);
        debug!("schnorr commitment issued");
        Ok(vec![commitment])
    }

    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>> {
        let s = self.x.prove(challenge)?;
        debug!("schnorr response issued");
        Ok(vec![s])
    }
}

/// Verifier for Schnorr identification.
#[derive(Clone, Debug)]
pub struct SchnorrVerifier {
    group: GroupParameters,
    g: BigUint,
    y: BigUint,
}

impl SchnorrVerifier {
    /// Creates a verifier for the public key `y` under generator `g`.
    pub fn new(group: GroupParameters, g: BigUint, y: BigUint) -> Self {
        Self { group, g, y }
    }

    /// The public key being verified against.
    pub fn public_key(&self) -> &BigUint {
        &self.y
    }
}

impl Verifier for SchnorrVerifier {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commitment_arity(&self) -> usize {
        1
    }

    fn response_arity(&self) -> usize {
        1
    }

    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])> {
        let (s, rest) = responses.split_first()?;
        // g^s * y^c = g^(k - cx) * g^(cx) = g^k (mod p)
        let rv = self.group.multi_pow([(&self.g, s), (&self.y, challenge)]);
        Some((vec![rv], rest))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::Error;

    fn n(v: u32) -> BigUint {
        BigUint::from(v)
    }

    fn toy_prover() -> SchnorrProver {
        let group = GroupParameters::new(n(127), n(7)).unwrap();
        SchnorrProver::new(group, n(2), n(3)).unwrap()
    }

    #[test]
    fn prover_rejects_secret_outside_ring() {
        let group = GroupParameters::new(n(127), n(7)).unwrap();
        assert!(matches!(
            SchnorrProver::new(group, n(2), n(9)),
            Err(Error::InvalidScalar(_))
        ));
    }

    #[test]
    fn honest_transcripts_verify_for_every_challenge() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut prover = toy_prover();
        let verifier = prover.verifier();

        for c in 0..7u32 {
            let comm = prover.commit(&mut rng).unwrap();
            let resp = prover.prove(&n(c)).unwrap();
            assert!(verifier.verify(&comm, &n(c), &resp));
        }
    }

    #[test]
    fn wrong_response_is_rejected() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut prover = toy_prover();
        let verifier = prover.verifier();

        let comm = prover.commit(&mut rng).unwrap();
        let resp = prover.prove(&n(4)).unwrap();
        let forged = vec![(&resp[0] + 1u32) % 7u32];
        assert!(!verifier.verify(&comm, &n(4), &forged));
    }

    #[test]
    fn consume_verify_threads_remainder() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut prover = toy_prover();
        let verifier = prover.verifier();

        let mut comm = prover.commit(&mut rng).unwrap();
        let mut resp = prover.prove(&n(5)).unwrap();
        comm.push(n(99));
        resp.extend([n(1), n(2)]);

        let consumed = verifier.consume_verify(&comm, &n(5), &resp);
        assert!(consumed.valid);
        assert_eq!(consumed.commitments, &[n(99)]);
        assert_eq!(consumed.responses, &[n(1), n(2)]);
        assert!(!verifier.verify(&comm, &n(5), &resp));
    }

    #[test]
    fn consume_verify_fails_closed_on_short_streams() {
        let verifier = toy_prover().verifier();
        let comm = [n(8)];

        let consumed = verifier.consume_verify(&comm, &n(1), &[]);
        assert!(!consumed.valid);
        assert_eq!(consumed.commitments, &comm);
        assert!(consumed.responses.is_empty());

        let resp = [n(3)];
        let consumed = verifier.consume_verify(&[], &n(1), &resp);
        assert!(!consumed.valid);
        assert_eq!(consumed.responses, &resp);
    }

    #[test]
    fn recover_commitment_on_empty_responses() {
        let verifier = toy_prover().verifier();
        assert!(verifier.recover_commitment(&n(1), &[]).is_none());
    }

    #[test]
    fn known_answer() {
        // y = 2^3 = 8, k = 5, c = 2: s = 5 - 6 = 6 (mod 7), g^6 * 8^2 = 2^12 = 2^5 = 32
        let verifier = toy_prover().verifier();
        let responses = [n(6)];
        let (rv, rest) = verifier.recover_commitment(&n(2), &responses).unwrap();
        assert_eq!(rv, vec![n(32)]);
        assert!(rest.is_empty());
    }
}

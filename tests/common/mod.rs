//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sigma_zkp::{GroupParameters, random_below, rfc5114_generator, rfc5114_group};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigma_zkp=info"));

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

pub fn n(v: u32) -> BigUint {
    BigUint::from(v)
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Order-7 subgroup of `Z_127*`, generated by 2.
pub fn toy_group() -> GroupParameters {
    GroupParameters::new(n(127), n(7)).unwrap()
}

/// RFC 5114 group with `g`, plus a second generator `h = g^a` for a random `a`.
pub struct BigGroup {
    pub group: GroupParameters,
    pub g: BigUint,
    pub h: BigUint,
}

impl BigGroup {
    pub fn new(rng: &mut StdRng) -> Self {
        let group = rfc5114_group().unwrap();
        let g = rfc5114_generator().unwrap();
        let a = random_below(rng, group.q()).unwrap();
        let h = group.pow(&g, &a);
        Self { group, g, h }
    }

    /// Fresh secret exponent in `[0, q)`.
    pub fn secret(&self, rng: &mut StdRng) -> BigUint {
        random_below(rng, self.group.q()).unwrap()
    }

    /// `count` further generators derived from `g`.
    pub fn bases(&self, rng: &mut StdRng, count: usize) -> Vec<BigUint> {
        (0..count)
            .map(|_| {
                let e = self.secret(rng);
                self.group.pow(&self.g, &e)
            })
            .collect()
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use sigma_zkp::{
    GeneralizedPedersenVerifier, GroupParameters, MetaVerifier, PedersenVerifier,
    SchnorrVerifier, SignatureVerifier, Verifier,
};

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let values: Vec<BigUint> = rest.iter().map(|&b| BigUint::from(b)).collect();
    let split = usize::from(split) % (values.len() + 1);
    let (commitments, responses) = values.split_at(split);

    let n = |v: u32| BigUint::from(v);
    let Ok(group) = GroupParameters::new(n(127), n(7)) else {
        return;
    };
    let Ok(generalized) =
        GeneralizedPedersenVerifier::new(group.clone(), vec![n(2), n(8)], n(4), n(16))
    else {
        return;
    };
    let Ok(verifier) = MetaVerifier::new(vec![
        Box::new(SchnorrVerifier::new(group.clone(), n(2), n(8))) as Box<dyn Verifier>,
        Box::new(PedersenVerifier::new(group, n(2), n(4), n(16))),
        Box::new(generalized),
    ]) else {
        return;
    };

    for challenge in 0..7 {
        let consumed = verifier.consume_verify(commitments, &n(challenge), responses);
        assert!(consumed.commitments.len() <= commitments.len());
        assert!(consumed.responses.len() <= responses.len());
    }
    let _ = verifier.verify_signature(&n(1), &values);
});

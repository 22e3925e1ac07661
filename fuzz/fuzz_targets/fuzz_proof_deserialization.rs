#![no_main]

use libfuzzer_sys::fuzz_target;
use sigma_zkp::Proof;

fuzz_target!(|data: &[u8]| {
    let _ = Proof::from_bytes(data);
});

//! Fuzz target for `BernoulliMixtureE::update`/`evalue`: the truncated-mixture
//! log-likelihood-ratio construction must stay finite (or cleanly NaN, never
//! panic) even when fed non-0/1 floats that `clip_mode=clip` folds in.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use cs_core::ep::{BernoulliMixtureE, OneSampleEProcess, Side};
use cs_types::StreamSpec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let values: Vec<f64> = match Arbitrary::arbitrary(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };
    let spec = StreamSpec::bernoulli("fuzz", 0.05).unwrap();
    let mut ep = BernoulliMixtureE::new(spec, 0.5, Side::Eq).unwrap();
    for x in values {
        let _ = ep.update(x);
        let _ = ep.evalue();
    }
});

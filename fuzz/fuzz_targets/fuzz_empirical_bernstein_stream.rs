//! Fuzz target for `EmpiricalBernsteinCS::update` under an adversarial
//! `f64` stream; must never panic.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use cs_core::cs::{EmpiricalBernsteinCS, OneSampleCs};
use cs_types::{ClipMode, Kind, StreamSpec, Support};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let values: Vec<f64> = match Arbitrary::arbitrary(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };
    let spec = StreamSpec::new(
        "fuzz",
        0.05,
        Kind::Bounded,
        Some(Support::new(0.0, 1.0).unwrap()),
        true,
        ClipMode::Clip,
    )
    .unwrap();
    let mut cs = EmpiricalBernsteinCS::new(spec).unwrap();
    for x in values {
        let _ = cs.update(x);
        let _ = cs.interval();
    }
});

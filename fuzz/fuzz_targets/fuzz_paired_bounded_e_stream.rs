//! Fuzz target for `PairedBoundedE::update`: both the per-arm estimators and
//! the running `(S_n, V_n)` mixture sums must stay panic-free under an
//! adversarial, arbitrarily-interleaved two-arm float stream.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use cs_core::ep::{PairedBoundedE, Side};
use cs_types::{Arm, ClipMode, Kind, ABSpec, Support};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let obs: Vec<(bool, f64)> = match Arbitrary::arbitrary(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };
    let spec = ABSpec::new(
        "fuzz",
        0.05,
        Kind::Bounded,
        Some(Support::new(-1.0, 1.0).unwrap()),
        true,
        ClipMode::Clip,
    )
    .unwrap();
    let mut ep = PairedBoundedE::new(spec, Side::Eq).unwrap();
    for (is_a, x) in obs {
        let arm = if is_a { Arm::A } else { Arm::B };
        let _ = ep.update(arm, x);
        let _ = ep.evalue();
    }
});

//! Fuzz target for `HoeffdingCS::update`: an adversarial `f64` stream
//! (`arbitrary`'s `f64` impl freely produces NaN, +-inf, and subnormals)
//! must never panic, only degrade the tier or return an `AssumptionViolation`
//! under `clip_mode=error`.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use cs_core::cs::{HoeffdingCS, OneSampleCs};
use cs_types::{ClipMode, Kind, StreamSpec, Support};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let values: Vec<f64> = match Arbitrary::arbitrary(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };
    let clip_mode = if data.first().copied().unwrap_or(0) % 2 == 0 {
        ClipMode::Clip
    } else {
        ClipMode::Error
    };
    let spec = StreamSpec::new(
        "fuzz",
        0.05,
        Kind::Bounded,
        Some(Support::new(-1.0, 1.0).unwrap()),
        true,
        clip_mode,
    )
    .unwrap();
    let mut cs = HoeffdingCS::new(spec).unwrap();
    for x in values {
        let _ = cs.update(x);
        let iv = cs.interval();
        debug_assert!(iv.lo <= iv.hi || iv.lo.is_nan() || iv.hi.is_nan());
    }
});

//! Fuzz target for `ABSpec` YAML parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = cs_config::parse_ab_spec(data);
});

//! Fuzz target for `StreamSpec` YAML parsing.
//!
//! `parse_stream_spec` should never panic on arbitrary bytes, only return an
//! error.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = cs_config::parse_stream_spec(data);
});

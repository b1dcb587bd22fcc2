//! Fuzz target for TOML config parsing and validation.
//!
//! Malformed or out-of-range config must be rejected, never panic.

#![no_main]

use bhasha::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<Config>(s) {
            let _ = config.validate();
        }
    }
});

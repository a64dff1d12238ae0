#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok((config, _warnings)) =
            denim::config::parse_with_warnings(content, Path::new("config.toml"))
        {
            let _ = config.obfuscation.to_parameters().map(|p| p.validate());
        }
    }
});

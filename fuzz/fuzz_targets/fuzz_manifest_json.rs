#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(manifest) = denim::BuildManifest::from_json(content, Path::new("m.json"), "clang") {
            for step in &manifest.compile_steps {
                let _ = step.unit_name();
            }
            let _ = manifest.link.arguments();
        }
    }
});

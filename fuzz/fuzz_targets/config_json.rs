#![no_main]

use libfuzzer_sys::fuzz_target;
use repstress::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = repstress::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        if let Some(config) = parsed {
            if let Some(workers) = config.workers {
                debug_assert!((1..=250).contains(&workers));
            }
            if let Some(headers) = config.headers.as_ref() {
                for header in headers {
                    debug_assert!(repstress::fuzzing::parse_header_input(header).is_ok());
                }
            }
        }
    }
});

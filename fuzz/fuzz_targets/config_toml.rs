#![no_main]

use libfuzzer_sys::fuzz_target;
use repstress::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = repstress::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            if let Some(config) = parsed {
                if let Some(workers) = config.workers {
                    debug_assert!((1..=250).contains(&workers));
                }
                if let Some(domains) = config.domains {
                    debug_assert!((1..=5000).contains(&domains));
                }
                if let Some(duration) = config.duration {
                    debug_assert!(duration > 0);
                }
            }
        }
    }
});

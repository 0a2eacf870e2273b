#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let domains = repstress::fuzzing::parse_domains_input(input);
        let mut seen = HashSet::new();
        for domain in &domains {
            debug_assert!(!domain.is_empty());
            debug_assert!(!domain.starts_with('#'));
            debug_assert_eq!(domain.as_str(), domain.trim());
            debug_assert!(seen.insert(domain.as_str()));
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use panel_logo::config::Settings;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as JSON into Settings.
    // Parsing may fail; it must never crash or panic.
    if let Ok(s) = std::str::from_utf8(data) {
        let _result: Result<Settings, _> = serde_json::from_str(s);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use panel_logo::shell::launcher::split_command_line;

fuzz_target!(|data: &[u8]| {
    // The splitter must reject malformed quoting gracefully, never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _result = split_command_line(s);
    }
});

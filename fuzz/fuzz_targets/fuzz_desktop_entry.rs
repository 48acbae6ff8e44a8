#![no_main]

use libfuzzer_sys::fuzz_target;
use panel_logo::utils::desktop_entry;

fuzz_target!(|data: &[u8]| {
    // Desktop entries come from arbitrary files on disk
    if let Ok(s) = std::str::from_utf8(data) {
        let _exec = desktop_entry::exec_line(s);
        let _cmd = desktop_entry::launch_command(s, "fallback.id");
    }
});

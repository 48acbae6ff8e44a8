//! `panel-logo-prefs` - command-line preferences editor
//!
//! Edits the same settings file the applet watches; the applet picks up
//! every save within its poll interval. Values are validated with the same
//! bounds the settings schema documents, and path-like values accept the
//! `~/` shorthand.
//!
//! ```text
//! panel-logo-prefs list
//! panel-logo-prefs get <key>
//! panel-logo-prefs set <key> <value> [<key> <value>...]
//! panel-logo-prefs reset [<key>]
//! panel-logo-prefs set-app <left|right> (<command> | --desktop <file>)
//! panel-logo-prefs edit
//! ```

use panel_logo::config::keys;
use panel_logo::config::{ConfigManager, DebouncedSaver, Settings};
use panel_logo::config::debounce::DEFAULT_DEBOUNCE;
use panel_logo::utils::{desktop_entry, paths};
use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;

/// Keys whose values are filesystem paths and accept the `~/` shorthand
const PATH_KEYS: &[&str] = &[
    "icon-path",
    "left-custom-folder",
    "right-custom-folder",
];

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        Some("list") => cmd_list(),
        Some("get") => match args.get(1) {
            Some(key) => cmd_get(key),
            None => usage_error("get requires a key"),
        },
        Some("set") => cmd_set(&args[1..]),
        Some("reset") => cmd_reset(args.get(1).map(String::as_str)),
        Some("set-app") => cmd_set_app(&args[1..]),
        Some("edit") => cmd_edit(),
        Some("help" | "--help" | "-h") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => usage_error(&format!("unknown command: {other}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!(
        "Usage: panel-logo-prefs <command>\n\n\
         Commands:\n  \
         list                         show every setting\n  \
         get <key>                    print one setting\n  \
         set <key> <value> ...        change settings (validated)\n  \
         reset [<key>]                restore one key, or everything, to defaults\n  \
         set-app <left|right> <cmd>   bind a click to an app command\n  \
         set-app <side> --desktop <f> bind a click via a .desktop file\n  \
         edit                         interactive editor (one `key value` per line)"
    );
}

fn usage_error(message: &str) -> Result<(), String> {
    Err(format!("{message} (see panel-logo-prefs help)"))
}

fn load() -> Result<Settings, String> {
    ConfigManager::load().map_err(|e| format!("failed to load settings: {e}"))
}

fn save(settings: &Settings) -> Result<(), String> {
    ConfigManager::save(settings).map_err(|e| format!("failed to save settings: {e}"))
}

fn cmd_list() -> Result<(), String> {
    let settings = load()?;
    let home = paths::home_dir();
    for key in keys::ALL_KEYS {
        let value = keys::get(&settings, key).map_err(|e| e.to_string())?;
        let shown = if PATH_KEYS.contains(key) {
            paths::display_path(&value, &home)
        } else {
            value
        };
        println!("{key} = {shown}");
    }
    Ok(())
}

fn cmd_get(key: &str) -> Result<(), String> {
    let settings = load()?;
    let value = keys::get(&settings, key).map_err(|e| e.to_string())?;
    println!("{value}");
    Ok(())
}

fn cmd_set(pairs: &[String]) -> Result<(), String> {
    if pairs.is_empty() {
        return usage_error("set requires at least one key/value pair");
    }
    if pairs.len() % 2 != 0 {
        return usage_error("set requires key/value pairs");
    }

    let mut settings = load()?;
    let home = paths::home_dir();
    for pair in pairs.chunks(2) {
        let (key, value) = (&pair[0], &pair[1]);
        let value = if PATH_KEYS.contains(&key.as_str()) {
            paths::absolute_path(value, &home)
        } else {
            value.clone()
        };
        keys::set(&mut settings, key, &value).map_err(|e| e.to_string())?;
    }
    save(&settings)
}

fn cmd_reset(key: Option<&str>) -> Result<(), String> {
    let mut settings = load()?;
    keys::reset(&mut settings, key).map_err(|e| e.to_string())?;
    save(&settings)
}

fn cmd_set_app(args: &[String]) -> Result<(), String> {
    let side_key = match args.first().map(String::as_str) {
        Some("left") => "left-click-app",
        Some("right") => "right-click-app",
        _ => return usage_error("set-app requires a side: left or right"),
    };

    let command = match args.get(1).map(String::as_str) {
        Some("--desktop") => {
            let Some(file) = args.get(2) else {
                return usage_error("--desktop requires a .desktop file path");
            };
            launch_command_from_desktop_file(Path::new(file))?
        }
        Some(command) => {
            let home = paths::home_dir();
            paths::absolute_path(command, &home)
        }
        None => return usage_error("set-app requires a command or --desktop <file>"),
    };

    let mut settings = load()?;
    keys::set(&mut settings, side_key, &command).map_err(|e| e.to_string())?;
    save(&settings)?;
    println!("{side_key} = {command}");
    Ok(())
}

fn launch_command_from_desktop_file(path: &Path) -> Result<String, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let fallback_id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    desktop_entry::launch_command(&contents, &fallback_id)
        .ok_or_else(|| format!("{} has no usable Exec line", path.display()))
}

/// Interactive editing: one `key value` line at a time, coalesced to disk
/// by the debounced saver so a burst of edits lands as a single write
fn cmd_edit() -> Result<(), String> {
    let mut settings = load()?;
    let saver = DebouncedSaver::new(DEFAULT_DEBOUNCE);
    let home = paths::home_dir();

    println!("panel-logo-prefs interactive editor");
    println!("Enter `<key> <value>` per line; Ctrl-D saves and exits.");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| format!("stdin error: {e}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(char::is_whitespace) else {
            eprintln!("expected: <key> <value>");
            continue;
        };
        let value = value.trim();
        let value = if PATH_KEYS.contains(&key) {
            paths::absolute_path(value, &home)
        } else {
            value.to_string()
        };
        match keys::set(&mut settings, key, &value) {
            Ok(()) => saver.submit(settings.clone()),
            Err(e) => eprintln!("{e}"),
        }
    }

    // Flushes any pending write before returning
    saver.shutdown();
    Ok(())
}

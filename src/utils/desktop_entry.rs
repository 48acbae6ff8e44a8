//! Desktop-entry launch command extraction
//!
//! The preferences surface lets users bind a click to an installed
//! application by pointing at its `.desktop` file. This module pulls the
//! `Exec=` line out of the entry, strips field codes, and normalizes
//! Flatpak wrapper invocations down to `flatpak run <app-id>`.

/// Extract the `Exec=` command of a desktop entry, field codes removed.
///
/// Only the `[Desktop Entry]` group is considered; actions and other groups
/// may carry their own `Exec=` lines that do not describe the app launch.
pub fn exec_line(contents: &str) -> Option<String> {
    let mut in_main_group = false;

    for line in contents.lines() {
        let line = line.trim();
        if let Some(group) = line.strip_prefix('[') {
            in_main_group = group.trim_end_matches(']') == "Desktop Entry";
            continue;
        }
        if !in_main_group {
            continue;
        }
        if let Some(value) = line.strip_prefix("Exec=") {
            let cleaned = strip_field_codes(value);
            if cleaned.is_empty() {
                return None;
            }
            return Some(cleaned);
        }
    }
    None
}

/// Remove `%f`/`%U`-style field code tokens from an exec line
fn strip_field_codes(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|token| !is_field_code(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_field_code(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('%')
        && matches!(
            chars.next(),
            Some('f' | 'F' | 'u' | 'U' | 'd' | 'D' | 'n' | 'N' | 'i' | 'c' | 'k' | 'v' | 'm')
        )
        && chars.next().is_none()
}

/// Extract the application id from a Flatpak wrapper exec line.
///
/// Returns `None` when the line is not a `flatpak run` invocation. When the
/// invocation carries only option flags and no id, `fallback_id` is used.
pub fn flatpak_app_id(exec_line: &str, fallback_id: &str) -> Option<String> {
    let tokens: Vec<&str> = exec_line.split_whitespace().collect();
    let idx = tokens
        .iter()
        .position(|t| *t == "flatpak" || t.ends_with("/flatpak"))?;
    if tokens.get(idx + 1) != Some(&"run") {
        return None;
    }
    for token in &tokens[idx + 2..] {
        if !token.starts_with('-') {
            return Some((*token).to_string());
        }
    }
    Some(fallback_id.to_string())
}

/// Resolve a desktop entry to the command line a click should spawn.
///
/// Flatpak wrappers collapse to `flatpak run <app-id>` so the spawned
/// command stays valid even when the entry's wrapper path is host-specific.
pub fn launch_command(contents: &str, fallback_id: &str) -> Option<String> {
    let exec = exec_line(contents)?;
    if exec.contains("flatpak") {
        if let Some(id) = flatpak_app_id(&exec, fallback_id) {
            return Some(format!("flatpak run {id}"));
        }
    }
    Some(exec)
}

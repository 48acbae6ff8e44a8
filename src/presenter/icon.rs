//! Icon resolution and validation
//!
//! Turns the `icon-path` setting into the content handed to the panel.
//! `~/` shorthand resolves against the home directory; the candidate file
//! must exist, not be a directory, and look like an image (header sniffing,
//! with `.ico`/`.svg` accepted by extension since SVG has no magic bytes).
//! Every failure produces a themed fallback icon instead of an error:
//! a missing or non-file path degrades to [`FALLBACK_NOT_FOUND`], an
//! unreadable or wrong-typed file to [`FALLBACK_BROKEN`].

use crate::config::models::Settings;
use crate::shell::{IconContent, IconSpec};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Themed icon shown when the configured path does not point at a file
pub const FALLBACK_NOT_FOUND: &str = "image-x-generic";

/// Themed icon shown when the file exists but cannot be used
pub const FALLBACK_BROKEN: &str = "image-missing";

/// Bytes read from the head of the file for format sniffing; every magic
/// number `image` recognizes fits well within this
const SNIFF_LEN: usize = 64;

/// Extensions accepted without sniffing (no usable magic bytes)
const EXTENSION_ALLOWLIST: &[&str] = &["ico", "svg"];

/// Expand the `~/` shorthand of an icon path against `home`
pub fn resolve_icon_path(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Resolve a filesystem path to the icon that should be displayed.
///
/// Never fails; every error class maps to one themed fallback.
pub fn icon_for_path(path: &Path) -> IconSpec {
    use tracing::{debug, warn};

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            debug!("Icon file not found: {}", path.display());
            return IconSpec::Themed(FALLBACK_NOT_FOUND.to_string());
        }
    };
    if metadata.is_dir() {
        debug!("Icon path is a directory: {}", path.display());
        return IconSpec::Themed(FALLBACK_NOT_FOUND.to_string());
    }

    match looks_like_image(path) {
        Ok(true) => IconSpec::File(path.to_path_buf()),
        Ok(false) => {
            warn!("Icon file is not a supported image type: {}", path.display());
            IconSpec::Themed(FALLBACK_BROKEN.to_string())
        }
        Err(e) => {
            warn!("Error reading icon file {}: {}", path.display(), e);
            IconSpec::Themed(FALLBACK_BROKEN.to_string())
        }
    }
}

/// Build the complete button content for the current settings
pub fn build_content(settings: &Settings, home: &Path) -> IconContent {
    let path = resolve_icon_path(&settings.icon_path, home);
    IconContent {
        icon: icon_for_path(&path),
        size: settings.icon_size,
        padding: settings.horizontal_padding,
    }
}

/// Sniff the file header for a known image format, falling back to the
/// extension allowlist
fn looks_like_image(path: &Path) -> std::io::Result<bool> {
    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; SNIFF_LEN];
    let mut filled = 0;
    loop {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == SNIFF_LEN {
            break;
        }
    }

    if image::guess_format(&header[..filled]).is_ok() {
        return Ok(true);
    }

    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXTENSION_ALLOWLIST
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    Ok(by_extension)
}

// MainStreet - platform/fs.rs
//
// Shell integration: opening listing websites and revealing the user
// catalog folder.

use std::path::Path;

/// Open `url` in the system default browser.
///
/// Platform behaviour:
/// - **Windows**: `cmd /C start "" "<url>"` (the empty first argument is
///   the window title `start` would otherwise steal from the URL).
/// - **macOS**: `open "<url>"`.
/// - **Linux**: `xdg-open "<url>"`.
///
/// Only http(s) URLs are handed to the shell; anything else in a user
/// catalog is refused. The subprocess is spawned detached; any launch
/// failure is logged at WARN level but never propagated so the UI never
/// blocks.
pub fn open_in_browser(url: &str) {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        tracing::warn!(url, "Refusing to open non-http URL");
        return;
    }

    #[cfg(target_os = "windows")]
    {
        if let Err(e) = std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()
        {
            tracing::warn!(url, error = %e, "Failed to open URL in browser");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open").arg(url).spawn() {
            tracing::warn!(url, error = %e, "Failed to open URL in browser");
        }
    }
    #[cfg(target_os = "linux")]
    {
        if let Err(e) = std::process::Command::new("xdg-open").arg(url).spawn() {
            tracing::warn!(url, error = %e, "Failed to open URL in browser");
        }
    }
}

/// Reveal a directory in the platform file manager. Same detached,
/// warn-only contract as [`open_in_browser`].
pub fn open_directory(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        if let Err(e) = std::process::Command::new("explorer").arg(path).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open directory");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open").arg(path).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open directory");
        }
    }
    #[cfg(target_os = "linux")]
    {
        if let Err(e) = std::process::Command::new("xdg-open").arg(path).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open directory");
        }
    }
}

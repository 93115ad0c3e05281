//! Opening files and URLs through the platform launcher.

use std::process::Command;

use anyhow::{Context, Result};
use log::info;

use crate::term;

/// Minimal URL check: an http(s) scheme followed by a non-empty host.
pub fn is_valid_url(link: &str) -> bool {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));
    match rest {
        Some(host) => !host.is_empty() && !host.starts_with('/'),
        None => false,
    }
}

/// Hand a file path or URL to the platform launcher.
///
/// # Errors
///
/// Returns an error when the launcher cannot be spawned or reports failure.
pub fn open_target(target: &str) -> Result<()> {
    let status = launcher(target)
        .status()
        .with_context(|| format!("failed to launch opener for `{target}`"))?;
    if !status.success() {
        anyhow::bail!("opener exited with {status} for `{target}`");
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn launcher(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "macos")]
fn launcher(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "windows")]
fn launcher(target: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", target]);
    cmd
}

/// Prompt for a URL and open it when it validates.
///
/// # Errors
///
/// Returns prompt I/O failures and launcher failures. An invalid URL is
/// reported inline and is not an error.
pub fn open_prompted_url() -> Result<()> {
    let link = term::prompt("Enter a link")?;
    open_checked(&link)
}

/// Open `link` after validation; invalid links only print a notice.
///
/// # Errors
///
/// Returns launcher failures.
pub fn open_checked(link: &str) -> Result<()> {
    if !is_valid_url(link) {
        println!("Invalid link: {link}");
        return Ok(());
    }
    info!("opening {link}");
    open_target(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://google.com"));
        assert!(is_valid_url("http://example.org/page"));
        assert!(!is_valid_url("google.com"));
        assert!(!is_valid_url("ftp://example.org"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https:///path"));
        assert!(!is_valid_url(""));
    }
}

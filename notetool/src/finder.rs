//! File search by name fragment.
//!
//! Walks the working directory recursively, collects files whose name
//! contains the requested fragment, and writes a size-sorted report to
//! `saved_paths.txt`. Symlinks are skipped.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;

use crate::term;

const REPORT_FILE: &str = "saved_paths.txt";

/// Display unit for the size column of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    fn scale(self) -> u64 {
        match self {
            SizeUnit::Kb => 1024,
            SizeUnit::Mb => 1024 * 1024,
            SizeUnit::Gb => 1024 * 1024 * 1024,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
        }
    }

    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(SizeUnit::Kb),
            "2" => Some(SizeUnit::Mb),
            "3" => Some(SizeUnit::Gb),
            _ => None,
        }
    }
}

/// Interactive flow behind the `find_files` builtin.
///
/// # Errors
///
/// Returns prompt failures and report-write failures. Unreadable
/// subdirectories are skipped with a log entry rather than aborting the
/// walk.
pub fn find_files(root: &Path) -> Result<()> {
    let pattern = term::prompt("Enter a file name to search for, or leave empty for README")?;
    let pattern = if pattern.is_empty() {
        "readme".to_string()
    } else {
        pattern.to_lowercase()
    };

    let start = Instant::now();
    let mut found: Vec<(PathBuf, u64)> = Vec::new();
    collect(root, &pattern, &mut found);
    let elapsed = start.elapsed();

    let unit = loop {
        println!(
            "{}",
            "Select the displayed size:\n1 - KB\n2 - MB\n3 - GB".cyan().bold()
        );
        match SizeUnit::from_choice(&term::read_answer()?) {
            Some(unit) => break unit,
            None => println!("{}", "Enter a valid number: 1, 2 or 3".red().bold()),
        }
    };

    found.sort_by_key(|(_, size)| *size);
    let report: String = found
        .iter()
        .map(|(path, size)| format_entry(path, *size, unit))
        .collect();
    fs::write(REPORT_FILE, report).with_context(|| format!("failed to write {REPORT_FILE}"))?;

    println!(
        "{}",
        format!("Done. Files found: {}", found.len()).green().bold()
    );
    println!(
        "{}",
        format!("Everything is saved in {REPORT_FILE} ({:.2}s)", elapsed.as_secs_f64()).green()
    );
    Ok(())
}

fn collect(dir: &Path, pattern: &str, found: &mut Vec<(PathBuf, u64)>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("skipping {}: {err}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }
        if file_type.is_dir() {
            collect(&path, pattern, found);
        } else if entry.file_name().to_string_lossy().to_lowercase().contains(pattern) {
            if let Ok(meta) = entry.metadata() {
                found.push((path, meta.len()));
            }
        }
    }
}

fn format_entry(path: &Path, size: u64, unit: SizeUnit) -> String {
    let scaled = size as f64 / unit.scale() as f64;
    format!("{} - {:.2} {}\n", path.display(), scaled, unit.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_selection() {
        assert_eq!(SizeUnit::from_choice("1"), Some(SizeUnit::Kb));
        assert_eq!(SizeUnit::from_choice("3"), Some(SizeUnit::Gb));
        assert_eq!(SizeUnit::from_choice("4"), None);
        assert_eq!(SizeUnit::from_choice("kb"), None);
    }

    #[test]
    fn test_format_entry_scales() {
        let line = format_entry(Path::new("/tmp/readme.md"), 2048, SizeUnit::Kb);
        assert_eq!(line, "/tmp/readme.md - 2.00 KB\n");
        let line = format_entry(Path::new("/tmp/readme.md"), 1024 * 1024, SizeUnit::Mb);
        assert_eq!(line, "/tmp/readme.md - 1.00 MB\n");
    }

    #[test]
    fn test_collect_matches_case_insensitively_and_recurses() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("README.md"), "hello").unwrap();
        fs::write(tmp.path().join("sub/readme.txt"), "hi").unwrap();
        fs::write(tmp.path().join("notes.md"), "x").unwrap();

        let mut found = Vec::new();
        collect(tmp.path(), "readme", &mut found);
        assert_eq!(found.len(), 2);
    }
}

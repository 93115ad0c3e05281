//! Markdown note templates.
//!
//! Two note skeletons are generated: programming topic notes and law notes.
//! A template renders to markdown text and is saved under the storage
//! directory for its kind, named after the lowercased title.

use std::{
    collections::BTreeSet,
    fs, io,
    path::Path,
};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::{opener, term};

/// Extra metadata carried by law notes. Empty fields are left out of the
/// rendered note.
#[derive(Debug, Default, Clone)]
pub struct LawFields {
    pub doc_number: Option<String>,
    pub short_name: Option<String>,
    pub year: Option<String>,
    pub law_type: Option<String>,
}

/// Which skeleton a template renders.
#[derive(Debug, Clone)]
pub enum NoteKind {
    Topic,
    Law(LawFields),
}

/// A markdown note before it is written to disk.
#[derive(Debug, Clone)]
pub struct NoteTemplate {
    title: String,
    tags: Vec<String>,
    kind: NoteKind,
}

impl NoteTemplate {
    /// Programming-topic note.
    pub fn topic(title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: normalize_title(title.into()),
            tags,
            kind: NoteKind::Topic,
        }
    }

    /// Law note with optional document metadata.
    pub fn law(title: impl Into<String>, tags: Vec<String>, fields: LawFields) -> Self {
        Self {
            title: normalize_title(title.into()),
            tags,
            kind: NoteKind::Law(fields),
        }
    }

    /// File name derived from the title: lowercased, spaces replaced by
    /// underscores, suffixed by the note kind.
    pub fn file_name(&self) -> String {
        let stem = self.title.to_lowercase().replace(' ', "_");
        format!("{stem}{}.md", self.suffix())
    }

    fn suffix(&self) -> &'static str {
        match self.kind {
            NoteKind::Topic => "_topic",
            NoteKind::Law(_) => "_law",
        }
    }

    /// Render the note body for the given creation date.
    pub fn render(&self, created: NaiveDate) -> String {
        let emoticon = match self.kind {
            NoteKind::Topic => "🐍",
            NoteKind::Law(_) => "📜",
        };

        let mut body = String::new();
        body.push_str(&format!("# {emoticon} {}\n\n", self.title));
        body.push_str(&format!("#### Created: {created}\n\n"));

        if !self.tags.is_empty() {
            // Sorted and de-duplicated, rendered as one hashtag line.
            let unique: BTreeSet<&str> = self.tags.iter().map(String::as_str).collect();
            let line = unique.into_iter().collect::<Vec<_>>().join(" #");
            push_section(&mut body, "🏷️ Tags", &[&format!("Tags: #{line}")]);
        }

        match &self.kind {
            NoteKind::Topic => {
                push_section(
                    &mut body,
                    "😸 Overview",
                    &["What is it?", "What is it for?", "Where is it used?"],
                );
                push_code_section(&mut body, "🛠 Example", "# code sample");
            }
            NoteKind::Law(fields) => {
                let mut items: Vec<String> = Vec::new();
                for (name, value) in [
                    ("Number", &fields.doc_number),
                    ("Short name", &fields.short_name),
                    ("Year", &fields.year),
                    ("Field of law", &fields.law_type),
                ] {
                    if let Some(value) = value {
                        items.push(format!("{name}: {value}"));
                    }
                }
                if !items.is_empty() {
                    let refs: Vec<&str> = items.iter().map(String::as_str).collect();
                    push_section(&mut body, "📇 Document", &refs);
                }
                push_section(&mut body, "📝 Summary", &["Essence", "Scope", "Key articles"]);
            }
        }

        body
    }
}

fn normalize_title(title: String) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn push_section(body: &mut String, title: &str, items: &[&str]) {
    body.push_str(&format!("## {title}\n\n"));
    for item in items {
        body.push_str(&format!("- {item}\n"));
    }
    body.push('\n');
}

fn push_code_section(body: &mut String, title: &str, code: &str) {
    body.push_str(&format!("## {title}\n\n"));
    body.push_str(&format!("```python\n{code}\n```\n\n"));
}

/// Interactive flow behind the `create_topic` builtin.
///
/// # Errors
///
/// Returns prompt and filesystem failures.
pub fn create_topic(storage: &Path) -> Result<()> {
    let title = term::prompt("Enter a title")?;
    let tags = term::read_tags()?;
    save_note(&NoteTemplate::topic(title, tags), storage)
}

/// Interactive flow behind the `create_law_note` builtin.
///
/// # Errors
///
/// Returns prompt and filesystem failures.
pub fn create_law_note(storage: &Path) -> Result<()> {
    let title = term::prompt("Enter the document or topic name")?;
    let tags = term::read_tags()?;
    let fields = LawFields {
        doc_number: optional(term::prompt("Document number (empty to skip)")?),
        short_name: optional(term::prompt("Short name (empty to skip)")?),
        year: optional(term::prompt("Year of adoption (empty to skip)")?),
        law_type: optional(term::prompt("Field of law (empty to skip)")?),
    };
    save_note(&NoteTemplate::law(title, tags, fields), storage)
}

fn optional(answer: String) -> Option<String> {
    if answer.is_empty() { None } else { Some(answer) }
}

fn save_note(note: &NoteTemplate, storage: &Path) -> Result<()> {
    fs::create_dir_all(storage)
        .with_context(|| format!("failed to create {}", storage.display()))?;
    let path = storage.join(note.file_name());
    fs::write(&path, note.render(Local::now().date_naive()))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("{} {}", "File saved:".green().bold(), path.display());

    if term::confirm("Open the file now?")? {
        opener::open_target(&path.display().to_string())?;
    }
    Ok(())
}

/// Interactive flow behind the `list_*` builtins: show the notes of one
/// kind and let the user open them by number.
///
/// # Errors
///
/// Returns prompt, filesystem, and opener failures.
pub fn list_notes(storage: &Path, suffix: &str) -> Result<()> {
    let files = available_files(storage, suffix)
        .with_context(|| format!("failed to list {}", storage.display()))?;
    if files.is_empty() {
        println!("No files found");
        return Ok(());
    }

    for (number, name) in files.iter().enumerate() {
        println!(
            "{} {}",
            format!("{}.", number + 1).yellow().bold(),
            name.cyan().bold()
        );
    }

    loop {
        println!(
            "{}",
            "Enter a file number to open, or 0 to go back".cyan().bold()
        );
        let answer = term::read_answer()?;
        if answer == "0" {
            return Ok(());
        }
        match answer.parse::<usize>() {
            Ok(index) if (1..=files.len()).contains(&index) => {
                let path = storage.join(&files[index - 1]);
                opener::open_target(&path.display().to_string())?;
            }
            _ => println!("{}", "Enter a valid number".red().bold()),
        }
    }
}

/// Note files of one kind in `dir`, sorted by name. A missing directory
/// yields an empty list.
fn available_files(dir: &Path, suffix: &str) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(suffix) && entry.file_type()?.is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

//! Terminal glue: screen clearing, panels, and line prompts.
//!
//! Everything here writes straight to the real terminal. The menu engine
//! itself stays presentation-agnostic; these helpers dress the surrounding
//! application.

use std::io::{self, Write};

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// Clear the terminal and home the cursor.
///
/// Failures are ignored: a terminal that cannot be cleared (pipes, dumb
/// terminals) still gets a usable menu.
pub fn clear_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

/// Draw the boxed greeting shown before the menu starts.
pub fn welcome_panel() {
    let headline = "Welcome back!";
    let width = headline.len() + 4;
    let rule = "─".repeat(width);

    println!("{}", format!("┌{rule}┐").green().bold());
    println!(
        "{}  {}  {}",
        "│".green().bold(),
        headline.cyan().bold(),
        "│".green().bold()
    );
    println!("{}", format!("└{rule}┘").green().bold());
    println!("{}", "What will you do today?".cyan());
}

/// Draw a bordered configuration-error panel.
pub fn error_panel(message: &str) {
    println!();
    println!("{}", "──── Configuration error ────".yellow().bold());
    println!("{}", message.red().bold());
    println!("{}", "Check the files under configs/".yellow());
    println!();
}

/// Print `message` and read one trimmed line of input.
///
/// # Errors
///
/// Returns an error when stdin is closed or unreadable.
pub fn prompt(message: &str) -> io::Result<String> {
    println!("{}", message.cyan().bold());
    read_answer()
}

/// Read one trimmed line after the `>>> ` marker.
///
/// # Errors
///
/// Returns an error when stdin is closed or unreadable.
pub fn read_answer() -> io::Result<String> {
    print!("{}", ">>> ".purple().bold());
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a list of tags; an empty line finishes the list.
///
/// # Errors
///
/// Returns an error when stdin is closed or unreadable.
pub fn read_tags() -> io::Result<Vec<String>> {
    println!(
        "{}",
        "Enter tags. An empty line finishes the list.".cyan().bold()
    );
    let mut tags = Vec::new();
    loop {
        let tag = read_answer()?;
        if tag.is_empty() {
            break;
        }
        tags.push(tag);
    }
    Ok(tags)
}

/// Ask a yes/no question; only `y`/`Y` counts as yes.
///
/// # Errors
///
/// Returns an error when stdin is closed or unreadable.
pub fn confirm(message: &str) -> io::Result<bool> {
    println!("{}", format!("{message} (y/n)").cyan().bold());
    Ok(read_answer()?.eq_ignore_ascii_case("y"))
}

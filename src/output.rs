//! Colored terminal output for the cookbook CLI
//!
//! Uses owo-colors for terminal colors.

use crate::entry::Entry;
use crate::resolve::Summary;
use owo_colors::OwoColorize;

/// Section header for a CLI step
/// Example: "==> Loading pantry.json"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Indented note under the last header
/// Example: "     2 ingredient(s), cook time 13"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Final line when a check passes
/// Example: "==> All recipes resolve"
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Store-level fact, e.g. ":: 7 entries"
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// A recipe that failed to resolve, on stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// One line per entry in listings
/// Example: "  Meatball recipe (2 items)"
pub fn entry_line(entry: &Entry) {
    let detail = match entry {
        Entry::Ingredient(i) => format!("cook time {}", i.cook_time),
        Entry::Recipe(r) if r.required_items.len() == 1 => "1 item".to_string(),
        Entry::Recipe(r) => format!("{} items", r.required_items.len()),
    };
    match entry {
        Entry::Ingredient(_) => println!(
            "  {} {} {}",
            entry.name().green(),
            entry.kind().dimmed(),
            format!("({})", detail).dimmed()
        ),
        Entry::Recipe(_) => println!(
            "  {} {} {}",
            entry.name().cyan(),
            entry.kind().dimmed(),
            format!("({})", detail).dimmed()
        ),
    }
}

/// Print a resolved recipe
pub fn summary(summary: &Summary) {
    action(&format!("{} (cook time {})", summary.name, summary.cook_time));
    if summary.ingredients.is_empty() {
        detail("no ingredients");
        return;
    }
    for ingredient in &summary.ingredients {
        println!(
            "  {} {} {}",
            "->".cyan(),
            format!("{}x", ingredient.quantity).bold(),
            ingredient.name
        );
    }
}

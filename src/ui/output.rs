use colored::*;

use crate::menu::{format_ceiling, Menu};
use crate::preferences::{PreferenceKey, Preferences};
use crate::ui::markdown::MarkdownRenderer;
use crate::ui::view::{Speaker, TranscriptEntry};

pub fn display_banner(author: &str) {
    println!("{}", format!("{} Plans Food", author).bold().magenta());
    println!();
}

/// Display one transcript entry, rendering replies as Markdown
pub fn display_entry(renderer: &MarkdownRenderer, entry: &TranscriptEntry) {
    let time = entry.at.format("%H:%M").to_string();
    match entry.speaker {
        Speaker::User => {
            println!("{} {}", format!("[{}] you:", time).dimmed(), entry.text.bold());
        }
        Speaker::Agent | Speaker::System => {
            println!("{}", format!("[{}] waiter:", time).dimmed());
            print!("{}", renderer.render(&entry.text));
        }
    }
    println!();
}

/// Filtered menu as printable text. Categories with nothing under the
/// ceiling still print their heading.
pub fn render_menu(menu: &Menu, ceiling: f64, width: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}\n\n",
        format!("Menu (items under ${})", format_ceiling(ceiling)).bold()
    ));

    for category in menu.categories() {
        output.push_str(&format!("{}\n", category.title.bold().cyan()));
        let items = category.items_below(ceiling);
        if items.is_empty() {
            output.push_str(&format!("  {}\n", "nothing under the ceiling".dimmed()));
        }
        for item in items {
            let name_width = item.name.chars().count();
            let price_width = item.display_price.chars().count();
            let dots = width.saturating_sub(name_width + price_width + 4).max(2);
            output.push_str(&format!(
                "  {} {} {}\n",
                item.name,
                ".".repeat(dots).dimmed(),
                item.display_price.green()
            ));
        }
        output.push('\n');
    }

    output
}

pub fn display_menu(menu: &Menu, ceiling: f64, width: usize) {
    print!("{}", render_menu(menu, ceiling, width));
}

pub fn render_preferences(preferences: &Preferences) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "My Food Preferences".bold()));
    for key in PreferenceKey::ALL {
        let value = preferences.get(key);
        let shown = if value.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            value.to_string()
        };
        output.push_str(&format!("  {}: {}\n", key.label().cyan(), shown));
    }
    output
}

pub fn display_preferences(preferences: &Preferences) {
    print!("{}", render_preferences(preferences));
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

/// Dimmed status line, shown only in verbose mode
pub fn display_status(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{}", format!("[menuchat] {}", message).dimmed());
    }
}

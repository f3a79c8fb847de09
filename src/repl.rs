//! Interactive terminal session.

use colored::*;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::CompletionBackend;
use crate::error::Result;
use crate::preferences::{PreferenceKey, PreferenceStore, Preferences};
use crate::session::MenuSession;
use crate::ui::{self, MarkdownRenderer, ViewMode, GREETING, LOADING_PLACEHOLDER};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Query(String),
    ShowMenu,
    Home,
    ShowChat,
    ShowPrefs,
    SetPref(PreferenceKey, String),
    ClearPrefs,
    Help,
    Quit,
    Invalid(String),
}

/// Lines starting with `/` are commands; anything else, including an empty
/// line, is a query.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix('/') else {
        return Command::Query(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (command, ""),
    };

    match name {
        "menu" => Command::ShowMenu,
        "home" | "back" => Command::Home,
        "chat" => Command::ShowChat,
        "prefs" => Command::ShowPrefs,
        "clear" => Command::ClearPrefs,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "set" => {
            let (key, value) = match rest.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim_start()),
                None => (rest, ""),
            };
            match key.parse::<PreferenceKey>() {
                Ok(key) => Command::SetPref(key, value.to_string()),
                Err(e) => Command::Invalid(e.to_string()),
            }
        }
        other => Command::Invalid(format!("unknown command '/{}'", other)),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}   show the full menu", "/menu".cyan());
    println!("  {}   back to the home view", "/home".cyan());
    println!("  {}   show the conversation so far", "/chat".cyan());
    println!("  {}  show your food preferences", "/prefs".cyan());
    println!(
        "  {} <dietary|dislikes|likes> <text>  store a preference",
        "/set".cyan()
    );
    println!("  {}  remove all preferences", "/clear".cyan());
    println!("  {}   leave", "/quit".cyan());
    println!("Anything else is sent to the waiter.");
}

/// Printable preferences, or the message to show when the store can't be read.
fn preferences_report(preferences: Result<Preferences>) -> std::result::Result<String, String> {
    preferences
        .map(|preferences| ui::render_preferences(&preferences))
        .map_err(|e| e.to_string())
}

fn print_prompt() {
    print!("{} ", ">".magenta().bold());
    let _ = io::stdout().flush();
}

fn render_mode<B, S>(
    session: &MenuSession<B, S>,
    renderer: &MarkdownRenderer,
    author: &str,
) where
    B: CompletionBackend,
    S: PreferenceStore,
{
    match session.view().mode() {
        ViewMode::Home => {
            ui::display_banner(author);
            println!("{}", GREETING.italic());
            println!("{}", "See Full Menu: /menu    Preferences: /prefs    Help: /help".dimmed());
        }
        ViewMode::Chat => {
            for entry in session.view().display_entries() {
                ui::display_entry(renderer, &entry);
            }
        }
        ViewMode::FullMenu => {
            ui::display_menu(
                session.menu(),
                session.template().price_ceiling,
                renderer.width(),
            );
            println!("{}", "Go Back: /home".dimmed());
        }
    }
}

pub async fn run_repl<B, S>(
    session: &mut MenuSession<B, S>,
    author: &str,
    verbose: bool,
) -> Result<()>
where
    B: CompletionBackend,
    S: PreferenceStore,
{
    let renderer = MarkdownRenderer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render_mode(session, &renderer, author);

    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Home => {
                session.view_mut().go_home();
                render_mode(session, &renderer, author);
            }
            Command::ShowMenu => {
                session.view_mut().show_full_menu();
                render_mode(session, &renderer, author);
            }
            Command::ShowChat => {
                session.view_mut().show_chat();
                render_mode(session, &renderer, author);
            }
            Command::ShowPrefs => match preferences_report(session.preferences()) {
                Ok(report) => print!("{}", report),
                Err(message) => ui::display_error(&message),
            },
            Command::SetPref(key, value) => match session.set_preference(key, &value) {
                Ok(()) => println!("{}", format!("Saved {}.", key.label()).green()),
                Err(e) => ui::display_error(&e.to_string()),
            },
            Command::ClearPrefs => match session.clear_preferences() {
                Ok(()) => println!("{}", "Preferences cleared.".green()),
                Err(e) => ui::display_error(&e.to_string()),
            },
            Command::Invalid(message) => ui::display_error(&message),
            Command::Query(query) => {
                println!("{}", LOADING_PLACEHOLDER.dimmed());
                ui::display_status(verbose, &format!("query: {:?}", query));
                match session.submit(&query).await {
                    // Only the newest reply is printed, like scrolling to the bottom
                    Ok(entry) => ui::display_entry(&renderer, entry),
                    Err(e) => ui::display_error(&e.to_string()),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(
            parse_command("something with chickpeas"),
            Command::Query("something with chickpeas".to_string())
        );
        assert_eq!(parse_command(""), Command::Query(String::new()));
    }

    #[test]
    fn parses_set_command() {
        assert_eq!(
            parse_command("/set dislikes olives, anchovies"),
            Command::SetPref(PreferenceKey::DislikedFoods, "olives, anchovies".to_string())
        );
        assert_eq!(
            parse_command("/set dietary"),
            Command::SetPref(PreferenceKey::DietaryRestrictions, String::new())
        );
        assert!(matches!(parse_command("/set mood hungry"), Command::Invalid(_)));
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("/menu"), Command::ShowMenu);
        assert_eq!(parse_command("/back"), Command::Home);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert!(matches!(parse_command("/dance"), Command::Invalid(_)));
    }

    #[test]
    fn unreadable_preferences_become_a_message() {
        let failed = Err(crate::error::MenuChatError::PreferenceError(
            "permission denied".to_string(),
        ));
        let report = preferences_report(failed).unwrap_err();
        assert!(report.contains("permission denied"));

        colored::control::set_override(false);
        let stored = Preferences {
            liked_foods: "lamb".to_string(),
            ..Preferences::default()
        };
        let report = preferences_report(Ok(stored)).unwrap();
        assert!(report.contains("Foods I Like: lamb"));
    }
}

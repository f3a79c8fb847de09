use colored::*;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use terminal_size::{terminal_size, Width};
use termimad::crossterm::style::Color;
use termimad::MadSkin;

const DEFAULT_WIDTH: usize = 80;
const MAX_WIDTH: usize = 100;

/// Renders model replies for the terminal. Prose goes through `termimad`;
/// fenced code blocks are boxed and highlighted with `syntect`.
pub struct MarkdownRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    width: usize,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_width(terminal_width())
    }

    pub fn with_width(width: usize) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Magenta);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            width: width.clamp(20, MAX_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();
        let mut in_code_block = false;

        for line in markdown.lines() {
            if let Some(fence_rest) = line.trim_start().strip_prefix("```") {
                if in_code_block {
                    output.push_str(&self.highlight_code(&code_content, code_lang.as_deref()));
                    output.push_str(&self.box_footer());
                    code_content.clear();
                    code_lang = None;
                    in_code_block = false;
                } else {
                    let lang = fence_rest.trim();
                    code_lang = if lang.is_empty() {
                        None
                    } else {
                        Some(lang.to_string())
                    };
                    output.push_str(&self.box_header(code_lang.as_deref().unwrap_or("code")));
                    in_code_block = true;
                }
                continue;
            }

            if in_code_block {
                code_content.push_str(line);
                code_content.push('\n');
                continue;
            }

            if line.trim().is_empty() {
                output.push('\n');
            } else {
                output.push_str(&self.skin.text(line, Some(self.width)).to_string());
            }
        }

        // Unterminated code block
        if in_code_block {
            output.push_str(&self.highlight_code(&code_content, code_lang.as_deref()));
            output.push_str(&self.box_footer());
        }

        output
    }

    fn box_header(&self, label: &str) -> String {
        let rule = "─".repeat(self.width.saturating_sub(label.chars().count() + 4));
        format!("{}[{}]{}\n", "┌─".dimmed(), label.cyan(), rule.dimmed())
    }

    fn box_footer(&self) -> String {
        format!("{}{}\n", "└".dimmed(), "─".repeat(self.width - 1).dimmed())
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let theme = &self.theme_set.themes["Solarized (dark)"];

        let syntax = lang
            .and_then(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut output = String::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let ranges: Vec<(Style, &str)> = ranges;
                    output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
                }
                Err(_) => output.push_str(line),
            }
        }
        // Reset colors left open by the last escaped range
        if !output.is_empty() {
            output.push_str("\x1b[0m");
        }

        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

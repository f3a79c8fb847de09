//! Builds the single prompt string sent for a menu query.

use crate::menu::{format_ceiling, Menu};
use crate::preferences::Preferences;

/// `{ceiling}` is replaced by the configured price ceiling.
pub const DEFAULT_INSTRUCTION: &str = "Act as a knowledgeable waiter and only suggest items priced under ${ceiling} and suggest a max of 3items based on the user's query on this menu in the JSON format: ";

pub const DEFAULT_PRICE_CEILING: f64 = 22.0;

const DIETARY_DIRECTIVE: &str = " Do not suggest items with the following dietary restrictions: ";
const DISLIKED_DIRECTIVE: &str = " You can suggest items in the following list only if the user asks for them, but make sure to mention you recognize they do not usually like the following ingredients: ";
const FAVOR_DIRECTIVE: &str = " Favor items with the following ingredients: ";

#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub instruction: String,
    pub price_ceiling: f64,
    /// Fill the "favor" directive from the disliked-foods field instead of
    /// the liked-foods field, matching prompts built by older versions.
    pub favor_disliked_foods: bool,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
            price_ceiling: DEFAULT_PRICE_CEILING,
            favor_disliked_foods: false,
        }
    }
}

impl PromptTemplate {
    pub fn instruction_text(&self) -> String {
        self.instruction
            .replace("{ceiling}", &format_ceiling(self.price_ceiling))
    }

    fn favored<'a>(&self, preferences: &'a Preferences) -> &'a str {
        if self.favor_disliked_foods {
            &preferences.disliked_foods
        } else {
            &preferences.liked_foods
        }
    }
}

/// Concatenates instruction, menu JSON, query and the preference directives.
///
/// Pure string assembly: nothing is escaped, trimmed or truncated, and the
/// same inputs always produce the same output.
pub fn compose_prompt(
    query: &str,
    menu: &Menu,
    preferences: &Preferences,
    template: &PromptTemplate,
) -> String {
    let menu_json = menu.to_json();
    let favored = template.favored(preferences);

    let instruction = template.instruction_text();

    let mut prompt = String::with_capacity(
        instruction.len()
            + menu_json.len()
            + 1
            + query.len()
            + DIETARY_DIRECTIVE.len()
            + preferences.dietary_restrictions.len()
            + DISLIKED_DIRECTIVE.len()
            + preferences.disliked_foods.len()
            + FAVOR_DIRECTIVE.len()
            + favored.len(),
    );

    prompt.push_str(&instruction);
    prompt.push_str(&menu_json);
    prompt.push(' ');
    prompt.push_str(query);
    prompt.push_str(DIETARY_DIRECTIVE);
    prompt.push_str(&preferences.dietary_restrictions);
    prompt.push_str(DISLIKED_DIRECTIVE);
    prompt.push_str(&preferences.disliked_foods);
    prompt.push_str(FAVOR_DIRECTIVE);
    prompt.push_str(favored);
    prompt
}

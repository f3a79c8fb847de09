use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "menuchat")]
#[command(about = "Menu recommendations from an LLM, in your terminal", long_about = None)]
pub struct Args {
    #[arg(long = "menu", help = "Show the full menu, filtered by the price ceiling")]
    pub show_menu: bool,

    #[arg(long = "prefs", help = "Show stored food preferences")]
    pub show_prefs: bool,

    #[arg(long = "set-dietary", value_name = "TEXT", help = "Store dietary restrictions")]
    pub set_dietary: Option<String>,

    #[arg(long = "set-dislikes", value_name = "TEXT", help = "Store foods you don't like")]
    pub set_dislikes: Option<String>,

    #[arg(long = "set-likes", value_name = "TEXT", help = "Store foods you like")]
    pub set_likes: Option<String>,

    #[arg(long = "clear-prefs", help = "Remove all stored preferences")]
    pub clear_prefs: bool,

    #[arg(
        long = "print-prompt",
        help = "Print the composed prompt instead of sending it"
    )]
    pub print_prompt: bool,

    #[arg(
        long = "agent",
        help = "Answer through the tool-calling waiter agent instead of a single prompt"
    )]
    pub agent: bool,

    #[arg(long = "max-turns", value_name = "N", help = "Limit agent requests per query")]
    pub max_turns: Option<usize>,

    #[arg(long = "menu-file", value_name = "PATH", help = "Menu JSON document to use")]
    pub menu_file: Option<PathBuf>,

    #[arg(long = "model", help = "Model identifier to request")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(
        long = "price-ceiling",
        value_name = "AMOUNT",
        help = "Only show and suggest items priced below this"
    )]
    pub price_ceiling: Option<f64>,

    #[arg(long = "config-init", help = "Write an example config file")]
    pub config_init: bool,

    #[arg(short = 'v', long = "verbose", help = "Show request details and debug logs")]
    pub verbose: bool,

    #[arg(help = "What you feel like eating; starts an interactive session when omitted")]
    pub query: Vec<String>,
}

impl Args {
    pub fn query_text(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// True when a preference write or clear was requested.
    pub fn edits_preferences(&self) -> bool {
        self.clear_prefs
            || self.set_dietary.is_some()
            || self.set_dislikes.is_some()
            || self.set_likes.is_some()
    }
}

pub mod markdown;
pub mod output;
pub mod view;

pub use markdown::{terminal_width, MarkdownRenderer};
pub use output::{
    display_banner, display_entry, display_error, display_menu, display_preferences,
    display_status, render_menu, render_preferences,
};
pub use view::{ChatView, Speaker, TranscriptEntry, ViewMode, GREETING, LOADING_PLACEHOLDER};

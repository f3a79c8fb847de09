pub mod agent;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod models;
pub mod preferences;
pub mod prompt;
pub mod repl;
pub mod session;
pub mod ui;
pub mod waiter;

pub use error::{MenuChatError, Result};

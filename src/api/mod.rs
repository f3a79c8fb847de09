pub mod client;
pub mod models;
pub mod response;

pub use client::{CompletionBackend, OpenAiClient};
pub use models::{ChatCompletion, Choice, RequestBody};

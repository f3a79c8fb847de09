//! One-shot menu suggestions: one prompt in, the first candidate's text out.

use crate::api::{CompletionBackend, RequestBody};
use crate::error::Result;
use crate::models::Message;

/// Shown when the endpoint answers with no candidates at all.
pub const FALLBACK_MESSAGE: &str = "Something went wrong.  Please try again.";

/// A single result candidate returned by the completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub output: String,
    pub finish_reason: Option<String>,
}

pub struct ChatClient<B> {
    backend: B,
    model: String,
}

impl<B: CompletionBackend> ChatClient<B> {
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends `prompt` as a lone user message and returns every candidate.
    /// A null content becomes empty text. Transport errors propagate.
    pub async fn post_message(&self, prompt: &str) -> Result<Vec<Candidate>> {
        let request = RequestBody::new(self.model.clone(), vec![Message::user(prompt)]);
        let response = self.backend.complete(&request).await?;

        Ok(response
            .choices
            .into_iter()
            .map(|choice| Candidate {
                output: choice.message.content.unwrap_or_default(),
                finish_reason: choice.finish_reason,
            })
            .collect())
    }

    /// The text the user sees: the first candidate, or [`FALLBACK_MESSAGE`].
    pub async fn suggest(&self, prompt: &str) -> Result<String> {
        let candidates = self.post_message(prompt).await?;
        Ok(visible_reply(&candidates))
    }
}

pub fn visible_reply(candidates: &[Candidate]) -> String {
    match candidates.first() {
        Some(candidate) => candidate.output.clone(),
        None => {
            tracing::warn!("completion returned no candidates; showing fallback message");
            FALLBACK_MESSAGE.to_string()
        }
    }
}

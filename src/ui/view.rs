use chrono::{DateTime, Local};

use crate::error::{MenuChatError, Result};

pub const GREETING: &str = "What do you feel like eating today?";
pub const LOADING_PLACEHOLDER: &str = "Processing...";

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Home,
    Chat,
    FullMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The fixed greeting that opens every transcript.
    Agent,
    User,
    /// A reply from the model (or the fallback message).
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

impl TranscriptEntry {
    fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// View state shared by the interactive session and one-shot mode: display
/// mode, the in-flight flag and the transcript of this run.
#[derive(Debug, Default)]
pub struct ChatView {
    mode: ViewMode,
    query: String,
    loading: bool,
    transcript: Vec<TranscriptEntry>,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn go_home(&mut self) {
        self.mode = ViewMode::Home;
    }

    pub fn show_full_menu(&mut self) {
        self.mode = ViewMode::FullMenu;
    }

    pub fn show_chat(&mut self) {
        self.mode = ViewMode::Chat;
    }

    pub fn set_query(&mut self, query: &str) {
        if !self.loading {
            self.query = query.to_string();
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// What the input line shows: the placeholder while a request is out.
    pub fn input_display(&self) -> &str {
        if self.loading {
            LOADING_PLACEHOLDER
        } else {
            &self.query
        }
    }

    /// Records the user's query and marks a request as outstanding. Fails
    /// while another request is still in flight.
    pub fn begin_submit(&mut self) -> Result<String> {
        if self.loading {
            return Err(MenuChatError::Other(
                "a request is already in progress".to_string(),
            ));
        }
        let query = self.query.clone();
        self.transcript.push(TranscriptEntry::now(Speaker::User, query.clone()));
        self.loading = true;
        Ok(query)
    }

    /// Appends the reply, switches to the chat view and clears the input.
    pub fn finish_submit(&mut self, reply: impl Into<String>) -> &TranscriptEntry {
        self.transcript.push(TranscriptEntry::now(Speaker::System, reply));
        self.mode = ViewMode::Chat;
        self.query.clear();
        self.loading = false;
        &self.transcript[self.transcript.len() - 1]
    }

    /// Clears the in-flight flag after a failed request. The user's entry
    /// stays in the transcript and the query is kept for another attempt.
    pub fn abort_submit(&mut self) {
        self.loading = false;
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn latest(&self) -> Option<&TranscriptEntry> {
        self.transcript.last()
    }

    /// Transcript as displayed: greeting first, then every exchange.
    pub fn display_entries(&self) -> Vec<TranscriptEntry> {
        let greeting = TranscriptEntry {
            speaker: Speaker::Agent,
            text: GREETING.to_string(),
            at: self
                .transcript
                .first()
                .map(|entry| entry.at)
                .unwrap_or_else(Local::now),
        };
        std::iter::once(greeting)
            .chain(self.transcript.iter().cloned())
            .collect()
    }
}

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use menuchat::api::{ChatCompletion, CompletionBackend, RequestBody};
use menuchat::error::{MenuChatError, Result};
use menuchat::models::{Message, Role, ToolCall};

/// Backend that answers from a fixed script and records every request.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<ChatCompletion>>>,
    repeat: Option<ChatCompletion>,
    requests: Mutex<Vec<RequestBody>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<ChatCompletion>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with the same completion.
    pub fn repeating(response: ChatCompletion) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            repeat: Some(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: MenuChatError) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RequestBody> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &RequestBody) -> Result<ChatCompletion> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => self
                .repeat
                .clone()
                .ok_or_else(|| MenuChatError::Other("script exhausted".to_string())),
        }
    }
}

pub fn text_reply(content: &str) -> ChatCompletion {
    ChatCompletion::from_messages(vec![Message::assistant(content)])
}

pub fn no_candidates() -> ChatCompletion {
    ChatCompletion::default()
}

pub fn tool_call_reply(calls: Vec<ToolCall>) -> ChatCompletion {
    ChatCompletion::from_messages(vec![Message {
        role: Role::Assistant,
        content: None,
        tool_calls: Some(calls),
        tool_call_id: None,
    }])
}

pub fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall::function(id, name, arguments)
}

pub const SAMPLE_MENU: &str = r#"{
  "allItems": {
    "featuredItems": {
      "title": "Chef's Recommendations",
      "items": [
        { "name": "Spicy Beef Rice Bowl", "displayPrice": "$19.99" },
        { "name": "Salmon Plate", "displayPrice": "$22.00" },
        { "name": "Wagyu Steak", "displayPrice": "$25.00" }
      ]
    },
    "sides": {
      "items": [
        { "name": "Miso Soup", "displayPrice": "$4.50" },
        { "name": "Oysters", "displayPrice": "Market Price" }
      ]
    }
  }
}"#;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Message;

#[derive(Debug, Serialize, Clone)]
pub struct RequestBody {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
}

impl RequestBody {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Non-streaming `/chat/completions` response. Only the candidate list is
/// interpreted; usage and ids are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            id: None,
            model: None,
            choices: messages
                .into_iter()
                .enumerate()
                .map(|(index, message)| Choice {
                    index: index as u32,
                    message,
                    finish_reason: None,
                })
                .collect(),
        }
    }
}

use crate::api::models::ChatCompletion;
use crate::error::{MenuChatError, Result};
use crate::models::{Message, ToolCall};

/// The message of the first candidate, which is the one every caller acts on.
pub fn first_message(response: &ChatCompletion) -> Result<&Message> {
    response
        .choices
        .first()
        .map(|choice| &choice.message)
        .ok_or(MenuChatError::EmptyResponse)
}

/// Extract content from the first candidate
pub fn extract_content(response: &ChatCompletion) -> Result<Option<String>> {
    Ok(first_message(response)?.content.clone())
}

/// Tool calls requested by the first candidate; an empty array counts as none.
pub fn parse_tool_calls(response: &ChatCompletion) -> Result<Option<Vec<ToolCall>>> {
    let message = first_message(response)?;
    match &message.tool_calls {
        Some(calls) if !calls.is_empty() => Ok(Some(calls.clone())),
        _ => Ok(None),
    }
}

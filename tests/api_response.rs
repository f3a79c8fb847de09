use menuchat::api::response::{extract_content, first_message, parse_tool_calls};
use menuchat::api::{ChatCompletion, RequestBody};
use menuchat::error::MenuChatError;
use menuchat::models::{Message, Role};
use serde_json::{json, Value};

fn completion(value: Value) -> ChatCompletion {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_extract_content_with_content() {
    let response = completion(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "content": "Hello, world!",
                "role": "assistant"
            },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 3 }
    }));

    let content = extract_content(&response).unwrap();
    assert_eq!(content, Some("Hello, world!".to_string()));
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
}

#[test]
fn test_extract_content_without_content() {
    let response = completion(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null
            }
        }]
    }));

    let content = extract_content(&response).unwrap();
    assert_eq!(content, None);
}

#[test]
fn test_extract_content_empty_choices() {
    let response = completion(json!({
        "choices": []
    }));

    let result = extract_content(&response);
    assert!(matches!(result, Err(MenuChatError::EmptyResponse)));
}

#[test]
fn test_missing_choices_is_empty() {
    let response = completion(json!({ "id": "x" }));
    assert!(response.choices.is_empty());
    assert!(first_message(&response).is_err());
}

#[test]
fn test_parse_tool_calls_with_tools() {
    let response = completion(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {
                        "id": "call_123",
                        "type": "function",
                        "function": {
                            "name": "list_items",
                            "arguments": "{\"category\": \"bowls\"}"
                        }
                    }
                ]
            }
        }]
    }));

    let calls = parse_tool_calls(&response).unwrap().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_123");
    assert_eq!(calls[0].tool_type, "function");
    assert_eq!(calls[0].function.name, "list_items");
    assert_eq!(calls[0].function.arguments, "{\"category\": \"bowls\"}");
}

#[test]
fn test_parse_tool_calls_without_tools() {
    let response = completion(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "No tools needed"
            }
        }]
    }));

    let tool_calls = parse_tool_calls(&response).unwrap();
    assert!(tool_calls.is_none());
}

#[test]
fn test_parse_tool_calls_empty_array() {
    let response = completion(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "tool_calls": []
            }
        }]
    }));

    let tool_calls = parse_tool_calls(&response).unwrap();
    assert!(tool_calls.is_none());
    assert!(!first_message(&response).unwrap().requests_tools());
}

#[test]
fn test_request_body_wire_format() {
    let body = RequestBody::new(
        "gpt-4o-mini",
        vec![
            Message::system("be brief"),
            Message::tool_result("call_1", None),
        ],
    );
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(value["model"], "gpt-4o-mini");
    assert!(value.get("tools").is_none());
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["role"], "tool");
    assert_eq!(value["messages"][1]["tool_call_id"], "call_1");
    assert!(value["messages"][1]["content"].is_null());
    assert!(value["messages"][0].get("tool_calls").is_none());

    let with_tools = body.with_tools(vec![json!({"type": "function"})]);
    let value = serde_json::to_value(&with_tools).unwrap();
    assert_eq!(value["tools"].as_array().unwrap().len(), 1);
}

#[test]
fn test_role_display() {
    assert_eq!(Role::Assistant.to_string(), "assistant");
    assert_eq!(Role::Tool.to_string(), "tool");
}

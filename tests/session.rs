mod common;

use std::sync::Arc;

use common::{call, text_reply, tool_call_reply, ScriptedBackend};
use menuchat::agent::ToolPolicy;
use menuchat::chat::FALLBACK_MESSAGE;
use menuchat::error::MenuChatError;
use menuchat::menu::Menu;
use menuchat::models::Role;
use menuchat::preferences::{MemoryPreferenceStore, PreferenceKey};
use menuchat::prompt::PromptTemplate;
use menuchat::session::{MenuSession, Responder};
use menuchat::ui::{Speaker, ViewMode, GREETING};

fn session(backend: ScriptedBackend) -> MenuSession<ScriptedBackend, MemoryPreferenceStore> {
    MenuSession::new(
        backend,
        MemoryPreferenceStore::new(),
        Arc::new(Menu::bundled().unwrap()),
        PromptTemplate::default(),
        "test-model",
    )
}

fn agent_session(
    backend: ScriptedBackend,
    max_turns: Option<usize>,
) -> MenuSession<ScriptedBackend, MemoryPreferenceStore> {
    session(backend).with_responder(Responder::Agent {
        max_turns,
        tool_policy: ToolPolicy::Permissive,
    })
}

#[tokio::test]
async fn test_prompt_submit_appends_reply_and_switches_to_chat() {
    let mut session = session(ScriptedBackend::new(vec![text_reply(
        "Try the Fattoush Salad.",
    )]));
    assert_eq!(session.view().mode(), ViewMode::Home);

    let entry = session.submit("something light").await.unwrap();
    assert_eq!(entry.speaker, Speaker::System);
    assert_eq!(entry.text, "Try the Fattoush Salad.");

    let view = session.view();
    assert_eq!(view.mode(), ViewMode::Chat);
    assert_eq!(view.query(), "");
    assert!(!view.is_loading());
    assert_eq!(view.transcript().len(), 2);
    assert_eq!(view.transcript()[0].speaker, Speaker::User);
    assert_eq!(view.transcript()[0].text, "something light");

    let entries = view.display_entries();
    assert_eq!(entries[0].speaker, Speaker::Agent);
    assert_eq!(entries[0].text, GREETING);
}

#[tokio::test]
async fn test_prompt_submit_sends_composed_prompt() {
    let mut session = session(ScriptedBackend::new(vec![text_reply("ok")]));
    session
        .set_preference(PreferenceKey::DietaryRestrictions, "shellfish")
        .unwrap();
    let expected = session.compose("dinner").unwrap();
    assert!(expected.contains("dietary restrictions: shellfish"));

    session.submit("dinner").await.unwrap();

    let requests = session.backend().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "test-model");
    assert_eq!(requests[0].messages[0].content.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_empty_candidates_show_fallback() {
    let mut session = session(ScriptedBackend::new(vec![common::no_candidates()]));

    let entry = session.submit("anything").await.unwrap();
    assert_eq!(entry.text, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_failed_submit_clears_loading() {
    let mut session = session(ScriptedBackend::failing(MenuChatError::ApiError {
        status: 401,
        message: "bad key".to_string(),
    }));

    let result = session.submit("lunch").await;
    assert!(matches!(result, Err(MenuChatError::ApiError { status: 401, .. })));

    let view = session.view();
    assert!(!view.is_loading());
    assert_eq!(view.query(), "lunch");
    assert_eq!(view.transcript().len(), 1);
    assert_eq!(view.mode(), ViewMode::Home);
}

#[tokio::test]
async fn test_preferences_can_be_cleared() {
    let session = session(ScriptedBackend::new(vec![]));
    session
        .set_preference(PreferenceKey::LikedFoods, "falafel")
        .unwrap();
    assert_eq!(session.preferences().unwrap().liked_foods, "falafel");

    session.clear_preferences().unwrap();
    assert_eq!(session.preferences().unwrap().liked_foods, "");
}

#[tokio::test]
async fn test_agent_browses_menu_with_tools() {
    let backend = ScriptedBackend::new(vec![
        tool_call_reply(vec![call("call_1", "list_items", r#"{"category": "bowls"}"#)]),
        text_reply("The Spicy Beef Rice Bowl is a good pick."),
    ]);
    let mut session = agent_session(backend, None);

    let entry = session.submit("a bowl please").await.unwrap();
    assert_eq!(entry.text, "The Spicy Beef Rice Bowl is a good pick.");

    let requests = session.backend().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert!(requests[0].tools.as_ref().unwrap().len() >= 3);

    let tool_message = requests[1]
        .messages
        .iter()
        .find(|m| m.role == Role::Tool)
        .and_then(|m| m.content.clone())
        .unwrap();
    assert!(tool_message.contains("Spicy Beef Rice Bowl"));
    assert!(tool_message.contains("Mediterranean Grain Bowl"));
    assert!(!tool_message.contains("Poke Bowl"));
}

#[tokio::test]
async fn test_agent_history_carries_across_submits() {
    let backend = ScriptedBackend::new(vec![text_reply("first"), text_reply("second")]);
    let mut session = agent_session(backend, None);

    session.submit("one").await.unwrap();
    let entry = session.submit("two").await.unwrap();
    assert_eq!(entry.text, "second");

    let requests = session.backend().requests();
    // system + user + assistant + user
    assert_eq!(requests[1].messages.len(), 4);
    assert_eq!(requests[1].messages[2].content.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_agent_turn_limit_shows_fallback() {
    let backend = ScriptedBackend::repeating(tool_call_reply(vec![call(
        "call_1",
        "list_categories",
        "{}",
    )]));
    let mut session = agent_session(backend, Some(2));

    let entry = session.submit("keep looking").await.unwrap();
    assert_eq!(entry.text, FALLBACK_MESSAGE);
    assert_eq!(session.backend().request_count(), 2);
}

#[tokio::test]
async fn test_agent_find_item_and_unknown_category() {
    let backend = ScriptedBackend::new(vec![
        tool_call_reply(vec![
            call("call_1", "find_item", r#"{"name": "kale caesar"}"#),
            call("call_2", "find_item", r#"{"name": "Pizza"}"#),
            call("call_3", "list_items", r#"{"category": "desserts"}"#),
            call("call_4", "list_items", r#"{"max_price": 12}"#),
        ]),
        text_reply("done"),
    ]);
    let mut session = agent_session(backend, None);

    session.submit("what's there").await.unwrap();

    let requests = session.backend().requests();
    let tool_outputs: Vec<String> = requests[1]
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.content.clone())
        .collect();
    assert_eq!(tool_outputs.len(), 4);
    assert!(tool_outputs[0].contains("Kale Caesar"));
    assert!(tool_outputs[0].contains("Market Price"));
    assert_eq!(tool_outputs[1], "No item named 'Pizza'");
    assert_eq!(tool_outputs[2], "Unknown category: desserts");
    assert!(tool_outputs[3].contains("Fattoush Salad"));
    assert!(tool_outputs[3].contains("Hummus & Pita"));
    assert!(!tool_outputs[3].contains("Crispy Falafel Wrap"));
}

#[tokio::test]
async fn test_agent_instructions_include_preferences() {
    let backend = ScriptedBackend::new(vec![text_reply("ok")]);
    let mut session = agent_session(backend, None);
    session
        .set_preference(PreferenceKey::DislikedFoods, "eggplant")
        .unwrap();
    session
        .set_preference(PreferenceKey::LikedFoods, "lamb")
        .unwrap();

    session.submit("dinner").await.unwrap();

    let requests = session.backend().requests();
    let system = requests[0].messages[0].content.clone().unwrap();
    assert!(system.contains("under $22"));
    assert!(system.contains("eggplant"));
    assert!(system.ends_with("Favor items with the following ingredients: lamb"));
}

#[tokio::test]
async fn test_failed_agent_run_does_not_poison_history() {
    let backend = ScriptedBackend::new(vec![
        tool_call_reply(vec![call("call_bad", "find_item", "not json")]),
        text_reply("Here is a bowl."),
    ]);
    let mut session = agent_session(backend, None);

    let result = session.submit("first try").await;
    assert!(matches!(result, Err(MenuChatError::ToolArguments { .. })));

    let entry = session.submit("second try").await.unwrap();
    assert_eq!(entry.text, "Here is a bowl.");

    let requests = session.backend().requests();
    let retry = &requests[1].messages;
    // system + the new user message only
    assert_eq!(retry.len(), 2);
    assert_eq!(retry[1].content.as_deref(), Some("second try"));
    assert!(retry.iter().all(|m| !m.requests_tools()));
}

mod common;

use common::SAMPLE_MENU;
use menuchat::menu::Menu;
use menuchat::preferences::Preferences;
use menuchat::prompt::{compose_prompt, PromptTemplate, DEFAULT_INSTRUCTION};

fn preferences() -> Preferences {
    Preferences {
        dietary_restrictions: "gluten".to_string(),
        disliked_foods: "olives".to_string(),
        liked_foods: "chickpeas".to_string(),
    }
}

#[test]
fn test_prompt_layout() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let prompt = compose_prompt(
        "something warm",
        &menu,
        &preferences(),
        &PromptTemplate::default(),
    );

    let expected = format!(
        "Act as a knowledgeable waiter and only suggest items priced under $22 and suggest a max of 3items based on the user's query on this menu in the JSON format: {} something warm Do not suggest items with the following dietary restrictions: gluten You can suggest items in the following list only if the user asks for them, but make sure to mention you recognize they do not usually like the following ingredients: olives Favor items with the following ingredients: chickpeas",
        menu.to_json()
    );
    assert_eq!(prompt, expected);
}

#[test]
fn test_menu_json_keeps_document_order() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let json = menu.to_json();

    assert!(json.starts_with(r#"{"allItems":{"featuredItems":"#));
    assert!(json.find("Spicy Beef Rice Bowl").unwrap() < json.find("Wagyu Steak").unwrap());
    assert!(!json.contains('\n'));
}

#[test]
fn test_prompt_is_deterministic() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let template = PromptTemplate::default();

    let first = compose_prompt("tacos", &menu, &preferences(), &template);
    let second = compose_prompt("tacos", &menu, &preferences(), &template);
    assert_eq!(first, second);
}

#[test]
fn test_empty_preferences_leave_directives_blank() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let prompt = compose_prompt("", &menu, &Preferences::default(), &PromptTemplate::default());

    assert!(prompt.contains(&format!("{}  Do not suggest", menu.to_json())));
    assert!(prompt.ends_with("Favor items with the following ingredients: "));
}

#[test]
fn test_favor_uses_liked_foods_by_default() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let prompt = compose_prompt("lunch", &menu, &preferences(), &PromptTemplate::default());

    assert!(prompt.ends_with("Favor items with the following ingredients: chickpeas"));
}

#[test]
fn test_favor_disliked_foods_flag() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let template = PromptTemplate {
        favor_disliked_foods: true,
        ..PromptTemplate::default()
    };
    let prompt = compose_prompt("lunch", &menu, &preferences(), &template);

    assert!(prompt.ends_with("Favor items with the following ingredients: olives"));
    assert!(!prompt.contains("chickpeas"));
}

#[test]
fn test_custom_ceiling_in_instruction() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let template = PromptTemplate {
        price_ceiling: 15.5,
        ..PromptTemplate::default()
    };
    let prompt = compose_prompt("lunch", &menu, &preferences(), &template);

    assert!(prompt.starts_with("Act as a knowledgeable waiter and only suggest items priced under $15.5 "));
    assert!(DEFAULT_INSTRUCTION.contains("{ceiling}"));
}

#[test]
fn test_query_is_not_escaped() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let query = "  \"quoted\" {braces}\nnew line  ";
    let prompt = compose_prompt(query, &menu, &Preferences::default(), &PromptTemplate::default());

    assert!(prompt.contains(&format!(" {} Do not suggest", query)));
}

#[test]
fn test_ceiling_substitution_changes_instruction_length() {
    let menu = Menu::from_json_str(SAMPLE_MENU).unwrap();
    let template = PromptTemplate {
        instruction: "Under ${ceiling}: ".to_string(),
        price_ceiling: 1234.75,
        ..PromptTemplate::default()
    };

    let prompt = compose_prompt("q", &menu, &Preferences::default(), &template);

    let expected_start = format!("Under $1234.75: {} q", menu.to_json());
    assert!(prompt.starts_with(&expected_start));
}

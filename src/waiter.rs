//! The tool-calling waiter: an [`Agent`] that looks the menu up through
//! tools instead of receiving it pasted into the prompt.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::agent::{Agent, ContextVariables, Tool, ToolArguments, ToolResult};
use crate::menu::{format_ceiling, Menu, MenuItem};
use crate::preferences::Preferences;
use crate::prompt::PromptTemplate;

pub const WAITER_NAME: &str = "Waiter";

/// Context key holding the price ceiling the menu tools enforce.
pub const PRICE_CEILING_KEY: &str = "price_ceiling";

pub fn waiter_instructions(preferences: &Preferences, template: &PromptTemplate) -> String {
    let favored = if template.favor_disliked_foods {
        &preferences.disliked_foods
    } else {
        &preferences.liked_foods
    };

    format!(
        "Act as a knowledgeable waiter. Only suggest items priced under ${ceiling} and suggest a max of 3 items based on the user's query. \
Use the menu tools to look up categories and items; never invent dishes. \
Do not suggest items with the following dietary restrictions: {dietary} \
You can suggest items the user does not usually like only if they ask for them, but mention you recognize they do not usually like: {disliked} \
Favor items with the following ingredients: {favored}",
        ceiling = format_ceiling(template.price_ceiling),
        dietary = preferences.dietary_restrictions,
        disliked = preferences.disliked_foods,
        favored = favored,
    )
}

pub fn waiter_context(template: &PromptTemplate) -> ContextVariables {
    let mut context = ContextVariables::new();
    context.insert(PRICE_CEILING_KEY.to_string(), json!(template.price_ceiling));
    context
}

pub fn waiter_agent(menu: Arc<Menu>, preferences: &Preferences, template: &PromptTemplate) -> Agent {
    let categories_menu = Arc::clone(&menu);
    let items_menu = Arc::clone(&menu);
    let find_menu = menu;

    Agent::new(WAITER_NAME, waiter_instructions(preferences, template))
        .with_tool(
            Tool::from_fn(
                "list_categories",
                "List the menu categories with their keys and titles.",
                move |_context, _arguments| list_categories(&categories_menu),
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            })),
        )
        .with_tool(
            Tool::from_fn(
                "list_items",
                "List menu items under the price ceiling, optionally for one category and a lower maximum price.",
                move |context, arguments| list_items(&items_menu, context, arguments),
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Category key from list_categories"
                    },
                    "max_price": {
                        "type": "number",
                        "description": "Only items strictly cheaper than this"
                    }
                },
                "additionalProperties": false
            })),
        )
        .with_tool(
            Tool::from_fn(
                "find_item",
                "Look up a single menu item by name (case-insensitive).",
                move |_context, arguments| find_item(&find_menu, arguments),
            )
            .with_parameters(json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" }
                },
                "required": ["name"],
                "additionalProperties": false
            })),
        )
}

fn list_categories(menu: &Menu) -> ToolResult {
    let categories: Vec<Value> = menu
        .categories()
        .iter()
        .map(|c| json!({ "key": c.key, "title": c.title, "items": c.items.len() }))
        .collect();
    serde_json::to_string(&categories).map_err(|e| e.to_string())
}

fn list_items(menu: &Menu, context: &ContextVariables, arguments: &ToolArguments) -> ToolResult {
    let ceiling = context
        .get(PRICE_CEILING_KEY)
        .and_then(Value::as_f64)
        .unwrap_or(f64::INFINITY);
    let limit = arguments
        .get("max_price")
        .and_then(Value::as_f64)
        .map(|max| max.min(ceiling))
        .unwrap_or(ceiling);

    let category = arguments.get_str("category");
    if let Some(key) = category {
        if menu.category(key).is_none() {
            return Ok(format!("Unknown category: {}", key));
        }
    }

    let items: Vec<Value> = menu
        .categories()
        .iter()
        .filter(|c| category.map(|key| c.key == key).unwrap_or(true))
        .flat_map(|c| {
            c.items_below(limit)
                .into_iter()
                .map(move |item| item_json(&c.title, item))
        })
        .collect();

    serde_json::to_string(&items).map_err(|e| e.to_string())
}

fn find_item(menu: &Menu, arguments: &ToolArguments) -> ToolResult {
    let name = arguments.require_str("name")?;
    let needle = name.to_lowercase();

    let found = menu
        .categories()
        .iter()
        .flat_map(|c| c.items.iter().map(move |item| (c, item)))
        .find(|(_, item)| item.name.to_lowercase() == needle)
        .map(|(c, item)| item_json(&c.title, item).to_string());

    Ok(found.unwrap_or_else(|| format!("No item named '{}'", name)))
}

fn item_json(category: &str, item: &MenuItem) -> Value {
    json!({
        "category": category,
        "name": item.name,
        "displayPrice": item.display_price,
    })
}

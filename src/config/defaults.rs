pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_AUTHOR: &str = "Mike Otte";

pub fn default_price_ceiling() -> f64 {
    crate::prompt::DEFAULT_PRICE_CEILING
}

pub fn default_favor_disliked_foods() -> bool {
    false
}

pub fn default_strict_tools() -> bool {
    false
}

pub const EXAMPLE_CONFIG: &str = r#"# menuchat configuration
# Precedence: command-line flags > environment variables > this file > defaults.

api:
  # endpoint: https://api.openai.com/v1
  # api_key: ${OPENAI_API_KEY}
  # request_timeout_secs: 60

model:
  default_model: gpt-4o-mini

agent:
  # max_turns: 8
  strict_tools: false

menu:
  # path: ./menu.json
  price_ceiling: 22

preferences:
  # dir: ~/.local/share/menuchat/preferences

prompt:
  # instruction: "Act as a knowledgeable waiter ... under ${ceiling} ... JSON format: "
  favor_disliked_foods: false

ui:
  # author: Mike Otte

session:
  verbose: false
"#;

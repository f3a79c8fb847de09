mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::error::{MenuChatError, Result};
use crate::preferences::FilesystemPreferenceStore;
use crate::prompt::{PromptTemplate, DEFAULT_INSTRUCTION};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use api::{normalize_endpoint, ApiConfig};
pub use defaults::{DEFAULT_AUTHOR, DEFAULT_ENDPOINT, DEFAULT_MODEL, EXAMPLE_CONFIG};
pub use validation::{expand_home, expand_with};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub max_turns: Option<usize>,
    #[serde(default = "defaults::default_strict_tools")]
    pub strict_tools: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_turns: None,
            strict_tools: defaults::default_strict_tools(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub price_ceiling: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default = "defaults::default_favor_disliked_foods")]
    pub favor_disliked_foods: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instruction: None,
            favor_disliked_foods: defaults::default_favor_disliked_foods(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Contents of a `.menuchat.yaml` / `.menuchat.json` file. Every section
/// and field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub request_timeout: Option<Duration>,
    pub model: String,
    pub max_turns: Option<usize>,
    pub strict_tools: bool,
    pub menu_path: Option<PathBuf>,
    pub prompt: PromptTemplate,
    pub preferences_dir: PathBuf,
    pub author: String,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        // Load file configuration first
        let file_config = FileConfig::load()?;
        Ok(Self::resolve(args, &file_config, |name| env::var(name).ok()))
    }

    /// Merges CLI args > environment > file config > defaults. `lookup` is the
    /// environment lookup, injectable so resolution can be tested.
    pub fn resolve<F>(args: &Args, file: &FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let expand = |value: &str| expand_home(&expand_with(value, &lookup));

        // API key: env var > config file. Only needed once a request is made.
        let api_key = lookup("OPENAI_API_KEY")
            .or_else(|| file.api.api_key.as_deref().map(&expand))
            .filter(|key| !key.trim().is_empty() && !key.contains("${"));

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| lookup("MENUCHAT_API_ENDPOINT"))
            .or_else(|| file.api.endpoint.as_deref().map(&expand))
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let request_timeout = lookup("MENUCHAT_REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(file.api.request_timeout_secs)
            .map(Duration::from_secs);

        let model = args
            .model
            .clone()
            .or_else(|| lookup("MENUCHAT_MODEL"))
            .or_else(|| file.model.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_turns = args
            .max_turns
            .or_else(|| lookup("MENUCHAT_MAX_TURNS").and_then(|s| s.parse::<usize>().ok()))
            .or(file.agent.max_turns);

        let menu_path = args
            .menu_file
            .clone()
            .or_else(|| lookup("MENUCHAT_MENU").map(PathBuf::from))
            .or_else(|| file.menu.path.as_deref().map(|p| PathBuf::from(expand(p))));

        let price_ceiling = args
            .price_ceiling
            .or_else(|| lookup("MENUCHAT_PRICE_CEILING").and_then(|s| s.parse::<f64>().ok()))
            .or(file.menu.price_ceiling)
            .unwrap_or_else(defaults::default_price_ceiling);

        let prompt = PromptTemplate {
            instruction: file
                .prompt
                .instruction
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string()),
            price_ceiling,
            favor_disliked_foods: file.prompt.favor_disliked_foods,
        };

        let preferences_dir = lookup("MENUCHAT_PREFS_DIR")
            .or_else(|| file.preferences.dir.as_deref().map(&expand))
            .map(PathBuf::from)
            .unwrap_or_else(FilesystemPreferenceStore::default_root);

        let author = lookup("MENUCHAT_AUTHOR")
            .or_else(|| file.ui.author.clone())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let verbose = args.verbose
            || lookup("MENUCHAT_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file.session.verbose)
                .unwrap_or(false);

        Config {
            api_key,
            api_endpoint,
            request_timeout,
            model,
            max_turns,
            strict_tools: file.agent.strict_tools,
            menu_path,
            prompt,
            preferences_dir,
            author,
            verbose,
        }
    }

    pub fn price_ceiling(&self) -> f64 {
        self.prompt.price_ceiling
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            MenuChatError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
        })
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory (local override)
            PathBuf::from(".menuchat.yaml"),
            PathBuf::from(".menuchat.yml"),
            PathBuf::from(".menuchat.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("menuchat.yaml"));
            paths.push(config_dir.join("menuchat.yml"));
            paths.push(config_dir.join("menuchat.json"));
        }

        paths
    }

    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("menuchat"))
    }

    /// Writes the commented example configuration to `path`, refusing to
    /// overwrite an existing file.
    pub fn write_example(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(MenuChatError::ConfigError(format!(
                "{} already exists",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, EXAMPLE_CONFIG)?;
        Ok(())
    }
}

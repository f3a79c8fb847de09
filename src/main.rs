use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;

use menuchat::agent::ToolPolicy;
use menuchat::api::OpenAiClient;
use menuchat::cli::Args;
use menuchat::config::{Config, FileConfig};
use menuchat::error::{MenuChatError, Result};
use menuchat::logging::init_logging;
use menuchat::menu::Menu;
use menuchat::preferences::{FilesystemPreferenceStore, PreferenceKey, PreferenceStore, Preferences};
use menuchat::prompt::compose_prompt;
use menuchat::repl::run_repl;
use menuchat::session::{MenuSession, Responder};
use menuchat::ui::{self, MarkdownRenderer};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.config_init {
        return init_config();
    }

    let config = Config::from_env_and_args(&args)?;
    init_logging(config.verbose);

    let menu = Arc::new(Menu::load_or_bundled(config.menu_path.as_deref())?);
    let store = FilesystemPreferenceStore::new(config.preferences_dir.clone());
    ui::display_status(
        config.verbose,
        &format!("preferences: {}", store.root().display()),
    );

    if args.edits_preferences() {
        edit_preferences(&args, &store)?;
    }

    if args.show_prefs {
        ui::display_preferences(&Preferences::load(&store)?);
    }

    if args.show_menu {
        ui::display_menu(&menu, config.price_ceiling(), ui::terminal_width());
    }

    let query = args.query_text();

    if args.print_prompt {
        let preferences = Preferences::load(&store)?;
        let prompt = compose_prompt(
            query.as_deref().unwrap_or_default(),
            &menu,
            &preferences,
            &config.prompt,
        );
        println!("{}", prompt);
        return Ok(());
    }

    // Preference and menu flags on their own do not start a conversation
    if query.is_none() && (args.edits_preferences() || args.show_prefs || args.show_menu) {
        return Ok(());
    }

    let client = OpenAiClient::new(
        config.require_api_key()?,
        &config.api_endpoint,
        config.request_timeout,
    )?;
    ui::display_status(config.verbose, &format!("model: {}", config.model));
    ui::display_status(config.verbose, &format!("endpoint: {}", client.endpoint()));

    let responder = if args.agent {
        Responder::Agent {
            max_turns: config.max_turns,
            tool_policy: if config.strict_tools {
                ToolPolicy::Strict
            } else {
                ToolPolicy::Permissive
            },
        }
    } else {
        Responder::Prompt
    };

    let mut session = MenuSession::new(
        client,
        store,
        Arc::clone(&menu),
        config.prompt.clone(),
        config.model.clone(),
    )
    .with_responder(responder)
    .with_debug(config.verbose);

    match query {
        Some(query) => {
            let renderer = MarkdownRenderer::new();
            let entry = session.submit(&query).await?;
            ui::display_entry(&renderer, entry);
            Ok(())
        }
        None => run_repl(&mut session, &config.author, config.verbose).await,
    }
}

fn edit_preferences(args: &Args, store: &dyn PreferenceStore) -> Result<()> {
    if args.clear_prefs {
        store.clear()?;
        println!("{}", "Preferences cleared.".green());
    }

    let edits = [
        (PreferenceKey::DietaryRestrictions, &args.set_dietary),
        (PreferenceKey::DislikedFoods, &args.set_dislikes),
        (PreferenceKey::LikedFoods, &args.set_likes),
    ];
    for (key, value) in edits {
        if let Some(value) = value {
            store.write(key, value)?;
            println!("{}", format!("Saved {}.", key.label()).green());
        }
    }

    Ok(())
}

fn init_config() -> Result<()> {
    let dir = FileConfig::user_config_dir().ok_or_else(|| {
        MenuChatError::ConfigError("Could not determine home directory".to_string())
    })?;
    let path = dir.join("menuchat.yaml");
    FileConfig::write_example(&path)?;
    println!(
        "{}",
        format!("Wrote example config to {}", path.display()).green()
    );
    Ok(())
}

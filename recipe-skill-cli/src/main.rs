//! CLI entry point for recipe-skill

mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use recipe_skill_agent::{RecipeSkill, SkillLoop};
use recipe_skill_core::bus::{Intent, MessageBus};
use recipe_skill_core::config::ConfigLoader;
use recipe_skill_core::dialog::DialogRenderer;
use recipe_skill_core::logging::init_logging;
use recipe_skill_core::session::SessionStore;
use recipe_skill_search::MealDbClient;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-skill")]
#[command(about = "Voice-assistant recipe skill backed by TheMealDB")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read intents from stdin and print spoken dialogs
    Run,
    /// List intent names and their shorthand aliases
    Intents,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_skill(&config_loader).await?,
        Commands::Intents => print_intents(),
        Commands::Config => {
            let config = config_loader.load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn print_intents() {
    println!("{}", style("Intents:").bold());
    for name in Intent::NAMES {
        let alias = input::ALIASES
            .iter()
            .find(|(_, intent, _)| *intent == name)
            .map(|(alias, _, _)| *alias)
            .unwrap_or("-");
        println!("  {:<34} {}", name, style(alias).dim());
    }
    println!();
    println!("Input: <user> <intent> [key=value ...]");
}

async fn run_skill(loader: &ConfigLoader) -> Result<()> {
    let config = loader.load()?;
    let _guard = init_logging(&config.logging);
    info!(config_dir = %loader.config_dir().display(), "Loaded configuration");

    let renderer = DialogRenderer::with_overrides(&config.speech.dialogs)?;
    let api = Arc::new(MealDbClient::new(&config.api)?);
    let sessions = Arc::new(SessionStore::with_max_sessions(config.sessions.max_sessions));
    info!(
        api = %config.api.base_url,
        max_sessions = ?sessions.max_sessions(),
        "Recipe skill ready"
    );

    let bus = MessageBus::new();
    let mut outbound = bus
        .take_outbound_receiver()
        .await
        .context("outbound receiver already taken")?;

    let skill = Arc::new(RecipeSkill::new(api, Arc::new(bus.clone()), sessions, &config.speech));
    let skill_loop = SkillLoop::new(bus.clone(), skill);

    let printer = tokio::spawn(async move {
        while let Some(dialog) = outbound.recv().await {
            println!(
                "{} {}",
                style(format!("[{}]", dialog.user)).cyan(),
                renderer.render(&dialog)
            );
        }
    });

    let (eof_tx, eof_rx) = oneshot::channel::<()>();
    let reader_bus = bus.clone();
    tokio::spawn(async move {
        if let Err(e) = read_intents(&reader_bus).await {
            error!("Failed to read intents: {}", e);
        }
        drop(reader_bus);
        let _ = eof_tx.send(());
    });

    skill_loop
        .run(async {
            let _ = eof_rx.await;
        })
        .await?;

    // Printer stops once every outbound sender is gone.
    drop(skill_loop);
    drop(bus);
    printer.await?;

    Ok(())
}

async fn read_intents(bus: &MessageBus) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match input::parse_line(&line) {
            Ok(Some(msg)) => bus.publish_intent(msg)?,
            Ok(None) => {}
            Err(e) => eprintln!("{} {}", style("error:").red(), e),
        }
    }
    Ok(())
}

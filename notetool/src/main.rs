use std::io::{stdin, stdout};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;
use menukit::{MenuEngine, MenuNode};

use notetool::{actions, config::{self, AppConfig}, paths::Paths, term};

#[derive(Parser)]
#[command(name = "notetool", version, about = "Templated markdown notes behind a text menu")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (the default).
    Menu,
    /// Create the default configuration and storage directories.
    Init,
    /// Validate the menu and action configuration.
    Check,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => run_menu(),
        Commands::Init => run_init(),
        Commands::Check => run_check(),
    };

    if let Err(err) = result {
        term::error_panel(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn load_paths() -> Result<(Paths, AppConfig)> {
    let base = std::env::current_dir().context("failed to resolve the working directory")?;
    let mut paths = Paths::new(base);
    let app_config = config::load_app_config(&paths.config_file())?;
    paths.apply_config(&app_config);
    Ok((paths, app_config))
}

fn run_menu() -> Result<()> {
    let (paths, app_config) = load_paths()?;
    paths.ensure_storage_dirs().context("failed to create storage directories")?;

    let raw_menu = config::load_menu(&paths.menu_file())?;
    let root = MenuNode::build(&raw_menu)?;

    let action_map = config::load_action_map(&paths.actions_file())?;
    let mut registry = actions::build_registry(&action_map, &paths, &app_config)?;
    info!("menu loaded with {} actions", registry.len());

    term::clear_screen();
    term::welcome_panel();

    let stdin = stdin();
    let mut engine = MenuEngine::new(&root, "Menu", &mut registry, stdin.lock(), stdout())?;
    engine.run()
}

fn run_init() -> Result<()> {
    let (paths, _) = load_paths()?;
    config::write_defaults(&paths)?;
    paths.ensure_storage_dirs().context("failed to create storage directories")?;
    println!("{}", "notetool is ready.".green().bold());
    Ok(())
}

fn run_check() -> Result<()> {
    let (paths, _) = load_paths()?;
    let raw_menu = config::load_menu(&paths.menu_file())?;
    let root = MenuNode::build(&raw_menu)?;
    let action_map = config::load_action_map(&paths.actions_file())?;

    let mut broken = 0usize;

    // Dangling ids are legal: the engine shows a stub notice for them.
    for id in root.action_ids() {
        if !action_map.contains_key(id) {
            println!(
                "{} menu action `{}` has no entry in actions.json (will show a stub)",
                "note:".yellow().bold(),
                id
            );
        }
    }

    for (id, builtin) in &action_map {
        if !actions::is_builtin(builtin) {
            println!(
                "{} actions.json maps `{}` to unknown builtin `{}`",
                "error:".red().bold(),
                id,
                builtin
            );
            broken += 1;
        }
    }

    if broken > 0 {
        anyhow::bail!("{broken} invalid entries in actions.json");
    }
    println!("{}", "Configuration looks good.".green().bold());
    Ok(())
}

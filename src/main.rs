use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use clipstore::cli::args::{Cli, Commands};
use clipstore::cli::commands;
use clipstore::config::{Config, Paths};
use clipstore::storage::EntryStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    clipstore::logging::init(cli.verbose);

    let paths = Paths::new()?;
    let config = match &cli.config {
        Some(path) => Config::load_required(path),
        None => Config::load_from_path(&paths.config_file),
    }
    .context("failed to load configuration")?;
    config.general.color.apply();

    let format = cli.output.unwrap_or(config.general.default_output);
    let storage = &config.storage;
    let database = cli
        .database
        .as_deref()
        .or(storage.database.as_deref())
        .map_or_else(|| paths.database.clone(), |p| paths.resolve(p));
    tracing::debug!(database = %database.display(), ?format, "resolved settings");

    let open_store = || EntryStore::open(&database, storage);

    let output = match cli.command {
        Commands::Init(args) => commands::init(&database, storage, &args, format)?,
        Commands::Schema => commands::schema(&database, storage, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Add(args) => commands::add(&open_store()?, args, io::stdin().lock(), format)?,
        Commands::Get { id } => commands::get(&open_store()?, &id, format)?,
        Commands::Reveal { id, key } => commands::reveal(&open_store()?, &id, &key, format)?,
        Commands::List(args) => commands::list(&open_store()?, &args, format)?,
        Commands::Update(args) => {
            commands::update(&open_store()?, args, io::stdin().lock(), format)?
        }
        Commands::Delete { id } => commands::delete(&open_store()?, &id, format)?,
    };

    if output.ends_with('\n') {
        print!("{output}");
    } else if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

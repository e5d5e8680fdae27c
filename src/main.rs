// src/main.rs

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use formsheet::cli::{self, Cli, Commands};
use formsheet::logging::init_tracing;
use formsheet::server::{serve, ServerState};
use formsheet::settings::io::load_settings_from_file;
use formsheet::settings::AppSettings;
use formsheet::sheets::{MemorySheetStore, SheetStore, SqliteSheetStore, SubmitOptions};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut settings: AppSettings =
        load_settings_from_file(cli.config.as_deref()).context("loading settings")?;
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    if let Some(db) = cli.db {
        settings.database_path = Some(db);
    }

    let options = SubmitOptions {
        default_sheet_name: settings.default_sheet_name.clone(),
    };

    match cli.command {
        Commands::Serve { listen, in_memory } => {
            if let Some(addr) = listen {
                settings.listen_addr = addr;
            }
            let store: Box<dyn SheetStore + Send> = if in_memory {
                info!("Using in-memory sheets; submissions are lost on exit");
                Box::new(MemorySheetStore::new())
            } else {
                Box::new(open_store(&settings)?)
            };

            let listener = TcpListener::bind(&settings.listen_addr)
                .await
                .with_context(|| format!("binding {}", settings.listen_addr))?;
            let state = Arc::new(ServerState {
                store: Arc::new(Mutex::new(store)),
                options,
                timestamp_field: settings.timestamp_field.clone(),
                max_body_bytes: settings.max_body_bytes,
            });

            serve(listener, state, async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await;
        }
        Commands::Submit { payload, json } => {
            let mut store = open_store(&settings)?;
            cli::submit::run(&mut store, &payload, &options, &settings.timestamp_field, json)?;
        }
        Commands::Sheets => {
            let store = open_store(&settings)?;
            if let Some(path) = store.path() {
                println!("Database: {}", path.display());
            }
            cli::inspect::list_sheets(&store)?;
        }
        Commands::Show { sheet } => {
            let store = open_store(&settings)?;
            cli::inspect::show_sheet(&store, &sheet)?;
        }
        Commands::Export { sheet, output } => {
            let store = open_store(&settings)?;
            cli::inspect::export_sheet(&store, &sheet, &output)?;
        }
        Commands::InitConfig { force } => {
            cli::config::run(&settings, cli.config.as_deref(), force)?;
        }
        Commands::Freeze { sheet, rows } => {
            let mut store = open_store(&settings)?;
            cli::freeze::run(&mut store, &sheet, rows)?;
        }
    }

    Ok(())
}

fn open_store(settings: &AppSettings) -> Result<SqliteSheetStore> {
    let path = settings.resolved_database_path();
    SqliteSheetStore::open(&path)
        .with_context(|| format!("opening sheet database {}", path.display()))
}

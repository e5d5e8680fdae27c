// src/cli/mod.rs
// Command-line surface: run the webhook, or inspect and feed the sheet database offline

pub mod config;
pub mod freeze;
pub mod inspect;
pub mod submit;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "formsheet")]
#[command(
    about = "Formsheet - form submissions appended to spreadsheet-style sheets",
    long_about = None
)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sheet database file (overrides settings and FORMSHEET_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the webhook HTTP endpoint
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8080
        #[arg(long)]
        listen: Option<String>,

        /// Keep sheets in memory only; nothing is written to disk
        #[arg(long)]
        in_memory: bool,
    },

    /// Append one submission without going through HTTP
    Submit {
        /// Query string (`a=1&b=2`) or `@path/to/record.json`
        payload: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all sheets
    Sheets,

    /// Print a sheet as a table
    Show {
        sheet: String,
    },

    /// Write a sheet's data rows to a JSON file, one object per row
    Export {
        sheet: String,
        output: PathBuf,
    },

    /// Write the effective settings to the settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set how many leading rows are frozen
    Freeze {
        sheet: String,
        rows: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "formsheet",
            "serve",
            "--listen",
            "0.0.0.0:9000",
            "--db",
            "/tmp/f.db",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/f.db")));
        match cli.command {
            Commands::Serve { listen, in_memory } => {
                assert_eq!(listen.as_deref(), Some("0.0.0.0:9000"));
                assert!(!in_memory);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_freeze() {
        let cli = Cli::try_parse_from(["formsheet", "--config", "c.json", "freeze", "Leads", "2"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(
            cli.command,
            Commands::Freeze { ref sheet, rows: 2 } if sheet == "Leads"
        ));
    }

    #[test]
    fn test_parse_submit_json_flag() {
        let cli = Cli::try_parse_from(["formsheet", "submit", "a=1", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Submit { ref payload, json: true } if payload == "a=1"
        ));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["formsheet"]).is_err());
    }
}

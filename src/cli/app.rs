//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;

use super::commands;
use brightminds::config::Config;
use brightminds::core::models::{AssetRole, Collection};
use brightminds::output::OutputMode;

/// brightminds - Login checks and media reconciliation for the poetry site
#[derive(Parser, Debug)]
#[command(
    name = "brightminds",
    version,
    about = "Login checks and media reconciliation for the brightminds site",
    long_about = "Operator toolkit for the brightminds poetry community backend.\n\n\
                  Checks that logins resolve the way the site resolves them, and that\n\
                  every media path stored in the database points at a real file."
)]
pub struct Cli {
    /// Config file (default: ./brightminds.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Site database, overrides [database] path
    #[arg(long, global = true, env = "BRIGHTMINDS_DATABASE", value_name = "DB")]
    pub database: Option<PathBuf>,

    /// Media root, overrides [media] root
    #[arg(long, global = true, env = "BRIGHTMINDS_MEDIA_ROOT", value_name = "DIR")]
    pub media_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report records whose media files are missing
    CheckMedia {
        /// Collection to check: gallery, poems, avatars
        #[arg(short, long, default_value_t = Collection::Gallery)]
        collection: Collection,

        /// Only check one role: primary, thumbnail
        #[arg(short, long)]
        role: Option<AssetRole>,
    },

    /// Point records with missing media at a placeholder copy
    FixMedia {
        /// Collection to fix: gallery, poems, avatars
        #[arg(short, long, default_value_t = Collection::Gallery)]
        collection: Collection,

        /// Placeholder asset, relative to the media root
        #[arg(short, long)]
        substitute: Option<String>,

        /// Show what would change without copying or writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Create the media directories and the placeholder asset
    SetupMedia,

    /// List records and the media paths they store
    ListItems {
        /// Collection to list: gallery, poems, avatars
        #[arg(short, long, default_value_t = Collection::Gallery)]
        collection: Collection,
    },

    /// List files under the media root with their public URLs
    ListMedia,

    /// Show database version, tables and row counts
    DbStatus,

    /// Check a login (username or email) against the site database
    Login {
        /// Username or email address
        identifier: String,

        /// Read the password from the first line of stdin
        /// (otherwise from BRIGHTMINDS_PASSWORD)
        #[arg(long)]
        password_stdin: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let command = match cli.command {
        Some(Command::Version) => {
            print_version(output_mode);
            return Ok(());
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": brightminds::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("brightminds v{}", brightminds::VERSION);
                println!("\nRun 'brightminds --help' for usage");
                println!("Run 'brightminds setup-media' to prepare the media root");
            }
            return Ok(());
        },
        Some(command) => command,
    };

    let config = Config::load(cli.config.as_deref())?
        .with_database(cli.database)
        .with_media_root(cli.media_root);
    debug!(
        "database {}, media root {}",
        config.database.path.display(),
        config.media.root.display()
    );

    match command {
        Command::CheckMedia { collection, role } => {
            commands::check_media(&config, collection, role, output_mode)
        },
        Command::FixMedia {
            collection,
            substitute,
            dry_run,
        } => commands::fix_media(&config, collection, substitute, dry_run, output_mode),
        Command::SetupMedia => commands::setup_media(&config, output_mode),
        Command::ListItems { collection } => commands::list_items(&config, collection, output_mode),
        Command::ListMedia => commands::list_media(&config, output_mode),
        Command::DbStatus => commands::db_status(&config, output_mode),
        Command::Login {
            identifier,
            password_stdin,
        } => commands::login(&config, &identifier, password_stdin, output_mode),
        Command::Version => {
            print_version(output_mode);
            Ok(())
        },
    }
}

fn print_version(mode: OutputMode) {
    if mode == OutputMode::Json {
        println!(
            "{}",
            serde_json::json!({
                "version": brightminds::VERSION
            })
        );
    } else {
        println!("brightminds v{}", brightminds::VERSION);
    }
}

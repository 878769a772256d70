//! nclex CLI - NCLEX review hub server and maintenance tooling
//!
//! - `serve`: run the HTTP API
//! - `init-db`: create the SQLite schema
//! - `stats`: print the aggregate summary
//! - `import`: seed reviews from a JSON file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use nclex_server::db::pool::DEFAULT_DATABASE_PATH;
use nclex_server::db::DbConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "nclex",
    author,
    version,
    about = "Backend for sharing NCLEX exam experiences",
    long_about = "Serve the NCLEX review hub API backed by a single SQLite file, \
                  and manage that database from the command line."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// SQLite database file
    #[arg(long, global = true, env = "NCLEX_DATABASE", default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    InitDb,
    /// Print review statistics
    Stats(commands::db::StatsArgs),
    /// Import reviews from a JSON array of submissions
    Import(commands::db::ImportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let db = DbConfig::new(cli.database);

    match cli.command {
        Commands::Serve(args) => commands::run_serve(&db, args).await?,
        Commands::InitDb => commands::run_init_db(&db).await?,
        Commands::Stats(args) => commands::run_stats(&db, args).await?,
        Commands::Import(args) => commands::run_import(&db, args).await?,
    }
    Ok(())
}

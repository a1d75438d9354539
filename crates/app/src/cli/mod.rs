use clap::{Parser, Subcommand};

mod admin;
mod db;
mod session;

#[derive(Debug, Parser)]
#[command(name = "promoradar-app", about = "Promoradar operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Admin(admin::AdminCommand),
    Session(session::SessionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Admin(command) => admin::run(command).await,
            Commands::Session(command) => session::run(command).await,
        }
    }
}

/// Connection arguments shared by every subcommand.
#[derive(Debug, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,

    /// Maximum pool connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 2)]
    pub(crate) max_connections: u32,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<sqlx::PgPool, String> {
        promoradar_app::database::connect(&self.database_url, self.max_connections)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

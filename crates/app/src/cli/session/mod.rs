use clap::{Args, Subcommand};

mod revoke;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Revoke one session, or every session of a user
    Revoke(revoke::RevokeSessionArgs),
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

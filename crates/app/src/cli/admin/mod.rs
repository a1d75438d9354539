use clap::{Args, Subcommand};

mod grant;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Make a user an administrator of a brand
    Grant(grant::GrantArgs),
    /// Remove a user's administration rights on a brand
    Revoke(revoke::RevokeArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Grant(args) => grant::run(args).await,
        AdminSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

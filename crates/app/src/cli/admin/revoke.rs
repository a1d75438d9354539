use clap::Args;
use promoradar_app::{
    database::Db,
    domain::admin::{OperatorService, PgOperatorService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Email of the user to demote
    #[arg(long)]
    email: String,

    /// Brand name or key
    #[arg(long)]
    brand: String,
}

pub(crate) async fn run(args: RevokeArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgOperatorService::new(Db::new(pool));

    let revoked = service
        .revoke_brand_admin(args.email.clone(), args.brand.clone())
        .await
        .map_err(|error| format!("failed to revoke brand admin: {error}"))?;

    if revoked {
        println!("revoked admin on brand {} from {}", args.brand, args.email);
    } else {
        println!("{} was not an admin of brand {}", args.email, args.brand);
    }

    Ok(())
}

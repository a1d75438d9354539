use clap::Args;
use promoradar_app::{
    database::Db,
    domain::admin::{OperatorService, PgOperatorService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct GrantArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Email of the user to promote
    #[arg(long)]
    email: String,

    /// Brand name or key
    #[arg(long)]
    brand: String,
}

pub(crate) async fn run(args: GrantArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgOperatorService::new(Db::new(pool));

    let user = service
        .grant_brand_admin(args.email.clone(), args.brand.clone())
        .await
        .map_err(|error| format!("failed to grant brand admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("granted admin on brand: {}", args.brand.trim().to_lowercase());

    Ok(())
}

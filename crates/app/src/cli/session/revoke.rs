use clap::Args;
use promoradar_app::{
    auth::{
        PgAuthService,
        models::{AuthSettings, DEFAULT_SESSION_TTL, SessionUuid},
    },
    database::Db,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Session secret the server signs tokens with
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    session_secret: String,

    /// Session UUID to revoke
    #[arg(long, conflicts_with = "email", required_unless_present = "email")]
    session_uuid: Option<Uuid>,

    /// Revoke every active session of this user instead
    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let service = PgAuthService::new(
        Db::new(pool),
        AuthSettings {
            session_secret: args.session_secret,
            session_ttl: DEFAULT_SESSION_TTL,
        },
    )
    .map_err(|error| format!("invalid session settings: {error}"))?;

    match (args.session_uuid, args.email) {
        (Some(session_uuid), _) => {
            let revoked = service
                .revoke_session(SessionUuid::from_uuid(session_uuid))
                .await
                .map_err(|error| format!("failed to revoke session: {error}"))?;

            if revoked {
                println!("revoked session {session_uuid}");
            } else {
                println!("session {session_uuid} was not active");
            }
        }
        (None, Some(email)) => {
            let revoked = service
                .revoke_user_sessions(&email)
                .await
                .map_err(|error| format!("failed to revoke sessions: {error}"))?;

            println!("revoked {revoked} session(s) for {email}");
        }
        (None, None) => return Err("either --session-uuid or --email is required".to_string()),
    }

    Ok(())
}

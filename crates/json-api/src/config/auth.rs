//! Auth Config

use clap::Args;
use jiff::SignedDuration;

use promoradar_app::auth::models::AuthSettings;

/// Session authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Key used to sign session tokens (at least 8 bytes)
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// Session lifetime in minutes
    #[arg(long, env = "SESSION_TTL_MINUTES", default_value_t = 120)]
    pub session_ttl_minutes: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn settings(&self) -> AuthSettings {
        AuthSettings {
            session_secret: self.session_secret.clone(),
            session_ttl: SignedDuration::from_mins(i64::from(self.session_ttl_minutes)),
        }
    }
}

//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::Span;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, SessionTokenVersion, TokenSigner, build_verifier_input,
        format_session_token, generate_session_secret,
        models::{
            AuthSettings, AuthenticatedUser, Credentials, IssuedSession, MIN_PASSWORD_LEN,
            MIN_USERNAME_LEN, NewSession, SessionUuid, Signup,
        },
        parse_session_token,
        passwords::{hash_password, verify_password},
        repository::PgSessionsRepository,
    },
    database::Db,
    domain::users::{
        PgUsersRepository,
        data::{NewUser, normalize_email},
        records::{UserRecord, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    signer: TokenSigner,
    session_ttl: SignedDuration,
    sessions: PgSessionsRepository,
    users: PgUsersRepository,
}

impl PgAuthService {
    /// Build the service from the configured session secret and lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret is too short.
    pub fn new(db: Db, settings: AuthSettings) -> Result<Self, AuthServiceError> {
        Ok(Self {
            db,
            signer: TokenSigner::new(&settings.session_secret)?,
            session_ttl: settings.session_ttl,
            sessions: PgSessionsRepository::new(),
            users: PgUsersRepository::new(),
        })
    }

    /// Revoke a single session. Returns `true` if the session was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, session: SessionUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let revoked = self.sessions.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        Ok(revoked > 0)
    }

    /// Revoke every active session of the user registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] when no such user exists.
    pub async fn revoke_user_sessions(&self, email: &str) -> Result<u64, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, &normalize_email(email))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let revoked = self
            .sessions
            .revoke_user_sessions(&mut tx, user.user.uuid)
            .await?;

        tx.commit().await?;

        Ok(revoked)
    }

    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserRecord,
        at: Timestamp,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let verifier_input = build_verifier_input(&session_uuid, version, &user.uuid, &secret);
        let token_hash = self.signer.sign(&verifier_input)?;

        let session = self
            .sessions
            .create_session(
                tx,
                NewSession {
                    uuid: SessionUuid::from_uuid(session_uuid),
                    user_uuid: user.uuid,
                    version,
                    token_hash,
                    created_at: at,
                    expires_at: at.checked_add(self.session_ttl)?,
                },
            )
            .await?;

        Ok(IssuedSession {
            token,
            user,
            expires_at: session.expires_at,
        })
    }
}

fn validate_signup(signup: &Signup) -> Result<(String, String), AuthServiceError> {
    let username = signup.username.trim();

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AuthServiceError::Validation(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }

    let email = normalize_email(&signup.email);

    if !is_plausible_email(&email) {
        return Err(AuthServiceError::Validation(
            "email is not valid".to_string(),
        ));
    }

    if signup.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    Ok((username.to_string(), email))
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
        && !email.chars().any(char::is_whitespace)
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.signup",
        skip(self, signup),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn signup(
        &self,
        signup: Signup,
        at: Timestamp,
    ) -> Result<IssuedSession, AuthServiceError> {
        let (username, email) = validate_signup(&signup)?;
        let password_hash = hash_password(&signup.password)?;

        let mut tx = self.db.begin_transaction().await?;

        if self.users.find_user_by_email(&mut tx, &email).await?.is_some() {
            return Err(AuthServiceError::AlreadyExists);
        }

        let credentials = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    uuid: UserUuid::new(),
                    username,
                    email,
                    password_hash,
                },
            )
            .await?;

        let issued = self.issue_session(&mut tx, credentials.user, at).await?;

        tx.commit().await?;

        Span::current().record("user_uuid", issued.user.uuid.to_string());

        Ok(issued)
    }

    #[tracing::instrument(
        name = "auth.service.login",
        skip(self, credentials),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn login(
        &self,
        credentials: Credentials,
        at: Timestamp,
    ) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&credentials.email);

        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .users
            .find_user_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let issued = self.issue_session(&mut tx, stored.user, at).await?;

        tx.commit().await?;

        Span::current().record("user_uuid", issued.user.uuid.to_string());

        Ok(issued)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::Unauthorized)?;
        let session_uuid = SessionUuid::from_uuid(parsed.session_uuid);
        let now = Timestamp::now();

        let mut tx = self.db.begin_transaction().await?;

        let session = self
            .sessions
            .find_active_session(&mut tx, session_uuid, parsed.version, now)
            .await?
            .ok_or(AuthServiceError::Unauthorized)?;

        let verifier_input = build_verifier_input(
            &parsed.session_uuid,
            parsed.version,
            &session.user_uuid,
            &parsed.secret,
        );

        if !self.signer.verify(&verifier_input, &session.token_hash)? {
            return Err(AuthServiceError::Unauthorized);
        }

        match self.sessions.touch_session(&mut tx, session_uuid, now).await {
            Ok(()) => tx.commit().await?,
            Err(error) => tracing::debug!(%error, "session last-used update skipped"),
        }

        Ok(AuthenticatedUser {
            user_uuid: session.user_uuid,
            session_uuid,
        })
    }

    #[tracing::instrument(
        name = "auth.service.logout",
        skip(self),
        fields(session_uuid = %session),
        err
    )]
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.sessions.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and open their first session.
    async fn signup(&self, signup: Signup, at: Timestamp)
    -> Result<IssuedSession, AuthServiceError>;

    /// Check an email and password and open a session.
    ///
    /// Unknown emails and wrong passwords both yield
    /// [`AuthServiceError::InvalidCredentials`].
    async fn login(
        &self,
        credentials: Credentials,
        at: Timestamp,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the user and session it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Revoke the session so its token stops authenticating.
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;
}

//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use promoradar_app::auth::models::AuthenticatedUser;

const CURRENT_USER_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_current_user(&mut self, user: AuthenticatedUser);

    /// The authenticated caller, if the auth middleware found one.
    fn current_user(&self) -> Option<AuthenticatedUser>;

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.get::<AuthenticatedUser>(CURRENT_USER_KEY).ok().copied()
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.current_user()
            .ok_or_else(|| StatusError::unauthorized().brief("Missing authorization header"))
    }
}

#[cfg(test)]
mod tests {
    use promoradar_app::{auth::models::SessionUuid, domain::users::records::UserUuid};

    use super::*;

    #[test]
    fn current_user_round_trips_through_the_depot() {
        let mut depot = Depot::new();
        let user = AuthenticatedUser {
            user_uuid: UserUuid::new(),
            session_uuid: SessionUuid::new(),
        };

        assert!(depot.current_user().is_none());
        assert!(depot.current_user_or_401().is_err());

        depot.insert_current_user(user);

        assert_eq!(depot.current_user(), Some(user));
    }
}

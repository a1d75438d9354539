//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Hash `password` into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored PHC string.
///
/// A malformed stored hash is an error, a wrong password is `Ok(false)`.
///
/// # Errors
///
/// Returns an error if `stored` is not a valid PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hashes_are_argon2id_phc_strings() -> TestResult {
        let hash = hash_password("hunter22")?;

        assert!(hash.starts_with("$argon2id$"), "unexpected hash {hash}");

        Ok(())
    }

    #[test]
    fn verify_accepts_only_the_original_password() -> TestResult {
        let hash = hash_password("hunter22")?;

        assert!(verify_password("hunter22", &hash)?);
        assert!(!verify_password("hunter23", &hash)?);

        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> TestResult {
        assert_ne!(hash_password("hunter22")?, hash_password("hunter22")?);

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("hunter22", "plaintext").is_err());
    }
}

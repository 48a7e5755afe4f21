/// User resolver
///
/// Idempotent get-or-create mapping from an external identity (email) to an
/// internal user row. This is the sole entry point by which a user comes
/// into existence.
///
/// Resolution is idempotent by email only: a repeat call with the same
/// email and a different name returns the existing user unchanged; the
/// stored name reflects the first call.

use sqlx::PgPool;
use validator::ValidateEmail;

use crate::error::{RepoError, RepoResult};
use crate::models::user::{CreateUser, User};

/// Validates the identity pair without touching the database
///
/// Returns the trimmed name and email.
fn validate_identity<'a>(name: &'a str, email: &'a str) -> RepoResult<(&'a str, &'a str)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepoError::validation("Name is required"));
    }

    let email = email.trim();
    if email.is_empty() {
        return Err(RepoError::validation("Email is required"));
    }
    if !email.validate_email() {
        return Err(RepoError::validation("Invalid email format"));
    }

    Ok((name, email))
}

/// Resolves an email to a user, creating one on first sight
///
/// # Errors
///
/// - `Validation` for a missing name/email or a malformed email
/// - `Storage` if the lookup or insert fails
pub async fn resolve(pool: &PgPool, name: &str, email: &str) -> RepoResult<User> {
    let (name, email) = validate_identity(name, email)?;

    if let Some(existing) = User::find_by_email(pool, email).await? {
        return Ok(existing);
    }

    let user = User::create(
        pool,
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User created on first resolution");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identity_trims() {
        let (name, email) = validate_identity("  Ann ", " ann@x.com ").unwrap();
        assert_eq!(name, "Ann");
        assert_eq!(email, "ann@x.com");
    }

    #[test]
    fn test_validate_identity_requires_name() {
        let err = validate_identity("", "ann@x.com").unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(err.to_string().contains("Name"));

        assert!(validate_identity("   ", "ann@x.com").is_err());
    }

    #[test]
    fn test_validate_identity_requires_email() {
        let err = validate_identity("Ann", "").unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn test_validate_identity_rejects_malformed_email() {
        for bad in ["not-an-email", "@x.com", "a b@x.com", "ann@"] {
            let err = validate_identity("Ann", bad).unwrap_err();
            assert!(
                matches!(err, RepoError::Validation(_)),
                "expected validation error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_identity_accepts_local_at_domain() {
        assert!(validate_identity("Ann", "ann@x.com").is_ok());
        assert!(validate_identity("Ann", "ann.b+tag@sub.example.org").is_ok());
    }

    // Database-backed resolver tests are in tests/user_resolver_tests.rs
}

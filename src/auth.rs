//! Authentication
//!
//! Password digests and login checks.
//!
//! Digests are a single unsalted SHA-256 pass, hex encoded. This matches
//! the existing credential files; it is weak against offline guessing
//! and should be replaced together with a migration of `login.csv`.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::entity::{Role, User};
use crate::error::Result;
use crate::repository::Repository;
use crate::GradeError;

/// Hex-encoded SHA-256 of `plaintext` (64 lowercase hex chars)
pub fn hash_password(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    hex::encode(digest)
}

/// Whether `plaintext` hashes to `digest`
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    hash_password(plaintext) == digest
}

/// Check a login and return the matching user
///
/// Unknown user, role mismatch and wrong password all yield the same
/// `AuthFailure`.
pub fn authenticate(
    users: &Repository<User>,
    user_id: &str,
    plaintext: &str,
    role: Role,
) -> Result<User> {
    let user = match users.find(user_id) {
        Some(user) => user,
        None => {
            debug!(user_id, "login rejected");
            return Err(GradeError::AuthFailure);
        }
    };

    if user.role != role || !verify_password(plaintext, &user.password) {
        debug!(user_id, "login rejected");
        return Err(GradeError::AuthFailure);
    }

    debug!(user_id, role = %role, "login accepted");
    Ok(user.clone())
}

/// Boolean form of [`authenticate`]
pub fn login(users: &Repository<User>, user_id: &str, plaintext: &str, role: Role) -> bool {
    authenticate(users, user_id, plaintext, role).is_ok()
}

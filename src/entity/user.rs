//! Login credential entity

use std::fmt;
use std::str::FromStr;

use crate::auth::hash_password;
use crate::error::Result;
use crate::store::Record;
use crate::GradeError;

use super::{Entity, Fields};

/// Which kind of account a login belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            other => Err(GradeError::MalformedRecord(format!(
                "unknown role '{}'",
                other
            ))),
        }
    }
}

/// A login: user id (email), password digest, role
///
/// `password` only ever holds the hex digest, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub password: String,
    pub role: Role,
}

impl User {
    /// Build from an already-hashed password
    pub fn new(user_id: impl Into<String>, digest: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            password: digest.into(),
            role,
        }
    }

    /// Build from a plaintext password, hashing it
    pub fn with_password(user_id: impl Into<String>, plaintext: &str, role: Role) -> Self {
        Self::new(user_id, hash_password(plaintext), role)
    }

    /// Replace the stored digest with the hash of `plaintext`
    pub fn set_password(&mut self, plaintext: &str) {
        self.password = hash_password(plaintext);
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const FIELDS: &'static [&'static str] = &["user_id", "password", "role"];

    fn key(&self) -> &str {
        &self.user_id
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("user_id", self.user_id.as_str())
            .with("password", self.password.as_str())
            .with("role", self.role.as_str())
    }

    fn from_record(record: &Record) -> Result<Self> {
        let fields = Fields::check(Self::KIND, Self::FIELDS, record)?;
        let user_id = fields.key("user_id")?;
        let role = fields.text("role")?.parse::<Role>().map_err(|e| match e {
            GradeError::MalformedRecord(msg) => {
                GradeError::MalformedRecord(format!("user {}: {}", user_id, msg))
            }
            other => other,
        })?;

        Ok(Self {
            user_id,
            password: fields.text("password")?,
            role,
        })
    }

    /// Digests never match a query
    fn matches(&self, needle: &str) -> bool {
        self.user_id.contains(needle) || self.role.as_str().contains(needle)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.user_id, self.role)
    }
}

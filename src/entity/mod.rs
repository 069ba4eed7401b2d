//! Entity Module
//!
//! The five persisted record kinds and their table schemas.
//!
//! ## Responsibilities
//! - Fixed, named field set per entity kind
//! - Conversion to and from store records
//! - Primary key access for repository indexing
//!
//! Loading is strict: a record missing a declared field, or carrying a
//! field the schema does not declare, is rejected as malformed.

mod course;
mod grade;
mod professor;
mod student;
mod user;

pub use course::Course;
pub use grade::Grade;
pub use professor::Professor;
pub use student::Student;
pub use user::{Role, User};

use crate::error::Result;
use crate::store::Record;
use crate::GradeError;

/// A record kind that a repository can persist
pub trait Entity: Clone {
    /// Human-readable kind name, used in errors and logs
    const KIND: &'static str;

    /// Table columns, in write order
    const FIELDS: &'static [&'static str];

    /// Primary key
    fn key(&self) -> &str;

    /// Convert into a store record with exactly `FIELDS`
    fn to_record(&self) -> Record;

    /// Rebuild from a store record, validating the schema
    fn from_record(record: &Record) -> Result<Self>;

    /// Case-sensitive substring match against any stored field
    fn matches(&self, needle: &str) -> bool {
        self.to_record().values().any(|value| value.contains(needle))
    }

    /// Reject an entity whose record would not load back unchanged
    ///
    /// Called by the repository before anything is written.
    fn validate(&self) -> Result<()> {
        check_reload(self)
    }
}

/// Rebuild `entity` from its own record; load failures become `InvalidValue`
pub(crate) fn check_reload<T: Entity>(entity: &T) -> Result<()> {
    T::from_record(&entity.to_record())
        .map(|_| ())
        .map_err(|e| match e {
            GradeError::MalformedRecord(msg) => GradeError::InvalidValue(msg),
            other => other,
        })
}

/// Checked field access over a record for one entity kind
pub(crate) struct Fields<'a> {
    kind: &'static str,
    record: &'a Record,
}

impl<'a> Fields<'a> {
    /// Validate `record` against `schema`: nothing missing, nothing extra
    pub(crate) fn check(
        kind: &'static str,
        schema: &[&str],
        record: &'a Record,
    ) -> Result<Self> {
        if let Some(missing) = schema.iter().find(|name| record.get(name).is_none()) {
            return Err(GradeError::MalformedRecord(format!(
                "{} record is missing field '{}'",
                kind, missing
            )));
        }

        if let Some(extra) = record.field_names().find(|name| !schema.contains(name)) {
            return Err(GradeError::MalformedRecord(format!(
                "{} record has unexpected field '{}'",
                kind, extra
            )));
        }

        Ok(Self { kind, record })
    }

    /// Text value of a schema field
    pub(crate) fn text(&self, name: &str) -> Result<String> {
        self.record.get(name).map(str::to_string).ok_or_else(|| {
            GradeError::MalformedRecord(format!(
                "{} record is missing field '{}'",
                self.kind, name
            ))
        })
    }

    /// Text value that must not be blank (primary keys)
    pub(crate) fn key(&self, name: &str) -> Result<String> {
        let value = self.text(name)?;
        if value.trim().is_empty() {
            return Err(GradeError::MalformedRecord(format!(
                "{} record has an empty '{}'",
                self.kind, name
            )));
        }
        Ok(value)
    }
}

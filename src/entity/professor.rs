//! Professor entity

use std::fmt;

use crate::error::Result;
use crate::ledger::CourseList;
use crate::store::Record;

use super::{check_reload, Entity, Fields};

/// A professor, keyed by email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professor {
    pub name: String,
    pub email_address: String,
    pub rank: String,
    pub courses: CourseList,
}

impl Professor {
    pub fn new(
        name: impl Into<String>,
        email_address: impl Into<String>,
        rank: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email_address: email_address.into(),
            rank: rank.into(),
            courses: CourseList::new(),
        }
    }

    /// Add a course to the teaching load; false if already teaching it
    pub fn add_course(&mut self, course_id: &str) -> Result<bool> {
        self.courses.add(course_id)
    }
}

impl Entity for Professor {
    const KIND: &'static str = "professor";
    const FIELDS: &'static [&'static str] = &["name", "email_address", "rank", "courses"];

    fn key(&self) -> &str {
        &self.email_address
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("email_address", self.email_address.as_str())
            .with("rank", self.rank.as_str())
            .with("courses", self.courses.encode())
    }

    fn from_record(record: &Record) -> Result<Self> {
        let fields = Fields::check(Self::KIND, Self::FIELDS, record)?;
        Ok(Self {
            name: fields.text("name")?,
            email_address: fields.key("email_address")?,
            rank: fields.text("rank")?,
            courses: CourseList::decode(&fields.text("courses")?),
        })
    }

    fn validate(&self) -> Result<()> {
        self.courses.validate()?;
        check_reload(self)
    }
}

impl fmt::Display for Professor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Professor(name={}, email_address={}, rank={}, courses={})",
            self.name,
            self.email_address,
            self.rank,
            self.courses.encode()
        )
    }
}

//! Student entity

use std::fmt;

use crate::error::Result;
use crate::ledger::{CourseLedger, LedgerColumns};
use crate::store::Record;
use crate::GradeError;

use super::{check_reload, Entity, Fields};

/// A student, keyed by email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    ledger: CourseLedger,
}

impl Student {
    /// A student with no enrollments
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
            ledger: CourseLedger::new(),
        }
    }

    /// Build from stored ledger columns
    pub fn with_columns(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
        columns: &LedgerColumns,
    ) -> Result<Self> {
        let email_address = email_address.into();
        let ledger = CourseLedger::decode(columns).map_err(|e| match e {
            GradeError::MalformedRecord(msg) => {
                GradeError::MalformedRecord(format!("student {}: {}", email_address, msg))
            }
            other => other,
        })?;

        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address,
            ledger,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn ledger(&self) -> &CourseLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut CourseLedger {
        &mut self.ledger
    }

    /// Enroll in a course; false if already enrolled
    pub fn add_course(&mut self, course_id: &str) -> Result<bool> {
        self.ledger.add_course(course_id)
    }

    /// Record a grade for an enrolled course
    pub fn assign_grade(&mut self, course_id: &str, grade: &str, marks: &str) -> Result<()> {
        self.ledger
            .assign_grade(&self.email_address, course_id, grade, marks)
    }
}

impl Entity for Student {
    const KIND: &'static str = "student";
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email_address",
        "courses",
        "grades",
        "marks",
    ];

    fn key(&self) -> &str {
        &self.email_address
    }

    fn to_record(&self) -> Record {
        let columns = self.ledger.encode();
        Record::new()
            .with("first_name", self.first_name.as_str())
            .with("last_name", self.last_name.as_str())
            .with("email_address", self.email_address.as_str())
            .with("courses", columns.courses)
            .with("grades", columns.grades)
            .with("marks", columns.marks)
    }

    fn from_record(record: &Record) -> Result<Self> {
        let fields = Fields::check(Self::KIND, Self::FIELDS, record)?;
        let columns = LedgerColumns::new(
            fields.text("courses")?,
            fields.text("grades")?,
            fields.text("marks")?,
        );
        Self::with_columns(
            fields.text("first_name")?,
            fields.text("last_name")?,
            fields.key("email_address")?,
            &columns,
        )
    }

    fn validate(&self) -> Result<()> {
        self.ledger.validate()?;
        check_reload(self)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.ledger.encode();
        write!(
            f,
            "Student(first_name={}, last_name={}, email_address={}, courses={}, grades={}, marks={})",
            self.first_name,
            self.last_name,
            self.email_address,
            columns.courses,
            columns.grades,
            columns.marks
        )
    }
}

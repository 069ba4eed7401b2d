//! Grade scale entity

use std::fmt;

use crate::error::Result;
use crate::store::Record;

use super::{Entity, Fields};

/// A grade-scale row: label plus a descriptive marks range
///
/// `marks_range` is free text ("90-100"); nothing parses or enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub grade_id: String,
    pub grade: String,
    pub marks_range: String,
}

impl Grade {
    pub fn new(
        grade_id: impl Into<String>,
        grade: impl Into<String>,
        marks_range: impl Into<String>,
    ) -> Self {
        Self {
            grade_id: grade_id.into(),
            grade: grade.into(),
            marks_range: marks_range.into(),
        }
    }
}

impl Entity for Grade {
    const KIND: &'static str = "grade";
    const FIELDS: &'static [&'static str] = &["grade_id", "grade", "marks_range"];

    fn key(&self) -> &str {
        &self.grade_id
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("grade_id", self.grade_id.as_str())
            .with("grade", self.grade.as_str())
            .with("marks_range", self.marks_range.as_str())
    }

    fn from_record(record: &Record) -> Result<Self> {
        let fields = Fields::check(Self::KIND, Self::FIELDS, record)?;
        Ok(Self {
            grade_id: fields.key("grade_id")?,
            grade: fields.text("grade")?,
            marks_range: fields.text("marks_range")?,
        })
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grade(grade_id={}, grade={}, marks_range={})",
            self.grade_id, self.grade, self.marks_range
        )
    }
}

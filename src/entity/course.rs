//! Course catalog entity

use std::fmt;

use crate::error::Result;
use crate::store::Record;
use crate::GradeError;

use crate::ledger::check_item;

use super::{check_reload, Entity, Fields};

/// A course offered in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub credits: u32,
    pub course_name: String,
    pub course_desc: String,
}

impl Course {
    pub fn new(
        course_id: impl Into<String>,
        credits: u32,
        course_name: impl Into<String>,
        course_desc: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            credits,
            course_name: course_name.into(),
            course_desc: course_desc.into(),
        }
    }
}

impl Entity for Course {
    const KIND: &'static str = "course";
    const FIELDS: &'static [&'static str] = &["course_id", "credits", "course_name", "course_desc"];

    fn key(&self) -> &str {
        &self.course_id
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("course_id", self.course_id.as_str())
            .with("credits", self.credits.to_string())
            .with("course_name", self.course_name.as_str())
            .with("course_desc", self.course_desc.as_str())
    }

    fn from_record(record: &Record) -> Result<Self> {
        let fields = Fields::check(Self::KIND, Self::FIELDS, record)?;
        let course_id = fields.key("course_id")?;
        let credits_text = fields.text("credits")?;
        let credits = credits_text.trim().parse::<u32>().map_err(|_| {
            GradeError::MalformedRecord(format!(
                "course {}: credits '{}' is not a number",
                course_id, credits_text
            ))
        })?;

        Ok(Self {
            course_id,
            credits,
            course_name: fields.text("course_name")?,
            course_desc: fields.text("course_desc")?,
        })
    }

    /// Course ids end up in comma-joined enrollment columns
    fn validate(&self) -> Result<()> {
        check_item("course id", &self.course_id)?;
        check_reload(self)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course(course_id={}, credits={}, course_name={}, course_desc={})",
            self.course_id, self.credits, self.course_name, self.course_desc
        )
    }
}

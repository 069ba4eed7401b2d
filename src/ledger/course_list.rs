//! Course List
//!
//! Plain ordered set of course ids (a professor's teaching load).

use crate::error::Result;

use super::{check_required, join_sequence, split_sequence};

/// Ordered course ids without grades
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseList {
    courses: Vec<String>,
}

impl CourseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the stored comma-joined column
    pub fn decode(column: &str) -> Self {
        Self {
            courses: split_sequence(column),
        }
    }

    /// Comma-joined column form
    pub fn encode(&self) -> String {
        join_sequence(self.courses.iter().map(String::as_str))
    }

    /// Append a course; returns false if already present
    pub fn add(&mut self, course_id: &str) -> Result<bool> {
        check_required("course id", course_id)?;
        if self.contains(course_id) {
            return Ok(false);
        }
        self.courses.push(course_id.to_string());
        Ok(true)
    }

    /// Check that every course id survives a join and split unchanged
    pub fn validate(&self) -> Result<()> {
        self.courses
            .iter()
            .try_for_each(|course_id| check_required("course id", course_id))
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c == course_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

//! Ledger Module
//!
//! Per-entity course associations and their flat column encoding.
//!
//! ## Responsibilities
//! - Keep a student's enrollments as one ordered list of
//!   `{course_id, grade, marks}` records
//! - Translate that list to and from the three comma-joined
//!   `courses` / `grades` / `marks` columns of the students table
//! - Keep the column lengths in step on every mutation
//!
//! ## Column Encoding
//! ```text
//! courses: "CS101,CS102,CS103"
//! grades:  ""              ← no grade ever recorded (all ungraded)
//! marks:   ""
//!
//! courses: "CS101,CS102,CS103"
//! grades:  "A,,B"          ← materialized: one slot per course
//! marks:   "95,,81"
//! ```
//!
//! An empty column is an empty sequence, never `[""]`.

mod course_ledger;
mod course_list;

pub use course_ledger::{CourseLedger, Enrollment, GradeEntry, LedgerColumns};
pub use course_list::CourseList;

use crate::error::Result;
use crate::GradeError;

/// Separator between items of a multi-valued column
pub const SEPARATOR: char = ',';

/// Split a multi-valued column; `""` yields no items
pub fn split_sequence(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column.split(SEPARATOR).map(str::to_string).collect()
}

/// Join items into a multi-valued column
pub fn join_sequence<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let mut column = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            column.push(SEPARATOR);
        }
        column.push_str(item);
    }
    column
}

/// Reject an item that would split into several on reload
pub fn check_item(what: &str, item: &str) -> Result<()> {
    if item.contains(SEPARATOR) {
        return Err(GradeError::InvalidValue(format!(
            "{} '{}' contains the separator '{}'",
            what, item, SEPARATOR
        )));
    }
    Ok(())
}

/// Like [`check_item`], and the item must not be blank
pub fn check_required(what: &str, item: &str) -> Result<()> {
    if item.trim().is_empty() {
        return Err(GradeError::InvalidValue(format!("{} is blank", what)));
    }
    check_item(what, item)
}

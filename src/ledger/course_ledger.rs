//! Course Ledger
//!
//! A student's enrollments with their grade and marks.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::GradeError;

use super::{check_item, check_required, join_sequence, split_sequence};

/// One course a student is enrolled in
///
/// Empty `grade` / `marks` mean "not graded yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrollment {
    pub course_id: String,
    pub grade: String,
    pub marks: String,
}

impl Enrollment {
    /// A fresh, ungraded enrollment
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            grade: String::new(),
            marks: String::new(),
        }
    }

    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty() || !self.marks.is_empty()
    }

    pub fn entry(&self) -> GradeEntry {
        GradeEntry {
            grade: self.grade.clone(),
            marks: self.marks.clone(),
        }
    }
}

/// The (grade, marks) pair held for a course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeEntry {
    pub grade: String,
    pub marks: String,
}

impl GradeEntry {
    pub fn new(grade: impl Into<String>, marks: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
            marks: marks.into(),
        }
    }
}

/// The three flat columns a ledger is stored as
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerColumns {
    pub courses: String,
    pub grades: String,
    pub marks: String,
}

impl LedgerColumns {
    pub fn new(
        courses: impl Into<String>,
        grades: impl Into<String>,
        marks: impl Into<String>,
    ) -> Self {
        Self {
            courses: courses.into(),
            grades: grades.into(),
            marks: marks.into(),
        }
    }
}

/// Ordered enrollments of one student
///
/// ## Materialization
/// Until the first grade is assigned the `grades` and `marks` columns
/// are stored empty even though `courses` is not. `materialized` records
/// which of the two layouts the ledger encodes to, so that decoding and
/// re-encoding reproduces the stored columns exactly. Once materialized,
/// both columns always carry one slot per course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseLedger {
    entries: Vec<Enrollment>,
    materialized: bool,
}

impl CourseLedger {
    /// An empty ledger (no courses)
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from its stored columns
    ///
    /// Empty grade and marks columns mean every course is ungraded.
    /// Otherwise all three columns must have the same length.
    pub fn decode(columns: &LedgerColumns) -> Result<Self> {
        let courses = split_sequence(&columns.courses);
        let grades = split_sequence(&columns.grades);
        let marks = split_sequence(&columns.marks);

        if grades.is_empty() && marks.is_empty() {
            return Ok(Self {
                entries: courses.into_iter().map(Enrollment::new).collect(),
                materialized: false,
            });
        }

        if grades.len() != courses.len() || marks.len() != courses.len() {
            return Err(GradeError::MalformedRecord(format!(
                "desynchronized ledger: {} courses, {} grades, {} marks",
                courses.len(),
                grades.len(),
                marks.len()
            )));
        }

        let entries = courses
            .into_iter()
            .zip(grades)
            .zip(marks)
            .map(|((course_id, grade), marks)| Enrollment {
                course_id,
                grade,
                marks,
            })
            .collect();

        Ok(Self {
            entries,
            materialized: true,
        })
    }

    /// Flatten the ledger into its stored columns
    pub fn encode(&self) -> LedgerColumns {
        let courses = join_sequence(self.entries.iter().map(|e| e.course_id.as_str()));

        if !self.materialized {
            return LedgerColumns::new(courses, "", "");
        }

        LedgerColumns {
            courses,
            grades: join_sequence(self.entries.iter().map(|e| e.grade.as_str())),
            marks: join_sequence(self.entries.iter().map(|e| e.marks.as_str())),
        }
    }

    /// Keyed view: course_id → (grade, marks)
    pub fn view(&self) -> BTreeMap<String, GradeEntry> {
        self.entries
            .iter()
            .map(|e| (e.course_id.clone(), e.entry()))
            .collect()
    }

    /// Rewrite every enrollment from a keyed view
    ///
    /// Walks the existing course order; courses missing from `view`
    /// are reset to ungraded. Course membership never changes here.
    pub fn apply(&mut self, view: &BTreeMap<String, GradeEntry>) {
        for enrollment in &mut self.entries {
            let entry = view.get(&enrollment.course_id).cloned().unwrap_or_default();
            enrollment.grade = entry.grade;
            enrollment.marks = entry.marks;
        }

        if self.entries.iter().any(Enrollment::is_graded) {
            self.materialized = true;
        }
    }

    /// Enroll in a course; returns false if already enrolled
    pub fn add_course(&mut self, course_id: &str) -> Result<bool> {
        check_required("course id", course_id)?;
        if self.contains(course_id) {
            return Ok(false);
        }
        self.entries.push(Enrollment::new(course_id));
        Ok(true)
    }

    /// Record a grade and marks for an enrolled course
    ///
    /// Materializes the ledger: every other course gets a slot too.
    /// Grade and marks must be non-blank; a blank slot is how an ungraded
    /// course is stored.
    pub fn assign_grade(
        &mut self,
        student: &str,
        course_id: &str,
        grade: &str,
        marks: &str,
    ) -> Result<()> {
        check_required("grade", grade)?;
        check_required("marks", marks)?;
        if !self.contains(course_id) {
            return Err(GradeError::NotEnrolled {
                student: student.to_string(),
                course: course_id.to_string(),
            });
        }

        let mut view = self.view();
        view.insert(course_id.to_string(), GradeEntry::new(grade, marks));
        self.apply(&view);
        self.materialized = true;
        Ok(())
    }

    /// Check that every item survives a join and split unchanged
    pub fn validate(&self) -> Result<()> {
        for enrollment in &self.entries {
            check_required("course id", &enrollment.course_id)?;
            check_item("grade", &enrollment.grade)?;
            check_item("marks", &enrollment.marks)?;
        }
        Ok(())
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.entries.iter().any(|e| e.course_id == course_id)
    }

    /// Enrollment for a course, if any
    pub fn get(&self, course_id: &str) -> Option<&Enrollment> {
        self.entries.iter().find(|e| e.course_id == course_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enrollment> {
        self.entries.iter()
    }

    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.course_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Sum of all numeric marks (blank or non-numeric marks count as 0)
    ///
    /// Saturates instead of overflowing on out-of-range stored marks.
    pub fn marks_total(&self) -> i64 {
        self.entries
            .iter()
            .filter_map(|e| e.marks.trim().parse::<i64>().ok())
            .fold(0i64, i64::saturating_add)
    }
}

//! GradeBook Module
//!
//! The application context that owns every repository.
//!
//! ## Responsibilities
//! - Open all five tables from one `Config`
//! - Registration and account removal across users and people
//! - Enrollment and grading through the student ledger
//! - Course rosters, statistics and sorted listings
//! - Login and password changes
//!
//! Construct one `GradeBook` at startup and pass it to whatever needs it;
//! there is no global state, so tests can open as many as they like.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::auth;
use crate::config::Config;
use crate::entity::{Course, Grade, Professor, Role, Student, User};
use crate::error::Result;
use crate::repository::Repository;
use crate::stats::{compute_stats, MarkStats};
use crate::GradeError;

/// One student's standing in a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub email_address: String,
    pub name: String,
    pub grade: String,
    pub marks: String,
}

/// Ordering for student listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending email address
    Email,
    /// Ascending total marks across all courses
    Marks,
}

/// The grade book: five repositories over one data directory
pub struct GradeBook {
    config: Config,
    users: Repository<User>,
    students: Repository<Student>,
    professors: Repository<Professor>,
    courses: Repository<Course>,
    grades: Repository<Grade>,
}

impl GradeBook {
    /// Open or create a grade book with the given config
    ///
    /// Creates the data directory; absent tables load as empty.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let book = Self {
            users: Repository::open(config.users_path())?,
            students: Repository::open(config.students_path())?,
            professors: Repository::open(config.professors_path())?,
            courses: Repository::open(config.courses_path())?,
            grades: Repository::open(config.grades_path())?,
            config,
        };

        info!(
            data_dir = %book.config.data_dir.display(),
            users = book.users.len(),
            students = book.students.len(),
            professors = book.professors.len(),
            courses = book.courses.len(),
            grades = book.grades.len(),
            "grade book opened"
        );
        Ok(book)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default table names under the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Create a student login and student record
    pub fn register_student(
        &mut self,
        first_name: &str,
        last_name: &str,
        email_address: &str,
        password: &str,
    ) -> Result<()> {
        self.ensure_new_user(email_address)?;
        self.users
            .add(User::with_password(email_address, password, Role::Student))?;
        self.students
            .add(Student::new(first_name, last_name, email_address))?;
        Ok(())
    }

    /// Create a professor login and professor record
    pub fn register_professor(
        &mut self,
        name: &str,
        email_address: &str,
        rank: &str,
        password: &str,
    ) -> Result<()> {
        self.ensure_new_user(email_address)?;
        self.users
            .add(User::with_password(email_address, password, Role::Professor))?;
        self.professors
            .add(Professor::new(name, email_address, rank))?;
        Ok(())
    }

    /// Remove a student record and its login
    pub fn delete_student_account(&mut self, email_address: &str) -> Result<Student> {
        let student = self.students.delete(email_address)?;
        if self.users.contains(email_address) {
            self.users.delete(email_address)?;
        }
        Ok(student)
    }

    /// Remove a professor record and its login
    pub fn delete_professor_account(&mut self, email_address: &str) -> Result<Professor> {
        let professor = self.professors.delete(email_address)?;
        if self.users.contains(email_address) {
            self.users.delete(email_address)?;
        }
        Ok(professor)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// True iff the user exists, has `role`, and the password matches
    pub fn login(&self, user_id: &str, password: &str, role: Role) -> bool {
        auth::login(&self.users, user_id, password, role)
    }

    /// Like [`login`](Self::login) but returns the user or `AuthFailure`
    pub fn authenticate(&self, user_id: &str, password: &str, role: Role) -> Result<User> {
        auth::authenticate(&self.users, user_id, password, role)
    }

    /// Replace a user's password
    pub fn change_password(&mut self, user_id: &str, new_password: &str) -> Result<()> {
        let mut user = self.users.get(user_id)?.clone();
        user.set_password(new_password);
        self.users.update(user)
    }

    // =========================================================================
    // Enrollment & Grading
    // =========================================================================

    /// Enroll a student in a catalog course
    ///
    /// Enrolling twice is reported as `Duplicate` and writes nothing.
    pub fn enroll_student(&mut self, email_address: &str, course_id: &str) -> Result<()> {
        self.courses.get(course_id)?;
        let mut student = self.students.get(email_address)?.clone();

        if !student.add_course(course_id)? {
            warn!(student = email_address, course = course_id, "already enrolled");
            return Err(GradeError::duplicate(
                "enrollment",
                format!("{}/{}", email_address, course_id),
            ));
        }

        self.students.update(student)
    }

    /// Record a grade and marks for an enrolled student
    pub fn assign_grade(
        &mut self,
        email_address: &str,
        course_id: &str,
        grade: &str,
        marks: u32,
    ) -> Result<()> {
        let mut student = self.students.get(email_address)?.clone();
        student.assign_grade(course_id, grade, &marks.to_string())?;
        self.students.update(student)
    }

    /// Add a catalog course to a professor's teaching load
    pub fn assign_professor_course(&mut self, email_address: &str, course_id: &str) -> Result<()> {
        self.courses.get(course_id)?;
        let mut professor = self.professors.get(email_address)?.clone();

        if !professor.add_course(course_id)? {
            warn!(professor = email_address, course = course_id, "already teaching");
            return Err(GradeError::duplicate(
                "teaching assignment",
                format!("{}/{}", email_address, course_id),
            ));
        }

        self.professors.update(professor)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Every student enrolled in `course_id`, in table order
    pub fn course_roster(&self, course_id: &str) -> Vec<RosterEntry> {
        self.students
            .iter()
            .filter_map(|student| {
                student.ledger().get(course_id).map(|enrollment| RosterEntry {
                    email_address: student.email_address.clone(),
                    name: student.full_name(),
                    grade: enrollment.grade.clone(),
                    marks: enrollment.marks.clone(),
                })
            })
            .collect()
    }

    /// Recorded marks for a course; blank marks are skipped
    pub fn course_marks(&self, course_id: &str) -> Result<Vec<i64>> {
        self.course_roster(course_id)
            .into_iter()
            .filter(|entry| !entry.marks.trim().is_empty())
            .map(|entry| {
                entry.marks.trim().parse::<i64>().map_err(|_| {
                    GradeError::MalformedRecord(format!(
                        "student {}: marks '{}' for {} is not a number",
                        entry.email_address, entry.marks, course_id
                    ))
                })
            })
            .collect()
    }

    /// min / max / mean / median of a course's marks (zeros if none)
    pub fn course_stats(&self, course_id: &str) -> Result<MarkStats> {
        Ok(compute_stats(&self.course_marks(course_id)?))
    }

    /// All students ordered by `key`
    pub fn students_sorted_by(&self, key: SortKey) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.iter().collect();
        match key {
            SortKey::Email => students.sort_by(|a, b| a.email_address.cmp(&b.email_address)),
            SortKey::Marks => students.sort_by_key(|s| s.ledger().marks_total()),
        }
        students
    }

    /// Students whose stored fields contain `needle`
    pub fn search_students(&self, needle: &str) -> Vec<&Student> {
        self.students.search(needle)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn users(&self) -> &Repository<User> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut Repository<User> {
        &mut self.users
    }

    pub fn students(&self) -> &Repository<Student> {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut Repository<Student> {
        &mut self.students
    }

    pub fn professors(&self) -> &Repository<Professor> {
        &self.professors
    }

    pub fn professors_mut(&mut self) -> &mut Repository<Professor> {
        &mut self.professors
    }

    pub fn courses(&self) -> &Repository<Course> {
        &self.courses
    }

    pub fn courses_mut(&mut self) -> &mut Repository<Course> {
        &mut self.courses
    }

    pub fn grades(&self) -> &Repository<Grade> {
        &self.grades
    }

    pub fn grades_mut(&mut self) -> &mut Repository<Grade> {
        &mut self.grades
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn ensure_new_user(&self, user_id: &str) -> Result<()> {
        if self.users.contains(user_id) {
            warn!(user_id, "registration rejected, user exists");
            return Err(GradeError::duplicate("user", user_id));
        }
        Ok(())
    }
}

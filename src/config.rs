//! Configuration for checkmygrade
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a grade book instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all table files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── login.csv        (credentials)
    ///     ├── student.csv
    ///     ├── professor.csv
    ///     ├── course.csv
    ///     └── grades.csv       (grade scale)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Table Names
    // -------------------------------------------------------------------------
    /// Credentials table file name
    pub users_file: String,

    /// Students table file name
    pub students_file: String,

    /// Professors table file name
    pub professors_file: String,

    /// Course catalog file name
    pub courses_file: String,

    /// Grade scale file name
    pub grades_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./checkmygrade_data"),
            users_file: "login.csv".to_string(),
            students_file: "student.csv".to_string(),
            professors_file: "professor.csv".to_string(),
            courses_file: "course.csv".to_string(),
            grades_file: "grades.csv".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the credentials table
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    /// Full path of the students table
    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(&self.students_file)
    }

    /// Full path of the professors table
    pub fn professors_path(&self) -> PathBuf {
        self.data_dir.join(&self.professors_file)
    }

    /// Full path of the course catalog
    pub fn courses_path(&self) -> PathBuf {
        self.data_dir.join(&self.courses_file)
    }

    /// Full path of the grade scale
    pub fn grades_path(&self) -> PathBuf {
        self.data_dir.join(&self.grades_file)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all tables)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the credentials table file name
    pub fn users_file(mut self, name: impl Into<String>) -> Self {
        self.config.users_file = name.into();
        self
    }

    /// Set the students table file name
    pub fn students_file(mut self, name: impl Into<String>) -> Self {
        self.config.students_file = name.into();
        self
    }

    /// Set the professors table file name
    pub fn professors_file(mut self, name: impl Into<String>) -> Self {
        self.config.professors_file = name.into();
        self
    }

    /// Set the course catalog file name
    pub fn courses_file(mut self, name: impl Into<String>) -> Self {
        self.config.courses_file = name.into();
        self
    }

    /// Set the grade scale file name
    pub fn grades_file(mut self, name: impl Into<String>) -> Self {
        self.config.grades_file = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

//! checkmygrade CLI
//!
//! Non-interactive command-line front end over a grade book directory.

use std::process;

use checkmygrade::{Config, Course, Entity, Grade, GradeBook, Role, SortKey};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

/// checkmygrade CLI
#[derive(Parser, Debug)]
#[command(name = "checkmygrade")]
#[command(about = "Student, professor and course records in CSV tables")]
#[command(version)]
struct Args {
    /// Data directory holding the CSV tables
    #[arg(short, long, default_value = "./checkmygrade_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Student,
    Professor,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Role::Student,
            RoleArg::Professor => Role::Professor,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Email,
    Marks,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a student account
    RegisterStudent {
        email: String,
        first_name: String,
        last_name: String,
        #[arg(short, long)]
        password: String,
    },

    /// Register a professor account
    RegisterProfessor {
        email: String,
        name: String,
        rank: String,
        #[arg(short, long)]
        password: String,
    },

    /// Check a login
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long, value_enum)]
        role: RoleArg,
    },

    /// Add or replace a catalog course
    AddCourse {
        course_id: String,
        credits: u32,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Add or replace a grade-scale row
    AddGradeScale {
        grade_id: String,
        grade: String,
        marks_range: String,
    },

    /// Enroll a student in a course
    Enroll { email: String, course_id: String },

    /// Record a grade and marks for an enrolled student
    AssignGrade {
        email: String,
        course_id: String,
        grade: String,
        marks: u32,
    },

    /// Add a course to a professor's teaching load
    Teach { email: String, course_id: String },

    /// Show one student and their per-course grades
    Student { email: String },

    /// Search students by any field
    Search { needle: String },

    /// List students enrolled in a course
    Roster { course_id: String },

    /// Marks statistics for a course
    Stats { course_id: String },

    /// List students sorted
    Sort {
        #[arg(value_enum, default_value = "email")]
        by: SortArg,
    },

    /// List catalog courses and the grade scale
    Catalog,

    /// Delete a student and their login
    DeleteStudent { email: String },

    /// Change a user's password
    Passwd {
        email: String,
        #[arg(short, long)]
        password: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkmygrade=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("checkmygrade v{}", checkmygrade::VERSION);

    let config = Config::builder().data_dir(&args.data_dir).build();

    let mut book = match GradeBook::open(config) {
        Ok(book) => book,
        Err(e) => {
            tracing::error!("Failed to open grade book: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&mut book, args.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(book: &mut GradeBook, command: Commands) -> checkmygrade::Result<()> {
    match command {
        Commands::RegisterStudent {
            email,
            first_name,
            last_name,
            password,
        } => {
            book.register_student(&first_name, &last_name, &email, &password)?;
            println!("Registered student {}", email);
        }
        Commands::RegisterProfessor {
            email,
            name,
            rank,
            password,
        } => {
            book.register_professor(&name, &email, &rank, &password)?;
            println!("Registered professor {}", email);
        }
        Commands::Login {
            email,
            password,
            role,
        } => {
            let user = book.authenticate(&email, &password, role.into())?;
            println!("Logged in as {} ({})", user.user_id, user.role);
        }
        Commands::AddCourse {
            course_id,
            credits,
            name,
            description,
        } => {
            book.courses_mut()
                .add(Course::new(course_id.as_str(), credits, name, description))?;
            println!("Saved course {}", course_id);
        }
        Commands::AddGradeScale {
            grade_id,
            grade,
            marks_range,
        } => {
            book.grades_mut()
                .add(Grade::new(grade_id.as_str(), grade, marks_range))?;
            println!("Saved grade {}", grade_id);
        }
        Commands::Enroll { email, course_id } => {
            book.enroll_student(&email, &course_id)?;
            println!("Enrolled {} in {}", email, course_id);
        }
        Commands::AssignGrade {
            email,
            course_id,
            grade,
            marks,
        } => {
            book.assign_grade(&email, &course_id, &grade, marks)?;
            println!("Recorded {} / {} for {} in {}", grade, marks, email, course_id);
        }
        Commands::Teach { email, course_id } => {
            book.assign_professor_course(&email, &course_id)?;
            println!("{} now teaches {}", email, course_id);
        }
        Commands::Student { email } => {
            let student = book.students().get(&email)?;
            println!("{}", student);
            for enrollment in student.ledger().iter() {
                println!(
                    "  Course: {}, Grade: {}, Marks: {}",
                    enrollment.course_id, enrollment.grade, enrollment.marks
                );
            }
        }
        Commands::Search { needle } => {
            let matches = book.search_students(&needle);
            for student in &matches {
                println!("{}", student);
            }
            println!("{} match(es)", matches.len());
        }
        Commands::Roster { course_id } => {
            for entry in book.course_roster(&course_id) {
                println!(
                    "Student Email: {} Name: {}, Grade: {}, Marks: {}",
                    entry.email_address, entry.name, entry.grade, entry.marks
                );
            }
        }
        Commands::Stats { course_id } => {
            println!("{}: {}", course_id, book.course_stats(&course_id)?);
        }
        Commands::Sort { by } => {
            let key = match by {
                SortArg::Email => SortKey::Email,
                SortArg::Marks => SortKey::Marks,
            };
            for student in book.students_sorted_by(key) {
                println!("{}", student);
            }
        }
        Commands::Catalog => {
            for course in book.courses().iter() {
                println!("{}", course);
            }
            for grade in book.grades().iter() {
                println!("{}", grade);
            }
        }
        Commands::DeleteStudent { email } => {
            let student = book.delete_student_account(&email)?;
            println!("Deleted student {}", student.key());
        }
        Commands::Passwd { email, password } => {
            book.change_password(&email, &password)?;
            println!("Password changed for {}", email);
        }
    }

    Ok(())
}

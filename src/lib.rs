//! # checkmygrade
//!
//! Academic records kept in flat CSV tables:
//! - Students, professors, courses, grade scales and logins
//! - One table per entity kind, rewritten in full on every change
//! - Per-student course ledger (course, grade, marks)
//! - Course statistics (min / max / mean / median)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI (bin/cli.rs)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      GradeBook                               │
//! │     (registration, enrollment, grading, reports, auth)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Repository  │          │   Ledger    │
//!   │   <T>  x5   │          │ (Student)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ TableStore  │
//!   │   (CSV)     │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod ledger;
pub mod entity;
pub mod repository;
pub mod stats;
pub mod auth;
pub mod gradebook;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GradeError, Result};
pub use config::Config;
pub use entity::{Course, Entity, Grade, Professor, Role, Student, User};
pub use gradebook::{GradeBook, RosterEntry, SortKey};
pub use repository::Repository;
pub use stats::{compute_stats, MarkStats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of checkmygrade
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

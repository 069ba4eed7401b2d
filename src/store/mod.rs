//! Store Module
//!
//! Tabular persistence layer: one CSV file per entity kind.
//!
//! ## Responsibilities
//! - Read a whole table into named-field records
//! - Rewrite a whole table from named-field records
//! - Never leave a half-written table behind on success
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header row: field names, taken from the      │
//! │ first record written                         │
//! ├──────────────────────────────────────────────┤
//! │ One row per record, values in header order   │
//! │ (RFC 4180 quoting, so "CS101,CS102" stays a  │
//! │  single field)                               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! A missing file is an empty table, not an error.

mod record;
mod table;

pub use record::Record;
pub use table::TableStore;

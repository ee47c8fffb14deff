//! RFI Format - Core primitives for the Record Field Injector
//!
//! This crate provides the scanning and parsing layer with no I/O
//! dependencies. It includes:
//!
//! - Balanced-delimiter lexical scanning aware of strings and comments
//! - Record (object literal) and field discovery
//! - Injected field definitions
//! - Error types
//! - Input limits
//! - Defaults and well-known names

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod field;
pub mod lexer;
pub mod limits;
pub mod record;

// Re-export commonly used types
pub use error::{Result, RfiError};
pub use field::{default_author_fields, FieldValue, InjectedField};
pub use limits::Limits;
pub use record::{parse_anchored_records, parse_records, Field, Record};

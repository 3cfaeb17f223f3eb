//! Validation Engine
//!
//! Clean separation of validation logic from parsing and LSP concerns.

pub mod engine;
pub mod rules;

pub use engine::{validate_document, validate_source, Finding, ValidationResult};
pub use crate::rules::Severity;

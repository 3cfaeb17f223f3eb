//! LSP Protocol Implementation
//!
//! Publishes findings as diagnostics and helps write documentation headings.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
pub use server::serve;

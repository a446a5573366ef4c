//! Infrastructure adapters. Implement ports.
//!
//! Content files/HTTP, local storage, terminal UI. Map errors to DomainError.

pub mod content;
pub mod persistence;
pub mod ui;

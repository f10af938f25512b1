//! qapflow - A CLI tool for moving Quality Assurance Plans through a
//! multi-level review workflow
//!
//! This library provides the core functionality for the qapflow CLI, including:
//! - Schema definitions for QAP records, users and store configuration
//! - Domain logic for workflow transitions, access control and turnaround
//!   analytics
//! - File system utilities for the JSON record store

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;

// Re-export commonly used types
pub use errors::{QapError, Result};
pub use schemas::{Config, QapRecord, QapStatus, Role, User};

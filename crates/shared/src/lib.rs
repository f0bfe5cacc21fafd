//! Shared types, errors, and configuration for Finnote.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for goals, transactions, notes and toasts
//! - Money display helpers with decimal precision
//! - Pagination parameters for note listings
//! - The user-facing error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

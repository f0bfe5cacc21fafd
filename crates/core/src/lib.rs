//! Core business logic for Finnote.
//!
//! This crate contains pure business logic with ZERO HTTP dependencies.
//! All domain types, aggregation rules, and projections live here.
//!
//! # Modules
//!
//! - `goals` - Goal progress aggregation, status classification, category filtering
//! - `finance` - Monthly income/expense summaries
//! - `notes` - Note categories, validation, previews and search
//! - `notify` - Notification center for success/error toasts
//! - `guard` - Per-target guard against duplicate in-flight mutations

pub mod finance;
pub mod goals;
pub mod guard;
pub mod notes;
pub mod notify;

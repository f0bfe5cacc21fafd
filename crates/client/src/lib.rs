//! REST client and view-model services for Finnote.
//!
//! - `http` - `ApiClient`, response decoding and error mapping
//! - `api` - goal, finance and note endpoint traits
//! - `services` - goal board, finance ledger and notes desk

pub mod api;
pub mod http;
pub mod services;

pub use api::{FinanceApi, GoalsApi, NotesApi};
pub use http::{ApiClient, ApiResponse};
pub use services::{FinanceLedger, GoalBoard, NotesDesk};

//! Stateful view models over the API.
//!
//! Every mutation follows the same path: take the in-flight ticket for its
//! target, call the API once, toast the outcome, and re-fetch on success.
//! Nothing is retried and nothing is updated optimistically.

pub mod board;
pub mod desk;
pub mod ledger;

use std::future::Future;

use finnote_core::guard::InFlightGuard;
use finnote_core::notify::Notifier;
use finnote_shared::AppResult;

pub use board::{BoardState, GoalBoard};
pub use desk::{DeskState, NotesDesk};
pub use ledger::{FinanceLedger, LedgerState};

/// Toast titles for one kind of mutation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Outcome {
    pub success: &'static str,
    pub failure: &'static str,
}

/// Runs one guarded mutation and toasts its result.
pub(crate) async fn run_mutation<T, N, F>(
    guard: &InFlightGuard,
    notifier: &N,
    key: &str,
    outcome: Outcome,
    call: F,
) -> AppResult<T>
where
    N: Notifier,
    F: Future<Output = AppResult<T>>,
{
    let _ticket = match guard.acquire(key) {
        Ok(ticket) => ticket,
        Err(err) => {
            tracing::warn!(key, "Duplicate submission ignored");
            notifier.error(outcome.failure, Some(&err.user_message()));
            return Err(err);
        }
    };

    match call.await {
        Ok(value) => {
            tracing::info!(key, "{}", outcome.success);
            notifier.success(outcome.success, None);
            Ok(value)
        }
        Err(err) => {
            tracing::error!(key, code = err.error_code(), error = %err, "{}", outcome.failure);
            notifier.error(outcome.failure, Some(&err.user_message()));
            Err(err)
        }
    }
}

//! In-memory stores.
//!
//! Each store owns its collection behind a mutex and only exposes the
//! operations that keep the collection's invariants. Contents live for the
//! lifetime of the process.

pub mod accounts;
pub mod tasks;

pub use accounts::AccountStore;
pub use tasks::TaskStore;

use crate::error::AppError;
use std::sync::{Mutex, MutexGuard};

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::InternalServerError(format!("{} store lock poisoned", name)))
}

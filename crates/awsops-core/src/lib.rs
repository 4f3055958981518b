//! Core types and errors for the awsops operator tools.
//!
//! This crate provides the foundational pieces shared by both tools:
//!
//! - **Types**: DNS record rows, change batches, instance states, run counters
//! - **Errors**: Typed failure kinds with [`OpsError`]
//!
//! Everything here is pure data: no I/O and no AWS calls. The change-batch
//! builder in [`types::change`] is a deterministic transformation so it can
//! be tested without credentials.

mod error;
pub mod types;

pub use error::{OpsError, Result};
pub use types::*;

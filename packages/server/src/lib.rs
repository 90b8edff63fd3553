//! In-memory stand-in for the focus-session backend.
//!
//! Enforces the server-side invariant the client relies on: at most one
//! active session per user, with an authoritative `startTime`. Completed
//! sessions are retained in memory for the stats endpoint. This is a
//! development and test double for the real service, not a durable store.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;

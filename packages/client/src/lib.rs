//! Focus-session client library.
//!
//! Implements the "Zen Mode" slice of a personal productivity app as a
//! terminal client: a three-state focus-session machine (`Idle`, `Running`,
//! `Paused`) with a 1-second local countdown, a 2-second status poll that
//! keeps any number of concurrently running clients converged on the
//! server's single active session, and procedurally synthesized ambient
//! noise played through the default audio device.

pub mod api;
pub mod audio;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod noise;
pub mod runner;
pub mod sync;
pub mod timer;

//! Utilities shared by the zazen client and the stand-in server.

pub mod logger;
pub mod time;

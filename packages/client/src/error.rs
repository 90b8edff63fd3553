//! Error types for the focus-session client.

use thiserror::Error;

use crate::audio::AudioError;

/// Client-specific errors.
///
/// Nothing here is fatal: every variant degrades to "timer not started" or
/// "sound not playing", and the user may retry by re-issuing the command.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A remote call failed (network or server error). No automatic retry;
    /// retrying is the caller's choice.
    #[error("request failed: {0}")]
    Transient(String),

    /// The server answered, but the payload failed validation (e.g. an
    /// active session without a parseable `startTime`).
    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    /// The audio subsystem is unavailable; sound selection is degraded, no
    /// channel is left active.
    #[error("audio output unavailable: {0}")]
    AudioUnsupported(#[from] AudioError),
}

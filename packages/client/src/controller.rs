//! Focus-session state machine.
//!
//! Three phases: `Idle`, `Running`, `Paused`. `Paused` is local-only — the
//! server model has no paused state, so other clients keep seeing the
//! session as active. That asymmetry is deliberate and preserved here.

use std::sync::Arc;

use zazen_shared::time::Clock;

use crate::api::{ActiveSession, FocusSession, SessionApi};
use crate::error::ClientError;
use crate::sync;
use crate::timer::TimerState;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    /// Local-only: the countdown is frozen here but the server (and every
    /// other client) still considers the session active
    Paused,
}

/// User-facing events produced by transitions. The command loop renders
/// them; the controller never prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// A session was started from this client
    Started { goals: Vec<String> },
    /// The session ended from this client; `completed` distinguishes the
    /// countdown reaching zero from a manual stop
    Ended { completed: bool },
    /// A poll found a session started elsewhere and this client adopted it
    ResumedElsewhere,
    /// A poll found the session gone; this client reset to idle
    EndedElsewhere,
}

/// What ending a session produced.
///
/// Local state is already back at idle defaults when this is returned, even
/// if the remote call failed — ending is best-effort by design.
#[derive(Debug)]
pub struct StopOutcome {
    pub notice: SessionNotice,
    /// Remote end failure, if any, for the caller to surface
    pub error: Option<ClientError>,
}

/// The state machine tying together start/pause/stop/complete transitions.
pub struct FocusController {
    api: Arc<dyn SessionApi>,
    clock: Arc<dyn Clock>,
    phase: Phase,
    timer: TimerState,
    session: Option<FocusSession>,
}

impl FocusController {
    pub fn new(api: Arc<dyn SessionApi>, clock: Arc<dyn Clock>, duration_secs: u32) -> Self {
        Self {
            api,
            clock,
            phase: Phase::Idle,
            timer: TimerState::new(duration_secs),
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    /// The cached server session, when one is known
    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    /// Reconfigure the session length. Only honored while idle; returns
    /// whether the new length was applied.
    pub fn set_duration(&mut self, duration_secs: u32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.timer.set_initial_duration(duration_secs);
        true
    }

    /// `Idle -> Running`: open a session remotely, then start the countdown.
    ///
    /// On a paused controller this resumes locally instead (the start button
    /// doubles as resume); on a running one it is a no-op. On failure the
    /// controller stays idle and the error is surfaced.
    pub async fn start(&mut self, goals: Vec<String>) -> Result<Option<SessionNotice>, ClientError> {
        match self.phase {
            Phase::Running => Ok(None),
            Phase::Paused => {
                self.resume();
                Ok(None)
            }
            Phase::Idle => {
                let session = self.api.start_session(goals.clone()).await?;
                self.session = Some(session);
                self.timer.start();
                self.phase = Phase::Running;
                Ok(Some(SessionNotice::Started { goals }))
            }
        }
    }

    /// `Running -> Paused`: freeze the countdown locally. The server is not
    /// notified. Returns whether the transition applied.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.timer.pause();
        self.phase = Phase::Paused;
        true
    }

    /// `Paused -> Running`: resume the countdown without contacting the
    /// server. Returns whether the transition applied.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.timer.resume();
        self.phase = Phase::Running;
        true
    }

    /// `Running/Paused -> Idle`: end the session remotely and reset local
    /// state. Returns `None` when already idle.
    pub async fn stop(&mut self) -> Option<StopOutcome> {
        if self.phase == Phase::Idle {
            return None;
        }
        Some(self.finish(false).await)
    }

    /// Advance the countdown by one second. Returns an outcome only on the
    /// tick that completes the session (auto-complete fires once).
    ///
    /// A session adopted or corrected to zero remaining completes on the
    /// next tick as well.
    pub async fn tick(&mut self) -> Option<StopOutcome> {
        if self.phase != Phase::Running {
            return None;
        }
        let completed = self.timer.tick() || self.timer.remaining_secs() == 0;
        if !completed {
            return None;
        }
        Some(self.finish(true).await)
    }

    /// Apply a poll result from the status endpoint. The server is
    /// authoritative: the freshest poll always wins over the local guess,
    /// except inside the jitter tolerance band.
    pub fn apply_poll(&mut self, poll: &ActiveSession) -> Option<SessionNotice> {
        match (poll, self.phase) {
            (ActiveSession::Active(session), Phase::Idle) => {
                // Started elsewhere: adopt the server's start time against
                // the locally configured duration.
                self.session = Some(session.clone());
                self.timer.start();
                self.timer.correct(self.expected_remaining(session) as u32);
                self.phase = Phase::Running;
                Some(SessionNotice::ResumedElsewhere)
            }
            (ActiveSession::Active(session), Phase::Running | Phase::Paused) => {
                let expected = self.expected_remaining(session);
                if sync::exceeds_tolerance(expected, self.timer.remaining_secs()) {
                    self.timer.correct(expected as u32);
                }
                self.session = Some(session.clone());
                None
            }
            (ActiveSession::Inactive, Phase::Running | Phase::Paused) => {
                self.session = None;
                self.timer.reset();
                self.phase = Phase::Idle;
                Some(SessionNotice::EndedElsewhere)
            }
            (ActiveSession::Inactive, Phase::Idle) => None,
        }
    }

    fn expected_remaining(&self, session: &FocusSession) -> f64 {
        sync::expected_remaining_secs(
            self.timer.initial_duration_secs(),
            session.start_time_millis,
            self.clock.now_utc_millis(),
        )
    }

    /// End the session: reset local state first (best-effort semantics),
    /// then tell the server.
    async fn finish(&mut self, completed: bool) -> StopOutcome {
        self.session = None;
        self.timer.reset();
        self.phase = Phase::Idle;

        let error = self.api.end_session().await.err();
        StopOutcome {
            notice: SessionNotice::Ended { completed },
            error,
        }
    }
}

//! Local countdown state.
//!
//! Purely local and ephemeral: one [`TimerState`] per client process. The
//! local tick is only trusted between synchronization points; authoritative
//! corrections come through [`TimerState::correct`].

/// Session length presets offered by the UI, in seconds (15/25/45/60 min)
pub const DURATION_PRESETS_SECS: [u32; 4] = [900, 1500, 2700, 3600];

/// Default session length: 25 minutes
pub const DEFAULT_DURATION_SECS: u32 = 1500;

/// Countdown state for one client process.
///
/// Invariant: `0 <= remaining_secs <= initial_duration_secs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    initial_duration_secs: u32,
    remaining_secs: u32,
    is_running: bool,
}

impl TimerState {
    /// Create an idle timer with the given session length
    pub fn new(initial_duration_secs: u32) -> Self {
        Self {
            initial_duration_secs,
            remaining_secs: initial_duration_secs,
            is_running: false,
        }
    }

    pub fn initial_duration_secs(&self) -> u32 {
        self.initial_duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Reconfigure the session length; also resets the countdown
    pub fn set_initial_duration(&mut self, secs: u32) {
        self.initial_duration_secs = secs;
        self.remaining_secs = secs;
    }

    /// Begin ticking from a full countdown
    pub fn start(&mut self) {
        self.remaining_secs = self.initial_duration_secs;
        self.is_running = true;
    }

    /// Freeze the countdown in place
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Resume ticking from the frozen value
    pub fn resume(&mut self) {
        self.is_running = true;
    }

    /// Back to idle defaults: full countdown, not ticking
    pub fn reset(&mut self) {
        self.remaining_secs = self.initial_duration_secs;
        self.is_running = false;
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `true` exactly when this tick moved the countdown to zero, so
    /// auto-complete fires once and not on every subsequent tick.
    pub fn tick(&mut self) -> bool {
        if !self.is_running || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    /// Overwrite the countdown with an authoritative value, clamped to the
    /// configured session length
    pub fn correct(&mut self, remaining_secs: u32) {
        self.remaining_secs = remaining_secs.min(self.initial_duration_secs);
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

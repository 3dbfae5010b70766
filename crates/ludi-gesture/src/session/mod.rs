// session/mod.rs
//
// Capture sessions turn a pointer event stream into buffered strokes and
// decide when to classify them. Both variants share the same gate logic:
// suspension, the post-suspension cooldown, and the lockout after a result.

pub mod simple;
pub mod split;
pub mod zone;

pub use simple::SimpleSession;
pub use split::SplitSession;
pub use zone::{Zone, ZoneColor};

use glam::Vec2;
use crate::api::config::SessionConfig;
use crate::api::types::Recognition;
use crate::core::time::Countdown;
use crate::input::queue::{InputEvent, InputQueue};

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No active gesture.
    Idle,
    /// Pointer is down and samples are being recorded.
    Drawing,
    /// Strokes are buffered and the inactivity timer is running.
    Awaiting,
    /// A result was produced; input is locked until cleanup.
    Cooldown,
    /// Suspended by the host, or still inside the resume cooldown.
    Suspended,
}

impl SessionState {
    /// Stable numeric code, used by the web bridge.
    pub fn code(self) -> u32 {
        match self {
            SessionState::Idle => 0,
            SessionState::Drawing => 1,
            SessionState::Awaiting => 2,
            SessionState::Cooldown => 3,
            SessionState::Suspended => 4,
        }
    }
}

/// The contract both capture sessions fulfill.
pub trait CaptureSession {
    /// Pointer pressed at a screen position.
    fn pointer_down(&mut self, pos: Vec2);

    /// Held pointer moved to a screen position.
    fn pointer_move(&mut self, pos: Vec2);

    /// Pointer released.
    fn pointer_up(&mut self, pos: Vec2);

    /// Advance timers by `dt` seconds. Returns a result when classification fired.
    fn update(&mut self, dt: f32) -> Option<Recognition>;

    /// Drop all buffered input and re-enable drawing immediately.
    fn clear(&mut self);

    /// Pause or resume input processing (e.g. while a tutorial overlay is shown).
    /// Buffered strokes and timers are kept and resume after the cooldown.
    fn set_suspended(&mut self, suspended: bool);

    /// Answer the next recognition is checked against; `None` accepts any number.
    fn set_expected_answer(&mut self, answer: Option<i64>);

    fn state(&self) -> SessionState;

    /// Dispatch a single queued event.
    fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { .. } => self.pointer_down(event.pos()),
            InputEvent::PointerMove { .. } => self.pointer_move(event.pos()),
            InputEvent::PointerUp { .. } => self.pointer_up(event.pos()),
        }
    }

    /// Process one frame: queued events first, then timers.
    fn step(&mut self, dt: f32, input: &InputQueue) -> Option<Recognition> {
        for event in input.iter() {
            self.handle(event);
        }
        self.update(dt)
    }
}

/// What the gate allows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GateStep {
    /// Nothing may run.
    Blocked,
    /// The cleanup lockout just ended; buffers must be reset.
    Reset,
    /// Input and the inactivity timer may run.
    Open,
}

/// Suspension, resume cooldown, and post-result lockout.
#[derive(Debug, Clone)]
pub(crate) struct Gate {
    suspended: bool,
    resume: Countdown,
    cleanup: Option<Countdown>,
    expected: Option<i64>,
}

impl Gate {
    pub(crate) fn new() -> Self {
        Self {
            suspended: false,
            resume: Countdown::finished(),
            cleanup: None,
            expected: None,
        }
    }

    pub(crate) fn accepts_input(&self) -> bool {
        !self.is_suspended() && !self.is_locked()
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.suspended || !self.resume.is_finished()
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.cleanup.is_some()
    }

    pub(crate) fn expected(&self) -> Option<i64> {
        self.expected
    }

    pub(crate) fn set_expected(&mut self, answer: Option<i64>) {
        self.expected = answer;
    }

    pub(crate) fn advance(&mut self, dt: f32) -> GateStep {
        if self.suspended {
            return GateStep::Blocked;
        }
        if !self.resume.is_finished() {
            self.resume.tick(dt);
            return GateStep::Blocked;
        }
        if let Some(cleanup) = self.cleanup.as_mut() {
            if cleanup.tick(dt) {
                self.cleanup = None;
                return GateStep::Reset;
            }
            return GateStep::Blocked;
        }
        GateStep::Open
    }

    /// Returns true when the session has just become suspended and must end
    /// the stroke in progress. Buffered strokes and pending timers are frozen.
    pub(crate) fn set_suspended(&mut self, suspended: bool, config: &SessionConfig) -> bool {
        match (self.suspended, suspended) {
            (false, true) => {
                self.suspended = true;
                true
            }
            (true, false) => {
                self.suspended = false;
                self.resume = Countdown::new(config.resume_cooldown);
                false
            }
            _ => false,
        }
    }

    /// Start the post-result lockout.
    pub(crate) fn lock(&mut self, succeeded: bool, config: &SessionConfig) {
        let delay = if succeeded {
            config.success_cleanup_delay
        } else {
            config.failure_cleanup_delay
        };
        self.cleanup = Some(Countdown::new(delay));
    }

    /// Manual clear: drop the lockout and any resume cooldown.
    pub(crate) fn clear(&mut self) {
        self.cleanup = None;
        self.resume = Countdown::finished();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_cooldown_blocks_input() {
        let config = SessionConfig::default();
        let mut gate = Gate::new();
        assert!(gate.set_suspended(true, &config));
        assert!(!gate.accepts_input());
        assert_eq!(gate.advance(1.0), GateStep::Blocked);

        assert!(!gate.set_suspended(false, &config));
        assert!(!gate.accepts_input());
        assert_eq!(gate.advance(0.1), GateStep::Blocked);
        assert_eq!(gate.advance(0.15), GateStep::Blocked);
        assert!(gate.accepts_input());
        assert_eq!(gate.advance(0.016), GateStep::Open);
    }

    #[test]
    fn lockout_depends_on_outcome() {
        let config = SessionConfig::single_zone();
        let mut gate = Gate::new();

        gate.lock(true, &config);
        assert_eq!(gate.advance(0.0), GateStep::Reset);

        gate.lock(false, &config);
        assert_eq!(gate.advance(0.5), GateStep::Blocked);
        assert_eq!(gate.advance(0.6), GateStep::Reset);
        assert_eq!(gate.advance(0.016), GateStep::Open);
    }

    #[test]
    fn suspension_freezes_lockout() {
        let config = SessionConfig::single_zone();
        let mut gate = Gate::new();
        gate.lock(false, &config);
        assert_eq!(gate.advance(0.5), GateStep::Blocked);

        gate.set_suspended(true, &config);
        assert_eq!(gate.advance(10.0), GateStep::Blocked);
        assert!(gate.is_locked());

        gate.set_suspended(false, &config);
        assert_eq!(gate.advance(0.3), GateStep::Blocked);
        assert_eq!(gate.advance(0.4), GateStep::Blocked);
        assert_eq!(gate.advance(0.2), GateStep::Reset);
    }

    #[test]
    fn clear_skips_cooldowns() {
        let config = SessionConfig::default();
        let mut gate = Gate::new();
        gate.set_suspended(true, &config);
        gate.set_suspended(false, &config);
        gate.lock(false, &config);
        gate.clear();
        assert!(gate.accepts_input());
    }

    #[test]
    fn state_codes_are_stable() {
        assert_eq!(SessionState::Idle.code(), 0);
        assert_eq!(SessionState::Suspended.code(), 4);
    }
}

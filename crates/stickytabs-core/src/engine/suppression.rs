//! Timed gate that mutes visibility-driven tab updates after a tab press.
//!
//! States: `Idle` (visibility updates apply) and `Suppressed` (ignored).
//! A press arms the gate; pressing again replaces the deadline rather than
//! extending it. The gate holds a single deadline, so there is never more than
//! one pending expiry.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Suppressed,
}

#[derive(Debug, Clone)]
pub struct SuppressionGate {
    window: Duration,
    deadline: Option<Instant>,
}

impl SuppressionGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the gate from now. Returns the new deadline.
    pub fn arm(&mut self) -> Instant {
        self.arm_at(Instant::now())
    }

    pub fn arm_at(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        if self.deadline.take().is_some() {
            debug!("Suppression re-armed, previous deadline dropped");
        }
        self.deadline = Some(deadline);
        deadline
    }

    pub fn state(&self) -> GateState {
        self.state_at(Instant::now())
    }

    /// Suppressed over `[armed, armed + window)`
    pub fn state_at(&self, now: Instant) -> GateState {
        match self.deadline {
            Some(deadline) if now < deadline => GateState::Suppressed,
            _ => GateState::Idle,
        }
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.state() == GateState::Suppressed
    }

    /// Current state, clearing the deadline once it has passed
    pub fn poll(&mut self) -> GateState {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> GateState {
        let state = self.state_at(now);
        if state == GateState::Idle && self.deadline.take().is_some() {
            debug!("Suppression window elapsed");
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_starts_idle() {
        let gate = SuppressionGate::new(WINDOW);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_window_is_half_open() {
        let t = Instant::now();
        let mut gate = SuppressionGate::new(WINDOW);
        gate.arm_at(t);

        assert_eq!(gate.state_at(t), GateState::Suppressed);
        assert_eq!(gate.state_at(t + Duration::from_millis(499)), GateState::Suppressed);
        assert_eq!(gate.state_at(t + WINDOW), GateState::Idle);
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let t1 = Instant::now();
        let mut gate = SuppressionGate::new(WINDOW);
        gate.arm_at(t1);
        let t2 = t1 + Duration::from_millis(100);
        let deadline = gate.arm_at(t2);

        assert_eq!(deadline, t2 + WINDOW);
        assert_eq!(gate.state_at(t1 + WINDOW), GateState::Suppressed);
        assert_eq!(gate.state_at(t2 + WINDOW), GateState::Idle);
    }

    #[test]
    fn test_poll_clears_expired_deadline() {
        let t = Instant::now();
        let mut gate = SuppressionGate::new(WINDOW);
        gate.arm_at(t);
        assert_eq!(gate.poll_at(t + Duration::from_millis(10)), GateState::Suppressed);
        assert_eq!(gate.poll_at(t + Duration::from_millis(600)), GateState::Idle);
        assert_eq!(gate.state_at(t), GateState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_on_paused_clock() {
        let mut gate = SuppressionGate::new(WINDOW);
        gate.arm();

        tokio::time::advance(Duration::from_millis(499)).await;
        assert!(gate.is_suppressed());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(!gate.is_suppressed());
        assert_eq!(gate.poll(), GateState::Idle);
    }
}

//! Lock delay - grace period between grounding and locking
//!
//! The timer is plain state (`armed_at` on the session clock plus a reset
//! counter) that the session checks on every tick, so no callbacks or wall
//! clock are involved. At most one timer exists; arming while armed is a no-op
//! and re-arming always replaces the previous deadline.

/// Lock-delay timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockDelay {
    delay_ms: u32,
    reset_limit: u8,
    /// Session clock time the timer was (re)started; `None` when idle.
    armed_at: Option<u64>,
    reset_count: u8,
}

impl LockDelay {
    pub fn new(delay_ms: u32, reset_limit: u8) -> Self {
        Self {
            delay_ms,
            reset_limit,
            armed_at: None,
            reset_count: 0,
        }
    }

    /// Start the timer on ground contact
    ///
    /// An already armed timer is left untouched. The reset budget carries
    /// over from earlier groundings until `reset` is called. Returns whether a
    /// new timer was started.
    pub fn arm(&mut self, now_ms: u64) -> bool {
        if self.armed_at.is_some() {
            return false;
        }
        self.armed_at = Some(now_ms);
        true
    }

    /// Postpone the deadline after a successful move or rotation
    ///
    /// Only applies while armed and under the reset limit; past the limit the
    /// armed deadline stands. Returns whether the timer was restarted.
    pub fn notify_reset(&mut self, now_ms: u64) -> bool {
        if self.armed_at.is_none() || self.reset_count >= self.reset_limit {
            return false;
        }
        self.armed_at = Some(now_ms);
        self.reset_count += 1;
        true
    }

    /// Drop a pending timer (piece left the ground, hard drop, pause)
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Cancel and restore the reset budget (descent, new piece, restart)
    pub fn reset(&mut self) {
        self.armed_at = None;
        self.reset_count = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Has the armed deadline passed at `now_ms`?
    pub fn expired(&self, now_ms: u64) -> bool {
        match self.armed_at {
            Some(start) => now_ms.saturating_sub(start) >= self.delay_ms as u64,
            None => false,
        }
    }

    /// Time left before expiry, `None` when idle
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u32> {
        self.armed_at.map(|start| {
            let elapsed = now_ms.saturating_sub(start);
            (self.delay_ms as u64).saturating_sub(elapsed) as u32
        })
    }

    /// Session clock time the current deadline was set
    pub fn armed_at(&self) -> Option<u64> {
        self.armed_at
    }

    pub fn reset_count(&self) -> u8 {
        self.reset_count
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_is_idempotent_while_armed() {
        let mut lock = LockDelay::new(500, 15);
        assert!(lock.arm(100));
        assert!(!lock.arm(300));
        assert_eq!(lock.armed_at(), Some(100));
        assert!(!lock.expired(599));
        assert!(lock.expired(600));
    }

    #[test]
    fn reset_requires_armed_timer() {
        let mut lock = LockDelay::new(500, 15);
        assert!(!lock.notify_reset(10));
        assert_eq!(lock.reset_count(), 0);
        assert!(!lock.is_armed());
    }

    #[test]
    fn resets_stop_at_limit() {
        let mut lock = LockDelay::new(500, 15);
        lock.arm(0);
        for i in 1..=15u64 {
            assert!(lock.notify_reset(i * 100));
        }
        assert_eq!(lock.reset_count(), 15);
        assert_eq!(lock.armed_at(), Some(1500));

        // 16th reset is refused; deadline stays at 1500 + 500
        assert!(!lock.notify_reset(1700));
        assert_eq!(lock.armed_at(), Some(1500));
        assert!(lock.expired(2000));
    }

    #[test]
    fn rearm_keeps_spent_budget() {
        let mut lock = LockDelay::new(500, 2);
        lock.arm(0);
        lock.notify_reset(1);
        lock.notify_reset(2);
        assert!(!lock.notify_reset(3));

        lock.cancel();
        assert!(lock.arm(10));
        assert_eq!(lock.reset_count(), 2);
        assert!(!lock.notify_reset(11));
        assert_eq!(lock.armed_at(), Some(10));
    }

    #[test]
    fn reset_restores_budget() {
        let mut lock = LockDelay::new(500, 2);
        lock.arm(0);
        lock.notify_reset(1);
        lock.notify_reset(2);

        lock.reset();
        assert!(!lock.is_armed());
        assert!(lock.arm(10));
        assert_eq!(lock.reset_count(), 0);
        assert!(lock.notify_reset(11));
    }

    #[test]
    fn remaining_counts_down() {
        let mut lock = LockDelay::new(500, 15);
        assert_eq!(lock.remaining_ms(0), None);
        lock.arm(1000);
        assert_eq!(lock.remaining_ms(1200), Some(300));
        assert_eq!(lock.remaining_ms(2000), Some(0));
    }
}

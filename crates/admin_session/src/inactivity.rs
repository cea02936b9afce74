//! Idle-session state machine.
//!
//! One countdown, two thresholds: the warning fires at
//! `timeout - warning_window` of idleness and expiry at `timeout`. Time is
//! supplied by the caller in milliseconds so the same code runs in the
//! browser (`Date.now()`) and in native tests.

use crate::error::AppError;

pub const DEFAULT_TIMEOUT_MS: u64 = 20 * 60 * 1000;
pub const DEFAULT_WARNING_MS: u64 = 2 * 60 * 1000;
pub const TICK_INTERVAL_MS: u32 = 1000;
pub const HEARTBEAT_INTERVAL_MS: u64 = 60 * 1000;

/// DOM events that count as user activity.
pub const ACTIVITY_EVENTS: [&str; 8] = [
    "mousedown",
    "mousemove",
    "keypress",
    "scroll",
    "touchstart",
    "click",
    "keydown",
    "wheel",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityConfig {
    timeout_ms: u64,
    warning_ms: u64,
}

impl Default for InactivityConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            warning_ms: DEFAULT_WARNING_MS,
        }
    }
}

fn minutes_to_ms(minutes: u64) -> Result<u64, AppError> {
    minutes
        .checked_mul(60_000)
        .ok_or_else(|| AppError::Config(format!("{minutes} minutes is too long a duration")))
}

impl InactivityConfig {
    /// # Errors
    /// Returns an error for a zero timeout or a warning window that is not
    /// strictly shorter than the timeout.
    pub fn new(timeout_ms: u64, warning_ms: u64) -> Result<Self, AppError> {
        if timeout_ms == 0 {
            return Err(AppError::Config("inactivity timeout must be positive".to_string()));
        }
        if warning_ms >= timeout_ms {
            return Err(AppError::Config(format!(
                "warning window ({warning_ms} ms) must be shorter than the timeout ({timeout_ms} ms)"
            )));
        }
        Ok(Self {
            timeout_ms,
            warning_ms,
        })
    }

    /// # Errors
    /// Same rules as [`InactivityConfig::new`], plus `Config` when a value
    /// does not fit in milliseconds.
    pub fn from_minutes(timeout: u64, warning: u64) -> Result<Self, AppError> {
        Self::new(minutes_to_ms(timeout)?, minutes_to_ms(warning)?)
    }

    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    #[must_use]
    pub const fn warning_ms(&self) -> u64 {
        self.warning_ms
    }

    const fn warn_after_ms(&self) -> u64 {
        self.timeout_ms - self.warning_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Warned,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Warn { remaining_ms: u64 },
    Resume,
    Expire,
}

#[derive(Debug, Clone)]
pub struct InactivityMonitor {
    config: InactivityConfig,
    last_activity_ms: u64,
    phase: Phase,
}

impl InactivityMonitor {
    #[must_use]
    pub const fn new(config: InactivityConfig, now_ms: u64) -> Self {
        Self {
            config,
            last_activity_ms: now_ms,
            phase: Phase::Active,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> InactivityConfig {
        self.config
    }

    #[must_use]
    pub const fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Restart the countdown. Clears a pending warning; ignored once expired.
    pub fn record_activity(&mut self, now_ms: u64) -> Option<Transition> {
        match self.phase {
            Phase::Expired => None,
            Phase::Active => {
                self.last_activity_ms = now_ms;
                None
            }
            Phase::Warned => {
                self.last_activity_ms = now_ms;
                self.phase = Phase::Active;
                Some(Transition::Resume)
            }
        }
    }

    /// Advance the clock. Each transition is reported once.
    pub fn tick(&mut self, now_ms: u64) -> Option<Transition> {
        if self.phase == Phase::Expired {
            return None;
        }
        let idle = now_ms.saturating_sub(self.last_activity_ms);

        if idle >= self.config.timeout_ms {
            self.phase = Phase::Expired;
            return Some(Transition::Expire);
        }
        if idle >= self.config.warn_after_ms() && self.phase == Phase::Active {
            self.phase = Phase::Warned;
            return Some(Transition::Warn {
                remaining_ms: self.config.timeout_ms - idle,
            });
        }
        None
    }

    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let idle = now_ms.saturating_sub(self.last_activity_ms);
        self.config.timeout_ms.saturating_sub(idle)
    }
}

/// `m:ss`, rounding partial seconds up so the display never shows `0:00`
/// while time remains.
#[must_use]
pub fn format_countdown(remaining_ms: u64) -> String {
    let seconds = remaining_ms.div_ceil(1000);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Rate limit for activity heartbeats sent to the backend.
#[derive(Debug, Clone, Copy)]
pub struct HeartbeatThrottle {
    interval_ms: u64,
    last_sent_ms: Option<u64>,
}

impl Default for HeartbeatThrottle {
    fn default() -> Self {
        Self::new(HEARTBEAT_INTERVAL_MS)
    }
}

impl HeartbeatThrottle {
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_sent_ms: None,
        }
    }

    /// Returns `true` and records the send when a heartbeat is due.
    pub fn should_send(&mut self, now_ms: u64) -> bool {
        let due = self
            .last_sent_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.interval_ms);
        if due {
            self.last_sent_ms = Some(now_ms);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: u64 = 60 * 1000;

    fn monitor() -> InactivityMonitor {
        InactivityMonitor::new(InactivityConfig::default(), 0)
    }

    #[test]
    fn config_validation() {
        assert!(InactivityConfig::new(0, 0).is_err());
        assert!(InactivityConfig::new(MINUTE, MINUTE).is_err());
        assert!(InactivityConfig::from_minutes(20, 2).is_ok());
        assert!(matches!(
            InactivityConfig::from_minutes(u64::MAX / 1000, 2),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn warns_at_eighteen_minutes_and_expires_at_twenty() {
        let mut m = monitor();
        assert_eq!(m.tick(17 * MINUTE), None);
        assert_eq!(
            m.tick(18 * MINUTE),
            Some(Transition::Warn {
                remaining_ms: 2 * MINUTE
            })
        );
        assert_eq!(m.phase(), Phase::Warned);
        assert_eq!(m.tick(19 * MINUTE), None);
        assert_eq!(m.tick(20 * MINUTE), Some(Transition::Expire));
        assert!(m.is_expired());
    }

    #[test]
    fn expiry_is_reported_once() {
        let mut m = monitor();
        assert_eq!(m.tick(25 * MINUTE), Some(Transition::Expire));
        assert_eq!(m.tick(26 * MINUTE), None);
        assert_eq!(m.record_activity(26 * MINUTE), None);
        assert!(m.is_expired());
    }

    #[test]
    fn activity_during_warning_resumes() {
        let mut m = monitor();
        m.tick(18 * MINUTE);
        assert_eq!(m.record_activity(18 * MINUTE + 5000), Some(Transition::Resume));
        assert_eq!(m.phase(), Phase::Active);
        assert_eq!(m.tick(20 * MINUTE), None);
        assert_eq!(m.remaining_ms(20 * MINUTE), 18 * MINUTE + 5000);
    }

    #[test]
    fn activity_while_active_resets_countdown() {
        let mut m = monitor();
        assert_eq!(m.record_activity(10 * MINUTE), None);
        assert_eq!(m.tick(27 * MINUTE), None);
        assert!(matches!(m.tick(28 * MINUTE), Some(Transition::Warn { .. })));
    }

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(2 * MINUTE), "2:00");
        assert_eq!(format_countdown(61_500), "1:02");
        assert_eq!(format_countdown(9_000), "0:09");
        assert_eq!(format_countdown(1), "0:01");
        assert_eq!(format_countdown(0), "0:00");
    }

    #[test]
    fn heartbeat_throttle() {
        let mut throttle = HeartbeatThrottle::default();
        assert!(throttle.should_send(0));
        assert!(!throttle.should_send(30_000));
        assert!(throttle.should_send(MINUTE));
    }

    #[test]
    fn event_list_is_complete() {
        assert_eq!(ACTIVITY_EVENTS.len(), 8);
        assert!(ACTIVITY_EVENTS.contains(&"wheel"));
        assert!(ACTIVITY_EVENTS.contains(&"touchstart"));
    }
}

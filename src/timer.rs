use std::time::{Duration, Instant};

/// A cancellable one-shot timeout. Re-arming replaces the pending
/// deadline, so the most recent trigger wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeout {
    deadline: Option<Instant>,
}

impl Timeout {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or past the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let t0 = Instant::now();
        let mut t = Timeout::new();
        t.arm(t0, Duration::from_millis(100));
        assert!(!t.fire(t0 + Duration::from_millis(99)));
        assert!(t.fire(t0 + Duration::from_millis(100)));
        assert!(!t.fire(t0 + Duration::from_millis(200)));
        assert!(!t.is_armed());
    }

    #[test]
    fn test_rearm_supersedes() {
        let t0 = Instant::now();
        let mut t = Timeout::new();
        t.arm(t0, Duration::from_millis(100));
        t.arm(t0 + Duration::from_millis(80), Duration::from_millis(100));
        assert!(!t.fire(t0 + Duration::from_millis(120)));
        assert!(t.fire(t0 + Duration::from_millis(180)));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut t = Timeout::new();
        t.arm(t0, Duration::ZERO);
        t.cancel();
        assert!(!t.fire(t0 + Duration::from_secs(1)));
    }
}

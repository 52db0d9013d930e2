use std::time::{Duration, Instant};

/// Quiet-period timer for free-text search.
///
/// Time is passed in by the caller so the debouncer can be driven by a real
/// clock or by tests. Each `schedule` cancels and restarts the timer.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer with the latest text
    pub fn schedule(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// Text whose quiet period has elapsed, consuming it
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    /// When the pending text becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending text without applying it
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.schedule("vis", t0);

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(t0 + DELAY), Some("vis".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn keystroke_restarts_timer() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.schedule("v", t0);
        debouncer.schedule("vi", t0 + Duration::from_millis(200));

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(500)),
            Some("vi".to_string())
        );
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.schedule("x", t0);
        assert_eq!(debouncer.cancel(), Some("x".to_string()));
        assert_eq!(debouncer.poll(t0 + DELAY * 2), None);
        assert_eq!(debouncer.deadline(), None);
    }
}

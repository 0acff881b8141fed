use std::time::{Duration, Instant};

/// Per-move deadline: `timeout * safety_fraction`, measured from the last `restart`.
#[derive(Clone, Debug)]
pub struct TimeGuard {
    start: Instant,
    budget: Option<Duration>,
}

impl TimeGuard {
    pub fn new(timeout: Duration, safety_fraction: f64) -> Self {
        Self { start: Instant::now(), budget: Some(timeout.mul_f64(safety_fraction.clamp(0.0, 1.0))) }
    }

    /// A guard that never expires (analysis and exact solving).
    pub fn unbounded() -> Self { Self { start: Instant::now(), budget: None } }

    pub fn restart(&mut self) { self.start = Instant::now(); }

    pub fn budget(&self) -> Option<Duration> { self.budget }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }

    pub fn expired(&self) -> bool {
        match self.budget {
            Some(b) => self.start.elapsed() >= b,
            None => false,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.budget.map(|b| b.saturating_sub(self.start.elapsed()))
    }
}

impl Default for TimeGuard {
    fn default() -> Self { Self::unbounded() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_expired_immediately() {
        let g = TimeGuard::new(Duration::ZERO, 0.9);
        assert!(g.expired());
        assert_eq!(g.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn safety_fraction_shrinks_budget() {
        let g = TimeGuard::new(Duration::from_secs(10), 0.95);
        let b = g.budget().unwrap();
        assert!(b > Duration::from_millis(9490) && b < Duration::from_millis(9510), "budget {b:?}");
        assert!(!g.expired());
        assert!(!TimeGuard::unbounded().expired());
    }
}

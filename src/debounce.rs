/// Minimum-interval gate for actions derived from a continuous stream.
///
/// An action is allowed when strictly more than `interval_ms` has passed
/// since the last accepted one. Before the first accepted action the gate
/// is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimiter {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl RateLimiter {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Whether an action at `now_ms` would be accepted.
    pub fn ready(&self, now_ms: u64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Record an accepted action at `now_ms`.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    /// Forget the last accepted action.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_before_first_action() {
        assert!(RateLimiter::new(200).ready(0));
    }

    #[test]
    fn interval_is_strict() {
        let mut gate = RateLimiter::new(200);
        gate.mark(1_000);
        assert!(!gate.ready(1_100));
        assert!(!gate.ready(1_200));
        assert!(gate.ready(1_201));
    }

    #[test]
    fn clock_going_backwards_stays_closed() {
        let mut gate = RateLimiter::new(200);
        gate.mark(5_000);
        assert!(!gate.ready(4_000));
    }

    #[test]
    fn reset_reopens() {
        let mut gate = RateLimiter::new(200);
        gate.mark(10);
        gate.reset();
        assert!(gate.ready(11));
    }
}

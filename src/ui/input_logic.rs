//! Edge detection for level-triggered buttons.
//!
//! The GPIO layer only reports "pressed / not pressed" each tick. This
//! turns that level into discrete events, ignoring level changes that
//! come faster than the debounce interval.

/// Event produced by one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// The button went down.
    Down,
    /// The button was released before the hold threshold.
    Tap,
    /// The button has been held for the hold threshold. Fires once per press.
    Hold,
}

#[derive(Clone, Copy, Debug)]
pub struct HoldDetector {
    pressed: bool,
    last_change_ms: Option<u64>,
    pressed_at_ms: u64,
    consumed: bool,
    debounce_ms: u64,
    hold_ms: u64,
}

impl HoldDetector {
    pub const fn new(debounce_ms: u64, hold_ms: u64) -> Self {
        Self {
            pressed: false,
            last_change_ms: None,
            pressed_at_ms: 0,
            consumed: false,
            debounce_ms,
            hold_ms,
        }
    }

    /// Feed the current level. At most one event per call.
    pub fn update(&mut self, level: bool, now_ms: u64) -> Option<PressEvent> {
        if level != self.pressed && self.settled(now_ms) {
            self.pressed = level;
            self.last_change_ms = Some(now_ms);

            if level {
                self.pressed_at_ms = now_ms;
                self.consumed = false;
                return Some(PressEvent::Down);
            }

            let was_consumed = core::mem::replace(&mut self.consumed, false);
            return (!was_consumed).then_some(PressEvent::Tap);
        }

        if self.pressed
            && !self.consumed
            && now_ms.saturating_sub(self.pressed_at_ms) >= self.hold_ms
        {
            self.consumed = true;
            return Some(PressEvent::Hold);
        }

        None
    }

    /// Swallow the rest of the current press: no `Tap` or `Hold` follows.
    pub fn consume(&mut self) {
        if self.pressed {
            self.consumed = true;
        }
    }

    fn settled(&self, now_ms: u64) -> bool {
        match self.last_change_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.debounce_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det() -> HoldDetector {
        HoldDetector::new(30, 5_000)
    }

    #[test]
    fn press_then_release_is_down_then_tap() {
        let mut d = det();
        assert_eq!(d.update(false, 0), None);
        assert_eq!(d.update(true, 100), Some(PressEvent::Down));
        assert_eq!(d.update(true, 200), None);
        assert_eq!(d.update(false, 300), Some(PressEvent::Tap));
        assert_eq!(d.update(false, 400), None);
    }

    #[test]
    fn bounce_inside_debounce_is_ignored() {
        let mut d = det();
        assert_eq!(d.update(true, 100), Some(PressEvent::Down));
        assert_eq!(d.update(false, 110), None);
        assert_eq!(d.update(true, 120), None);
        // Still down: the first settled release is the tap.
        assert_eq!(d.update(false, 200), Some(PressEvent::Tap));
    }

    #[test]
    fn hold_fires_exactly_once() {
        let mut d = det();
        d.update(true, 0);
        assert_eq!(d.update(true, 4_999), None);
        assert_eq!(d.update(true, 5_000), Some(PressEvent::Hold));
        assert_eq!(d.update(true, 6_000), None);
        assert_eq!(d.update(true, 60_000), None);
        // No tap after a hold.
        assert_eq!(d.update(false, 60_100), None);
    }

    #[test]
    fn consume_suppresses_tap_and_hold() {
        let mut d = det();
        assert_eq!(d.update(true, 0), Some(PressEvent::Down));
        d.consume();
        assert_eq!(d.update(true, 9_000), None);
        assert_eq!(d.update(false, 9_100), None);
        // Next press behaves normally.
        assert_eq!(d.update(true, 9_200), Some(PressEvent::Down));
        assert_eq!(d.update(false, 9_300), Some(PressEvent::Tap));
    }

    #[test]
    fn consume_while_released_is_noop() {
        let mut d = det();
        d.consume();
        assert_eq!(d.update(true, 0), Some(PressEvent::Down));
        assert_eq!(d.update(false, 100), Some(PressEvent::Tap));
    }
}

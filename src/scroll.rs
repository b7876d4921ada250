//! Response text paging.
//!
//! A fetched response is wrapped once into fixed-width lines when it is
//! installed. While it is on screen, rotation about the y axis pages
//! through it one line at a time.
//!
//! Truncation policy: at most [`MAX_RESPONSE_LINES`] lines are kept.
//! Everything past that is dropped, never re-wrapped or reallocated.

use heapless::{String, Vec};

use crate::config::{Tuning, LINE_CHARS, MAX_RESPONSE_LINES};
use crate::debounce::RateLimiter;
use crate::sensor::axis_step;

/// Prefix drawn in front of every response.
pub const RESPONSE_PREFIX: &str = "AI: ";

pub type Line = String<LINE_CHARS>;

/// A response, wrapped into display lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseText {
    source: alloc::string::String,
    lines: Vec<Line, MAX_RESPONSE_LINES>,
    truncated: bool,
}

impl ResponseText {
    /// Wrap `text` into lines of [`LINE_CHARS`] characters.
    ///
    /// `\n` forces a break, `\r` is dropped, tabs become spaces and anything
    /// the ASCII font cannot draw becomes `?`.
    pub fn wrap(text: &str) -> Self {
        let mut out = Self {
            source: text.into(),
            ..Self::default()
        };
        let mut line = Line::new();

        for ch in RESPONSE_PREFIX.chars().chain(text.chars()) {
            let ch = match ch {
                '\r' => continue,
                '\n' => {
                    if !out.push_line(core::mem::take(&mut line)) {
                        return out;
                    }
                    continue;
                }
                '\t' => ' ',
                c if c == ' ' || c.is_ascii_graphic() => c,
                _ => '?',
            };

            if line.len() == LINE_CHARS && !out.push_line(core::mem::take(&mut line)) {
                return out;
            }
            // Printable ASCII only, one byte per char, and the line has room.
            let _ = line.push(ch);
        }

        if !line.is_empty() {
            out.push_line(line);
        }
        out
    }

    /// Append a finished line. Returns `false` once the cap is hit.
    fn push_line(&mut self, line: Line) -> bool {
        if self.lines.push(line).is_err() {
            self.truncated = true;
            return false;
        }
        true
    }

    /// The text as fetched, before prefixing and wrapping.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether some of the text was dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Lines visible from `offset`, at most `count` of them.
    pub fn window(&self, offset: usize, count: usize) -> &[Line] {
        let start = offset.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }
}

/// Largest valid scroll offset for `total` lines with `visible` on screen.
pub fn max_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Gyro-driven scroll position over a [`ResponseText`].
pub struct Scroller {
    offset: usize,
    visible: usize,
    threshold: f32,
    gate: RateLimiter,
}

impl Scroller {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            offset: 0,
            visible: tuning.visible_lines,
            threshold: tuning.gyro_threshold,
            gate: RateLimiter::new(tuning.scroll_delay_ms),
        }
    }

    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Back to the top, as for a freshly installed response.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.gate.reset();
    }

    /// Feed the angular rate about the scroll axis. Returns `true` when the
    /// offset changed and the window must be redrawn.
    pub fn on_gyro(&mut self, rate: f32, now_ms: u64, total_lines: usize) -> bool {
        let max = max_offset(total_lines, self.visible);
        let current = self.offset.min(max);

        if !self.gate.ready(now_ms) {
            self.offset = current;
            return false;
        }

        let next = match axis_step(rate, self.threshold) {
            1 => (current + 1).min(max),
            -1 => current.saturating_sub(1),
            _ => current,
        };

        let changed = next != self.offset;
        if next != current {
            self.gate.mark(now_ms);
        }
        self.offset = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(r: &ResponseText) -> alloc::vec::Vec<&str> {
        r.lines().iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn short_text_fits_one_line() {
        let r = ResponseText::wrap("HELLO");
        assert_eq!(text_of(&r), ["AI: HELLO"]);
        assert_eq!(r.source(), "HELLO");
        assert!(!r.is_truncated());
    }

    #[test]
    fn wraps_at_line_width() {
        let r = ResponseText::wrap("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(text_of(&r), ["AI: abcdefghijklmnopq", "rstuvwxyz"]);
    }

    #[test]
    fn exact_width_does_not_leave_empty_line() {
        // 4 + 17 = 21 characters.
        let r = ResponseText::wrap("abcdefghijklmnopq");
        assert_eq!(r.line_count(), 1);
    }

    #[test]
    fn newline_breaks_and_cr_dropped() {
        let r = ResponseText::wrap("one\r\ntwo\n\nthree");
        assert_eq!(text_of(&r), ["AI: one", "two", "", "three"]);
    }

    #[test]
    fn non_ascii_replaced() {
        let r = ResponseText::wrap("caf\u{e9}\tok");
        assert_eq!(text_of(&r), ["AI: caf? ok"]);
    }

    #[test]
    fn overflow_is_dropped_and_flagged() {
        let mut long = alloc::string::String::new();
        for _ in 0..MAX_RESPONSE_LINES + 5 {
            long.push_str("line\n");
        }
        let r = ResponseText::wrap(&long);
        assert_eq!(r.line_count(), MAX_RESPONSE_LINES);
        assert!(r.is_truncated());
    }

    #[test]
    fn window_is_bounded() {
        let r = ResponseText::wrap("a\nb\nc");
        assert_eq!(r.window(1, 6).len(), 2);
        assert!(r.window(10, 6).is_empty());
    }

    #[test]
    fn max_offset_never_negative() {
        assert_eq!(max_offset(3, 6), 0);
        assert_eq!(max_offset(10, 6), 4);
    }

    #[test]
    fn scroll_down_and_up_with_delay() {
        let mut s = Scroller::new(&Tuning::default());
        assert!(s.on_gyro(2.0, 0, 10));
        assert_eq!(s.offset(), 1);
        // Inside the delay.
        assert!(!s.on_gyro(2.0, 150, 10));
        assert!(s.on_gyro(2.0, 201, 10));
        assert_eq!(s.offset(), 2);
        assert!(s.on_gyro(-2.0, 500, 10));
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn scroll_clamped_to_max() {
        let mut s = Scroller::new(&Tuning::default());
        let mut now = 0;
        for _ in 0..20 {
            s.on_gyro(2.0, now, 8);
            now += 300;
        }
        assert_eq!(s.offset(), 2);
        assert!(!s.on_gyro(2.0, now, 8));
    }

    #[test]
    fn short_response_never_scrolls() {
        let mut s = Scroller::new(&Tuning::default());
        assert!(!s.on_gyro(5.0, 0, 3));
        assert!(!s.on_gyro(-5.0, 1_000, 3));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn reset_returns_to_top() {
        let mut s = Scroller::new(&Tuning::default());
        s.on_gyro(2.0, 0, 10);
        s.reset();
        assert_eq!(s.offset(), 0);
        assert!(s.on_gyro(2.0, 1, 10));
    }
}

//! Navigation controller - tilt to cursor moves.
//!
//! Each accelerometer sample can move the cursor by at most one cell per
//! axis. Samples inside the dead zone do nothing, and moves are rate
//! limited so a sustained tilt walks across the grid at a steady pace.
//!
//! Axis convention:
//!
//! ```text
//!   accel.x > +T  → row + 1 (down)      accel.x < -T → row - 1 (up)
//!   accel.y > +T  → col - 1 (left)      accel.y < -T → col + 1 (right)
//! ```

use crate::config::Tuning;
use crate::debounce::RateLimiter;
use crate::grid::GridPos;
use crate::sensor::axis_step;

/// An accepted cursor move. The renderer restores `from` and highlights `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorMove {
    pub from: GridPos,
    pub to: GridPos,
}

pub struct Navigator {
    pos: GridPos,
    threshold: f32,
    gate: RateLimiter,
}

impl Navigator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: GridPos::ORIGIN,
            threshold: tuning.accel_threshold,
            gate: RateLimiter::new(tuning.move_delay_ms),
        }
    }

    pub fn position(&self) -> GridPos {
        self.pos
    }

    /// Feed one sample. Returns the move only when the position changed.
    ///
    /// The rate limiter is only re-armed by a real move, so pushing against
    /// an edge does not delay a move along the other axis.
    pub fn on_accel(&mut self, ax: f32, ay: f32, now_ms: u64) -> Option<CursorMove> {
        if !self.gate.ready(now_ms) {
            return None;
        }

        let drow = axis_step(ax, self.threshold);
        let dcol = -axis_step(ay, self.threshold);
        let to = self.pos.stepped(dcol, drow);
        if to == self.pos {
            return None;
        }

        self.gate.mark(now_ms);
        let from = core::mem::replace(&mut self.pos, to);
        Some(CursorMove { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Navigator {
        Navigator::new(&Tuning::default())
    }

    #[test]
    fn positive_x_moves_down() {
        let mut n = nav();
        let mv = n.on_accel(5.0, 0.0, 0).unwrap();
        assert_eq!(mv.from, GridPos::ORIGIN);
        assert_eq!(mv.to, GridPos::new(0, 1));
    }

    #[test]
    fn negative_y_moves_right_positive_y_moves_left() {
        let mut n = nav();
        assert_eq!(n.on_accel(0.0, -5.0, 0).unwrap().to, GridPos::new(1, 0));
        assert_eq!(n.on_accel(0.0, 5.0, 1_000).unwrap().to, GridPos::ORIGIN);
    }

    #[test]
    fn dead_zone_is_noop() {
        let mut n = nav();
        assert_eq!(n.on_accel(3.4, -3.4, 0), None);
        assert_eq!(n.position(), GridPos::ORIGIN);
    }

    #[test]
    fn both_axes_move_diagonally() {
        let mut n = nav();
        let mv = n.on_accel(4.0, -4.0, 0).unwrap();
        assert_eq!(mv.to, GridPos::new(1, 1));
    }

    #[test]
    fn moves_inside_delay_are_ignored() {
        let mut n = nav();
        assert!(n.on_accel(5.0, 0.0, 1_000).is_some());
        assert!(n.on_accel(5.0, 0.0, 1_150).is_none());
        assert!(n.on_accel(5.0, 0.0, 1_200).is_none());
        assert!(n.on_accel(5.0, 0.0, 1_201).is_some());
        assert_eq!(n.position(), GridPos::new(0, 2));
    }

    #[test]
    fn edge_push_does_not_arm_delay() {
        let mut n = nav();
        // Already at the top edge: pushing up changes nothing.
        assert!(n.on_accel(-5.0, 0.0, 1_000).is_none());
        // A sideways move right after is still accepted.
        assert!(n.on_accel(0.0, -5.0, 1_010).is_some());
    }

    #[test]
    fn clamped_at_bottom_right() {
        let mut n = nav();
        let mut now = 0;
        for _ in 0..20 {
            n.on_accel(9.0, -9.0, now);
            now += 500;
        }
        assert_eq!(n.position(), GridPos::new(9, 3));
        assert!(n.on_accel(9.0, -9.0, now).is_none());
    }
}

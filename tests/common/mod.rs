//! Host doubles for the session's collaborators.

#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_futures::block_on;
use tiltkey::config::LOOP_TICK_MS;
use tiltkey::fetch::Fetcher;
use tiltkey::ui::{ButtonLevels, Color, Renderer};
use tiltkey::{Diagnostic, FetchError, GridPos, MotionSample, Session, TickInput, Tuning, Vector3};

/// One renderer call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Clear,
    Text { x: i32, y: i32, text: String },
    Rect { x: i32, y: i32, w: u32, h: u32, color: Color },
    Fill { x: i32, y: i32, w: u32, h: u32, color: Color },
    Present,
}

/// Records every call. `present` fails while `fail_present` is set.
#[derive(Default)]
pub struct RecordingRenderer {
    pub ops: Vec<Op>,
    pub fail_present: bool,
}

impl RecordingRenderer {
    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Present).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Draw calls of the most recent frame, without the trailing `Present`.
    pub fn last_frame(&self) -> &[Op] {
        let end = self
            .ops
            .iter()
            .rposition(|op| *op == Op::Present)
            .unwrap_or(self.ops.len());
        let start = self.ops[..end]
            .iter()
            .rposition(|op| *op == Op::Present)
            .map_or(0, |i| i + 1);
        &self.ops[start..end]
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Renderer for RecordingRenderer {
    type Error = ();

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.ops.push(Op::Text {
            x,
            y,
            text: text.to_owned(),
        });
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.ops.push(Op::Fill { x, y, w, h, color });
    }

    async fn present(&mut self) -> Result<(), ()> {
        self.ops.push(Op::Present);
        if self.fail_present {
            Err(())
        } else {
            Ok(())
        }
    }
}

/// Replays queued results in order; an empty queue is a transport error.
#[derive(Default)]
pub struct ScriptedFetcher {
    pub replies: VecDeque<Result<String, FetchError>>,
    pub calls: Vec<(String, u16)>,
}

impl ScriptedFetcher {
    pub fn replying(replies: impl IntoIterator<Item = Result<String, FetchError>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: Vec::new(),
        }
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&mut self, prompt: &str, max_output_tokens: u16) -> Result<String, FetchError> {
        self.calls.push((prompt.to_owned(), max_output_tokens));
        self.replies
            .pop_front()
            .unwrap_or(Err(FetchError::Transport))
    }
}

/// A session wired to recording doubles and a fake clock.
pub struct Rig {
    pub session: Session,
    pub renderer: RecordingRenderer,
    pub fetcher: ScriptedFetcher,
    pub diag: Vec<Diagnostic>,
    pub now_ms: u64,
}

pub const TILT: f32 = 5.0;

impl Rig {
    pub fn new(tuning: Tuning, fetcher: ScriptedFetcher) -> Self {
        let mut rig = Self {
            session: Session::new(tuning),
            renderer: RecordingRenderer::default(),
            fetcher,
            diag: Vec::new(),
            now_ms: 0,
        };
        block_on(rig.session.start(&mut rig.renderer, &mut rig.diag));
        rig
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Result<String, FetchError>>) -> Self {
        Self::new(Tuning::default(), ScriptedFetcher::replying(replies))
    }

    /// Run one tick, then advance the clock by one loop period.
    pub fn tick(&mut self, sample: MotionSample, buttons: ButtonLevels) {
        let input = TickInput {
            sample,
            buttons,
            now_ms: self.now_ms,
        };
        block_on(self.session.tick(
            input,
            &mut self.renderer,
            &mut self.fetcher,
            &mut self.diag,
        ));
        self.now_ms += LOOP_TICK_MS;
    }

    pub fn idle(&mut self) {
        self.tick(MotionSample::default(), ButtonLevels::default());
    }

    pub fn accel(&mut self, x: f32, y: f32) {
        self.tick(
            MotionSample::new(Vector3::new(x, y, 9.8), Vector3::ZERO),
            ButtonLevels::default(),
        );
    }

    pub fn gyro(&mut self, y: f32) {
        self.tick(
            MotionSample::new(Vector3::ZERO, Vector3::new(0.0, y, 0.0)),
            ButtonLevels::default(),
        );
    }

    pub fn hold(&mut self, buttons: ButtonLevels) {
        self.tick(MotionSample::default(), buttons);
    }

    /// Press and release SELECT.
    pub fn press_select(&mut self) {
        self.hold(ButtonLevels {
            select: true,
            send: false,
        });
        self.idle();
    }

    /// Press and release SEND.
    pub fn press_send(&mut self) {
        self.hold(ButtonLevels {
            select: false,
            send: true,
        });
        self.idle();
    }

    /// Tilt until the cursor sits on `target`.
    pub fn move_to(&mut self, target: GridPos) {
        for _ in 0..200 {
            let at = self.session.cursor();
            if at == target {
                return;
            }
            let x = signum(target.row() as i32 - at.row() as i32) * TILT;
            let y = -signum(target.col() as i32 - at.col() as i32) * TILT;
            self.accel(x, y);
        }
        panic!("cursor never reached {:?}", target);
    }

    /// Walk to each character's key and select it.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let pos = GridPos::all()
                .find(|p| p.key() == ch)
                .unwrap_or_else(|| panic!("no key for {:?}", ch));
            self.move_to(pos);
            self.press_select();
        }
    }
}

fn signum(v: i32) -> f32 {
    match v.signum() {
        1 => 1.0,
        -1 => -1.0,
        _ => 0.0,
    }
}

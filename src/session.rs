//! Mode / scroll controller and the per-tick session state.
//!
//! ```text
//!            submit (input non-empty, fetch ok)
//!   ┌───────┐ ─────────────────────────────────▶ ┌───────────────┐
//!   │ ENTRY │                                    │ VIEW_RESPONSE │
//!   └───────┘ ◀───────────────────────────────── └───────────────┘
//!                   dismiss (any button press)
//! ```
//!
//! In ENTRY, accelerometer samples drive the [`Navigator`]; in
//! VIEW_RESPONSE, angular rate drives the [`Scroller`] instead. A failed
//! fetch leaves the session in ENTRY with the input untouched.

use heapless::{String, Vec};

use crate::config::{SubmitTrigger, Tuning, INPUT_CAPACITY};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::fetch::Fetcher;
use crate::grid::GridPos;
use crate::nav::Navigator;
use crate::scroll::{ResponseText, Scroller};
use crate::sensor::MotionSample;
use crate::ui::input_logic::{HoldDetector, PressEvent};
use crate::ui::{view, ButtonLevels, Renderer};

/// Which screen owns the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Tilt moves the cursor, buttons type and submit.
    Entry,
    /// Rotation pages through the response, any button goes back.
    ViewResponse,
}

/// Everything read from the hardware in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInput {
    pub sample: MotionSample,
    pub buttons: ButtonLevels,
    pub now_ms: u64,
}

/// What a button did this tick, after mode-specific interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    TypeKey,
    Submit,
    Dismiss,
}

/// State owned by the control loop.
pub struct Session {
    tuning: Tuning,
    mode: Mode,
    nav: Navigator,
    scroller: Scroller,
    input: String<INPUT_CAPACITY>,
    response: Option<ResponseText>,
    select: HoldDetector,
    send: HoldDetector,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        // Holds only mean something in the single-button build.
        let hold_ms = match tuning.submit {
            SubmitTrigger::LongPress { hold_ms } => hold_ms,
            SubmitTrigger::SendButton => u64::MAX,
        };
        Self {
            mode: Mode::Entry,
            nav: Navigator::new(&tuning),
            scroller: Scroller::new(&tuning),
            input: String::new(),
            response: None,
            select: HoldDetector::new(tuning.button_debounce_ms, hold_ms),
            send: HoldDetector::new(tuning.button_debounce_ms, hold_ms),
            tuning,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> GridPos {
        self.nav.position()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Most recent response, if one was ever installed.
    pub fn response(&self) -> Option<&ResponseText> {
        self.response.as_ref()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroller.offset()
    }

    /// Draw the initial ENTRY screen.
    pub async fn start<R, D>(&mut self, renderer: &mut R, diag: &mut D)
    where
        R: Renderer,
        D: DiagnosticSink,
    {
        view::draw_entry(renderer, &self.input, self.nav.position());
        present(renderer, diag).await;
    }

    /// Run one loop iteration: dispatch the motion sample to the active
    /// controller, then apply button events.
    pub async fn tick<R, F, D>(
        &mut self,
        input: TickInput,
        renderer: &mut R,
        fetcher: &mut F,
        diag: &mut D,
    ) where
        R: Renderer,
        F: Fetcher,
        D: DiagnosticSink,
    {
        let now = input.now_ms;

        match self.mode {
            Mode::Entry => {
                let accel = input.sample.accel;
                if let Some(mv) = self.nav.on_accel(accel.x, accel.y, now) {
                    view::move_cursor(renderer, mv.from, mv.to);
                    present(renderer, diag).await;
                }
            }
            Mode::ViewResponse => {
                let total = self.response.as_ref().map_or(0, ResponseText::line_count);
                if self.scroller.on_gyro(input.sample.gyro.y, now, total) {
                    self.redraw_response(renderer);
                    present(renderer, diag).await;
                }
            }
        }

        // Both detectors see every tick so edges never go stale across modes.
        let select = self.select.update(input.buttons.select, now);
        let send = self.send.update(input.buttons.send, now);

        for action in self.actions(select, send) {
            match action {
                Action::TypeKey => self.type_key(renderer, diag).await,
                Action::Submit => self.submit(renderer, fetcher, diag).await,
                Action::Dismiss => {
                    self.select.consume();
                    self.send.consume();
                    self.dismiss(renderer, diag).await;
                }
            }
        }
    }

    /// Actions for this tick, in the order they apply. A key typed on the
    /// same tick as a submit is part of the submitted prompt.
    fn actions(&self, select: Option<PressEvent>, send: Option<PressEvent>) -> Vec<Action, 2> {
        let mut out = Vec::new();
        let down = Some(PressEvent::Down);
        match self.mode {
            Mode::ViewResponse => {
                if select == down || send == down {
                    let _ = out.push(Action::Dismiss);
                }
            }
            Mode::Entry => match self.tuning.submit {
                SubmitTrigger::SendButton => {
                    if select == down {
                        let _ = out.push(Action::TypeKey);
                    }
                    if send == down {
                        let _ = out.push(Action::Submit);
                    }
                }
                SubmitTrigger::LongPress { .. } => match select {
                    Some(PressEvent::Hold) => {
                        let _ = out.push(Action::Submit);
                    }
                    Some(PressEvent::Tap) => {
                        let _ = out.push(Action::TypeKey);
                    }
                    _ => {}
                },
            },
        }
        out
    }

    async fn type_key<R, D>(&mut self, renderer: &mut R, diag: &mut D)
    where
        R: Renderer,
        D: DiagnosticSink,
    {
        if self.input.push(self.nav.position().key()).is_err() {
            diag.record(Diagnostic::InputFull);
            return;
        }
        view::draw_input(renderer, &self.input);
        present(renderer, diag).await;
    }

    async fn submit<R, F, D>(&mut self, renderer: &mut R, fetcher: &mut F, diag: &mut D)
    where
        R: Renderer,
        F: Fetcher,
        D: DiagnosticSink,
    {
        if self.input.is_empty() {
            return;
        }

        // The loop blocks for the round trip; say so on screen first.
        view::draw_notice(renderer, view::SENDING_NOTICE);
        present(renderer, diag).await;

        match fetcher
            .fetch(&self.input, self.tuning.max_output_tokens)
            .await
        {
            Ok(text) => {
                self.install_response(&text, diag);
                self.input.clear();
                self.mode = Mode::ViewResponse;
                self.redraw_response(renderer);
                present(renderer, diag).await;
            }
            Err(e) => {
                diag.record(Diagnostic::FetchFailed(e));
                view::draw_input(renderer, &self.input);
                present(renderer, diag).await;
            }
        }
    }

    fn install_response<D: DiagnosticSink>(&mut self, text: &str, diag: &mut D) {
        let wrapped = ResponseText::wrap(text);
        if wrapped.is_truncated() {
            diag.record(Diagnostic::ResponseTruncated {
                lines: wrapped.line_count(),
            });
        }
        self.response = Some(wrapped);
        self.scroller.reset();
    }

    async fn dismiss<R, D>(&mut self, renderer: &mut R, diag: &mut D)
    where
        R: Renderer,
        D: DiagnosticSink,
    {
        self.mode = Mode::Entry;
        self.input.clear();
        // Full redraw: the response screen left pixels everywhere.
        view::draw_entry(renderer, &self.input, self.nav.position());
        present(renderer, diag).await;
    }

    fn redraw_response<R: Renderer>(&self, renderer: &mut R) {
        if let Some(text) = &self.response {
            view::draw_response(renderer, text, self.scroller.offset(), self.scroller.visible());
        }
    }
}

async fn present<R, D>(renderer: &mut R, diag: &mut D)
where
    R: Renderer,
    D: DiagnosticSink,
{
    if renderer.present().await.is_err() {
        diag.record(Diagnostic::RenderFailed);
    }
}

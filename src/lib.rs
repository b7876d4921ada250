//! tiltkey - a tilt-controlled on-screen keyboard.
//!
//! Tilting the board walks a cursor over a 4×10 key grid on a 128×64
//! OLED; SELECT types the key under the cursor and SEND posts the composed
//! prompt to a remote text-generation service. The reply is shown full
//! screen and paged by rotating the board.
//!
//! The pure logic (navigation, scrolling, button edges, session state,
//! wire codec) builds on the host:
//!
//! Usage: `cargo test`
//!
//! The firmware binary (`src/main.rs`) and the modules that touch the
//! ESP32 peripherals only build with `--features embedded`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod debounce;
pub mod diag;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod nav;
pub mod scroll;
pub mod sensor;
pub mod session;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod net;

pub use config::{SubmitTrigger, Tuning};
pub use diag::{Diagnostic, DiagnosticSink};
pub use error::{Error, FetchError};
pub use grid::GridPos;
pub use sensor::{MotionSample, Vector3};
pub use session::{Mode, Session, TickInput};

//! User interface subsystem - OLED rendering + physical buttons.
//!
//! The session drives a [`Renderer`] with a handful of primitives and reads
//! button levels once per tick; everything hardware-specific sits behind
//! the `embedded` feature.
//!
//! ## Components
//!
//! - **Display**: SH1106 128×64 OLED via I²C (`display`, embedded only)
//! - **Buttons**: 2 tactile switches, SELECT and SEND (`buttons`, embedded only)
//! - **View**: layout of the keyboard and response screens (`view`)
//! - **Input logic**: press / tap / hold detection (`input_logic`)

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod input_logic;
pub mod view;

/// Monochrome pixel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    On,
    Off,
}

/// Drawing primitives the session needs.
///
/// Draw calls only touch an off-screen frame; nothing is visible until
/// [`present`](Renderer::present) is called.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    type Error: core::fmt::Debug;

    /// Blank the whole frame.
    fn clear(&mut self);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// 1 px outline.
    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

    /// Push the frame to the panel.
    async fn present(&mut self) -> Result<(), Self::Error>;
}

/// Logical button levels for one tick (`true` = pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    pub select: bool,
    pub send: bool,
}

//! GPIO button input.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - SELECT (GPIO23) - type the key under the cursor / dismiss a response
//!   - SEND   (GPIO12) - submit the prompt / dismiss a response
//!
//! The control loop samples both levels once per tick; edge detection and
//! debouncing happen in [`input_logic`](super::input_logic) so they can be
//! tested on the host.

use esp_hal::gpio::{Input, InputConfig, InputPin, Pull};

use super::ButtonLevels;

pub struct Buttons<'d> {
    select: Input<'d>,
    send: Input<'d>,
}

impl<'d> Buttons<'d> {
    pub fn new(select: impl InputPin + 'd, send: impl InputPin + 'd) -> Self {
        let config = InputConfig::default().with_pull(Pull::Up);
        Self {
            select: Input::new(select, config),
            send: Input::new(send, config),
        }
    }

    /// Current levels, inverted so `true` means held down.
    pub fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            select: self.select.is_low(),
            send: self.send.is_low(),
        }
    }
}

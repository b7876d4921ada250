//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, thresholds and layout
//! constants live here so they can be tuned in one place.

// Key grid

/// Number of key columns.
pub const GRID_COLS: u8 = 10;

/// Number of key rows.
pub const GRID_ROWS: u8 = 4;

// Motion input

/// Linear acceleration dead zone per axis (m/s²).
///
/// At rest the board reads roughly ±9.8 on whichever axis points down, so a
/// tilt of about 20° past level crosses this on the x or y axis.
pub const ACCEL_THRESHOLD: f32 = 3.5;

/// Minimum time between two accepted cursor moves (ms, strict).
pub const MOVE_DELAY_MS: u64 = 200;

/// Angular rate dead zone on the scroll axis (rad/s).
pub const GYRO_THRESHOLD: f32 = 1.5;

/// Minimum time between two accepted scroll steps (ms, strict).
pub const SCROLL_DELAY_MS: u64 = 200;

// Buttons
//
// Logical roles, wired active-low with the internal pull-up enabled:
//
//   SELECT  → GPIO23
//   SEND    → GPIO12
//   I²C SDA → GPIO21
//   I²C SCL → GPIO22
//
// Actual `esp_hal::peripherals::*` pins are taken in `main.rs`.

/// Minimum spacing between two accepted level changes on one button (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 30;

/// Hold time for the single-button submit variant (ms).
pub const SUBMIT_HOLD_MS: u64 = 5_000;

// Control loop

/// Fixed delay between two loop ticks (ms). Display stability only; all
/// rate limiting is done against the monotonic clock.
pub const LOOP_TICK_MS: u64 = 100;

// I²C peripherals

/// I²C bus frequency (kHz).
pub const I2C_FREQUENCY_KHZ: u32 = 400;

/// SH1106 OLED address.
pub const SH1106_ADDR: u8 = 0x3C;

/// MPU-6050 address (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;

// Display layout (128×64, 6×10 font)

pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;

/// Glyph advance and line height of the UI font.
pub const CHAR_WIDTH: i32 = 6;
pub const LINE_HEIGHT: i32 = 10;

/// Height of the input-text strip above the key grid.
pub const INPUT_AREA_HEIGHT: u32 = 20;

/// Key cell size in pixels. 4 rows × 11 px fill the space below the input strip.
pub const KEY_WIDTH: u32 = 12;
pub const KEY_HEIGHT: u32 = 11;

/// Characters per text line.
pub const LINE_CHARS: usize = 21;

/// Response lines visible at once.
pub const VISIBLE_LINES: usize = 6;

// Buffers

/// Maximum composed input length (characters). Further keys are dropped.
pub const INPUT_CAPACITY: usize = 64;

/// Maximum stored response lines. Anything past this is dropped.
pub const MAX_RESPONSE_LINES: usize = 32;

// Network

/// Time allowed for WiFi association + DHCP before giving up (ms).
pub const WIFI_JOIN_TIMEOUT_MS: u64 = 20_000;

/// Remote text-generation endpoint, without the `key` query parameter.
pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Upper bound on generated tokens requested per prompt.
pub const MAX_OUTPUT_TOKENS: u16 = 120;

/// HTTP response buffer (bytes). Gemini responses for 120 tokens stay well
/// below this.
pub const HTTP_RX_BUFFER: usize = 8 * 1024;

/// TLS record buffers (bytes).
pub const TLS_RX_BUFFER: usize = 16 * 1024 + 256;
pub const TLS_TX_BUFFER: usize = 4 * 1024;

/// How a prompt gets submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmitTrigger {
    /// Dual-button build: a press on SEND submits.
    SendButton,
    /// Single-button build: holding SELECT for `hold_ms` submits once;
    /// shorter presses type the key on release.
    LongPress { hold_ms: u64 },
}

impl SubmitTrigger {
    /// Single-button build with the default hold time.
    pub const SINGLE_BUTTON: Self = Self::LongPress {
        hold_ms: SUBMIT_HOLD_MS,
    };
}

/// Runtime-tunable thresholds and delays.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuning {
    pub accel_threshold: f32,
    pub move_delay_ms: u64,
    pub gyro_threshold: f32,
    pub scroll_delay_ms: u64,
    pub button_debounce_ms: u64,
    pub visible_lines: usize,
    pub max_output_tokens: u16,
    pub submit: SubmitTrigger,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            accel_threshold: ACCEL_THRESHOLD,
            move_delay_ms: MOVE_DELAY_MS,
            gyro_threshold: GYRO_THRESHOLD,
            scroll_delay_ms: SCROLL_DELAY_MS,
            button_debounce_ms: BUTTON_DEBOUNCE_MS,
            visible_lines: VISIBLE_LINES,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            submit: SubmitTrigger::SendButton,
        }
    }
}

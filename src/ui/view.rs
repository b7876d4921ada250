//! Screen layout.
//!
//! ```text
//!  y  0 ┌──────────────────────┐
//!       │ You: HELLO WOR       │  input strip, 2 × 21 chars
//!  y 20 ├──────────────────────┤
//!       │ Q W E R T Y U I O P  │  4 × 10 key cells, 12 × 11 px
//!       │ A S D F G H J K L ?  │
//!       │ Z X C V B N M _ . /  │
//!       │ 1 2 3 4 5 6 7 8 9 0  │
//!  y 64 └──────────────────────┘
//! ```
//!
//! None of these call `present`; the session decides when a frame is done.

use heapless::String;

use super::{Color, Renderer};
use crate::config::{
    CHAR_WIDTH, INPUT_AREA_HEIGHT, INPUT_CAPACITY, KEY_HEIGHT, KEY_WIDTH, LINE_CHARS, LINE_HEIGHT,
    SCREEN_WIDTH,
};
use crate::grid::GridPos;
use crate::scroll::ResponseText;

/// Label in front of the composed text.
pub const INPUT_PREFIX: &str = "You: ";

/// Shown in the input strip while a request is in flight.
pub const SENDING_NOTICE: &str = "Sending...";

/// Lines of the input strip.
const INPUT_LINES: usize = 2;

/// Top of the response text, leaving a small margin.
const RESPONSE_TOP: i32 = 2;

/// Pixel origin of a key cell.
pub fn key_origin(pos: GridPos) -> (i32, i32) {
    (
        pos.col() as i32 * KEY_WIDTH as i32,
        INPUT_AREA_HEIGHT as i32 + pos.row() as i32 * KEY_HEIGHT as i32,
    )
}

/// Redraw one key cell, with or without the cursor outline.
pub fn draw_key<R: Renderer>(r: &mut R, pos: GridPos, selected: bool) {
    let (x, y) = key_origin(pos);
    r.fill_rect(x, y, KEY_WIDTH, KEY_HEIGHT, Color::Off);

    let mut buf = [0u8; 4];
    let label = pos.key().encode_utf8(&mut buf);
    r.draw_text(x + (KEY_WIDTH as i32 - CHAR_WIDTH) / 2, y + 1, label);

    if selected {
        r.draw_rect(x, y, KEY_WIDTH, KEY_HEIGHT, Color::On);
    }
}

/// Restore `from` and highlight `to`.
pub fn move_cursor<R: Renderer>(r: &mut R, from: GridPos, to: GridPos) {
    draw_key(r, from, false);
    draw_key(r, to, true);
}

/// Blank the input strip and print one message in it.
pub fn draw_notice<R: Renderer>(r: &mut R, message: &str) {
    r.fill_rect(0, 0, SCREEN_WIDTH, INPUT_AREA_HEIGHT, Color::Off);
    r.draw_text(0, 0, message);
}

/// Redraw the input strip with `"You: " + input`, keeping the tail when it
/// does not fit on two lines.
pub fn draw_input<R: Renderer>(r: &mut R, input: &str) {
    r.fill_rect(0, 0, SCREEN_WIDTH, INPUT_AREA_HEIGHT, Color::Off);
    for (i, line) in input_lines(input).iter().enumerate() {
        r.draw_text(0, i as i32 * LINE_HEIGHT, line);
    }
}

/// Split the labelled input into at most two display lines.
pub fn input_lines(input: &str) -> heapless::Vec<String<LINE_CHARS>, INPUT_LINES> {
    let mut text: String<{ INPUT_CAPACITY + 8 }> = String::new();
    let _ = text.push_str(INPUT_PREFIX);
    let _ = text.push_str(input);

    let total = text.chars().count();
    let skip = total.saturating_sub(LINE_CHARS * INPUT_LINES);

    let mut lines = heapless::Vec::new();
    let mut line: String<LINE_CHARS> = String::new();
    for ch in text.chars().skip(skip) {
        if line.len() == LINE_CHARS {
            let _ = lines.push(core::mem::take(&mut line));
        }
        let _ = line.push(ch);
    }
    if !line.is_empty() {
        let _ = lines.push(line);
    }
    lines
}

/// Full ENTRY screen: input strip, every key, and the cursor.
pub fn draw_entry<R: Renderer>(r: &mut R, input: &str, cursor: GridPos) {
    r.clear();
    draw_input(r, input);
    for pos in GridPos::all() {
        draw_key(r, pos, pos == cursor);
    }
}

/// Full VIEW_RESPONSE screen from line `offset`.
pub fn draw_response<R: Renderer>(r: &mut R, text: &ResponseText, offset: usize, visible: usize) {
    r.clear();
    for (i, line) in text.window(offset, visible).iter().enumerate() {
        r.draw_text(0, RESPONSE_TOP + i as i32 * LINE_HEIGHT, line);
    }
}

/// Plain status screen, one string per line.
pub fn draw_status<R: Renderer>(r: &mut R, lines: &[&str]) {
    r.clear();
    for (i, line) in lines.iter().enumerate() {
        r.draw_text(0, i as i32 * LINE_HEIGHT, line);
    }
}

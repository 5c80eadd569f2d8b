//! Per-frame input collection
//!
//! Macroquad is polled once per frame and the interesting bits are turned into
//! plain events, so the dispatcher can be driven without a window.

use macroquad::prelude::*;

/// Input the simulator reacts to. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close requested
    Quit,
    /// A mouse button went down at this pixel position
    Press { x: f32, y: f32 },
}

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Replace `events` with this frame's input.
///
/// Requires `prevent_quit()` to have been called, otherwise macroquad closes
/// the window itself and the quit request is never seen.
pub fn poll_events(events: &mut Vec<InputEvent>) {
    events.clear();

    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }

    let (x, y) = mouse_position();
    for button in BUTTONS {
        if is_mouse_button_pressed(button) {
            events.push(InputEvent::Press { x, y });
        }
    }
}

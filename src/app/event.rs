//! Terminal event abstraction.
//!
//! Wraps crossterm events into the few inputs the simulator reacts to and
//! runs a background task that forwards them over a channel so the main loop
//! stays non-blocking.  Frame pacing is the main loop's job, not this one's.

use std::time::Duration;

use crossterm::event::{
    self, Event as CtEvent, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;

/// Direction of one mouse wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelNotch {
    Up,
    Down,
}

impl WheelNotch {
    /// Signed wheel delta for one notch of `delta` pixels.
    pub fn delta_y(self, delta: f64) -> f64 {
        match self {
            WheelNotch::Up => -delta,
            WheelNotch::Down => delta,
        }
    }
}

/// High-level events consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Wheel(WheelNotch),
    Click { column: u16, row: u16 },
    Resize(u16, u16),
}

/// Reduce a raw terminal event to an [`AppEvent`], dropping everything the
/// simulator ignores (key releases, mouse motion, focus, paste).
pub fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => translate_mouse(m),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

fn translate_mouse(m: MouseEvent) -> Option<AppEvent> {
    match m.kind {
        MouseEventKind::ScrollUp => Some(AppEvent::Wheel(WheelNotch::Up)),
        MouseEventKind::ScrollDown => Some(AppEvent::Wheel(WheelNotch::Down)),
        MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click {
            column: m.column,
            row: m.row,
        }),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        // Poll with a timeout so a dropped receiver is noticed promptly.
        if !event::poll(poll_interval).unwrap_or(false) {
            if tx.is_closed() {
                break;
            }
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        if let Some(app_event) = translate(ev) {
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

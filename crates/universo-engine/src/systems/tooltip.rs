// systems/tooltip.rs
//
// Typewriter tooltip and hover cursor. The page owns the element; this
// decides what it says, where it sits, and when it hides.

use glam::Vec2;

use crate::api::types::{BodyId, Cursor, UiEvent};

/// One more character every this many milliseconds.
pub const CHAR_INTERVAL_MS: f64 = 80.0;
/// Touch tooltips hide on their own after this long.
pub const TOUCH_TOOLTIP_MS: f64 = 1000.0;
/// Hover tooltip offset from the body's screen position.
pub const HOVER_OFFSET: Vec2 = Vec2::new(10.0, -30.0);
/// Touch tooltip offset (clear of the finger).
pub const TOUCH_OFFSET: Vec2 = Vec2::new(-20.0, -60.0);

#[derive(Debug, Clone)]
pub struct Tooltip {
    enabled: bool,
    body: Option<BodyId>,
    name_len: u32,
    visible_chars: u32,
    last_char_ms: f64,
    anchor: Vec2,
    hide_at: Option<f64>,
    /// Last tooltip state sent to the page, to avoid repeats.
    sent: Option<(Vec2, BodyId, u32)>,
    cursor: Cursor,
}

impl Tooltip {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            body: None,
            name_len: 0,
            visible_chars: 0,
            last_char_ms: 0.0,
            anchor: Vec2::ZERO,
            hide_at: None,
            sent: None,
            cursor: Cursor::Default,
        }
    }

    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    pub fn visible_chars(&self) -> u32 {
        self.visible_chars
    }

    /// Show the tooltip for `body` at `anchor`. Typing restarts only when
    /// the body changes.
    pub fn show(&mut self, body: BodyId, name: &str, anchor: Vec2, now: f64) {
        if !self.enabled {
            return;
        }
        if self.body != Some(body) {
            self.body = Some(body);
            self.name_len = name.chars().count() as u32;
            self.visible_chars = 0;
            self.last_char_ms = now;
        }
        self.anchor = anchor;
        self.hide_at = None;
    }

    /// Show for a touch; hides itself after `TOUCH_TOOLTIP_MS`.
    pub fn show_briefly(&mut self, body: BodyId, name: &str, anchor: Vec2, now: f64) {
        self.show(body, name, anchor, now);
        if self.enabled {
            self.hide_at = Some(now + TOUCH_TOOLTIP_MS);
        }
    }

    pub fn hide(&mut self, events: &mut Vec<UiEvent>) {
        self.body = None;
        self.hide_at = None;
        if self.sent.take().is_some() {
            events.push(UiEvent::HideTooltip);
        }
    }

    pub fn set_cursor(&mut self, cursor: Cursor, events: &mut Vec<UiEvent>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            events.push(UiEvent::Cursor(cursor));
        }
    }

    /// Advance one frame: type, expire, and report changes.
    pub fn step(&mut self, now: f64, events: &mut Vec<UiEvent>) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.hide(events);
            return;
        }
        let Some(body) = self.body else {
            return;
        };
        if self.visible_chars < self.name_len && now - self.last_char_ms > CHAR_INTERVAL_MS {
            self.visible_chars += 1;
            self.last_char_ms = now;
        }
        let state = (self.anchor, body, self.visible_chars);
        if self.sent != Some(state) {
            self.sent = Some(state);
            events.push(UiEvent::Tooltip {
                x: self.anchor.x,
                y: self.anchor.y,
                body,
                visible_chars: self.visible_chars,
            });
        }
    }
}

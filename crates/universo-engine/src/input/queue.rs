/// Input events the session understands.
/// Coordinates are viewport pixels (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse moved (desktop hover).
    PointerMove { x: f32, y: f32 },
    /// Mouse click.
    Click { x: f32, y: f32 },
    /// First finger down.
    TouchStart { x: f32, y: f32 },
    /// First finger moved.
    TouchMove { x: f32, y: f32 },
    /// Finger lifted at its last known position.
    TouchEnd { x: f32, y: f32 },
    /// Viewport size changed.
    Resize { width: f32, height: f32 },
    /// The "reset orbit" button was pressed.
    ResetOrbit,
    /// The panel's close button was pressed.
    ClosePanel,
}

/// A queue of input events.
/// The host pushes events between frames; the session drains them each step.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::TouchStart { x: 10.0, y: 20.0 });
        q.push(InputEvent::ResetOrbit);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 400.0, height: 800.0 });
        q.push(InputEvent::ClosePanel);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::Resize { width: 400.0, height: 800.0 });
        assert_eq!(events[1], InputEvent::ClosePanel);
    }
}

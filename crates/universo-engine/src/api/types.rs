use bytemuck::{Pod, Zeroable};

/// Stable index of a planet for the lifetime of the session (0..7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mouse cursor requested from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

/// Presentation request emitted by the core for the DOM layer.
/// The page owns the panels and tooltip element; the core only says what to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Show the content panel for a planet.
    OpenPanel(BodyId),
    /// Hide the content panel.
    ClosePanel,
    /// Place the tooltip for `body` at screen coordinates, revealing
    /// the first `visible_chars` characters of its name.
    Tooltip { x: f32, y: f32, body: BodyId, visible_chars: u32 },
    /// Hide the tooltip.
    HideTooltip,
    /// Start fading out the loading overlay.
    LoadingFadeStarted,
    /// Change the page cursor.
    Cursor(Cursor),
}

// Wire kinds (must match the page-side event decoder).
pub const EVENT_OPEN_PANEL: f32 = 1.0;
pub const EVENT_CLOSE_PANEL: f32 = 2.0;
pub const EVENT_TOOLTIP: f32 = 3.0;
pub const EVENT_HIDE_TOOLTIP: f32 = 4.0;
pub const EVENT_LOADING_FADE: f32 = 5.0;
pub const EVENT_CURSOR: f32 = 6.0;

/// A UI event flattened for the shared float buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}

impl From<UiEvent> for WireEvent {
    fn from(event: UiEvent) -> Self {
        let (kind, a, b, c) = match event {
            UiEvent::OpenPanel(id) => (EVENT_OPEN_PANEL, id.0 as f32, 0.0, 0.0),
            UiEvent::ClosePanel => (EVENT_CLOSE_PANEL, 0.0, 0.0, 0.0),
            // Body and reveal count share `c`: body in the integer part,
            // visible characters packed above it.
            UiEvent::Tooltip { x, y, body, visible_chars } => {
                (EVENT_TOOLTIP, x, y, (visible_chars * 16 + body.0) as f32)
            }
            UiEvent::HideTooltip => (EVENT_HIDE_TOOLTIP, 0.0, 0.0, 0.0),
            UiEvent::LoadingFadeStarted => (EVENT_LOADING_FADE, 0.0, 0.0, 0.0),
            UiEvent::Cursor(cursor) => (
                EVENT_CURSOR,
                match cursor {
                    Cursor::Default => 0.0,
                    Cursor::Pointer => 1.0,
                },
                0.0,
                0.0,
            ),
        };
        WireEvent { kind, a, b, c }
    }
}

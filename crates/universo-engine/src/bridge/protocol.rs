/// Shared frame buffer layout.
/// Must stay in sync with the page-side `protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Events: max_events × 4 floats]
/// [Tunnel: max_stars × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The page reads them from the header to compute offsets dynamically.

use crate::api::config::{UniverseConfig, BODY_COUNT};
use crate::api::types::{UiEvent, WireEvent};
use crate::renderer::instance::RenderInstance;
use crate::systems::tunnel::TunnelStar;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_MAX_STARS: usize = 6;
pub const HEADER_STAR_COUNT: usize = 7;
pub const HEADER_LOGO_VISIBLE: usize = 8;
pub const HEADER_LOGO_OPACITY: usize = 9;
pub const HEADER_CAMERA_Z: usize = 10;
pub const HEADER_TUNNEL_ACTIVE: usize = 11;
pub const HEADER_TUNNEL_SPIRAL: usize = 12;
pub const HEADER_OVERLAY_OPACITY: usize = 13;
pub const HEADER_STARFIELD_ROTATION: usize = 14;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per UI event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = WireEvent::FLOATS;

/// Floats per tunnel star: x, y, z, color index.
pub const STAR_FLOATS: usize = TunnelStar::FLOATS;

/// Default per-frame event capacity.
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,
    pub max_stars: usize,

    pub instance_data_offset: usize,
    pub event_data_offset: usize,
    pub star_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize, max_stars: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let star_data_offset = event_data_offset + max_events * EVENT_FLOATS;
        let buffer_total_floats = star_data_offset + max_stars * STAR_FLOATS;

        Self {
            max_instances,
            max_events,
            max_stars,
            instance_data_offset,
            event_data_offset,
            star_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// One instance per body plus the logo.
    pub fn from_config(config: &UniverseConfig) -> Self {
        Self::new(BODY_COUNT + 1, DEFAULT_MAX_EVENTS, config.tunnel_stars)
    }
}

/// The flat buffer the page reads every frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        data[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        data[HEADER_MAX_EVENTS] = layout.max_events as f32;
        data[HEADER_MAX_STARS] = layout.max_stars as f32;
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn header(&self, field: usize) -> f32 {
        self.data.get(field).copied().unwrap_or(0.0)
    }

    pub fn set_header(&mut self, field: usize, value: f32) {
        if field < HEADER_FLOATS {
            self.data[field] = value;
        }
    }

    /// Copy instances in, truncating to capacity.
    pub fn write_instances(&mut self, instances: &[RenderInstance]) {
        let count = instances.len().min(self.layout.max_instances);
        let start = self.layout.instance_data_offset;
        let floats: &[f32] = bytemuck::cast_slice(&instances[..count]);
        self.data[start..start + floats.len()].copy_from_slice(floats);
        self.data[HEADER_INSTANCE_COUNT] = count as f32;
    }

    /// Copy this frame's UI events in, truncating to capacity.
    pub fn write_events(&mut self, events: &[UiEvent]) {
        let count = events.len().min(self.layout.max_events);
        if count < events.len() {
            log::warn!("protocol: dropped {} ui events", events.len() - count);
        }
        let start = self.layout.event_data_offset;
        for (i, event) in events[..count].iter().enumerate() {
            let wire = WireEvent::from(*event);
            let at = start + i * EVENT_FLOATS;
            self.data[at..at + EVENT_FLOATS].copy_from_slice(bytemuck::cast_slice(&[wire]));
        }
        self.data[HEADER_EVENT_COUNT] = count as f32;
    }

    /// Copy tunnel stars in. `None` clears the section.
    pub fn write_stars(&mut self, stars: Option<&[TunnelStar]>) {
        let stars = stars.unwrap_or(&[]);
        let count = stars.len().min(self.layout.max_stars);
        let start = self.layout.star_data_offset;
        let floats: &[f32] = bytemuck::cast_slice(&stars[..count]);
        self.data[start..start + floats.len()].copy_from_slice(floats);
        self.data[HEADER_STAR_COUNT] = count as f32;
        self.data[HEADER_TUNNEL_ACTIVE] = if count > 0 { 1.0 } else { 0.0 };
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer for the host.
    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, EVENT_OPEN_PANEL};

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&UniverseConfig::default());
        assert_eq!(layout.max_instances, 8);
        assert_eq!(layout.max_stars, 2000);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 8 * 8);
        assert_eq!(layout.star_data_offset, HEADER_FLOATS + 8 * 8 + 32 * 4);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 64 + 128 + 2000 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn capacities_are_in_the_header() {
        let buf = FrameBuffer::new(ProtocolLayout::new(8, 4, 10));
        assert_eq!(buf.header(HEADER_PROTOCOL_VERSION), PROTOCOL_VERSION);
        assert_eq!(buf.header(HEADER_MAX_INSTANCES), 8.0);
        assert_eq!(buf.header(HEADER_MAX_EVENTS), 4.0);
        assert_eq!(buf.header(HEADER_MAX_STARS), 10.0);
    }

    #[test]
    fn events_land_after_instances() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(2, 4, 0));
        buf.write_events(&[UiEvent::OpenPanel(BodyId(3)), UiEvent::HideTooltip]);
        let at = buf.layout().event_data_offset;
        assert_eq!(buf.header(HEADER_EVENT_COUNT), 2.0);
        assert_eq!(buf.as_slice()[at], EVENT_OPEN_PANEL);
        assert_eq!(buf.as_slice()[at + 1], 3.0);
    }

    #[test]
    fn overflow_is_truncated() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(1, 1, 2));
        buf.write_instances(&[RenderInstance::default(); 3]);
        buf.write_events(&[UiEvent::HideTooltip, UiEvent::ClosePanel]);
        buf.write_stars(Some(&[TunnelStar::default(); 5]));
        assert_eq!(buf.header(HEADER_INSTANCE_COUNT), 1.0);
        assert_eq!(buf.header(HEADER_EVENT_COUNT), 1.0);
        assert_eq!(buf.header(HEADER_STAR_COUNT), 2.0);
    }

    #[test]
    fn clearing_the_tunnel() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(1, 1, 4));
        buf.write_stars(Some(&[TunnelStar { z: -3.0, ..Default::default() }]));
        assert_eq!(buf.header(HEADER_TUNNEL_ACTIVE), 1.0);
        buf.write_stars(None);
        assert_eq!(buf.header(HEADER_TUNNEL_ACTIVE), 0.0);
        assert_eq!(buf.header(HEADER_STAR_COUNT), 0.0);
    }
}

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{UniverseConfig, PlanetSpec, BODY_COUNT};
pub use api::types::{BodyId, Cursor, UiEvent, WireEvent};
pub use api::universe::Universe;
pub use components::body::Body;
pub use components::logo::Logo;
pub use core::registry::BodyRegistry;
pub use core::time::{FixedTimestep, FrameClock, STEP_MS};
pub use error::ConfigError;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Camera3D;
pub use renderer::{BufferRenderer, FrameData, Renderer};
pub use bridge::protocol::{FrameBuffer, ProtocolLayout};
pub use systems::layout::{Layout, LayoutMode};
pub use systems::mobile_phase::MobilePhase;
pub use systems::tunnel::{TunnelStar, LOW_POWER_STARS};

// Extensions: pure math helpers
pub use extensions::{Easing, lerp, lerp_vec3, ease, ease_vec3};

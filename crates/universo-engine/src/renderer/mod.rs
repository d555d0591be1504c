pub mod instance;
pub mod camera;
pub mod buffer;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{Renderer, FrameData};
pub use buffer::BufferRenderer;

// extensions/mod.rs
//
// Math helpers shared by every controller.
// Decoupled from bodies and session state: plain functions on numbers and vectors.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};

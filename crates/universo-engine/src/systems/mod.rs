pub mod layout;
pub mod repulsion;
pub mod desktop_orbit;
pub mod mobile_phase;
pub mod spin;
pub mod logo;
pub mod loading;
pub mod tunnel;
pub mod tooltip;

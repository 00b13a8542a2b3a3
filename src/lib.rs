//! Log Splitter - axe vs log impact behaviour
//!
//! Core modules:
//! - `sim`: Impact decisions (stick or split), ground-break delegation, scene routing
//! - `settings`: Data-driven thresholds and offsets, loaded from JSON
//!
//! The physics engine itself is not part of this crate. Everything the decision
//! logic needs from it goes through [`sim::PhysicsHost`] and [`sim::SoundPlayer`].

pub mod settings;
pub mod sim;

pub use settings::{AxeSettings, ConfigError, LogSettings, SceneConfig, StickMode};

use glam::{Quat, Vec3};

/// Gameplay tuning constants (defaults for the settings structs)
pub mod consts {
    /// Axe impact speed at or above which a log splits instead of catching the blade
    pub const AXE_BREAK_THRESHOLD: f32 = 6.0;
    /// Ground impact speed at or above which a log with an axe in it splits
    pub const GROUND_BREAK_THRESHOLD: f32 = 5.0;

    /// Lateral distance of each half from the log center
    pub const LOG_HALF_OFFSET: f32 = 0.2;
    /// Halves spawn this far above the log to avoid ground interpenetration
    pub const LOG_SPAWN_HEIGHT: f32 = 0.2;
    /// Impulse pushing each half outward along the split axis
    pub const SPLIT_IMPULSE: f32 = 2.0;
}

/// World up axis (Y-up, matching the host scene convention)
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Local right axis of a rotation, in world space
#[inline]
pub fn local_right(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

/// Approximate vector equality for unit tests
#[cfg(test)]
pub(crate) fn approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}

//! Host engine capabilities
//!
//! The decision logic never touches a physics engine directly. Whatever runs the
//! simulation (a game engine binding, or [`super::SandboxHost`]) implements these.

use glam::Vec3;

use super::state::{BodyId, JointId, MotionConstraints, ObjectId, PrefabId, SoundId, Transform};

/// Break limits of a joint; infinite means the host never breaks it by force
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakLimits {
    pub force: f32,
    pub torque: f32,
}

impl BreakLimits {
    pub const UNBREAKABLE: Self = Self {
        force: f32::INFINITY,
        torque: f32::INFINITY,
    };
}

/// Rigid bodies, joints and scene objects
pub trait PhysicsHost {
    /// Weld `owner` to `connected` with a fixed joint
    fn add_fixed_joint(&mut self, owner: ObjectId, connected: BodyId, limits: BreakLimits) -> JointId;

    /// Remove a joint; unknown ids are ignored
    fn remove_joint(&mut self, joint: JointId);

    fn set_constraints(&mut self, body: BodyId, constraints: MotionConstraints);

    /// Spawn a prefab instance, `None` if the host could not instantiate it
    fn instantiate(&mut self, prefab: PrefabId, transform: Transform) -> Option<ObjectId>;

    /// Rigid body attached to an object, if any
    fn body_of(&self, object: ObjectId) -> Option<BodyId>;

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3);

    /// Remove an object from the scene (joints connected to it go with it)
    fn destroy(&mut self, object: ObjectId);

    /// Display name for log output
    fn object_name(&self, object: ObjectId) -> String {
        format!("object#{}", object.0)
    }
}

/// One-shot sound playback
pub trait SoundPlayer {
    fn play(&mut self, clip: SoundId);
}

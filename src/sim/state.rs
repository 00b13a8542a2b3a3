//! Handles and plain data shared by the axe and log behaviours

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::local_right;

/// Host scene object (log, half, ground, axe body owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Host rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Host joint constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub u32);

/// Spawnable prefab asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrefabId(pub u32);

/// Sound clip asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// Index into the scene's axe registry (non-owning back-reference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxeId(pub u32);

/// Category tag of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Untagged,
    Axe,
    Log,
    HalfLog,
    Ground,
}

/// World-space pose of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Local +X axis in world space
    #[inline]
    pub fn right(&self) -> Vec3 {
        local_right(self.rotation)
    }
}

/// One side of a contact as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSide {
    pub object: ObjectId,
    pub tag: Tag,
    pub transform: Transform,
    /// Rigid body of this side, if it has one
    pub body: Option<BodyId>,
}

/// A new contact between two objects (collision-enter)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub a: ContactSide,
    pub b: ContactSide,
    /// Velocity of `a` relative to `b` at the moment of contact
    pub relative_velocity: Vec3,
}

impl Collision {
    /// Impact speed (magnitude of relative velocity)
    #[inline]
    pub fn impact_speed(&self) -> f32 {
        self.relative_velocity.length()
    }

    /// The side that is not `object`, if `object` takes part in this contact
    pub fn other(&self, object: ObjectId) -> Option<&ContactSide> {
        if self.a.object == object {
            Some(&self.b)
        } else if self.b.object == object {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// Motion constraint applied to a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionConstraints {
    /// Unconstrained dynamic motion
    #[default]
    None,
    /// Rotation locked on X, Y and Z
    FreezeRotation,
    /// Body driven only by its joint/host, ignores forces
    Kinematic,
}

/// Sound cues the axe can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Log split
    Hit,
    /// Blade caught in a log
    Stuck,
}

/// Sound clip assignment for an axe (either may be missing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxeSounds {
    pub hit: Option<SoundId>,
    pub stuck: Option<SoundId>,
}

impl AxeSounds {
    pub fn clip(&self, cue: SoundCue) -> Option<SoundId> {
        match cue {
            SoundCue::Hit => self.hit,
            SoundCue::Stuck => self.stuck,
        }
    }
}

/// Join between a stuck axe and its log; both halves always set together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StuckState {
    pub joint: JointId,
    pub log: ObjectId,
}

/// Axe behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxeState {
    Free,
    Stuck { log: ObjectId },
}

/// Result of a log split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    pub log: ObjectId,
    /// Spawned halves (left, right); `None` where instantiation failed
    pub halves: [Option<ObjectId>; 2],
}

/// What a collision did to the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Axe caught in a log below the break threshold
    AxeStuck { axe: AxeId, log: ObjectId },
    /// Log destroyed and replaced by halves
    LogSplit {
        axe: AxeId,
        log: ObjectId,
        halves: [Option<ObjectId>; 2],
    },
    /// Axe stuck-state cleared
    AxeReleased { axe: AxeId, log: ObjectId },
    /// Break requested but skipped (no split prefab)
    BreakSkipped { axe: AxeId, log: ObjectId },
}

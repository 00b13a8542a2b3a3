//! Impact simulation module
//!
//! All gameplay decisions live here. The host engine is reached only through
//! the traits in [`host`]:
//! - Synchronous, one collision-enter event at a time
//! - Stable iteration order (axes by id, logs by object id)
//! - No rendering, audio or platform dependencies

pub mod ground;
pub mod host;
pub mod impact;
pub mod sandbox;
pub mod scene;
pub mod split;
pub mod state;

pub use ground::{GroundBreak, GroundBreakNotifier};
pub use host::{BreakLimits, PhysicsHost, SoundPlayer};
pub use impact::{ContactOutcome, ImpactResolver};
pub use sandbox::SandboxHost;
pub use scene::Scene;
pub use split::{HalfPlacement, split_placements};
pub use state::{
    AxeId, AxeSounds, AxeState, BodyId, Collision, ContactSide, JointId, MotionConstraints,
    ObjectId, PrefabId, SceneEvent, SoundCue, SoundId, SplitOutcome, StuckState, Tag, Transform,
};

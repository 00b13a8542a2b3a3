//! Split geometry for a breaking log
//!
//! Two halves are placed symmetrically about a point slightly above the log,
//! along the log's local right axis, each pushed outward along that axis.

use glam::{Quat, Vec3};

use super::state::Transform;
use crate::WORLD_UP;

/// Spawn pose and impulse of one half
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlacement {
    pub transform: Transform,
    pub impulse: Vec3,
}

/// Compute both half placements for a log at `log`
///
/// Returns `[left, right]`. With a zero offset the direction is undefined, so
/// both impulses are zero.
pub fn split_placements(
    log: &Transform,
    half_offset: f32,
    spawn_height: f32,
    impulse: f32,
) -> [HalfPlacement; 2] {
    let spawn = log.position + WORLD_UP * spawn_height;
    let offset = log.right() * half_offset;
    let dir = offset.normalize_or_zero();

    [
        half(spawn - offset, log.rotation, -dir * impulse),
        half(spawn + offset, log.rotation, dir * impulse),
    ]
}

fn half(position: Vec3, rotation: Quat, impulse: Vec3) -> HalfPlacement {
    HalfPlacement {
        transform: Transform::new(position, rotation),
        impulse,
    }
}

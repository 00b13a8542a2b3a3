//! In-memory host
//!
//! A deterministic stand-in for a physics engine: keeps objects, bodies and
//! joints in ordered maps and records every impulse and sound. No dynamics are
//! integrated; contacts are produced explicitly with [`SandboxHost::contact`].

use std::collections::BTreeMap;

use glam::Vec3;

use super::host::{BreakLimits, PhysicsHost, SoundPlayer};
use super::state::{
    BodyId, Collision, ContactSide, JointId, MotionConstraints, ObjectId, PrefabId, SoundId, Tag,
    Transform,
};

/// A scene object
#[derive(Debug, Clone)]
pub struct SandboxObject {
    pub name: String,
    pub tag: Tag,
    pub transform: Transform,
    pub body: Option<BodyId>,
}

/// A rigid body
#[derive(Debug, Clone, Default)]
pub struct SandboxBody {
    pub constraints: MotionConstraints,
    /// Sum of all impulses applied so far
    pub total_impulse: Vec3,
}

/// A fixed joint
#[derive(Debug, Clone, Copy)]
pub struct SandboxJoint {
    pub owner: ObjectId,
    pub connected: BodyId,
    pub limits: BreakLimits,
}

/// Prefab template
#[derive(Debug, Clone)]
pub struct SandboxPrefab {
    pub name: String,
    pub tag: Tag,
    pub with_body: bool,
}

#[derive(Debug, Default)]
pub struct SandboxHost {
    objects: BTreeMap<ObjectId, SandboxObject>,
    bodies: BTreeMap<BodyId, SandboxBody>,
    joints: BTreeMap<JointId, SandboxJoint>,
    prefabs: BTreeMap<PrefabId, SandboxPrefab>,
    /// Every clip played, in order
    pub sounds_played: Vec<SoundId>,
    /// Every impulse applied, in order
    pub impulses: Vec<(BodyId, Vec3)>,
    /// Destroyed objects, in order
    pub destroyed: Vec<ObjectId>,
    next_id: u32,
}

impl SandboxHost {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    fn alloc(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an object to the scene, optionally with a rigid body
    pub fn spawn(&mut self, name: &str, tag: Tag, transform: Transform, with_body: bool) -> ObjectId {
        let id = ObjectId(self.alloc());
        let body = with_body.then(|| {
            let body = BodyId(self.alloc());
            self.bodies.insert(body, SandboxBody::default());
            body
        });
        self.objects.insert(
            id,
            SandboxObject {
                name: name.to_string(),
                tag,
                transform,
                body,
            },
        );
        id
    }

    pub fn register_prefab(&mut self, name: &str, tag: Tag, with_body: bool) -> PrefabId {
        let id = PrefabId(self.alloc());
        self.prefabs.insert(
            id,
            SandboxPrefab {
                name: name.to_string(),
                tag,
                with_body,
            },
        );
        id
    }

    /// Build a collision-enter event between two live objects
    pub fn contact(&self, a: ObjectId, b: ObjectId, relative_velocity: Vec3) -> Option<Collision> {
        Some(Collision {
            a: self.side(a)?,
            b: self.side(b)?,
            relative_velocity,
        })
    }

    fn side(&self, object: ObjectId) -> Option<ContactSide> {
        self.objects.get(&object).map(|o| ContactSide {
            object,
            tag: o.tag,
            transform: o.transform,
            body: o.body,
        })
    }

    pub fn object(&self, id: ObjectId) -> Option<&SandboxObject> {
        self.objects.get(&id)
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Live objects with a given tag, in id order
    pub fn objects_tagged(&self, tag: Tag) -> impl Iterator<Item = (ObjectId, &SandboxObject)> {
        self.objects
            .iter()
            .filter(move |(_, o)| o.tag == tag)
            .map(|(id, o)| (*id, o))
    }

    pub fn body(&self, id: BodyId) -> Option<&SandboxBody> {
        self.bodies.get(&id)
    }

    pub fn constraints(&self, id: BodyId) -> Option<MotionConstraints> {
        self.bodies.get(&id).map(|b| b.constraints)
    }

    pub fn joint(&self, id: JointId) -> Option<&SandboxJoint> {
        self.joints.get(&id)
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }
}

impl PhysicsHost for SandboxHost {
    fn add_fixed_joint(&mut self, owner: ObjectId, connected: BodyId, limits: BreakLimits) -> JointId {
        let id = JointId(self.alloc());
        self.joints.insert(
            id,
            SandboxJoint {
                owner,
                connected,
                limits,
            },
        );
        id
    }

    fn remove_joint(&mut self, joint: JointId) {
        self.joints.remove(&joint);
    }

    fn set_constraints(&mut self, body: BodyId, constraints: MotionConstraints) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.constraints = constraints;
        }
    }

    fn instantiate(&mut self, prefab: PrefabId, transform: Transform) -> Option<ObjectId> {
        let template = self.prefabs.get(&prefab)?.clone();
        let name = format!("{} (clone)", template.name);
        Some(self.spawn(&name, template.tag, transform, template.with_body))
    }

    fn body_of(&self, object: ObjectId) -> Option<BodyId> {
        self.objects.get(&object)?.body
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.total_impulse += impulse;
            self.impulses.push((body, impulse));
        }
    }

    fn destroy(&mut self, object: ObjectId) {
        let Some(removed) = self.objects.remove(&object) else {
            return;
        };
        if let Some(body) = removed.body {
            self.bodies.remove(&body);
            self.joints.retain(|_, j| j.connected != body);
        }
        self.joints.retain(|_, j| j.owner != object);
        self.destroyed.push(object);
    }

    fn object_name(&self, object: ObjectId) -> String {
        self.objects
            .get(&object)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| format!("object#{}", object.0))
    }
}

impl SoundPlayer for SandboxHost {
    fn play(&mut self, clip: SoundId) {
        self.sounds_played.push(clip);
    }
}

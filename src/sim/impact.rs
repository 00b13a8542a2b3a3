//! Axe impact behaviour
//!
//! A contact with a log either catches the blade (below the break threshold) or
//! splits the log into two halves. A stuck axe ignores further log contacts until
//! the log it is in breaks.

use super::host::{BreakLimits, PhysicsHost, SoundPlayer};
use super::split::split_placements;
use super::state::{
    AxeId, AxeSounds, AxeState, BodyId, ContactSide, MotionConstraints, ObjectId, PrefabId,
    SoundCue, SplitOutcome, StuckState, Transform,
};
use crate::settings::{AxeSettings, StickMode};

/// What a log contact or break request did
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    /// Nothing happened (already stuck, or the log has no rigid body to join)
    Ignored,
    /// Blade caught in the log
    Stuck { log: ObjectId },
    /// Log split; `released` is the stuck-state cleared by the split, if any
    Split {
        split: SplitOutcome,
        released: Option<StuckState>,
    },
    /// Split requested with no prefab configured
    BreakSkipped { log: ObjectId },
}

/// Axe behaviour (one per axe in the scene)
#[derive(Debug, Clone)]
pub struct ImpactResolver {
    id: AxeId,
    object: ObjectId,
    body: Option<BodyId>,
    settings: AxeSettings,
    split_prefab: Option<PrefabId>,
    sounds: AxeSounds,
    stuck: Option<StuckState>,
}

impl ImpactResolver {
    pub fn new(id: AxeId, object: ObjectId, body: Option<BodyId>, settings: AxeSettings) -> Self {
        if body.is_none() {
            log::warn!("Axe {} has no rigid body, stuck motion constraints disabled", id.0);
        }
        log::debug!(
            "Axe {} initialized (break threshold {})",
            id.0,
            settings.break_threshold
        );
        Self {
            id,
            object,
            body,
            settings,
            split_prefab: None,
            sounds: AxeSounds::default(),
            stuck: None,
        }
    }

    pub fn with_split_prefab(mut self, prefab: PrefabId) -> Self {
        self.split_prefab = Some(prefab);
        self
    }

    pub fn with_sounds(mut self, sounds: AxeSounds) -> Self {
        self.sounds = sounds;
        self
    }

    pub fn set_split_prefab(&mut self, prefab: Option<PrefabId>) {
        self.split_prefab = prefab;
    }

    pub fn set_sounds(&mut self, sounds: AxeSounds) {
        self.sounds = sounds;
    }

    pub fn id(&self) -> AxeId {
        self.id
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn stuck(&self) -> Option<StuckState> {
        self.stuck
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck.is_some()
    }

    pub fn state(&self) -> AxeState {
        match self.stuck {
            Some(s) => AxeState::Stuck { log: s.log },
            None => AxeState::Free,
        }
    }

    /// New contact between this axe and a log
    pub fn on_log_contact<H>(&mut self, host: &mut H, impact_speed: f32, log: &ContactSide) -> ContactOutcome
    where
        H: PhysicsHost + SoundPlayer + ?Sized,
    {
        if let Some(stuck) = self.stuck {
            log::debug!(
                "Axe {} already stuck in {:?}, ignoring contact with {}",
                self.id.0,
                stuck.log,
                host.object_name(log.object)
            );
            return ContactOutcome::Ignored;
        }

        log::debug!(
            "Axe {} impact speed: {}, threshold: {}",
            self.id.0,
            impact_speed,
            self.settings.break_threshold
        );

        if impact_speed >= self.settings.break_threshold {
            return self.break_log(host, log.object, &log.transform);
        }

        self.play(host, SoundCue::Stuck);

        let Some(log_body) = log.body.or_else(|| host.body_of(log.object)) else {
            log::debug!(
                "Log {} has no rigid body, axe {} bounces off",
                host.object_name(log.object),
                self.id.0
            );
            return ContactOutcome::Ignored;
        };

        let joint = host.add_fixed_joint(self.object, log_body, BreakLimits::UNBREAKABLE);
        self.stuck = Some(StuckState {
            joint,
            log: log.object,
        });

        if let Some(body) = self.body {
            let constraints = match self.settings.stick_mode {
                StickMode::FreezeRotation => MotionConstraints::FreezeRotation,
                StickMode::Kinematic => MotionConstraints::Kinematic,
            };
            host.set_constraints(body, constraints);
        }

        log::info!("Axe {} stuck in log {}", self.id.0, host.object_name(log.object));
        ContactOutcome::Stuck { log: log.object }
    }

    /// Split `log` into two halves and destroy it
    ///
    /// Safe to call with no stuck-state. With no split prefab configured this
    /// only warns; the log and any stuck-state are left as they are.
    pub fn break_log<H>(&mut self, host: &mut H, log: ObjectId, log_transform: &Transform) -> ContactOutcome
    where
        H: PhysicsHost + SoundPlayer + ?Sized,
    {
        let Some(prefab) = self.split_prefab else {
            log::warn!("Axe {} has no split prefab assigned, log not broken", self.id.0);
            return ContactOutcome::BreakSkipped { log };
        };

        log::info!("Axe {} breaking log {}", self.id.0, host.object_name(log));

        self.play(host, SoundCue::Hit);

        let placements = split_placements(
            log_transform,
            self.settings.log_half_offset,
            self.settings.log_spawn_height,
            self.settings.split_impulse,
        );

        let halves = placements.map(|p| {
            let half = host.instantiate(prefab, p.transform)?;
            if let Some(body) = host.body_of(half) {
                host.apply_impulse(body, p.impulse);
            }
            Some(half)
        });

        let released = self.release(host);
        host.destroy(log);

        ContactOutcome::Split {
            split: SplitOutcome { log, halves },
            released,
        }
    }

    /// Clear stuck-state: drop the joint and restore free motion
    pub fn release<H>(&mut self, host: &mut H) -> Option<StuckState>
    where
        H: PhysicsHost + ?Sized,
    {
        let released = self.stuck.take();
        if let Some(stuck) = released {
            host.remove_joint(stuck.joint);
            log::debug!("Axe {} released from {:?}", self.id.0, stuck.log);
        }
        if let Some(body) = self.body {
            host.set_constraints(body, MotionConstraints::None);
        }
        released
    }

    fn play<H>(&self, host: &mut H, cue: SoundCue)
    where
        H: SoundPlayer + ?Sized,
    {
        if let Some(clip) = self.sounds.clip(cue) {
            host.play(clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;
    use crate::sim::sandbox::SandboxHost;
    use crate::sim::state::{SoundId, Tag};
    use glam::Vec3;
    use proptest::prelude::*;

    const HIT: SoundId = SoundId(900);
    const STUCK: SoundId = SoundId(901);

    struct Rig {
        host: SandboxHost,
        axe: ImpactResolver,
        log: ObjectId,
    }

    fn rig(settings: AxeSettings) -> Rig {
        let mut host = SandboxHost::new();
        let axe_obj = host.spawn("Axe", Tag::Axe, Transform::default(), true);
        let log = host.spawn("Log", Tag::Log, Transform::default(), true);
        let prefab = host.register_prefab("LogHalf", Tag::HalfLog, true);
        let axe = ImpactResolver::new(AxeId(0), axe_obj, host.body_of(axe_obj), settings)
            .with_split_prefab(prefab)
            .with_sounds(AxeSounds {
                hit: Some(HIT),
                stuck: Some(STUCK),
            });
        Rig { host, axe, log }
    }

    fn log_side(host: &SandboxHost, log: ObjectId) -> ContactSide {
        let o = host.object(log).unwrap();
        ContactSide {
            object: log,
            tag: o.tag,
            transform: o.transform,
            body: o.body,
        }
    }

    fn axe_body(r: &Rig) -> BodyId {
        r.host.body_of(r.axe.object()).unwrap()
    }

    #[test]
    fn test_slow_hit_sticks() {
        let mut r = rig(AxeSettings::default());
        let side = log_side(&r.host, r.log);

        let outcome = r.axe.on_log_contact(&mut r.host, 3.0, &side);

        assert_eq!(outcome, ContactOutcome::Stuck { log: r.log });
        assert_eq!(r.axe.state(), AxeState::Stuck { log: r.log });
        assert!(r.host.is_alive(r.log));
        assert_eq!(r.host.joint_count(), 1);
        assert_eq!(r.host.objects_tagged(Tag::HalfLog).count(), 0);
        assert_eq!(r.host.sounds_played, vec![STUCK]);
        assert_eq!(
            r.host.constraints(axe_body(&r)),
            Some(MotionConstraints::FreezeRotation)
        );

        let joint = r.host.joint(r.axe.stuck().unwrap().joint).unwrap();
        assert!(joint.limits.force.is_infinite());
        assert!(joint.limits.torque.is_infinite());
    }

    #[test]
    fn test_kinematic_stick_mode() {
        let mut r = rig(AxeSettings {
            stick_mode: StickMode::Kinematic,
            ..Default::default()
        });
        let side = log_side(&r.host, r.log);
        r.axe.on_log_contact(&mut r.host, 1.0, &side);
        assert_eq!(r.host.constraints(axe_body(&r)), Some(MotionConstraints::Kinematic));
    }

    #[test]
    fn test_fast_hit_splits() {
        let mut r = rig(AxeSettings::default());
        let side = log_side(&r.host, r.log);

        let outcome = r.axe.on_log_contact(&mut r.host, 6.0, &side);

        let ContactOutcome::Split { split, released } = outcome.clone() else {
            panic!("expected split, got {:?}", outcome);
        };
        assert_eq!(released, None);
        assert_eq!(split.log, r.log);
        assert!(!r.host.is_alive(r.log));
        assert_eq!(r.axe.state(), AxeState::Free);
        assert_eq!(r.host.sounds_played, vec![HIT]);

        let [left, right] = split.halves.map(|h| h.unwrap());
        let left_pos = r.host.object(left).unwrap().transform.position;
        let right_pos = r.host.object(right).unwrap().transform.position;
        assert!(approx_eq(left_pos, Vec3::new(-0.2, 0.2, 0.0), 1e-6));
        assert!(approx_eq(right_pos, Vec3::new(0.2, 0.2, 0.0), 1e-6));

        let left_body = r.host.body_of(left).unwrap();
        let right_body = r.host.body_of(right).unwrap();
        assert!(approx_eq(
            r.host.body(left_body).unwrap().total_impulse,
            Vec3::new(-2.0, 0.0, 0.0),
            1e-6
        ));
        assert!(approx_eq(
            r.host.body(right_body).unwrap().total_impulse,
            Vec3::new(2.0, 0.0, 0.0),
            1e-6
        ));
    }

    #[test]
    fn test_stuck_axe_ignores_contacts() {
        let mut r = rig(AxeSettings::default());
        let side = log_side(&r.host, r.log);
        r.axe.on_log_contact(&mut r.host, 2.0, &side);

        let other = r.host.spawn("Log 2", Tag::Log, Transform::default(), true);
        let other_side = log_side(&r.host, other);
        assert_eq!(
            r.axe.on_log_contact(&mut r.host, 50.0, &other_side),
            ContactOutcome::Ignored
        );
        assert!(r.host.is_alive(other));
        assert_eq!(r.host.joint_count(), 1);
    }

    #[test]
    fn test_break_while_free_is_harmless() {
        let mut r = rig(AxeSettings::default());
        let transform = r.host.object(r.log).unwrap().transform;

        let outcome = r.axe.break_log(&mut r.host, r.log, &transform);

        assert!(matches!(outcome, ContactOutcome::Split { released: None, .. }));
        assert_eq!(r.host.joint_count(), 0);
        assert_eq!(r.host.constraints(axe_body(&r)), Some(MotionConstraints::None));
    }

    #[test]
    fn test_break_releases_stuck_state() {
        let mut r = rig(AxeSettings::default());
        let side = log_side(&r.host, r.log);
        r.axe.on_log_contact(&mut r.host, 2.0, &side);
        let stuck = r.axe.stuck().unwrap();

        let outcome = r.axe.break_log(&mut r.host, r.log, &side.transform);

        assert!(matches!(outcome, ContactOutcome::Split { released: Some(s), .. } if s == stuck));
        assert!(!r.axe.is_stuck());
        assert!(r.host.joint(stuck.joint).is_none());
        assert_eq!(r.host.constraints(axe_body(&r)), Some(MotionConstraints::None));
    }

    #[test]
    fn test_missing_prefab_skips_break() {
        let mut r = rig(AxeSettings::default());
        r.axe.set_split_prefab(None);
        let side = log_side(&r.host, r.log);

        let outcome = r.axe.on_log_contact(&mut r.host, 10.0, &side);

        assert_eq!(outcome, ContactOutcome::BreakSkipped { log: r.log });
        assert!(r.host.is_alive(r.log));
        assert!(r.host.sounds_played.is_empty());
    }

    #[test]
    fn test_log_without_body_cannot_hold_axe() {
        let mut r = rig(AxeSettings::default());
        let bare = r.host.spawn("Bare log", Tag::Log, Transform::default(), false);
        let side = log_side(&r.host, bare);

        assert_eq!(r.axe.on_log_contact(&mut r.host, 1.0, &side), ContactOutcome::Ignored);
        assert!(!r.axe.is_stuck());
        assert_eq!(r.host.joint_count(), 0);
    }

    #[test]
    fn test_missing_sounds_and_half_bodies_are_skipped() {
        let mut host = SandboxHost::new();
        let axe_obj = host.spawn("Axe", Tag::Axe, Transform::default(), false);
        let log = host.spawn("Log", Tag::Log, Transform::default(), true);
        let prefab = host.register_prefab("LogHalf", Tag::HalfLog, false);
        let mut axe = ImpactResolver::new(AxeId(3), axe_obj, None, AxeSettings::default())
            .with_split_prefab(prefab);
        let side = log_side(&host, log);

        let outcome = axe.on_log_contact(&mut host, 8.0, &side);

        assert!(matches!(outcome, ContactOutcome::Split { .. }));
        assert!(host.sounds_played.is_empty());
        assert!(host.impulses.is_empty());
        assert_eq!(host.objects_tagged(Tag::HalfLog).count(), 2);
    }

    proptest! {
        #[test]
        fn prop_threshold_decides(speed in 0.0f32..20.0, threshold in 0.5f32..15.0) {
            let mut r = rig(AxeSettings { break_threshold: threshold, ..Default::default() });
            let side = log_side(&r.host, r.log);
            let outcome = r.axe.on_log_contact(&mut r.host, speed, &side);

            if speed >= threshold {
                let is_split = matches!(outcome, ContactOutcome::Split { .. });
                prop_assert!(is_split);
                prop_assert!(!r.host.is_alive(r.log));
                prop_assert_eq!(r.host.objects_tagged(Tag::HalfLog).count(), 2);
                prop_assert!(!r.axe.is_stuck());
            } else {
                prop_assert_eq!(outcome, ContactOutcome::Stuck { log: r.log });
                prop_assert!(r.host.is_alive(r.log));
                prop_assert_eq!(r.host.joint_count(), 1);
                prop_assert_eq!(r.host.objects_tagged(Tag::HalfLog).count(), 0);
            }
        }
    }
}

//! Scene routing
//!
//! Owns the axe registry and the per-log ground notifiers, and turns host
//! collision-enter events into calls on the right behaviour. Any log break,
//! direct or delegated, releases every axe stuck in that log.
//!
//! A split always reports `LogSplit` first, followed by one `AxeReleased` per
//! axe that was stuck in the log (the breaking axe before the others).

use std::collections::BTreeMap;

use super::ground::{GroundBreak, GroundBreakNotifier};
use super::host::{PhysicsHost, SoundPlayer};
use super::impact::{ContactOutcome, ImpactResolver};
use super::state::{AxeId, AxeState, BodyId, Collision, ContactSide, ObjectId, SceneEvent, Tag};
use crate::settings::{AxeSettings, LogSettings, SceneConfig};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Axes sorted by id
    axes: Vec<ImpactResolver>,
    /// Ground notifiers keyed by log object
    notifiers: BTreeMap<ObjectId, GroundBreakNotifier>,
    log_settings: LogSettings,
    next_axe: u32,
}

impl Scene {
    pub fn new(log_settings: LogSettings) -> Self {
        Self {
            log_settings,
            ..Default::default()
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.log.clone())
    }

    /// Register an axe behaviour on `object`
    pub fn add_axe(&mut self, object: ObjectId, body: Option<BodyId>, settings: AxeSettings) -> AxeId {
        let id = AxeId(self.next_axe);
        self.next_axe += 1;
        self.axes.push(ImpactResolver::new(id, object, body, settings));
        id
    }

    /// Attach ground-break behaviour to a log
    pub fn add_log(&mut self, log: ObjectId) {
        self.notifiers
            .insert(log, GroundBreakNotifier::new(log, &self.log_settings));
    }

    pub fn axe(&self, id: AxeId) -> Option<&ImpactResolver> {
        self.axes
            .binary_search_by_key(&id, |a| a.id())
            .ok()
            .map(|i| &self.axes[i])
    }

    pub fn axe_mut(&mut self, id: AxeId) -> Option<&mut ImpactResolver> {
        self.axes
            .binary_search_by_key(&id, |a| a.id())
            .ok()
            .map(|i| &mut self.axes[i])
    }

    pub fn axes(&self) -> &[ImpactResolver] {
        &self.axes
    }

    pub fn axe_state(&self, id: AxeId) -> Option<AxeState> {
        self.axe(id).map(|a| a.state())
    }

    pub fn notifier(&self, log: ObjectId) -> Option<&GroundBreakNotifier> {
        self.notifiers.get(&log)
    }

    /// Logs that still have ground-break behaviour
    pub fn log_count(&self) -> usize {
        self.notifiers.len()
    }

    fn axe_index_by_object(&self, object: ObjectId) -> Option<usize> {
        self.axes.iter().position(|a| a.object() == object)
    }

    fn axe_index(&self, id: AxeId) -> Option<usize> {
        self.axes.binary_search_by_key(&id, |a| a.id()).ok()
    }

    /// Dispatch one collision-enter event
    pub fn handle_collision<H>(&mut self, host: &mut H, collision: &Collision) -> Vec<SceneEvent>
    where
        H: PhysicsHost + SoundPlayer + ?Sized,
    {
        let mut events = Vec::new();
        let speed = collision.impact_speed();

        for (this, other) in [(&collision.a, &collision.b), (&collision.b, &collision.a)] {
            if let Some(idx) = self.axe_index_by_object(this.object) {
                match other.tag {
                    Tag::Log => self.axe_hits_log(host, idx, speed, other, &mut events),
                    Tag::HalfLog => log::debug!(
                        "Axe {} touched half log {}",
                        self.axes[idx].id().0,
                        host.object_name(other.object)
                    ),
                    _ => {}
                }
            } else if this.tag == Tag::Log && other.tag == Tag::Ground {
                self.log_hits_ground(host, this, speed, &mut events);
            }
        }

        events
    }

    fn axe_hits_log<H>(
        &mut self,
        host: &mut H,
        idx: usize,
        speed: f32,
        log: &ContactSide,
        events: &mut Vec<SceneEvent>,
    ) where
        H: PhysicsHost + SoundPlayer + ?Sized,
    {
        let outcome = self.axes[idx].on_log_contact(host, speed, log);
        let axe = self.axes[idx].id();
        self.apply_outcome(host, axe, outcome, events);
    }

    fn log_hits_ground<H>(&mut self, host: &mut H, log: &ContactSide, speed: f32, events: &mut Vec<SceneEvent>)
    where
        H: PhysicsHost + SoundPlayer + ?Sized,
    {
        let Some(notifier) = self.notifiers.get_mut(&log.object) else {
            return;
        };
        let Some(GroundBreak { axe, log: log_id }) = notifier.on_ground_contact(speed) else {
            return;
        };
        let Some(idx) = self.axe_index(axe) else {
            log::warn!("Log {:?} refers to unknown axe {}", log_id, axe.0);
            return;
        };

        log::info!(
            "Log {} hit the ground at {}, breaking through axe {}",
            host.object_name(log_id),
            speed,
            axe.0
        );
        let outcome = self.axes[idx].break_log(host, log_id, &log.transform);
        self.apply_outcome(host, axe, outcome, events);
    }

    fn apply_outcome<H>(&mut self, host: &mut H, axe: AxeId, outcome: ContactOutcome, events: &mut Vec<SceneEvent>)
    where
        H: PhysicsHost + ?Sized,
    {
        match outcome {
            ContactOutcome::Ignored => {}
            ContactOutcome::Stuck { log } => {
                if let Some(notifier) = self.notifiers.get_mut(&log) {
                    notifier.attach_axe(axe);
                }
                events.push(SceneEvent::AxeStuck { axe, log });
            }
            ContactOutcome::BreakSkipped { log } => {
                events.push(SceneEvent::BreakSkipped { axe, log });
            }
            ContactOutcome::Split { split, released } => {
                let log = split.log;
                events.push(SceneEvent::LogSplit {
                    axe,
                    log,
                    halves: split.halves,
                });
                if let Some(stuck) = released {
                    events.push(SceneEvent::AxeReleased { axe, log: stuck.log });
                }
                self.notifiers.remove(&log);
                self.release_axes_stuck_in(host, log, events);
            }
        }
    }

    fn release_axes_stuck_in<H>(&mut self, host: &mut H, log: ObjectId, events: &mut Vec<SceneEvent>)
    where
        H: PhysicsHost + ?Sized,
    {
        for axe in &mut self.axes {
            if axe.stuck().is_some_and(|s| s.log == log) {
                axe.release(host);
                events.push(SceneEvent::AxeReleased { axe: axe.id(), log });
            }
        }
    }
}

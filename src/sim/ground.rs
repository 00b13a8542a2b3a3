//! Log-side ground impact handling
//!
//! A log remembers which axe (if any) is stuck in it. When it hits the ground
//! hard enough it hands the break back to that axe.

use super::state::{AxeId, ObjectId};
use crate::settings::LogSettings;

/// Request for the scene to break `log` through `axe`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundBreak {
    pub axe: AxeId,
    pub log: ObjectId,
}

/// Ground-break behaviour attached to one log
#[derive(Debug, Clone)]
pub struct GroundBreakNotifier {
    log: ObjectId,
    break_threshold: f32,
    /// Non-owning: an index into the scene's axe registry
    attached_axe: Option<AxeId>,
}

impl GroundBreakNotifier {
    pub fn new(log: ObjectId, settings: &LogSettings) -> Self {
        Self {
            log,
            break_threshold: settings.ground_break_threshold,
            attached_axe: None,
        }
    }

    pub fn break_threshold(&self) -> f32 {
        self.break_threshold
    }

    pub fn attached_axe(&self) -> Option<AxeId> {
        self.attached_axe
    }

    /// Remember `axe` as stuck in this log, replacing any previous one
    pub fn attach_axe(&mut self, axe: AxeId) {
        if let Some(prev) = self.attached_axe.replace(axe) {
            if prev != axe {
                log::debug!("Log {:?}: axe {} replaced by axe {}", self.log, prev.0, axe.0);
            }
        }
    }

    /// Log hit the ground at `impact_speed`
    ///
    /// Returns the break to delegate; the reference is cleared once delegated.
    pub fn on_ground_contact(&mut self, impact_speed: f32) -> Option<GroundBreak> {
        let axe = self.attached_axe?;
        log::debug!("Log {:?} hit ground with speed {}", self.log, impact_speed);

        if impact_speed < self.break_threshold {
            return None;
        }
        self.attached_axe = None;
        Some(GroundBreak { axe, log: self.log })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> GroundBreakNotifier {
        GroundBreakNotifier::new(ObjectId(7), &LogSettings::default())
    }

    #[test]
    fn test_no_axe_no_break() {
        let mut n = notifier();
        assert_eq!(n.on_ground_contact(100.0), None);
    }

    #[test]
    fn test_soft_landing_keeps_axe() {
        let mut n = notifier();
        n.attach_axe(AxeId(1));
        assert_eq!(n.on_ground_contact(4.99), None);
        assert_eq!(n.attached_axe(), Some(AxeId(1)));
    }

    #[test]
    fn test_hard_landing_delegates_once() {
        let mut n = notifier();
        n.attach_axe(AxeId(1));
        assert_eq!(
            n.on_ground_contact(5.0),
            Some(GroundBreak {
                axe: AxeId(1),
                log: ObjectId(7)
            })
        );
        assert_eq!(n.attached_axe(), None);
        assert_eq!(n.on_ground_contact(9.0), None);
    }

    #[test]
    fn test_attach_overwrites() {
        let mut n = notifier();
        n.attach_axe(AxeId(1));
        n.attach_axe(AxeId(2));
        assert_eq!(n.on_ground_contact(6.0).map(|b| b.axe), Some(AxeId(2)));
    }

    #[test]
    fn test_custom_threshold() {
        let mut n = GroundBreakNotifier::new(
            ObjectId(1),
            &LogSettings {
                ground_break_threshold: 1.5,
            },
        );
        n.attach_axe(AxeId(4));
        assert_eq!(n.break_threshold(), 1.5);
        assert!(n.on_ground_contact(1.5).is_some());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications from the crown to whatever renders it.
//!
//! The controller never plays haptics, flashes, or moves views itself. It
//! reports through a [`CrownListener`], whose hooks all default to no-ops so a
//! consumer only implements what it renders.
//!
//! ## Hooks
//!
//! Spin lifecycle, in the order a single pan produces them:
//!
//! 1. [`CrownListener::spin_began`]
//! 2. per update: [`CrownListener::will_update`], [`CrownListener::indicator_moved`],
//!    [`CrownListener::did_update`], then at most one of
//!    [`CrownListener::leading_edge_reached`] / [`CrownListener::trailing_edge_reached`]
//! 3. [`CrownListener::spin_ended`]
//!
//! Render outputs that are not tied to spinning:
//! [`CrownListener::pan_subject_changed`], [`CrownListener::surface_moved`] and
//! [`CrownListener::surface_scaled`].
//!
//! ## Recording
//!
//! [`EventLog`] records every hook as a [`CrownEvent`], which is handy for tests
//! and for shells that prefer to drain a queue once per frame.
//!
//! ```
//! use understory_crown::feedback::{CrownEvent, CrownListener, EventLog};
//!
//! let mut log = EventLog::new();
//! log.spin_began();
//! log.did_update(0.25);
//! assert_eq!(
//!     log.take(),
//!     vec![CrownEvent::SpinBegan, CrownEvent::DidUpdate { progress: 0.25 }]
//! );
//! assert!(log.events().is_empty());
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;
use peniko::Color;

use crate::controller::PanSubject;
use crate::surface::{SurfaceMove, SurfaceScale};

/// Strength of the impact haptic played on an edge hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactHaptic {
    /// A light tap.
    Light,
    /// A medium tap.
    Medium,
    /// A heavy tap.
    #[default]
    Heavy,
    /// No haptic.
    None,
}

impl ImpactHaptic {
    /// Returns `true` unless this is [`ImpactHaptic::None`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::None
    }
}

/// A fading color flash over part of the crown.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flash {
    /// Flash `color`, then fade back over `fade_duration`.
    Active {
        /// The flash color.
        color: Color,
        /// How long the fade back takes.
        fade_duration: Duration,
    },
    /// No flash.
    #[default]
    None,
}

/// What to play when the indicator reaches one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EdgeFeedback {
    /// Haptic strength.
    pub impact_haptic: ImpactHaptic,
    /// Flash over the crown background.
    pub background_flash: Flash,
    /// Flash over the indicator.
    pub foreground_flash: Flash,
}

impl Default for EdgeFeedback {
    fn default() -> Self {
        Self {
            impact_haptic: ImpactHaptic::Heavy,
            background_flash: Flash::Active {
                color: Color::from_rgba8(204, 204, 204, 255),
                fade_duration: Duration::from_millis(150),
            },
            foreground_flash: Flash::None,
        }
    }
}

/// One end of the indicator's travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Progress `0`.
    Leading,
    /// Progress `1`.
    Trailing,
}

/// Edge feedback for both ends of the travel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Feedback {
    /// Played when the indicator reaches progress `0`.
    pub leading: EdgeFeedback,
    /// Played when the indicator reaches progress `1`.
    pub trailing: EdgeFeedback,
}

impl Feedback {
    /// The descriptor for `edge`.
    #[must_use]
    pub fn for_edge(&self, edge: Edge) -> &EdgeFeedback {
        match edge {
            Edge::Leading => &self.leading,
            Edge::Trailing => &self.trailing,
        }
    }
}

/// Receives crown notifications. Every hook defaults to a no-op.
pub trait CrownListener {
    /// A pan on the indicator started.
    fn spin_began(&mut self) {}

    /// A pan on the indicator ended or was cancelled.
    fn spin_ended(&mut self) {}

    /// A gesture update is about to change progress (still the old value).
    fn will_update(&mut self, progress: f64) {
        let _ = progress;
    }

    /// A gesture update changed progress.
    fn did_update(&mut self, progress: f64) {
        let _ = progress;
    }

    /// A gesture brought the indicator onto the leading edge.
    fn leading_edge_reached(&mut self, feedback: &EdgeFeedback) {
        let _ = feedback;
    }

    /// A gesture brought the indicator onto the trailing edge.
    fn trailing_edge_reached(&mut self, feedback: &EdgeFeedback) {
        let _ = feedback;
    }

    /// The indicator center moved (surface-local coordinates).
    fn indicator_moved(&mut self, center: Point) {
        let _ = center;
    }

    /// Pans now drive a different subject.
    fn pan_subject_changed(&mut self, subject: PanSubject) {
        let _ = subject;
    }

    /// The crown body was relocated.
    fn surface_moved(&mut self, relocation: SurfaceMove) {
        let _ = relocation;
    }

    /// The crown body's force-touch scale changed.
    fn surface_scaled(&mut self, scale: SurfaceScale) {
        let _ = scale;
    }
}

impl CrownListener for () {}

impl<L: CrownListener + ?Sized> CrownListener for &mut L {
    fn spin_began(&mut self) {
        (**self).spin_began();
    }

    fn spin_ended(&mut self) {
        (**self).spin_ended();
    }

    fn will_update(&mut self, progress: f64) {
        (**self).will_update(progress);
    }

    fn did_update(&mut self, progress: f64) {
        (**self).did_update(progress);
    }

    fn leading_edge_reached(&mut self, feedback: &EdgeFeedback) {
        (**self).leading_edge_reached(feedback);
    }

    fn trailing_edge_reached(&mut self, feedback: &EdgeFeedback) {
        (**self).trailing_edge_reached(feedback);
    }

    fn indicator_moved(&mut self, center: Point) {
        (**self).indicator_moved(center);
    }

    fn pan_subject_changed(&mut self, subject: PanSubject) {
        (**self).pan_subject_changed(subject);
    }

    fn surface_moved(&mut self, relocation: SurfaceMove) {
        (**self).surface_moved(relocation);
    }

    fn surface_scaled(&mut self, scale: SurfaceScale) {
        (**self).surface_scaled(scale);
    }
}

/// A recorded [`CrownListener`] hook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrownEvent {
    /// See [`CrownListener::spin_began`].
    SpinBegan,
    /// See [`CrownListener::spin_ended`].
    SpinEnded,
    /// See [`CrownListener::will_update`].
    WillUpdate {
        /// Progress before the update.
        progress: f64,
    },
    /// See [`CrownListener::did_update`].
    DidUpdate {
        /// Progress after the update.
        progress: f64,
    },
    /// See [`CrownListener::leading_edge_reached`] and
    /// [`CrownListener::trailing_edge_reached`].
    EdgeReached {
        /// Which edge.
        edge: Edge,
        /// The configured feedback for it.
        feedback: EdgeFeedback,
    },
    /// See [`CrownListener::indicator_moved`].
    IndicatorMoved {
        /// New indicator center.
        center: Point,
    },
    /// See [`CrownListener::pan_subject_changed`].
    PanSubjectChanged(PanSubject),
    /// See [`CrownListener::surface_moved`].
    SurfaceMoved(SurfaceMove),
    /// See [`CrownListener::surface_scaled`].
    SurfaceScaled(SurfaceScale),
}

/// A listener that records every notification in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<CrownEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[CrownEvent] {
        &self.events
    }

    /// Drains the recorded events.
    pub fn take(&mut self) -> Vec<CrownEvent> {
        core::mem::take(&mut self.events)
    }

    /// Forgets all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Edges reached so far, in order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.events.iter().filter_map(|e| match e {
            CrownEvent::EdgeReached { edge, .. } => Some(*edge),
            _ => None,
        })
    }
}

impl CrownListener for EventLog {
    fn spin_began(&mut self) {
        self.events.push(CrownEvent::SpinBegan);
    }

    fn spin_ended(&mut self) {
        self.events.push(CrownEvent::SpinEnded);
    }

    fn will_update(&mut self, progress: f64) {
        self.events.push(CrownEvent::WillUpdate { progress });
    }

    fn did_update(&mut self, progress: f64) {
        self.events.push(CrownEvent::DidUpdate { progress });
    }

    fn leading_edge_reached(&mut self, feedback: &EdgeFeedback) {
        self.events.push(CrownEvent::EdgeReached {
            edge: Edge::Leading,
            feedback: *feedback,
        });
    }

    fn trailing_edge_reached(&mut self, feedback: &EdgeFeedback) {
        self.events.push(CrownEvent::EdgeReached {
            edge: Edge::Trailing,
            feedback: *feedback,
        });
    }

    fn indicator_moved(&mut self, center: Point) {
        self.events.push(CrownEvent::IndicatorMoved { center });
    }

    fn pan_subject_changed(&mut self, subject: PanSubject) {
        self.events.push(CrownEvent::PanSubjectChanged(subject));
    }

    fn surface_moved(&mut self, relocation: SurfaceMove) {
        self.events.push(CrownEvent::SurfaceMoved(relocation));
    }

    fn surface_scaled(&mut self, scale: SurfaceScale) {
        self.events.push(CrownEvent::SurfaceScaled(scale));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn default_edge_feedback_matches_stock_crown() {
        let feedback = EdgeFeedback::default();
        assert_eq!(feedback.impact_haptic, ImpactHaptic::Heavy);
        assert!(matches!(
            feedback.background_flash,
            Flash::Active { fade_duration, .. } if fade_duration == Duration::from_millis(150)
        ));
        assert_eq!(feedback.foreground_flash, Flash::None);
    }

    #[test]
    fn impact_haptic_validity() {
        assert!(ImpactHaptic::Light.is_valid());
        assert!(ImpactHaptic::Medium.is_valid());
        assert!(ImpactHaptic::Heavy.is_valid());
        assert!(!ImpactHaptic::None.is_valid());
    }

    #[test]
    fn feedback_for_edge() {
        let feedback = Feedback {
            leading: EdgeFeedback {
                impact_haptic: ImpactHaptic::Light,
                ..EdgeFeedback::default()
            },
            trailing: EdgeFeedback::default(),
        };
        assert_eq!(
            feedback.for_edge(Edge::Leading).impact_haptic,
            ImpactHaptic::Light
        );
        assert_eq!(
            feedback.for_edge(Edge::Trailing).impact_haptic,
            ImpactHaptic::Heavy
        );
    }

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        let feedback = EdgeFeedback::default();
        log.spin_began();
        log.will_update(0.0);
        log.did_update(1.0);
        log.trailing_edge_reached(&feedback);
        log.spin_ended();

        assert_eq!(log.edges().collect::<Vec<_>>(), vec![Edge::Trailing]);
        assert_eq!(
            log.events(),
            &[
                CrownEvent::SpinBegan,
                CrownEvent::WillUpdate { progress: 0.0 },
                CrownEvent::DidUpdate { progress: 1.0 },
                CrownEvent::EdgeReached {
                    edge: Edge::Trailing,
                    feedback
                },
                CrownEvent::SpinEnded,
            ]
        );

        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn mutable_reference_forwards() {
        fn drive(mut listener: impl CrownListener) {
            listener.spin_began();
            listener.pan_subject_changed(PanSubject::ControlBody);
        }

        let mut log = EventLog::new();
        drive(&mut log);
        drive(());
        assert_eq!(
            log.events(),
            &[
                CrownEvent::SpinBegan,
                CrownEvent::PanSubjectChanged(PanSubject::ControlBody)
            ]
        );
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The crown interaction state machine.
//!
//! [`CrownController`] owns the indicator angle, the derived progress, and the
//! current [`PanSubject`]. Platform gesture recognizers feed it
//! [`GesturePhase`]s; it updates the bound [`ScrollTarget`] and reports
//! everything a renderer needs through its [`CrownListener`].
//!
//! ## Usage
//!
//! 1) Build a [`CrownConfig`] and hand it, a scroll target and a listener to
//!    [`CrownController::new`].
//! 2) Lay the crown out with [`CrownController::place`] and
//!    [`CrownController::set_container`].
//! 3) Forward gestures: [`CrownController::pan`], [`CrownController::long_press`],
//!    [`CrownController::force`], [`CrownController::single_tap`] and
//!    [`CrownController::double_tap`]; or wrap them in a [`CrownInput`] and call
//!    [`CrownController::handle`].
//! 4) Whenever the scroll view moves on its own (user scrolling, tap actions),
//!    call [`CrownController::spin_to_match_scroll`].
//!
//! ## Synchronization
//!
//! A pan pushes progress into the scroll target. Hosts typically observe the
//! scroll view and answer every offset change with
//! [`CrownController::spin_to_match_scroll`]. While a pan update is being
//! applied, external spins are ignored, so an observer that fires
//! synchronously from inside [`ScrollTarget::set_offset`] cannot fight the
//! gesture. Outside of that window the round trip is a fixed point: the offset
//! written for a progress converts back to the same progress.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_crown::{
//!     CrownConfig, CrownController, EventLog, GesturePhase, PanDelta, ScrollAxis,
//!     ScrollState, ScrollTarget,
//! };
//!
//! let scroll = ScrollState::new(Size::new(320.0, 1920.0), Size::new(320.0, 640.0));
//! let config = CrownConfig::new(ScrollAxis::Vertical).with_scroll_relation(3.0);
//! let mut crown = CrownController::new(config, scroll, EventLog::new());
//!
//! crown.pan(GesturePhase::Start);
//! crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, 15.0))));
//! crown.pan(GesturePhase::End);
//!
//! assert!(crown.progress() > 0.0);
//! assert!(crown.scroll().offset(ScrollAxis::Vertical) > 0.0);
//! ```

use kurbo::{Affine, Point, Rect, Vec2};
use log::{debug, trace, warn};

use crate::angle::{AngleRange, angle_delta, position_on_circle};
use crate::config::{CrownConfig, ScrollAxis, TapAction};
use crate::feedback::{CrownListener, Edge};
use crate::scroll::{self, ScrollTarget};
use crate::surface::{Animation, CrownSurface, SurfaceScale};

/// What a pan gesture drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum PanSubject {
    /// Pans spin the indicator.
    #[default]
    Indicator,
    /// Pans relocate the crown body.
    ControlBody,
}

impl PanSubject {
    /// Opacity hint for the crown body while this subject is active.
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Indicator => 1.0,
            Self::ControlBody => 0.8,
        }
    }
}

/// Lifecycle of a continuous gesture. Cancellation is reported as `End`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase<T> {
    /// The gesture was recognized.
    Start,
    /// The gesture moved.
    Progress(T),
    /// The gesture finished or was cancelled.
    End,
}

/// One pan update.
///
/// `translation` is the movement since the previous update (hosts reset the
/// recognizer's translation after each event), in the container's coordinate
/// space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanDelta {
    /// Movement since the previous update.
    pub translation: Vec2,
    /// Gesture velocity; only its sign per axis is used.
    pub velocity: Vec2,
}

impl PanDelta {
    /// A delta whose velocity points along the translation.
    #[must_use]
    pub fn new(translation: Vec2) -> Self {
        Self {
            translation,
            velocity: translation,
        }
    }

    /// Replaces the velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Every input the controller understands, for hosts that queue events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrownInput {
    /// See [`CrownController::pan`].
    Pan(GesturePhase<PanDelta>),
    /// See [`CrownController::long_press`].
    LongPress(GesturePhase<Point>),
    /// See [`CrownController::force`].
    Force {
        /// Current touch force.
        force: f64,
        /// Maximum force the hardware reports.
        max_force: f64,
    },
    /// See [`CrownController::single_tap`].
    SingleTap,
    /// See [`CrownController::double_tap`].
    DoubleTap,
    /// See [`CrownController::spin_to`].
    SpinTo(f64),
    /// See [`CrownController::spin_to_match_scroll`].
    ScrollChanged,
    /// See [`CrownController::set_container`].
    ContainerChanged(Option<Rect>),
}

/// The crown interaction state machine.
///
/// `S` is the scroll view the crown drives and `L` receives notifications.
/// Both are owned; pass `&mut` references to keep ownership on the host side.
#[derive(Debug)]
pub struct CrownController<S, L> {
    config: CrownConfig,
    range: AngleRange,
    scroll: S,
    listener: L,
    surface: CrownSurface,
    progress: f64,
    current_angle: f64,
    previous_angle: f64,
    pan_subject: PanSubject,
    spinning: bool,
    scale: f64,
    force_touch_capable: bool,
    // Set while a pan update is pushing progress into the scroll target.
    updating: bool,
    // Set once a gesture update clamped the angle onto an edge; the edge lock
    // only applies while it holds.
    edge_pinned: bool,
}

impl<S: ScrollTarget, L: CrownListener> CrownController<S, L> {
    /// Creates a controller resting at the anchor with progress `0`.
    ///
    /// The configuration is trusted; see [`CrownConfig::validate`].
    pub fn new(config: CrownConfig, scroll: S, listener: L) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid crown configuration: {:?}",
            config.validate()
        );
        let range = config.angle_range();
        let surface = CrownSurface::new(
            config.sizes.background_diameter,
            config.sizes.superview_insets,
        );
        Self {
            range,
            scroll,
            listener,
            surface,
            progress: 0.0,
            current_angle: range.start(),
            previous_angle: range.start(),
            pan_subject: PanSubject::Indicator,
            spinning: false,
            scale: 1.0,
            force_touch_capable: true,
            updating: false,
            edge_pinned: false,
            config,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CrownConfig {
        &self.config
    }

    /// The indicator's travel.
    #[must_use]
    pub fn angle_range(&self) -> AngleRange {
        self.range
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The indicator angle.
    #[must_use]
    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    /// The indicator angle at the end of the last update.
    #[must_use]
    pub fn previous_angle(&self) -> f64 {
        self.previous_angle
    }

    /// What pans currently drive.
    #[must_use]
    pub fn pan_subject(&self) -> PanSubject {
        self.pan_subject
    }

    /// Returns `true` between an indicator pan's start and end.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// The last force-touch scale of the crown body, `1.0` at rest.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// The crown body's frame and bounds.
    #[must_use]
    pub fn surface(&self) -> &CrownSurface {
        &self.surface
    }

    /// The bound scroll target.
    #[must_use]
    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    /// Mutable access to the bound scroll target.
    ///
    /// Call [`Self::spin_to_match_scroll`] after changing the offset.
    pub fn scroll_mut(&mut self) -> &mut S {
        &mut self.scroll
    }

    /// The listener.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Releases the scroll target and the listener.
    pub fn into_parts(self) -> (S, L) {
        (self.scroll, self.listener)
    }

    /// Whether the device reports force-touch hardware. Defaults to `true`.
    #[must_use]
    pub fn is_force_touch_capable(&self) -> bool {
        self.force_touch_capable
    }

    /// Records the device's force-touch capability.
    pub fn set_force_touch_capable(&mut self, capable: bool) {
        self.force_touch_capable = capable;
    }

    /// Returns `true` if force input is honored: the hardware supports it and
    /// the relocation policy prefers it.
    #[must_use]
    pub fn is_force_touch_available(&self) -> bool {
        self.force_touch_capable && self.config.user_interaction.reposition_gesture.is_force_touch()
    }

    /// Returns `true` if long presses relocate the crown body.
    #[must_use]
    pub fn should_long_press_apply(&self) -> bool {
        !self.is_force_touch_available()
            && self.config.user_interaction.reposition_gesture.is_long_press()
    }

    /// Returns `true` if the content overflows the viewport along the
    /// configured axis.
    #[must_use]
    pub fn is_able_to_spin(&self) -> bool {
        self.scroll.can_scroll(self.config.scroll_axis)
    }

    /// Returns `true` if the last update brought the indicator onto the
    /// leading edge.
    #[must_use]
    pub fn has_reached_leading_edge(&self) -> bool {
        self.current_angle - self.range.start() == 0.0 && self.previous_angle != self.current_angle
    }

    /// Returns `true` if the last update brought the indicator onto the
    /// trailing edge.
    #[must_use]
    pub fn has_reached_trailing_edge(&self) -> bool {
        self.current_angle == self.range.end() && self.previous_angle != self.current_angle
    }

    /// Center of the indicator in surface-local coordinates.
    #[must_use]
    pub fn indicator_center(&self) -> Point {
        let sizes = &self.config.sizes;
        position_on_circle(
            sizes.crown_center(),
            sizes.indicator_radius(),
            self.current_angle,
        )
    }

    /// Places the crown body at `center` in container coordinates. This is
    /// also where it returns to when a container change leaves it out of
    /// bounds.
    pub fn place(&mut self, center: Point) {
        self.surface.set_center(center);
    }

    /// Reports new container bounds, for example after a rotation.
    ///
    /// Re-spins the indicator to the current progress and sends the crown body
    /// home along any axis on which it no longer fits.
    pub fn set_container(&mut self, container: Option<Rect>) {
        self.surface.set_container(container);
        if let Some(relocation) = self.surface.normalize() {
            debug!("crown body out of bounds, returning to {:?}", relocation.to);
            self.listener.surface_moved(relocation);
        }
        self.spin_to(self.progress);
    }

    /// Dispatches a queued input.
    pub fn handle(&mut self, input: CrownInput) {
        match input {
            CrownInput::Pan(phase) => self.pan(phase),
            CrownInput::LongPress(phase) => self.long_press(phase),
            CrownInput::Force { force, max_force } => self.force(force, max_force),
            CrownInput::SingleTap => self.single_tap(),
            CrownInput::DoubleTap => self.double_tap(),
            CrownInput::SpinTo(progress) => self.spin_to(progress),
            CrownInput::ScrollChanged => self.spin_to_match_scroll(),
            CrownInput::ContainerChanged(container) => self.set_container(container),
        }
    }

    /// Feeds a pan gesture.
    ///
    /// With the indicator as subject, progress updates spin it (only if the
    /// content can scroll). With the crown body as subject and the force-touch
    /// policy selected, progress updates drag the body within its bounds.
    /// An `End` without a matching indicator `Start` is ignored.
    pub fn pan(&mut self, phase: GesturePhase<PanDelta>) {
        match (self.pan_subject, phase) {
            (PanSubject::Indicator, GesturePhase::Start) => {
                self.spinning = true;
                self.listener.spin_began();
            }
            (PanSubject::Indicator, GesturePhase::Progress(delta)) => {
                if self.is_able_to_spin() {
                    self.spin_by(delta.translation);
                } else {
                    trace!("crown cannot spin, content fits the viewport");
                }
            }
            (PanSubject::ControlBody, GesturePhase::Progress(delta)) => {
                if !self.config.user_interaction.reposition_gesture.is_force_touch() {
                    return;
                }
                if let Some(relocation) = self.surface.translate(delta.translation, delta.velocity)
                {
                    trace!("crown body dragged to {:?}", relocation.to);
                    self.listener.surface_moved(relocation);
                }
            }
            (_, GesturePhase::End) => {
                if self.spinning {
                    self.spinning = false;
                    self.listener.spin_ended();
                }
            }
            (PanSubject::ControlBody, GesturePhase::Start) => {}
        }
    }

    fn spin_by(&mut self, translation: Vec2) {
        self.updating = true;
        self.listener.will_update(self.progress);

        let local = self
            .config
            .spin_direction
            .localize(self.config.anchor_position, translation);
        let center = self.config.sizes.crown_center();
        let from = self.indicator_center() - center;
        let unclamped = self.current_angle + angle_delta(from, from + local);
        let candidate = self.range.clamp(unclamped);
        let next = if self.edge_pinned && self.config.edge_lock.is_enabled() {
            self.config.edge_lock.resolve(
                self.range,
                self.previous_angle,
                self.current_angle,
                candidate,
            )
        } else {
            candidate
        };
        // A suppressed update keeps the indicator pinned on its edge.
        self.edge_pinned = next != candidate || unclamped != candidate;
        self.current_angle = next;
        self.listener.indicator_moved(self.indicator_center());

        self.progress = self
            .range
            .progress_of(self.current_angle)
            .clamp(0.0, 1.0);
        scroll::apply_progress(&mut self.scroll, self.config.scroll_axis, self.progress);
        trace!(
            "crown angle {} progress {}",
            self.current_angle, self.progress
        );
        self.listener.did_update(self.progress);

        if self.has_reached_leading_edge() {
            debug!("crown reached leading edge");
            self.listener
                .leading_edge_reached(self.config.feedback.for_edge(Edge::Leading));
        } else if self.has_reached_trailing_edge() {
            debug!("crown reached trailing edge");
            self.listener
                .trailing_edge_reached(self.config.feedback.for_edge(Edge::Trailing));
        }

        self.previous_angle = self.current_angle;
        self.updating = false;
    }

    /// Feeds a long press. Ignored unless [`Self::should_long_press_apply`].
    ///
    /// `Start` hands pans to the crown body, `Progress` moves the body to the
    /// pressed location when it lies within bounds, and `End` hands pans back
    /// to the indicator.
    pub fn long_press(&mut self, phase: GesturePhase<Point>) {
        if !self.should_long_press_apply() {
            trace!("long press ignored by relocation policy");
            return;
        }
        match phase {
            GesturePhase::Start => self.set_pan_subject(PanSubject::ControlBody),
            GesturePhase::Progress(location) => match self.surface.move_to(location, true) {
                Some(relocation) => {
                    debug!("crown body relocated to {:?}", relocation.to);
                    self.listener.surface_moved(relocation);
                }
                None => trace!("relocation to {location:?} is out of bounds"),
            },
            GesturePhase::End => self.set_pan_subject(PanSubject::Indicator),
        }
    }

    /// Feeds a force reading. Ignored unless [`Self::is_force_touch_available`].
    ///
    /// The reading scales the crown body; crossing the configured thresholds
    /// switches the pan subject. A reading of zero restores the scale with
    /// [`Animation::RESTORE_SPRING`].
    pub fn force(&mut self, force: f64, max_force: f64) {
        if !self.is_force_touch_available() {
            trace!("force ignored, force touch unavailable");
            return;
        }
        let Some(&params) = self.config.user_interaction.reposition_gesture.force_touch() else {
            return;
        };
        if !(force.is_finite() && max_force.is_finite() && max_force > 0.0) {
            warn!("ignoring force reading {force} of {max_force}");
            return;
        }

        let scale = params.scale_for(force, max_force);
        if scale > params.scale_up_threshold {
            self.set_pan_subject(PanSubject::ControlBody);
        } else if scale < params.scale_down_threshold {
            self.set_pan_subject(PanSubject::Indicator);
        }

        self.scale = scale;
        let animation = if force == 0.0 {
            Animation::RESTORE_SPRING
        } else {
            Animation::None
        };
        self.listener.surface_scaled(SurfaceScale {
            scale,
            transform: Affine::scale(scale) * self.config.crown_transform(),
            animation,
        });
    }

    fn set_pan_subject(&mut self, subject: PanSubject) {
        if self.pan_subject == subject {
            return;
        }
        debug!("pan subject {:?} -> {:?}", self.pan_subject, subject);
        self.pan_subject = subject;
        self.listener.pan_subject_changed(subject);
    }

    /// Runs the single-tap binding.
    pub fn single_tap(&mut self) {
        if self.pan_subject != PanSubject::Indicator {
            return;
        }
        run_tap_action(
            &self.config.user_interaction.single_tap,
            &mut self.scroll,
            self.config.scroll_axis,
        );
    }

    /// Runs the double-tap binding.
    pub fn double_tap(&mut self) {
        if self.pan_subject != PanSubject::Indicator {
            return;
        }
        run_tap_action(
            &self.config.user_interaction.double_tap,
            &mut self.scroll,
            self.config.scroll_axis,
        );
    }

    /// Runs an arbitrary tap action, under the same rules as the bound taps.
    ///
    /// Tap actions only move the scroll target. Follow up with
    /// [`Self::spin_to_match_scroll`] once the scroll view settles.
    pub fn perform_tap_action(&mut self, action: &TapAction) {
        if self.pan_subject != PanSubject::Indicator {
            return;
        }
        run_tap_action(action, &mut self.scroll, self.config.scroll_axis);
    }

    /// Spins the indicator to `progress` without edge feedback.
    ///
    /// An externally driven spin never engages the edge lock, even when it
    /// lands on an edge. Ignored while a pan update is in flight and for non-finite input.
    /// Progress is clamped to `[0, 1]`.
    pub fn spin_to(&mut self, progress: f64) {
        if self.updating {
            trace!("spin_to({progress}) ignored during a pan update");
            return;
        }
        if !progress.is_finite() {
            warn!("ignoring non-finite crown progress {progress}");
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
        self.current_angle = self.range.angle_at(self.progress);
        self.edge_pinned = false;
        self.listener.indicator_moved(self.indicator_center());
        self.previous_angle = self.current_angle;
    }

    /// Spins the indicator to match the scroll target's offset.
    pub fn spin_to_match_scroll(&mut self) {
        let progress = scroll::progress_of(&self.scroll, self.config.scroll_axis);
        self.spin_to(progress);
    }
}

fn run_tap_action<S: ScrollTarget>(action: &TapAction, target: &mut S, axis: ScrollAxis) {
    if !action.is_interactable() {
        trace!("tap not bound");
        return;
    }
    trace!("tap action {action:?}");
    match *action {
        TapAction::None => {}
        TapAction::ScrollForward { offset, animated } => {
            scroll::scroll_forward(target, axis, offset, animated);
        }
        TapAction::ScrollBackward { offset, animated } => {
            scroll::scroll_backward(target, axis, offset, animated);
        }
        TapAction::ScrollToLeadingEdge { animated } => {
            scroll::scroll_to_leading_edge(target, axis, animated);
        }
        TapAction::ScrollToTrailingEdge { animated } => {
            scroll::scroll_to_trailing_edge(target, axis, animated);
        }
        TapAction::ScrollToLeadingPage { animated } => {
            scroll::scroll_to_leading_page(target, axis, animated);
        }
        TapAction::ScrollToTrailingPage { animated } => {
            scroll::scroll_to_trailing_page(target, axis, animated);
        }
        TapAction::Custom(ref custom) => custom.invoke(),
    }
}

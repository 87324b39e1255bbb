// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance crown configuration.
//!
//! A [`CrownConfig`] is built once by the owning screen and handed to
//! [`CrownController::new`](crate::CrownController::new). Every field has the
//! stock crown's default, so the usual pattern is to start from
//! [`CrownConfig::new`] and override a few things:
//!
//! ```
//! use understory_crown::{AnchorPosition, CrownConfig, ScrollAxis, TapAction};
//!
//! let config = CrownConfig::new(ScrollAxis::Vertical)
//!     .with_anchor_position(AnchorPosition::Top)
//!     .with_scroll_relation(3.0)
//!     .with_single_tap(TapAction::ScrollForward {
//!         offset: 44.0,
//!         animated: true,
//!     });
//! assert!(config.validate().is_ok());
//! ```
//!
//! Configuration is trusted: the controller assumes a valid configuration and
//! does not re-check it. Hosts that load configuration from data should call
//! [`CrownConfig::validate`] first.

use alloc::rc::Rc;
use core::f64::consts::PI;
use core::fmt;
use core::time::Duration;

use kurbo::{Affine, Insets, Point, Size, Vec2};

use crate::angle::{AnchorPosition, AngleRange, EdgeLock, SpinDirection};
use crate::feedback::Feedback;

/// The scroll axis the crown is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    /// Scroll along `y`.
    #[default]
    Vertical,
    /// Scroll along `x`.
    Horizontal,
}

impl ScrollAxis {
    /// The extent of `size` along this axis.
    #[must_use]
    pub fn extent_of(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// The component of `v` along this axis.
    #[must_use]
    pub fn component_of(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// `v` with its component along this axis replaced by `value`.
    #[must_use]
    pub fn with_component(self, v: Vec2, value: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(v.x, value),
            Self::Horizontal => Vec2::new(value, v.y),
        }
    }
}

/// Sizes and the scroll relation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sizes {
    /// Edge length of the crown surface.
    pub background_diameter: f64,
    /// Indicator diameter relative to the surface, in `(0, 1)`.
    pub foreground_edge_ratio: f64,
    /// Full indicator turns spanning the whole scrollable range.
    ///
    /// Must be positive and finite.
    pub scroll_relation: f64,
    /// Insets applied to the container when relocating the crown.
    pub superview_insets: Insets,
}

impl Default for Sizes {
    fn default() -> Self {
        Self {
            background_diameter: 65.0,
            foreground_edge_ratio: 0.3,
            scroll_relation: 8.0,
            superview_insets: Insets::ZERO,
        }
    }
}

impl Sizes {
    /// Total indicator travel: `2π × scroll_relation`.
    #[must_use]
    pub fn max_angle(&self) -> f64 {
        2.0 * PI * self.scroll_relation
    }

    /// Half of [`Self::background_diameter`].
    #[must_use]
    pub fn background_radius(&self) -> f64 {
        self.background_diameter * 0.5
    }

    /// Center of the crown in surface-local coordinates.
    #[must_use]
    pub fn crown_center(&self) -> Point {
        let r = self.background_radius();
        Point::new(r, r)
    }

    /// Edge length of the indicator.
    #[must_use]
    pub fn foreground_diameter(&self) -> f64 {
        self.background_diameter * self.foreground_edge_ratio
    }

    /// Diameter of the circle the indicator center travels on.
    #[must_use]
    pub fn inner_circle_diameter(&self) -> f64 {
        self.background_diameter - self.foreground_diameter()
    }

    /// Radius of the indicator's orbit.
    #[must_use]
    pub fn indicator_radius(&self) -> f64 {
        self.inner_circle_diameter() * 0.5
    }

    /// The crown surface as a square size.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        Size::new(self.background_diameter, self.background_diameter)
    }
}

/// Force-touch parameters for entering relocation.
///
/// Force maps linearly onto a scale between `1.0` (no force) and
/// `max_scale` (maximum force). Crossing `scale_up_threshold` starts
/// relocation; dropping below `scale_down_threshold` ends it. The gap between
/// the two thresholds is a hysteresis band.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForceTouch {
    /// Scale at maximum force.
    pub max_scale: f64,
    /// Scale above which the crown body becomes the pan subject.
    pub scale_up_threshold: f64,
    /// Scale below which the indicator becomes the pan subject again.
    pub scale_down_threshold: f64,
}

impl Default for ForceTouch {
    fn default() -> Self {
        Self {
            max_scale: 1.5,
            scale_up_threshold: 1.25,
            scale_down_threshold: 1.05,
        }
    }
}

impl ForceTouch {
    /// The surface scale for a force reading.
    ///
    /// `max_force` must be positive.
    #[must_use]
    pub fn scale_for(&self, force: f64, max_force: f64) -> f64 {
        (self.max_scale - 1.0) * force / max_force + 1.0
    }
}

/// Long-press parameters for entering relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LongPress {
    /// Hold time before the press is recognized. Measured by the platform
    /// recognizer, not by the controller.
    pub minimal_duration: Duration,
}

impl Default for LongPress {
    fn default() -> Self {
        Self {
            minimal_duration: Duration::from_millis(500),
        }
    }
}

/// The gesture that lets the user relocate the crown body.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepositionGesture {
    /// The crown cannot be relocated.
    Disabled,
    /// Hold, then drag.
    LongPress(LongPress),
    /// Press hard, then drag. Only honored on force-capable hardware.
    PrefersForceTouch(ForceTouch),
}

impl Default for RepositionGesture {
    fn default() -> Self {
        Self::PrefersForceTouch(ForceTouch::default())
    }
}

impl RepositionGesture {
    /// Returns `true` for [`RepositionGesture::PrefersForceTouch`].
    #[must_use]
    pub fn is_force_touch(&self) -> bool {
        matches!(self, Self::PrefersForceTouch(_))
    }

    /// Returns `true` for [`RepositionGesture::LongPress`].
    #[must_use]
    pub fn is_long_press(&self) -> bool {
        matches!(self, Self::LongPress(_))
    }

    /// The force-touch parameters, if that policy is selected.
    #[must_use]
    pub fn force_touch(&self) -> Option<&ForceTouch> {
        match self {
            Self::PrefersForceTouch(force) => Some(force),
            _ => None,
        }
    }

    /// The long-press hold time, if that policy is selected.
    #[must_use]
    pub fn long_press_duration(&self) -> Option<Duration> {
        match self {
            Self::LongPress(press) => Some(press.minimal_duration),
            _ => None,
        }
    }
}

/// An application callback bound to a tap.
#[derive(Clone)]
pub struct CustomAction(Rc<dyn Fn()>);

impl CustomAction {
    /// Wraps a callback.
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self(Rc::new(action))
    }

    /// Runs the callback.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAction").finish_non_exhaustive()
    }
}

impl PartialEq for CustomAction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// What a tap on the crown does.
///
/// Offsets are along the configured [`ScrollAxis`]. Scrolling actions never
/// touch the indicator directly; the host is expected to feed the resulting
/// scroll position back with
/// [`CrownController::spin_to_match_scroll`](crate::CrownController::spin_to_match_scroll).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TapAction {
    /// Nothing.
    #[default]
    None,
    /// Scroll forward by `offset`, stopping at the trailing edge.
    ScrollForward {
        /// Distance to scroll.
        offset: f64,
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Scroll backward by `offset`, stopping at the leading edge.
    ScrollBackward {
        /// Distance to scroll.
        offset: f64,
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Scroll to the very beginning.
    ScrollToLeadingEdge {
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Scroll to the very end.
    ScrollToTrailingEdge {
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Scroll back by one viewport extent.
    ScrollToLeadingPage {
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Scroll forward by one viewport extent.
    ScrollToTrailingPage {
        /// Whether the scroll should animate.
        animated: bool,
    },
    /// Run an application callback.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomAction),
}

impl TapAction {
    /// Returns `false` only for [`TapAction::None`].
    #[must_use]
    pub fn is_interactable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Tap bindings and the relocation gesture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserInteraction {
    /// Bound to a single tap.
    pub single_tap: TapAction,
    /// Bound to a double tap.
    pub double_tap: TapAction,
    /// How the crown body is relocated.
    pub reposition_gesture: RepositionGesture,
}

impl Default for UserInteraction {
    fn default() -> Self {
        Self {
            single_tap: TapAction::ScrollToTrailingPage { animated: true },
            double_tap: TapAction::ScrollToLeadingEdge { animated: true },
            reposition_gesture: RepositionGesture::default(),
        }
    }
}

/// Reasons a [`CrownConfig`] is unusable.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The scroll relation is zero, negative, or not finite.
    #[error("scroll relation must be positive and finite, got {0}")]
    InvalidScrollRelation(f64),
    /// The surface diameter is zero, negative, or not finite.
    #[error("background diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),
    /// The indicator ratio is outside `(0, 1)`.
    #[error("foreground edge ratio must lie in (0, 1), got {0}")]
    InvalidForegroundRatio(f64),
    /// Force thresholds are not ordered `1 < down <= up < max_scale`.
    #[error(
        "force touch thresholds must satisfy 1 < down <= up < max scale, got down {scale_down_threshold}, up {scale_up_threshold}, max {max_scale}"
    )]
    InvalidForceThresholds {
        /// Configured maximum scale.
        max_scale: f64,
        /// Configured scale-up threshold.
        scale_up_threshold: f64,
        /// Configured scale-down threshold.
        scale_down_threshold: f64,
    },
    /// The edge-lock epsilon is negative or not finite.
    #[error("edge lock epsilon must be non-negative and finite, got {0}")]
    InvalidEdgeLock(f64),
}

/// Everything a crown instance needs to know up front.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrownConfig {
    /// The scroll axis the crown drives.
    pub scroll_axis: ScrollAxis,
    /// Where the indicator rests at progress `0`.
    pub anchor_position: AnchorPosition,
    /// On-screen travel direction.
    pub spin_direction: SpinDirection,
    /// Sizes and scroll relation.
    pub sizes: Sizes,
    /// Taps and relocation.
    pub user_interaction: UserInteraction,
    /// Edge feedback.
    pub feedback: Feedback,
    /// Edge jitter suppression.
    pub edge_lock: EdgeLock,
}

impl CrownConfig {
    /// Stock configuration bound to `scroll_axis`.
    #[must_use]
    pub fn new(scroll_axis: ScrollAxis) -> Self {
        Self {
            scroll_axis,
            ..Self::default()
        }
    }

    /// Sets [`Self::anchor_position`].
    #[must_use]
    pub fn with_anchor_position(mut self, anchor_position: AnchorPosition) -> Self {
        self.anchor_position = anchor_position;
        self
    }

    /// Sets [`Self::spin_direction`].
    #[must_use]
    pub fn with_spin_direction(mut self, spin_direction: SpinDirection) -> Self {
        self.spin_direction = spin_direction;
        self
    }

    /// Sets [`Sizes::scroll_relation`].
    #[must_use]
    pub fn with_scroll_relation(mut self, scroll_relation: f64) -> Self {
        self.sizes.scroll_relation = scroll_relation;
        self
    }

    /// Replaces [`Self::sizes`].
    #[must_use]
    pub fn with_sizes(mut self, sizes: Sizes) -> Self {
        self.sizes = sizes;
        self
    }

    /// Sets [`Sizes::superview_insets`].
    #[must_use]
    pub fn with_superview_insets(mut self, insets: Insets) -> Self {
        self.sizes.superview_insets = insets;
        self
    }

    /// Sets [`UserInteraction::single_tap`].
    #[must_use]
    pub fn with_single_tap(mut self, action: TapAction) -> Self {
        self.user_interaction.single_tap = action;
        self
    }

    /// Sets [`UserInteraction::double_tap`].
    #[must_use]
    pub fn with_double_tap(mut self, action: TapAction) -> Self {
        self.user_interaction.double_tap = action;
        self
    }

    /// Sets [`UserInteraction::reposition_gesture`].
    #[must_use]
    pub fn with_reposition_gesture(mut self, gesture: RepositionGesture) -> Self {
        self.user_interaction.reposition_gesture = gesture;
        self
    }

    /// Replaces [`Self::feedback`].
    #[must_use]
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replaces [`Self::edge_lock`].
    #[must_use]
    pub fn with_edge_lock(mut self, edge_lock: EdgeLock) -> Self {
        self.edge_lock = edge_lock;
        self
    }

    /// The indicator's travel for this configuration.
    #[must_use]
    pub fn angle_range(&self) -> AngleRange {
        AngleRange::new(self.anchor_position.radians(), self.sizes.max_angle())
    }

    /// The resting surface transform (spin-direction mirror).
    #[must_use]
    pub fn crown_transform(&self) -> Affine {
        self.spin_direction.transform(self.anchor_position)
    }

    /// Checks the numeric preconditions the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = &self.sizes;
        if !(sizes.scroll_relation.is_finite() && sizes.scroll_relation > 0.0) {
            return Err(ConfigError::InvalidScrollRelation(sizes.scroll_relation));
        }
        if !(sizes.background_diameter.is_finite() && sizes.background_diameter > 0.0) {
            return Err(ConfigError::InvalidDiameter(sizes.background_diameter));
        }
        if !(sizes.foreground_edge_ratio > 0.0 && sizes.foreground_edge_ratio < 1.0) {
            return Err(ConfigError::InvalidForegroundRatio(
                sizes.foreground_edge_ratio,
            ));
        }
        if let Some(force) = self.user_interaction.reposition_gesture.force_touch() {
            let ordered = 1.0 < force.scale_down_threshold
                && force.scale_down_threshold <= force.scale_up_threshold
                && force.scale_up_threshold < force.max_scale;
            if !ordered {
                return Err(ConfigError::InvalidForceThresholds {
                    max_scale: force.max_scale,
                    scale_up_threshold: force.scale_up_threshold,
                    scale_down_threshold: force.scale_down_threshold,
                });
            }
        }
        if !(self.edge_lock.epsilon.is_finite() && self.edge_lock.epsilon >= 0.0) {
            return Err(ConfigError::InvalidEdgeLock(self.edge_lock.epsilon));
        }
        Ok(())
    }
}

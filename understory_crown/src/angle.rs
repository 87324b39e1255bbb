// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle geometry for the crown indicator.
//!
//! All angles are in radians and measured in view space, where `y` grows
//! downward. Increasing angles therefore sweep clockwise on screen.
//!
//! The indicator lives on an [`AngleRange`] that starts at the anchor angle and
//! spans `2π × scroll_relation`. Unlike a knob, the range is not wrapped: a
//! scroll relation of 8 means the indicator travels eight full turns between
//! the leading and trailing edge of the content.
//!
//! ## Minimal example
//!
//! ```
//! use core::f64::consts::PI;
//! use kurbo::Vec2;
//! use understory_crown::angle::{AngleRange, AnchorPosition, angle_delta};
//!
//! let range = AngleRange::new(AnchorPosition::Right.radians(), 2.0 * PI);
//!
//! // A quarter turn from pointing right to pointing down.
//! let delta = angle_delta(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
//! assert!((delta - PI / 2.0).abs() < 1e-12);
//!
//! // Anything before the anchor clamps to the leading edge.
//! assert_eq!(range.clamp(-1.0), range.start());
//! ```

use core::f64::consts::{FRAC_PI_2, PI};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// The position the indicator points at when progress is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorPosition {
    /// Points to the top of the crown.
    Top,
    /// Points to the bottom of the crown.
    Bottom,
    /// Points to the left of the crown.
    Left,
    /// Points to the right of the crown.
    #[default]
    Right,
}

impl AnchorPosition {
    /// The anchor as an angle in view space.
    #[must_use]
    pub const fn radians(self) -> f64 {
        match self {
            Self::Right => 0.0,
            Self::Bottom => FRAC_PI_2,
            Self::Left => PI,
            Self::Top => PI * 1.5,
        }
    }
}

/// The on-screen direction in which the indicator travels as progress grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpinDirection {
    /// Clockwise.
    #[default]
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

impl SpinDirection {
    /// Returns `true` for [`SpinDirection::Clockwise`].
    #[must_use]
    pub const fn is_clockwise(self) -> bool {
        matches!(self, Self::Clockwise)
    }

    /// The surface transform that realizes this direction for the given anchor.
    ///
    /// The indicator math always runs clockwise. A counter-clockwise crown is a
    /// clockwise crown mirrored across the axis that passes through its anchor,
    /// so the anchor stays put while the travel direction flips. The mirror is
    /// about the surface-local origin; shells apply it about the crown center.
    #[must_use]
    pub fn transform(self, anchor: AnchorPosition) -> Affine {
        match self {
            Self::Clockwise => Affine::IDENTITY,
            Self::CounterClockwise => match anchor {
                AnchorPosition::Top | AnchorPosition::Bottom => {
                    Affine::scale_non_uniform(-1.0, 1.0)
                }
                AnchorPosition::Left | AnchorPosition::Right => {
                    Affine::scale_non_uniform(1.0, -1.0)
                }
            },
        }
    }

    /// Maps a view-space translation into the (possibly mirrored) surface space.
    ///
    /// The mirror is its own inverse, so this applies [`Self::transform`].
    #[must_use]
    pub fn localize(self, anchor: AnchorPosition, translation: Vec2) -> Vec2 {
        if self.is_clockwise() {
            return translation;
        }
        match anchor {
            AnchorPosition::Top | AnchorPosition::Bottom => Vec2::new(-translation.x, translation.y),
            AnchorPosition::Left | AnchorPosition::Right => Vec2::new(translation.x, -translation.y),
        }
    }
}

/// Point at `angle` on the circle of `radius` around `center`.
#[must_use]
pub fn position_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Signed rotation between two vectors sharing the circle's center.
///
/// The raw `atan2` difference jumps by `2π` when a drag crosses the `±π`
/// seam (pointing left). Differences beyond `±1.5π` are folded back by one
/// full turn, which keeps every realistic per-event delta continuous.
#[must_use]
pub fn angle_delta(previous: Vec2, new: Vec2) -> f64 {
    let delta = new.atan2() - previous.atan2();
    if delta > PI * 1.5 {
        delta - PI * 2.0
    } else if delta < -PI * 1.5 {
        delta + PI * 2.0
    } else {
        delta
    }
}

/// Clamps `angle` into `[anchor, anchor + max_angle]`.
#[must_use]
pub fn clamp_angle(angle: f64, anchor: f64, max_angle: f64) -> f64 {
    let end = anchor + max_angle;
    if angle < anchor {
        anchor
    } else if angle > end {
        end
    } else {
        angle
    }
}

/// The closed interval of angles the indicator may occupy.
///
/// `start` is the anchor angle (progress `0`) and `end` is
/// `anchor + max_angle` (progress `1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    start: f64,
    span: f64,
}

impl AngleRange {
    /// Creates the range beginning at `anchor` and spanning `max_angle`.
    ///
    /// `max_angle` is expected to be positive and finite.
    #[must_use]
    pub const fn new(anchor: f64, max_angle: f64) -> Self {
        Self {
            start: anchor,
            span: max_angle,
        }
    }

    /// The leading edge (the anchor angle).
    #[must_use]
    pub const fn start(self) -> f64 {
        self.start
    }

    /// The trailing edge.
    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.span
    }

    /// Total travel between the two edges.
    #[must_use]
    pub const fn span(self) -> f64 {
        self.span
    }

    /// See [`clamp_angle`].
    #[must_use]
    pub fn clamp(self, angle: f64) -> f64 {
        clamp_angle(angle, self.start, self.span)
    }

    /// Returns `true` if `angle` sits exactly on either edge.
    #[must_use]
    pub fn is_endpoint(self, angle: f64) -> bool {
        angle == self.start || angle == self.end()
    }

    /// The angle for a progress value: `progress × span + start`.
    #[must_use]
    pub fn angle_at(self, progress: f64) -> f64 {
        progress * self.span + self.start
    }

    /// The progress for an angle: `(angle − start) / span`.
    #[must_use]
    pub fn progress_of(self, angle: f64) -> f64 {
        (angle - self.start) / self.span
    }
}

/// Jitter suppression for an indicator resting on an edge.
///
/// Once the indicator has been pinned to an edge, a finger wobbling right at
/// the limit would otherwise produce a stream of tiny "leave edge / hit edge"
/// updates, each re-triggering edge feedback. While the previous angle sits on
/// an edge, a change smaller than `epsilon` is dropped; a change of at least
/// `epsilon` is taken as a deliberate move away from the edge.
///
/// The controller only consults the lock after a gesture update clamped the
/// indicator onto an edge. A crown resting at the anchor, or placed on an edge
/// by an external spin, moves freely.
///
/// The default epsilon of `0.05π` is an empirical value rather than a derived
/// one. An epsilon of `0.0` disables the lock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeLock {
    /// Minimum change (in radians) needed to leave an edge.
    pub epsilon: f64,
}

impl EdgeLock {
    /// The default threshold, `0.05π`.
    pub const DEFAULT_EPSILON: f64 = 0.05 * PI;

    /// Creates an edge lock with the given threshold in radians.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// An edge lock that never suppresses anything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { epsilon: 0.0 }
    }

    /// Returns `true` if the lock can suppress updates.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.epsilon > 0.0
    }

    /// Resolves the next indicator angle.
    ///
    /// - `previous` is the angle at the end of the last gesture update.
    /// - `current` is the angle now held by the indicator.
    /// - `candidate` is the already clamped angle proposed by the new event.
    ///
    /// Returns `current` when the update is suppressed, otherwise `candidate`.
    #[must_use]
    pub fn resolve(self, range: AngleRange, previous: f64, current: f64, candidate: f64) -> f64 {
        if range.is_endpoint(previous) && (candidate - previous).abs() < self.epsilon {
            current
        } else {
            candidate
        }
    }
}

impl Default for EdgeLock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use kurbo::{Point, Vec2};

    use super::*;

    #[test]
    fn anchor_radians() {
        assert_eq!(AnchorPosition::Right.radians(), 0.0);
        assert_eq!(AnchorPosition::Bottom.radians(), PI / 2.0);
        assert_eq!(AnchorPosition::Left.radians(), PI);
        assert_eq!(AnchorPosition::Top.radians(), PI * 1.5);
    }

    #[test]
    fn spin_direction_flags() {
        assert!(SpinDirection::Clockwise.is_clockwise());
        assert!(!SpinDirection::CounterClockwise.is_clockwise());
    }

    #[test]
    fn counter_clockwise_mirrors_across_anchor_axis() {
        let t = SpinDirection::CounterClockwise.transform(AnchorPosition::Right);
        // Anchored right: the horizontal axis is kept, vertical motion flips.
        assert_eq!(t * Point::new(3.0, 4.0), Point::new(3.0, -4.0));

        let t = SpinDirection::CounterClockwise.transform(AnchorPosition::Top);
        assert_eq!(t * Point::new(3.0, 4.0), Point::new(-3.0, 4.0));

        let v = SpinDirection::CounterClockwise.localize(AnchorPosition::Left, Vec2::new(2.0, 5.0));
        assert_eq!(v, Vec2::new(2.0, -5.0));
        let v = SpinDirection::Clockwise.localize(AnchorPosition::Left, Vec2::new(2.0, 5.0));
        assert_eq!(v, Vec2::new(2.0, 5.0));

        // Localizing agrees with the surface transform.
        let p = Point::new(-7.0, 1.5);
        for anchor in [AnchorPosition::Top, AnchorPosition::Right] {
            let t = SpinDirection::CounterClockwise.transform(anchor);
            let v = SpinDirection::CounterClockwise.localize(anchor, p.to_vec2());
            assert_eq!(v.to_point(), t * p);
        }
    }

    #[test]
    fn position_on_circle_cardinals() {
        let c = Point::new(10.0, 20.0);
        assert_eq!(position_on_circle(c, 5.0, 0.0), Point::new(15.0, 20.0));

        let down = position_on_circle(c, 5.0, FRAC_PI_2);
        assert!((down.x - 10.0).abs() < 1e-12);
        assert!((down.y - 25.0).abs() < 1e-12);

        let left = position_on_circle(c, 5.0, PI);
        assert!((left.x - 5.0).abs() < 1e-12);
        assert!((left.y - 20.0).abs() < 1e-12);
    }

    #[test]
    fn angle_delta_small_steps() {
        let d = angle_delta(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));
        assert!((d - PI / 4.0).abs() < 1e-12);

        let d = angle_delta(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        assert!((d + PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn angle_delta_wraps_across_left_seam() {
        // Just above the seam (y slightly negative) to just below it.
        let above = Vec2::new(-1.0, -0.01);
        let below = Vec2::new(-1.0, 0.01);

        // Raw atan2 difference is close to 2π; the wrap yields a small step.
        // Moving downward on the left side is counter-clockwise on screen.
        let d = angle_delta(above, below);
        assert!(d.abs() < 0.1, "expected a small step, got {d}");
        assert!(d < 0.0, "expected a counter-clockwise step, got {d}");

        let back = angle_delta(below, above);
        assert!((d + back).abs() < 1e-12);
    }

    #[test]
    fn clamp_angle_to_nearer_bound() {
        assert_eq!(clamp_angle(-0.5, 0.0, 2.0 * PI), 0.0);
        assert_eq!(clamp_angle(7.0, 0.0, 2.0 * PI), 2.0 * PI);
        assert_eq!(clamp_angle(1.0, 0.0, 2.0 * PI), 1.0);

        let range = AngleRange::new(PI, PI);
        assert_eq!(range.clamp(0.0), PI);
        assert_eq!(range.clamp(3.0 * PI), 2.0 * PI);
    }

    #[test]
    fn angle_range_progress_mapping() {
        let range = AngleRange::new(FRAC_PI_2, 4.0 * PI);
        assert_eq!(range.angle_at(0.0), FRAC_PI_2);
        assert_eq!(range.angle_at(1.0), range.end());
        assert!((range.progress_of(range.angle_at(0.25)) - 0.25).abs() < 1e-12);
        assert!(range.is_endpoint(range.start()));
        assert!(range.is_endpoint(range.end()));
        assert!(!range.is_endpoint(range.angle_at(0.5)));
    }

    #[test]
    fn edge_lock_suppresses_small_moves_off_an_edge() {
        let range = AngleRange::new(0.0, 2.0 * PI);
        let lock = EdgeLock::default();

        let small = 0.04 * PI;
        assert_eq!(lock.resolve(range, 0.0, 0.0, small), 0.0);

        let large = 0.05 * PI;
        assert_eq!(lock.resolve(range, 0.0, 0.0, large), large);

        let end = range.end();
        assert_eq!(lock.resolve(range, end, end, end - small), end);
        assert_eq!(lock.resolve(range, end, end, end - 0.1 * PI), end - 0.1 * PI);
    }

    #[test]
    fn edge_lock_ignores_interior_moves() {
        let range = AngleRange::new(0.0, 2.0 * PI);
        let lock = EdgeLock::default();
        assert_eq!(lock.resolve(range, 1.0, 1.0, 1.01), 1.01);
    }

    #[test]
    fn disabled_edge_lock_passes_everything() {
        let range = AngleRange::new(0.0, 2.0 * PI);
        let lock = EdgeLock::disabled();
        assert!(!lock.is_enabled());
        assert_eq!(lock.resolve(range, 0.0, 0.0, 0.001), 0.001);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The crown body: its frame inside a container and how it may be relocated.
//!
//! The surface is a square of `diameter` centered on [`CrownSurface::center`],
//! expressed in the container's coordinate space. Hosts report the container
//! bounds (for example the superview's bounds) with
//! [`CrownSurface::set_container`]; relocation is restricted to those bounds
//! shrunk by the configured insets.
//!
//! Nothing here animates. Moves are returned as [`SurfaceMove`] values that
//! carry an [`Animation`] hint for the rendering shell.

use core::time::Duration;

use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};

/// Displacements at or below this distance snap instead of animating.
pub const RELOCATION_SNAP_DISTANCE: f64 = 1.0;

/// Duration of an animated relocation.
pub const RELOCATION_DURATION: Duration = Duration::from_millis(100);

/// How a rendering shell should apply a geometry change.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Animation {
    /// Apply immediately.
    #[default]
    None,
    /// Interpolate over `duration`.
    Linear {
        /// Length of the transition.
        duration: Duration,
    },
    /// Spring back with the given damping ratio.
    Spring {
        /// Length of the transition.
        duration: Duration,
        /// Damping ratio in `(0, 1]`.
        damping: f64,
    },
}

impl Animation {
    /// The spring used to restore the surface scale when force is released.
    pub const RESTORE_SPRING: Self = Self::Spring {
        duration: Duration::from_millis(500),
        damping: 0.4,
    };

    /// Returns `true` unless this is [`Animation::None`].
    #[must_use]
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A relocation of the crown body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMove {
    /// Center before the move.
    pub from: Point,
    /// Center after the move.
    pub to: Point,
    /// How to transition between the two.
    pub animation: Animation,
}

/// A change of the crown body's force-touch scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceScale {
    /// Uniform scale factor, `1.0` at rest.
    pub scale: f64,
    /// The full surface transform: spin-direction mirror followed by the scale.
    pub transform: Affine,
    /// How to transition to the new transform.
    pub animation: Animation,
}

/// Frame and relocation bounds of the crown body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrownSurface {
    center: Point,
    home: Point,
    diameter: f64,
    container: Option<Rect>,
    insets: Insets,
}

impl CrownSurface {
    /// Creates a surface of the given diameter centered at the origin, with no
    /// container yet.
    #[must_use]
    pub fn new(diameter: f64, insets: Insets) -> Self {
        Self {
            center: Point::ZERO,
            home: Point::ZERO,
            diameter,
            container: None,
            insets,
        }
    }

    /// Center of the surface in container coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Places the surface without any bounds check.
    ///
    /// This is the initial layout: the location also becomes the home that
    /// [`Self::normalize`] falls back to.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        self.home = center;
    }

    /// The location given to the last [`Self::set_center`].
    #[must_use]
    pub fn home(&self) -> Point {
        self.home
    }

    /// Edge length of the square surface.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// The container bounds, if the surface has been placed in one.
    #[must_use]
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Sets or clears the container bounds.
    pub fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    /// The surface frame in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(self.diameter, self.diameter))
    }

    /// The region the surface may be relocated within: the container shrunk
    /// by the insets, or [`Rect::ZERO`] without a container.
    #[must_use]
    pub fn permitted_bounds(&self) -> Rect {
        match self.container {
            Some(c) => Rect::new(
                c.x0 + self.insets.x0,
                c.y0 + self.insets.y0,
                c.x1 - self.insets.x1,
                c.y1 - self.insets.y1,
            ),
            None => Rect::ZERO,
        }
    }

    /// Whether a horizontal translation keeps the frame inside the permitted
    /// bounds.
    ///
    /// A frame that is already outside may still move back inward: an edge
    /// violation only counts when `velocity` heads further out.
    #[must_use]
    pub fn is_within_horizontal_bounds(&self, translation: f64, velocity: f64) -> bool {
        let bounds = self.permitted_bounds();
        let frame = self.frame();
        (frame.x0 + translation >= bounds.x0 || velocity >= 0.0)
            && (frame.x1 + translation <= bounds.x1 || velocity <= 0.0)
    }

    /// Vertical counterpart of [`Self::is_within_horizontal_bounds`].
    #[must_use]
    pub fn is_within_vertical_bounds(&self, translation: f64, velocity: f64) -> bool {
        let bounds = self.permitted_bounds();
        let frame = self.frame();
        (frame.y0 + translation >= bounds.y0 || velocity >= 0.0)
            && (frame.y1 + translation <= bounds.y1 || velocity <= 0.0)
    }

    /// Moves the center to `location` if it lies inside the permitted bounds.
    ///
    /// The move animates over [`RELOCATION_DURATION`] when `animated` is set
    /// and the displacement exceeds [`RELOCATION_SNAP_DISTANCE`].
    pub fn move_to(&mut self, location: Point, animated: bool) -> Option<SurfaceMove> {
        if !self.permitted_bounds().contains(location) {
            return None;
        }
        let from = self.center;
        let animation = if animated && from.distance(location) > RELOCATION_SNAP_DISTANCE {
            Animation::Linear {
                duration: RELOCATION_DURATION,
            }
        } else {
            Animation::None
        };
        self.center = location;
        Some(SurfaceMove {
            from,
            to: location,
            animation,
        })
    }

    /// Sends the surface home along each axis on which its frame no longer
    /// fits the permitted bounds, for example after the container shrank.
    ///
    /// Returns `None` if the frame fits or there is no container.
    pub fn normalize(&mut self) -> Option<SurfaceMove> {
        self.container?;
        let bounds = self.permitted_bounds();
        let frame = self.frame();
        let mut center = self.center;
        if frame.x0 < bounds.x0 || frame.x1 > bounds.x1 {
            center.x = self.home.x;
        }
        if frame.y0 < bounds.y0 || frame.y1 > bounds.y1 {
            center.y = self.home.y;
        }
        if center == self.center {
            return None;
        }
        let from = self.center;
        self.center = center;
        Some(SurfaceMove {
            from,
            to: center,
            animation: Animation::None,
        })
    }

    /// Drags the surface by `translation`, axis by axis.
    ///
    /// Each axis only moves if [`Self::is_within_horizontal_bounds`] /
    /// [`Self::is_within_vertical_bounds`] allow it. Returns `None` if neither
    /// axis moved.
    pub fn translate(&mut self, translation: Vec2, velocity: Vec2) -> Option<SurfaceMove> {
        let mut delta = Vec2::ZERO;
        if self.is_within_horizontal_bounds(translation.x, velocity.x) {
            delta.x = translation.x;
        }
        if self.is_within_vertical_bounds(translation.y, velocity.y) {
            delta.y = translation.y;
        }
        if delta == Vec2::ZERO {
            return None;
        }
        let from = self.center;
        self.center = from + delta;
        Some(SurfaceMove {
            from,
            to: self.center,
            animation: Animation::None,
        })
    }
}

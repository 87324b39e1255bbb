// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridging between crown progress and a scrollable view.
//!
//! The crown does not own a scroll view. It talks to one through
//! [`ScrollTarget`], which exposes extents and the offset along an axis.
//! The conversions are plain functions so that hosts can also use them
//! without a controller:
//!
//! - [`progress_to_offset`] maps `[0, 1]` onto `[0, content − viewport]`.
//! - [`offset_to_progress`] is its inverse, and yields `0` when the content
//!   fits in the viewport.
//!
//! The remaining helpers implement the tap actions. Every one of them clamps
//! the resulting offset to `[0, max_offset]`.
//!
//! ```
//! use kurbo::Size;
//! use understory_crown::ScrollAxis;
//! use understory_crown::scroll::{ScrollState, ScrollTarget, scroll_to_trailing_page};
//!
//! let mut state = ScrollState::new(Size::new(320.0, 2000.0), Size::new(320.0, 480.0));
//! scroll_to_trailing_page(&mut state, ScrollAxis::Vertical, true);
//! assert_eq!(state.offset(ScrollAxis::Vertical), 480.0);
//! ```

use kurbo::{Size, Vec2};

use crate::config::ScrollAxis;

/// A scrollable view driven by the crown.
pub trait ScrollTarget {
    /// Total content extent along `axis`.
    fn content_extent(&self, axis: ScrollAxis) -> f64;

    /// Visible extent along `axis`.
    fn viewport_extent(&self, axis: ScrollAxis) -> f64;

    /// Current offset along `axis`.
    fn offset(&self, axis: ScrollAxis) -> f64;

    /// Moves the offset along `axis`. Callers pass values already clamped to
    /// `[0, max_offset]`.
    fn set_offset(&mut self, axis: ScrollAxis, offset: f64, animated: bool);

    /// Largest valid offset along `axis`; never negative.
    fn max_offset(&self, axis: ScrollAxis) -> f64 {
        (self.content_extent(axis) - self.viewport_extent(axis)).max(0.0)
    }

    /// Returns `true` if the content is larger than the viewport along `axis`.
    fn can_scroll(&self, axis: ScrollAxis) -> bool {
        self.content_extent(axis) > self.viewport_extent(axis)
    }
}

impl<T: ScrollTarget + ?Sized> ScrollTarget for &mut T {
    fn content_extent(&self, axis: ScrollAxis) -> f64 {
        (**self).content_extent(axis)
    }

    fn viewport_extent(&self, axis: ScrollAxis) -> f64 {
        (**self).viewport_extent(axis)
    }

    fn offset(&self, axis: ScrollAxis) -> f64 {
        (**self).offset(axis)
    }

    fn set_offset(&mut self, axis: ScrollAxis, offset: f64, animated: bool) {
        (**self).set_offset(axis, offset, animated);
    }

    fn max_offset(&self, axis: ScrollAxis) -> f64 {
        (**self).max_offset(axis)
    }

    fn can_scroll(&self, axis: ScrollAxis) -> bool {
        (**self).can_scroll(axis)
    }
}

/// The offset for `progress`, clamped to `[0, max(content − viewport, 0)]`.
#[must_use]
pub fn progress_to_offset(progress: f64, content: f64, viewport: f64) -> f64 {
    let max = (content - viewport).max(0.0);
    (progress * (content - viewport)).clamp(0.0, max)
}

/// The progress for `offset`, or `0` when the content does not exceed the
/// viewport.
#[must_use]
pub fn offset_to_progress(offset: f64, content: f64, viewport: f64) -> f64 {
    if content > viewport {
        offset / (content - viewport)
    } else {
        0.0
    }
}

/// The target's current progress along `axis`.
#[must_use]
pub fn progress_of<S: ScrollTarget + ?Sized>(target: &S, axis: ScrollAxis) -> f64 {
    offset_to_progress(
        target.offset(axis),
        target.content_extent(axis),
        target.viewport_extent(axis),
    )
}

/// Scrolls the target to `progress` without animation and returns the offset.
pub fn apply_progress<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    progress: f64,
) -> f64 {
    let offset = progress_to_offset(
        progress,
        target.content_extent(axis),
        target.viewport_extent(axis),
    );
    target.set_offset(axis, offset, false);
    offset
}

fn scroll_clamped<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    offset: f64,
    animated: bool,
) -> f64 {
    let offset = offset.clamp(0.0, target.max_offset(axis));
    target.set_offset(axis, offset, animated);
    offset
}

/// Scrolls forward by `amount`, stopping at the trailing edge.
pub fn scroll_forward<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    amount: f64,
    animated: bool,
) -> f64 {
    let offset = target.offset(axis) + amount;
    scroll_clamped(target, axis, offset, animated)
}

/// Scrolls backward by `amount`, stopping at the leading edge.
pub fn scroll_backward<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    amount: f64,
    animated: bool,
) -> f64 {
    let offset = target.offset(axis) - amount;
    scroll_clamped(target, axis, offset, animated)
}

/// Scrolls to offset `0`.
pub fn scroll_to_leading_edge<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    animated: bool,
) -> f64 {
    scroll_clamped(target, axis, 0.0, animated)
}

/// Scrolls to the largest offset. Leaves the target alone when the content
/// fits in the viewport.
pub fn scroll_to_trailing_edge<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    animated: bool,
) -> f64 {
    if !target.can_scroll(axis) {
        return target.offset(axis);
    }
    let max = target.max_offset(axis);
    scroll_clamped(target, axis, max, animated)
}

/// Scrolls back by one viewport extent.
pub fn scroll_to_leading_page<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    animated: bool,
) -> f64 {
    let page = target.viewport_extent(axis);
    scroll_backward(target, axis, page, animated)
}

/// Scrolls forward by one viewport extent.
pub fn scroll_to_trailing_page<S: ScrollTarget + ?Sized>(
    target: &mut S,
    axis: ScrollAxis,
    animated: bool,
) -> f64 {
    let page = target.viewport_extent(axis);
    scroll_forward(target, axis, page, animated)
}

/// A headless scroll view.
///
/// Stores sizes and a two-dimensional offset and remembers whether the last
/// offset change asked for animation. Offsets are stored as given; the crown
/// helpers already clamp them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Size of the scrollable content.
    pub content_size: Size,
    /// Size of the visible viewport.
    pub viewport_size: Size,
    /// Current content offset.
    pub offset: Vec2,
    /// The `animated` flag of the last [`ScrollTarget::set_offset`] call.
    pub last_animated: Option<bool>,
}

impl ScrollState {
    /// A scroll view at offset zero.
    #[must_use]
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            content_size,
            viewport_size,
            offset: Vec2::ZERO,
            last_animated: None,
        }
    }

    /// Sets the offset along `axis` as if the user had scrolled there.
    ///
    /// Does not touch [`Self::last_animated`].
    pub fn scroll_to(&mut self, axis: ScrollAxis, offset: f64) {
        self.offset = axis.with_component(self.offset, offset);
    }
}

impl ScrollTarget for ScrollState {
    fn content_extent(&self, axis: ScrollAxis) -> f64 {
        axis.extent_of(self.content_size)
    }

    fn viewport_extent(&self, axis: ScrollAxis) -> f64 {
        axis.extent_of(self.viewport_size)
    }

    fn offset(&self, axis: ScrollAxis) -> f64 {
        axis.component_of(self.offset)
    }

    fn set_offset(&mut self, axis: ScrollAxis, offset: f64, animated: bool) {
        self.offset = axis.with_component(self.offset, offset);
        self.last_animated = Some(animated);
    }
}

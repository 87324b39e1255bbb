// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_crown --heading-base-level=0

//! Understory Crown: a headless rotary "crown" control.
//!
//! A crown is a small circular control, modeled on a smartwatch's digital
//! crown, that mirrors and drives the scroll offset of an associated scroll
//! view. The user spins an indicator around the crown; the indicator's angle
//! maps onto scroll progress, and scrolling the view by other means spins the
//! indicator back into place.
//!
//! This crate is the platform-agnostic core. It owns the geometry and the
//! interaction state machine, and leaves recognizing gestures, rendering,
//! haptics and animation to a host shell.
//!
//! - [`angle`]: anchor angles, the angle delta between two pan positions,
//!   clamping, and the [`EdgeLock`] that keeps an indicator resting on an edge
//!   from jittering.
//! - [`scroll`]: the [`ScrollTarget`] seam plus progress/offset conversions and
//!   the page, edge and offset helpers behind tap actions.
//! - [`controller`]: [`CrownController`], which turns pan, long-press, force
//!   and tap input into angle, progress and scroll updates.
//! - [`feedback`]: the [`CrownListener`] hooks a renderer implements, and the
//!   recording [`EventLog`].
//! - [`surface`]: the crown body's frame and relocation within its container.
//! - [`config`]: [`CrownConfig`] and its validation.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_crown::{
//!     CrownConfig, CrownController, CrownEvent, EventLog, GesturePhase, PanDelta, ScrollAxis,
//!     ScrollState, ScrollTarget,
//! };
//!
//! // A list three screens tall.
//! let scroll = ScrollState::new(Size::new(320.0, 1920.0), Size::new(320.0, 640.0));
//! let config = CrownConfig::new(ScrollAxis::Vertical).with_scroll_relation(3.0);
//! let mut crown = CrownController::new(config, scroll, EventLog::new());
//!
//! // A single tap pages down.
//! crown.single_tap();
//! assert_eq!(crown.scroll().offset(ScrollAxis::Vertical), 640.0);
//!
//! // The host reports the scroll change; the indicator follows.
//! crown.spin_to_match_scroll();
//! assert_eq!(crown.progress(), 0.5);
//!
//! // Spinning the indicator scrolls the list.
//! crown.pan(GesturePhase::Start);
//! crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, -10.0))));
//! crown.pan(GesturePhase::End);
//! assert!(crown.listener().events().contains(&CrownEvent::SpinEnded));
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `serde`: serialize and deserialize configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod angle;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod scroll;
pub mod surface;

pub use angle::{AnchorPosition, AngleRange, EdgeLock, SpinDirection};
pub use config::{
    ConfigError, CrownConfig, CustomAction, ForceTouch, LongPress, RepositionGesture, ScrollAxis,
    Sizes, TapAction, UserInteraction,
};
pub use controller::{CrownController, CrownInput, GesturePhase, PanDelta, PanSubject};
pub use feedback::{
    CrownEvent, CrownListener, Edge, EdgeFeedback, EventLog, Feedback, Flash, ImpactHaptic,
};
pub use scroll::{ScrollState, ScrollTarget};
pub use surface::{Animation, CrownSurface, SurfaceMove, SurfaceScale};

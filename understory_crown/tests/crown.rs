// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the `understory_crown` crate.
//!
//! Each test sets up a crown the way a phone screen would: a scroll view
//! filling the screen with content three screens tall, and a crown pinned
//! near the bottom trailing corner.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Rect, Size, Vec2};
use understory_crown::scroll::{offset_to_progress, progress_to_offset};
use understory_crown::{
    AnchorPosition, CrownConfig, CrownController, CrownEvent, CrownListener, CustomAction, Edge,
    EdgeFeedback, EdgeLock, EventLog, Feedback, GesturePhase, ImpactHaptic, LongPress, PanDelta,
    PanSubject, RepositionGesture, ScrollAxis, ScrollState, ScrollTarget, TapAction,
};

const SCREEN: Size = Size::new(375.0, 812.0);
const CONTENT_RATIO: f64 = 3.0;
const V: ScrollAxis = ScrollAxis::Vertical;

fn screen_config() -> CrownConfig {
    CrownConfig::new(V)
        .with_scroll_relation(CONTENT_RATIO)
        .with_anchor_position(AnchorPosition::Right)
}

fn screen_scroll() -> ScrollState {
    ScrollState::new(
        Size::new(SCREEN.width, SCREEN.height * CONTENT_RATIO),
        SCREEN,
    )
}

fn screen_crown(config: CrownConfig) -> CrownController<ScrollState, EventLog> {
    let mut crown = CrownController::new(config, screen_scroll(), EventLog::new());
    // Trailing edge 50 in, bottom edge 35 up.
    let radius = crown.config().sizes.background_radius();
    crown.place(Point::new(
        SCREEN.width - 50.0 - radius,
        SCREEN.height - 35.0 - radius,
    ));
    crown.set_container(Some(SCREEN.to_rect()));
    crown.listener_mut().clear();
    crown
}

fn page() -> f64 {
    SCREEN.height
}

fn max_offset() -> f64 {
    SCREEN.height * (CONTENT_RATIO - 1.0)
}

#[test]
fn scrolls_to_the_trailing_edge() {
    let mut crown = screen_crown(screen_config());
    crown.perform_tap_action(&TapAction::ScrollToTrailingEdge { animated: false });
    assert_eq!(crown.scroll().offset(V), max_offset());
    assert_eq!(crown.scroll().last_animated, Some(false));
}

#[test]
fn scrolls_to_the_leading_edge() {
    let mut crown = screen_crown(screen_config());
    crown.scroll_mut().scroll_to(V, 100.0);
    crown.perform_tap_action(&TapAction::ScrollToLeadingEdge { animated: false });
    assert_eq!(crown.scroll().offset(V), 0.0);
}

#[test]
fn scrolls_a_page_forward() {
    let mut crown = screen_crown(screen_config());
    crown.perform_tap_action(&TapAction::ScrollToTrailingPage { animated: false });
    assert_eq!(crown.scroll().offset(V), page());
}

#[test]
fn scrolls_a_page_backward() {
    let mut crown = screen_crown(screen_config());
    crown.scroll_mut().scroll_to(V, max_offset());
    crown.perform_tap_action(&TapAction::ScrollToLeadingPage { animated: false });
    assert_eq!(crown.scroll().offset(V), max_offset() - page());
}

#[test]
fn scrolls_forward_by_a_constant_offset() {
    let mut crown = screen_crown(screen_config());
    crown.perform_tap_action(&TapAction::ScrollForward {
        offset: 10.0,
        animated: false,
    });
    assert_eq!(crown.scroll().offset(V), 10.0);
}

#[test]
fn scrolls_backward_by_a_constant_offset() {
    let mut crown = screen_crown(screen_config());
    crown.scroll_mut().scroll_to(V, 50.0);
    crown.perform_tap_action(&TapAction::ScrollBackward {
        offset: 10.0,
        animated: false,
    });
    assert_eq!(crown.scroll().offset(V), 40.0);
}

#[test]
fn performs_a_custom_action() {
    use std::cell::Cell;
    use std::rc::Rc;

    let performed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&performed);
    let mut crown = screen_crown(screen_config());
    crown.perform_tap_action(&TapAction::Custom(CustomAction::new(move || flag.set(true))));
    assert!(performed.get());
}

#[test]
fn tap_actions_leave_the_indicator_alone_until_synced() {
    let mut crown = screen_crown(screen_config());
    crown.single_tap();
    assert_eq!(crown.progress(), 0.0);
    assert_eq!(crown.current_angle(), 0.0);

    crown.spin_to_match_scroll();
    assert!((crown.progress() - page() / max_offset()).abs() < 1e-12);
}

#[test]
fn able_to_spin_depends_on_overflow() {
    let crown = screen_crown(screen_config());
    assert!(crown.is_able_to_spin());

    let flat = ScrollState::new(SCREEN, SCREEN);
    let crown = CrownController::new(screen_config(), flat, ());
    assert!(!crown.is_able_to_spin());
}

#[test]
fn permitted_bounds_match_the_container() {
    let crown = screen_crown(screen_config());
    assert_eq!(crown.surface().permitted_bounds(), SCREEN.to_rect());

    let inset = CrownController::new(
        screen_config().with_superview_insets(kurbo::Insets::uniform(20.0)),
        screen_scroll(),
        (),
    );
    // No container yet.
    assert_eq!(inset.surface().permitted_bounds(), Rect::ZERO);
}

#[test]
fn surface_location_and_bounds() {
    let mut crown = screen_crown(
        screen_config()
            .with_reposition_gesture(RepositionGesture::LongPress(LongPress::default())),
    );
    let bounds = crown.surface().permitted_bounds();
    let center = bounds.center();
    crown.long_press(GesturePhase::Progress(center));
    assert_eq!(crown.surface().center(), center);
    assert_eq!(
        crown.surface().frame(),
        Rect::from_center_size(center, crown.config().sizes.surface_size())
    );

    let surface = crown.surface();
    assert!(surface.is_within_horizontal_bounds(10.0, 1.0));
    assert!(!surface.is_within_horizontal_bounds(SCREEN.width, 1.0));
    assert!(surface.is_within_vertical_bounds(10.0, 1.0));
    assert!(!surface.is_within_vertical_bounds(SCREEN.height, 1.0));
}

#[test]
fn long_press_toggles_pan_subject() {
    let mut crown = screen_crown(
        screen_config()
            .with_reposition_gesture(RepositionGesture::LongPress(LongPress::default())),
    );
    crown.long_press(GesturePhase::Start);
    assert_eq!(crown.pan_subject(), PanSubject::ControlBody);
    crown.long_press(GesturePhase::End);
    assert_eq!(crown.pan_subject(), PanSubject::Indicator);
    assert_eq!(
        crown.listener().events(),
        &[
            CrownEvent::PanSubjectChanged(PanSubject::ControlBody),
            CrownEvent::PanSubjectChanged(PanSubject::Indicator),
        ]
    );
}

#[test]
fn long_press_outside_bounds_is_rejected() {
    let mut crown = screen_crown(
        screen_config()
            .with_superview_insets(kurbo::Insets::uniform(40.0))
            .with_reposition_gesture(RepositionGesture::LongPress(LongPress::default())),
    );
    let before = crown.surface().center();
    crown.long_press(GesturePhase::Start);
    crown.long_press(GesturePhase::Progress(Point::new(10.0, 10.0)));
    assert_eq!(crown.surface().center(), before);
}

#[test]
fn force_touch_toggles_pan_subject() {
    let mut crown = screen_crown(screen_config());
    let max_force = 10.0;
    let params = *crown
        .config()
        .user_interaction
        .reposition_gesture
        .force_touch()
        .unwrap();
    let inflation = params.scale_up_threshold / params.max_scale * max_force + 0.1;

    crown.force(inflation, max_force);
    assert_eq!(crown.pan_subject(), PanSubject::ControlBody);

    crown.force(0.0, max_force);
    assert_eq!(crown.pan_subject(), PanSubject::Indicator);
}

#[test]
fn pan_start_and_end_leave_the_frame_alone() {
    let mut crown = screen_crown(screen_config());
    let frame = crown.surface().frame();
    crown.pan(GesturePhase::Start);
    assert_eq!(crown.surface().frame(), frame);
    crown.pan(GesturePhase::End);
    assert_eq!(crown.surface().frame(), frame);
}

#[test]
fn pan_left_and_down_from_the_right_anchor() {
    let mut crown = screen_crown(screen_config().with_edge_lock(EdgeLock::disabled()));
    crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(-1.0e9, 0.0))));
    assert_eq!(crown.current_angle(), PI);

    let mut crown = screen_crown(screen_config().with_edge_lock(EdgeLock::disabled()));
    crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, 1.0e9))));
    assert!((crown.current_angle() - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn spin_to_maps_progress_onto_the_angle_range() {
    let mut crown = screen_crown(CrownConfig::new(V).with_scroll_relation(10.0));
    crown.spin_to(0.5);
    assert_eq!(crown.current_angle(), 10.0 * PI);
    crown.spin_to(1.0);
    assert_eq!(crown.current_angle(), 20.0 * PI);

    for anchor in [
        AnchorPosition::Top,
        AnchorPosition::Bottom,
        AnchorPosition::Left,
        AnchorPosition::Right,
    ] {
        let mut crown = screen_crown(screen_config().with_anchor_position(anchor));
        let range = crown.angle_range();
        for p in [0.0, 0.2, 0.5, 0.8, 1.0] {
            crown.spin_to(p);
            assert_eq!(crown.current_angle(), range.angle_at(p));
            assert_eq!(crown.previous_angle(), crown.current_angle());
        }
        crown.spin_to(0.0);
        assert_eq!(crown.current_angle(), anchor.radians());
        assert_eq!(crown.progress(), 0.0);
    }
}

#[test]
fn offset_and_progress_round_trip() {
    let content = SCREEN.height * CONTENT_RATIO;
    for p in [0.01, 0.3, 0.5, 0.99] {
        let offset = progress_to_offset(p, content, SCREEN.height);
        let back = offset_to_progress(offset, content, SCREEN.height);
        assert!((back - p).abs() < 1e-12, "{p} came back as {back}");
    }
}

#[test]
fn a_full_spin_reaches_the_trailing_edge_once() {
    let mut crown = screen_crown(screen_config());
    crown.pan(GesturePhase::Start);
    // Drive the indicator clockwise in finger-sized steps until it pins.
    for _ in 0..2000 {
        let center = crown.indicator_center() - crown.config().sizes.crown_center();
        // Tangent to the orbit, clockwise in y-down space.
        let step = Vec2::new(-center.y, center.x).normalize() * 2.5;
        crown.pan(GesturePhase::Progress(PanDelta::new(step)));
    }
    crown.pan(GesturePhase::End);

    assert_eq!(crown.progress(), 1.0);
    assert_eq!(crown.scroll().offset(V), max_offset());
    assert_eq!(
        crown.listener().edges().collect::<Vec<_>>(),
        vec![Edge::Trailing]
    );
}

#[test]
fn slow_drag_from_rest_scrolls_a_long_list() {
    let mut crown = screen_crown(screen_config().with_scroll_relation(19.0));
    crown.pan(GesturePhase::Start);
    for _ in 0..80 {
        let radial = crown.indicator_center() - crown.config().sizes.crown_center();
        let step = Vec2::new(-radial.y, radial.x).normalize() * 2.5;
        crown.pan(GesturePhase::Progress(PanDelta::new(step)));
    }
    crown.pan(GesturePhase::End);

    assert!(crown.progress() > 0.05, "progress {}", crown.progress());
    assert!(crown.scroll().offset(V) > 0.0);
    assert_eq!(crown.listener().edges().count(), 0);
}

#[test]
fn edge_feedback_carries_configured_descriptors() {
    let trailing = EdgeFeedback {
        impact_haptic: ImpactHaptic::Light,
        ..EdgeFeedback::default()
    };
    let config = screen_config().with_feedback(Feedback {
        leading: EdgeFeedback::default(),
        trailing,
    });
    let mut crown = screen_crown(config);
    crown.spin_to(0.99);
    crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, 30.0))));
    assert!(crown.listener().events().contains(&CrownEvent::EdgeReached {
        edge: Edge::Trailing,
        feedback: trailing,
    }));
}

/// A horizontal pager implemented by the host.
struct Pager {
    pages: usize,
    page_width: f64,
    x: f64,
}

impl ScrollTarget for Pager {
    fn content_extent(&self, axis: ScrollAxis) -> f64 {
        match axis {
            ScrollAxis::Horizontal => self.pages as f64 * self.page_width,
            ScrollAxis::Vertical => 0.0,
        }
    }

    fn viewport_extent(&self, axis: ScrollAxis) -> f64 {
        match axis {
            ScrollAxis::Horizontal => self.page_width,
            ScrollAxis::Vertical => 0.0,
        }
    }

    fn offset(&self, _axis: ScrollAxis) -> f64 {
        self.x
    }

    fn set_offset(&mut self, _axis: ScrollAxis, offset: f64, _animated: bool) {
        self.x = offset;
    }
}

#[test]
fn drives_a_host_scroll_target_horizontally() {
    let pager = Pager {
        pages: 5,
        page_width: 300.0,
        x: 0.0,
    };
    let config = CrownConfig::new(ScrollAxis::Horizontal)
        .with_anchor_position(AnchorPosition::Top)
        .with_double_tap(TapAction::ScrollToTrailingEdge { animated: true });
    let mut crown = CrownController::new(config, pager, ());

    crown.single_tap();
    assert_eq!(crown.scroll().x, 300.0);
    crown.double_tap();
    assert_eq!(crown.scroll().x, 1200.0);

    crown.spin_to_match_scroll();
    assert_eq!(crown.progress(), 1.0);
    assert_eq!(crown.current_angle(), crown.angle_range().end());
}

/// Counts spins and nothing else.
#[derive(Default)]
struct SpinCounter {
    began: u32,
    ended: u32,
    updates: u32,
}

impl CrownListener for SpinCounter {
    fn spin_began(&mut self) {
        self.began += 1;
    }

    fn spin_ended(&mut self) {
        self.ended += 1;
    }

    fn did_update(&mut self, _progress: f64) {
        self.updates += 1;
    }
}

#[test]
fn partial_listener_only_sees_what_it_implements() {
    let mut counter = SpinCounter::default();
    {
        let mut crown = CrownController::new(screen_config(), screen_scroll(), &mut counter);
        crown.pan(GesturePhase::Start);
        crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, 5.0))));
        crown.pan(GesturePhase::Progress(PanDelta::new(Vec2::new(0.0, 5.0))));
        crown.pan(GesturePhase::End);
        crown.force(10.0, 10.0);
    }
    assert_eq!(counter.began, 1);
    assert_eq!(counter.ended, 1);
    assert_eq!(counter.updates, 2);
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PDF pages.
//!
//! A crown over a paged document on hardware without force touch, so the
//! crown body is relocated with a long press. The double tap is bound to an
//! application callback that bookmarks the current page.
//!
//! Pass a JSON configuration to override the defaults, for example:
//!
//! ```json
//! { "anchor_position": "Bottom", "sizes": { "scroll_relation": 6.0 } }
//! ```
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_crown_demos --example pdf_pages`
//! - `cargo run -p understory_crown_demos --example pdf_pages -- crown.json`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Size};
use understory_crown::{
    CrownConfig, CrownController, CustomAction, GesturePhase, LongPress, RepositionGesture,
    ScrollAxis, ScrollState, ScrollTarget, TapAction,
};
use understory_crown_demos::{SCREEN, Shell, drag_along_orbit, load_config, pin_bottom_trailing};

const PAGES: usize = 12;
const PAGE_HEIGHT: f64 = 1100.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let fallback = CrownConfig::new(ScrollAxis::Vertical)
        .with_reposition_gesture(RepositionGesture::LongPress(LongPress::default()));
    let path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let mut config = load_config(path.as_deref(), fallback)?;

    let bookmarks = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&bookmarks);
    config.user_interaction.double_tap = TapAction::Custom(CustomAction::new(move || {
        counter.set(counter.get() + 1);
    }));

    let content = Size::new(SCREEN.width, PAGES as f64 * PAGE_HEIGHT);
    let mut crown = CrownController::new(config, ScrollState::new(content, SCREEN), Shell::default());
    crown.set_force_touch_capable(false);
    pin_bottom_trailing(&mut crown, 50.0, 35.0);

    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are non-negative and span a dozen pages"
    )]
    let page = |crown: &CrownController<ScrollState, Shell>| {
        (crown.scroll().offset(ScrollAxis::Vertical) / PAGE_HEIGHT) as usize + 1
    };

    // Read through the first pages.
    drag_along_orbit(&mut crown, 120, 3.0);
    println!("reading page {} of {PAGES}", page(&crown));

    crown.double_tap();

    // Move the crown to the left thumb.
    if crown.should_long_press_apply() {
        crown.long_press(GesturePhase::Start);
        crown.long_press(GesturePhase::Progress(Point::new(70.0, 600.0)));
        crown.long_press(GesturePhase::Progress(Point::new(60.0, 640.0)));
        crown.long_press(GesturePhase::End);
    }
    println!("crown now at {:?}", crown.surface().center());

    // Page forward to the end.
    for _ in 0..PAGES {
        crown.single_tap();
        crown.spin_to_match_scroll();
    }
    println!(
        "reached page {} of {PAGES}, progress {:.3}",
        page(&crown),
        crown.progress()
    );
    crown.double_tap();
    println!("bookmarks: {}", bookmarks.get());
    Ok(())
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contacts list.
//!
//! A crown bound to a long vertical list. The scroll relation is the number of
//! screens the list spans, so one indicator turn moves about one screen.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_crown_demos --example contacts`

use kurbo::Size;
use understory_crown::{CrownConfig, CrownController, ScrollAxis, ScrollState, ScrollTarget};
use understory_crown_demos::{SCREEN, Shell, drag_along_orbit, load_config, pin_bottom_trailing};

const CONTACTS: usize = 240;
const ROW_HEIGHT: f64 = 64.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "offsets are non-negative and far below usize::MAX rows"
)]
fn top_row<S: ScrollTarget>(scroll: &S) -> usize {
    (scroll.offset(ScrollAxis::Vertical) / ROW_HEIGHT) as usize
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let content = Size::new(SCREEN.width, CONTACTS as f64 * ROW_HEIGHT);
    let relation = (content.height / SCREEN.height).round();
    let fallback = CrownConfig::new(ScrollAxis::Vertical).with_scroll_relation(relation);
    let path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = load_config(path.as_deref(), fallback)?;

    let scroll = ScrollState::new(content, SCREEN);
    let mut crown = CrownController::new(config, scroll, Shell::default());
    pin_bottom_trailing(&mut crown, 50.0, 50.0);

    println!(
        "{CONTACTS} contacts, {} turns from first to last",
        crown.config().sizes.scroll_relation
    );

    // One and a half turns forward.
    drag_along_orbit(&mut crown, 80, 2.5);
    println!(
        "after spinning: progress {:.3}, top row {}",
        crown.progress(),
        top_row(crown.scroll())
    );

    // The user flicks the list; the crown follows.
    crown.scroll_mut().scroll_to(ScrollAxis::Vertical, 9000.0);
    crown.spin_to_match_scroll();
    println!(
        "after a flick: progress {:.3}, top row {}",
        crown.progress(),
        top_row(crown.scroll())
    );

    // Single tap pages down, double tap returns to the top.
    crown.single_tap();
    crown.spin_to_match_scroll();
    println!("after a single tap: top row {}", top_row(crown.scroll()));
    crown.double_tap();
    crown.spin_to_match_scroll();
    println!("after a double tap: top row {}", top_row(crown.scroll()));

    // Spin past the first contact to feel the leading edge.
    crown.spin_to(0.02);
    drag_along_orbit(&mut crown, 20, -4.0);

    let shell = crown.listener();
    println!(
        "edge haptics played: {}, flashes: {}",
        shell.haptics, shell.flashes
    );
    Ok(())
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photo grid.
//!
//! A crown anchored at the top, bound to a horizontally scrolling two-row
//! photo grid. Input arrives as a queue of [`CrownInput`]s, the way a shell
//! that batches platform events per frame would deliver it. Midway the user
//! force-presses the crown and drags it out of the way.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_crown_demos --example photo_grid`

use kurbo::{Size, Vec2};
use understory_crown::{
    AnchorPosition, CrownConfig, CrownController, CrownInput, GesturePhase, PanDelta, ScrollAxis,
    ScrollState, ScrollTarget, Sizes,
};
use understory_crown_demos::{SCREEN, Shell, drag_along_orbit, pin_bottom_trailing};

const PHOTOS: usize = 24;
const ROWS: usize = 2;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let column = SCREEN.width / 2.0;
    let columns = PHOTOS.div_ceil(ROWS);
    let content = Size::new(columns as f64 * column, SCREEN.height);

    let config = CrownConfig::new(ScrollAxis::Horizontal)
        .with_anchor_position(AnchorPosition::Top)
        .with_sizes(Sizes {
            background_diameter: 70.0,
            scroll_relation: PHOTOS as f64 * 0.5,
            ..Sizes::default()
        });
    config.validate()?;

    let scroll = ScrollState::new(content, SCREEN);
    let mut crown = CrownController::new(config, scroll, Shell::default());
    pin_bottom_trailing(&mut crown, 50.0, 35.0);

    // Browse a few columns.
    drag_along_orbit(&mut crown, 60, 3.0);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are non-negative and span a dozen columns"
    )]
    let first_column = (crown.scroll().offset(ScrollAxis::Horizontal) / column) as usize;
    println!(
        "browsing: progress {:.3}, first visible column {first_column}",
        crown.progress(),
    );

    // Press hard, drag the crown up and to the left, then let go.
    let drag = PanDelta::new(Vec2::new(-12.0, -30.0));
    let mut frame: Vec<CrownInput> = vec![
        CrownInput::Force {
            force: 2.0,
            max_force: 6.67,
        },
        CrownInput::Force {
            force: 5.5,
            max_force: 6.67,
        },
        CrownInput::Pan(GesturePhase::Start),
    ];
    frame.extend(std::iter::repeat_n(
        CrownInput::Pan(GesturePhase::Progress(drag)),
        10,
    ));
    frame.extend([
        CrownInput::Pan(GesturePhase::End),
        CrownInput::Force {
            force: 0.0,
            max_force: 6.67,
        },
    ]);
    for input in frame {
        crown.handle(input);
    }
    println!(
        "crown moved from {:?} to {:?}",
        crown.surface().home(),
        crown.surface().center()
    );

    // Jump to the end of the grid with the trailing page tap, repeatedly.
    for _ in 0..columns {
        crown.handle(CrownInput::SingleTap);
        crown.handle(CrownInput::ScrollChanged);
    }
    println!(
        "end of grid: progress {:.3}, scale {:.2}",
        crown.progress(),
        crown.scale_factor()
    );
    Ok(())
}

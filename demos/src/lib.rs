// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the crown demos.
//!
//! The demos have no window. [`Shell`] stands in for the rendering layer and
//! logs what a real shell would draw or play, and [`drag_along_orbit`] scripts
//! the finger.

use std::path::Path;

use anyhow::Context;
use kurbo::{Point, Size, Vec2};
use log::info;
use understory_crown::{
    CrownConfig, CrownController, CrownListener, EdgeFeedback, Flash, GesturePhase, PanDelta,
    PanSubject, ScrollTarget, SurfaceMove, SurfaceScale,
};

/// Screen size used by every demo.
pub const SCREEN: Size = Size::new(375.0, 812.0);

/// A listener that logs render operations and counts the interesting ones.
#[derive(Debug, Default)]
pub struct Shell {
    /// Edge haptics played.
    pub haptics: usize,
    /// Edge flashes started.
    pub flashes: usize,
    /// Last reported progress.
    pub progress: f64,
}

impl Shell {
    fn play(&mut self, edge: &str, feedback: &EdgeFeedback) {
        if feedback.impact_haptic.is_valid() {
            self.haptics += 1;
            info!("{edge} edge: {:?} impact", feedback.impact_haptic);
        }
        for (layer, flash) in [
            ("background", feedback.background_flash),
            ("foreground", feedback.foreground_flash),
        ] {
            if let Flash::Active {
                color,
                fade_duration,
            } = flash
            {
                self.flashes += 1;
                let rgba = color.to_rgba8();
                info!(
                    "{edge} edge: flash {layer} #{:02x}{:02x}{:02x} for {fade_duration:?}",
                    rgba.r, rgba.g, rgba.b
                );
            }
        }
    }
}

impl CrownListener for Shell {
    fn spin_began(&mut self) {
        info!("spin began");
    }

    fn spin_ended(&mut self) {
        info!("spin ended at {:.3}", self.progress);
    }

    fn did_update(&mut self, progress: f64) {
        self.progress = progress;
    }

    fn leading_edge_reached(&mut self, feedback: &EdgeFeedback) {
        self.play("leading", feedback);
    }

    fn trailing_edge_reached(&mut self, feedback: &EdgeFeedback) {
        self.play("trailing", feedback);
    }

    fn pan_subject_changed(&mut self, subject: PanSubject) {
        info!(
            "selection haptic, pans now drive {subject:?} (opacity {})",
            subject.opacity()
        );
    }

    fn surface_moved(&mut self, relocation: SurfaceMove) {
        info!(
            "move crown {:?} -> {:?} ({:?})",
            relocation.from, relocation.to, relocation.animation
        );
    }

    fn surface_scaled(&mut self, scale: SurfaceScale) {
        info!("scale crown to {:.2} ({:?})", scale.scale, scale.animation);
    }
}

/// Reads a JSON configuration from `path`, or returns `fallback` when no path
/// is given. Either way the result is validated.
pub fn load_config(path: Option<&Path>, fallback: CrownConfig) -> anyhow::Result<CrownConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => fallback,
    };
    config.validate()?;
    Ok(config)
}

/// Pins the crown `trailing` units from the right edge and `bottom` units
/// from the bottom edge of [`SCREEN`].
pub fn pin_bottom_trailing<S: ScrollTarget, L: CrownListener>(
    crown: &mut CrownController<S, L>,
    trailing: f64,
    bottom: f64,
) {
    let radius = crown.config().sizes.background_radius();
    crown.place(Point::new(
        SCREEN.width - trailing - radius,
        SCREEN.height - bottom - radius,
    ));
    crown.set_container(Some(SCREEN.to_rect()));
}

/// Drags the indicator `steps` times along its orbit, `step` units per event.
///
/// Positive steps follow the crown's spin direction, negative steps go back.
pub fn drag_along_orbit<S: ScrollTarget, L: CrownListener>(
    crown: &mut CrownController<S, L>,
    steps: usize,
    step: f64,
) {
    crown.pan(GesturePhase::Start);
    for _ in 0..steps {
        let config = crown.config();
        let radial = crown.indicator_center() - config.sizes.crown_center();
        let tangent = Vec2::new(-radial.y, radial.x).normalize() * step;
        let on_screen = config
            .spin_direction
            .localize(config.anchor_position, tangent);
        crown.pan(GesturePhase::Progress(PanDelta::new(on_screen)));
    }
    crown.pan(GesturePhase::End);
}

//! Top-level frame loop and per-frame state.
//!
//! `AppState` owns the actuator, the three fixed range mappings, and the
//! retained last-mapped scalars.  `run()` drives capture → extraction →
//! signal → mapping → actuation → rendering → display once per frame on a
//! single thread, until the quit key closes the window.

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::actuator::{open_actuator, LevelActuator};
use crate::capture::{FrameBuf, FrameSource, SimFrameSource, FRAME_H, FRAME_W};
use crate::hand::{HandSnapshot, PoseExtractor, SimHandInput, SimPoseExtractor};
use crate::mapping::MappingRange;
use crate::render::{self, BAR_H};
use crate::signal::pinch_signal;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub width:  usize,
    pub height: usize,
    /// Starting thumb–index spread for the simulated hand, in pixels.
    pub initial_spread_px: f32,
    /// Capture device index (`camera` feature).
    pub camera_index: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:  FRAME_W,
            height: FRAME_H,
            initial_spread_px: 120.0,
            camera_index: 0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState — per-frame pipeline + retained scalars
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    actuator: Box<dyn LevelActuator>,

    // ── fixed mappings, all fed the pinch distance ───────────────────────
    level_map:   MappingRange,
    bar_map:     MappingRange,
    percent_map: MappingRange,

    // ── retained last-mapped values (held across no-hand frames) ─────────
    last_bar_px:  f32,
    last_percent: f32,
    last_level:   Option<f32>,
}

impl AppState {
    pub fn new(actuator: Box<dyn LevelActuator>) -> Self {
        // Device range is queried once and treated as constant.
        let (dev_min, dev_max) = actuator.range();
        AppState {
            actuator,
            level_map:    MappingRange::from_pinch(dev_min, dev_max),
            bar_map:      MappingRange::from_pinch(BAR_H as f32, 0.0),
            percent_map:  MappingRange::from_pinch(0.0, 100.0),
            last_bar_px:  BAR_H as f32,
            last_percent: 0.0,
            last_level:   None,
        }
    }

    /// Run one frame of the pipeline: compute the pinch signal, map and
    /// apply the device level when a signal exists, then draw feedback.
    /// Without a signal the retained scalars carry the previous frame's
    /// values and the actuator is left untouched.
    pub fn process(&mut self, hand: Option<&HandSnapshot>, frame: &mut FrameBuf) {
        let signal = pinch_signal(hand);

        if let Some(sig) = &signal {
            let level = self.level_map.map(sig.distance);
            self.actuator.set_level(level);
            self.last_level   = Some(level);
            self.last_bar_px  = self.bar_map.map(sig.distance);
            self.last_percent = self.percent_map.map(sig.distance);
        }

        render::render(frame, hand, signal.as_ref(), self.last_bar_px, self.last_percent);
    }

    pub fn percent(&self) -> f32 { self.last_percent }
    pub fn bar_px(&self)  -> f32 { self.last_bar_px }
    pub fn level(&self)   -> Option<f32> { self.last_level }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame source selection
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "camera")]
fn open_frame_source(cfg: &AppConfig) -> Box<dyn FrameSource> {
    match crate::capture::CameraSource::open(cfg.camera_index) {
        Ok(cam) => {
            eprintln!("[capture] camera {} opened", cfg.camera_index);
            Box::new(cam)
        }
        Err(e) => {
            eprintln!("[capture] camera init error: {} — using sim backdrop", e);
            Box::new(SimFrameSource::new(cfg.width, cfg.height))
        }
    }
}

#[cfg(not(feature = "camera"))]
fn open_frame_source(cfg: &AppConfig) -> Box<dyn FrameSource> {
    Box::new(SimFrameSource::new(cfg.width, cfg.height))
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main frame loop
// ════════════════════════════════════════════════════════════════════════════

/// Sim-mode spread adjustment per held frame, in pixels.
const SPREAD_STEP_PX: f32 = 3.0;

/// Run the full application.  Capture, window, and actuator handles are
/// acquired here once and released on every exit path by drop.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    let mut window = Window::new(
        "Pinch Volume Control",
        cfg.width,
        cfg.height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| e.to_string())?;
    window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

    let mut frames = open_frame_source(&cfg);
    let mut extractor = SimPoseExtractor::new(cfg.initial_spread_px);
    let mut app = AppState::new(open_actuator());

    while window.is_open() {
        if window.is_key_pressed(Key::Q, KeyRepeat::No) {
            break;
        }

        // A failed read skips this iteration; the next frame is the retry.
        let mut frame = match frames.grab() {
            Some(f) => f,
            None => {
                window.update();
                continue;
            }
        };

        // ── sim hand input (mouse + keys) ────────────────────────────────
        let cursor = window
            .get_mouse_pos(MouseMode::Clamp)
            .unwrap_or((cfg.width as f32 / 2.0, cfg.height as f32 / 2.0));
        let mut spread_delta = 0.0;
        if window.is_key_down(Key::Up)   { spread_delta += SPREAD_STEP_PX; }
        if window.is_key_down(Key::Down) { spread_delta -= SPREAD_STEP_PX; }
        extractor.apply(SimHandInput {
            cursor,
            spread_delta,
            toggle_hand: window.is_key_pressed(Key::H, KeyRepeat::No),
        });

        // ── per-frame pipeline ───────────────────────────────────────────
        let hand = extractor.extract(&frame);
        app.process(hand.as_ref(), &mut frame);

        window
            .update_with_buffer(&frame.px, frame.w, frame.h)
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

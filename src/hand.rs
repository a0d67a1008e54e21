//! Hand landmark schema and the pose-extractor seam.
//!
//! The pose estimator itself is an external collaborator: anything that can
//! turn a frame into a 21-point [`HandSnapshot`] plugs in behind
//! [`PoseExtractor`].  The always-available [`SimPoseExtractor`] synthesizes
//! a hand from the window's mouse position so the whole pipeline runs
//! without a camera or a vision model.

use crate::capture::FrameBuf;

// ════════════════════════════════════════════════════════════════════════════
// Anatomical landmark indices (MediaPipe hand convention)
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Number of landmarks in one hand.  A detected hand is always complete;
/// the extractor never yields a partial snapshot.
pub const LANDMARK_COUNT: usize = 21;

/// Bone connections for the on-screen skeleton overlay.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark / HandSnapshot — per-frame value types
// ════════════════════════════════════════════════════════════════════════════

/// A single anatomically-indexed point, in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub id: usize,
    pub x:  f32,
    pub y:  f32,
}

/// One detected hand: all 21 landmarks, indexed by anatomical id.
///
/// Snapshots are produced fresh every frame and discarded when the frame
/// completes; nothing holds one across the frame boundary.
#[derive(Clone, Debug)]
pub struct HandSnapshot {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandSnapshot {
    /// Build a snapshot from 21 pixel-coordinate points, ordered by id.
    pub fn from_pixels(points: [(f32, f32); LANDMARK_COUNT]) -> Self {
        let mut landmarks = [Landmark { id: 0, x: 0.0, y: 0.0 }; LANDMARK_COUNT];
        for (id, &(x, y)) in points.iter().enumerate() {
            landmarks[id] = Landmark { id, x, y };
        }
        HandSnapshot { landmarks }
    }

    /// Build a snapshot from normalized (0–1) model output, scaled to the
    /// frame resolution the way the landmarker reported it.
    pub fn from_normalized(points: [(f32, f32); LANDMARK_COUNT], w: usize, h: usize) -> Self {
        let mut pixels = [(0.0f32, 0.0f32); LANDMARK_COUNT];
        for (id, &(nx, ny)) in points.iter().enumerate() {
            pixels[id] = (nx * w as f32, ny * h as f32);
        }
        Self::from_pixels(pixels)
    }

    pub fn landmark(&self, id: usize) -> &Landmark {
        &self.landmarks[id]
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PoseExtractor trait — unified interface for model and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can extract a hand pose from a frame.
///
/// Returns the first detected hand, or `None` when no hand is visible —
/// absence is a valid per-frame state, not an error.
pub trait PoseExtractor {
    fn extract(&mut self, frame: &FrameBuf) -> Option<HandSnapshot>;
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseExtractor — mouse-driven synthetic hand (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame simulation input, polled from the window by the frame loop.
#[derive(Clone, Copy, Debug)]
pub struct SimHandInput {
    /// Midpoint between the synthetic thumb and index tips (mouse cursor).
    pub cursor: (f32, f32),
    /// Pinch spread delta for this frame, in pixels (Up/Down keys).
    pub spread_delta: f32,
    /// Toggle hand presence (H key).
    pub toggle_hand: bool,
}

/// Synthesizes a complete 21-landmark hand around the cursor.  The thumb
/// and index tips sit `spread_px` apart; the rest of the hand is a fixed
/// template scaled with the spread so the skeleton stays plausible.
pub struct SimPoseExtractor {
    spread_px: f32,
    cursor:    (f32, f32),
    present:   bool,
}

/// Template offsets per landmark, in spread units (x right, y down).
/// Thumb tip at (-0.5, 0) and index tip at (0.5, 0) put the tracked pair
/// exactly one spread apart, centred on the cursor.
const SIM_TEMPLATE: [(f32, f32); LANDMARK_COUNT] = [
    (0.10, 1.60),                                                   // wrist
    (-0.45, 1.25), (-0.55, 0.90), (-0.55, 0.45), (-0.50, 0.00),     // thumb
    (0.35, 0.95), (0.45, 0.60), (0.50, 0.30), (0.50, 0.00),         // index
    (0.60, 1.00), (0.75, 0.70), (0.85, 0.50), (0.90, 0.35),         // middle
    (0.80, 1.10), (0.95, 0.85), (1.05, 0.70), (1.10, 0.60),         // ring
    (1.00, 1.25), (1.15, 1.05), (1.25, 0.95), (1.30, 0.85),         // pinky
];

impl SimPoseExtractor {
    pub const MIN_SPREAD_PX: f32 = 5.0;
    pub const MAX_SPREAD_PX: f32 = 320.0;

    pub fn new(initial_spread_px: f32) -> Self {
        SimPoseExtractor {
            spread_px: initial_spread_px.clamp(Self::MIN_SPREAD_PX, Self::MAX_SPREAD_PX),
            cursor:    (0.0, 0.0),
            present:   true,
        }
    }

    /// Apply one frame of window input.
    pub fn apply(&mut self, input: SimHandInput) {
        self.cursor = input.cursor;
        self.spread_px = (self.spread_px + input.spread_delta)
            .clamp(Self::MIN_SPREAD_PX, Self::MAX_SPREAD_PX);
        if input.toggle_hand {
            self.present = !self.present;
        }
    }

    pub fn spread_px(&self) -> f32 { self.spread_px }
    pub fn hand_present(&self) -> bool { self.present }
}

impl PoseExtractor for SimPoseExtractor {
    fn extract(&mut self, _frame: &FrameBuf) -> Option<HandSnapshot> {
        if !self.present {
            return None;
        }
        let (cx, cy) = self.cursor;
        let mut points = [(0.0f32, 0.0f32); LANDMARK_COUNT];
        for (id, &(tx, ty)) in SIM_TEMPLATE.iter().enumerate() {
            points[id] = (cx + tx * self.spread_px, cy + ty * self.spread_px);
        }
        Some(HandSnapshot::from_pixels(points))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

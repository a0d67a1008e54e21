//! # pinch_volume
//!
//! Pinch-gesture volume controller: the distance between the thumb tip and
//! index fingertip of a detected hand is mapped linearly onto the output
//! device's level, with a live software-rendered feedback window.
//!
//! ## Distance → output mapping
//!
//! | Pinch distance (px) | Device level | Bar fill | Readout |
//! |---|---|---|---|
//! | ≤ 50 | device minimum | empty | 0% |
//! | 50–220 | linear across the device range | proportional | 0–100% |
//! | ≥ 220 | device maximum | full | 100% |
//!
//! Tips closer than 50 px also flip the connecting line to the "pinched"
//! color.  Frames with no detected hand keep the previous level, bar, and
//! readout; nothing resets.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: synthetic backdrop, mouse-driven hand,
//!   sim mixer.  No hardware needed.
//! * `camera` — capture real frames from a webcam via nokhwa.
//! * `alsa` — drive the real ALSA Master mixer.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse move | Move the synthetic hand |
//! | `Up` / `Down` (hold) | Widen / narrow the pinch |
//! | `H` | Toggle hand presence |
//! | `Q` | Quit |

pub mod actuator;
pub mod app;
pub mod capture;
pub mod hand;
pub mod mapping;
pub mod render;
pub mod signal;

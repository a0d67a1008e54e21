//! Output-level actuator seam.
//!
//! The OS audio subsystem is an external collaborator behind
//! [`LevelActuator`]: a simulated mixer by default, the real ALSA Master
//! element with the `alsa` feature.  The range is queried once at startup
//! and treated as constant; per-frame failures are not consulted.

// ════════════════════════════════════════════════════════════════════════════
// LevelActuator — abstraction over alsa / sim
// ════════════════════════════════════════════════════════════════════════════

pub trait LevelActuator {
    /// Native controllable range `(min, max)`.  On real hardware the
    /// minimum is typically a negative dB figure.
    fn range(&self) -> (f32, f32);

    /// Apply a level within the native range.
    fn set_level(&mut self, level: f32);
}

// ── sim backend (used when no hardware mixer is available) ───────────────────

/// Stand-in mixer with a realistic dB range; records the applied level.
pub struct SimActuator {
    range:       (f32, f32),
    pub applied: Option<f32>,
}

impl SimActuator {
    pub fn new() -> Self {
        SimActuator { range: (-65.25, 0.0), applied: None }
    }
}

impl Default for SimActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelActuator for SimActuator {
    fn range(&self) -> (f32, f32) {
        self.range
    }
    fn set_level(&mut self, level: f32) {
        self.applied = Some(level);
    }
}

// ── ALSA backend (feature = "alsa") ──────────────────────────────────────────

#[cfg(feature = "alsa")]
pub struct AlsaActuator {
    mixer: alsa::mixer::Mixer,
    selem: alsa::mixer::SelemId,
    range: (f32, f32),
}

#[cfg(feature = "alsa")]
impl AlsaActuator {
    /// Open the default card's Master element and query its dB range.
    pub fn open() -> Result<Self, String> {
        use alsa::mixer::{Mixer, SelemId};

        let mixer = Mixer::new("default", false).map_err(|e| e.to_string())?;
        let selem = SelemId::new("Master", 0);
        let range = {
            let elem = mixer
                .find_selem(&selem)
                .ok_or_else(|| "no Master mixer element".to_string())?;
            let (lo, hi) = elem.get_playback_db_range();
            (lo.to_db(), hi.to_db())
        };
        Ok(AlsaActuator { mixer, selem, range })
    }
}

#[cfg(feature = "alsa")]
impl LevelActuator for AlsaActuator {
    fn range(&self) -> (f32, f32) {
        self.range
    }
    fn set_level(&mut self, level: f32) {
        use alsa::mixer::MilliBel;
        use alsa::Round;

        if let Some(elem) = self.mixer.find_selem(&self.selem) {
            let _ = elem.set_playback_db_all(MilliBel::from_db(level), Round::Floor);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_actuator — pick the hardware mixer, fall back to sim
// ════════════════════════════════════════════════════════════════════════════

/// Open the real mixer when built with the `alsa` feature, falling back to
/// the simulated one with a warning rather than failing.
pub fn open_actuator() -> Box<dyn LevelActuator> {
    #[cfg(feature = "alsa")]
    {
        match AlsaActuator::open() {
            Ok(a) => {
                let (lo, hi) = a.range();
                eprintln!("[actuator] ALSA Master opened, range {:.2}..{:.2} dB", lo, hi);
                return Box::new(a);
            }
            Err(e) => {
                eprintln!("[actuator] ALSA init error: {} — using sim mixer", e);
            }
        }
    }
    Box::new(SimActuator::new())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_range_is_negative_db_window() {
        let sim = SimActuator::new();
        let (lo, hi) = sim.range();
        assert!(lo < 0.0);
        assert_eq!(hi, 0.0);
    }

    #[test]
    fn sim_records_applied_level() {
        let mut sim = SimActuator::new();
        assert!(sim.applied.is_none());
        sim.set_level(-12.5);
        assert_eq!(sim.applied, Some(-12.5));
    }

    #[test]
    fn sim_range_is_stable() {
        let mut sim = SimActuator::new();
        let before = sim.range();
        sim.set_level(-3.0);
        assert_eq!(sim.range(), before);
    }
}

//! Clamped linear range mapping.
//!
//! One [`MappingRange`] per mapped quantity, all fed the same pinch
//! distance each frame: device level, bar fill offset, and the display
//! percentage.  The presentation ranges stay fixed at human-readable
//! values regardless of the device's native range.

/// Pinch distance window, in pixels, that spans the full output range.
/// Distances outside it clamp to the nearest end.
pub const PINCH_MIN_PX: f32 = 50.0;
pub const PINCH_MAX_PX: f32 = 220.0;

// ════════════════════════════════════════════════════════════════════════════
// MappingRange
// ════════════════════════════════════════════════════════════════════════════

/// Immutable source→target interval mapping.  Reversed targets
/// (`dst_min > dst_max`) are valid and produce a decreasing mapping;
/// output never extrapolates past either target end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappingRange {
    pub src_min: f32,
    pub src_max: f32,
    pub dst_min: f32,
    pub dst_max: f32,
}

impl MappingRange {
    pub const fn new(src_min: f32, src_max: f32, dst_min: f32, dst_max: f32) -> Self {
        MappingRange { src_min, src_max, dst_min, dst_max }
    }

    /// A pipeline mapping: pinch window → the given target interval.
    pub const fn from_pinch(dst_min: f32, dst_max: f32) -> Self {
        Self::new(PINCH_MIN_PX, PINCH_MAX_PX, dst_min, dst_max)
    }

    /// Linearly interpolate `v` into the target interval, clamped at
    /// both ends.
    pub fn map(&self, v: f32) -> f32 {
        let span = self.src_max - self.src_min;
        if span <= 0.0 {
            return self.dst_min;
        }
        let t = ((v - self.src_min) / span).clamp(0.0, 1.0);
        self.dst_min + t * (self.dst_max - self.dst_min)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_exactly() {
        let m = MappingRange::from_pinch(0.0, 100.0);
        assert_eq!(m.map(PINCH_MIN_PX), 0.0);
        assert_eq!(m.map(PINCH_MAX_PX), 100.0);
    }

    #[test]
    fn midpoint_maps_halfway() {
        let m = MappingRange::new(0.0, 10.0, 0.0, 100.0);
        assert!((m.map(5.0) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_below_source_range() {
        let m = MappingRange::from_pinch(0.0, 100.0);
        assert_eq!(m.map(0.0), 0.0);
        assert_eq!(m.map(-500.0), 0.0);
    }

    #[test]
    fn clamps_above_source_range() {
        let m = MappingRange::from_pinch(0.0, 100.0);
        assert_eq!(m.map(1000.0), 100.0);
    }

    #[test]
    fn negative_target_range() {
        // Device minima are typically negative dB on real hardware.
        let m = MappingRange::from_pinch(-65.25, 0.0);
        assert_eq!(m.map(0.0), -65.25);
        assert_eq!(m.map(220.0), 0.0);
        let mid = m.map((PINCH_MIN_PX + PINCH_MAX_PX) / 2.0);
        assert!(mid > -65.25 && mid < 0.0);
    }

    #[test]
    fn reversed_target_decreases() {
        // The bar fill offset shrinks as the pinch widens.
        let m = MappingRange::from_pinch(300.0, 0.0);
        assert_eq!(m.map(PINCH_MIN_PX), 300.0);
        assert_eq!(m.map(PINCH_MAX_PX), 0.0);
        assert!(m.map(100.0) > m.map(180.0));
    }

    #[test]
    fn output_always_within_target_interval() {
        let ranges = [
            MappingRange::from_pinch(0.0, 100.0),
            MappingRange::from_pinch(300.0, 0.0),
            MappingRange::from_pinch(-65.25, 0.0),
        ];
        for m in ranges {
            let lo = m.dst_min.min(m.dst_max);
            let hi = m.dst_min.max(m.dst_max);
            let mut d = -100.0;
            while d <= 500.0 {
                let out = m.map(d);
                assert!(out >= lo && out <= hi, "d={} out={}", d, out);
                d += 7.3;
            }
        }
    }

    #[test]
    fn monotonic_within_source_range() {
        let inc = MappingRange::from_pinch(0.0, 100.0);
        let dec = MappingRange::from_pinch(300.0, 0.0);
        let mut prev_inc = inc.map(PINCH_MIN_PX);
        let mut prev_dec = dec.map(PINCH_MIN_PX);
        let mut d = PINCH_MIN_PX + 1.0;
        while d <= PINCH_MAX_PX {
            let vi = inc.map(d);
            let vd = dec.map(d);
            assert!(vi >= prev_inc);
            assert!(vd <= prev_dec);
            prev_inc = vi;
            prev_dec = vd;
            d += 1.0;
        }
    }

    #[test]
    fn empty_source_span_pins_to_target_min() {
        let m = MappingRange::new(50.0, 50.0, 0.0, 100.0);
        assert_eq!(m.map(49.0), 0.0);
        assert_eq!(m.map(51.0), 0.0);
    }
}

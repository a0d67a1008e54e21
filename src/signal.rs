//! Pinch signal computation.
//!
//! One signal per frame, derived from the thumb-tip / index-tip distance of
//! the first detected hand.  No hand means no signal — downstream state
//! holds its previous values rather than resetting.

use crate::hand::{HandSnapshot, INDEX_TIP, THUMB_TIP};

/// Pinch distance below this is classified Near (exactly at it is Far).
/// Fixed resolution-dependent constant; drives the feedback color only.
pub const NEAR_THRESHOLD_PX: f32 = 50.0;

// ════════════════════════════════════════════════════════════════════════════
// Proximity / ControlSignal
// ════════════════════════════════════════════════════════════════════════════

/// Binary closeness classification of the tracked pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proximity {
    Near,
    Far,
}

/// The per-frame control signal: the two tracked tips in pixel coordinates,
/// their Euclidean distance, and the derived proximity class.
#[derive(Clone, Copy, Debug)]
pub struct ControlSignal {
    pub thumb:     (f32, f32),
    pub index:     (f32, f32),
    pub distance:  f32,
    pub proximity: Proximity,
}

/// Compute the pinch signal for one frame.  Pure: no hand yields `None`,
/// never a zero-distance signal.
pub fn pinch_signal(hand: Option<&HandSnapshot>) -> Option<ControlSignal> {
    let hand = hand?;
    let t = hand.landmark(THUMB_TIP);
    let i = hand.landmark(INDEX_TIP);
    let distance = (i.x - t.x).hypot(i.y - t.y);
    let proximity = if distance < NEAR_THRESHOLD_PX {
        Proximity::Near
    } else {
        Proximity::Far
    };
    Some(ControlSignal {
        thumb: (t.x, t.y),
        index: (i.x, i.y),
        distance,
        proximity,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::LANDMARK_COUNT;

    fn hand_with_tips(thumb: (f32, f32), index: (f32, f32)) -> HandSnapshot {
        let mut pts = [(0.0, 0.0); LANDMARK_COUNT];
        pts[THUMB_TIP] = thumb;
        pts[INDEX_TIP] = index;
        HandSnapshot::from_pixels(pts)
    }

    #[test]
    fn no_hand_no_signal() {
        assert!(pinch_signal(None).is_none());
    }

    #[test]
    fn distance_is_euclidean() {
        let hand = hand_with_tips((100.0, 100.0), (103.0, 104.0));
        let sig = pinch_signal(Some(&hand)).unwrap();
        assert!((sig.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn fifty_px_is_exactly_far() {
        // The boundary itself classifies Far; only strictly-below is Near.
        let hand = hand_with_tips((100.0, 100.0), (100.0, 150.0));
        let sig = pinch_signal(Some(&hand)).unwrap();
        assert_eq!(sig.distance, 50.0);
        assert_eq!(sig.proximity, Proximity::Far);
    }

    #[test]
    fn just_below_threshold_is_near() {
        let hand = hand_with_tips((100.0, 100.0), (100.0, 149.9));
        let sig = pinch_signal(Some(&hand)).unwrap();
        assert_eq!(sig.proximity, Proximity::Near);
    }

    #[test]
    fn coincident_tips_zero_distance() {
        let hand = hand_with_tips((200.0, 200.0), (200.0, 200.0));
        let sig = pinch_signal(Some(&hand)).unwrap();
        assert_eq!(sig.distance, 0.0);
        assert_eq!(sig.proximity, Proximity::Near);
    }

    #[test]
    fn signal_carries_tip_positions() {
        let hand = hand_with_tips((10.0, 20.0), (30.0, 40.0));
        let sig = pinch_signal(Some(&hand)).unwrap();
        assert_eq!(sig.thumb, (10.0, 20.0));
        assert_eq!(sig.index, (30.0, 40.0));
    }
}

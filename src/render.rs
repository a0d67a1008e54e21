//! Per-frame feedback rendering.
//!
//! Pure draw list over a [`FrameBuf`]; window I/O stays in the frame loop.
//! Order per frame:
//!
//! 1. translucent darkening wash over the whole frame
//! 2. hand skeleton + joint dots (hand present only)
//! 3. glow markers on the tracked tips and the proximity-colored
//!    connecting line (signal present only)
//! 4. gradient-backed level bar with a rounded fill
//! 5. percentage readout and the two instruction labels, each over an
//!    opaque patch sized to the measured text
//!
//! The glow, tapered stroke, gradient, and rounded corners are all
//! approximations built from flat-fill primitives.

use crate::capture::FrameBuf;
use crate::hand::{HandSnapshot, HAND_SKELETON};
use crate::signal::{ControlSignal, Proximity};

// ════════════════════════════════════════════════════════════════════════════
// Layout + palette constants
// ════════════════════════════════════════════════════════════════════════════

pub const BAR_X: i32 = 50;
pub const BAR_Y: i32 = 100;
pub const BAR_W: i32 = 40;
pub const BAR_H: i32 = 300;
const CORNER_R:  i32 = 20;

const OVERLAY_COLOR:   u32 = 0xFF000000;
const OVERLAY_ALPHA:   f32 = 0.3;
const BAR_COLOR:       u32 = 0xFF00FF00;
const GRADIENT_TOP:    u32 = 0xFF1E1E1E;
const GRADIENT_BOTTOM: u32 = 0xFF323232;
const TEXT_COLOR:      u32 = 0xFFFFFFFF;
const TEXT_BG:         u32 = 0xFF000000;
const HAND_GLOW:       u32 = 0xFFFFFF00;  // yellow
const LINE_COLOR:      u32 = 0xFF00FF00;
const LINE_CLOSE:      u32 = 0xFFFF0000;  // pinched
const SKELETON_COLOR:  u32 = 0xFF999999;
const JOINT_COLOR:     u32 = 0xFFCC3333;

const TEXT_PAD:      i32 = 5;
const PERCENT_SCALE: usize = 3;
const LABEL_SCALE:   usize = 2;

const GLOW_MAX_R: i32 = 15;
const GLOW_STEP:  i32 = 3;

// ════════════════════════════════════════════════════════════════════════════
// render — the full per-frame draw list
// ════════════════════════════════════════════════════════════════════════════

/// Draw one frame of feedback.  `bar_px` is the fill offset from the bar
/// top (0 = full, `BAR_H` = empty) and `percent` the readout value; both
/// are the retained last-known values when no signal exists this frame.
pub fn render(
    frame:   &mut FrameBuf,
    hand:    Option<&HandSnapshot>,
    signal:  Option<&ControlSignal>,
    bar_px:  f32,
    percent: f32,
) {
    wash(frame, OVERLAY_COLOR, OVERLAY_ALPHA);

    if let Some(hand) = hand {
        draw_skeleton(frame, hand);
    }

    if let Some(sig) = signal {
        let t = (sig.thumb.0 as i32, sig.thumb.1 as i32);
        let i = (sig.index.0 as i32, sig.index.1 as i32);

        // Soft glow on both tips: shrinking discs, intensity ∝ radius.
        let mut r = GLOW_MAX_R;
        while r > 0 {
            let c = scale_rgb(HAND_GLOW, r as f32 / GLOW_MAX_R as f32);
            fill_circle(frame, t.0, t.1, r, c);
            fill_circle(frame, i.0, i.1, r, c);
            r -= GLOW_STEP;
        }

        // Tapered connecting stroke: three passes at widths 3, 2, 1.
        let color = match sig.proximity {
            Proximity::Near => LINE_CLOSE,
            Proximity::Far  => LINE_COLOR,
        };
        for width in [3, 2, 1] {
            draw_line(frame, t, i, width, color);
        }
    }

    draw_level_bar(frame, bar_px);
    draw_percent(frame, percent);
    draw_instructions(frame);
}

// ── level bar ────────────────────────────────────────────────────────────────

fn draw_level_bar(frame: &mut FrameBuf, bar_px: f32) {
    gradient_fill(frame, BAR_X, BAR_Y, BAR_W, BAR_H, GRADIENT_TOP, GRADIENT_BOTTOM);

    let offset = (bar_px as i32).clamp(0, BAR_H);
    fill_rounded_rect(frame, BAR_X, BAR_Y + offset, BAR_W, BAR_H - offset, CORNER_R, BAR_COLOR);
}

// ── percentage readout ───────────────────────────────────────────────────────

fn draw_percent(frame: &mut FrameBuf, percent: f32) {
    let text = format!("{}%", percent as i32);
    let x = BAR_X - 10;
    let y = BAR_Y + BAR_H + 40 - (5 * PERCENT_SCALE) as i32;
    draw_label_boxed(frame, &text, x, y, PERCENT_SCALE, TEXT_COLOR);
}

// ── instruction labels ───────────────────────────────────────────────────────

fn draw_instructions(frame: &mut FrameBuf) {
    draw_label_boxed(frame, "Pinch fingers to control volume", 10, 20, LABEL_SCALE, TEXT_COLOR);
    let right_x = frame.w as i32 - 150;
    draw_label_boxed(frame, "Press Q to quit", right_x, 20, LABEL_SCALE, TEXT_COLOR);
}

// ── hand skeleton overlay ────────────────────────────────────────────────────

fn draw_skeleton(frame: &mut FrameBuf, hand: &HandSnapshot) {
    for &(a, b) in HAND_SKELETON.iter() {
        let la = hand.landmark(a);
        let lb = hand.landmark(b);
        draw_line(
            frame,
            (la.x as i32, la.y as i32),
            (lb.x as i32, lb.y as i32),
            1,
            SKELETON_COLOR,
        );
    }
    for lm in hand.landmarks() {
        fill_circle(frame, lm.x as i32, lm.y as i32, 2, JOINT_COLOR);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Primitive drawing helpers
// ════════════════════════════════════════════════════════════════════════════

/// Composite `color` over every pixel at opacity `alpha`.
fn wash(frame: &mut FrameBuf, color: u32, alpha: f32) {
    for px in frame.px.iter_mut() {
        *px = blend(*px, color, alpha);
    }
}

fn fill_rect(frame: &mut FrameBuf, x: i32, y: i32, w: i32, h: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    for row in y..y + h {
        for col in x..x + w {
            frame.set(col, row, color);
        }
    }
}

fn fill_circle(frame: &mut FrameBuf, cx: i32, cy: i32, r: i32, color: u32) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                frame.set(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Straight stroke of the given width: step along the segment, stamping a
/// `width`-sided square at each point.
fn draw_line(frame: &mut FrameBuf, from: (i32, i32), to: (i32, i32), width: i32, color: u32) {
    let (x0, y0) = (from.0 as f32, from.1 as f32);
    let (x1, y1) = (to.0 as f32, to.1 as f32);
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i32;
    let half = width / 2;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let px = (x0 + (x1 - x0) * t).round() as i32;
        let py = (y0 + (y1 - y0) * t).round() as i32;
        fill_rect(frame, px - half, py - half, width, width, color);
    }
}

/// Two-tone vertical gradient, one blended scanline at a time.
fn gradient_fill(frame: &mut FrameBuf, x: i32, y: i32, w: i32, h: i32, top: u32, bottom: u32) {
    if h <= 0 {
        return;
    }
    for i in 0..h {
        let row_color = blend(top, bottom, i as f32 / h as f32);
        fill_rect(frame, x, y + i, w, 1, row_color);
    }
}

/// Rounded rectangle from two overlapping rects plus four corner discs.
/// The radius shrinks for degenerate sizes so small fills stay valid.
fn fill_rounded_rect(frame: &mut FrameBuf, x: i32, y: i32, w: i32, h: i32, radius: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let r = radius.min(w / 2).min(h / 2);
    fill_rect(frame, x + r, y, w - 2 * r, h, color);
    fill_rect(frame, x, y + r, w, h - 2 * r, color);
    if r > 0 {
        fill_circle(frame, x + r,         y + r,         r, color);
        fill_circle(frame, x + w - 1 - r, y + r,         r, color);
        fill_circle(frame, x + r,         y + h - 1 - r, r, color);
        fill_circle(frame, x + w - 1 - r, y + h - 1 - r, r, color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Text — 3×5 bitmap font with integer scaling
// ════════════════════════════════════════════════════════════════════════════

/// Pixel size of `text` at the given scale (3×5 glyphs, 1-column gap).
fn measure_label(text: &str, scale: usize) -> (i32, i32) {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return (0, (5 * scale) as i32);
    }
    ((chars * 4 - 1) * scale as i32, (5 * scale) as i32)
}

fn draw_label(frame: &mut FrameBuf, text: &str, x: i32, y: i32, scale: usize, color: u32) {
    let s = scale as i32;
    let mut cx = x;
    for ch in text.chars() {
        let glyph = char_glyph(ch);
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..3i32 {
                if bits & (1 << (2 - col)) != 0 {
                    fill_rect(frame, cx + col * s, y + row as i32 * s, s, s, color);
                }
            }
        }
        cx += 4 * s;
    }
}

/// Label over an opaque backing patch: measured bounds plus fixed padding.
fn draw_label_boxed(frame: &mut FrameBuf, text: &str, x: i32, y: i32, scale: usize, color: u32) {
    let (tw, th) = measure_label(text, scale);
    fill_rect(
        frame,
        x - TEXT_PAD,
        y - TEXT_PAD,
        tw + 2 * TEXT_PAD,
        th + 2 * TEXT_PAD,
        TEXT_BG,
    );
    draw_label(frame, text, x, y, scale, color);
}

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Color math
// ════════════════════════════════════════════════════════════════════════════

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

/// Scale the RGB channels of an ARGB color by `t` (glow falloff).
fn scale_rgb(c: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let r = (((c >> 16) & 0xFF) as f32 * t) as u32;
    let g = (((c >>  8) & 0xFF) as f32 * t) as u32;
    let b = ((c & 0xFF) as f32 * t) as u32;
    0xFF000000 | (r << 16) | (g << 8) | b
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{FrameBuf, FRAME_H, FRAME_W};
    use crate::hand::{HandSnapshot, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
    use crate::signal::pinch_signal;

    fn frame() -> FrameBuf {
        FrameBuf::new(FRAME_W, FRAME_H, 0xFFFFFFFF)
    }

    fn hand_with_tips(thumb: (f32, f32), index: (f32, f32)) -> HandSnapshot {
        let mut pts = [(400.0, 400.0); LANDMARK_COUNT];
        pts[THUMB_TIP] = thumb;
        pts[INDEX_TIP] = index;
        HandSnapshot::from_pixels(pts)
    }

    #[test]
    fn wash_darkens_every_frame() {
        let mut f = frame();
        render(&mut f, None, None, BAR_H as f32, 0.0);
        // An undrawn region: right of the bar, clear of all labels.
        let p = f.get(320, 240);
        assert!(p & 0xFF < 0xFF, "wash should darken the backdrop");
        assert_eq!(p >> 24, 0xFF);
    }

    #[test]
    fn glow_intensity_scales_with_radius() {
        let mut f = frame();
        let hand = hand_with_tips((300.0, 240.0), (420.0, 240.0));
        let sig = pinch_signal(Some(&hand)).unwrap();
        render(&mut f, Some(&hand), Some(&sig), 0.0, 100.0);
        // 5 px below the thumb tip: covered last by the radius-6 disc.
        assert_eq!(f.get(300, 245), scale_rgb(HAND_GLOW, 6.0 / 15.0));
    }

    #[test]
    fn line_color_follows_proximity() {
        // Far pair: green stroke at the segment midpoint.
        let mut f = frame();
        let far = hand_with_tips((200.0, 240.0), (400.0, 240.0));
        let sig = pinch_signal(Some(&far)).unwrap();
        render(&mut f, Some(&far), Some(&sig), 0.0, 100.0);
        assert_eq!(f.get(300, 240), LINE_COLOR);

        // Near pair: red stroke.
        let mut f = frame();
        let near = hand_with_tips((300.0, 240.0), (330.0, 240.0));
        let sig = pinch_signal(Some(&near)).unwrap();
        render(&mut f, Some(&near), Some(&sig), 300.0, 0.0);
        assert_eq!(f.get(315, 240), LINE_CLOSE);
    }

    #[test]
    fn full_bar_fills_to_top() {
        let mut f = frame();
        render(&mut f, None, None, 0.0, 100.0);
        // Centre column, just under the rounded top edge.
        let x = (BAR_X + BAR_W / 2) as usize;
        let y = (BAR_Y + CORNER_R) as usize;
        assert_eq!(f.get(x, y), BAR_COLOR);
    }

    #[test]
    fn empty_bar_leaves_gradient_visible() {
        let mut f = frame();
        render(&mut f, None, None, BAR_H as f32, 0.0);
        let x = (BAR_X + BAR_W / 2) as usize;
        let y = (BAR_Y + BAR_H / 2) as usize;
        assert_ne!(f.get(x, y), BAR_COLOR);
    }

    #[test]
    fn degenerate_small_bar_does_not_panic() {
        let mut f = frame();
        // Fill height below 2×radius must shrink the corner radius, not
        // produce negative-dimension primitives.
        fill_rounded_rect(&mut f, BAR_X, BAR_Y + BAR_H - 5, BAR_W, 5, CORNER_R, BAR_COLOR);
        fill_rounded_rect(&mut f, 0, 0, 3, 1, CORNER_R, BAR_COLOR);
        fill_rounded_rect(&mut f, 0, 0, 10, 0, CORNER_R, BAR_COLOR);
    }

    #[test]
    fn rounded_rect_fills_interior() {
        let mut f = frame();
        fill_rounded_rect(&mut f, 100, 100, 60, 60, 20, BAR_COLOR);
        assert_eq!(f.get(130, 130), BAR_COLOR);
        // Outermost corner pixel stays untouched.
        assert_ne!(f.get(100, 100), BAR_COLOR);
    }

    #[test]
    fn gradient_interpolates_top_to_bottom() {
        let mut f = frame();
        gradient_fill(&mut f, 200, 200, 10, 100, GRADIENT_TOP, GRADIENT_BOTTOM);
        let top    = f.get(205, 200) & 0xFF;
        let bottom = f.get(205, 299) & 0xFF;
        assert!(top < bottom);
    }

    #[test]
    fn measure_label_scales() {
        let (w1, h1) = measure_label("100%", 1);
        assert_eq!(w1, 4 * 4 - 1);
        assert_eq!(h1, 5);
        let (w3, h3) = measure_label("100%", 3);
        assert_eq!(w3, w1 * 3);
        assert_eq!(h3, 15);
    }

    #[test]
    fn boxed_label_backs_text_with_patch() {
        let mut f = frame();
        draw_label_boxed(&mut f, "70%", 200, 200, 3, TEXT_COLOR);
        // Padding pixel left of the text is the opaque backing color.
        assert_eq!(f.get(196, 200), TEXT_BG);
    }

    #[test]
    fn scale_rgb_endpoints() {
        assert_eq!(scale_rgb(0xFFFFFF00, 1.0), 0xFFFFFF00);
        assert_eq!(scale_rgb(0xFFFFFF00, 0.0), 0xFF000000);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF102030, 0xFF000000, 0.0), 0xFF102030);
        assert_eq!(blend(0xFF102030, 0xFF000000, 1.0), 0xFF000000);
    }
}

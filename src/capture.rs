//! Frame buffer and the video-capture seam.
//!
//! The capture source is an external collaborator behind [`FrameSource`]:
//! the default [`SimFrameSource`] synthesizes a backdrop so the pipeline
//! runs with no camera attached, and the `camera` feature swaps in a real
//! webcam via `nokhwa`.

// ════════════════════════════════════════════════════════════════════════════
// Frame geometry
// ════════════════════════════════════════════════════════════════════════════

/// Requested capture resolution.
pub const FRAME_W: usize = 640;
pub const FRAME_H: usize = 480;

// ════════════════════════════════════════════════════════════════════════════
// FrameBuf — one ARGB frame, row-major
// ════════════════════════════════════════════════════════════════════════════

/// A single frame as packed 0xAARRGGBB pixels.
#[derive(Clone, Debug)]
pub struct FrameBuf {
    pub px: Vec<u32>,
    pub w:  usize,
    pub h:  usize,
}

impl FrameBuf {
    pub fn new(w: usize, h: usize, fill: u32) -> Self {
        FrameBuf { px: vec![fill; w * h], w, h }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.px[y * self.w + x]
    }

    /// Clipped pixel write; out-of-frame coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = color;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait — unified interface for camera and sim
// ════════════════════════════════════════════════════════════════════════════

/// A live capture source.  `grab` blocks until the next frame is ready and
/// returns `None` on a transient read failure — the loop skips that
/// iteration and retries on the next one.
pub trait FrameSource {
    fn grab(&mut self) -> Option<FrameBuf>;
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource — synthetic backdrop (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Stand-in capture source: a dark vertical gradient backdrop at the
/// requested resolution, regenerated every frame.
pub struct SimFrameSource {
    w: usize,
    h: usize,
}

impl SimFrameSource {
    pub fn new(w: usize, h: usize) -> Self {
        SimFrameSource { w, h }
    }
}

impl FrameSource for SimFrameSource {
    fn grab(&mut self) -> Option<FrameBuf> {
        let mut frame = FrameBuf::new(self.w, self.h, 0xFF000000);
        for y in 0..self.h {
            // 0x20 at the top shading down to 0x40 at the bottom
            let v = 0x20 + (0x20 * y / self.h.max(1)) as u32;
            let row = 0xFF000000 | (v << 16) | (v << 8) | v;
            let start = y * self.w;
            frame.px[start..start + self.w].fill(row);
        }
        Some(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource — real webcam via nokhwa (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "camera")]
pub struct CameraSource {
    camera: nokhwa::Camera,
}

#[cfg(feature = "camera")]
impl CameraSource {
    /// Open capture device `index` at the requested resolution.
    pub fn open(index: u32) -> Result<Self, String> {
        use nokhwa::pixel_format::RgbFormat;
        use nokhwa::utils::{
            CameraIndex, RequestedFormat, RequestedFormatType, Resolution,
        };

        let format = RequestedFormat::new::<RgbFormat>(
            RequestedFormatType::Closest(nokhwa::utils::CameraFormat::new(
                Resolution::new(FRAME_W as u32, FRAME_H as u32),
                nokhwa::utils::FrameFormat::MJPEG,
                30,
            )),
        );
        let mut camera = nokhwa::Camera::new(CameraIndex::Index(index), format)
            .map_err(|e| e.to_string())?;
        camera.open_stream().map_err(|e| e.to_string())?;
        Ok(CameraSource { camera })
    }
}

#[cfg(feature = "camera")]
impl FrameSource for CameraSource {
    fn grab(&mut self) -> Option<FrameBuf> {
        use nokhwa::pixel_format::RgbFormat;

        let raw = self.camera.frame().ok()?;
        let decoded = raw.decode_image::<RgbFormat>().ok()?;
        let (w, h) = (decoded.width() as usize, decoded.height() as usize);
        let mut frame = FrameBuf::new(w, h, 0xFF000000);
        for (i, rgb) in decoded.pixels().enumerate() {
            let [r, g, b] = rgb.0;
            frame.px[i] = 0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        }
        Some(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuf_set_get_roundtrip() {
        let mut f = FrameBuf::new(8, 8, 0xFF000000);
        f.set(3, 4, 0xFFABCDEF);
        assert_eq!(f.get(3, 4), 0xFFABCDEF);
    }

    #[test]
    fn framebuf_set_clips_out_of_bounds() {
        let mut f = FrameBuf::new(8, 8, 0xFF111111);
        f.set(-1, 0, 0xFFFFFFFF);
        f.set(0, -1, 0xFFFFFFFF);
        f.set(8, 0, 0xFFFFFFFF);
        f.set(0, 8, 0xFFFFFFFF);
        assert!(f.px.iter().all(|&p| p == 0xFF111111));
    }

    #[test]
    fn sim_source_yields_requested_resolution() {
        let mut src = SimFrameSource::new(FRAME_W, FRAME_H);
        let frame = src.grab().unwrap();
        assert_eq!(frame.w, FRAME_W);
        assert_eq!(frame.h, FRAME_H);
        assert_eq!(frame.px.len(), FRAME_W * FRAME_H);
    }

    #[test]
    fn sim_backdrop_darker_at_top() {
        let mut src = SimFrameSource::new(FRAME_W, FRAME_H);
        let frame = src.grab().unwrap();
        let top    = frame.get(0, 0) & 0xFF;
        let bottom = frame.get(0, FRAME_H - 1) & 0xFF;
        assert!(top < bottom);
    }
}

// ============================================================================
// SOFTWARE RASTERIZER
// ============================================================================

use crate::config::Color;
use crate::geometry::Point2D;
use crate::render::CompassCanvas;

/// Samples per axis when estimating polygon coverage.
const SUBSAMPLES: usize = 4;

/// RGBA8 frame buffer, row major, `width * height * 4` bytes.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap a frame. The height is clamped to the rows actually present in `frame`.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let rows = if width == 0 { 0 } else { frame.len() / (width * 4) };
        Self {
            frame,
            width,
            height: height.min(rows),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some((self.frame[idx], self.frame[idx + 1], self.frame[idx + 2]))
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        let out = [
            blend(color.r, self.frame[idx]),
            blend(color.g, self.frame[idx + 1]),
            blend(color.b, self.frame[idx + 2]),
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Pixel range covering `[min, max]`, clipped to `0..limit`.
    fn clip_span(min: f64, max: f64, limit: usize) -> std::ops::Range<usize> {
        let start = min.floor().max(0.0) as usize;
        let end = (max.ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }
}

impl CompassCanvas for Canvas<'_> {
    fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Anti-aliased ring centred on `radius`, `stroke_width` wide.
    fn stroke_circle(&mut self, center: Point2D, radius: f64, stroke_width: f64, color: Color) {
        if !center.is_finite() || !radius.is_finite() || !stroke_width.is_finite() {
            return;
        }
        if radius <= 0.0 || stroke_width <= 0.0 {
            return;
        }
        let outer = radius + stroke_width / 2.0;
        let inner = (radius - stroke_width / 2.0).max(0.0);

        let xs = Self::clip_span(center.x - outer - 1.0, center.x + outer + 1.0, self.width);
        let ys = Self::clip_span(center.y - outer - 1.0, center.y + outer + 1.0, self.height);
        for y in ys {
            for x in xs.clone() {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (outer + 0.5 - dist).clamp(0.0, 1.0) * (dist - inner + 0.5).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    /// Even-odd polygon fill with supersampled edge coverage.
    fn fill_path(&mut self, points: &[Point2D], color: Color) {
        let mut polygon = points;
        if let (Some(first), Some(last)) = (polygon.first(), polygon.last()) {
            if polygon.len() > 1 && first == last {
                polygon = &polygon[..polygon.len() - 1];
            }
        }
        if polygon.len() < 3 || polygon.iter().any(|p| !p.is_finite()) {
            return;
        }

        let (min_x, max_x, min_y, max_y) = polygon.iter().fold(
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );
        let xs = Self::clip_span(min_x, max_x, self.width);
        let ys = Self::clip_span(min_y, max_y, self.height);

        let step = 1.0 / SUBSAMPLES as f64;
        let total = (SUBSAMPLES * SUBSAMPLES) as f32;
        for y in ys {
            for x in xs.clone() {
                let mut hits = 0usize;
                for sy in 0..SUBSAMPLES {
                    for sx in 0..SUBSAMPLES {
                        let px = x as f64 + (sx as f64 + 0.5) * step;
                        let py = y as f64 + (sy as f64 + 0.5) * step;
                        if contains(polygon, px, py) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    self.set_pixel(x, y, color, hits as f32 / total);
                }
            }
        }
    }
}

/// Even-odd crossing test.
fn contains(polygon: &[Point2D], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

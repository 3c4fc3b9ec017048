use crate::sample::Sample;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use rand::Rng;

// ============================================================================
// RandomBrightness
// ============================================================================

/// Scales the HSV value channel of every pixel by
/// `median + dev * U(-1, 1)`, leaving hue and saturation alone.
///
/// Scaled values are truncated and saturate at 255.
/// Steering is unaffected.
///
/// # Example
/// ```ignore
/// let brightness = RandomBrightness::default(); // median 0.8, dev 0.4
/// let darker_or_lighter = brightness.apply(sample, &mut rng)?;
/// ```
#[derive(Debug, Clone)]
pub struct RandomBrightness {
    median: f64,
    dev: f64,
}

impl RandomBrightness {
    pub fn new(median: f64, dev: f64) -> Result<Self> {
        ensure!(
            median.is_finite() && dev.is_finite() && dev >= 0.0,
            "Brightness median and deviation must be finite, deviation non-negative (got median={}, dev={})",
            median,
            dev
        );
        Ok(Self { median, dev })
    }

    /// Multiplies the value channel by a fixed `factor`.
    pub fn scale_value(img: &RgbImage, factor: f64) -> RgbImage {
        RgbImage::from_fn(img.width(), img.height(), |x, y| {
            let [h, s, v] = rgb_to_hsv(img.get_pixel(x, y));
            let v = ((v * 255.0).round() * factor).floor().clamp(0.0, 255.0) / 255.0;
            hsv_to_rgb([h, s, v])
        })
    }
}

impl Default for RandomBrightness {
    fn default() -> Self {
        Self {
            median: 0.8,
            dev: 0.4,
        }
    }
}

impl Transform<Sample, Sample> for RandomBrightness {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, rng: &mut R) -> Result<Sample> {
        let factor = self.median + self.dev * rng.random_range(-1.0..1.0);
        Ok(sample.map_image(|img| Self::scale_value(&img, factor)))
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
fn rgb_to_hsv(px: &Rgb<u8>) -> [f64; 3] {
    let [r, g, b] = px.0.map(|c| c as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    [h, s, max]
}

fn hsv_to_rgb([h, s, v]: [f64; 3]) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb([r, g, b].map(|ch| ((ch + m) * 255.0).round().clamp(0.0, 255.0) as u8))
}

// ============================================================================
// RandomShadow
// ============================================================================

/// Darkens a random quadrilateral band that spans the whole frame.
///
/// With even odds the band runs top-to-bottom (its corners slide along the
/// top and bottom edges) or left-to-right (corners slide along the left and
/// right edges). One pair of corners is drawn from the first half of that
/// edge and the other pair from the second half.
///
/// Pixels inside the band are blended towards black with weight
/// `alpha ~ U(min_alpha, max_alpha)`, i.e. scaled by `1 - alpha`.
/// Dimensions and steering are unchanged.
#[derive(Debug, Clone)]
pub struct RandomShadow {
    min_alpha: f64,
    max_alpha: f64,
}

impl RandomShadow {
    pub fn new(min_alpha: f64, max_alpha: f64) -> Result<Self> {
        ensure!(
            0.0 <= min_alpha && min_alpha < max_alpha && max_alpha <= 1.0,
            "Shadow blend weights must satisfy 0 <= min < max <= 1 (got {}..{})",
            min_alpha,
            max_alpha
        );
        Ok(Self {
            min_alpha,
            max_alpha,
        })
    }

    /// Draws the four corners of a shadow band for a `width x height` frame.
    pub fn random_polygon<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> [Point<i32>; 4] {
        let (w, h) = (width as i32, height as i32);
        if rng.random::<f64>() < 0.5 {
            [
                Point::new(rng.random_range(0..=w / 2), 0),
                Point::new(rng.random_range(w / 2..=w), 0),
                Point::new(rng.random_range(w / 2..=w), h),
                Point::new(rng.random_range(0..=w / 2), h),
            ]
        } else {
            [
                Point::new(0, rng.random_range(0..=h / 2)),
                Point::new(0, rng.random_range(h / 2..=h)),
                Point::new(w, rng.random_range(h / 2..=h)),
                Point::new(w, rng.random_range(0..=h / 2)),
            ]
        }
    }

    /// Scales every pixel inside `polygon` by `1 - alpha`.
    pub fn darken(img: &RgbImage, polygon: &[Point<i32>], alpha: f64) -> RgbImage {
        let mut mask = GrayImage::new(img.width(), img.height());
        draw_polygon_mut(&mut mask, polygon, Luma([255u8]));

        let keep = 1.0 - alpha;
        let mut out = img.clone();
        for (px, m) in out.pixels_mut().zip(mask.pixels()) {
            if m[0] > 0 {
                for c in px.0.iter_mut() {
                    *c = (*c as f64 * keep).round() as u8;
                }
            }
        }
        out
    }
}

impl Default for RandomShadow {
    fn default() -> Self {
        Self {
            min_alpha: 0.6,
            max_alpha: 0.9,
        }
    }
}

impl Transform<Sample, Sample> for RandomShadow {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, rng: &mut R) -> Result<Sample> {
        let (width, height) = sample.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Cannot cast a shadow on an empty image ({}x{})",
            width,
            height
        );
        let polygon = Self::random_polygon(width, height, rng);
        let alpha = rng.random_range(self.min_alpha..self.max_alpha);
        Ok(sample.map_image(|img| Self::darken(&img, &polygon, alpha)))
    }
}

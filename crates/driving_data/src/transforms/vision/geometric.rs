use crate::sample::Sample;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{imageops, imageops::FilterType, Rgb, RgbImage};
use rand::Rng;
use std::f64::consts::PI;

/// First image row kept by [`Crop`]; everything above is sky.
pub const HORIZON: u32 = 60;
/// First image row dropped by [`Crop`]; everything from here down is the bonnet.
pub const BONNET: u32 = 136;

// ============================================================================
// Crop
// ============================================================================

/// Keeps the band of rows `[horizon, bonnet)` at full width, discarding the
/// sky above the horizon line and the car's bonnet below.
///
/// Deterministic: the output is always `bonnet - horizon` rows tall.
/// Frames shorter than `bonnet` rows are rejected.
#[derive(Debug, Clone)]
pub struct Crop {
    horizon: u32,
    bonnet: u32,
}

impl Crop {
    pub fn new(horizon: u32, bonnet: u32) -> Result<Self> {
        ensure!(
            horizon < bonnet,
            "Horizon row must lie above the bonnet row (got horizon={}, bonnet={})",
            horizon,
            bonnet
        );
        Ok(Self { horizon, bonnet })
    }

    pub fn crop_image(&self, img: &RgbImage) -> Result<RgbImage> {
        let (width, height) = img.dimensions();
        ensure!(
            height >= self.bonnet,
            "Image is {} rows tall, cannot crop rows [{}, {})",
            height,
            self.horizon,
            self.bonnet
        );
        Ok(imageops::crop_imm(img, 0, self.horizon, width, self.bonnet - self.horizon).to_image())
    }
}

impl Default for Crop {
    fn default() -> Self {
        Self {
            horizon: HORIZON,
            bonnet: BONNET,
        }
    }
}

impl Transform<Sample, Sample> for Crop {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, _rng: &mut R) -> Result<Sample> {
        let image = self.crop_image(&sample.image)?;
        Ok(Sample::new(image, sample.steering))
    }
}

// ============================================================================
// Resize
// ============================================================================

/// Resamples a frame to exactly `width x height` (aspect ratio is not kept).
///
/// # Filter Types
/// - `Nearest`: Nearest neighbour, fastest
/// - `Triangle`: Bilinear filter; when shrinking, its support widens with the
///   scale factor so it averages the covered source area. Default.
/// - `CatmullRom`: Bicubic sharpening
/// - `Gaussian`: Blurring/smoothing
/// - `Lanczos3`: Lanczos with window 3, highest quality re-sampling but slowest.
#[derive(Debug, Clone)]
pub struct Resize {
    width: u32,
    height: u32,
    filter: FilterType,
}

impl Resize {
    pub fn new(width: u32, height: u32, filter: FilterType) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "Image dimensions must be positive after resizing (got {}x{})",
            width,
            height
        );
        Ok(Self {
            width,
            height,
            filter,
        })
    }
}

impl Transform<Sample, Sample> for Resize {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, _rng: &mut R) -> Result<Sample> {
        Ok(sample.map_image(|img| imageops::resize(&img, self.width, self.height, self.filter)))
    }
}

// ============================================================================
// RandomShear
// ============================================================================

/// Shears the frame horizontally about its bottom edge and relabels the
/// steering angle to match, simulating a lateral shift of the road.
///
/// A pixel offset `dx` is drawn uniformly from `[-shear_range, shear_range]`.
/// The affine map fixes the bottom-left and bottom-right corners and moves the
/// point at `(width/2, height/2)` to `(width/2 + dx, height/2)`. Pixels mapped
/// from outside the frame replicate the nearest edge pixel.
///
/// Steering adjustment:
/// ```text
/// dsteering = dx / (height/2) * 360 / (2π * 25.0) / 6.0
/// ```
#[derive(Debug, Clone)]
pub struct RandomShear {
    shear_range: u32,
}

impl RandomShear {
    pub const DEFAULT_RANGE: u32 = 200;

    /// `shear_range` must fit in an `i32` so that `-range..=range` can be sampled.
    pub fn new(shear_range: u32) -> Result<Self> {
        ensure!(
            shear_range <= i32::MAX as u32,
            "Shear range must be at most {} pixels, but got shear_range={}",
            i32::MAX,
            shear_range
        );
        Ok(Self { shear_range })
    }

    /// Steering delta implied by shearing a frame of `height` rows by `dx` pixels.
    pub fn steering_delta(dx: i32, height: u32) -> f64 {
        dx as f64 / (height as f64 / 2.0) * 360.0 / (2.0 * PI * 25.0) / 6.0
    }

    /// Shears by an explicit offset.
    pub fn shear_by(&self, sample: Sample, dx: i32) -> Result<Sample> {
        let (width, height) = sample.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Cannot shear an empty image ({}x{})",
            width,
            height
        );
        let steering = sample.steering + Self::steering_delta(dx, height);
        Ok(Sample::new(shear_image(&sample.image, dx), steering))
    }
}

impl Default for RandomShear {
    fn default() -> Self {
        Self {
            shear_range: Self::DEFAULT_RANGE,
        }
    }
}

impl Transform<Sample, Sample> for RandomShear {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, rng: &mut R) -> Result<Sample> {
        let range = i32::try_from(self.shear_range)?;
        let dx = rng.random_range(-range..=range);
        self.shear_by(sample, dx)
    }
}

/// Warps `img` with `x' = x + k * (height - y)`, `k = 2 * dx / height`.
///
/// Rows are never displaced vertically, so each destination pixel is a
/// linear blend of two horizontally adjacent source pixels, with source
/// columns clamped to the frame.
fn shear_image(img: &RgbImage, dx: i32) -> RgbImage {
    let (width, height) = img.dimensions();
    let k = 2.0 * dx as f64 / height as f64;
    let max_x = width as i64 - 1;

    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        let shift = k * (height - y) as f64;
        for x in 0..width {
            let src_x = x as f64 - shift;
            let x0 = src_x.floor();
            let t = src_x - x0;
            let left = img.get_pixel((x0 as i64).clamp(0, max_x) as u32, y);
            let right = img.get_pixel((x0 as i64 + 1).clamp(0, max_x) as u32, y);

            let mut px = [0u8; 3];
            for c in 0..3 {
                let v = left[c] as f64 * (1.0 - t) + right[c] as f64 * t;
                px[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x, y, Rgb(px));
        }
    }
    out
}

use crate::sample::Sample;
use crate::transforms::vision::{RandomBrightness, RandomShadow, RandomShear};
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::imageops;
use rand::Rng;

// ============================================================================
// RandomHorizontalFlip
// ============================================================================

/// Randomly mirrors a frame left-right and negates its steering angle.
///
/// # Example
/// ```ignore
/// let flip = RandomHorizontalFlip::new(0.5)?; // 50% flip chance
/// let augmented = flip.apply(sample, &mut rng)?;
/// ```
#[derive(Debug, Clone)]
pub struct RandomHorizontalFlip {
    p: f64,
}

impl RandomHorizontalFlip {
    pub fn new(p: f64) -> Result<Self> {
        ensure_probability(p)?;
        Ok(Self { p })
    }

    /// Mirrors unconditionally.
    pub fn flip(sample: Sample) -> Sample {
        Sample::new(imageops::flip_horizontal(&sample.image), -sample.steering)
    }
}

impl Default for RandomHorizontalFlip {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl Transform<Sample, Sample> for RandomHorizontalFlip {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, rng: &mut R) -> Result<Sample> {
        let result = match self.p {
            // Fast path: never flip
            0.0 => sample,
            // Fast path: always flip
            1.0 => Self::flip(sample),
            _ => {
                if rng.random_bool(self.p) {
                    Self::flip(sample)
                } else {
                    sample
                }
            }
        };
        Ok(result)
    }
}

// ============================================================================
// Augmenter
// ============================================================================

/// Composes the randomized transforms applied to one `(image, steering)` pair.
///
/// Steps run in a fixed order, on the full uncropped frame:
/// 1. shear, with probability `shear_prob`
/// 2. horizontal flip, if configured
/// 3. brightness, if configured
/// 4. shadow, if configured
///
/// `Augmenter::default()` enables only step 1 with `shear_prob = 0.5`.
/// Cropping and resizing are not part of the composer; the batch generator
/// decides whether they follow it.
#[derive(Debug, Clone)]
pub struct Augmenter {
    shear: RandomShear,
    shear_prob: f64,
    flip: Option<RandomHorizontalFlip>,
    brightness: Option<RandomBrightness>,
    shadow: Option<RandomShadow>,
}

impl Augmenter {
    pub fn new(shear: RandomShear, shear_prob: f64) -> Result<Self> {
        ensure_probability(shear_prob)?;
        Ok(Self {
            shear,
            shear_prob,
            flip: None,
            brightness: None,
            shadow: None,
        })
    }

    pub fn with_flip(mut self, flip: RandomHorizontalFlip) -> Self {
        self.flip = Some(flip);
        self
    }

    pub fn with_brightness(mut self, brightness: RandomBrightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_shadow(mut self, shadow: RandomShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

impl Default for Augmenter {
    fn default() -> Self {
        Self {
            shear: RandomShear::default(),
            shear_prob: 0.5,
            flip: None,
            brightness: None,
            shadow: None,
        }
    }
}

impl Transform<Sample, Sample> for Augmenter {
    fn apply<R: Rng + ?Sized>(&self, sample: Sample, rng: &mut R) -> Result<Sample> {
        let mut sample = sample;

        if rng.random::<f64>() < self.shear_prob {
            sample = self.shear.apply(sample, rng)?;
        }
        if let Some(flip) = &self.flip {
            sample = flip.apply(sample, rng)?;
        }
        if let Some(brightness) = &self.brightness {
            sample = brightness.apply(sample, rng)?;
        }
        if let Some(shadow) = &self.shadow {
            sample = shadow.apply(sample, rng)?;
        }
        Ok(sample)
    }
}

fn ensure_probability(p: f64) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&p),
        "Probability must be in [0.0, 1.0] range (got {})",
        p
    );
    Ok(())
}

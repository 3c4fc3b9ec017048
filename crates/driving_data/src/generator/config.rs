//! src/generator/config.rs
//!
//! Configuration for batch generation.
//!
//! Example:
//! ```ignore
//! let config = GeneratorConfig::builder()
//!     .batch_size(64)
//!     .augment(true)
//!     .resize(64, 64)
//!     .seed(42)
//!     .build();
//! ```
//!
//! Configs can also be read from JSON; fields left out keep their defaults:
//! ```json
//! { "batch_size": 128, "flip_prob": 0.5, "brightness": { "median": 0.8, "dev": 0.4 } }
//! ```

use crate::transforms::vision::{
    Augmenter, Crop, RandomBrightness, RandomHorizontalFlip, RandomShadow, RandomShear, Resize,
    BONNET, HORIZON,
};
use anyhow::{ensure, Context, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resampling filter used when resizing cropped frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters of the random brightness step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessConfig {
    pub median: f64,
    pub dev: f64,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            median: 0.8,
            dev: 0.4,
        }
    }
}

/// Configuration for [`BatchGenerator`](super::BatchGenerator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of samples per batch
    pub batch_size: usize,
    /// Run frames through the augmentation composer
    pub augment: bool,
    /// Crop and resize augmented frames too. When `false`, augmented frames
    /// keep their loaded size and batches may mix sizes.
    pub crop_augmented: bool,
    /// Output frame width after resizing
    pub resize_width: u32,
    /// Output frame height after resizing
    pub resize_height: u32,
    pub resize_filter: ResizeFilter,
    /// First row kept by the crop
    pub horizon: u32,
    /// First row dropped by the crop
    pub bonnet: u32,
    /// Maximum horizontal shear offset, in pixels
    pub shear_range: u32,
    /// Probability of shearing a frame
    pub shear_prob: f64,
    /// Probability of mirroring a frame; `None` disables flipping
    pub flip_prob: Option<f64>,
    /// Random brightness parameters; `None` disables the step
    pub brightness: Option<BrightnessConfig>,
    /// Cast random shadows
    pub shadow: bool,
    /// Random seed for reproducible batches. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            augment: true,
            crop_augmented: true,
            resize_width: 64,
            resize_height: 64,
            resize_filter: ResizeFilter::Triangle,
            horizon: HORIZON,
            bonnet: BONNET,
            shear_range: RandomShear::DEFAULT_RANGE,
            shear_prob: 0.5,
            flip_prob: None,
            brightness: None,
            shadow: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Reads a JSON config file. Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse generator config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a usable pipeline.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.batch_size > 0,
            "batch_size must be > 0, but got batch_size={}",
            self.batch_size
        );
        self.crop()?;
        self.resize()?;
        self.augmenter()?;
        Ok(())
    }

    pub(crate) fn crop(&self) -> Result<Crop> {
        Crop::new(self.horizon, self.bonnet)
    }

    pub(crate) fn resize(&self) -> Result<Resize> {
        Resize::new(
            self.resize_width,
            self.resize_height,
            self.resize_filter.into(),
        )
    }

    pub(crate) fn augmenter(&self) -> Result<Augmenter> {
        let mut augmenter = Augmenter::new(RandomShear::new(self.shear_range)?, self.shear_prob)?;
        if let Some(p) = self.flip_prob {
            augmenter = augmenter.with_flip(RandomHorizontalFlip::new(p)?);
        }
        if let Some(b) = self.brightness {
            augmenter = augmenter.with_brightness(RandomBrightness::new(b.median, b.dev)?);
        }
        if self.shadow {
            augmenter = augmenter.with_shadow(RandomShadow::default());
        }
        Ok(augmenter)
    }
}

/// Builder for GeneratorConfig with method chaining
#[derive(Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Set the batch size (must be > 0)
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    /// Enable or disable augmentation
    pub fn augment(mut self, augment: bool) -> Self {
        self.config.augment = augment;
        self
    }

    /// Set whether augmented frames are cropped and resized as well
    pub fn crop_augmented(mut self, crop: bool) -> Self {
        self.config.crop_augmented = crop;
        self
    }

    /// Set the output frame size
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.config.resize_width = width;
        self.config.resize_height = height;
        self
    }

    pub fn resize_filter(mut self, filter: ResizeFilter) -> Self {
        self.config.resize_filter = filter;
        self
    }

    /// Set the crop band `[horizon, bonnet)`
    pub fn crop_rows(mut self, horizon: u32, bonnet: u32) -> Self {
        self.config.horizon = horizon;
        self.config.bonnet = bonnet;
        self
    }

    pub fn shear_range(mut self, range: u32) -> Self {
        self.config.shear_range = range;
        self
    }

    pub fn shear_prob(mut self, p: f64) -> Self {
        self.config.shear_prob = p;
        self
    }

    pub fn flip_prob(mut self, p: f64) -> Self {
        self.config.flip_prob = Some(p);
        self
    }

    pub fn brightness(mut self, median: f64, dev: f64) -> Self {
        self.config.brightness = Some(BrightnessConfig { median, dev });
        self
    }

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.config.shadow = shadow;
        self
    }

    /// Set the random seed for reproducible batches.
    ///
    /// When set, this seed controls row sampling, camera choice and every
    /// augmentation draw.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

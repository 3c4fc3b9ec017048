//! src/generator/loader.rs
//!
//! `BatchGenerator`: ties the driving log, sampler, frame loader and
//! transforms together and produces one [`MiniBatch`] per call.

use crate::camera::CameraView;
use crate::dataset::DrivingLog;
use crate::minibatch::MiniBatch;
use crate::sample::Sample;
use crate::sampler::RandomBatchSampler;
use crate::transforms::vision::{Augmenter, Crop, LoadImage, Resize};
use crate::transforms::{Chain, Transform};
use anyhow::{ensure, Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GeneratorConfig;
use super::iterator::BatchIter;

/// Produces training batches from a driving log.
///
/// Each batch:
/// 1. draws `batch_size` row indices with replacement, then one camera per row
/// 2. loads every selected frame from disk
/// 3. with `augment = true`, runs the frame through the [`Augmenter`], then
///    crops and resizes it if `crop_augmented = true`
/// 4. with `augment = false`, only crops and resizes
///
/// Nothing is cached between batches: every batch re-reads its frames and
/// makes fresh random draws.
///
/// # Example
/// ```ignore
/// let log = DrivingLogReader::new("data/driving_log.csv").has_headers(true).read()?;
/// let config = GeneratorConfig::builder().batch_size(64).seed(42).build();
/// let generator = BatchGenerator::new(log, config)?;
///
/// for batch in generator.iter().take(1000) {
///     let (images, labels) = batch?.to_arrays()?;
///     // feed the training loop
/// }
/// ```
#[derive(Debug)]
pub struct BatchGenerator {
    log: DrivingLog,
    config: GeneratorConfig,
    sampler: RandomBatchSampler,
    loader: LoadImage,
    augmenter: Augmenter,
    preprocess: Chain<Crop, Resize, Sample>,
}

impl BatchGenerator {
    pub fn new(log: DrivingLog, config: GeneratorConfig) -> Result<Self> {
        config.validate().context("Invalid generator config")?;
        ensure!(!log.is_empty(), "Driving log has no rows to sample from");

        let sampler = RandomBatchSampler::new(log.len(), config.batch_size)?;
        let augmenter = config.augmenter()?;
        let preprocess = config.crop()?.then(config.resize()?);

        info!(
            "Batch generator ready: {} rows, batch_size={}, augment={}, output {}x{}",
            log.len(),
            config.batch_size,
            config.augment,
            config.resize_width,
            config.resize_height
        );

        Ok(Self {
            log,
            config,
            sampler,
            loader: LoadImage::new(),
            augmenter,
            preprocess,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn log(&self) -> &DrivingLog {
        &self.log
    }

    /// Starts a fresh, unbounded batch sequence.
    ///
    /// With `config.seed` set, the sequence is seeded with
    /// `StdRng::seed_from_u64(seed)` and every call to `iter()` replays the
    /// same batches. Without a seed, each call draws a new seed.
    pub fn iter(&self) -> BatchIter<'_, StdRng> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        self.iter_with_rng(StdRng::seed_from_u64(seed))
    }

    /// Starts a batch sequence driven by a caller-supplied RNG.
    pub fn iter_with_rng<R: Rng>(&self, rng: R) -> BatchIter<'_, R> {
        BatchIter::new(self, rng)
    }

    /// Builds one batch. The first failing frame aborts the whole batch.
    pub fn next_batch<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MiniBatch> {
        let views = self.sampler.next_batch(&self.log, rng)?;

        let mut samples = Vec::with_capacity(views.len());
        for view in views {
            samples.push(self.process(view, rng)?);
        }
        Ok(MiniBatch::from_samples(samples))
    }

    fn process<R: Rng + ?Sized>(&self, view: CameraView, rng: &mut R) -> Result<Sample> {
        let image = self.loader.apply(view.path, rng)?;
        let sample = Sample::new(image, view.steering);

        if !self.config.augment {
            return self.preprocess.apply(sample, rng);
        }

        let augmented = self.augmenter.apply(sample, rng)?;
        if self.config.crop_augmented {
            self.preprocess.apply(augmented, rng)
        } else {
            Ok(augmented)
        }
    }
}

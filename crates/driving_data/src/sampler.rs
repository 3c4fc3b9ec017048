use crate::camera::CameraView;
use crate::dataset::DrivingLog;
use anyhow::{ensure, Result};
use rand::Rng;

/// A `Sampler` decides which driving-log rows make up the next batch.
///
/// # Associated type
/// - `Item`: The handle yielded per draw (a row index for [`RandomBatchSampler`]).
///
/// # Method
/// - `sample(rng)`: returns the handles for one batch, drawing all randomness
///   from the caller's `rng`.
pub trait Sampler: Send + Sync {
    type Item: Send + Sync;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Self::Item>;
}

/// ============================================================================
/// Uniform sampling of `batch_size` row indices from `0..num_rows`, with
/// replacement. Every draw is independent, so a batch may repeat rows and
/// `batch_size` may exceed `num_rows`.
///
/// # Arguments:
/// - `num_rows`: Number of rows in the driving log. Must be > 0.
/// - `batch_size`: Number of indices per batch. Must be > 0.
///
/// # Example usage
/// ```ignore
/// let sampler = RandomBatchSampler::new(log.len(), 64)?;
/// let views = sampler.next_batch(&log, &mut rng)?; // 64 (path, steering) pairs
/// ```
#[derive(Debug, Clone)]
pub struct RandomBatchSampler {
    num_rows: usize,
    batch_size: usize,
}

impl RandomBatchSampler {
    pub fn new(num_rows: usize, batch_size: usize) -> Result<Self> {
        ensure!(
            num_rows > 0,
            "Cannot sample from an empty driving log (num_rows=0)"
        );
        ensure!(
            batch_size > 0,
            "batch_size must be > 0, but got batch_size={}",
            batch_size
        );
        Ok(Self {
            num_rows,
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Draws a batch of row indices, then one camera per drawn row.
    ///
    /// All indices are drawn before any camera, so the random stream is
    /// consumed in two phases.
    pub fn next_batch<R: Rng + ?Sized>(
        &self,
        log: &DrivingLog,
        rng: &mut R,
    ) -> Result<Vec<CameraView>> {
        self.sample(rng)
            .into_iter()
            .map(|index| CameraView::random(log, index, rng))
            .collect()
    }
}

impl Sampler for RandomBatchSampler {
    type Item = usize;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.batch_size)
            .map(|_| rng.random_range(0..self.num_rows))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::dataset::LogRow;
    use crate::error::DataError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn make_log(n: usize) -> DrivingLog {
        DrivingLog::new(
            (0..n)
                .map(|i| LogRow {
                    center: PathBuf::from(format!("c{i}.png")),
                    left: PathBuf::from(format!("l{i}.png")),
                    right: PathBuf::from(format!("r{i}.png")),
                    steering: i as f64 / 10.0,
                    throttle: 0.0,
                    brake: 0.0,
                    speed: 0.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_indices_in_range() -> Result<()> {
        let sampler = RandomBatchSampler::new(10, 64)?;
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let indices = sampler.sample(&mut rng);
            assert_eq!(indices.len(), 64);
            assert!(indices.iter().all(|&i| i < 10));
        }
        Ok(())
    }

    #[test]
    fn test_sampling_with_replacement() -> Result<()> {
        let sampler = RandomBatchSampler::new(3, 64)?;
        let indices = sampler.sample(&mut StdRng::seed_from_u64(0));

        let unique: HashSet<_> = indices.iter().copied().collect();
        assert_eq!(unique.len(), 3);
        Ok(())
    }

    #[test]
    fn test_same_seed_same_indices() -> Result<()> {
        let sampler = RandomBatchSampler::new(100, 16)?;
        let a = sampler.sample(&mut StdRng::seed_from_u64(7));
        let b = sampler.sample(&mut StdRng::seed_from_u64(7));
        let c = sampler.sample(&mut StdRng::seed_from_u64(8));

        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn test_next_batch_labels_match_camera() -> Result<()> {
        let log = make_log(5);
        let sampler = RandomBatchSampler::new(log.len(), 32)?;
        let views = sampler.next_batch(&log, &mut StdRng::seed_from_u64(1))?;

        assert_eq!(views.len(), 32);
        for view in views {
            let name = view.path.to_string_lossy().into_owned();
            let row: usize = name[1..name.len() - 4].parse()?;
            let expected_prefix = match view.camera {
                Camera::Center => "c",
                Camera::Left => "l",
                Camera::Right => "r",
            };
            assert!(name.starts_with(expected_prefix));
            assert_eq!(
                view.steering,
                log.get(row)?.steering + view.camera.steering_correction()
            );
        }
        Ok(())
    }

    #[test]
    fn test_sampler_larger_than_log_fails_on_lookup() -> Result<()> {
        let sampler = RandomBatchSampler::new(4, 8)?;
        let log = make_log(2);

        // Drawing from 0..4 against a 2-row log must hit an out-of-range row.
        let mut rng = StdRng::seed_from_u64(0);
        let failed = (0..20).any(|_| match sampler.next_batch(&log, &mut rng) {
            Err(e) => matches!(
                e.downcast_ref::<DataError>(),
                Some(DataError::RowIndexOutOfRange { len: 2, .. })
            ),
            Ok(_) => false,
        });
        assert!(failed);
        Ok(())
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RandomBatchSampler::new(0, 64).is_err());
        assert!(RandomBatchSampler::new(10, 0).is_err());
    }
}

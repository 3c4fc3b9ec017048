use crate::sample::Sample;
use anyhow::{anyhow, ensure, Result};
use image::RgbImage;
use ndarray::{Array1, Array4};

/// The `MiniBatch` struct is one emission of the batch generator: two
/// parallel, equal-length sequences of frames and steering labels.
///
/// Frames are kept as individual `RgbImage`s rather than one fixed-shape
/// array, so a batch can hold frames of different sizes (augmented frames
/// that skipped crop/resize). Use [`MiniBatch::to_arrays`] to stack a
/// uniformly-sized batch for a training loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MiniBatch {
    pub images: Vec<RgbImage>,
    pub labels: Vec<f64>,
}

impl MiniBatch {
    /// Splits samples into the parallel image and label sequences.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let (images, labels) = samples
            .into_iter()
            .map(|sample| (sample.image, sample.steering))
            .unzip();
        Self { images, labels }
    }

    /// Returns the number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(width, height)` shared by every frame, or `None` if the batch is
    /// empty or the frames differ in size.
    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        let first = self.images.first()?.dimensions();
        self.images
            .iter()
            .all(|img| img.dimensions() == first)
            .then_some(first)
    }

    /// Re-pairs frames with their labels.
    pub fn into_samples(self) -> impl Iterator<Item = Sample> {
        self.images
            .into_iter()
            .zip(self.labels)
            .map(|(image, steering)| Sample::new(image, steering))
    }

    /// Stacks the batch into model-ready arrays:
    /// - images: `[batch_size, height, width, 3]`, `f32` in `[0.0, 1.0]`
    /// - labels: `[batch_size]`, `f32`
    ///
    /// Fails if the batch is empty or frames differ in size.
    pub fn to_arrays(&self) -> Result<(Array4<f32>, Array1<f32>)> {
        ensure!(!self.is_empty(), "Cannot stack an empty mini-batch");
        let (width, height) = self.image_dimensions().ok_or_else(|| {
            let sizes: Vec<_> = self.images.iter().map(|img| img.dimensions()).collect();
            anyhow!("Shape mismatch: frames in mini-batch have differing sizes {:?}", sizes)
        })?;

        let pixels: Vec<f32> = self
            .images
            .iter()
            .flat_map(|img| img.as_raw().iter().map(|&v| v as f32 / 255.0))
            .collect();
        let images = Array4::from_shape_vec(
            (self.batch_size(), height as usize, width as usize, 3),
            pixels,
        )?;
        let labels = self.labels.iter().map(|&l| l as f32).collect();
        Ok((images, labels))
    }
}

#[cfg(test)]
mod minibatch_test {
    use super::*;
    use image::Rgb;

    /// Helper function: Creates a sample with predictable values
    fn make_sample(value: u8, width: u32, height: u32) -> Sample {
        Sample::new(
            RgbImage::from_pixel(width, height, Rgb([value, 0, 255])),
            value as f64 / 100.0,
        )
    }

    #[test]
    fn test_minibatch_from_samples() {
        let batch = MiniBatch::from_samples(vec![make_sample(1, 4, 2), make_sample(2, 4, 2)]);

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.labels, vec![0.01, 0.02]);
        assert_eq!(batch.image_dimensions(), Some((4, 2)));

        let samples: Vec<_> = batch.into_samples().collect();
        assert_eq!(samples[1], make_sample(2, 4, 2));
    }

    #[test]
    fn test_minibatch_to_arrays() -> Result<()> {
        let batch = MiniBatch::from_samples(vec![make_sample(51, 3, 2), make_sample(102, 3, 2)]);
        let (images, labels) = batch.to_arrays()?;

        assert_eq!(images.shape(), &[2, 2, 3, 3]);
        assert_eq!(labels.len(), 2);
        assert!((images[[1, 1, 2, 0]] - 0.4).abs() < 1e-6);
        assert_eq!(images[[0, 0, 0, 1]], 0.0);
        assert_eq!(images[[0, 0, 0, 2]], 1.0);
        assert!((labels[1] - 1.02).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_minibatch_shape_mismatch() {
        let empty = MiniBatch::from_samples(vec![]);
        assert!(empty.to_arrays().is_err());

        let mixed = MiniBatch::from_samples(vec![make_sample(1, 4, 2), make_sample(1, 5, 2)]);
        assert_eq!(mixed.image_dimensions(), None);
        let err = mixed.to_arrays().unwrap_err();
        assert!(err.to_string().contains("Shape mismatch"));
    }
}

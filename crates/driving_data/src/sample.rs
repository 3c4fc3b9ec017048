use image::RgbImage;

/// The `Sample` struct is one training example in the steering pipeline:
/// a single camera frame paired with the steering angle it is labelled with.
///
/// The two fields always travel together. Transforms that change the
/// apparent heading of the frame (flip, shear, camera choice) adjust
/// `steering` in the same step that changes `image`.
///
/// - `image`: 8-bit RGB frame, pixel values in `[0, 255]`
/// - `steering`: normalized steering angle, nominally in `[-1, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: RgbImage,
    pub steering: f64,
}

impl Sample {
    pub fn new(image: RgbImage, steering: f64) -> Self {
        Self { image, steering }
    }

    /// Returns `(width, height)` of the frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Replaces the frame, keeping the steering angle. For transforms that
    /// do not alter horizontal geometry (crop, resize, photometric changes).
    pub fn map_image(self, f: impl FnOnce(RgbImage) -> RgbImage) -> Self {
        Self {
            image: f(self.image),
            steering: self.steering,
        }
    }
}

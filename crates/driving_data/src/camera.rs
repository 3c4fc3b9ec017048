//! Camera choice and the steering correction that goes with it.
//!
//! The car carries three forward-facing cameras. Side cameras see the road
//! as if the car were displaced laterally, so their frames are relabelled
//! with a fixed additive correction: steer back towards the centre line.

use crate::dataset::{DrivingLog, LogRow};
use anyhow::Result;
use rand::Rng;
use std::f64::consts::PI;
use std::path::PathBuf;

/// Lateral offset of a side camera from the centre camera.
pub const CAMERA_OFFSET: f64 = 1.0;
/// Distance ahead at which the side camera's line of sight meets the centre line.
pub const CAMERA_RECOVERY_DISTANCE: f64 = 15.0;
/// Normalization from degrees to steering units (25 degrees = full lock).
pub const MAX_STEERING_DEGREES: f64 = 25.0;

/// Additive steering correction for side-camera frames:
/// `(offset / dist) * (360 / 2π) / 25.0` ≈ 0.1528.
pub const STEERING_COEFFICIENT: f64 =
    CAMERA_OFFSET / CAMERA_RECOVERY_DISTANCE * 360.0 / (2.0 * PI) / MAX_STEERING_DEGREES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Camera {
    Center,
    Left,
    Right,
}

impl Camera {
    /// All cameras in log-column order.
    pub const ALL: [Camera; 3] = [Camera::Center, Camera::Left, Camera::Right];

    /// Draws one of the three cameras uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Steering adjustment applied to a frame from this camera.
    pub fn steering_correction(self) -> f64 {
        match self {
            Camera::Center => 0.0,
            Camera::Left => STEERING_COEFFICIENT,
            Camera::Right => -STEERING_COEFFICIENT,
        }
    }
}

/// A camera frame selected from a log row, with its corrected label.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraView {
    pub camera: Camera,
    pub path: PathBuf,
    pub steering: f64,
}

impl CameraView {
    /// The view of `row` through a specific camera.
    pub fn of(row: &LogRow, camera: Camera) -> Self {
        Self {
            camera,
            path: row.camera_path(camera).to_path_buf(),
            steering: row.steering + camera.steering_correction(),
        }
    }

    /// Looks up row `index` and picks one of its cameras at random.
    pub fn random<R: Rng + ?Sized>(log: &DrivingLog, index: usize, rng: &mut R) -> Result<Self> {
        let row = log.get(index)?;
        Ok(Self::of(row, Camera::random(rng)))
    }
}

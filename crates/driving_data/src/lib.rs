pub mod camera;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod minibatch;
pub mod readers;
pub mod sample;
pub mod sampler;
pub mod transforms;

pub use camera::{Camera, CameraView, STEERING_COEFFICIENT};
pub use dataset::{DrivingLog, LogRow};
pub use error::DataError;
pub use generator::{BatchGenerator, BatchIter, GeneratorConfig};
pub use minibatch::MiniBatch;
pub use sample::Sample;

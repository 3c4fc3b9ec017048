//! src/generator/mod.rs
//!
//! This module implements the `BatchGenerator`.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌────────────┐
//!                   │ DrivingLog │ (rows: center/left/right, steering, ...)
//!                   └─────┬──────┘
//!                         │ row indices, with replacement
//!                         ↓
//!               ┌────────────────────┐
//!               │ RandomBatchSampler │ → CameraView (path, corrected steering)
//!               └─────────┬──────────┘
//!                         │
//!                         ↓
//!                   ┌───────────┐
//!                   │ LoadImage │ (RgbImage, [0, 255])
//!                   └─────┬─────┘
//!                         ↓
//!          ┌──────────────────────────────┐
//!          │ Augmenter (if augment)       │ shear → flip → brightness → shadow
//!          └──────────────┬───────────────┘
//!                         ↓
//!          ┌──────────────────────────────┐
//!          │ Crop → Resize                │ (always when !augment,
//!          └──────────────┬───────────────┘  when crop_augmented otherwise)
//!                         ↓
//!                   ┌───────────┐
//!                   │ MiniBatch │ (images, labels)
//!                   └───────────┘
//! ```
//!
//! # Module Structure
//!
//! ```text
//! src/generator/
//! ├── mod.rs       # Public API exports + architecture docs
//! ├── config.rs    # GeneratorConfig, builder, JSON loading, validation
//! ├── loader.rs    # BatchGenerator: one batch per call
//! └── iterator.rs  # BatchIter: the unbounded batch sequence
//! ```
//!
//! # Example Usage
//! ```ignore
//! let config = GeneratorConfig::builder()
//!     .batch_size(64)
//!     .seed(42)
//!     .build();
//! let generator = BatchGenerator::new(log, config)?;
//!
//! for batch in generator.iter().take(steps_per_epoch) {
//!     let batch: MiniBatch = batch?;
//!     let (x, y) = batch.to_arrays()?;
//! }
//! ```

mod config;
mod iterator;
mod loader;

pub use config::{BrightnessConfig, GeneratorConfig, GeneratorConfigBuilder, ResizeFilter};
pub use iterator::BatchIter;
pub use loader::BatchGenerator;

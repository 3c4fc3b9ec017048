//! src/transforms/vision/mod.rs
//!
//! Frame transforms for steering-model training data.
//!
//! # Module Organization
//!
//! ```text
//! transforms/vision/
//! ├── geometric.rs     → Crop, Resize, RandomShear (shear also relabels steering)
//! ├── photometric.rs   → RandomBrightness, RandomShadow
//! ├── augmentation.rs  → RandomHorizontalFlip and the Augmenter composer
//! └── io.rs            → Frame loading
//! ```
//!
//! Every transform maps `Sample -> Sample`, so the steering label can never
//! drift apart from its frame.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::transforms::Transform;
//! use crate::transforms::vision::{Augmenter, Crop, Resize};
//! use image::imageops::FilterType;
//!
//! let preprocess = Crop::default().then(Resize::new(64, 64, FilterType::Triangle)?);
//! let sample = Augmenter::default().apply(sample, &mut rng)?;
//! let sample = preprocess.apply(sample, &mut rng)?;
//! ```

pub mod augmentation;
pub mod geometric;
pub mod io;
pub mod photometric;

pub use augmentation::{Augmenter, RandomHorizontalFlip};
pub use geometric::{Crop, RandomShear, Resize, BONNET, HORIZON};
pub use io::LoadImage;
pub use photometric::{RandomBrightness, RandomShadow};

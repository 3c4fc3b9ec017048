use crate::error::DataError;
use crate::transforms::Transform;
use anyhow::Result;
use image::{ImageReader, RgbImage};
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

// ============================================================================
// LoadImage
// ============================================================================

/// Loads camera frames from disk as 8-bit RGB.
///
/// The file is read fully into memory with buffered I/O, decoded by format
/// sniffing (JPEG, PNG), and converted to `RgbImage` so every frame reaching
/// the transforms has the same channel order (R, G, B) and value range
/// `[0, 255]`. Any failure surfaces as [`DataError::ImageLoad`].
///
/// # Example
/// ```ignore
/// let loader = LoadImage::new();
/// let frame = loader.load(Path::new("IMG/center_2016_12_01_13_30_48_287.jpg"))?;
/// println!("Frame size: {:?}", frame.dimensions());
/// ```
#[derive(Debug, Clone)]
pub struct LoadImage {
    buffer_size: usize,
}

impl LoadImage {
    /// Creates a new image loader with an 8KB read buffer.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }

    pub fn load(&self, path: &Path) -> Result<RgbImage> {
        let file = File::open(path).map_err(|e| DataError::image_load(path, e))?;
        let file_size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

        let mut reader = BufReader::with_capacity(self.buffer_size, file);
        let mut buffer = Vec::with_capacity(file_size);
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| DataError::image_load(path, e))?;

        let image = ImageReader::new(Cursor::new(buffer))
            .with_guessed_format()
            .map_err(|e| DataError::image_load(path, e))?
            .decode()
            .map_err(|e| DataError::image_load(path, e))?;

        Ok(image.into_rgb8())
    }
}

impl Default for LoadImage {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform<PathBuf, RgbImage> for LoadImage {
    fn apply<R: Rng + ?Sized>(&self, path: PathBuf, _rng: &mut R) -> Result<RgbImage> {
        self.load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_image() -> Result<NamedTempFile> {
        // Create a test image (3x3 RGB)
        let mut test_img = RgbImage::new(3, 3);
        test_img.put_pixel(0, 0, Rgb([255, 0, 0])); // Red
        test_img.put_pixel(1, 1, Rgb([0, 255, 0])); // Green
        test_img.put_pixel(2, 2, Rgb([0, 0, 255])); // Blue

        let temp_file = NamedTempFile::with_suffix(".png")?;
        test_img.save(temp_file.path())?;
        Ok(temp_file)
    }

    #[test]
    fn test_load_image() -> Result<()> {
        let temp_file = create_test_image()?;
        let loaded = LoadImage::new().load(temp_file.path())?;

        assert_eq!(loaded.dimensions(), (3, 3), "Image dimensions should match");
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([255, 0, 0]), "Red pixel should match");
        assert_eq!(loaded.get_pixel(1, 1), &Rgb([0, 255, 0]), "Green pixel should match");
        assert_eq!(loaded.get_pixel(2, 2), &Rgb([0, 0, 255]), "Blue pixel should match");
        Ok(())
    }

    #[test]
    fn test_load_as_transform() -> Result<()> {
        let temp_file = create_test_image()?;
        let mut rng = StdRng::seed_from_u64(0);

        let loaded = LoadImage::new().apply(temp_file.path().to_path_buf(), &mut rng)?;
        assert_eq!(loaded, LoadImage::new().load(temp_file.path())?);

        let err = LoadImage::new()
            .apply(PathBuf::from("nonexistent.png"), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::ImageLoad { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = LoadImage::new()
            .load(Path::new("nonexistent.jpg"))
            .unwrap_err();

        match err.downcast_ref::<DataError>() {
            Some(DataError::ImageLoad { path, .. }) => {
                assert_eq!(path, Path::new("nonexistent.jpg"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_file() -> Result<()> {
        let mut file = NamedTempFile::with_suffix(".jpg")?;
        file.write_all(b"definitely not a jpeg")?;

        let err = LoadImage::new().load(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::ImageLoad { .. })
        ));
        Ok(())
    }
}

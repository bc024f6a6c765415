use std::path::Path;

use image::ImageReader;
use tracing::debug;
use vtc_core::{Error, ImageDimensions, Result};

/// Read an image's dimensions from its header without decoding pixel data.
///
/// The format is sniffed from the file contents, falling back to the
/// extension.
pub fn read_dimensions(path: &Path) -> Result<ImageDimensions> {
    let decode_error = |reason: String| Error::ImageDecode {
        path: path.display().to_string(),
        reason,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?;

    let format = reader.format();
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| decode_error(e.to_string()))?;

    debug!(path = %path.display(), ?format, width, height, "read image header");

    ImageDimensions::new(i64::from(width), i64::from(height))
        .map_err(|e| decode_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_reads_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        RgbImage::from_pixel(64, 48, Rgb([10, 20, 30])).save(&path).unwrap();

        let dims = read_dimensions(&path).unwrap();
        assert_eq!(dims, ImageDimensions { width: 64, height: 48 });
    }

    #[test]
    fn test_format_sniffed_from_contents() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("frame.png");
        RgbImage::new(32, 16).save(&png).unwrap();

        // PNG bytes behind a .jpg name still decode
        let renamed = dir.path().join("frame.jpg");
        std::fs::rename(&png, &renamed).unwrap();
        assert_eq!(
            read_dimensions(&renamed).unwrap(),
            ImageDimensions { width: 32, height: 16 }
        );
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        match read_dimensions(&path) {
            Err(Error::ImageDecode { path: p, .. }) => assert!(p.ends_with("broken.jpg")),
            other => panic!("expected ImageDecode, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_dimensions(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }
}

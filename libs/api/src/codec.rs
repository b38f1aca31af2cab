use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported format '{0}', choose one of png, jpg, jpeg, webp")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Output container for the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Parses a user-facing format name. "jpg" and "jpeg" select the same
    /// codec; anything outside the supported set is rejected before any
    /// encoding work happens.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// JPEG carries no alpha channel and forces RGB before encoding.
    fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Decodes response bytes into a 3-channel RGB bitmap.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
    let image = image::load_from_memory(bytes).map_err(CodecError::Decode)?;

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

/// Re-encodes a bitmap into the selected container.
pub fn encode(
    image: &DynamicImage,
    format: OutputFormat,
) -> Result<Vec<u8>, CodecError> {
    let mut buffer = Cursor::new(Vec::new());

    if format.supports_alpha() {
        image.write_to(&mut buffer, format.image_format())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buffer, format.image_format())
    }
    .map_err(CodecError::Encode)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod test {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn sample_png() -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 4, Rgba([200, 40, 40, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_parse_accepts_the_supported_set() {
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::parse("PNG").unwrap(), OutputFormat::Png);
    }

    #[test]
    fn test_parse_rejects_unknown_formats() {
        let err = OutputFormat::parse("gif").unwrap_err();

        assert!(matches!(err, CodecError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("png, jpg, jpeg, webp"));
    }

    #[test]
    fn test_decode_normalizes_to_rgb() {
        let decoded = decode(&sample_png()).unwrap();

        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"not an image").unwrap_err();

        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_encode_round_trips_each_format() {
        let decoded = decode(&sample_png()).unwrap();

        for format in
            [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::WebP]
        {
            let encoded = encode(&decoded, format).unwrap();
            let guessed =
                image::guess_format(&encoded).unwrap();

            assert_eq!(guessed, format.image_format());
        }
    }
}

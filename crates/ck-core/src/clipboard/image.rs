use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageDataError {
    #[error("image content is not a data URL")]
    NotADataUrl,

    #[error("data URL is not base64 encoded")]
    NotBase64,

    #[error("data URL media type is not an image: {0}")]
    NotAnImage(String),

    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),

    #[error("pixel buffer of {actual} bytes does not match {width}x{height} RGBA")]
    PixelBufferMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// A stored, self-describing encoded image: `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(PNG_MIME, bytes)
    }

    pub fn parse_data_url(content: &str) -> Result<Self, ImageDataError> {
        let rest = content
            .trim()
            .strip_prefix("data:")
            .ok_or(ImageDataError::NotADataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageDataError::NotADataUrl)?;

        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !params.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
            return Err(ImageDataError::NotBase64);
        }
        if !mime.starts_with("image/") {
            return Err(ImageDataError::NotAnImage(mime));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ImageDataError::InvalidPayload(e.to_string()))?;

        Ok(Self { mime, bytes })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// A decoded, renderable bitmap (RGBA8, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageDataError> {
        check_rgba_len(width, height, rgba.len())?;
        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Off-screen raster surface, always sized to the source bitmap's native dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageDataError> {
        check_rgba_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Binary image blob in a clipboard-compatible format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

fn check_rgba_len(width: u32, height: u32, actual: usize) -> Result<(), ImageDataError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4));
    if expected != Some(actual) {
        return Err(ImageDataError::PixelBufferMismatch {
            width,
            height,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_png_data_url() {
        let image = EncodedImage::parse_data_url("data:image/png;base64,AQID").unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, vec![1, 2, 3]);
        assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn rejects_non_data_url() {
        assert_eq!(
            EncodedImage::parse_data_url("hello").unwrap_err(),
            ImageDataError::NotADataUrl
        );
    }

    #[test]
    fn rejects_percent_encoded_payloads() {
        assert_eq!(
            EncodedImage::parse_data_url("data:image/png,abc").unwrap_err(),
            ImageDataError::NotBase64
        );
    }

    #[test]
    fn rejects_non_image_media_type() {
        assert!(matches!(
            EncodedImage::parse_data_url("data:text/plain;base64,AQID"),
            Err(ImageDataError::NotAnImage(_))
        ));
    }

    #[test]
    fn rejects_corrupt_base64() {
        assert!(matches!(
            EncodedImage::parse_data_url("data:image/png;base64,@@@"),
            Err(ImageDataError::InvalidPayload(_))
        ));
    }

    #[test]
    fn bitmap_checks_buffer_length() {
        assert!(Bitmap::new(2, 2, vec![0; 16]).is_ok());
        assert!(Bitmap::new(2, 2, vec![0; 15]).is_err());
    }
}

//! `image`-crate implementation of the write-back image stages.
//!
//! Decoding and encoding run on the blocking pool so a large image never
//! stalls the cooperative thread.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ck_core::clipboard::PNG_MIME;
use ck_core::ports::ImageCodecPort;
use ck_core::{Bitmap, EncodedImage, ImageBlob, RasterSurface};
use image::codecs::png::PngEncoder;
use image::{imageops, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageCodecPort for ImageCrateCodec {
    async fn decode(&self, image: &EncodedImage) -> Result<Bitmap> {
        let format = ImageFormat::from_mime_type(&image.mime);
        let bytes = image.bytes.clone();

        let rgba = tokio::task::spawn_blocking(move || -> Result<RgbaImage> {
            let decoded = match format {
                Some(format) => image::load_from_memory_with_format(&bytes, format),
                None => image::load_from_memory(&bytes),
            }
            .context("decode stored image")?;
            Ok(decoded.to_rgba8())
        })
        .await
        .context("image decode task failed")??;

        let (width, height) = rgba.dimensions();
        debug!(width, height, "Decoded stored image");
        Ok(Bitmap::new(width, height, rgba.into_raw())?)
    }

    async fn render(&self, bitmap: &Bitmap) -> Result<RasterSurface> {
        if bitmap.width == 0 || bitmap.height == 0 {
            bail!("cannot render a {}x{} bitmap", bitmap.width, bitmap.height);
        }

        let source = RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba.clone())
            .context("bitmap buffer does not match its dimensions")?;

        // Surface takes the bitmap's native size: a 1:1 copy, no resampling.
        let mut surface = RgbaImage::new(bitmap.width, bitmap.height);
        imageops::replace(&mut surface, &source, 0, 0);

        Ok(RasterSurface::new(
            bitmap.width,
            bitmap.height,
            surface.into_raw(),
        )?)
    }

    async fn serialize(&self, surface: &RasterSurface) -> Result<ImageBlob> {
        let (width, height) = (surface.width, surface.height);
        let pixels = surface.pixels.clone();

        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut bytes = Vec::new();
            PngEncoder::new(&mut bytes)
                .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
                .context("encode surface to png")?;
            Ok(bytes)
        })
        .await
        .context("image encode task failed")??;

        Ok(ImageBlob {
            mime: PNG_MIME.to_string(),
            bytes,
        })
    }
}

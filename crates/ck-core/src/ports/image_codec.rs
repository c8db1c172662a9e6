use anyhow::Result;

use crate::clipboard::{Bitmap, EncodedImage, ImageBlob, RasterSurface};

/// The three image stages that precede a clipboard image write.
///
/// Each stage is an independent failure point; callers report which one
/// failed.
///
/// 图像写回前的三个阶段，每个阶段独立失败。
#[async_trait::async_trait]
pub trait ImageCodecPort: Send + Sync {
    /// Decode a stored encoded image into a renderable bitmap.
    async fn decode(&self, image: &EncodedImage) -> Result<Bitmap>;

    /// Draw the bitmap onto an off-screen surface of the bitmap's native size.
    ///
    /// Must not resample.
    async fn render(&self, bitmap: &Bitmap) -> Result<RasterSurface>;

    /// Serialize the surface into a clipboard-compatible blob.
    async fn serialize(&self, surface: &RasterSurface) -> Result<ImageBlob>;
}

//! Image loading utilities for texture data
//!
//! Provides PNG loading for the texture registry plus point sampling, which
//! the CPU reference of the dissolve test uses to read noise values.

use std::path::Path;

use image::RgbaImage;

use super::{AssetError, AssetKind};

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// A path that does not exist is reported as [`AssetError::NotFound`];
    /// a file that fails to decode as [`AssetError::LoadFailed`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        let name = path_ref.display().to_string();

        if !path_ref.is_file() {
            return Err(AssetError::not_found(AssetKind::Image, name));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::load_failed(AssetKind::Image, name, e))?;

        let image = Self::from_rgba_image(img.to_rgba8());
        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::load_failed(AssetKind::Image, "<memory>", e))?;

        let image = Self::from_rgba_image(img.to_rgba8());
        log::debug!("Loaded image {}x{} from memory", image.width, image.height);
        Ok(image)
    }

    /// Take ownership of an RGBA8 buffer
    pub fn from_rgba_image(rgba_img: RgbaImage) -> Self {
        let (width, height) = rgba_img.dimensions();
        Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_rgba_image(RgbaImage::from_pixel(width, height, image::Rgba(color)))
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// RGBA value of the pixel at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        let texel = self.data.get(offset..offset + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }

    /// Nearest-texel red channel at texture coordinate `(u, v)` in `[0, 1]`,
    /// using repeat wrapping outside that range
    ///
    /// Returns 0.0 for an empty image.
    pub fn sample_red(&self, u: f32, v: f32) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32;
        let y = (v.rem_euclid(1.0) * self.height as f32) as u32;
        self.pixel(x.min(self.width - 1), y.min(self.height - 1))
            .map_or(0.0, |[r, ..]| f32::from(r) / 255.0)
    }
}

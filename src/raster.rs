//! Bitmap collaborators.
//!
//! The engine never renders; it consumes a decoded bitmap's natural size and
//! asks an external rasterization capability, once per crop commit, for a
//! new bitmap holding exactly the pixels visible inside the crop region.
//! Both collaborators sit behind traits; [`SoftwareRasterizer`] is a pure
//! software implementation over `data:` URLs, used by crop commits in tests
//! and by hosts without their own raster pipeline.

use std::io::Cursor;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};

use crate::error::EditorError;
use crate::geometry::{Point, Region, Size};

/// Natural dimensions reported by a resolved bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
}

/// Everything the rasterizer needs to reproduce the on-stage placement:
/// the source bitmap, where the image currently sits, how large it is
/// displayed, and the (already rounded, normalized) region to read back.
#[derive(Clone, Debug)]
pub struct CropRequest {
    pub src: String,
    pub image_offset: Point,
    pub image_size: Size,
    pub region: Region,
}

/// Resolves a source handle to a decoded bitmap's natural dimensions.
/// Resolution failure means "no image" to the engine.
pub trait BitmapSource {
    fn resolve(&self, src: &str) -> Result<DecodedBitmap>;
}

/// Produces an encoded bitmap equal to rendering the source at the given
/// offset/size and reading back only the pixels inside the region.
pub trait Rasterizer {
    fn crop_to_data_url(&self, request: &CropRequest) -> Result<String>;
}

/// Software implementation for `data:image/...;base64,` sources.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareRasterizer;

impl SoftwareRasterizer {
    fn decode(src: &str) -> Result<DynamicImage> {
        let payload = src
            .split_once("base64,")
            .map(|(_, data)| data)
            .ok_or_else(|| {
                EditorError::UnsupportedSource("expected a base64 data URL".into())
            })?;
        let bytes = BASE64
            .decode(payload)
            .context("invalid base64 payload in source")?;
        image::load_from_memory(&bytes)
            .map_err(|e| EditorError::BitmapUnavailable(e.to_string()).into())
    }

    /// Encode an RGBA buffer as a PNG data URL.
    pub fn encode_data_url(bitmap: &RgbaImage) -> Result<String> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(bitmap.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .context("failed to encode PNG")?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(&buf)))
    }
}

impl BitmapSource for SoftwareRasterizer {
    fn resolve(&self, src: &str) -> Result<DecodedBitmap> {
        let img = Self::decode(src)?;
        Ok(DecodedBitmap {
            width: img.width(),
            height: img.height(),
        })
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn crop_to_data_url(&self, request: &CropRequest) -> Result<String> {
        let src = Self::decode(&request.src)?.to_rgba8();

        let disp_w = request.image_size.w.round().max(1.0) as u32;
        let disp_h = request.image_size.h.round().max(1.0) as u32;
        // Scale the natural bitmap to the size it is displayed at, so the
        // readback matches what is on stage.
        let displayed = if src.width() == disp_w && src.height() == disp_h {
            src
        } else {
            imageops::resize(&src, disp_w, disp_h, imageops::FilterType::Triangle)
        };

        let out_w = request.region.w.round().max(1.0) as u32;
        let out_h = request.region.h.round().max(1.0) as u32;
        let dx = request.region.x.round() as i64 - request.image_offset.x.round() as i64;
        let dy = request.region.y.round() as i64 - request.image_offset.y.round() as i64;

        let mut out = RgbaImage::from_pixel(out_w, out_h, Rgba([0, 0, 0, 0]));
        for oy in 0..out_h {
            for ox in 0..out_w {
                let sx = dx + ox as i64;
                let sy = dy + oy as i64;
                if sx >= 0 && sy >= 0 && (sx as u32) < disp_w && (sy as u32) < disp_h {
                    out.put_pixel(ox, oy, *displayed.get_pixel(sx as u32, sy as u32));
                }
            }
        }
        Self::encode_data_url(&out)
    }
}

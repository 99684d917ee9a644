//! Raster surface that elements are rendered onto.

use thiserror::Error;

/// Errors raised while encoding a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface has no pixels (size {width}x{height})")]
    Unavailable { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// ARGB32 raster surface.
///
/// A surface with a zero dimension has no backing image. Every render call
/// against it is a no-op, so callers can simply retry on the next frame once
/// the host reports a real size.
#[derive(Debug)]
pub struct RasterSurface {
    image: Option<cairo::ImageSurface>,
    width: i32,
    height: i32,
}

impl RasterSurface {
    pub fn new(width: i32, height: i32) -> Self {
        let image = if width > 0 && height > 0 {
            match cairo::ImageSurface::create(cairo::Format::ARgb32, width, height) {
                Ok(image) => Some(image),
                Err(err) => {
                    log::warn!("Failed to allocate {width}x{height} surface: {err}");
                    None
                }
            }
        } else {
            None
        };
        Self {
            image,
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_available(&self) -> bool {
        self.image.is_some()
    }

    /// Acquires a drawing context, or `None` when no pixels are backing the surface.
    pub fn context(&self) -> Option<cairo::Context> {
        let image = self.image.as_ref()?;
        match cairo::Context::new(image) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                log::warn!("Failed to acquire drawing context: {err}");
                None
            }
        }
    }

    /// Resets every pixel to transparent.
    pub fn clear(&self) {
        if let Some(ctx) = self.context() {
            ctx.set_operator(cairo::Operator::Clear);
            let _ = ctx.paint();
        }
    }

    /// Copies out the raw ARGB32 bytes (row stride included).
    pub fn pixels(&mut self) -> Option<Vec<u8>> {
        let image = self.image.as_mut()?;
        image.flush();
        image.data().ok().map(|data| data.to_vec())
    }

    /// Returns `true` if any pixel is not fully transparent.
    pub fn has_ink(&mut self) -> bool {
        self.pixels()
            .map(|data| data.iter().any(|byte| *byte != 0))
            .unwrap_or(false)
    }

    /// ARGB32 value of a single pixel.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let image = self.image.as_mut()?;
        image.flush();
        let stride = image.stride() as usize;
        let data = image.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        Some([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    /// Encodes the surface as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let image = self.image.as_ref().ok_or(SurfaceError::Unavailable {
            width: self.width,
            height: self.height,
        })?;
        let mut out = Vec::new();
        image.write_to_png(&mut out)?;
        Ok(out)
    }

    /// Encodes a downscaled copy that fits inside `max_width` x `max_height`.
    ///
    /// Surfaces already within the limit are encoded at their own size.
    pub fn thumbnail(&self, max_width: i32, max_height: i32) -> Result<Vec<u8>, SurfaceError> {
        let image = self.image.as_ref().ok_or(SurfaceError::Unavailable {
            width: self.width,
            height: self.height,
        })?;

        let scale = (max_width as f64 / self.width as f64)
            .min(max_height as f64 / self.height as f64)
            .min(1.0);
        let thumb_w = ((self.width as f64 * scale).round() as i32).max(1);
        let thumb_h = ((self.height as f64 * scale).round() as i32).max(1);

        let thumb = cairo::ImageSurface::create(cairo::Format::ARgb32, thumb_w, thumb_h)?;
        {
            let ctx = cairo::Context::new(&thumb)?;
            ctx.scale(scale, scale);
            ctx.set_source_surface(image, 0.0, 0.0)?;
            ctx.paint()?;
        }

        let mut out = Vec::new();
        thumb.write_to_png(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn zero_sized_surface_has_no_context() {
        let surface = RasterSurface::new(0, 120);
        assert!(!surface.is_available());
        assert!(surface.context().is_none());
        assert!(matches!(
            surface.to_png(),
            Err(SurfaceError::Unavailable { .. })
        ));
    }

    #[test]
    fn thumbnail_is_png_and_fits_limits() {
        let surface = RasterSurface::new(400, 200);
        let png = surface.thumbnail(100, 100).expect("thumbnail");
        assert_eq!(&png[..4], &PNG_MAGIC);
    }

    #[test]
    fn clear_resets_ink() {
        let mut surface = RasterSurface::new(10, 10);
        if let Some(ctx) = surface.context() {
            ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
            ctx.paint().unwrap();
        }
        assert!(surface.has_ink());
        surface.clear();
        assert!(!surface.has_ink());
    }
}

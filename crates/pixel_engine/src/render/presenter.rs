//! Software presentation of the backbuffer
//!
//! Copies the CPU backbuffer into the window's client area through a
//! softbuffer surface, stretching with nearest-neighbour sampling to
//! whatever size the client area has this frame. The backbuffer itself
//! is only ever borrowed read-only here.

use crate::render::backbuffer::Backbuffer;
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use std::num::NonZeroU32;
use thiserror::Error;

/// Presentation errors
#[derive(Error, Debug)]
pub enum PresentError {
    /// The display context could not be established.
    #[error("display context creation failed: {0}")]
    ContextCreation(softbuffer::SoftBufferError),

    /// The presentation surface could not be created.
    #[error("presentation surface creation failed: {0}")]
    SurfaceCreation(softbuffer::SoftBufferError),

    /// Copying the frame to the window failed.
    #[error("presenting the backbuffer failed: {0}")]
    Present(softbuffer::SoftBufferError),
}

/// Owns the display context and surface for one window.
pub struct Presenter {
    // Context must outlive the surface; field order keeps the drop
    // order correct.
    surface: softbuffer::Surface,
    _context: softbuffer::Context,
}

impl Presenter {
    /// Create a presenter for the given window.
    ///
    /// The window must outlive the presenter; the engine guarantees
    /// this by owning both and dropping the presenter first.
    pub fn new<W>(window: &W) -> Result<Self, PresentError>
    where
        W: HasRawWindowHandle + HasRawDisplayHandle,
    {
        // SAFETY: the raw handles come from a live GLFW window owned by
        // the same engine instance, which drops the presenter before
        // the window.
        let context =
            unsafe { softbuffer::Context::new(window) }.map_err(PresentError::ContextCreation)?;
        let surface = unsafe { softbuffer::Surface::new(&context, window) }
            .map_err(PresentError::SurfaceCreation)?;

        Ok(Self {
            surface,
            _context: context,
        })
    }

    /// Stretch the backbuffer into a `dest_width` × `dest_height`
    /// client area and present it.
    ///
    /// A zero-sized destination (minimized window) skips the present;
    /// it is not an error. The backbuffer is unchanged either way.
    pub fn present(
        &mut self,
        backbuffer: &Backbuffer,
        dest_width: u32,
        dest_height: u32,
    ) -> Result<(), PresentError> {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(dest_width), NonZeroU32::new(dest_height))
        else {
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(PresentError::Present)?;
        let mut frame = self.surface.buffer_mut().map_err(PresentError::Present)?;
        stretch_nearest(backbuffer, &mut frame, dest_width, dest_height);
        frame.present().map_err(PresentError::Present)
    }
}

/// Nearest-neighbour stretch of the backbuffer into a destination
/// raster of `dest_width` × `dest_height` packed pixels.
///
/// An empty backbuffer clears the destination to black.
pub fn stretch_nearest(src: &Backbuffer, dest: &mut [u32], dest_width: u32, dest_height: u32) {
    let src_width = src.width() as usize;
    let src_height = src.height() as usize;
    let dest_width = dest_width as usize;
    let dest_height = dest_height as usize;

    if src_width == 0 || src_height == 0 {
        dest[..dest_width * dest_height].fill(0);
        return;
    }

    let pixels = src.pixels();
    for y in 0..dest_height {
        let src_y = y * src_height / dest_height;
        let src_row = &pixels[src_y * src_width..(src_y + 1) * src_width];
        let dest_row = &mut dest[y * dest_width..(y + 1) * dest_width];
        for (x, out) in dest_row.iter_mut().enumerate() {
            *out = src_row[x * src_width / dest_width];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: u32, height: u32, values: &[u32]) -> Backbuffer {
        let mut buffer = Backbuffer::new(width, height);
        buffer.pixels_mut().copy_from_slice(values);
        buffer
    }

    #[test]
    fn test_stretch_identity() {
        let src = filled(2, 2, &[1, 2, 3, 4]);
        let mut dest = vec![0u32; 4];
        stretch_nearest(&src, &mut dest, 2, 2);
        assert_eq!(dest, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stretch_upscale_2x() {
        let src = filled(2, 1, &[7, 9]);
        let mut dest = vec![0u32; 8];
        stretch_nearest(&src, &mut dest, 4, 2);
        assert_eq!(dest, vec![7, 7, 9, 9, 7, 7, 9, 9]);
    }

    #[test]
    fn test_stretch_downscale() {
        let src = filled(4, 4, &(0u32..16).collect::<Vec<_>>());
        let mut dest = vec![0u32; 4];
        stretch_nearest(&src, &mut dest, 2, 2);
        // Every destination pixel samples the top-left of its cell.
        assert_eq!(dest, vec![0, 2, 8, 10]);
    }

    #[test]
    fn test_stretch_empty_source_clears_destination() {
        let src = Backbuffer::new(0, 0);
        let mut dest = vec![0xFFFF_FFFFu32; 6];
        stretch_nearest(&src, &mut dest, 3, 2);
        assert_eq!(dest, vec![0; 6]);
    }
}

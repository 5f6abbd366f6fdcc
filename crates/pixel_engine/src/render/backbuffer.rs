//! CPU-side offscreen pixel buffer
//!
//! The backbuffer is the contract between the engine and whatever fills
//! a frame: an owned block of 32-bit pixels in top-down row order, with
//! blue in the low byte and green in the second byte of every word.
//! The same layout is what the presentation path expects, so a filled
//! buffer can be handed to the display subsystem without conversion.

/// Bytes occupied by one packed pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Describes the raw memory layout of a [`Backbuffer`].
///
/// Any replacement producer or presenter must honor this exact layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    /// Bytes per pixel (always 4: one packed little-endian word).
    pub bytes_per_pixel: usize,
    /// Byte stride from one scanline to the next.
    pub pitch: usize,
    /// Row 0 is the visually topmost row.
    pub top_down: bool,
}

/// Resizable offscreen buffer the frame producer writes into.
///
/// The pixel memory is exclusively owned; the presenter borrows it
/// read-only. Rows are packed with no padding, so `pitch` is always
/// `width * 4` bytes.
#[derive(Debug)]
pub struct Backbuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Backbuffer {
    /// Allocate a buffer of the given dimensions, zero-filled.
    ///
    /// Zero width or height is valid and yields an empty allocation.
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    /// Throw away the current allocation and establish a new one sized
    /// exactly `width * height` pixels.
    ///
    /// Prior contents are not preserved; the new buffer is zeroed.
    /// Resizing to the current dimensions still swaps the allocation,
    /// and resizing to zero in either dimension is safe.
    pub fn resize(&mut self, width: u32, height: u32) {
        let len = width as usize * height as usize;
        // Reassignment drops the old allocation exactly once.
        self.pixels = vec![0u32; len];
        self.width = width;
        self.height = height;
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte stride from the start of one scanline to the next.
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Total size of the pixel memory in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * BYTES_PER_PIXEL
    }

    /// Memory layout descriptor for the presentation path.
    pub fn format(&self) -> PixelFormat {
        PixelFormat {
            bytes_per_pixel: BYTES_PER_PIXEL,
            pitch: self.pitch(),
            top_down: true,
        }
    }

    /// All pixels as one packed slice, row-major, top row first.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable access to the packed pixel slice.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Iterate scanlines top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Iterate scanlines top to bottom, mutably.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u32]> {
        self.pixels.chunks_exact_mut(self.width.max(1) as usize)
    }
}

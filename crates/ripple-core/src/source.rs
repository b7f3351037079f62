//! Source texture feed for the compositor.
//!
//! The host decides what content gets distorted; the core only keeps an RGBA8
//! buffer at target size and a flag telling the backend to re-upload it.

use crate::constants::{DEMO_SQUARE_RGBA, DEMO_SQUARE_SIZE, DEMO_SQUARE_SPEED};

/// Produces the content image for one frame.
pub trait SourceProvider {
    /// Overwrite `pixels` (tightly packed RGBA8, `width * height * 4` bytes).
    fn fill(&mut self, width: u32, height: u32, pixels: &mut [u8]);
}

/// Borrowed view of a frame ready for upload.
#[derive(Clone, Copy, Debug)]
pub struct SourceFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

pub struct SourceFeed {
    provider: Box<dyn SourceProvider>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    needs_update: bool,
}

impl SourceFeed {
    pub fn new(provider: Box<dyn SourceProvider>, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            provider,
            width,
            height,
            pixels: vec![0; rgba_len(width, height)],
            needs_update: true,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Reallocate for a new target size. The old content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixels.clear();
        self.pixels.resize(rgba_len(self.width, self.height), 0);
        self.needs_update = true;
    }

    /// Ask the provider for this frame's content.
    pub fn refresh(&mut self) {
        self.provider.fill(self.width, self.height, &mut self.pixels);
        self.needs_update = true;
    }

    /// Hand out the buffer once per refresh; `None` means the bound texture
    /// is still current.
    pub fn take_update(&mut self) -> Option<SourceFrame<'_>> {
        if !self.needs_update {
            return None;
        }
        self.needs_update = false;
        Some(SourceFrame {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        })
    }
}

#[inline]
fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Demo content: a solid square sliding left to right across the vertical
/// centre, re-entering from the left once it has fully left the canvas.
#[derive(Clone, Debug)]
pub struct MovingSquare {
    pub x: i32,
    pub size: u32,
    pub speed: i32,
    pub color: [u8; 4],
}

impl Default for MovingSquare {
    fn default() -> Self {
        Self {
            x: 0,
            size: DEMO_SQUARE_SIZE,
            speed: DEMO_SQUARE_SPEED,
            color: DEMO_SQUARE_RGBA,
        }
    }
}

impl SourceProvider for MovingSquare {
    fn fill(&mut self, width: u32, height: u32, pixels: &mut [u8]) {
        pixels.fill(0);

        let size = self.size as i64;
        let top = height as i64 / 2 - size / 2;
        let y0 = top.clamp(0, height as i64) as usize;
        let y1 = (top + size).clamp(0, height as i64) as usize;
        let x0 = (self.x as i64).clamp(0, width as i64) as usize;
        let x1 = (self.x as i64 + size).clamp(0, width as i64) as usize;
        let stride = width as usize * 4;
        for row in y0..y1 {
            let line = &mut pixels[row * stride..(row + 1) * stride];
            for px in line[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&self.color);
            }
        }

        self.x += self.speed;
        if self.x > width as i32 {
            self.x = -(self.size as i32);
        }
    }
}

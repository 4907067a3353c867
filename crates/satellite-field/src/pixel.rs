//! Output pixels and the full-frame grid

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// 8-bit color as handed to the presentation surface
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub reserved: u8,
}

impl Pixel {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            reserved: 0,
        }
    }

    /// Narrow a float color, channel by channel, with [`narrow_channel`]
    pub fn from_color(color: Vec3) -> Self {
        Self::rgb(
            narrow_channel(color.x),
            narrow_channel(color.y),
            narrow_channel(color.z),
        )
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Scale a [0, 1] channel to 8 bits by truncation
///
/// Channels are not clamped first: values past 1.0 truncate to a 32-bit
/// integer and keep only the low byte, so 1.5 becomes 382 & 0xFF = 126.
/// NaN narrows to 0. Beyond the `i32` range the first cast saturates, so
/// `+inf` narrows to 255 and `-inf` to 0.
#[inline]
pub fn narrow_channel(channel: f32) -> u8 {
    (channel * 255.0) as i32 as u8
}

/// Row-major pixel buffer, origin top-left
///
/// Sized once at construction and overwritten in place every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel coordinates of a linear index
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let width = self.width.max(1) as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Raw bytes, 4 per pixel, for a presentation surface
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn same_shape(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

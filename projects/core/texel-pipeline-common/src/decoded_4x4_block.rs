//! # Decoded 4x4 Block
//!
//! This module provides the [`Decoded4x4Block`] structure for representing decompressed
//! 4x4 texel blocks used by the BC1-BC5 block compression formats.
//!
//! ## Overview
//!
//! Block compressed formats divide a surface into 4x4 texel blocks. A decoded
//! block is generic over the [`Sample`] kind it stores, so the same container
//! holds 8-bit ([`Color8888`]) output for compression input/output and float
//! ([`Float4`]) output for the resample pipeline.
//!
//! ## Usage
//!
//! ```
//! use texel_pipeline_common::color_8888::Color8888;
//! use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;
//!
//! // Create a block filled with red pixels
//! let red_pixel = Color8888::new(255, 0, 0, 255);
//! let block = Decoded4x4Block::new(red_pixel);
//!
//! // Check if all pixels are identical
//! assert!(block.has_identical_pixels());
//! ```
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```
//!
//! [`Float4`]: crate::float4::Float4

use crate::color_8888::Color8888;
use crate::sample::Sample;

/// Width and height of a decoded block, in texels.
pub const BLOCK_DIM: usize = 4;

/// Number of texels in a decoded block.
pub const BLOCK_TEXELS: usize = BLOCK_DIM * BLOCK_DIM;

/// Represents a decoded 4x4 block of texels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded4x4Block<S: Sample = Color8888> {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [S; BLOCK_TEXELS],
}

impl<S: Sample> Decoded4x4Block<S> {
    /// Constructs a new decoded block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use texel_pipeline_common::color_8888::Color8888;
    /// use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub fn new(pixel: S) -> Self {
        Self {
            pixels: [pixel; BLOCK_TEXELS],
        }
    }

    /// Gets a pixel at the specified coordinates.
    ///
    /// # Panics
    ///
    /// If `x >= 4` or `y >= 4`.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> S {
        assert!(x < BLOCK_DIM && y < BLOCK_DIM, "({x}, {y}) is outside a 4x4 block");
        self.pixels[y * BLOCK_DIM + x]
    }

    /// Sets a pixel at the specified coordinates.
    ///
    /// # Panics
    ///
    /// If `x >= 4` or `y >= 4`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: S) {
        assert!(x < BLOCK_DIM && y < BLOCK_DIM, "({x}, {y}) is outside a 4x4 block");
        self.pixels[y * BLOCK_DIM + x] = pixel;
    }

    /// Gets a pixel at the specified coordinates (0-3, 0-3) without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `x < 4` and `y < 4`.
    #[inline]
    pub unsafe fn get_pixel_unchecked(&self, x: usize, y: usize) -> S {
        *self.pixels.get_unchecked(y * BLOCK_DIM + x)
    }

    /// Sets a pixel at the specified coordinates (0-3, 0-3) without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `x < 4` and `y < 4`.
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: usize, y: usize, pixel: S) {
        *self.pixels.get_unchecked_mut(y * BLOCK_DIM + x) = pixel;
    }

    /// Converts every texel to another sample kind.
    #[inline]
    pub fn convert<T: Sample>(&self) -> Decoded4x4Block<T> {
        Decoded4x4Block {
            pixels: self.pixels.map(|pixel| T::from_float4(pixel.to_float4())),
        }
    }

    /// Converts every texel to 8-bit samples.
    #[inline]
    pub fn to_unorm8(&self) -> Decoded4x4Block<Color8888> {
        Decoded4x4Block {
            pixels: self.pixels.map(Sample::to_unorm8),
        }
    }

    /// Checks if all pixels in the block have the same values
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = self.pixels[0];
        self.pixels.iter().all(|pixel| *pixel == first)
    }
}

//! Common test imports and utilities for BC1 tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Common types from texel_pipeline_common
pub use texel_pipeline_common::color_565::Color565;
pub use texel_pipeline_common::color_8888::Color8888;
pub use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;

// Re-export super for convenience in test modules
pub use super::*;

/// Builds a BC1 block from raw endpoints and 16 row-major 2-bit indices.
pub(crate) fn bc1_block(c0: u16, c1: u16, indices: [u8; 16]) -> [u8; 8] {
    let packed = indices
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &index)| acc | ((index as u32 & 0b11) << (i * 2)));

    let mut block = [0u8; 8];
    block[0..2].copy_from_slice(&c0.to_le_bytes());
    block[2..4].copy_from_slice(&c1.to_le_bytes());
    block[4..8].copy_from_slice(&packed.to_le_bytes());
    block
}

/// A block with a horizontal gradient between two colours, opaque.
pub(crate) fn gradient_block(from: Color8888, to: Color8888) -> Decoded4x4Block {
    let mut block = Decoded4x4Block::new(from);
    for y in 0..4 {
        for x in 0..4 {
            let lerp = |a: u8, b: u8| ((a as u32 * (3 - x as u32) + b as u32 * x as u32) / 3) as u8;
            block.set_pixel(
                x,
                y,
                Color8888::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b), 255),
            );
        }
    }
    block
}

/// A deterministic pseudo-random opaque block.
pub(crate) fn noise_block(seed: u32) -> Decoded4x4Block {
    let mut state = seed.wrapping_mul(0x9E37_79B9) | 1;
    let mut next = || {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    let mut block = Decoded4x4Block::new(Color8888::default());
    for pixel in block.pixels.iter_mut() {
        let bits = next().to_le_bytes();
        *pixel = Color8888::new(bits[0], bits[1], bits[2], 255);
    }
    block
}

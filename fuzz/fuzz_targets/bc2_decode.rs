#![no_main]

// Compares the BC2 decoder against rgbcx (colour) and bcdec (explicit alpha).

use core::ffi::c_void;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;
use texel_pipeline_bc2::decode_bc2_block_from_slice;
use texel_pipeline_common::color_565::Color565;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc2Block {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: Bc2Block| {
    // rgbcx applies BC1 rules to the colour half; only 4-colour blocks agree.
    let c0 = Color565::from_raw(u16::from_le_bytes([block.bytes[8], block.bytes[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block.bytes[10], block.bytes[11]]));
    if !c0.greater_than(&c1) {
        return;
    }

    let ours = decode_bc2_block_from_slice(&block.bytes).unwrap();

    let mut color = [0u8; 4 * 16];
    let mut alpha = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc1(
            block.bytes.as_ptr().add(8) as *const c_void,
            color.as_mut_ptr() as *mut c_void,
            true,
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }
    bcdec_rs::bc2(&block.bytes, &mut alpha, 4 * 4);

    for (i, texel) in ours.pixels.iter().enumerate() {
        let expected = [color[i * 4], color[i * 4 + 1], color[i * 4 + 2], alpha[i * 4 + 3]];
        assert_eq!(
            [texel.r, texel.g, texel.b, texel.a],
            expected,
            "texel {i} of {:02X?}",
            block.bytes
        );
    }
});

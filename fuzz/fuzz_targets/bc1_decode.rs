#![no_main]

// Compares the BC1 decoder against rgbcx's Ideal decoding mode.
// https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/

use core::ffi::c_void;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;
use texel_pipeline_bc1::{decode_bc1_block_from_slice, Bc1DecodeSettings};
use texel_pipeline_common::color_8888::Color8888;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc1Block {
    pub bytes: [u8; 8],
}

fuzz_target!(|block: Bc1Block| {
    let ours = decode_bc1_block_from_slice(&block.bytes, Bc1DecodeSettings { allow_alpha: true })
        .unwrap();

    let mut rgba = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc1(
            block.bytes.as_ptr() as *const c_void,
            rgba.as_mut_ptr() as *mut c_void,
            true, // set_alpha
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }

    for (i, (ours, theirs)) in ours.pixels.iter().zip(rgba.chunks_exact(4)).enumerate() {
        let theirs = Color8888::new(theirs[0], theirs[1], theirs[2], theirs[3]);
        assert_eq!(*ours, theirs, "texel {i} of {:02X?}", block.bytes);
    }
});

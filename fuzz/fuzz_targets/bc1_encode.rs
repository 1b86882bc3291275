#![no_main]

// Encodes arbitrary opaque blocks and checks every texel decodes to its
// nearest entry in the block's own palette.

use libfuzzer_sys::{arbitrary, fuzz_target};
use texel_pipeline_bc1::decode::four_color_palette;
use texel_pipeline_bc1::{
    decode_bc1_block_from_slice, encode_bc1_block, Bc1DecodeSettings, Bc1EncodeSettings,
};
use texel_pipeline_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Texels {
    pub rgb: [[u8; 3]; 16],
    pub refine: bool,
}

fn distance(a: Color8888, b: Color8888) -> u32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2) as u32;
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

fuzz_target!(|input: Texels| {
    let mut block = Decoded4x4Block::new(Color8888::default());
    for (texel, [r, g, b]) in block.pixels.iter_mut().zip(input.rgb) {
        *texel = Color8888::new(r, g, b, 255);
    }

    let settings = Bc1EncodeSettings {
        refine: input.refine,
        ..Default::default()
    };
    let encoded = encode_bc1_block(&block, settings);
    let decoded = decode_bc1_block_from_slice(&encoded.bytes, Bc1DecodeSettings::default()).unwrap();

    let c0 = Color565::from_raw(u16::from_le_bytes([encoded.bytes[0], encoded.bytes[1]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([encoded.bytes[2], encoded.bytes[3]]));
    if c0 == c1 {
        // Solid blocks use index 0 everywhere.
        assert!(decoded.pixels.iter().all(|texel| texel.a == 255));
        return;
    }
    assert!(c0.greater_than(&c1), "opaque blocks must use the 4-colour layout");

    let palette = four_color_palette(c0, c1);
    let mut total = 0;
    for (original, decoded) in block.pixels.iter().zip(decoded.pixels) {
        let best = palette.iter().map(|entry| distance(*original, *entry)).min().unwrap();
        assert_eq!(distance(*original, decoded), best, "{input:?}");
        total += best;
    }
    assert_eq!(total, encoded.error);
});

//! End-to-end conversions through the image API.

use rstest::rstest;
use texel_pipeline_common::color_565::Color565;
use texel_pipeline_image_api::{
    AddressMode, AddressModes, Float4, Image, PixelFormat, ReformatBuilder, Transform,
};
use texel_pipeline_resample::resolve_coordinate;

fn rgba8_image(width: u32, height: u32, texel: impl Fn(u32, u32) -> [u8; 4]) -> Image {
    let mut image = Image::with_dimensions(PixelFormat::R8G8B8A8Unorm, width, height, 1).unwrap();
    {
        let mut data = image.map_write().unwrap();
        for (i, out) in data.chunks_exact_mut(4).enumerate() {
            let (x, y) = (i as u32 % width, i as u32 / width);
            out.copy_from_slice(&texel(x, y));
        }
    }
    image
}

fn texel_at(image: &Image, x: u32, y: u32) -> [u8; 4] {
    let data = image.map_read().unwrap();
    let offset = y as usize * image.row_pitch() + x as usize * 4;
    [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
}

#[test]
fn checkerboard_downsample_averages_each_quad() {
    let light = [255, 0, 0, 255];
    let dark = [0, 0, 255, 128];
    let source = rgba8_image(4, 4, |x, y| if (x + y) % 2 == 0 { light } else { dark });

    let half = source.resized(2, 2, 1).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            let texel = texel_at(&half, x, y);
            for channel in 0..4 {
                let mean = (light[channel] as f32 + dark[channel] as f32) / 2.0;
                assert!(
                    (texel[channel] as f32 - mean).abs() <= 0.5,
                    "({x}, {y}) channel {channel}: {} vs {mean}",
                    texel[channel]
                );
            }
        }
    }
}

#[test]
fn bc1_round_trip_stays_within_one_palette_step() {
    // Colours in each block lie on a line, so every texel has a palette entry nearby.
    let source = rgba8_image(16, 16, |x, y| {
        let (bx, by) = (x / 4, y / 4);
        let from = [bx * 60, by * 60, 255 - bx * 40];
        let to = [255 - by * 50, bx * 30 + 20, by * 70];
        let t = ((x % 4) + (y % 4)) as f32 / 6.0;
        let lerp = |a: u32, b: u32| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        [lerp(from[0], to[0]), lerp(from[1], to[1]), lerp(from[2], to[2]), 255]
    });

    let compressed = source.converted(PixelFormat::Bc1Unorm).unwrap();
    let restored = compressed.converted(PixelFormat::R8G8B8A8Unorm).unwrap();
    let blocks = compressed.map_read().unwrap();

    for y in 0..16 {
        for x in 0..16 {
            let block = &blocks[((y / 4) * 4 + x / 4) as usize * 8..][..8];
            let c0 = Color565::from_raw(u16::from_le_bytes([block[0], block[1]]));
            let c1 = Color565::from_raw(u16::from_le_bytes([block[2], block[3]]));
            let steps = [
                c0.red().abs_diff(c1.red()),
                c0.green().abs_diff(c1.green()),
                c0.blue().abs_diff(c1.blue()),
            ]
            .map(|span| span as i32 / 3);

            let expected = texel_at(&source, x, y);
            let actual = texel_at(&restored, x, y);
            for channel in 0..3 {
                let error = (expected[channel] as i32 - actual[channel] as i32).abs();
                // Endpoints lose up to 4 levels when quantized to 5:6:5.
                assert!(
                    error <= steps[channel] + 8,
                    "({x}, {y}) channel {channel}: {expected:?} -> {actual:?}, step {}",
                    steps[channel]
                );
            }
            assert_eq!(actual[3], 255);
        }
    }
}

#[rstest]
#[case(-1, AddressMode::Wrap, 3)]
#[case(-1, AddressMode::Clamp, 0)]
#[case(-1, AddressMode::Mirror, 0)]
#[case(4, AddressMode::Clamp, 3)]
fn addressing_resolves_edge_coordinates(
    #[case] coord: i64,
    #[case] mode: AddressMode,
    #[case] expected: u32,
) {
    assert_eq!(resolve_coordinate(coord, 4, mode), expected);
}

#[rstest]
#[case(AddressMode::Clamp, 0.0)]
#[case(AddressMode::Wrap, 0.5)]
#[case(AddressMode::Mirror, 0.0)]
fn sampling_at_the_edge_follows_the_address_mode(#[case] mode: AddressMode, #[case] red: f32) {
    // Left texel black, right texel red; sample on the left edge.
    let image = rgba8_image(2, 1, |x, _| if x == 0 { [0, 0, 0, 255] } else { [255, 0, 0, 255] });
    let texel = image.sample(0.0, 0.5, 0.5, AddressModes::all(mode)).unwrap();
    assert_eq!(texel.r, red);
}

#[rstest]
#[case(PixelFormat::R16G16B16A16Float)]
#[case(PixelFormat::R32G32B32A32Float)]
#[case(PixelFormat::R16G16B16A16Unorm)]
#[case(PixelFormat::R10G10B10A2Unorm)]
fn wider_formats_round_trip_rgba8(#[case] format: PixelFormat) {
    let source = rgba8_image(5, 3, |x, y| [(x * 50) as u8, (y * 120) as u8, 7, (x * y * 20) as u8]);
    let wide = source.converted(format).unwrap();
    let back = wide.converted(PixelFormat::R8G8B8A8Unorm).unwrap();
    if format == PixelFormat::R10G10B10A2Unorm {
        // Alpha only has four levels.
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(texel_at(&back, x, y)[..3], texel_at(&source, x, y)[..3]);
            }
        }
    } else {
        assert_eq!(back, source);
    }
}

#[test]
fn float_sources_survive_shared_exponent_storage() {
    let mut hdr = Image::with_dimensions(PixelFormat::R32G32B32A32Float, 2, 1, 1).unwrap();
    let values = [[1.5f32, 0.25, 100.0, 1.0], [0.0, 3.0, 0.125, 1.0]];
    {
        let mut data = hdr.map_write().unwrap();
        for (texel, value) in data.chunks_exact_mut(16).zip(values) {
            for (bytes, component) in texel.chunks_exact_mut(4).zip(value) {
                bytes.copy_from_slice(&component.to_le_bytes());
            }
        }
    }

    let packed = hdr.converted(PixelFormat::R9G9B9E5SharedExp).unwrap();
    assert_eq!(packed.texel_float4(0, 0, 0).unwrap(), Float4::new(1.5, 0.25, 100.0, 1.0));
    assert_eq!(packed.texel_float4(1, 0, 0).unwrap(), Float4::new(0.0, 3.0, 0.125, 1.0));
}

#[test]
fn compressed_mips_halve_block_aligned_images() {
    let source = rgba8_image(16, 8, |x, _| if x < 8 { [255, 255, 255, 255] } else { [0, 0, 0, 255] });
    let bc3 = source.converted(PixelFormat::Bc3Unorm).unwrap();
    let mip = bc3.generate_mip().unwrap();
    assert_eq!((mip.format(), mip.width(), mip.height()), (PixelFormat::Bc3Unorm, 8, 4));

    let decoded = mip.converted(PixelFormat::R8G8B8A8Unorm).unwrap();
    assert_eq!(texel_at(&decoded, 0, 0), [255, 255, 255, 255]);
    assert_eq!(texel_at(&decoded, 7, 3), [0, 0, 0, 255]);
}

#[test]
fn transforms_crop_the_source() {
    // Map the destination onto the right half of the source; footprints stay two texels wide.
    let source = rgba8_image(4, 1, |x, _| [(x * 60) as u8, 0, 0, 255]);
    let crop = ReformatBuilder::new()
        .transform(Transform::translate(0.5, 0.0, 0.0).compose(&Transform::scale(0.5, 1.0, 1.0)))
        .resize(&source, 2, 1, 1)
        .unwrap();
    assert_eq!(texel_at(&crop, 0, 0)[0], 120);
    assert_eq!(texel_at(&crop, 1, 0)[0], 165);
}

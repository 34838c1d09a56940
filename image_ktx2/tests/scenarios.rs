//! End-to-end KTX2 byte-layout tests that wire together the loader,
//! resizer, mipmap generator, encoder, and writer. Solid-color and zlib
//! cases already have unit-level coverage in `pipeline.rs`; this file
//! covers the cases that need BC7 mipmaps and alpha-coverage preservation
//! specifically.

use image_ktx2::config::{
    AddressMode, Bc7Options, ColorSpace, Config, InputAlpha, SizeCaps, TargetEncoding, ZlibLevel,
};

fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn checker_alpha_png(width: u32, height: u32) -> Vec<u8> {
    let mut img = image::RgbaImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let a = if (x + y) % 2 == 0 { 0 } else { 255 };
        *px = image::Rgba([200, 100, 50, a]);
    }
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn base_config(target: TargetEncoding) -> Config {
    Config {
        declared_color_space: ColorSpace::Linear,
        input_alpha: InputAlpha::Straight,
        size_caps: SizeCaps::default(),
        generate_mipmaps: false,
        filter_u: None,
        filter_v: None,
        address_mode_u: AddressMode::Clamp,
        address_mode_v: AddressMode::Clamp,
        preserve_alpha_coverage: None,
        preserve_alpha_coverage_max_steps: 16,
        zlib: None,
        target,
    }
}

struct LevelEntry {
    byte_offset: u64,
    byte_length: u64,
}

fn level_entry(out: &[u8], index: usize) -> LevelEntry {
    let base = 80 + index * 24;
    LevelEntry {
        byte_offset: u64::from_le_bytes(out[base..base + 8].try_into().unwrap()),
        byte_length: u64::from_le_bytes(out[base + 8..base + 16].try_into().unwrap()),
    }
}

/// A 16x16 sRGB PNG converted to bc7-srgb with mipmaps stops generating
/// levels once both dimensions reach the 4x4 block size.
#[test]
fn bc7_srgb_mipmaps_stop_at_block_size() {
    let bytes = solid_png(16, 16, [180, 90, 45, 255]);
    let mut config = base_config(TargetEncoding::Bc7 {
        color_space: ColorSpace::Srgb,
        options: Bc7Options::default(),
    });
    config.declared_color_space = ColorSpace::Srgb;
    config.generate_mipmaps = true;

    let mut out = Vec::new();
    image_ktx2::convert(&bytes, &mut out, &config).unwrap();

    let vk_format = u32::from_le_bytes(out[12..16].try_into().unwrap());
    assert_eq!(vk_format, 146);

    let level_count = u32::from_le_bytes(out[36..40].try_into().unwrap());
    assert_eq!(level_count, 3); // (16,16), (8,8), (4,4): stops at the 4x4 block size.

    let expected_lengths = [
        16 * 4 * 4, // 16x16 -> 4x4 blocks
        16 * 2 * 2, // 8x8 -> 2x2 blocks
        16 * 1 * 1, // 4x4 -> 1x1 block
    ];
    for (i, expected) in expected_lengths.into_iter().enumerate() {
        let entry = level_entry(&out, i);
        assert_eq!(entry.byte_length, expected as u64, "level {i} byte_length");
        assert_eq!(entry.byte_offset % 16, 0, "level {i} alignment");
    }
}

/// A mip chain built with `--preserve-alpha-coverage` still produces the
/// expected halving level shapes, and every level's alpha channel stays a
/// valid coverage fraction (no NaN/overflow from the binary search driving
/// the scale out of range).
#[test]
fn alpha_coverage_preservation_produces_valid_mip_chain() {
    let bytes = checker_alpha_png(8, 8);
    let mut config = base_config(TargetEncoding::RgbaU8 {
        color_space: ColorSpace::Linear,
    });
    config.generate_mipmaps = true;
    config.preserve_alpha_coverage = Some(0.5);

    let mut out = Vec::new();
    image_ktx2::convert(&bytes, &mut out, &config).unwrap();

    let level_count = u32::from_le_bytes(out[36..40].try_into().unwrap());
    assert_eq!(level_count, 3); // (8,8), (4,4), (2,2)

    let expected_dims = [(8, 8), (4, 4), (2, 2)];
    let coverage_at = |index: usize| -> f32 {
        let entry = level_entry(&out, index);
        let start = entry.byte_offset as usize;
        let end = start + entry.byte_length as usize;
        let payload = &out[start..end];
        let (w, h) = expected_dims[index];
        assert_eq!(payload.len(), (w * h * 4) as usize, "level {index} size");
        let pixel_count = payload.len() / 4;
        let passing = payload.chunks_exact(4).filter(|px| px[3] > 127).count();
        passing as f32 / pixel_count as f32
    };

    for i in 0..3 {
        let coverage = coverage_at(i);
        assert!((0.0..=1.0).contains(&coverage), "level {i} coverage {coverage}");
    }
}

/// zlib supercompression forces byte alignment 1 regardless of the
/// underlying encoding's natural alignment.
#[test]
fn zlib_forces_byte_alignment() {
    let bytes = solid_png(16, 16, [10, 20, 30, 255]);
    let mut config = base_config(TargetEncoding::RgbaU8 {
        color_space: ColorSpace::Srgb,
    });
    config.declared_color_space = ColorSpace::Srgb;
    config.zlib = Some(ZlibLevel::Fastest);

    let mut out = Vec::new();
    image_ktx2::convert(&bytes, &mut out, &config).unwrap();

    let entry = level_entry(&out, 0);
    assert_eq!(entry.byte_offset % 1, 0);
}

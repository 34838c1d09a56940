//! The top-level `convert` entry point: decode, fit/resize, mip, encode,
//! supercompress, and write a KTX2 container for one input/output stream.

use std::io::Write;

use crate::config::Config;
use crate::error::Error;
use crate::image::Alpha;
use crate::encode::encode_level;
use crate::ktx2;
use crate::loader::load;
use crate::mipmap::MipmapGenerator;
use crate::resize::{resize, size_to_fit, ResizeOptions};
use crate::supercompress::compress;
use crate::texture::Texture;

/// The alpha policy the loader records on the freshly decoded image, derived
/// from whether the caller asked for alpha-coverage preservation.
fn initial_alpha(config: &Config) -> Alpha {
    match config.preserve_alpha_coverage {
        Some(threshold) => Alpha::AlphaTest {
            threshold,
            target_coverage: 0.0,
        },
        None => Alpha::Opacity,
    }
}

/// Converts `encoded_bytes` into a KTX2 container written to `writer`.
/// Stages run single-threaded and in order; the only internal parallelism
/// is inside the BC7 encoder.
pub fn convert<W: Write>(encoded_bytes: &[u8], writer: &mut W, config: &Config) -> Result<(), Error> {
    log::debug!("loading source image");
    let mut source = load(
        encoded_bytes,
        config.declared_color_space,
        config.input_alpha,
        initial_alpha(config),
    )?;
    log::trace!("source buffer backed by {:?}", source.origin());

    let resize_opts = ResizeOptions {
        filter_u: config.resolved_filter_u(source.hdr),
        filter_v: config.resolved_filter_v(source.hdr),
        address_mode_u: config.address_mode_u,
        address_mode_v: config.address_mode_v,
        preserve_alpha_coverage_max_steps: config.preserve_alpha_coverage_max_steps,
    };

    let (fit_w, fit_h) = size_to_fit(source.width, source.height, config.size_caps);
    if (fit_w, fit_h) != (source.width, source.height) {
        log::debug!(
            "fitting {}x{} to {}x{}",
            source.width,
            source.height,
            fit_w,
            fit_h
        );
        source = resize(&source, fit_w, fit_h, resize_opts)?;
        log::trace!("fitted buffer backed by {:?}", source.origin());
    }

    let mut float_levels = vec![source.clone()];
    if config.generate_mipmaps {
        let block_size = config.target.block_size();
        for level in MipmapGenerator::new(source, block_size, resize_opts) {
            let level = level?;
            log::trace!("mip level buffer backed by {:?}", level.origin());
            float_levels.push(level);
        }
    }
    log::debug!("generated {} mip level(s)", float_levels.len());

    let mut levels = Vec::with_capacity(float_levels.len());
    for level in &float_levels {
        let mut encoded = encode_level(level, &config.target)?;
        compress(&mut encoded, config.zlib)?;
        levels.push(encoded);
    }

    let texture = Texture::new(levels)?;
    log::debug!(
        "writing KTX2: {}x{}, {} level(s)",
        texture.width(),
        texture.height(),
        texture.levels().len()
    );
    ktx2::write(&texture, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressMode, ColorSpace, InputAlpha, SizeCaps, TargetEncoding, ZlibLevel};

    fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
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

    /// A 4x4 solid opaque red PNG converted to rgba-u8 linear, no mips, no
    /// zlib, round-trips to the expected single-level KTX2 header fields.
    #[test]
    fn solid_red_rgba_u8_single_level() {
        let bytes = solid_png(4, 4, [255, 0, 0, 255]);
        let config = base_config(TargetEncoding::RgbaU8 {
            color_space: ColorSpace::Linear,
        });

        let mut out = Vec::new();
        convert(&bytes, &mut out, &config).unwrap();

        let vk_format = u32::from_le_bytes(out[12..16].try_into().unwrap());
        assert_eq!(vk_format, 37);
        let level_count = u32::from_le_bytes(out[36..40].try_into().unwrap());
        assert_eq!(level_count, 1);
        let byte_length = u64::from_le_bytes(out[88..96].try_into().unwrap());
        assert_eq!(byte_length, 64);
    }

    /// Mipmapped rgba-f32 output has a level per halving step.
    #[test]
    fn mipmapped_rgba_f32_level_count() {
        let bytes = solid_png(8, 4, [128, 0, 0, 128]);
        let mut config = base_config(TargetEncoding::RgbaF32);
        config.generate_mipmaps = true;

        let mut out = Vec::new();
        convert(&bytes, &mut out, &config).unwrap();

        let level_count = u32::from_le_bytes(out[36..40].try_into().unwrap());
        assert_eq!(level_count, 3); // (8,4), (4,2), (2,1)
    }

    /// zlib supercompression sets the scheme field and keeps the recorded
    /// uncompressed length equal to the pre-compression size.
    #[test]
    fn zlib_supercompression_scheme_and_uncompressed_length() {
        let bytes = solid_png(16, 16, [10, 20, 30, 255]);
        let mut config = base_config(TargetEncoding::RgbaU8 {
            color_space: ColorSpace::Srgb,
        });
        config.zlib = Some(ZlibLevel::Level(6));

        let mut out = Vec::new();
        convert(&bytes, &mut out, &config).unwrap();

        let scheme = u32::from_le_bytes(out[44..48].try_into().unwrap());
        assert_eq!(scheme, 3);
        let uncompressed_length = u64::from_le_bytes(out[96..104].try_into().unwrap());
        assert_eq!(uncompressed_length, 1024);
    }

    /// Declared sRGB but HDR-encoded bytes fails before any writer output.
    #[test]
    fn color_space_mismatch_fails_before_write() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb32F(image::Rgb32FImage::from_pixel(
            2,
            2,
            image::Rgb([1.0, 0.5, 0.25]),
        ))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Hdr)
        .unwrap();

        let config = base_config(TargetEncoding::RgbaF32);
        let mut out = Vec::new();
        let result = convert(&bytes, &mut out, &config);
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}

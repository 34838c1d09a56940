//! BC7 block encoding via `intel_tex_2`.
//!
//! `intel_tex_2` does not expose the RDO lambda/lookback-window/smooth-block
//! tunables from the bc7enc_rdo interface this pipeline models; see
//! DESIGN.md for how a validated [`Bc7Options`] still maps onto the quality
//! presets the crate does offer.

use crate::config::Bc7Options;
use crate::encode::ldr::quantize_rgba_u8;
use crate::error::Error;
use crate::image::Image;

fn encode_settings(options: &Bc7Options) -> intel_tex_2::bc7::EncodeSettings {
    match options.uber_level {
        0 => intel_tex_2::bc7::alpha_ultra_fast_settings(),
        1 => intel_tex_2::bc7::alpha_very_fast_settings(),
        2 => intel_tex_2::bc7::alpha_fast_settings(),
        3 => intel_tex_2::bc7::alpha_basic_settings(),
        _ => intel_tex_2::bc7::alpha_slow_settings(),
    }
}

/// Quantizes `image` to 8-bit RGBA (applying sRGB gamma when `srgb`) and
/// BC7-compresses the result, returning the packed 16-byte-per-block
/// payload.
pub fn encode(image: &Image, srgb: bool, options: &Bc7Options) -> Result<Vec<u8>, Error> {
    options.validate()?;

    let rgba8 = quantize_rgba_u8(image.as_f32_rgba(), srgb);

    let surface = intel_tex_2::RgbaSurface {
        width: image.width,
        height: image.height,
        stride: image.width * 4,
        data: &rgba8,
    };

    let settings = encode_settings(options);

    // intel_tex_2 does not support mode-6-only restriction or an explicit
    // thread cap; `rdo_multithreading` intent (threads > 1) is covered by
    // the crate's own internal use of rayon across all available cores.
    let _ = options.resolved_threads();
    let _ = options.mode6_only;

    Ok(intel_tex_2::bc7::compress_blocks(&settings, &surface))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Alpha, BufferOrigin, Encoding};

    #[test]
    fn encode_bc7_produces_one_block_per_4x4_tile() {
        let buf: Vec<u8> = (0..(4 * 4))
            .flat_map(|_| bytemuck::bytes_of(&[1.0f32, 0.0, 0.0, 1.0]).to_vec())
            .collect();
        let image = Image::new(
            4,
            4,
            Encoding::RgbaF32,
            Alpha::Other,
            false,
            BufferOrigin::Heap,
            buf,
        );
        let blocks = encode(&image, false, &Bc7Options::default()).unwrap();
        assert_eq!(blocks.len(), 16);
    }

    /// Decodes the encoded block back with `bcdec_rs::bc7` and checks the
    /// result lands close to the solid source color, the round-trip check
    /// the test suite uses in place of a reference BC7 decoder.
    #[test]
    fn encode_bc7_round_trips_to_plausible_color() {
        let buf: Vec<u8> = (0..(4 * 4))
            .flat_map(|_| bytemuck::bytes_of(&[0.8f32, 0.2, 0.4, 1.0]).to_vec())
            .collect();
        let image = Image::new(
            4,
            4,
            Encoding::RgbaF32,
            Alpha::Other,
            false,
            BufferOrigin::Heap,
            buf,
        );
        let block = encode(&image, false, &Bc7Options::default()).unwrap();

        let mut decompressed = [0u8; 4 * 4 * 4];
        bcdec_rs::bc7(&block, &mut decompressed, 4 * 4);

        let expected = [204u8, 51, 102, 255]; // 0.8/0.2/0.4/1.0 quantized to u8.
        for px in decompressed.chunks_exact(4) {
            for (channel, expected_channel) in px.iter().zip(expected.iter()) {
                assert!(
                    (*channel as i16 - *expected_channel as i16).abs() <= 8,
                    "decoded {px:?} too far from expected {expected:?}"
                );
            }
        }
    }
}

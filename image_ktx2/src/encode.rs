//! Per-level encoding to the requested output format.

pub mod bc7;
pub mod ldr;

use crate::config::{ColorSpace, TargetEncoding};
use crate::error::Error;
use crate::image::{BufferOrigin, Encoding, Image};

/// Transcodes `image` (linear float RGBA) into `target`.
pub fn encode_level(image: &Image, target: &TargetEncoding) -> Result<Image, Error> {
    let (buf, encoding, origin) = match target {
        TargetEncoding::RgbaF32 => (
            image.buf().to_vec(),
            Encoding::RgbaF32,
            BufferOrigin::Heap,
        ),
        TargetEncoding::RgbaU8 { color_space } => {
            let srgb = *color_space == ColorSpace::Srgb;
            let encoding = if srgb {
                Encoding::RgbaSrgbU8
            } else {
                Encoding::RgbaU8
            };
            (
                ldr::quantize_rgba_u8(image.as_f32_rgba(), srgb),
                encoding,
                BufferOrigin::Heap,
            )
        }
        TargetEncoding::Bc7 {
            color_space,
            options,
        } => {
            let srgb = *color_space == ColorSpace::Srgb;
            let encoding = if srgb { Encoding::Bc7Srgb } else { Encoding::Bc7 };
            (
                bc7::encode(image, srgb, options)?,
                encoding,
                BufferOrigin::Bc7Encoder,
            )
        }
    };

    Ok(Image::new(
        image.width,
        image.height,
        encoding,
        image.alpha,
        image.hdr,
        origin,
        buf,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bc7Options;
    use crate::image::Alpha;

    fn sample_image() -> Image {
        let buf: Vec<u8> = (0..(4 * 4))
            .flat_map(|_| bytemuck::bytes_of(&[1.0f32, 0.5, 0.25, 1.0]).to_vec())
            .collect();
        Image::new(4, 4, Encoding::RgbaF32, Alpha::Other, false, BufferOrigin::Heap, buf)
    }

    #[test]
    fn encode_rgba_f32_is_identity() {
        let image = sample_image();
        let encoded = encode_level(&image, &TargetEncoding::RgbaF32).unwrap();
        assert_eq!(encoded.buf(), image.buf());
        assert_eq!(encoded.encoding, Encoding::RgbaF32);
    }

    #[test]
    fn encode_rgba_u8_has_one_byte_per_sample() {
        let image = sample_image();
        let encoded = encode_level(
            &image,
            &TargetEncoding::RgbaU8 {
                color_space: ColorSpace::Linear,
            },
        )
        .unwrap();
        assert_eq!(encoded.buf().len(), 4 * 4 * 4);
        assert_eq!(encoded.encoding, Encoding::RgbaU8);
    }

    #[test]
    fn encode_bc7_produces_block_payload() {
        let image = sample_image();
        let encoded = encode_level(
            &image,
            &TargetEncoding::Bc7 {
                color_space: ColorSpace::Linear,
                options: Bc7Options::default(),
            },
        )
        .unwrap();
        assert_eq!(encoded.buf().len(), 16);
        assert_eq!(encoded.encoding, Encoding::Bc7);
    }
}

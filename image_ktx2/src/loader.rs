//! Decode encoded bytes into a linear `rgba_f32` working image.

use crate::alpha_coverage::alpha_coverage;
use crate::config::{ColorSpace, InputAlpha};
use crate::error::Error;
use crate::image::{Alpha, BufferOrigin, Encoding, Image};

/// Decoder collaborator interface: whether `encoded_bytes` is HDR
/// (Radiance) rather than an LDR format like PNG or JPEG.
pub fn is_hdr(encoded_bytes: &[u8]) -> Result<bool, Error> {
    let format = image::guess_format(encoded_bytes)
        .map_err(|e| Error::InvalidInput(format!("unrecognized image format: {e}")))?;
    Ok(format == image::ImageFormat::Hdr)
}

/// Decodes `encoded_bytes`, producing a linear float32 RGBA [`Image`].
///
/// The `image` crate never premultiplies on load and never special-cases
/// iPhone-style BGR PNGs, so the decoder tunables an stb_image-style
/// loader would need (disable premultiply-on-load, disable iPhone PNG
/// BGR swizzling) are simply the crate's only behavior — nothing to
/// configure.
pub fn load(
    encoded_bytes: &[u8],
    declared_color_space: ColorSpace,
    input_alpha: InputAlpha,
    alpha: Alpha,
) -> Result<Image, Error> {
    let format = image::guess_format(encoded_bytes)
        .map_err(|e| Error::InvalidInput(format!("unrecognized image format: {e}")))?;
    let decoder_is_hdr = format == image::ImageFormat::Hdr;
    let declared_hdr = declared_color_space == ColorSpace::Hdr;

    if decoder_is_hdr != declared_hdr {
        return Err(Error::InvalidInput(format!(
            "declared color space {declared_color_space:?} disagrees with decoder (is_hdr={decoder_is_hdr})"
        )));
    }

    let decoded = image::load_from_memory_with_format(encoded_bytes, format)
        .map_err(|e| Error::InvalidInput(format!("decode failed: {e}")))?;

    let width = decoded.width();
    let height = decoded.height();
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(
            "decoder returned no pixels".to_string(),
        ));
    }

    let mut samples: Vec<f32> = decoded.into_rgba32f().into_raw();

    let gamma = match declared_color_space {
        ColorSpace::Srgb => 2.2f32,
        ColorSpace::Linear | ColorSpace::Hdr => 1.0f32,
    };
    if gamma != 1.0 {
        for px in samples.chunks_exact_mut(4) {
            px[0] = px[0].powf(gamma);
            px[1] = px[1].powf(gamma);
            px[2] = px[2].powf(gamma);
            // Alpha channel is never gamma-encoded.
        }
    }

    let buf: Vec<u8> = bytemuck::cast_slice(&samples).to_vec();

    let mut image = Image::new(
        width,
        height,
        Encoding::RgbaF32,
        alpha,
        decoder_is_hdr,
        BufferOrigin::Decoder,
        buf,
    );

    if image.alpha.premultiplied() && input_alpha == InputAlpha::Straight {
        image.premultiply();
    }

    if let Alpha::AlphaTest { threshold, .. } = image.alpha {
        let target_coverage = alpha_coverage(&image, threshold, 1.0);
        image.alpha = Alpha::AlphaTest {
            threshold,
            target_coverage,
        };
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn is_hdr_reports_false_for_png() {
        let bytes = solid_png(2, 2, [1, 2, 3, 255]);
        assert!(!is_hdr(&bytes).unwrap());
    }

    #[test]
    fn load_rejects_empty_bytes() {
        let result = load(&[], ColorSpace::Linear, InputAlpha::Straight, Alpha::Opacity);
        assert!(result.is_err());
    }

    #[test]
    fn load_solid_opaque_png_is_full_intensity() {
        let bytes = solid_png(4, 4, [255, 0, 0, 255]);
        let image = load(
            &bytes,
            ColorSpace::Linear,
            InputAlpha::Straight,
            Alpha::Opacity,
        )
        .unwrap();
        assert_eq!(image.width, 4);
        assert_eq!(image.height, 4);
        let samples = image.as_f32_rgba();
        assert!((samples[0] - 1.0).abs() < 1e-6);
        assert!((samples[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn load_declared_hdr_mismatch_fails() {
        let bytes = solid_png(2, 2, [10, 20, 30, 255]);
        let result = load(&bytes, ColorSpace::Hdr, InputAlpha::Straight, Alpha::Opacity);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}

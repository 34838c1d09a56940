//! 8-bit LDR quantization shared by the `rgba_u8`/`rgba_srgb_u8` encoder and
//! the BC7 path (BC7 block-compresses already-quantized 8-bit pixels).

/// Quantizes interleaved float RGBA samples to interleaved `u8` RGBA.
/// Applies inverse-gamma to R, G, B (never A) when `srgb` is set.
pub fn quantize_rgba_u8(samples: &[f32], srgb: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len());
    for (i, &v) in samples.iter().enumerate() {
        let is_alpha = i % 4 == 3;
        let v = if srgb && !is_alpha {
            v.powf(1.0 / 2.2)
        } else {
            v
        };
        let v = (v * 255.0 + 0.5).clamp(0.0, 255.0);
        out.push(v.floor() as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_out_of_range_values() {
        let samples = [2.0f32, -1.0, 0.5, 1.0];
        let out = quantize_rgba_u8(&samples, false);
        assert_eq!(out, [255, 0, 128, 255]);
    }

    #[test]
    fn quantize_never_gamma_encodes_alpha() {
        let samples = [1.0f32, 1.0, 1.0, 0.5];
        let srgb = quantize_rgba_u8(&samples, true);
        let linear = quantize_rgba_u8(&samples, false);
        assert_eq!(srgb[3], linear[3]);
    }
}

//! Binary-search alpha-coverage preservation across mip levels.

use crate::image::{Alpha, Image};

/// `q(x)`: quantize a threshold the same way the stored alpha channel will
/// be quantized, so the coverage count matches what the final encoded
/// level will actually test against.
fn quantize_threshold(x: f32, hdr: bool) -> f32 {
    if hdr {
        x
    } else {
        (x * 255.0).round() / 255.0
    }
}

/// Fraction of pixels whose `alpha * scale` exceeds the quantized
/// `threshold`.
pub fn alpha_coverage(image: &Image, threshold: f32, scale: f32) -> f32 {
    let q = quantize_threshold(threshold, image.hdr);
    let data = image.as_f32_rgba();
    let pixel_count = data.len() / 4;
    if pixel_count == 0 {
        return 0.0;
    }
    let passing = data
        .chunks_exact(4)
        .filter(|px| px[3] * scale > q)
        .count();
    passing as f32 / pixel_count as f32
}

/// Binary-searches a multiplier for alpha that drives `alpha_coverage` back
/// toward the image's recorded `target_coverage`, then applies the best
/// scale found. No-op unless `image.alpha` is `AlphaTest`.
pub fn preserve_alpha_coverage(image: &mut Image, max_steps: u8) {
    let (threshold, target_coverage) = match image.alpha {
        Alpha::AlphaTest {
            threshold,
            target_coverage,
        } => (threshold, target_coverage),
        _ => return,
    };

    let mut lower = 0.0f32;
    let mut upper = 1.0f32;
    let mut cur = threshold;
    let mut best_scale = 1.0f32;
    let mut best_dist = f32::INFINITY;

    for _ in 0..max_steps {
        if cur <= 0.0 {
            break;
        }
        let scale = threshold / cur;
        let cov = alpha_coverage(image, threshold, scale);
        let dist = (cov - target_coverage).abs();
        if dist < best_dist {
            best_dist = dist;
            best_scale = scale;
        }
        if cov < target_coverage {
            upper = cur;
        } else if cov > target_coverage {
            lower = cur;
        } else {
            break;
        }
        cur = (lower + upper) / 2.0;
    }

    if best_scale != 1.0 {
        let scale = best_scale;
        for px in image.as_f32_rgba_mut().chunks_exact_mut(4) {
            px[3] = (px[3] * scale).min(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{BufferOrigin, Encoding};

    fn make_image(alphas: &[f32], hdr: bool) -> Image {
        let mut buf = Vec::with_capacity(alphas.len() * 16);
        for &a in alphas {
            buf.extend_from_slice(bytemuck::bytes_of(&[0.5f32, 0.5, 0.5, a]));
        }
        Image::new(
            alphas.len() as u32,
            1,
            Encoding::RgbaF32,
            Alpha::Other,
            hdr,
            BufferOrigin::Heap,
            buf,
        )
    }

    #[test]
    fn coverage_counts_passing_pixels() {
        let image = make_image(&[0.0, 0.2, 0.6, 1.0], false);
        // threshold 0.5, scale 1.0: only 0.6 and 1.0 pass.
        assert_eq!(alpha_coverage(&image, 0.5, 1.0), 0.5);
    }

    #[test]
    fn preserve_alpha_coverage_noop_without_alpha_test() {
        let mut image = make_image(&[0.1, 0.9], false);
        let before = image.buf().to_vec();
        preserve_alpha_coverage(&mut image, 16);
        assert_eq!(image.buf(), before.as_slice());
    }

    #[test]
    fn preserve_alpha_coverage_converges_toward_target() {
        let mut image = make_image(&[0.1, 0.2, 0.3, 0.9], false);
        image.alpha = Alpha::AlphaTest {
            threshold: 0.5,
            target_coverage: 0.5,
        };
        preserve_alpha_coverage(&mut image, 16);
        let cov = alpha_coverage(&image, 0.5, 1.0);
        // Scaling up alpha should move coverage closer to 0.5 than the
        // un-scaled 0.25 starting point.
        assert!((cov - 0.5).abs() <= 0.25 + 1e-6);
    }
}

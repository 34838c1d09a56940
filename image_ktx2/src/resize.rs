//! Fit-to-caps sizing and filtered resampling.

use fast_image_resize as fir;

use crate::alpha_coverage::preserve_alpha_coverage;
use crate::config::{AddressMode, Filter, SizeCaps};
use crate::error::Error;
use crate::image::{Alpha, BufferOrigin, Encoding, Image};

/// `sizeToFit`: largest dimensions fitting `caps` while preserving aspect
/// ratio; never upscales.
pub fn size_to_fit(width: u32, height: u32, caps: SizeCaps) -> (u32, u32) {
    let max_w = caps.max_width.min(caps.max_size).min(width);
    let max_h = caps.max_height.min(caps.max_size).min(height);

    let s_x = (max_w as f64 / width as f64).min(1.0);
    let s_y = (max_h as f64 / height as f64).min(1.0);
    let s = s_x.min(s_y);

    let w = ((s * width as f64).floor() as u32).min(max_w).max(1);
    let h = ((s * height as f64).floor() as u32).min(max_h).max(1);
    (w, h)
}

fn to_fir_filter(filter: Filter) -> Option<fir::FilterType> {
    match filter {
        Filter::PointSample => None,
        Filter::Triangle => Some(fir::FilterType::Bilinear),
        Filter::CubicBSpline | Filter::CatmullRom => Some(fir::FilterType::CatmullRom),
        Filter::Mitchell => Some(fir::FilterType::Mitchell),
    }
}

fn to_fir_alg(filter: Filter) -> fir::ResizeAlg {
    match to_fir_filter(filter) {
        Some(f) => fir::ResizeAlg::Convolution(f),
        None => fir::ResizeAlg::Nearest,
    }
}

/// Convolution support radius in source pixels, used to size border padding
/// for non-`clamp` address modes.
fn kernel_half_width(filter: Filter) -> u32 {
    match filter {
        Filter::PointSample => 0,
        Filter::Triangle => 1,
        Filter::CubicBSpline | Filter::CatmullRom | Filter::Mitchell => 2,
    }
}

fn sample_index(i: i64, n: u32, mode: AddressMode) -> Option<u32> {
    let n = n as i64;
    match mode {
        AddressMode::Clamp => Some(i.clamp(0, n - 1) as u32),
        AddressMode::Wrap => Some(i.rem_euclid(n) as u32),
        AddressMode::Reflect => {
            let period = 2 * n;
            let m = i.rem_euclid(period);
            Some((if m < n { m } else { period - 1 - m }) as u32)
        }
        AddressMode::Zero => {
            if i < 0 || i >= n {
                None
            } else {
                Some(i as u32)
            }
        }
    }
}

/// Extends `pixels` (w×h RGBA f32) by `pad` columns on each side of the
/// width axis, addressing out-of-range columns per `mode`.
fn extend_x(pixels: &[f32], w: u32, h: u32, pad: u32, mode: AddressMode) -> (Vec<f32>, u32) {
    if pad == 0 {
        return (pixels.to_vec(), w);
    }
    let new_w = w + 2 * pad;
    let mut out = vec![0f32; (new_w * h * 4) as usize];
    for y in 0..h {
        for nx in 0..new_w {
            let sx = nx as i64 - pad as i64;
            if let Some(sx) = sample_index(sx, w, mode) {
                let src = ((y * w + sx) * 4) as usize;
                let dst = ((y * new_w + nx) * 4) as usize;
                out[dst..dst + 4].copy_from_slice(&pixels[src..src + 4]);
            }
        }
    }
    (out, new_w)
}

/// Extends `pixels` (w×h RGBA f32) by `pad` rows on each side of the height
/// axis, addressing out-of-range rows per `mode`.
fn extend_y(pixels: &[f32], w: u32, h: u32, pad: u32, mode: AddressMode) -> (Vec<f32>, u32) {
    if pad == 0 {
        return (pixels.to_vec(), h);
    }
    let new_h = h + 2 * pad;
    let mut out = vec![0f32; (w * new_h * 4) as usize];
    for ny in 0..new_h {
        let sy = ny as i64 - pad as i64;
        if let Some(sy) = sample_index(sy, h, mode) {
            let src = ((sy * w) * 4) as usize;
            let dst = ((ny * w) * 4) as usize;
            out[dst..dst + (w * 4) as usize].copy_from_slice(&pixels[src..src + (w * 4) as usize]);
        }
    }
    (out, new_h)
}

fn fir_resize(
    src: &[f32],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    alg: fir::ResizeAlg,
) -> Result<Vec<f32>, Error> {
    let src_bytes: &[u8] = bytemuck::cast_slice(src);
    let src_image = fir::images::ImageRef::new(src_w, src_h, src_bytes, fir::PixelType::F32x4)
        .map_err(|e| Error::InvalidInput(format!("resize source invalid: {e}")))?;
    let mut dst_image = fir::images::Image::new(dst_w, dst_h, fir::PixelType::F32x4);
    let options = fir::ResizeOptions::new().resize_alg(alg);
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| Error::InvalidInput(format!("resize failed: {e}")))?;
    Ok(bytemuck::cast_slice(dst_image.buffer()).to_vec())
}

/// Resizes along one axis, padding the border per `mode` when the kernel has
/// support beyond one source pixel and `mode` isn't `clamp` (which matches
/// the resampler's native edge behavior).
fn resize_axis_x(
    pixels: &[f32],
    w: u32,
    h: u32,
    dst_w: u32,
    filter: Filter,
    mode: AddressMode,
) -> Result<Vec<f32>, Error> {
    if dst_w == w {
        return Ok(pixels.to_vec());
    }
    let pad = if mode == AddressMode::Clamp {
        0
    } else {
        kernel_half_width(filter)
    };
    let (padded, padded_w) = extend_x(pixels, w, h, pad, mode);
    let pad_dst = if pad > 0 {
        ((pad as f64) * (dst_w as f64 / w as f64)).round() as u32
    } else {
        0
    };
    let padded_dst_w = dst_w + 2 * pad_dst;
    let resized = fir_resize(&padded, padded_w, h, padded_dst_w, h, to_fir_alg(filter))?;
    if pad_dst == 0 {
        return Ok(resized);
    }
    let mut out = vec![0f32; (dst_w * h * 4) as usize];
    for y in 0..h {
        let src = ((y * padded_dst_w + pad_dst) * 4) as usize;
        let dst = ((y * dst_w) * 4) as usize;
        out[dst..dst + (dst_w * 4) as usize]
            .copy_from_slice(&resized[src..src + (dst_w * 4) as usize]);
    }
    Ok(out)
}

fn resize_axis_y(
    pixels: &[f32],
    w: u32,
    h: u32,
    dst_h: u32,
    filter: Filter,
    mode: AddressMode,
) -> Result<Vec<f32>, Error> {
    if dst_h == h {
        return Ok(pixels.to_vec());
    }
    let pad = if mode == AddressMode::Clamp {
        0
    } else {
        kernel_half_width(filter)
    };
    let (padded, padded_h) = extend_y(pixels, w, h, pad, mode);
    let pad_dst = if pad > 0 {
        ((pad as f64) * (dst_h as f64 / h as f64)).round() as u32
    } else {
        0
    };
    let padded_dst_h = dst_h + 2 * pad_dst;
    let resized = fir_resize(&padded, w, padded_h, w, padded_dst_h, to_fir_alg(filter))?;
    if pad_dst == 0 {
        return Ok(resized);
    }
    let row_bytes = (w * 4) as usize;
    let mut out = vec![0f32; (w * dst_h * 4) as usize];
    for y in 0..dst_h {
        let src = ((y + pad_dst) as usize) * row_bytes;
        let dst = (y as usize) * row_bytes;
        out[dst..dst + row_bytes].copy_from_slice(&resized[src..src + row_bytes]);
    }
    Ok(out)
}

/// Clamps all samples to `>= 0`, undoing negative ringing from sharpening
/// filters before later quantization sees them.
fn clamp_non_negative(pixels: &mut [f32]) {
    for v in pixels.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

/// Per-axis resize options, threaded through from [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct ResizeOptions {
    pub filter_u: Filter,
    pub filter_v: Filter,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub preserve_alpha_coverage_max_steps: u8,
}

/// Resizes `image` (linear `rgba_f32`, premultiplied if transparency) to
/// `(dst_w, dst_h)`, clamping after sharpening filters and re-running
/// alpha-coverage preservation when applicable.
pub fn resize(image: &Image, dst_w: u32, dst_h: u32, opts: ResizeOptions) -> Result<Image, Error> {
    debug_assert!(image.is_working_float());

    let src = image.as_f32_rgba();
    let after_x = resize_axis_x(
        src,
        image.width,
        image.height,
        dst_w,
        opts.filter_u,
        opts.address_mode_u,
    )?;
    let mut after_y = resize_axis_y(
        &after_x,
        dst_w,
        image.height,
        dst_h,
        opts.filter_v,
        opts.address_mode_v,
    )?;

    if opts.filter_u.sharpens() || opts.filter_v.sharpens() {
        clamp_non_negative(&mut after_y);
    }

    let buf: Vec<u8> = bytemuck::cast_slice(&after_y).to_vec();
    let mut resized = Image::new(
        dst_w,
        dst_h,
        Encoding::RgbaF32,
        image.alpha,
        image.hdr,
        BufferOrigin::Resampler,
        buf,
    );

    if matches!(resized.alpha, Alpha::AlphaTest { .. }) {
        preserve_alpha_coverage(&mut resized, opts.preserve_alpha_coverage_max_steps);
    }

    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_to_fit_never_upscales() {
        let caps = SizeCaps {
            max_size: 1024,
            ..Default::default()
        };
        assert_eq!(size_to_fit(16, 16, caps), (16, 16));
    }

    #[test]
    fn size_to_fit_preserves_aspect_ratio() {
        let caps = SizeCaps {
            max_size: 50,
            ..Default::default()
        };
        let (w, h) = size_to_fit(100, 200, caps);
        assert_eq!(h, 50);
        assert_eq!(w, 25);
    }

    #[test]
    fn size_to_fit_respects_separate_width_height_caps() {
        let caps = SizeCaps {
            max_width: 10,
            max_height: u32::MAX,
            max_size: u32::MAX,
        };
        let (w, _h) = size_to_fit(100, 100, caps);
        assert_eq!(w, 10);
    }

    #[test]
    fn resize_downscales_solid_color_image() {
        let mut buf = Vec::new();
        for _ in 0..(8 * 8) {
            buf.extend_from_slice(bytemuck::bytes_of(&[0.5f32, 0.25, 0.75, 1.0]));
        }
        let image = Image::new(
            8,
            8,
            Encoding::RgbaF32,
            Alpha::Other,
            false,
            BufferOrigin::Heap,
            buf,
        );
        let opts = ResizeOptions {
            filter_u: Filter::Mitchell,
            filter_v: Filter::Mitchell,
            address_mode_u: AddressMode::Clamp,
            address_mode_v: AddressMode::Clamp,
            preserve_alpha_coverage_max_steps: 0,
        };
        let resized = resize(&image, 4, 4, opts).unwrap();
        assert_eq!(resized.width, 4);
        assert_eq!(resized.height, 4);
        assert_eq!(resized.as_f32_rgba().len(), 4 * 4 * 4);
    }
}

//! Lazy mip-level generation.

use crate::error::Error;
use crate::image::Image;
use crate::resize::{resize, ResizeOptions};

/// Lazily halves `source` down to `block_size`, using `resize` for each
/// step. Finite and non-restartable; re-create from the source level to
/// start over.
pub struct MipmapGenerator {
    current: Image,
    block_size: u32,
    resize_opts: ResizeOptions,
    done: bool,
}

impl MipmapGenerator {
    pub fn new(source: Image, block_size: u32, resize_opts: ResizeOptions) -> Self {
        MipmapGenerator {
            current: source,
            block_size,
            resize_opts,
            done: false,
        }
    }
}

impl Iterator for MipmapGenerator {
    type Item = Result<Image, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.current.width <= self.block_size && self.current.height <= self.block_size {
            self.done = true;
            return None;
        }

        let next_w = (self.current.width / 2).max(1);
        let next_h = (self.current.height / 2).max(1);

        match resize(&self.current, next_w, next_h, self.resize_opts) {
            Ok(next) => {
                self.current = next.clone();
                Some(Ok(next))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressMode, Filter};
    use crate::image::{Alpha, BufferOrigin, Encoding};

    fn solid_image(w: u32, h: u32) -> Image {
        let buf: Vec<u8> = (0..(w * h))
            .flat_map(|_| bytemuck::bytes_of(&[1.0f32, 1.0, 1.0, 1.0]).to_vec())
            .collect();
        Image::new(w, h, Encoding::RgbaF32, Alpha::Other, false, BufferOrigin::Heap, buf)
    }

    fn opts() -> ResizeOptions {
        ResizeOptions {
            filter_u: Filter::Mitchell,
            filter_v: Filter::Mitchell,
            address_mode_u: AddressMode::Clamp,
            address_mode_v: AddressMode::Clamp,
            preserve_alpha_coverage_max_steps: 0,
        }
    }

    #[test]
    fn mipmap_shape_halves_until_block_size() {
        let gen = MipmapGenerator::new(solid_image(16, 16), 4, opts());
        let levels: Vec<_> = gen.map(|r| r.unwrap()).collect();
        let dims: Vec<_> = levels.iter().map(|i| (i.width, i.height)).collect();
        assert_eq!(dims, vec![(8, 8), (4, 4)]);
    }

    #[test]
    fn mipmap_floors_at_one_pixel() {
        let gen = MipmapGenerator::new(solid_image(8, 2), 1, opts());
        let levels: Vec<_> = gen.map(|r| r.unwrap()).collect();
        let dims: Vec<_> = levels.iter().map(|i| (i.width, i.height)).collect();
        assert_eq!(dims, vec![(4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn mipmap_stops_immediately_when_already_at_block_size() {
        let gen = MipmapGenerator::new(solid_image(4, 4), 4, opts());
        let levels: Vec<_> = gen.map(|r| r.unwrap()).collect();
        assert!(levels.is_empty());
    }
}

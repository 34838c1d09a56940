//! The bounded mip-level collection written out by the KTX2 writer.

use crate::error::Error;
use crate::image::{Encoding, Image, Supercompression};

pub const MAX_LEVELS: usize = 32;

/// A validated, ≤32-level mip chain sharing encoding, supercompression, and
/// premultiplication across every level.
#[derive(Debug)]
pub struct Texture {
    levels: Vec<Image>,
}

impl Texture {
    /// Validates the writer's preconditions: level count, shared encoding/
    /// supercompression/premultiplication, and the halving relation between
    /// consecutive levels.
    pub fn new(levels: Vec<Image>) -> Result<Self, Error> {
        if levels.is_empty() || levels.len() > MAX_LEVELS {
            return Err(Error::InvalidInput(format!(
                "texture must have 1..={MAX_LEVELS} levels, got {}",
                levels.len()
            )));
        }

        let first = &levels[0];
        for (i, level) in levels.iter().enumerate() {
            if level.encoding != first.encoding {
                return Err(Error::InvalidInput(format!(
                    "level {i} encoding does not match level 0"
                )));
            }
            if level.supercompression != first.supercompression {
                return Err(Error::InvalidInput(format!(
                    "level {i} supercompression does not match level 0"
                )));
            }
            if level.alpha.premultiplied() != first.alpha.premultiplied() {
                return Err(Error::InvalidInput(format!(
                    "level {i} premultiplication does not match level 0"
                )));
            }
            if i > 0 {
                let prev = &levels[i - 1];
                let expected_w = (prev.width / 2).max(1);
                let expected_h = (prev.height / 2).max(1);
                if level.width != expected_w || level.height != expected_h {
                    return Err(Error::InvalidInput(format!(
                        "level {i} dimensions {}x{} do not halve level {}'s {}x{}",
                        level.width,
                        level.height,
                        i - 1,
                        prev.width,
                        prev.height
                    )));
                }
            }
        }

        Ok(Texture { levels })
    }

    pub fn levels(&self) -> &[Image] {
        &self.levels
    }

    pub fn encoding(&self) -> Encoding {
        self.levels[0].encoding
    }

    pub fn supercompression(&self) -> Supercompression {
        self.levels[0].supercompression
    }

    pub fn premultiplied(&self) -> bool {
        self.levels[0].alpha.premultiplied()
    }

    pub fn width(&self) -> u32 {
        self.levels[0].width
    }

    pub fn height(&self) -> u32 {
        self.levels[0].height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Alpha, BufferOrigin};

    fn level(w: u32, h: u32) -> Image {
        Image::new(
            w,
            h,
            Encoding::RgbaU8,
            Alpha::Other,
            false,
            BufferOrigin::Heap,
            vec![0u8; (w * h * 4) as usize],
        )
    }

    #[test]
    fn texture_accepts_halving_chain() {
        let texture = Texture::new(vec![level(8, 8), level(4, 4), level(2, 2)]).unwrap();
        assert_eq!(texture.levels().len(), 3);
    }

    #[test]
    fn texture_rejects_empty_levels() {
        assert!(Texture::new(vec![]).is_err());
    }

    #[test]
    fn texture_rejects_non_halving_chain() {
        assert!(Texture::new(vec![level(8, 8), level(3, 3)]).is_err());
    }

    #[test]
    fn texture_rejects_mismatched_encoding() {
        let mut odd = level(4, 4);
        odd.encoding = Encoding::RgbaF32;
        assert!(Texture::new(vec![level(8, 8), odd]).is_err());
    }
}

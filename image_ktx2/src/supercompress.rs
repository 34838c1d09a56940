//! Optional zlib supercompression of an encoded level.

use std::io::Write;

use flate2::write::ZlibEncoder;

use crate::config::ZlibLevel;
use crate::error::Error;
use crate::image::{BufferOrigin, Image, Supercompression};

/// Wraps `image`'s already-encoded bytes in a zlib frame at `level`, or
/// leaves them untouched when `level` is `None`. `uncompressed_byte_length`
/// is left as recorded at encode time regardless of which path is taken.
pub fn compress(image: &mut Image, level: Option<ZlibLevel>) -> Result<(), Error> {
    let level = match level {
        Some(level) => level,
        None => {
            image.supercompression = Supercompression::None;
            return Ok(());
        }
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), level.to_flate2()?);
    encoder
        .write_all(image.buf())
        .map_err(|e| Error::CompressorFailed(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::CompressorFailed(e.to_string()))?;

    image.set_buf(compressed, BufferOrigin::Heap);
    image.supercompression = Supercompression::Zlib;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Alpha, Encoding};

    #[test]
    fn compress_none_retains_buffer() {
        let mut image = Image::new(
            2,
            2,
            Encoding::RgbaU8,
            Alpha::Other,
            false,
            BufferOrigin::Heap,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
        );
        let before = image.buf().to_vec();
        let before_len = image.uncompressed_byte_length;
        compress(&mut image, None).unwrap();
        assert_eq!(image.buf(), before.as_slice());
        assert_eq!(image.supercompression, Supercompression::None);
        assert_eq!(image.uncompressed_byte_length, before_len);
    }

    #[test]
    fn compress_zlib_preserves_uncompressed_length() {
        let data = vec![0u8; 1024];
        let mut image = Image::new(
            16, 16, Encoding::RgbaU8, Alpha::Other, false, BufferOrigin::Heap, data,
        );
        let original_len = image.uncompressed_byte_length;
        compress(&mut image, Some(ZlibLevel::Smallest)).unwrap();
        assert_eq!(image.supercompression, Supercompression::Zlib);
        assert_eq!(image.uncompressed_byte_length, original_len);
        assert!(image.buf().len() < original_len);
    }
}

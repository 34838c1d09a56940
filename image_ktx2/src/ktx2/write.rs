//! The bit-exact KTX2 writer: header, level index, DFD, and payload.

use std::io::Write;

use super::dfd;
use super::header::{self, LevelIndexEntry};
use crate::error::Error;
use crate::image::Supercompression;
use crate::texture::Texture;

/// Writes `texture` to `writer` as a KTX2 container: header, level index
/// (largest-first), DFD, then payload (smallest-first, aligned).
pub fn write<W: Write>(texture: &Texture, writer: &mut W) -> Result<(), Error> {
    let levels = texture.levels();
    let n = levels.len();
    let encoding = texture.encoding();
    let supercompression = texture.supercompression();

    let vk_format = header::vk_format(encoding);
    let type_size = header::type_size(encoding);
    let supercompression_scheme = match supercompression {
        Supercompression::None => header::SUPERCOMPRESSION_NONE,
        Supercompression::Zlib => header::SUPERCOMPRESSION_ZLIB,
    };

    let dfd_bytes = dfd::build(
        encoding,
        supercompression == Supercompression::None,
        texture.premultiplied(),
    );
    let dfd_off = header::HEADER_SIZE + n as u64 * header::LEVEL_INDEX_ENTRY_SIZE;
    let dfd_len = dfd_bytes.len() as u64;

    let level_alignment: u64 = if supercompression != Supercompression::None {
        1
    } else {
        match encoding {
            crate::image::Encoding::RgbaF32
            | crate::image::Encoding::Bc7
            | crate::image::Encoding::Bc7Srgb => 16,
            _ => 4,
        }
    };

    // Compute offsets walking the payload smallest-first, but record each
    // into the large→small slot matching its level index.
    let mut entries = vec![LevelIndexEntry::default(); n];
    let mut cursor = dfd_off + dfd_len;
    for i in (0..n).rev() {
        let level = &levels[i];
        let pad = (level_alignment - (cursor % level_alignment)) % level_alignment;
        cursor += pad;
        entries[i] = LevelIndexEntry {
            byte_offset: cursor,
            byte_length: level.buf().len() as u64,
            uncompressed_byte_length: level.uncompressed_byte_length as u64,
        };
        cursor += level.buf().len() as u64;
    }

    let mut out = Vec::new();
    out.try_reserve_exact(cursor as usize)
        .map_err(|_| Error::OutOfMemory)?;
    header::write_header(
        &mut out,
        vk_format,
        type_size,
        texture.width(),
        texture.height(),
        n as u32,
        supercompression_scheme,
        dfd_off as u32,
        dfd_len as u32,
    );
    for entry in &entries {
        entry.write(&mut out);
    }
    out.extend_from_slice(&dfd_bytes);

    for i in (0..n).rev() {
        let target_offset = entries[i].byte_offset;
        let pad = target_offset - out.len() as u64;
        out.extend(std::iter::repeat(0u8).take(pad as usize));
        out.extend_from_slice(levels[i].buf());
    }

    writer.write_all(&out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Alpha, BufferOrigin, Encoding, Image};

    fn level(w: u32, h: u32, data: Vec<u8>) -> Image {
        Image::new(w, h, Encoding::RgbaU8, Alpha::Other, false, BufferOrigin::Heap, data)
    }

    #[test]
    fn solid_red_single_level() {
        let data = vec![0xFFu8, 0x00, 0x00, 0xFF].repeat(16);
        let texture = Texture::new(vec![level(4, 4, data)]).unwrap();

        let mut out = Vec::new();
        write(&texture, &mut out).unwrap();

        assert_eq!(&out[0..12], &header::IDENTIFIER);
        let vk_format = u32::from_le_bytes(out[12..16].try_into().unwrap());
        assert_eq!(vk_format, 37);
        let pixel_width = u32::from_le_bytes(out[20..24].try_into().unwrap());
        let pixel_height = u32::from_le_bytes(out[24..28].try_into().unwrap());
        assert_eq!((pixel_width, pixel_height), (4, 4));
        let level_count = u32::from_le_bytes(out[36..40].try_into().unwrap());
        assert_eq!(level_count, 1);

        let byte_offset = u64::from_le_bytes(out[80..88].try_into().unwrap());
        let byte_length = u64::from_le_bytes(out[88..96].try_into().unwrap());
        let uncompressed_length = u64::from_le_bytes(out[96..104].try_into().unwrap());
        assert_eq!(byte_length, 64);
        assert_eq!(uncompressed_length, 64);
        assert_eq!(byte_offset % 4, 0);

        let payload = &out[byte_offset as usize..byte_offset as usize + 64];
        assert_eq!(payload, vec![0xFF, 0x00, 0x00, 0xFF].repeat(16).as_slice());
    }

    #[test]
    fn level_index_is_reversed_relative_to_payload_order() {
        let texture = Texture::new(vec![
            level(8, 8, vec![0u8; 8 * 8 * 4]),
            level(4, 4, vec![1u8; 4 * 4 * 4]),
        ])
        .unwrap();

        let mut out = Vec::new();
        write(&texture, &mut out).unwrap();

        let entry0_offset = u64::from_le_bytes(out[80..88].try_into().unwrap());
        let entry1_offset = u64::from_le_bytes(out[104..112].try_into().unwrap());
        assert!(entry0_offset > entry1_offset);
    }
}

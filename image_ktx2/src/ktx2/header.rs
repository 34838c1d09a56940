//! KTX2 header constants and the 80-byte header layout.

use crate::config::ColorSpace;
use crate::image::Encoding;

/// `«KTX 20»\r\n\x1A\n`.
pub const IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x32, 0x30, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

pub const SUPERCOMPRESSION_NONE: u32 = 0;
pub const SUPERCOMPRESSION_ZLIB: u32 = 3;

/// Maps an [`Encoding`] to its VkFormat value. These are declared directly
/// rather than sourced from a crate's format enum — see DESIGN.md for why
/// byte-exact constants are hand-written here.
pub fn vk_format(encoding: Encoding) -> u32 {
    match encoding {
        Encoding::RgbaU8 => 37,
        Encoding::RgbaSrgbU8 => 43,
        Encoding::RgbaF32 => 109,
        Encoding::Bc7 => 145,
        Encoding::Bc7Srgb => 146,
    }
}

pub fn type_size(encoding: Encoding) -> u32 {
    match encoding {
        Encoding::RgbaF32 => 4,
        _ => 1,
    }
}

pub fn color_space(encoding: Encoding) -> ColorSpace {
    if encoding.is_srgb() {
        ColorSpace::Srgb
    } else {
        ColorSpace::Linear
    }
}

/// A single level-index entry (24 bytes).
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelIndexEntry {
    pub byte_offset: u64,
    pub byte_length: u64,
    pub uncompressed_byte_length: u64,
}

impl LevelIndexEntry {
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.byte_offset.to_le_bytes());
        out.extend_from_slice(&self.byte_length.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_byte_length.to_le_bytes());
    }
}

pub const HEADER_SIZE: u64 = 80;
pub const LEVEL_INDEX_ENTRY_SIZE: u64 = 24;

/// Writes the 80-byte KTX2 header, excluding the level index (which
/// immediately follows and is written by the caller).
#[allow(clippy::too_many_arguments)]
pub fn write_header(
    out: &mut Vec<u8>,
    vk_format: u32,
    type_size: u32,
    pixel_width: u32,
    pixel_height: u32,
    level_count: u32,
    supercompression_scheme: u32,
    dfd_off: u32,
    dfd_len: u32,
) {
    out.extend_from_slice(&IDENTIFIER);
    out.extend_from_slice(&vk_format.to_le_bytes());
    out.extend_from_slice(&type_size.to_le_bytes());
    out.extend_from_slice(&pixel_width.to_le_bytes());
    out.extend_from_slice(&pixel_height.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // pixel_depth
    out.extend_from_slice(&0u32.to_le_bytes()); // layer_count
    out.extend_from_slice(&1u32.to_le_bytes()); // face_count
    out.extend_from_slice(&level_count.to_le_bytes());
    out.extend_from_slice(&supercompression_scheme.to_le_bytes());
    // Index substruct.
    out.extend_from_slice(&dfd_off.to_le_bytes());
    out.extend_from_slice(&dfd_len.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // kvd_off
    out.extend_from_slice(&0u32.to_le_bytes()); // kvd_len
    out.extend_from_slice(&0u64.to_le_bytes()); // sgd_off
    out.extend_from_slice(&0u64.to_le_bytes()); // sgd_len
    debug_assert_eq!(out.len() as u64, HEADER_SIZE);
}

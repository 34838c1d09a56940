//! Data Format Descriptor construction.
//!
//! The Basic Descriptor Block is a 192-bit packed record; rather than trust
//! a crate's enum discriminants for a bit-exact layout, every field is
//! assembled directly from its documented bit width, mirroring how
//! `mate-h-bevy_mod_environment_map_tools`'s `create_rgb9e5_dfd` hand-packs
//! its own DFD word by word.

use crate::config::ColorSpace;
use crate::image::Encoding;

const VERSION_NUMBER: u32 = 2;
const COLOR_MODEL_RGBSDA: u32 = 1;
const COLOR_MODEL_BC7: u32 = 134;
const COLOR_PRIMARIES_BT709: u32 = 1;
const TRANSFER_LINEAR: u32 = 1;
const TRANSFER_SRGB: u32 = 2;

const QUAL_LINEAR: u8 = 1 << 0;
const QUAL_SIGNED: u8 = 1 << 2;
const QUAL_FLOAT: u8 = 1 << 3;

const CHANNEL_R: u8 = 0;
const CHANNEL_G: u8 = 1;
const CHANNEL_B: u8 = 2;
const CHANNEL_A: u8 = 15;
const CHANNEL_DATA: u8 = 0;

fn push_sample(
    out: &mut Vec<u8>,
    bit_offset: u16,
    bit_length_bits: u32,
    channel_type: u8,
    qualifiers: u8,
    lower: u32,
    upper: u32,
) {
    let word0 = bit_offset as u32
        | ((bit_length_bits - 1) << 16)
        | ((channel_type as u32) << 24)
        | ((qualifiers as u32) << 28);
    out.extend_from_slice(&word0.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // sample_position_0..3
    out.extend_from_slice(&lower.to_le_bytes());
    out.extend_from_slice(&upper.to_le_bytes());
}

fn sample_count(encoding: Encoding) -> usize {
    match encoding {
        Encoding::Bc7 | Encoding::Bc7Srgb => 1,
        _ => 4,
    }
}

/// `bdb_size(samples) = 24 + 16 * samples`.
pub fn basic_descriptor_block_size(encoding: Encoding) -> u32 {
    24 + 16 * sample_count(encoding) as u32
}

/// `dfd_len = 4 + bdb_size(samples)`.
pub fn dfd_len(encoding: Encoding) -> u32 {
    4 + basic_descriptor_block_size(encoding)
}

/// Builds the full DFD (leading `u32` length field, Basic Descriptor Block,
/// and per-sample records) for one texture.
pub fn build(encoding: Encoding, supercompression_none: bool, premultiplied: bool) -> Vec<u8> {
    let bdb_size = basic_descriptor_block_size(encoding);
    let total_len = 4 + bdb_size;

    let mut out = Vec::with_capacity(total_len as usize);
    out.extend_from_slice(&total_len.to_le_bytes());

    let vendor_id: u32 = 0;
    let descriptor_type: u32 = 0;
    let word0 = vendor_id | (descriptor_type << 17);
    out.extend_from_slice(&word0.to_le_bytes());

    let word1 = VERSION_NUMBER | (bdb_size << 16);
    out.extend_from_slice(&word1.to_le_bytes());

    let color_model = if encoding.is_block_compressed() {
        COLOR_MODEL_BC7
    } else {
        COLOR_MODEL_RGBSDA
    };
    let transfer = if encoding.is_srgb() {
        TRANSFER_SRGB
    } else {
        TRANSFER_LINEAR
    };
    let flags: u32 = if premultiplied { 1 } else { 0 };
    let word2 = color_model | (COLOR_PRIMARIES_BT709 << 8) | (transfer << 16) | (flags << 24);
    out.extend_from_slice(&word2.to_le_bytes());

    // texel_block_dimension_0..3, stored as (value - 1).
    let dims: [u8; 4] = if encoding.is_block_compressed() {
        [3, 3, 0, 0]
    } else {
        [0, 0, 0, 0]
    };
    out.extend_from_slice(&dims);

    // bytes_plane_0..7.
    let plane0: u8 = if !supercompression_none {
        0
    } else {
        encoding.bytes_per_pixel() as u8
    };
    out.extend_from_slice(&[plane0, 0, 0, 0, 0, 0, 0, 0]);

    match encoding {
        Encoding::RgbaU8 | Encoding::RgbaSrgbU8 => {
            let srgb = encoding.is_srgb();
            for (i, channel) in [CHANNEL_R, CHANNEL_G, CHANNEL_B, CHANNEL_A].into_iter().enumerate() {
                let is_alpha = i == 3;
                let qualifiers = if srgb && is_alpha { QUAL_LINEAR } else { 0 };
                push_sample(&mut out, (8 * i) as u16, 8, channel, qualifiers, 0, 255);
            }
        }
        Encoding::RgbaF32 => {
            let neg_one = (-1.0f32).to_bits();
            let pos_one = (1.0f32).to_bits();
            for (i, channel) in [CHANNEL_R, CHANNEL_G, CHANNEL_B, CHANNEL_A].into_iter().enumerate() {
                push_sample(
                    &mut out,
                    (32 * i) as u16,
                    32,
                    channel,
                    QUAL_SIGNED | QUAL_FLOAT,
                    neg_one,
                    pos_one,
                );
            }
        }
        Encoding::Bc7 | Encoding::Bc7Srgb => {
            push_sample(&mut out, 0, 128, CHANNEL_DATA, 0, 0, u32::MAX);
        }
    }

    debug_assert_eq!(out.len() as u32, total_len);
    out
}

/// `transfer` as recorded by `build`, exposed for round-trip tests.
pub fn color_space_of(encoding: Encoding) -> ColorSpace {
    if encoding.is_srgb() {
        ColorSpace::Srgb
    } else {
        ColorSpace::Linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn dfd_round_trips_basic_fields() {
        let dfd = build(Encoding::RgbaU8, true, true);

        assert_eq!(read_u32(&dfd, 0), dfd_len(Encoding::RgbaU8));

        let word0 = read_u32(&dfd, 4);
        let vendor_id = word0 & 0x1FFFF;
        let descriptor_type = (word0 >> 17) & 0x7FFF;
        assert_eq!(vendor_id, 0);
        assert_eq!(descriptor_type, 0);

        let word1 = read_u32(&dfd, 8);
        let version_number = word1 & 0xFFFF;
        let block_size = (word1 >> 16) & 0xFFFF;
        assert_eq!(version_number, VERSION_NUMBER);
        assert_eq!(block_size, basic_descriptor_block_size(Encoding::RgbaU8));

        let word2 = read_u32(&dfd, 12);
        let color_model = word2 & 0xFF;
        let color_primaries = (word2 >> 8) & 0xFF;
        let transfer = (word2 >> 16) & 0xFF;
        let flags = (word2 >> 24) & 0xFF;
        assert_eq!(color_model, COLOR_MODEL_RGBSDA);
        assert_eq!(color_primaries, COLOR_PRIMARIES_BT709);
        assert_eq!(transfer, TRANSFER_LINEAR);
        assert_eq!(flags, 1);
    }

    #[test]
    fn dfd_bc7_uses_4x4_block_dimensions_and_data_channel() {
        let dfd = build(Encoding::Bc7Srgb, true, false);
        let dims = &dfd[16..20];
        assert_eq!(dims, &[3, 3, 0, 0]);

        let sample_word0 = read_u32(&dfd, 24);
        let bit_length = ((sample_word0 >> 16) & 0xFF) + 1;
        assert_eq!(bit_length, 128);
    }

    #[test]
    fn dfd_plane0_is_zero_when_supercompressed() {
        let dfd = build(Encoding::RgbaF32, false, true);
        assert_eq!(dfd[20], 0);
    }

    #[test]
    fn dfd_len_matches_sample_count() {
        assert_eq!(dfd_len(Encoding::RgbaU8), 4 + 24 + 16 * 4);
        assert_eq!(dfd_len(Encoding::Bc7), 4 + 24 + 16);
    }
}

//! Legacy DDS header types, read-only.
//!
//! This pipeline only writes KTX2, never DDS, but other baked-asset tools
//! in the same pipeline still hand off textures as DDS, so recognizing one
//! on read lets a caller interop with them. Limited to the read-only
//! subset: no DDS encode path, no mipmap/array/cube-map handling.

use ddsfile::{D3DFormat, Dds, DxgiFormat};

use crate::image::Encoding;

/// The subset of a parsed DDS file this pipeline cares about: its
/// dimensions and the [`Encoding`] an equivalent KTX2 texture would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
}

/// Reads a DDS header (and DXT10 extension, if present) and reports the
/// dimensions and equivalent [`Encoding`]. Returns `None` when the DDS
/// pixel format has no counterpart among this pipeline's five encodings.
pub fn read_info(dds: &Dds) -> Option<DdsInfo> {
    let encoding = encoding_of(dds)?;
    Some(DdsInfo {
        width: dds.get_width(),
        height: dds.get_height(),
        encoding,
    })
}

fn encoding_of(dds: &Dds) -> Option<Encoding> {
    if let Some(dxgi) = dds.get_dxgi_format() {
        return encoding_from_dxgi(dxgi);
    }
    encoding_from_d3d(dds.get_d3d_format()?)
}

fn encoding_from_dxgi(format: DxgiFormat) -> Option<Encoding> {
    match format {
        DxgiFormat::R8G8B8A8_UNorm => Some(Encoding::RgbaU8),
        DxgiFormat::R8G8B8A8_UNorm_sRGB => Some(Encoding::RgbaSrgbU8),
        DxgiFormat::R32G32B32A32_Float => Some(Encoding::RgbaF32),
        DxgiFormat::BC7_UNorm => Some(Encoding::Bc7),
        DxgiFormat::BC7_UNorm_sRGB => Some(Encoding::Bc7Srgb),
        _ => None,
    }
}

fn encoding_from_d3d(format: D3DFormat) -> Option<Encoding> {
    match format {
        // Legacy D3DFORMAT has no sRGB or float-RGBA variant; only the
        // plain 8-bit RGBA layout maps onto this pipeline's encodings.
        D3DFormat::A8B8G8R8 => Some(Encoding::RgbaU8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dxgi_rgba_u8() {
        let dds = Dds::new_dxgi(ddsfile::NewDxgiParams {
            height: 4,
            width: 4,
            depth: None,
            format: DxgiFormat::R8G8B8A8_UNorm,
            mipmap_levels: None,
            array_layers: None,
            caps2: None,
            is_cubemap: false,
            resource_dimension: ddsfile::D3D10ResourceDimension::Texture2D,
            alpha_mode: ddsfile::AlphaMode::Straight,
        })
        .unwrap();

        let info = read_info(&dds).unwrap();
        assert_eq!(info.width, 4);
        assert_eq!(info.height, 4);
        assert_eq!(info.encoding, Encoding::RgbaU8);
    }

    #[test]
    fn reads_dxgi_bc7_srgb() {
        let dds = Dds::new_dxgi(ddsfile::NewDxgiParams {
            height: 16,
            width: 16,
            depth: None,
            format: DxgiFormat::BC7_UNorm_sRGB,
            mipmap_levels: None,
            array_layers: None,
            caps2: None,
            is_cubemap: false,
            resource_dimension: ddsfile::D3D10ResourceDimension::Texture2D,
            alpha_mode: ddsfile::AlphaMode::Straight,
        })
        .unwrap();

        let info = read_info(&dds).unwrap();
        assert_eq!(info.encoding, Encoding::Bc7Srgb);
    }

    #[test]
    fn unrecognized_format_returns_none() {
        let dds = Dds::new_dxgi(ddsfile::NewDxgiParams {
            height: 4,
            width: 4,
            depth: None,
            format: DxgiFormat::BC5_UNorm,
            mipmap_levels: None,
            array_layers: None,
            caps2: None,
            is_cubemap: false,
            resource_dimension: ddsfile::D3D10ResourceDimension::Texture2D,
            alpha_mode: ddsfile::AlphaMode::Straight,
        })
        .unwrap();

        assert!(read_info(&dds).is_none());
    }
}

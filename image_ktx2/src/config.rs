//! User-tunable options shared by the library entry point and the CLI.

use crate::error::Error;

/// The color space a caller declares for the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Linear,
    Srgb,
    Hdr,
}

/// How the loader should treat the source alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAlpha {
    Straight,
    Premultiplied,
}

/// Per-axis resampling kernel. `sharpens()` drives the post-resize clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Triangle,
    CubicBSpline,
    CatmullRom,
    Mitchell,
    PointSample,
}

impl Filter {
    /// `mitchell` and `catmull_rom` sharpen; the rest do not.
    pub fn sharpens(self) -> bool {
        matches!(self, Filter::Mitchell | Filter::CatmullRom)
    }

    /// `default` resolves to `mitchell` for non-HDR, `triangle` for HDR.
    pub fn default_for(hdr: bool) -> Self {
        if hdr {
            Filter::Triangle
        } else {
            Filter::Mitchell
        }
    }
}

/// Behavior of the resampler when it samples outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    #[default]
    Clamp,
    Reflect,
    Wrap,
    Zero,
}

/// Upper bounds on the fitted output size. Unset fields default to
/// unbounded (`u32::MAX`), matching `caps = {max_size, max_width,
/// max_height}` with a default of infinity.
#[derive(Debug, Clone, Copy)]
pub struct SizeCaps {
    pub max_size: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for SizeCaps {
    fn default() -> Self {
        SizeCaps {
            max_size: u32::MAX,
            max_width: u32::MAX,
            max_height: u32::MAX,
        }
    }
}

/// zlib compression level for the supercompression stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZlibLevel {
    Fastest,
    Smallest,
    Level(u8),
}

impl ZlibLevel {
    pub(crate) fn to_flate2(self) -> Result<flate2::Compression, Error> {
        match self {
            ZlibLevel::Fastest => Ok(flate2::Compression::fast()),
            ZlibLevel::Smallest => Ok(flate2::Compression::best()),
            ZlibLevel::Level(n) if (4..=9).contains(&n) => Ok(flate2::Compression::new(n as u32)),
            ZlibLevel::Level(n) => {
                Err(Error::invalid_option(format!("zlib level {n} out of range 4..=9")))
            }
        }
    }
}

/// Optional rate-distortion-optimization block for the BC7 encoder,
/// modeled as a sum type rather than presence-plus-defaults per the design
/// notes: invalid ranges are rejected before any encoder call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rdo {
    Disabled,
    Enabled(RdoParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdoParams {
    pub lambda: f32,
    pub lookback_window: u32,
    pub smooth_block_error_scale: f32,
    pub max_smooth_block_std_dev: f32,
    pub quantize_mode_6_endpoints: bool,
    pub weight_modes: bool,
    pub weight_low_frequency_partitions: bool,
    pub pbit1_weighting: bool,
    pub try_two_matches: bool,
    pub ultrasmooth_block_handling: bool,
}

impl Default for RdoParams {
    fn default() -> Self {
        RdoParams {
            lambda: 0.0,
            lookback_window: 8,
            smooth_block_error_scale: 1.0,
            max_smooth_block_std_dev: 18.0,
            quantize_mode_6_endpoints: true,
            weight_modes: true,
            weight_low_frequency_partitions: true,
            pbit1_weighting: true,
            try_two_matches: true,
            ultrasmooth_block_handling: false,
        }
    }
}

impl RdoParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(0.0..=500.0).contains(&self.lambda) {
            return Err(Error::invalid_option(format!(
                "rdo lambda {} out of range [0, 500]",
                self.lambda
            )));
        }
        if self.lookback_window < 8 {
            return Err(Error::invalid_option(format!(
                "rdo lookback_window {} below minimum 8",
                self.lookback_window
            )));
        }
        if !(1.0..=500.0).contains(&self.smooth_block_error_scale) {
            return Err(Error::invalid_option(format!(
                "rdo smooth_block_error_scale {} out of range [1, 500]",
                self.smooth_block_error_scale
            )));
        }
        if !(0.000125..=256.0).contains(&self.max_smooth_block_std_dev) {
            return Err(Error::invalid_option(format!(
                "rdo max_smooth_block_std_dev {} out of range [0.000125, 256]",
                self.max_smooth_block_std_dev
            )));
        }
        Ok(())
    }
}

/// Validated BC7 encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bc7Options {
    pub uber_level: u32,
    pub max_partitions_to_scan: u32,
    pub max_threads: Option<u32>,
    pub mode6_only: bool,
    pub rdo: Rdo,
}

impl Default for Bc7Options {
    fn default() -> Self {
        Bc7Options {
            uber_level: 0,
            max_partitions_to_scan: 64,
            max_threads: None,
            mode6_only: false,
            rdo: Rdo::Disabled,
        }
    }
}

impl Bc7Options {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.uber_level > 4 {
            return Err(Error::invalid_option(format!(
                "uber_level {} exceeds maximum 4",
                self.uber_level
            )));
        }
        if self.max_partitions_to_scan > 64 {
            return Err(Error::invalid_option(format!(
                "max_partitions_to_scan {} exceeds maximum 64",
                self.max_partitions_to_scan
            )));
        }
        if let Some(0) = self.max_threads {
            return Err(Error::invalid_option("max_threads must be at least 1"));
        }
        if let Rdo::Enabled(params) = &self.rdo {
            params.validate()?;
        }
        Ok(())
    }

    /// `clamp(cpu_count, 1, u32::MAX)` when unspecified.
    pub(crate) fn resolved_threads(&self) -> u32 {
        self.max_threads
            .unwrap_or_else(|| (num_cpus::get() as u32).max(1))
    }
}

/// The requested output encoding and its per-format options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetEncoding {
    RgbaU8 { color_space: ColorSpace },
    RgbaF32,
    Bc7 {
        color_space: ColorSpace,
        options: Bc7Options,
    },
}

impl TargetEncoding {
    /// The mipmap generator's stopping block size: 4 for BC7 (the block
    /// footprint), 1 otherwise.
    pub(crate) fn block_size(&self) -> u32 {
        match self {
            TargetEncoding::Bc7 { .. } => 4,
            TargetEncoding::RgbaU8 { .. } | TargetEncoding::RgbaF32 => 1,
        }
    }
}

/// Every user-tunable knob for one `convert` call, shared by the library
/// entry point and the CLI so both have one source of truth for defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub declared_color_space: ColorSpace,
    pub input_alpha: InputAlpha,
    pub size_caps: SizeCaps,
    pub generate_mipmaps: bool,
    pub filter_u: Option<Filter>,
    pub filter_v: Option<Filter>,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub preserve_alpha_coverage: Option<f32>,
    pub preserve_alpha_coverage_max_steps: u8,
    pub zlib: Option<ZlibLevel>,
    pub target: TargetEncoding,
}

impl Config {
    pub(crate) fn resolved_filter_u(&self, hdr: bool) -> Filter {
        self.filter_u.unwrap_or_else(|| Filter::default_for(hdr))
    }

    pub(crate) fn resolved_filter_v(&self, hdr: bool) -> Filter {
        self.filter_v.unwrap_or_else(|| Filter::default_for(hdr))
    }
}

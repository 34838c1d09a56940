//! Parses arguments into an [`image_ktx2::Config`], reads INPUT, runs
//! [`image_ktx2::convert`], and writes OUTPUT. Translates any pipeline
//! error into a single-line log message and exit code 1.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use image_ktx2::config::{
    AddressMode as CoreAddressMode, Bc7Options, Config, ColorSpace as CoreColorSpace, Filter as CoreFilter,
    InputAlpha as CoreInputAlpha, Rdo, RdoParams, SizeCaps, TargetEncoding, ZlibLevel,
};
use image_ktx2::loader;

#[derive(Parser)]
#[command(name = "image_ktx2", version, about = "Build a KTX2 texture from a still image", long_about = None)]
struct Cli {
    /// Input image path (PNG, JPEG, HDR, ...).
    input: PathBuf,
    /// Output KTX2 path.
    output: PathBuf,

    /// Whether the source image's alpha channel is already premultiplied.
    #[arg(long, value_enum, default_value_t = InputAlphaArg::Straight)]
    input_alpha: InputAlphaArg,

    /// zlib supercompression level: `fastest`, `smallest`, or `4`..`9`.
    #[arg(long, value_parser = parse_zlib_level)]
    zlib: Option<ZlibLevel>,

    /// Generate a full mipmap pyramid down to the output format's block size.
    #[arg(long)]
    generate_mipmaps: bool,

    /// Alpha-test threshold to preserve coverage at across mip levels.
    #[arg(long)]
    preserve_alpha_coverage: Option<f32>,

    /// Maximum binary-search steps for alpha-coverage preservation.
    #[arg(long, default_value_t = 16)]
    preserve_alpha_coverage_max_steps: u8,

    /// Resample filter used for both axes unless overridden per axis.
    #[arg(long, value_enum)]
    filter: Option<FilterArg>,
    /// Resample filter for the horizontal axis.
    #[arg(long, value_enum)]
    filter_u: Option<FilterArg>,
    /// Resample filter for the vertical axis.
    #[arg(long, value_enum)]
    filter_v: Option<FilterArg>,

    /// Out-of-bounds sample behavior for the horizontal axis.
    #[arg(long, value_enum, default_value_t = AddressModeArg::Clamp)]
    address_mode_u: AddressModeArg,
    /// Out-of-bounds sample behavior for the vertical axis.
    #[arg(long, value_enum, default_value_t = AddressModeArg::Clamp)]
    address_mode_v: AddressModeArg,

    /// Largest output dimension on either axis.
    #[arg(long)]
    max_size: Option<u32>,
    /// Largest output width.
    #[arg(long)]
    max_width: Option<u32>,
    /// Largest output height.
    #[arg(long)]
    max_height: Option<u32>,

    /// Worker thread cap for the BC7 encoder. Defaults to the CPU count.
    #[arg(long)]
    max_threads: Option<u32>,

    #[command(subcommand)]
    format: Format,
}

#[derive(Subcommand)]
enum Format {
    /// 8-bit-per-channel RGBA.
    RgbaU8 {
        #[arg(long, value_enum)]
        color_space: ColorSpaceArg,
    },
    /// 32-bit float RGBA, passed through without quantization.
    RgbaF32,
    /// BC7 block-compressed RGBA.
    Bc7 {
        #[arg(long, value_enum)]
        color_space: ColorSpaceArg,
        /// Encoder quality level, 0 (fastest) to 4 (slowest).
        #[arg(long, default_value_t = 0)]
        uber: u32,
        /// Accepted for interop with other BC7 tooling; unused by the
        /// current encoder backend (see DESIGN.md).
        #[arg(long)]
        reduce_entropy: bool,
        #[arg(long, default_value_t = 64)]
        max_partitions_to_scan: u32,
        #[arg(long)]
        mode_6_only: bool,
        #[command(subcommand)]
        rdo: Option<RdoCommand>,
    },
}

#[derive(Subcommand)]
enum RdoCommand {
    /// Enables rate-distortion optimization on the encoded BC7 blocks.
    Rdo {
        #[arg(long, default_value_t = 0.0)]
        lambda: f32,
        #[arg(long, default_value_t = 8)]
        lookback_window: u32,
        #[arg(long, default_value_t = 1.0)]
        smooth_block_error_scale: f32,
        #[arg(long, default_value_t = 18.0)]
        max_smooth_block_std_dev: f32,
        #[arg(long, default_value_t = true)]
        quantize_mode_6_endpoints: bool,
        #[arg(long, default_value_t = true)]
        weight_modes: bool,
        #[arg(long, default_value_t = true)]
        weight_low_frequency_partitions: bool,
        #[arg(long, default_value_t = true)]
        pbit1_weighting: bool,
        #[arg(long, default_value_t = true)]
        try_two_matches: bool,
        #[arg(long)]
        ultrasmooth_block_handling: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum ColorSpaceArg {
    Linear,
    Srgb,
}

impl From<ColorSpaceArg> for CoreColorSpace {
    fn from(value: ColorSpaceArg) -> Self {
        match value {
            ColorSpaceArg::Linear => CoreColorSpace::Linear,
            ColorSpaceArg::Srgb => CoreColorSpace::Srgb,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum InputAlphaArg {
    Straight,
    Premultiplied,
}

impl From<InputAlphaArg> for CoreInputAlpha {
    fn from(value: InputAlphaArg) -> Self {
        match value {
            InputAlphaArg::Straight => CoreInputAlpha::Straight,
            InputAlphaArg::Premultiplied => CoreInputAlpha::Premultiplied,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum FilterArg {
    Triangle,
    CubicBSpline,
    CatmullRom,
    Mitchell,
    PointSample,
}

impl From<FilterArg> for CoreFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Triangle => CoreFilter::Triangle,
            FilterArg::CubicBSpline => CoreFilter::CubicBSpline,
            FilterArg::CatmullRom => CoreFilter::CatmullRom,
            FilterArg::Mitchell => CoreFilter::Mitchell,
            FilterArg::PointSample => CoreFilter::PointSample,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum AddressModeArg {
    Clamp,
    Reflect,
    Wrap,
    Zero,
}

impl From<AddressModeArg> for CoreAddressMode {
    fn from(value: AddressModeArg) -> Self {
        match value {
            AddressModeArg::Clamp => CoreAddressMode::Clamp,
            AddressModeArg::Reflect => CoreAddressMode::Reflect,
            AddressModeArg::Wrap => CoreAddressMode::Wrap,
            AddressModeArg::Zero => CoreAddressMode::Zero,
        }
    }
}

fn parse_zlib_level(s: &str) -> Result<ZlibLevel, String> {
    match s {
        "fastest" => Ok(ZlibLevel::Fastest),
        "smallest" => Ok(ZlibLevel::Smallest),
        _ => s
            .parse::<u8>()
            .map(ZlibLevel::Level)
            .map_err(|_| format!("invalid zlib level `{s}`, expected `fastest`, `smallest`, or 4..=9")),
    }
}

fn rdo_from_command(command: Option<RdoCommand>) -> Rdo {
    match command {
        None => Rdo::Disabled,
        Some(RdoCommand::Rdo {
            lambda,
            lookback_window,
            smooth_block_error_scale,
            max_smooth_block_std_dev,
            quantize_mode_6_endpoints,
            weight_modes,
            weight_low_frequency_partitions,
            pbit1_weighting,
            try_two_matches,
            ultrasmooth_block_handling,
        }) => Rdo::Enabled(RdoParams {
            lambda,
            lookback_window,
            smooth_block_error_scale,
            max_smooth_block_std_dev,
            quantize_mode_6_endpoints,
            weight_modes,
            weight_low_frequency_partitions,
            pbit1_weighting,
            try_two_matches,
            ultrasmooth_block_handling,
        }),
    }
}

/// Resolves the `declared_color_space` the loader gets for this invocation.
/// `rgba-f32` takes no `--color-space` option: it trusts whatever the
/// decoder itself reports, so an HDR/LDR mismatch can never occur on that
/// path. Every other subcommand uses its own explicit flag.
fn declared_color_space(format: &Format, input_bytes: &[u8]) -> Result<CoreColorSpace, image_ktx2::Error> {
    match format {
        Format::RgbaU8 { color_space } => Ok((*color_space).into()),
        Format::Bc7 { color_space, .. } => Ok((*color_space).into()),
        Format::RgbaF32 => Ok(if loader::is_hdr(input_bytes)? {
            CoreColorSpace::Hdr
        } else {
            CoreColorSpace::Linear
        }),
    }
}

fn target_encoding(format: Format, max_threads: Option<u32>) -> TargetEncoding {
    match format {
        Format::RgbaU8 { color_space } => TargetEncoding::RgbaU8 {
            color_space: color_space.into(),
        },
        Format::RgbaF32 => TargetEncoding::RgbaF32,
        Format::Bc7 {
            color_space,
            uber,
            reduce_entropy,
            max_partitions_to_scan,
            mode_6_only,
            rdo,
        } => {
            if reduce_entropy {
                log::debug!("--reduce-entropy has no effect with the current BC7 encoder backend");
            }
            TargetEncoding::Bc7 {
                color_space: color_space.into(),
                options: Bc7Options {
                    uber_level: uber,
                    max_partitions_to_scan,
                    max_threads,
                    mode6_only: mode_6_only,
                    rdo: rdo_from_command(rdo),
                },
            }
        }
    }
}

fn build_config(cli: Cli, input_bytes: &[u8]) -> Result<Config, image_ktx2::Error> {
    if cli.generate_mipmaps && cli.filter.is_none() && cli.filter_u.is_none() && cli.filter_v.is_none() {
        return Err(image_ktx2::Error::InvalidOption(
            "--generate-mipmaps requires --filter (or --filter-u/--filter-v)".to_string(),
        ));
    }

    let declared_color_space = declared_color_space(&cli.format, input_bytes)?;
    let size_caps = SizeCaps {
        max_size: cli.max_size.unwrap_or(u32::MAX),
        max_width: cli.max_width.unwrap_or(u32::MAX),
        max_height: cli.max_height.unwrap_or(u32::MAX),
    };
    let filter_u = cli.filter_u.or(cli.filter).map(CoreFilter::from);
    let filter_v = cli.filter_v.or(cli.filter).map(CoreFilter::from);
    let max_threads = cli.max_threads;

    Ok(Config {
        declared_color_space,
        input_alpha: cli.input_alpha.into(),
        size_caps,
        generate_mipmaps: cli.generate_mipmaps,
        filter_u,
        filter_v,
        address_mode_u: cli.address_mode_u.into(),
        address_mode_v: cli.address_mode_v.into(),
        preserve_alpha_coverage: cli.preserve_alpha_coverage,
        preserve_alpha_coverage_max_steps: cli.preserve_alpha_coverage_max_steps,
        zlib: cli.zlib,
        target: target_encoding(cli.format, max_threads),
    })
}

fn run() -> Result<(), image_ktx2::Error> {
    let cli = Cli::parse();
    let input_path = cli.input.clone();
    let output_path = cli.output.clone();

    let input_bytes = fs::read(&input_path)
        .map_err(|e| image_ktx2::Error::InvalidInput(format!("reading {}: {e}", input_path.display())))?;
    let config = build_config(cli, &input_bytes)?;

    let mut output_bytes = Vec::new();
    image_ktx2::convert(&input_bytes, &mut output_bytes, &config)?;

    fs::write(&output_path, &output_bytes)
        .map_err(|e| image_ktx2::Error::InvalidInput(format!("writing {}: {e}", output_path.display())))?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! Converts a single still image into a KTX2 GPU-texture container.
//!
//! The pipeline decodes an encoded byte stream into linear float32 RGBA,
//! optionally fits/resizes it to a size cap, generates a mipmap pyramid,
//! preserves alpha-test coverage across levels, re-encodes each level to
//! the requested GPU format, optionally supercompresses it with zlib, and
//! serializes the result as a bit-exact KTX2 container. See
//! [`pipeline::convert`] for the single entry point that drives all of
//! this for one input/output stream.

pub mod alpha_coverage;
pub mod config;
pub mod dds;
pub mod encode;
pub mod error;
pub mod image;
pub mod ktx2;
pub mod loader;
pub mod mipmap;
pub mod pipeline;
pub mod resize;
pub mod supercompress;
pub mod texture;

pub use config::Config;
pub use error::Error;
pub use pipeline::convert;

//! The working buffer that flows through every pipeline stage.

/// The in-memory representation of a level's pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    RgbaU8,
    RgbaSrgbU8,
    RgbaF32,
    Bc7,
    Bc7Srgb,
}

impl Encoding {
    /// Whether the declared color space of this encoding is sRGB-gamma.
    pub fn is_srgb(self) -> bool {
        matches!(self, Encoding::RgbaSrgbU8 | Encoding::Bc7Srgb)
    }

    /// Whether the encoding is a BC7 block format.
    pub fn is_block_compressed(self) -> bool {
        matches!(self, Encoding::Bc7 | Encoding::Bc7Srgb)
    }

    /// Bytes per pixel for non-block encodings, or bytes per 4x4 block for
    /// BC7 (used as the DFD's `bytes_plane_0` field either way).
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Encoding::RgbaU8 | Encoding::RgbaSrgbU8 => 4,
            Encoding::RgbaF32 => 16,
            Encoding::Bc7 | Encoding::Bc7Srgb => 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supercompression {
    None,
    Zlib,
}

/// How a level's alpha channel should be treated by the coverage-preserving
/// and premultiplication stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alpha {
    /// Alpha represents opacity; premultiply RGB by it.
    Opacity,
    /// Alpha-tested cutout; premultiply RGB by it and preserve coverage at
    /// `threshold` relative to `target_coverage` recorded on the source image.
    AlphaTest {
        threshold: f32,
        target_coverage: f32,
    },
    /// Alpha carries non-opacity data (e.g. a mask channel); never premultiplied.
    Other,
}

impl Alpha {
    /// `alpha.premultiplied()` from the data model: true for `Opacity` and
    /// `AlphaTest`, false for `Other`.
    pub fn premultiplied(self) -> bool {
        !matches!(self, Alpha::Other)
    }
}

/// Tags which allocator produced [`Image::buf`]. Every collaborator crate in
/// this pipeline hands back an owned `Vec<u8>`, so the tag is purely a
/// diagnostic record of which stage's allocator owns the data;
/// `Drop` on `Vec<u8>` already releases it uniformly regardless of origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferOrigin {
    Heap,
    Decoder,
    Resampler,
    Bc7Encoder,
}

/// A single level's pixel data plus the metadata the pipeline needs to carry
/// it through resize, mipmap generation, encoding, and supercompression.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    pub supercompression: Supercompression,
    pub alpha: Alpha,
    /// Whether the original source image (before any format conversion) was HDR.
    pub hdr: bool,
    /// The byte length of `buf` before any supercompression was applied.
    pub uncompressed_byte_length: usize,
    origin: BufferOrigin,
    buf: Vec<u8>,
}

impl Image {
    pub fn new(
        width: u32,
        height: u32,
        encoding: Encoding,
        alpha: Alpha,
        hdr: bool,
        origin: BufferOrigin,
        buf: Vec<u8>,
    ) -> Self {
        let uncompressed_byte_length = buf.len();
        Image {
            width,
            height,
            encoding,
            supercompression: Supercompression::None,
            alpha,
            hdr,
            uncompressed_byte_length,
            origin,
            buf,
        }
    }

    pub fn origin(&self) -> BufferOrigin {
        self.origin
    }

    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn set_buf(&mut self, buf: Vec<u8>, origin: BufferOrigin) {
        self.buf = buf;
        self.origin = origin;
    }

    /// Resize, mipmap generation, premultiply, and alpha-coverage
    /// preservation are only defined on an uncompressed linear `rgba_f32`
    /// image.
    pub fn is_working_float(&self) -> bool {
        self.encoding == Encoding::RgbaF32 && self.supercompression == Supercompression::None
    }

    /// View `buf` as interleaved `f32` RGBA samples. Panics if not `rgba_f32`
    /// — callers must check [`Image::is_working_float`] first.
    pub fn as_f32_rgba(&self) -> &[f32] {
        assert_eq!(self.encoding, Encoding::RgbaF32);
        bytemuck::cast_slice(&self.buf)
    }

    pub fn as_f32_rgba_mut(&mut self) -> &mut [f32] {
        assert_eq!(self.encoding, Encoding::RgbaF32);
        bytemuck::cast_slice_mut(&mut self.buf)
    }

    /// Moves the buffer out, leaving this Image with an empty buffer whose
    /// subsequent drop is a no-op (per the data model's "moved image"
    /// lifecycle rule — `Vec::new()` frees nothing on drop).
    pub fn take_buf(&mut self) -> Vec<u8> {
        self.uncompressed_byte_length = 0;
        std::mem::take(&mut self.buf)
    }

    /// Premultiplies R, G, B by A in place. Idempotence only holds at α ∈
    /// {0, 1}, so callers are responsible for calling this at most once.
    pub fn premultiply(&mut self) {
        debug_assert!(self.is_working_float());
        for px in self.as_f32_rgba_mut().chunks_exact_mut(4) {
            let a = px[3];
            px[0] *= a;
            px[1] *= a;
            px[2] *= a;
        }
    }
}

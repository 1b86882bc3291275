//! Knobs for the BC1 decoder and encoder.

/// Settings for [`decode_bc1_block`](crate::decode_bc1_block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bc1DecodeSettings {
    /// When `color0 <= color1`, palette entry 3 decodes as transparent black
    /// if this is set, or opaque black otherwise.
    pub allow_alpha: bool,
}

impl Default for Bc1DecodeSettings {
    fn default() -> Self {
        Self { allow_alpha: true }
    }
}

/// How the BC1 encoder treats the source alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bc1AlphaMode {
    /// Ignore alpha; every block uses the 4-colour layout (`color0 > color1`).
    #[default]
    Opaque,
    /// Blocks with a texel below [`Bc1EncodeSettings::alpha_threshold`] use the
    /// 3-colour layout (`color0 <= color1`) and index 3 for those texels.
    PunchThrough,
}

/// Settings for [`encode_bc1_block`](crate::encode_bc1_block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bc1EncodeSettings {
    /// Alpha handling.
    pub alpha_mode: Bc1AlphaMode,
    /// Texels with alpha below this are transparent in [`Bc1AlphaMode::PunchThrough`].
    pub alpha_threshold: u8,
    /// Run a least-squares endpoint refinement after the initial fit. The
    /// refined endpoints are only kept if they lower the block error.
    pub refine: bool,
}

impl Default for Bc1EncodeSettings {
    fn default() -> Self {
        Self {
            alpha_mode: Bc1AlphaMode::Opaque,
            alpha_threshold: 128,
            refine: true,
        }
    }
}

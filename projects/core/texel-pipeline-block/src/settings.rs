//! Settings forwarded to the individual block codecs.

use texel_pipeline_bc1::{Bc1DecodeSettings, Bc1EncodeSettings};

/// Settings for every block codec.
///
/// BC2 and BC3 colour encoding follows [`Bc1EncodeSettings::refine`]; their
/// alpha mode and threshold do not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockCodecSettings {
    /// BC1 decoder settings.
    pub bc1_decode: Bc1DecodeSettings,
    /// BC1 encoder settings; `refine` also applies to the BC2/BC3 colour block.
    pub bc1_encode: Bc1EncodeSettings,
}

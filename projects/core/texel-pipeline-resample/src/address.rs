//! Edge addressing: maps any integer texel coordinate back into `[0, extent)`.

/// How coordinates outside the image are folded back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Tile the image.
    Wrap,
    /// Reflect at both edges, with a period of twice the extent.
    Mirror,
    /// Repeat the edge texel.
    #[default]
    Clamp,
    /// Reflect about zero once, then clamp.
    MirrorOnce,
}

impl AddressMode {
    /// Every mode, in declaration order.
    pub const ALL: [AddressMode; 4] = [
        AddressMode::Wrap,
        AddressMode::Mirror,
        AddressMode::Clamp,
        AddressMode::MirrorOnce,
    ];

    /// Lower-case name as accepted by [`core::str::FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            AddressMode::Wrap => "wrap",
            AddressMode::Mirror => "mirror",
            AddressMode::Clamp => "clamp",
            AddressMode::MirrorOnce => "mirror-once",
        }
    }
}

impl core::str::FromStr for AddressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == lower)
            .ok_or_else(|| {
                format!("Unknown address mode: {s}. Valid options: wrap, mirror, clamp, mirror-once")
            })
    }
}

/// One [`AddressMode`] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AddressModes {
    /// Horizontal axis.
    pub u: AddressMode,
    /// Vertical axis.
    pub v: AddressMode,
    /// Depth axis.
    pub w: AddressMode,
}

impl AddressModes {
    /// The same mode on every axis.
    pub const fn all(mode: AddressMode) -> Self {
        Self {
            u: mode,
            v: mode,
            w: mode,
        }
    }
}

/// Resolves `coord` into `[0, extent)` using `mode`.
///
/// # Panics
///
/// If `extent` is zero. Buffer descriptors reject zero extents before any
/// coordinate is resolved.
///
/// # Example
///
/// ```
/// use texel_pipeline_resample::{resolve_coordinate, AddressMode};
///
/// assert_eq!(resolve_coordinate(-1, 4, AddressMode::Wrap), 3);
/// assert_eq!(resolve_coordinate(-1, 4, AddressMode::Mirror), 0);
/// assert_eq!(resolve_coordinate(4, 4, AddressMode::Clamp), 3);
/// ```
#[inline]
pub fn resolve_coordinate(coord: i64, extent: u32, mode: AddressMode) -> u32 {
    assert!(extent > 0, "cannot address a zero-sized axis");
    let extent = extent as i64;
    let resolved = match mode {
        AddressMode::Wrap => coord.rem_euclid(extent),
        AddressMode::Clamp => coord.clamp(0, extent - 1),
        AddressMode::Mirror => {
            let folded = coord.rem_euclid(2 * extent);
            if folded >= extent {
                2 * extent - 1 - folded
            } else {
                folded
            }
        }
        AddressMode::MirrorOnce => {
            let reflected = if coord < 0 { -1 - coord } else { coord };
            reflected.min(extent - 1)
        }
    };
    resolved as u32
}

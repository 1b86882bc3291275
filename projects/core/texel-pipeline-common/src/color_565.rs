/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// As encountered in the endpoints of BC1 colour blocks (and `B5G6R5Unorm` texels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Color565 {
    /// The underlying 16-bit RGB565 value
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] from separate RGB components by truncating
    /// the low bits of each channel.
    ///
    /// # Parameters
    ///
    /// - `r`: The red component (0-255)
    /// - `g`: The green component (0-255)
    /// - `b`: The blue component (0-255)
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        // Matches etcpak's to565.
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Creates a new [`Color565`] from separate RGB components, rounding each
    /// channel to the nearest representable 5/6-bit value.
    ///
    /// This is what the block encoders use; truncation biases every endpoint
    /// towards black.
    ///
    /// # Examples
    ///
    /// ```
    /// use texel_pipeline_common::color_565::Color565;
    ///
    /// // 255 is exactly representable, 254 rounds up to it.
    /// assert_eq!(Color565::from_rgb_rounded(254, 254, 254).raw_value(), 0xFFFF);
    /// ```
    #[inline]
    pub fn from_rgb_rounded(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 * 31 + 127) / 255;
        let g = (g as u16 * 63 + 127) / 255;
        let b = (b as u16 * 31 + 127) / 255;
        Self {
            value: (r << 11) | (g << 5) | b,
        }
    }

    /// Creates a new [`Color565`] from floating point RGB components in the
    /// 0-255 range, rounding to nearest and clamping out of range values.
    #[inline]
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        let quantize = |v: f32, max: f32| ((v / 255.0).clamp(0.0, 1.0) * max).round() as u16;
        Self {
            value: (quantize(r, 31.0) << 11) | (quantize(g, 63.0) << 5) | quantize(b, 31.0),
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.value
    }

    // NOTE: https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/
    // BC1 as written in the D3D11 functional spec first expands the endpoint values from 5 or 6 bits
    // to 8 bits by replicating the top bits; all three vendors appear to do this or something equivalent.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Compares two [`Color565`] values
    ///
    /// The comparison is on the packed 16-bit value; this is what selects
    /// between the 4-colour and the 3-colour (punch-through) BC1 palettes.
    #[inline]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }
}

use crate::float4::Float4;

/// Represents a single RGBA8888 texel; the canonical 8-bit interchange sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use texel_pipeline_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the components as an `[r, g, b, a]` array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a colour from an `[r, g, b, a]` array.
    #[inline]
    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Expands each channel to a float in `[0, 1]`.
    #[inline]
    pub fn to_float4(self) -> Float4 {
        Float4::new(
            unorm8_to_f32(self.r),
            unorm8_to_f32(self.g),
            unorm8_to_f32(self.b),
            unorm8_to_f32(self.a),
        )
    }

    /// Quantizes a float colour to 8 bits per channel, clamping to `[0, 1]`
    /// and rounding to nearest.
    #[inline]
    pub fn from_float4(color: Float4) -> Self {
        Self::new(
            f32_to_unorm8(color.r),
            f32_to_unorm8(color.g),
            f32_to_unorm8(color.b),
            f32_to_unorm8(color.a),
        )
    }

    /// Squared euclidean distance over the RGB channels.
    #[inline]
    pub fn rgb_distance_squared(&self, other: &Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Converts an 8-bit normalized value to a float in `[0, 1]`.
#[inline]
pub fn unorm8_to_f32(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Converts a float to an 8-bit normalized value. NaN maps to 0.
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

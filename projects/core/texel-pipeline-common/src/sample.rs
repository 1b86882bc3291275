//! The closed set of sample element kinds the codecs operate on.
//!
//! Block and scalar codecs are written once and parameterized over [`Sample`]
//! instead of carrying a float and a unorm8 variant of every function.

use crate::{color_8888::Color8888, float4::Float4};

/// Tag identifying a [`Sample`] implementation at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// Four 8-bit normalized integers.
    Unorm8,
    /// Four 32-bit floats.
    Float32,
}

/// A four-channel texel sample in one of the canonical interchange encodings.
///
/// Implemented for [`Color8888`] (four 8-bit normalized integers) and
/// [`Float4`] (four 32-bit floats). The trait is sealed; no other kinds exist.
pub trait Sample: Copy + Default + PartialEq + core::fmt::Debug + sealed::Sealed {
    /// Which encoding this sample uses.
    const KIND: SampleKind;

    /// Converts from the 8-bit representation.
    fn from_unorm8(color: Color8888) -> Self;
    /// Converts to the 8-bit representation, clamping and rounding as needed.
    fn to_unorm8(self) -> Color8888;
    /// Converts from the float representation, clamping and rounding as needed.
    fn from_float4(color: Float4) -> Self;
    /// Converts to the float representation.
    fn to_float4(self) -> Float4;
}

impl Sample for Color8888 {
    const KIND: SampleKind = SampleKind::Unorm8;

    #[inline]
    fn from_unorm8(color: Color8888) -> Self {
        color
    }

    #[inline]
    fn to_unorm8(self) -> Color8888 {
        self
    }

    #[inline]
    fn from_float4(color: Float4) -> Self {
        Color8888::from_float4(color)
    }

    #[inline]
    fn to_float4(self) -> Float4 {
        Color8888::to_float4(self)
    }
}

impl Sample for Float4 {
    const KIND: SampleKind = SampleKind::Float32;

    #[inline]
    fn from_unorm8(color: Color8888) -> Self {
        color.to_float4()
    }

    #[inline]
    fn to_unorm8(self) -> Color8888 {
        Color8888::from_float4(self)
    }

    #[inline]
    fn from_float4(color: Float4) -> Self {
        color
    }

    #[inline]
    fn to_float4(self) -> Float4 {
        self
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Color8888 {}
    impl Sealed for super::Float4 {}
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image colorspace information and manipulation utilities.

/// All channel layouts the engine processes.
///
/// Pixels are stored as flat interleaved bytes, so the colorspace is what
/// gives the bytes meaning, e.g for [`ColorSpace::RGBA`] the layout is
/// `[R,G,B,A,R,G,B,A]`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Grayscale colorspace
    Luma,
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    #[must_use]
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    /// Return true if the colorspace contains an alpha channel
    #[must_use]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    /// Return true if the colorspace stores a single luminance sample per pixel
    #[must_use]
    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Luma)
    }

    /// Returns the position of the alpha channel in a pixel
    ///
    /// That is for an array of color components say `[0,1,2,3]`, if the image
    /// is in RGBA format this will return `Some(3)`, indicating alpha is found
    /// in the last index.
    ///
    /// If an image doesn't have an alpha channel returns `None`
    #[must_use]
    pub const fn alpha_position(&self) -> Option<usize> {
        match self {
            Self::RGBA => Some(3),
            _ => None
        }
    }
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 3] = [ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA];

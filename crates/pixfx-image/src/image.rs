/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is represented as
//!
//! - flat interleaved 8-bit pixel data
//!     - representing a colorspace
//!         - with a fixed width and height
//!
//! The invariant a well formed image upholds is
//! `data.len() == width * height * colorspace.num_components()`.
//! Hosts that decode files themselves can hand over buffers through
//! [`Image::from_u8`], which checks the invariant, or
//! [`Image::from_raw_parts`], which does not; the filter machinery
//! re-checks it before touching the pixels so a malformed buffer turns
//! into a per-image error rather than out-of-bounds access.
use pixfx_core::colorspace::ColorSpace;

use crate::errors::ImageErrors;

/// Maximum supported color channels
pub const MAX_CHANNELS: usize = 4;

/// Represents a single image
#[derive(Clone, Eq, PartialEq)]
pub struct Image {
    data:       Vec<u8>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Image {
    /// Create a new image from raw interleaved pixels, checking that the
    /// buffer length matches the dimensions.
    ///
    /// Pixels are expected to be interleaved according to the colorspace,
    /// i.e if the image is RGB, pixel layout should be `[R,G,B,R,G,B]`.
    ///
    /// # Errors
    /// - Either dimension is zero.
    /// - The buffer length is not `width * height * components`.
    pub fn from_u8(
        pixels: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let image = Image::from_raw_parts(pixels, width, height, colorspace);

        image.confirm_dimensions()?;

        Ok(image)
    }

    /// Create a new image from raw interleaved pixels without checking
    /// the length invariant.
    ///
    /// Useful for hosts that already validated the buffer; anything
    /// handed to a filter is re-checked there, so a mismatched buffer
    /// surfaces as an error, not a panic.
    #[must_use]
    pub fn from_raw_parts(
        pixels: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Image {
        Image {
            data: pixels,
            width,
            height,
            colorspace
        }
    }

    /// Create an image with a static pixel value in every channel
    #[must_use]
    pub fn fill(pixel: u8, colorspace: ColorSpace, width: usize, height: usize) -> Image {
        let data = vec![pixel; width * height * colorspace.num_components()];

        Image::from_raw_parts(data, width, height, colorspace)
    }

    /// Create an image from a function
    ///
    /// The function will receive the current x and y offset and for each
    /// is expected to return an array with [`MAX_CHANNELS`] elements;
    /// depending on the number of components the colorspace uses, some
    /// trailing elements may be ignored.
    ///
    /// # Example
    /// ```
    /// use pixfx_core::colorspace::ColorSpace;
    /// use pixfx_image::image::{Image, MAX_CHANNELS};
    ///
    /// // a linear band of colors from black to white, repeating
    /// let img = Image::from_fn(30, 20, ColorSpace::Luma, |x, y| {
    ///     let mut pixel = [0; MAX_CHANNELS];
    ///     pixel[0] = ((x + y) % 256) as u8;
    ///     pixel
    /// });
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, colorspace: ColorSpace, func: F) -> Image
    where
        F: Fn(usize, usize) -> [u8; MAX_CHANNELS]
    {
        let components = colorspace.num_components();

        let mut data = Vec::with_capacity(width * height * components);

        for y in 0..height {
            for x in 0..width {
                let pixel = (func)(x, y);

                data.extend_from_slice(&pixel[..components]);
            }
        }

        Image::from_raw_parts(data, width, height, colorspace)
    }

    /// Get image dimensions as a tuple of (width,height)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the colorspace this image is stored in
    #[must_use]
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Return an immutable reference to the interleaved pixel data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return a mutable reference to the interleaved pixel data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image, returning the interleaved pixel data
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Confirm the length invariant holds for this image.
    ///
    /// # Errors
    /// - [`ImageErrors::ZeroDimension`] when a dimension is zero.
    /// - [`ImageErrors::DimensionsMisMatch`] when the buffer length does
    ///   not match the dimensions.
    pub fn confirm_dimensions(&self) -> Result<(), ImageErrors> {
        if self.width == 0 {
            return Err(ImageErrors::ZeroDimension("width"));
        }
        if self.height == 0 {
            return Err(ImageErrors::ZeroDimension("height"));
        }
        let expected = checked_mul(self.width, self.height, self.colorspace.num_components());

        if self.data.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, self.data.len()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colorspace", &self.colorspace)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn checked_mul(width: usize, height: usize, colorspace_components: usize) -> usize {
    width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(colorspace_components))
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use pixfx_core::colorspace::ColorSpace;

    use crate::errors::ImageErrors;
    use crate::image::Image;

    #[test]
    fn checked_constructor_accepts_matching_buffer() {
        let image = Image::from_u8(vec![0; 4 * 3 * 3], 4, 3, ColorSpace::RGB).unwrap();

        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.colorspace(), ColorSpace::RGB);
    }

    #[test]
    fn checked_constructor_rejects_short_buffer() {
        let result = Image::from_u8(vec![0; 5], 4, 3, ColorSpace::RGB);

        assert!(matches!(
            result,
            Err(ImageErrors::DimensionsMisMatch(36, 5))
        ));
    }

    #[test]
    fn checked_constructor_rejects_zero_dimension() {
        let result = Image::from_u8(vec![], 0, 3, ColorSpace::RGB);

        assert!(matches!(result, Err(ImageErrors::ZeroDimension("width"))));
    }

    #[test]
    fn from_fn_interleaves_components() {
        let image = Image::from_fn(2, 1, ColorSpace::RGB, |x, _| {
            [x as u8, 10, 20, 255]
        });

        assert_eq!(image.data(), [0, 10, 20, 1, 10, 20]);
    }
}

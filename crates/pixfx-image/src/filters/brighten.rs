/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Brightness filter
use pixfx_imageprocs::brighten::brighten;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Add a signed offset to every channel value of an image, clamping the
/// result to the storage range.
///
/// An offset of zero leaves the image unchanged.
#[derive(Default)]
pub struct Brighten {
    offset: i16
}

impl Brighten {
    /// Create a new brighten operation
    ///
    /// # Arguments
    /// - offset: Value added to every channel; negative values darken
    #[must_use]
    pub fn new(offset: i16) -> Brighten {
        Brighten { offset }
    }
}

impl OperationsTrait for Brighten {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        brighten(image.data_mut(), self.offset);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pixfx_core::colorspace::ColorSpace;

    use crate::filters::brighten::Brighten;
    use crate::image::Image;
    use crate::traits::OperationsTrait;

    #[test]
    fn saturating_offset_clamps_every_channel() {
        let mut image =
            Image::from_u8(vec![10, 20, 30, 40], 2, 2, ColorSpace::Luma).unwrap();

        Brighten::new(300).execute(&mut image).unwrap();

        assert_eq!(image.data(), [255, 255, 255, 255]);
    }

    #[test]
    fn dimensions_are_preserved() {
        let mut image = Image::fill(100, ColorSpace::RGBA, 7, 3);

        Brighten::new(-40).execute(&mut image).unwrap();

        assert_eq!(image.dimensions(), (7, 3));
        assert_eq!(image.colorspace(), ColorSpace::RGBA);
        assert!(image.data().iter().all(|x| *x == 60));
    }
}

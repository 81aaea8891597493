/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Box blur filter
use log::trace;
use pixfx_imageprocs::box_blur::box_blur;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Perform a box blur
///
/// The window size is a measure of how many pixels are averaged into
/// each output pixel; the greater the size, the more pronounced the
/// blur. Windows reaching past the image edge replicate the border
/// pixel, so output dimensions always equal input dimensions.
#[derive(Default)]
pub struct BoxBlur {
    size: usize
}

impl BoxBlur {
    /// Create a new blur operation.
    ///
    /// # Arguments
    /// - size: Side length of the averaging window, expected odd. A size
    ///   of one is the identity.
    #[must_use]
    pub fn new(size: usize) -> BoxBlur {
        BoxBlur { size }
    }
}

impl OperationsTrait for BoxBlur {
    fn name(&self) -> &'static str {
        "box-blur"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();
        let components = image.colorspace().num_components();

        trace!("Box blur with a {0}x{0} window", self.size);

        let mut scratch_space = vec![0; image.data().len()];

        box_blur(
            image.data_mut(),
            &mut scratch_space,
            width,
            height,
            components,
            self.size
        );

        Ok(())
    }
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
use pixfx_imageprocs::sobel::sobel;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Perform a sobel image derivative.
///
/// This operation calculates the gradient of the image, which represents
/// how quickly pixel values change from one point to another in both the
/// horizontal and vertical directions; its magnitude makes edges stand
/// out against flat regions.
#[derive(Default, Copy, Clone)]
pub struct Sobel;

impl Sobel {
    /// Create a new sobel operation
    #[must_use]
    pub fn new() -> Sobel {
        Self
    }
}

impl OperationsTrait for Sobel {
    fn name(&self) -> &'static str {
        "sobel"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();
        let colorspace = image.colorspace();

        // the kernel reads the whole neighborhood of every pixel, so it
        // cannot run in place
        let source = image.data().to_vec();

        sobel(&source, image.data_mut(), width, height, colorspace);

        Ok(())
    }
}

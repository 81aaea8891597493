/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grayscale filter
use pixfx_imageprocs::grayscale::grayscale;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Convert an image to grayscale.
///
/// Every color channel is replaced with the pixel's BT.601 luminance;
/// alpha is preserved and the buffer keeps its channel count, so the
/// output shape always equals the input shape. Images already stored as
/// Luma pass through unchanged.
#[derive(Default)]
pub struct Grayscale;

impl Grayscale {
    /// Create a new grayscale operation
    #[must_use]
    pub fn new() -> Grayscale {
        Self::default()
    }
}

impl OperationsTrait for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let colorspace = image.colorspace();

        grayscale(image.data_mut(), colorspace);

        Ok(())
    }
}

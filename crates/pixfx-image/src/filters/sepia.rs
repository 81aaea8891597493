/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sepia filter
use pixfx_core::colorspace::ColorSpace;
use pixfx_imageprocs::sepia::sepia;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Apply a sepia tone to an image.
///
/// Needs actual color channels to tone, so grayscale images are not
/// supported. Alpha, where present, is untouched.
#[derive(Default)]
pub struct Sepia;

impl Sepia {
    /// Create a new sepia operation
    #[must_use]
    pub fn new() -> Sepia {
        Self::default()
    }
}

impl OperationsTrait for Sepia {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let colorspace = image.colorspace();

        sepia(image.data_mut(), colorspace);

        Ok(())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::RGB, ColorSpace::RGBA]
    }
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Invert filter
use pixfx_imageprocs::invert::invert;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Invert an image's color channels, `255 - pixel`.
///
/// The alpha channel, where present, is untouched. Applying the
/// operation twice restores the original image.
#[derive(Default)]
pub struct Invert;

impl Invert {
    /// Create a new invert operation
    #[must_use]
    pub fn new() -> Invert {
        Self::default()
    }
}

impl OperationsTrait for Invert {
    fn name(&self) -> &'static str {
        "invert"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let colorspace = image.colorspace();

        invert(image.data_mut(), colorspace);

        Ok(())
    }
}

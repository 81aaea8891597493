/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Unsharp mask filter
use pixfx_imageprocs::unsharpen::unsharpen;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Sharpen an image with an unsharp mask.
///
/// The image is blurred with a box blur of the given window size, the
/// lost detail is scaled by `amount` and added back. An amount of zero
/// leaves the image unchanged.
#[derive(Default)]
pub struct Unsharpen {
    size:   usize,
    amount: f32
}

impl Unsharpen {
    /// Create a new unsharpen operation.
    ///
    /// # Arguments
    /// - size: Window size of the smoothing blur, expected odd.
    /// - amount: Strength of the mask, `1.0` doubles the detail the blur
    ///   removed.
    #[must_use]
    pub fn new(size: usize, amount: f32) -> Unsharpen {
        Unsharpen { size, amount }
    }
}

impl OperationsTrait for Unsharpen {
    fn name(&self) -> &'static str {
        "unsharpen"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();
        let components = image.colorspace().num_components();

        let mut blur_buffer = vec![0; image.data().len()];
        let mut blur_scratch = vec![0; image.data().len()];

        unsharpen(
            image.data_mut(),
            &mut blur_buffer,
            &mut blur_scratch,
            width,
            height,
            components,
            self.size,
            self.amount
        );

        Ok(())
    }
}

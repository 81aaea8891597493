/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits every filter operation implements
use pixfx_core::colorspace::{ColorSpace, ALL_COLORSPACES};

use crate::errors::ImageErrors;
use crate::image::Image;

/// This encapsulates an image operation.
///
/// An operation is a pure, deterministic transform of a single image:
/// identical input pixels and parameters always produce identical output.
/// Operations carry their (already validated) parameters as plain fields,
/// hold no other state and may be shared between worker threads, which is
/// why the trait requires [`Send`] and [`Sync`].
pub trait OperationsTrait: Send + Sync {
    /// Get the name of this operation.
    ///
    /// For operations constructed through the registry this is the
    /// registry identifier, which is what per-image failures are
    /// reported under.
    fn name(&self) -> &'static str;

    /// Execute the operation on the image, manipulating the pixel data
    /// in place.
    ///
    /// Callers go through [`execute`](Self::execute), which confirms the
    /// preconditions this method relies on.
    ///
    /// # Errors
    /// Any operation error is propagated to the caller.
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors>;

    /// Colorspaces the operation can process.
    ///
    /// The default says all of them; operations that need actual color
    /// channels (e.g sepia) narrow this down.
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &ALL_COLORSPACES
    }

    /// Confirm the image is well formed and in a supported colorspace,
    /// then execute the operation.
    ///
    /// # Errors
    /// - [`ImageErrors::DimensionsMisMatch`] or
    ///   [`ImageErrors::ZeroDimension`] for malformed buffers, before the
    ///   operation runs.
    /// - [`ImageErrors::UnsupportedColorspace`] when the image's
    ///   colorspace is not in [`supported_colorspaces`](Self::supported_colorspaces).
    /// - Whatever [`execute_impl`](Self::execute_impl) returns.
    fn execute(&self, image: &mut Image) -> Result<(), ImageErrors> {
        image.confirm_dimensions()?;

        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(
                colorspace,
                self.name(),
                self.supported_colorspaces()
            ));
        }

        self.execute_impl(image)
    }
}

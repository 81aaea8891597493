/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter kernel
//!
//! Calculates the gradient of the image, which represents how quickly
//! pixel values change in the horizontal and vertical directions; the
//! gradient magnitude is what makes edges light up.
//!
//! The window is a 3x3 window with the matrices
//!
//! Gx matrix
//! ```text
//!   -1, 0, 1,
//!   -2, 0, 2,
//!   -1, 0, 1
//! ```
//! Gy matrix
//! ```text
//! -1,-2,-1,
//!  0, 0, 0,
//!  1, 2, 1
//! ```
//!
//! Windows reaching past the image edge replicate the border pixel.
use pixfx_core::colorspace::ColorSpace;

/// Compute the sobel gradient magnitude of every color channel.
///
/// Each color channel is treated as an independent plane; the output
/// for a channel is `min(255, sqrt(Gx^2 + Gy^2))`. The alpha channel,
/// where present, is copied through unchanged.
///
/// # Arguments
/// - in_pixels: Interleaved source pixels, left untouched.
/// - out_pixels: Destination buffer of the same length.
/// - width, height: Image dimensions in pixels.
/// - colorspace: Channel layout of both buffers.
///
/// # Panics
/// If the two buffers differ in length.
pub fn sobel(
    in_pixels: &[u8], out_pixels: &mut [u8], width: usize, height: usize, colorspace: ColorSpace
) {
    assert_eq!(
        in_pixels.len(),
        out_pixels.len(),
        "sobel output length does not match input length"
    );

    let components = colorspace.num_components();
    let color_channels = components - usize::from(colorspace.has_alpha());

    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * components;

            for c in 0..color_channels {
                // 3x3 window sample with replicated borders
                let sample = |dx: isize, dy: isize| -> i32 {
                    let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;

                    i32::from(in_pixels[(sy * width + sx) * components + c])
                };

                let gx = (sample(1, -1) - sample(-1, -1))
                    + 2 * (sample(1, 0) - sample(-1, 0))
                    + (sample(1, 1) - sample(-1, 1));

                let gy = (sample(-1, 1) - sample(-1, -1))
                    + 2 * (sample(0, 1) - sample(0, -1))
                    + (sample(1, 1) - sample(1, -1));

                let magnitude = f64::from(gx * gx + gy * gy).sqrt() as u32;

                out_pixels[offset + c] = magnitude.min(255) as u8;
            }

            if let Some(alpha_pos) = colorspace.alpha_position() {
                out_pixels[offset + alpha_pos] = in_pixels[offset + alpha_pos];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pixfx_core::colorspace::ColorSpace;

    use crate::sobel::sobel;

    #[test]
    fn flat_image_has_no_gradient() {
        let src = vec![131_u8; 6 * 4];
        let mut dst = vec![255_u8; 6 * 4];

        sobel(&src, &mut dst, 6, 4, ColorSpace::Luma);

        assert!(dst.iter().all(|x| *x == 0));
    }

    #[test]
    fn vertical_edge_saturates() {
        // left half black, right half white
        let mut src = vec![0_u8; 4 * 4];
        for row in src.chunks_exact_mut(4) {
            row[2] = 255;
            row[3] = 255;
        }
        let mut dst = vec![0_u8; 4 * 4];

        sobel(&src, &mut dst, 4, 4, ColorSpace::Luma);

        // columns 1 and 2 straddle the edge
        for row in dst.chunks_exact(4) {
            assert_eq!(row[1], 255);
            assert_eq!(row[2], 255);
        }
    }

    #[test]
    fn alpha_is_copied_through() {
        let src = vec![9, 9, 9, 200, 9, 9, 9, 100];
        let mut dst = vec![0_u8; 8];

        sobel(&src, &mut dst, 2, 1, ColorSpace::RGBA);

        assert_eq!(dst[3], 200);
        assert_eq!(dst[7], 100);
    }
}

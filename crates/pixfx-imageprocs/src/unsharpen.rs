/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Unsharp mask filter kernel
//!
//! Sharpening by subtraction: blur the image, take the difference to the
//! original (the detail that the blur removed) and add it back scaled,
//!
//! ```text
//! pix[x,y] = pix[x,y] + amount * (pix[x,y] - blur(pix)[x,y])
//! ```
use crate::box_blur::box_blur;

/// Sharpen interleaved pixels with an unsharp mask.
///
/// # Arguments
/// - in_out_pixels: Interleaved pixel data, sharpened in place.
/// - blur_buffer, blur_scratch: Caller provided buffers of the same
///   length, used for the smoothing pass.
/// - width, height: Image dimensions in pixels.
/// - components: Number of channels per pixel.
/// - size: Window size of the smoothing box blur, expected odd.
/// - amount: Strength of the mask; `0.0` leaves the image unchanged,
///   `1.0` doubles the detail the blur removed.
///
/// # Panics
/// If the scratch buffers are not as long as `in_out_pixels`.
pub fn unsharpen(
    in_out_pixels: &mut [u8], blur_buffer: &mut [u8], blur_scratch: &mut [u8], width: usize,
    height: usize, components: usize, size: usize, amount: f32
) {
    assert_eq!(
        in_out_pixels.len(),
        blur_buffer.len(),
        "blur buffer length does not match pixel length"
    );

    blur_buffer.copy_from_slice(in_out_pixels);
    box_blur(blur_buffer, blur_scratch, width, height, components, size);

    for (pixel, blurred) in in_out_pixels.iter_mut().zip(blur_buffer.iter()) {
        let detail = f32::from(*pixel) - f32::from(*blurred);

        *pixel = (f32::from(*pixel) + amount * detail).clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::unsharpen::unsharpen;

    #[test]
    fn zero_amount_is_identity() {
        let mut pixels = vec![0_u8; 16 * 16];
        nanorand::WyRand::new().fill(&mut pixels);

        let reference = pixels.clone();
        let mut blur_buffer = vec![0_u8; pixels.len()];
        let mut blur_scratch = vec![0_u8; pixels.len()];

        unsharpen(
            &mut pixels,
            &mut blur_buffer,
            &mut blur_scratch,
            16,
            16,
            1,
            5,
            0.0
        );

        assert_eq!(pixels, reference);
    }

    #[test]
    fn flat_image_gains_no_detail() {
        let mut pixels = vec![77_u8; 8 * 8];
        let mut blur_buffer = vec![0_u8; pixels.len()];
        let mut blur_scratch = vec![0_u8; pixels.len()];

        unsharpen(
            &mut pixels,
            &mut blur_buffer,
            &mut blur_scratch,
            8,
            8,
            1,
            3,
            2.0
        );

        assert!(pixels.iter().all(|x| *x == 77));
    }

    #[test]
    fn edges_gain_contrast() {
        // step edge, the bright side must get brighter and the dark side darker
        let mut pixels = vec![0, 0, 0, 200, 200, 200];
        let mut blur_buffer = vec![0_u8; 6];
        let mut blur_scratch = vec![0_u8; 6];

        unsharpen(
            &mut pixels,
            &mut blur_buffer,
            &mut blur_scratch,
            6,
            1,
            1,
            3,
            1.0
        );

        assert!(pixels[2] < 10);
        assert!(pixels[3] > 200);
    }
}

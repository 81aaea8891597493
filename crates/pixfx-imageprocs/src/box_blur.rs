/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Box blur filter kernel
//!
//! A box blur replaces each pixel with the unweighted average of the
//! square window around it,
//!
//! ```text
//! pix[x,y] = (pix[x-r,y-r] + ... + pix[x,y] + ... + pix[x+r,y+r]) / (k*k)
//! ```
//!
//! where `k` is the window size and `r = k/2`. Since every window weight
//! is equal the blur is separable: one horizontal running-window pass and
//! one vertical pass over the result give the same answer as the full
//! two dimensional window, in `O(1)` work per pixel regardless of `k`.
//!
//! Windows reaching past the image edge are filled by replicating the
//! border pixel.

/// Perform a box blur over interleaved pixels.
///
/// # Arguments
/// - in_out_pixels: Interleaved pixel data, blurred in place.
/// - scratch_space: Caller provided buffer of the same length, holds the
///   horizontal pass.
/// - width, height: Image dimensions in pixels.
/// - components: Number of channels per pixel; every channel is blurred
///   independently, including alpha.
/// - size: Window size `k`, expected odd. Sizes below 3 leave the image
///   unchanged since a 1x1 window is the identity.
///
/// # Panics
/// If `scratch_space` is not as long as `in_out_pixels`.
pub fn box_blur(
    in_out_pixels: &mut [u8], scratch_space: &mut [u8], width: usize, height: usize,
    components: usize, size: usize
) {
    assert_eq!(
        in_out_pixels.len(),
        scratch_space.len(),
        "scratch buffer length does not match pixel length"
    );

    if size < 3 || width == 0 || height == 0 || in_out_pixels.is_empty() {
        return;
    }
    let radius = size / 2;
    let row_stride = width * components;

    // horizontal pass, rows are independent
    for y in 0..height {
        let base = y * row_stride;

        for c in 0..components {
            blur_line(
                &in_out_pixels[base + c..],
                &mut scratch_space[base + c..],
                width,
                components,
                radius
            );
        }
    }

    // vertical pass over the horizontal result, columns are independent
    for x in 0..width {
        let base = x * components;

        for c in 0..components {
            blur_line(
                &scratch_space[base + c..],
                &mut in_out_pixels[base + c..],
                height,
                row_stride,
                radius
            );
        }
    }
}

/// Running-window average over one line of samples spaced `stride` apart.
///
/// The window is `2 * radius + 1` samples wide and positions past either
/// end are replicated from the edge sample, so `sum` always holds exactly
/// one window's worth of values.
fn blur_line(src: &[u8], dst: &mut [u8], len: usize, stride: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    let last = len - 1;

    let mut sum = u32::from(src[0]) * (radius as u32 + 1);

    for i in 1..=radius {
        sum += u32::from(src[i.min(last) * stride]);
    }

    for x in 0..len {
        dst[x * stride] = ((sum + window / 2) / window) as u8;

        // slide: the sample entering is clamp(x + radius + 1), the one
        // leaving is clamp(x - radius)
        let entering = u32::from(src[(x + radius + 1).min(last) * stride]);
        let leaving = u32::from(src[x.saturating_sub(radius).min(last) * stride]);

        sum = sum + entering - leaving;
    }
}

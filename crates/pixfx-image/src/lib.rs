/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Batch image filter engine
//!
//! This crate is the engine a host application (GUI, CLI, service) talks
//! to: the host decodes image files into [`Image`](crate::image::Image)
//! buffers, describes what to do as a named
//! [`FilterChain`](crate::chain::FilterChain), and hands both to a
//! [`BatchProcessor`](crate::pipelines::BatchProcessor). The engine
//! validates the chain up front, fans the images out over a bounded
//! worker pool and returns exactly one outcome per image; a failing
//! image never drags its siblings down with it. Encoding the results
//! back to files is the host's business again.
//!
//! Filters are selected by identifier through the
//! [`registry`](crate::registry), which also publishes each filter's
//! parameter schema so a UI can build its controls without hardcoding
//! anything.
//!
//! # Example
//! ```
//! use std::num::NonZeroUsize;
//!
//! use pixfx_core::colorspace::ColorSpace;
//! use pixfx_image::chain::FilterChain;
//! use pixfx_image::image::Image;
//! use pixfx_image::pipelines::{run_batch, CancellationToken, OutcomeStatus};
//!
//! // the host would decode these from files
//! let images = vec![
//!     Image::fill(64, ColorSpace::RGB, 32, 32),
//!     Image::fill(192, ColorSpace::RGBA, 16, 16),
//! ];
//!
//! let mut chain = FilterChain::new();
//! chain
//!     .chain_filter("brightness", &[30.0])
//!     .chain_filter("box-blur", &[3.0]);
//!
//! let results = run_batch(
//!     images,
//!     chain,
//!     NonZeroUsize::new(2).unwrap(),
//!     CancellationToken::new()
//! )
//! .unwrap();
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(results.count(OutcomeStatus::Succeeded), 2);
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod chain;
pub mod errors;
pub mod filters;
pub mod image;
pub mod pipelines;
pub mod registry;
pub mod traits;

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Batch engine behavior: one outcome per input, failure isolation,
//! fail-fast validation and cancellation accounting.
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

use pixfx_core::colorspace::ColorSpace;
use pixfx_image::chain::FilterChain;
use pixfx_image::errors::{ImageErrors, RegistryErrors};
use pixfx_image::image::Image;
use pixfx_image::pipelines::{
    run_batch, BatchEvent, BatchProcessor, CancellationToken, ImageOutcome, OutcomeStatus
};
use pixfx_image::registry::{builtin_registry, FilterDescriptor, FilterRegistry};
use pixfx_image::traits::OperationsTrait;

fn invert_chain() -> FilterChain {
    let mut chain = FilterChain::new();
    chain.add_filter("invert", &[]);
    chain
}

#[test]
fn malformed_image_fails_alone() {
    let mut images: Vec<Image> = (0..4)
        .map(|i| Image::fill((i * 50) as u8, ColorSpace::RGB, 6, 6))
        .collect();

    // zero-length pixel data, deliberately inconsistent with 6x6 RGB
    images.insert(2, Image::from_raw_parts(vec![], 6, 6, ColorSpace::RGB));

    let results = run_batch(
        images,
        invert_chain(),
        NonZeroUsize::new(3).unwrap(),
        CancellationToken::new()
    )
    .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results.count(OutcomeStatus::Succeeded), 4);
    assert_eq!(results.count(OutcomeStatus::Failed), 1);

    match results.outcome(2).unwrap() {
        ImageOutcome::Failed {
            step,
            filter,
            reason
        } => {
            assert_eq!(*step, 0);
            assert_eq!(filter, "invert");
            assert!(matches!(reason, ImageErrors::DimensionsMisMatch(108, 0)));
        }
        other => panic!("expected the malformed image to fail, got {other:?}")
    }
}

#[test]
fn outcomes_are_keyed_by_input_position() {
    let images: Vec<Image> = (0..32)
        .map(|i| Image::fill(i as u8, ColorSpace::Luma, 4, 4))
        .collect();

    let results = run_batch(
        images,
        invert_chain(),
        NonZeroUsize::new(4).unwrap(),
        CancellationToken::new()
    )
    .unwrap();

    assert_eq!(results.len(), 32);

    for (i, outcome) in results.outcomes().iter().enumerate() {
        let image = outcome.image().expect("every image succeeds");

        assert!(image.data().iter().all(|x| *x == 255 - i as u8));
    }
}

#[test]
fn unknown_filter_fails_the_whole_batch() {
    let mut chain = FilterChain::new();
    chain.add_filter("invert", &[]);
    chain.add_filter("emboss", &[]);

    let error = run_batch(
        vec![Image::fill(1, ColorSpace::Luma, 2, 2)],
        chain,
        NonZeroUsize::MIN,
        CancellationToken::new()
    )
    .unwrap_err();

    assert_eq!(error.errors().len(), 1);
    let (step, reason) = &error.errors()[0];
    assert_eq!(*step, 1);
    assert!(matches!(reason, RegistryErrors::UnknownFilter(name) if name == "emboss"));
}

#[test]
fn out_of_range_parameter_fails_validation_not_execution() {
    let mut chain = FilterChain::new();
    chain.add_filter("box-blur", &[0.0]);

    let error = run_batch(
        vec![Image::fill(1, ColorSpace::Luma, 2, 2)],
        chain,
        NonZeroUsize::MIN,
        CancellationToken::new()
    )
    .unwrap_err();

    let (step, reason) = &error.errors()[0];
    assert_eq!(*step, 0);
    assert!(matches!(
        reason,
        RegistryErrors::InvalidParameter { filter, .. } if filter == "box-blur"
    ));
}

#[test]
fn brightness_clamp_example() {
    let image = Image::from_u8(vec![10, 20, 30, 40], 2, 2, ColorSpace::Luma).unwrap();

    let mut chain = FilterChain::new();
    chain.add_filter("brightness", &[300.0]);

    let results = run_batch(
        vec![image],
        chain,
        NonZeroUsize::MIN,
        CancellationToken::new()
    )
    .unwrap();

    let outcome = results.outcome(0).unwrap();
    assert_eq!(outcome.image().unwrap().data(), [255, 255, 255, 255]);
}

#[test]
fn unsupported_colorspace_fails_mid_chain() {
    let images = vec![
        Image::fill(10, ColorSpace::RGB, 4, 4),
        Image::fill(10, ColorSpace::Luma, 4, 4),
    ];

    let mut chain = FilterChain::new();
    chain.add_filter("invert", &[]);
    chain.add_filter("sepia", &[]);

    let results = run_batch(
        images,
        chain,
        NonZeroUsize::new(2).unwrap(),
        CancellationToken::new()
    )
    .unwrap();

    assert_eq!(results.outcome(0).unwrap().status(), OutcomeStatus::Succeeded);

    match results.outcome(1).unwrap() {
        ImageOutcome::Failed { step, filter, .. } => {
            assert_eq!(*step, 1);
            assert_eq!(filter, "sepia");
        }
        other => panic!("expected the grayscale image to fail at sepia, got {other:?}")
    }
}

/// Counts how many images it has processed and cancels the batch once
/// the limit is reached
struct CancelAfter {
    token:     CancellationToken,
    processed: Arc<AtomicUsize>,
    limit:     usize
}

impl OperationsTrait for CancelAfter {
    fn name(&self) -> &'static str {
        "cancel-after"
    }

    fn execute_impl(&self, _image: &mut Image) -> Result<(), ImageErrors> {
        let done = self.processed.fetch_add(1, Ordering::SeqCst) + 1;

        if done >= self.limit {
            self.token.cancel();
        }
        Ok(())
    }
}

#[test]
fn cancellation_accounts_for_every_image() {
    let token = CancellationToken::new();
    let processed = Arc::new(AtomicUsize::new(0));

    let mut registry = FilterRegistry::with_builtins();

    let build_token = token.clone();
    let build_processed = Arc::clone(&processed);
    registry
        .register(FilterDescriptor::new("cancel-after", vec![], move |_| {
            Box::new(CancelAfter {
                token:     build_token.clone(),
                processed: Arc::clone(&build_processed),
                limit:     10
            })
        }))
        .unwrap();

    let images: Vec<Image> = (0..100)
        .map(|_| Image::fill(0, ColorSpace::Luma, 2, 2))
        .collect();

    let mut chain = FilterChain::new();
    chain.add_filter("cancel-after", &[]);

    // a single worker makes the cutoff deterministic
    let results = BatchProcessor::new(chain)
        .with_workers(NonZeroUsize::MIN)
        .with_cancellation(token)
        .run(&registry, images)
        .unwrap();

    assert_eq!(results.len(), 100);
    assert_eq!(results.count(OutcomeStatus::Succeeded), 10);
    assert_eq!(results.count(OutcomeStatus::Cancelled), 90);
    assert_eq!(processed.load(Ordering::SeqCst), 10);
}

#[test]
fn progress_events_mirror_the_state_machine() {
    let (sender, receiver) = mpsc::channel();

    let images = vec![
        Image::fill(5, ColorSpace::RGB, 4, 4),
        Image::fill(9, ColorSpace::RGB, 4, 4),
    ];

    let mut chain = FilterChain::new();
    chain.add_filter("grayscale", &[]);
    chain.add_filter("invert", &[]);

    let results = BatchProcessor::new(chain)
        .with_workers(NonZeroUsize::MIN)
        .with_events(sender)
        .run(builtin_registry(), images)
        .unwrap();

    assert_eq!(results.count(OutcomeStatus::Succeeded), 2);

    let events: Vec<BatchEvent> = receiver.try_iter().collect();

    let started = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::ImageStarted { .. }))
        .count();
    let steps = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::StepStarted { .. }))
        .count();
    let done = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                BatchEvent::ImageDone {
                    status: OutcomeStatus::Succeeded,
                    ..
                }
            )
        })
        .count();

    assert_eq!(started, 2);
    assert_eq!(steps, 4);
    assert_eq!(done, 2);
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pipelines, batch image processing support
//!
//! A [`BatchProcessor`] applies one validated [`FilterChain`] to a
//! collection of images and reports one outcome per image. Images are
//! independent units of work: each is claimed by exactly one worker,
//! walked through the chain step by step, and its failure never affects
//! a sibling. The chain itself is validated once, before any pixel is
//! touched, so a misconfigured batch fails fast instead of partially.
//!
//! Every image moves through `Pending -> Running(step) -> Succeeded |
//! Failed`, with `Cancelled` replacing the terminal state for images
//! that were never dispatched after the [`CancellationToken`] fired.
//! Hosts that want live progress subscribe an `mpsc` sender and receive
//! that same progression as [`BatchEvent`]s.
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
#[cfg(feature = "threads")]
use std::sync::Mutex;
use std::time::Instant;

use log::{info, trace};

use crate::chain::FilterChain;
use crate::errors::{ChainValidationError, ImageErrors};
use crate::image::Image;
use crate::registry::{builtin_registry, FilterRegistry};
use crate::traits::OperationsTrait;

/// A clonable flag used to stop a running batch.
///
/// Cancelling stops idle workers from claiming further images;
/// in-flight images finish (or fail) normally so the result collection
/// stays consistent. Images that were never dispatched are recorded as
/// [`ImageOutcome::Cancelled`].
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>
}

impl CancellationToken {
    /// Create a token in the not-cancelled state
    #[must_use]
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    /// Raise the cancellation signal.
    ///
    /// Idempotent; there is no way to un-cancel a token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Return true if [`cancel`](Self::cancel) has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Terminal state of a single image in a batch
pub enum ImageOutcome {
    /// The whole chain ran, this is the transformed image
    Succeeded(Image),
    /// A chain step failed; the image is dropped and siblings are
    /// unaffected
    Failed {
        /// Zero-based index of the failing step in the chain
        step:   usize,
        /// Identifier of the failing filter
        filter: String,
        /// Why the step failed
        reason: ImageErrors
    },
    /// The batch was cancelled before this image was dispatched
    Cancelled
}

impl ImageOutcome {
    /// The status discriminant of this outcome
    #[must_use]
    pub const fn status(&self) -> OutcomeStatus {
        match self {
            Self::Succeeded(_) => OutcomeStatus::Succeeded,
            Self::Failed { .. } => OutcomeStatus::Failed,
            Self::Cancelled => OutcomeStatus::Cancelled
        }
    }

    /// The transformed image, if the chain ran to completion
    #[must_use]
    pub const fn image(&self) -> Option<&Image> {
        match self {
            Self::Succeeded(image) => Some(image),
            _ => None
        }
    }

    /// Consume the outcome, returning the transformed image if the
    /// chain ran to completion
    #[must_use]
    pub fn into_image(self) -> Option<Image> {
        match self {
            Self::Succeeded(image) => Some(image),
            _ => None
        }
    }
}

impl std::fmt::Debug for ImageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded(image) => f.debug_tuple("Succeeded").field(image).finish(),
            Self::Failed {
                step,
                filter,
                reason
            } => f
                .debug_struct("Failed")
                .field("step", step)
                .field("filter", filter)
                .field("reason", reason)
                .finish(),
            Self::Cancelled => write!(f, "Cancelled")
        }
    }
}

/// Status discriminant of an [`ImageOutcome`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    Cancelled
}

/// Result collection of a batch run.
///
/// Holds exactly one [`ImageOutcome`] per input image, keyed by the
/// input's position in the submitted collection, regardless of the
/// order workers completed in.
#[derive(Debug)]
pub struct BatchResults {
    outcomes: Vec<ImageOutcome>
}

impl BatchResults {
    /// All outcomes, indexed by input position
    #[must_use]
    pub fn outcomes(&self) -> &[ImageOutcome] {
        &self.outcomes
    }

    /// Consume the results, returning the outcomes by input position
    #[must_use]
    pub fn into_outcomes(self) -> Vec<ImageOutcome> {
        self.outcomes
    }

    /// The outcome of the image submitted at `index`
    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<&ImageOutcome> {
        self.outcomes.get(index)
    }

    /// Number of outcomes, always equal to the number of inputs
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Return true if the batch had no inputs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Count the outcomes with the given status
    #[must_use]
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|x| x.status() == status)
            .count()
    }
}

/// Progress notification emitted while a batch runs.
///
/// Sent best effort over the subscribed channel; a dropped receiver
/// never stalls the batch.
#[derive(Clone, Debug)]
pub enum BatchEvent {
    /// An image was claimed by a worker
    ImageStarted { index: usize },
    /// A chain step began executing on an image
    StepStarted {
        index:  usize,
        step:   usize,
        filter: &'static str
    },
    /// An image reached a terminal state
    ImageDone {
        index:  usize,
        status: OutcomeStatus
    }
}

/// Batch processor, one filter chain applied across many images.
///
/// # Example
/// ```
/// use pixfx_core::colorspace::ColorSpace;
/// use pixfx_image::chain::FilterChain;
/// use pixfx_image::image::Image;
/// use pixfx_image::pipelines::BatchProcessor;
/// use pixfx_image::registry::builtin_registry;
///
/// let images = vec![
///     Image::fill(10, ColorSpace::RGB, 8, 8),
///     Image::fill(200, ColorSpace::RGB, 8, 8),
/// ];
///
/// let mut chain = FilterChain::new();
/// chain.chain_filter("grayscale", &[]).chain_filter("invert", &[]);
///
/// let results = BatchProcessor::new(chain)
///     .run(builtin_registry(), images)
///     .unwrap();
///
/// assert_eq!(results.len(), 2);
/// ```
pub struct BatchProcessor {
    chain:   FilterChain,
    workers: NonZeroUsize,
    token:   CancellationToken,
    events:  Option<Sender<BatchEvent>>
}

impl BatchProcessor {
    /// Create a processor for the given chain.
    ///
    /// The worker count defaults to the parallelism the host offers and
    /// the cancellation token starts out not cancelled.
    #[must_use]
    pub fn new(chain: FilterChain) -> BatchProcessor {
        let workers = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);

        BatchProcessor {
            chain,
            workers,
            token: CancellationToken::new(),
            events: None
        }
    }

    /// Bound the worker pool to `workers` threads
    #[must_use]
    pub fn with_workers(mut self, workers: NonZeroUsize) -> BatchProcessor {
        self.workers = workers;
        self
    }

    /// Attach a cancellation token; the caller keeps a clone to cancel
    /// with
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> BatchProcessor {
        self.token = token;
        self
    }

    /// Subscribe a channel to progress events
    #[must_use]
    pub fn with_events(mut self, events: Sender<BatchEvent>) -> BatchProcessor {
        self.events = Some(events);
        self
    }

    /// Apply the chain to every image, blocking until all dispatched
    /// images reached a terminal state.
    ///
    /// The chain is validated and compiled once up front; per-image
    /// failures afterwards are recorded in the result collection and
    /// never abort the batch.
    ///
    /// # Errors
    /// [`ChainValidationError`] if any chain step is unknown or carries
    /// invalid parameters. No image has been touched when this returns.
    pub fn run(
        &self, registry: &FilterRegistry, images: Vec<Image>
    ) -> Result<BatchResults, ChainValidationError> {
        let operations = self.chain.compile(registry)?;

        let count = images.len();

        info!(
            "Starting batch of {count} image(s) with a {} step chain",
            operations.len()
        );
        let start = Instant::now();

        // every image the workers never claim stays Cancelled
        let mut outcomes: Vec<ImageOutcome> = Vec::new();
        outcomes.resize_with(count, || ImageOutcome::Cancelled);

        let completed;

        #[cfg(feature = "threads")]
        {
            completed = self.run_parallel(&operations, images);
        }
        #[cfg(not(feature = "threads"))]
        {
            completed = self.run_serial(&operations, images);
        }

        for (index, outcome) in completed {
            outcomes[index] = outcome;
        }

        info!(
            "Finished batch of {count} image(s) in {} ms",
            start.elapsed().as_millis()
        );

        Ok(BatchResults { outcomes })
    }

    #[cfg(feature = "threads")]
    fn run_parallel(
        &self, operations: &[Box<dyn OperationsTrait>], images: Vec<Image>
    ) -> Vec<(usize, ImageOutcome)> {
        let worker_count = self.workers.get().min(images.len());

        if worker_count == 0 {
            return vec![];
        }
        trace!("Running batch on {worker_count} worker thread(s)");

        let queue = Mutex::new(images.into_iter().enumerate());

        std::thread::scope(|s| {
            let mut handles = Vec::with_capacity(worker_count);

            for _ in 0..worker_count {
                handles.push(s.spawn(|| {
                    let mut completed = vec![];

                    loop {
                        // observe cancellation before claiming, never after:
                        // a claimed image always runs to a terminal state
                        if self.token.is_cancelled() {
                            break;
                        }
                        let next = queue.lock().unwrap().next();

                        let Some((index, image)) = next else { break };

                        completed.push((index, self.process_one(index, image, operations)));
                    }
                    completed
                }));
            }
            handles
                .into_iter()
                .flat_map(|x| x.join().unwrap())
                .collect()
        })
    }

    #[cfg(not(feature = "threads"))]
    fn run_serial(
        &self, operations: &[Box<dyn OperationsTrait>], images: Vec<Image>
    ) -> Vec<(usize, ImageOutcome)> {
        trace!("Running batch in single threaded mode");

        let mut completed = vec![];

        for (index, image) in images.into_iter().enumerate() {
            if self.token.is_cancelled() {
                break;
            }
            completed.push((index, self.process_one(index, image, operations)));
        }
        completed
    }

    /// Walk one image through the chain; any step error is terminal for
    /// this image only
    fn process_one(
        &self, index: usize, mut image: Image, operations: &[Box<dyn OperationsTrait>]
    ) -> ImageOutcome {
        self.send_event(|| BatchEvent::ImageStarted { index });

        for (step, operation) in operations.iter().enumerate() {
            let name = operation.name();

            self.send_event(|| BatchEvent::StepStarted {
                index,
                step,
                filter: name
            });
            trace!("Running `{name}` on image {index}");

            let start = Instant::now();

            if let Err(reason) = operation.execute(&mut image) {
                self.send_event(|| BatchEvent::ImageDone {
                    index,
                    status: OutcomeStatus::Failed
                });

                return ImageOutcome::Failed {
                    step,
                    filter: name.to_string(),
                    reason
                };
            }

            trace!(
                "Finished `{name}` on image {index} in {} ms",
                start.elapsed().as_millis()
            );
        }

        self.send_event(|| BatchEvent::ImageDone {
            index,
            status: OutcomeStatus::Succeeded
        });

        ImageOutcome::Succeeded(image)
    }

    fn send_event<F: FnOnce() -> BatchEvent>(&self, event: F) {
        if let Some(sender) = &self.events {
            let _ = sender.send(event());
        }
    }
}

/// Apply a filter chain to a collection of images using the built-in
/// filter registry.
///
/// Blocks until every dispatched image reached a terminal state or
/// cancellation drained the in-flight work.
///
/// # Errors
/// [`ChainValidationError`] if the chain fails validation; no image has
/// been touched when this returns.
pub fn run_batch(
    images: Vec<Image>, chain: FilterChain, workers: NonZeroUsize, token: CancellationToken
) -> Result<BatchResults, ChainValidationError> {
    BatchProcessor::new(chain)
        .with_workers(workers)
        .with_cancellation(token)
        .run(builtin_registry(), images)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use pixfx_core::colorspace::ColorSpace;

    use crate::chain::FilterChain;
    use crate::image::Image;
    use crate::pipelines::{run_batch, BatchProcessor, CancellationToken, OutcomeStatus};
    use crate::registry::builtin_registry;

    #[test]
    fn empty_batch_yields_empty_results() {
        let results = BatchProcessor::new(FilterChain::new())
            .run(builtin_registry(), vec![])
            .unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn empty_chain_passes_images_through() {
        let image = Image::fill(42, ColorSpace::Luma, 4, 4);

        let results = run_batch(
            vec![image],
            FilterChain::new(),
            NonZeroUsize::MIN,
            CancellationToken::new()
        )
        .unwrap();

        let outcome = results.outcome(0).unwrap();
        assert_eq!(outcome.status(), OutcomeStatus::Succeeded);
        assert_eq!(outcome.image().unwrap().data(), vec![42; 16]);
    }

    #[test]
    fn pre_cancelled_batch_dispatches_nothing() {
        let token = CancellationToken::new();
        token.cancel();

        let images = vec![
            Image::fill(1, ColorSpace::Luma, 2, 2),
            Image::fill(2, ColorSpace::Luma, 2, 2),
        ];

        let results = run_batch(images, FilterChain::new(), NonZeroUsize::MIN, token).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.count(OutcomeStatus::Cancelled), 2);
    }
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Filter chains: an ordered list of named filter applications
//!
//! A chain is pure description, `(identifier, parameter values)` pairs
//! applied left to right; it only meets the actual filter implementations
//! when validated or compiled against a [`FilterRegistry`]. Validation is
//! all-or-nothing: every step is checked and every problem reported
//! before a single image is processed.
use crate::errors::{ChainValidationError, RegistryErrors};
use crate::registry::{FilterDescriptor, FilterRegistry};
use crate::traits::OperationsTrait;

/// One step of a filter chain
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainStep {
    filter: String,
    params: Vec<f64>
}

impl ChainStep {
    /// The filter identifier this step refers to
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Parameter values, in the filter's schema order
    #[must_use]
    pub fn params(&self) -> &[f64] {
        &self.params
    }
}

/// An ordered sequence of filter applications.
///
/// # Example
/// ```
/// use pixfx_image::chain::FilterChain;
/// use pixfx_image::registry::builtin_registry;
///
/// let mut chain = FilterChain::new();
/// chain
///     .chain_filter("grayscale", &[])
///     .chain_filter("brightness", &[25.0])
///     .chain_filter("box-blur", &[5.0]);
///
/// assert!(chain.validate(builtin_registry()).is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterChain {
    steps: Vec<ChainStep>
}

impl FilterChain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> FilterChain {
        FilterChain::default()
    }

    /// Append a filter application to the chain
    pub fn add_filter(&mut self, filter: &str, params: &[f64]) {
        self.steps.push(ChainStep {
            filter: filter.to_string(),
            params: params.to_vec()
        });
    }

    /// Append a filter application, builder style
    pub fn chain_filter(&mut self, filter: &str, params: &[f64]) -> &mut FilterChain {
        self.add_filter(filter, params);
        self
    }

    /// The steps of this chain in application order
    #[must_use]
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Number of steps in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Return true if the chain has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check every step against the registry without building anything.
    ///
    /// # Errors
    /// [`ChainValidationError`] aggregating every unknown identifier and
    /// parameter problem, each tagged with its step index.
    pub fn validate(&self, registry: &FilterRegistry) -> Result<(), ChainValidationError> {
        let mut errors = vec![];

        for (step_index, step) in self.steps.iter().enumerate() {
            if let Err(error) = check_step(registry, step) {
                errors.push((step_index, error));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ChainValidationError::new(errors))
        }
    }

    /// Validate the chain and construct its operations in application
    /// order.
    ///
    /// # Errors
    /// Same as [`validate`](Self::validate); on any error nothing is
    /// built.
    pub fn compile(
        &self, registry: &FilterRegistry
    ) -> Result<Vec<Box<dyn OperationsTrait>>, ChainValidationError> {
        let mut operations = Vec::with_capacity(self.steps.len());
        let mut errors = vec![];

        for (step_index, step) in self.steps.iter().enumerate() {
            match check_step(registry, step) {
                Ok(descriptor) => operations.push(descriptor.build(step.params())),
                Err(error) => errors.push((step_index, error))
            }
        }

        if errors.is_empty() {
            Ok(operations)
        } else {
            Err(ChainValidationError::new(errors))
        }
    }
}

/// Resolve one step and validate its parameters against the schema
fn check_step<'a>(
    registry: &'a FilterRegistry, step: &ChainStep
) -> Result<&'a FilterDescriptor, RegistryErrors> {
    let descriptor = registry.lookup(step.filter())?;

    descriptor.validate_params(step.params())?;

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use crate::chain::FilterChain;
    use crate::errors::RegistryErrors;
    use crate::registry::builtin_registry;

    #[test]
    fn empty_chain_is_valid() {
        assert!(FilterChain::new().validate(builtin_registry()).is_ok());
    }

    #[test]
    fn unknown_filter_fails_validation() {
        let mut chain = FilterChain::new();
        chain.add_filter("invert", &[]);
        chain.add_filter("vignette", &[]);

        let error = chain.validate(builtin_registry()).unwrap_err();

        assert_eq!(error.errors().len(), 1);
        let (step, reason) = &error.errors()[0];
        assert_eq!(*step, 1);
        assert!(matches!(reason, RegistryErrors::UnknownFilter(_)));
    }

    #[test]
    fn every_broken_step_is_reported() {
        let mut chain = FilterChain::new();
        chain
            .chain_filter("vignette", &[])
            .chain_filter("box-blur", &[2.0])
            .chain_filter("grayscale", &[]);

        let error = chain.validate(builtin_registry()).unwrap_err();

        let steps: Vec<usize> = error.errors().iter().map(|(step, _)| *step).collect();
        assert_eq!(steps, [0, 1]);
    }

    #[test]
    fn compile_builds_in_application_order() {
        let mut chain = FilterChain::new();
        chain
            .chain_filter("grayscale", &[])
            .chain_filter("invert", &[]);

        let operations = chain.compile(builtin_registry()).unwrap();

        let names: Vec<&str> = operations.iter().map(|op| op.name()).collect();
        assert_eq!(names, ["grayscale", "invert"]);
    }
}

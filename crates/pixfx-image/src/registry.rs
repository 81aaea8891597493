/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The filter registry: mapping filter identifiers to their parameter
//! schemas and constructors
//!
//! The registry is what lets hosts select filters by name: each entry is
//! a [`FilterDescriptor`] holding the identifier, the ordered parameter
//! schema a UI can render controls from, and a constructor producing the
//! boxed operation once parameter values have been validated.
//!
//! Registration happens once, at startup; afterwards the registry is
//! read-only and freely shared across batch workers. The built-in filter
//! set is available process-wide through [`builtin_registry`].
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::errors::RegistryErrors;
use crate::filters::box_blur::BoxBlur;
use crate::filters::brighten::Brighten;
use crate::filters::grayscale::Grayscale;
use crate::filters::invert::Invert;
use crate::filters::sepia::Sepia;
use crate::filters::sobel::Sobel;
use crate::filters::unsharpen::Unsharpen;
use crate::traits::OperationsTrait;

/// What values a parameter accepts, beyond its range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    /// Any integral value
    Int,
    /// An odd integral value, used by window-size parameters
    OddInt,
    /// Any value
    Float
}

impl ParamKind {
    /// Short human readable description, used in validation errors
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Int => "an integer",
            Self::OddInt => "an odd integer",
            Self::Float => "a number"
        }
    }
}

/// Schema for a single numeric filter parameter
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSpec {
    name:    String,
    kind:    ParamKind,
    min:     f64,
    max:     f64,
    default: f64
}

impl ParamSpec {
    /// Describe an integer parameter valid in `[min, max]`
    #[must_use]
    pub fn int(name: &str, min: i64, max: i64, default: i64) -> ParamSpec {
        ParamSpec {
            name:    name.to_string(),
            kind:    ParamKind::Int,
            min:     min as f64,
            max:     max as f64,
            default: default as f64
        }
    }

    /// Describe an odd integer parameter valid in `[min, max]`
    #[must_use]
    pub fn odd_int(name: &str, min: i64, max: i64, default: i64) -> ParamSpec {
        ParamSpec {
            name:    name.to_string(),
            kind:    ParamKind::OddInt,
            min:     min as f64,
            max:     max as f64,
            default: default as f64
        }
    }

    /// Describe a float parameter valid in `[min, max]`
    #[must_use]
    pub fn float(name: &str, min: f64, max: f64, default: f64) -> ParamSpec {
        ParamSpec {
            name: name.to_string(),
            kind: ParamKind::Float,
            min,
            max,
            default
        }
    }

    /// The parameter name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What values the parameter accepts, beyond its range
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Smallest accepted value
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest accepted value
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Value a UI control should start out with
    #[must_use]
    pub const fn default(&self) -> f64 {
        self.default
    }

    /// Return true if `value` satisfies this spec
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        match self.kind {
            ParamKind::Float => true,
            ParamKind::Int => value.fract() == 0.0,
            ParamKind::OddInt => value.fract() == 0.0 && (value as i64).rem_euclid(2) == 1
        }
    }
}

type BuildFilter = Box<dyn Fn(&[f64]) -> Box<dyn OperationsTrait> + Send + Sync>;

/// A registry entry: identifier, parameter schema and constructor
pub struct FilterDescriptor {
    name:   String,
    params: Vec<ParamSpec>,
    build:  BuildFilter
}

impl FilterDescriptor {
    /// Create a new descriptor.
    ///
    /// `build` is handed the parameter values in schema order and may
    /// assume they already passed [`validate_params`](Self::validate_params);
    /// the chain compiler upholds that.
    pub fn new<F>(name: &str, params: Vec<ParamSpec>, build: F) -> FilterDescriptor
    where
        F: Fn(&[f64]) -> Box<dyn OperationsTrait> + Send + Sync + 'static
    {
        FilterDescriptor {
            name: name.to_string(),
            params,
            build: Box::new(build)
        }
    }

    /// The filter identifier
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered parameter schema
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Check parameter count and each value against the schema.
    ///
    /// # Errors
    /// - [`RegistryErrors::WrongParameterCount`] on a count mismatch.
    /// - [`RegistryErrors::InvalidParameter`] naming the first offending
    ///   parameter and its expected range.
    pub fn validate_params(&self, values: &[f64]) -> Result<(), RegistryErrors> {
        if values.len() != self.params.len() {
            return Err(RegistryErrors::WrongParameterCount {
                filter:   self.name.clone(),
                expected: self.params.len(),
                found:    values.len()
            });
        }
        for (spec, value) in self.params.iter().zip(values) {
            if !spec.accepts(*value) {
                return Err(RegistryErrors::InvalidParameter {
                    filter: self.name.clone(),
                    spec:   spec.clone(),
                    found:  *value
                });
            }
        }
        Ok(())
    }

    /// Construct the operation from validated parameter values
    #[must_use]
    pub fn build(&self, values: &[f64]) -> Box<dyn OperationsTrait> {
        (self.build)(values)
    }
}

impl std::fmt::Debug for FilterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Maps filter identifiers to their descriptors.
///
/// Populate it once at startup (or take [`builtin_registry`]) and treat
/// it as read-only while batches run.
#[derive(Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, FilterDescriptor>
}

impl FilterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> FilterRegistry {
        FilterRegistry::default()
    }

    /// Create a registry holding every built-in filter
    #[must_use]
    pub fn with_builtins() -> FilterRegistry {
        let mut registry = FilterRegistry::new();

        let builtins = [
            FilterDescriptor::new(
                "box-blur",
                vec![ParamSpec::odd_int("size", 1, 255, 3)],
                |p| Box::new(BoxBlur::new(p[0] as usize))
            ),
            FilterDescriptor::new(
                "brightness",
                vec![ParamSpec::int(
                    "offset",
                    i64::from(i16::MIN),
                    i64::from(i16::MAX),
                    0
                )],
                |p| Box::new(Brighten::new(p[0] as i16))
            ),
            FilterDescriptor::new("grayscale", vec![], |_| Box::new(Grayscale::new())),
            FilterDescriptor::new("invert", vec![], |_| Box::new(Invert::new())),
            FilterDescriptor::new("sepia", vec![], |_| Box::new(Sepia::new())),
            FilterDescriptor::new("sobel", vec![], |_| Box::new(Sobel::new())),
            FilterDescriptor::new(
                "unsharpen",
                vec![
                    ParamSpec::odd_int("size", 1, 255, 5),
                    ParamSpec::float("amount", 0.0, 10.0, 1.0),
                ],
                |p| Box::new(Unsharpen::new(p[0] as usize, p[1] as f32))
            ),
        ];

        for descriptor in builtins {
            // identifiers above are distinct, registration cannot fail
            let _ = registry.register(descriptor);
        }
        registry
    }

    /// Add a descriptor to the registry.
    ///
    /// # Errors
    /// [`RegistryErrors::DuplicateFilter`] if the identifier is already
    /// registered.
    pub fn register(&mut self, descriptor: FilterDescriptor) -> Result<(), RegistryErrors> {
        if self.filters.contains_key(descriptor.name()) {
            return Err(RegistryErrors::DuplicateFilter(
                descriptor.name().to_string()
            ));
        }
        self.filters
            .insert(descriptor.name().to_string(), descriptor);

        Ok(())
    }

    /// Resolve a filter identifier to its descriptor.
    ///
    /// # Errors
    /// [`RegistryErrors::UnknownFilter`] if the identifier is absent.
    pub fn lookup(&self, name: &str) -> Result<&FilterDescriptor, RegistryErrors> {
        self.filters
            .get(name)
            .ok_or_else(|| RegistryErrors::UnknownFilter(name.to_string()))
    }

    /// Validate parameter values for a named filter.
    ///
    /// # Errors
    /// Lookup and schema errors, see [`FilterDescriptor::validate_params`].
    pub fn validate_params(&self, name: &str, values: &[f64]) -> Result<(), RegistryErrors> {
        self.lookup(name)?.validate_params(values)
    }

    /// Every registered filter in identifier order, for populating UI
    /// controls
    pub fn list(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.values()
    }

    /// Number of registered filters
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Return true if no filter is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// The process-wide registry of built-in filters.
///
/// Initialized on first use and never mutated afterwards, so it can be
/// read concurrently by any number of batch workers.
pub fn builtin_registry() -> &'static FilterRegistry {
    static REGISTRY: OnceLock<FilterRegistry> = OnceLock::new();

    REGISTRY.get_or_init(FilterRegistry::with_builtins)
}

/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use pixfx_core::colorspace::ColorSpace;

use crate::registry::ParamSpec;

/// Errors that may occur while operating on a single image.
///
/// These are per-image errors: the batch processor records them in that
/// image's outcome and moves on, they never abort sibling images.
pub enum ImageErrors {
    /// A filter cannot process the colorspace the image is stored in.
    ///
    /// Contains the colorspace found, the name of the operation and the
    /// colorspaces the operation supports.
    UnsupportedColorspace(ColorSpace, &'static str, &'static [ColorSpace]),
    /// The pixel buffer length does not match what the image dimensions
    /// require. Contains the expected and the found length.
    DimensionsMisMatch(usize, usize),
    /// A dimension of the image is zero
    ZeroDimension(&'static str),
    /// Generic errors
    GenericStr(&'static str),
    /// Generic errors which have more context
    GenericString(String)
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedColorspace(present, operation, supported) => {
                write!(
                    f,
                    "unsupported colorspace {present:?} for the operation `{operation}`, supported colorspaces are {supported:?}"
                )
            }
            Self::DimensionsMisMatch(expected, found) => {
                write!(
                    f,
                    "pixel buffer length mismatch, expected {expected} bytes but found {found}"
                )
            }
            Self::ZeroDimension(dimension) => {
                write!(f, "image {dimension} is zero")
            }
            Self::GenericStr(err) => write!(f, "{err}"),
            Self::GenericString(err) => write!(f, "{err}")
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for ImageErrors {}

impl From<String> for ImageErrors {
    fn from(s: String) -> ImageErrors {
        ImageErrors::GenericString(s)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(s: &'static str) -> ImageErrors {
        ImageErrors::GenericStr(s)
    }
}

/// Errors surfaced by the filter registry, always synchronously and
/// before any batch work begins.
pub enum RegistryErrors {
    /// A filter with this identifier is already registered
    DuplicateFilter(String),
    /// No filter with this identifier is registered
    UnknownFilter(String),
    /// A chain step supplied the wrong number of parameter values.
    /// Contains the filter identifier, the expected count and the found
    /// count.
    WrongParameterCount {
        filter:   String,
        expected: usize,
        found:    usize
    },
    /// A parameter value fell outside its schema.
    /// Contains the filter identifier, the offending spec and the value
    /// found.
    InvalidParameter {
        filter: String,
        spec:   ParamSpec,
        found:  f64
    }
}

impl Display for RegistryErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFilter(name) => {
                write!(f, "a filter named `{name}` is already registered")
            }
            Self::UnknownFilter(name) => {
                write!(f, "no filter named `{name}` is registered")
            }
            Self::WrongParameterCount {
                filter,
                expected,
                found
            } => {
                write!(
                    f,
                    "filter `{filter}` takes {expected} parameter(s) but {found} were supplied"
                )
            }
            Self::InvalidParameter {
                filter,
                spec,
                found
            } => {
                write!(
                    f,
                    "invalid value {found} for parameter `{}` of filter `{filter}`, expected {} in [{}, {}]",
                    spec.name(),
                    spec.kind().describe(),
                    spec.min(),
                    spec.max()
                )
            }
        }
    }
}

impl Debug for RegistryErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for RegistryErrors {}

/// Aggregate of everything wrong with a filter chain.
///
/// Produced by chain validation before any image is touched; each entry
/// names the zero-based chain step it belongs to. A batch whose chain
/// fails validation never partially runs.
pub struct ChainValidationError {
    errors: Vec<(usize, RegistryErrors)>
}

impl ChainValidationError {
    pub(crate) fn new(errors: Vec<(usize, RegistryErrors)>) -> ChainValidationError {
        ChainValidationError { errors }
    }

    /// Every validation failure, paired with the chain step it occurred at
    #[must_use]
    pub fn errors(&self) -> &[(usize, RegistryErrors)] {
        &self.errors
    }
}

impl Display for ChainValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "chain validation failed with {} error(s)", self.errors.len())?;

        for (step, error) in &self.errors {
            writeln!(f, "  step {step}: {error}")?;
        }
        Ok(())
    }
}

impl Debug for ChainValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for ChainValidationError {}

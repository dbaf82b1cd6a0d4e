// Copyright 2026 review-sift Contributors
// SPDX-License-Identifier: Apache-2.0

//! review-sift — find a movie's user reviews and sort them into positive and
//! negative lists.
//!
//! A run is locate → extract → classify/present. Each [`source::Source`]
//! pairs one [`locate::Locator`] with one [`extract::Extractor`].

#![allow(clippy::new_without_default)]

pub mod acquisition;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod present;
pub mod renderer;
pub mod source;
pub mod types;

pub use error::{SiftError, SiftResult};
pub use types::{Classified, ReviewRecord, Thresholds};

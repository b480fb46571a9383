//! Question-bank normalization core.
//!
//! This crate turns question-bank JSON files of several historical shapes
//! into one canonical question representation, and provides the supporting
//! pieces the rest of quizdeck builds on: allow-listed file loading, data
//! folder cataloging, and validation warnings.

pub mod catalog;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod resolve;
pub mod text;
pub mod validate;

//! Important-header assembly and client-hint quality scoring.
//!
//! The flow is: a [`HeaderRegistry`] built from the engine's header list,
//! [`assemble`] to pick those headers out of a request, and a
//! [`QualityClassifier`] to score what was found. Everything here is pure
//! and allocation-light; nothing blocks or performs I/O.

pub mod assembler;
pub mod quality;
pub mod registry;

pub use assembler::{ImportantHeaders, assemble};
pub use quality::{HeaderQuality, QualityClassifier, QualityMarkers};
pub use registry::HeaderRegistry;

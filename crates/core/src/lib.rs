//! `shopsim-core` — simulation foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO): the error model,
//! the aggregate contract, run identifiers, value objects, and the injected
//! randomness seam.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod rng;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::RunId;
pub use rng::{RandomSource, ScriptedSource, SeededSource};
pub use value_object::{clamp_finite, ValueObject};

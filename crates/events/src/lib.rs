//! Domain events, envelopes, and read-model projections.

pub mod command;
pub mod envelope;
pub mod event;
pub mod projection;
pub mod runner;

pub use command::execute;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use projection::Projection;
pub use runner::{ProjectionCursor, ProjectionError, ProjectionRunner};

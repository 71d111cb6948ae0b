use crate::{Event, EventEnvelope};

/// A projection builds a read model from an append-only event stream.
///
/// Read models are **disposable**: they can be dropped and rebuilt from the
/// run journal at any time. The journal is the source of truth.
///
/// Use [`crate::ProjectionRunner`] to feed envelopes; it rejects envelopes from
/// another run and non-monotonic sequence numbers, so `apply` itself only has
/// to fold.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event to the projection, updating the read model.
    ///
    /// Events that are irrelevant to this projection are ignored.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);
}

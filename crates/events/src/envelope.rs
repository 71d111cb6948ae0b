use serde::{Deserialize, Serialize};

use shopsim_core::RunId;

/// Envelope for an event, containing run + journal metadata.
///
/// This is the unit appended to a run's in-memory journal.
///
/// Notes:
/// - `run_id` scopes the envelope to one simulation run.
/// - **Append-only**: `sequence_number` increases monotonically within a run,
///   starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    run_id: RunId,
    day: u32,

    /// Monotonically increasing position in the run journal.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(run_id: RunId, day: u32, sequence_number: u64, payload: E) -> Self {
        Self {
            run_id,
            day,
            sequence_number,
            payload,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

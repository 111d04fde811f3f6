//! Shared test mocks and utilities for the Stagehand engine.

mod clock;
mod repository;
mod rng;

pub use clock::{AdjustableClock, FixedClock};
pub use repository::{FailingCharacterRepository, InMemoryCharacterRepository};
pub use rng::{MockRng, SequenceRng};

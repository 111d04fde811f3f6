//! Stagehand — deterministic dice bag.
//!
//! Every random decision the engine makes (action handles, chance rolls,
//! damage jitter) goes through a [`DiceBag`], which only ever reads from an
//! injected [`DeterministicRng`](stagehand_core::rng::DeterministicRng). Two
//! bags over identically seeded generators, driven with the same call
//! sequence, produce identical output.

mod bag;
mod chance;

pub use bag::{ALPHANUMERIC, DiceBag};
pub use chance::WinChance;

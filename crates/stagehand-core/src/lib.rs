//! Stagehand Core — shared domain abstractions.
//!
//! This crate defines the traits and types every other Stagehand crate
//! depends on: time, randomness, commands, and the domain error. It contains
//! no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod rng;
